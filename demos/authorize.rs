//! Walks through the OAuth handshake: print the authorize URL, then exchange the code the
//! redirect handler received.
//!
//! ```sh
//! MAILCHIMP_CLIENT_ID=... MAILCHIMP_CLIENT_SECRET=... cargo run --example authorize
//! MAILCHIMP_CLIENT_ID=... MAILCHIMP_CLIENT_SECRET=... cargo run --example authorize -- <code>
//! ```

// std
use std::env;
// crates.io
use color_eyre::Result;
use mailchimp3::oauth::{OAuth, OAuthConfig};

const REDIRECT_URI: &str = "http://127.0.0.1:8000/oauth/callback";

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let oauth = OAuth::new(OAuthConfig::from_env()?);

	let Some(code) = env::args().nth(1) else {
		let state = OAuth::generate_state();

		println!("Send your user to {}.", oauth.authorize_url(REDIRECT_URI, Some(&state))?);
		println!("Check that the callback echoes state `{state}`.");

		return Ok(());
	};
	let auth = oauth.complete_auth(&code, REDIRECT_URI).await?;

	println!(
		"Authorized account {:?} in data center {}.",
		auth.metadata.accountname, auth.metadata.dc
	);

	let ping = auth.endpoint()?.resource("ping").get(&()).await?;

	println!("Ping: {ping}.");

	Ok(())
}
