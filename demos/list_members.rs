//! Lists the first members of an audience using an API key from the environment.
//!
//! ```sh
//! MAILCHIMP_API_KEY=0123456789abcdef-us2 cargo run --example list_members -- d3ed40bd7c
//! ```

// std
use std::{env, time::Duration};
// crates.io
use color_eyre::{Result, eyre::eyre};
use mailchimp3::{endpoint::Endpoint, reqwest::Client};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let api_key = env::var("MAILCHIMP_API_KEY")?;
	let list_id = env::args().nth(1).ok_or_else(|| eyre!("Usage: list_members <list-id>."))?;
	let root = Endpoint::builder()
		.basic_auth_key(api_key)
		.http_client(Client::builder().timeout(Duration::from_secs(10)).build()?)
		.build()?;
	let members = root.path(["lists", list_id.as_str(), "members"]);
	let page = members.get(&[("count", "10"), ("fields", "members.email_address")]).await?;

	for member in page["members"].as_array().into_iter().flatten() {
		println!("{}", member["email_address"]);
	}

	if let Some(last) = members.last_result() {
		println!("Last response status: {}.", last.status);
	}

	Ok(())
}
