//! Dynamic MailChimp API client—derive resource paths on the fly, call them with typed errors,
//! and finish the OAuth 2.0 authorization-code handshake in one crate.
//!
//! ```no_run
//! # async fn demo() -> mailchimp3::error::Result<()> {
//! use mailchimp3::endpoint::Endpoint;
//!
//! let root = Endpoint::new("0123456789abcdef-us2")?;
//! let members = root.path(["lists", "d3ed40bd7c", "members"]);
//! let page = members.get(&[("count", "10")]).await?;
//!
//! println!("{page}");
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod endpoint;
pub mod error;
pub mod http;
pub mod oauth;
pub mod obs;

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError, StatusCode};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Map, Value};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use serde_json;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
