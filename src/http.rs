//! Transport primitives shared by endpoints and the OAuth helper.
//!
//! The module exposes [`ReqwestHttpClient`] so callers can hand in a preconfigured
//! [`ReqwestClient`] (timeouts, proxies, TLS roots) and [`ResponseSlot`], the holder
//! every endpoint uses to keep the most recent [`RawResponse`] around for diagnostics.

// std
use std::ops::Deref;
// crates.io
use reqwest::{Response, header::HeaderMap};
// self
use crate::{_prelude::*, error};

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Cloning is cheap; every clone shares the same connection pool. Timeouts and other
/// cancellation policies must be configured on the wrapped client.
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Sends a prepared request and buffers the full response.
	pub(crate) async fn execute(&self, request: reqwest::RequestBuilder) -> Result<RawResponse> {
		let response = request.send().await.map_err(error::map_reqwest_error)?;

		RawResponse::read(response).await
	}
}
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// Fully buffered HTTP response as received from the service.
#[derive(Clone, Debug)]
pub struct RawResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response headers.
	pub headers: HeaderMap,
	/// Response body decoded as text.
	pub body: String,
}
impl RawResponse {
	async fn read(response: Response) -> Result<Self> {
		let status = response.status().as_u16();
		let headers = response.headers().to_owned();
		let body = response.text().await.map_err(error::map_reqwest_error)?;

		Ok(Self { status, headers, body })
	}

	/// Returns `true` for `2xx` statuses.
	pub fn is_success(&self) -> bool {
		StatusCode::from_u16(self.status).map(|code| code.is_success()).unwrap_or(false)
	}
}

/// Single-entry slot holding the most recent [`RawResponse`] of an endpoint.
///
/// The slot is overwritten by every request that receives a response, whatever the
/// outcome. Clones share the same storage.
#[derive(Clone, Debug, Default)]
pub struct ResponseSlot(Arc<Mutex<Option<RawResponse>>>);
impl ResponseSlot {
	/// Stores the response of the current request.
	pub fn store(&self, response: RawResponse) {
		*self.0.lock() = Some(response);
	}

	/// Returns a copy of the captured response, if any.
	pub fn get(&self) -> Option<RawResponse> {
		self.0.lock().clone()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn response(status: u16) -> RawResponse {
		RawResponse { status, headers: HeaderMap::new(), body: String::new() }
	}

	#[test]
	fn slot_keeps_only_the_latest_response() {
		let slot = ResponseSlot::default();

		assert!(slot.get().is_none());

		slot.store(response(200));
		slot.store(response(404));

		assert_eq!(slot.get().map(|r| r.status), Some(404));
		assert_eq!(slot.clone().get().map(|r| r.status), Some(404));
	}

	#[test]
	fn success_range_matches_2xx() {
		assert!(response(204).is_success());
		assert!(!response(302).is_success());
		assert!(!response(1000).is_success());
	}
}
