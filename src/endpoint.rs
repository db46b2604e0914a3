//! Dynamic resource handles for the MailChimp REST API.
//!
//! An [`Endpoint`] is one URL path node plus the credential and API version needed to
//! call it. Children are derived with [`Endpoint::resource`] (one segment) or
//! [`Endpoint::path`] (several), memoized per parent, and inherit everything but the
//! URL. Every verb resolves to the parsed JSON body or an [`Error`]; see
//! [`Endpoint::get`] for the response contract.
//!
//! # Concurrency
//!
//! Endpoints are meant for single-owner use. The child cache, the lazy connection and
//! the last-result slot sit behind short-lived locks, so sharing an endpoint between
//! tasks is memory-safe, but [`Endpoint::last_result`] then reflects whichever call
//! finished last.

/// Builder API for root endpoints.
pub mod builder;
pub mod credential;
pub mod version;

mod body;
mod response;

pub use builder::*;
pub use credential::*;
pub use version::*;

// crates.io
use reqwest::{Method, RequestBuilder, header::CONTENT_TYPE};
// self
use crate::{
	_prelude::*,
	error::ConfigError,
	http::{RawResponse, ReqwestHttpClient, ResponseSlot},
	obs::{self, CallKind},
};

/// Handle for one REST resource path.
pub struct Endpoint {
	url: String,
	credential: Option<Credential>,
	version: ApiVersion,
	http_client: ReqwestHttpClient,
	connection: Mutex<Option<Arc<Connection>>>,
	children: Mutex<HashMap<String, Arc<Endpoint>>>,
	last_result: ResponseSlot,
}
impl Endpoint {
	/// Creates a builder for a root endpoint.
	pub fn builder() -> EndpointBuilder {
		EndpointBuilder::default()
	}

	/// Creates a V3 root endpoint from an API key, deriving the data center from its suffix.
	pub fn new(basic_auth_key: impl Into<ApiKey>) -> Result<Arc<Self>> {
		Self::builder().basic_auth_key(basic_auth_key).build()
	}

	pub(crate) fn from_parts(
		url: String,
		credential: Option<Credential>,
		version: ApiVersion,
		http_client: ReqwestHttpClient,
	) -> Self {
		Self {
			url,
			credential,
			version,
			http_client,
			connection: Default::default(),
			children: Default::default(),
			last_result: Default::default(),
		}
	}

	/// Absolute URL of this resource.
	pub fn url(&self) -> &str {
		&self.url
	}

	/// API generation shared by the whole endpoint tree.
	pub fn version(&self) -> ApiVersion {
		self.version
	}

	/// Credential used for requests, if one was configured.
	pub fn credential(&self) -> Option<&Credential> {
		self.credential.as_ref()
	}

	/// Most recent raw response received by this endpoint.
	pub fn last_result(&self) -> Option<RawResponse> {
		self.last_result.get()
	}

	/// Returns the child endpoint for `segment`, creating it on first access.
	///
	/// Repeated calls with the same segment return the same instance.
	pub fn resource(&self, segment: impl Display) -> Arc<Endpoint> {
		let mut children = self.children.lock();

		children
			.entry(segment.to_string())
			.or_insert_with_key(|segment| {
				Arc::new(Self::from_parts(
					join_path(&self.url, segment),
					self.credential.clone(),
					self.version,
					self.http_client.clone(),
				))
			})
			.clone()
	}

	/// Walks `segments` through [`Endpoint::resource`]; no segments yields `self`.
	pub fn path<I>(self: &Arc<Self>, segments: I) -> Arc<Endpoint>
	where
		I: IntoIterator,
		I::Item: Display,
	{
		segments.into_iter().fold(Arc::clone(self), |node, segment| node.resource(segment))
	}

	/// Issues a `GET` with `params` as the query string.
	///
	/// # Response Contract
	///
	/// - `204` resolves to `true` without parsing the body.
	/// - Other `2xx` statuses resolve to the parsed JSON body.
	/// - `400`, `401`, `403`, `404`, `405` and `422` fail with their dedicated
	///   [`ApiErrorKind`](crate::error::ApiErrorKind); remaining `4xx` fail with `ClientError`,
	///   `500` with `InternalServerError`, and remaining `5xx` with `ServerError`.
	/// - A body that is not valid JSON fails with `ServerError`, carrying the raw text, for every
	///   status including `2xx`.
	/// - Anything outside `200..=599` fails with [`Error::UnexpectedStatus`].
	pub async fn get<Q>(&self, params: &Q) -> Result<Value>
	where
		Q: ?Sized + Serialize,
	{
		self.read(CallKind::Get, params).await
	}

	/// Issues a `POST` carrying `body`.
	pub async fn post<B>(&self, body: &B) -> Result<Value>
	where
		B: ?Sized + Serialize,
	{
		self.write(CallKind::Post, Method::POST, body).await
	}

	/// Issues a `PATCH` carrying `body`.
	pub async fn patch<B>(&self, body: &B) -> Result<Value>
	where
		B: ?Sized + Serialize,
	{
		self.write(CallKind::Patch, Method::PATCH, body).await
	}

	/// Issues a `PUT` carrying `body`.
	pub async fn put<B>(&self, body: &B) -> Result<Value>
	where
		B: ?Sized + Serialize,
	{
		self.write(CallKind::Put, Method::PUT, body).await
	}

	/// Issues a bodiless `DELETE`.
	pub async fn delete(&self) -> Result<Value> {
		obs::observe(CallKind::Delete, &self.url, async {
			let connection = self.connection()?;
			let request = connection.request(Method::DELETE, &self.url);

			self.dispatch(CallKind::Delete, request).await
		})
		.await
	}

	/// `GET` observed under `kind`.
	pub(crate) async fn read<Q>(&self, kind: CallKind, params: &Q) -> Result<Value>
	where
		Q: ?Sized + Serialize,
	{
		obs::observe(kind, &self.url, async {
			let connection = self.connection()?;
			let request = connection.request(Method::GET, &self.url).query(params);

			self.dispatch(kind, request).await
		})
		.await
	}

	async fn write<B>(&self, kind: CallKind, method: Method, body: &B) -> Result<Value>
	where
		B: ?Sized + Serialize,
	{
		obs::observe(kind, &self.url, async {
			let connection = self.connection()?;
			let value = serde_json::to_value(body).map_err(ConfigError::from)?;
			let encoded =
				body::encode(self.version.body_encoding(), value, connection.credential.secret())?;
			let request = connection
				.request(method, &self.url)
				.header(CONTENT_TYPE, encoded.content_type)
				.body(encoded.payload);

			self.dispatch(kind, request).await
		})
		.await
	}

	async fn dispatch(&self, kind: CallKind, request: RequestBuilder) -> Result<Value> {
		let raw = self.http_client.execute(request).await?;

		obs::log_response(kind, raw.status);

		let result = response::map_response(&raw);

		self.last_result.store(raw);

		result
	}

	fn connection(&self) -> Result<Arc<Connection>> {
		let mut slot = self.connection.lock();

		if let Some(connection) = slot.as_ref() {
			return Ok(Arc::clone(connection));
		}

		let credential = self.credential.clone().ok_or(Error::AuthRequired)?;
		let connection = Arc::new(Connection { client: self.http_client.clone(), credential });

		*slot = Some(Arc::clone(&connection));

		Ok(connection)
	}
}
impl Debug for Endpoint {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Endpoint")
			.field("url", &self.url)
			.field("version", &self.version)
			.field("credential", &self.credential)
			.field("cached_children", &self.children.lock().len())
			.finish()
	}
}

/// Auth-bound request factory, created once per endpoint on first use.
struct Connection {
	client: ReqwestHttpClient,
	credential: Credential,
}
impl Connection {
	fn request(&self, method: Method, url: &str) -> RequestBuilder {
		self.credential.apply(self.client.request(method, url))
	}
}

/// Joins `segment` onto `base` with exactly one `/` between them.
fn join_path(base: &str, segment: &str) -> String {
	format!("{}/{}", base.trim_end_matches('/'), segment.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn root() -> Arc<Endpoint> {
		Endpoint::new("key-us2").expect("Root endpoint should build from an API key.")
	}

	#[test]
	fn join_path_collapses_slashes() {
		assert_eq!(join_path("https://x/3.0/", "lists"), "https://x/3.0/lists");
		assert_eq!(join_path("https://x/3.0", "/lists"), "https://x/3.0/lists");
		assert_eq!(join_path("https://x/3.0/lists", "1"), "https://x/3.0/lists/1");
	}

	#[test]
	fn children_are_memoized_per_parent() {
		let root = root();
		let lists = root.resource("lists");

		assert!(Arc::ptr_eq(&lists, &root.resource("lists")));
		assert!(Arc::ptr_eq(&lists.resource(1), &lists.resource("1")));
		assert_eq!(lists.url(), "https://us2.api.mailchimp.com/3.0/lists");
	}

	#[test]
	fn path_matches_chained_resources() {
		let root = root();
		let chained = root.resource("lists").resource("d3ed40bd7c").resource("members");
		let walked = root.path(["lists", "d3ed40bd7c", "members"]);

		assert!(Arc::ptr_eq(&chained, &walked));
		assert_eq!(walked.url(), "https://us2.api.mailchimp.com/3.0/lists/d3ed40bd7c/members");
		assert!(Arc::ptr_eq(&root.path(Vec::<String>::new()), &root));
	}

	#[test]
	fn children_inherit_credential_and_version() {
		let root = Endpoint::builder()
			.oauth_access_token("token")
			.data_center("us9")
			.version(ApiVersion::V2)
			.build()
			.expect("Root endpoint should build from a token and data center.");
		let child = root.resource("lists");

		assert_eq!(child.version(), ApiVersion::V2);
		assert_eq!(child.credential(), Some(&Credential::Bearer(AccessToken::new("token"))));
		assert_eq!(child.url(), "https://us9.api.mailchimp.com/2.0/lists");
	}

	#[tokio::test]
	async fn requests_without_credentials_fail_before_network() {
		let root = Endpoint::builder()
			.url("http://127.0.0.1:9/3.0")
			.build()
			.expect("Explicit URL should satisfy construction.");
		let err = root.resource("lists").get(&()).await.expect_err("Missing auth should fail.");

		assert!(matches!(err, Error::AuthRequired));
		assert!(root.resource("lists").last_result().is_none());
	}

	#[test]
	fn debug_redacts_credentials() {
		let rendered = format!("{:?}", root());

		assert!(rendered.contains("<redacted>"));
		assert!(!rendered.contains("key-us2"));
	}
}
