//! Instant API async client implementation.

use crate::error::description;
use crate::models::{
    CaptureConfiguration, ClientConfiguration, EmailCreated, PrefetchResponse, Preview,
    PreviewOptions,
};
use crate::{preview_url, Error, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

/// Credential attached to every request made by a [`Client`].
#[derive(Debug, Clone, PartialEq, Eq)]
enum Credential {
    /// HTTP Basic with the key as user name and an empty password.
    ApiKey(String),
    /// OAuth access token.
    Bearer(String),
}

/// Async client for the Litmus Instant email preview API.
///
/// Each instance carries its own endpoint and credential, so clients for
/// different keys or hosts can be used side by side. Use [`Client::new`]
/// for defaults or [`Client::builder`] to configure credentials and transport.
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    credential: Option<Credential>,
    shard_hosts: bool,
    proxy: Option<String>,
}

impl Client {
    /// Create a builder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client for the public Instant endpoint with no credential.
    ///
    /// Only [`list_clients`](Self::list_clients),
    /// [`client_configurations`](Self::client_configurations) and URL
    /// construction work without a key.
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    /// The API root all requests are made against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the proxy URL if one was configured.
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// The API key in use, if the client authenticates with one.
    pub fn api_key(&self) -> Option<&str> {
        match &self.credential {
            Some(Credential::ApiKey(key)) => Some(key),
            _ => None,
        }
    }

    /// Authenticate subsequent requests with an API key, replacing any
    /// bearer token.
    pub fn set_api_key(&mut self, key: impl Into<String>) {
        self.credential = Some(Credential::ApiKey(key.into()));
    }

    /// Authenticate subsequent requests with an OAuth access token,
    /// replacing any API key.
    pub fn set_bearer_token(&mut self, token: impl Into<String>) {
        self.credential = Some(Credential::Bearer(token.into()));
    }

    /// Drop the configured credential.
    pub fn clear_credentials(&mut self) {
        self.credential = None;
    }

    /// Upload an email and get back the GUID used to request its previews.
    ///
    /// `email` is usually an [`Email`](crate::Email), but any serializable
    /// value is sent as-is; the server rejects unknown or missing content
    /// fields with [`Error::Request`].
    ///
    /// # Errors
    /// [`Error::Authentication`] without a valid credential,
    /// [`Error::Request`] for an invalid descriptor.
    ///
    /// # Examples
    /// ```no_run
    /// # use litmus_instant::{Client, Email};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), litmus_instant::Error> {
    /// let client = Client::builder().api_key("my-key").build()?;
    /// let created = client.create_email(&Email::plain("Hej världen!")).await?;
    /// println!("{}", created.email_guid);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_email<E>(&self, email: &E) -> Result<EmailCreated>
    where
        E: Serialize + ?Sized,
    {
        let request = self.http.post(self.url("/emails")).json(email);
        self.execute_json(request, None).await
    }

    /// Like [`create_email`](Self::create_email), authenticating this one
    /// call with an OAuth access token instead of the client's credential.
    pub async fn create_email_with_token<E>(&self, email: &E, token: &str) -> Result<EmailCreated>
    where
        E: Serialize + ?Sized,
    {
        let request = self.http.post(self.url("/emails")).json(email);
        self.execute_json(request, Some(token)).await
    }

    /// Names of every email client previews can be captured in.
    pub async fn list_clients(&self) -> Result<Vec<String>> {
        let request = self.http.get(self.url("/clients"));
        self.execute_json(request, None).await
    }

    /// Supported orientation and image options, keyed by client name.
    pub async fn client_configurations(&self) -> Result<BTreeMap<String, ClientConfiguration>> {
        let request = self.http.get(self.url("/clients/configurations"));
        self.execute_json(request, None).await
    }

    /// Fetch the image URLs of a capture.
    ///
    /// The server answers only once the capture has finished, so this can
    /// take a while; [`prefetch_previews`](Self::prefetch_previews) hides
    /// that latency. Only `orientation` and `images` from `options` are sent.
    ///
    /// # Errors
    /// [`Error::Request`] for a malformed GUID or unknown client,
    /// [`Error::NotFound`] for an unknown or expired GUID.
    pub async fn get_preview(
        &self,
        email_guid: &str,
        client: &str,
        options: &PreviewOptions,
    ) -> Result<Preview> {
        let path = format!("/emails/{email_guid}/previews/{client}");
        let request = self
            .http
            .get(self.url(&path))
            .query(&options.capture_query());
        self.execute_json(request, None).await
    }

    /// Ask the server to start capturing previews ahead of time.
    ///
    /// Returns as soon as the work is queued. The batch is accepted or
    /// rejected as a whole: one invalid configuration fails the call with
    /// [`Error::Request`]. Failures of individual captures only show up when
    /// that preview is fetched.
    pub async fn prefetch_previews(
        &self,
        email_guid: &str,
        configurations: &[CaptureConfiguration],
    ) -> Result<PrefetchResponse> {
        #[derive(Serialize)]
        struct Prefetch<'a> {
            configurations: &'a [CaptureConfiguration],
        }

        let path = format!("/emails/{email_guid}/previews/prefetch");
        let request = self
            .http
            .post(self.url(&path))
            .json(&Prefetch { configurations });
        self.execute_json(request, None).await
    }

    /// Build the image URL of a capture, for embedding in a page.
    ///
    /// No request is made and options are not validated; problems surface
    /// when the URL is fetched.
    ///
    /// # Examples
    /// ```
    /// # use litmus_instant::{Client, PreviewOptions};
    /// let client = Client::new().unwrap();
    /// let url = client.preview_image_url("FAKE-EMAIL-GUID", "FAKE-CLIENT", &PreviewOptions::default());
    /// assert_eq!(
    ///     url,
    ///     "https://FAKE-CLIENT.instant-api.litmus.com/v1/emails/FAKE-EMAIL-GUID/previews/FAKE-CLIENT/full"
    /// );
    /// ```
    pub fn preview_image_url(
        &self,
        email_guid: &str,
        client: &str,
        options: &PreviewOptions,
    ) -> String {
        preview_url::preview_image_url(
            &self.base_url,
            self.shard_hosts,
            email_guid,
            client,
            options,
        )
    }

    /// Download a preview image.
    ///
    /// `fallback` defaults to `false` so capture failures raise an error
    /// rather than returning a placeholder. The whole image is buffered in
    /// memory; for pages showing many previews embed
    /// [`preview_image_url`](Self::preview_image_url) instead.
    pub async fn get_preview_image(
        &self,
        email_guid: &str,
        client: &str,
        options: &PreviewOptions,
    ) -> Result<Vec<u8>> {
        let mut options = options.clone();
        options.fallback.get_or_insert(false);

        let url = self.preview_image_url(email_guid, client, &options);
        let response = self.execute(self.http.get(url), None).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Send a request and decode its JSON body.
    async fn execute_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        token: Option<&str>,
    ) -> Result<T> {
        let response = self.execute(request, token).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(Into::into)
    }

    /// Authenticate and send a request, turning non-2xx responses into errors.
    async fn execute(
        &self,
        request: RequestBuilder,
        token: Option<&str>,
    ) -> Result<reqwest::Response> {
        let request = match (token, &self.credential) {
            (Some(token), _) => request.bearer_auth(token),
            (None, Some(Credential::Bearer(token))) => request.bearer_auth(token),
            (None, Some(Credential::ApiKey(key))) => request.basic_auth(key, Some("")),
            (None, None) => request,
        };

        let request = request.build()?;
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending Instant request");

        let response = self.http.execute(request).await?;
        let status = response.status();
        debug!(%method, %url, %status, "received Instant response");

        if status.is_success() {
            return Ok(response);
        }

        let message = description(&response.bytes().await?);
        debug!(%method, %url, %status, %message, "Instant request failed");
        Err(Error::classify(status.as_u16(), message))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Headers sent with every request.
    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }
}

const BASE_URL: &str = "https://instant-api.litmus.com/v1";
const USER_AGENT_VALUE: &str = concat!("litmus-instant-rs/", env!("CARGO_PKG_VERSION"));

/// Builder for configuring an Instant client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    credential: Option<Credential>,
    proxy: Option<String>,
    danger_accept_invalid_certs: bool,
    user_agent: String,
    timeout: Option<Duration>,
    shard_hosts: bool,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - Public Instant endpoint
    /// - No credential
    /// - No proxy, strict TLS validation
    /// - No timeout beyond the transport's own
    /// - Host sharding on
    pub fn new() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            credential: None,
            proxy: None,
            danger_accept_invalid_certs: false,
            user_agent: USER_AGENT_VALUE.to_string(),
            timeout: None,
            shard_hosts: true,
        }
    }

    /// Override the API root (default `https://instant-api.litmus.com/v1`).
    ///
    /// Useful for testing against a staging or local server.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Authenticate with an API key over HTTP Basic.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.credential = Some(Credential::ApiKey(key.into()));
        self
    }

    /// Authenticate with an OAuth access token.
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.credential = Some(Credential::Bearer(token.into()));
        self
    }

    /// Set a proxy URL (e.g., "socks5://127.0.0.1:1080").
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Control whether to accept invalid TLS certificates (default: false).
    pub fn danger_accept_invalid_certs(mut self, value: bool) -> Self {
        self.danger_accept_invalid_certs = value;
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Bound the duration of each request.
    ///
    /// [`Client::get_preview`] waits for capture to finish, so keep this
    /// generous.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Toggle prefixing the client name to the host of image URLs
    /// (default: true).
    ///
    /// Turn off when the API is reached through a host without wildcard DNS.
    pub fn shard_hosts(mut self, value: bool) -> Self {
        self.shard_hosts = value;
        self
    }

    /// Build the client.
    ///
    /// # Errors
    /// [`Error::Url`] if the base URL does not parse, [`Error::Http`] if the
    /// proxy or TLS setup is rejected.
    ///
    /// # Examples
    /// ```no_run
    /// # use litmus_instant::Client;
    /// # fn main() -> Result<(), litmus_instant::Error> {
    /// let client = Client::builder()
    ///     .api_key("my-key")
    ///     .user_agent("my-app/1.0")
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<Client> {
        url::Url::parse(&self.base_url)?;

        let mut builder = reqwest::Client::builder()
            .default_headers(Client::headers())
            .user_agent(self.user_agent.as_str())
            .danger_accept_invalid_certs(self.danger_accept_invalid_certs);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(proxy_url) = &self.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        let http = builder.build()?;

        Ok(Client {
            http,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            credential: self.credential,
            shard_hosts: self.shard_hosts,
            proxy: self.proxy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let client = Client::new().unwrap();
        assert_eq!(client.base_url(), BASE_URL);
        assert!(client.api_key().is_none());
        assert!(client.proxy().is_none());
        assert!(client.shard_hosts);
    }

    #[test]
    fn api_key_accessors() {
        let mut client = Client::builder().api_key("foo").build().unwrap();
        assert_eq!(client.api_key(), Some("foo"));

        client.set_api_key("bar");
        assert_eq!(client.api_key(), Some("bar"));

        client.set_bearer_token("token");
        assert!(client.api_key().is_none());
        assert_eq!(client.credential, Some(Credential::Bearer("token".into())));

        client.clear_credentials();
        assert!(client.credential.is_none());
    }

    #[test]
    fn later_credential_wins_on_builder() {
        let client = Client::builder()
            .api_key("foo")
            .bearer_token("token")
            .build()
            .unwrap();
        assert_eq!(client.credential, Some(Credential::Bearer("token".into())));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = Client::builder()
            .base_url("http://localhost:3000/v1/")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000/v1");
        assert_eq!(client.url("/clients"), "http://localhost:3000/v1/clients");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = Client::builder().base_url("not a url").build().unwrap_err();
        assert!(matches!(err, Error::Url(_)));
    }

    #[test]
    fn preview_image_url_follows_sharding_setting() {
        let options = PreviewOptions::default();

        let sharded = Client::new().unwrap();
        assert!(sharded
            .preview_image_url("guid", "OL2010", &options)
            .starts_with("https://OL2010.instant-api.litmus.com/v1/"));

        let flat = Client::builder().shard_hosts(false).build().unwrap();
        assert_eq!(
            flat.preview_image_url("guid", "OL2010", &options),
            "https://instant-api.litmus.com/v1/emails/guid/previews/OL2010/full"
        );
    }
}
