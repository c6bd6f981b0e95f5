//! # Litmus Instant Client
//! Asynchronous wrapper around the Litmus Instant email preview HTTP API: upload an email, then request or build URLs for images of it rendered in desktop, webmail, and mobile email clients, using [`Client`] and [`ClientBuilder`].
//!
//! ## Audience and uses
//! For Rust services that show users how their email will look before it is sent: create the email once with [`Client::create_email`], optionally warm the captures with [`Client::prefetch_previews`], then embed [`Client::preview_image_url`] links in a page or fetch metadata with [`Client::get_preview`].
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. Each operation awaits a single HTTP request made with `reqwest`; nothing is retried or spawned in the background. [`Client::get_preview`] waits for the server-side capture to finish.
//!
//! ## Authentication
//! Either an API key sent as HTTP Basic credentials ([`ClientBuilder::api_key`]) or an OAuth access token sent as a bearer token ([`ClientBuilder::bearer_token`], or per call via [`Client::create_email_with_token`]). Obtaining and refreshing OAuth tokens is left to the caller.
//!
//! ## Errors
//! Every non-2xx response becomes a typed [`Error`] carrying the server's `description`: 401 [`Error::Authentication`], 400 [`Error::Request`], 404 [`Error::NotFound`], 500 [`Error::Service`], 504 [`Error::Timeout`], anything else [`Error::Api`]. Transport failures are [`Error::Http`]. The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Logging
//! Requests and responses are reported through `tracing` at debug level. Credentials are never logged.
//!
//! ## Example
//! ```no_run
//! use litmus_instant::{CaptureConfiguration, CaptureSize, Client, Email, PreviewOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), litmus_instant::Error> {
//!     let client = Client::builder().api_key("my-key").build()?;
//!     let email = client.create_email(&Email::plain("Aloha world!")).await?;
//!
//!     let clients = ["OL2010", "GMAILNEW", "IPHONE6"];
//!     let configurations: Vec<_> = clients.iter().map(|c| CaptureConfiguration::new(*c)).collect();
//!     client.prefetch_previews(&email.email_guid, &configurations).await?;
//!
//!     let thumbs = PreviewOptions::new().capture_size(CaptureSize::Thumb450);
//!     for name in clients {
//!         println!("{name}: {}", client.preview_image_url(&email.email_guid, name, &thumbs));
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod models;
mod preview_url;

pub use client::{Client, ClientBuilder};
pub use error::Error;
pub use models::{
    CaptureConfiguration, CaptureSize, ClientConfiguration, Email, EmailCreated, Images,
    Orientation, PrefetchResponse, Preview, PreviewOptions,
};

/// Result type alias for Instant operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
