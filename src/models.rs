//! Request and response types for the Instant API.

use serde::{Deserialize, Serialize};

/// Email content submitted to [`Client::create_email`](crate::Client::create_email).
///
/// The API requires at least one of `html_text`, `plain_text` or
/// `raw_source`; that rule is enforced server-side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plain_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_user_id: Option<String>,
    /// Captures to start as soon as the email is created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configurations: Option<Vec<CaptureConfiguration>>,
}

impl Email {
    /// An email with an HTML body.
    pub fn html(html: impl Into<String>) -> Self {
        Self {
            html_text: Some(html.into()),
            ..Self::default()
        }
    }

    /// An email with a plain text body.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            plain_text: Some(text.into()),
            ..Self::default()
        }
    }

    /// An email from full RFC 822 source, headers included.
    pub fn raw(source: impl Into<String>) -> Self {
        Self {
            raw_source: Some(source.into()),
            ..Self::default()
        }
    }

    /// Set the subject line.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the sender address.
    pub fn from_address(mut self, address: impl Into<String>) -> Self {
        self.from_address = Some(address.into());
        self
    }

    /// Set the sender display name.
    pub fn from_display_name(mut self, name: impl Into<String>) -> Self {
        self.from_display_name = Some(name.into());
        self
    }

    /// Identify the end user on whose behalf the email is created.
    pub fn end_user_id(mut self, id: impl Into<String>) -> Self {
        self.end_user_id = Some(id.into());
        self
    }

    /// Request captures along with the upload.
    pub fn configurations(mut self, configurations: Vec<CaptureConfiguration>) -> Self {
        self.configurations = Some(configurations);
        self
    }
}

/// Device orientation of a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
    /// A value reported by the server that this crate does not know.
    /// The server rejects it in requests.
    #[serde(other)]
    Other,
}

impl Orientation {
    /// Wire name of the orientation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
            Orientation::Other => "other",
        }
    }
}

/// Whether remote images are loaded in a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Images {
    Allowed,
    Blocked,
    /// A value reported by the server that this crate does not know.
    /// The server rejects it in requests.
    #[serde(other)]
    Other,
}

impl Images {
    /// Wire name of the image setting.
    pub fn as_str(&self) -> &'static str {
        match self {
            Images::Allowed => "allowed",
            Images::Blocked => "blocked",
            Images::Other => "other",
        }
    }
}

/// Rendered image size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureSize {
    #[default]
    Full,
    Thumb,
    Thumb450,
}

impl CaptureSize {
    /// Path segment naming the size in image URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptureSize::Full => "full",
            CaptureSize::Thumb => "thumb",
            CaptureSize::Thumb450 => "thumb450",
        }
    }
}

/// A single capture request: an email client plus optional settings.
///
/// Unset settings are left for the server to infer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureConfiguration {
    pub client: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Images>,
}

impl CaptureConfiguration {
    /// Capture in `client` with server defaults for everything else.
    pub fn new(client: impl Into<String>) -> Self {
        Self {
            client: client.into(),
            orientation: None,
            images: None,
        }
    }

    /// Set the device orientation.
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    /// Set whether remote images load.
    pub fn images(mut self, images: Images) -> Self {
        self.images = Some(images);
        self
    }
}

/// Options for fetching a preview or building its image URL.
///
/// `capture_size` only affects image URLs; `fallback` and `fallback_url`
/// only affect image fetches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewOptions {
    pub capture_size: Option<CaptureSize>,
    pub orientation: Option<Orientation>,
    pub images: Option<Images>,
    /// Serve a placeholder image instead of an error when capture fails.
    pub fallback: Option<bool>,
    /// Absolute URL of a custom placeholder image.
    pub fallback_url: Option<String>,
}

impl PreviewOptions {
    /// No options: full size, server defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick the image size.
    pub fn capture_size(mut self, size: CaptureSize) -> Self {
        self.capture_size = Some(size);
        self
    }

    /// Set the device orientation.
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    /// Set whether remote images load.
    pub fn images(mut self, images: Images) -> Self {
        self.images = Some(images);
        self
    }

    /// Toggle the placeholder image on capture failure.
    pub fn fallback(mut self, fallback: bool) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Use a custom placeholder image.
    pub fn fallback_url(mut self, url: impl Into<String>) -> Self {
        self.fallback_url = Some(url.into());
        self
    }

    /// Query pairs understood by the preview metadata endpoint.
    pub(crate) fn capture_query(&self) -> Vec<(&'static str, &'static str)> {
        let mut query = Vec::new();
        if let Some(orientation) = self.orientation {
            query.push(("orientation", orientation.as_str()));
        }
        if let Some(images) = self.images {
            query.push(("images", images.as_str()));
        }
        query
    }
}

/// Response to a successful email creation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EmailCreated {
    /// Opaque identifier, valid for roughly a day.
    pub email_guid: String,
    #[serde(default)]
    pub end_user_id: Option<String>,
    /// Requested configurations with server-inferred defaults filled in.
    #[serde(default)]
    pub configurations: Option<Vec<CaptureConfiguration>>,
}

/// Options an email client supports.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfiguration {
    pub orientation_options: Vec<Orientation>,
    pub images_options: Vec<Images>,
}

/// URLs of a finished capture, one per size.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Preview {
    pub full_url: String,
    pub thumb_url: String,
    pub thumb450_url: String,
}

impl Preview {
    /// URL of the image at `size`.
    pub fn url(&self, size: CaptureSize) -> &str {
        match size {
            CaptureSize::Full => &self.full_url,
            CaptureSize::Thumb => &self.thumb_url,
            CaptureSize::Thumb450 => &self.thumb450_url,
        }
    }
}

/// Acknowledgement of a prefetch batch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PrefetchResponse {
    /// The accepted configurations, with inferred defaults filled in.
    pub configurations: Vec<CaptureConfiguration>,
}
