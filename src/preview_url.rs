//! Preview image URL construction.
//!
//! Image URLs are fetched by browsers rather than through the API client, so
//! they are built without any network access. The email client name is
//! prefixed to the API host as a subdomain so a page embedding many previews
//! spreads them over many hosts and escapes the per-domain connection limit.

use crate::models::PreviewOptions;
use url::form_urlencoded;

/// Prefix `client` to the host of `base_url`.
pub(crate) fn sharded_base_url(base_url: &str, client: &str) -> String {
    base_url.replacen("://", &format!("://{client}."), 1)
}

/// Build the image URL for one capture.
pub(crate) fn preview_image_url(
    base_url: &str,
    shard_hosts: bool,
    email_guid: &str,
    client: &str,
    options: &PreviewOptions,
) -> String {
    let base = if shard_hosts {
        sharded_base_url(base_url, client)
    } else {
        base_url.to_string()
    };
    let size = options.capture_size.unwrap_or_default();

    let mut url = format!(
        "{}/emails/{}/previews/{}/{}",
        base.trim_end_matches('/'),
        email_guid,
        client,
        size.as_str()
    );

    let query = image_query(options);
    if !query.is_empty() {
        url.push('?');
        url.push_str(&query);
    }
    url
}

/// Encode the recognized image options. `capture_size` is a path segment
/// and never appears here.
fn image_query(options: &PreviewOptions) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if let Some(orientation) = options.orientation {
        query.append_pair("orientation", orientation.as_str());
    }
    if let Some(images) = options.images {
        query.append_pair("images", images.as_str());
    }
    if let Some(fallback) = options.fallback {
        query.append_pair("fallback", if fallback { "true" } else { "false" });
    }
    if let Some(fallback_url) = &options.fallback_url {
        query.append_pair("fallback_url", fallback_url);
    }
    query.finish()
}
