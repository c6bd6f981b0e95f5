//! Prefetch every client for one email and print its preview URLs.
//!
//! Run with `API_KEY=... cargo run --example prefetch -- "Your message"`.
//! Set `RUST_LOG=litmus_instant=debug` to see the requests.

use litmus_instant::{
    CaptureConfiguration, CaptureSize, Client, Email, Images, Orientation, PreviewOptions,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let api_key = std::env::var("API_KEY").map_err(|_| "API_KEY required")?;
    let message = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Aloha world!".to_string());

    let client = Client::builder().api_key(api_key).build()?;
    let email = client.create_email(&Email::plain(message)).await?;
    println!("Created email {}", email.email_guid);

    let clients = client.list_clients().await?;
    let configurations: Vec<_> = clients
        .iter()
        .map(|name| {
            CaptureConfiguration::new(name.as_str())
                .orientation(Orientation::Vertical)
                .images(Images::Allowed)
        })
        .collect();

    // Non-blocking: captures start now, so the URLs below load quickly.
    client
        .prefetch_previews(&email.email_guid, &configurations)
        .await?;

    let thumb = PreviewOptions::new().capture_size(CaptureSize::Thumb);
    let full = PreviewOptions::new().capture_size(CaptureSize::Full);
    for name in &clients {
        println!("{name}");
        println!("  thumb: {}", client.preview_image_url(&email.email_guid, name, &thumb));
        println!("  full:  {}", client.preview_image_url(&email.email_guid, name, &full));
    }

    Ok(())
}
