use anyhow::Context;
use arguments::Arguments;
use bytes::{Bytes, BytesMut};
use clap::Parser;
use reqwest::{header::CONTENT_TYPE, StatusCode};
use scanfeed_codec::{DecodedFrame, FrameEncoder};
use std::time::Duration;
use tokio_util::codec::Encoder;
use tracing_subscriber::EnvFilter;

mod arguments;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Arguments::parse();

    let image = tokio::fs::read(&args.image)
        .await
        .with_context(|| format!("Failed to read {}", args.image.display()))?;
    let frame = DecodedFrame::new(image, args.text.clone(), args.format.clone());
    let body = pack(frame, args.trailer)?;
    tracing::debug!(bytes = body.len(), "Packed frame");

    let client = reqwest::Client::builder()
        .timeout(*args.timeout)
        .build()
        .context("Failed to build HTTP client")?;

    let mut interval = tokio::time::interval((*args.interval).max(Duration::from_millis(1)));
    for attempt in 1..=args.repeat {
        interval.tick().await;
        match post(&client, &args.url, body.clone()).await {
            Ok(status) => tracing::info!(attempt, %status, "Posted frame"),
            Err(e) => tracing::warn!(attempt, "Could not post frame: {e:#}"),
        }
    }
    Ok(())
}

fn pack(frame: DecodedFrame, trailer: Option<u64>) -> anyhow::Result<Bytes> {
    let mut encoder = match trailer {
        Some(trailer) => FrameEncoder::with_trailer(trailer),
        None => FrameEncoder::default(),
    };
    let mut buffer = BytesMut::new();
    encoder
        .encode(frame, &mut buffer)
        .context("Failed to pack frame")?;
    Ok(buffer.freeze())
}

async fn post(client: &reqwest::Client, url: &str, body: Bytes) -> anyhow::Result<StatusCode> {
    let response = client
        .post(url)
        .header(CONTENT_TYPE, "application/x-msgpack")
        .body(body)
        .send()
        .await?
        .error_for_status()?;
    Ok(response.status())
}
