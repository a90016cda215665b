mod basic;
mod client;
mod user_agent;

pub use basic::BasicClient;
pub use client::HttpClient;
pub use user_agent::WithUserAgent;

use anyhow::{Context, Result};
use tracing::debug;

/// GETs `url` and returns the body, failing on any non-success status.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(
        reqwest::Method::GET,
        url.parse().with_context(|| format!("invalid URL '{url}'"))?,
    );

    let resp = client
        .execute(req)
        .await
        .with_context(|| format!("GET {url} failed"))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(anyhow::anyhow!("GET {url} returned status {status}"));
    }

    let bytes = resp.bytes().await?.to_vec();
    debug!(url, bytes = bytes.len(), "Fetched");
    Ok(bytes)
}

/// Like [`fetch_bytes`], decoding the body as UTF-8.
pub async fn fetch_text<C: HttpClient>(client: &C, url: &str) -> Result<String> {
    let bytes = fetch_bytes(client, url).await?;
    String::from_utf8(bytes).with_context(|| format!("GET {url} returned non UTF-8 body"))
}


#[cfg(test)]
mod tests {
    use super::testing::FakeClient;
    use super::*;

    #[tokio::test]
    async fn test_fetch_bytes_ok() {
        let client = FakeClient::default().route("https://example.com/a.txt", 200, "hello");
        let bytes = fetch_bytes(&client, "https://example.com/a.txt").await.unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[tokio::test]
    async fn test_fetch_bytes_rejects_error_status() {
        let client = FakeClient::default().route("https://example.com/a.txt", 403, "denied");
        let err = fetch_bytes(&client, "https://example.com/a.txt")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("403"));
    }

    #[tokio::test]
    async fn test_fetch_bytes_invalid_url() {
        let client = FakeClient::default();
        assert!(fetch_bytes(&client, "not a url").await.is_err());
    }

    #[tokio::test]
    async fn test_user_agent_is_injected() {
        let inner = FakeClient::default().route("https://example.com/", 200, "ok");
        let client = WithUserAgent::new(inner, "bls_pipeline-test/1.0").unwrap();
        fetch_text(&client, "https://example.com/").await.unwrap();

        let requests = client.inner.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].1.as_deref(), Some("bls_pipeline-test/1.0"));
    }

    #[test]
    fn test_user_agent_rejects_control_chars() {
        assert!(WithUserAgent::new(FakeClient::default(), "bad\nagent").is_err());
    }
}
