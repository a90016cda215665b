use crate::fetch::client::HttpClient;
use async_trait::async_trait;
use reqwest::header::{HeaderValue, USER_AGENT};

/// An [`HttpClient`] wrapper that sets the `User-Agent` header on every request.
///
/// download.bls.gov answers anonymous clients with `403 Forbidden`, so the
/// collector always goes through this wrapper with a contact-style agent.
pub struct WithUserAgent<C> {
    pub(crate) inner: C,
    value: HeaderValue,
}

impl<C> WithUserAgent<C> {
    pub fn new(inner: C, user_agent: &str) -> anyhow::Result<Self> {
        let value = HeaderValue::from_str(user_agent)
            .map_err(|e| anyhow::anyhow!("invalid User-Agent '{user_agent}': {e}"))?;
        Ok(Self { inner, value })
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for WithUserAgent<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.headers_mut().insert(USER_AGENT, self.value.clone());
        self.inner.execute(req).await
    }
}
