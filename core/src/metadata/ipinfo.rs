use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use chk_common::error::FailureCause;
use chk_common::record::MetadataRecord;

use super::MetadataSource;

/// Client for the ipinfo.io style `GET <base>/<ip>/json` endpoint.
pub struct IpInfoClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl IpInfoClient {
    /// Fails only if the TLS backend can't be initialised.
    pub fn new(
        base_url: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .user_agent(concat!("chk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            timeout,
        })
    }

    pub fn url_for(&self, ip: IpAddr) -> String {
        format!("{}/{}/json", self.base_url, ip)
    }

    fn to_cause(&self, e: reqwest::Error) -> FailureCause {
        if e.is_timeout() {
            FailureCause::TimedOut(self.timeout)
        } else {
            FailureCause::Failed(e.to_string())
        }
    }
}

#[async_trait]
impl MetadataSource for IpInfoClient {
    async fn fetch(&self, ip: IpAddr) -> Result<MetadataRecord, FailureCause> {
        let mut request = self.http.get(self.url_for(ip));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| self.to_cause(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FailureCause::Failed(format!("HTTP {}", status.as_u16())));
        }

        response
            .json::<MetadataRecord>()
            .await
            .map_err(|e| self.to_cause(e))
    }
}
