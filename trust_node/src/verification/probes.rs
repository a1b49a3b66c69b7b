use crate::error::ProbeError;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Status and raw body of a probe request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ProbeResponse {
    pub fn json(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }
}

/// Outbound HTTP GET used by the network checks
#[async_trait]
pub trait HttpProbe: Send + Sync {
    async fn get(&self, url: &str, timeout: Duration) -> Result<ProbeResponse, ProbeError>;
}

/// `reqwest`-backed probe
#[derive(Debug, Clone, Default)]
pub struct ReqwestProbe {
    client: reqwest::Client,
}

impl ReqwestProbe {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpProbe for ReqwestProbe {
    async fn get(&self, url: &str, timeout: Duration) -> Result<ProbeResponse, ProbeError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProbeError::Timeout(timeout)
                } else {
                    ProbeError::Http(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ProbeError::Http(e.to_string()))?;

        Ok(ProbeResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_json_parsing() {
        let ok = ProbeResponse {
            status: 200,
            body: br#"{"status":"success","country":"DE"}"#.to_vec(),
        };
        assert_eq!(ok.json().unwrap()["status"], "success");

        let garbage = ProbeResponse {
            status: 200,
            body: b"<html>".to_vec(),
        };
        assert!(garbage.json().is_none());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_an_error() {
        let probe = ReqwestProbe::default();
        // port 9 on loopback: nothing listens, connection is refused
        let result = probe
            .get("http://127.0.0.1:9/health", Duration::from_secs(1))
            .await;
        assert!(result.is_err());
    }
}
