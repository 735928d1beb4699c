use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::{AccessAuthority, AccessError, Identity};

/// Remote access-control authority.
///
/// Sends `GET {url}?resource=..&user=..&groups=a,b` and expects
/// `{"allowed": true|false}`. Transport failures, non-success statuses and
/// malformed bodies are errors, never grants.
pub struct HttpAuthority {
    url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct Decision {
    allowed: bool,
}

impl HttpAuthority {
    /// Creates a client for the authority at `url`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, AccessError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AccessError::Setup(e.to_string()))?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl AccessAuthority for HttpAuthority {
    async fn can_read(&self, resource: &str, identity: &Identity) -> Result<bool, AccessError> {
        let mut query = vec![("resource", resource.to_string())];
        if let Some(user) = &identity.user {
            query.push(("user", user.clone()));
        }
        if !identity.groups.is_empty() {
            query.push(("groups", identity.groups.join(",")));
        }

        let response = self.client.get(&self.url).query(&query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AccessError::Unreachable(format!(
                "authority returned status {}",
                status.as_u16()
            )));
        }

        let decision: Decision = response
            .json()
            .await
            .map_err(|e| AccessError::InvalidResponse(e.to_string()))?;

        Ok(decision.allowed)
    }
}
