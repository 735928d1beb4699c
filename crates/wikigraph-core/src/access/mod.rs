//! Read-permission checks against the host's access-control authority.
//!
//! # Components
//!
//! - [`AccessAuthority`] - the external authority, behind a trait
//! - [`AccessGate`] - per-build memoizing wrapper used by the walker
//! - [`AllowAll`], [`AclTable`], [`HttpAuthority`] - bundled authorities
//!
//! Resources are canonical page IDs (`wiki:syntax`) or namespace wildcards
//! (`wiki:*`, `*` for the root).

mod acl;
mod error;
mod gate;
mod http;

pub use acl::{AclRule, AclTable};
pub use error::AccessError;
pub use gate::{wildcard, AccessGate};
pub use http::HttpAuthority;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{AccessConfig, AccessMode};

/// Subject that matches every identity in ACL rules.
pub const ALL_SUBJECT: &str = "@ALL";

/// The acting identity a graph is built for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    /// Authenticated user name; `None` for anonymous requests.
    pub user: Option<String>,
    /// Group memberships, without the `@` prefix.
    pub groups: Vec<String>,
}

impl Identity {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn user(name: impl Into<String>) -> Self {
        Self {
            user: Some(name.into()),
            groups: Vec::new(),
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    /// ACL subjects this identity answers to: the user name, `@group` per group, and `@ALL`.
    pub fn subjects(&self) -> Vec<String> {
        let mut subjects = Vec::with_capacity(self.groups.len() + 2);
        if let Some(user) = &self.user {
            subjects.push(user.to_lowercase());
        }
        subjects.extend(self.groups.iter().map(|g| format!("@{}", g.to_lowercase())));
        subjects.push(ALL_SUBJECT.to_lowercase());
        subjects
    }

    /// Short label for logs.
    pub fn label(&self) -> &str {
        self.user.as_deref().unwrap_or("anonymous")
    }
}

/// Main interface to the host's access-control authority.
#[async_trait]
pub trait AccessAuthority: Send + Sync {
    /// Can `identity` read `resource` (page ID or namespace wildcard)?
    async fn can_read(&self, resource: &str, identity: &Identity) -> Result<bool, AccessError>;
}

/// Authority that grants every read.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

#[async_trait]
impl AccessAuthority for AllowAll {
    async fn can_read(&self, _resource: &str, _identity: &Identity) -> Result<bool, AccessError> {
        Ok(true)
    }
}

/// Build the authority selected by configuration.
pub fn authority_from_config(config: &AccessConfig) -> Result<Arc<dyn AccessAuthority>, AccessError> {
    match config.mode {
        AccessMode::AllowAll => Ok(Arc::new(AllowAll)),
        AccessMode::Acl => Ok(Arc::new(AclTable::new(
            config.rules.clone(),
            config.default_read,
        ))),
        AccessMode::Http => {
            let url = config
                .url
                .as_deref()
                .ok_or_else(|| AccessError::Setup("access.url is not set".into()))?;
            let authority = HttpAuthority::new(url, Duration::from_secs(config.timeout_secs))?;
            Ok(Arc::new(authority))
        }
    }
}
