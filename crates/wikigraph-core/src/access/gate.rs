use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use super::{AccessAuthority, AccessError, Identity};

/// Wildcard resource covering a namespace subtree (`*` for the root).
pub fn wildcard(namespace: &str) -> String {
    if namespace.is_empty() {
        "*".to_string()
    } else {
        format!("{}:*", namespace)
    }
}

/// Per-build read gate for one acting identity.
///
/// Decisions are memoized for the lifetime of the gate. A gate is created
/// for each graph build and dropped with it, so ACL changes take effect on
/// the next build.
pub struct AccessGate {
    authority: Arc<dyn AccessAuthority>,
    identity: Identity,
    decisions: Mutex<HashMap<String, bool>>,
}

impl AccessGate {
    pub fn new(authority: Arc<dyn AccessAuthority>, identity: Identity) -> Self {
        Self {
            authority,
            identity,
            decisions: Mutex::new(HashMap::new()),
        }
    }

    /// Can the identity read this page ID (or wildcard)?
    pub async fn can_read(&self, resource: &str) -> Result<bool, AccessError> {
        let cached = self
            .decisions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(resource)
            .copied();
        if let Some(decision) = cached {
            return Ok(decision);
        }

        let decision = self.authority.can_read(resource, &self.identity).await?;
        tracing::trace!(resource, decision, "access decision");

        self.decisions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(resource.to_string(), decision);

        Ok(decision)
    }

    /// Can the identity descend into this namespace at all?
    pub async fn can_descend(&self, namespace: &str) -> Result<bool, AccessError> {
        self.can_read(&wildcard(namespace)).await
    }

    /// Number of distinct resources decided so far.
    pub fn decided(&self) -> usize {
        self.decisions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AccessAuthority for Counting {
        async fn can_read(&self, resource: &str, _identity: &Identity) -> Result<bool, AccessError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(!resource.starts_with("secret"))
        }
    }

    #[test]
    fn test_wildcard() {
        assert_eq!(wildcard(""), "*");
        assert_eq!(wildcard("a:b"), "a:b:*");
    }

    #[tokio::test]
    async fn test_decisions_are_memoized() {
        let authority = Arc::new(Counting {
            calls: AtomicUsize::new(0),
        });
        let gate = AccessGate::new(authority.clone(), Identity::anonymous());

        assert!(gate.can_read("wiki:start").await.unwrap());
        assert!(gate.can_read("wiki:start").await.unwrap());
        assert!(!gate.can_descend("secret").await.unwrap());
        assert!(!gate.can_read("secret:*").await.unwrap());

        assert_eq!(authority.calls.load(Ordering::SeqCst), 2);
        assert_eq!(gate.decided(), 2);
    }
}
