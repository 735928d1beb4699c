//! DokuWiki-style ACL table.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{AccessAuthority, AccessError, Identity};

/// A single ACL line.
///
/// ```toml
/// [[access.rules]]
/// resource = "private:*"
/// subject = "@ALL"
/// read = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclRule {
    /// Page ID, `ns:*` wildcard, or `*`.
    pub resource: String,
    /// User name, `@group`, or `@ALL`.
    pub subject: String,
    /// Whether the subject may read the resource.
    pub read: bool,
}

impl AclRule {
    pub fn new(resource: impl Into<String>, subject: impl Into<String>, read: bool) -> Self {
        Self {
            resource: resource.into(),
            subject: subject.into(),
            read,
        }
    }
}

/// Static rule table with most-specific-resource-wins resolution.
#[derive(Debug, Clone, Default)]
pub struct AclTable {
    rules: Vec<AclRule>,
    default_read: bool,
}

impl AclTable {
    pub fn new(rules: Vec<AclRule>, default_read: bool) -> Self {
        Self { rules, default_read }
    }

    /// Resources to consult for `resource`, most specific first.
    ///
    /// `a:b:page` yields `a:b:page`, `a:b:*`, `a:*`, `*`.
    fn candidates(resource: &str) -> Vec<String> {
        let (namespace, exact) = match resource.strip_suffix('*') {
            Some(prefix) => (prefix.trim_end_matches(':'), None),
            None => match resource.rsplit_once(':') {
                Some((ns, _)) => (ns, Some(resource)),
                None => ("", Some(resource)),
            },
        };

        let mut candidates = Vec::new();
        candidates.extend(exact.map(str::to_string));

        let mut current = namespace;
        while !current.is_empty() {
            candidates.push(format!("{}:*", current));
            current = current.rsplit_once(':').map(|(parent, _)| parent).unwrap_or("");
        }
        candidates.push("*".to_string());
        candidates
    }

    /// Resolve a decision synchronously.
    pub fn decide(&self, resource: &str, identity: &Identity) -> bool {
        let subjects = identity.subjects();

        for candidate in Self::candidates(resource) {
            let mut matched = false;
            let mut granted = false;

            for rule in self.rules.iter().filter(|r| r.resource == candidate) {
                if subjects.contains(&rule.subject.to_lowercase()) {
                    matched = true;
                    granted |= rule.read;
                }
            }

            if matched {
                return granted;
            }
        }

        self.default_read
    }
}

#[async_trait]
impl AccessAuthority for AclTable {
    async fn can_read(&self, resource: &str, identity: &Identity) -> Result<bool, AccessError> {
        Ok(self.decide(resource, identity))
    }
}
