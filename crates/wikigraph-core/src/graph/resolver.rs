//! Page ID canonicalization and link resolution.

use std::sync::Arc;

/// Namespace separator in page IDs.
pub const NS_SEPARATOR: char = ':';

/// Namespace prefix of an ID: everything before the last separator.
pub fn namespace_of(id: &str) -> &str {
    id.rsplit_once(NS_SEPARATOR).map(|(ns, _)| ns).unwrap_or("")
}

/// Join a namespace and a name with the separator.
pub fn join(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}{}{}", namespace, NS_SEPARATOR, name)
    }
}

/// Canonicalizes raw IDs according to the host wiki's ID rules.
pub trait IdCleaner: Send + Sync {
    /// Return the canonical form of `raw`; empty if nothing valid remains.
    fn clean(&self, raw: &str) -> String;
}

/// DokuWiki-compatible ID rules.
///
/// Lowercases, maps `/` and `;` to `:`, replaces anything outside
/// alphanumerics and `_ - . :` with `_`, collapses `_` runs, trims
/// `_ . -` around each segment and drops empty segments.
#[derive(Debug, Clone, Copy, Default)]
pub struct DokuIdCleaner;

impl IdCleaner for DokuIdCleaner {
    fn clean(&self, raw: &str) -> String {
        let lowered = raw.trim().to_lowercase();
        let mut mapped = String::with_capacity(lowered.len());

        for c in lowered.chars() {
            let c = match c {
                '/' | ';' => NS_SEPARATOR,
                c if c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':') => c,
                _ => '_',
            };
            if c == '_' && mapped.ends_with('_') {
                continue;
            }
            mapped.push(c);
        }

        mapped
            .split(NS_SEPARATOR)
            .map(|segment| segment.trim_matches(|c| matches!(c, '_' | '.' | '-')))
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join(":")
    }
}

/// Turns link text into canonical page IDs.
#[derive(Clone)]
pub struct IdResolver {
    cleaner: Arc<dyn IdCleaner>,
}

impl IdResolver {
    pub fn new(cleaner: Arc<dyn IdCleaner>) -> Self {
        Self { cleaner }
    }

    /// Canonicalize an already-qualified ID.
    pub fn clean(&self, raw: &str) -> String {
        self.cleaner.clean(raw)
    }

    /// Resolve a link target relative to `current_namespace`.
    ///
    /// Anchors are dropped, a leading `:` makes the reference absolute,
    /// anything else is relative to the current namespace. Returns `None`
    /// when nothing remains to resolve.
    pub fn resolve(&self, reference: &str, current_namespace: &str) -> Option<String> {
        let reference = reference
            .split_once('#')
            .map(|(before, _)| before)
            .unwrap_or(reference)
            .trim();

        if reference.is_empty() {
            return None;
        }

        let qualified = match reference.strip_prefix(NS_SEPARATOR) {
            Some(absolute) => absolute.to_string(),
            None => join(current_namespace, reference),
        };

        let id = self.cleaner.clean(&qualified);
        (!id.is_empty()).then_some(id)
    }
}

impl Default for IdResolver {
    fn default() -> Self {
        Self::new(Arc::new(DokuIdCleaner))
    }
}
