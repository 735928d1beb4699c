//! Default values for wikigraph configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// Corpus Defaults
// ============================================================================

/// Default page directory (DokuWiki layout).
pub const DEFAULT_DATA_DIR: &str = "data/pages";

/// File extension of page documents (without leading dot).
pub const DEFAULT_PAGE_EXTENSION: &str = "txt";

/// Skip dot-files and dot-directories while listing.
pub const DEFAULT_SKIP_HIDDEN: bool = true;

// ============================================================================
// Walker Defaults
// ============================================================================

/// Maximum number of page documents read at the same time.
pub const DEFAULT_MAX_CONCURRENT_READS: usize = 16;

// ============================================================================
// Access Defaults
// ============================================================================

/// Access mode used when none is configured.
pub const DEFAULT_ACCESS_MODE: &str = "allow-all";

/// Decision for resources no ACL rule matches.
pub const DEFAULT_READ: bool = true;

/// Timeout for remote access authority queries (seconds).
pub const DEFAULT_ACCESS_TIMEOUT_SECS: u64 = 5;

// ============================================================================
// Server Defaults
// ============================================================================

/// Default bind host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3344;

/// Upper bound for a single graph build request (seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Open the browser when the server starts.
pub const DEFAULT_OPEN_BROWSER: bool = false;

// ============================================================================
// Config Files
// ============================================================================

/// Project-local config file name.
pub const LOCAL_CONFIG_FILE: &str = "wikigraph.toml";

/// Directory under the user config dir.
pub const USER_CONFIG_DIR: &str = "wikigraph";

/// Config file name under the user config dir.
pub const USER_CONFIG_FILE: &str = "config.toml";
