//! Regex patterns for link, tag and heading extraction.

/// Internal link: `[[target]]` or `[[target|label]]`. Does not span lines.
pub const LINK_PATTERN: &str = r"\[\[(.+?)\]\]";

/// Tag marker: `{{tag>one two three}}`.
pub const TAG_PATTERN: &str = r"\{\{tag>(.*?)\}\}";

/// Section heading: `====== Title ======` (2 to 6 `=` on each side).
pub const HEADING_PATTERN: &str = r"(?m)^[ \t]*={2,6}[ \t]*(.+?)[ \t]*={2,6}[ \t]*$";

/// Links with a URL scheme point outside the corpus.
pub const EXTERNAL_PATTERN: &str = r"^[A-Za-z][A-Za-z0-9+.\-]*://";

/// Separates the link target from its label.
pub const LABEL_SEPARATOR: char = '|';

/// Starts a section anchor inside a link target.
pub const ANCHOR_MARKER: char = '#';

/// Marks an interwiki shortcut (`wp>Rust`), which is never an internal page.
pub const INTERWIKI_MARKER: char = '>';
