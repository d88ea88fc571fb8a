//! Tokenization of environment keys into nested paths.

/// Delimiter separating nesting levels in environment keys.
pub const DELIMITER: char = '_';

/// Path segments derived from one environment key.
///
/// The original-case segments drive schema lookups; the lowercased segments
/// become keys in the configuration tree.
///
/// # Examples
///
/// ```rust
/// use ortho_env::KeyPath;
///
/// let path = KeyPath::parse("DATABASE_Server_HOST");
/// assert_eq!(path.original(), ["DATABASE", "Server", "HOST"]);
/// let reversed: Vec<_> = path.reversed_lowercase().collect();
/// assert_eq!(reversed, ["host", "server", "database"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath<'k> {
    original: Vec<&'k str>,
    lowercase: Vec<String>,
}

impl<'k> KeyPath<'k> {
    /// Split `key` on [`DELIMITER`].
    ///
    /// A key without a delimiter yields a single segment. Empty segments,
    /// produced by doubled or trailing delimiters, are kept.
    #[must_use]
    pub fn parse(key: &'k str) -> Self {
        let original: Vec<&'k str> = key.split(DELIMITER).collect();
        let lowercase = original.iter().map(|s| s.to_lowercase()).collect();
        Self {
            original,
            lowercase,
        }
    }

    /// Segments in key order and original case.
    #[must_use]
    pub fn original(&self) -> &[&'k str] {
        &self.original
    }

    /// Lowercased segments in key order.
    #[must_use]
    pub fn lowercase(&self) -> &[String] {
        &self.lowercase
    }

    /// Lowercased segments, innermost first.
    pub fn reversed_lowercase(&self) -> impl Iterator<Item = &str> {
        self.lowercase.iter().rev().map(String::as_str)
    }

    /// Dotted rendering of the lowercased path, used in diagnostics.
    #[must_use]
    pub fn dotted(&self) -> String {
        self.lowercase.join(".")
    }
}
