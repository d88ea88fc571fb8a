//! Prefix rules selecting which environment entries participate.

/// Retain and strip prefix lists applied to environment keys.
///
/// Retain prefixes keep an entry with its key untouched; strip prefixes keep
/// an entry and remove the matched prefix before the key is tokenized. With
/// both lists empty every entry is kept.
///
/// # Examples
///
/// ```rust
/// use ortho_env::PrefixSet;
///
/// let prefixes = PrefixSet::new(vec![], vec!["APP_".to_owned()]);
/// assert_eq!(prefixes.filter("APP_DATABASE_HOST"), Some("DATABASE_HOST"));
/// assert_eq!(prefixes.filter("HOME"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixSet {
    retain: Vec<String>,
    strip: Vec<String>,
}

impl PrefixSet {
    /// Create a prefix set from retain and strip lists.
    #[must_use]
    pub const fn new(retain: Vec<String>, strip: Vec<String>) -> Self {
        Self { retain, strip }
    }

    /// Returns the retain prefixes in match order.
    #[must_use]
    pub fn retain(&self) -> &[String] {
        &self.retain
    }

    /// Returns the strip prefixes in match order.
    #[must_use]
    pub fn strip(&self) -> &[String] {
        &self.strip
    }

    /// Returns `true` when no prefix is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.retain.is_empty() && self.strip.is_empty()
    }

    /// Decide whether `key` participates and compute the key to tokenize.
    ///
    /// Returns `None` when the entry is excluded. Retain and strip prefixes are
    /// checked independently: an entry matching both is kept and stripped.
    #[must_use]
    pub fn filter<'k>(&self, key: &'k str) -> Option<&'k str> {
        if self.is_empty() {
            return Some(key);
        }

        let retained = self
            .retain
            .iter()
            .any(|prefix| key.starts_with(prefix.as_str()));
        let stripped = self
            .strip
            .iter()
            .find_map(|prefix| key.strip_prefix(prefix.as_str()));
        stripped.or(retained.then_some(key))
    }

    pub(crate) fn extend_retain<I>(&mut self, prefixes: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.retain.extend(prefixes);
    }
}
