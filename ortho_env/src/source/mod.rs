//! Environment configuration source.
//!
//! [`EnvSource`] turns `KEY=VALUE` lines into a nested configuration tree:
//! entries are filtered by prefix, keys are split on `_` and lowercased,
//! values are coerced (guided by an optional [`Schema`]), and each entry's
//! single-path tree is deep-merged into the result in snapshot order.
//!
//! ```text
//! DATABASE_SERVER_HOST=localhost  =>  {"database": {"server": {"host": "localhost"}}}
//! ```

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::changeset::ChangeSet;
use crate::coerce::coerce;
use crate::encoder::{Encoder, JsonEncoder};
use crate::error::EnvResult;
use crate::key::KeyPath;
use crate::prefix::PrefixSet;
use crate::schema::{ResolvedKind, Schema};
use crate::tree::{build_tree, merge_tree};
use crate::watcher::{NoopWatcher, Watcher};

/// Name reported by [`EnvSource`].
pub const SOURCE_NAME: &str = "env";

/// A configuration source producing change sets.
pub trait Source {
    /// Read the current configuration.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered; no partial change set is produced.
    fn read(&self) -> EnvResult<ChangeSet>;

    /// Persist `change_set`.
    ///
    /// # Errors
    ///
    /// Returns an error when the change set cannot be stored.
    fn write(&self, change_set: &ChangeSet) -> EnvResult<()>;

    /// Watch the source for changes.
    ///
    /// # Errors
    ///
    /// Returns an error when a watcher cannot be created.
    fn watch(&self) -> EnvResult<Box<dyn Watcher>>;

    /// Source identifier recorded in change sets.
    fn name(&self) -> &str;
}

/// One `KEY=VALUE` line split on its first `=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    /// Variable name.
    pub key: &'a str,
    /// Variable value, untrimmed.
    pub value: &'a str,
}

impl<'a> Entry<'a> {
    /// Split `line` on its first `=`; lines without one yield `None`.
    #[must_use]
    pub fn parse(line: &'a str) -> Option<Self> {
        line.split_once('=').map(|(key, value)| Self { key, value })
    }
}

/// Ordered `KEY=VALUE` lines captured from an environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    lines: Vec<String>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    ///
    /// Names and values that are not valid Unicode are converted lossily.
    #[must_use]
    pub fn from_process() -> Self {
        std::env::vars_os()
            .map(|(key, value)| format!("{}={}", key.to_string_lossy(), value.to_string_lossy()))
            .collect()
    }

    /// Build a snapshot from explicit lines.
    #[must_use]
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Sort lines so merge order no longer depends on enumeration order.
    #[must_use]
    pub fn sorted(mut self) -> Self {
        self.lines.sort();
        self
    }

    /// Lines in enumeration order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Parsed entries in enumeration order, skipping lines without `=`.
    pub fn entries(&self) -> impl Iterator<Item = Entry<'_>> {
        self.lines.iter().filter_map(|line| {
            let entry = Entry::parse(line);
            if entry.is_none() {
                debug!(target: "ortho_env", line = %line, "skipping line without '='");
            }
            entry
        })
    }
}

impl FromIterator<String> for EnvSnapshot {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

/// Configuration source backed by environment variables.
///
/// # Examples
///
/// ```rust
/// use ortho_env::{EnvSnapshot, EnvSource};
/// use serde_json::json;
///
/// let source = EnvSource::builder()
///     .stripped_prefix("APP_")
///     .snapshot(EnvSnapshot::from_lines([
///         "APP_DATABASE_HOST=localhost",
///         "APP_DATABASE_PORT=5432",
///         "HOME=/root",
///     ]))
///     .build();
/// let tree = source.read_tree()?;
/// assert_eq!(tree, json!({"database": {"host": "localhost", "port": 5432}}));
/// # Ok::<_, ortho_env::EnvError>(())
/// ```
#[derive(Clone)]
pub struct EnvSource {
    prefixes: PrefixSet,
    schema: Option<Schema>,
    encoder: Arc<dyn Encoder>,
    snapshot: Option<EnvSnapshot>,
    sort: bool,
}

impl EnvSource {
    /// Start configuring a source.
    #[must_use]
    pub fn builder() -> EnvSourceBuilder {
        EnvSourceBuilder::default()
    }

    /// Source reading the whole process environment as JSON.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Prefix rules applied to each entry.
    #[must_use]
    pub const fn prefixes(&self) -> &PrefixSet {
        &self.prefixes
    }

    /// Target schema, when configured.
    #[must_use]
    pub const fn schema(&self) -> Option<&Schema> {
        self.schema.as_ref()
    }

    /// The environment this source reads: the configured snapshot, or the
    /// process environment captured now.
    #[must_use]
    pub fn snapshot(&self) -> EnvSnapshot {
        let snapshot = self
            .snapshot
            .clone()
            .unwrap_or_else(EnvSnapshot::from_process);
        if self.sort { snapshot.sorted() } else { snapshot }
    }

    /// Build the merged tree from [`Self::snapshot`].
    ///
    /// # Errors
    ///
    /// See [`Self::tree_from`].
    pub fn read_tree(&self) -> EnvResult<Value> {
        self.tree_from(&self.snapshot())
    }

    /// Build the merged tree from `snapshot`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EnvError::StructuredDecode`],
    /// [`crate::EnvError::TypeCoercion`], or
    /// [`crate::EnvError::MergeConflict`] for the first entry that fails.
    pub fn tree_from(&self, snapshot: &EnvSnapshot) -> EnvResult<Value> {
        self.merge_entries(snapshot).map(|(tree, _)| tree)
    }

    /// Encode the tree built from `snapshot` into a change set.
    ///
    /// # Errors
    ///
    /// Propagates tree construction failures and encoder failures.
    pub fn read_from(&self, snapshot: &EnvSnapshot) -> EnvResult<ChangeSet> {
        let (tree, included) = self.merge_entries(snapshot)?;
        let change_set = ChangeSet::assemble(&tree, self.encoder.as_ref(), SOURCE_NAME)?;
        debug!(
            target: "ortho_env",
            lines = snapshot.lines().len(),
            included,
            format = change_set.format(),
            checksum = change_set.checksum(),
            "read environment source"
        );
        Ok(change_set)
    }

    /// Merge every retained entry, returning the tree and how many entries
    /// contributed to it.
    fn merge_entries(&self, snapshot: &EnvSnapshot) -> EnvResult<(Value, usize)> {
        let mut tree = Value::Object(Map::new());
        let mut included = 0_usize;
        for entry in snapshot.entries() {
            let Some(key) = self.prefixes.filter(entry.key) else {
                debug!(target: "ortho_env", key = entry.key, "entry excluded by prefix rules");
                continue;
            };
            let path = KeyPath::parse(key);
            let kind = self.resolve(path.original());
            trace!(target: "ortho_env", key = entry.key, %kind, "resolved leaf kind");
            let leaf = coerce(entry.key, entry.value, kind)?;
            merge_tree(&mut tree, build_tree(path.reversed_lowercase(), leaf))?;
            included += 1;
        }
        Ok((tree, included))
    }

    fn resolve(&self, segments: &[&str]) -> ResolvedKind {
        self.schema
            .as_ref()
            .map_or(ResolvedKind::Unknown, |schema| schema.resolve(segments))
    }
}

impl Default for EnvSource {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EnvSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvSource")
            .field("prefixes", &self.prefixes)
            .field("schema", &self.schema.is_some())
            .field("format", &self.encoder.format())
            .field("sort", &self.sort)
            .finish_non_exhaustive()
    }
}

impl Source for EnvSource {
    fn read(&self) -> EnvResult<ChangeSet> {
        self.read_from(&self.snapshot())
    }

    fn write(&self, _change_set: &ChangeSet) -> EnvResult<()> {
        Ok(())
    }

    fn watch(&self) -> EnvResult<Box<dyn Watcher>> {
        Ok(Box::new(NoopWatcher::new()))
    }

    fn name(&self) -> &str {
        SOURCE_NAME
    }
}

/// Builder for [`EnvSource`].
#[derive(Default)]
#[must_use]
pub struct EnvSourceBuilder {
    retain: Vec<String>,
    strip: Vec<String>,
    defaults: Vec<String>,
    schema: Option<Schema>,
    encoder: Option<Arc<dyn Encoder>>,
    snapshot: Option<EnvSnapshot>,
    sort: bool,
}

impl EnvSourceBuilder {
    /// Keep entries whose key starts with `prefix`, leaving the key intact.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.retain.push(prefix.into());
        self
    }

    /// Add several retain prefixes.
    pub fn prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.retain
            .extend(prefixes.into_iter().map(Into::<String>::into));
        self
    }

    /// Keep entries whose key starts with `prefix`, removing the prefix.
    pub fn stripped_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.strip.push(prefix.into());
        self
    }

    /// Add several strip prefixes.
    pub fn stripped_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.strip
            .extend(prefixes.into_iter().map(Into::<String>::into));
        self
    }

    /// Retain prefixes appended after the configured ones.
    ///
    /// They only take effect when at least one retain or strip prefix is
    /// configured, so an otherwise unrestricted source stays unrestricted.
    pub fn default_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.defaults
            .extend(prefixes.into_iter().map(Into::<String>::into));
        self
    }

    /// Coerce values using `schema`.
    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Encode change sets with `encoder` instead of JSON.
    pub fn encoder(mut self, encoder: impl Encoder + 'static) -> Self {
        self.encoder = Some(Arc::new(encoder));
        self
    }

    /// Read `snapshot` instead of the process environment.
    pub fn snapshot(mut self, snapshot: EnvSnapshot) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    /// Sort entries before merging so collisions resolve deterministically.
    pub fn sorted(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }

    /// Finish configuration.
    pub fn build(self) -> EnvSource {
        let mut prefixes = PrefixSet::new(self.retain, self.strip);
        if !prefixes.is_empty() {
            prefixes.extend_retain(self.defaults);
        }
        EnvSource {
            prefixes,
            schema: self.schema,
            encoder: self.encoder.unwrap_or_else(|| Arc::new(JsonEncoder)),
            snapshot: self.snapshot,
            sort: self.sort,
        }
    }
}
