//! Output records produced by each read cycle.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::encoder::Encoder;
use crate::error::EnvResult;

/// Encoded configuration together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSet {
    data: Vec<u8>,
    format: String,
    checksum: String,
    timestamp: DateTime<Utc>,
    source: String,
}

impl ChangeSet {
    /// Encode `tree` with `encoder` and stamp the result.
    ///
    /// # Errors
    ///
    /// Propagates the encoder's [`crate::EnvError::Encoding`] failure.
    pub fn assemble(tree: &Value, encoder: &dyn Encoder, source: &str) -> EnvResult<Self> {
        let data = encoder.encode(tree)?;
        Ok(Self::new(data, encoder.format(), source))
    }

    /// Wrap already encoded `data`, computing its checksum and timestamp.
    #[must_use]
    pub fn new(data: Vec<u8>, format: impl Into<String>, source: impl Into<String>) -> Self {
        let checksum = checksum(&data);
        Self {
            data,
            format: format.into(),
            checksum,
            timestamp: Utc::now(),
            source: source.into(),
        }
    }

    /// Encoded configuration bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Format tag of the encoder that produced [`Self::data`].
    #[must_use]
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Lowercase hex SHA-256 of [`Self::data`].
    #[must_use]
    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    /// Generation time.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Name of the source that produced this change set.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Recompute the checksum of the current data.
    #[must_use]
    pub fn sum(&self) -> String {
        checksum(&self.data)
    }

    /// Consume the change set, returning the encoded bytes.
    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Serializable view of everything except the payload.
    #[must_use]
    pub fn metadata(&self) -> ChangeSetMetadata<'_> {
        ChangeSetMetadata {
            format: &self.format,
            checksum: &self.checksum,
            timestamp: self.timestamp,
            source: &self.source,
            size: self.data.len(),
        }
    }
}

/// Provenance of a [`ChangeSet`] without its payload.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChangeSetMetadata<'a> {
    /// Format tag.
    pub format: &'a str,
    /// Lowercase hex SHA-256 of the payload.
    pub checksum: &'a str,
    /// Generation time.
    pub timestamp: DateTime<Utc>,
    /// Source name.
    pub source: &'a str,
    /// Payload length in bytes.
    pub size: usize,
}

fn checksum(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::ChangeSet;
    use crate::encoder::JsonEncoder;
    use anyhow::{Result, ensure};
    use serde_json::json;

    #[test]
    fn checksum_is_sha256_of_payload() {
        let change_set = ChangeSet::new(b"{}".to_vec(), "json", "env");
        assert_eq!(
            change_set.checksum(),
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );
        assert_eq!(change_set.sum(), change_set.checksum());
    }

    #[test]
    fn assemble_records_encoder_format() -> Result<()> {
        let change_set = ChangeSet::assemble(&json!({"a": 1}), &JsonEncoder, "env")?;
        ensure!(change_set.format() == "json", "format {}", change_set.format());
        ensure!(change_set.source() == "env", "source {}", change_set.source());
        ensure!(change_set.data() == br#"{"a":1}"#, "data {:?}", change_set.data());
        let metadata = change_set.metadata();
        ensure!(metadata.size == 7, "size {}", metadata.size);
        Ok(())
    }

    #[test]
    fn identical_payloads_share_checksums() {
        let first = ChangeSet::new(b"a".to_vec(), "json", "env");
        let second = ChangeSet::new(b"a".to_vec(), "toml", "file");
        assert_eq!(first.checksum(), second.checksum());
    }
}
