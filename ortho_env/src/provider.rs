//! Figment provider over the environment source.
//!
//! Lets an [`EnvSource`] act as one layer of a `figment::Figment`, so the
//! merged environment tree participates in the same precedence rules as files
//! and defaults.

use figment::{
    Metadata, Profile, Provider,
    error::Error,
    providers::Serialized,
    value::{Dict, Map},
};

use crate::source::EnvSource;

impl Provider for EnvSource {
    fn metadata(&self) -> Metadata {
        Metadata::named("environment source").interpolater(|_: &Profile, keys: &[&str]| {
            keys.iter()
                .map(|key| key.to_ascii_uppercase())
                .collect::<Vec<_>>()
                .join("_")
        })
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let tree = self.read_tree()?;
        Serialized::defaults(tree).data()
    }
}
