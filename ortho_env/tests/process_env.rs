//! Reads against the live process environment inside `figment::Jail`.
//!
//! The jail restores every variable it sets, so these tests can mutate the
//! environment without leaking into one another.

use anyhow::{Result, anyhow};
use figment::{
    Figment, Jail,
    providers::{Format, Toml},
};
use ortho_env::{EnvSnapshot, EnvSource, Source};
use rstest::rstest;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
struct Database {
    host: String,
    port: u16,
}

#[derive(Debug, Deserialize)]
struct Settings {
    database: Database,
    #[serde(default)]
    verbose: bool,
}

fn with_jail<F>(f: F) -> Result<()>
where
    F: FnOnce(&mut Jail) -> figment::error::Result<()>,
{
    Jail::try_with(f).map_err(|err| anyhow!(err.to_string()))
}

#[rstest]
fn snapshot_captures_process_variables() -> Result<()> {
    with_jail(|j| {
        j.set_env("ORTHO_ENV_TEST_SNAPSHOT_KEY", "present");
        let snapshot = EnvSnapshot::from_process();
        let found = snapshot
            .entries()
            .any(|entry| entry.key == "ORTHO_ENV_TEST_SNAPSHOT_KEY" && entry.value == "present");
        if found {
            Ok(())
        } else {
            Err(figment::Error::from("variable missing from snapshot"))
        }
    })
}

#[rstest]
fn reads_prefixed_process_variables() -> Result<()> {
    with_jail(|j| {
        j.set_env("ORTHOTEST_DATABASE_HOST", "db.internal");
        j.set_env("ORTHOTEST_DATABASE_PORT", "6543");
        let source = EnvSource::builder().stripped_prefix("ORTHOTEST_").build();
        let tree = source.read_tree()?;
        if tree == json!({"database": {"host": "db.internal", "port": 6543}}) {
            Ok(())
        } else {
            Err(figment::Error::from(format!("unexpected tree {tree}")))
        }
    })
}

#[rstest]
fn environment_layer_overrides_file_layer() -> Result<()> {
    with_jail(|j| {
        j.create_file(
            "settings.toml",
            r#"
[database]
host = "localhost"
port = 5432
"#,
        )?;
        j.set_env("ORTHOLAYER_DATABASE_PORT", "7000");
        j.set_env("ORTHOLAYER_VERBOSE", "true");
        let source = EnvSource::builder().stripped_prefix("ORTHOLAYER_").build();
        let settings: Settings = Figment::from(Toml::file("settings.toml"))
            .merge(source)
            .extract()?;
        if settings.database.host == "localhost"
            && settings.database.port == 7000
            && settings.verbose
        {
            Ok(())
        } else {
            Err(figment::Error::from(format!("unexpected settings {settings:?}")))
        }
    })
}

#[rstest]
fn read_reports_env_source_name() -> Result<()> {
    with_jail(|j| {
        j.set_env("ORTHONAME_FLAG", "1");
        let change_set = EnvSource::builder()
            .prefix("ORTHONAME_")
            .build()
            .read()?;
        if change_set.source() == "env" && change_set.data() == br#"{"orthoname":{"flag":1}}"# {
            Ok(())
        } else {
            Err(figment::Error::from("unexpected change set"))
        }
    })
}
