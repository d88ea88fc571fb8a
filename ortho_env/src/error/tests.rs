//! Unit tests for error rendering and conversions.

use rstest::rstest;

use super::EnvError;
use crate::schema::ResolvedKind;

fn decode_error() -> serde_json::Error {
    match serde_json::from_str::<serde_json::Value>("{") {
        Err(err) => err,
        Ok(value) => panic!("expected a decode failure, got {value}"),
    }
}

#[rstest]
#[case::coercion(
    EnvError::TypeCoercion { key: "A_B".into(), value: "notabool".into(), kind: ResolvedKind::Bool },
    "environment key 'A_B' expects a boolean value, got 'notabool'"
)]
#[case::conflict(
    EnvError::MergeConflict { path: "a.b".into() },
    "environment keys disagree on the shape of 'a.b': table and value collide"
)]
#[case::stopped(EnvError::WatcherStopped, "watcher stopped")]
fn renders_messages(#[case] err: EnvError, #[case] expected: &str) {
    assert_eq!(err.to_string(), expected);
}

#[test]
fn structured_decode_keeps_source() {
    let err = EnvError::StructuredDecode {
        key: "FOO".into(),
        source: decode_error(),
    };
    assert!(err.to_string().starts_with("environment key 'FOO' holds malformed structured data"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn encoding_wraps_encoder_failure() {
    let err = EnvError::encoding("json", decode_error());
    assert!(matches!(err, EnvError::Encoding { format: "json", .. }));
    assert!(err.to_string().starts_with("failed to encode configuration as json"));
}

#[test]
fn converts_into_figment_error() {
    let err = EnvError::MergeConflict { path: "x".into() };
    let expected = err.to_string();
    let figment_err = figment::Error::from(err);
    assert!(figment_err.to_string().contains(&expected));
}
