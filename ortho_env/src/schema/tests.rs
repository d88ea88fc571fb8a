//! Unit tests for schema descriptors and path resolution.

use std::collections::{BTreeMap, HashMap};

use rstest::{fixture, rstest};

use super::{Describe, FieldType, ResolvedKind, Schema};

struct Limits;

impl Describe for Limits {
    fn describe() -> FieldType {
        FieldType::Struct(
            Schema::new()
                .field("BURST", Option::<u32>::describe())
                .field("RATIO", f32::describe()),
        )
    }
}

#[fixture]
fn schema() -> Schema {
    Schema::new()
        .field("A", FieldType::Struct(Schema::new().field("B", bool::describe())))
        .field("TAGS", HashMap::<String, i32>::describe())
        .field("LABELS", BTreeMap::<String, String>::describe())
        .field("OWNERS", BTreeMap::<String, Limits>::describe())
        .field("TIMEOUT", i64::describe())
        .field("RETRIES", u8::describe())
        .field("MAX_BYTES", u64::describe())
        .field("NAME", String::describe())
        .field("HOSTS", Vec::<String>::describe())
        .field("LIMITS", Option::<Limits>::describe())
        .field("DEBUG", Option::<bool>::describe())
}

#[rstest]
#[case::nested_bool(&["A", "B"], ResolvedKind::Bool)]
#[case::map_value_kind(&["TAGS", "FOO"], ResolvedKind::SmallInt)]
#[case::map_stops_walk(&["TAGS", "FOO", "BAR"], ResolvedKind::SmallInt)]
#[case::string_map(&["LABELS", "TEAM"], ResolvedKind::String)]
#[case::struct_map_value(&["OWNERS", "ALICE"], ResolvedKind::Unknown)]
#[case::wide_integer(&["TIMEOUT"], ResolvedKind::Int64)]
#[case::narrow_integer(&["RETRIES"], ResolvedKind::SmallInt)]
#[case::wide_unsigned_integer(&["MAX_BYTES"], ResolvedKind::Int64)]
#[case::string(&["NAME"], ResolvedKind::String)]
#[case::list_leaf(&["HOSTS"], ResolvedKind::Unknown)]
#[case::struct_leaf(&["A"], ResolvedKind::Unknown)]
#[case::map_leaf(&["TAGS"], ResolvedKind::Unknown)]
#[case::through_optional(&["LIMITS", "BURST"], ResolvedKind::SmallInt)]
#[case::float(&["LIMITS", "RATIO"], ResolvedKind::Float)]
#[case::optional_leaf(&["DEBUG"], ResolvedKind::Bool)]
#[case::missing_root(&["MISSING"], ResolvedKind::Unknown)]
#[case::missing_child(&["A", "C"], ResolvedKind::Unknown)]
#[case::descend_into_primitive(&["NAME", "FIRST"], ResolvedKind::Unknown)]
#[case::descend_into_list(&["HOSTS", "0"], ResolvedKind::Unknown)]
#[case::case_sensitive(&["a", "b"], ResolvedKind::Unknown)]
#[case::empty(&[], ResolvedKind::Unknown)]
fn resolves_paths(schema: Schema, #[case] path: &[&str], #[case] expected: ResolvedKind) {
    assert_eq!(schema.resolve(path), expected, "path {path:?}");
}

#[test]
fn schema_of_struct_exposes_fields() {
    let schema = Schema::of::<Limits>();
    let names: Vec<_> = schema.fields().iter().map(super::Field::name).collect();
    assert_eq!(names, ["BURST", "RATIO"]);
}

#[test]
fn schema_of_optional_struct_unwraps() {
    assert_eq!(Schema::of::<Option<Limits>>(), Schema::of::<Limits>());
}

#[test]
fn schema_of_primitive_is_empty() {
    let schema = Schema::of::<u16>();
    assert!(schema.fields().is_empty());
    assert_eq!(schema.resolve(&["PORT"]), ResolvedKind::Unknown);
}

#[test]
fn boxed_types_describe_their_contents() {
    assert_eq!(Box::<u64>::describe(), u64::describe());
}

#[test]
fn peel_strips_nested_optionals() {
    let ty = Option::<Option<String>>::describe();
    assert_eq!(ty.peel(), &FieldType::String);
}
