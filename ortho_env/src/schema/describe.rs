//! `Describe` implementations for standard library types.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use super::FieldType;

/// Types able to describe their configuration shape.
///
/// Applications implement this for their configuration structures so an
/// environment source can coerce values using the declared field types.
///
/// # Examples
///
/// ```rust
/// use ortho_env::schema::{Describe, FieldType, ResolvedKind, Schema};
///
/// struct Database {
///     host: String,
///     port: u16,
/// }
///
/// impl Describe for Database {
///     fn describe() -> FieldType {
///         FieldType::Struct(
///             Schema::new()
///                 .field("HOST", String::describe())
///                 .field("PORT", u16::describe()),
///         )
///     }
/// }
///
/// let schema = Schema::of::<Database>();
/// assert_eq!(schema.resolve(&["PORT"]), ResolvedKind::SmallInt);
/// ```
pub trait Describe {
    /// Return the descriptor for `Self`.
    fn describe() -> FieldType;
}

const POINTER_BITS: u8 = if usize::BITS == 64 {
    64
} else if usize::BITS == 32 {
    32
} else {
    16
};

macro_rules! describe_integer {
    ($($ty:ty => $bits:expr, $signed:expr);* $(;)?) => {
        $(
            impl Describe for $ty {
                fn describe() -> FieldType {
                    FieldType::Integer { bits: $bits, signed: $signed }
                }
            }
        )*
    };
}

describe_integer! {
    i8 => 8, true;
    i16 => 16, true;
    i32 => 32, true;
    i64 => 64, true;
    isize => POINTER_BITS, true;
    u8 => 8, false;
    u16 => 16, false;
    u32 => 32, false;
    u64 => 64, false;
    usize => POINTER_BITS, false;
}

impl Describe for bool {
    fn describe() -> FieldType {
        FieldType::Bool
    }
}

impl Describe for f32 {
    fn describe() -> FieldType {
        FieldType::Float { bits: 32 }
    }
}

impl Describe for f64 {
    fn describe() -> FieldType {
        FieldType::Float { bits: 64 }
    }
}

impl Describe for String {
    fn describe() -> FieldType {
        FieldType::String
    }
}

impl<T: Describe> Describe for Option<T> {
    fn describe() -> FieldType {
        FieldType::Optional(Box::new(T::describe()))
    }
}

impl<T: Describe> Describe for Box<T> {
    fn describe() -> FieldType {
        T::describe()
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn describe() -> FieldType {
        FieldType::List(Box::new(T::describe()))
    }
}

impl<V: Describe, S: BuildHasher> Describe for HashMap<String, V, S> {
    fn describe() -> FieldType {
        FieldType::Map(Box::new(V::describe()))
    }
}

impl<V: Describe> Describe for BTreeMap<String, V> {
    fn describe() -> FieldType {
        FieldType::Map(Box::new(V::describe()))
    }
}
