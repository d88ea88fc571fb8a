//! Target schema descriptors and leaf-kind resolution.
//!
//! A [`Schema`] is a tree of named fields describing the shape of the
//! configuration an application expects. The environment source consults it to
//! decide how to coerce each value: a key such as `SERVER_PORT` is looked up
//! field by field (`SERVER`, then `PORT`) and the declared primitive type of
//! the leaf selects the parser. Paths the schema does not describe resolve to
//! [`ResolvedKind::Unknown`] and fall back to heuristic coercion.
//!
//! Field names are matched case-sensitively against the original key
//! segments, so a schema intended for upper-case environment keys declares
//! upper-case field names.

mod describe;

use std::fmt;

pub use describe::Describe;

/// Declared type of a schema field.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FieldType {
    /// Boolean flag.
    Bool,
    /// Integer of the given width and signedness.
    Integer {
        /// Width in bits.
        bits: u8,
        /// Whether the integer is signed.
        signed: bool,
    },
    /// Floating-point number of the given width.
    Float {
        /// Width in bits.
        bits: u8,
    },
    /// UTF-8 string.
    String,
    /// Optional value; resolution looks through it.
    Optional(Box<FieldType>),
    /// Homogeneous list.
    List(Box<FieldType>),
    /// Map with dynamic string keys and values of the boxed type.
    Map(Box<FieldType>),
    /// Nested structure with statically declared fields.
    Struct(Schema),
}

impl FieldType {
    /// Strip any optional indirection.
    #[must_use]
    pub fn peel(&self) -> &Self {
        let mut current = self;
        while let Self::Optional(inner) = current {
            current = inner;
        }
        current
    }
}

/// A named field inside a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    ty: FieldType,
}

impl Field {
    /// Construct a field descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    /// Returns the declared field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared field type.
    #[must_use]
    pub const fn ty(&self) -> &FieldType {
        &self.ty
    }
}

/// Ordered collection of field descriptors for a structure.
///
/// # Examples
///
/// ```rust
/// use ortho_env::schema::{FieldType, ResolvedKind, Schema};
///
/// let schema = Schema::new()
///     .field("DEBUG", FieldType::Bool)
///     .field(
///         "SERVER",
///         FieldType::Struct(Schema::new().field(
///             "PORT",
///             FieldType::Integer { bits: 16, signed: false },
///         )),
///     );
/// assert_eq!(schema.resolve(&["SERVER", "PORT"]), ResolvedKind::SmallInt);
/// assert_eq!(schema.resolve(&["server", "port"]), ResolvedKind::Unknown);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    /// Create an empty schema.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Build the schema described by `T`.
    ///
    /// Only structures carry fields; any other description yields an empty
    /// schema, which resolves every path to [`ResolvedKind::Unknown`].
    #[must_use]
    pub fn of<T: Describe>() -> Self {
        match T::describe() {
            FieldType::Struct(schema) => schema,
            FieldType::Optional(inner) => match *inner {
                FieldType::Struct(schema) => schema,
                _ => Self::new(),
            },
            _ => Self::new(),
        }
    }

    /// Append a field, returning the extended schema.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        self.fields.push(Field::new(name, ty));
        self
    }

    /// Returns the declared fields in order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up a field by its exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Resolve the primitive kind expected at `segments`.
    ///
    /// The first segment names a top-level field. Each further segment
    /// descends into a nested structure; when the current field is a map the
    /// walk stops and the map's value kind is returned, since its keys are not
    /// declared statically. A segment with no matching field, or an attempt
    /// to descend into a primitive or list, yields [`ResolvedKind::Unknown`].
    #[must_use]
    pub fn resolve<S: AsRef<str>>(&self, segments: &[S]) -> ResolvedKind {
        let Some((first, rest)) = segments.split_first() else {
            return ResolvedKind::Unknown;
        };
        let Some(root) = self.get(first.as_ref()) else {
            return ResolvedKind::Unknown;
        };

        let mut current = &root.ty;
        for segment in rest {
            match current.peel() {
                FieldType::Map(value) => return ResolvedKind::of(value),
                FieldType::Struct(schema) => match schema.get(segment.as_ref()) {
                    Some(field) => current = &field.ty,
                    None => return ResolvedKind::Unknown,
                },
                _ => return ResolvedKind::Unknown,
            }
        }
        ResolvedKind::of(current)
    }
}

/// Primitive kind used to coerce a leaf value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ResolvedKind {
    /// Boolean.
    Bool,
    /// Integer narrower than 64 bits, parsed at machine width.
    SmallInt,
    /// 64-bit integer.
    Int64,
    /// Floating-point number, parsed at 64-bit precision.
    Float,
    /// String, passed through untouched.
    String,
    /// No usable kind; the value is sniffed heuristically.
    Unknown,
}

impl ResolvedKind {
    /// Map a declared field type onto the kind used for coercion.
    ///
    /// Structures, lists, and maps have no primitive kind and map to
    /// [`Self::Unknown`].
    #[must_use]
    pub fn of(ty: &FieldType) -> Self {
        match ty.peel() {
            FieldType::Bool => Self::Bool,
            FieldType::Integer { bits: 64, .. } => Self::Int64,
            FieldType::Integer { .. } => Self::SmallInt,
            FieldType::Float { .. } => Self::Float,
            FieldType::String => Self::String,
            _ => Self::Unknown,
        }
    }

    /// Returns `true` unless the kind is [`Self::Unknown`].
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for ResolvedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Bool => "boolean",
            Self::SmallInt => "integer",
            Self::Int64 => "64-bit integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests;
