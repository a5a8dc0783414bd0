//! # Type Reflection
//!
//! Runtime descriptions of Rust types, used to derive parameter types and
//! schema models. Element and field types are stored as function pointers so
//! recursive types (a tree node holding its own children) can be described
//! without building an infinite value.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;

/// Lazily produces the descriptor of a nested type.
pub type DescribeFn = fn() -> TypeDescriptor;

/// Lazily produces the ordered fields of a record type.
pub type FieldsFn = fn() -> Vec<FieldDescriptor>;

/// Scalar types that map directly to a Swagger type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// UTF-8 text.
    String,
    /// A single character, documented as a string.
    Char,
    /// `true` / `false`.
    Bool,
    /// Signed 8-bit integer.
    I8,
    /// Signed 16-bit integer.
    I16,
    /// Signed 32-bit integer.
    I32,
    /// Signed 64-bit integer.
    I64,
    /// Signed 128-bit integer.
    I128,
    /// Pointer-sized signed integer.
    Isize,
    /// Unsigned 8-bit integer.
    U8,
    /// Unsigned 16-bit integer.
    U16,
    /// Unsigned 32-bit integer.
    U32,
    /// Unsigned 64-bit integer.
    U64,
    /// Unsigned 128-bit integer.
    U128,
    /// Pointer-sized unsigned integer.
    Usize,
    /// Single precision float.
    F32,
    /// Double precision float.
    F64,
    /// A UUID rendered as text.
    Uuid,
    /// A timestamp rendered as RFC 3339 text.
    DateTime,
    /// A calendar date rendered as text.
    Date,
}

/// The structural shape of a described type.
#[derive(Clone)]
pub enum TypeKind {
    /// A scalar value.
    Primitive(Primitive),
    /// No value at all (`()`); never documented as a body.
    Unit,
    /// A value that may be absent (`Option<T>`).
    Optional(DescribeFn),
    /// A sequence or set of elements.
    Collection(DescribeFn),
    /// A string keyed map of values.
    Map(DescribeFn),
    /// A closed set of string values.
    Enumeration(&'static [&'static str]),
    /// A named structure with ordered fields.
    Record(FieldsFn),
}

impl fmt::Debug for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Primitive(p) => write!(f, "Primitive({:?})", p),
            TypeKind::Unit => write!(f, "Unit"),
            TypeKind::Optional(inner) => write!(f, "Optional({})", inner().full_name()),
            TypeKind::Collection(inner) => write!(f, "Collection({})", inner().full_name()),
            TypeKind::Map(inner) => write!(f, "Map({})", inner().full_name()),
            TypeKind::Enumeration(values) => write!(f, "Enumeration({:?})", values),
            TypeKind::Record(_) => write!(f, "Record"),
        }
    }
}

/// A single named field of a record type.
#[derive(Clone)]
pub struct FieldDescriptor {
    /// Serialized field name.
    pub name: Cow<'static, str>,
    /// The field's type.
    pub ty: DescribeFn,
}

impl FieldDescriptor {
    /// Describes a field of type `T`.
    pub fn of<T: Reflect + ?Sized>(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            ty: T::describe,
        }
    }

    /// Resolves the field's type descriptor.
    pub fn descriptor(&self) -> TypeDescriptor {
        (self.ty)()
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.descriptor().full_name())
    }
}

/// Runtime description of a type: identity plus structure.
///
/// Identity is the fully qualified name. Two descriptors are equal when
/// their fully qualified names are equal.
#[derive(Clone, Debug)]
pub struct TypeDescriptor {
    full_name: Cow<'static, str>,
    description: Option<String>,
    kind: TypeKind,
}

impl TypeDescriptor {
    /// Creates a descriptor with an explicit identity and shape.
    pub fn new(full_name: impl Into<Cow<'static, str>>, kind: TypeKind) -> Self {
        Self {
            full_name: full_name.into(),
            description: None,
            kind,
        }
    }

    /// Describes `T` through its [`Reflect`] implementation.
    pub fn of<T: Reflect + ?Sized>() -> Self {
        T::describe()
    }

    /// Describes a scalar type.
    pub fn primitive(full_name: impl Into<Cow<'static, str>>, primitive: Primitive) -> Self {
        Self::new(full_name, TypeKind::Primitive(primitive))
    }

    /// Describes a record with lazily resolved fields.
    pub fn record(full_name: impl Into<Cow<'static, str>>, fields: FieldsFn) -> Self {
        Self::new(full_name, TypeKind::Record(fields))
    }

    /// Describes a string enumeration.
    pub fn enumeration(
        full_name: impl Into<Cow<'static, str>>,
        values: &'static [&'static str],
    ) -> Self {
        Self::new(full_name, TypeKind::Enumeration(values))
    }

    /// Attaches a human-readable description, used on the generated model.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The fully qualified name, used as the type's stable identity.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// The unqualified name, used as the schema registry key.
    ///
    /// `app::Page<app::User>` becomes `Page«User»`.
    pub fn simple_name(&self) -> String {
        simple_name(&self.full_name)
    }

    /// Optional human-readable description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The structural shape of the type.
    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Ordered `(name, type)` pairs for records; empty for every other shape.
    pub fn fields(&self) -> Vec<FieldDescriptor> {
        match &self.kind {
            TypeKind::Record(fields) => fields(),
            _ => Vec::new(),
        }
    }

    /// Whether the type is an optional wrapper around another type.
    pub fn is_optional_wrapper(&self) -> bool {
        matches!(self.kind, TypeKind::Optional(_))
    }

    /// Element type of a collection, value type of a map, or the wrapped
    /// type of an optional wrapper.
    pub fn element_type(&self) -> Option<TypeDescriptor> {
        match &self.kind {
            TypeKind::Optional(inner) | TypeKind::Collection(inner) | TypeKind::Map(inner) => {
                Some(inner())
            }
            _ => None,
        }
    }

    /// Scalars and enumerations, which never become a registered model.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self.kind,
            TypeKind::Primitive(_) | TypeKind::Enumeration(_)
        )
    }

    /// Whether the type carries no value.
    pub fn is_unit(&self) -> bool {
        matches!(self.kind, TypeKind::Unit)
    }

    /// Whether the type is a sequence or set.
    pub fn is_collection(&self) -> bool {
        matches!(self.kind, TypeKind::Collection(_))
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.full_name == other.full_name
    }
}

impl Eq for TypeDescriptor {}

/// Strips module paths from every identifier in a type name, rendering
/// generic arguments between `«` and `»`.
fn simple_name(full_name: &str) -> String {
    let mut out = String::with_capacity(full_name.len());
    let mut token = String::new();

    let flush = |token: &mut String, out: &mut String| {
        if let Some(last) = token.rsplit("::").next() {
            out.push_str(last);
        }
        token.clear();
    };

    for c in full_name.chars() {
        match c {
            '<' => {
                flush(&mut token, &mut out);
                out.push('«');
            }
            '>' => {
                flush(&mut token, &mut out);
                out.push('»');
            }
            ',' => {
                flush(&mut token, &mut out);
                out.push(',');
            }
            ' ' | '&' => flush(&mut token, &mut out),
            _ => token.push(c),
        }
    }
    flush(&mut token, &mut out);
    out
}

/// Types that can describe themselves at runtime.
///
/// Records implement this by hand:
///
/// ```
/// use routedoc_core::reflect::{FieldDescriptor, Reflect, TypeDescriptor};
///
/// struct User {
///     id: i64,
///     name: String,
/// }
///
/// impl Reflect for User {
///     fn describe() -> TypeDescriptor {
///         TypeDescriptor::record(std::any::type_name::<Self>(), || {
///             vec![
///                 FieldDescriptor::of::<i64>("id"),
///                 FieldDescriptor::of::<String>("name"),
///             ]
///         })
///     }
/// }
///
/// assert_eq!(TypeDescriptor::of::<User>().simple_name(), "User");
/// ```
pub trait Reflect {
    /// Returns the runtime description of `Self`.
    fn describe() -> TypeDescriptor;
}

macro_rules! reflect_primitive {
    ($($ty:ty => $prim:ident),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::primitive(std::any::type_name::<Self>(), Primitive::$prim)
                }
            }
        )*
    };
}

reflect_primitive! {
    String => String,
    str => String,
    char => Char,
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
    f32 => F32,
    f64 => F64,
}

impl Reflect for () {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new("()", TypeKind::Unit)
    }
}

impl<T: Reflect + ?Sized> Reflect for &T {
    fn describe() -> TypeDescriptor {
        T::describe()
    }
}

impl<T: Reflect + ?Sized> Reflect for Box<T> {
    fn describe() -> TypeDescriptor {
        T::describe()
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new(
            std::any::type_name::<Self>(),
            TypeKind::Optional(T::describe),
        )
    }
}

macro_rules! reflect_collection {
    ($($coll:ident),* $(,)?) => {
        $(
            impl<T: Reflect> Reflect for $coll<T> {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::new(
                        std::any::type_name::<Self>(),
                        TypeKind::Collection(T::describe),
                    )
                }
            }
        )*
    };
}

reflect_collection!(Vec, VecDeque, HashSet, BTreeSet);

impl<V: Reflect, S> Reflect for HashMap<String, V, S> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new(std::any::type_name::<Self>(), TypeKind::Map(V::describe))
    }
}

impl<V: Reflect> Reflect for BTreeMap<String, V> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new(std::any::type_name::<Self>(), TypeKind::Map(V::describe))
    }
}
