//! Types and the subtype lattice.
//!
//! ## Components
//!
//! - [`Type`]: basic types, LUB wrappers and (non-empty) list types.
//! - [`TypeRegistry`]: the tree of basic types with their supertypes.
//!
//! The basic types form a tree rooted in `rdfs:Resource` (top), with
//! `ottr:Bot` below every type. Because the tree has no multiple
//! inheritance, any two mutually compatible types have a unique greatest
//! lower type.

use std::fmt;
use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use crate::error::TypeError;
use crate::vocab::{self, types as t};

/// The type of a term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// A basic type, identified by IRI.
    Basic(String),
    /// Least upper bound over a basic type.
    ///
    /// Assigned to constants whose precise type is unknown: the IRI `ex:a`
    /// gets `LUB<ottr:IRI>` since it could be used as a class, a property
    /// or an individual.
    Lub(String),
    /// A possibly empty list.
    List(Box<Type>),
    /// A non-empty list.
    NeList(Box<Type>),
}

impl Type {
    pub fn basic(iri: impl Into<String>) -> Self {
        Type::Basic(iri.into())
    }

    pub fn lub(iri: impl Into<String>) -> Self {
        Type::Lub(iri.into())
    }

    pub fn list(inner: Type) -> Self {
        Type::List(Box::new(inner))
    }

    pub fn ne_list(inner: Type) -> Self {
        Type::NeList(Box::new(inner))
    }

    /// `rdfs:Resource`, the top type.
    pub fn top() -> Self {
        Type::basic(t::TOP)
    }

    /// `ottr:Bot`, below every type.
    pub fn bot() -> Self {
        Type::basic(t::BOT)
    }

    pub fn iri() -> Self {
        Type::basic(t::IRI)
    }

    pub fn literal() -> Self {
        Type::basic(t::LITERAL)
    }

    pub fn is_top(&self) -> bool {
        matches!(self, Type::Basic(iri) if iri == t::TOP)
    }

    pub fn is_bot(&self) -> bool {
        matches!(self, Type::Basic(iri) if iri == t::BOT)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Type::List(_) | Type::NeList(_))
    }

    /// The element type of a list type.
    pub fn inner(&self) -> Option<&Type> {
        match self {
            Type::List(inner) | Type::NeList(inner) => Some(inner),
            _ => None,
        }
    }

    /// The type `level` list-nestings deep; level 0 is the type itself.
    pub fn inner_at(&self, level: usize) -> Option<&Type> {
        let mut ty = self;
        for _ in 0..level {
            ty = ty.inner()?;
        }
        Some(ty)
    }

    /// Strip every LUB wrapper, including inside list types.
    pub fn remove_lub(&self) -> Type {
        match self {
            Type::Lub(iri) => Type::Basic(iri.clone()),
            Type::List(inner) => Type::list(inner.remove_lub()),
            Type::NeList(inner) => Type::ne_list(inner.remove_lub()),
            basic => basic.clone(),
        }
    }

    /// Subtype test against the standard type tree.
    pub fn is_sub_type_of(&self, other: &Type) -> bool {
        self.is_sub_type_of_in(other, TypeRegistry::standard())
    }

    /// Compatibility test against the standard type tree.
    pub fn is_compatible_with(&self, other: &Type) -> bool {
        self.is_compatible_with_in(other, TypeRegistry::standard())
    }

    /// Subtype test against a given registry.
    pub fn is_sub_type_of_in(&self, other: &Type, registry: &TypeRegistry) -> bool {
        if other.is_top() || self.is_bot() {
            return true;
        }
        match (self, other) {
            (Type::Basic(sub), Type::Basic(sup)) => registry.is_sub_type(sub, sup),
            (Type::Lub(a), Type::Lub(b)) => a == b,
            (Type::List(x), Type::List(y)) => x.is_sub_type_of_in(y, registry),
            (Type::NeList(x), Type::List(y) | Type::NeList(y)) => x.is_sub_type_of_in(y, registry),
            _ => false,
        }
    }

    /// Whether a term of this type may be used where `other` is expected.
    ///
    /// Every subtype is compatible. A `LUB<a>` is additionally compatible
    /// with anything comparable to `a`, and list types are compatible
    /// element-wise following the same list-kind rules as subtyping.
    pub fn is_compatible_with_in(&self, other: &Type, registry: &TypeRegistry) -> bool {
        if self.is_sub_type_of_in(other, registry) {
            return true;
        }
        match (self, other) {
            (Type::Lub(a), _) => {
                let bound = Type::Basic(a.clone());
                other.is_sub_type_of_in(&bound, registry)
                    || bound.is_sub_type_of_in(other, registry)
            }
            (Type::List(x), Type::List(y)) => x.is_compatible_with_in(y, registry),
            (Type::NeList(x), Type::List(y) | Type::NeList(y)) => {
                x.is_compatible_with_in(y, registry)
            }
            _ => false,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Basic(iri) => f.write_str(&vocab::compact(iri)),
            Type::Lub(iri) => write!(f, "LUB<{}>", vocab::compact(iri)),
            Type::List(inner) => write!(f, "List<{}>", inner),
            Type::NeList(inner) => write!(f, "NEList<{}>", inner),
        }
    }
}

// ============================================================================
// Type Registry
// ============================================================================

static STANDARD: LazyLock<TypeRegistry> = LazyLock::new(TypeRegistry::with_standard_types);

/// The tree of basic types.
///
/// Stores the direct supertype of every registered type. The top type has
/// no supertype; the bottom type is handled structurally and is never
/// stored.
#[derive(Clone)]
pub struct TypeRegistry {
    parents: FxHashMap<String, String>,
}

impl TypeRegistry {
    /// Create a registry containing only the top type.
    pub fn new() -> Self {
        Self {
            parents: FxHashMap::default(),
        }
    }

    /// The shared registry holding the standard OTTR type tree.
    pub fn standard() -> &'static TypeRegistry {
        &STANDARD
    }

    /// Create a registry pre-populated with the standard OTTR type tree.
    pub fn with_standard_types() -> Self {
        let mut registry = Self::new();
        for (iri, parent) in STANDARD_TREE {
            registry.parents.insert(iri.to_string(), parent.to_string());
        }
        registry
    }

    /// Register `iri` as a direct subtype of `parent`.
    ///
    /// Registering the same pair twice is a no-op.
    pub fn register(&mut self, iri: &str, parent: &str) -> Result<(), TypeError> {
        if iri == t::TOP || iri == t::BOT {
            return Err(TypeError::BuiltIn {
                iri: iri.to_string(),
            });
        }
        if !self.contains(parent) || parent == t::BOT {
            return Err(TypeError::UnknownSupertype {
                iri: iri.to_string(),
                parent: parent.to_string(),
            });
        }
        match self.parents.get(iri) {
            Some(existing) if existing == parent => Ok(()),
            Some(existing) => Err(TypeError::ConflictingSupertype {
                iri: iri.to_string(),
                existing: existing.clone(),
                requested: parent.to_string(),
            }),
            None => {
                self.parents.insert(iri.to_string(), parent.to_string());
                Ok(())
            }
        }
    }

    pub fn contains(&self, iri: &str) -> bool {
        iri == t::TOP || iri == t::BOT || self.parents.contains_key(iri)
    }

    /// The direct supertype of `iri`.
    pub fn supertype(&self, iri: &str) -> Option<&str> {
        self.parents.get(iri).map(String::as_str)
    }

    /// The basic type registered under `iri`.
    pub fn get(&self, iri: &str) -> Option<Type> {
        self.contains(iri).then(|| Type::basic(iri))
    }

    /// Walk the supertype chain of `sub` looking for `sup`.
    pub fn is_sub_type(&self, sub: &str, sup: &str) -> bool {
        if sub == sup || sup == t::TOP || sub == t::BOT {
            return true;
        }
        let mut current = sub;
        while let Some(parent) = self.supertype(current) {
            if parent == sup {
                return true;
            }
            current = parent;
        }
        false
    }

    /// The type of a literal with the given datatype.
    ///
    /// Unregistered datatypes fall back to `rdfs:Literal`.
    pub fn literal_type(&self, datatype: &str) -> Type {
        self.get(datatype).unwrap_or_else(Type::literal)
    }

    pub fn len(&self) -> usize {
        self.parents.len() + 2
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.len())
            .finish()
    }
}

/// `(type, direct supertype)` pairs, parents listed before children.
const STANDARD_TREE: &[(&str, &str)] = &[
    (t::IRI, t::TOP),
    (t::LITERAL, t::TOP),
    // IRIs
    (t::RDFS_CLASS, t::IRI),
    (t::OWL_CLASS, t::RDFS_CLASS),
    (t::RDFS_DATATYPE, t::RDFS_CLASS),
    (t::RDF_PROPERTY, t::IRI),
    (t::OWL_OBJECT_PROPERTY, t::RDF_PROPERTY),
    (t::OWL_DATATYPE_PROPERTY, t::RDF_PROPERTY),
    (t::OWL_ANNOTATION_PROPERTY, t::RDF_PROPERTY),
    (t::OWL_NAMED_INDIVIDUAL, t::IRI),
    // Literals
    (t::RDF_LANG_STRING, t::LITERAL),
    (t::RDF_HTML, t::LITERAL),
    (t::XSD_STRING, t::LITERAL),
    (t::XSD_NORMALIZED_STRING, t::XSD_STRING),
    (t::XSD_TOKEN, t::XSD_NORMALIZED_STRING),
    (t::XSD_LANGUAGE, t::XSD_TOKEN),
    (t::XSD_BOOLEAN, t::LITERAL),
    (t::XSD_DECIMAL, t::LITERAL),
    (t::XSD_INTEGER, t::XSD_DECIMAL),
    (t::XSD_NON_NEGATIVE_INTEGER, t::XSD_INTEGER),
    (t::XSD_POSITIVE_INTEGER, t::XSD_NON_NEGATIVE_INTEGER),
    (t::XSD_LONG, t::XSD_INTEGER),
    (t::XSD_INT, t::XSD_LONG),
    (t::XSD_SHORT, t::XSD_INT),
    (t::XSD_BYTE, t::XSD_SHORT),
    (t::XSD_DOUBLE, t::LITERAL),
    (t::XSD_FLOAT, t::LITERAL),
    (t::XSD_DATE, t::LITERAL),
    (t::XSD_DATE_TIME, t::LITERAL),
    (t::XSD_TIME, t::LITERAL),
    (t::XSD_ANY_URI, t::LITERAL),
];
