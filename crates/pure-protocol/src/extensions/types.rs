//! Extension Type Definitions

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::builders::SubtypeInfoBuilder;

// ─────────────────────────────────────────────────────────────────────────────
// Protocol Objects
// ─────────────────────────────────────────────────────────────────────────────

/// A value that can travel as a polymorphic protocol element.
///
/// Implemented for every serializable `'static` type; the polymorphic form
/// is `Box<dyn ProtocolObject>`.
pub trait ProtocolObject: Any + fmt::Debug + Send + Sync + 'static {
    /// Borrow as `Any` for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Convert into a boxed `Any` for owned downcasting
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;

    /// Serialize the concrete value, without any type property
    fn to_json(&self) -> serde_json::Result<serde_json::Value>;

    /// Simple name of the concrete type
    fn variant_name(&self) -> &'static str;
}

impl<T> ProtocolObject for T
where
    T: Serialize + fmt::Debug + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
        self
    }

    fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    fn variant_name(&self) -> &'static str {
        simple_type_name::<T>()
    }
}

impl dyn ProtocolObject {
    /// Check whether the concrete type is `T`
    pub fn is<T: ProtocolObject>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Borrow the concrete value if it is a `T`
    pub fn downcast_ref<T: ProtocolObject>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Runtime type of the concrete value
    pub fn concrete_type_id(&self) -> TypeId {
        self.as_any().type_id()
    }
}

/// Last path segment of a type name, without generic arguments.
pub(crate) fn simple_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

// ─────────────────────────────────────────────────────────────────────────────
// Supertypes & Variants
// ─────────────────────────────────────────────────────────────────────────────

/// Abstract category of polymorphic protocol values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Supertype(&'static str);

impl Supertype {
    /// Create a supertype identifier
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Supertype name as used in diagnostics
    pub const fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Supertype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

type DecodeFn = fn(serde_json::Value) -> serde_json::Result<Box<dyn ProtocolObject>>;

/// Type-erased descriptor of a concrete variant.
///
/// Equality and hashing follow the Rust type, not the name.
#[derive(Clone, Copy)]
pub struct VariantType {
    name: &'static str,
    type_id: TypeId,
    decode: DecodeFn,
}

impl VariantType {
    /// Describe the variant `T`
    pub fn of<T>() -> Self
    where
        T: ProtocolObject + DeserializeOwned,
    {
        Self {
            name: simple_type_name::<T>(),
            type_id: TypeId::of::<T>(),
            decode: decode_boxed::<T>,
        }
    }

    /// Simple type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Rust type identity
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Decode a JSON value (type property already removed) into this variant
    pub fn decode(&self, value: serde_json::Value) -> serde_json::Result<Box<dyn ProtocolObject>> {
        (self.decode)(value)
    }
}

fn decode_boxed<T>(value: serde_json::Value) -> serde_json::Result<Box<dyn ProtocolObject>>
where
    T: ProtocolObject + DeserializeOwned,
{
    let decoded: T = serde_json::from_value(value)?;
    Ok(Box::new(decoded))
}

impl PartialEq for VariantType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for VariantType {}

impl Hash for VariantType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for VariantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VariantType").field(&self.name).finish()
    }
}

impl fmt::Display for VariantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Subtype Info
// ─────────────────────────────────────────────────────────────────────────────

/// Subtypes one extension contributes for one supertype
#[derive(Debug, Clone)]
pub struct SubtypeInfo {
    pub(crate) supertype: Supertype,
    pub(crate) default_subtype: Option<VariantType>,
    pub(crate) subtypes: Vec<(VariantType, String)>,
}

impl SubtypeInfo {
    /// Start building subtype info for a supertype
    pub fn builder(supertype: Supertype) -> SubtypeInfoBuilder {
        SubtypeInfoBuilder::new(supertype)
    }

    /// The abstract category being extended
    pub fn supertype(&self) -> Supertype {
        self.supertype
    }

    /// Variant used when input carries no type property
    pub fn default_subtype(&self) -> Option<VariantType> {
        self.default_subtype
    }

    /// `(variant, tag)` pairs in contribution order
    pub fn subtypes(&self) -> &[(VariantType, String)] {
        &self.subtypes
    }
}

/// Lazily evaluated producer of subtype info
pub type SubtypeInfoCollector = Box<dyn Fn() -> Vec<SubtypeInfo> + Send + Sync>;

// ─────────────────────────────────────────────────────────────────────────────
// Extensions
// ─────────────────────────────────────────────────────────────────────────────

/// An independently authored contributor of protocol subtypes.
///
/// Collectors are only evaluated during a configuration pass.
pub trait ProtocolExtension: Send + Sync {
    /// Extension name used in logs and conflict messages
    fn name(&self) -> &str;

    /// Collectors for the subtype info this extension contributes
    fn subtype_info_collectors(&self) -> Vec<SubtypeInfoCollector> {
        Vec::new()
    }

    /// Evaluate every collector, in order
    fn subtype_infos(&self) -> Vec<SubtypeInfo> {
        self.subtype_info_collectors()
            .iter()
            .flat_map(|collect| collect())
            .collect()
    }
}

impl fmt::Debug for dyn ProtocolExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProtocolExtension")
            .field("name", &self.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Circle {
        radius: f64,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Square {
        side: f64,
    }

    #[test]
    fn test_variant_identity_and_name() {
        let circle = VariantType::of::<Circle>();
        assert_eq!(circle.name(), "Circle");
        assert_eq!(circle, VariantType::of::<Circle>());
        assert_ne!(circle, VariantType::of::<Square>());
        assert_eq!(simple_type_name::<Vec<Circle>>(), "Vec");
    }

    #[test]
    fn test_variant_decode_and_downcast() {
        let circle = VariantType::of::<Circle>();
        let value = circle.decode(serde_json::json!({"radius": 2.0})).unwrap();

        assert!(value.is::<Circle>());
        assert!(!value.is::<Square>());
        assert_eq!(value.downcast_ref::<Circle>(), Some(&Circle { radius: 2.0 }));
        assert_eq!(value.variant_name(), "Circle");
        assert_eq!(value.concrete_type_id(), TypeId::of::<Circle>());
    }

    #[test]
    fn test_extension_flattens_collectors_in_order() {
        struct Shapes;

        impl ProtocolExtension for Shapes {
            fn name(&self) -> &str {
                "Shapes"
            }

            fn subtype_info_collectors(&self) -> Vec<SubtypeInfoCollector> {
                vec![
                    Box::new(|| {
                        vec![SubtypeInfo::builder(Supertype::new("Shape"))
                            .subtype::<Circle>("circle")
                            .build()]
                    }),
                    Box::new(|| {
                        vec![SubtypeInfo::builder(Supertype::new("Polygon"))
                            .subtype::<Square>("square")
                            .build()]
                    }),
                ]
            }
        }

        let infos = Shapes.subtype_infos();
        assert_eq!(infos.len(), 2);
        assert_eq!(infos[0].supertype().name(), "Shape");
        assert_eq!(infos[1].subtypes()[0].1, "square");
    }
}
