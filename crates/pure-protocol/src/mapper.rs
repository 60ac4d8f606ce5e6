//! Protocol Mapper
//!
//! JSON serializer for polymorphic protocol values. Concrete variants are
//! written with a type property (`_type` by default) carrying their tag and
//! read back by looking the tag up in a flat table. Supertypes may name a
//! default variant for input that carries no type property.

use std::any::TypeId;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde_json::Value;

use crate::error::{ProtocolError, ProtocolResult};
use crate::extensions::{ProtocolObject, Supertype, VariantType};

/// Default JSON property holding the sub type tag
pub const DEFAULT_TYPE_PROPERTY: &str = "_type";

/// A registered tag
#[derive(Debug, Clone)]
struct NamedType {
    supertype: Supertype,
    variant: VariantType,
}

/// Polymorphic JSON mapper
#[derive(Debug, Clone)]
pub struct ProtocolMapper {
    type_property: String,
    by_tag: HashMap<String, NamedType>,
    tags_by_type: HashMap<TypeId, BTreeSet<String>>,
    defaults: HashMap<Supertype, VariantType>,
}

impl Default for ProtocolMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolMapper {
    /// Create a mapper with no registered sub types
    pub fn new() -> Self {
        Self::with_type_property(DEFAULT_TYPE_PROPERTY)
    }

    /// Create a mapper that uses a custom type property
    pub fn with_type_property(property: impl Into<String>) -> Self {
        Self {
            type_property: property.into(),
            by_tag: HashMap::new(),
            tags_by_type: HashMap::new(),
            defaults: HashMap::new(),
        }
    }

    /// JSON property holding the tag
    pub fn type_property(&self) -> &str {
        &self.type_property
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Registration
    // ─────────────────────────────────────────────────────────────────────────

    /// Use `variant` for untagged input of `supertype`
    pub fn register_default_subtype(&mut self, supertype: Supertype, variant: VariantType) {
        self.defaults.insert(supertype, variant);
    }

    /// Map `tag` to `variant`. Later registrations of the same tag replace
    /// earlier ones; conflict checks belong to the registry.
    ///
    /// A variant may be registered under several tags, for one supertype or
    /// for several.
    pub fn register_subtype(&mut self, supertype: Supertype, variant: VariantType, tag: impl Into<String>) {
        let tag = tag.into();
        if let Some(replaced) = self.by_tag.insert(tag.clone(), NamedType { supertype, variant }) {
            if let Some(tags) = self.tags_by_type.get_mut(&replaced.variant.type_id()) {
                tags.remove(&tag);
            }
        }
        self.tags_by_type.entry(variant.type_id()).or_default().insert(tag);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Writing
    // ─────────────────────────────────────────────────────────────────────────

    /// Serialize a value and stamp its tag.
    ///
    /// A variant registered under several tags is written with the smallest
    /// one, whatever order the tags were registered in. A value that already
    /// has a field named like the type property is rejected.
    pub fn to_value(&self, value: &dyn ProtocolObject) -> ProtocolResult<Value> {
        let tag = self
            .write_tag(value.concrete_type_id())
            .ok_or_else(|| ProtocolError::UnregisteredVariant {
                variant: value.variant_name().to_string(),
            })?;
        let supertype = self.by_tag.get(tag).map_or("", |named| named.supertype.name());

        let mut json = value.to_json()?;
        let Some(object) = json.as_object_mut() else {
            return Err(ProtocolError::NotAnObject {
                supertype: supertype.to_string(),
            });
        };

        if object.contains_key(&self.type_property) {
            return Err(ProtocolError::ReservedProperty {
                property: self.type_property.clone(),
                variant: value.variant_name().to_string(),
            });
        }
        object.insert(self.type_property.clone(), Value::String(tag.to_string()));

        Ok(json)
    }

    /// Serialize to a compact JSON string
    pub fn to_string(&self, value: &dyn ProtocolObject) -> ProtocolResult<String> {
        Ok(serde_json::to_string(&self.to_value(value)?)?)
    }

    /// Serialize to a pretty-printed JSON string
    pub fn to_string_pretty(&self, value: &dyn ProtocolObject) -> ProtocolResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_value(value)?)?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reading
    // ─────────────────────────────────────────────────────────────────────────

    /// Decode a polymorphic value of `supertype`
    pub fn from_value(&self, supertype: Supertype, value: Value) -> ProtocolResult<Box<dyn ProtocolObject>> {
        let Value::Object(mut object) = value else {
            return Err(ProtocolError::NotAnObject {
                supertype: supertype.name().to_string(),
            });
        };

        let variant = match object.remove(&self.type_property) {
            Some(Value::String(tag)) => {
                let named = self.by_tag.get(&tag).ok_or_else(|| ProtocolError::UnknownTag {
                    supertype: supertype.name().to_string(),
                    tag: tag.clone(),
                })?;
                if !self.is_registered_under(named.variant, supertype) {
                    return Err(ProtocolError::SupertypeMismatch {
                        tag,
                        expected: supertype.name().to_string(),
                        actual: named.supertype.name().to_string(),
                    });
                }
                named.variant
            }
            Some(other) => {
                return Err(ProtocolError::InvalidTypeTag {
                    property: self.type_property.clone(),
                    found: other.to_string(),
                });
            }
            None => *self
                .defaults
                .get(&supertype)
                .ok_or_else(|| ProtocolError::MissingTypeTag {
                    supertype: supertype.name().to_string(),
                    property: self.type_property.clone(),
                })?,
        };

        Ok(variant.decode(Value::Object(object))?)
    }

    /// Decode a polymorphic value of `supertype` from a JSON string
    pub fn from_str(&self, supertype: Supertype, json: &str) -> ProtocolResult<Box<dyn ProtocolObject>> {
        let value: Value = serde_json::from_str(json)?;
        self.from_value(supertype, value)
    }

    /// Decode and require the concrete variant `T`
    pub fn read_as<T: ProtocolObject>(&self, supertype: Supertype, value: Value) -> ProtocolResult<T> {
        let decoded = self.from_value(supertype, value)?;
        let actual = decoded.variant_name();
        decoded
            .into_any()
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| ProtocolError::TypeMismatch {
                expected: crate::extensions::simple_type_name::<T>().to_string(),
                actual: actual.to_string(),
            })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Introspection
    // ─────────────────────────────────────────────────────────────────────────

    /// Registered tags mapped to variant names
    pub fn registered_subtypes(&self) -> BTreeMap<String, &'static str> {
        self.by_tag
            .iter()
            .map(|(tag, named)| (tag.clone(), named.variant.name()))
            .collect()
    }

    /// Supertypes mapped to the name of their default variant
    pub fn default_subtypes(&self) -> BTreeMap<&'static str, &'static str> {
        self.defaults
            .iter()
            .map(|(supertype, variant)| (supertype.name(), variant.name()))
            .collect()
    }

    /// Tags registered for one supertype, sorted by tag
    pub fn subtypes_of(&self, supertype: Supertype) -> Vec<(String, VariantType)> {
        let mut subtypes: Vec<(String, VariantType)> = self
            .by_tag
            .iter()
            .filter(|(_, named)| named.supertype == supertype)
            .map(|(tag, named)| (tag.clone(), named.variant))
            .collect();
        subtypes.sort_by(|a, b| a.0.cmp(&b.0));
        subtypes
    }

    /// All supertypes with a tag or a default, sorted by name
    pub fn supertypes(&self) -> Vec<Supertype> {
        let mut supertypes: Vec<Supertype> = self
            .by_tag
            .values()
            .map(|named| named.supertype)
            .chain(self.defaults.keys().copied())
            .collect();
        supertypes.sort();
        supertypes.dedup();
        supertypes
    }

    /// Supertype registered under a name
    pub fn supertype_named(&self, name: &str) -> Option<Supertype> {
        self.supertypes().into_iter().find(|s| s.name() == name)
    }

    /// Tag written for a variant
    pub fn tag_of(&self, variant: VariantType) -> Option<&str> {
        self.write_tag(variant.type_id())
    }

    /// Every tag registered for a variant, sorted
    pub fn tags_of(&self, variant: VariantType) -> Vec<&str> {
        self.tags_by_type
            .get(&variant.type_id())
            .map(|tags| tags.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    fn write_tag(&self, type_id: TypeId) -> Option<&str> {
        self.tags_by_type
            .get(&type_id)
            .and_then(|tags| tags.first())
            .map(String::as_str)
    }

    /// Whether `variant` has a tag under `supertype`
    fn is_registered_under(&self, variant: VariantType, supertype: Supertype) -> bool {
        self.tags_by_type.get(&variant.type_id()).is_some_and(|tags| {
            tags.iter()
                .any(|tag| self.by_tag.get(tag).is_some_and(|named| named.supertype == supertype))
        })
    }

    /// Default variant of a supertype
    pub fn default_of(&self, supertype: Supertype) -> Option<VariantType> {
        self.defaults.get(&supertype).copied()
    }

    /// No tags and no defaults registered
    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty() && self.defaults.is_empty()
    }
}
