//! Protocol Error Types
//!
//! Defines error types for subtype registration and protocol (de)serialization.

use thiserror::Error;

/// Protocol result type alias
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Two extensions tried to claim the same registration slot.
///
/// Raised while configuring a mapper. The same extension set always
/// conflicts the same way, so there is nothing to retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConflictError {
    /// A second default subtype for a supertype that already has one
    #[error(
        "Can't register default sub type '{variant}' for class '{supertype}' in extension '{extension}'. \
         The default sub type for this class has already been registered as class '{existing_variant}' \
         by extension '{existing_extension}'"
    )]
    DuplicateDefault {
        supertype: String,
        variant: String,
        extension: String,
        existing_variant: String,
        existing_extension: String,
    },

    /// A second registration of an already owned tag
    #[error(
        "Can't register sub type '{variant}' with tag '{tag}' for class '{supertype}' in extension '{extension}'. \
         This tag has already been registered for sub type '{existing_variant}' by extension '{existing_extension}'"
    )]
    DuplicateTag {
        tag: String,
        supertype: String,
        variant: String,
        extension: String,
        existing_variant: String,
        existing_extension: String,
    },
}

impl ConflictError {
    /// Supertype the conflicting contribution was made for
    pub fn supertype(&self) -> &str {
        match self {
            Self::DuplicateDefault { supertype, .. } | Self::DuplicateTag { supertype, .. } => {
                supertype
            }
        }
    }

    /// Extension whose contribution tripped the check
    pub fn extension(&self) -> &str {
        match self {
            Self::DuplicateDefault { extension, .. } | Self::DuplicateTag { extension, .. } => {
                extension
            }
        }
    }

    /// Extension that registered the slot first
    pub fn existing_extension(&self) -> &str {
        match self {
            Self::DuplicateDefault {
                existing_extension, ..
            }
            | Self::DuplicateTag {
                existing_extension, ..
            } => existing_extension,
        }
    }
}

/// Protocol errors
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Incompatible extension contributions
    #[error(transparent)]
    Conflict(#[from] ConflictError),

    /// Tag not known to the mapper
    #[error("unknown sub type tag '{tag}' for class '{supertype}'")]
    UnknownTag { supertype: String, tag: String },

    /// Untagged input for a supertype without a default
    #[error("missing type property '{property}' for class '{supertype}' and no default sub type is registered")]
    MissingTypeTag { supertype: String, property: String },

    /// Type property present but not a string
    #[error("type property '{property}' must be a string, got {found}")]
    InvalidTypeTag { property: String, found: String },

    /// Tag registered under another supertype
    #[error("sub type tag '{tag}' belongs to class '{actual}', expected a sub type of '{expected}'")]
    SupertypeMismatch {
        tag: String,
        expected: String,
        actual: String,
    },

    /// Value whose runtime type has no registered tag
    #[error("sub type '{variant}' is not registered with this mapper")]
    UnregisteredVariant { variant: String },

    /// Decoded variant differs from the requested one
    #[error("expected sub type '{expected}', decoded '{actual}'")]
    TypeMismatch { expected: String, actual: String },

    /// Variant field collides with the type property
    #[error("sub type '{variant}' has a field named like the type property '{property}'")]
    ReservedProperty { property: String, variant: String },

    /// Polymorphic values are carried as JSON objects
    #[error("polymorphic value for class '{supertype}' must be a JSON object")]
    NotAnObject { supertype: String },

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ProtocolError {
    /// Check if this error is a registration conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    /// Get the conflict details, if this is a registration conflict
    pub fn conflict(&self) -> Option<&ConflictError> {
        match self {
            Self::Conflict(conflict) => Some(conflict),
            _ => None,
        }
    }
}
