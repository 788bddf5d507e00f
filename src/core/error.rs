//! Error handling for the variant model.
//!
//! One enumerated error type, [`VariantsError`], covers the whole crate.
//! Variants are grouped into configuration errors (detected while expanding
//! components or validating a manifest) and protocol errors (detected while
//! decoding a variant graph stream). See [`crate::core`] for the distinction
//! between the two families.
//!
//! Standard library and third-party errors that can surface through crate
//! operations are converted automatically:
//! - [`std::io::Error`] → [`VariantsError::Io`]
//! - [`toml::de::Error`] → [`VariantsError::Toml`]

use thiserror::Error;

use crate::model::Axis;
use crate::resolve::InstanceId;

/// The error type for all variant model operations.
///
/// Configuration variants abort the affected component or manifest and are
/// never retried; protocol variants abort the decode in progress with no
/// partial visitor delivery for the failing record.
#[derive(Error, Debug)]
pub enum VariantsError {
    /// A component's axis selection intersected to the empty set.
    ///
    /// An empty selection is always a configuration mistake, never a valid
    /// "build nothing" request. A typo in a component's target list would
    /// otherwise silently produce zero binaries.
    #[error("component '{component}' selects no {axis} from the declared candidates")]
    NoVariants {
        /// Component whose selection came up empty
        component: String,
        /// The axis whose selection was empty
        axis: Axis,
    },

    /// No registered toolchain can build for a selected platform.
    ///
    /// Raised during expansion, before any binary record for the affected
    /// platform is produced. Partial binary sets are never returned.
    #[error("no toolchain available to build for platform '{platform}'")]
    NoToolchain {
        /// Name of the platform no toolchain targets
        platform: String,
    },

    /// A component references an axis value that was never declared.
    #[error("component '{component}' targets unknown {axis} '{name}'")]
    UnknownAxisValue {
        /// Component with the dangling reference
        component: String,
        /// The axis the unknown name belongs to
        axis: Axis,
        /// The undeclared axis value name
        name: String,
    },

    /// The same axis value name was declared twice.
    #[error("duplicate {axis} '{name}' declared")]
    DuplicateAxisValue {
        /// The axis carrying the duplicate
        axis: Axis,
        /// The duplicated name
        name: String,
    },

    /// The same component name was declared twice.
    #[error("duplicate component '{name}' declared")]
    DuplicateComponent {
        /// The duplicated component name
        name: String,
    },

    /// A decoded variant reference was never registered in this build.
    ///
    /// Decode ran before the corresponding encode populated the registry,
    /// or the byte stream came from a different build execution. This is a
    /// programming defect in the embedding tool, not a data error.
    #[error("no variant with id {instance_id} found in this build")]
    MissingReference {
        /// The unresolvable instance id
        instance_id: InstanceId,
    },

    /// The variant stream ended in the middle of a record.
    #[error("variant stream ended mid-record")]
    Truncated,

    /// A variant record field holds a value no encoder produces.
    #[error("corrupt variant record: {reason}")]
    CorruptRecord {
        /// What was read and why it is invalid
        reason: String,
    },

    /// I/O failure in the underlying sink or source.
    #[error("variant stream I/O error")]
    Io(#[from] std::io::Error),

    /// A variant manifest failed to parse as TOML.
    #[error("invalid variant manifest")]
    Toml(#[from] Box<toml::de::Error>),
}

impl From<toml::de::Error> for VariantsError {
    fn from(err: toml::de::Error) -> Self {
        Self::Toml(Box::new(err))
    }
}
