//! Axis value types: [`Platform`], [`BuildType`], and [`Flavor`].
//!
//! Axis values are opaque named identifiers. The name doubles as the
//! variant dimension label used in output directory and file naming, so it
//! should be filesystem-friendly (`win32`, `debug`, `paid`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three independent dimensions a native component varies across.
///
/// Used to identify an axis in error messages and manifest validation
/// without carrying a concrete value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The target platform axis
    Platform,
    /// The build type axis
    BuildType,
    /// The flavor axis
    Flavor,
}

impl Axis {
    /// Human-readable axis label, as used in error messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Axis::Platform => "platform",
            Axis::BuildType => "build type",
            Axis::Flavor => "flavor",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Uniform view of the three axis value types.
///
/// Selection and naming only ever need the value's name, so they operate
/// on this trait instead of the concrete types.
pub trait AxisValue {
    /// The declared name of this axis value.
    fn name(&self) -> &str;

    /// The axis this value belongs to.
    fn axis() -> Axis;
}

/// A target platform: a name plus operating system and architecture
/// identifiers.
///
/// The name is the identity used by component selections, toolchain
/// targeting, and naming dimensions. Operating system and architecture are
/// carried for toolchain compatibility checks in the layers above this one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Platform {
    name: String,
    #[serde(alias = "os")]
    operating_system: String,
    #[serde(alias = "arch")]
    architecture: String,
}

impl Platform {
    /// Creates a platform with the given name, operating system, and
    /// architecture.
    pub fn new(
        name: impl Into<String>,
        operating_system: impl Into<String>,
        architecture: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            operating_system: operating_system.into(),
            architecture: architecture.into(),
        }
    }

    /// The declared platform name, e.g. `win32`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The operating system identifier, e.g. `windows`.
    #[must_use]
    pub fn operating_system(&self) -> &str {
        &self.operating_system
    }

    /// The architecture identifier, e.g. `x86_64`.
    #[must_use]
    pub fn architecture(&self) -> &str {
        &self.architecture
    }

    /// `<architecture>:<operating system>`, used when matching platforms
    /// against what a toolchain can actually produce.
    #[must_use]
    pub fn compatibility_string(&self) -> String {
        format!("{}:{}", self.architecture, self.operating_system)
    }
}

impl AxisValue for Platform {
    fn name(&self) -> &str {
        &self.name
    }

    fn axis() -> Axis {
        Axis::Platform
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "platform '{}'", self.name)
    }
}

/// A build type, e.g. `debug` or `release`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildType {
    name: String,
}

impl BuildType {
    /// Creates a build type with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The declared build type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl AxisValue for BuildType {
    fn name(&self) -> &str {
        &self.name
    }

    fn axis() -> Axis {
        Axis::BuildType
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "build type '{}'", self.name)
    }
}

/// A product flavor, e.g. `free` or `paid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Flavor {
    name: String,
}

impl Flavor {
    /// Creates a flavor with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The declared flavor name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl AxisValue for Flavor {
    fn name(&self) -> &str {
        &self.name
    }

    fn axis() -> Axis {
        Axis::Flavor
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "flavor '{}'", self.name)
    }
}
