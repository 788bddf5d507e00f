//! Platform-to-toolchain lookup.
//!
//! Toolchain *discovery* - probing the machine for compilers - belongs to
//! the layers above this crate. What expansion needs is only the lookup:
//! given a selected platform, which registered toolchain builds for it?
//! Registration order is lookup order; the first toolchain targeting the
//! platform wins.

use std::fmt;

use crate::core::VariantsError;
use crate::model::Platform;

/// A named toolchain and the platform names it can build for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    name: String,
    targets: Vec<String>,
}

impl Toolchain {
    /// Creates a toolchain targeting no platforms. Chain
    /// [`with_target`](Self::with_target) to declare support.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            targets: Vec::new(),
        }
    }

    /// Declares one platform name this toolchain can build for.
    #[must_use]
    pub fn with_target(mut self, platform_name: impl Into<String>) -> Self {
        self.targets.push(platform_name.into());
        self
    }

    /// The toolchain name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this toolchain can build for the given platform.
    #[must_use]
    pub fn can_target(&self, platform: &Platform) -> bool {
        self.targets.iter().any(|t| t == platform.name())
    }
}

impl fmt::Display for Toolchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toolchain '{}'", self.name)
    }
}

/// Ordered registry of available toolchains.
#[derive(Debug, Clone, Default)]
pub struct ToolchainRegistry {
    toolchains: Vec<Toolchain>,
}

impl ToolchainRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a toolchain. Registration order is lookup order.
    pub fn register(&mut self, toolchain: Toolchain) {
        self.toolchains.push(toolchain);
    }

    /// Returns the first registered toolchain that targets the platform.
    ///
    /// Fails with [`VariantsError::NoToolchain`] when no registered
    /// toolchain can build for it; expansion treats that as fatal for the
    /// whole component.
    pub fn get_for_platform(&self, platform: &Platform) -> Result<&Toolchain, VariantsError> {
        self.toolchains
            .iter()
            .find(|tc| tc.can_target(platform))
            .ok_or_else(|| VariantsError::NoToolchain {
                platform: platform.name().to_string(),
            })
    }
}
