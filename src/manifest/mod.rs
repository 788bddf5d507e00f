//! Variant manifest parsing and validation.
//!
//! A variant manifest is a TOML document declaring the build's variant
//! space: the full candidate set for each axis, and the components that
//! build against them. It is the declarative front door to the
//! [`model`](crate::model) types; build tools with their own configuration
//! DSL can skip it and construct the model directly.
//!
//! # Format
//!
//! ```toml
//! platforms = [
//!     { name = "win32", os = "windows", arch = "x86" },
//!     { name = "linux64", os = "linux", arch = "x86_64" },
//! ]
//! build-types = ["debug", "release"]
//! flavors = ["free", "paid"]
//!
//! [[components]]
//! name = "mylib"
//! kind = "library"
//! platforms = ["win32", "linux64"]
//!
//! [[components]]
//! name = "installer"
//! kind = "executable"
//! platforms = ["win32"]       # an omitted axis selects all candidates
//! ```
//!
//! Axis declaration order is meaningful: it is the order selections,
//! naming, and expansion iterate in.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

use crate::core::VariantsError;
use crate::model::{Axis, BuildType, Component, ComponentKind, Flavor, Platform};

/// One component declaration in a manifest.
///
/// An omitted axis list means "all declared candidates".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ComponentDecl {
    /// Component name
    pub name: String,
    /// Library or executable
    pub kind: ComponentKind,
    /// Platform names this component builds for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Vec<String>>,
    /// Build type names this component builds for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_types: Option<Vec<String>>,
    /// Flavor names this component builds for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavors: Option<Vec<String>>,
}

/// A parsed variant manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct VariantManifest {
    /// Declared platforms, in iteration order
    #[serde(default)]
    pub platforms: Vec<Platform>,
    /// Declared build types, in iteration order
    #[serde(default)]
    pub build_types: Vec<BuildType>,
    /// Declared flavors, in iteration order
    #[serde(default)]
    pub flavors: Vec<Flavor>,
    /// Declared components
    #[serde(default)]
    pub components: Vec<ComponentDecl>,
}

impl VariantManifest {
    /// Parses a manifest from TOML text and validates it.
    pub fn parse(text: &str) -> Result<Self, VariantsError> {
        let manifest: Self = toml::from_str(text)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Loads, parses, and validates a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading variant manifest");
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read variant manifest from {}", path.display()))?;
        Self::parse(&text)
            .with_context(|| format!("Invalid variant manifest at {}", path.display()))
    }

    /// Checks the manifest for internal consistency.
    ///
    /// Rejects duplicate axis value names, duplicate component names, and
    /// component selections naming axis values that were never declared.
    /// Does not check selection non-emptiness - that is expansion's job,
    /// because it depends on the intersection, not the declaration.
    pub fn validate(&self) -> Result<(), VariantsError> {
        check_unique(Axis::Platform, self.platforms.iter().map(Platform::name))?;
        check_unique(Axis::BuildType, self.build_types.iter().map(BuildType::name))?;
        check_unique(Axis::Flavor, self.flavors.iter().map(Flavor::name))?;

        let mut component_names = HashSet::new();
        let platform_names: HashSet<&str> = self.platforms.iter().map(Platform::name).collect();
        let build_type_names: HashSet<&str> =
            self.build_types.iter().map(BuildType::name).collect();
        let flavor_names: HashSet<&str> = self.flavors.iter().map(Flavor::name).collect();

        for component in &self.components {
            if !component_names.insert(component.name.as_str()) {
                return Err(VariantsError::DuplicateComponent {
                    name: component.name.clone(),
                });
            }
            check_declared(&component.name, Axis::Platform, &component.platforms, &platform_names)?;
            check_declared(
                &component.name,
                Axis::BuildType,
                &component.build_types,
                &build_type_names,
            )?;
            check_declared(&component.name, Axis::Flavor, &component.flavors, &flavor_names)?;
        }
        Ok(())
    }

    /// Lowers the manifest into model types.
    pub fn into_model(self) -> VariantSpace {
        let components = self
            .components
            .into_iter()
            .map(|decl| {
                let mut component = Component::new(decl.name, decl.kind);
                if let Some(platforms) = decl.platforms {
                    component = component.with_platforms(platforms);
                }
                if let Some(build_types) = decl.build_types {
                    component = component.with_build_types(build_types);
                }
                if let Some(flavors) = decl.flavors {
                    component = component.with_flavors(flavors);
                }
                component
            })
            .collect();

        VariantSpace {
            platforms: self.platforms,
            build_types: self.build_types,
            flavors: self.flavors,
            components,
        }
    }
}

/// The declared variant space in model form, ready for expansion.
#[derive(Debug, Clone, Default)]
pub struct VariantSpace {
    /// Full platform candidate set, in declaration order
    pub platforms: Vec<Platform>,
    /// Full build type candidate set, in declaration order
    pub build_types: Vec<BuildType>,
    /// Full flavor candidate set, in declaration order
    pub flavors: Vec<Flavor>,
    /// Declared components
    pub components: Vec<Component>,
}

fn check_unique<'a>(
    axis: Axis,
    names: impl Iterator<Item = &'a str>,
) -> Result<(), VariantsError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(VariantsError::DuplicateAxisValue {
                axis,
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

fn check_declared(
    component: &str,
    axis: Axis,
    selection: &Option<Vec<String>>,
    declared: &HashSet<&str>,
) -> Result<(), VariantsError> {
    let Some(names) = selection else {
        return Ok(());
    };
    for name in names {
        if !declared.contains(name.as_str()) {
            return Err(VariantsError::UnknownAxisValue {
                component: component.to_string(),
                axis,
                name: name.clone(),
            });
        }
    }
    Ok(())
}
