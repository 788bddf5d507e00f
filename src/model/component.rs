//! Buildable components and their axis selections.
//!
//! A [`Component`] names a buildable unit, says whether it is a library or
//! an executable, and restricts each variant axis to the subset of declared
//! candidates it builds for. The restriction is an intersection: the
//! component lists names, and selection walks the build-wide candidate set
//! in declaration order keeping the named ones. Declaration order - not the
//! order of the component's own list - is what makes repeated configuration
//! passes produce identical naming and output paths.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::VariantsError;
use crate::model::axes::{AxisValue, BuildType, Flavor, Platform};

/// The kind of buildable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    /// A library, built as API, shared, and static binaries per variant
    Library,
    /// An executable, built as a single binary per variant
    Executable,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentKind::Library => f.write_str("library"),
            ComponentKind::Executable => f.write_str("executable"),
        }
    }
}

/// The kind of binary artifact one variant tuple produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BinaryKind {
    /// Headers-only API linkage of a library
    ApiLibrary,
    /// Dynamically linked library binary
    SharedLibrary,
    /// Statically linked library binary
    StaticLibrary,
    /// Executable binary
    Executable,
}

impl BinaryKind {
    /// The binary kinds a component kind expands to, in emission order.
    ///
    /// Libraries always produce all three library kinds per variant tuple;
    /// executables produce exactly one binary.
    #[must_use]
    pub fn for_component_kind(kind: ComponentKind) -> &'static [BinaryKind] {
        match kind {
            ComponentKind::Library => {
                &[BinaryKind::ApiLibrary, BinaryKind::SharedLibrary, BinaryKind::StaticLibrary]
            }
            ComponentKind::Executable => &[BinaryKind::Executable],
        }
    }
}

impl fmt::Display for BinaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryKind::ApiLibrary => f.write_str("API library"),
            BinaryKind::SharedLibrary => f.write_str("shared library"),
            BinaryKind::StaticLibrary => f.write_str("static library"),
            BinaryKind::Executable => f.write_str("executable"),
        }
    }
}

/// A component's restriction of one axis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AxisSelection {
    /// Participate in every declared candidate (the default)
    #[default]
    All,
    /// Participate only in candidates with these names
    Named(Vec<String>),
}

impl AxisSelection {
    fn matches(&self, name: &str) -> bool {
        match self {
            AxisSelection::All => true,
            AxisSelection::Named(names) => names.iter().any(|n| n == name),
        }
    }
}

/// A buildable component: name, kind, and per-axis selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    name: String,
    kind: ComponentKind,
    platforms: AxisSelection,
    build_types: AxisSelection,
    flavors: AxisSelection,
}

impl Component {
    /// Creates a component that participates in every candidate of every
    /// axis. Use the `with_*` builders to restrict.
    pub fn new(name: impl Into<String>, kind: ComponentKind) -> Self {
        Self {
            name: name.into(),
            kind,
            platforms: AxisSelection::All,
            build_types: AxisSelection::All,
            flavors: AxisSelection::All,
        }
    }

    /// Restricts the platforms this component builds for.
    #[must_use]
    pub fn with_platforms<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.platforms = AxisSelection::Named(names.into_iter().map(Into::into).collect());
        self
    }

    /// Restricts the build types this component builds for.
    #[must_use]
    pub fn with_build_types<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.build_types = AxisSelection::Named(names.into_iter().map(Into::into).collect());
        self
    }

    /// Restricts the flavors this component builds for.
    #[must_use]
    pub fn with_flavors<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flavors = AxisSelection::Named(names.into_iter().map(Into::into).collect());
        self
    }

    /// The component name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The component kind.
    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Selects the platforms this component builds for, in declaration
    /// order. Fails with [`VariantsError::NoVariants`] if the intersection
    /// is empty.
    pub fn select_platforms<'a>(
        &self,
        candidates: &'a [Platform],
    ) -> Result<Vec<&'a Platform>, VariantsError> {
        self.select_axis(&self.platforms, candidates)
    }

    /// Selects the build types this component builds for, in declaration
    /// order. Fails with [`VariantsError::NoVariants`] if the intersection
    /// is empty.
    pub fn select_build_types<'a>(
        &self,
        candidates: &'a [BuildType],
    ) -> Result<Vec<&'a BuildType>, VariantsError> {
        self.select_axis(&self.build_types, candidates)
    }

    /// Selects the flavors this component builds for, in declaration order.
    /// Fails with [`VariantsError::NoVariants`] if the intersection is
    /// empty.
    pub fn select_flavors<'a>(
        &self,
        candidates: &'a [Flavor],
    ) -> Result<Vec<&'a Flavor>, VariantsError> {
        self.select_axis(&self.flavors, candidates)
    }

    fn select_axis<'a, T: AxisValue>(
        &self,
        selection: &AxisSelection,
        candidates: &'a [T],
    ) -> Result<Vec<&'a T>, VariantsError> {
        let selected: Vec<&T> =
            candidates.iter().filter(|c| selection.matches(c.name())).collect();
        if selected.is_empty() {
            return Err(VariantsError::NoVariants {
                component: self.name.clone(),
                axis: T::axis(),
            });
        }
        Ok(selected)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.name)
    }
}
