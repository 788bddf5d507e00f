//! Cross-product expansion of components into binary records.
//!
//! [`BinaryVariantExpander`] turns one [`Component`] into the ordered set of
//! [`BinaryRecord`]s implied by its axis selections: for every selected
//! platform a toolchain is resolved, then every (build type, flavor) pair
//! forms a variant tuple, and every tuple emits one record per binary kind
//! of the component's kind. Iteration order is platform, then build type,
//! then flavor, then kind, and the output preserves it.
//!
//! Expansion is a pure function of its inputs. The candidate sets and the
//! toolchain registry are read-only during expansion, so independent
//! components can be expanded from parallel workers without locking.
//!
//! # Failure semantics
//!
//! Expansion fails fast: an empty axis selection or a platform with no
//! toolchain aborts the whole component and no records are returned. Both
//! failures are deterministic configuration errors - retrying with the same
//! configuration reproduces them - so nothing here retries.

use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::core::VariantsError;
use crate::model::{
    BinaryKind, BinaryRecord, BuildType, Component, Flavor, Platform, Variant,
};
use crate::naming::NamingScheme;
use crate::toolchain::ToolchainRegistry;

/// Expands components against the build-wide candidate sets.
///
/// Holds borrows of the declared axis candidates and the toolchain
/// registry; expansion never mutates them.
#[derive(Debug, Clone)]
pub struct BinaryVariantExpander<'a> {
    platforms: &'a [Platform],
    build_types: &'a [BuildType],
    flavors: &'a [Flavor],
    toolchains: &'a ToolchainRegistry,
    output_root: &'a Path,
}

impl<'a> BinaryVariantExpander<'a> {
    /// Creates an expander over the build's declared candidate sets.
    ///
    /// `output_root` is the build output directory under which all binary
    /// output paths are derived.
    pub fn new(
        platforms: &'a [Platform],
        build_types: &'a [BuildType],
        flavors: &'a [Flavor],
        toolchains: &'a ToolchainRegistry,
        output_root: &'a Path,
    ) -> Self {
        Self {
            platforms,
            build_types,
            flavors,
            toolchains,
            output_root,
        }
    }

    /// Expands one component into its ordered binary records.
    ///
    /// For a library with n selected platforms, m build types, and k
    /// flavors this produces exactly `3 * n * m * k` records; for an
    /// executable, `n * m * k`.
    ///
    /// # Errors
    ///
    /// - [`VariantsError::NoVariants`] if any axis selection is empty
    /// - [`VariantsError::NoToolchain`] if a selected platform has no
    ///   registered toolchain
    ///
    /// Either error aborts the whole expansion; partial record sets are
    /// never returned.
    pub fn expand(&self, component: &Component) -> Result<Vec<BinaryRecord>, VariantsError> {
        let platforms = component.select_platforms(self.platforms)?;
        let build_types = component.select_build_types(self.build_types)?;
        let flavors = component.select_flavors(self.flavors)?;

        // An axis contributes a naming dimension only when the component
        // actually varies across it.
        let platform_dimension = platforms.len() > 1;
        let build_type_dimension = build_types.len() > 1;
        let flavor_dimension = flavors.len() > 1;

        debug!(
            component = component.name(),
            platforms = platforms.len(),
            build_types = build_types.len(),
            flavors = flavors.len(),
            "expanding binary variants"
        );

        let kinds = BinaryKind::for_component_kind(component.kind());
        let mut records =
            Vec::with_capacity(platforms.len() * build_types.len() * flavors.len() * kinds.len());

        for &platform in &platforms {
            let toolchain = self.toolchains.get_for_platform(platform)?;
            for &build_type in &build_types {
                for &flavor in &flavors {
                    // One naming scheme per tuple, shared by all kinds.
                    let naming = self.naming_scheme(
                        component,
                        platform,
                        build_type,
                        flavor,
                        platform_dimension,
                        build_type_dimension,
                        flavor_dimension,
                    );
                    let output_path = self.output_path(&naming);

                    for kind in kinds {
                        let variant = Variant {
                            component: component.name().to_string(),
                            platform: platform.clone(),
                            build_type: build_type.clone(),
                            flavor: flavor.clone(),
                            kind: *kind,
                        };
                        trace!(binary = %variant, path = %output_path.display(), "created binary record");
                        records.push(BinaryRecord {
                            variant,
                            toolchain: toolchain.name().to_string(),
                            naming: naming.clone(),
                            output_path: output_path.clone(),
                        });
                    }
                }
            }
        }

        Ok(records)
    }

    #[allow(clippy::too_many_arguments)]
    fn naming_scheme(
        &self,
        component: &Component,
        platform: &Platform,
        build_type: &BuildType,
        flavor: &Flavor,
        platform_dimension: bool,
        build_type_dimension: bool,
        flavor_dimension: bool,
    ) -> NamingScheme {
        let mut naming = NamingScheme::new(component.name());
        if platform_dimension {
            naming = naming.with_variant_dimension(platform.name());
        }
        if build_type_dimension {
            naming = naming.with_variant_dimension(build_type.name());
        }
        if flavor_dimension {
            naming = naming.with_variant_dimension(flavor.name());
        }
        naming
    }

    fn output_path(&self, naming: &NamingScheme) -> PathBuf {
        self.output_root
            .join("binaries")
            .join(naming.output_directory_base())
            .join(naming.output_file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ComponentKind;
    use crate::toolchain::Toolchain;

    fn candidates() -> (Vec<Platform>, Vec<BuildType>, Vec<Flavor>) {
        (
            vec![
                Platform::new("win32", "windows", "x86"),
                Platform::new("linux64", "linux", "x86_64"),
            ],
            vec![BuildType::new("debug")],
            vec![Flavor::new("free"), Flavor::new("paid")],
        )
    }

    fn toolchains_for_all() -> ToolchainRegistry {
        let mut registry = ToolchainRegistry::new();
        registry.register(Toolchain::new("gcc").with_target("win32").with_target("linux64"));
        registry
    }

    #[test]
    fn test_library_record_count() {
        let (platforms, build_types, flavors) = candidates();
        let toolchains = toolchains_for_all();
        let expander = BinaryVariantExpander::new(
            &platforms,
            &build_types,
            &flavors,
            &toolchains,
            Path::new("build"),
        );

        let component = Component::new("mylib", ComponentKind::Library);
        let records = expander.expand(&component).unwrap();
        // 3 kinds x 2 platforms x 1 build type x 2 flavors
        assert_eq!(records.len(), 12);
    }

    #[test]
    fn test_executable_record_count() {
        let (platforms, build_types, flavors) = candidates();
        let toolchains = toolchains_for_all();
        let expander = BinaryVariantExpander::new(
            &platforms,
            &build_types,
            &flavors,
            &toolchains,
            Path::new("build"),
        );

        let component = Component::new("app", ComponentKind::Executable);
        let records = expander.expand(&component).unwrap();
        assert_eq!(records.len(), 4);
        assert!(records.iter().all(|r| r.variant.kind == BinaryKind::Executable));
    }

    #[test]
    fn test_single_valued_axes_are_suppressed_in_paths() {
        let (platforms, build_types, flavors) = candidates();
        let toolchains = toolchains_for_all();
        let expander = BinaryVariantExpander::new(
            &platforms,
            &build_types,
            &flavors,
            &toolchains,
            Path::new("build"),
        );

        let component = Component::new("mylib", ComponentKind::Library);
        let records = expander.expand(&component).unwrap();

        for record in &records {
            let path = record.output_path.to_string_lossy().replace('\\', "/");
            // Platform and flavor vary, build type does not.
            assert!(
                path.contains(record.variant.platform.name()),
                "missing platform segment in {path}"
            );
            assert!(
                path.contains(record.variant.flavor.name()),
                "missing flavor segment in {path}"
            );
            assert!(!path.contains("debug"), "unexpected build type segment in {path}");
        }
    }

    #[test]
    fn test_output_path_convention() {
        let (platforms, build_types, flavors) = candidates();
        let toolchains = toolchains_for_all();
        let expander = BinaryVariantExpander::new(
            &platforms,
            &build_types,
            &flavors,
            &toolchains,
            Path::new("build"),
        );

        let component = Component::new("mylib", ComponentKind::Library);
        let records = expander.expand(&component).unwrap();
        let first = &records[0];
        assert_eq!(
            first.output_path,
            Path::new("build")
                .join("binaries")
                .join("mylib")
                .join("win32")
                .join("free")
                .join("mylib-win32-free")
        );
    }

    #[test]
    fn test_iteration_order() {
        let (platforms, build_types, flavors) = candidates();
        let toolchains = toolchains_for_all();
        let expander = BinaryVariantExpander::new(
            &platforms,
            &build_types,
            &flavors,
            &toolchains,
            Path::new("build"),
        );

        let component = Component::new("app", ComponentKind::Executable);
        let records = expander.expand(&component).unwrap();
        let tuples: Vec<(String, String)> = records
            .iter()
            .map(|r| {
                (r.variant.platform.name().to_string(), r.variant.flavor.name().to_string())
            })
            .collect();
        assert_eq!(
            tuples,
            vec![
                ("win32".to_string(), "free".to_string()),
                ("win32".to_string(), "paid".to_string()),
                ("linux64".to_string(), "free".to_string()),
                ("linux64".to_string(), "paid".to_string()),
            ]
        );
    }

    #[test]
    fn test_naming_scheme_shared_across_kinds_of_a_tuple() {
        let (platforms, build_types, flavors) = candidates();
        let toolchains = toolchains_for_all();
        let expander = BinaryVariantExpander::new(
            &platforms,
            &build_types,
            &flavors,
            &toolchains,
            Path::new("build"),
        );

        let component = Component::new("mylib", ComponentKind::Library);
        let records = expander.expand(&component).unwrap();
        // First three records are the three kinds of the first tuple.
        assert_eq!(records[0].naming, records[1].naming);
        assert_eq!(records[1].naming, records[2].naming);
        assert_eq!(records[0].output_path, records[2].output_path);
        assert_ne!(records[0].variant.kind, records[1].variant.kind);
    }

    #[test]
    fn test_missing_toolchain_aborts_whole_expansion() {
        let (platforms, build_types, flavors) = candidates();
        // Only win32 has a toolchain; linux64 is selected but unbuildable.
        let mut toolchains = ToolchainRegistry::new();
        toolchains.register(Toolchain::new("msvc").with_target("win32"));
        let expander = BinaryVariantExpander::new(
            &platforms,
            &build_types,
            &flavors,
            &toolchains,
            Path::new("build"),
        );

        let component = Component::new("mylib", ComponentKind::Library);
        let err = expander.expand(&component).unwrap_err();
        assert!(matches!(err, VariantsError::NoToolchain { platform } if platform == "linux64"));
    }

    #[test]
    fn test_empty_platform_selection_fails() {
        let (platforms, build_types, flavors) = candidates();
        let toolchains = toolchains_for_all();
        let expander = BinaryVariantExpander::new(
            &platforms,
            &build_types,
            &flavors,
            &toolchains,
            Path::new("build"),
        );

        let component =
            Component::new("mylib", ComponentKind::Library).with_platforms(["riscv"]);
        assert!(matches!(
            expander.expand(&component),
            Err(VariantsError::NoVariants { .. })
        ));
    }

    #[test]
    fn test_expansion_is_idempotent() {
        let (platforms, build_types, flavors) = candidates();
        let toolchains = toolchains_for_all();
        let expander = BinaryVariantExpander::new(
            &platforms,
            &build_types,
            &flavors,
            &toolchains,
            Path::new("build"),
        );

        let component = Component::new("mylib", ComponentKind::Library);
        let first = expander.expand(&component).unwrap();
        let second = expander.expand(&component).unwrap();
        assert_eq!(first, second);
    }
}
