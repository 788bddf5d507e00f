//! Manifest-to-binary-records pipeline tests.

use native_variants::core::VariantsError;
use native_variants::expand::BinaryVariantExpander;
use native_variants::manifest::VariantManifest;
use native_variants::model::{BinaryKind, ComponentKind};
use native_variants::toolchain::{Toolchain, ToolchainRegistry};
use std::path::Path;

const MANIFEST: &str = r#"
platforms = [
    { name = "win32", os = "windows", arch = "x86" },
    { name = "linux64", os = "linux", arch = "x86_64" },
]
build-types = ["debug"]
flavors = ["free", "paid"]

[[components]]
name = "mylib"
kind = "library"

[[components]]
name = "installer"
kind = "executable"
platforms = ["win32"]
build-types = ["debug"]
flavors = ["free"]
"#;

fn toolchains() -> ToolchainRegistry {
    let mut registry = ToolchainRegistry::new();
    registry.register(Toolchain::new("msvc").with_target("win32"));
    registry.register(Toolchain::new("gcc").with_target("linux64"));
    registry
}

#[test]
fn test_manifest_file_to_binary_records() {
    let dir = tempfile::tempdir().unwrap();
    let manifest_path = dir.path().join("variants.toml");
    std::fs::write(&manifest_path, MANIFEST).unwrap();

    let space = VariantManifest::load(&manifest_path).unwrap().into_model();
    let toolchains = toolchains();
    let output_root = dir.path().join("build");
    let expander = BinaryVariantExpander::new(
        &space.platforms,
        &space.build_types,
        &space.flavors,
        &toolchains,
        &output_root,
    );

    // Library: 3 kinds x 2 platforms x 1 build type x 2 flavors.
    let library = &space.components[0];
    assert_eq!(library.kind(), ComponentKind::Library);
    let records = expander.expand(library).unwrap();
    assert_eq!(records.len(), 12);

    // Platform and flavor vary, so they appear in every output path;
    // build type is single-valued and must not.
    for record in &records {
        let path = record.output_path.to_string_lossy().replace('\\', "/");
        assert!(path.contains("/binaries/mylib/"));
        assert!(path.contains(record.variant.platform.name()));
        assert!(path.contains(record.variant.flavor.name()));
        assert!(!path.contains("debug"));
    }

    // Platforms resolve to their own toolchains.
    assert!(records
        .iter()
        .all(|r| match r.variant.platform.name() {
            "win32" => r.toolchain == "msvc",
            "linux64" => r.toolchain == "gcc",
            other => panic!("unexpected platform {other}"),
        }));
}

#[test]
fn test_fully_restricted_executable_has_dimensionless_paths() {
    let space = VariantManifest::parse(MANIFEST).unwrap().into_model();
    let toolchains = toolchains();
    let expander = BinaryVariantExpander::new(
        &space.platforms,
        &space.build_types,
        &space.flavors,
        &toolchains,
        Path::new("build"),
    );

    // The installer restricts every axis to one value, so no axis
    // contributes a naming dimension.
    let installer = &space.components[1];
    let records = expander.expand(installer).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].variant.kind, BinaryKind::Executable);
    assert_eq!(
        records[0].output_path,
        Path::new("build").join("binaries").join("installer").join("installer")
    );
}

#[test]
fn test_expansion_abort_leaves_no_partial_results() {
    let space = VariantManifest::parse(MANIFEST).unwrap().into_model();
    // Only win32 is buildable; mylib also selects linux64.
    let mut toolchains = ToolchainRegistry::new();
    toolchains.register(Toolchain::new("msvc").with_target("win32"));
    let expander = BinaryVariantExpander::new(
        &space.platforms,
        &space.build_types,
        &space.flavors,
        &toolchains,
        Path::new("build"),
    );

    let err = expander.expand(&space.components[0]).unwrap_err();
    assert!(matches!(err, VariantsError::NoToolchain { platform } if platform == "linux64"));
}

#[test]
fn test_repeated_configuration_passes_are_reproducible() {
    let space = VariantManifest::parse(MANIFEST).unwrap().into_model();
    let toolchains = toolchains();
    let expander = BinaryVariantExpander::new(
        &space.platforms,
        &space.build_types,
        &space.flavors,
        &toolchains,
        Path::new("build"),
    );

    let first = expander.expand(&space.components[0]).unwrap();
    let second = expander.expand(&space.components[0]).unwrap();
    assert_eq!(first, second);
}
