//! native-variants - Native build variant model
//!
//! This crate is the model layer of a native build tool. It answers two
//! questions that share one underlying problem - representing a selected
//! subset of a multi-dimensional variant space without duplicating shared
//! state:
//!
//! 1. **Expansion**: given a component and the build-wide candidate sets for
//!    each variant axis (platform × build-type × flavor), which concrete
//!    binary artifacts does the component produce, and how are their output
//!    directories and file names derived?
//! 2. **Exchange**: given the resolved dependency variant graph for one build
//!    execution, how are its nodes encoded and decoded compactly, so that
//!    variant state referenced by many nodes is transmitted as a small
//!    integer reference instead of being re-serialized per occurrence?
//!
//! # Core Modules
//!
//! - [`model`] - Axis values, components, variants, and binary records
//! - [`naming`] - Output directory/file naming derived from variant dimensions
//! - [`toolchain`] - Platform-to-toolchain lookup
//! - [`expand`] - Cross-product expansion of components into binary records
//! - [`resolve`] - Build-scoped variant state registry and graph codec
//! - [`manifest`] - Declarative TOML description of the variant space
//! - [`core`] - Error types shared across the crate
//!
//! # Example
//!
//! ```rust
//! use native_variants::expand::BinaryVariantExpander;
//! use native_variants::model::{BuildType, Component, ComponentKind, Flavor, Platform};
//! use native_variants::toolchain::{Toolchain, ToolchainRegistry};
//! use std::path::Path;
//!
//! let platforms = vec![Platform::new("linux64", "linux", "x86_64")];
//! let build_types = vec![BuildType::new("debug"), BuildType::new("release")];
//! let flavors = vec![Flavor::new("default")];
//!
//! let mut toolchains = ToolchainRegistry::new();
//! toolchains.register(Toolchain::new("gcc").with_target("linux64"));
//!
//! let expander = BinaryVariantExpander::new(
//!     &platforms,
//!     &build_types,
//!     &flavors,
//!     &toolchains,
//!     Path::new("build"),
//! );
//!
//! let component = Component::new("server", ComponentKind::Executable);
//! let binaries = expander.expand(&component).unwrap();
//! // One platform, two build types, one flavor, one executable kind.
//! assert_eq!(binaries.len(), 2);
//! ```
//!
//! # Build-scoped exchange
//!
//! The [`resolve`] half operates on already-resolved dependency graphs. A
//! [`resolve::BuildSession`] owns the per-execution state: an instance-id
//! allocator and the [`resolve::VariantRegistry`] that maps ids to live
//! variant state. Encoding a graph node registers its variant state and
//! writes only the id; decoding looks the id back up and materializes the
//! final result. Encoded bytes are meaningful only within the session that
//! produced them.

// Data model and expansion
pub mod expand;
pub mod model;
pub mod naming;
pub mod toolchain;

// Resolution-result exchange
pub mod resolve;

// Supporting modules
pub mod core;
pub mod manifest;
