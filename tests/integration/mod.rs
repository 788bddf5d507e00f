//! Integration test suite for native-variants
//!
//! End-to-end tests that exercise whole pipelines rather than single
//! modules. These run quickly and are executed in CI on every commit.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **expansion_pipeline**: manifest file -> model -> binary variant
//!   expansion, including output path conventions
//! - **graph_exchange**: build session -> encode -> decode round trips,
//!   including parallel encoding of shared variant state

mod expansion_pipeline;
mod graph_exchange;
