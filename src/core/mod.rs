//! Core types shared across the crate.
//!
//! Currently this is the home of [`VariantsError`], the single error type
//! every fallible operation in the crate returns. Errors fall into two
//! families with very different audiences:
//!
//! - **Configuration errors** (empty axis selections, missing toolchains,
//!   manifest mistakes) are user errors. They are deterministic - retrying
//!   with the same configuration reproduces the same failure - so they are
//!   surfaced once and never retried.
//! - **Protocol errors** (unregistered variant references, truncated
//!   records) indicate a defect in the embedding tool: the encode/decode
//!   ordering contract was violated or a foreign byte stream was fed to the
//!   codec. They are fatal and carry no recovery path, because any
//!   substitute value would silently corrupt the resolved graph.

mod error;

pub use error::VariantsError;
