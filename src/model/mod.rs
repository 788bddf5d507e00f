//! Data model for the native variant space.
//!
//! A build declares, once, the full candidate set for each of three
//! independent variant axes:
//!
//! - **Platform** - where the binary runs (operating system + architecture)
//! - **Build type** - how it is compiled (debug, release, ...)
//! - **Flavor** - product-level variation (free, paid, ...)
//!
//! Each buildable [`Component`] restricts those candidate sets to the
//! subsets it participates in; the cross product of its selections, times
//! the binary kinds its [`ComponentKind`] implies, is the set of concrete
//! binaries the component produces. Selection is deterministic and
//! declaration-ordered, so naming and output paths derived from it are
//! reproducible across repeated configuration passes of the same build.

mod axes;
mod component;
mod variant;

pub use axes::{Axis, AxisValue, BuildType, Flavor, Platform};
pub use component::{AxisSelection, BinaryKind, Component, ComponentKind};
pub use variant::{BinaryRecord, Variant};
