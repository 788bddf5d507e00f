//! Build-scoped exchange of resolved variant graphs.
//!
//! After dependency resolution produces the variant graph for a build, its
//! nodes are exchanged between subsystems of the same running build - and
//! the same variant state is frequently referenced by many unrelated nodes.
//! A platform-specific artifact substituted wherever a multiplatform module
//! is depended upon can appear as the "external variant" of hundreds of
//! nodes. Serializing that state inline would duplicate it proportional to
//! edge count.
//!
//! This module instead transmits *references*: every [`VariantState`]
//! carries an [`InstanceId`] allocated by the owning [`BuildSession`], and
//! the [`SelectedVariantCodec`] writes only that small integer, registering
//! the live state in the session's [`VariantRegistry`] as it encodes.
//! Decoding looks the id back up and materializes the final
//! [`ResolvedVariant`]. Cost: O(1) amortized per distinct variant plus one
//! varint per reference.
//!
//! Everything here is scoped to one build execution. The registry grows
//! monotonically and is discarded wholesale with its session; ids carry no
//! meaning across executions, and decoding a byte stream in a session other
//! than the one that encoded it fails with
//! [`VariantsError::MissingReference`](crate::core::VariantsError::MissingReference).
//!
//! # Concurrency
//!
//! Parallel workers may encode independent graph regions concurrently: the
//! registry supports racing insert-if-absent calls (first writer wins, both
//! callers observe the same stored state), and variant states are immutable
//! after publication. Decode ordering is the caller's protocol - a decode
//! attempted before the corresponding encode fails immediately rather than
//! blocking.

mod codec;
mod registry;
mod session;
mod state;

pub use codec::{SelectedVariantCodec, SelectedVariantVisitor};
pub use registry::VariantRegistry;
pub use session::BuildSession;
pub use state::{
    DefaultVariantState, InstanceId, ResolvedGraphNode, ResolvedVariant, VariantState,
};
