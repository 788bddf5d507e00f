//! The build-execution context owning all build-scoped resolution state.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::resolve::codec::SelectedVariantCodec;
use crate::resolve::registry::VariantRegistry;
use crate::resolve::state::{DefaultVariantState, InstanceId};

/// Per-build-execution context: the instance-id allocator and the variant
/// registry.
///
/// All build-scoped resolution state hangs off this value rather than any
/// global, so tearing a build down is just dropping its session. Sessions
/// are cheap to share behind an `Arc` when workers on multiple threads
/// allocate ids or encode concurrently.
#[derive(Debug)]
pub struct BuildSession {
    registry: VariantRegistry,
    // Ids start at 1 so a zeroed buffer never aliases a real variant.
    next_instance_id: AtomicU64,
}

impl BuildSession {
    /// Starts a fresh build execution with an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: VariantRegistry::new(),
            next_instance_id: AtomicU64::new(1),
        }
    }

    /// The registry scoped to this build execution.
    #[must_use]
    pub fn registry(&self) -> &VariantRegistry {
        &self.registry
    }

    /// Allocates the next instance id. Ids are unique within this session
    /// and monotonically increasing; concurrent allocation is safe.
    pub fn next_instance_id(&self) -> InstanceId {
        InstanceId::from_raw(self.next_instance_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Creates a [`DefaultVariantState`] with a freshly allocated id.
    pub fn new_variant_state(
        &self,
        display_name: impl Into<String>,
        attributes: BTreeMap<String, String>,
    ) -> Arc<DefaultVariantState> {
        Arc::new(DefaultVariantState::new(
            self.next_instance_id(),
            display_name.into(),
            attributes,
        ))
    }

    /// Creates a codec exchanging resolved graph nodes within this session.
    #[must_use]
    pub fn codec(&self) -> SelectedVariantCodec<'_> {
        SelectedVariantCodec::new(&self.registry)
    }
}

impl Default for BuildSession {
    fn default() -> Self {
        Self::new()
    }
}
