//! The build-scoped variant reference registry.

use dashmap::DashMap;
use std::sync::Arc;
use tracing::trace;

use crate::core::VariantsError;
use crate::resolve::state::{InstanceId, VariantState};

/// Build-scoped map from [`InstanceId`] to live variant state.
///
/// Entries are write-once: the first writer for an id wins, and concurrent
/// [`register_if_absent`](Self::register_if_absent) calls racing on the
/// same id both observe the same stored state - no duplication, no lost
/// updates. The registry only grows; it is discarded wholesale with the
/// [`BuildSession`](crate::resolve::BuildSession) that owns it. There is no
/// eviction policy because reuse within a single build is the only goal.
#[derive(Debug)]
pub struct VariantRegistry {
    variants: DashMap<InstanceId, Arc<dyn VariantState>>,
}

impl VariantRegistry {
    pub(crate) fn new() -> Self {
        Self {
            variants: DashMap::new(),
        }
    }

    /// Registers the state under its own instance id unless an entry
    /// already exists, and returns the stored state either way.
    pub fn register_if_absent(&self, state: Arc<dyn VariantState>) -> Arc<dyn VariantState> {
        let id = state.instance_id();
        let entry = self.variants.entry(id).or_insert_with(|| {
            trace!(instance_id = %id, variant = state.display_name(), "registered variant state");
            Arc::clone(&state)
        });
        Arc::clone(entry.value())
    }

    /// Looks up the state registered under `id`.
    ///
    /// A miss is always a defect - decode ran before the corresponding
    /// encode, or the id came from another build execution - and fails
    /// with [`VariantsError::MissingReference`].
    pub fn get(&self, id: InstanceId) -> Result<Arc<dyn VariantState>, VariantsError> {
        self.variants
            .get(&id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(VariantsError::MissingReference { instance_id: id })
    }

    /// Number of distinct variant states registered so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Whether nothing has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}
