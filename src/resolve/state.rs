//! Variant state handles and materialized results.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Process-local identity of one variant state within one build execution.
///
/// Ids are allocated by [`BuildSession`](crate::resolve::BuildSession) from
/// a monotonically increasing counter and serve as the deduplication key
/// when resolved graphs are encoded. An id is only meaningful inside the
/// build execution that allocated it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl InstanceId {
    /// Wraps a raw id value.
    ///
    /// Only useful for ids that originated from a
    /// [`BuildSession`](crate::resolve::BuildSession) in this process;
    /// fabricated ids will not resolve.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id value, as written to encoded records.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Live, shareable state of one resolved variant.
///
/// Implementations are immutable after publication: once a state has been
/// registered it is shared by reference across threads, so nothing about
/// it may change. The one operation graph consumers need is
/// [`variant_result`](Self::variant_result) - materializing the final
/// resolved result, with an externally substituted result chained in when
/// the graph says so.
pub trait VariantState: fmt::Debug + Send + Sync {
    /// The id this state was allocated in the owning build execution.
    fn instance_id(&self) -> InstanceId;

    /// Human-readable name of the variant, for diagnostics.
    fn display_name(&self) -> &str;

    /// Materializes the final resolved result, chaining the given external
    /// result if present.
    fn variant_result(&self, external: Option<ResolvedVariant>) -> ResolvedVariant;
}

/// The materialized result of resolving one variant.
///
/// Structurally comparable: a decoded result is expected to be equal to
/// what materializing the original state would have produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVariant {
    /// Display name of the variant this result came from
    pub display_name: String,
    /// Resolved attributes of the variant
    pub attributes: BTreeMap<String, String>,
    /// Externally substituted result, when another module's variant was
    /// selected in place of this node's own
    pub external_variant: Option<Box<ResolvedVariant>>,
}

impl fmt::Display for ResolvedVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.external_variant {
            Some(external) => write!(f, "{} -> {}", self.display_name, external),
            None => f.write_str(&self.display_name),
        }
    }
}

/// Plain [`VariantState`] carrying a display name and attribute map.
///
/// Build-tool integrations with richer state implement [`VariantState`]
/// themselves; this covers the common case and the crate's own tests.
/// Construct through
/// [`BuildSession::new_variant_state`](crate::resolve::BuildSession::new_variant_state)
/// so the id comes from the session's allocator.
#[derive(Debug)]
pub struct DefaultVariantState {
    id: InstanceId,
    display_name: String,
    attributes: BTreeMap<String, String>,
}

impl DefaultVariantState {
    pub(crate) fn new(
        id: InstanceId,
        display_name: String,
        attributes: BTreeMap<String, String>,
    ) -> Self {
        Self {
            id,
            display_name,
            attributes,
        }
    }
}

impl VariantState for DefaultVariantState {
    fn instance_id(&self) -> InstanceId {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn variant_result(&self, external: Option<ResolvedVariant>) -> ResolvedVariant {
        ResolvedVariant {
            display_name: self.display_name.clone(),
            attributes: self.attributes.clone(),
            external_variant: external.map(Box::new),
        }
    }
}

/// One node of a resolved dependency variant graph, as handed to the codec.
#[derive(Debug, Clone)]
pub struct ResolvedGraphNode {
    /// Graph-assigned node id, unique within the resolution result
    pub node_id: u64,
    /// The variant state selected for this node
    pub state: Arc<dyn VariantState>,
    /// Variant state substituted from another module, if any
    pub external_variant: Option<Arc<dyn VariantState>>,
}

impl ResolvedGraphNode {
    /// Creates a node with no external variant.
    #[must_use]
    pub fn new(node_id: u64, state: Arc<dyn VariantState>) -> Self {
        Self {
            node_id,
            state,
            external_variant: None,
        }
    }

    /// Attaches an externally substituted variant state.
    #[must_use]
    pub fn with_external_variant(mut self, external: Arc<dyn VariantState>) -> Self {
        self.external_variant = Some(external);
        self
    }
}
