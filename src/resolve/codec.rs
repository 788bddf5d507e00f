//! Encoding and decoding of resolved variant graph nodes.
//!
//! One record per graph node, laid out as unsigned LEB128 varints:
//!
//! ```text
//! varint nodeId
//! varint instanceId
//! byte   hasExternal (0 | 1)
//! varint externalInstanceId   (only when hasExternal = 1)
//! ```
//!
//! There is no length prefix or magic number at this layer - framing is the
//! responsibility of the enclosing stream protocol. Encoded bytes are only
//! meaningful within the build execution that produced them: a variant
//! reference is nothing but an instance id, resolvable through the
//! session's [`VariantRegistry`].
//!
//! Encoding a reference registers the live state under its id before
//! writing the id - that is the whole deduplication mechanism. However many
//! nodes reference a state, its content crosses the boundary zero times;
//! only the id does.

use std::io::{ErrorKind, Read, Write};
use std::sync::Arc;
use tracing::trace;

use crate::core::VariantsError;
use crate::resolve::registry::VariantRegistry;
use crate::resolve::state::{InstanceId, ResolvedGraphNode, ResolvedVariant, VariantState};

/// Receives one call per decoded record, in stream order.
pub trait SelectedVariantVisitor {
    /// Called exactly once per record with the node id and the fully
    /// materialized resolved result.
    fn visit_selected_variant(&mut self, node_id: u64, result: ResolvedVariant);
}

/// Every `FnMut(u64, ResolvedVariant)` is a visitor.
impl<F: FnMut(u64, ResolvedVariant)> SelectedVariantVisitor for F {
    fn visit_selected_variant(&mut self, node_id: u64, result: ResolvedVariant) {
        self(node_id, result);
    }
}

/// Codec exchanging resolved graph nodes within one build execution.
///
/// Obtained from [`BuildSession::codec`](crate::resolve::BuildSession::codec).
/// The codec is stateless apart from its borrow of the session's registry,
/// so parallel workers can share one instance (or create one each) and
/// encode independent graph regions concurrently. Decode ordering is the
/// caller's protocol: every encode a decode depends on must have completed
/// first.
#[derive(Debug, Clone, Copy)]
pub struct SelectedVariantCodec<'a> {
    registry: &'a VariantRegistry,
}

impl<'a> SelectedVariantCodec<'a> {
    pub(crate) fn new(registry: &'a VariantRegistry) -> Self {
        Self { registry }
    }

    /// Encodes one resolved graph node into `sink`.
    ///
    /// Registers the node's variant state (and external variant state, if
    /// present) in the build's registry as a side effect.
    pub fn encode<W: Write>(
        &self,
        node: &ResolvedGraphNode,
        sink: &mut W,
    ) -> Result<(), VariantsError> {
        encode_varint(sink, node.node_id)?;
        self.write_variant_reference(&node.state, sink)?;
        match &node.external_variant {
            None => sink.write_all(&[0])?,
            Some(external) => {
                sink.write_all(&[1])?;
                self.write_variant_reference(external, sink)?;
            }
        }
        trace!(node_id = node.node_id, "encoded resolved variant node");
        Ok(())
    }

    /// Decodes exactly one record from `source` and delivers it to the
    /// visitor.
    ///
    /// # Errors
    ///
    /// - [`VariantsError::MissingReference`] if a referenced id was never
    ///   registered in this build - the decode ran before its encode, or
    ///   the bytes belong to another execution. Nothing is delivered for
    ///   the failing record.
    /// - [`VariantsError::Truncated`] / [`VariantsError::CorruptRecord`]
    ///   for byte streams no encoder produced.
    pub fn decode<R: Read>(
        &self,
        source: &mut R,
        visitor: &mut dyn SelectedVariantVisitor,
    ) -> Result<(), VariantsError> {
        let node_id = decode_varint(source)?;
        let state = self.read_variant_reference(source)?;
        let external = match read_bool(source)? {
            true => Some(self.read_variant_reference(source)?.variant_result(None)),
            false => None,
        };
        visitor.visit_selected_variant(node_id, state.variant_result(external));
        Ok(())
    }

    /// Decodes records until `source` is exhausted, delivering each to the
    /// visitor in stream order. Returns the number of records decoded.
    ///
    /// End of input is only recognized on a record boundary; a source that
    /// ends mid-record fails with [`VariantsError::Truncated`].
    pub fn decode_stream<R: Read>(
        &self,
        source: &mut R,
        visitor: &mut dyn SelectedVariantVisitor,
    ) -> Result<usize, VariantsError> {
        let mut decoded = 0;
        let mut first = [0u8; 1];
        loop {
            match source.read(&mut first) {
                Ok(0) => return Ok(decoded),
                Ok(_) => {
                    let mut record = first.as_slice().chain(&mut *source);
                    self.decode(&mut record, visitor)?;
                    decoded += 1;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// The deduplication point: registers the state, then writes only its
    /// instance id.
    fn write_variant_reference<W: Write>(
        &self,
        state: &Arc<dyn VariantState>,
        sink: &mut W,
    ) -> Result<(), VariantsError> {
        let id = state.instance_id();
        self.registry.register_if_absent(Arc::clone(state));
        encode_varint(sink, id.raw())
    }

    fn read_variant_reference<R: Read>(
        &self,
        source: &mut R,
    ) -> Result<Arc<dyn VariantState>, VariantsError> {
        let id = InstanceId::from_raw(decode_varint(source)?);
        self.registry.get(id)
    }
}

/// Writes an unsigned LEB128 varint.
fn encode_varint<W: Write>(sink: &mut W, mut value: u64) -> Result<(), VariantsError> {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            sink.write_all(&[byte])?;
            return Ok(());
        }
        sink.write_all(&[byte | 0x80])?;
    }
}

/// Reads an unsigned LEB128 varint.
fn decode_varint<R: Read>(source: &mut R) -> Result<u64, VariantsError> {
    let mut value: u64 = 0;
    let mut shift = 0u32;
    loop {
        let byte = read_byte(source)?;
        let bits = u64::from(byte & 0x7f);
        // A u64 is at most ten varint bytes; the tenth may carry one bit.
        if shift == 63 && byte > 1 {
            return Err(VariantsError::CorruptRecord {
                reason: "varint overflows 64 bits".to_string(),
            });
        }
        value |= bits << shift;
        if byte & 0x80 == 0 {
            return Ok(value);
        }
        shift += 7;
    }
}

fn read_bool<R: Read>(source: &mut R) -> Result<bool, VariantsError> {
    match read_byte(source)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(VariantsError::CorruptRecord {
            reason: format!("expected boolean byte 0 or 1, found {other}"),
        }),
    }
}

fn read_byte<R: Read>(source: &mut R) -> Result<u8, VariantsError> {
    let mut buf = [0u8; 1];
    match source.read_exact(&mut buf) {
        Ok(()) => Ok(buf[0]),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(VariantsError::Truncated),
        Err(e) => Err(e.into()),
    }
}
