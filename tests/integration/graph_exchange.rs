//! Build-scoped graph encode/decode round trips.

use native_variants::core::VariantsError;
use native_variants::resolve::{
    BuildSession, ResolvedGraphNode, ResolvedVariant, SelectedVariantVisitor, VariantState,
};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Visitor that records every delivery, for assertions.
#[derive(Default)]
struct CapturingVisitor {
    seen: Vec<(u64, ResolvedVariant)>,
}

impl SelectedVariantVisitor for CapturingVisitor {
    fn visit_selected_variant(&mut self, node_id: u64, result: ResolvedVariant) {
        self.seen.push((node_id, result));
    }
}

fn attributes(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[test]
fn test_graph_round_trip_with_shared_external_variant() {
    let session = BuildSession::new();
    let codec = session.codec();

    // One platform-specific variant substituted into many nodes, the way a
    // multiplatform module's selected artifact is shared across consumers.
    let shared = session.new_variant_state(
        "core:linux64:release",
        attributes(&[("platform", "linux64"), ("buildType", "release")]),
    );

    let mut encoded = Vec::new();
    let mut expected = Vec::new();
    for node_id in 0..100u64 {
        let own = session.new_variant_state(
            format!("consumer{node_id}:linux64:release"),
            attributes(&[("platform", "linux64")]),
        );
        let node =
            ResolvedGraphNode::new(node_id, own.clone()).with_external_variant(shared.clone());
        codec.encode(&node, &mut encoded).unwrap();
        expected.push((node_id, own.variant_result(Some(shared.variant_result(None)))));
    }

    // 100 own states + 1 shared state, not 200.
    assert_eq!(session.registry().len(), 101);

    let mut visitor = CapturingVisitor::default();
    let decoded = codec.decode_stream(&mut encoded.as_slice(), &mut visitor).unwrap();
    assert_eq!(decoded, 100);
    assert_eq!(visitor.seen, expected);
}

#[test]
fn test_round_trip_of_empty_graph() {
    let session = BuildSession::new();
    let codec = session.codec();
    let mut empty: &[u8] = &[];
    let mut visitor = CapturingVisitor::default();
    let decoded = codec.decode_stream(&mut empty, &mut visitor).unwrap();
    assert_eq!(decoded, 0);
    assert!(visitor.seen.is_empty());
    assert!(session.registry().is_empty());
}

#[test]
fn test_parallel_encode_of_shared_state() {
    let session = BuildSession::new();
    let shared = session.new_variant_state("platform-lib:win32", BTreeMap::new());

    // Worker threads traverse independent graph regions, all referencing
    // the same external variant, each encoding into its own sink.
    let buffers = Mutex::new(Vec::new());
    std::thread::scope(|scope| {
        for worker in 0..8u64 {
            let shared = shared.clone();
            let session = &session;
            let buffers = &buffers;
            scope.spawn(move || {
                let codec = session.codec();
                let mut sink = Vec::new();
                for i in 0..25 {
                    let node_id = worker * 1000 + i;
                    let own = session
                        .new_variant_state(format!("consumer{node_id}"), BTreeMap::new());
                    let node = ResolvedGraphNode::new(node_id, own)
                        .with_external_variant(shared.clone());
                    codec.encode(&node, &mut sink).unwrap();
                }
                buffers.lock().unwrap().push(sink);
            });
        }
    });

    // 8 workers x 25 own states, plus exactly one entry for the shared
    // state regardless of how many racing encodes referenced it.
    assert_eq!(session.registry().len(), 201);

    // Every worker's stream decodes cleanly after the fact.
    let codec = session.codec();
    let mut total = 0;
    for sink in buffers.into_inner().unwrap() {
        let mut visitor = CapturingVisitor::default();
        total += codec.decode_stream(&mut sink.as_slice(), &mut visitor).unwrap();
        for (_, result) in &visitor.seen {
            assert_eq!(
                result.external_variant.as_deref().map(|e| e.display_name.as_str()),
                Some("platform-lib:win32")
            );
        }
    }
    assert_eq!(total, 200);
}

#[test]
fn test_decode_before_encode_is_a_protocol_violation() {
    let encoding_session = BuildSession::new();
    let state = encoding_session.new_variant_state("lib:osx64", BTreeMap::new());
    let mut encoded = Vec::new();
    encoding_session
        .codec()
        .encode(&ResolvedGraphNode::new(1, state), &mut encoded)
        .unwrap();

    // A session that never ran the encode cannot resolve the reference.
    let decoding_session = BuildSession::new();
    let mut visitor = CapturingVisitor::default();
    let err = decoding_session
        .codec()
        .decode(&mut encoded.as_slice(), &mut visitor)
        .unwrap_err();
    assert!(matches!(err, VariantsError::MissingReference { .. }));
    assert!(visitor.seen.is_empty());
}
