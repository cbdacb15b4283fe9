//! Integration tests for the chunk protocol.

use proptest::prelude::*;
use varsmith_transport::{
    send_artifact, split_chunks, Artifact, DirectorySink, Message, Outbox, Reassembler,
    Transport, DEFAULT_CHUNK_SIZE,
};

fn reassemble(messages: Vec<Message>) -> Vec<Artifact> {
    let mut reassembler = Reassembler::new();
    let mut out = Vec::new();
    for message in messages {
        if let Some(artifact) = reassembler.accept(message).unwrap() {
            out.push(artifact);
        }
    }
    reassembler.finish().unwrap();
    out
}

// ============================================================================
// Large payloads
// ============================================================================

#[test]
fn two_and_a_half_mib_is_three_chunks() {
    let payload = "x".repeat(DEFAULT_CHUNK_SIZE * 5 / 2);
    let chunks = split_chunks(&payload, DEFAULT_CHUNK_SIZE).unwrap();
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0].len(), DEFAULT_CHUNK_SIZE);
    assert_eq!(chunks[2].len(), DEFAULT_CHUNK_SIZE / 2);
    assert_eq!(chunks.concat(), payload);

    let artifact = Artifact::new("tokens.json", "application/json", payload);
    let mut wire: Vec<Message> = Vec::new();
    assert_eq!(send_artifact(&mut wire, &artifact, DEFAULT_CHUNK_SIZE).unwrap(), 3);
    assert_eq!(
        wire.first(),
        Some(&Message::ExportBegin {
            total_chunks: 3,
            filename: "tokens.json".into(),
            mime: "application/json".into(),
        })
    );
    assert_eq!(reassemble(wire), vec![artifact]);
}

#[test]
fn messages_survive_json_round_trip() {
    let artifact = Artifact::new("variables.scss", "text/x-scss", "$color-accent: #ffffff;\n");
    let mut wire: Vec<Message> = Vec::new();
    send_artifact(&mut wire, &artifact, 8).unwrap();

    let decoded: Vec<Message> = wire
        .iter()
        .map(|m| Message::from_json(&m.to_json().unwrap()).unwrap())
        .collect();
    assert_eq!(reassemble(decoded), vec![artifact]);
}

#[test]
fn two_artifacts_back_to_back() {
    let tokens = Artifact::new("tokens.json", "application/json", "{}");
    let scss = Artifact::new("variables.scss", "text/x-scss", "/* (No variables emitted) */\n");
    let mut wire: Vec<Message> = Vec::new();
    send_artifact(&mut wire, &tokens, 2).unwrap();
    send_artifact(&mut wire, &scss, 2).unwrap();
    assert_eq!(reassemble(wire), vec![tokens, scss]);
}

// ============================================================================
// Outbox and sink
// ============================================================================

#[test]
fn outbox_delivers_to_sink_after_ready() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = DirectorySink::new(dir.path());
    {
        let mut outbox = Outbox::new(&mut sink);
        let artifact = Artifact::new("tokens.json", "application/json", "{\"core\": {}}");
        send_artifact(&mut outbox, &artifact, 4).unwrap();
        assert!(outbox.pending() > 0);
        outbox.receive(&Message::UiReady).unwrap();
        assert_eq!(outbox.pending(), 0);
    }

    let written = sink.finish().unwrap();
    assert_eq!(written, vec![dir.path().join("tokens.json")]);
    assert_eq!(
        std::fs::read_to_string(&written[0]).unwrap(),
        "{\"core\": {}}"
    );
}

#[test]
fn error_message_reaches_sink() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = DirectorySink::new(dir.path());
    let err = sink.send(Message::error("graph unavailable")).unwrap_err();
    assert_eq!(err.to_string(), "remote error: graph unavailable");
    assert!(sink.finish().unwrap().is_empty());
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Chunking then reassembling returns the original payload for any text
    /// and any positive chunk size.
    #[test]
    fn reassembly_restores_payload(payload in "\\PC{0,200}", chunk_size in 1usize..64) {
        let artifact = Artifact::new("a.txt", "text/plain", payload.clone());
        let mut wire: Vec<Message> = Vec::new();
        let count = send_artifact(&mut wire, &artifact, chunk_size).unwrap();
        prop_assert_eq!(wire.len(), count + 2);

        let restored = reassemble(wire);
        prop_assert_eq!(&restored[0].data, &payload);
    }

    /// No chunk exceeds the chunk size unless it is a single wide character.
    #[test]
    fn chunks_respect_size(payload in "\\PC{0,200}", chunk_size in 1usize..64) {
        for chunk in split_chunks(&payload, chunk_size).unwrap() {
            prop_assert!(!chunk.is_empty());
            prop_assert!(chunk.len() <= chunk_size || chunk.chars().count() == 1);
        }
    }

    /// ASCII payloads split into exactly ceil(len / size) chunks.
    #[test]
    fn ascii_chunk_count(payload in "[ -~]{0,300}", chunk_size in 1usize..64) {
        let chunks = split_chunks(&payload, chunk_size).unwrap();
        prop_assert_eq!(chunks.len(), payload.len().div_ceil(chunk_size));
    }
}
