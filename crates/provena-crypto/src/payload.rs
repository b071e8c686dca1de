//! Canonical signing payloads for registry requests.
//!
//! Every mutating request is signed over a domain-tagged, length-prefixed
//! byte string built here. The node rebuilds the same payload from the
//! request fields before verifying, so client and server must agree on
//! these builders exactly.

/// Build a canonical payload: domain tag followed by length-prefixed fields.
fn payload(domain: &str, fields: &[&str]) -> Vec<u8> {
    let mut out = Vec::with_capacity(
        domain.len() + fields.iter().map(|f| f.len() + 8).sum::<usize>(),
    );
    out.extend_from_slice(domain.as_bytes());
    for field in fields {
        out.extend_from_slice(&(field.len() as u64).to_le_bytes());
        out.extend_from_slice(field.as_bytes());
    }
    out
}

/// Payload for registering a source.
pub fn register_payload(name: &str) -> Vec<u8> {
    payload("provena.v1.register", &[name])
}

/// Payload for publishing content.
pub fn publish_payload(fingerprint: &str, content_type: &str) -> Vec<u8> {
    payload("provena.v1.publish", &[fingerprint, content_type])
}

/// Payload for recording a modification.
pub fn modify_payload(content_id: &str, fingerprint: &str, description: &str) -> Vec<u8> {
    payload("provena.v1.modify", &[content_id, fingerprint, description])
}

/// Payload for an administrative credibility adjustment.
pub fn adjust_payload(target: &str, delta: i64) -> Vec<u8> {
    payload("provena.v1.adjust", &[target, &delta.to_string()])
}

/// Payload for administratively setting a source's verification flag.
pub fn verify_source_payload(target: &str, verified: bool) -> Vec<u8> {
    payload("provena.v1.verify-source", &[target, &verified.to_string()])
}

/// Payload for administratively setting a content record's verification flag.
pub fn verify_content_payload(content_id: &str, verified: bool) -> Vec<u8> {
    payload("provena.v1.verify-content", &[content_id, &verified.to_string()])
}
