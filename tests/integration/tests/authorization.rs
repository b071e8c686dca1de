//! Integration test: Authorization policies and signed request payloads.
//!
//! Covers the modification policy (publisher or verified source), the
//! administrative identity gate, and the ed25519 request authentication the
//! node layers on top of the registry.

use provena_core::Address;
use provena_crypto::{payload, sign, verify, KeyPair, Signature};
use provena_registry::{Registry, RegistryError};

fn register(registry: &Registry, kp: &KeyPair, name: &str) -> Address {
    let address = kp.address();
    registry
        .register_source(address.clone(), kp.public_key().to_hex(), name.into())
        .unwrap();
    address
}

// =========================================================================
// Modification policy: publisher or verified source
// =========================================================================

#[test]
fn test_publisher_may_modify() {
    let registry = Registry::new();
    let publisher = register(&registry, &KeyPair::from_seed(&[1; 32]), "Reuters");

    let content_id = registry
        .publish_content(&publisher, "abc".into(), "text/plain".into())
        .unwrap();
    assert!(registry
        .record_modification(&content_id, "def".into(), "edit".into(), &publisher)
        .is_ok());
}

#[test]
fn test_other_registered_source_may_not_modify() {
    let registry = Registry::new();
    let publisher = register(&registry, &KeyPair::from_seed(&[1; 32]), "Reuters");
    let other = register(&registry, &KeyPair::from_seed(&[2; 32]), "Tabloid");

    let content_id = registry
        .publish_content(&publisher, "abc".into(), "text/plain".into())
        .unwrap();
    let result = registry.record_modification(&content_id, "def".into(), "edit".into(), &other);
    assert!(matches!(result, Err(RegistryError::NotAuthorized(_))));

    // The rejected call left no trace in the history.
    assert!(registry.get_history(&content_id).unwrap().is_empty());
}

#[test]
fn test_unregistered_identity_may_not_modify() {
    let registry = Registry::new();
    let publisher = register(&registry, &KeyPair::from_seed(&[1; 32]), "Reuters");
    let stranger = KeyPair::from_seed(&[3; 32]).address();

    let content_id = registry
        .publish_content(&publisher, "abc".into(), "text/plain".into())
        .unwrap();
    let result = registry.record_modification(&content_id, "def".into(), "edit".into(), &stranger);
    assert!(matches!(result, Err(RegistryError::NotAuthorized(_))));
}

#[test]
fn test_verified_source_may_modify_until_flag_revoked() {
    let admin_kp = KeyPair::from_seed(&[0xAD; 32]);
    let registry = Registry::with_admin(Some(admin_kp.address()));
    let publisher = register(&registry, &KeyPair::from_seed(&[1; 32]), "Reuters");
    let checker = register(&registry, &KeyPair::from_seed(&[2; 32]), "FactCheckers");

    let content_id = registry
        .publish_content(&publisher, "abc".into(), "text/plain".into())
        .unwrap();

    registry
        .set_source_verified(&admin_kp.address(), &checker, true)
        .unwrap();
    assert!(registry
        .record_modification(&content_id, "def".into(), "annotate".into(), &checker)
        .is_ok());

    registry
        .set_source_verified(&admin_kp.address(), &checker, false)
        .unwrap();
    let result =
        registry.record_modification(&content_id, "ghi".into(), "annotate again".into(), &checker);
    assert!(matches!(result, Err(RegistryError::NotAuthorized(_))));
}

// =========================================================================
// Administrative gate
// =========================================================================

#[test]
fn test_non_admin_cannot_adjust_or_verify() {
    let admin_kp = KeyPair::from_seed(&[0xAD; 32]);
    let registry = Registry::with_admin(Some(admin_kp.address()));
    let source = register(&registry, &KeyPair::from_seed(&[1; 32]), "Reuters");

    assert!(matches!(
        registry.adjust_credibility(&source, &source, 100),
        Err(RegistryError::NotAuthorized(_))
    ));
    assert!(matches!(
        registry.set_source_verified(&source, &source, true),
        Err(RegistryError::NotAuthorized(_))
    ));

    // Admin succeeds, and the adjustment is clamped to the score bounds.
    let adjusted = registry
        .adjust_credibility(&admin_kp.address(), &source, 10_000)
        .unwrap();
    assert_eq!(adjusted.credibility_score, provena_core::MAX_CREDIBILITY);
}

// =========================================================================
// Signed request payloads (the node's substrate authentication)
// =========================================================================

#[test]
fn test_request_signature_binds_operation_and_fields() {
    let kp = KeyPair::from_seed(&[1; 32]);

    let message = payload::publish_payload("abc123", "image/jpeg");
    let signature = sign(&message, &kp);

    // The right payload verifies.
    assert!(verify(&message, &signature, &kp.public_key()).is_ok());

    // The same signature does not authorize different fields…
    let other_fields = payload::publish_payload("abc123", "image/png");
    assert!(verify(&other_fields, &signature, &kp.public_key()).is_err());

    // …nor a different operation with the same fields.
    let other_op = payload::modify_payload("abc123", "image/jpeg", "");
    assert!(verify(&other_op, &signature, &kp.public_key()).is_err());
}

#[test]
fn test_signature_roundtrip_through_hex_transport() {
    let kp = KeyPair::from_seed(&[1; 32]);
    let message = payload::register_payload("Reuters");
    let signature = sign(&message, &kp);

    // The CLI ships hex; the node parses it back.
    let wire = signature.to_hex();
    let parsed = Signature::from_hex(&wire).unwrap();
    assert!(verify(&message, &parsed, &kp.public_key()).is_ok());
}

#[test]
fn test_address_is_bound_to_public_key() {
    let kp = KeyPair::from_seed(&[1; 32]);
    let other = KeyPair::from_seed(&[2; 32]);

    // Deriving the address from a different key can never impersonate.
    assert_ne!(kp.address(), other.address());
    assert_eq!(kp.address(), kp.public_key().address());
}
