//! Integration test: Full registry lifecycle across crates.
//!
//! Tests the register → publish → modify flow using provena-registry,
//! provena-crypto, and provena-core together.

use provena_core::{Address, ContentId, BASELINE_CREDIBILITY};
use provena_crypto::KeyPair;
use provena_registry::{Registry, RegistryError, RegistryEvent};

/// Helper: a registered source backed by a real keypair.
fn register_source(registry: &Registry, seed: u8, name: &str) -> (KeyPair, Address) {
    let kp = KeyPair::from_seed(&[seed; 32]);
    let address = kp.address();
    registry
        .register_source(address.clone(), kp.public_key().to_hex(), name.into())
        .expect("registration should succeed");
    (kp, address)
}

// =========================================================================
// Registration
// =========================================================================

#[test]
fn test_register_once_then_already_registered() {
    let registry = Registry::new();
    let (_, address) = register_source(&registry, 1, "Reuters");

    // Never two successes for the same identity.
    let second = registry.register_source(address.clone(), "cc".repeat(32), "Reuters".into());
    assert!(matches!(second, Err(RegistryError::AlreadyRegistered(_))));

    let source = registry.get_source(&address).unwrap();
    assert_eq!(source.name, "Reuters");
    assert_eq!(source.credibility_score, BASELINE_CREDIBILITY);
    assert_eq!(source.total_publications, 0);
}

#[test]
fn test_unknown_source_is_not_found_not_default() {
    let registry = Registry::new();
    let kp = KeyPair::from_seed(&[9; 32]);
    let result = registry.get_source(&kp.address());
    assert!(matches!(result, Err(RegistryError::SourceNotFound(_))));
}

// =========================================================================
// Publication
// =========================================================================

#[test]
fn test_publish_and_read_back() {
    let registry = Registry::new();
    let (_, address) = register_source(&registry, 1, "Reuters");

    let content_id = registry
        .publish_content(&address, "abc123".into(), "image/jpeg".into())
        .expect("publish should succeed");

    let record = registry.get_content(&content_id).unwrap();
    assert_eq!(record.publisher, address);
    assert_eq!(record.fingerprint, "abc123");
    assert_eq!(record.content_type, "image/jpeg");
    assert_eq!(record.modifications_count, 0);
    assert_eq!(record.credibility_score, BASELINE_CREDIBILITY);
}

#[test]
fn test_unregistered_publisher_rejected_with_no_partial_state() {
    let registry = Registry::new();
    let anon = KeyPair::from_seed(&[7; 32]).address();

    let result = registry.publish_content(&anon, "abc123".into(), "image/jpeg".into());
    assert!(matches!(result, Err(RegistryError::UnregisteredPublisher(_))));

    // No content record, no source record.
    assert_eq!(registry.content_count(), 0);
    assert!(matches!(
        registry.get_source(&anon),
        Err(RegistryError::SourceNotFound(_))
    ));
}

#[test]
fn test_publication_counter_tracks_successful_publishes() {
    let registry = Registry::new();
    let (_, address) = register_source(&registry, 1, "Reuters");

    for i in 0..4 {
        registry
            .publish_content(&address, format!("fp{}", i), "text/plain".into())
            .unwrap();
        assert_eq!(
            registry.get_source(&address).unwrap().total_publications,
            i + 1
        );
    }
    assert_eq!(registry.list_content_by_publisher(&address).len(), 4);
}

#[tokio::test]
async fn test_publish_returns_id_synchronously_and_emits_event() {
    let registry = Registry::new();
    let (_, address) = register_source(&registry, 1, "Reuters");
    let mut events = registry.subscribe();

    // The returned id is the handle; the event merely mirrors it.
    let content_id = registry
        .publish_content(&address, "abc123".into(), "image/jpeg".into())
        .unwrap();

    let RegistryEvent::ContentPublished(event) = events.recv().await.unwrap();
    assert_eq!(event.content_id, content_id);
    assert_eq!(event.publisher, address);
    assert_eq!(event.fingerprint, "abc123");
}

#[test]
fn test_unknown_content_is_not_found() {
    let registry = Registry::new();
    let unknown = ContentId::from_digest([0xEE; 32]);
    assert!(matches!(
        registry.get_content(&unknown),
        Err(RegistryError::ContentNotFound(_))
    ));
}

// =========================================================================
// The Reuters scenario
// =========================================================================

#[test]
fn test_reuters_scenario() {
    let registry = Registry::new();

    // Source "Reuters" registers → credibility 100, publications 0.
    let (_, reuters) = register_source(&registry, 1, "Reuters");
    let source = registry.get_source(&reuters).unwrap();
    assert_eq!(source.credibility_score, 100);
    assert_eq!(source.total_publications, 0);

    // Publishes fingerprint "abc123" type "image/jpeg" → contentId C1.
    let c1 = registry
        .publish_content(&reuters, "abc123".into(), "image/jpeg".into())
        .unwrap();
    let record = registry.get_content(&c1).unwrap();
    assert_eq!(record.publisher, reuters);
    assert_eq!(record.modifications_count, 0);

    // Appends modification "cropped image" with fingerprint "def456".
    let index = registry
        .record_modification(&c1, "def456".into(), "cropped image".into(), &reuters)
        .unwrap();
    assert_eq!(index, 0);

    let modification = registry.get_modification(&c1, 0).unwrap();
    assert_eq!(modification.fingerprint, "def456");
    assert_eq!(modification.description, "cropped image");
    assert_eq!(modification.modified_by, reuters);

    // Original fingerprint still "abc123".
    assert_eq!(registry.get_content(&c1).unwrap().fingerprint, "abc123");
}
