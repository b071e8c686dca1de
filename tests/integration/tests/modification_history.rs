//! Integration test: Append-only modification history invariants.

use provena_core::ContentId;
use provena_crypto::KeyPair;
use provena_registry::{Registry, RegistryError};

fn setup() -> (Registry, provena_core::Address, ContentId) {
    let registry = Registry::new();
    let kp = KeyPair::from_seed(&[1; 32]);
    let address = kp.address();
    registry
        .register_source(address.clone(), kp.public_key().to_hex(), "Reuters".into())
        .unwrap();
    let content_id = registry
        .publish_content(&address, "abc123".into(), "image/jpeg".into())
        .unwrap();
    (registry, address, content_id)
}

#[test]
fn test_indices_strictly_increase_with_successful_appends() {
    let (registry, address, content_id) = setup();

    for i in 0..10u64 {
        let index = registry
            .record_modification(
                &content_id,
                format!("fp{}", i),
                format!("edit {}", i),
                &address,
            )
            .unwrap();
        assert_eq!(index, i);
        assert_eq!(
            registry.get_content(&content_id).unwrap().modifications_count,
            i + 1
        );
    }
}

#[test]
fn test_history_reads_are_idempotent_and_immutable() {
    let (registry, address, content_id) = setup();

    registry
        .record_modification(&content_id, "fp0".into(), "first".into(), &address)
        .unwrap();
    let first_read = registry.get_modification(&content_id, 0).unwrap();

    // Later appends never change earlier entries.
    registry
        .record_modification(&content_id, "fp1".into(), "second".into(), &address)
        .unwrap();
    registry
        .record_modification(&content_id, "fp2".into(), "third".into(), &address)
        .unwrap();

    let second_read = registry.get_modification(&content_id, 0).unwrap();
    assert_eq!(first_read, second_read);

    let history = registry.get_history(&content_id).unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0], first_read);
    assert_eq!(history[1].description, "second");
    assert_eq!(history[2].description, "third");
}

#[test]
fn test_out_of_range_reads() {
    let (registry, address, content_id) = setup();

    // Empty history: index 0 is already out of range.
    assert!(matches!(
        registry.get_modification(&content_id, 0),
        Err(RegistryError::OutOfRange { index: 0, count: 0 })
    ));

    registry
        .record_modification(&content_id, "fp0".into(), "first".into(), &address)
        .unwrap();
    assert!(registry.get_modification(&content_id, 0).is_ok());
    assert!(matches!(
        registry.get_modification(&content_id, 1),
        Err(RegistryError::OutOfRange { index: 1, count: 1 })
    ));

    // Unknown content id is out of range too, never a default record.
    let unknown = ContentId::from_digest([0xAA; 32]);
    assert!(matches!(
        registry.get_modification(&unknown, 0),
        Err(RegistryError::OutOfRange { .. })
    ));
}

#[test]
fn test_corrective_append_instead_of_removal() {
    let (registry, address, content_id) = setup();

    registry
        .record_modification(&content_id, "bad".into(), "mistaken edit".into(), &address)
        .unwrap();
    // The "undo" is a new corrective entry; the mistaken one stays.
    registry
        .record_modification(
            &content_id,
            "abc123".into(),
            "revert mistaken edit".into(),
            &address,
        )
        .unwrap();

    let history = registry.get_history(&content_id).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].description, "mistaken edit");
    assert_eq!(history[1].description, "revert mistaken edit");
}

#[test]
fn test_histories_are_per_content() {
    let (registry, address, first_id) = setup();
    let second_id = registry
        .publish_content(&address, "other".into(), "image/png".into())
        .unwrap();

    registry
        .record_modification(&first_id, "fp0".into(), "edit first".into(), &address)
        .unwrap();

    assert_eq!(registry.get_content(&first_id).unwrap().modifications_count, 1);
    assert_eq!(registry.get_content(&second_id).unwrap().modifications_count, 0);
    assert!(registry.get_history(&second_id).unwrap().is_empty());
}
