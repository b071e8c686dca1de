//! Integration test support crate. All tests live in `tests/`.
