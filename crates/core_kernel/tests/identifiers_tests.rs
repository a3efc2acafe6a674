//! Unit tests for strongly-typed identifiers

use core_kernel::{ClientId, PaymentId, SupplierId, UserId};
use std::str::FromStr;
use uuid::Uuid;

#[test]
fn test_new_ids_are_unique() {
    assert_ne!(PaymentId::new(), PaymentId::new());
    assert_ne!(ClientId::new(), ClientId::new());
}

#[test]
fn test_v7_ids_are_time_ordered() {
    let a = PaymentId::new_v7();
    let b = PaymentId::new_v7();
    assert!(a.as_uuid() <= b.as_uuid());
}

#[test]
fn test_display_includes_prefix() {
    let id = SupplierId::new();
    let s = id.to_string();
    assert!(s.starts_with("SUP-"));
    assert_eq!(SupplierId::prefix(), "SUP");
}

#[test]
fn test_from_str_accepts_prefixed_and_bare() {
    let id = UserId::new();
    let prefixed = id.to_string();
    let bare = id.as_uuid().to_string();

    assert_eq!(UserId::from_str(&prefixed).unwrap(), id);
    assert_eq!(UserId::from_str(&bare).unwrap(), id);
}

#[test]
fn test_from_str_rejects_garbage() {
    assert!(PaymentId::from_str("PAY-not-a-uuid").is_err());
}

#[test]
fn test_uuid_round_trip() {
    let uuid = Uuid::new_v4();
    let id = ClientId::from_uuid(uuid);
    assert_eq!(Uuid::from(id), uuid);
    assert_eq!(ClientId::from(uuid), id);
}

#[test]
fn test_serde_is_transparent() {
    let id = PaymentId::new();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{}\"", id.as_uuid()));
    let back: PaymentId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}
