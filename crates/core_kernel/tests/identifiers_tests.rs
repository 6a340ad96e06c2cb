//! Tests for strongly-typed identifiers

use core_kernel::{PartyId, PolicyId, ScheduleId};
use uuid::Uuid;

#[test]
fn test_prefixes_are_distinct() {
    assert_eq!(ScheduleId::prefix(), "FSC");
    assert_eq!(PolicyId::prefix(), "POL");
    assert_eq!(PartyId::prefix(), "PTY");
}

#[test]
fn test_json_is_transparent_uuid() {
    let uuid = Uuid::new_v4();
    let id = PolicyId::from_uuid(uuid);
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{}\"", uuid));
}

#[test]
fn test_parse_rejects_wrong_uuid() {
    assert!("FSC-not-a-uuid".parse::<ScheduleId>().is_err());
}
