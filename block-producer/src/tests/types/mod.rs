use crate::types::constant::{BACKWARD_CURSOR_KEY, FORWARD_CURSOR_KEY};
use crate::types::cursor::CursorStatus;
use crate::types::direction::ScanDirection;
use crate::types::work_item::{WorkItem, WorkItemBody};
use rstest::*;
use std::str::FromStr;
use strum::IntoEnumIterator;

#[rstest]
#[case("forward", ScanDirection::Forward)]
#[case("up", ScanDirection::Forward)]
#[case("Backward", ScanDirection::Backward)]
#[case(" down ", ScanDirection::Backward)]
fn test_direction_from_str(#[case] input: &str, #[case] expected: ScanDirection) {
    assert_eq!(ScanDirection::from_str(input).unwrap(), expected);
}

#[rstest]
fn test_direction_from_str_rejects_unknown() {
    assert!(ScanDirection::from_str("sideways").is_err());
}

#[rstest]
fn test_storage_keys_round_trip() {
    assert_eq!(ScanDirection::Forward.storage_key(), FORWARD_CURSOR_KEY);
    assert_eq!(ScanDirection::Backward.storage_key(), BACKWARD_CURSOR_KEY);
    for direction in ScanDirection::iter() {
        assert_eq!(ScanDirection::from_storage_key(direction.storage_key()), Some(direction));
    }
    assert_eq!(ScanDirection::from_storage_key("CURRENT_SCRAPING_BLOCK_SIDEWAYS"), None);
}

#[rstest]
#[case(ScanDirection::Forward, 41, Some(42))]
#[case(ScanDirection::Forward, u64::MAX, None)]
#[case(ScanDirection::Backward, 42, Some(41))]
#[case(ScanDirection::Backward, 0, None)]
fn test_step(#[case] direction: ScanDirection, #[case] block_num: u64, #[case] expected: Option<u64>) {
    assert_eq!(direction.step(block_num), expected);
}

#[rstest]
#[case(ScanDirection::Forward, 105, 105, 0, false)]
#[case(ScanDirection::Forward, 106, 105, 0, true)]
#[case(ScanDirection::Forward, 106, 105, 200, true)]
#[case(ScanDirection::Backward, 48, 0, 48, false)]
#[case(ScanDirection::Backward, 47, 0, 48, true)]
#[case(ScanDirection::Backward, 47, 1_000, 48, true)]
fn test_is_past_boundary(
    #[case] direction: ScanDirection,
    #[case] candidate: u64,
    #[case] frontier: u64,
    #[case] end_block: u64,
    #[case] expected: bool,
) {
    assert_eq!(direction.is_past_boundary(candidate, frontier, end_block), expected);
}

#[rstest]
fn test_direction_display_matches_serde() {
    assert_eq!(ScanDirection::Backward.to_string(), "backward");
    assert_eq!(serde_json::to_string(&ScanDirection::Forward).unwrap(), r#""forward""#);
}

#[rstest]
fn test_work_item_keys_are_decimal_block_number() {
    let item = WorkItem::new(1_234_567);

    assert_eq!(item.id(), "1234567");
    assert_eq!(item.dedup_key(), "1234567");
    assert_eq!(item.group_key(), "1234567");
}

#[rstest]
fn test_work_item_payload_uses_camel_case() {
    let payload = WorkItem::new(105).payload().unwrap();

    assert_eq!(payload, r#"{"blockNum":105}"#);
    let body: WorkItemBody = serde_json::from_str(&payload).unwrap();
    assert_eq!(body.block_num, 105);
}

#[rstest]
#[case("active", CursorStatus::Active)]
#[case("PAUSED", CursorStatus::Paused)]
fn test_cursor_status_from_str(#[case] input: &str, #[case] expected: CursorStatus) {
    assert_eq!(CursorStatus::from_str(input).unwrap(), expected);
    assert_eq!(expected.to_string(), input.to_ascii_lowercase());
}
