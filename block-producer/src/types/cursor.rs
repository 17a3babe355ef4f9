use crate::types::direction::ScanDirection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::Display;

/// Lifecycle tag of a cursor record. Informational only for the scan loop.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorStatus {
    #[strum(serialize = "active")]
    Active,
    #[strum(serialize = "paused")]
    Paused,
}

impl FromStr for CursorStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(CursorStatus::Active),
            "paused" => Ok(CursorStatus::Paused),
            other => Err(format!("invalid cursor status '{}', expected one of: active, paused", other)),
        }
    }
}

/// Persisted cursor of one scan direction.
///
/// `block_num` is the last block that was successfully handed to the queue; the next
/// candidate is obtained with [`ScanDirection::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorRecord {
    pub direction: ScanDirection,
    pub block_num: u64,
    pub status: CursorStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CursorRecord {
    pub fn new(direction: ScanDirection, block_num: u64) -> Self {
        let now = Utc::now();
        Self { direction, block_num, status: CursorStatus::Active, created_at: now, updated_at: now }
    }
}
