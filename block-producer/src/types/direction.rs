use crate::types::constant::{BACKWARD_CURSOR_KEY, FORWARD_CURSOR_KEY};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumIter};

/// Scan mode of a producer instance.
///
/// A single process serves exactly one direction for its whole lifetime.
/// Forward scans walk up towards the frontier reported by the upstream source,
/// backward scans walk down towards a configured floor.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanDirection {
    #[strum(serialize = "forward")]
    Forward,
    #[strum(serialize = "backward")]
    Backward,
}

impl ScanDirection {
    /// Key under which the cursor for this direction is persisted.
    pub fn storage_key(self) -> &'static str {
        match self {
            ScanDirection::Forward => FORWARD_CURSOR_KEY,
            ScanDirection::Backward => BACKWARD_CURSOR_KEY,
        }
    }

    pub fn from_storage_key(key: &str) -> Option<Self> {
        match key {
            FORWARD_CURSOR_KEY => Some(ScanDirection::Forward),
            BACKWARD_CURSOR_KEY => Some(ScanDirection::Backward),
            _ => None,
        }
    }

    /// Block that follows `block_num` in this direction.
    ///
    /// Returns `None` when the step leaves the u64 range: above `u64::MAX` going forward,
    /// below zero going backward.
    pub fn step(self, block_num: u64) -> Option<u64> {
        match self {
            ScanDirection::Forward => block_num.checked_add(1),
            ScanDirection::Backward => block_num.checked_sub(1),
        }
    }

    /// Whether `candidate` lies beyond the bound of the current pass.
    ///
    /// Forward scans are bounded by the frontier (inclusive), backward scans by the
    /// configured floor (inclusive).
    pub fn is_past_boundary(self, candidate: u64, frontier: u64, end_block: u64) -> bool {
        match self {
            ScanDirection::Forward => candidate > frontier,
            ScanDirection::Backward => candidate < end_block,
        }
    }
}

impl FromStr for ScanDirection {
    type Err = String;

    /// Accepts `forward`/`backward` and the legacy `up`/`down` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forward" | "up" => Ok(ScanDirection::Forward),
            "backward" | "down" => Ok(ScanDirection::Backward),
            other => Err(format!("invalid scan direction '{}', expected one of: forward, backward, up, down", other)),
        }
    }
}
