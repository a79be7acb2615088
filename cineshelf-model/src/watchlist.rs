//! Watchlist membership types.
//!
//! A watchlist entry ties a user to exactly one catalog item. The target is
//! a tagged variant rather than a pair of nullable references, so a row can
//! never point at both a movie and a show, or at neither.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::MediaKind;

/// The catalog item a watchlist entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum WatchTarget {
    Movie(i64),
    Show(i64),
}

impl WatchTarget {
    pub fn kind(&self) -> MediaKind {
        match self {
            WatchTarget::Movie(_) => MediaKind::Movie,
            WatchTarget::Show(_) => MediaKind::Show,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            WatchTarget::Movie(id) | WatchTarget::Show(id) => *id,
        }
    }
}

/// What a toggle call did to the membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleOutcome {
    Added,
    Removed,
}

/// A watchlist row hydrated with the target's display fields.
#[derive(Debug, Clone, Serialize)]
pub struct WatchlistItem {
    pub id: i64,
    pub target: WatchTarget,
    pub title: String,
    pub poster: String,
    pub added_on: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_target_serializes_tagged() {
        let json = serde_json::to_string(&WatchTarget::Movie(7)).unwrap();
        assert_eq!(json, r#"{"type":"movie","id":7}"#);

        let back: WatchTarget =
            serde_json::from_str(r#"{"type":"show","id":12}"#).unwrap();
        assert_eq!(back, WatchTarget::Show(12));
    }

    #[test]
    fn watch_target_exposes_kind_and_id() {
        assert_eq!(WatchTarget::Show(3).kind(), MediaKind::Show);
        assert_eq!(WatchTarget::Show(3).id(), 3);
    }
}
