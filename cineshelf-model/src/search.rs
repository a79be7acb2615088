//! Live-search result shape.

use serde::{Deserialize, Serialize};

use crate::catalog::MediaKind;

/// One entry in the merged live-search response.
///
/// Serialized with `type` as the kind tag so the payload is a flat
/// `{id, title, poster, type}` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: i64,
    pub title: String,
    pub poster: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_hit_uses_type_tag() {
        let hit = SearchHit {
            id: 4,
            title: "Night Train".into(),
            poster: "/media/posters/night-train.jpg".into(),
            kind: MediaKind::Movie,
        };

        let json = serde_json::to_value(&hit).unwrap();
        assert_eq!(json["type"], "movie");
        assert_eq!(json["id"], 4);
    }
}
