//! Ad record entity
//!
//! One listing block maps to one `AdRecord`. Every field is optional: a
//! field is present only when the corresponding fragment was found in the
//! source markup. Structural equality over all fields is the sole identity
//! mechanism — there is no ad ID on the listing page.

use serde::{Deserialize, Serialize};

/// A single classified ad as extracted from the listing page.
///
/// Field declaration order is the display order used in notification
/// emails; it carries no meaning for equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Ordered sequence of ads from one page fetch. Not deduplicated.
pub type AdSet = Vec<AdRecord>;

impl AdRecord {
    /// Present fields as `(label, value)` pairs in display order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("title", &self.title),
            ("size", &self.size),
            ("location", &self.location),
            ("price", &self.price),
            ("description", &self.description),
            ("link", &self.link),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().map(|v| (label, v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_are_omitted_from_json() {
        let ad = AdRecord {
            title: Some("Stan u centru".to_string()),
            price: Some("650 €/mj".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_string(&ad).unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("\"price\""));
        assert!(!json.contains("\"size\""));
        assert!(!json.contains("\"location\""));
        assert!(!json.contains("\"description\""));
        assert!(!json.contains("\"link\""));
    }

    #[test]
    fn fields_iterates_in_display_order() {
        let ad = AdRecord {
            title: Some("A".to_string()),
            size: Some("50 m2".to_string()),
            link: Some("https://example.com/a".to_string()),
            ..Default::default()
        };

        let labels: Vec<_> = ad.fields().map(|(label, _)| label).collect();
        assert_eq!(labels, vec!["title", "size", "link"]);
    }

    #[test]
    fn equality_is_structural() {
        let a = AdRecord {
            title: Some("A".to_string()),
            ..Default::default()
        };
        let b = AdRecord {
            title: Some("A".to_string()),
            ..Default::default()
        };
        let c = AdRecord {
            title: Some("A".to_string()),
            price: Some("1".to_string()),
            ..Default::default()
        };

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
