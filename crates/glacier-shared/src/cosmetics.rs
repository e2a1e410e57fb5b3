use std::fmt::Display;

use crate::id::CosmeticId;

/// The three cosmetic families the store knows about. The wire name doubles
/// as the path segment of the per-kind listing endpoint.
#[derive(
    Debug,
    serde::Serialize,
    serde::Deserialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::EnumIter,
    Default,
)]
#[serde(rename_all = "lowercase")]
pub enum CosmeticKind {
    #[default]
    Capes,
    Wings,
    Icons,
}

impl CosmeticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CosmeticKind::Capes => "capes",
            CosmeticKind::Wings => "wings",
            CosmeticKind::Icons => "icons",
        }
    }
}

impl Display for CosmeticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A published store item as returned by the per-kind listing endpoints
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct StoreItem {
    pub id: CosmeticId,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub price: u32,
    #[serde(default)]
    pub normal_price: u32,
    #[serde(default)]
    pub sale_price: u32,
    #[serde(default)]
    pub texture: String,
    #[serde(default)]
    pub preview: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Listing responses key the array by the kind name (`{"capes": [...]}`),
/// so one envelope with three optional arrays covers all of them.
#[derive(Debug, serde::Deserialize, Default)]
pub struct StoreItemsResponse {
    #[serde(default)]
    pub capes: Option<Vec<StoreItem>>,
    #[serde(default)]
    pub wings: Option<Vec<StoreItem>>,
    #[serde(default)]
    pub icons: Option<Vec<StoreItem>>,
}

impl StoreItemsResponse {
    pub fn into_items(self, kind: CosmeticKind) -> Vec<StoreItem> {
        let items = match kind {
            CosmeticKind::Capes => self.capes,
            CosmeticKind::Wings => self.wings,
            CosmeticKind::Icons => self.icons,
        };
        items.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::capes(CosmeticKind::Capes, "capes")]
    #[case::wings(CosmeticKind::Wings, "wings")]
    #[case::icons(CosmeticKind::Icons, "icons")]
    fn kind_wire_names(#[case] kind: CosmeticKind, #[case] expect: &str) {
        assert_eq!(kind.as_str(), expect);
        assert_eq!(serde_json::to_string(&kind).unwrap(), format!("\"{expect}\""));
    }

    #[test]
    fn listing_envelope_selects_the_requested_kind() {
        let response: StoreItemsResponse = serde_json::from_str(
            r#"{"wings":[{"id":3,"name":"Ember","category":"fire","price":500}]}"#,
        )
        .unwrap();

        let items = response.into_items(CosmeticKind::Wings);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Ember");
        assert_eq!(u64::from(items[0].id), 3);
    }

    #[test]
    fn listing_envelope_missing_kind_reads_as_empty() {
        let response: StoreItemsResponse = serde_json::from_str(r#"{"capes":[]}"#).unwrap();
        assert!(response.into_items(CosmeticKind::Icons).is_empty());
    }
}
