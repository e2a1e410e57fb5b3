use std::fmt::Display;

/// Server side id of a cosmetic item
#[derive(
    Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord, Copy, Hash,
)]
pub struct CosmeticId(u64);

impl From<u64> for CosmeticId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<CosmeticId> for u64 {
    fn from(value: CosmeticId) -> Self {
        value.0
    }
}

impl Display for CosmeticId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
