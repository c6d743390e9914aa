use serde::{Deserialize, Serialize};

/// Descriptive fields shared by every tradable asset. None of them take
/// part in pricing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isin: Option<String>,
}

impl AssetInfo {
    pub fn with_symbol(symbol: impl Into<String>) -> Self {
        AssetInfo {
            symbol: Some(symbol.into()),
            ..AssetInfo::default()
        }
    }

    /// Best human-readable label: symbol, then name, then ISIN.
    pub fn label(&self) -> Option<&str> {
        self.symbol
            .as_deref()
            .or(self.name.as_deref())
            .or(self.isin.as_deref())
    }
}
