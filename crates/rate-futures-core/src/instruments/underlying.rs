use serde::{Deserialize, Serialize};

use super::asset::AssetInfo;
use super::bond::Bond;
use super::enums::UnderlyingType;

/// What a future is written on.
///
/// An underlying may be a bare reference (an index, a rate) with no asset
/// behind it, or wrap an asset. Only a bond asset can be priced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Underlying {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underlying_type: Option<UnderlyingType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<UnderlyingAsset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnderlyingAsset {
    Bond(Bond),
    Other(AssetInfo),
}

impl Underlying {
    pub fn bond(&self) -> Option<&Bond> {
        match &self.asset {
            Some(UnderlyingAsset::Bond(bond)) => Some(bond),
            _ => None,
        }
    }

    pub fn type_name(&self) -> Option<String> {
        self.underlying_type.and_then(|t| {
            serde_json::to_value(t)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
        })
    }
}
