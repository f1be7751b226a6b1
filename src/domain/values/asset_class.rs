use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Instrument class of a trade. Unrecognized but non-empty source vocabulary
/// is preserved under `Other` rather than discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetClass {
    Stock,
    Crypto,
    Forex,
    Futures,
    Options,
    Other(String),
}

impl AssetClass {
    /// Maps the loose vocabulary accepted on import. Absent or empty input
    /// falls back to Stock.
    pub fn from_loose(s: Option<&str>) -> Self {
        let v = match s.map(|v| v.trim().to_lowercase()) {
            Some(v) if !v.is_empty() => v,
            _ => return AssetClass::Stock,
        };
        match v.as_str() {
            "stock" | "equities" | "equity" | "shares" => AssetClass::Stock,
            "crypto" | "coin" | "cryptocurrency" => AssetClass::Crypto,
            "forex" | "fx" | "currency" => AssetClass::Forex,
            "futures" | "future" => AssetClass::Futures,
            "options" | "option" => AssetClass::Options,
            _ => AssetClass::Other(v),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            AssetClass::Stock => "stock",
            AssetClass::Crypto => "crypto",
            AssetClass::Forex => "forex",
            AssetClass::Futures => "futures",
            AssetClass::Options => "options",
            AssetClass::Other(s) => s,
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for AssetClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AssetClass {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(AssetClass::from_loose(Some(&s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_maps_to_canonical_classes() {
        assert_eq!(AssetClass::from_loose(Some("equities")), AssetClass::Stock);
        assert_eq!(AssetClass::from_loose(Some("FX")), AssetClass::Forex);
        assert_eq!(AssetClass::from_loose(Some("coin")), AssetClass::Crypto);
        assert_eq!(AssetClass::from_loose(Some("future")), AssetClass::Futures);
        assert_eq!(AssetClass::from_loose(Some("option")), AssetClass::Options);
    }

    #[test]
    fn unrecognized_value_passes_through_lowercased() {
        assert_eq!(
            AssetClass::from_loose(Some("Bonds")),
            AssetClass::Other("bonds".into())
        );
    }

    #[test]
    fn absent_or_empty_defaults_to_stock() {
        assert_eq!(AssetClass::from_loose(None), AssetClass::Stock);
        assert_eq!(AssetClass::from_loose(Some("  ")), AssetClass::Stock);
    }
}
