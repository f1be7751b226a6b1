use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    /// Maps the loose vocabulary accepted on import. Unrecognized or absent
    /// input falls back to Long.
    pub fn from_loose(s: Option<&str>) -> Self {
        match s.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("sell") | Some("s") | Some("short") => Direction::Short,
            Some("buy") | Some("b") | Some("long") => Direction::Long,
            _ => Direction::Long,
        }
    }

    pub fn sign(&self) -> f64 {
        match self {
            Direction::Long => 1.0,
            Direction::Short => -1.0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Long => write!(f, "long"),
            Direction::Short => write!(f, "short"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "long" => Ok(Direction::Long),
            "short" => Ok(Direction::Short),
            _ => Err(format!("Unknown direction: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loose_vocabulary_maps_to_long_and_short() {
        assert_eq!(Direction::from_loose(Some("buy")), Direction::Long);
        assert_eq!(Direction::from_loose(Some("B")), Direction::Long);
        assert_eq!(Direction::from_loose(Some("sell")), Direction::Short);
        assert_eq!(Direction::from_loose(Some("S")), Direction::Short);
        assert_eq!(Direction::from_loose(Some("SHORT")), Direction::Short);
    }

    #[test]
    fn unrecognized_or_absent_defaults_to_long() {
        assert_eq!(Direction::from_loose(Some("hedge")), Direction::Long);
        assert_eq!(Direction::from_loose(None), Direction::Long);
    }
}
