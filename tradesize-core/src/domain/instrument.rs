use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Stable identifier of an instrument within a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstrumentId(pub String);

impl InstrumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InstrumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A tradable contract: display name plus units of the underlying per lot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Instrument {
    pub id: InstrumentId,
    pub name: String,
    pub lot_size: f64,
}

impl Instrument {
    pub fn new(id: impl Into<InstrumentId>, name: impl Into<String>, lot_size: f64) -> Self {
        Self { id: id.into(), name: name.into(), lot_size }
    }

    /// Validate user input for a new instrument.
    ///
    /// Returns the trimmed name and parsed lot size. The name must be
    /// non-blank and the lot size a finite number greater than zero.
    pub fn parse_user_input(name: &str, lot_size_raw: &str) -> Result<(String, f64), InstrumentError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(InstrumentError::EmptyName);
        }

        let raw = lot_size_raw.trim();
        if raw.is_empty() {
            return Err(InstrumentError::MissingLotSize);
        }

        let lot_size: f64 = raw
            .parse()
            .map_err(|_| InstrumentError::InvalidLotSize { raw: raw.to_string() })?;
        if !lot_size.is_finite() || lot_size <= 0.0 {
            return Err(InstrumentError::InvalidLotSize { raw: raw.to_string() });
        }

        Ok((name.to_string(), lot_size))
    }

    /// The instruments every session starts with.
    pub fn defaults() -> Vec<Instrument> {
        vec![
            Instrument::new("eth", "ETH Futures", 0.01),
            Instrument::new("btc", "BTC Futures", 0.001),
            Instrument::new("sol", "SOL Futures", 1.0),
            Instrument::new("nifty", "Nifty Options", 25.0),
        ]
    }
}

impl From<String> for InstrumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum InstrumentError {
    #[error("instrument name is empty")]
    EmptyName,

    #[error("lot size is required")]
    MissingLotSize,

    #[error("lot size '{raw}' is not a positive number")]
    InvalidLotSize { raw: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_seed_table() {
        let defaults = Instrument::defaults();
        assert_eq!(defaults.len(), 4);
        assert_eq!(defaults[0], Instrument::new("eth", "ETH Futures", 0.01));
        assert_eq!(defaults[1].lot_size, 0.001);
        assert_eq!(defaults[2].name, "SOL Futures");
        assert_eq!(defaults[3].id.as_str(), "nifty");
        assert_eq!(defaults[3].lot_size, 25.0);
    }

    #[test]
    fn parse_user_input_trims_and_parses() {
        let (name, lot) = Instrument::parse_user_input("  Gold Micro ", " 0.1 ").unwrap();
        assert_eq!(name, "Gold Micro");
        assert_eq!(lot, 0.1);
    }

    #[test]
    fn parse_user_input_rejects_blank_name() {
        assert_eq!(Instrument::parse_user_input("   ", "1"), Err(InstrumentError::EmptyName));
    }

    #[test]
    fn parse_user_input_rejects_missing_or_bad_lot() {
        assert_eq!(Instrument::parse_user_input("X", ""), Err(InstrumentError::MissingLotSize));
        assert!(matches!(
            Instrument::parse_user_input("X", "abc"),
            Err(InstrumentError::InvalidLotSize { .. })
        ));
        assert!(matches!(
            Instrument::parse_user_input("X", "0"),
            Err(InstrumentError::InvalidLotSize { .. })
        ));
        assert!(matches!(
            Instrument::parse_user_input("X", "-2"),
            Err(InstrumentError::InvalidLotSize { .. })
        ));
        assert!(matches!(
            Instrument::parse_user_input("X", "inf"),
            Err(InstrumentError::InvalidLotSize { .. })
        ));
    }

    #[test]
    fn id_serializes_as_plain_string() {
        let json = serde_json::to_string(&InstrumentId::new("eth")).unwrap();
        assert_eq!(json, "\"eth\"");
    }
}
