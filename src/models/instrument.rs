use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Account-currency value of one pip on a standard lot.
pub const PIP_VALUE_PER_LOT: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instrument {
    #[serde(rename = "EURUSD")]
    EurUsd,
    #[serde(rename = "GBPUSD")]
    GbpUsd,
    #[serde(rename = "USDJPY")]
    UsdJpy,
    #[serde(rename = "GBPJPY")]
    GbpJpy,
    #[serde(rename = "AUDUSD")]
    AudUsd,
    #[serde(rename = "USDCAD")]
    UsdCad,
    #[serde(rename = "EURGBP")]
    EurGbp,
}

impl Instrument {
    pub const ALL: [Instrument; 7] = [
        Instrument::EurUsd,
        Instrument::GbpUsd,
        Instrument::UsdJpy,
        Instrument::GbpJpy,
        Instrument::AudUsd,
        Instrument::UsdCad,
        Instrument::EurGbp,
    ];

    /// Compact symbol, e.g. `EURUSD`.
    pub fn symbol(&self) -> &'static str {
        match self {
            Instrument::EurUsd => "EURUSD",
            Instrument::GbpUsd => "GBPUSD",
            Instrument::UsdJpy => "USDJPY",
            Instrument::GbpJpy => "GBPJPY",
            Instrument::AudUsd => "AUDUSD",
            Instrument::UsdCad => "USDCAD",
            Instrument::EurGbp => "EURGBP",
        }
    }

    pub fn pip_size(&self) -> f64 {
        match self {
            Instrument::UsdJpy | Instrument::GbpJpy => 0.01,
            _ => 0.0001,
        }
    }

    /// Price move expressed in pips.
    pub fn pips(&self, price_delta: f64) -> f64 {
        price_delta / self.pip_size()
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sym = self.symbol();
        f.pad(&format!("{}/{}", &sym[..3], &sym[3..]))
    }
}

impl FromStr for Instrument {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .trim()
            .chars()
            .filter(|c| *c != '/')
            .collect::<String>()
            .to_ascii_uppercase();
        Instrument::ALL
            .into_iter()
            .find(|i| i.symbol() == compact)
            .ok_or_else(|| ValidationError::UnknownVariant {
                kind: "instrument",
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_slashed_and_compact() {
        assert_eq!("EUR/USD".parse::<Instrument>(), Ok(Instrument::EurUsd));
        assert_eq!("gbpjpy".parse::<Instrument>(), Ok(Instrument::GbpJpy));
    }

    #[test]
    fn rejects_unlisted_pair() {
        assert!("BTCUSD".parse::<Instrument>().is_err());
    }

    #[test]
    fn displays_with_slash() {
        assert_eq!(Instrument::UsdCad.to_string(), "USD/CAD");
        assert_eq!(format!("[{:>9}]", Instrument::EurGbp), "[  EUR/GBP]");
        assert_eq!(format!("[{:<8}]", Instrument::UsdJpy), "[USD/JPY ]");
    }

    #[test]
    fn jpy_pairs_use_two_decimal_pips() {
        assert!((Instrument::GbpJpy.pips(0.56) - 56.0).abs() < 1e-9);
        assert!((Instrument::EurUsd.pips(0.0033) - 33.0).abs() < 1e-9);
    }
}
