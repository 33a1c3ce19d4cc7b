use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// NSE symbols the dashboard can analyze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Ticker {
    #[default]
    #[serde(rename = "RELIANCE")]
    Reliance,
    #[serde(rename = "TCS")]
    Tcs,
    #[serde(rename = "INFY")]
    Infy,
    #[serde(rename = "HDFCBANK")]
    HdfcBank,
    #[serde(rename = "ICICIBANK")]
    IciciBank,
}

impl Ticker {
    pub const ALL: [Ticker; 5] = [
        Ticker::Reliance,
        Ticker::Tcs,
        Ticker::Infy,
        Ticker::HdfcBank,
        Ticker::IciciBank,
    ];

    /// Query value sent to the analysis service. Case-sensitive.
    pub fn as_str(self) -> &'static str {
        match self {
            Ticker::Reliance => "RELIANCE",
            Ticker::Tcs => "TCS",
            Ticker::Infy => "INFY",
            Ticker::HdfcBank => "HDFCBANK",
            Ticker::IciciBank => "ICICIBANK",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Ticker::Reliance => "Reliance Industries",
            Ticker::Tcs => "Tata Consultancy Services",
            Ticker::Infy => "Infosys",
            Ticker::HdfcBank => "HDFC Bank",
            Ticker::IciciBank => "ICICI Bank",
        }
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Ticker {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ticker::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown ticker: {s:?}"))
    }
}
