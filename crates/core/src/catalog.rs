use crate::domain::stock::{RiskCategory, Stock};
use serde::Serialize;

const LOW_RISK: &[Stock] = &[
    Stock {
        name: "HDFC Bank",
        ticker: "HDFCBANK.NS",
        sector: Some("Financials"),
    },
    Stock {
        name: "Infosys",
        ticker: "INFY.NS",
        sector: Some("Information Technology"),
    },
    Stock {
        name: "ITC Limited",
        ticker: "ITC.NS",
        sector: Some("Consumer Staples"),
    },
    Stock {
        name: "Tata Consultancy Services",
        ticker: "TCS.NS",
        sector: Some("Information Technology"),
    },
    Stock {
        name: "Hindustan Unilever",
        ticker: "HINDUNILVR.NS",
        sector: Some("Consumer Staples"),
    },
];

const MEDIUM_RISK: &[Stock] = &[
    Stock {
        name: "Reliance Industries",
        ticker: "RELIANCE.NS",
        sector: Some("Energy"),
    },
    Stock {
        name: "Bharti Airtel",
        ticker: "BHARTIARTL.NS",
        sector: Some("Communication Services"),
    },
    Stock {
        name: "ICICI Bank",
        ticker: "ICICIBANK.NS",
        sector: Some("Financials"),
    },
    Stock {
        name: "Larsen & Toubro",
        ticker: "LT.NS",
        sector: Some("Industrials"),
    },
    Stock {
        name: "Axis Bank",
        ticker: "AXISBANK.NS",
        sector: Some("Financials"),
    },
];

const HIGH_RISK: &[Stock] = &[
    Stock {
        name: "Zomato",
        ticker: "ZOMATO.NS",
        sector: Some("Consumer Discretionary"),
    },
    Stock {
        name: "Paytm",
        ticker: "PAYTM.NS",
        sector: Some("Financials"),
    },
    Stock {
        name: "Nykaa",
        ticker: "NYKAA.NS",
        sector: Some("Consumer Discretionary"),
    },
    Stock {
        name: "Adani Enterprises",
        ticker: "ADANIENT.NS",
        sector: Some("Industrials"),
    },
    Stock {
        name: "Tata Motors",
        ticker: "TATAMOTORS.NS",
        sector: Some("Consumer Discretionary"),
    },
];

/// Per-category candidate lists. Read-only for the life of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Catalog {
    low: &'static [Stock],
    medium: &'static [Stock],
    high: &'static [Stock],
}

pub static BUILTIN: Catalog = Catalog::new(LOW_RISK, MEDIUM_RISK, HIGH_RISK);

impl Catalog {
    pub const fn new(
        low: &'static [Stock],
        medium: &'static [Stock],
        high: &'static [Stock],
    ) -> Self {
        Self { low, medium, high }
    }

    pub fn builtin() -> Self {
        BUILTIN
    }

    pub fn stocks(&self, category: RiskCategory) -> &'static [Stock] {
        match category {
            RiskCategory::Low => self.low,
            RiskCategory::Medium => self.medium,
            RiskCategory::High => self.high,
        }
    }
}
