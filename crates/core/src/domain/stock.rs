use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stock {
    pub name: &'static str,
    pub ticker: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskCategory {
    Low,
    Medium,
    High,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 3] = [RiskCategory::Low, RiskCategory::Medium, RiskCategory::High];

    /// Lower-cases `raw` and maps it onto a category. Anything unrecognised is
    /// treated as `Medium`; this is never an error.
    pub fn normalize(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "low" => RiskCategory::Low,
            "high" => RiskCategory::High,
            _ => RiskCategory::Medium,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskCategory::Low => "low",
            RiskCategory::Medium => "medium",
            RiskCategory::High => "high",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
