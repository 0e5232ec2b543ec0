use crate::domain::stock::{RiskCategory, Stock};
use crate::selection::SelectionPolicy;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub age_group: String,
    pub experience: String,
    pub horizon: String,
    pub risk_tolerance: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResponse {
    pub success: bool,
    pub profile: Profile,
    pub risk_category: RiskCategory,
    pub policy: SelectionPolicy,
    pub recommendations: Vec<Stock>,
    pub count: usize,
    pub message: String,
}

impl RecommendationResponse {
    pub fn new(
        profile: Profile,
        risk_category: RiskCategory,
        policy: SelectionPolicy,
        recommendations: Vec<Stock>,
    ) -> Self {
        let count = recommendations.len();
        let noun = if count == 1 {
            "recommendation"
        } else {
            "recommendations"
        };
        Self {
            success: true,
            profile,
            risk_category,
            policy,
            message: format!("Found {count} {risk_category} risk {noun}"),
            recommendations,
            count,
        }
    }
}
