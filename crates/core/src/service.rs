use crate::catalog::Catalog;
use crate::domain::contract::ProfileRequest;
use crate::domain::recommendation::{Profile, RecommendationResponse};
use crate::domain::stock::{RiskCategory, Stock};
use crate::error::RecommendError;
use crate::selection::{Sampler, SelectionPolicy};
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct RecommendationService {
    catalog: Catalog,
    policy: SelectionPolicy,
    sampler: Arc<dyn Sampler>,
}

impl RecommendationService {
    pub fn new(catalog: Catalog, policy: SelectionPolicy) -> Self {
        Self {
            catalog,
            policy,
            sampler: policy.default_sampler(),
        }
    }

    /// Replaces the policy's sampler, keeping its sample size.
    pub fn with_sampler(mut self, sampler: Arc<dyn Sampler>) -> Self {
        self.sampler = sampler;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn recommend(&self, body: &[u8]) -> Result<RecommendationResponse, RecommendError> {
        let request = ProfileRequest::from_slice(body)?;
        self.recommend_profile(request.validate_and_into_profile()?)
    }

    pub fn recommend_value(
        &self,
        value: serde_json::Value,
    ) -> Result<RecommendationResponse, RecommendError> {
        let request = ProfileRequest::from_value(value)?;
        self.recommend_profile(request.validate_and_into_profile()?)
    }

    pub fn recommend_profile(
        &self,
        profile: Profile,
    ) -> Result<RecommendationResponse, RecommendError> {
        let category = RiskCategory::normalize(&profile.risk_tolerance);
        let candidates = self.catalog.stocks(category);
        if candidates.is_empty() {
            return Err(RecommendError::Internal(format!(
                "no stocks configured for {category} risk"
            )));
        }

        let picked = self
            .sampler
            .sample(candidates, self.policy.sample_size());
        check_selection(candidates, &picked, self.policy.sample_size())?;

        tracing::info!(
            age_group = %profile.age_group,
            experience = %profile.experience,
            horizon = %profile.horizon,
            risk_tolerance = %profile.risk_tolerance,
            %category,
            policy = %self.policy,
            count = picked.len(),
            "recommendations served"
        );

        Ok(RecommendationResponse::new(
            profile,
            category,
            self.policy,
            picked,
        ))
    }
}

impl Default for RecommendationService {
    fn default() -> Self {
        Self::new(Catalog::builtin(), SelectionPolicy::default())
    }
}

fn check_selection(candidates: &[Stock], picked: &[Stock], n: usize) -> Result<(), RecommendError> {
    if picked.len() > n.min(candidates.len()) {
        return Err(RecommendError::Internal(format!(
            "sampler returned {} stocks, at most {} allowed",
            picked.len(),
            n.min(candidates.len())
        )));
    }

    let mut seen = HashSet::with_capacity(picked.len());
    for stock in picked {
        if !candidates.contains(stock) {
            return Err(RecommendError::Internal(format!(
                "sampler returned {} which is not in the category list",
                stock.ticker
            )));
        }
        if !seen.insert(stock.ticker) {
            return Err(RecommendError::Internal(format!(
                "sampler returned {} twice",
                stock.ticker
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::FirstN;
    use serde_json::json;

    const BODY: &str =
        r#"{"age_group":"25-35","experience":"beginner","horizon":"5 years","risk_tolerance":"LOW"}"#;

    fn body_with_risk(risk: &str) -> Vec<u8> {
        json!({
            "age_group": "35-45",
            "experience": "intermediate",
            "horizon": "10 years",
            "risk_tolerance": risk,
        })
        .to_string()
        .into_bytes()
    }

    #[derive(Debug)]
    struct Repeating;

    impl Sampler for Repeating {
        fn sample(&self, stocks: &[Stock], _n: usize) -> Vec<Stock> {
            vec![stocks[0], stocks[0]]
        }
    }

    #[derive(Debug)]
    struct Foreign;

    impl Sampler for Foreign {
        fn sample(&self, _stocks: &[Stock], _n: usize) -> Vec<Stock> {
            vec![Stock {
                name: "Elsewhere",
                ticker: "ELSE.NS",
                sector: None,
            }]
        }
    }

    #[test]
    fn echoes_profile_and_uses_lowercased_category() {
        let service = RecommendationService::new(Catalog::builtin(), SelectionPolicy::Random);
        let response = service.recommend(BODY.as_bytes()).unwrap();

        assert!(response.success);
        assert_eq!(response.profile.risk_tolerance, "LOW");
        assert_eq!(response.profile.age_group, "25-35");
        assert_eq!(response.risk_category, RiskCategory::Low);
        assert_eq!(response.count, 3);
        assert_eq!(response.message, "Found 3 low risk recommendations");

        let low = Catalog::builtin().stocks(RiskCategory::Low);
        assert!(response.recommendations.iter().all(|s| low.contains(s)));
    }

    #[test]
    fn unknown_category_falls_back_to_medium() {
        let service = RecommendationService::new(Catalog::builtin(), SelectionPolicy::Fixed);
        let medium = Catalog::builtin().stocks(RiskCategory::Medium);
        for risk in ["moderate", "MEDIUM", "yolo", " high"] {
            let response = service.recommend(&body_with_risk(risk)).unwrap();
            assert_eq!(response.risk_category, RiskCategory::Medium, "risk={risk}");
            assert_eq!(response.recommendations, medium[..2].to_vec());
            assert_eq!(response.profile.risk_tolerance, risk);
        }
    }

    #[test]
    fn fixed_policy_is_byte_identical() {
        let service = RecommendationService::new(Catalog::builtin(), SelectionPolicy::Fixed);
        let a = serde_json::to_vec(&service.recommend(BODY.as_bytes()).unwrap()).unwrap();
        let b = serde_json::to_vec(&service.recommend(BODY.as_bytes()).unwrap()).unwrap();
        assert_eq!(a, b);

        let value: serde_json::Value = serde_json::from_slice(&a).unwrap();
        assert_eq!(value["policy"], "fixed");
        assert_eq!(value["recommendations"][0]["name"], "HDFC Bank");
        assert_eq!(value["recommendations"][1]["name"], "Infosys");
        assert_eq!(value["count"], 2);
    }

    #[test]
    fn random_policy_stays_within_category() {
        let service = RecommendationService::new(Catalog::builtin(), SelectionPolicy::Random);
        let high = Catalog::builtin().stocks(RiskCategory::High);
        for _ in 0..200 {
            let response = service.recommend(&body_with_risk("High")).unwrap();
            assert_eq!(response.recommendations.len(), 3);
            let tickers: HashSet<_> = response.recommendations.iter().map(|s| s.ticker).collect();
            assert_eq!(tickers.len(), 3);
            assert!(response.recommendations.iter().all(|s| high.contains(s)));
        }
    }

    #[test]
    fn injected_sampler_makes_random_policy_deterministic() {
        let service = RecommendationService::new(Catalog::builtin(), SelectionPolicy::Random)
            .with_sampler(Arc::new(FirstN));
        let response = service.recommend(BODY.as_bytes()).unwrap();
        let low = Catalog::builtin().stocks(RiskCategory::Low);
        assert_eq!(response.recommendations, low[..3].to_vec());
    }

    #[test]
    fn short_category_returns_full_list() {
        const ONE: &[Stock] = &[Stock {
            name: "Only",
            ticker: "ONLY.NS",
            sector: Some("Utilities"),
        }];
        let catalog = Catalog::new(ONE, ONE, ONE);
        let service = RecommendationService::new(catalog, SelectionPolicy::Random);
        let response = service.recommend(BODY.as_bytes()).unwrap();
        assert_eq!(response.recommendations, ONE.to_vec());
        assert_eq!(response.message, "Found 1 low risk recommendation");
    }

    #[test]
    fn empty_category_is_internal_fault() {
        let catalog = Catalog::new(&[], Catalog::builtin().stocks(RiskCategory::Medium), &[]);
        let service = RecommendationService::new(catalog, SelectionPolicy::Fixed);
        let err = service.recommend(BODY.as_bytes()).unwrap_err();
        assert!(matches!(err, RecommendError::Internal(_)));
    }

    #[test]
    fn misbehaving_sampler_is_internal_fault() {
        let samplers: [Arc<dyn Sampler>; 2] = [Arc::new(Repeating), Arc::new(Foreign)];
        for sampler in samplers {
            let service = RecommendationService::default().with_sampler(sampler);
            let err = service.recommend(BODY.as_bytes()).unwrap_err();
            assert!(matches!(err, RecommendError::Internal(_)), "{err}");
        }
    }

    #[test]
    fn validation_errors_surface_unchanged() {
        let service = RecommendationService::default();
        assert!(matches!(
            service.recommend(b"{}"),
            Err(RecommendError::MissingFields { .. })
        ));
        assert!(matches!(
            service.recommend(b""),
            Err(RecommendError::MalformedPayload(_))
        ));
        assert!(matches!(
            service.recommend_value(json!(["low"])),
            Err(RecommendError::MalformedPayload(_))
        ));
    }

    #[test]
    fn recommend_value_matches_recommend() {
        let service = RecommendationService::new(Catalog::builtin(), SelectionPolicy::Fixed);
        let from_bytes = service.recommend(BODY.as_bytes()).unwrap();
        let from_value = service
            .recommend_value(serde_json::from_str(BODY).unwrap())
            .unwrap();
        assert_eq!(from_bytes.recommendations, from_value.recommendations);
        assert_eq!(from_bytes.profile, from_value.profile);
    }
}
