use crate::domain::stock::Stock;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// How many stocks a response carries and how they are picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionPolicy {
    /// First two entries of the category list, in table order.
    Fixed,
    /// Three entries drawn uniformly without replacement.
    #[default]
    Random,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown selection policy {0:?} (expected \"fixed\" or \"random\")")]
pub struct ParsePolicyError(String);

impl SelectionPolicy {
    pub fn sample_size(self) -> usize {
        match self {
            SelectionPolicy::Fixed => 2,
            SelectionPolicy::Random => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SelectionPolicy::Fixed => "fixed",
            SelectionPolicy::Random => "random",
        }
    }

    pub fn default_sampler(self) -> Arc<dyn Sampler> {
        match self {
            SelectionPolicy::Fixed => Arc::new(FirstN),
            SelectionPolicy::Random => Arc::new(UniformSample),
        }
    }
}

impl FromStr for SelectionPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" | "deterministic" => Ok(SelectionPolicy::Fixed),
            "random" | "randomized" => Ok(SelectionPolicy::Random),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait Sampler: fmt::Debug + Send + Sync {
    /// Picks at most `n` distinct entries of `stocks`.
    fn sample(&self, stocks: &[Stock], n: usize) -> Vec<Stock>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FirstN;

impl Sampler for FirstN {
    fn sample(&self, stocks: &[Stock], n: usize) -> Vec<Stock> {
        stocks.iter().take(n).copied().collect()
    }
}

/// Uniform sampling without replacement. Each call seeds its own RNG from OS
/// entropy, so no generator state is shared between requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformSample;

impl Sampler for UniformSample {
    fn sample(&self, stocks: &[Stock], n: usize) -> Vec<Stock> {
        let mut rng = StdRng::from_entropy();
        sample_with(stocks, n, &mut rng)
    }
}

/// Returns the whole list, in table order, when `n` covers it.
pub fn sample_with<R: Rng + ?Sized>(stocks: &[Stock], n: usize, rng: &mut R) -> Vec<Stock> {
    if n >= stocks.len() {
        return stocks.to_vec();
    }
    stocks.choose_multiple(rng, n).copied().collect()
}
