//! Token-usage accounting for enrichment calls.
//!
//! Usage is an observability concern only: the pipeline accumulates it per
//! run so the operator can see what the batch cost.

use serde::{Deserialize, Serialize};

/// gpt-4o-mini list price, USD per million input tokens.
const INPUT_USD_PER_MTOK: f64 = 0.150;
/// gpt-4o-mini list price, USD per million output tokens.
const OUTPUT_USD_PER_MTOK: f64 = 0.600;

/// Token counts reported by one or more completion calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

impl Usage {
    /// Fold another call's counts into this accumulator.
    pub fn absorb(&mut self, other: Usage) {
        self.prompt_tokens += other.prompt_tokens;
        self.completion_tokens += other.completion_tokens;
        self.total_tokens += other.total_tokens;
    }

    /// Estimated spend in USD at gpt-4o-mini list prices.
    pub fn estimated_cost_usd(&self) -> f64 {
        let input = (self.prompt_tokens as f64 / 1_000_000.0) * INPUT_USD_PER_MTOK;
        let output = (self.completion_tokens as f64 / 1_000_000.0) * OUTPUT_USD_PER_MTOK;
        input + output
    }
}
