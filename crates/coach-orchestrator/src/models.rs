use coach_core::{DetectedPattern, TradeDirection, TradePlan, Verdict};
use risk_validator::ValidationResult;
use serde::{Deserialize, Serialize};
use strategy_analyzer::StrategyAssessment;

/// Combined outcome of risk validation and strategy analysis for one plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeReview {
    pub ticker: String,
    pub can_execute: bool,
    pub overall_verdict: Verdict,
    pub risk_validation: ValidationResult,
    pub strategy_assessment: StrategyAssessment,
    pub dangerous_patterns: Vec<DetectedPattern>,
    pub plan: TradePlan,
}

/// A concrete entry setup derived from support/resistance levels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntrySetup {
    pub direction: TradeDirection,
    pub optimal_entry: f64,
    pub aggressive_entry: f64,
    pub conservative_entry: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub risk_reward_ratio: f64,
    pub reasoning: String,
}

/// Entry recommendation: a numeric setup, or stand aside
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EntrySuggestion {
    Setup(EntrySetup),
    Hold { reasoning: String },
}

/// Position-size recommendation with conservative/aggressive variants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionSizing {
    pub recommended_size: u32,
    pub conservative_size: u32,
    pub aggressive_size: u32,
    pub risk_per_share: f64,
    pub dollar_risk: f64,
    pub risk_percent: f64,
    pub position_value: f64,
    pub position_percent: f64,
    pub explanation: String,
}

/// Standalone risk-reward verdict for an entry/stop/target triple
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskRewardCheck {
    pub is_valid: bool,
    pub rr_ratio: f64,
    pub message: String,
    pub risk_amount: f64,
    pub reward_amount: f64,
    pub trade_direction: TradeDirection,
    pub recommendation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Coach,
}

/// One entry in the session's append-only conversation log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub content: String,
}

/// Reply from one `chat` call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    pub conversation_turn: usize,
    pub context_available: bool,
}
