use chrono::{DateTime, Utc};
use coach_core::Severity;
use serde::{Deserialize, Serialize};

/// Hard and recommended risk thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskLimits {
    /// Maximum account risk per trade, percent
    pub max_risk_percent: f64,
    /// Recommended account risk per trade, percent
    pub recommended_risk_percent: f64,
    /// Minimum acceptable risk-reward ratio
    pub min_risk_reward_ratio: f64,
    /// Recommended risk-reward ratio
    pub recommended_risk_reward_ratio: f64,
    /// Maximum position value as percent of account
    pub max_position_size_percent: f64,
}

impl Default for RiskLimits {
    fn default() -> Self {
        Self {
            max_risk_percent: 3.0,
            recommended_risk_percent: 2.0,
            min_risk_reward_ratio: 1.5,
            recommended_risk_reward_ratio: 2.0,
            max_position_size_percent: 10.0,
        }
    }
}

/// A rule violation that blocks or degrades the plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskIssue {
    pub severity: Severity,
    pub issue: String,
    pub message: String,
    pub consequence: String,
    pub fix: String,
}

/// A non-blocking concern with a suggested improvement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskWarning {
    pub issue: String,
    pub message: String,
    pub suggestion: String,
}

/// An aspect of the plan that passed its check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskApproval {
    pub aspect: String,
    pub status: String,
    pub value: String,
    pub comment: String,
}

/// Full outcome of one validation pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub severity: Severity,
    pub can_execute: bool,
    pub issues: Vec<RiskIssue>,
    pub warnings: Vec<RiskWarning>,
    pub approvals: Vec<RiskApproval>,
    pub summary: String,
    pub checked_at: DateTime<Utc>,
}

/// Standalone risk-reward verdict
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskRewardAssessment {
    pub is_valid: bool,
    pub ratio: f64,
    pub message: String,
}

/// Position-sizing breakdown against the limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionSizingCheck {
    pub is_acceptable: bool,
    pub current_size: u32,
    pub recommended_size: u32,
    pub max_size: u32,
    pub risk_percent: f64,
    pub total_risk: f64,
    pub message: String,
}
