use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachConfig {
    /// Account percentage risked by default in position sizing
    pub default_risk_percent: f64, // 2%
    /// How many recent conversation turns reach the model
    pub history_window: usize, // 10
}

impl CoachConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            default_risk_percent: env::var("COACH_DEFAULT_RISK_PERCENT")
                .unwrap_or_else(|_| "2.0".to_string())
                .parse()?,
            history_window: env::var("COACH_HISTORY_WINDOW")
                .unwrap_or_else(|_| "10".to_string())
                .parse()?,
        })
    }
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            default_risk_percent: 2.0,
            history_window: 10,
        }
    }
}
