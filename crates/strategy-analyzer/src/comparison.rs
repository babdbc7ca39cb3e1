use coach_core::{AnalystSignal, GeneratedSignal, TradeDirection, TradePlan};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DifferenceSeverity {
    Medium,
    High,
}

/// One divergence between the user's plan and the generated signal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalDifference {
    pub aspect: String,
    pub user: String,
    pub agent: String,
    #[serde(default)]
    pub difference: Option<String>,
    pub severity: DifferenceSeverity,
}

/// How closely the user's plan tracks the pipeline's own signal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalComparison {
    pub agreements: Vec<String>,
    pub differences: Vec<SignalDifference>,
    /// Share of compared aspects in agreement, 0-100
    pub alignment_score: f64,
}

fn direction_matches(direction: TradeDirection, action: AnalystSignal) -> bool {
    matches!(
        (direction, action),
        (TradeDirection::Long, AnalystSignal::Buy)
            | (TradeDirection::Short, AnalystSignal::Sell)
            | (TradeDirection::Hold, AnalystSignal::Hold)
    )
}

/// Compare a user plan with the auto-generated signal aspect by aspect.
pub fn compare_with_signal(plan: &TradePlan, signal: &GeneratedSignal) -> SignalComparison {
    let mut agreements = Vec::new();
    let mut differences = Vec::new();

    if direction_matches(plan.direction, signal.action) {
        agreements.push("Direction matches agent recommendation".to_string());
    } else {
        differences.push(SignalDifference {
            aspect: "Direction".to_string(),
            user: plan.direction.as_str().to_string(),
            agent: signal.action.as_str().to_string(),
            difference: None,
            severity: DifferenceSeverity::High,
        });
    }

    if let (Some(user_entry), Some(agent_entry)) = (plan.entry_price, signal.entry_price) {
        if agent_entry > 0.0 {
            let entry_diff_pct = (user_entry - agent_entry).abs() / agent_entry * 100.0;
            if entry_diff_pct <= 2.0 {
                agreements.push("Entry within 2% of agent recommendation".to_string());
            } else {
                differences.push(SignalDifference {
                    aspect: "Entry Price".to_string(),
                    user: format!("${user_entry:.2}"),
                    agent: format!("${agent_entry:.2}"),
                    difference: Some(format!("{entry_diff_pct:.1}%")),
                    severity: if entry_diff_pct < 5.0 {
                        DifferenceSeverity::Medium
                    } else {
                        DifferenceSeverity::High
                    },
                });
            }
        }
    }

    if let (Some(user_stop), Some(agent_stop)) = (plan.stop_loss, signal.stop_loss) {
        if agent_stop > 0.0 {
            if (user_stop - agent_stop).abs() / agent_stop * 100.0 <= 5.0 {
                agreements.push("Stop loss close to agent recommendation".to_string());
            } else {
                differences.push(SignalDifference {
                    aspect: "Stop Loss".to_string(),
                    user: format!("${user_stop:.2}"),
                    agent: format!("${agent_stop:.2}"),
                    difference: None,
                    severity: DifferenceSeverity::Medium,
                });
            }
        }
    }

    let compared = agreements.len() + differences.len();
    let alignment_score = if compared > 0 {
        agreements.len() as f64 / compared as f64 * 100.0
    } else {
        0.0
    };

    SignalComparison {
        agreements,
        differences,
        alignment_score,
    }
}
