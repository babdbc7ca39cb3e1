use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a proposed trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeDirection {
    Long,
    Short,
    Hold,
}

impl TradeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeDirection::Long => "LONG",
            TradeDirection::Short => "SHORT",
            TradeDirection::Hold => "HOLD",
        }
    }
}

/// Signal from an upstream analyst
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalystSignal {
    Buy,
    Sell,
    Hold,
}

impl AnalystSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalystSignal::Buy => "BUY",
            AnalystSignal::Sell => "SELL",
            AnalystSignal::Hold => "HOLD",
        }
    }
}

/// Market trend classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Bullish => "BULLISH",
            Trend::Bearish => "BEARISH",
            Trend::Neutral => "NEUTRAL",
        }
    }
}

/// Aggregate sentiment classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Bullish => "BULLISH",
            Sentiment::Bearish => "BEARISH",
            Sentiment::Neutral => "NEUTRAL",
        }
    }
}

/// Validation severity, ordered worst-last so `max` is worst-wins
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Safe,
    Warning,
    Critical,
}

impl Severity {
    /// Raise to `other` if worse; never downgrades
    pub fn escalate(&mut self, other: Severity) {
        *self = (*self).max(other);
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Safe => "SAFE",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
        }
    }
}

/// Merged verdict on a trade plan, recomputed on every review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Approved,
    Caution,
    Rejected,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Approved => "APPROVED",
            Verdict::Caution => "CAUTION",
            Verdict::Rejected => "REJECTED",
        }
    }
}

/// Output of the upstream market analyst
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketAnalysis {
    pub signal: AnalystSignal,
    /// Analyst conviction, 0-100
    pub confidence: f64,
}

/// Technical indicator snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalAnalysis {
    pub trend: Trend,
    #[serde(default)]
    pub support: Option<f64>,
    #[serde(default)]
    pub resistance: Option<f64>,
    #[serde(default)]
    pub rsi: Option<f64>,
}

/// Aggregated sentiment snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentAnalysis {
    pub overall_sentiment: Sentiment,
    /// Signed sentiment score, negative = bearish
    #[serde(default)]
    pub score: f64,
}

/// Auto-generated trade signal from the upstream pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedSignal {
    pub action: AnalystSignal,
    #[serde(default)]
    pub entry_price: Option<f64>,
    #[serde(default)]
    pub stop_loss: Option<f64>,
    #[serde(default)]
    pub take_profit: Option<f64>,
}

/// Per-session trading context, replaced wholesale on each `set_context`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeContext {
    pub ticker: String,
    pub current_price: f64,
    #[serde(default)]
    pub market_analysis: Option<MarketAnalysis>,
    #[serde(default)]
    pub technical_analysis: Option<TechnicalAnalysis>,
    #[serde(default)]
    pub sentiment_analysis: Option<SentimentAnalysis>,
    /// Fundamental metrics are carried opaquely; nothing in the coach
    /// branches on them
    #[serde(default)]
    pub fundamental_analysis: Option<serde_json::Value>,
    #[serde(default)]
    pub generated_signal: Option<GeneratedSignal>,
    pub as_of: DateTime<Utc>,
}

impl TradeContext {
    pub fn new(ticker: impl Into<String>, current_price: f64) -> Self {
        Self {
            ticker: ticker.into(),
            current_price,
            market_analysis: None,
            technical_analysis: None,
            sentiment_analysis: None,
            fundamental_analysis: None,
            generated_signal: None,
            as_of: Utc::now(),
        }
    }
}

/// A proposed trade, immutable input to every review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradePlan {
    pub direction: TradeDirection,
    #[serde(default)]
    pub entry_price: Option<f64>,
    #[serde(default)]
    pub stop_loss: Option<f64>,
    #[serde(default)]
    pub take_profit: Option<f64>,
    /// Whole shares
    #[serde(default)]
    pub position_size: Option<u32>,
    pub account_size: f64,
    #[serde(default)]
    pub user_reasoning: String,
}

/// A dangerous phrase found in free-text reasoning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedPattern {
    pub phrase: String,
    pub severity: Severity,
    pub message: String,
    pub consequence: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_escalate_never_downgrades() {
        let mut sev = Severity::Safe;
        sev.escalate(Severity::Warning);
        assert_eq!(sev, Severity::Warning);
        sev.escalate(Severity::Critical);
        assert_eq!(sev, Severity::Critical);
        sev.escalate(Severity::Safe);
        assert_eq!(sev, Severity::Critical);
        sev.escalate(Severity::Warning);
        assert_eq!(sev, Severity::Critical);
    }

    #[test]
    fn severity_ordering_is_worst_last() {
        assert!(Severity::Safe < Severity::Warning);
        assert!(Severity::Warning < Severity::Critical);
    }
}
