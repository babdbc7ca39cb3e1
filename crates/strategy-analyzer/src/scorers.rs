//! The five independent sub-scorers behind the confidence score.
//!
//! Each returns a partial point total plus its evidence; the analyzer sums
//! and clamps. Point budgets: completeness 30, market 25, technical ~30,
//! sentiment 10, reasoning 20.

use coach_core::{
    AnalystSignal, MarketAnalysis, Sentiment, SentimentAnalysis, TechnicalAnalysis,
    TradeDirection, Trend,
};

use crate::models::{FactorScore, Weakness};

const ANALYTICAL_TERMS: &[&str] = &[
    "support",
    "resistance",
    "trend",
    "breakout",
    "volume",
    "momentum",
    "consolidation",
    "pattern",
    "analysis",
];

const EMOTIONAL_TERMS: &[&str] = &[
    "hope", "feel", "believe", "gut", "hunch", "revenge", "must", "can't lose", "guaranteed",
];

const RISK_TERMS: &[&str] = &["stop", "risk", "position size"];

/// Are all plan fields filled in? (max 30)
pub(crate) fn completeness(
    entry: Option<f64>,
    stop: Option<f64>,
    target: Option<f64>,
    size: Option<u32>,
    reasoning: &str,
) -> FactorScore {
    let mut fs = FactorScore::default();

    if entry.is_some_and(|e| e > 0.0) {
        fs.score += 5;
        fs.strengths.push("Entry price defined".to_string());
    } else {
        fs.weaknesses.push(Weakness::critical("Missing entry price"));
    }

    if stop.is_some_and(|s| s > 0.0) {
        fs.score += 10;
        fs.strengths.push("Stop loss defined".to_string());
    } else {
        fs.weaknesses
            .push(Weakness::critical("No stop loss (CRITICAL)"));
    }

    if target.is_some_and(|t| t > 0.0) {
        fs.score += 5;
        fs.strengths.push("Profit target defined".to_string());
    } else {
        fs.weaknesses.push(Weakness::minor("No profit target"));
    }

    if size.is_some_and(|s| s > 0) {
        fs.score += 5;
        fs.strengths.push("Position size specified".to_string());
    } else {
        fs.weaknesses
            .push(Weakness::minor("Position size not specified"));
    }

    if reasoning.len() > 20 {
        fs.score += 5;
        fs.strengths.push("Trade reasoning provided".to_string());
    } else {
        fs.weaknesses.push(Weakness::minor("Insufficient reasoning"));
    }

    fs
}

/// Does the direction agree with the market analyst? (max 25)
pub(crate) fn market_alignment(direction: TradeDirection, market: &MarketAnalysis) -> FactorScore {
    let mut fs = FactorScore::default();

    match (direction, market.signal) {
        (TradeDirection::Long, AnalystSignal::Buy) => {
            fs.score += 15;
            fs.strengths
                .push("Direction aligns with market analysis (BUY signal)".to_string());
        }
        (TradeDirection::Short, AnalystSignal::Sell) => {
            fs.score += 15;
            fs.strengths
                .push("Direction aligns with market analysis (SELL signal)".to_string());
        }
        (TradeDirection::Long | TradeDirection::Short, AnalystSignal::Hold) => {
            fs.score += 5;
            fs.weaknesses.push(Weakness::minor(
                "Market analysis suggests HOLD, but you want to trade",
            ));
            fs.recommendations
                .push("Consider waiting for better setup".to_string());
        }
        (TradeDirection::Long, AnalystSignal::Sell)
        | (TradeDirection::Short, AnalystSignal::Buy) => {
            fs.weaknesses
                .push(Weakness::critical("Direction CONFLICTS with market analysis"));
            fs.recommendations
                .push("Trading against the analysis is high-risk. Reconsider.".to_string());
        }
        (TradeDirection::Hold, _) => {}
    }

    if market.confidence >= 70.0 {
        fs.score += 10;
        fs.strengths
            .push(format!("High analyst confidence ({}%)", market.confidence));
    } else if market.confidence >= 50.0 {
        fs.score += 5;
        fs.weaknesses.push(Weakness::minor(format!(
            "Moderate analyst confidence ({}%)",
            market.confidence
        )));
    } else {
        fs.weaknesses.push(Weakness::minor(format!(
            "Low analyst confidence ({}%)",
            market.confidence
        )));
        fs.recommendations
            .push("Consider reducing position size due to low conviction".to_string());
    }

    fs
}

/// Trend, level placement, and momentum quality. (max ~30)
pub(crate) fn technical_setup(
    direction: TradeDirection,
    entry: Option<f64>,
    stop: Option<f64>,
    technical: &TechnicalAnalysis,
) -> FactorScore {
    let mut fs = FactorScore::default();

    match (direction, technical.trend) {
        (TradeDirection::Long, Trend::Bullish) | (TradeDirection::Short, Trend::Bearish) => {
            fs.score += 10;
            fs.strengths.push(format!(
                "Trading with the trend ({})",
                technical.trend.as_str()
            ));
        }
        (_, Trend::Neutral) => {
            fs.score += 5;
            fs.weaknesses
                .push(Weakness::minor("No clear trend (choppy market)"));
            fs.recommendations
                .push("Consider tighter stops in range-bound conditions".to_string());
        }
        _ => {
            fs.weaknesses.push(Weakness::minor(format!(
                "Trading against the trend ({})",
                technical.trend.as_str()
            )));
            fs.recommendations
                .push("Counter-trend trades require strong confirmation".to_string());
        }
    }

    // Entry within 2% of the relevant level, stop beyond it
    if direction == TradeDirection::Long {
        if let (Some(support), Some(entry)) = (technical.support, entry) {
            if entry <= support * 1.02 {
                fs.score += 10;
                fs.strengths
                    .push(format!("Entry near support (${support:.2})"));
            }
            if stop.is_some_and(|s| s < support) {
                fs.score += 5;
                fs.strengths.push("Stop below support".to_string());
            }
        }
    }
    if direction == TradeDirection::Short {
        if let (Some(resistance), Some(entry)) = (technical.resistance, entry) {
            if entry >= resistance * 0.98 {
                fs.score += 10;
                fs.strengths
                    .push(format!("Entry near resistance (${resistance:.2})"));
            }
            if stop.is_some_and(|s| s > resistance) {
                fs.score += 5;
                fs.strengths.push("Stop above resistance".to_string());
            }
        }
    }

    if let Some(rsi) = technical.rsi {
        if direction == TradeDirection::Long && (30.0..=50.0).contains(&rsi) {
            fs.score += 5;
            fs.strengths
                .push(format!("RSI favorable for longs ({rsi:.1})"));
        } else if direction == TradeDirection::Short && (50.0..=70.0).contains(&rsi) {
            fs.score += 5;
            fs.strengths
                .push(format!("RSI favorable for shorts ({rsi:.1})"));
        } else if rsi > 80.0 {
            fs.weaknesses
                .push(Weakness::minor(format!("Extremely overbought (RSI: {rsi:.1})")));
            if direction == TradeDirection::Long {
                fs.recommendations
                    .push("Consider waiting for pullback".to_string());
            }
        } else if rsi < 20.0 {
            fs.weaknesses
                .push(Weakness::minor(format!("Extremely oversold (RSI: {rsi:.1})")));
            if direction == TradeDirection::Short {
                fs.recommendations
                    .push("Risk of bounce - use tight stops".to_string());
            }
        }
    }

    fs
}

/// Does sentiment back the direction? (max 10)
pub(crate) fn sentiment_alignment(
    direction: TradeDirection,
    sentiment: &SentimentAnalysis,
) -> FactorScore {
    let mut fs = FactorScore::default();

    match (direction, sentiment.overall_sentiment) {
        (TradeDirection::Long, Sentiment::Bullish) | (TradeDirection::Short, Sentiment::Bearish) => {
            fs.score += 10;
            fs.strengths.push(format!(
                "Sentiment supports your direction ({})",
                sentiment.overall_sentiment.as_str()
            ));
        }
        (_, Sentiment::Neutral) => {
            fs.score += 5;
        }
        _ => {
            fs.weaknesses.push(Weakness::minor(format!(
                "Sentiment conflicts with direction ({})",
                sentiment.overall_sentiment.as_str()
            )));
        }
    }

    fs
}

/// Analytical vs emotional language in the user's own reasoning. (max 20)
pub(crate) fn reasoning_quality(reasoning: &str) -> FactorScore {
    let mut fs = FactorScore::default();
    let lowered = reasoning.to_lowercase();

    let analytical_count = ANALYTICAL_TERMS
        .iter()
        .filter(|term| lowered.contains(*term))
        .count();
    if analytical_count >= 3 {
        fs.score += 10;
        fs.strengths
            .push("Reasoning includes technical analysis".to_string());
    } else if analytical_count >= 1 {
        fs.score += 5;
        fs.strengths
            .push("Some technical analysis mentioned".to_string());
    } else {
        fs.weaknesses
            .push(Weakness::critical("No technical reasoning provided"));
        fs.recommendations
            .push("Base decisions on technical/fundamental analysis, not emotions".to_string());
    }

    let emotional_count = EMOTIONAL_TERMS
        .iter()
        .filter(|term| lowered.contains(*term))
        .count();
    if emotional_count > 0 {
        fs.weaknesses.push(Weakness::minor(format!(
            "Emotional language detected ({emotional_count} instances)"
        )));
        fs.recommendations
            .push("Remove emotions from trading decisions".to_string());
    } else {
        fs.score += 5;
        fs.strengths.push("Objective reasoning".to_string());
    }

    if RISK_TERMS.iter().any(|term| lowered.contains(term)) {
        fs.score += 5;
        fs.strengths.push("Risk management considered".to_string());
    }

    fs
}
