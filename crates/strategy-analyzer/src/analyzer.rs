use coach_core::{TradeContext, TradePlan};
use tracing::debug;

use crate::models::*;
use crate::scorers;

/// Stateless weighted scorer for a trade plan's strategic quality.
///
/// Aggregates five independent sub-assessments into a 0-100 confidence
/// score. The point budget is tuned so a plan with every positive signal
/// lands near 100; the sum is clamped either way.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrategyAnalyzer;

impl StrategyAnalyzer {
    /// Score a plan against the session context. Pure function.
    pub fn analyze(&self, plan: &TradePlan, context: &TradeContext) -> StrategyAssessment {
        let mut total: u32 = 0;
        let mut strengths: Vec<String> = Vec::new();
        let mut weaknesses: Vec<Weakness> = Vec::new();
        let mut recommendations: Vec<String> = Vec::new();

        let mut absorb = |fs: FactorScore| {
            total += fs.score;
            strengths.extend(fs.strengths);
            weaknesses.extend(fs.weaknesses);
            recommendations.extend(fs.recommendations);
        };

        // Evaluation order fixed: completeness, market, technical,
        // sentiment, reasoning. Evidence lists keep this order.
        absorb(scorers::completeness(
            plan.entry_price,
            plan.stop_loss,
            plan.take_profit,
            plan.position_size,
            &plan.user_reasoning,
        ));

        if let Some(market) = &context.market_analysis {
            absorb(scorers::market_alignment(plan.direction, market));
        }

        if let Some(technical) = &context.technical_analysis {
            absorb(scorers::technical_setup(
                plan.direction,
                plan.entry_price,
                plan.stop_loss,
                technical,
            ));
        }

        if let Some(sentiment) = &context.sentiment_analysis {
            absorb(scorers::sentiment_alignment(plan.direction, sentiment));
        }

        absorb(scorers::reasoning_quality(&plan.user_reasoning));

        let confidence_score = total.min(100) as u8;
        let grade = SetupGrade::from_score(confidence_score);
        let risk_level = Self::risk_level(confidence_score, &weaknesses);
        let assessment = Self::describe(grade, confidence_score, &strengths, &weaknesses);
        let execution_advice = Self::execution_advice(
            confidence_score,
            plan.entry_price,
            plan.stop_loss,
            plan.take_profit,
        );

        debug!(
            ticker = %context.ticker,
            confidence_score,
            grade = grade.as_str(),
            "strategy assessment complete"
        );

        StrategyAssessment {
            ticker: context.ticker.clone(),
            confidence_score,
            grade,
            assessment,
            strengths,
            weaknesses,
            recommendations,
            risk_level,
            execution_advice,
        }
    }

    fn risk_level(confidence: u8, weaknesses: &[Weakness]) -> StrategyRiskLevel {
        if weaknesses.iter().any(|w| w.critical) || confidence < 50 {
            StrategyRiskLevel::High
        } else if confidence < 70 {
            StrategyRiskLevel::Medium
        } else {
            StrategyRiskLevel::Low
        }
    }

    fn describe(
        grade: SetupGrade,
        confidence: u8,
        strengths: &[String],
        weaknesses: &[Weakness],
    ) -> String {
        match grade {
            SetupGrade::Strong => format!(
                "STRONG SETUP ({confidence}%): This trade plan is well-constructed with {} \
                 positive factors.",
                strengths.len()
            ),
            SetupGrade::Acceptable => format!(
                "ACCEPTABLE SETUP ({confidence}%): Trade has merit but could be improved. {} \
                 concern(s).",
                weaknesses.len()
            ),
            SetupGrade::Weak => format!(
                "WEAK SETUP ({confidence}%): Multiple issues detected. Consider revising plan."
            ),
            SetupGrade::Poor => format!(
                "POOR SETUP ({confidence}%): Significant problems found. Not recommended for \
                 execution."
            ),
        }
    }

    fn execution_advice(
        confidence: u8,
        entry: Option<f64>,
        stop: Option<f64>,
        target: Option<f64>,
    ) -> Vec<String> {
        let mut advice = Vec::new();

        if confidence >= 70 {
            advice.push("Plan is solid. Execute with discipline.".to_string());
            advice.push("Monitor position actively after entry".to_string());
        } else if confidence >= 50 {
            advice.push("Consider starting with a smaller position".to_string());
            advice.push("Add to position if price confirms your thesis".to_string());
        } else {
            advice.push("Do NOT execute this trade yet".to_string());
            advice.push("Address weaknesses first, then reassess".to_string());
        }

        if let Some(stop) = stop {
            advice.push(format!("Set stop loss IMMEDIATELY at ${stop:.2}"));
            advice.push("Never move stop loss against your position".to_string());
        }

        if let Some(target) = target {
            // Partial exit at 75% of the distance from entry to target
            let partial = match entry {
                Some(entry) => entry + (target - entry) * 0.75,
                None => target * 0.75,
            };
            advice.push(format!(
                "Consider taking partial profits at ${partial:.2} (75% to target)"
            ));
            advice.push(format!("Full exit or trail stop at ${target:.2}"));
        }

        advice
    }
}
