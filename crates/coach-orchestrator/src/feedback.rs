//! Deterministic text rendering of a trade review. No decision logic here.

use crate::models::TradeReview;

const RULE: &str = "============================================================";
const EVIDENCE_CAP: usize = 5;

/// Render a review as the coach's formatted feedback message.
pub fn generate_coach_feedback(review: &TradeReview) -> String {
    let risk = &review.risk_validation;
    let strategy = &review.strategy_assessment;
    let mut feedback = vec![
        format!("\n{RULE}"),
        format!("TRADING COACH VERDICT: {}", review.overall_verdict.as_str()),
        format!("{RULE}\n"),
        format!("RISK ASSESSMENT: {}", risk.severity.as_str()),
        risk.summary.clone(),
        String::new(),
    ];

    if !risk.issues.is_empty() {
        feedback.push("CRITICAL ISSUES:".to_string());
        for issue in &risk.issues {
            feedback.push(format!("  - {}: {}", issue.issue, issue.message));
            feedback.push(format!("    Fix: {}", issue.fix));
        }
        feedback.push(String::new());
    }

    feedback.push(format!("STRATEGY QUALITY: {}", strategy.assessment));
    feedback.push(format!(
        "Confidence Score: {}/100",
        strategy.confidence_score
    ));
    feedback.push(String::new());

    if !strategy.strengths.is_empty() {
        feedback.push("STRENGTHS:".to_string());
        for strength in strategy.strengths.iter().take(EVIDENCE_CAP) {
            feedback.push(format!("  - {strength}"));
        }
        feedback.push(String::new());
    }

    if !strategy.weaknesses.is_empty() {
        feedback.push("WEAKNESSES:".to_string());
        for weakness in strategy.weaknesses.iter().take(EVIDENCE_CAP) {
            feedback.push(format!("  - {}", weakness.text));
        }
        feedback.push(String::new());
    }

    if !strategy.recommendations.is_empty() {
        feedback.push("RECOMMENDATIONS:".to_string());
        for rec in strategy.recommendations.iter().take(EVIDENCE_CAP) {
            feedback.push(format!("  - {rec}"));
        }
        feedback.push(String::new());
    }

    feedback.push("EXECUTION PLAN:".to_string());
    for advice in &strategy.execution_advice {
        feedback.push(format!("  - {advice}"));
    }

    feedback.push(format!("\n{RULE}\n"));
    feedback.join("\n")
}
