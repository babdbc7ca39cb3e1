use chrono::Utc;
use coach_core::{CoachError, CoachResult, Severity, TradeDirection, TradePlan};
use tracing::debug;

use crate::models::*;

/// Stateless rule engine for trade-plan risk checks.
///
/// Every rule is applied independently; multiple issues can co-occur on one
/// plan. Severity aggregation is worst-wins and never downgrades within a
/// single call.
#[derive(Debug, Clone, Default)]
pub struct RiskValidator {
    limits: RiskLimits,
}

impl RiskValidator {
    pub fn new(limits: RiskLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &RiskLimits {
        &self.limits
    }

    /// Validate a trade plan against every risk rule.
    ///
    /// Pure function of its inputs; a maximally broken plan still yields a
    /// structured result rather than an error.
    pub fn validate(&self, plan: &TradePlan, current_price: f64) -> ValidationResult {
        debug!(
            direction = plan.direction.as_str(),
            entry = ?plan.entry_price,
            current_price,
            "validating trade plan"
        );

        let mut issues: Vec<RiskIssue> = Vec::new();
        let mut warnings: Vec<RiskWarning> = Vec::new();
        let mut approvals: Vec<RiskApproval> = Vec::new();
        let mut severity = Severity::Safe;

        // Rule 1: stop loss is mandatory
        if plan.stop_loss.is_none() {
            issues.push(RiskIssue {
                severity: Severity::Critical,
                issue: "NO STOP LOSS".to_string(),
                message: "Trading without a stop loss is unacceptable. This exposes you to \
                          unlimited risk."
                    .to_string(),
                consequence: "Account blow-up risk, catastrophic losses possible".to_string(),
                fix: "Set stop loss below support (for longs) or above resistance (for shorts)"
                    .to_string(),
            });
            severity.escalate(Severity::Critical);
        }

        // Rule 2: entry must be a real price
        if plan.entry_price.map_or(true, |e| e <= 0.0) {
            issues.push(RiskIssue {
                severity: Severity::Critical,
                issue: "INVALID ENTRY PRICE".to_string(),
                message: "You must specify a valid entry price".to_string(),
                consequence: "Cannot execute trade without entry level".to_string(),
                fix: "Define your exact entry price".to_string(),
            });
            severity.escalate(Severity::Critical);
        }

        let entry = plan.entry_price.filter(|e| *e > 0.0);

        // Rules 3-4: direction-aware placement. Hold plans carry no
        // directional exposure and skip these by construction.
        if let Some(entry) = entry {
            if let Some(stop) = plan.stop_loss {
                self.check_stop_placement(plan.direction, entry, stop, &mut issues, &mut approvals, &mut severity);
            }
            if let Some(target) = plan.take_profit {
                self.check_target_placement(plan.direction, entry, target, &mut issues, &mut approvals, &mut severity);
            }
        }

        // Rules 5-7: ratio and sizing metrics, computed only when the full
        // plan is on the table
        if let (Some(entry), Some(stop), Some(target), Some(size)) =
            (entry, plan.stop_loss, plan.take_profit, plan.position_size)
        {
            let risk_per_share = (entry - stop).abs();
            let reward_per_share = (target - entry).abs();

            if risk_per_share > 0.0 {
                self.check_risk_reward_ratio(
                    plan.direction,
                    entry,
                    risk_per_share,
                    reward_per_share,
                    &mut issues,
                    &mut warnings,
                    &mut approvals,
                    &mut severity,
                );

                if plan.account_size > 0.0 {
                    self.check_account_risk(
                        size,
                        risk_per_share,
                        plan.account_size,
                        &mut issues,
                        &mut warnings,
                        &mut approvals,
                        &mut severity,
                    );
                }
            }

            if plan.account_size > 0.0 {
                let position_percent = (f64::from(size) * entry / plan.account_size) * 100.0;
                if position_percent > self.limits.max_position_size_percent {
                    warnings.push(RiskWarning {
                        issue: "LARGE POSITION SIZE".to_string(),
                        message: format!(
                            "Position is {:.1}% of account (Max recommended: {}%)",
                            position_percent, self.limits.max_position_size_percent
                        ),
                        suggestion: "Consider diversifying to reduce concentration risk"
                            .to_string(),
                    });
                    severity.escalate(Severity::Warning);
                }
            }
        }

        let summary = Self::summarize(severity, &issues, &warnings, &approvals);
        ValidationResult {
            is_valid: issues.is_empty(),
            severity,
            can_execute: severity != Severity::Critical,
            issues,
            warnings,
            approvals,
            summary,
            checked_at: Utc::now(),
        }
    }

    fn check_stop_placement(
        &self,
        direction: TradeDirection,
        entry: f64,
        stop: f64,
        issues: &mut Vec<RiskIssue>,
        approvals: &mut Vec<RiskApproval>,
        severity: &mut Severity,
    ) {
        match direction {
            TradeDirection::Long => {
                if stop >= entry {
                    issues.push(RiskIssue {
                        severity: Severity::Critical,
                        issue: "INVALID STOP LOSS PLACEMENT".to_string(),
                        message: format!(
                            "Stop loss (${stop:.2}) is at or above entry price (${entry:.2}) \
                             for a LONG position"
                        ),
                        consequence: "You'll be stopped out immediately for a loss".to_string(),
                        fix: "Place stop loss BELOW entry price for LONG trades".to_string(),
                    });
                    severity.escalate(Severity::Critical);
                } else {
                    approvals.push(RiskApproval {
                        aspect: "Stop Loss Placement".to_string(),
                        status: "CORRECT".to_string(),
                        value: format!("SL ${stop:.2} < Entry ${entry:.2}"),
                        comment: "Stop loss correctly placed below entry for LONG position"
                            .to_string(),
                    });
                }
            }
            TradeDirection::Short => {
                if stop <= entry {
                    issues.push(RiskIssue {
                        severity: Severity::Critical,
                        issue: "INVALID STOP LOSS PLACEMENT".to_string(),
                        message: format!(
                            "Stop loss (${stop:.2}) is at or below entry price (${entry:.2}) \
                             for a SHORT position"
                        ),
                        consequence: "You'll be stopped out immediately for a loss".to_string(),
                        fix: "Place stop loss ABOVE entry price for SHORT trades".to_string(),
                    });
                    severity.escalate(Severity::Critical);
                } else {
                    approvals.push(RiskApproval {
                        aspect: "Stop Loss Placement".to_string(),
                        status: "CORRECT".to_string(),
                        value: format!("SL ${stop:.2} > Entry ${entry:.2}"),
                        comment: "Stop loss correctly placed above entry for SHORT position"
                            .to_string(),
                    });
                }
            }
            TradeDirection::Hold => {}
        }
    }

    fn check_target_placement(
        &self,
        direction: TradeDirection,
        entry: f64,
        target: f64,
        issues: &mut Vec<RiskIssue>,
        approvals: &mut Vec<RiskApproval>,
        severity: &mut Severity,
    ) {
        match direction {
            TradeDirection::Long => {
                if target <= entry {
                    issues.push(RiskIssue {
                        severity: Severity::Critical,
                        issue: "INVALID TAKE PROFIT PLACEMENT".to_string(),
                        message: format!(
                            "Take profit (${target:.2}) is at or below entry price (${entry:.2}) \
                             for a LONG position"
                        ),
                        consequence: "Target makes no sense - you can't profit by selling lower \
                                      on a long"
                            .to_string(),
                        fix: "Place take profit ABOVE entry price for LONG trades".to_string(),
                    });
                    severity.escalate(Severity::Critical);
                } else {
                    approvals.push(RiskApproval {
                        aspect: "Take Profit Placement".to_string(),
                        status: "CORRECT".to_string(),
                        value: format!("TP ${target:.2} > Entry ${entry:.2}"),
                        comment: "Take profit correctly placed above entry for LONG position"
                            .to_string(),
                    });
                }
            }
            TradeDirection::Short => {
                if target >= entry {
                    issues.push(RiskIssue {
                        severity: Severity::Critical,
                        issue: "INVALID TAKE PROFIT PLACEMENT".to_string(),
                        message: format!(
                            "Take profit (${target:.2}) is at or above entry price (${entry:.2}) \
                             for a SHORT position"
                        ),
                        consequence: "Target makes no sense - you can't profit by buying higher \
                                      on a short"
                            .to_string(),
                        fix: "Place take profit BELOW entry price for SHORT trades".to_string(),
                    });
                    severity.escalate(Severity::Critical);
                } else {
                    approvals.push(RiskApproval {
                        aspect: "Take Profit Placement".to_string(),
                        status: "CORRECT".to_string(),
                        value: format!("TP ${target:.2} < Entry ${entry:.2}"),
                        comment: "Take profit correctly placed below entry for SHORT position"
                            .to_string(),
                    });
                }
            }
            TradeDirection::Hold => {}
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn check_risk_reward_ratio(
        &self,
        direction: TradeDirection,
        entry: f64,
        risk_per_share: f64,
        reward_per_share: f64,
        issues: &mut Vec<RiskIssue>,
        warnings: &mut Vec<RiskWarning>,
        approvals: &mut Vec<RiskApproval>,
        severity: &mut Severity,
    ) {
        let ratio = reward_per_share / risk_per_share;
        let recommended_target = match direction {
            TradeDirection::Long | TradeDirection::Hold => {
                entry + risk_per_share * self.limits.recommended_risk_reward_ratio
            }
            TradeDirection::Short => {
                entry - risk_per_share * self.limits.recommended_risk_reward_ratio
            }
        };

        if ratio < self.limits.min_risk_reward_ratio {
            issues.push(RiskIssue {
                severity: Severity::Critical,
                issue: "POOR RISK-REWARD RATIO".to_string(),
                message: format!(
                    "Your R:R is 1:{ratio:.2}, which is below minimum 1:{}",
                    self.limits.min_risk_reward_ratio
                ),
                consequence: "Low probability of long-term profitability".to_string(),
                fix: format!("Adjust target to at least ${recommended_target:.2} for 1:2 R:R"),
            });
            severity.escalate(Severity::Critical);
        } else if ratio < self.limits.recommended_risk_reward_ratio {
            warnings.push(RiskWarning {
                issue: "SUBOPTIMAL RISK-REWARD".to_string(),
                message: format!("R:R is 1:{ratio:.2}. Recommended minimum is 1:2"),
                suggestion: format!("Consider adjusting target to ${recommended_target:.2}"),
            });
            severity.escalate(Severity::Warning);
        } else {
            approvals.push(RiskApproval {
                aspect: "Risk-Reward Ratio".to_string(),
                status: "EXCELLENT".to_string(),
                value: format!("1:{ratio:.2}"),
                comment: "Meets professional standards".to_string(),
            });
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn check_account_risk(
        &self,
        size: u32,
        risk_per_share: f64,
        account_size: f64,
        issues: &mut Vec<RiskIssue>,
        warnings: &mut Vec<RiskWarning>,
        approvals: &mut Vec<RiskApproval>,
        severity: &mut Severity,
    ) {
        let total_risk = f64::from(size) * risk_per_share;
        let risk_percent = (total_risk / account_size) * 100.0;
        let recommended_size =
            ((account_size * self.limits.recommended_risk_percent / 100.0) / risk_per_share)
                .floor() as u32;

        if risk_percent > self.limits.max_risk_percent {
            issues.push(RiskIssue {
                severity: Severity::Critical,
                issue: "EXCESSIVE RISK".to_string(),
                message: format!(
                    "You're risking {risk_percent:.2}% of your account (Max: {}%)",
                    self.limits.max_risk_percent
                ),
                consequence: "A few losing trades could devastate your account".to_string(),
                fix: format!("Reduce position to {recommended_size} shares"),
            });
            severity.escalate(Severity::Critical);
        } else if risk_percent > self.limits.recommended_risk_percent {
            warnings.push(RiskWarning {
                issue: "HIGH RISK".to_string(),
                message: format!(
                    "Risking {risk_percent:.2}% (Recommended: {}%)",
                    self.limits.recommended_risk_percent
                ),
                suggestion: format!("Consider reducing to {recommended_size} shares"),
            });
            severity.escalate(Severity::Warning);
        } else {
            approvals.push(RiskApproval {
                aspect: "Risk Percentage".to_string(),
                status: "GOOD".to_string(),
                value: format!("{risk_percent:.2}%"),
                comment: "Within safe limits".to_string(),
            });
        }
    }

    fn summarize(
        severity: Severity,
        issues: &[RiskIssue],
        warnings: &[RiskWarning],
        approvals: &[RiskApproval],
    ) -> String {
        match severity {
            Severity::Critical => format!(
                "TRADE REJECTED: {} critical issue(s) found. Cannot proceed.",
                issues.len()
            ),
            Severity::Warning => format!(
                "PROCEED WITH CAUTION: {} warning(s). Trade is acceptable but not optimal.",
                warnings.len()
            ),
            Severity::Safe => format!(
                "TRADE APPROVED: All checks passed. {} aspect(s) validated.",
                approvals.len()
            ),
        }
    }

    /// Direction-aware risk-reward check, callable without a full plan.
    pub fn validate_risk_reward(
        &self,
        entry: f64,
        stop: f64,
        target: f64,
        direction: TradeDirection,
    ) -> RiskRewardAssessment {
        let (risk, reward) = match direction {
            TradeDirection::Long => {
                if stop >= entry {
                    return RiskRewardAssessment {
                        is_valid: false,
                        ratio: 0.0,
                        message: format!(
                            "Invalid for LONG: Stop loss (${stop:.2}) must be BELOW entry \
                             (${entry:.2})"
                        ),
                    };
                }
                if target <= entry {
                    return RiskRewardAssessment {
                        is_valid: false,
                        ratio: 0.0,
                        message: format!(
                            "Invalid for LONG: Target (${target:.2}) must be ABOVE entry \
                             (${entry:.2})"
                        ),
                    };
                }
                (entry - stop, target - entry)
            }
            TradeDirection::Short => {
                if stop <= entry {
                    return RiskRewardAssessment {
                        is_valid: false,
                        ratio: 0.0,
                        message: format!(
                            "Invalid for SHORT: Stop loss (${stop:.2}) must be ABOVE entry \
                             (${entry:.2})"
                        ),
                    };
                }
                if target >= entry {
                    return RiskRewardAssessment {
                        is_valid: false,
                        ratio: 0.0,
                        message: format!(
                            "Invalid for SHORT: Target (${target:.2}) must be BELOW entry \
                             (${entry:.2})"
                        ),
                    };
                }
                (stop - entry, entry - target)
            }
            // No directional exposure; fall back to absolute distances
            TradeDirection::Hold => ((entry - stop).abs(), (target - entry).abs()),
        };

        if risk <= 0.0 {
            return RiskRewardAssessment {
                is_valid: false,
                ratio: 0.0,
                message: "Invalid: Risk is zero".to_string(),
            };
        }

        let ratio = reward / risk;
        if ratio < self.limits.min_risk_reward_ratio {
            RiskRewardAssessment {
                is_valid: false,
                ratio,
                message: format!(
                    "R:R too low: 1:{ratio:.2} (Min: 1:{})",
                    self.limits.min_risk_reward_ratio
                ),
            }
        } else if ratio < self.limits.recommended_risk_reward_ratio {
            RiskRewardAssessment {
                is_valid: true,
                ratio,
                message: format!("R:R acceptable but suboptimal: 1:{ratio:.2} (Recommended: 1:2)"),
            }
        } else {
            RiskRewardAssessment {
                is_valid: true,
                ratio,
                message: format!("Excellent R:R: 1:{ratio:.2}"),
            }
        }
    }

    /// Check an existing position size against the account-risk limits.
    pub fn check_position_sizing(
        &self,
        position_size: u32,
        entry_price: f64,
        stop_loss: f64,
        account_size: f64,
    ) -> CoachResult<PositionSizingCheck> {
        let risk_per_share = (entry_price - stop_loss).abs();
        if risk_per_share <= 0.0 {
            return Err(CoachError::InvalidInput(
                "Risk per share is zero; stop loss must differ from entry".to_string(),
            ));
        }
        if account_size <= 0.0 {
            return Err(CoachError::InvalidInput(
                "Account size must be positive".to_string(),
            ));
        }

        let total_risk = f64::from(position_size) * risk_per_share;
        let risk_percent = (total_risk / account_size) * 100.0;
        let recommended_size =
            ((account_size * self.limits.recommended_risk_percent / 100.0) / risk_per_share)
                .floor() as u32;
        let max_size = ((account_size * self.limits.max_risk_percent / 100.0) / risk_per_share)
            .floor() as u32;

        let (is_acceptable, message) = if risk_percent > self.limits.max_risk_percent {
            (
                false,
                format!(
                    "Position too large! Risking {risk_percent:.2}% (Max: {}%)",
                    self.limits.max_risk_percent
                ),
            )
        } else if risk_percent > self.limits.recommended_risk_percent {
            (
                true,
                format!("Position size is high ({risk_percent:.2}%). Consider reducing."),
            )
        } else {
            (true, format!("Position size is good ({risk_percent:.2}%)"))
        };

        Ok(PositionSizingCheck {
            is_acceptable,
            current_size: position_size,
            recommended_size,
            max_size,
            risk_percent,
            total_risk,
            message,
        })
    }
}
