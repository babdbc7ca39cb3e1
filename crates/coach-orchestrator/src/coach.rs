use std::sync::Arc;

use chat_client::{ChatMessage, ChatProvider};
use coach_core::{
    CoachError, CoachResult, PatternDetector, Severity, TradeContext, TradeDirection, TradePlan,
    Verdict,
};
use risk_validator::{DangerousPatternScanner, RiskValidator};
use strategy_analyzer::StrategyAnalyzer;
use tracing::{debug, info, warn};

use crate::config::CoachConfig;
use crate::models::*;

const COACH_PERSONA: &str = "\
You are a professional trading coach with 20+ years of experience.

Your personality: firm and protective - you will not approve dangerous \
trades. Direct - say exactly what needs to be said. Educational - always \
explain why something is right or wrong. Your strictness comes from wanting \
to protect the trader's capital.

Rules you enforce: mandatory stop loss on every trade, maximum 2-3% risk \
per trade, minimum 1:1.5 risk-reward ratio (recommend 1:2), appropriate \
position sizing, no emotional trading, revenge trading, or averaging down.

When responding: start with a clear verdict (APPROVED, CAUTION, or \
REJECTED), explain your reasoning with specific numbers, reference the \
market analysis when available, provide actionable fixes for problems, and \
end with execution guidance.";

/// Stateful session coach.
///
/// Owns the trading context and conversation history for one session and
/// merges the pure evaluators into a single verdict. A session must
/// serialize its own calls; nothing here locks internally.
pub struct TradingCoach {
    validator: RiskValidator,
    analyzer: StrategyAnalyzer,
    scanner: Box<dyn PatternDetector>,
    provider: Arc<dyn ChatProvider>,
    config: CoachConfig,
    context: Option<TradeContext>,
    history: Vec<ConversationTurn>,
    review_log: Vec<TradeReview>,
}

impl TradingCoach {
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self::with_config(provider, CoachConfig::default())
    }

    pub fn with_config(provider: Arc<dyn ChatProvider>, config: CoachConfig) -> Self {
        Self {
            validator: RiskValidator::default(),
            analyzer: StrategyAnalyzer,
            scanner: Box::new(DangerousPatternScanner),
            provider,
            config,
            context: None,
            history: Vec::new(),
            review_log: Vec::new(),
        }
    }

    /// Replace the trading context wholesale.
    pub fn set_context(&mut self, context: TradeContext) {
        info!(ticker = %context.ticker, price = context.current_price, "context set");
        self.context = Some(context);
    }

    pub fn context(&self) -> Option<&TradeContext> {
        self.context.as_ref()
    }

    /// Run risk validation, strategy analysis, and the dangerous-pattern
    /// scan, then merge them into one verdict.
    pub fn validate_trade_plan(&mut self, plan: &TradePlan) -> TradeReview {
        // Fall back to an empty context so a plan can be reviewed before
        // any analysis has been loaded
        let fallback =
            TradeContext::new("UNKNOWN", plan.entry_price.unwrap_or_default());
        let context = self.context.as_ref().unwrap_or(&fallback);

        let risk_validation = self.validator.validate(plan, context.current_price);
        let strategy_assessment = self.analyzer.analyze(plan, context);
        let dangerous_patterns = self.scanner.detect(&plan.user_reasoning);

        let confidence = strategy_assessment.confidence_score;
        let can_execute = risk_validation.can_execute && confidence >= 50;
        let overall_verdict = Self::verdict(risk_validation.severity, confidence);

        debug!(
            ticker = %context.ticker,
            verdict = overall_verdict.as_str(),
            severity = risk_validation.severity.as_str(),
            confidence,
            "trade plan reviewed"
        );

        let review = TradeReview {
            ticker: context.ticker.clone(),
            can_execute,
            overall_verdict,
            risk_validation,
            strategy_assessment,
            dangerous_patterns,
            plan: plan.clone(),
        };
        self.review_log.push(review.clone());
        review
    }

    fn verdict(severity: Severity, confidence: u8) -> Verdict {
        if severity == Severity::Critical || confidence < 40 {
            Verdict::Rejected
        } else if severity == Severity::Warning || confidence < 60 {
            Verdict::Caution
        } else {
            Verdict::Approved
        }
    }

    /// Derive an entry setup from the current support/resistance levels and
    /// the market analyst's signal.
    pub fn suggest_optimal_entry(&self) -> CoachResult<EntrySuggestion> {
        let context = self
            .context
            .as_ref()
            .ok_or_else(|| CoachError::MissingContext("No trading context set".to_string()))?;
        let technical = context.technical_analysis.as_ref().ok_or_else(|| {
            CoachError::MissingContext("Need technical and market analysis first".to_string())
        })?;
        let market = context.market_analysis.as_ref().ok_or_else(|| {
            CoachError::MissingContext("Need technical and market analysis first".to_string())
        })?;

        let current_price = context.current_price;
        let support = technical.support.unwrap_or(current_price * 0.97);
        let resistance = technical.resistance.unwrap_or(current_price * 1.03);

        let suggestion = match market.signal {
            coach_core::AnalystSignal::Buy => {
                // Long: buy near support, stop below it, target near resistance
                let optimal_entry = support * 1.005;
                let stop_loss = support * 0.98;
                let take_profit = resistance * 0.98;
                let risk = optimal_entry - stop_loss;
                let reward = take_profit - optimal_entry;
                let rr_ratio = if risk > 0.0 { reward / risk } else { 0.0 };

                EntrySuggestion::Setup(EntrySetup {
                    direction: TradeDirection::Long,
                    optimal_entry,
                    aggressive_entry: current_price,
                    conservative_entry: support * 0.998,
                    stop_loss,
                    take_profit,
                    risk_reward_ratio: rr_ratio,
                    reasoning: format!(
                        "LONG setup: Entry near support (${support:.2}). Stop loss at \
                         ${stop_loss:.2} (BELOW entry). Target at ${take_profit:.2} (ABOVE \
                         entry). R:R = 1:{rr_ratio:.2}"
                    ),
                })
            }
            coach_core::AnalystSignal::Sell => {
                // Short: sell near resistance, stop above it, target near support
                let optimal_entry = resistance * 0.995;
                let stop_loss = resistance * 1.02;
                let take_profit = support * 1.02;
                let risk = stop_loss - optimal_entry;
                let reward = optimal_entry - take_profit;
                let rr_ratio = if risk > 0.0 { reward / risk } else { 0.0 };

                EntrySuggestion::Setup(EntrySetup {
                    direction: TradeDirection::Short,
                    optimal_entry,
                    aggressive_entry: current_price,
                    conservative_entry: resistance * 1.002,
                    stop_loss,
                    take_profit,
                    risk_reward_ratio: rr_ratio,
                    reasoning: format!(
                        "SHORT setup: Entry near resistance (${resistance:.2}). Stop loss at \
                         ${stop_loss:.2} (ABOVE entry). Target at ${take_profit:.2} (BELOW \
                         entry). R:R = 1:{rr_ratio:.2}"
                    ),
                })
            }
            coach_core::AnalystSignal::Hold => EntrySuggestion::Hold {
                reasoning: "No clear setup. Wait for better opportunity.".to_string(),
            },
        };

        Ok(suggestion)
    }

    /// Size a position from the dollar risk budget.
    pub fn calculate_position_size(
        &self,
        entry_price: f64,
        stop_loss: f64,
        account_size: f64,
        risk_percent: Option<f64>,
    ) -> CoachResult<PositionSizing> {
        let risk_percent = risk_percent.unwrap_or(self.config.default_risk_percent);

        if (entry_price - stop_loss).abs() < f64::EPSILON {
            return Err(CoachError::InvalidInput(
                "Invalid stop loss. Cannot calculate position size.".to_string(),
            ));
        }
        if account_size <= 0.0 {
            return Err(CoachError::InvalidInput(
                "Account size must be positive".to_string(),
            ));
        }

        let risk_per_share = (entry_price - stop_loss).abs();
        let dollar_risk = account_size * (risk_percent / 100.0);
        let position_size = (dollar_risk / risk_per_share).floor() as u32;
        let position_value = f64::from(position_size) * entry_price;
        let position_percent = (position_value / account_size) * 100.0;

        let conservative_size = (f64::from(position_size) * 0.75).floor() as u32;
        let aggressive_size = if risk_percent < 2.5 {
            (f64::from(position_size) * 1.25).floor() as u32
        } else {
            position_size
        };

        Ok(PositionSizing {
            recommended_size: position_size,
            conservative_size,
            aggressive_size,
            risk_per_share,
            dollar_risk,
            risk_percent,
            position_value,
            position_percent,
            explanation: format!(
                "Risking {risk_percent}% (${dollar_risk:.2}) with ${risk_per_share:.2} risk per \
                 share = {position_size} shares"
            ),
        })
    }

    /// Direction-aware risk-reward check, independent of a full plan.
    pub fn check_risk_reward(
        &self,
        entry: f64,
        stop: f64,
        target: f64,
        direction: TradeDirection,
    ) -> RiskRewardCheck {
        let assessment = self.validator.validate_risk_reward(entry, stop, target, direction);

        let (risk_amount, reward_amount) = match direction {
            TradeDirection::Long => (entry - stop, target - entry),
            TradeDirection::Short => (stop - entry, entry - target),
            TradeDirection::Hold => ((entry - stop).abs(), (target - entry).abs()),
        };

        let recommendation = if assessment.ratio >= 2.0 {
            "Excellent"
        } else if assessment.ratio >= 1.5 {
            "Acceptable"
        } else {
            "Poor"
        };

        RiskRewardCheck {
            is_valid: assessment.is_valid,
            rr_ratio: assessment.ratio,
            message: assessment.message,
            risk_amount: risk_amount.abs(),
            reward_amount: reward_amount.abs(),
            trade_direction: direction,
            recommendation: recommendation.to_string(),
        }
    }

    /// Talk to the coach. A model failure becomes an apologetic reply; the
    /// conversation history advances either way.
    pub async fn chat(&mut self, user_message: &str) -> ChatReply {
        let mut messages = vec![
            ChatMessage::system(COACH_PERSONA),
            ChatMessage::system(format!(
                "CURRENT TRADING CONTEXT:\n{}",
                self.build_context_summary()
            )),
        ];

        // Only the most recent turns reach the model; the full history is
        // kept for retrieval
        let window_start = self.history.len().saturating_sub(self.config.history_window);
        for turn in &self.history[window_start..] {
            messages.push(match turn.role {
                TurnRole::User => ChatMessage::user(turn.content.clone()),
                TurnRole::Coach => ChatMessage::assistant(turn.content.clone()),
            });
        }
        messages.push(ChatMessage::user(user_message));

        let response = match self.provider.complete(&messages).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(error = %err, backend = self.provider.backend_name(), "chat model call failed");
                format!("I apologize, but I encountered an error: {err}")
            }
        };

        self.history.push(ConversationTurn {
            role: TurnRole::User,
            content: user_message.to_string(),
        });
        self.history.push(ConversationTurn {
            role: TurnRole::Coach,
            content: response.clone(),
        });

        ChatReply {
            response,
            conversation_turn: self.history.len() / 2,
            context_available: self.context.is_some(),
        }
    }

    /// Summarize the loaded context for the model's system prompt.
    pub fn build_context_summary(&self) -> String {
        let Some(context) = &self.context else {
            return "No trading context loaded. Ask user to run analysis first.".to_string();
        };

        let mut parts = vec![format!(
            "Stock: {} | Current Price: ${:.2}",
            context.ticker, context.current_price
        )];

        if let Some(market) = &context.market_analysis {
            parts.push(format!(
                "Market Signal: {} ({}% confidence)",
                market.signal.as_str(),
                market.confidence
            ));
        }

        if let Some(technical) = &context.technical_analysis {
            parts.push(format!(
                "Trend: {} | Support: ${:.2} | Resistance: ${:.2}",
                technical.trend.as_str(),
                technical.support.unwrap_or_default(),
                technical.resistance.unwrap_or_default()
            ));
        }

        if let Some(signal) = &context.generated_signal {
            parts.push(format!(
                "Agent Recommendation: {} | Entry: ${:.2} | Stop: ${:.2} | Target: ${:.2}",
                signal.action.as_str(),
                signal.entry_price.unwrap_or_default(),
                signal.stop_loss.unwrap_or_default(),
                signal.take_profit.unwrap_or_default()
            ));
        }

        parts.join("\n")
    }

    /// Clear the conversation, keeping the trading context.
    pub fn reset_conversation(&mut self) {
        self.history.clear();
    }

    /// The full append-only conversation log.
    pub fn conversation_history(&self) -> &[ConversationTurn] {
        &self.history
    }

    /// Every review produced this session, in order.
    pub fn review_log(&self) -> &[TradeReview] {
        &self.review_log
    }
}
