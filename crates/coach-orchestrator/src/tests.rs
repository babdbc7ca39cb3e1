#[cfg(test)]
mod coach_tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chat_client::{ChatError, ChatMessage, ChatProvider, ChatResult};
    use coach_core::{
        AnalystSignal, CoachError, MarketAnalysis, Sentiment, SentimentAnalysis,
        TechnicalAnalysis, TradeContext, TradeDirection, TradePlan, Trend, Verdict,
    };

    use crate::coach::TradingCoach;
    use crate::feedback::generate_coach_feedback;
    use crate::models::EntrySuggestion;

    /// Scripted provider: replies with a fixed line, or fails when no
    /// script is given. Records how many messages each call received.
    struct MockProvider {
        reply: Option<String>,
        seen_message_counts: Mutex<Vec<usize>>,
    }

    impl MockProvider {
        fn scripted(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(reply.to_string()),
                seen_message_counts: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: None,
                seen_message_counts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ChatProvider for MockProvider {
        async fn complete(&self, messages: &[ChatMessage]) -> ChatResult<String> {
            self.seen_message_counts
                .lock()
                .unwrap()
                .push(messages.len());
            match &self.reply {
                Some(reply) => Ok(reply.clone()),
                None => Err(ChatError::ServiceUnavailable("model offline".to_string())),
            }
        }

        fn backend_name(&self) -> &'static str {
            "mock"
        }
    }

    fn coach() -> TradingCoach {
        TradingCoach::new(MockProvider::scripted("Looks disciplined."))
    }

    fn bullish_context() -> TradeContext {
        let mut ctx = TradeContext::new("AAPL", 100.0);
        ctx.market_analysis = Some(MarketAnalysis {
            signal: AnalystSignal::Buy,
            confidence: 80.0,
        });
        ctx.technical_analysis = Some(TechnicalAnalysis {
            trend: Trend::Bullish,
            support: Some(99.0),
            resistance: Some(110.0),
            rsi: Some(45.0),
        });
        ctx.sentiment_analysis = Some(SentimentAnalysis {
            overall_sentiment: Sentiment::Bullish,
            score: 0.5,
        });
        ctx
    }

    fn solid_plan() -> TradePlan {
        TradePlan {
            direction: TradeDirection::Long,
            entry_price: Some(100.0),
            stop_loss: Some(98.0),
            take_profit: Some(106.0),
            position_size: Some(50),
            account_size: 10_000.0,
            user_reasoning: "Breakout above support with strong volume and momentum; risk \
                             capped at 1% with a hard stop"
                .to_string(),
        }
    }

    #[test]
    fn solid_plan_is_approved() {
        let mut coach = coach();
        coach.set_context(bullish_context());

        let review = coach.validate_trade_plan(&solid_plan());
        assert_eq!(review.overall_verdict, Verdict::Approved);
        assert!(review.can_execute);
        assert!(review.dangerous_patterns.is_empty());
        assert_eq!(review.ticker, "AAPL");
    }

    #[test]
    fn missing_stop_rejects_regardless_of_strategy_score() {
        let mut coach = coach();
        coach.set_context(bullish_context());

        let mut plan = solid_plan();
        plan.stop_loss = None;

        let review = coach.validate_trade_plan(&plan);
        assert_eq!(review.overall_verdict, Verdict::Rejected);
        assert!(!review.can_execute);
    }

    #[test]
    fn warning_severity_downgrades_to_caution() {
        let mut coach = coach();
        coach.set_context(bullish_context());

        let mut plan = solid_plan();
        plan.take_profit = Some(103.5); // R:R = 1.75, warning territory

        let review = coach.validate_trade_plan(&plan);
        assert_eq!(review.overall_verdict, Verdict::Caution);
    }

    #[test]
    fn dangerous_reasoning_is_surfaced() {
        let mut coach = coach();
        coach.set_context(bullish_context());

        let mut plan = solid_plan();
        plan.user_reasoning = "Going all in, this can't lose".to_string();

        let review = coach.validate_trade_plan(&plan);
        assert_eq!(review.dangerous_patterns.len(), 2);
        assert!(review
            .dangerous_patterns
            .iter()
            .any(|p| p.phrase == "all in"));
    }

    #[test]
    fn review_log_grows_with_each_validation() {
        let mut coach = coach();
        coach.set_context(bullish_context());

        coach.validate_trade_plan(&solid_plan());
        coach.validate_trade_plan(&solid_plan());
        assert_eq!(coach.review_log().len(), 2);
    }

    #[test]
    fn entry_suggestion_requires_context() {
        let coach = coach();
        let err = coach.suggest_optimal_entry().unwrap_err();
        assert!(matches!(err, CoachError::MissingContext(_)));
    }

    #[test]
    fn buy_signal_yields_long_setup() {
        let mut coach = coach();
        coach.set_context(bullish_context());

        match coach.suggest_optimal_entry().unwrap() {
            EntrySuggestion::Setup(setup) => {
                assert_eq!(setup.direction, TradeDirection::Long);
                assert!(setup.stop_loss < setup.optimal_entry);
                assert!(setup.take_profit > setup.optimal_entry);
                assert!(setup.risk_reward_ratio > 0.0);
            }
            EntrySuggestion::Hold { .. } => panic!("expected a long setup"),
        }
    }

    #[test]
    fn sell_signal_yields_short_setup() {
        let mut ctx = bullish_context();
        ctx.market_analysis = Some(MarketAnalysis {
            signal: AnalystSignal::Sell,
            confidence: 75.0,
        });
        let mut coach = coach();
        coach.set_context(ctx);

        match coach.suggest_optimal_entry().unwrap() {
            EntrySuggestion::Setup(setup) => {
                assert_eq!(setup.direction, TradeDirection::Short);
                assert!(setup.stop_loss > setup.optimal_entry);
                assert!(setup.take_profit < setup.optimal_entry);
            }
            EntrySuggestion::Hold { .. } => panic!("expected a short setup"),
        }
    }

    #[test]
    fn hold_signal_suggests_waiting() {
        let mut ctx = bullish_context();
        ctx.market_analysis = Some(MarketAnalysis {
            signal: AnalystSignal::Hold,
            confidence: 60.0,
        });
        let mut coach = coach();
        coach.set_context(ctx);

        assert!(matches!(
            coach.suggest_optimal_entry().unwrap(),
            EntrySuggestion::Hold { .. }
        ));
    }

    #[test]
    fn position_size_with_flat_stop_errors() {
        let coach = coach();
        let err = coach
            .calculate_position_size(50.0, 50.0, 10_000.0, None)
            .unwrap_err();
        assert!(matches!(err, CoachError::InvalidInput(_)));
    }

    #[test]
    fn position_size_variants() {
        let coach = coach();
        let sizing = coach
            .calculate_position_size(100.0, 98.0, 10_000.0, None)
            .unwrap();

        // 2% of 10k = $200 budget at $2/share risk
        assert_eq!(sizing.recommended_size, 100);
        assert_eq!(sizing.conservative_size, 75);
        assert_eq!(sizing.aggressive_size, 125);
        assert!((sizing.dollar_risk - 200.0).abs() < 1e-9);
    }

    #[test]
    fn aggressive_variant_capped_at_high_risk() {
        let coach = coach();
        let sizing = coach
            .calculate_position_size(100.0, 98.0, 10_000.0, Some(3.0))
            .unwrap();
        assert_eq!(sizing.aggressive_size, sizing.recommended_size);
    }

    #[test]
    fn risk_reward_check_mirrors_validator() {
        let coach = coach();
        let check = coach.check_risk_reward(100.0, 98.0, 106.0, TradeDirection::Long);

        assert!(check.is_valid);
        assert!((check.rr_ratio - 3.0).abs() < 1e-9);
        assert_eq!(check.recommendation, "Excellent");
        assert!((check.risk_amount - 2.0).abs() < 1e-9);
        assert!((check.reward_amount - 6.0).abs() < 1e-9);
    }

    #[test]
    fn feedback_renders_verdict_and_plan() {
        let mut coach = coach();
        coach.set_context(bullish_context());
        let review = coach.validate_trade_plan(&solid_plan());

        let feedback = generate_coach_feedback(&review);
        assert!(feedback.contains("TRADING COACH VERDICT: APPROVED"));
        assert!(feedback.contains("Confidence Score:"));
        assert!(feedback.contains("EXECUTION PLAN:"));
    }

    #[test]
    fn context_summary_reports_missing_context() {
        let coach = coach();
        assert!(coach
            .build_context_summary()
            .contains("No trading context loaded"));
    }

    #[tokio::test]
    async fn chat_appends_both_turns() {
        let provider = MockProvider::scripted("Set your stop first.");
        let mut coach = TradingCoach::new(provider);

        let reply = coach.chat("Should I buy AAPL?").await;
        assert_eq!(reply.response, "Set your stop first.");
        assert_eq!(reply.conversation_turn, 1);
        assert!(!reply.context_available);
        assert_eq!(coach.conversation_history().len(), 2);
    }

    #[tokio::test]
    async fn chat_failure_becomes_apology_and_history_advances() {
        let provider = MockProvider::failing();
        let mut coach = TradingCoach::new(provider);

        let reply = coach.chat("Thoughts?").await;
        assert!(reply.response.contains("I apologize"));
        assert_eq!(coach.conversation_history().len(), 2);
    }

    #[tokio::test]
    async fn chat_window_is_bounded_while_history_grows() {
        let provider = MockProvider::scripted("Noted.");
        let mut coach = TradingCoach::new(provider.clone());

        for i in 0..8 {
            coach.chat(&format!("question {i}")).await;
        }
        assert_eq!(coach.conversation_history().len(), 16);

        // Last call: 2 system messages + 10 windowed turns + current message
        let counts = provider.seen_message_counts.lock().unwrap();
        assert_eq!(*counts.last().unwrap(), 13);
    }

    #[tokio::test]
    async fn reset_clears_history_but_keeps_context() {
        let provider = MockProvider::scripted("Noted.");
        let mut coach = TradingCoach::new(provider);
        coach.set_context(bullish_context());

        coach.chat("hello").await;
        coach.reset_conversation();

        assert!(coach.conversation_history().is_empty());
        assert!(coach.context().is_some());
    }
}
