#[cfg(test)]
mod strategy_analyzer_tests {
    use coach_core::{
        AnalystSignal, GeneratedSignal, MarketAnalysis, Sentiment, SentimentAnalysis,
        TechnicalAnalysis, TradeContext, TradeDirection, TradePlan, Trend,
    };

    use crate::analyzer::StrategyAnalyzer;
    use crate::comparison::compare_with_signal;
    use crate::models::{SetupGrade, StrategyRiskLevel};

    fn full_context() -> TradeContext {
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
            score: 0.6,
        });
        ctx
    }

    fn full_plan() -> TradePlan {
        TradePlan {
            direction: TradeDirection::Long,
            entry_price: Some(100.0),
            stop_loss: Some(98.0),
            take_profit: Some(106.0),
            position_size: Some(50),
            account_size: 10_000.0,
            user_reasoning:
                "Entry above support on a breakout with rising volume and momentum; stop keeps \
                 risk at 1% of the account"
                    .to_string(),
        }
    }

    #[test]
    fn textbook_long_scores_near_one_hundred() {
        let assessment = StrategyAnalyzer.analyze(&full_plan(), &full_context());

        assert!(assessment.confidence_score >= 90);
        assert_eq!(assessment.grade, SetupGrade::Strong);
        assert_eq!(assessment.risk_level, StrategyRiskLevel::Low);
        assert!(assessment.weaknesses.is_empty());
    }

    #[test]
    fn empty_plan_scores_in_range() {
        let plan = TradePlan {
            direction: TradeDirection::Long,
            entry_price: None,
            stop_loss: None,
            take_profit: None,
            position_size: None,
            account_size: 10_000.0,
            user_reasoning: String::new(),
        };
        let ctx = TradeContext::new("AAPL", 100.0);

        let assessment = StrategyAnalyzer.analyze(&plan, &ctx);
        assert!(assessment.confidence_score <= 100);
        assert_eq!(assessment.grade, SetupGrade::Poor);
        assert_eq!(assessment.risk_level, StrategyRiskLevel::High);
        // Missing stop flagged as a critical-severity weakness
        assert!(assessment
            .weaknesses
            .iter()
            .any(|w| w.critical && w.text.contains("stop loss")));
    }

    #[test]
    fn analyze_is_idempotent() {
        let plan = full_plan();
        let ctx = full_context();
        let a = StrategyAnalyzer.analyze(&plan, &ctx);
        let b = StrategyAnalyzer.analyze(&plan, &ctx);

        assert_eq!(a.confidence_score, b.confidence_score);
        assert_eq!(a.strengths, b.strengths);
        assert_eq!(a.recommendations, b.recommendations);
    }

    #[test]
    fn conflicting_direction_is_penalized() {
        // Keep the context lean so the 100-point clamp can't mask the
        // difference between aligned and conflicted plans
        let mut aligned_ctx = full_context();
        aligned_ctx.sentiment_analysis = None;
        if let Some(tech) = aligned_ctx.technical_analysis.as_mut() {
            tech.rsi = None;
        }
        let mut conflicted_ctx = aligned_ctx.clone();
        conflicted_ctx.market_analysis = Some(MarketAnalysis {
            signal: AnalystSignal::Sell,
            confidence: 80.0,
        });

        let aligned = StrategyAnalyzer.analyze(&full_plan(), &aligned_ctx);
        let conflicted = StrategyAnalyzer.analyze(&full_plan(), &conflicted_ctx);

        assert!(conflicted.confidence_score < aligned.confidence_score);
        assert!(conflicted.weaknesses.iter().any(|w| w.critical));
        assert_eq!(conflicted.risk_level, StrategyRiskLevel::High);
    }

    #[test]
    fn neutral_trend_recommends_tighter_stops() {
        let mut ctx = full_context();
        ctx.technical_analysis = Some(TechnicalAnalysis {
            trend: Trend::Neutral,
            support: Some(99.0),
            resistance: Some(110.0),
            rsi: None,
        });

        let assessment = StrategyAnalyzer.analyze(&full_plan(), &ctx);
        assert!(assessment
            .recommendations
            .iter()
            .any(|r| r.contains("tighter stops")));
    }

    #[test]
    fn overbought_rsi_cautions_longs() {
        let mut ctx = full_context();
        ctx.technical_analysis = Some(TechnicalAnalysis {
            trend: Trend::Bullish,
            support: Some(99.0),
            resistance: None,
            rsi: Some(85.0),
        });

        let assessment = StrategyAnalyzer.analyze(&full_plan(), &ctx);
        assert!(assessment
            .weaknesses
            .iter()
            .any(|w| w.text.contains("overbought")));
        assert!(assessment
            .recommendations
            .iter()
            .any(|r| r.contains("pullback")));
    }

    #[test]
    fn emotional_reasoning_flagged() {
        let mut plan = full_plan();
        plan.user_reasoning = "I just feel this one is guaranteed to work".to_string();

        let assessment = StrategyAnalyzer.analyze(&plan, &full_context());
        assert!(assessment
            .weaknesses
            .iter()
            .any(|w| w.text.contains("Emotional language")));
        assert!(assessment
            .recommendations
            .iter()
            .any(|r| r.contains("Remove emotions")));
    }

    #[test]
    fn advice_includes_partial_profit_level() {
        let assessment = StrategyAnalyzer.analyze(&full_plan(), &full_context());
        // entry 100, target 106: 75% of the distance = 104.50
        assert!(assessment
            .execution_advice
            .iter()
            .any(|a| a.contains("$104.50")));
        assert!(assessment
            .execution_advice
            .iter()
            .any(|a| a.contains("Set stop loss IMMEDIATELY at $98.00")));
    }

    #[test]
    fn low_confidence_advice_blocks_execution() {
        let plan = TradePlan {
            direction: TradeDirection::Long,
            entry_price: None,
            stop_loss: None,
            take_profit: None,
            position_size: None,
            account_size: 10_000.0,
            user_reasoning: String::new(),
        };
        let assessment = StrategyAnalyzer.analyze(&plan, &TradeContext::new("AAPL", 100.0));
        assert!(assessment
            .execution_advice
            .iter()
            .any(|a| a.contains("Do NOT execute")));
    }

    #[test]
    fn identical_plan_fully_aligns_with_signal() {
        let plan = full_plan();
        let signal = GeneratedSignal {
            action: AnalystSignal::Buy,
            entry_price: Some(100.0),
            stop_loss: Some(98.0),
            take_profit: Some(106.0),
        };

        let comparison = compare_with_signal(&plan, &signal);
        assert!(comparison.differences.is_empty());
        assert_eq!(comparison.alignment_score, 100.0);
    }

    #[test]
    fn divergent_entry_is_reported() {
        let mut plan = full_plan();
        plan.entry_price = Some(110.0);
        let signal = GeneratedSignal {
            action: AnalystSignal::Buy,
            entry_price: Some(100.0),
            stop_loss: Some(98.0),
            take_profit: Some(106.0),
        };

        let comparison = compare_with_signal(&plan, &signal);
        assert!(comparison
            .differences
            .iter()
            .any(|d| d.aspect == "Entry Price"));
        assert!(comparison.alignment_score < 100.0);
    }
}
