use coach_core::{DetectedPattern, PatternDetector, Severity};
use tracing::debug;

/// (phrase, severity, message, consequence)
const DANGEROUS_PATTERNS: &[(&str, Severity, &str, &str)] = &[
    (
        "no stop",
        Severity::Critical,
        "Trading without stop loss detected",
        "Unlimited loss potential",
    ),
    (
        "all in",
        Severity::Critical,
        "All-in position detected",
        "Zero risk diversification",
    ),
    (
        "averaging down",
        Severity::Critical,
        "Averaging down in losing trade",
        "Compounding losses, doubling risk",
    ),
    (
        "double down",
        Severity::Critical,
        "Doubling position in losing trade",
        "Revenge trading, risk explosion",
    ),
    (
        "revenge",
        Severity::Critical,
        "Revenge trading detected",
        "Emotional decision-making",
    ),
    (
        "hope",
        Severity::Warning,
        "Hope-based trading detected",
        "No defined exit strategy",
    ),
    (
        "hold forever",
        Severity::Warning,
        "No exit plan",
        "Unable to cut losses",
    ),
    (
        "can't lose",
        Severity::Warning,
        "Overconfidence detected",
        "Ignoring risk management",
    ),
];

/// Keyword scanner over free-text trade reasoning.
///
/// Case-insensitive substring matching against a fixed phrase table. The
/// findings are advisory and never feed the numeric severity of a
/// validation pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct DangerousPatternScanner;

impl PatternDetector for DangerousPatternScanner {
    fn detect(&self, text: &str) -> Vec<DetectedPattern> {
        let lowered = text.to_lowercase();
        let found: Vec<DetectedPattern> = DANGEROUS_PATTERNS
            .iter()
            .filter(|(phrase, ..)| lowered.contains(phrase))
            .map(|(phrase, severity, message, consequence)| DetectedPattern {
                phrase: (*phrase).to_string(),
                severity: *severity,
                message: (*message).to_string(),
                consequence: (*consequence).to_string(),
            })
            .collect();

        if !found.is_empty() {
            debug!(count = found.len(), "dangerous patterns in reasoning");
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_in_detected_once() {
        let scanner = DangerousPatternScanner;
        let found = scanner.detect("Going ALL IN on this breakout");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].phrase, "all in");
        assert_eq!(found[0].severity, Severity::Critical);
    }

    #[test]
    fn clean_reasoning_yields_nothing() {
        let scanner = DangerousPatternScanner;
        let found = scanner.detect("Entry above support with volume confirmation");
        assert!(found.is_empty());
    }

    #[test]
    fn multiple_patterns_stack() {
        let scanner = DangerousPatternScanner;
        let found = scanner.detect("no stop needed, I hope it bounces");
        assert_eq!(found.len(), 2);
    }
}
