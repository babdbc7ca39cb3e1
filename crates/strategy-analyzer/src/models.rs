use serde::{Deserialize, Serialize};

/// Setup quality bucket derived from the final confidence score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetupGrade {
    Strong,
    Acceptable,
    Weak,
    Poor,
}

impl SetupGrade {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 75 => SetupGrade::Strong,
            s if s >= 60 => SetupGrade::Acceptable,
            s if s >= 40 => SetupGrade::Weak,
            _ => SetupGrade::Poor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SetupGrade::Strong => "STRONG",
            SetupGrade::Acceptable => "ACCEPTABLE",
            SetupGrade::Weak => "WEAK",
            SetupGrade::Poor => "POOR",
        }
    }
}

/// Strategic risk classification, separate from the hard validation severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyRiskLevel {
    Low,
    Medium,
    High,
}

impl StrategyRiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyRiskLevel::Low => "LOW",
            StrategyRiskLevel::Medium => "MEDIUM",
            StrategyRiskLevel::High => "HIGH",
        }
    }
}

/// A weakness found during scoring; `critical` ones drive the risk level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weakness {
    pub text: String,
    pub critical: bool,
}

impl Weakness {
    pub fn minor(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            critical: false,
        }
    }

    pub fn critical(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            critical: true,
        }
    }
}

/// Partial result from one sub-scorer
#[derive(Debug, Clone, Default)]
pub(crate) struct FactorScore {
    pub score: u32,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<Weakness>,
    pub recommendations: Vec<String>,
}

/// Full strategic assessment of one trade plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyAssessment {
    pub ticker: String,
    /// Normalized confidence, always within 0..=100
    pub confidence_score: u8,
    pub grade: SetupGrade,
    pub assessment: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<Weakness>,
    pub recommendations: Vec<String>,
    pub risk_level: StrategyRiskLevel,
    pub execution_advice: Vec<String>,
}
