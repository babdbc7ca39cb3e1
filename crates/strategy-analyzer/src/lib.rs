pub mod analyzer;
pub mod comparison;
pub mod models;
mod scorers;
#[cfg(test)]
mod tests;

pub use analyzer::StrategyAnalyzer;
pub use comparison::{compare_with_signal, DifferenceSeverity, SignalComparison, SignalDifference};
pub use models::*;
