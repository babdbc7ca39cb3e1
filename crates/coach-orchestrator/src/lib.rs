pub mod coach;
pub mod config;
pub mod feedback;
pub mod models;
#[cfg(test)]
mod tests;

pub use coach::TradingCoach;
pub use config::CoachConfig;
pub use feedback::generate_coach_feedback;
pub use models::*;
