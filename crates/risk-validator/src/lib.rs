pub mod models;
pub mod patterns;
pub mod validator;

pub use models::*;
pub use patterns::DangerousPatternScanner;
pub use validator::RiskValidator;
