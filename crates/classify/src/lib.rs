pub mod datasets;
pub mod engine;
pub mod lenders;
pub mod patterns;

pub use datasets::{ConfigError, LenderDataset, RuleDataset};
pub use engine::{flags, RevenueClassifier};
pub use lenders::LenderIndex;
pub use patterns::PatternStore;
