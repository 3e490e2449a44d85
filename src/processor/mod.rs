pub mod header_matcher;
pub mod metrics_aggregator;
pub mod payload_builder;
pub mod validator;

pub use header_matcher::*;
pub use metrics_aggregator::*;
pub use payload_builder::*;
pub use validator::*;
