//! Handlers 模块

pub mod access_codes;
pub mod audit;
pub mod health;
pub mod metrics;

pub use access_codes::*;
pub use audit::*;
pub use health::*;
pub use metrics::*;
