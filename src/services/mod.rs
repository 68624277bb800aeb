pub mod chat;
pub mod entitlements;
pub mod metrics;
pub mod styles;

pub use chat::*;
pub use entitlements::*;
pub use metrics::*;
pub use styles::*;
