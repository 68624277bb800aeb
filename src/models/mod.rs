pub mod account;
pub mod chat;
pub mod plan;
pub mod style;

pub use account::*;
pub use chat::*;
pub use style::*;
