pub mod cli;
pub mod config;
pub mod corpus;
pub mod document;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod keywords;
pub mod normalize;
pub mod rank;
pub mod segment;

pub use corpus::{BuildReport, EngineState, PageChat};
pub use error::{PageChatError, Result};
pub use extract::ContactRecord;
pub use rank::Answer;
