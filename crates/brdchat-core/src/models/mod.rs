pub mod report;
pub mod session;

pub use report::Report;
pub use session::{ChatMessage, ChatSession};
