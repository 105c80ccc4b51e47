pub mod chat;
pub mod reports;
pub mod state;

pub use state::AppState;
