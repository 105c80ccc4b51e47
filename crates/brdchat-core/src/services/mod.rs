pub mod chat;
pub mod reports;
