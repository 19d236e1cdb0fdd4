pub mod chat;
pub mod curriculum;
pub mod onboard;
