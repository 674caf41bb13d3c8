pub mod badge;
pub mod user_badge;
