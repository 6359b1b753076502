pub mod ai;
pub mod analytics;
pub mod extract;
pub mod health;
