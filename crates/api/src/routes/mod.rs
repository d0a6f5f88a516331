pub mod auth;
pub mod dashboard;
pub mod health;

pub use auth::{google_login, logout};
pub use dashboard::dashboard;
pub use health::health_check;
