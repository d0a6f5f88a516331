pub mod auth;

pub use auth::{AuthCache, Profile, Resolution, SessionGate, SessionRecord};
