//! Business logic services for the NurtureWise Agro dashboard

pub mod auth;
pub mod economics;
pub mod farmer;
pub mod links;
pub mod session;

pub use auth::AuthService;
pub use farmer::FarmerStore;
pub use session::{SessionController, SessionRegistry, SessionState};
