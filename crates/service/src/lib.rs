//! Service layer for the booking marketplace.
//! - Resource services (users, providers, bookings, admin stats) own the business rules.
//! - `auth` exchanges an external identity credential for a session token.
//! - Entities, transition tables and validators come from the `models` crate.

pub mod errors;
pub mod patch;
pub mod auth;
pub mod user_service;
pub mod provider_service;
pub mod booking_service;
pub mod admin_service;
#[cfg(test)]
pub mod test_support;

pub use admin_service::{AdminService, DashboardStats};
pub use booking_service::BookingService;
pub use provider_service::ProviderService;
pub use user_service::UserService;
