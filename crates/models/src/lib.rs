//! Entities for the booking marketplace plus the small amount of logic that
//! belongs to the data itself: status transition tables, validators and the
//! booking-number generator.

pub mod errors;
pub mod db;
pub mod user;
pub mod provider;
pub mod booking;

#[cfg(test)]
mod tests;
