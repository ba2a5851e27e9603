//! Seasonal and dynamic pricing engine.
//!
//! Composes seasonal date-range rules, a weekend surcharge and demand-based
//! dynamic pricing into a final price with a per-component breakdown. The
//! admin endpoints expose rule CRUD and the configuration singletons.

pub mod admin;
pub mod calculators;
pub mod calendar;
pub mod engine;
pub mod models;
pub mod occupancy;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;

// Re-export commonly used items
pub use calculators::round_money;
pub use engine::{OccupancySource, PricingEngine, RuleStore};
pub use routes::router;
