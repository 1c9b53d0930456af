//! # OrgPulse API
//!
//! Stateless JSON endpoints over the OrgPulse scorers and similarity ranker.
//!
//! Every request carries the table it operates on plus an optional `today`
//! that pins the reference date; nothing is kept between requests.

pub mod config;
pub mod rest;

pub use config::ApiConfig;
pub use rest::{routes, RestApi};
