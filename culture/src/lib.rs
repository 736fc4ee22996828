//! URL culture prefixes and per-request culture resolution.
//!
//! [`services::url_parser`] reads and rewrites the `xx-yy` culture prefix of a
//! URL path. [`services::culture_resolver`] combines it with the culture
//! stored for the current request and the configured default culture.

pub mod config;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
mod tests;

pub use models::Culture;
pub use services::{CultureSlot, CultureStore, RequestCulture, ResolutionConfig, ResolutionMode};
pub use utils::{CultureError, CultureResult};
