//! Hana Core
//!
//! Domain model and pure calculations for the Hana Microfinance platform:
//! loan accounts and their lifecycle, savings, transactions, presentation
//! mapping, progress math, registration validation, and amortization
//! utilities. Everything here is synchronous and side-effect free; the
//! service crates build on top of it.

pub mod domain;
pub mod error;
pub mod financial;
pub mod money;
pub mod presentation;
pub mod progress;
pub mod validation;

pub use domain::*;
pub use error::DomainError;
