//! Hana Config
//!
//! Configuration for the platform: the loan product catalog, support
//! screen content, and server settings. Content ships as YAML with
//! built-in defaults matching the standard lineup; settings layer an
//! optional file under `HANA_*` environment overrides.

pub mod catalog;
pub mod settings;
pub mod support;

pub use catalog::{CatalogError, ProductCatalog};
pub use settings::Settings;
pub use support::{BrandInfo, ContactChannel, FaqEntry, SupportContent, SupportError};
