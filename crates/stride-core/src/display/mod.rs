//! Display formatting for domain models and derived views.
//!
//! All formatters produce markdown for rich terminal display. Display
//! implementations live here rather than on the model definitions to keep
//! data structures separate from presentation.
//!
//! - [`datetime`]: Date/time formatting utilities
//! - [`models`]: Display implementations for domain models and read models

pub mod datetime;
pub mod models;

pub use datetime::LocalDateTime;
