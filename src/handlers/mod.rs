//! HTTP handlers: the contact-submission workflow plus status, health, and
//! metrics endpoints.

pub mod contact;
pub mod health;
pub mod metrics;
pub mod status;

pub use contact::submit_contact;
pub use health::health_check;
pub use metrics::metrics_endpoint;
pub use status::{hello, root, test_database};
