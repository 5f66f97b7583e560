//! HTTP middleware shared by every route.
//!
//! Authentication lives in `auth::middleware`; this module only carries
//! request logging.

pub mod logging;

pub use logging::log_requests;
