//! Request middleware.
//!
//! Purpose: request lifecycle concerns that sit outside individual handlers,
//! currently trace correlation and access logging.

pub mod trace;

pub use trace::Trace;
