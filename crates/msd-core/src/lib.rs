//! msd-core: shared foundation for the mass-spring-damper workspace.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - range (closed parameter ranges used for slider-style clamping)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod range;

pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use range::Range;
