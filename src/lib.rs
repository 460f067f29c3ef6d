pub mod error;
pub mod format;
pub mod loan;
pub mod validate;

#[cfg(feature = "web")]
pub mod config;
#[cfg(feature = "web")]
pub mod web;

pub use error::{ValidationError, ValidationErrors};
pub use loan::{generate, NormalizedLoan, Schedule, ScheduleRow};
pub use validate::{validate, validate_with, Limits, RawSubmission};

// verifies that request-scoped types can cross handler threads
#[cfg(test)]
fn is_normal<T: Sized + Send + Sync + Unpin>() {}

#[test]
fn normal_types() {
    is_normal::<RawSubmission>();
    is_normal::<NormalizedLoan>();
    is_normal::<ScheduleRow>();
    is_normal::<Schedule>();
    is_normal::<ValidationErrors>();
}
