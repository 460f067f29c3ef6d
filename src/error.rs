use std::fmt;
use thiserror::Error;

/// A single rejected rule of a loan submission. The display text is the
/// message shown to the borrower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name is required")]
    MissingName,

    #[error("surname is required")]
    MissingSurname,

    #[error("phone is required")]
    MissingPhone,

    #[error("loan amount must be a positive number")]
    InvalidPrincipal,

    #[error("down payment must be zero or positive")]
    InvalidDownPayment,

    #[error("number of installments must be a positive integer")]
    InvalidInstallmentCount,

    #[error("number of installments cannot exceed {0}")]
    TooManyInstallments(u32),

    #[error("start date must be in YYYY-MM-DD format")]
    InvalidStartDate,

    #[error("down payment cannot exceed loan amount")]
    DownPaymentExceedsPrincipal,
}

/// Every rule a submission failed, in rule order. Never empty when returned
/// from validation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, err: ValidationError) {
        self.0.push(err);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, err: &ValidationError) -> bool {
        self.0.contains(err)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// The human readable messages, one per failed rule.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
