use chrono::NaiveDate;
use log::{info, warn};

use crate::error::{ValidationError, ValidationErrors};
use crate::loan::NormalizedLoan;

/// Cap the web form applies unless configured otherwise.
pub const DEFAULT_MAX_INSTALLMENTS: u32 = 1200;

/// Start years stop at 9999 and chrono dates reach year 262143, so this many
/// months from any valid start date is still a representable due date.
pub const MAX_CALENDAR_INSTALLMENTS: u32 = 3_000_000;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Form fields exactly as submitted. Absent fields deserialize as empty text.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(default, rename_all = "camelCase")
)]
pub struct RawSubmission {
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub principal: String,
    pub down_payment: String,
    pub installment_count: String,
    pub start_date: String,
}

impl RawSubmission {
    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            surname: self.surname.trim().to_string(),
            phone: self.phone.trim().to_string(),
            principal: self.principal.trim().to_string(),
            down_payment: self.down_payment.trim().to_string(),
            installment_count: self.installment_count.trim().to_string(),
            start_date: self.start_date.trim().to_string(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Limits {
    pub max_installments: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_installments: MAX_CALENDAR_INSTALLMENTS,
        }
    }
}

/// Check a submission against every rule. The only bound on the installment
/// count is the calendar range of the due dates.
pub fn validate(raw: &RawSubmission) -> Result<NormalizedLoan, ValidationErrors> {
    validate_with(raw, &Limits::default())
}

/// Check a submission against every rule. All rules run; the error list
/// holds one entry per failed rule, in rule order.
pub fn validate_with(
    raw: &RawSubmission,
    limits: &Limits,
) -> Result<NormalizedLoan, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = raw.name.trim();
    let surname = raw.surname.trim();
    let phone = raw.phone.trim();
    if name.is_empty() {
        errors.push(ValidationError::MissingName);
    }
    if surname.is_empty() {
        errors.push(ValidationError::MissingSurname);
    }
    if phone.is_empty() {
        errors.push(ValidationError::MissingPhone);
    }

    let principal = parse_amount(&raw.principal);
    if !principal.is_some_and(|p| p > 0.) {
        errors.push(ValidationError::InvalidPrincipal);
    }

    let down_payment = parse_amount(&raw.down_payment);
    if !down_payment.is_some_and(|d| d >= 0.) {
        errors.push(ValidationError::InvalidDownPayment);
    }

    let installment_count = match parse_count(&raw.installment_count) {
        Some(n) if n > 0 => match u32::try_from(n) {
            Ok(n) if n <= limits.max_installments => Some(n),
            _ => {
                errors.push(ValidationError::TooManyInstallments(limits.max_installments));
                None
            }
        },
        _ => {
            errors.push(ValidationError::InvalidInstallmentCount);
            None
        }
    };

    let start_date = parse_start_date(&raw.start_date);
    if start_date.is_none() {
        errors.push(ValidationError::InvalidStartDate);
    }

    // only compared when both amounts parsed, whatever their sign
    if let (Some(principal), Some(down_payment)) = (principal, down_payment) {
        if down_payment > principal {
            errors.push(ValidationError::DownPaymentExceedsPrincipal);
        }
    }

    match (principal, down_payment, installment_count, start_date) {
        (Some(principal), Some(down_payment), Some(installment_count), Some(start_date))
            if errors.is_empty() =>
        {
            info!(
                "accepted loan of {} over {} installments from {}",
                principal, installment_count, start_date
            );
            Ok(NormalizedLoan {
                name: name.to_string(),
                surname: surname.to_string(),
                phone: phone.to_string(),
                principal,
                down_payment,
                installment_count,
                start_date,
            })
        }
        _ => {
            warn!("rejected submission with {} error(s): {}", errors.len(), errors);
            Err(errors)
        }
    }
}

/// A finite decimal amount such as `7450.05`, `-3`, `.5` or `1e3`.
/// Words like `inf` or `NaN` are refused.
pub fn parse_amount(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty()
        || !text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return None;
    }
    text.parse::<f64>().ok().filter(|amt| amt.is_finite())
}

/// A whole number with an optional sign. Leading zeros are refused except
/// for a lone `0`.
pub fn parse_count(text: &str) -> Option<i64> {
    let text = text.trim();
    let digits = text.strip_prefix(&['+', '-'][..]).unwrap_or(text);
    if digits.is_empty()
        || !digits.chars().all(|c| c.is_ascii_digit())
        || (digits.len() > 1 && digits.starts_with('0'))
    {
        return None;
    }
    text.parse::<i64>().ok()
}

/// A `YYYY-MM-DD` date that formats back to exactly the submitted text.
pub fn parse_start_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .filter(|date| date.format(DATE_FORMAT).to_string() == text)
}

#[cfg(test)]
mod tests {
    use super::{
        parse_amount, parse_count, parse_start_date, validate, validate_with, Limits, RawSubmission,
        MAX_CALENDAR_INSTALLMENTS,
    };
    use crate::error::ValidationError;
    use chrono::NaiveDate;
    use test_log::test;

    fn submission() -> RawSubmission {
        RawSubmission {
            name: "Martin".to_string(),
            surname: "Claire".to_string(),
            phone: "0601020304".to_string(),
            principal: "7450.05".to_string(),
            down_payment: "0".to_string(),
            installment_count: "15".to_string(),
            start_date: "2020-11-07".to_string(),
        }
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("7450.05"), Some(7450.05));
        assert_eq!(parse_amount("  12 "), Some(12.));
        assert_eq!(parse_amount("-3"), Some(-3.));
        assert_eq!(parse_amount("+.5"), Some(0.5));
        assert_eq!(parse_amount("1e3"), Some(1000.));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("   "), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("12,5"), None);
        assert_eq!(parse_amount("inf"), None);
        assert_eq!(parse_amount("NaN"), None);
        assert_eq!(parse_amount("1e999"), None);
        assert_eq!(parse_amount("1.2.3"), None);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("15"), Some(15));
        assert_eq!(parse_count(" 15 "), Some(15));
        assert_eq!(parse_count("+7"), Some(7));
        assert_eq!(parse_count("-2"), Some(-2));
        assert_eq!(parse_count("0"), Some(0));
        assert_eq!(parse_count("012"), None);
        assert_eq!(parse_count("1.5"), None);
        assert_eq!(parse_count("1e2"), None);
        assert_eq!(parse_count(""), None);
        assert_eq!(parse_count("-"), None);
        assert_eq!(parse_count("twelve"), None);
        assert_eq!(parse_count("99999999999999999999"), None);
    }

    #[test]
    fn test_parse_start_date() {
        assert_eq!(
            parse_start_date("2020-11-07"),
            NaiveDate::from_ymd_opt(2020, 11, 7)
        );
        assert_eq!(
            parse_start_date(" 2024-02-29 "),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(parse_start_date("2020-11-7"), None);
        assert_eq!(parse_start_date("2020-1-07"), None);
        assert_eq!(parse_start_date("2023-02-29"), None);
        assert_eq!(parse_start_date("2020-13-01"), None);
        assert_eq!(parse_start_date("07/11/2020"), None);
        assert_eq!(parse_start_date("2020-11-07T00:00"), None);
        assert_eq!(parse_start_date(""), None);
    }

    #[test]
    fn test_validate_ok() {
        let loan = validate(&submission()).unwrap();

        assert_eq!(loan.name(), "Martin");
        assert_eq!(loan.surname(), "Claire");
        assert_eq!(loan.phone(), "0601020304");
        assert_eq!(loan.principal(), 7450.05);
        assert_eq!(loan.down_payment(), 0.);
        assert_eq!(loan.installment_count(), 15);
        assert_eq!(loan.start_date(), NaiveDate::from_ymd_opt(2020, 11, 7).unwrap());
    }

    #[test]
    fn test_validate_trims_text() {
        let raw = RawSubmission {
            name: "  Martin ".to_string(),
            surname: "\tClaire".to_string(),
            phone: " 06 01 02 03 04 ".to_string(),
            ..submission()
        };
        let loan = validate(&raw).unwrap();

        assert_eq!(loan.name(), "Martin");
        assert_eq!(loan.surname(), "Claire");
        assert_eq!(loan.phone(), "06 01 02 03 04");
    }

    #[test]
    fn test_validate_blank_text_fields() {
        let raw = RawSubmission {
            name: "   ".to_string(),
            surname: String::new(),
            phone: "\n".to_string(),
            ..submission()
        };
        let errors = validate(&raw).unwrap_err();

        assert_eq!(
            errors.into_iter().collect::<Vec<_>>(),
            vec![
                ValidationError::MissingName,
                ValidationError::MissingSurname,
                ValidationError::MissingPhone,
            ]
        );
    }

    #[test]
    fn test_validate_negative_amounts() {
        let raw = RawSubmission {
            principal: "-100".to_string(),
            down_payment: "-1".to_string(),
            ..submission()
        };
        let errors = validate(&raw).unwrap_err();

        assert_eq!(
            errors.messages(),
            vec![
                "loan amount must be a positive number",
                "down payment must be zero or positive",
                "down payment cannot exceed loan amount",
            ]
        );

        let raw = RawSubmission {
            principal: "-100".to_string(),
            down_payment: "-200".to_string(),
            ..submission()
        };
        let errors = validate(&raw).unwrap_err();

        assert_eq!(
            errors.messages(),
            vec![
                "loan amount must be a positive number",
                "down payment must be zero or positive",
            ]
        );
    }

    #[test]
    fn test_validate_zero_principal() {
        let raw = RawSubmission {
            principal: "0".to_string(),
            ..submission()
        };
        let errors = validate(&raw).unwrap_err();

        assert_eq!(errors.messages(), vec!["loan amount must be a positive number"]);
    }

    #[test]
    fn test_validate_down_payment_exceeds_principal() {
        let raw = RawSubmission {
            principal: "1000".to_string(),
            down_payment: "1000.01".to_string(),
            ..submission()
        };
        let errors = validate(&raw).unwrap_err();

        assert_eq!(errors.messages(), vec!["down payment cannot exceed loan amount"]);
    }

    #[test]
    fn test_validate_exceeds_check_skipped_when_unparsed() {
        let raw = RawSubmission {
            principal: "lots".to_string(),
            down_payment: "1000".to_string(),
            ..submission()
        };
        let errors = validate(&raw).unwrap_err();

        assert_eq!(errors.messages(), vec!["loan amount must be a positive number"]);
    }

    #[test]
    fn test_validate_installment_count() {
        for count in ["0", "-3", "2.5", "", "ten", "012"] {
            let raw = RawSubmission {
                installment_count: count.to_string(),
                ..submission()
            };
            let errors = validate(&raw).unwrap_err();
            assert_eq!(
                errors.messages(),
                vec!["number of installments must be a positive integer"],
                "count {:?}",
                count
            );
        }
    }

    #[test]
    fn test_validate_installment_limit() {
        let limits = Limits {
            max_installments: 24,
        };
        let raw = RawSubmission {
            installment_count: "24".to_string(),
            ..submission()
        };
        assert!(validate_with(&raw, &limits).is_ok());

        let raw = RawSubmission {
            installment_count: "25".to_string(),
            ..submission()
        };
        let errors = validate_with(&raw, &limits).unwrap_err();
        assert_eq!(
            errors.messages(),
            vec!["number of installments cannot exceed 24"]
        );

        let raw = RawSubmission {
            installment_count: "5000000000".to_string(),
            ..submission()
        };
        let errors = validate(&raw).unwrap_err();
        assert_eq!(
            errors.into_iter().collect::<Vec<_>>(),
            vec![ValidationError::TooManyInstallments(MAX_CALENDAR_INSTALLMENTS)]
        );
    }

    #[test]
    fn test_validate_long_loans_without_cap() {
        let raw = RawSubmission {
            installment_count: "1201".to_string(),
            ..submission()
        };
        let loan = validate(&raw).unwrap();
        assert_eq!(loan.installment_count(), 1201);

        let raw = RawSubmission {
            installment_count: MAX_CALENDAR_INSTALLMENTS.to_string(),
            start_date: "9999-12-31".to_string(),
            ..submission()
        };
        assert!(validate(&raw).is_ok());

        let raw = RawSubmission {
            installment_count: (MAX_CALENDAR_INSTALLMENTS + 1).to_string(),
            ..submission()
        };
        assert!(validate(&raw).is_err());
    }

    #[test]
    fn test_validate_start_date() {
        let raw = RawSubmission {
            start_date: "2021-02-30".to_string(),
            ..submission()
        };
        let errors = validate(&raw).unwrap_err();

        assert_eq!(errors.messages(), vec!["start date must be in YYYY-MM-DD format"]);
    }

    #[test]
    fn test_raw_submission_trimmed() {
        let raw = RawSubmission {
            name: " Martin ".to_string(),
            start_date: "2020-11-07  ".to_string(),
            ..submission()
        };
        let trimmed = raw.trimmed();

        assert_eq!(trimmed.name, "Martin");
        assert_eq!(trimmed.start_date, "2020-11-07");
        assert_eq!(trimmed.principal, "7450.05");
    }
}
