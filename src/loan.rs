use chrono::{Months, NaiveDate};
use log::trace;
use std::fmt;

use crate::format::{format_amount, format_date};

/// A loan request that passed every validation rule. Only
/// [`crate::validate::validate`] builds one, so the amounts, count and date
/// are known to be consistent.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NormalizedLoan {
    pub(crate) name: String,
    pub(crate) surname: String,
    pub(crate) phone: String,
    pub(crate) principal: f64,
    pub(crate) down_payment: f64,
    pub(crate) installment_count: u32,
    pub(crate) start_date: NaiveDate,
}

impl NormalizedLoan {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn principal(&self) -> f64 {
        self.principal
    }

    pub fn down_payment(&self) -> f64 {
        self.down_payment
    }

    pub fn installment_count(&self) -> u32 {
        self.installment_count
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Principal minus down payment: what the installments repay.
    pub fn financed_balance(&self) -> f64 {
        self.principal - self.down_payment
    }

    /// Equal share of the financed balance, unrounded. No interest.
    pub fn installment_amount(&self) -> f64 {
        self.financed_balance() / f64::from(self.installment_count)
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScheduleRow {
    pub pmt_number: u32,
    pub due_date: NaiveDate,
    pub payment_amount: f64,
    pub remaining_balance: f64,
}

impl ScheduleRow {
    pub fn new(
        pmt_number: u32,
        due_date: NaiveDate,
        payment_amount: f64,
        remaining_balance: f64,
    ) -> Self {
        Self {
            pmt_number,
            due_date,
            payment_amount,
            remaining_balance,
        }
    }
}

impl fmt::Display for ScheduleRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pmt number {}, date {}, payment {}, remaining balance {}",
            self.pmt_number + 1,
            format_date(&self.due_date),
            format_amount(self.payment_amount),
            format_amount(self.remaining_balance)
        )
    }
}

/// A loan together with its computed repayment rows.
#[derive(PartialEq, Debug)]
pub struct Schedule {
    pub loan: NormalizedLoan,
    balance: f64,
    pmt_amount: f64,
    scheduled_pmts: Vec<ScheduleRow>,
}

impl Schedule {
    pub fn new(loan: NormalizedLoan) -> Self {
        let scheduled_pmts = generate(&loan);
        Self {
            balance: loan.financed_balance(),
            pmt_amount: loan.installment_amount(),
            loan,
            scheduled_pmts,
        }
    }

    pub fn get_balance(&self) -> &f64 {
        &self.balance
    }

    pub fn get_pmt_amount(&self) -> &f64 {
        &self.pmt_amount
    }

    pub fn get_pmt_count(&self) -> usize {
        self.scheduled_pmts.len()
    }

    pub fn rows(&self) -> &[ScheduleRow] {
        &self.scheduled_pmts
    }

    /// One line describing installment `pmt_number` (1-based).
    pub fn get_pmt_info(&self, &pmt_number: &usize) -> String {
        match self.get_pmt_detail(&pmt_number) {
            Some(pmt) => pmt.to_string(),
            None => "No payment information.".to_string(),
        }
    }

    /// Row for installment `pmt_number` (1-based).
    pub fn get_pmt_detail(&self, &pmt_number: &usize) -> Option<&ScheduleRow> {
        pmt_number
            .checked_sub(1)
            .and_then(|idx| self.scheduled_pmts.get(idx))
    }

    /// Trace every installment line, first to last.
    pub fn show_amortization(&self) {
        for pmt_number in 1..=self.get_pmt_count() {
            trace!("{}", self.get_pmt_info(&pmt_number));
        }
    }
}

/// Build one row per installment. Row `i` is due `i` months after the start
/// date and shows the financed balance minus `i` payments, floored at zero.
pub fn generate(loan: &NormalizedLoan) -> Vec<ScheduleRow> {
    let balance = loan.financed_balance();
    let payment = loan.installment_amount();

    (0..loan.installment_count)
        .map(|i| {
            let due_date = get_due_date(&loan.start_date, i);
            let remaining = (balance - payment * f64::from(i)).max(0.);
            trace!(
                "pmt # {}, due {}, payment {}, remaining {}",
                i + 1,
                due_date,
                payment,
                remaining
            );
            ScheduleRow::new(i, due_date, payment, remaining)
        })
        .collect()
}

/// `start_date` plus `months` calendar months. A day-of-month missing from
/// the target month clamps to that month's last day; each date is derived
/// from the start date so a clamp never carries into later months.
pub fn get_due_date(&start_date: &NaiveDate, months: u32) -> NaiveDate {
    // validated loans stay far below chrono's upper bound
    start_date
        .checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}
