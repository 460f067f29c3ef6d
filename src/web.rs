use askama::Template;
use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Router,
};
use log::{debug, error};
use std::sync::Arc;

use crate::format::{format_amount, format_date};
use crate::loan::Schedule;
use crate::validate::{validate_with, Limits, RawSubmission, DEFAULT_MAX_INSTALLMENTS};

/// Read-only state shared by every request.
#[derive(Debug, Clone, Copy)]
pub struct AppState {
    pub limits: Limits,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            limits: Limits {
                max_installments: DEFAULT_MAX_INSTALLMENTS,
            },
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(submit))
        .with_state(Arc::new(state))
}

enum Outcome {
    Pending,
    Rejected(Vec<String>),
    Computed(SummaryView),
}

struct SummaryView {
    name: String,
    surname: String,
    phone: String,
    principal: String,
    down_payment: String,
    installment_count: u32,
    balance: String,
    payment: String,
    rows: Vec<RowView>,
}

struct RowView {
    due_date: String,
    payment: String,
    remaining: String,
}

impl From<&Schedule> for SummaryView {
    fn from(schedule: &Schedule) -> Self {
        let loan = &schedule.loan;
        Self {
            name: loan.name().to_string(),
            surname: loan.surname().to_string(),
            phone: loan.phone().to_string(),
            principal: format_amount(loan.principal()),
            down_payment: format_amount(loan.down_payment()),
            installment_count: loan.installment_count(),
            balance: format_amount(*schedule.get_balance()),
            payment: format_amount(*schedule.get_pmt_amount()),
            rows: schedule
                .rows()
                .iter()
                .map(|row| RowView {
                    due_date: format_date(&row.due_date),
                    payment: format_amount(row.payment_amount),
                    remaining: format_amount(row.remaining_balance),
                })
                .collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
struct PageTemplate {
    outcome: Outcome,
    form: RawSubmission,
}

fn render<T: Template>(tpl: T) -> Result<Html<String>, StatusCode> {
    tpl.render().map(Html).map_err(|e| {
        error!("template rendering failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

async fn index() -> Result<Html<String>, StatusCode> {
    render(PageTemplate {
        outcome: Outcome::Pending,
        form: RawSubmission::default(),
    })
}

async fn submit(
    State(state): State<Arc<AppState>>,
    Form(raw): Form<RawSubmission>,
) -> Result<Html<String>, StatusCode> {
    debug!("submission received: {:?}", raw);

    let outcome = match validate_with(&raw, &state.limits) {
        Ok(loan) => {
            let schedule = Schedule::new(loan);
            schedule.show_amortization();
            Outcome::Computed(SummaryView::from(&schedule))
        }
        Err(errors) => Outcome::Rejected(errors.messages()),
    };

    render(PageTemplate {
        outcome,
        form: raw.trimmed(),
    })
}
