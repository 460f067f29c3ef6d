use clap::Parser;
use log::LevelFilter;
use std::net::SocketAddr;

use crate::validate::{Limits, DEFAULT_MAX_INSTALLMENTS};

/// Service settings, read from flags first and environment second.
#[derive(Parser, Debug, Clone)]
#[command(name = "loan-schedule", version, about = "Loan repayment schedule web form")]
pub struct Config {
    /// Address the HTTP listener binds to
    #[arg(long, env = "LOAN_SCHEDULE_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// off, error, warn, info, debug or trace
    #[arg(long, env = "LOAN_SCHEDULE_LOG", default_value = "info")]
    pub log_level: LevelFilter,

    /// Largest number of installments a submission may ask for
    #[arg(
        long,
        env = "LOAN_SCHEDULE_MAX_INSTALLMENTS",
        default_value_t = DEFAULT_MAX_INSTALLMENTS
    )]
    pub max_installments: u32,
}

impl Config {
    pub fn limits(&self) -> Limits {
        Limits {
            max_installments: self.max_installments,
        }
    }
}
