//! Relógio da aplicação
//!
//! "Hoje" é comparado em granularidade de dia, na data local.

use chrono::{DateTime, Local, NaiveDate};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Id provisório para planos sem id do servidor (timestamp em ms)
    fn synthetic_id(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// Relógio real do sistema
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Relógio parado num instante fixo
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}
