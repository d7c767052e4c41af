use chrono::{Datelike, Local, NaiveDate};

/// Source of "today" for date validation.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;

    fn current_year(&self) -> i32 {
        self.today().year()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
