//! Validated (year, quarter) selection.
//!
//! A `Period` can only be constructed through discovery against the
//! store, so every downstream query runs against a period that is known
//! to exist. Selecting a period absent from the data fails fast instead
//! of silently returning an empty set indistinguishable from "no
//! transactions".

use crate::{
    error::{PulseError, PulseResult},
    store::PulseStore,
    types::{Quarter, Year},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    year: Year,
    quarter: Quarter,
}

impl Period {
    /// Validate a selection against the discovered option set.
    pub fn select(store: &PulseStore, year: Year, quarter: Quarter) -> PulseResult<Self> {
        let years = store.distinct_years()?;
        if !years.contains(&year) {
            return Err(PulseError::InvalidPeriod { year, quarter });
        }
        let quarters = store.quarters_for_year(year)?;
        if !quarters.contains(&quarter) {
            return Err(PulseError::InvalidPeriod { year, quarter });
        }
        Ok(Self { year, quarter })
    }

    pub fn year(&self) -> Year {
        self.year
    }

    pub fn quarter(&self) -> Quarter {
        self.quarter
    }

    /// Display form used in chart titles.
    pub fn label(&self) -> String {
        format!("Year: {}, Q{}", self.year, self.quarter)
    }
}
