//! Period-over-period growth derivation.
//!
//! Growth is computed with an explicit sequence scan per state and an
//! explicit previous-value slot, so the two undefined cases are designed
//! branches rather than accidents of a library:
//!   - the first observed period of a state has no prior value;
//!   - a zero prior value makes the ratio unbounded.
//! Both yield `growth_pct = None` and are filtered before presentation,
//! never propagated as an infinity or NaN into a chart.

use crate::{
    error::{PulseError, PulseResult},
    frame::{Cell, ResultSet},
    period::Period,
    types::{Quarter, Year},
};
use serde::Serialize;

/// One point of a per-state time series, extracted from a result set
/// with (state, year, quarter) grain.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub state: String,
    pub year: Year,
    pub quarter: Quarter,
    pub amount: f64,
}

impl SeriesPoint {
    /// Pull a series out of a frame by column name. A NULL aggregate
    /// cell reads as 0.0; SUM over the grouped grain does not produce
    /// NULL from the source tables.
    pub fn from_frame(frame: &ResultSet, value_column: &str) -> PulseResult<Vec<SeriesPoint>> {
        let state_idx = frame.column_index("state")?;
        let year_idx = frame.column_index("year")?;
        let quarter_idx = frame.column_index("quarter")?;
        let value_idx = frame.column_index(value_column)?;

        let mut points = Vec::with_capacity(frame.len());
        for row in &frame.rows {
            points.push(SeriesPoint {
                state: row[state_idx].as_str().unwrap_or_default().to_string(),
                year: row[year_idx].as_i64().unwrap_or_default(),
                quarter: row[quarter_idx].as_i64().unwrap_or_default(),
                amount: row[value_idx].as_f64().unwrap_or_default(),
            });
        }
        Ok(points)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthRow {
    pub state: String,
    pub year: Year,
    pub quarter: Quarter,
    pub amount: f64,
    /// None for the first observed period of the state and for a zero
    /// prior-period value.
    pub growth_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthSeries {
    pub rows: Vec<GrowthRow>,
}

impl GrowthSeries {
    /// Derive period-over-period growth per state.
    ///
    /// Points are ordered by (state, year, quarter) ascending before the
    /// scan so "previous period" is well-defined within each state.
    pub fn derive(mut points: Vec<SeriesPoint>) -> Self {
        points.sort_by(|a, b| {
            (a.state.as_str(), a.year, a.quarter).cmp(&(b.state.as_str(), b.year, b.quarter))
        });

        let mut rows = Vec::with_capacity(points.len());
        let mut prev: Option<(String, f64)> = None;
        for point in points {
            let growth_pct = match &prev {
                Some((state, value)) if *state == point.state => {
                    if *value == 0.0 {
                        log::warn!(
                            "growth undefined for {} {} Q{}: zero prior-period value",
                            point.state,
                            point.year,
                            point.quarter,
                        );
                        None
                    } else {
                        Some((point.amount - value) / value * 100.0)
                    }
                }
                _ => None,
            };
            prev = Some((point.state.clone(), point.amount));
            rows.push(GrowthRow {
                state: point.state,
                year: point.year,
                quarter: point.quarter,
                amount: point.amount,
                growth_pct,
            });
        }
        Self { rows }
    }

    /// Defined growth values at exactly the selected period, as a
    /// (state, growth_pct) frame for the bar view. Undefined rows are
    /// dropped; if nothing survives the filter the step reports "no
    /// data" instead of rendering an empty chart.
    pub fn at_period(&self, period: &Period) -> PulseResult<ResultSet> {
        let mut frame = ResultSet::new(vec!["state".to_string(), "growth_pct".to_string()]);
        for row in &self.rows {
            if row.year == period.year() && row.quarter == period.quarter() {
                if let Some(pct) = row.growth_pct {
                    frame.push(vec![Cell::Text(row.state.clone()), Cell::Real(pct)]);
                }
            }
        }
        if frame.is_empty() {
            return Err(PulseError::empty(format!(
                "no growth values for {}",
                period.label()
            )));
        }
        Ok(frame)
    }

    /// State × quarter growth matrix for the heatmap: quarters of the
    /// selected year up to and including the selected quarter. Cells
    /// without a defined growth value stay None and render as missing.
    pub fn pivot(&self, period: &Period) -> PulseResult<PivotTable> {
        let in_scope: Vec<&GrowthRow> = self
            .rows
            .iter()
            .filter(|r| {
                r.year == period.year()
                    && r.quarter <= period.quarter()
                    && r.growth_pct.is_some()
            })
            .collect();
        if in_scope.is_empty() {
            return Err(PulseError::empty(format!(
                "no growth values to pivot for {}",
                period.label()
            )));
        }

        let mut states: Vec<String> = in_scope.iter().map(|r| r.state.clone()).collect();
        states.sort();
        states.dedup();
        let mut quarters: Vec<Quarter> = in_scope.iter().map(|r| r.quarter).collect();
        quarters.sort_unstable();
        quarters.dedup();

        let cells = states
            .iter()
            .map(|state| {
                quarters
                    .iter()
                    .map(|quarter| {
                        in_scope
                            .iter()
                            .find(|r| r.state == *state && r.quarter == *quarter)
                            .and_then(|r| r.growth_pct)
                    })
                    .collect()
            })
            .collect();

        Ok(PivotTable {
            row_key: "state".to_string(),
            col_key: "quarter".to_string(),
            rows: states,
            cols: quarters,
            cells,
        })
    }
}

/// Growth values reshaped to state rows × quarter columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotTable {
    pub row_key: String,
    pub col_key: String,
    pub rows: Vec<String>,
    pub cols: Vec<Quarter>,
    pub cells: Vec<Vec<Option<f64>>>,
}

impl PivotTable {
    pub fn cell(&self, row: &str, col: Quarter) -> Option<f64> {
        let r = self.rows.iter().position(|s| s == row)?;
        let c = self.cols.iter().position(|q| *q == col)?;
        self.cells[r][c]
    }

    pub fn is_blank(&self) -> bool {
        self.rows.is_empty() || self.cells.iter().all(|r| r.iter().all(|c| c.is_none()))
    }
}
