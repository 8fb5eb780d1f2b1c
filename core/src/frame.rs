//! Tabular result sets produced by aggregation queries.
//!
//! A `ResultSet` is built once by the store, optionally reshaped by a
//! post-processing step, and consumed by exactly one chart. It is never
//! mutated after the pipeline hands it to the presentation boundary.

use crate::error::{PulseError, PulseResult};
use serde::Serialize;
use std::cmp::Ordering;

/// One typed cell of a result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Int(i64),
    Real(f64),
    Text(String),
}

impl Cell {
    /// Numeric view of the cell. `Null` and `Text` have none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(v) => Some(*v as f64),
            Cell::Real(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Cell::Int(v) => Some(*v),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl ResultSet {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> PulseResult<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| PulseError::MissingColumn {
                name: name.to_string(),
            })
    }

    /// True when there is nothing to plot: no rows at all, or every cell
    /// of every row is NULL. An empty chart must stay distinguishable from
    /// a zero-valued one, so zero values do NOT count as blank.
    pub fn is_blank(&self) -> bool {
        self.rows.is_empty()
            || self
                .rows
                .iter()
                .all(|row| row.iter().all(|cell| matches!(cell, Cell::Null)))
    }

    /// The `n` rows with the largest values in `column`, descending.
    ///
    /// The sort is stable: rows with equal values keep their prior relative
    /// order, so the selection is deterministic for a fixed input ordering.
    /// NULL cells sort below every numeric value.
    pub fn top_n(&self, column: &str, n: usize) -> PulseResult<ResultSet> {
        let idx = self.column_index(column)?;
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| {
            let av = a[idx].as_f64();
            let bv = b[idx].as_f64();
            match (av, bv) {
                (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        });
        rows.truncate(n);
        Ok(ResultSet {
            columns: self.columns.clone(),
            rows,
        })
    }
}
