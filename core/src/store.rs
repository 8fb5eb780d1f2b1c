//! SQLite access layer.
//!
//! RULE: Only store.rs talks to the database.
//! Pipeline modules call store methods — they never execute SQL directly.
//!
//! The connection is acquired once per process lifetime and reused for
//! every selection; a failed open is fatal and reported by the caller,
//! never retried. All reads are synchronous and the store holds no
//! mutable state beyond the connection itself.

use crate::{
    error::{PulseError, PulseResult},
    frame::{Cell, ResultSet},
    period::Period,
    queries::QueryShape,
    types::{Quarter, Year},
};
use rusqlite::{params, types::Value, Connection};

pub struct PulseStore {
    conn: Connection,
}

impl PulseStore {
    pub fn open(path: &str) -> PulseResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> PulseResult<Self> {
        let conn = Connection::open(":memory:")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> PulseResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_source_tables.sql"))?;
        Ok(())
    }

    // ── Parameter discovery ────────────────────────────────────

    /// Distinct non-null years present in agg_trans, ascending.
    /// An empty source is a reportable error, not an empty list: the
    /// caller must surface "no data" before issuing dependent queries.
    pub fn distinct_years(&self) -> PulseResult<Vec<Year>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT year FROM agg_trans WHERE year IS NOT NULL ORDER BY year")?;
        let years: Vec<Year> = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        if years.is_empty() {
            return Err(PulseError::empty("no years present in transaction data"));
        }
        Ok(years)
    }

    /// Distinct non-null quarters for a year, ascending.
    pub fn quarters_for_year(&self, year: Year) -> PulseResult<Vec<Quarter>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT quarter FROM agg_trans
             WHERE year = ?1 AND quarter IS NOT NULL
             ORDER BY quarter",
        )?;
        let quarters: Vec<Quarter> = stmt
            .query_map(params![year], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        if quarters.is_empty() {
            return Err(PulseError::empty(format!(
                "no quarters present for year {year}"
            )));
        }
        Ok(quarters)
    }

    // ── Aggregation ────────────────────────────────────────────

    /// Execute one query shape for a validated period.
    ///
    /// The SQL text comes entirely from the shape catalogue; year and
    /// quarter are bound as parameters. Zero-valued rows pass through
    /// untouched; only the blank check at the presentation boundary
    /// decides whether there is anything to plot.
    pub fn execute_shape(&self, shape: QueryShape, period: &Period) -> PulseResult<ResultSet> {
        let sql = shape.sql();
        let mut stmt = self.conn.prepare(&sql)?;
        let column_count = shape.columns().len();
        let rows = stmt.query_map(params![period.year(), period.quarter()], |row| {
            let mut cells = Vec::with_capacity(column_count);
            for i in 0..column_count {
                let value: Value = row.get(i)?;
                cells.push(match value {
                    Value::Null => Cell::Null,
                    Value::Integer(v) => Cell::Int(v),
                    Value::Real(v) => Cell::Real(v),
                    Value::Text(s) => Cell::Text(s),
                    Value::Blob(_) => Cell::Null,
                });
            }
            Ok(cells)
        })?;

        let mut frame = ResultSet::new(shape.columns());
        for row in rows {
            frame.push(row?);
        }
        Ok(frame)
    }

    // ── Test fixture helpers ───────────────────────────────────

    pub fn insert_agg_trans(
        &self,
        state: &str,
        year: Year,
        quarter: Quarter,
        transaction_type: &str,
        count: i64,
        amount: f64,
    ) -> PulseResult<()> {
        self.conn.execute(
            "INSERT INTO agg_trans (state, year, quarter, transaction_type, transaction_count, transaction_amount)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![state, year, quarter, transaction_type, count, amount],
        )?;
        Ok(())
    }

    pub fn insert_agg_user(
        &self,
        state: Option<&str>,
        year: Year,
        quarter: Quarter,
        brand: &str,
        count: i64,
    ) -> PulseResult<()> {
        self.conn.execute(
            "INSERT INTO agg_user (state, year, quarter, brand, count)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![state, year, quarter, brand, count],
        )?;
        Ok(())
    }

    pub fn insert_agg_ins(
        &self,
        state: &str,
        year: Year,
        quarter: Quarter,
        count: i64,
        amount: f64,
    ) -> PulseResult<()> {
        self.conn.execute(
            "INSERT INTO agg_ins (state, year, quarter, transaction_count, transaction_amount)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![state, year, quarter, count, amount],
        )?;
        Ok(())
    }

    pub fn insert_top_district(
        &self,
        state: &str,
        district: &str,
        year: Year,
        quarter: Quarter,
        count: i64,
        amount: f64,
    ) -> PulseResult<()> {
        self.conn.execute(
            "INSERT INTO top_trans_dist (state, district, year, quarter, transaction_count, transaction_amount)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![state, district, year, quarter, count, amount],
        )?;
        Ok(())
    }

    pub fn insert_top_pincode(
        &self,
        pincode: &str,
        year: Year,
        quarter: Quarter,
        count: i64,
        amount: f64,
    ) -> PulseResult<()> {
        self.conn.execute(
            "INSERT INTO top_trans_pinc (pincode, year, quarter, transaction_count, transaction_amount)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![pincode, year, quarter, count, amount],
        )?;
        Ok(())
    }
}
