//! The fixed catalogue of aggregation query shapes.
//!
//! Every chart in the dashboard is fed by exactly one of these shapes.
//! A shape is a small declarative description — source table, period
//! filter, grouping keys, aggregate projections, sort policy, optional
//! row limit — from which the store assembles SQL. Year and quarter are
//! always bound as parameters; only 'static text from this table is ever
//! concatenated into query strings.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceTable {
    AggTrans,
    AggUser,
    AggIns,
    TopTransDist,
    TopTransPinc,
}

impl SourceTable {
    pub fn sql_name(&self) -> &'static str {
        match self {
            SourceTable::AggTrans => "agg_trans",
            SourceTable::AggUser => "agg_user",
            SourceTable::AggIns => "agg_ins",
            SourceTable::TopTransDist => "top_trans_dist",
            SourceTable::TopTransPinc => "top_trans_pinc",
        }
    }
}

/// How the selected (year, quarter) restricts the rows a shape sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodFilter {
    /// Exactly the selected period.
    Exact,
    /// Every period up to and including the selected one, across years.
    /// Chronological ordering on (year, quarter): a plain
    /// `year <= ?1 AND quarter <= ?2` would drop Q3/Q4 of earlier years.
    UpToPeriod,
    /// Quarters 1..=selected within the selected year only.
    YearQuartersUpTo,
}

impl PeriodFilter {
    pub fn predicate(&self) -> &'static str {
        match self {
            PeriodFilter::Exact => "year = ?1 AND quarter = ?2",
            PeriodFilter::UpToPeriod => "(year < ?1 OR (year = ?1 AND quarter <= ?2))",
            PeriodFilter::YearQuartersUpTo => "year = ?1 AND quarter <= ?2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Agg {
    Sum,
    Avg,
}

impl Agg {
    fn sql(&self) -> &'static str {
        match self {
            Agg::Sum => "SUM",
            Agg::Avg => "AVG",
        }
    }
}

/// One aggregate projection: `AGG(column) AS alias`.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    pub agg: Agg,
    pub column: &'static str,
    pub alias: &'static str,
}

/// Ranked feeds sort by the aggregate value descending; trend feeds sort
/// by the natural grouping keys ascending.
#[derive(Debug, Clone, Copy)]
pub enum SortPolicy {
    AggregateDesc(&'static str),
    KeysAsc,
}

#[derive(Debug, Clone, Copy)]
pub struct QuerySpec {
    pub table: SourceTable,
    pub filter: PeriodFilter,
    pub group_by: &'static [&'static str],
    pub projections: &'static [Projection],
    pub sort: SortPolicy,
    pub limit: Option<u32>,
}

/// The twelve aggregation shapes behind the overview page and the five
/// business cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryShape {
    /// State-wise total transaction amount, ranked. Feeds the overview
    /// choropleth and the transaction-dynamics map.
    TransAmountByState,
    /// State/year grain of total transaction amount, trend-ordered.
    TransAmountByStateTrend,
    /// Transaction count per transaction type for the selected period.
    TransCountByType,
    /// Device registrations per brand, ranked (top-10 applied in memory).
    RegistrationsByBrand,
    /// Average registered users per brand.
    AvgUsersByBrand,
    /// State-wise insurance amount, ranked.
    InsuranceAmountByState,
    /// Full insurance time series up to and including the selected period.
    InsuranceSeriesUpToPeriod,
    /// State-wise insurance amount for the engagement choropleth.
    InsuranceAmountByStateMap,
    /// Insurance series over quarters 1..=selected of the selected year.
    InsuranceSeriesYearQuarters,
    /// Top states by district-level transaction amount.
    TopStatesByAmount,
    /// Top districts by transaction value and volume.
    TopDistrictsByAmount,
    /// Top pincodes by transaction amount.
    TopPincodesByAmount,
}

const SUM_AMOUNT: Projection = Projection {
    agg: Agg::Sum,
    column: "transaction_amount",
    alias: "total_amount",
};

const SUM_COUNT: Projection = Projection {
    agg: Agg::Sum,
    column: "transaction_count",
    alias: "total_count",
};

impl QueryShape {
    pub fn all() -> [QueryShape; 12] {
        [
            QueryShape::TransAmountByState,
            QueryShape::TransAmountByStateTrend,
            QueryShape::TransCountByType,
            QueryShape::RegistrationsByBrand,
            QueryShape::AvgUsersByBrand,
            QueryShape::InsuranceAmountByState,
            QueryShape::InsuranceSeriesUpToPeriod,
            QueryShape::InsuranceAmountByStateMap,
            QueryShape::InsuranceSeriesYearQuarters,
            QueryShape::TopStatesByAmount,
            QueryShape::TopDistrictsByAmount,
            QueryShape::TopPincodesByAmount,
        ]
    }

    pub fn spec(&self) -> QuerySpec {
        match self {
            QueryShape::TransAmountByState => QuerySpec {
                table: SourceTable::AggTrans,
                filter: PeriodFilter::Exact,
                group_by: &["state"],
                projections: &[SUM_AMOUNT],
                sort: SortPolicy::AggregateDesc("total_amount"),
                limit: None,
            },
            QueryShape::TransAmountByStateTrend => QuerySpec {
                table: SourceTable::AggTrans,
                filter: PeriodFilter::Exact,
                group_by: &["state", "year"],
                projections: &[SUM_AMOUNT],
                sort: SortPolicy::KeysAsc,
                limit: None,
            },
            QueryShape::TransCountByType => QuerySpec {
                table: SourceTable::AggTrans,
                filter: PeriodFilter::Exact,
                group_by: &["transaction_type", "year", "quarter"],
                projections: &[SUM_COUNT],
                sort: SortPolicy::KeysAsc,
                limit: None,
            },
            QueryShape::RegistrationsByBrand => QuerySpec {
                table: SourceTable::AggUser,
                filter: PeriodFilter::Exact,
                group_by: &["brand"],
                projections: &[Projection {
                    agg: Agg::Sum,
                    column: "count",
                    alias: "total_registrations",
                }],
                sort: SortPolicy::AggregateDesc("total_registrations"),
                limit: None,
            },
            QueryShape::AvgUsersByBrand => QuerySpec {
                table: SourceTable::AggUser,
                filter: PeriodFilter::Exact,
                group_by: &["brand"],
                projections: &[Projection {
                    agg: Agg::Avg,
                    column: "count",
                    alias: "avg_users",
                }],
                sort: SortPolicy::KeysAsc,
                limit: None,
            },
            QueryShape::InsuranceAmountByState => QuerySpec {
                table: SourceTable::AggIns,
                filter: PeriodFilter::Exact,
                group_by: &["state"],
                projections: &[SUM_AMOUNT],
                sort: SortPolicy::AggregateDesc("total_amount"),
                limit: None,
            },
            QueryShape::InsuranceSeriesUpToPeriod => QuerySpec {
                table: SourceTable::AggIns,
                filter: PeriodFilter::UpToPeriod,
                group_by: &["state", "year", "quarter"],
                projections: &[SUM_AMOUNT],
                sort: SortPolicy::KeysAsc,
                limit: None,
            },
            QueryShape::InsuranceAmountByStateMap => QuerySpec {
                table: SourceTable::AggIns,
                filter: PeriodFilter::Exact,
                group_by: &["state"],
                projections: &[SUM_AMOUNT],
                sort: SortPolicy::KeysAsc,
                limit: None,
            },
            QueryShape::InsuranceSeriesYearQuarters => QuerySpec {
                table: SourceTable::AggIns,
                filter: PeriodFilter::YearQuartersUpTo,
                group_by: &["state", "year", "quarter"],
                projections: &[SUM_AMOUNT],
                sort: SortPolicy::KeysAsc,
                limit: None,
            },
            QueryShape::TopStatesByAmount => QuerySpec {
                table: SourceTable::TopTransDist,
                filter: PeriodFilter::Exact,
                group_by: &["state"],
                projections: &[SUM_AMOUNT],
                sort: SortPolicy::AggregateDesc("total_amount"),
                limit: Some(10),
            },
            QueryShape::TopDistrictsByAmount => QuerySpec {
                table: SourceTable::TopTransDist,
                filter: PeriodFilter::Exact,
                group_by: &["district"],
                projections: &[SUM_COUNT, SUM_AMOUNT],
                sort: SortPolicy::AggregateDesc("total_amount"),
                limit: Some(10),
            },
            QueryShape::TopPincodesByAmount => QuerySpec {
                table: SourceTable::TopTransPinc,
                filter: PeriodFilter::Exact,
                group_by: &["pincode"],
                projections: &[SUM_COUNT, SUM_AMOUNT],
                sort: SortPolicy::AggregateDesc("total_amount"),
                limit: Some(10),
            },
        }
    }

    /// Column names of the result set, in SELECT order.
    pub fn columns(&self) -> Vec<String> {
        let spec = self.spec();
        let mut columns: Vec<String> = spec.group_by.iter().map(|c| c.to_string()).collect();
        columns.extend(spec.projections.iter().map(|p| p.alias.to_string()));
        columns
    }

    /// Assemble the SQL for this shape. Period parameters are left as
    /// `?1` (year) and `?2` (quarter) placeholders for binding.
    pub fn sql(&self) -> String {
        let spec = self.spec();
        let mut select: Vec<String> = spec.group_by.iter().map(|c| c.to_string()).collect();
        for p in spec.projections {
            select.push(format!("{}({}) AS {}", p.agg.sql(), p.column, p.alias));
        }
        let mut sql = format!(
            "SELECT {} FROM {} WHERE {} GROUP BY {}",
            select.join(", "),
            spec.table.sql_name(),
            spec.filter.predicate(),
            spec.group_by.join(", "),
        );
        match spec.sort {
            SortPolicy::AggregateDesc(column) => {
                sql.push_str(" ORDER BY ");
                sql.push_str(column);
                sql.push_str(" DESC");
            }
            SortPolicy::KeysAsc => {
                sql.push_str(" ORDER BY ");
                sql.push_str(&spec.group_by.join(", "));
            }
        }
        if let Some(n) = spec.limit {
            sql.push_str(&format!(" LIMIT {n}"));
        }
        sql
    }
}
