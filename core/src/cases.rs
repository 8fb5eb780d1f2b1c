//! Business-case dispatch — the five fixed analysis workflows plus the
//! standalone overview map.
//!
//! Each case is an ordered list of (query → post-process → chart) steps.
//! Steps share nothing but the validated period; growth analyses fetch
//! their full time series once and filter in memory. A step that comes
//! back empty turns into a visible notice and skips the remainder of the
//! case — steps already produced are kept, other errors abort.

use crate::{
    config::PulseConfig,
    error::{PulseError, PulseResult},
    frame::ResultSet,
    geo,
    growth::{GrowthSeries, SeriesPoint},
    period::Period,
    queries::QueryShape,
    render::{ChartData, ChartKind, ChartSpec, RenderRequest},
    store::PulseStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusinessCase {
    TransactionDynamics,
    DeviceDominance,
    InsurancePenetration,
    InsuranceEngagement,
    StateDistrictAnalysis,
}

impl BusinessCase {
    pub fn id(&self) -> u8 {
        match self {
            BusinessCase::TransactionDynamics => 1,
            BusinessCase::DeviceDominance => 2,
            BusinessCase::InsurancePenetration => 3,
            BusinessCase::InsuranceEngagement => 4,
            BusinessCase::StateDistrictAnalysis => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BusinessCase::TransactionDynamics => "Decoding transaction dynamics",
            BusinessCase::DeviceDominance => "Device dominance and user engagement",
            BusinessCase::InsurancePenetration => "Insurance penetration and growth potential",
            BusinessCase::InsuranceEngagement => "Insurance engagement",
            BusinessCase::StateDistrictAnalysis => "Transaction analysis across states and districts",
        }
    }

    pub fn all() -> [BusinessCase; 5] {
        [
            BusinessCase::TransactionDynamics,
            BusinessCase::DeviceDominance,
            BusinessCase::InsurancePenetration,
            BusinessCase::InsuranceEngagement,
            BusinessCase::StateDistrictAnalysis,
        ]
    }
}

impl TryFrom<u8> for BusinessCase {
    type Error = PulseError;

    fn try_from(id: u8) -> PulseResult<Self> {
        match id {
            1 => Ok(BusinessCase::TransactionDynamics),
            2 => Ok(BusinessCase::DeviceDominance),
            3 => Ok(BusinessCase::InsurancePenetration),
            4 => Ok(BusinessCase::InsuranceEngagement),
            5 => Ok(BusinessCase::StateDistrictAnalysis),
            _ => Err(PulseError::UnknownCase { id }),
        }
    }
}

/// What one pipeline run produced: the charts to render in order, plus
/// an optional "no data" notice when the case halted early.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseOutcome {
    pub requests: Vec<RenderRequest>,
    pub notice: Option<String>,
}

impl CaseOutcome {
    fn new() -> Self {
        Self {
            requests: Vec::new(),
            notice: None,
        }
    }

    fn push(&mut self, chart: ChartSpec, frame: ResultSet) {
        self.requests.push(RenderRequest {
            chart,
            data: ChartData::Table(frame),
        });
    }
}

/// The overview page: one choropleth of state-wise transaction amount.
pub fn run_overview(
    store: &PulseStore,
    config: &PulseConfig,
    period: &Period,
) -> PulseResult<CaseOutcome> {
    let mut outcome = CaseOutcome::new();
    let result = overview(store, config, period, &mut outcome);
    finish("overview", outcome, result)
}

/// Run every step of a business case for a validated period.
pub fn run_case(
    store: &PulseStore,
    config: &PulseConfig,
    case: BusinessCase,
    period: &Period,
) -> PulseResult<CaseOutcome> {
    let mut outcome = CaseOutcome::new();
    let result = match case {
        BusinessCase::TransactionDynamics => transaction_dynamics(store, config, period, &mut outcome),
        BusinessCase::DeviceDominance => device_dominance(store, config, period, &mut outcome),
        BusinessCase::InsurancePenetration => insurance_penetration(store, period, &mut outcome),
        BusinessCase::InsuranceEngagement => insurance_engagement(store, config, period, &mut outcome),
        BusinessCase::StateDistrictAnalysis => state_district_analysis(store, period, &mut outcome),
    };
    finish(case.label(), outcome, result)
}

/// Convert an empty-result halt into a notice; let real errors through.
fn finish(
    context: &str,
    mut outcome: CaseOutcome,
    result: PulseResult<()>,
) -> PulseResult<CaseOutcome> {
    match result {
        Ok(()) => Ok(outcome),
        Err(e) if e.is_empty_result() => {
            log::warn!("{context} halted: {e}");
            outcome.notice = Some(e.to_string());
            Ok(outcome)
        }
        Err(e) => Err(e),
    }
}

/// Execute a shape and insist on something to plot.
fn fetch(
    store: &PulseStore,
    shape: QueryShape,
    period: &Period,
    step: &str,
) -> PulseResult<ResultSet> {
    let frame = store.execute_shape(shape, period)?;
    if frame.is_blank() {
        return Err(PulseError::empty(format!("{step} ({})", period.label())));
    }
    Ok(frame)
}

// ── Overview ─────────────────────────────────────────────────────────────────

fn overview(
    store: &PulseStore,
    config: &PulseConfig,
    period: &Period,
    outcome: &mut CaseOutcome,
) -> PulseResult<()> {
    let mut frame = fetch(
        store,
        QueryShape::TransAmountByState,
        period,
        "state-wise transaction amount",
    )?;
    geo::normalize_frame(&mut frame, "state")?;
    outcome.push(
        ChartSpec::new(
            ChartKind::Choropleth,
            format!("Total Transaction Amount by State ({})", period.label()),
            "Reds",
        )
        .with_geometry(config.geo_source()),
        frame,
    );
    Ok(())
}

// ── Case 1: transaction dynamics ─────────────────────────────────────────────

fn transaction_dynamics(
    store: &PulseStore,
    config: &PulseConfig,
    period: &Period,
    outcome: &mut CaseOutcome,
) -> PulseResult<()> {
    let frame = fetch(
        store,
        QueryShape::TransAmountByStateTrend,
        period,
        "state-wise transaction amount",
    )?;
    outcome.push(
        ChartSpec::new(
            ChartKind::Bar,
            format!("Total Transaction Amount by State ({})", period.label()),
            "viridis",
        )
        .with_axes("state", "total_amount"),
        frame,
    );

    let frame = fetch(
        store,
        QueryShape::TransCountByType,
        period,
        "transaction count by type",
    )?;
    outcome.push(
        ChartSpec::new(
            ChartKind::Bar,
            format!("Transaction Count by Type ({})", period.label()),
            "magma",
        )
        .with_axes("transaction_type", "total_count"),
        frame,
    );

    let mut frame = fetch(
        store,
        QueryShape::TransAmountByState,
        period,
        "state-wise transaction amount map",
    )?;
    geo::normalize_frame(&mut frame, "state")?;
    outcome.push(
        ChartSpec::new(
            ChartKind::Choropleth,
            format!("Choropleth: Total Transaction Amount by State ({})", period.label()),
            "YlGnBu",
        )
        .with_geometry(config.geo_source()),
        frame,
    );
    Ok(())
}

// ── Case 2: device dominance ─────────────────────────────────────────────────

fn device_dominance(
    store: &PulseStore,
    config: &PulseConfig,
    period: &Period,
    outcome: &mut CaseOutcome,
) -> PulseResult<()> {
    let frame = fetch(
        store,
        QueryShape::RegistrationsByBrand,
        period,
        "brand registrations",
    )?;
    let frame = frame.top_n("total_registrations", config.top_n)?;
    outcome.push(
        ChartSpec::new(
            ChartKind::Bar,
            format!("Top Device Brands by Total Registrations ({})", period.label()),
            "crest",
        )
        .with_axes("brand", "total_registrations"),
        frame,
    );

    let frame = fetch(
        store,
        QueryShape::AvgUsersByBrand,
        period,
        "brand average users",
    )?;
    outcome.push(
        ChartSpec::new(
            ChartKind::Bar,
            format!("Brand-wise Avg Registered Users ({})", period.label()),
            "rocket",
        )
        .with_axes("brand", "avg_users"),
        frame,
    );
    Ok(())
}

// ── Case 3: insurance penetration ────────────────────────────────────────────

fn insurance_penetration(
    store: &PulseStore,
    period: &Period,
    outcome: &mut CaseOutcome,
) -> PulseResult<()> {
    let frame = fetch(
        store,
        QueryShape::InsuranceAmountByState,
        period,
        "state-wise insurance amount",
    )?;
    outcome.push(
        ChartSpec::new(
            ChartKind::Bar,
            format!("State-wise Insurance Amount ({})", period.label()),
            "Spectral",
        )
        .with_axes("state", "total_amount"),
        frame,
    );

    // Full series up to the selected period, fetched once; growth and
    // the heatmap layout are derived in memory.
    let frame = fetch(
        store,
        QueryShape::InsuranceSeriesUpToPeriod,
        period,
        "insurance time series",
    )?;
    let points = SeriesPoint::from_frame(&frame, "total_amount")?;
    let pivot = GrowthSeries::derive(points).pivot(period)?;
    outcome.requests.push(RenderRequest {
        chart: ChartSpec::new(
            ChartKind::Heatmap,
            format!("Insurance Transaction Growth % Heatmap ({})", period.label()),
            "YlGnBu",
        )
        .with_axes("quarter", "state"),
        data: ChartData::Matrix(pivot),
    });
    Ok(())
}

// ── Case 4: insurance engagement ─────────────────────────────────────────────

fn insurance_engagement(
    store: &PulseStore,
    config: &PulseConfig,
    period: &Period,
    outcome: &mut CaseOutcome,
) -> PulseResult<()> {
    let mut frame = fetch(
        store,
        QueryShape::InsuranceAmountByStateMap,
        period,
        "insurance distribution map",
    )?;
    geo::normalize_frame(&mut frame, "state")?;
    outcome.push(
        ChartSpec::new(
            ChartKind::Choropleth,
            format!("Insurance Amount Distribution ({})", period.label()),
            "YlOrBr",
        )
        .with_geometry(config.geo_source()),
        frame,
    );

    let frame = fetch(
        store,
        QueryShape::InsuranceSeriesYearQuarters,
        period,
        "insurance quarterly series",
    )?;
    let points = SeriesPoint::from_frame(&frame, "total_amount")?;
    let growth = GrowthSeries::derive(points).at_period(period)?;
    outcome.push(
        ChartSpec::new(
            ChartKind::Bar,
            format!("Quarterly Growth % in Insurance ({})", period.label()),
            "coolwarm",
        )
        .with_axes("state", "growth_pct"),
        growth,
    );
    Ok(())
}

// ── Case 5: states and districts ─────────────────────────────────────────────

fn state_district_analysis(
    store: &PulseStore,
    period: &Period,
    outcome: &mut CaseOutcome,
) -> PulseResult<()> {
    let frame = fetch(
        store,
        QueryShape::TopStatesByAmount,
        period,
        "top performing states",
    )?;
    outcome.push(
        ChartSpec::new(
            ChartKind::Bar,
            format!("Top States by Amount ({})", period.label()),
            "viridis",
        )
        .with_axes("state", "total_amount"),
        frame,
    );

    let frame = fetch(
        store,
        QueryShape::TopDistrictsByAmount,
        period,
        "top districts",
    )?;
    outcome.push(
        ChartSpec::new(
            ChartKind::DualPanelBar,
            format!("Top Districts by Transaction Value & Volume ({})", period.label()),
            "Greens",
        )
        .with_axes("total_amount", "district"),
        frame,
    );

    let frame = fetch(
        store,
        QueryShape::TopPincodesByAmount,
        period,
        "top pincodes",
    )?;
    outcome.push(
        ChartSpec::new(
            ChartKind::HorizontalBar,
            format!("Top Pincodes by Transaction Amount ({})", period.label()),
            "Blues_r",
        )
        .with_axes("total_amount", "pincode"),
        frame,
    );
    Ok(())
}
