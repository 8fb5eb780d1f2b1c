use pulse_core::{
    error::PulseError,
    growth::{GrowthRow, GrowthSeries},
    period::Period,
    store::PulseStore,
    types::{Quarter, Year},
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn row(state: &str, year: Year, quarter: Quarter, growth_pct: Option<f64>) -> GrowthRow {
    GrowthRow {
        state: state.to_string(),
        year,
        quarter,
        amount: 0.0,
        growth_pct,
    }
}

fn period(year: Year, quarter: Quarter) -> Period {
    let store = PulseStore::in_memory().unwrap();
    store.migrate().unwrap();
    for q in 1..=4 {
        store
            .insert_agg_trans("karnataka", 2022, q, "merchant-payments", 1, 1.0)
            .unwrap();
    }
    Period::select(&store, year, quarter).unwrap()
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Two states over three quarters pivot to a 2 × 3 matrix, with each
/// cell equal to the corresponding source growth value.
#[test]
fn pivot_is_state_rows_by_quarter_columns() {
    let series = GrowthSeries {
        rows: vec![
            row("assam", 2022, 1, Some(5.0)),
            row("assam", 2022, 2, Some(10.0)),
            row("assam", 2022, 3, Some(15.0)),
            row("bihar", 2022, 1, Some(-2.0)),
            row("bihar", 2022, 2, Some(4.0)),
            row("bihar", 2022, 3, Some(8.0)),
        ],
    };

    let pivot = series.pivot(&period(2022, 3)).unwrap();
    assert_eq!(pivot.rows, vec!["assam".to_string(), "bihar".to_string()]);
    assert_eq!(pivot.cols, vec![1, 2, 3]);
    assert_eq!(pivot.cell("assam", 2), Some(10.0));
    assert_eq!(pivot.cell("bihar", 3), Some(8.0));
}

/// The heatmap spans quarters 1..=selected of the selected year; later
/// quarters and other years stay out of the matrix.
#[test]
fn pivot_is_bounded_by_the_selected_period() {
    let series = GrowthSeries {
        rows: vec![
            row("assam", 2021, 4, Some(3.0)),
            row("assam", 2022, 1, Some(5.0)),
            row("assam", 2022, 2, Some(10.0)),
            row("assam", 2022, 3, Some(15.0)),
        ],
    };

    let pivot = series.pivot(&period(2022, 2)).unwrap();
    assert_eq!(pivot.cols, vec![1, 2]);
    assert_eq!(pivot.cell("assam", 3), None, "Q3 is past the selection");
}

/// A (state, quarter) combination with no defined growth renders as a
/// missing cell, never as a fabricated number.
#[test]
fn cells_without_growth_stay_missing() {
    let series = GrowthSeries {
        rows: vec![
            row("assam", 2022, 1, Some(5.0)),
            row("assam", 2022, 2, Some(10.0)),
            row("bihar", 2022, 2, Some(4.0)),
            row("bihar", 2022, 1, None), // first observed period
        ],
    };

    let pivot = series.pivot(&period(2022, 2)).unwrap();
    assert_eq!(pivot.cell("bihar", 1), None);
    assert_eq!(pivot.cell("bihar", 2), Some(4.0));
    assert!(!pivot.is_blank());
}

#[test]
fn pivot_with_nothing_defined_reports_no_data() {
    let series = GrowthSeries {
        rows: vec![row("assam", 2022, 1, None), row("bihar", 2022, 1, None)],
    };

    let err = series.pivot(&period(2022, 1)).unwrap_err();
    assert!(
        matches!(err, PulseError::EmptyResult { .. }),
        "expected EmptyResult, got {err:?}"
    );
}
