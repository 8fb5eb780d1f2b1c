use pulse_core::{
    error::PulseError,
    frame::{Cell, ResultSet},
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn frame_with_amounts(amounts: &[f64]) -> ResultSet {
    let mut frame = ResultSet::new(vec!["district".to_string(), "total_amount".to_string()]);
    for (i, amount) in amounts.iter().enumerate() {
        frame.push(vec![Cell::Text(format!("d{i}")), Cell::Real(*amount)]);
    }
    frame
}

fn amounts(frame: &ResultSet) -> Vec<f64> {
    frame
        .rows
        .iter()
        .map(|r| r[1].as_f64().unwrap())
        .collect()
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// 15 rows with distinct amounts: exactly the 10 largest survive, in
/// descending order.
#[test]
fn fifteen_distinct_rows_truncate_to_ten_descending() {
    let input: Vec<f64> = (1..=15).map(|v| v as f64 * 10.0).collect();
    let frame = frame_with_amounts(&input);

    let top = frame.top_n("total_amount", 10).unwrap();
    assert_eq!(top.len(), 10);

    let got = amounts(&top);
    let expected: Vec<f64> = (6..=15).rev().map(|v| v as f64 * 10.0).collect();
    assert_eq!(got, expected, "must be the 10 largest values, descending");
}

/// Ties are not specially broken: rows with equal values keep their
/// prior relative order, so the cut is deterministic for a fixed input
/// ordering.
#[test]
fn ties_keep_prior_relative_order() {
    let mut frame = ResultSet::new(vec!["district".to_string(), "total_amount".to_string()]);
    frame.push(vec![Cell::Text("first".to_string()), Cell::Real(100.0)]);
    frame.push(vec![Cell::Text("second".to_string()), Cell::Real(100.0)]);
    frame.push(vec![Cell::Text("third".to_string()), Cell::Real(200.0)]);

    let top = frame.top_n("total_amount", 2).unwrap();
    assert_eq!(top.rows[0][0].as_str(), Some("third"));
    assert_eq!(
        top.rows[1][0].as_str(),
        Some("first"),
        "stable sort keeps the earlier of two tied rows"
    );
}

#[test]
fn fewer_rows_than_n_returns_everything() {
    let frame = frame_with_amounts(&[30.0, 10.0, 20.0]);
    let top = frame.top_n("total_amount", 10).unwrap();
    assert_eq!(amounts(&top), vec![30.0, 20.0, 10.0]);
}

#[test]
fn null_cells_sort_below_every_value() {
    let mut frame = ResultSet::new(vec!["district".to_string(), "total_amount".to_string()]);
    frame.push(vec![Cell::Text("missing".to_string()), Cell::Null]);
    frame.push(vec![Cell::Text("small".to_string()), Cell::Real(1.0)]);

    let top = frame.top_n("total_amount", 2).unwrap();
    assert_eq!(top.rows[0][0].as_str(), Some("small"));
    assert_eq!(top.rows[1][0].as_str(), Some("missing"));
}

#[test]
fn unknown_column_is_an_error() {
    let frame = frame_with_amounts(&[1.0]);
    let err = frame.top_n("no_such_column", 10).unwrap_err();
    assert!(matches!(err, PulseError::MissingColumn { .. }));
}
