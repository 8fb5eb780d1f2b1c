use pulse_core::{
    error::PulseError,
    frame::{Cell, ResultSet},
    geo,
};

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn store_spellings_map_to_geometry_names() {
    assert_eq!(geo::geometry_name("karnataka").unwrap(), "Karnataka");
    assert_eq!(geo::geometry_name("tamil-nadu").unwrap(), "Tamil Nadu");
    assert_eq!(
        geo::geometry_name("andaman-&-nicobar-islands").unwrap(),
        "Andaman & Nicobar"
    );
    assert_eq!(
        geo::geometry_name("jammu-&-kashmir").unwrap(),
        "Jammu & Kashmir"
    );
}

/// A spelling mismatch between the store and the geometry source is a
/// reportable error for this pipeline, never something the renderer is
/// left to drop silently.
#[test]
fn unknown_state_is_reported() {
    let err = geo::geometry_name("atlantis").unwrap_err();
    match err {
        PulseError::UnknownState { name } => assert_eq!(name, "atlantis"),
        other => panic!("expected UnknownState, got {other:?}"),
    }
}

#[test]
fn normalize_frame_rewrites_the_state_column() {
    let mut frame = ResultSet::new(vec!["state".to_string(), "total_amount".to_string()]);
    frame.push(vec![Cell::Text("west-bengal".to_string()), Cell::Real(10.0)]);
    frame.push(vec![Cell::Text("uttar-pradesh".to_string()), Cell::Real(20.0)]);

    geo::normalize_frame(&mut frame, "state").unwrap();

    assert_eq!(frame.rows[0][0].as_str(), Some("West Bengal"));
    assert_eq!(frame.rows[1][0].as_str(), Some("Uttar Pradesh"));
}

#[test]
fn normalize_frame_fails_on_first_unknown_state() {
    let mut frame = ResultSet::new(vec!["state".to_string(), "total_amount".to_string()]);
    frame.push(vec![Cell::Text("narnia".to_string()), Cell::Real(10.0)]);

    let err = geo::normalize_frame(&mut frame, "state").unwrap_err();
    assert!(matches!(err, PulseError::UnknownState { .. }));
}
