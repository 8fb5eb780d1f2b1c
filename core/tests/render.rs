use pulse_core::{
    error::PulseResult,
    frame::{Cell, ResultSet},
    render::{deliver, ChartData, ChartKind, ChartSpec, RenderRequest, RenderSink},
};

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Records what reaches the renderer side of the seam.
#[derive(Default)]
struct CollectSink {
    rendered: Vec<String>,
    notices: Vec<String>,
}

impl RenderSink for CollectSink {
    fn render(&mut self, request: &RenderRequest) -> PulseResult<()> {
        self.rendered.push(request.chart.title.clone());
        Ok(())
    }

    fn notice(&mut self, message: &str) -> PulseResult<()> {
        self.notices.push(message.to_string());
        Ok(())
    }
}

fn request(title: &str, rows: &[(&str, f64)]) -> RenderRequest {
    let mut frame = ResultSet::new(vec!["state".to_string(), "total_amount".to_string()]);
    for (state, amount) in rows {
        frame.push(vec![Cell::Text(state.to_string()), Cell::Real(*amount)]);
    }
    RenderRequest {
        chart: ChartSpec::new(ChartKind::Bar, title, "viridis"),
        data: ChartData::Table(frame),
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn requests_reach_the_sink_in_order() {
    let mut sink = CollectSink::default();
    let requests = vec![
        request("first", &[("karnataka", 1.0)]),
        request("second", &[("kerala", 2.0)]),
    ];

    deliver(&mut sink, &requests, None).unwrap();
    assert_eq!(sink.rendered, vec!["first", "second"]);
    assert!(sink.notices.is_empty());
}

/// The adapter's one responsibility: a blank payload never reaches the
/// renderer, so an empty chart cannot pose as a zero-valued one.
#[test]
fn blank_payloads_are_dropped_before_the_renderer() {
    let mut sink = CollectSink::default();
    let requests = vec![
        request("blank", &[]),
        request("real", &[("karnataka", 1.0)]),
    ];

    deliver(&mut sink, &requests, None).unwrap();
    assert_eq!(sink.rendered, vec!["real"]);
}

/// A zero-valued chart is NOT blank; it must render.
#[test]
fn zero_valued_payloads_still_render() {
    let mut sink = CollectSink::default();
    let requests = vec![request("zeroes", &[("karnataka", 0.0)])];

    deliver(&mut sink, &requests, None).unwrap();
    assert_eq!(sink.rendered, vec!["zeroes"]);
}

#[test]
fn notices_are_forwarded_after_the_charts() {
    let mut sink = CollectSink::default();
    let requests = vec![request("only", &[("karnataka", 1.0)])];

    deliver(&mut sink, &requests, Some("No data available to plot.")).unwrap();
    assert_eq!(sink.notices, vec!["No data available to plot."]);
}
