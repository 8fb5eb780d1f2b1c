//! Presentation boundary.
//!
//! The pipeline's contract with the renderer is purely data-in: a
//! tabular payload, a chart kind, and display options. Everything
//! visual — layout, palettes beyond the named scale, interaction — is
//! the external renderer's problem. The one responsibility kept on this
//! side of the seam is the non-empty check, so an empty chart can never
//! masquerade as a zero-valued one.

use crate::{
    error::PulseResult,
    frame::ResultSet,
    growth::PivotTable,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Choropleth,
    Bar,
    GroupedBar,
    HorizontalBar,
    DualPanelBar,
    Heatmap,
}

/// Geometry source for choropleth charts, referenced by URL; rows join
/// against the named feature property.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoSource {
    pub url: String,
    pub feature_key: String,
}

/// Display options handed to the renderer alongside the data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub color_scale: String,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub geometry: Option<GeoSource>,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, title: impl Into<String>, color_scale: &str) -> Self {
        Self {
            kind,
            title: title.into(),
            color_scale: color_scale.to_string(),
            x_label: None,
            y_label: None,
            geometry: None,
        }
    }

    pub fn with_axes(mut self, x: &str, y: &str) -> Self {
        self.x_label = Some(x.to_string());
        self.y_label = Some(y.to_string());
        self
    }

    pub fn with_geometry(mut self, geometry: GeoSource) -> Self {
        self.geometry = Some(geometry);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartData {
    Table(ResultSet),
    Matrix(PivotTable),
}

impl ChartData {
    pub fn is_blank(&self) -> bool {
        match self {
            ChartData::Table(frame) => frame.is_blank(),
            ChartData::Matrix(pivot) => pivot.is_blank(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderRequest {
    pub chart: ChartSpec,
    pub data: ChartData,
}

/// The external rendering collaborator.
pub trait RenderSink {
    fn render(&mut self, request: &RenderRequest) -> PulseResult<()>;
    /// A visible "no data" notice, distinct from any chart.
    fn notice(&mut self, message: &str) -> PulseResult<()>;
}

/// Forward a batch of render requests to a sink. Blank payloads are
/// dropped with a warning rather than handed to the renderer.
pub fn deliver(
    sink: &mut dyn RenderSink,
    requests: &[RenderRequest],
    notice: Option<&str>,
) -> PulseResult<()> {
    for request in requests {
        if request.data.is_blank() {
            log::warn!("dropping blank payload for chart '{}'", request.chart.title);
            continue;
        }
        sink.render(request)?;
    }
    if let Some(message) = notice {
        sink.notice(message)?;
    }
    Ok(())
}
