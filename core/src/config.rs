//! Runtime configuration for the dashboard pipeline.

use crate::render::GeoSource;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoConfig {
    /// URL of the state-boundary GeoJSON consumed by choropleth views.
    pub geojson_url: String,
    /// Feature property the renderer joins state names against.
    pub feature_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PulseConfig {
    pub db_path: String,
    /// Row cutoff for "top performing" views.
    pub top_n: usize,
    pub geo: GeoConfig,
}

impl PulseConfig {
    /// Load from a JSON config file.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: PulseConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Built-in defaults, used when no config file is supplied and as
    /// the test configuration.
    pub fn defaults() -> Self {
        Self {
            db_path: "pulse.db".to_string(),
            top_n: 10,
            geo: GeoConfig {
                geojson_url:
                    "https://gist.githubusercontent.com/jbrobst/56c13bbbf9d97d187fea01ca62ea5112/raw/india_states.geojson"
                        .to_string(),
                feature_key: "properties.ST_NM".to_string(),
            },
        }
    }

    pub fn geo_source(&self) -> GeoSource {
        GeoSource {
            url: self.geo.geojson_url.clone(),
            feature_key: self.geo.feature_key.clone(),
        }
    }
}
