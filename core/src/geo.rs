//! State-name normalization for choropleth feeds.
//!
//! The source tables spell states the way the upstream feed does
//! (lowercase, hyphenated: `andaman-&-nicobar-islands`), while the
//! geometry source names its features for display (`ST_NM`:
//! "Andaman & Nicobar"). The mapping is explicit; a state the table
//! does not know is a reportable error, never silently skipped by the
//! renderer.

use crate::{
    error::{PulseError, PulseResult},
    frame::{Cell, ResultSet},
};

/// Store spelling → geometry feature name, covering all 36 states and
/// union territories.
const STATE_GEOMETRY: &[(&str, &str)] = &[
    ("andaman-&-nicobar-islands", "Andaman & Nicobar"),
    ("andhra-pradesh", "Andhra Pradesh"),
    ("arunachal-pradesh", "Arunachal Pradesh"),
    ("assam", "Assam"),
    ("bihar", "Bihar"),
    ("chandigarh", "Chandigarh"),
    ("chhattisgarh", "Chhattisgarh"),
    (
        "dadra-&-nagar-haveli-&-daman-&-diu",
        "Dadra and Nagar Haveli and Daman and Diu",
    ),
    ("delhi", "Delhi"),
    ("goa", "Goa"),
    ("gujarat", "Gujarat"),
    ("haryana", "Haryana"),
    ("himachal-pradesh", "Himachal Pradesh"),
    ("jammu-&-kashmir", "Jammu & Kashmir"),
    ("jharkhand", "Jharkhand"),
    ("karnataka", "Karnataka"),
    ("kerala", "Kerala"),
    ("ladakh", "Ladakh"),
    ("lakshadweep", "Lakshadweep"),
    ("madhya-pradesh", "Madhya Pradesh"),
    ("maharashtra", "Maharashtra"),
    ("manipur", "Manipur"),
    ("meghalaya", "Meghalaya"),
    ("mizoram", "Mizoram"),
    ("nagaland", "Nagaland"),
    ("odisha", "Odisha"),
    ("puducherry", "Puducherry"),
    ("punjab", "Punjab"),
    ("rajasthan", "Rajasthan"),
    ("sikkim", "Sikkim"),
    ("tamil-nadu", "Tamil Nadu"),
    ("telangana", "Telangana"),
    ("tripura", "Tripura"),
    ("uttar-pradesh", "Uttar Pradesh"),
    ("uttarakhand", "Uttarakhand"),
    ("west-bengal", "West Bengal"),
];

/// Geometry feature name for a store state key.
pub fn geometry_name(state: &str) -> PulseResult<&'static str> {
    STATE_GEOMETRY
        .iter()
        .find(|(key, _)| *key == state)
        .map(|(_, name)| *name)
        .ok_or_else(|| PulseError::UnknownState {
            name: state.to_string(),
        })
}

/// Rewrite a frame's state column to geometry feature names so the
/// renderer can join rows against the geometry source.
pub fn normalize_frame(frame: &mut ResultSet, column: &str) -> PulseResult<()> {
    let idx = frame.column_index(column)?;
    for row in &mut frame.rows {
        if let Cell::Text(state) = &row[idx] {
            let name = geometry_name(state)?;
            row[idx] = Cell::Text(name.to_string());
        }
    }
    Ok(())
}
