//! JSON-driven renderer configuration.
//!
//! Configs mirror the public knobs of the renderers one-to-one so a chart
//! description can be deserialized straight into renderer state.

use polyspline::{Point, SmoothMethod};
use serde::Deserialize;
use serde_json::Value;

use crate::Result;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AxisXConfig {
    pub points: Vec<Point>,
    pub start: f64,
    pub end: f64,
    pub precision_step: f64,
    pub auto_scale: bool,
    pub auto_center: bool,
    pub smoothing: SmoothMethod,
}

impl Default for AxisXConfig {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            start: 0.0,
            end: 1.0,
            precision_step: crate::x::DEFAULT_PRECISION_STEP,
            auto_scale: true,
            auto_center: true,
            smoothing: SmoothMethod::default(),
        }
    }
}

impl AxisXConfig {
    pub fn from_value(value: &Value) -> Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }

    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AxisYConfig {
    pub radius: f64,
    pub inner_radius: f64,
    /// Category-axis position the value axis line is anchored at.
    pub axis_location: f64,
    pub start: f64,
    pub end: f64,
}

impl Default for AxisYConfig {
    fn default() -> Self {
        Self {
            radius: 0.0,
            inner_radius: 0.0,
            axis_location: 0.0,
            start: 0.0,
            end: 1.0,
        }
    }
}

impl AxisYConfig {
    pub fn from_value(value: &Value) -> Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }

    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn x_config_defaults_fill_missing_fields() {
        let cfg = AxisXConfig::from_value(&json!({
            "points": [{ "x": 0.0, "y": 0.0 }, { "x": 100.0, "y": 0.0 }],
            "autoScale": false
        }))
        .unwrap();
        assert_eq!(cfg.points.len(), 2);
        assert!(!cfg.auto_scale);
        assert!(cfg.auto_center);
        assert_eq!(cfg.precision_step, 10.0);
        assert_eq!(cfg.end, 1.0);
    }

    #[test]
    fn x_config_smoothing_is_tagged() {
        let cfg = AxisXConfig::from_value(&json!({
            "smoothing": { "type": "monotoneX", "closed": false }
        }))
        .unwrap();
        assert!(matches!(cfg.smoothing, SmoothMethod::MonotoneX { .. }));
    }

    #[test]
    fn y_config_rejects_malformed_input() {
        let err = AxisYConfig::from_value(&json!({ "radius": "wide" }));
        assert!(err.is_err());
    }
}
