//! Geometric views of length bias.
//!
//! Two independent outputs are derived from a [`BiasMap`]:
//!
//! - a polar embedding, placing each intent at its distance from the balanced
//!   bias `(1/3, 1/3, 1/3)` and at an angle blended from three category axes;
//! - a compliance table, flagging for each category whether the intent's
//!   fraction falls inside the configured [`ThresholdConfig`] range.
//!
//! Both are ordered by intent identifier.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::analysis::bias::{BiasMap, BiasVector};
use crate::analysis::length::LengthCategory;
use crate::analysis::threshold::ThresholdConfig;

/// Scales the distance from the balanced point so a single-category bias
/// such as `(1, 0, 0)` has radius 1.
pub fn radius_scale() -> f64 {
    6.0f64.sqrt() / 2.0
}

/// Axis direction, in radians, of each category in bias-vector order.
pub const AXIS_ANGLES: [f64; 3] = [
    (120.0 * PI) / 180.0,
    (240.0 * PI) / 180.0,
    (360.0 * PI) / 180.0,
];

/// Angular axis ticks for renderers, in degrees.
pub const AXIS_TICKS: [(f64, &str); 3] = [
    (0.0, "Fluff"),
    (120.0, "Keywords"),
    (240.0, "Natural Language"),
];

/// Position of one intent in the polar embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolarPoint {
    pub intent: String,
    /// Distance from the balanced bias, 0 at the center and 1 at a pure category.
    pub radius: f64,
    /// Angle in radians. Not wrapped into `[0, 2π)`.
    pub angle: f64,
}

impl PolarPoint {
    /// Embed one bias vector.
    pub fn from_bias<S: Into<String>>(intent: S, bias: &BiasVector) -> Self {
        Self {
            intent: intent.into(),
            radius: bias_radius(bias),
            angle: bias_angle(bias),
        }
    }

    pub fn angle_degrees(&self) -> f64 {
        self.angle.to_degrees()
    }

    /// Cartesian coordinates, for renderers without a polar mode.
    pub fn to_cartesian(&self) -> (f64, f64) {
        (self.radius * self.angle.cos(), self.radius * self.angle.sin())
    }
}

/// Normalized Euclidean distance of a bias vector from `(1/3, 1/3, 1/3)`.
pub fn bias_radius(bias: &BiasVector) -> f64 {
    let center = BiasVector::balanced().as_array();
    let squared: f64 = bias
        .as_array()
        .iter()
        .zip(center.iter())
        .map(|(value, mid)| (value - mid) * (value - mid))
        .sum();
    squared.sqrt() * radius_scale()
}

/// Bias-weighted sum of the category axis angles, in radians.
pub fn bias_angle(bias: &BiasVector) -> f64 {
    bias.as_array()
        .iter()
        .zip(AXIS_ANGLES.iter())
        .map(|(weight, axis)| weight * axis)
        .sum()
}

/// Embed every intent of a bias map, ordered by intent identifier.
pub fn polar_embedding(biases: &BiasMap) -> Vec<PolarPoint> {
    biases
        .iter()
        .map(|(intent, bias)| PolarPoint::from_bias(intent.as_str(), bias))
        .collect()
}

/// Pass/fail flags of one intent against a threshold configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceRow {
    pub keyword: bool,
    pub natural_language: bool,
    pub fluff: bool,
}

impl ComplianceRow {
    /// Compare each fraction of `bias` with its inclusive range.
    pub fn evaluate(bias: &BiasVector, thresholds: &ThresholdConfig) -> Self {
        Self {
            keyword: thresholds.keyword.contains(bias.keyword),
            natural_language: thresholds.natural_language.contains(bias.natural_language),
            fluff: thresholds.fluff.contains(bias.fluff),
        }
    }

    /// Flag for one category.
    pub fn passes(&self, category: LengthCategory) -> bool {
        match category {
            LengthCategory::Keyword => self.keyword,
            LengthCategory::NaturalLanguage => self.natural_language,
            LengthCategory::Fluff => self.fluff,
        }
    }

    pub fn passes_all(&self) -> bool {
        self.keyword && self.natural_language && self.fluff
    }
}

/// Intent identifier to compliance row, ordered by intent identifier.
pub type ComplianceTable = BTreeMap<String, ComplianceRow>;

/// Evaluate every intent of a bias map against the thresholds.
///
/// Bounds are used as given: an inverted range fails every intent.
pub fn compliance_table(biases: &BiasMap, thresholds: &ThresholdConfig) -> ComplianceTable {
    for category in LengthCategory::ALL {
        let bounds = thresholds.bounds(category);
        if bounds.is_inverted() {
            log::warn!(
                "{category} threshold range [{}, {}] is inverted; every intent will fail it",
                bounds.min,
                bounds.max
            );
        }
    }

    biases
        .iter()
        .map(|(intent, bias)| (intent.clone(), ComplianceRow::evaluate(bias, thresholds)))
        .collect()
}
