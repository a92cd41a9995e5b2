//! Ideal length-bias ranges used by the compliance table.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::length::LengthCategory;
use crate::error::{Result, UtterscopeError};

/// Inclusive `[min, max]` range for one category fraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryBounds {
    pub min: f64,
    pub max: f64,
}

impl CategoryBounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `fraction` lies inside the range, both ends included.
    pub fn contains(&self, fraction: f64) -> bool {
        self.min <= fraction && fraction <= self.max
    }

    /// A range with `min > max` accepts nothing.
    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }
}

/// A range as written in a configuration file, either bound may be left out.
#[derive(Debug, Default, Deserialize)]
struct PartialBounds {
    min: Option<f64>,
    max: Option<f64>,
}

impl PartialBounds {
    fn fill_from(self, default: CategoryBounds) -> CategoryBounds {
        CategoryBounds::new(
            self.min.unwrap_or(default.min),
            self.max.unwrap_or(default.max),
        )
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PartialThresholds {
    keyword: PartialBounds,
    natural_language: PartialBounds,
    fluff: PartialBounds,
}

impl From<PartialThresholds> for ThresholdConfig {
    fn from(partial: PartialThresholds) -> Self {
        let defaults = ThresholdConfig::default();
        Self {
            keyword: partial.keyword.fill_from(defaults.keyword),
            natural_language: partial.natural_language.fill_from(defaults.natural_language),
            fluff: partial.fluff.fill_from(defaults.fluff),
        }
    }
}

/// Minimum and maximum fraction allowed for each length category.
///
/// Missing ranges, and missing bounds inside a range, fall back to the
/// defaults when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "PartialThresholds")]
pub struct ThresholdConfig {
    pub keyword: CategoryBounds,
    pub natural_language: CategoryBounds,
    pub fluff: CategoryBounds,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            keyword: CategoryBounds::new(0.05, 0.25),
            natural_language: CategoryBounds::new(0.25, 0.65),
            fluff: CategoryBounds::new(0.25, 0.50),
        }
    }
}

impl ThresholdConfig {
    /// Build a configuration from its six bounds.
    pub fn new(
        min_keyword: f64,
        max_keyword: f64,
        min_natural_language: f64,
        max_natural_language: f64,
        min_fluff: f64,
        max_fluff: f64,
    ) -> Self {
        Self {
            keyword: CategoryBounds::new(min_keyword, max_keyword),
            natural_language: CategoryBounds::new(min_natural_language, max_natural_language),
            fluff: CategoryBounds::new(min_fluff, max_fluff),
        }
    }

    /// Bounds for one category.
    pub fn bounds(&self, category: LengthCategory) -> CategoryBounds {
        match category {
            LengthCategory::Keyword => self.keyword,
            LengthCategory::NaturalLanguage => self.natural_language,
            LengthCategory::Fluff => self.fluff,
        }
    }

    /// Replace the bounds of one category.
    pub fn with_bounds(mut self, category: LengthCategory, bounds: CategoryBounds) -> Self {
        match category {
            LengthCategory::Keyword => self.keyword = bounds,
            LengthCategory::NaturalLanguage => self.natural_language = bounds,
            LengthCategory::Fluff => self.fluff = bounds,
        }
        self
    }

    /// Check that every bound lies in `[0, 1]` and no range is inverted.
    ///
    /// The compliance table does not call this; it uses the bounds as given.
    pub fn validate(&self) -> Result<()> {
        for category in LengthCategory::ALL {
            let bounds = self.bounds(category);
            for (name, value) in [("min", bounds.min), ("max", bounds.max)] {
                if !(0.0..=1.0).contains(&value) {
                    return Err(UtterscopeError::invalid_threshold(format!(
                        "{category} {name} {value} is outside [0, 1]"
                    )));
                }
            }
            if bounds.is_inverted() {
                return Err(UtterscopeError::invalid_threshold(format!(
                    "{category} min {} is greater than max {}",
                    bounds.min, bounds.max
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let config: ThresholdConfig = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds() {
        let config = ThresholdConfig::default();
        assert_eq!(config.keyword, CategoryBounds::new(0.05, 0.25));
        assert_eq!(config.natural_language, CategoryBounds::new(0.25, 0.65));
        assert_eq!(config.fluff, CategoryBounds::new(0.25, 0.50));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let bounds = CategoryBounds::new(0.05, 0.25);
        assert!(bounds.contains(0.05));
        assert!(bounds.contains(0.25));
        assert!(!bounds.contains(0.30));
        assert!(!bounds.contains(0.0));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let config = ThresholdConfig::new(-0.1, 0.2, 0.0, 1.0, 0.0, 1.0);
        assert!(matches!(
            config.validate(),
            Err(UtterscopeError::InvalidThreshold(_))
        ));

        let config = ThresholdConfig::new(0.0, 0.2, 0.0, 1.5, 0.0, 1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let config = ThresholdConfig::default()
            .with_bounds(LengthCategory::Fluff, CategoryBounds::new(0.6, 0.4));
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid threshold: Fluff min 0.6 is greater than max 0.4"
        );
    }

    #[test]
    fn test_json_partial_config_uses_defaults() {
        let config =
            ThresholdConfig::from_json_str(r#"{"keyword": {"min": 0.1, "max": 0.3}}"#).unwrap();
        assert_eq!(config.keyword, CategoryBounds::new(0.1, 0.3));
        assert_eq!(config.fluff, ThresholdConfig::default().fluff);
    }

    #[test]
    fn test_json_half_range_keeps_default_bound() {
        let config = ThresholdConfig::from_json_str(r#"{"keyword": {"max": 0.3}}"#).unwrap();
        assert_eq!(config.keyword, CategoryBounds::new(0.05, 0.3));

        let config = ThresholdConfig::from_json_str(r#"{"fluff": {"min": 0.1}}"#).unwrap();
        assert_eq!(config.fluff, CategoryBounds::new(0.1, 0.50));
        assert_eq!(config.natural_language, CategoryBounds::new(0.25, 0.65));
    }

    #[test]
    fn test_json_round_trip_of_serialized_config() {
        let config = ThresholdConfig::new(0.1, 0.2, 0.3, 0.4, 0.5, 0.6);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(ThresholdConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_json_invalid_config_rejected() {
        let result = ThresholdConfig::from_json_str(r#"{"fluff": {"min": 0.9, "max": 0.1}}"#);
        assert!(matches!(result, Err(UtterscopeError::InvalidThreshold(_))));

        let result = ThresholdConfig::from_json_str("not json");
        assert!(matches!(result, Err(UtterscopeError::Json(_))));
    }
}
