//! Feature vector contract for the diabetes inference endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Canonical feature order. Missing-feature reports follow this order.
pub const FEATURES: [&str; 8] = [
    "Pregnancies",
    "Glucose",
    "BloodPressure",
    "SkinThickness",
    "Insulin",
    "BMI",
    "DiabetesPedigreeFunction",
    "Age",
];

/// Features forwarded as integers; the rest stay floating point.
pub const INTEGER_FEATURES: [&str; 6] = [
    "Pregnancies",
    "Glucose",
    "BloodPressure",
    "SkinThickness",
    "Insulin",
    "Age",
];

/// Normalized payload sent to the endpoint. Field order matches [`FEATURES`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureVector {
    #[serde(rename = "Pregnancies")]
    pub pregnancies: i64,
    #[serde(rename = "Glucose")]
    pub glucose: i64,
    #[serde(rename = "BloodPressure")]
    pub blood_pressure: i64,
    #[serde(rename = "SkinThickness")]
    pub skin_thickness: i64,
    #[serde(rename = "Insulin")]
    pub insulin: i64,
    #[serde(rename = "BMI")]
    pub bmi: f64,
    #[serde(rename = "DiabetesPedigreeFunction")]
    pub diabetes_pedigree_function: f64,
    #[serde(rename = "Age")]
    pub age: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeatureError {
    #[error("missing features: {}", .0.join(", "))]
    Missing(Vec<String>),

    #[error("could not convert {feature} value {value} to a number")]
    NotNumeric { feature: &'static str, value: String },

    #[error("{feature} value {value} is not a finite number")]
    NotFinite { feature: &'static str, value: String },

    #[error("{feature} value {value} is out of integer range")]
    OutOfRange { feature: &'static str, value: String },
}

/// Names from [`FEATURES`] that are absent from `payload`, in canonical order.
pub fn missing_features(payload: &Map<String, Value>) -> Vec<String> {
    FEATURES
        .iter()
        .filter(|name| !payload.contains_key(**name))
        .map(|name| name.to_string())
        .collect()
}

impl FeatureVector {
    /// Checks completeness, then coerces every value to `f64` and truncates
    /// the integer features toward zero.
    pub fn from_payload(payload: &Map<String, Value>) -> Result<Self, FeatureError> {
        let missing = missing_features(payload);
        if !missing.is_empty() {
            return Err(FeatureError::Missing(missing));
        }

        let float = |feature: &'static str| -> Result<f64, FeatureError> {
            let value = payload
                .get(feature)
                .ok_or_else(|| FeatureError::Missing(vec![feature.to_string()]))?;
            let number = coerce_float(feature, value)?;
            if !number.is_finite() {
                return Err(FeatureError::NotFinite {
                    feature,
                    value: value.to_string(),
                });
            }
            Ok(number)
        };
        let integer = |feature: &'static str| -> Result<i64, FeatureError> {
            truncate_to_integer(feature, float(feature)?)
        };

        Ok(Self {
            pregnancies: integer("Pregnancies")?,
            glucose: integer("Glucose")?,
            blood_pressure: integer("BloodPressure")?,
            skin_thickness: integer("SkinThickness")?,
            insulin: integer("Insulin")?,
            bmi: float("BMI")?,
            diabetes_pedigree_function: float("DiabetesPedigreeFunction")?,
            age: integer("Age")?,
        })
    }
}

fn coerce_float(feature: &'static str, value: &Value) -> Result<f64, FeatureError> {
    let not_numeric = || FeatureError::NotNumeric {
        feature,
        value: value.to_string(),
    };
    match value {
        Value::Number(number) => number.as_f64().ok_or_else(not_numeric),
        Value::String(text) => text.trim().parse::<f64>().map_err(|_| not_numeric()),
        Value::Bool(flag) => Ok(if *flag { 1.0 } else { 0.0 }),
        Value::Null | Value::Array(_) | Value::Object(_) => Err(not_numeric()),
    }
}

fn truncate_to_integer(feature: &'static str, number: f64) -> Result<i64, FeatureError> {
    let truncated = number.trunc();
    // i64::MAX is not exactly representable; 2^63 is the first value out of range.
    if truncated < i64::MIN as f64 || truncated >= 9_223_372_036_854_775_808.0 {
        return Err(FeatureError::OutOfRange {
            feature,
            value: number.to_string(),
        });
    }
    Ok(truncated as i64)
}
