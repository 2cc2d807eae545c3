//! Declared parameter schema: what a panel control may write into a field.

use std::fmt;

use prim_core::{PrimError, Result};
use serde::{Deserialize, Serialize};

/// A value held by one parameter field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(u32),
    Float(f64),
}

impl ParamValue {
    pub fn as_f64(self, name: &str) -> Result<f64> {
        match self {
            ParamValue::Float(v) => Ok(v),
            ParamValue::Int(v) => Ok(v as f64),
            ParamValue::Bool(_) => Err(type_error(name, "a number")),
        }
    }

    /// Integer fields accept floats and floor them. Panel edits are rounded
    /// earlier, by `ParamSpec::clamp`.
    pub fn as_u32(self, name: &str) -> Result<u32> {
        match self {
            ParamValue::Int(v) => Ok(v),
            ParamValue::Float(v) if v.is_finite() => Ok(v.floor().max(0.0) as u32),
            _ => Err(type_error(name, "an integer")),
        }
    }

    pub fn as_bool(self, name: &str) -> Result<bool> {
        match self {
            ParamValue::Bool(v) => Ok(v),
            _ => Err(type_error(name, "a boolean")),
        }
    }

    /// Parse a textual edit such as `2`, `0.75` or `true`.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        match text {
            "true" => return Some(ParamValue::Bool(true)),
            "false" => return Some(ParamValue::Bool(false)),
            _ => {}
        }
        if let Ok(v) = text.parse::<u32>() {
            return Some(ParamValue::Int(v));
        }
        text.parse::<f64>().ok().filter(|v| v.is_finite()).map(ParamValue::Float)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(v) => write!(f, "{v}"),
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Float(v) => write!(f, "{v}"),
        }
    }
}

fn type_error(name: &str, expected: &'static str) -> PrimError {
    PrimError::ParameterType {
        name: name.to_string(),
        expected,
    }
}

/// What a field measures. Angles are always declared and stored in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamUnit {
    Length,
    Count,
    Degrees,
    Pixels,
    Flag,
}

/// Valid values of a field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParamRange {
    Float { min: f64, max: f64, step: Option<f64> },
    Int { min: u32, max: u32, step: u32 },
    Toggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    pub unit: ParamUnit,
    pub range: ParamRange,
}

impl ParamSpec {
    pub const fn length(name: &'static str, min: f64, max: f64, step: Option<f64>) -> Self {
        Self {
            name,
            unit: ParamUnit::Length,
            range: ParamRange::Float { min, max, step },
        }
    }

    pub const fn degrees(name: &'static str, min: f64, max: f64, step: Option<f64>) -> Self {
        Self {
            name,
            unit: ParamUnit::Degrees,
            range: ParamRange::Float { min, max, step },
        }
    }

    pub const fn count(name: &'static str, min: u32, max: u32, step: u32) -> Self {
        Self {
            name,
            unit: ParamUnit::Count,
            range: ParamRange::Int { min, max, step },
        }
    }

    pub const fn pixels(name: &'static str, min: f64, max: f64, step: Option<f64>) -> Self {
        Self {
            name,
            unit: ParamUnit::Pixels,
            range: ParamRange::Float { min, max, step },
        }
    }

    pub const fn toggle(name: &'static str) -> Self {
        Self {
            name,
            unit: ParamUnit::Flag,
            range: ParamRange::Toggle,
        }
    }

    /// Bring an edit into the declared range: snap to the step grid anchored
    /// at `min`, then clamp to `[min, max]`.
    pub fn clamp(&self, value: ParamValue) -> Result<ParamValue> {
        match self.range {
            ParamRange::Float { min, max, step } => {
                let v = value.as_f64(self.name)?;
                if !v.is_finite() {
                    return Err(type_error(self.name, "a finite number"));
                }
                let snapped = match step {
                    Some(step) if step > 0.0 => min + ((v - min) / step).round() * step,
                    _ => v,
                };
                Ok(ParamValue::Float(snapped.clamp(min, max)))
            }
            ParamRange::Int { min, max, step } => {
                let v = match value {
                    ParamValue::Float(f) if f.is_finite() => f.round(),
                    ParamValue::Float(_) => return Err(type_error(self.name, "a finite number")),
                    other => other.as_u32(self.name)? as f64,
                };
                let step = step.max(1) as f64;
                let snapped = min as f64 + ((v - min as f64) / step).round() * step;
                Ok(ParamValue::Int(snapped.clamp(min as f64, max as f64) as u32))
            }
            ParamRange::Toggle => Ok(ParamValue::Bool(value.as_bool(self.name)?)),
        }
    }

    pub fn contains(&self, value: ParamValue) -> bool {
        match (self.range, value) {
            (ParamRange::Float { min, max, .. }, ParamValue::Float(v)) => (min..=max).contains(&v),
            (ParamRange::Int { min, max, .. }, ParamValue::Int(v)) => (min..=max).contains(&v),
            (ParamRange::Toggle, ParamValue::Bool(_)) => true,
            _ => false,
        }
    }
}
