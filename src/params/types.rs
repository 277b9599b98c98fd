//! Parameter data types
//!
//! The host's parameter system owns the values; these types describe what
//! the plugin registers and what crosses the accessor boundary.

use serde::Serialize;

use crate::error::FxMaskError;
use crate::mask::Point2D;

/// Host parameter identifiers
///
/// The numeric values are what the host stores; renumbering one orphans
/// existing documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u32)]
pub enum ParameterId {
    LowerLeft = 1,
    UpperRight = 2,
    FillMode = 3,
    Brightness = 4,
    FillColor = 5,
    OutlineColor = 6,
}

impl ParameterId {
    pub const ALL: [ParameterId; 6] = [
        ParameterId::LowerLeft,
        ParameterId::UpperRight,
        ParameterId::FillMode,
        ParameterId::Brightness,
        ParameterId::FillColor,
        ParameterId::OutlineColor,
    ];

    /// Numeric id as stored by the host
    pub fn raw(self) -> u32 {
        self as u32
    }

    /// Look up an id from the host's numeric value
    pub fn from_raw(raw: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.raw() == raw)
    }
}

/// Parameter value types supported by the plugin
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterValue {
    /// Floating point value
    Float(f32),
    /// Boolean value
    Bool(bool),
    /// 2D point in normalized render space
    Point([f32; 2]),
    /// RGBA color (0.0-1.0 per channel)
    Color([f32; 4]),
}

impl ParameterValue {
    /// Short type name used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            ParameterValue::Float(_) => "float",
            ParameterValue::Bool(_) => "bool",
            ParameterValue::Point(_) => "point",
            ParameterValue::Color(_) => "color",
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            ParameterValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParameterValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<Point2D> {
        match self {
            ParameterValue::Point(v) => Some(Point2D::from(*v)),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<[f32; 4]> {
        match self {
            ParameterValue::Color(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<Point2D> for ParameterValue {
    fn from(p: Point2D) -> Self {
        ParameterValue::Point(p.to_array())
    }
}

/// Metadata for a parameter (describes the parameter, doesn't hold the value)
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterMeta {
    /// Host id
    pub id: ParameterId,
    /// Internal name
    pub name: String,
    /// Display label in the host inspector
    pub label: String,
    /// Default value
    pub default: ParameterValue,
    /// Minimum value (for numeric types)
    pub min: Option<f32>,
    /// Maximum value (for numeric types)
    pub max: Option<f32>,
}

impl ParameterMeta {
    /// Create a new float parameter metadata
    pub fn float(id: ParameterId, name: impl Into<String>, label: impl Into<String>, default: f32, min: f32, max: f32) -> Self {
        Self {
            id,
            name: name.into(),
            label: label.into(),
            default: ParameterValue::Float(default),
            min: Some(min),
            max: Some(max),
        }
    }

    /// Create a new boolean parameter metadata
    pub fn bool(id: ParameterId, name: impl Into<String>, label: impl Into<String>, default: bool) -> Self {
        Self {
            id,
            name: name.into(),
            label: label.into(),
            default: ParameterValue::Bool(default),
            min: None,
            max: None,
        }
    }

    /// Create a new point parameter metadata (coordinates clamped to 0-1)
    pub fn point(id: ParameterId, name: impl Into<String>, label: impl Into<String>, default: Point2D) -> Self {
        Self {
            id,
            name: name.into(),
            label: label.into(),
            default: default.into(),
            min: Some(0.0),
            max: Some(1.0),
        }
    }

    /// Create a new color parameter metadata
    pub fn color(id: ParameterId, name: impl Into<String>, label: impl Into<String>, default: [f32; 4]) -> Self {
        Self {
            id,
            name: name.into(),
            label: label.into(),
            default: ParameterValue::Color(default),
            min: None,
            max: None,
        }
    }
}

/// A parameter definition with its current value
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub meta: ParameterMeta,
    pub value: ParameterValue,
}

impl Parameter {
    /// Create a parameter holding its default value
    pub fn new(meta: ParameterMeta) -> Self {
        let value = meta.default;
        Self { meta, value }
    }

    pub fn id(&self) -> ParameterId {
        self.meta.id
    }

    /// Set a new value, clamping numeric values to the declared range
    pub fn set_value(&mut self, value: ParameterValue) -> Result<(), FxMaskError> {
        if std::mem::discriminant(&value) != std::mem::discriminant(&self.meta.default) {
            return Err(FxMaskError::ParameterType {
                id: self.meta.id,
                expected: self.meta.default.kind(),
            });
        }
        self.value = match value {
            ParameterValue::Float(v) => ParameterValue::Float(self.clamp(v)),
            ParameterValue::Point([x, y]) => ParameterValue::Point([self.clamp(x), self.clamp(y)]),
            other => other,
        };
        Ok(())
    }

    fn clamp(&self, v: f32) -> f32 {
        let lo = self.meta.min.unwrap_or(f32::NEG_INFINITY);
        let hi = self.meta.max.unwrap_or(f32::INFINITY);
        v.clamp(lo, hi)
    }
}
