use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "docs")]
use utoipa::ToSchema;

use crate::error::{DomainError, DomainResult};

pub const DEFAULT_SCALE: f64 = 1.5;
pub const DEFAULT_BLUR_RADIUS: f64 = 2.0;
pub const DEFAULT_SHARPEN_STRENGTH: f64 = 1.5;
pub const DEFAULT_FACTOR: f64 = 1.2;

pub const MAX_BLUR_RADIUS: f64 = 100.0;
pub const MAX_SHARPEN_STRENGTH: f64 = 10.0;
pub const MAX_FACTOR: f64 = 10.0;

#[cfg_attr(feature = "docs", derive(ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Resize,
    Blur,
    Sharpen,
    Brightness,
    Contrast,
    Saturation,
    Grayscale,
    Sepia,
    Vintage,
    Enhance,
}

impl OperationKind {
    pub const ALL: [Self; 10] = [
        Self::Resize,
        Self::Blur,
        Self::Sharpen,
        Self::Brightness,
        Self::Contrast,
        Self::Saturation,
        Self::Grayscale,
        Self::Sepia,
        Self::Vintage,
        Self::Enhance,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Resize => "resize",
            Self::Blur => "blur",
            Self::Sharpen => "sharpen",
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
            Self::Saturation => "saturation",
            Self::Grayscale => "grayscale",
            Self::Sepia => "sepia",
            Self::Vintage => "vintage",
            Self::Enhance => "enhance",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OperationKind {
    type Err = DomainError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        // "upscale" is the name older clients send for resize.
        if name == "upscale" {
            return Ok(Self::Resize);
        }

        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| DomainError::UnknownOperation(name.to_string()))
    }
}

/// Numeric request parameters keyed by name. Absent keys fall back to the
/// operation's default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamBag {
    values: BTreeMap<String, f64>,
}

impl ParamBag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, f64)> for ParamBag {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

struct ParamRule {
    name: &'static str,
    default: f64,
    min: f64,
    min_exclusive: bool,
    max: Option<f64>,
}

impl ParamRule {
    fn read(&self, params: &ParamBag) -> DomainResult<f64> {
        let value = params.get(self.name).unwrap_or(self.default);

        let invalid = |message: String| DomainError::InvalidParameter {
            name: self.name.to_string(),
            message,
        };

        if !value.is_finite() {
            return Err(invalid("must be a finite number".to_string()));
        }

        let below_min = if self.min_exclusive {
            value <= self.min
        } else {
            value < self.min
        };

        if below_min {
            let bound = if self.min_exclusive {
                "greater than"
            } else {
                "at least"
            };
            return Err(invalid(format!("must be {bound} {}, got {value}", self.min)));
        }

        if let Some(max) = self.max.filter(|max| value > *max) {
            return Err(invalid(format!("must be at most {max}, got {value}")));
        }

        Ok(value)
    }
}

const SCALE: ParamRule = ParamRule {
    name: "scale",
    default: DEFAULT_SCALE,
    min: 0.0,
    min_exclusive: true,
    max: None,
};

const RADIUS: ParamRule = ParamRule {
    name: "radius",
    default: DEFAULT_BLUR_RADIUS,
    min: 0.0,
    min_exclusive: false,
    max: Some(MAX_BLUR_RADIUS),
};

const STRENGTH: ParamRule = ParamRule {
    name: "strength",
    default: DEFAULT_SHARPEN_STRENGTH,
    min: 0.0,
    min_exclusive: false,
    max: Some(MAX_SHARPEN_STRENGTH),
};

const FACTOR: ParamRule = ParamRule {
    name: "factor",
    default: DEFAULT_FACTOR,
    min: 0.0,
    min_exclusive: false,
    max: Some(MAX_FACTOR),
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    Resize { scale: f64 },
    Blur { radius: f64 },
    Sharpen { strength: f64 },
    Brightness { factor: f64 },
    Contrast { factor: f64 },
    Saturation { factor: f64 },
    Grayscale,
    Sepia,
    Vintage,
    Enhance,
}

impl Operation {
    pub fn parse(name: &str, params: &ParamBag) -> DomainResult<Self> {
        let kind = name.parse::<OperationKind>()?;
        Self::from_kind(kind, params)
    }

    pub fn from_kind(kind: OperationKind, params: &ParamBag) -> DomainResult<Self> {
        Ok(match kind {
            OperationKind::Resize => Self::Resize {
                scale: SCALE.read(params)?,
            },
            OperationKind::Blur => Self::Blur {
                radius: RADIUS.read(params)?,
            },
            OperationKind::Sharpen => Self::Sharpen {
                strength: STRENGTH.read(params)?,
            },
            OperationKind::Brightness => Self::Brightness {
                factor: FACTOR.read(params)?,
            },
            OperationKind::Contrast => Self::Contrast {
                factor: FACTOR.read(params)?,
            },
            OperationKind::Saturation => Self::Saturation {
                factor: FACTOR.read(params)?,
            },
            OperationKind::Grayscale => Self::Grayscale,
            OperationKind::Sepia => Self::Sepia,
            OperationKind::Vintage => Self::Vintage,
            OperationKind::Enhance => Self::Enhance,
        })
    }

    #[must_use]
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Resize { .. } => OperationKind::Resize,
            Self::Blur { .. } => OperationKind::Blur,
            Self::Sharpen { .. } => OperationKind::Sharpen,
            Self::Brightness { .. } => OperationKind::Brightness,
            Self::Contrast { .. } => OperationKind::Contrast,
            Self::Saturation { .. } => OperationKind::Saturation,
            Self::Grayscale => OperationKind::Grayscale,
            Self::Sepia => OperationKind::Sepia,
            Self::Vintage => OperationKind::Vintage,
            Self::Enhance => OperationKind::Enhance,
        }
    }

    /// Dimensions of the buffer this operation produces from a
    /// `width` x `height` input.
    #[must_use]
    pub fn output_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        match *self {
            Self::Resize { scale } => scaled_dimensions(width, height, scale),
            _ => (width, height),
        }
    }
}

#[must_use]
pub fn scaled_dimensions(width: u32, height: u32, scale: f64) -> (u32, u32) {
    (scale_side(width, scale), scale_side(height, scale))
}

fn scale_side(length: u32, scale: f64) -> u32 {
    let scaled = (f64::from(length) * scale).round();
    scaled.clamp(1.0, f64::from(u32::MAX)) as u32
}
