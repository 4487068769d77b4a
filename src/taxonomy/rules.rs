//! Per-kind field bounds, in characters after trimming.

use crate::validators::{validate_length, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Not part of the kind's shape; input is dropped.
    Absent,
    Optional { max: usize },
    Required { min: usize, max: usize },
}

impl FieldRule {
    pub fn accepts(&self) -> bool {
        !matches!(self, Self::Absent)
    }

    pub fn is_required(&self) -> bool {
        matches!(self, Self::Required { .. })
    }

    /// Checks a trimmed value; `None` means the field was not supplied.
    pub fn check(&self, value: Option<&str>) -> Result<(), ValidationError> {
        match (self, value) {
            (Self::Absent, _) | (Self::Optional { .. }, None) => Ok(()),
            (Self::Optional { max }, Some(v)) => validate_length(v, 0, *max),
            (Self::Required { .. }, None) => Err(ValidationError::Required),
            (Self::Required { min, max }, Some(v)) => validate_length(v, *min, *max),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointsRule {
    pub label_max: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindRules {
    pub title: FieldRule,
    pub description: FieldRule,
    pub option_label: FieldRule,
    pub option_description: FieldRule,
    pub option_value: FieldRule,
    /// `Some` for sectioned kinds: every option needs at least one point.
    pub points: Option<PointsRule>,
}

const fn req(min: usize, max: usize) -> FieldRule {
    FieldRule::Required { min, max }
}

const fn opt(max: usize) -> FieldRule {
    FieldRule::Optional { max }
}

pub const GENDER: KindRules = KindRules {
    title: req(1, 35),
    description: opt(100),
    option_label: req(1, 50),
    option_description: FieldRule::Absent,
    option_value: FieldRule::Absent,
    points: None,
};

pub const SEXUAL_ORIENTATION: KindRules = KindRules {
    title: req(1, 200),
    description: req(20, 25),
    option_label: req(1, 100),
    option_description: req(30, 60),
    option_value: req(1, 50),
    points: None,
};

pub const INTERESTED_IN: KindRules = KindRules {
    title: req(1, 35),
    description: req(1, 100),
    option_label: req(1, 100),
    option_description: FieldRule::Absent,
    option_value: FieldRule::Absent,
    points: None,
};

pub const LOOKING_FOR: KindRules = KindRules {
    title: req(1, 35),
    description: req(35, 100),
    option_label: req(1, 100),
    option_description: req(35, 100),
    option_value: FieldRule::Absent,
    points: None,
};

/// Lifestyle and Things You Love.
pub const SECTIONED: KindRules = KindRules {
    title: req(1, 35),
    description: req(1, 150),
    option_label: req(1, 100),
    option_description: FieldRule::Absent,
    option_value: FieldRule::Absent,
    points: Some(PointsRule { label_max: 50 }),
};

/// Ideal Partner and Loyalty Importance.
pub const PREFERENCE_SCALE: KindRules = KindRules {
    title: req(1, 120),
    description: opt(200),
    option_label: req(1, 100),
    option_description: opt(250),
    option_value: FieldRule::Absent,
    points: None,
};
