use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Validation kinds the compiler recognizes on a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Unique,
    Size,
    ProhibitRegexp,
    Range,
}

impl RuleKind {
    /// Kinds interpreted on `Symbol` and `Text` fields, in evaluation order.
    pub const STRING: &'static [RuleKind] =
        &[RuleKind::Unique, RuleKind::Size, RuleKind::ProhibitRegexp];
    /// Kinds interpreted on `Integer` and `Float` fields.
    pub const NUMBER: &'static [RuleKind] = &[RuleKind::Range];

    /// Declaration key for this kind.
    pub fn key(self) -> &'static str {
        match self {
            RuleKind::Unique => "unique",
            RuleKind::Size => "size",
            RuleKind::ProhibitRegexp => "prohibitRegexp",
            RuleKind::Range => "range",
        }
    }
}

/// Inclusive lower/upper bounds shared by `size` and `range`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Bounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Bounds {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// Drop bounds equal to zero, which the host schema treats as unset.
    pub fn without_zero(self) -> Self {
        Self {
            min: self.min.filter(|value| *value != 0.0),
            max: self.max.filter(|value| *value != 0.0),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        match (self.min, self.max) {
            (Some(min), Some(max)) => min <= value && value <= max,
            (Some(min), None) => min <= value,
            (None, Some(max)) => value <= max,
            (None, None) => true,
        }
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (Some(min), Some(max)) => write!(f, "{min}..={max}"),
            (Some(min), None) => write!(f, ">= {min}"),
            (None, Some(max)) => write!(f, "<= {max}"),
            (None, None) => f.write_str("unbounded"),
        }
    }
}

/// Configuration of a `prohibitRegexp` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PatternConfig {
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<String>,
}

impl PatternConfig {
    /// Declared flags, empty when unset.
    pub fn flags(&self) -> &str {
        self.flags.as_deref().unwrap_or("")
    }
}

/// A recognized validation rule, parsed from its declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Uniqueness across entries. Not checked; always passes.
    Unique,
    /// Length of a string value.
    Size(Bounds),
    /// The value must not match the pattern.
    ProhibitRegexp(PatternConfig),
    /// Numeric value bounds.
    Range(Bounds),
    /// The value must not be null.
    Required,
}

impl Rule {
    /// Parse the configuration stored under a recognized declaration key.
    pub fn parse(kind: RuleKind, config: &Value) -> Result<Self, serde_json::Error> {
        let rule = match kind {
            RuleKind::Unique => Rule::Unique,
            RuleKind::Size => Rule::Size(Bounds::deserialize(config)?),
            RuleKind::ProhibitRegexp => Rule::ProhibitRegexp(PatternConfig::deserialize(config)?),
            RuleKind::Range => Rule::Range(Bounds::deserialize(config)?),
        };
        Ok(rule)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Rule::Unique => "unique",
            Rule::Size(_) => "size",
            Rule::ProhibitRegexp(_) => "prohibitRegexp",
            Rule::Range(_) => "range",
            Rule::Required => "required",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Unique => f.write_str("unique (not checked)"),
            Rule::Size(bounds) => write!(f, "size {bounds}"),
            Rule::ProhibitRegexp(config) if config.flags().is_empty() => {
                write!(f, "prohibitRegexp /{}/", config.pattern)
            }
            Rule::ProhibitRegexp(config) => {
                write!(f, "prohibitRegexp /{}/{}", config.pattern, config.flags())
            }
            Rule::Range(bounds) => write!(f, "range {bounds}"),
            Rule::Required => f.write_str("required"),
        }
    }
}

/// Knobs for compiling declarations into predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileOptions {
    /// Treat a `min`/`max` of `0` as if it were not declared.
    pub zero_bound_is_absent: bool,
    /// Compare a null value as `0` under `range`, the way a JavaScript
    /// relational comparison coerces it. When false, null passes `range`.
    pub null_range_value_is_zero: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            zero_bound_is_absent: true,
            null_range_value_is_zero: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn bounds_cover_all_shapes() {
        assert!(Bounds::new(Some(5.0), Some(10.0)).contains(5.0));
        assert!(Bounds::new(Some(5.0), Some(10.0)).contains(10.0));
        assert!(!Bounds::new(Some(5.0), Some(10.0)).contains(4.0));
        assert!(!Bounds::new(Some(5.0), Some(10.0)).contains(11.0));
        assert!(Bounds::new(Some(5.0), None).contains(1e9));
        assert!(!Bounds::new(None, Some(3.0)).contains(3.5));
        assert!(Bounds::default().contains(-1.0));
    }

    #[test]
    fn zero_bounds_are_dropped() {
        let bounds = Bounds::new(Some(0.0), Some(4.0)).without_zero();
        assert_eq!(bounds, Bounds::new(None, Some(4.0)));
        let negative = Bounds::new(Some(-2.0), Some(0.0)).without_zero();
        assert_eq!(negative, Bounds::new(Some(-2.0), None));
    }

    #[test]
    fn parses_declared_configs() {
        let size = Rule::parse(RuleKind::Size, &json!({ "min": 5, "max": 10 })).expect("size");
        assert_eq!(size, Rule::Size(Bounds::new(Some(5.0), Some(10.0))));

        let range = Rule::parse(RuleKind::Range, &json!({ "min": 1.5, "max": null }))
            .expect("range");
        assert_eq!(range, Rule::Range(Bounds::new(Some(1.5), None)));

        let pattern = Rule::parse(RuleKind::ProhibitRegexp, &json!({ "pattern": "^a" }))
            .expect("pattern");
        assert_eq!(pattern.to_string(), "prohibitRegexp /^a/");

        assert_eq!(Rule::parse(RuleKind::Unique, &json!(true)).expect("unique"), Rule::Unique);
    }

    #[test]
    fn rejects_malformed_configs() {
        assert!(Rule::parse(RuleKind::Size, &json!("ten")).is_err());
        assert!(Rule::parse(RuleKind::Range, &json!({ "min": "1" })).is_err());
        assert!(Rule::parse(RuleKind::ProhibitRegexp, &json!({ "flags": "i" })).is_err());
    }

    #[test]
    fn displays_bounds() {
        assert_eq!(Rule::Size(Bounds::new(Some(5.0), Some(10.0))).to_string(), "size 5..=10");
        assert_eq!(Rule::Range(Bounds::new(Some(18.0), None)).to_string(), "range >= 18");
        assert_eq!(Rule::Range(Bounds::default()).to_string(), "range unbounded");
    }
}
