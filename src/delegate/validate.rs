use crate::hap::{
    properties::{Format, Props},
    value::Value,
};
use std::fmt;

/// Why a candidate value was adjusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation {
    Min,
    Max,
    Truncated,
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Annotation::Min => f.write_str("[min]"),
            Annotation::Max => f.write_str("[max]"),
            Annotation::Truncated => f.write_str("[truncated]"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Validated {
    pub value: Value,
    pub annotation: Option<Annotation>,
}

impl Validated {
    fn unchanged(value: Value) -> Self {
        Validated {
            value,
            annotation: None,
        }
    }

    /// `" [max]"` style suffix for log lines, empty when nothing was adjusted.
    pub fn suffix(&self) -> String {
        self.annotation
            .map(|annotation| format!(" {annotation}"))
            .unwrap_or_default()
    }
}

/// Clamps or truncates `candidate` against `props`.
///
/// Integer formats are rounded to the nearest integer and clamped to
/// `[min_value, max_value]`, floats are only clamped, strings are cut to
/// `max_len` characters. Everything else, including values whose type does
/// not match the format, passes through. Without props (no bound
/// characteristic) this is the identity. NaN is pinned to `min_value`, or
/// `max_value` when only that is set; with no bounds it is kept as is.
pub fn validate(props: Option<&Props>, candidate: Value) -> Validated {
    let Some(props) = props else {
        return Validated::unchanged(candidate);
    };

    match props.format {
        format if format.is_integer() => match candidate.as_f64() {
            Some(n) => {
                let min = props.min_value.map(f64::ceil);
                let max = props.max_value.map(f64::floor);
                let (n, annotation) = clamp(n.round(), min, max);
                Validated {
                    value: Value::Int(n as i64),
                    annotation,
                }
            }
            None => Validated::unchanged(candidate),
        },
        Format::Float => match candidate.as_f64() {
            Some(n) => {
                let (n, annotation) = clamp(n, props.min_value, props.max_value);
                Validated {
                    value: Value::Float(n),
                    annotation,
                }
            }
            None => Validated::unchanged(candidate),
        },
        Format::String => match (candidate, props.max_len) {
            (Value::String(s), Some(max_len)) if s.chars().count() > max_len => Validated {
                value: Value::String(s.chars().take(max_len).collect()),
                annotation: Some(Annotation::Truncated),
            },
            (candidate, _) => Validated::unchanged(candidate),
        },
        _ => Validated::unchanged(candidate),
    }
}

/// Whether `candidate` would leave the mirror unchanged. Numbers compare by
/// value, so `Int(20)` and `Float(20.0)` are the same, and NaN equals NaN.
pub(crate) fn same_value(current: Option<&Value>, candidate: &Value) -> bool {
    let Some(current) = current else {
        return false;
    };
    match (current, candidate) {
        (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => *a as f64 == *b,
        (Value::Float(a), Value::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
        _ => current == candidate,
    }
}

fn clamp(n: f64, min: Option<f64>, max: Option<f64>) -> (f64, Option<Annotation>) {
    if let Some(min) = min {
        // NaN has no place in a range, pin it to the bottom
        if n < min || n.is_nan() {
            return (min, Some(Annotation::Min));
        }
    }
    if let Some(max) = max {
        if n > max || n.is_nan() {
            return (max, Some(Annotation::Max));
        }
    }
    (n, None)
}
