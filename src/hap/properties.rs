use crate::error::{Error, ErrorType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Bool,
    #[serde(rename = "uint8")]
    UInt8,
    #[serde(rename = "uint16")]
    UInt16,
    #[serde(rename = "uint32")]
    UInt32,
    #[serde(rename = "uint64")]
    UInt64,
    Int,
    Float,
    String,
    Tlv8,
    Data,
}

impl Format {
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Format::UInt8 | Format::UInt16 | Format::UInt32 | Format::UInt64 | Format::Int
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Perm {
    #[serde(rename = "pr")]
    PairedRead,
    #[serde(rename = "pw")]
    PairedWrite,
    #[serde(rename = "ev")]
    Notify,
    #[serde(rename = "aa")]
    AdditionalAuthorization,
    #[serde(rename = "tw")]
    TimedWrite,
    #[serde(rename = "hd")]
    Hidden,
    #[serde(rename = "wr")]
    WriteResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Celsius,
    Percentage,
    ArcDegrees,
    Lux,
    Seconds,
}

impl Unit {
    /// Suffix appended to logged values.
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Celsius => "°C",
            Unit::Percentage => "%",
            Unit::ArcDegrees => "°",
            Unit::Lux => " lux",
            Unit::Seconds => "s",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Props {
    pub format: Format,
    pub perms: Vec<Perm>,
    pub unit: Option<Unit>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub max_len: Option<usize>,
}

impl Props {
    pub fn new(format: Format, perms: &[Perm]) -> Self {
        Props {
            format,
            perms: perms.to_vec(),
            unit: None,
            min_value: None,
            max_value: None,
            max_len: None,
        }
    }

    pub fn range(mut self, min_value: f64, max_value: f64) -> Self {
        self.min_value = Some(min_value);
        self.max_value = Some(max_value);
        self
    }

    pub fn unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    pub fn is_readable(&self) -> bool {
        self.perms.contains(&Perm::PairedRead)
    }

    pub fn is_writable(&self) -> bool {
        self.perms.contains(&Perm::PairedWrite)
    }

    pub fn is_write_only(&self) -> bool {
        self.is_writable() && !self.is_readable()
    }

    /// Applies an override on top of these props.
    pub fn apply(&mut self, props: &PropsOverride) -> Result<(), Error> {
        let mut next = self.clone();
        if let Some(format) = props.format {
            next.format = format;
        }
        if let Some(perms) = &props.perms {
            next.perms = perms.clone();
        }
        if props.unit.is_some() {
            next.unit = props.unit;
        }
        if props.min_value.is_some() {
            next.min_value = props.min_value;
        }
        if props.max_value.is_some() {
            next.max_value = props.max_value;
        }
        if props.max_len.is_some() {
            next.max_len = props.max_len;
        }

        if let (Some(min), Some(max)) = (next.min_value, next.max_value) {
            if min > max {
                return Err(Error::from_string(
                    format!("minValue {min} exceeds maxValue {max}"),
                    ErrorType::InvalidProps,
                ));
            }
            if next.format.is_integer() && min.ceil() > max.floor() {
                return Err(Error::from_string(
                    format!("no integer in [{min}, {max}]"),
                    ErrorType::InvalidProps,
                ));
            }
        }
        if next.max_len == Some(0) {
            return Err(Error::from_string(
                "maxLen must be positive".to_string(),
                ErrorType::InvalidProps,
            ));
        }
        *self = next;
        Ok(())
    }
}

/// Caller-supplied constraint overrides, applied after the type defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropsOverride {
    pub format: Option<Format>,
    pub perms: Option<Vec<Perm>>,
    pub unit: Option<Unit>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub max_len: Option<usize>,
}
