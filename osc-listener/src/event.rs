//! Inbound event types
//!
//! OSC arguments are dynamically typed. They are narrowed here to the three
//! kinds the DAW actually sends, with fallible accessors so a handler asking
//! for the wrong kind gets a [`DecodeError`] instead of a coerced value.

use chrono::{DateTime, Utc};
use rosc::{OscMessage, OscType};
use thiserror::Error;

/// A single decoded OSC argument.
#[derive(Debug, Clone, PartialEq)]
pub enum OscValue {
    /// `int`, `long`, `float` and `double` arguments
    Number(f64),
    /// `string` arguments
    Text(String),
    /// `true`/`false` arguments
    Bool(bool),
}

impl OscValue {
    /// Human-readable kind, used in decode errors
    pub fn kind(&self) -> &'static str {
        match self {
            OscValue::Number(_) => "number",
            OscValue::Text(_) => "string",
            OscValue::Bool(_) => "bool",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            OscValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OscValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OscValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<f64> for OscValue {
    fn from(value: f64) -> Self {
        OscValue::Number(value)
    }
}

impl From<&str> for OscValue {
    fn from(value: &str) -> Self {
        OscValue::Text(value.to_string())
    }
}

impl From<String> for OscValue {
    fn from(value: String) -> Self {
        OscValue::Text(value)
    }
}

impl From<bool> for OscValue {
    fn from(value: bool) -> Self {
        OscValue::Bool(value)
    }
}

impl TryFrom<OscType> for OscValue {
    /// Name of the unsupported OSC type
    type Error = &'static str;

    fn try_from(value: OscType) -> Result<Self, Self::Error> {
        match value {
            OscType::Int(v) => Ok(OscValue::Number(f64::from(v))),
            OscType::Long(v) => Ok(OscValue::Number(v as f64)),
            OscType::Float(v) => Ok(OscValue::Number(f64::from(v))),
            OscType::Double(v) => Ok(OscValue::Number(v)),
            OscType::String(v) => Ok(OscValue::Text(v)),
            OscType::Bool(v) => Ok(OscValue::Bool(v)),
            other => Err(match other {
                OscType::Blob(_) => "blob",
                OscType::Time(_) => "time",
                OscType::Char(_) => "char",
                OscType::Color(_) => "color",
                OscType::Midi(_) => "midi",
                OscType::Nil => "nil",
                OscType::Inf => "inf",
                _ => "array",
            }),
        }
    }
}

/// Errors raised when an event does not carry what its address requires
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// The message has fewer arguments than the handler reads
    #[error("{address}: missing argument {index}")]
    MissingArgument { address: String, index: usize },

    /// The argument exists but has the wrong kind
    #[error("{address}: argument {index} is a {found}, expected a {expected}")]
    TypeMismatch {
        address: String,
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    /// The message carries an OSC type with no [`OscValue`] counterpart
    #[error("{address}: unsupported OSC argument type '{type_name}'")]
    UnsupportedType {
        address: String,
        type_name: &'static str,
    },
}

/// An address-tagged event from the transport listener
#[derive(Debug, Clone, PartialEq)]
pub struct InboundEvent {
    /// OSC address pattern, e.g. `/beat/str`
    pub address: String,
    /// Positional arguments in message order
    pub args: Vec<OscValue>,
    /// When the datagram carrying this message was received
    pub received_at: DateTime<Utc>,
}

impl InboundEvent {
    /// Create an event stamped with the current time
    pub fn new(address: impl Into<String>, args: Vec<OscValue>) -> Self {
        Self {
            address: address.into(),
            args,
            received_at: Utc::now(),
        }
    }

    /// Convert a decoded OSC message.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::UnsupportedType` if any argument is of a type
    /// other than number, string or bool.
    pub fn from_message(message: OscMessage, received_at: DateTime<Utc>) -> Result<Self, DecodeError> {
        let OscMessage { addr, args } = message;

        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            match OscValue::try_from(arg) {
                Ok(value) => values.push(value),
                Err(type_name) => {
                    return Err(DecodeError::UnsupportedType {
                        address: addr,
                        type_name,
                    })
                }
            }
        }

        Ok(Self {
            address: addr,
            args: values,
            received_at,
        })
    }

    /// Argument at `index`, or `DecodeError::MissingArgument`
    pub fn arg(&self, index: usize) -> Result<&OscValue, DecodeError> {
        self.args.get(index).ok_or_else(|| DecodeError::MissingArgument {
            address: self.address.clone(),
            index,
        })
    }

    /// Numeric argument at `index`
    pub fn number_arg(&self, index: usize) -> Result<f64, DecodeError> {
        let value = self.arg(index)?;
        value.as_number().ok_or_else(|| self.mismatch(index, "number", value))
    }

    /// String argument at `index`
    pub fn str_arg(&self, index: usize) -> Result<&str, DecodeError> {
        let value = self.arg(index)?;
        value.as_str().ok_or_else(|| self.mismatch(index, "string", value))
    }

    fn mismatch(&self, index: usize, expected: &'static str, found: &OscValue) -> DecodeError {
        DecodeError::TypeMismatch {
            address: self.address.clone(),
            index,
            expected,
            found: found.kind(),
        }
    }
}
