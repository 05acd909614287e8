use crate::error::{Error, Result};

use aws_sdk_dynamodb::{primitives, types};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use serde_dynamo::to_attribute_value;
use std::{fmt, str};

/// Separator between the elements of a set literal.
const SET_SEPARATOR: char = ',';

/// Largest magnitude up to which every integer is exact as an `f64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Declared type of an attribute, driving how its raw string value is coerced.
///
/// ```rust
/// use dynamodb_command_builder::common::attribute::AttributeType;
///
/// let attribute_type: AttributeType = "string-set".parse().unwrap();
/// assert_eq!(attribute_type, AttributeType::StringSet);
/// let attribute_type: AttributeType = "NS".parse().unwrap();
/// assert_eq!(attribute_type, AttributeType::NumberSet);
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq)]
#[serde(try_from = "String")]
pub enum AttributeType {
    /// `S`
    #[default]
    String,
    /// `N`
    Number,
    /// `B`, base64 encoded on input.
    Binary,
    /// `BOOL`
    Boolean,
    /// `NULL`
    Null,
    /// `SS`, comma separated on input.
    StringSet,
    /// `NS`, comma separated on input.
    NumberSet,
    /// `BS`, comma separated base64 elements on input.
    BinarySet,
    /// `M`, JSON object on input.
    Map,
    /// `L`, JSON array on input.
    List,
}

impl AttributeType {
    /// The kebab-case tag of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Binary => "binary",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::StringSet => "string-set",
            Self::NumberSet => "number-set",
            Self::BinarySet => "binary-set",
            Self::Map => "map",
            Self::List => "list",
        }
    }

    /// Type of the elements of a set type, `None` for non-set types.
    pub fn element_type(&self) -> Option<Self> {
        match self {
            Self::StringSet => Some(Self::String),
            Self::NumberSet => Some(Self::Number),
            Self::BinarySet => Some(Self::Binary),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl str::FromStr for AttributeType {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self> {
        let attribute_type = match tag.to_ascii_lowercase().as_str() {
            "string" | "s" => Self::String,
            "number" | "n" => Self::Number,
            "binary" | "b" => Self::Binary,
            "boolean" | "bool" => Self::Boolean,
            "null" => Self::Null,
            "string-set" | "ss" => Self::StringSet,
            "number-set" | "ns" => Self::NumberSet,
            "binary-set" | "bs" => Self::BinarySet,
            "map" | "m" => Self::Map,
            "list" | "l" => Self::List,
            _ => {
                return Err(Error::UnsupportedAttributeType {
                    tag: tag.to_string(),
                });
            }
        };
        Ok(attribute_type)
    }
}

impl TryFrom<String> for AttributeType {
    type Error = Error;

    fn try_from(tag: String) -> Result<Self> {
        tag.parse()
    }
}

/// Types allowed for key attributes.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq)]
#[serde(try_from = "String")]
pub enum KeyType {
    /// `S`
    #[default]
    String,
    /// `N`
    Number,
    /// `B`
    Binary,
}

impl From<KeyType> for AttributeType {
    fn from(key_type: KeyType) -> Self {
        match key_type {
            KeyType::String => Self::String,
            KeyType::Number => Self::Number,
            KeyType::Binary => Self::Binary,
        }
    }
}

impl str::FromStr for KeyType {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self> {
        match tag.parse::<AttributeType>()? {
            AttributeType::String => Ok(Self::String),
            AttributeType::Number => Ok(Self::Number),
            AttributeType::Binary => Ok(Self::Binary),
            _ => Err(Error::UnsupportedAttributeType {
                tag: tag.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for KeyType {
    type Error = Error;

    fn try_from(tag: String) -> Result<Self> {
        tag.parse()
    }
}

fn is_integer_literal(literal: &str) -> bool {
    let digits = literal.strip_prefix('-').unwrap_or(literal);
    !digits.is_empty() && digits.bytes().all(|byte| byte.is_ascii_digit())
}

/// Canonical number text; integers past the exact `f64` range keep their own digits.
fn parse_number(raw: &str) -> Result<String> {
    let literal = raw.trim();
    match literal.parse::<f64>() {
        Ok(number) if number.is_finite() => {
            if number.abs() > MAX_EXACT_INTEGER && is_integer_literal(literal) {
                Ok(literal.to_string())
            } else {
                Ok(number.to_string())
            }
        }
        _ => Err(Error::InvalidNumericLiteral {
            literal: raw.to_string(),
        }),
    }
}

fn decode_binary(raw: &str) -> Result<primitives::Blob> {
    BASE64
        .decode(raw)
        .map(primitives::Blob::new)
        .map_err(|source| Error::InvalidBinaryLiteral {
            literal: raw.to_string(),
            source,
        })
}

fn split_set(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(SET_SEPARATOR).map(str::trim)
}

/// Coerce a raw string into an attribute value of the declared type.
///
/// Numbers are validated as finite floats and rendered canonically, except integer literals
/// beyond 2^53 which keep their digits so large numeric ids are not rounded.
///
/// ```rust
/// use aws_sdk_dynamodb::types::AttributeValue;
/// use dynamodb_command_builder::common::attribute::{AttributeType, coerce};
///
/// let value = coerce("42", AttributeType::Number).unwrap();
/// assert_eq!(value, AttributeValue::N("42".to_string()));
/// ```
pub fn coerce(raw: &str, attribute_type: AttributeType) -> Result<types::AttributeValue> {
    let value = match attribute_type {
        AttributeType::String => types::AttributeValue::S(raw.to_string()),
        AttributeType::Number => types::AttributeValue::N(parse_number(raw)?),
        AttributeType::Binary => types::AttributeValue::B(decode_binary(raw)?),
        AttributeType::Boolean => match raw.to_ascii_lowercase().as_str() {
            "true" | "1" => types::AttributeValue::Bool(true),
            "false" | "0" => types::AttributeValue::Bool(false),
            _ => {
                return Err(Error::InvalidBooleanLiteral {
                    literal: raw.to_string(),
                });
            }
        },
        AttributeType::Null => types::AttributeValue::Null(true),
        AttributeType::Map | AttributeType::List => {
            let json: serde_json::Value =
                serde_json::from_str(raw).map_err(|source| Error::InvalidJsonLiteral {
                    attribute_type,
                    source,
                })?;
            to_attribute_value(json)?
        }
        AttributeType::StringSet => {
            types::AttributeValue::Ss(split_set(raw).map(str::to_string).collect())
        }
        AttributeType::NumberSet => {
            // unparseable elements are dropped rather than rejected
            let numbers = split_set(raw)
                .filter_map(|element| match parse_number(element) {
                    Ok(number) => Some(number),
                    Err(_) => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(element, "dropping unparseable number-set element");
                        None
                    }
                })
                .collect();
            types::AttributeValue::Ns(numbers)
        }
        AttributeType::BinarySet => {
            let blobs = split_set(raw).map(decode_binary).collect::<Result<_>>()?;
            types::AttributeValue::Bs(blobs)
        }
    };
    Ok(value)
}

/// Coerce one element of a set operand strictly, as its set's element type.
pub(crate) fn coerce_set_element(
    raw: &str,
    set_type: AttributeType,
) -> Result<types::AttributeValue> {
    coerce(raw, set_type.element_type().unwrap_or(set_type))
}
