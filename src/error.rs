use crate::common::{attribute::AttributeType, filter::FilterCondition};

use aws_sdk_dynamodb::error::BuildError;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while compiling a request into a DynamoDB command.
///
/// Every error is a local validation failure: nothing is retried and no partial
/// command is ever returned alongside one.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A number literal could not be parsed, or parsed to a non-finite value.
    #[error("invalid numeric literal {literal:?}")]
    InvalidNumericLiteral {
        /// The raw input.
        literal: String,
    },
    /// A boolean literal was not one of `true`, `false`, `1`, `0`.
    #[error("invalid boolean literal {literal:?}: expected one of true, false, 1, 0")]
    InvalidBooleanLiteral {
        /// The raw input.
        literal: String,
    },
    /// A map or list literal was not valid JSON.
    #[error("invalid JSON literal for {attribute_type} attribute: {source}")]
    InvalidJsonLiteral {
        /// The declared attribute type.
        attribute_type: AttributeType,
        /// The JSON parse failure.
        #[source]
        source: serde_json::Error,
    },
    /// A binary literal was not valid base64.
    #[error("invalid base64 binary literal {literal:?}: {source}")]
    InvalidBinaryLiteral {
        /// The raw input.
        literal: String,
        /// The decode failure.
        #[source]
        source: base64::DecodeError,
    },
    /// The attribute type tag is not part of the supported set.
    #[error("unsupported attribute type {tag:?}")]
    UnsupportedAttributeType {
        /// The unrecognized tag.
        tag: String,
    },
    /// The filter condition cannot be applied to the declared attribute type.
    #[error("{condition} cannot be applied to {attribute_type} attributes")]
    TypeMismatch {
        /// The filter condition.
        condition: FilterCondition,
        /// The declared attribute type.
        attribute_type: AttributeType,
    },
    /// An operand required by the condition or comparator is absent.
    #[error("{operation} requires {operand}")]
    MissingOperand {
        /// The condition or comparator that needs the operand.
        operation: &'static str,
        /// Which operand is missing.
        operand: &'static str,
    },
    /// An operand was supplied to a condition that takes none.
    #[error("{operation} does not take value, value2 or values")]
    UnexpectedOperand {
        /// The condition that takes no operand.
        operation: &'static str,
    },
    /// A scalar comparator was applied to a set attribute.
    #[error(
        "{condition} is not supported for {attribute_type} attributes, use CONTAINS or NOT_CONTAINS instead"
    )]
    UnsupportedComparatorForSetType {
        /// The comparator condition.
        condition: FilterCondition,
        /// The declared set type.
        attribute_type: AttributeType,
    },
    /// The filter condition name is not recognized.
    #[error("unsupported filter condition {condition:?}")]
    UnsupportedFilterCondition {
        /// The unrecognized condition name.
        condition: String,
    },
    /// The sort key comparator spelling is not recognized.
    #[error("invalid sort key comparator {comparator:?}")]
    InvalidComparator {
        /// The unrecognized comparator.
        comparator: String,
    },
    /// An update was requested with neither an expression nor any field to set.
    #[error("update requires either an update expression or at least one field to set")]
    MissingUpdatePayload,
    /// A filter of a filter set failed to compile.
    #[error("filter {index} ({name}, {attribute_type} {condition}): {source}")]
    Filter {
        /// Position of the filter in its set.
        index: usize,
        /// Attribute name of the filter.
        name: String,
        /// Declared type of the filter.
        attribute_type: AttributeType,
        /// Condition of the filter.
        condition: FilterCondition,
        /// The underlying failure.
        #[source]
        source: Box<Error>,
    },
    /// A field of an update payload could not be converted into an attribute value.
    #[error("update field {field}: {source}")]
    InvalidUpdateValue {
        /// The field being set.
        field: String,
        /// The conversion failure.
        #[source]
        source: serde_dynamo::Error,
    },
    /// A value could not be converted into a DynamoDB attribute value.
    #[error(transparent)]
    Serialization(#[from] serde_dynamo::Error),
    /// The SDK rejected the assembled operation input.
    #[error(transparent)]
    Build(#[from] BuildError),
}

impl Error {
    /// The innermost error, looking through filter wrapping.
    pub fn root(&self) -> &Self {
        match self {
            Self::Filter { source, .. } => source.root(),
            error => error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::set_comparator(
        Error::UnsupportedComparatorForSetType {
            condition: FilterCondition::GreaterThan,
            attribute_type: AttributeType::NumberSet,
        },
        "GREATER_THAN is not supported for number-set attributes, use CONTAINS or NOT_CONTAINS instead"
    )]
    #[case::missing_operand(
        Error::MissingOperand {
            operation: "BETWEEN",
            operand: "value2",
        },
        "BETWEEN requires value2"
    )]
    #[case::filter(
        Error::Filter {
            index: 2,
            name: "tags".to_string(),
            attribute_type: AttributeType::Number,
            condition: FilterCondition::BeginsWith,
            source: Box::new(
                Error::TypeMismatch {
                    condition: FilterCondition::BeginsWith,
                    attribute_type: AttributeType::Number,
                }
            ),
        },
        "filter 2 (tags, number BEGINS_WITH): BEGINS_WITH cannot be applied to number attributes"
    )]
    fn test_error_display(#[case] error: Error, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn test_root_unwraps_filter() {
        let error = Error::Filter {
            index: 0,
            name: "a".to_string(),
            attribute_type: AttributeType::String,
            condition: FilterCondition::EqualTo,
            source: Box::new(Error::MissingUpdatePayload),
        };
        assert!(matches!(error.root(), Error::MissingUpdatePayload));
    }
}
