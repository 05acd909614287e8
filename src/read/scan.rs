use crate::{
    error::{Error, Result},
    read,
};

use aws_sdk_dynamodb::{operation, types};
use serde::Serialize;

/// Fully assembled Scan command.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScanCommand {
    /// Read settings, placeholder maps included.
    pub multiple_read_input: read::common::MultipleReadInput,
    /// Whether to return the consumed capacity information.
    pub return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
    /// The segment number for parallel scans (0-indexed).
    pub segment: Option<i32>,
    /// The total number of segments for parallel scans.
    pub total_segments: Option<i32>,
}

/// Scan request.
///
/// ```rust
/// use dynamodb_command_builder::common::{attribute::AttributeType, filter};
/// use dynamodb_command_builder::read;
/// use serde_json::Value;
///
/// let scan: read::scan::Scan<Value> = read::scan::Scan {
///     multiple_read_args: read::common::MultipleReadArgs {
///         filters: vec![filter::FilterSpec {
///             name: "deleted_at".to_string(),
///             attribute_type: AttributeType::String,
///             condition: filter::FilterCondition::NotExists,
///             ..Default::default()
///         }],
///         table_name: "users".to_string(),
///         ..Default::default()
///     },
///     ..Default::default()
/// };
/// let command: read::scan::ScanCommand = scan.try_into().unwrap();
/// assert_eq!(
///     command.multiple_read_input.filter_expression.as_deref(),
///     Some("(attribute_not_exists(#f0))")
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scan<T> {
    /// Additional read operation arguments (table name, filters, projection, cursor, etc.).
    pub multiple_read_args: read::common::MultipleReadArgs<T>,
    /// Whether to return the consumed capacity information.
    pub return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
    /// The segment number for parallel scans (0-indexed).
    pub segment: Option<i32>,
    /// The total number of segments for parallel scans.
    pub total_segments: Option<i32>,
}

impl<T: Serialize> TryFrom<Scan<T>> for ScanCommand {
    type Error = Error;

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_command_builder.scan", skip_all, err)
    )]
    fn try_from(scan: Scan<T>) -> Result<Self> {
        let (_, multiple_read_input) = scan.multiple_read_args.into_input(None)?;
        let command = Self {
            multiple_read_input,
            return_consumed_capacity: scan.return_consumed_capacity,
            segment: scan.segment,
            total_segments: scan.total_segments,
        };
        Ok(command)
    }
}

impl TryFrom<ScanCommand> for operation::scan::ScanInput {
    type Error = Error;

    fn try_from(command: ScanCommand) -> Result<Self> {
        let builder = Self::builder()
            .set_return_consumed_capacity(command.return_consumed_capacity)
            .set_segment(command.segment)
            .set_total_segments(command.total_segments);
        let input =
            crate::apply_multiple_read_input!(builder, command.multiple_read_input).build()?;
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{attribute::AttributeType, filter};

    use rstest::rstest;
    use serde_json::Value;
    use std::collections;

    #[rstest]
    #[case::empty(
        Scan {
            multiple_read_args: read::common::MultipleReadArgs {
                table_name: "a".to_string(),
                ..Default::default()
            },
            ..Default::default()
        },
        ScanCommand {
            multiple_read_input: read::common::MultipleReadInput {
                table_name: "a".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    )]
    #[case::full(
        Scan {
            multiple_read_args: read::common::MultipleReadArgs {
                consistent_read: Some(false),
                exclusive_start_key: Some(
                    collections::HashMap::from(
                        [
                            (
                                "c".to_string(),
                                Value::String(
                                    "d".to_string()
                                )
                            ),
                        ]
                    )
                ),
                filters: vec![
                    filter::FilterSpec {
                        name: "tags".to_string(),
                        attribute_type: AttributeType::StringSet,
                        condition: filter::FilterCondition::Contains,
                        values: Some(
                            vec![
                                "x".to_string(),
                                "y".to_string(),
                            ]
                        ),
                        ..Default::default()
                    },
                    filter::FilterSpec {
                        name: "age".to_string(),
                        attribute_type: AttributeType::Number,
                        condition: filter::FilterCondition::GreaterThanOrEqualTo,
                        value: Some("21".to_string()),
                        ..Default::default()
                    },
                ],
                index_name: Some("e".to_string()),
                limit: Some(10),
                projection: Some("f, g".to_string()),
                select: Some(
                    types::Select::SpecificAttributes
                ),
                table_name: "h".to_string(),
                ..Default::default()
            },
            return_consumed_capacity: Some(
                types::ReturnConsumedCapacity::Total
            ),
            segment: Some(1),
            total_segments: Some(10),
        },
        ScanCommand {
            multiple_read_input: read::common::MultipleReadInput {
                consistent_read: Some(false),
                exclusive_start_key: Some(
                    collections::HashMap::from(
                        [
                            (
                                "c".to_string(),
                                types::AttributeValue::S(
                                    "d".to_string()
                                )
                            ),
                        ]
                    )
                ),
                expression_attribute_names: Some(
                    collections::HashMap::from(
                        [
                            ("#f0".to_string(), "tags".to_string()),
                            ("#f1".to_string(), "age".to_string()),
                        ]
                    )
                ),
                expression_attribute_values: Some(
                    collections::HashMap::from(
                        [
                            (
                                ":f0vs0".to_string(),
                                types::AttributeValue::S(
                                    "x".to_string()
                                )
                            ),
                            (
                                ":f0vs1".to_string(),
                                types::AttributeValue::S(
                                    "y".to_string()
                                )
                            ),
                            (
                                ":f1v".to_string(),
                                types::AttributeValue::N(
                                    "21".to_string()
                                )
                            ),
                        ]
                    )
                ),
                filter_expression: Some(
                    "((contains(#f0, :f0vs0) OR contains(#f0, :f0vs1))) AND (#f1 >= :f1v)".to_string()
                ),
                index_name: Some("e".to_string()),
                limit: Some(10),
                projection_expression: Some(
                    "f, g".to_string()
                ),
                select: Some(
                    types::Select::SpecificAttributes
                ),
                table_name: "h".to_string(),
            },
            return_consumed_capacity: Some(
                types::ReturnConsumedCapacity::Total
            ),
            segment: Some(1),
            total_segments: Some(10),
        }
    )]
    fn test_scan(#[case] args: Scan<Value>, #[case] expected: ScanCommand) {
        let actual: ScanCommand = args.try_into().unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_scan_input() {
        let scan: Scan<Value> = Scan {
            multiple_read_args: read::common::MultipleReadArgs {
                table_name: "a".to_string(),
                ..Default::default()
            },
            segment: Some(0),
            total_segments: Some(4),
            ..Default::default()
        };
        let command: ScanCommand = scan.try_into().unwrap();
        let input = operation::scan::ScanInput::try_from(command).unwrap();
        assert_eq!(input.table_name(), Some("a"));
        assert_eq!(input.segment(), Some(0));
        assert_eq!(input.total_segments(), Some(4));
        assert_eq!(input.expression_attribute_values(), None);
    }
}
