use crate::{
    common,
    error::{Error, Result},
    read,
};

use aws_sdk_dynamodb::{operation, types};
use std::collections;

/// Fully assembled GetItem command.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetItemCommand {
    /// Primary key of the item.
    pub keys: collections::HashMap<String, types::AttributeValue>,
    /// Whether to return the consumed capacity information.
    pub return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
    /// Read settings.
    pub single_read_input: read::common::SingleReadInput,
}

/// Get item request.
///
/// ```rust
/// use dynamodb_command_builder::{common, read};
///
/// let get_item = read::get_item::GetItem {
///     keys: common::key::Keys {
///         partition_key: common::key::Key {
///             name: "id".to_string(),
///             value: "1".to_string(),
///             ..Default::default()
///         },
///         ..Default::default()
///     },
///     single_read_args: read::common::SingleReadArgs {
///         projection: Some("id, name".to_string()),
///         table_name: "users".to_string(),
///         ..Default::default()
///     },
///     ..Default::default()
/// };
/// let command: read::get_item::GetItemCommand = get_item.try_into().unwrap();
/// assert_eq!(
///     command.single_read_input.projection_expression.as_deref(),
///     Some("id, #name")
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetItem {
    /// The primary key of the item to retrieve.
    pub keys: common::key::Keys,
    /// Whether to return the consumed capacity information.
    pub return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
    /// Additional read operation arguments (table name, consistent read, projection).
    pub single_read_args: read::common::SingleReadArgs,
}

impl TryFrom<GetItem> for GetItemCommand {
    type Error = Error;

    fn try_from(get_item: GetItem) -> Result<Self> {
        let single_read_input: read::common::SingleReadInput = get_item.single_read_args.into();
        let keys: collections::HashMap<String, types::AttributeValue> =
            get_item.keys.try_into()?;
        let command = Self {
            keys,
            return_consumed_capacity: get_item.return_consumed_capacity,
            single_read_input,
        };
        Ok(command)
    }
}

impl TryFrom<GetItemCommand> for operation::get_item::GetItemInput {
    type Error = Error;

    fn try_from(command: GetItemCommand) -> Result<Self> {
        let builder = Self::builder()
            .set_key(Some(command.keys))
            .set_return_consumed_capacity(command.return_consumed_capacity);
        let input = crate::apply_single_read_input!(builder, command.single_read_input).build()?;
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::attribute::KeyType;

    use rstest::rstest;

    #[rstest]
    #[case::empty(
        GetItem {
            keys: common::key::Keys {
                partition_key: common::key::Key {
                    name: "a".to_string(),
                    value: "b".to_string(),
                    key_type: KeyType::String,
                },
                ..Default::default()
            },
            single_read_args: read::common::SingleReadArgs {
                table_name: "c".to_string(),
                ..Default::default()
            },
            ..Default::default()
        },
        GetItemCommand {
            keys: collections::HashMap::from(
                [
                    (
                        "a".to_string(),
                        types::AttributeValue::S(
                            "b".to_string()
                        )
                    ),
                ]
            ),
            single_read_input: read::common::SingleReadInput {
                table_name: "c".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    )]
    #[case::full(
        GetItem {
            keys: common::key::Keys {
                partition_key: common::key::Key {
                    name: "a".to_string(),
                    value: "b".to_string(),
                    key_type: KeyType::String,
                },
                sort_key: Some(
                    common::key::Key {
                        name: "c".to_string(),
                        value: "7".to_string(),
                        key_type: KeyType::Number,
                    }
                ),
            },
            return_consumed_capacity: Some(
                types::ReturnConsumedCapacity::Indexes
            ),
            single_read_args: read::common::SingleReadArgs {
                consistent_read: Some(false),
                projection: Some("e, size".to_string()),
                table_name: "g".to_string(),
                ..Default::default()
            },
        },
        GetItemCommand {
            keys: collections::HashMap::from(
                [
                    (
                        "a".to_string(),
                        types::AttributeValue::S(
                            "b".to_string()
                        )
                    ),
                    (
                        "c".to_string(),
                        types::AttributeValue::N(
                            "7".to_string()
                        )
                    ),
                ]
            ),
            return_consumed_capacity: Some(
                types::ReturnConsumedCapacity::Indexes
            ),
            single_read_input: read::common::SingleReadInput {
                consistent_read: Some(false),
                expression_attribute_names: Some(
                    collections::HashMap::from(
                        [
                            ("#size".to_string(), "size".to_string()),
                        ]
                    )
                ),
                projection_expression: Some(
                    "e, #size".to_string()
                ),
                table_name: "g".to_string(),
            },
        }
    )]
    fn test_get_item(#[case] args: GetItem, #[case] expected: GetItemCommand) {
        let actual: GetItemCommand = args.try_into().unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_get_item_input() {
        let command = GetItemCommand {
            keys: collections::HashMap::from([(
                "a".to_string(),
                types::AttributeValue::S("b".to_string()),
            )]),
            single_read_input: read::common::SingleReadInput {
                consistent_read: Some(true),
                projection_expression: Some("a".to_string()),
                table_name: "c".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let input = operation::get_item::GetItemInput::try_from(command).unwrap();
        assert_eq!(input.table_name(), Some("c"));
        assert_eq!(input.consistent_read(), Some(true));
        assert_eq!(input.projection_expression(), Some("a"));
        assert_eq!(input.expression_attribute_names(), None);
        assert_eq!(
            input.key().and_then(|key| key.get("a")),
            Some(&types::AttributeValue::S("b".to_string()))
        );
    }
}
