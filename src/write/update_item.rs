use crate::{
    common,
    error::{Error, Result},
    write,
};

use aws_sdk_dynamodb::{operation, types};
use serde::Serialize;
use std::collections;

/// Fully assembled UpdateItem command.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateItemCommand {
    /// Primary key of the item.
    pub keys: collections::HashMap<String, types::AttributeValue>,
    /// The update expression.
    pub update_expression: String,
    /// Write settings, placeholder maps included.
    pub write_input: write::common::WriteInput,
}

/// Update item request.
///
/// ```rust
/// use dynamodb_command_builder::{common, write};
/// use indexmap::IndexMap;
/// use serde_json::Value;
///
/// let update_item = write::update_item::UpdateItem {
///     keys: common::key::Keys {
///         partition_key: common::key::Key {
///             name: "id".to_string(),
///             value: "1".to_string(),
///             ..Default::default()
///         },
///         ..Default::default()
///     },
///     update: write::update_expression::UpdatePayload::Fields(IndexMap::from([(
///         "name".to_string(),
///         Value::String("Jane".to_string()),
///     )])),
///     write_args: write::common::WriteArgs {
///         table_name: "users".to_string(),
///         ..Default::default()
///     },
/// };
/// let command: write::update_item::UpdateItemCommand = update_item.try_into().unwrap();
/// assert_eq!(command.update_expression, "SET #name = :name");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateItem<T> {
    /// The primary key of the item to update.
    pub keys: common::key::Keys,
    /// What to change.
    pub update: write::update_expression::UpdatePayload<T>,
    /// Additional write operation arguments (table name, condition, return values, etc.).
    pub write_args: write::common::WriteArgs<T>,
}

impl<T: Serialize> TryFrom<UpdateItem<T>> for UpdateItemCommand {
    type Error = Error;

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_command_builder.update_item", skip_all, err)
    )]
    fn try_from(update_item: UpdateItem<T>) -> Result<Self> {
        let keys: collections::HashMap<String, types::AttributeValue> =
            update_item.keys.try_into()?;
        let (names, values, mut write_input) = update_item.write_args.into_parts()?;
        let update = write::update_expression::compile(update_item.update, names, values)?;
        write_input.expression_attribute_names =
            update.expression_attribute_names.and_then(common::into_hash_map);
        write_input.expression_attribute_values =
            update.expression_attribute_values.and_then(common::into_hash_map);
        let command = Self {
            keys,
            update_expression: update.update_expression,
            write_input,
        };
        Ok(command)
    }
}

impl TryFrom<UpdateItemCommand> for operation::update_item::UpdateItemInput {
    type Error = Error;

    fn try_from(command: UpdateItemCommand) -> Result<Self> {
        let builder = Self::builder()
            .set_key(Some(command.keys))
            .update_expression(command.update_expression);
        let input = crate::apply_write_input!(builder, command.write_input).build()?;
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::attribute::KeyType;

    use indexmap::IndexMap;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn keys() -> common::key::Keys {
        common::key::Keys {
            partition_key: common::key::Key {
                name: "a".to_string(),
                value: "b".to_string(),
                key_type: KeyType::String,
            },
            ..Default::default()
        }
    }

    fn item_keys() -> collections::HashMap<String, types::AttributeValue> {
        collections::HashMap::from([("a".to_string(), types::AttributeValue::S("b".to_string()))])
    }

    #[rstest]
    #[case::fields(
        UpdateItem {
            keys: keys(),
            update: write::update_expression::UpdatePayload::Fields(
                IndexMap::from(
                    [
                        ("name".to_string(), json!("John Doe")),
                        ("email".to_string(), json!("x@y.z")),
                    ]
                )
            ),
            write_args: write::common::WriteArgs {
                table_name: "c".to_string(),
                ..Default::default()
            },
        },
        UpdateItemCommand {
            keys: item_keys(),
            update_expression: "SET #name = :name, email = :email".to_string(),
            write_input: write::common::WriteInput {
                expression_attribute_names: Some(
                    collections::HashMap::from(
                        [
                            ("#name".to_string(), "name".to_string()),
                        ]
                    )
                ),
                expression_attribute_values: Some(
                    collections::HashMap::from(
                        [
                            (
                                ":name".to_string(),
                                types::AttributeValue::S(
                                    "John Doe".to_string()
                                )
                            ),
                            (
                                ":email".to_string(),
                                types::AttributeValue::S(
                                    "x@y.z".to_string()
                                )
                            ),
                        ]
                    )
                ),
                table_name: "c".to_string(),
                ..Default::default()
            },
        }
    )]
    #[case::fields_with_condition(
        UpdateItem {
            keys: keys(),
            update: write::update_expression::UpdatePayload::Fields(
                IndexMap::from(
                    [
                        ("name".to_string(), json!("John Doe")),
                    ]
                )
            ),
            write_args: write::common::WriteArgs {
                condition_expression: Some(
                    "#name <> :name".to_string()
                ),
                expression_attribute_values: Some(
                    IndexMap::from(
                        [
                            (":name".to_string(), json!("John Doe")),
                        ]
                    )
                ),
                return_values: Some(
                    types::ReturnValue::UpdatedNew
                ),
                table_name: "c".to_string(),
                ..Default::default()
            },
        },
        UpdateItemCommand {
            keys: item_keys(),
            update_expression: "SET #name = :name_update_1".to_string(),
            write_input: write::common::WriteInput {
                condition_expression: Some(
                    "#name <> :name".to_string()
                ),
                expression_attribute_names: Some(
                    collections::HashMap::from(
                        [
                            ("#name".to_string(), "name".to_string()),
                        ]
                    )
                ),
                expression_attribute_values: Some(
                    collections::HashMap::from(
                        [
                            (
                                ":name".to_string(),
                                types::AttributeValue::S(
                                    "John Doe".to_string()
                                )
                            ),
                            (
                                ":name_update_1".to_string(),
                                types::AttributeValue::S(
                                    "John Doe".to_string()
                                )
                            ),
                        ]
                    )
                ),
                return_values: Some(
                    types::ReturnValue::UpdatedNew
                ),
                table_name: "c".to_string(),
                ..Default::default()
            },
        }
    )]
    #[case::expression(
        UpdateItem {
            keys: keys(),
            update: write::update_expression::UpdatePayload::Expression(
                "REMOVE #t".to_string()
            ),
            write_args: write::common::WriteArgs {
                expression_attribute_names: Some(
                    common::NameMap::from(
                        [
                            ("#t".to_string(), "tags".to_string()),
                        ]
                    )
                ),
                table_name: "c".to_string(),
                ..Default::default()
            },
        },
        UpdateItemCommand {
            keys: item_keys(),
            update_expression: "REMOVE #t".to_string(),
            write_input: write::common::WriteInput {
                expression_attribute_names: Some(
                    collections::HashMap::from(
                        [
                            ("#t".to_string(), "tags".to_string()),
                        ]
                    )
                ),
                table_name: "c".to_string(),
                ..Default::default()
            },
        }
    )]
    fn test_update_item(#[case] args: UpdateItem<Value>, #[case] expected: UpdateItemCommand) {
        let actual: UpdateItemCommand = args.try_into().unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_update_item_without_payload() {
        let update_item: UpdateItem<Value> = UpdateItem {
            keys: keys(),
            write_args: write::common::WriteArgs {
                table_name: "c".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let error = UpdateItemCommand::try_from(update_item).unwrap_err();
        assert!(matches!(error, Error::MissingUpdatePayload));
    }

    #[test]
    fn test_update_item_input() {
        let update_item = UpdateItem {
            keys: keys(),
            update: write::update_expression::UpdatePayload::Fields(IndexMap::from([(
                "email".to_string(),
                json!("x@y.z"),
            )])),
            write_args: write::common::WriteArgs {
                table_name: "c".to_string(),
                ..Default::default()
            },
        };
        let command: UpdateItemCommand = update_item.try_into().unwrap();
        let input = operation::update_item::UpdateItemInput::try_from(command).unwrap();
        assert_eq!(input.table_name(), Some("c"));
        assert_eq!(input.update_expression(), Some("SET email = :email"));
        assert_eq!(input.expression_attribute_names(), None);
        assert_eq!(
            input.key().and_then(|key| key.get("a")),
            Some(&types::AttributeValue::S("b".to_string()))
        );
    }
}
