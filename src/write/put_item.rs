use crate::{
    common,
    error::{Error, Result},
    write,
};

use aws_sdk_dynamodb::{operation, types};
use serde::Serialize;
use serde_dynamo::to_item;
use std::collections;

/// Fully assembled PutItem command.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PutItemCommand {
    /// The item to store.
    pub item: collections::HashMap<String, types::AttributeValue>,
    /// Write settings, placeholder maps included.
    pub write_input: write::common::WriteInput,
}

/// Put item request.
///
/// ```rust
/// use dynamodb_command_builder::write;
/// use serde_json::json;
///
/// let put_item = write::put_item::PutItem {
///     item: json!({"id": "1", "name": "John"}),
///     write_args: write::common::WriteArgs {
///         condition_expression: Some("attribute_not_exists(id)".to_string()),
///         table_name: "users".to_string(),
///         ..Default::default()
///     },
/// };
/// let command: write::put_item::PutItemCommand = put_item.try_into().unwrap();
/// assert_eq!(command.item.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PutItem<T> {
    /// The item to put into the table.
    pub item: T,
    /// Additional write operation arguments (table name, condition, return values, etc.).
    pub write_args: write::common::WriteArgs<T>,
}

impl<T: Serialize> TryFrom<PutItem<T>> for PutItemCommand {
    type Error = Error;

    fn try_from(put_item: PutItem<T>) -> Result<Self> {
        let item = to_item(put_item.item)?;
        let (names, values, mut write_input) = put_item.write_args.into_parts()?;
        write_input.expression_attribute_names = common::into_hash_map(names);
        write_input.expression_attribute_values = common::into_hash_map(values);
        let command = Self { item, write_input };
        Ok(command)
    }
}

impl TryFrom<PutItemCommand> for operation::put_item::PutItemInput {
    type Error = Error;

    fn try_from(command: PutItemCommand) -> Result<Self> {
        let builder = Self::builder().set_item(Some(command.item));
        let input = crate::apply_write_input!(builder, command.write_input).build()?;
        Ok(input)
    }
}
