use crate::{
    common,
    error::{Error, Result},
    read,
};

use aws_sdk_dynamodb::{operation, types};
use serde::Serialize;

/// Fully assembled Query command.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryCommand {
    /// Key condition expression over `#pk` and `#sk`.
    pub key_condition_expression: String,
    /// Read settings, placeholder maps included.
    pub multiple_read_input: read::common::MultipleReadInput,
    /// Whether to return the consumed capacity information.
    pub return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
    /// Ascending (`true`) or descending (`false`) sort key order.
    pub scan_index_forward: Option<bool>,
}

/// Query request.
///
/// ```rust
/// use dynamodb_command_builder::{common, read};
/// use serde_json::Value;
///
/// let query: read::query::Query<Value> = read::query::Query {
///     partition_key: common::key::Key {
///         name: "user_id".to_string(),
///         value: "u1".to_string(),
///         ..Default::default()
///     },
///     sort_key_condition: Some(read::key_condition::SortKeyCondition {
///         key: common::key::Key {
///             name: "created_at".to_string(),
///             value: "2024-".to_string(),
///             ..Default::default()
///         },
///         comparator: "begins_with".parse().unwrap(),
///         second_value: None,
///     }),
///     multiple_read_args: read::common::MultipleReadArgs {
///         table_name: "orders".to_string(),
///         ..Default::default()
///     },
///     ..Default::default()
/// };
/// let command: read::query::QueryCommand = query.try_into().unwrap();
/// assert_eq!(
///     command.key_condition_expression,
///     "#pk = :pk AND begins_with(#sk, :skValue2)"
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Query<T> {
    /// Additional read operation arguments (table name, filters, projection, cursor, etc.).
    pub multiple_read_args: read::common::MultipleReadArgs<T>,
    /// The partition key value to query for.
    pub partition_key: common::key::Key,
    /// Whether to return the consumed capacity information.
    pub return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
    /// Whether to scan the index forward (ascending) or backward (descending).
    pub scan_index_forward: Option<bool>,
    /// Optional condition to apply to the sort key.
    pub sort_key_condition: Option<read::key_condition::SortKeyCondition>,
}

impl<T: Serialize> TryFrom<Query<T>> for QueryCommand {
    type Error = Error;

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_command_builder.query", skip_all, err)
    )]
    fn try_from(query: Query<T>) -> Result<Self> {
        let key_condition_operation = read::key_condition::get_key_condition_operation(
            &query.partition_key,
            query.sort_key_condition.as_ref(),
        )?;
        let (key_condition_expression, multiple_read_input) = query
            .multiple_read_args
            .into_input(Some(key_condition_operation))?;
        let command = Self {
            key_condition_expression: key_condition_expression.unwrap_or_default(),
            multiple_read_input,
            return_consumed_capacity: query.return_consumed_capacity,
            scan_index_forward: query.scan_index_forward,
        };
        Ok(command)
    }
}

impl TryFrom<QueryCommand> for operation::query::QueryInput {
    type Error = Error;

    fn try_from(command: QueryCommand) -> Result<Self> {
        let builder = Self::builder()
            .key_condition_expression(command.key_condition_expression)
            .set_return_consumed_capacity(command.return_consumed_capacity)
            .set_scan_index_forward(command.scan_index_forward);
        let input =
            crate::apply_multiple_read_input!(builder, command.multiple_read_input).build()?;
        Ok(input)
    }
}
