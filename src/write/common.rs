use crate::{common, error::Result};

use aws_sdk_dynamodb::types;
use indexmap::IndexMap;
use serde::Serialize;
use serde_dynamo::to_attribute_value;
use std::collections;

/// Write settings, ready to hand to a PutItem or UpdateItem request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WriteInput {
    /// Condition that must hold for the write to succeed.
    pub condition_expression: Option<String>,
    /// Name placeholders, `None` when there are none.
    pub expression_attribute_names: Option<collections::HashMap<String, String>>,
    /// Value placeholders, `None` when there are none.
    pub expression_attribute_values: Option<collections::HashMap<String, types::AttributeValue>>,
    /// Whether to return the consumed capacity information.
    pub return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
    /// Whether to return item collection metrics.
    pub return_item_collection_metrics: Option<types::ReturnItemCollectionMetrics>,
    /// Which item attributes to return.
    pub return_values: Option<types::ReturnValue>,
    /// Which item attributes to return if the condition check fails.
    pub return_values_on_condition_check_failure:
        Option<types::ReturnValuesOnConditionCheckFailure>,
    /// The table to write to.
    pub table_name: String,
}

/// Arguments common to all write operations (Put, Update).
///
/// These arguments apply to operations that modify data in DynamoDB tables.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WriteArgs<T> {
    /// Condition expression that must be true for the operation to succeed.
    ///
    /// Used verbatim; its placeholders come from the extra maps below.
    pub condition_expression: Option<String>,
    /// Extra name placeholders, merged last and winning on collision.
    pub expression_attribute_names: Option<common::NameMap>,
    /// Extra value placeholders, merged last and winning on collision.
    pub expression_attribute_values: Option<IndexMap<String, T>>,
    /// Whether to return the consumed capacity information.
    ///
    /// Useful for monitoring and capacity planning.
    pub return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
    /// Whether to return item collection metrics.
    ///
    /// Item collection metrics provide information about collections (local secondary indexes)
    /// affected by the operation.
    pub return_item_collection_metrics: Option<types::ReturnItemCollectionMetrics>,
    /// Which item attributes to return in the response.
    ///
    /// Options: `AllOld`, `AllNew`, `UpdatedOld`, `UpdatedNew`, or `None`.
    pub return_values: Option<types::ReturnValue>,
    /// Which item attributes to return if a condition check fails.
    ///
    /// Allows you to see the item that caused the condition check to fail.
    pub return_values_on_condition_check_failure:
        Option<types::ReturnValuesOnConditionCheckFailure>,
    /// The name of the table to write to.
    pub table_name: String,
}

impl<T: Serialize> WriteArgs<T> {
    /// Split into the caller placeholder maps and the remaining write settings.
    ///
    /// The returned input carries no placeholder maps yet.
    pub(crate) fn into_parts(self) -> Result<(common::NameMap, common::ValueMap, WriteInput)> {
        let names = self.expression_attribute_names.unwrap_or_default();
        let mut values = common::ValueMap::new();
        for (key, value) in self.expression_attribute_values.into_iter().flatten() {
            values.insert(key, to_attribute_value(value)?);
        }
        let input = WriteInput {
            condition_expression: self.condition_expression,
            expression_attribute_names: None,
            expression_attribute_values: None,
            return_consumed_capacity: self.return_consumed_capacity,
            return_item_collection_metrics: self.return_item_collection_metrics,
            return_values: self.return_values,
            return_values_on_condition_check_failure: self
                .return_values_on_condition_check_failure,
            table_name: self.table_name,
        };
        Ok((names, values, input))
    }
}

/// apply common write settings to a request builder
#[macro_export]
macro_rules! apply_write_input {
    ($builder:expr, $write_input:expr) => {
        $builder
            .set_condition_expression($write_input.condition_expression)
            .set_expression_attribute_names($write_input.expression_attribute_names)
            .set_expression_attribute_values($write_input.expression_attribute_values)
            .set_return_consumed_capacity($write_input.return_consumed_capacity)
            .set_return_item_collection_metrics($write_input.return_item_collection_metrics)
            .set_return_values($write_input.return_values)
            .set_return_values_on_condition_check_failure(
                $write_input.return_values_on_condition_check_failure,
            )
            .table_name($write_input.table_name)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::Value;

    #[test]
    fn test_into_parts() {
        let write_args = WriteArgs {
            condition_expression: Some("attribute_exists(#id)".to_string()),
            expression_attribute_names: Some(common::NameMap::from([(
                "#id".to_string(),
                "id".to_string(),
            )])),
            expression_attribute_values: Some(IndexMap::from([(
                ":flag".to_string(),
                Value::Bool(true),
            )])),
            return_values: Some(types::ReturnValue::AllOld),
            table_name: "a".to_string(),
            ..Default::default()
        };
        let (names, values, input) = write_args.into_parts().unwrap();
        assert_eq!(
            names,
            common::NameMap::from([("#id".to_string(), "id".to_string())])
        );
        assert_eq!(
            values,
            common::ValueMap::from([(":flag".to_string(), types::AttributeValue::Bool(true))])
        );
        assert_eq!(
            input,
            WriteInput {
                condition_expression: Some("attribute_exists(#id)".to_string()),
                return_values: Some(types::ReturnValue::AllOld),
                table_name: "a".to_string(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_into_parts_without_extras() {
        let write_args: WriteArgs<Value> = WriteArgs {
            table_name: "a".to_string(),
            ..Default::default()
        };
        let (names, values, _) = write_args.into_parts().unwrap();
        assert!(names.is_empty());
        assert!(values.is_empty());
    }
}
