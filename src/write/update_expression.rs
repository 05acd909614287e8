use crate::{
    common::{self, reserved},
    error::{Error, Result},
};

use indexmap::IndexMap;
use serde::Serialize;
use serde_dynamo::to_attribute_value;

/// What an update should change.
#[derive(Clone, Debug, PartialEq)]
pub enum UpdatePayload<T> {
    /// A ready-made update expression, used verbatim.
    Expression(String),
    /// Attributes to `SET`, in order.
    Fields(IndexMap<String, T>),
}

impl<T> Default for UpdatePayload<T> {
    fn default() -> Self {
        Self::Fields(IndexMap::new())
    }
}

/// A compiled update expression with its placeholder maps.
///
/// Maps are `None` rather than empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateExpression {
    /// The update expression.
    pub update_expression: String,
    /// Name placeholders.
    pub expression_attribute_names: Option<common::NameMap>,
    /// Value placeholders.
    pub expression_attribute_values: Option<common::ValueMap>,
}

fn non_empty<V>(map: IndexMap<String, V>) -> Option<IndexMap<String, V>> {
    if map.is_empty() { None } else { Some(map) }
}

fn get_value_token(field: &str, values: &common::ValueMap) -> String {
    let token = format!(":{field}");
    if !values.contains_key(&token) {
        return token;
    }
    let mut n = 1;
    loop {
        let token = format!(":{field}_update_{n}");
        if !values.contains_key(&token) {
            return token;
        }
        n += 1;
    }
}

/// Compile an update payload against the caller's own placeholder maps.
///
/// Generated value tokens never overwrite a caller value: a field whose `:field` token is
/// taken gets `:field_update_1`, `:field_update_2`, and so on. Reserved assignment targets
/// are aliased and the resulting name placeholders derived, with caller names taking
/// precedence.
///
/// ```rust
/// use dynamodb_command_builder::{common, write::update_expression};
/// use indexmap::IndexMap;
/// use serde_json::Value;
///
/// let payload = update_expression::UpdatePayload::Fields(IndexMap::from([
///     ("name".to_string(), Value::String("John Doe".to_string())),
///     ("email".to_string(), Value::String("x@y.z".to_string())),
/// ]));
/// let compiled =
///     update_expression::compile(payload, common::NameMap::new(), common::ValueMap::new())
///         .unwrap();
/// assert_eq!(compiled.update_expression, "SET #name = :name, email = :email");
/// ```
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "dynamodb_command_builder.compile_update",
        skip_all,
        err
    )
)]
pub fn compile<T: Serialize>(
    payload: UpdatePayload<T>,
    names: common::NameMap,
    mut values: common::ValueMap,
) -> Result<UpdateExpression> {
    let fields = match payload {
        UpdatePayload::Expression(update_expression) => {
            return Ok(UpdateExpression {
                update_expression,
                expression_attribute_names: non_empty(names),
                expression_attribute_values: non_empty(values),
            });
        }
        UpdatePayload::Fields(fields) if fields.is_empty() => {
            return Err(Error::MissingUpdatePayload);
        }
        UpdatePayload::Fields(fields) => fields,
    };
    let mut assignments = Vec::with_capacity(fields.len());
    for (field, value) in fields {
        let token = get_value_token(&field, &values);
        let value = to_attribute_value(value).map_err(|source| Error::InvalidUpdateValue {
            field: field.clone(),
            source,
        })?;
        values.insert(token.clone(), value);
        assignments.push(format!("{field} = {token}"));
    }
    let update_expression =
        reserved::alias_update_targets(&format!("SET {}", assignments.join(", ")));
    let mut expression_attribute_names = reserved::derive_names(&update_expression);
    expression_attribute_names.extend(names);
    Ok(UpdateExpression {
        update_expression,
        expression_attribute_names: non_empty(expression_attribute_names),
        expression_attribute_values: non_empty(values),
    })
}
