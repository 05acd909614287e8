use crate::{
    common::{self, attribute},
    error::{Error, Result},
};

use serde::Deserialize;
use std::{fmt, str};

/// Predicate kind applied to one attribute by a filter.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq)]
#[serde(try_from = "String")]
pub enum FilterCondition {
    /// `attribute = value`
    #[default]
    EqualTo,
    /// `attribute <> value`
    NotEqualTo,
    /// `attribute < value`
    LessThan,
    /// `attribute <= value`
    LessThanOrEqualTo,
    /// `attribute > value`
    GreaterThan,
    /// `attribute >= value`
    GreaterThanOrEqualTo,
    /// The attribute is present.
    Exists,
    /// The attribute is absent.
    NotExists,
    /// A string attribute starts with `value`.
    BeginsWith,
    /// The attribute contains `value`, or any of `values` for sets.
    Contains,
    /// The attribute contains neither `value` nor any of `values`.
    NotContains,
    /// `value <= attribute <= value2`
    Between,
}

impl FilterCondition {
    /// The SCREAMING_SNAKE_CASE name of this condition.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EqualTo => "EQUAL_TO",
            Self::NotEqualTo => "NOT_EQUAL_TO",
            Self::LessThan => "LESS_THAN",
            Self::LessThanOrEqualTo => "LESS_THAN_OR_EQUAL_TO",
            Self::GreaterThan => "GREATER_THAN",
            Self::GreaterThanOrEqualTo => "GREATER_THAN_OR_EQUAL_TO",
            Self::Exists => "EXISTS",
            Self::NotExists => "NOT_EXISTS",
            Self::BeginsWith => "BEGINS_WITH",
            Self::Contains => "CONTAINS",
            Self::NotContains => "NOT_CONTAINS",
            Self::Between => "BETWEEN",
        }
    }
}

impl fmt::Display for FilterCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl str::FromStr for FilterCondition {
    type Err = Error;

    fn from_str(condition: &str) -> Result<Self> {
        let condition = match condition {
            "EQUAL_TO" => Self::EqualTo,
            "NOT_EQUAL_TO" => Self::NotEqualTo,
            "LESS_THAN" => Self::LessThan,
            "LESS_THAN_OR_EQUAL_TO" => Self::LessThanOrEqualTo,
            "GREATER_THAN" => Self::GreaterThan,
            "GREATER_THAN_OR_EQUAL_TO" => Self::GreaterThanOrEqualTo,
            "EXISTS" => Self::Exists,
            "NOT_EXISTS" => Self::NotExists,
            "BEGINS_WITH" => Self::BeginsWith,
            "CONTAINS" => Self::Contains,
            "NOT_CONTAINS" => Self::NotContains,
            "BETWEEN" => Self::Between,
            _ => {
                return Err(Error::UnsupportedFilterCondition {
                    condition: condition.to_string(),
                });
            }
        };
        Ok(condition)
    }
}

impl TryFrom<String> for FilterCondition {
    type Error = Error;

    fn try_from(condition: String) -> Result<Self> {
        condition.parse()
    }
}

/// One filtering predicate of a filter set.
///
/// ```rust
/// use dynamodb_command_builder::common::filter::FilterSpec;
///
/// let filter: FilterSpec = serde_json::from_str(
///     r#"{"name": "age", "type": "number", "condition": "BETWEEN", "value": "18", "value2": "65"}"#,
/// )
/// .unwrap();
/// assert_eq!(filter.value2.as_deref(), Some("65"));
/// ```
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq)]
pub struct FilterSpec {
    /// The attribute to filter on.
    pub name: String,
    /// Declared type of the attribute, used to coerce the operands.
    #[serde(rename = "type")]
    pub attribute_type: attribute::AttributeType,
    /// The predicate to apply.
    pub condition: FilterCondition,
    /// Single operand.
    #[serde(default)]
    pub value: Option<String>,
    /// Upper bound for `BETWEEN`.
    #[serde(default)]
    pub value2: Option<String>,
    /// Candidate elements for `CONTAINS` / `NOT_CONTAINS` on string and number sets.
    #[serde(default)]
    pub values: Option<Vec<String>>,
}

fn is_scalar_set(attribute_type: attribute::AttributeType) -> bool {
    matches!(
        attribute_type,
        attribute::AttributeType::StringSet | attribute::AttributeType::NumberSet
    )
}

impl FilterSpec {
    fn require_value(&self) -> Result<&str> {
        self.value.as_deref().ok_or(Error::MissingOperand {
            operation: self.condition.as_str(),
            operand: "value",
        })
    }

    fn require_values(&self) -> Result<&[String]> {
        match self.values.as_deref() {
            Some(values) if !values.is_empty() => Ok(values),
            _ => Err(Error::MissingOperand {
                operation: self.condition.as_str(),
                operand: "values",
            }),
        }
    }

    fn forbid_operands(&self) -> Result<()> {
        if self.value.is_some() || self.value2.is_some() || self.values.is_some() {
            return Err(Error::UnexpectedOperand {
                operation: self.condition.as_str(),
            });
        }
        Ok(())
    }

    fn type_mismatch(&self) -> Error {
        Error::TypeMismatch {
            condition: self.condition,
            attribute_type: self.attribute_type,
        }
    }

    fn get_expression(&self, index: usize) -> Result<common::ExpressionInput> {
        let name_placeholder = format!("#f{index}");
        let value_placeholder = format!(":f{index}v");
        let mut expression_attribute_values = common::ValueMap::new();
        let expression = match self.condition {
            FilterCondition::Exists => {
                self.forbid_operands()?;
                format!("(attribute_exists({name_placeholder}))")
            }
            FilterCondition::NotExists => {
                self.forbid_operands()?;
                format!("(attribute_not_exists({name_placeholder}))")
            }
            FilterCondition::BeginsWith => {
                if self.attribute_type != attribute::AttributeType::String {
                    return Err(self.type_mismatch());
                }
                let value = attribute::coerce(self.require_value()?, self.attribute_type)?;
                expression_attribute_values.insert(value_placeholder.clone(), value);
                format!("begins_with({name_placeholder}, {value_placeholder})")
            }
            FilterCondition::Contains | FilterCondition::NotContains => {
                let negated = self.condition == FilterCondition::NotContains;
                if is_scalar_set(self.attribute_type) {
                    let elements = self.require_values()?;
                    let mut clauses = Vec::with_capacity(elements.len());
                    for (element_index, element) in elements.iter().enumerate() {
                        let element_placeholder = format!(":f{index}vs{element_index}");
                        let value = attribute::coerce_set_element(element, self.attribute_type)?;
                        clauses.push(format!("contains({name_placeholder}, {element_placeholder})"));
                        expression_attribute_values.insert(element_placeholder, value);
                    }
                    let clauses = clauses.join(" OR ");
                    if negated {
                        format!("(NOT ({clauses}))")
                    } else if elements.len() == 1 {
                        format!("({clauses})")
                    } else {
                        format!("(({clauses}))")
                    }
                } else {
                    let value = attribute::coerce(self.require_value()?, self.attribute_type)?;
                    expression_attribute_values.insert(value_placeholder.clone(), value);
                    if negated {
                        format!("NOT contains({name_placeholder}, {value_placeholder})")
                    } else {
                        format!("(contains({name_placeholder}, {value_placeholder}))")
                    }
                }
            }
            FilterCondition::Between => {
                let (Some(value), Some(value2)) = (self.value.as_deref(), self.value2.as_deref())
                else {
                    return Err(Error::MissingOperand {
                        operation: self.condition.as_str(),
                        operand: "value and value2",
                    });
                };
                if is_scalar_set(self.attribute_type)
                    || matches!(
                        self.attribute_type,
                        attribute::AttributeType::Boolean | attribute::AttributeType::Null
                    )
                {
                    return Err(self.type_mismatch());
                }
                let value = attribute::coerce(value, self.attribute_type)?;
                let value2 = attribute::coerce(value2, self.attribute_type)?;
                let value2_placeholder = format!("{value_placeholder}2");
                let expression = format!(
                    "({name_placeholder} BETWEEN {value_placeholder} AND {value2_placeholder})"
                );
                expression_attribute_values.insert(value_placeholder, value);
                expression_attribute_values.insert(value2_placeholder, value2);
                expression
            }
            FilterCondition::EqualTo
            | FilterCondition::NotEqualTo
            | FilterCondition::LessThan
            | FilterCondition::LessThanOrEqualTo
            | FilterCondition::GreaterThan
            | FilterCondition::GreaterThanOrEqualTo => {
                if is_scalar_set(self.attribute_type) {
                    return Err(Error::UnsupportedComparatorForSetType {
                        condition: self.condition,
                        attribute_type: self.attribute_type,
                    });
                }
                let operator = match self.condition {
                    FilterCondition::NotEqualTo => "<>",
                    FilterCondition::LessThan => "<",
                    FilterCondition::LessThanOrEqualTo => "<=",
                    FilterCondition::GreaterThan => ">",
                    FilterCondition::GreaterThanOrEqualTo => ">=",
                    _ => "=",
                };
                let value = attribute::coerce(self.require_value()?, self.attribute_type)?;
                expression_attribute_values.insert(value_placeholder.clone(), value);
                format!("({name_placeholder} {operator} {value_placeholder})")
            }
        };
        let expression_attribute_names =
            common::NameMap::from([(name_placeholder, self.name.clone())]);
        let operation = common::ExpressionInput {
            expression,
            expression_attribute_names,
            expression_attribute_values,
        };
        Ok(operation)
    }
}

/// Compile a filter set into a single `AND`-joined filter expression.
///
/// Filters keep their input order: filter `i` is bound to `#f{i}` and its values to
/// `:f{i}…` tokens. An empty set compiles to `None`. The first invalid filter aborts
/// the whole compilation.
///
/// ```rust
/// use dynamodb_command_builder::common::{attribute::AttributeType, filter};
///
/// let filters = vec![filter::FilterSpec {
///     name: "age".to_string(),
///     attribute_type: AttributeType::Number,
///     condition: filter::FilterCondition::GreaterThan,
///     value: Some("18".to_string()),
///     ..Default::default()
/// }];
/// let compiled = filter::compile(&filters).unwrap().unwrap();
/// assert_eq!(compiled.expression, "(#f0 > :f0v)");
/// ```
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "dynamodb_command_builder.compile_filters",
        skip(filters),
        fields(count = filters.len()),
        err
    )
)]
pub fn compile(filters: &[FilterSpec]) -> Result<Option<common::ExpressionInput>> {
    if filters.is_empty() {
        return Ok(None);
    }
    let mut operations = Vec::with_capacity(filters.len());
    for (index, filter) in filters.iter().enumerate() {
        let operation = filter
            .get_expression(index)
            .map_err(|source| Error::Filter {
                index,
                name: filter.name.clone(),
                attribute_type: filter.attribute_type,
                condition: filter.condition,
                source: Box::new(source),
            })?;
        operations.push(operation);
    }
    let operation = common::ExpressionInput::merge(" AND ", operations);
    Ok(Some(operation))
}
