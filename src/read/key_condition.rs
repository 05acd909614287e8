use crate::{
    common::{self, key},
    error::{Error, Result},
};

use serde::Deserialize;
use std::{fmt, str};

/// Partition key equality clause every key condition starts with.
const PARTITION_KEY_CONDITION: &str = "#pk = :pk";

/// Operator narrowing the sort key range of a query.
///
/// Parsing is case-insensitive and accepts both the symbolic and the verbose spelling.
///
/// ```rust
/// use dynamodb_command_builder::read::key_condition::SortKeyComparator;
///
/// assert_eq!("<=".parse::<SortKeyComparator>().unwrap(), SortKeyComparator::LessThanOrEqual);
/// assert_eq!(
///     "less_than_or_equal_to".parse::<SortKeyComparator>().unwrap(),
///     SortKeyComparator::LessThanOrEqual
/// );
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq)]
#[serde(try_from = "String")]
pub enum SortKeyComparator {
    /// `=`
    #[default]
    Equal,
    /// `<`
    LessThan,
    /// `<=`
    LessThanOrEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanOrEqual,
    /// `BETWEEN`, needs a second sort value.
    Between,
    /// `begins_with`
    BeginsWith,
}

impl SortKeyComparator {
    /// Canonical spelling of this comparator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::Between => "BETWEEN",
            Self::BeginsWith => "BEGINS_WITH",
        }
    }
}

impl fmt::Display for SortKeyComparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl str::FromStr for SortKeyComparator {
    type Err = Error;

    fn from_str(comparator: &str) -> Result<Self> {
        let comparator = match comparator.trim().to_ascii_uppercase().as_str() {
            "=" | "EQUAL_TO" => Self::Equal,
            "<" | "LESS_THAN" => Self::LessThan,
            "<=" | "LESS_THAN_OR_EQUAL_TO" => Self::LessThanOrEqual,
            ">" | "GREATER_THAN" => Self::GreaterThan,
            ">=" | "GREATER_THAN_OR_EQUAL_TO" => Self::GreaterThanOrEqual,
            "BETWEEN" => Self::Between,
            "BEGINS_WITH" => Self::BeginsWith,
            _ => {
                return Err(Error::InvalidComparator {
                    comparator: comparator.to_string(),
                });
            }
        };
        Ok(comparator)
    }
}

impl TryFrom<String> for SortKeyComparator {
    type Error = Error;

    fn try_from(comparator: String) -> Result<Self> {
        comparator.parse()
    }
}

/// Condition applied to the sort key of a query.
///
/// ```rust
/// use dynamodb_command_builder::common::key;
/// use dynamodb_command_builder::read::key_condition;
///
/// let condition = key_condition::SortKeyCondition {
///     key: key::Key {
///         name: "created_at".to_string(),
///         value: "2024".to_string(),
///         ..Default::default()
///     },
///     comparator: key_condition::SortKeyComparator::BeginsWith,
///     second_value: None,
/// };
/// assert_eq!(
///     key_condition::compile(Some(&condition)).unwrap(),
///     "#pk = :pk AND begins_with(#sk, :skValue2)"
/// );
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct SortKeyCondition {
    /// The sort key attribute and its value.
    pub key: key::Key,
    /// How the sort key is compared.
    pub comparator: SortKeyComparator,
    /// Upper bound, present only for `BETWEEN`.
    pub second_value: Option<String>,
}

impl SortKeyCondition {
    fn require_second_value(&self) -> Result<&str> {
        self.second_value.as_deref().ok_or(Error::MissingOperand {
            operation: self.comparator.as_str(),
            operand: "a second sort key value",
        })
    }
}

/// Render the key condition expression for a partition key and optional sort key condition.
///
/// The partition key is always bound to `#pk` / `:pk` and the sort key to `#sk`. The sort
/// value uses `:sk`, except for `BEGINS_WITH` where the prefix is carried by `:skValue2`;
/// `BETWEEN` uses both.
pub fn compile(sort_key_condition: Option<&SortKeyCondition>) -> Result<String> {
    let Some(sort_key_condition) = sort_key_condition else {
        return Ok(PARTITION_KEY_CONDITION.to_string());
    };
    let sort_key_expression = match sort_key_condition.comparator {
        SortKeyComparator::LessThan
        | SortKeyComparator::LessThanOrEqual
        | SortKeyComparator::GreaterThan
        | SortKeyComparator::GreaterThanOrEqual => {
            format!("#sk {} :sk", sort_key_condition.comparator)
        }
        SortKeyComparator::BeginsWith => "begins_with(#sk, :skValue2)".to_string(),
        SortKeyComparator::Between => {
            sort_key_condition.require_second_value()?;
            "#sk BETWEEN :sk AND :skValue2".to_string()
        }
        SortKeyComparator::Equal => "#sk = :sk".to_string(),
    };
    Ok(format!("{PARTITION_KEY_CONDITION} AND {sort_key_expression}"))
}

/// Key condition expression together with the `#pk`/`#sk` names and coerced key values.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(name = "dynamodb_command_builder.compile_key_condition", err)
)]
pub(crate) fn get_key_condition_operation(
    partition_key: &key::Key,
    sort_key_condition: Option<&SortKeyCondition>,
) -> Result<common::ExpressionInput> {
    let expression = compile(sort_key_condition)?;
    let mut expression_attribute_names =
        common::NameMap::from([("#pk".to_string(), partition_key.name.clone())]);
    let mut expression_attribute_values =
        common::ValueMap::from([(":pk".to_string(), partition_key.attribute_value()?)]);
    if let Some(sort_key_condition) = sort_key_condition {
        let sort_key = &sort_key_condition.key;
        expression_attribute_names.insert("#sk".to_string(), sort_key.name.clone());
        let sort_value = sort_key.attribute_value()?;
        match sort_key_condition.comparator {
            SortKeyComparator::BeginsWith => {
                expression_attribute_values.insert(":skValue2".to_string(), sort_value);
            }
            SortKeyComparator::Between => {
                let second_value = common::attribute::coerce(
                    sort_key_condition.require_second_value()?,
                    sort_key.key_type.into(),
                )?;
                expression_attribute_values.insert(":sk".to_string(), sort_value);
                expression_attribute_values.insert(":skValue2".to_string(), second_value);
            }
            _ => {
                expression_attribute_values.insert(":sk".to_string(), sort_value);
            }
        }
    }
    let operation = common::ExpressionInput {
        expression,
        expression_attribute_names,
        expression_attribute_values,
    };
    Ok(operation)
}
