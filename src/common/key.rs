use crate::{
    common::attribute,
    error::{Error, Result},
};

use aws_sdk_dynamodb::types;
use std::collections;

/// Key component.
///
/// ```rust
/// use dynamodb_command_builder::common::{attribute::KeyType, key};
///
/// let key = key::Key {
///     name: "id".to_string(),
///     value: "1".to_string(),
///     key_type: KeyType::Number,
/// };
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Key {
    /// The attribute name of the key.
    pub name: String,
    /// The raw value of the key.
    pub value: String,
    /// The declared type of the key, used to coerce `value`.
    pub key_type: attribute::KeyType,
}

impl Key {
    pub(crate) fn attribute_value(&self) -> Result<types::AttributeValue> {
        attribute::coerce(&self.value, self.key_type.into())
    }
}

/// Primary key (partition key and optional sort key).
///
/// ```rust
/// use dynamodb_command_builder::common::key;
///
/// let keys = key::Keys {
///     partition_key: key::Key {
///         name: "id".to_string(),
///         value: "1".to_string(),
///         ..Default::default()
///     },
///     ..Default::default()
/// };
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Keys {
    /// The partition key (required).
    pub partition_key: Key,
    /// The sort key (optional, only for tables with composite primary keys).
    pub sort_key: Option<Key>,
}

impl TryFrom<Keys> for collections::HashMap<String, types::AttributeValue> {
    type Error = Error;

    fn try_from(key: Keys) -> Result<Self> {
        let partition_key_value = key.partition_key.attribute_value()?;
        let mut keys = Self::from([(key.partition_key.name, partition_key_value)]);
        if let Some(sort_key) = key.sort_key {
            let sort_key_value = sort_key.attribute_value()?;
            keys.insert(sort_key.name, sort_key_value);
        }
        Ok(keys)
    }
}
