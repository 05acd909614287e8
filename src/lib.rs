#![deny(missing_docs)]
#![deny(warnings)]

//! # DynamoDB Command Builder
//!
//! Turns simplified, typed request objects into the exact inputs DynamoDB expects.
//!
//! ## Overview
//!
//! This library spares callers from hand-writing DynamoDB's expression placeholder syntax:
//! - Typed string values are coerced into attribute values per a declared type tag
//! - Key conditions and filter lists compile into expressions with `#name` / `:value` tokens
//! - Field maps compile into `SET` update expressions, avoiding caller token collisions
//! - Reserved words in projections and update targets are aliased automatically
//!
//! Commands are plain values that convert into the SDK's per-operation inputs; sending them
//! is left to the caller's client.
//!
//! ## Quick Example
//!
//! ```rust
//! use aws_sdk_dynamodb::operation::query::QueryInput;
//! use dynamodb_command_builder::common::{attribute::AttributeType, filter, key};
//! use dynamodb_command_builder::read;
//! use serde_json::Value;
//!
//! let query: read::query::Query<Value> = read::query::Query {
//!     partition_key: key::Key {
//!         name: "user_id".to_string(),
//!         value: "u1".to_string(),
//!         ..Default::default()
//!     },
//!     multiple_read_args: read::common::MultipleReadArgs {
//!         filters: vec![filter::FilterSpec {
//!             name: "status".to_string(),
//!             attribute_type: AttributeType::String,
//!             condition: filter::FilterCondition::EqualTo,
//!             value: Some("active".to_string()),
//!             ..Default::default()
//!         }],
//!         projection: Some("id, name".to_string()),
//!         table_name: "orders".to_string(),
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//! let command: read::query::QueryCommand = query.try_into()?;
//! assert_eq!(command.key_condition_expression, "#pk = :pk");
//! assert_eq!(
//!     command.multiple_read_input.filter_expression.as_deref(),
//!     Some("(#f0 = :f0v)")
//! );
//! let input = QueryInput::try_from(command)?;
//! assert_eq!(input.projection_expression(), Some("id, #name"));
//! # Ok::<(), dynamodb_command_builder::Error>(())
//! ```
//!
//! ## Modules
//!
//! - [`mod@common`] - Value coercion, keys, filters and reserved-word aliasing
//! - [`mod@error`] - The crate error type
//! - [`mod@read`] - Read commands (GetItem, Query, Scan)
//! - [`mod@write`] - Write commands (PutItem, UpdateItem)

/// Common utilities for coercion, keys, filters and reserved words.
pub mod common;

/// Errors raised while building commands.
pub mod error;

/// Read commands for retrieving data from DynamoDB tables.
///
/// This module provides commands for:
/// - Getting individual items by key
/// - Querying items with key conditions
/// - Scanning entire tables
pub mod read;

/// Write commands for modifying data in DynamoDB tables.
///
/// This module provides commands for:
/// - Putting new items or replacing existing ones
/// - Updating items with generated or explicit expressions
pub mod write;

pub use error::{Error, Result};
