//! Read commands for retrieving data from DynamoDB tables.
//!
//! This module assembles the inputs of read requests:
//! - Getting individual items by primary key
//! - Querying items with key and filter conditions
//! - Scanning entire tables with filter conditions

/// Common utilities and types for read operations.
pub mod common;

/// Get item command for retrieving a single item by primary key.
pub mod get_item;

/// Key condition compilation for query operations.
pub mod key_condition;

/// Query command for retrieving items with key conditions.
pub mod query;

/// Scan command for retrieving all items from a table.
pub mod scan;
