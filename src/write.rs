//! Write commands for modifying data in DynamoDB tables.
//!
//! This module assembles the inputs of write requests:
//! - Putting new items or replacing existing ones
//! - Updating items from a field map or an explicit expression

/// Common utilities and types for write operations.
pub mod common;

/// Put item command for creating or replacing items.
pub mod put_item;

/// Update expression compilation from field maps.
pub mod update_expression;

/// Update item command for modifying existing items.
pub mod update_item;
