//! Core Kernel - Foundational types and utilities for the payables system
//!
//! This crate provides the fundamental building blocks used across all domain
//! modules:
//! - Money with precise 2-decimal-place arithmetic
//! - Strongly-typed entity identifiers
//! - The shared port error type and port marker trait

pub mod identifiers;
pub mod money;
pub mod ports;

pub use identifiers::{ClientId, PaymentId, SupplierId, TaskId, UserId};
pub use money::{Money, MoneyError};
pub use ports::{DomainPort, PortError};
