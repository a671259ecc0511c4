//! Core types for the tenant console.
//!
//! This module provides type-safe wrappers for roles, permissions and panels.

pub mod panel;
pub mod permission;
pub mod role;

pub use panel::Panel;
pub use permission::{Permission, PermissionError};
pub use role::Role;
