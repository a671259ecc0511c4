//! Tenant Console Core - roles, permissions and capability gating.
//!
//! This crate is shared by every tenant console component:
//! - `console` - Admin Panel and Vendor Panel web service
//! - `cli` - Operator tooling for permission tables
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP, no
//! session storage. The session role and the permission table are passed in
//! explicitly, so every decision is a pure function of its inputs.
//!
//! ```text
//! PermissionTable ──┐
//!                   ├──> Evaluator ──> can / can_any / can_all
//! session Role ─────┘         │
//!                             └──> Gate / evaluate_gate ──> RenderDecision
//! ```
//!
//! Decisions fail closed: an unset role, a role missing from the table and
//! an unrecognised permission all evaluate to "denied". Gating is a
//! presentation concern; servers enforce the same permissions themselves.
//!
//! # Modules
//!
//! - [`types`] - `Role`, `Permission` and `Panel`
//! - [`table`] - Role to permission mapping
//! - [`evaluator`] - Permission queries for a role
//! - [`gate`] - Render decisions for UI affordances
//! - [`catalog`] - Console permission constants and default tables

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod evaluator;
pub mod gate;
pub mod table;
pub mod types;

pub use evaluator::Evaluator;
pub use gate::{Gate, RenderDecision, evaluate_gate};
pub use table::{PermissionSet, PermissionTable};
pub use types::*;
