//! `IouLedger` - A personal debt ledger engine
//!
//! This crate tracks money owed between the user and their contacts in two directions,
//! IOU (the user owes someone) and UOM (someone owes the user). Debts are paid down through
//! partial payments and settle automatically once the remaining balance falls under the
//! auto-settle threshold. All money math is exact; no binary floating point touches a balance.

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    // Security and correctness
    unsafe_code,
    unsafe_op_in_unsafe_fn,

    // Code quality - things that are almost always bugs
    unreachable_code,
    unreachable_patterns,
    unused_must_use,

    // Documentation - broken links are bugs
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    missing_docs,

    // Clippy categories for overall code quality
    clippy::all,
    clippy::pedantic,
    clippy::nursery,

    // Performance
    clippy::inefficient_to_string,
    clippy::large_types_passed_by_value,
    clippy::needless_pass_by_value,
    clippy::unnecessary_wraps,

    // Correctness
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::exit,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,

    // Complexity and readability
    clippy::cognitive_complexity,
    clippy::large_enum_variant,
    clippy::match_same_arms,
    clippy::too_many_lines,

    // Style consistency
    clippy::enum_glob_use,
    clippy::inconsistent_struct_constructor,
    clippy::must_use_candidate,
    clippy::redundant_closure_for_method_calls,
    clippy::semicolon_if_nothing_returned,
    clippy::wildcard_imports,

    // Future compatibility
    future_incompatible,
    rust_2018_idioms,
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
)]

// Note: `missing_docs` is a warning because the SeaORM derive macros generate
// undocumented items (`Column`, `ActiveModel`, `PrimaryKey`).

/// Configuration management for database and ledger settings
pub mod config;
/// Ledger business logic - validation, settlement and aggregation over the repository
pub mod core;
/// Ledger repository - raw row access and balance computation
pub mod db;
/// SeaORM entity definitions for database tables
pub mod entities;
/// Unified error types and result handling
pub mod errors;
/// Exact-precision money arithmetic and formatting
pub mod money;

#[cfg(test)]
pub mod test_utils;

pub use errors::{Error, ErrorKind, Result};
pub use money::Money;
