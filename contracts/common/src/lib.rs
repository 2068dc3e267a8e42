//! Shared utilities and error types for the PensionFi contract suite.
//!
//! This crate provides:
//! - [`CommonError`]: error codes returned by the shared helpers.
//! - [`access_control`]: the role capability table (role → accounts) that
//!   gates every administrative entry point.
//!
//! Contract-specific errors can extend the range starting at code **100** and
//! above, ensuring no collisions with the common set.

#![no_std]

use soroban_sdk::contracterror;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod access_control;

pub use access_control::Role;

// ── Shared error enum ────────────────────────────────────────────────────────

/// Standardised error codes shared by every PensionFi contract.
///
/// # Code ranges
/// | Range   | Purpose                       |
/// |---------|-------------------------------|
/// | 10 – 19 | Authentication & authorisation|
/// | 100+    | Reserved for contract-specific |
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum CommonError {
    /// The caller lacks the role required for the requested operation.
    AccessDenied = 10,

    /// The operation would leave no account holding `SuperAdmin`.
    LastSuperAdmin = 11,
}
