//! Common utilities, constants, and resources used across the etheroll-rs codebase.
//!
//! This crate provides shared functionality for the etheroll-rs workspace, including
//! chain definitions, unit conversion, and general utility functions.

/// Constants used throughout the etheroll-rs codebase.
pub mod constants;

/// Utilities for Ethereum values, including chains and ether units.
pub mod ether;

/// General utility functions and types for common tasks.
pub mod utils;
