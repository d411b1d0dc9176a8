//! Testing utilities module for inventory-collect
//!
//! Helpers for building throwaway generator directories in tests.

pub mod helpers;

pub use helpers::*;
