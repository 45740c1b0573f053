//! Shared builders for parcelamento integration tests.

#![allow(dead_code)]

pub mod builders;

pub use builders::*;
