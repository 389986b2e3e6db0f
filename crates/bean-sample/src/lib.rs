//! # Bean Container Sample App Library
//!
//! An order management system assembled by the bean container. This library
//! exposes the modules for the binary and for integration testing.

pub mod components;
pub mod error;
pub mod lifecycle;
pub mod model;
