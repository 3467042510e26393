//! Small text utilities

pub mod segment;
