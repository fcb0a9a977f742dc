//! Utility functions

pub mod normalize;
