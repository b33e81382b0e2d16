//! Core cookbook logic: types, registry, resolution, name normalization, file parsing.

pub mod normalize;
pub mod parser;
pub mod registry;
pub mod resolver;
pub mod types;
