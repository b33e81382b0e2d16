//! Cookbook: a registry of ingredients and recipes.
//!
//! Recipes are resolved recursively into a total cook time and a flattened,
//! merge-by-name ingredient list. Served over HTTP or used from the CLI.

pub mod cli;
pub mod core;
pub mod server;
