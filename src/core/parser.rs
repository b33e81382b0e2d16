//! Cookbook file parsing and validation.
//!
//! A cookbook file is YAML with an ordered `entries` list. Entries are
//! replayed into a [`Registry`] in file order, so the registration rules
//! (duplicate names first, then per-variant checks) apply unchanged.
//! Validation additionally reports:
//! - required items that name no entry in the file
//! - recipes that fail to resolve (cycles, overflow)

use super::registry::Registry;
use super::resolver::{self, ResolveError};
use super::types::Entity;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Root of a `cookbook.yaml` file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CookbookFile {
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Entries in registration order
    #[serde(default)]
    pub entries: Vec<Entity>,
}

/// Validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Parse a cookbook file from disk.
pub fn parse_cookbook_file(path: &Path) -> Result<CookbookFile, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    parse_cookbook(&content)
}

/// Parse a cookbook from a YAML string.
pub fn parse_cookbook(yaml: &str) -> Result<CookbookFile, String> {
    serde_yaml_ng::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))
}

/// Register every entry in file order. Rejected entries are reported and
/// skipped; accepted ones stay registered.
pub fn load_registry(cookbook: &CookbookFile) -> (Registry, Vec<ValidationError>) {
    let mut registry = Registry::new();
    let mut errors = Vec::new();

    for (index, entry) in cookbook.entries.iter().enumerate() {
        if let Err(e) = registry.register(entry.clone()) {
            errors.push(ValidationError {
                message: format!("entry #{} ({} '{}'): {}", index + 1, entry.kind(), entry.name(), e),
            });
        }
    }

    tracing::debug!(
        accepted = registry.len(),
        rejected = errors.len(),
        "loaded cookbook"
    );
    (registry, errors)
}

/// Validate a parsed cookbook. Returns a list of errors (empty = valid).
pub fn validate_cookbook(cookbook: &CookbookFile) -> Vec<ValidationError> {
    let (registry, mut errors) = load_registry(cookbook);
    let mut in_reported_cycle: HashSet<String> = HashSet::new();

    for entry in registry.iter() {
        let Entity::Recipe(recipe) = entry else {
            continue;
        };

        for item in &recipe.required_items {
            if !registry.contains(&item.name) {
                errors.push(ValidationError {
                    message: format!(
                        "recipe '{}' requires unknown entry '{}'",
                        recipe.name, item.name
                    ),
                });
            }
        }

        // Dangling items were reported above; only surface other failures
        match resolver::summarize(&registry, recipe) {
            Ok(_) | Err(ResolveError::MissingDependency(_)) => {}
            Err(ResolveError::CyclicDependency(path)) => {
                // One report per cycle, however many recipes reach it
                if path.iter().any(|name| in_reported_cycle.contains(name)) {
                    continue;
                }
                in_reported_cycle.extend(path.iter().cloned());
                errors.push(ValidationError {
                    message: format!(
                        "recipe '{}': {}",
                        recipe.name,
                        ResolveError::CyclicDependency(path)
                    ),
                });
            }
            Err(e) => errors.push(ValidationError {
                message: format!("recipe '{}': {}", recipe.name, e),
            }),
        }
    }

    errors
}
