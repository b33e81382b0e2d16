//! In-memory cookbook registry keyed by unique entry name.
//!
//! Registration validates in a fixed order: duplicate name first (across
//! every variant), then variant-specific checks. A rejected registration
//! leaves the registry untouched.

use super::types::{Entity, Ingredient, Recipe};
use indexmap::IndexMap;
use std::collections::HashSet;
use thiserror::Error;

/// Why a registration was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("duplicate entry '{0}'")]
    DuplicateName(String),

    #[error("ingredient '{name}' has invalid cook time {cook_time}")]
    InvalidCookTime { name: String, cook_time: i64 },

    #[error("recipe '{0}' has empty or duplicate required items")]
    EmptyOrDuplicateItems(String),

    #[error("recipe '{recipe}' requires '{item}' with invalid quantity {quantity}")]
    InvalidQuantity {
        recipe: String,
        item: String,
        quantity: i64,
    },
}

/// Insertion-ordered store of every accepted entry.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    entries: IndexMap<String, Entity>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and store an entry.
    pub fn register(&mut self, entity: Entity) -> Result<(), RegistrationError> {
        if self.entries.contains_key(entity.name()) {
            tracing::warn!(name = entity.name(), "rejected duplicate entry");
            return Err(RegistrationError::DuplicateName(entity.name().to_string()));
        }

        match &entity {
            Entity::Ingredient(ingredient) => validate_ingredient(ingredient)?,
            Entity::Recipe(recipe) => validate_recipe(recipe)?,
        }

        tracing::debug!(name = entity.name(), kind = %entity.kind(), "registered entry");
        self.entries.insert(entity.name().to_string(), entity);
        Ok(())
    }

    /// Exact, case-sensitive lookup.
    pub fn lookup(&self, name: &str) -> Option<&Entity> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entries.values()
    }
}

fn validate_ingredient(ingredient: &Ingredient) -> Result<(), RegistrationError> {
    if ingredient.cook_time < 0 {
        tracing::warn!(name = %ingredient.name, cook_time = ingredient.cook_time, "rejected cook time");
        return Err(RegistrationError::InvalidCookTime {
            name: ingredient.name.clone(),
            cook_time: ingredient.cook_time,
        });
    }
    Ok(())
}

fn validate_recipe(recipe: &Recipe) -> Result<(), RegistrationError> {
    let mut seen = HashSet::new();
    let all_unique = recipe
        .required_items
        .iter()
        .all(|item| seen.insert(item.name.as_str()));

    if recipe.required_items.is_empty() || !all_unique {
        tracing::warn!(name = %recipe.name, "rejected required items");
        return Err(RegistrationError::EmptyOrDuplicateItems(recipe.name.clone()));
    }

    if let Some(item) = recipe.required_items.iter().find(|item| item.quantity <= 0) {
        tracing::warn!(name = %recipe.name, item = %item.name, "rejected quantity");
        return Err(RegistrationError::InvalidQuantity {
            recipe: recipe.name.clone(),
            item: item.name.clone(),
            quantity: item.quantity,
        });
    }

    Ok(())
}
