//! Recursive recipe resolution.
//!
//! Walks a recipe's required items depth-first in declaration order,
//! scaling each dependency's cook time and ingredient quantities by the
//! required quantity and merging ingredients by name. Merged order is the
//! first appearance across the full expansion.
//!
//! Recipes currently being expanded are tracked on the call path so that a
//! recipe requiring itself (directly or transitively) fails with
//! [`ResolveError::CyclicDependency`] instead of recursing without bound.

use super::registry::Registry;
use super::types::{Entity, Recipe, RequiredItem, Summary};
use indexmap::{IndexMap, IndexSet};
use thiserror::Error;

/// Why a recipe could not be summarized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("'{0}' is not a registered recipe")]
    NotARecipe(String),

    #[error("missing dependency '{0}'")]
    MissingDependency(String),

    #[error("dependency cycle detected: {}", .0.join(" -> "))]
    CyclicDependency(Vec<String>),

    #[error("cook time or quantity overflow while summarizing '{0}'")]
    Overflow(String),
}

/// Look up `name` and summarize it. Ingredients and unknown names are both
/// `NotARecipe`.
pub fn resolve(registry: &Registry, name: &str) -> Result<Summary, ResolveError> {
    match registry.lookup(name) {
        Some(Entity::Recipe(recipe)) => summarize(registry, recipe),
        Some(Entity::Ingredient(_)) | None => {
            tracing::debug!(name, "summary requested for non-recipe");
            Err(ResolveError::NotARecipe(name.to_string()))
        }
    }
}

/// Summarize a recipe against the registry. Any failure at any depth
/// aborts the whole summary.
pub fn summarize(registry: &Registry, recipe: &Recipe) -> Result<Summary, ResolveError> {
    let mut in_progress = IndexSet::new();
    summarize_on_path(registry, recipe, &mut in_progress)
}

fn summarize_on_path(
    registry: &Registry,
    recipe: &Recipe,
    in_progress: &mut IndexSet<String>,
) -> Result<Summary, ResolveError> {
    if let Some(start) = in_progress.get_index_of(recipe.name.as_str()) {
        let mut cycle: Vec<String> = in_progress.iter().skip(start).cloned().collect();
        cycle.push(recipe.name.clone());
        tracing::warn!(recipe = %recipe.name, "dependency cycle");
        return Err(ResolveError::CyclicDependency(cycle));
    }
    in_progress.insert(recipe.name.clone());

    let mut totals = Totals::new(&recipe.name);

    for item in &recipe.required_items {
        let dependency = registry
            .lookup(&item.name)
            .ok_or_else(|| ResolveError::MissingDependency(item.name.clone()))?;

        match dependency {
            Entity::Ingredient(ingredient) => {
                totals.add_cook_time(ingredient.cook_time, item.quantity)?;
                totals.merge(&ingredient.name, item.quantity)?;
            }
            Entity::Recipe(sub_recipe) => {
                let sub = summarize_on_path(registry, sub_recipe, in_progress)?;
                totals.add_cook_time(sub.cook_time, item.quantity)?;
                for ingredient in &sub.ingredients {
                    let scaled = totals.scale(ingredient.quantity, item.quantity)?;
                    totals.merge(&ingredient.name, scaled)?;
                }
            }
        }
    }

    in_progress.pop();
    Ok(totals.into_summary())
}

fn overflow(recipe: &str) -> ResolveError {
    ResolveError::Overflow(recipe.to_string())
}

/// Running cook time and merge-by-name ingredient quantities for one recipe.
struct Totals<'a> {
    recipe: &'a str,
    cook_time: i64,
    ingredients: IndexMap<String, i64>,
}

impl<'a> Totals<'a> {
    fn new(recipe: &'a str) -> Self {
        Self {
            recipe,
            cook_time: 0,
            ingredients: IndexMap::new(),
        }
    }

    fn scale(&self, value: i64, quantity: i64) -> Result<i64, ResolveError> {
        value.checked_mul(quantity).ok_or_else(|| overflow(self.recipe))
    }

    fn add_cook_time(&mut self, per_unit: i64, quantity: i64) -> Result<(), ResolveError> {
        let scaled = self.scale(per_unit, quantity)?;
        self.cook_time = self
            .cook_time
            .checked_add(scaled)
            .ok_or_else(|| overflow(self.recipe))?;
        Ok(())
    }

    fn merge(&mut self, name: &str, quantity: i64) -> Result<(), ResolveError> {
        let recipe = self.recipe;
        match self.ingredients.get_mut(name) {
            Some(existing) => {
                *existing = existing
                    .checked_add(quantity)
                    .ok_or_else(|| overflow(recipe))?;
            }
            None => {
                self.ingredients.insert(name.to_string(), quantity);
            }
        }
        Ok(())
    }

    fn into_summary(self) -> Summary {
        Summary {
            name: self.recipe.to_string(),
            cook_time: self.cook_time,
            ingredients: self
                .ingredients
                .into_iter()
                .map(|(name, quantity)| RequiredItem { name, quantity })
                .collect(),
        }
    }
}
