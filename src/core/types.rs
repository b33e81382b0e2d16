//! Cookbook entry types: ingredients, recipes, required items, and summaries.
//!
//! All types derive Serialize/Deserialize. Field names are camelCase on the
//! wire (`cookTime`, `requiredItems`) for both JSON and YAML.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Entries
// ============================================================================

/// A registered cookbook entry, discriminated by its `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Entity {
    Ingredient(Ingredient),
    Recipe(Recipe),
}

impl Entity {
    /// Registry key shared by both variants.
    pub fn name(&self) -> &str {
        match self {
            Self::Ingredient(i) => &i.name,
            Self::Recipe(r) => &r.name,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Ingredient(_) => EntityKind::Ingredient,
            Self::Recipe(_) => EntityKind::Recipe,
        }
    }
}

impl From<Ingredient> for Entity {
    fn from(ingredient: Ingredient) -> Self {
        Self::Ingredient(ingredient)
    }
}

impl From<Recipe> for Entity {
    fn from(recipe: Recipe) -> Self {
        Self::Recipe(recipe)
    }
}

/// A raw ingredient with a per-unit cook time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub name: String,

    /// Cook time per unit (must be >= 0)
    pub cook_time: i64,
}

/// A recipe built from other ingredients and recipes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub name: String,

    /// Dependencies in declaration order (non-empty, names unique)
    pub required_items: Vec<RequiredItem>,
}

/// A `(name, quantity)` pair naming a dependency or a summarized ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredItem {
    pub name: String,
    pub quantity: i64,
}

impl RequiredItem {
    pub fn new(name: impl Into<String>, quantity: i64) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

/// Entry variant discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Ingredient,
    Recipe,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ingredient => write!(f, "ingredient"),
            Self::Recipe => write!(f, "recipe"),
        }
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Flattened cost and ingredient totals for a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub name: String,
    pub cook_time: i64,

    /// Ingredient totals in first-appearance order
    pub ingredients: Vec<RequiredItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_ingredient_from_json() {
        let json = r#"{"type":"ingredient","name":"Egg","cookTime":5}"#;
        let entity: Entity = serde_json::from_str(json).unwrap();
        assert_eq!(
            entity,
            Entity::Ingredient(Ingredient {
                name: "Egg".to_string(),
                cook_time: 5,
            })
        );
        assert_eq!(entity.name(), "Egg");
        assert_eq!(entity.kind(), EntityKind::Ingredient);
    }

    #[test]
    fn test_entity_recipe_from_json() {
        let json = r#"{
            "type": "recipe",
            "name": "Omelette",
            "requiredItems": [{"name": "Egg", "quantity": 2}]
        }"#;
        let entity: Entity = serde_json::from_str(json).unwrap();
        match entity {
            Entity::Recipe(r) => {
                assert_eq!(r.name, "Omelette");
                assert_eq!(r.required_items, vec![RequiredItem::new("Egg", 2)]);
            }
            other => panic!("expected recipe, got {:?}", other),
        }
    }

    #[test]
    fn test_entity_unknown_type_rejected() {
        let json = r#"{"type":"utensil","name":"Whisk"}"#;
        assert!(serde_json::from_str::<Entity>(json).is_err());
    }

    #[test]
    fn test_entity_negative_cook_time_parses() {
        // Negative values must reach registry validation
        let json = r#"{"type":"ingredient","name":"Ice","cookTime":-1}"#;
        let entity: Entity = serde_json::from_str(json).unwrap();
        assert!(matches!(entity, Entity::Ingredient(Ingredient { cook_time: -1, .. })));
    }

    #[test]
    fn test_entity_kind_display() {
        assert_eq!(EntityKind::Ingredient.to_string(), "ingredient");
        assert_eq!(EntityKind::Recipe.to_string(), "recipe");
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = Summary {
            name: "Omelette".to_string(),
            cook_time: 10,
            ingredients: vec![RequiredItem::new("Egg", 2)],
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "Omelette",
                "cookTime": 10,
                "ingredients": [{"name": "Egg", "quantity": 2}]
            })
        );
    }

    #[test]
    fn test_entity_yaml_serde() {
        let yaml = r#"
type: recipe
name: Brunch
requiredItems:
  - name: Omelette
    quantity: 3
"#;
        let entity: Entity = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(entity.kind(), EntityKind::Recipe);
        let out = serde_yaml_ng::to_string(&entity).unwrap();
        assert!(out.contains("type: recipe"));
        assert!(out.contains("requiredItems"));
    }
}
