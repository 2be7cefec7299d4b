use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::PantryItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientSource {
    Manual,
    Pantry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub source: IngredientSource,
}

/// Ingredients picked for the next search. Names are unique, compared
/// case-insensitively, and kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct IngredientSelection {
    items: Vec<Ingredient>,
}

impl IngredientSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_manual(&mut self, name: &str) -> bool {
        self.insert(name, 1.0, "", IngredientSource::Manual)
    }

    pub fn add_from_pantry(&mut self, item: &PantryItem) -> bool {
        self.insert(&item.name, item.quantity, &item.unit, IngredientSource::Pantry)
    }

    /// Adds every comma-separated name; returns how many were new.
    pub fn add_list(&mut self, input: &str) -> usize {
        input
            .split(',')
            .filter(|name| self.add_manual(name))
            .count()
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.items.len();
        let name = name.trim();
        self.items.retain(|i| !i.name.eq_ignore_ascii_case(name));
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn contains(&self, name: &str) -> bool {
        let name = name.trim();
        self.items.iter().any(|i| i.name.eq_ignore_ascii_case(name))
    }

    pub fn names(&self) -> Vec<String> {
        self.items.iter().map(|i| i.name.clone()).collect()
    }

    pub fn items(&self) -> &[Ingredient] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn insert(&mut self, name: &str, quantity: f64, unit: &str, source: IngredientSource) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.items.push(Ingredient {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            quantity,
            unit: unit.trim().to_string(),
            source,
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn pantry_item(name: &str, quantity: f64, unit: &str) -> PantryItem {
        PantryItem {
            id: 1,
            name: name.to_string(),
            quantity,
            unit: unit.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_add_list_skips_blanks_and_duplicates() {
        let mut selection = IngredientSelection::new();
        assert_eq!(selection.add_list("chicken, rice, , Chicken ,onion"), 3);
        assert_eq!(selection.names(), vec!["chicken", "rice", "onion"]);
    }

    #[test]
    fn test_pantry_items_keep_quantity_and_source() {
        let mut selection = IngredientSelection::new();
        assert!(selection.add_from_pantry(&pantry_item("Tomatoes", 3.0, "pcs")));
        assert!(!selection.add_manual("tomatoes"));

        let item = &selection.items()[0];
        assert_eq!(item.source, IngredientSource::Pantry);
        assert_eq!(item.quantity, 3.0);
        assert_eq!(item.unit, "pcs");
    }

    #[test]
    fn test_remove_and_clear() {
        let mut selection = IngredientSelection::new();
        selection.add_list("garlic,lemon");
        assert!(selection.remove(" GARLIC "));
        assert!(!selection.remove("garlic"));
        assert_eq!(selection.len(), 1);
        selection.clear();
        assert!(selection.is_empty());
    }
}
