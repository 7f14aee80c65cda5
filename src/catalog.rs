//! Read-only recipe catalog

use std::collections::BTreeMap;

use crate::error::{PlanError, Result};
use crate::models::{FabricatorStats, Item};
use crate::resolver::Resolver;

/// Item name → recipe. Built once, then only borrowed.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: BTreeMap<String, Item>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Self {
        let mut catalog = Self::new();
        for item in items {
            catalog.insert(item);
        }
        catalog
    }

    /// Insert or replace an item
    pub fn insert(&mut self, item: Item) {
        self.items.insert(item.name.clone(), item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    /// All items, ordered by name
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn get_recipe(&self, name: &str) -> Result<&Item> {
        self.items.get(name).ok_or_else(|| PlanError::UnknownItem {
            name: name.to_string(),
        })
    }

    pub fn get_fabricator_stats(&self, fabricator: &str) -> Result<FabricatorStats> {
        let item = self.get_recipe(fabricator)?;
        Ok(FabricatorStats {
            speed_multiplier: item.crafting_speed,
            yield_per_second: item.yield_per_second,
        })
    }

    /// Names of the direct ingredients of `name`, for edge drawing
    pub fn direct_ingredient_names(&self, name: &str) -> Result<Vec<&str>> {
        let item = self.get_recipe(name)?;
        Ok(item.ingredients.keys().map(String::as_str).collect())
    }

    /// Fabricators whose `kind` is `class`
    pub fn fabricators_of_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Item> {
        self.items
            .values()
            .filter(move |item| item.kind.as_deref() == Some(class))
    }

    /// Check the closed-world and acyclicity invariants.
    pub fn validate(&self) -> Result<()> {
        for item in self.items.values() {
            if let Some(missing) = item.ingredients.keys().find(|name| !self.contains(name)) {
                return Err(PlanError::DanglingIngredient {
                    item: item.name.clone(),
                    ingredient: missing.clone(),
                });
            }
        }

        let mut resolver = Resolver::new(self);
        for name in self.items.keys() {
            resolver.total_ingredients_for_one_unit(name)?;
        }

        tracing::debug!(items = self.items.len(), "catalog validated");
        Ok(())
    }
}
