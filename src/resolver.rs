//! Recursive expansion of the recipe graph

use std::collections::HashMap;

use crate::catalog::Catalog;
use crate::error::{PlanError, Result};
use crate::models::DemandTable;
use crate::rates::{merge_summing_into, scaled};

/// Expands items into their transitive ingredients.
///
/// One resolver serves one planning call: expansions are memoized per item
/// name and dropped with the resolver.
pub struct Resolver<'a> {
    catalog: &'a Catalog,
    memo: HashMap<String, DemandTable>,
    visiting: Vec<String>,
}

impl<'a> Resolver<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            memo: HashMap::new(),
            visiting: Vec::new(),
        }
    }

    /// Quantity of every transitive ingredient needed for exactly one output
    /// unit of `item` (per unit, not per batch).
    pub fn total_ingredients_for_one_unit(&mut self, item: &str) -> Result<DemandTable> {
        if let Some(cached) = self.memo.get(item) {
            return Ok(cached.clone());
        }

        if let Some(start) = self.visiting.iter().position(|name| name == item) {
            let mut path = self.visiting[start..].to_vec();
            path.push(item.to_string());
            return Err(PlanError::CyclicRecipe { path });
        }

        let catalog = self.catalog;
        let recipe = catalog.get_recipe(item)?;

        self.visiting.push(item.to_string());
        let expanded = self.expand(recipe.ingredients.iter(), recipe.recipe_yield());
        self.visiting.pop();
        let table = expanded?;

        tracing::debug!(item, ingredients = table.len(), "resolved");
        self.memo.insert(item.to_string(), table.clone());
        Ok(table)
    }

    fn expand<'i>(
        &mut self,
        ingredients: impl Iterator<Item = (&'i String, &'i f64)>,
        batch_yield: f64,
    ) -> Result<DemandTable> {
        let mut total = DemandTable::new();
        for (ingredient, quantity) in ingredients {
            *total.entry(ingredient.clone()).or_default() += quantity;

            let nested = self.total_ingredients_for_one_unit(ingredient)?;
            merge_summing_into(&mut total, &scaled(&nested, *quantity));
        }

        for qty in total.values_mut() {
            *qty /= batch_yield;
        }
        Ok(total)
    }
}
