//! Rate arithmetic and fabricator resolution

use std::collections::BTreeMap;

use crate::catalog::Catalog;
use crate::error::{PlanError, Result};
use crate::models::DemandTable;

/// Class → fabricator used when the caller has no preference
pub const DEFAULT_FABRICATORS: &[(&str, &str)] = &[
    ("mine", "electric mining drill"),
    ("furnace", "stone furnace"),
    ("assembler", "assembling machine 1"),
    ("chemical plant", "chemical plant"),
    ("refinery", "oil refinery"),
    ("water pump", "offshore pump"),
    ("oil pump", "pumpjack"),
    ("boiler", "boiler"),
];

/// Classes whose items need no production structure
pub const FABRICATOR_LESS_CLASSES: &[&str] = &["power producer", "raw element"];

pub fn round_to_2dp(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Union of both tables; values under shared keys are added.
pub fn merge_summing(a: &DemandTable, b: &DemandTable) -> DemandTable {
    let mut merged = a.clone();
    merge_summing_into(&mut merged, b);
    merged
}

pub fn merge_summing_into(target: &mut DemandTable, other: &DemandTable) {
    for (name, rate) in other {
        *target.entry(name.clone()).or_default() += rate;
    }
}

pub fn scaled(table: &DemandTable, factor: f64) -> DemandTable {
    table
        .iter()
        .map(|(name, qty)| (name.clone(), qty * factor))
        .collect()
}

/// Caller's preferred fabricator per class, e.g. a faster assembler tier
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FabricatorSelection {
    overrides: BTreeMap<String, String>,
}

impl FabricatorSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefer(mut self, class: impl Into<String>, fabricator: impl Into<String>) -> Self {
        self.overrides.insert(class.into(), fabricator.into());
        self
    }

    pub fn fastest_assembler(self, fabricator: impl Into<String>) -> Self {
        self.prefer("assembler", fabricator)
    }

    pub fn get(&self, class: &str) -> Option<&str> {
        self.overrides.get(class).map(String::as_str)
    }
}

/// Pick the fabricator that will make `item`.
///
/// `Ok(None)` means the item's class needs no structure at all.
pub fn resolve_fabricator_name<'a>(
    catalog: &'a Catalog,
    item: &str,
    selection: &'a FabricatorSelection,
) -> Result<Option<&'a str>> {
    let recipe = catalog.get_recipe(item)?;
    let class = recipe.fabricator_class();

    let chosen = match selection.get(class) {
        Some(fabricator) => {
            if catalog.get_recipe(fabricator)?.kind.as_deref() != Some(class) {
                return Err(PlanError::UnresolvedFabricator {
                    item: item.to_string(),
                    class: class.to_string(),
                });
            }
            fabricator
        }
        None if FABRICATOR_LESS_CLASSES.contains(&class) => return Ok(None),
        None => DEFAULT_FABRICATORS
            .iter()
            .find(|(c, _)| *c == class)
            .map(|(_, fabricator)| *fabricator)
            .ok_or_else(|| PlanError::UnresolvedFabricator {
                item: item.to_string(),
                class: class.to_string(),
            })?,
    };

    let excluded = recipe.made_in.as_ref().and_then(|m| m.excluding.as_deref());
    if excluded != Some(chosen) {
        return Ok(Some(chosen));
    }

    // Next tier up: the slowest fabricator of the class that is allowed
    let fallback = catalog
        .fabricators_of_class(class)
        .filter(|fab| Some(fab.name.as_str()) != excluded)
        .min_by(|a, b| fabricator_speed(a).total_cmp(&fabricator_speed(b)))
        .ok_or_else(|| PlanError::UnresolvedFabricator {
            item: item.to_string(),
            class: class.to_string(),
        })?;

    tracing::debug!(item, excluded = chosen, fallback = %fallback.name, "fabricator excluded by recipe");
    Ok(Some(fallback.name.as_str()))
}

fn fabricator_speed(fabricator: &crate::models::Item) -> f64 {
    fabricator
        .yield_per_second
        .or(fabricator.crafting_speed)
        .unwrap_or(1.0)
}

/// Seconds one fabricator needs per output unit (throughput-rated
/// fabricators: per yield batch).
pub fn seconds_to_produce_one(
    catalog: &Catalog,
    item: &str,
    selection: &FabricatorSelection,
) -> Result<f64> {
    let recipe = catalog.get_recipe(item)?;
    let fabricator = resolve_fabricator_name(catalog, item, selection)?.ok_or_else(|| {
        PlanError::UnresolvedFabricator {
            item: item.to_string(),
            class: recipe.fabricator_class().to_string(),
        }
    })?;
    let stats = catalog.get_fabricator_stats(fabricator)?;

    let seconds = match stats.yield_per_second {
        Some(per_second) => recipe.recipe_yield() / per_second,
        None => {
            let speed = stats.speed_multiplier.unwrap_or(1.0);
            (recipe.recipe_fab_time() / speed) / recipe.recipe_yield()
        }
    };
    Ok(seconds)
}
