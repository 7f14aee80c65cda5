//! Demand aggregation and fabricator planning

use std::collections::BTreeMap;

use crate::catalog::Catalog;
use crate::error::{PlanError, Result};
use crate::models::{DemandTable, Goals, Plan, PlanEntry};
use crate::rates::{
    merge_summing, merge_summing_into, resolve_fabricator_name, round_to_2dp,
    seconds_to_produce_one, FabricatorSelection,
};
use crate::report::derive_short_name;
use crate::resolver::Resolver;

/// Per-goal ingredient tables, each scaled to the goal's rate and rounded
pub fn demand_per_goal(catalog: &Catalog, goals: &Goals) -> Result<BTreeMap<String, DemandTable>> {
    let mut resolver = Resolver::new(catalog);
    let mut per_goal = BTreeMap::new();

    for (name, &rate) in goals {
        if !rate.is_finite() || rate < 0.0 {
            return Err(PlanError::InvalidRate {
                item: name.clone(),
                rate,
            });
        }

        let table = resolver
            .total_ingredients_for_one_unit(name)?
            .into_iter()
            .map(|(ingredient, qty)| (ingredient, round_to_2dp(qty * rate)))
            .collect();
        per_goal.insert(name.clone(), table);
    }

    Ok(per_goal)
}

/// Merge the per-goal tables and the goals themselves into one demand table
pub fn merge_demand(goals: &Goals, per_goal: &BTreeMap<String, DemandTable>) -> DemandTable {
    let mut merged = DemandTable::new();
    for table in per_goal.values() {
        merge_summing_into(&mut merged, table);
    }
    merge_summing(&merged, goals)
}

/// Every goal and transitive ingredient with its required rate per minute,
/// alongside the per-goal tables it was merged from
pub fn aggregate_demand(
    catalog: &Catalog,
    goals: &Goals,
) -> Result<(BTreeMap<String, DemandTable>, DemandTable)> {
    let per_goal = demand_per_goal(catalog, goals)?;
    let demand = merge_demand(goals, &per_goal);
    Ok((per_goal, demand))
}

/// Turn one demand-table entry into fabricator counts
pub fn plan_entry(
    catalog: &Catalog,
    item: &str,
    demand_per_minute: f64,
    selection: &FabricatorSelection,
) -> Result<PlanEntry> {
    let recipe = catalog.get_recipe(item)?;
    let fabricator = resolve_fabricator_name(catalog, item, selection)?.ok_or_else(|| {
        PlanError::UnresolvedFabricator {
            item: item.to_string(),
            class: recipe.fabricator_class().to_string(),
        }
    })?;

    let per_minute = round_to_2dp(60.0 / seconds_to_produce_one(catalog, item, selection)?);
    if !per_minute.is_finite() || per_minute <= 0.0 {
        return Err(PlanError::ZeroThroughput {
            item: item.to_string(),
            fabricator: fabricator.to_string(),
        });
    }

    let fabricators_required = (demand_per_minute / per_minute).ceil();
    let total_per_minute = per_minute * fabricators_required;
    let excess = total_per_minute - demand_per_minute;
    // No demand: no fabricators and nothing to divide by
    let surplus_percentage = if total_per_minute > 0.0 {
        round_to_2dp(100.0 * excess / total_per_minute)
    } else {
        0.0
    };

    let fabricator_item = catalog.get_recipe(fabricator)?;

    Ok(PlanEntry {
        item: item.to_string(),
        short_name: derive_short_name(recipe),
        demand_per_minute,
        fabricators_required: fabricators_required as u64,
        fabricator: fabricator.to_string(),
        per_fabricator_per_minute: per_minute,
        surplus_per_minute: round_to_2dp(excess),
        surplus_percentage,
        electric_kw: fabricator_item.electric_kw.unwrap_or(0.0) * fabricators_required,
        fuel_kw: fabricator_item.fuel_kw.unwrap_or(0.0) * fabricators_required,
        is_goal: false,
    })
}

/// Compute the fabrication plan for `goals`.
///
/// Every demand-table key gets an entry, listed goals first, then
/// ingredients, each group by name. Any positive demand needs at least one
/// fabricator; a zero demand gets none.
pub fn plan(catalog: &Catalog, goals: &Goals, selection: &FabricatorSelection) -> Result<Plan> {
    tracing::info!(goals = goals.len(), "planning");

    let (per_goal, demand) = aggregate_demand(catalog, goals)?;

    let mut entries = Vec::with_capacity(demand.len());
    for (item, &rate) in &demand {
        // Summation noise must not bump the ceiling, but a demand below the
        // rounding step is kept as requested
        let rounded = round_to_2dp(rate);
        let demand_per_minute = if rounded > 0.0 { rounded } else { rate };

        let mut entry = plan_entry(catalog, item, demand_per_minute, selection)?;
        entry.is_goal = goals.contains_key(item);
        tracing::debug!(
            item = %item,
            demand = entry.demand_per_minute,
            fabricators = entry.fabricators_required,
            fabricator = %entry.fabricator,
            "planned"
        );
        entries.push(entry);
    }
    entries.sort_by_key(|entry| !entry.is_goal);

    tracing::info!(entries = entries.len(), "plan complete");
    Ok(Plan {
        goals: goals.clone(),
        per_goal,
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin;
    use crate::models::{Item, MadeIn};
    use proptest::prelude::*;
    use rstest::rstest;

    fn goals(entries: &[(&str, f64)]) -> Goals {
        entries
            .iter()
            .map(|(name, rate)| (name.to_string(), *rate))
            .collect()
    }

    fn two_item_catalog() -> Catalog {
        Catalog::from_items([
            Item::new("A").fab_time(1.0).made_in(MadeIn::new("mine")),
            Item::new("B").ingredient("A", 2.0).fab_time(1.0).batch_yield(1.0),
            Item::new("drill").kind("mine").yield_per_second(0.5),
            Item::new("bench").kind("assembler").crafting_speed(1.0),
        ])
    }

    fn bench_selection() -> FabricatorSelection {
        FabricatorSelection::new()
            .fastest_assembler("bench")
            .prefer("mine", "drill")
    }

    #[test]
    fn test_single_goal_scenario() {
        let catalog = two_item_catalog();
        let goals = goals(&[("B", 10.0)]);

        let (_, demand) = aggregate_demand(&catalog, &goals).unwrap();
        assert_eq!(demand, [("A".to_string(), 20.0), ("B".to_string(), 10.0)].into());

        let plan = plan(&catalog, &goals, &bench_selection()).unwrap();
        let b = plan.entry("B").unwrap();
        assert_eq!(b.per_fabricator_per_minute, 60.0);
        assert_eq!(b.fabricators_required, 1);
        assert_eq!(b.surplus_per_minute, 50.0);
        assert_eq!(b.surplus_percentage, 83.33);
        assert_eq!(b.fabricator, "bench");
        assert!(b.is_goal);

        // drill: 1 / 0.5 = 2s → 30/min, so 20/min needs one
        let a = plan.entry("A").unwrap();
        assert_eq!(a.per_fabricator_per_minute, 30.0);
        assert_eq!(a.fabricators_required, 1);
        assert_eq!(a.surplus_per_minute, 10.0);
        assert!(!a.is_goal);

        assert_eq!(plan.entries()[0].item, "B");
    }

    #[test]
    fn test_raw_material_goal_is_planned_from_mine_throughput() {
        let catalog = builtin::catalog();
        let plan = plan(&catalog, &goals(&[("iron ore", 45.0)]), &FabricatorSelection::new()).unwrap();

        assert_eq!(plan.entries().len(), 1);
        let ore = &plan.entries()[0];
        assert_eq!(ore.fabricator, "electric mining drill");
        assert_eq!(ore.per_fabricator_per_minute, 30.0);
        assert_eq!(ore.fabricators_required, 2);
        assert_eq!(ore.surplus_per_minute, 15.0);
        assert_eq!(ore.surplus_percentage, 25.0);
        assert_eq!(ore.electric_kw, 180.0);
    }

    #[test]
    fn test_shared_ingredient_is_summed_across_goals() {
        let catalog = builtin::catalog();
        let (_, gear) = aggregate_demand(&catalog, &goals(&[("iron gear wheel", 10.0)])).unwrap();
        let (_, pipe) = aggregate_demand(&catalog, &goals(&[("pipe", 6.0)])).unwrap();
        let (_, both) =
            aggregate_demand(&catalog, &goals(&[("iron gear wheel", 10.0), ("pipe", 6.0)])).unwrap();

        assert_eq!(gear["iron plate"], 20.0);
        assert_eq!(pipe["iron plate"], 6.0);
        assert_eq!(both["iron plate"], 26.0);
        assert_eq!(both["iron ore"], 26.0);
        assert_eq!(both["iron gear wheel"], 10.0);
        assert_eq!(both["pipe"], 6.0);
    }

    #[test]
    fn test_goal_that_is_also_an_ingredient() {
        let catalog = builtin::catalog();
        let (_, demand) = aggregate_demand(
            &catalog,
            &goals(&[("iron gear wheel", 10.0), ("iron plate", 5.0)]),
        )
        .unwrap();

        assert_eq!(demand["iron plate"], 25.0);
    }

    #[test]
    fn test_per_goal_tables_are_rounded() {
        let catalog = builtin::catalog();
        let per_goal = demand_per_goal(&catalog, &goals(&[("electronic circuit", 1.0 / 3.0)])).unwrap();

        assert_eq!(per_goal["electronic circuit"]["copper plate"], 0.5);
        assert_eq!(per_goal["electronic circuit"]["iron plate"], 0.33);
    }

    #[test]
    fn test_steam_is_planned_in_boilers() {
        let catalog = builtin::catalog();
        let plan = plan(&catalog, &goals(&[("steam", 120.0)]), &FabricatorSelection::new()).unwrap();

        let steam = plan.entry("steam").unwrap();
        assert_eq!(steam.fabricator, "boiler");
        assert_eq!(steam.per_fabricator_per_minute, 3600.0);
        assert_eq!(steam.fabricators_required, 1);
        assert_eq!(steam.fuel_kw, 1800.0);

        let water = plan.entry("water").unwrap();
        assert_eq!(water.demand_per_minute, 120.0);
        assert_eq!(water.fabricator, "offshore pump");
    }

    #[rstest]
    #[case(-1.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn test_invalid_goal_rate(#[case] rate: f64) {
        let catalog = builtin::catalog();
        assert!(matches!(
            plan(&catalog, &goals(&[("pipe", rate)]), &FabricatorSelection::new()),
            Err(PlanError::InvalidRate { .. })
        ));
    }

    #[test]
    fn test_zero_rate_goal_needs_no_fabricators() {
        let catalog = builtin::catalog();
        let plan = plan(&catalog, &goals(&[("pipe", 0.0)]), &FabricatorSelection::new()).unwrap();

        assert_eq!(plan.entries().len(), 3);
        for entry in plan.entries() {
            assert_eq!(entry.fabricators_required, 0, "{}", entry.item);
            assert_eq!(entry.surplus_per_minute, 0.0);
            assert_eq!(entry.surplus_percentage, 0.0);
        }
        assert!(plan.entries()[0].is_goal);
    }

    #[test]
    fn test_goal_below_rounding_step_is_still_planned() {
        let catalog = builtin::catalog();
        let plan = plan(&catalog, &goals(&[("pipe", 0.004)]), &FabricatorSelection::new()).unwrap();

        let pipe = plan.entry("pipe").unwrap();
        assert!(pipe.is_goal);
        assert_eq!(pipe.demand_per_minute, 0.004);
        assert_eq!(pipe.fabricators_required, 1);
        assert_eq!(pipe.per_fabricator_per_minute, 60.0);
        assert_eq!(pipe.surplus_percentage, 99.99);

        // per-goal rounding leaves the ingredients at zero, but they stay listed
        let plate = plan.entry("iron plate").unwrap();
        assert_eq!(plate.demand_per_minute, 0.0);
        assert_eq!(plate.fabricators_required, 0);
        assert!(plan.entry("iron ore").is_some());
    }

    #[test]
    fn test_unknown_goal() {
        let catalog = builtin::catalog();
        assert_eq!(
            plan(&catalog, &goals(&[("warp drive", 1.0)]), &FabricatorSelection::new()).unwrap_err(),
            PlanError::UnknownItem {
                name: "warp drive".to_string()
            }
        );
    }

    #[test]
    fn test_power_producer_goal_is_rejected() {
        let catalog = Catalog::from_items([
            Item::new("electricity").made_in(MadeIn::new("power producer")),
        ]);
        assert!(matches!(
            plan(&catalog, &goals(&[("electricity", 100.0)]), &FabricatorSelection::new()),
            Err(PlanError::UnresolvedFabricator { .. })
        ));
    }

    #[test]
    fn test_negligible_throughput_is_rejected() {
        let catalog = Catalog::from_items([
            Item::new("tar").fab_time(1.0e6).made_in(MadeIn::new("furnace")),
            Item::new("stone furnace").kind("furnace").crafting_speed(1.0),
        ]);
        assert_eq!(
            plan(&catalog, &goals(&[("tar", 1.0)]), &FabricatorSelection::new()).unwrap_err(),
            PlanError::ZeroThroughput {
                item: "tar".to_string(),
                fabricator: "stone furnace".to_string(),
            }
        );
    }

    #[test]
    fn test_utility_science_with_fastest_assembler() {
        let catalog = builtin::catalog();
        let selection = FabricatorSelection::new().fastest_assembler("assembling machine 3");
        let plan = plan(&catalog, &goals(&[("utility science pack", 10.0)]), &selection).unwrap();

        let pack = plan.entry("utility science pack").unwrap();
        // 21s / 1.25 / 3 per pack
        assert_eq!(pack.per_fabricator_per_minute, 10.71);
        assert_eq!(pack.fabricators_required, 1);
        assert_eq!(pack.fabricator, "assembling machine 3");

        for entry in plan.entries() {
            assert!(entry.fabricators_required >= 1, "{}", entry.item);
        }
        assert_eq!(plan.entry("lubricant").unwrap().fabricator, "chemical plant");
        assert_eq!(plan.entry("crude oil").unwrap().fabricator, "pumpjack");
        assert!(plan.total_electric_kw() > 0.0);
    }

    proptest! {
        #[test]
        fn prop_fabricator_count_is_minimal(rate in 0.01f64..5000.0) {
            let catalog = two_item_catalog();
            let rate = round_to_2dp(rate);
            let entry = plan_entry(&catalog, "B", rate, &bench_selection()).unwrap();

            let needed = rate / entry.per_fabricator_per_minute;
            let count = entry.fabricators_required as f64;
            prop_assert!(count >= needed);
            prop_assert!(count - 1.0 < needed);
            prop_assert!(entry.surplus_per_minute >= 0.0);
            prop_assert!(entry.surplus_percentage >= 0.0);
            prop_assert!(entry.surplus_percentage < 100.0);
        }
    }
}
