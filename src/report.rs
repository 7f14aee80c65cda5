//! Plan rendering: console listing and Graphviz output

use std::collections::BTreeSet;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::models::{Item, Plan};

/// Identifier-safe short form of an item name
pub fn short_name_of(name: &str) -> String {
    let short = name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("_");

    match short.chars().next() {
        None => "item".to_string(),
        Some(c) if c.is_ascii_digit() => format!("n_{}", short),
        Some(_) => short,
    }
}

/// The item's own short name if it has one, otherwise one derived from its name
pub fn derive_short_name(item: &Item) -> String {
    item.short_name
        .clone()
        .unwrap_or_else(|| short_name_of(&item.name))
}

fn short_name_in(catalog: &Catalog, name: &str) -> String {
    catalog
        .get_recipe(name)
        .map(derive_short_name)
        .unwrap_or_else(|_| short_name_of(name))
}

/// Graphviz digraph of the plan: one node per entry, an edge from every
/// direct ingredient to the item it feeds. Goals are filled red.
///
/// Feed it to something like `neato -Tpng > plan.png`.
pub fn to_graphviz(plan: &Plan, catalog: &Catalog) -> Result<String> {
    let mut edges = BTreeSet::new();
    for entry in plan.entries() {
        for ingredient in catalog.direct_ingredient_names(&entry.item)? {
            edges.insert(format!(
                "{} -> {}",
                short_name_in(catalog, ingredient),
                entry.short_name
            ));
        }
    }

    let mut output = String::from("digraph {\n");
    output.push_str("  overlap = prism;\n");
    output.push_str("  splines = true;\n");

    for entry in plan.entries() {
        let mut options = vec![format!(
            "label=\"{}: {} x {}\"",
            entry.item,
            entry.fabricators_required,
            short_name_in(catalog, &entry.fabricator)
        )];
        if plan.is_goal(&entry.item) {
            options.push("fillcolor=\"red\"".to_string());
            options.push("style=\"filled\"".to_string());
        }
        output.push_str(&format!("  {} [{}];\n", entry.short_name, options.join(",")));
    }

    for edge in &edges {
        output.push_str(&format!("  {};\n", edge));
    }
    output.push_str("}\n");

    Ok(output)
}

/// The per-goal ingredient tables, before merging
pub fn format_goal_breakdown(plan: &Plan) -> String {
    let mut output = String::new();
    for (goal, table) in &plan.per_goal {
        output.push_str(&format!("{} @ {:.2}/min\n", goal, plan.goals[goal]));
        if table.is_empty() {
            output.push_str("  (raw material)\n");
        }
        for (ingredient, rate) in table {
            output.push_str(&format!("  needs {} @ {:.2}/min\n", ingredient, rate));
        }
    }
    output
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Fabrication Plan ===")?;
        for (goal, rate) in &self.goals {
            writeln!(f, "Goal: {} @ {:.2}/min", goal, rate)?;
        }
        writeln!(f)?;

        writeln!(f, "Fabricators required:")?;
        for entry in &self.entries {
            writeln!(
                f,
                "{} {:<28} {:>10.2}/min  {:>4} x {:<24} surplus {:.2}/min ({:.2}%)",
                if entry.is_goal { "*" } else { " " },
                entry.item,
                entry.demand_per_minute,
                entry.fabricators_required,
                entry.fabricator,
                entry.surplus_per_minute,
                entry.surplus_percentage
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Energy:")?;
        writeln!(f, "  Electric: {:.1} kW", self.total_electric_kw())?;
        writeln!(f, "  Fuel:     {:.1} kW", self.total_fuel_kw())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin;
    use crate::calculator::plan;
    use crate::models::Goals;
    use crate::rates::FabricatorSelection;
    use rstest::rstest;

    #[rstest]
    #[case("iron gear wheel", "iron_gear_wheel")]
    #[case("long-handed inserter", "long_handed_inserter")]
    #[case("Assembling Machine 3", "assembling_machine_3")]
    #[case("3d printer", "n_3d_printer")]
    #[case("--", "item")]
    fn test_short_name_of(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(short_name_of(name), expected);
    }

    #[test]
    fn test_short_name_override() {
        let item = Item::new("electronic circuit").short_name("green");
        assert_eq!(derive_short_name(&item), "green");
    }

    fn gear_plan() -> (Catalog, Plan) {
        let catalog = builtin::catalog();
        let goals: Goals = [("iron gear wheel".to_string(), 10.0)].into();
        let plan = plan(&catalog, &goals, &FabricatorSelection::new()).unwrap();
        (catalog, plan)
    }

    #[test]
    fn test_graphviz_output() {
        let (catalog, plan) = gear_plan();
        let dot = to_graphviz(&plan, &catalog).unwrap();

        assert!(dot.starts_with("digraph {\n  overlap = prism;\n  splines = true;\n"));
        assert!(dot.contains(
            "  iron_gear_wheel [label=\"iron gear wheel: 1 x assembling_machine_1\",fillcolor=\"red\",style=\"filled\"];\n"
        ));
        assert!(dot.contains("  iron_plate [label=\"iron plate: 2 x stone_furnace\"];\n"));
        assert!(dot.contains("  iron_ore -> iron_plate;\n"));
        assert!(dot.contains("  iron_plate -> iron_gear_wheel;\n"));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn test_listing_marks_goals() {
        let (_, plan) = gear_plan();
        let text = plan.to_string();

        assert!(text.starts_with("=== Fabrication Plan ===\nGoal: iron gear wheel @ 10.00/min\n"));
        let gear_line = text
            .lines()
            .find(|line| line.contains("iron gear wheel") && line.contains(" x "))
            .unwrap();
        assert!(gear_line.starts_with('*'));
        assert!(text.contains("Fuel:     180.0 kW"));
    }

    #[test]
    fn test_goal_breakdown() {
        let (_, plan) = gear_plan();
        let text = format_goal_breakdown(&plan);
        assert_eq!(
            text,
            "iron gear wheel @ 10.00/min\n  needs iron ore @ 20.00/min\n  needs iron plate @ 20.00/min\n"
        );
    }
}
