//! Data models for catalog items and fabrication plans

use std::collections::BTreeMap;

/// Item name → units per minute (or per output unit, inside the resolver)
pub type DemandTable = BTreeMap<String, f64>;

/// Item name → desired sustained output rate in units per minute
pub type Goals = BTreeMap<String, f64>;

/// Class used for items without `made_in` and with ingredients
pub const IMPLICIT_CLASS: &str = "assembler";

/// Class used for items without `made_in` and without ingredients
pub const RAW_ELEMENT: &str = "raw element";

/// Where an item is fabricated
#[derive(Debug, Clone, PartialEq)]
pub struct MadeIn {
    pub class: String,
    /// A fabricator of `class` that cannot make this item
    pub excluding: Option<String>,
}

impl MadeIn {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            excluding: None,
        }
    }

    pub fn excluding(mut self, fabricator: impl Into<String>) -> Self {
        self.excluding = Some(fabricator.into());
        self
    }
}

/// A catalog entry. Regular recipe items only use the recipe half; fabricators
/// additionally carry `kind` and their speed/throughput/energy figures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Item {
    pub name: String,
    /// Quantity per batch
    pub ingredients: BTreeMap<String, f64>,
    pub fab_time: Option<f64>,
    pub batch_yield: Option<f64>,
    pub made_in: Option<MadeIn>,

    /// Class this item belongs to when it is placed as a fabricator
    pub kind: Option<String>,
    pub crafting_speed: Option<f64>,
    pub yield_per_second: Option<f64>,
    pub electric_kw: Option<f64>,
    pub fuel_kw: Option<f64>,

    pub short_name: Option<String>,
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn ingredient(mut self, name: impl Into<String>, quantity: f64) -> Self {
        self.ingredients.insert(name.into(), quantity);
        self
    }

    pub fn fab_time(mut self, seconds: f64) -> Self {
        self.fab_time = Some(seconds);
        self
    }

    pub fn batch_yield(mut self, units: f64) -> Self {
        self.batch_yield = Some(units);
        self
    }

    pub fn made_in(mut self, made_in: MadeIn) -> Self {
        self.made_in = Some(made_in);
        self
    }

    pub fn kind(mut self, class: impl Into<String>) -> Self {
        self.kind = Some(class.into());
        self
    }

    pub fn crafting_speed(mut self, speed: f64) -> Self {
        self.crafting_speed = Some(speed);
        self
    }

    pub fn yield_per_second(mut self, rate: f64) -> Self {
        self.yield_per_second = Some(rate);
        self
    }

    pub fn electric_kw(mut self, kw: f64) -> Self {
        self.electric_kw = Some(kw);
        self
    }

    pub fn fuel_kw(mut self, kw: f64) -> Self {
        self.fuel_kw = Some(kw);
        self
    }

    pub fn short_name(mut self, short: impl Into<String>) -> Self {
        self.short_name = Some(short.into());
        self
    }

    pub fn is_raw(&self) -> bool {
        self.ingredients.is_empty()
    }

    pub fn recipe_yield(&self) -> f64 {
        self.batch_yield.unwrap_or(1.0)
    }

    pub fn recipe_fab_time(&self) -> f64 {
        self.fab_time.unwrap_or(1.0)
    }

    /// Fabricator class that makes this item, falling back to the implicit one
    pub fn fabricator_class(&self) -> &str {
        match &self.made_in {
            Some(made_in) => &made_in.class,
            None if self.is_raw() => RAW_ELEMENT,
            None => IMPLICIT_CLASS,
        }
    }
}

/// Speed figures of an item acting as a fabricator
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FabricatorStats {
    pub speed_multiplier: Option<f64>,
    pub yield_per_second: Option<f64>,
}

/// One line of a fabrication plan
#[derive(Debug, Clone, PartialEq)]
pub struct PlanEntry {
    pub item: String,
    pub short_name: String,
    pub demand_per_minute: f64,
    pub fabricators_required: u64,
    pub fabricator: String,
    /// Throughput of a single fabricator
    pub per_fabricator_per_minute: f64,
    pub surplus_per_minute: f64,
    pub surplus_percentage: f64,
    pub electric_kw: f64,
    pub fuel_kw: f64,
    pub is_goal: bool,
}

/// Result of a planning call
#[derive(Debug, Clone)]
pub struct Plan {
    pub goals: Goals,
    /// Scaled and rounded ingredient table of each goal, before merging
    pub per_goal: BTreeMap<String, DemandTable>,
    pub entries: Vec<PlanEntry>,
}

impl Plan {
    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    pub fn is_goal(&self, item: &str) -> bool {
        self.goals.contains_key(item)
    }

    pub fn total_electric_kw(&self) -> f64 {
        self.entries.iter().map(|e| e.electric_kw).sum()
    }

    pub fn total_fuel_kw(&self) -> f64 {
        self.entries.iter().map(|e| e.fuel_kw).sum()
    }
}

#[cfg(test)]
impl Plan {
    pub fn entry(&self, item: &str) -> Option<&PlanEntry> {
        self.entries.iter().find(|e| e.item == item)
    }
}
