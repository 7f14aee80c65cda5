//! Built-in Factorio recipe dataset

use crate::catalog::Catalog;
use crate::models::{Item, MadeIn};

fn item(name: &str, fab_time: f64, ingredients: &[(&str, f64)]) -> Item {
    ingredients
        .iter()
        .fold(Item::new(name).fab_time(fab_time), |item, (ingredient, qty)| {
            item.ingredient(*ingredient, *qty)
        })
}

fn assembler() -> MadeIn {
    MadeIn::new("assembler")
}

/// Recipes that need a fluid input, so the first assembler tier is out
fn assembler_2_3() -> MadeIn {
    MadeIn::new("assembler").excluding("assembling machine 1")
}

fn furnace() -> MadeIn {
    MadeIn::new("furnace")
}

fn chemical_plant() -> MadeIn {
    MadeIn::new("chemical plant")
}

fn refinery() -> MadeIn {
    MadeIn::new("refinery")
}

fn mine() -> MadeIn {
    MadeIn::new("mine")
}

/// The full built-in catalog
pub fn catalog() -> Catalog {
    let mut items = Vec::new();
    items.extend(raw_materials());
    items.extend(logistics());
    items.extend(production());
    items.extend(intermediates());
    items.extend(science());
    items.extend(combat());
    Catalog::from_items(items)
}

fn raw_materials() -> Vec<Item> {
    vec![
        item("wood", 1.0, &[]).made_in(mine()),
        item("stone", 2.0, &[]).made_in(mine()),
        item("iron ore", 2.0, &[]).made_in(mine()),
        item("copper ore", 2.0, &[]).made_in(mine()),
        item("coal", 2.0, &[]).made_in(mine()),
        item("water", 1.0, &[])
            .batch_yield(60.0)
            .made_in(MadeIn::new("water pump")),
        item("crude oil", 1.0, &[]).made_in(MadeIn::new("oil pump")),
        item("steam", 1.0, &[("water", 1.0)]).made_in(MadeIn::new("boiler")),
    ]
}

fn logistics() -> Vec<Item> {
    vec![
        item("wooden chest", 0.5, &[("wood", 2.0)]),
        item("iron chest", 0.5, &[("iron plate", 8.0)]),
        item("steel chest", 0.5, &[("steel plate", 8.0)]),
        item("storage tank", 3.0, &[("iron plate", 20.0), ("steel plate", 5.0)]),
        item("transport belt", 0.5, &[("iron plate", 1.0), ("iron gear wheel", 1.0)]).batch_yield(2.0),
        item("fast transport belt", 3.5, &[("iron gear wheel", 5.0), ("transport belt", 1.0)]),
        item("underground belt", 1.0, &[("iron plate", 10.0), ("transport belt", 5.0)]).batch_yield(2.0),
        item("fast underground belt", 2.0, &[("iron gear wheel", 40.0), ("underground belt", 2.0)])
            .batch_yield(2.0),
        item(
            "splitter",
            1.0,
            &[("iron plate", 5.0), ("electronic circuit", 5.0), ("transport belt", 4.0)],
        ),
        item(
            "fast splitter",
            2.0,
            &[("iron gear wheel", 10.0), ("electronic circuit", 10.0), ("splitter", 1.0)],
        ),
        item("burner inserter", 0.5, &[("iron plate", 1.0), ("iron gear wheel", 1.0)]).fuel_kw(94.2),
        item(
            "inserter",
            0.5,
            &[("iron plate", 1.0), ("iron gear wheel", 1.0), ("electronic circuit", 1.0)],
        )
        .electric_kw(13.6),
        item(
            "long-handed inserter",
            0.5,
            &[("iron plate", 1.0), ("iron gear wheel", 1.0), ("inserter", 1.0)],
        )
        .electric_kw(20.11),
        item(
            "fast inserter",
            0.5,
            &[("iron plate", 2.0), ("electronic circuit", 2.0), ("inserter", 1.0)],
        )
        .electric_kw(46.7),
        item("filter inserter", 0.5, &[("electronic circuit", 4.0), ("fast inserter", 1.0)]).electric_kw(53.3),
        item(
            "stack inserter",
            0.5,
            &[
                ("iron gear wheel", 15.0),
                ("electronic circuit", 15.0),
                ("advanced circuit", 1.0),
                ("fast inserter", 1.0),
            ],
        )
        .electric_kw(133.0),
        item("stack filter inserter", 0.5, &[("electronic circuit", 5.0), ("stack inserter", 1.0)])
            .electric_kw(133.0),
        item("small electric pole", 0.5, &[("wood", 1.0), ("copper cable", 2.0)]).batch_yield(2.0),
        item(
            "medium electric pole",
            0.5,
            &[("copper plate", 2.0), ("steel plate", 2.0), ("iron stick", 4.0)],
        ),
        item(
            "big electric pole",
            0.5,
            &[("copper plate", 5.0), ("steel plate", 5.0), ("iron stick", 8.0)],
        ),
        item("pipe", 0.5, &[("iron plate", 1.0)]),
        item("pipe to ground", 0.5, &[("iron plate", 5.0), ("pipe", 10.0)]).batch_yield(2.0),
        item("pump", 2.0, &[("steel plate", 1.0), ("engine unit", 1.0), ("pipe", 1.0)]).electric_kw(30.0),
        item("rail", 0.5, &[("stone", 1.0), ("steel plate", 1.0), ("iron stick", 1.0)]).batch_yield(2.0),
        item(
            "train stop",
            0.5,
            &[
                ("iron plate", 6.0),
                ("steel plate", 3.0),
                ("iron stick", 6.0),
                ("electronic circuit", 5.0),
            ],
        ),
        item("rail signal", 0.5, &[("iron plate", 5.0), ("electronic circuit", 1.0)]),
        item("rail chain signal", 0.5, &[("iron plate", 5.0), ("electronic circuit", 1.0)]),
        item(
            "locomotive",
            4.0,
            &[("steel plate", 30.0), ("electronic circuit", 10.0), ("engine unit", 20.0)],
        )
        .fuel_kw(600.0),
        item(
            "cargo wagon",
            1.0,
            &[("iron plate", 20.0), ("steel plate", 20.0), ("iron gear wheel", 10.0)],
        ),
        item(
            "fluid wagon",
            1.5,
            &[
                ("steel plate", 16.0),
                ("iron gear wheel", 10.0),
                ("storage tank", 1.0),
                ("pipe", 8.0),
            ],
        ),
        item("car", 2.0, &[("iron plate", 20.0), ("steel plate", 5.0), ("engine unit", 8.0)]),
        item(
            "lamp",
            0.5,
            &[("iron plate", 1.0), ("copper cable", 3.0), ("electronic circuit", 1.0)],
        )
        .electric_kw(5.0),
        item("red wire", 0.5, &[("copper cable", 1.0), ("electronic circuit", 1.0)]),
        item("green wire", 0.5, &[("copper cable", 1.0), ("electronic circuit", 1.0)]),
        item("arithmetic combinator", 0.5, &[("copper cable", 5.0), ("electronic circuit", 5.0)])
            .electric_kw(1.0),
        item("decider combinator", 0.5, &[("copper cable", 5.0), ("electronic circuit", 5.0)])
            .electric_kw(1.0),
        item("constant combinator", 0.5, &[("copper cable", 5.0), ("electronic circuit", 2.0)]),
        item(
            "power switch",
            2.0,
            &[("iron plate", 5.0), ("copper cable", 5.0), ("electronic circuit", 2.0)],
        ),
        item(
            "programmable speaker",
            2.0,
            &[
                ("iron plate", 3.0),
                ("copper cable", 5.0),
                ("iron stick", 4.0),
                ("electronic circuit", 4.0),
            ],
        )
        .electric_kw(2.0),
        item("stone brick", 3.2, &[("stone", 2.0)]).made_in(furnace()),
        item(
            "concrete",
            10.0,
            &[("iron ore", 1.0), ("stone brick", 5.0), ("water", 100.0)],
        )
        .batch_yield(10.0)
        .made_in(assembler_2_3()),
        item("hazard concrete", 0.25, &[("concrete", 10.0)]).batch_yield(10.0),
        item(
            "refined concrete",
            15.0,
            &[
                ("steel plate", 1.0),
                ("iron stick", 8.0),
                ("concrete", 20.0),
                ("water", 100.0),
            ],
        )
        .batch_yield(10.0)
        .made_in(assembler_2_3()),
        item("refined hazard concrete", 0.25, &[("refined concrete", 10.0)]).batch_yield(10.0),
        item(
            "cliff explosives",
            8.0,
            &[("explosives", 10.0), ("empty barrel", 1.0), ("grenade", 1.0)],
        ),
    ]
}

fn production() -> Vec<Item> {
    vec![
        item("repair pack", 0.5, &[("iron gear wheel", 2.0), ("electronic circuit", 2.0)]),
        item("boiler", 0.5, &[("pipe", 4.0), ("stone furnace", 1.0)])
            .kind("boiler")
            .yield_per_second(60.0)
            .fuel_kw(1800.0),
        item(
            "steam engine",
            0.5,
            &[("iron plate", 10.0), ("iron gear wheel", 8.0), ("pipe", 5.0)],
        )
        .kind("power producer"),
        item(
            "solar panel",
            10.0,
            &[("copper plate", 5.0), ("steel plate", 5.0), ("electronic circuit", 15.0)],
        )
        .kind("power producer"),
        item("accumulator", 10.0, &[("iron plate", 2.0), ("battery", 5.0)]),
        item(
            "burner mining drill",
            2.0,
            &[("iron plate", 3.0), ("iron gear wheel", 3.0), ("stone furnace", 1.0)],
        )
        .kind("mine")
        .yield_per_second(0.25)
        .fuel_kw(150.0),
        item(
            "electric mining drill",
            2.0,
            &[("iron plate", 10.0), ("iron gear wheel", 5.0), ("electronic circuit", 3.0)],
        )
        .kind("mine")
        .yield_per_second(0.5)
        .electric_kw(90.0),
        item(
            "offshore pump",
            0.5,
            &[("iron gear wheel", 1.0), ("electronic circuit", 2.0), ("pipe", 1.0)],
        )
        .kind("water pump")
        .yield_per_second(1200.0),
        item(
            "pumpjack",
            5.0,
            &[
                ("steel plate", 5.0),
                ("iron gear wheel", 10.0),
                ("electronic circuit", 5.0),
                ("pipe", 10.0),
            ],
        )
        .kind("oil pump")
        .yield_per_second(1.0)
        .electric_kw(90.0),
        item("stone furnace", 0.5, &[("stone", 5.0)])
            .kind("furnace")
            .crafting_speed(1.0)
            .fuel_kw(90.0),
        item("steel furnace", 3.0, &[("steel plate", 6.0), ("stone brick", 10.0)])
            .kind("furnace")
            .crafting_speed(2.0)
            .fuel_kw(90.0),
        item(
            "electric furnace",
            5.0,
            &[("steel plate", 10.0), ("advanced circuit", 5.0), ("stone brick", 10.0)],
        )
        .kind("furnace")
        .crafting_speed(2.0)
        .electric_kw(180.0),
        item(
            "assembling machine 1",
            0.5,
            &[("iron plate", 9.0), ("iron gear wheel", 5.0), ("electronic circuit", 3.0)],
        )
        .kind("assembler")
        .crafting_speed(0.5)
        .electric_kw(77.5),
        item(
            "assembling machine 2",
            0.5,
            &[
                ("steel plate", 2.0),
                ("iron gear wheel", 5.0),
                ("electronic circuit", 3.0),
                ("assembling machine 1", 1.0),
            ],
        )
        .kind("assembler")
        .crafting_speed(0.75)
        .electric_kw(155.0),
        item(
            "assembling machine 3",
            0.5,
            &[("speed module", 4.0), ("assembling machine 2", 2.0)],
        )
        .kind("assembler")
        .crafting_speed(1.25)
        .electric_kw(388.0),
        item(
            "oil refinery",
            8.0,
            &[
                ("steel plate", 15.0),
                ("iron gear wheel", 10.0),
                ("electronic circuit", 10.0),
                ("pipe", 10.0),
                ("stone brick", 10.0),
            ],
        )
        .kind("refinery")
        .crafting_speed(1.0)
        .electric_kw(434.0),
        item(
            "chemical plant",
            5.0,
            &[
                ("steel plate", 5.0),
                ("iron gear wheel", 5.0),
                ("electronic circuit", 5.0),
                ("pipe", 5.0),
            ],
        )
        .kind("chemical plant")
        .crafting_speed(1.0)
        .electric_kw(217.0),
        item(
            "lab",
            2.0,
            &[("iron gear wheel", 10.0), ("electronic circuit", 10.0), ("transport belt", 4.0)],
        )
        .electric_kw(60.0),
        item("speed module", 15.0, &[("electronic circuit", 5.0), ("advanced circuit", 5.0)]),
        item("efficiency module", 15.0, &[("electronic circuit", 5.0), ("advanced circuit", 5.0)]),
        item("productivity module", 15.0, &[("electronic circuit", 5.0), ("advanced circuit", 5.0)]),
    ]
}

fn intermediates() -> Vec<Item> {
    vec![
        item(
            "sulfuric acid",
            1.0,
            &[("iron plate", 1.0), ("sulfur", 5.0), ("water", 100.0)],
        )
        .batch_yield(50.0)
        .made_in(chemical_plant()),
        item("petroleum gas", 5.0, &[("crude oil", 100.0)])
            .batch_yield(45.0)
            .made_in(refinery()),
        item("heavy oil", 5.0, &[("crude oil", 100.0), ("water", 50.0)])
            .batch_yield(25.0)
            .made_in(refinery()),
        item("lubricant", 1.0, &[("heavy oil", 10.0)])
            .batch_yield(10.0)
            .made_in(chemical_plant()),
        item("solid fuel", 2.0, &[("petroleum gas", 20.0)]).made_in(chemical_plant()),
        item("iron plate", 3.2, &[("iron ore", 1.0)]).made_in(furnace()),
        item("copper plate", 3.2, &[("copper ore", 1.0)]).made_in(furnace()),
        item("steel plate", 16.0, &[("iron plate", 5.0)]).made_in(furnace()),
        item("plastic bar", 1.0, &[("coal", 1.0), ("petroleum gas", 20.0)])
            .batch_yield(2.0)
            .made_in(chemical_plant()),
        item("sulfur", 1.0, &[("water", 30.0), ("petroleum gas", 30.0)])
            .batch_yield(2.0)
            .made_in(chemical_plant()),
        item(
            "battery",
            4.0,
            &[("iron plate", 1.0), ("copper plate", 1.0), ("sulfuric acid", 20.0)],
        )
        .made_in(chemical_plant()),
        item("explosives", 4.0, &[("coal", 1.0), ("sulfur", 1.0), ("water", 10.0)])
            .batch_yield(2.0)
            .made_in(chemical_plant()),
        item("copper cable", 0.5, &[("copper plate", 1.0)]).batch_yield(2.0),
        item("iron stick", 0.5, &[("iron plate", 1.0)]).batch_yield(2.0),
        item("iron gear wheel", 0.5, &[("iron plate", 2.0)]),
        item("empty barrel", 1.0, &[("steel plate", 1.0)]),
        item("electronic circuit", 0.5, &[("iron plate", 1.0), ("copper cable", 3.0)]),
        item(
            "advanced circuit",
            6.0,
            &[("plastic bar", 2.0), ("copper cable", 4.0), ("electronic circuit", 2.0)],
        ),
        item(
            "processing unit",
            10.0,
            &[
                ("electronic circuit", 20.0),
                ("advanced circuit", 2.0),
                ("sulfuric acid", 5.0),
            ],
        )
        .made_in(assembler_2_3()),
        item(
            "engine unit",
            10.0,
            &[("steel plate", 1.0), ("iron gear wheel", 1.0), ("pipe", 2.0)],
        )
        .made_in(assembler()),
        item(
            "electric engine unit",
            10.0,
            &[("engine unit", 1.0), ("lubricant", 15.0), ("electronic circuit", 2.0)],
        )
        .made_in(assembler_2_3()),
        item(
            "flying robot frame",
            20.0,
            &[
                ("electric engine unit", 1.0),
                ("battery", 2.0),
                ("steel plate", 1.0),
                ("electronic circuit", 3.0),
            ],
        ),
        item(
            "low density structure",
            20.0,
            &[("copper plate", 20.0), ("steel plate", 2.0), ("plastic bar", 5.0)],
        ),
    ]
}

fn science() -> Vec<Item> {
    vec![
        item("automation science pack", 5.0, &[("copper plate", 1.0), ("iron gear wheel", 1.0)]),
        item("logistic science pack", 6.0, &[("transport belt", 1.0), ("inserter", 1.0)]),
        item(
            "military science pack",
            10.0,
            &[("piercing rounds magazine", 1.0), ("grenade", 1.0), ("wall", 2.0)],
        )
        .batch_yield(2.0),
        item(
            "chemical science pack",
            24.0,
            &[("sulfur", 1.0), ("advanced circuit", 3.0), ("engine unit", 2.0)],
        )
        .batch_yield(2.0),
        item(
            "production science pack",
            21.0,
            &[("electric furnace", 1.0), ("productivity module", 1.0), ("rail", 30.0)],
        )
        .batch_yield(3.0),
        item(
            "utility science pack",
            21.0,
            &[
                ("low density structure", 3.0),
                ("processing unit", 2.0),
                ("flying robot frame", 1.0),
            ],
        )
        .batch_yield(3.0),
    ]
}

fn combat() -> Vec<Item> {
    vec![
        item("pistol", 5.0, &[("iron plate", 5.0), ("copper plate", 5.0)]),
        item(
            "submachine gun",
            10.0,
            &[("iron plate", 10.0), ("copper plate", 5.0), ("iron gear wheel", 10.0)],
        ),
        item(
            "shotgun",
            10.0,
            &[
                ("wood", 5.0),
                ("iron plate", 15.0),
                ("copper plate", 10.0),
                ("iron gear wheel", 5.0),
            ],
        ),
        item("firearm magazine", 1.0, &[("iron plate", 4.0)]),
        item(
            "piercing rounds magazine",
            3.0,
            &[("copper plate", 5.0), ("steel plate", 1.0), ("firearm magazine", 1.0)],
        ),
        item("shotgun shells", 3.0, &[("iron plate", 2.0), ("copper plate", 2.0)]),
        item("grenade", 8.0, &[("coal", 10.0), ("iron plate", 5.0)]),
        item(
            "defender capsule",
            8.0,
            &[
                ("iron gear wheel", 3.0),
                ("electronic circuit", 3.0),
                ("piercing rounds magazine", 3.0),
            ],
        ),
        item("light armor", 3.0, &[("iron plate", 40.0)]),
        item("heavy armor", 8.0, &[("copper plate", 100.0), ("steel plate", 50.0)]),
        item("modular armor", 15.0, &[("steel plate", 50.0), ("advanced circuit", 30.0)]),
        item("wall", 0.5, &[("stone brick", 5.0)]),
        item(
            "gate",
            0.5,
            &[("steel plate", 2.0), ("electronic circuit", 2.0), ("wall", 1.0)],
        ),
        item(
            "gun turret",
            8.0,
            &[("iron plate", 20.0), ("copper plate", 10.0), ("iron gear wheel", 10.0)],
        ),
        item(
            "radar",
            0.5,
            &[("iron plate", 10.0), ("iron gear wheel", 5.0), ("electronic circuit", 5.0)],
        )
        .electric_kw(300.0),
    ]
}
