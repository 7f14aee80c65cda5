//! Recipe definition file import
//!
//! Walks a directory for `*.recipes` files. Each non-comment line defines one
//! item:
//!
//! ```text
//! # name [xYIELD] [= QTY INGREDIENT, ...] [; key=value ...]
//! iron plate = 1 iron ore; time=3.2; made_in=furnace
//! copper cable x2 = 1 copper plate; time=0.5
//! iron ore; time=2; made_in=mine
//! assembling machine 2 = 2 steel plate, 1 assembling machine 1; kind=assembler; speed=0.75
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use regex::Regex;
use rusqlite::Connection;
use walkdir::WalkDir;

use crate::db;
use crate::models::{Item, MadeIn};

/// Compiled line grammar, built once per import
struct RecipeSyntax {
    line: Regex,
    ingredient: Regex,
    property: Regex,
}

impl RecipeSyntax {
    fn new() -> Result<Self> {
        Ok(Self {
            // name, optional "xN" yield, optional "= ingredients", optional "; props"
            line: Regex::new(
                r"^(?P<name>[^=;]+?)(?:\s+x(?P<yield>[\d.]+))?\s*(?:=(?P<ingredients>[^;]*))?(?:;(?P<props>.*))?$",
            )?,
            ingredient: Regex::new(r"^\s*(?P<qty>[\d.]+)\s+(?P<name>.+?)\s*$")?,
            property: Regex::new(r"^\s*(?P<key>\w+)\s*=\s*(?P<value>.+?)\s*$")?,
        })
    }

    fn parse_line(&self, line: &str) -> Result<Option<Item>> {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            return Ok(None);
        }

        let cap = self
            .line
            .captures(line)
            .ok_or_else(|| anyhow!("unrecognised recipe line: {}", line))?;

        let mut item = Item::new(cap["name"].trim());
        if let Some(batch_yield) = cap.name("yield") {
            item = item.batch_yield(parse_number("yield", batch_yield.as_str())?);
        }

        if let Some(ingredients) = cap.name("ingredients") {
            for part in ingredients.as_str().split(',').filter(|p| !p.trim().is_empty()) {
                let ing = self
                    .ingredient
                    .captures(part)
                    .ok_or_else(|| anyhow!("bad ingredient '{}' in '{}'", part.trim(), item.name))?;
                item = item.ingredient(ing["name"].to_string(), parse_number("quantity", &ing["qty"])?);
            }
        }

        if let Some(props) = cap.name("props") {
            for part in props.as_str().split(';').filter(|p| !p.trim().is_empty()) {
                let prop = self
                    .property
                    .captures(part)
                    .ok_or_else(|| anyhow!("bad property '{}' in '{}'", part.trim(), item.name))?;
                item = apply_property(item, &prop["key"], &prop["value"])?;
            }
        }

        Ok(Some(item))
    }
}

fn parse_number(what: &str, text: &str) -> Result<f64> {
    let value: f64 = text
        .parse()
        .with_context(|| format!("invalid {}: {}", what, text))?;
    if !value.is_finite() || value <= 0.0 {
        bail!("{} must be positive, got {}", what, text);
    }
    Ok(value)
}

fn apply_property(item: Item, key: &str, value: &str) -> Result<Item> {
    let item = match key {
        "time" => item.fab_time(parse_number(key, value)?),
        "made_in" => {
            let excluding = item.made_in.as_ref().and_then(|m| m.excluding.clone());
            Item {
                made_in: Some(MadeIn {
                    class: value.to_string(),
                    excluding,
                }),
                ..item
            }
        }
        "excluding" => {
            let class = item
                .made_in
                .as_ref()
                .map(|m| m.class.clone())
                .ok_or_else(|| anyhow!("'excluding' needs 'made_in' first in '{}'", item.name))?;
            item.made_in(MadeIn::new(class).excluding(value))
        }
        "kind" => item.kind(value),
        "speed" => item.crafting_speed(parse_number(key, value)?),
        "rate" => item.yield_per_second(parse_number(key, value)?),
        "electric" => item.electric_kw(parse_number(key, value)?),
        "fuel" => item.fuel_kw(parse_number(key, value)?),
        "short" => item.short_name(value),
        other => bail!("unknown property '{}' in '{}'", other, item.name),
    };
    Ok(item)
}

/// Find all recipe definition files below `source_dir`
pub fn find_recipe_files(source_dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(source_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "recipes"))
        .collect();
    files.sort();
    files
}

fn parse_recipe_file(syntax: &RecipeSyntax, filepath: &Path) -> Result<Vec<Item>> {
    let content = fs::read_to_string(filepath)
        .with_context(|| format!("Failed to read {}", filepath.display()))?;

    let mut items = Vec::new();
    for (number, line) in content.lines().enumerate() {
        if let Some(item) = syntax
            .parse_line(line)
            .with_context(|| format!("{}:{}", filepath.display(), number + 1))?
        {
            items.push(item);
        }
    }
    Ok(items)
}

/// Import every recipe file under `source_dir` into the database
pub fn import_to_database(conn: &Connection, source_dir: &Path) -> Result<ImportStats> {
    let syntax = RecipeSyntax::new()?;
    let mut stats = ImportStats::default();

    println!("Scanning {} for recipe files...", source_dir.display());
    let files = find_recipe_files(source_dir);
    println!("Found {} recipe files", files.len());

    for filepath in &files {
        match parse_recipe_file(&syntax, filepath) {
            Ok(items) => {
                for item in &items {
                    db::upsert_item(conn, item)?;
                    stats.ingredients += item.ingredients.len();
                }
                stats.items += items.len();
                stats.files += 1;
                println!("  Parsed: {} ({} items)", filepath.display(), items.len());
            }
            Err(e) => {
                tracing::warn!(file = %filepath.display(), "recipe file skipped: {:#}", e);
                eprintln!("  Error parsing {}: {:#}", filepath.display(), e);
                stats.errors += 1;
            }
        }
    }

    Ok(stats)
}

#[derive(Debug, Default)]
pub struct ImportStats {
    pub files: usize,
    pub items: usize,
    pub ingredients: usize,
    pub errors: usize,
}

impl std::fmt::Display for ImportStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Imported {} items ({} ingredients) from {} files. Errors: {}",
            self.items, self.ingredients, self.files, self.errors
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Option<Item>> {
        RecipeSyntax::new().unwrap().parse_line(line)
    }

    #[test]
    fn test_parse_recipe_with_yield_and_class() {
        let item = parse("copper cable x2 = 1 copper plate; time=0.5; made_in=assembler")
            .unwrap()
            .unwrap();

        assert_eq!(item.name, "copper cable");
        assert_eq!(item.batch_yield, Some(2.0));
        assert_eq!(item.fab_time, Some(0.5));
        assert_eq!(item.ingredients["copper plate"], 1.0);
        assert_eq!(item.made_in, Some(MadeIn::new("assembler")));
    }

    #[test]
    fn test_parse_raw_material_and_fabricator() {
        let ore = parse("iron ore; time=2; made_in=mine").unwrap().unwrap();
        assert!(ore.is_raw());
        assert_eq!(ore.fabricator_class(), "mine");

        let drill = parse("electric mining drill = 10 iron plate, 5 iron gear wheel; kind=mine; rate=0.5; electric=90")
            .unwrap()
            .unwrap();
        assert_eq!(drill.ingredients.len(), 2);
        assert_eq!(drill.kind.as_deref(), Some("mine"));
        assert_eq!(drill.yield_per_second, Some(0.5));
        assert_eq!(drill.electric_kw, Some(90.0));
    }

    #[test]
    fn test_parse_excluding_and_short_name() {
        let item = parse("concrete x10 = 5 stone brick, 100 water; made_in=assembler; excluding=assembling machine 1; short=crete")
            .unwrap()
            .unwrap();
        assert_eq!(
            item.made_in,
            Some(MadeIn::new("assembler").excluding("assembling machine 1"))
        );
        assert_eq!(item.short_name.as_deref(), Some("crete"));
    }

    #[test]
    fn test_comments_and_blank_lines() {
        assert!(parse("   ").unwrap().is_none());
        assert!(parse("# just a comment").unwrap().is_none());
        let item = parse("pipe = 1 iron plate # trailing").unwrap().unwrap();
        assert_eq!(item.name, "pipe");
    }

    #[test]
    fn test_rejects_bad_lines() {
        assert!(parse("gear = two iron plate").is_err());
        assert!(parse("gear = 2 iron plate; colour=blue").is_err());
        assert!(parse("gear = 0 iron plate").is_err());
        assert!(parse("gear; excluding=assembling machine 1").is_err());
    }

    #[test]
    fn test_import_directory() {
        let dir = std::env::temp_dir().join(format!("fab-planner-import-{}", std::process::id()));
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(
            dir.join("base.recipes"),
            "iron ore; made_in=mine\niron plate = 1 iron ore; time=3.2; made_in=furnace\n",
        )
        .unwrap();
        fs::write(dir.join("nested/gears.recipes"), "iron gear wheel = 2 iron plate; time=0.5\n").unwrap();
        fs::write(dir.join("broken.recipes"), "gear = lots of plate\n").unwrap();
        fs::write(dir.join("notes.txt"), "not a recipe file\n").unwrap();

        let conn = Connection::open_in_memory().unwrap();
        db::init_schema(&conn).unwrap();
        let stats = import_to_database(&conn, &dir).unwrap();
        fs::remove_dir_all(&dir).unwrap();

        assert_eq!(stats.files, 2);
        assert_eq!(stats.items, 3);
        assert_eq!(stats.ingredients, 2);
        assert_eq!(stats.errors, 1);

        let catalog = db::load_catalog(&conn).unwrap();
        assert_eq!(catalog.validate(), Ok(()));
        assert_eq!(catalog.get_recipe("iron gear wheel").unwrap().ingredients["iron plate"], 2.0);
    }
}
