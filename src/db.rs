//! SQLite catalog storage

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::catalog::Catalog;
use crate::models::{Item, MadeIn};

/// Initialize the database schema
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- One row per catalog item; fabricator columns are NULL for plain recipes
        CREATE TABLE IF NOT EXISTS items (
            name TEXT PRIMARY KEY,
            fab_time REAL,
            batch_yield REAL,
            made_in TEXT,
            made_in_excluding TEXT,
            kind TEXT,
            crafting_speed REAL,
            yield_per_second REAL,
            electric_kw REAL,
            fuel_kw REAL,
            short_name TEXT
        );

        -- Quantity of each ingredient per batch
        CREATE TABLE IF NOT EXISTS item_ingredients (
            item_name TEXT NOT NULL,
            ingredient TEXT NOT NULL,
            quantity REAL NOT NULL,
            PRIMARY KEY (item_name, ingredient)
        );

        CREATE INDEX IF NOT EXISTS idx_item_ingredients_item ON item_ingredients(item_name);
        "#,
    )?;
    Ok(())
}

/// Insert or replace an item together with its ingredient list
pub fn upsert_item(conn: &Connection, item: &Item) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO items
             (name, fab_time, batch_yield, made_in, made_in_excluding, kind,
              crafting_speed, yield_per_second, electric_kw, fuel_kw, short_name)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        (
            &item.name,
            item.fab_time,
            item.batch_yield,
            item.made_in.as_ref().map(|m| &m.class),
            item.made_in.as_ref().and_then(|m| m.excluding.as_ref()),
            &item.kind,
            item.crafting_speed,
            item.yield_per_second,
            item.electric_kw,
            item.fuel_kw,
            &item.short_name,
        ),
    )
    .with_context(|| format!("Failed to store item '{}'", item.name))?;

    conn.execute(
        "DELETE FROM item_ingredients WHERE item_name = ?1",
        [&item.name],
    )?;
    for (ingredient, quantity) in &item.ingredients {
        conn.execute(
            "INSERT INTO item_ingredients (item_name, ingredient, quantity) VALUES (?1, ?2, ?3)",
            (&item.name, ingredient, quantity),
        )?;
    }
    Ok(())
}

/// Write every item of `catalog`, in one transaction
pub fn store_catalog(conn: &mut Connection, catalog: &Catalog) -> Result<usize> {
    let tx = conn.transaction()?;
    for item in catalog.items() {
        upsert_item(&tx, item)?;
    }
    tx.commit()?;

    tracing::debug!(items = catalog.len(), "catalog stored");
    Ok(catalog.len())
}

/// Clear all catalog data (for re-import)
pub fn clear_catalog(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        DELETE FROM item_ingredients;
        DELETE FROM items;
        "#,
    )?;
    Ok(())
}

/// Read the whole catalog back
pub fn load_catalog(conn: &Connection) -> Result<Catalog> {
    let mut stmt = conn.prepare(
        "SELECT name, fab_time, batch_yield, made_in, made_in_excluding, kind,
                crafting_speed, yield_per_second, electric_kw, fuel_kw, short_name
         FROM items",
    )?;

    let rows = stmt.query_map([], |row| {
        let made_in: Option<String> = row.get(3)?;
        let excluding: Option<String> = row.get(4)?;
        Ok(Item {
            name: row.get(0)?,
            fab_time: row.get(1)?,
            batch_yield: row.get(2)?,
            made_in: made_in.map(|class| MadeIn { class, excluding }),
            kind: row.get(5)?,
            crafting_speed: row.get(6)?,
            yield_per_second: row.get(7)?,
            electric_kw: row.get(8)?,
            fuel_kw: row.get(9)?,
            short_name: row.get(10)?,
            ..Item::default()
        })
    })?;

    let mut catalog = Catalog::new();
    for row in rows {
        let mut item = row?;
        for (ingredient, quantity) in get_ingredients(conn, &item.name)? {
            item.ingredients.insert(ingredient, quantity);
        }
        catalog.insert(item);
    }

    tracing::debug!(items = catalog.len(), "catalog loaded");
    Ok(catalog)
}

/// Ingredients of one item
pub fn get_ingredients(conn: &Connection, item_name: &str) -> Result<Vec<(String, f64)>> {
    let mut stmt = conn.prepare(
        "SELECT ingredient, quantity FROM item_ingredients WHERE item_name = ?1 ORDER BY ingredient",
    )?;

    let rows = stmt.query_map([item_name], |row| Ok((row.get(0)?, row.get(1)?)))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}

/// List all item names in the database
pub fn list_item_names(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM items ORDER BY name")?;

    let rows = stmt.query_map([], |row| row.get(0))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin;

    fn memory_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn test_builtin_catalog_round_trips() {
        let mut conn = memory_db();
        let builtin = builtin::catalog();

        assert_eq!(store_catalog(&mut conn, &builtin).unwrap(), builtin.len());
        let loaded = load_catalog(&conn).unwrap();

        assert_eq!(loaded.len(), builtin.len());
        for item in builtin.items() {
            assert_eq!(loaded.get_recipe(&item.name).unwrap(), item);
        }
    }

    #[test]
    fn test_upsert_replaces_ingredients() {
        let conn = memory_db();
        upsert_item(&conn, &Item::new("gear").ingredient("plate", 2.0).ingredient("oil", 1.0)).unwrap();
        upsert_item(&conn, &Item::new("gear").ingredient("plate", 4.0)).unwrap();

        assert_eq!(
            get_ingredients(&conn, "gear").unwrap(),
            vec![("plate".to_string(), 4.0)]
        );
        assert_eq!(list_item_names(&conn).unwrap(), vec!["gear".to_string()]);
    }

    #[test]
    fn test_clear_catalog() {
        let conn = memory_db();
        upsert_item(&conn, &Item::new("ore")).unwrap();
        clear_catalog(&conn).unwrap();

        assert!(list_item_names(&conn).unwrap().is_empty());
        assert!(load_catalog(&conn).unwrap().is_empty());
    }
}
