//! # Catalog Commands
//!
//! One function per CLI subcommand. Each returns the text to print so the
//! same code serves the one-shot commands, the shell, and the tests.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stockroom add "Widget" 10                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  commands::add(store, "Widget", "10", format)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogStore::insert_from_input  ← quantity text coerced here         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  "Added #1 Widget (qty 10)"  or  {"id":1,"name":"Widget",...}          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

use crate::error::CliResult;
use crate::view::render_table;
use stockroom_core::Product;
use stockroom_db::CatalogStore;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn products_output(products: &[Product], format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Text => Ok(render_table(products)),
        OutputFormat::Json => to_json(products),
    }
}

/// `add <name> [quantity]`
pub async fn add(
    store: &CatalogStore,
    name: &str,
    quantity_text: &str,
    format: OutputFormat,
) -> CliResult<String> {
    let product = store.insert_from_input(name, quantity_text).await?;

    match format {
        OutputFormat::Text => Ok(format!("Added {}", product)),
        OutputFormat::Json => to_json(&product),
    }
}

/// `find <text>`
pub async fn find(store: &CatalogStore, text: &str, format: OutputFormat) -> CliResult<String> {
    let hits = store.find_by_name(text).await?;
    debug!(text = %text, hits = hits.len(), "find command");
    products_output(&hits, format)
}

#[derive(Debug, Serialize)]
struct DeleteSummary<'a> {
    name: &'a str,
    removed: u64,
}

/// `delete <name>`
///
/// The argument is trimmed like a typed name; the store then matches it
/// exactly.
pub async fn delete(store: &CatalogStore, name: &str, format: OutputFormat) -> CliResult<String> {
    let name = name.trim();
    let removed = store.delete_by_name(name).await?;

    match format {
        OutputFormat::Text => Ok(format!("Removed {} product(s) named '{}'", removed, name)),
        OutputFormat::Json => to_json(&DeleteSummary { name, removed }),
    }
}

/// `list`
pub async fn list(store: &CatalogStore, format: OutputFormat) -> CliResult<String> {
    let products = store.list_all().await?;
    products_output(&products, format)
}

/// `show <id>`
pub async fn show(store: &CatalogStore, id: i64, format: OutputFormat) -> CliResult<String> {
    let product = store.get(id).await?;

    match format {
        OutputFormat::Text => Ok(product.to_string()),
        OutputFormat::Json => to_json(&product),
    }
}

/// Names used by `seed`.
const SEED_NAMES: &[&str] = &[
    "Widget",
    "Gadget",
    "Sprocket",
    "Flange",
    "Gasket",
    "Bracket",
    "Hinge",
    "Spring",
    "Washer",
    "Bearing",
];

/// `seed [--count N]`
///
/// Populates an empty catalog with demo rows. A catalog that already has
/// products is left alone so repeated runs don't pile up duplicates.
pub async fn seed(store: &CatalogStore, count: usize) -> CliResult<String> {
    let existing = store.count().await?;
    if existing > 0 {
        return Ok(format!(
            "Catalog already has {} product(s); skipping seed",
            existing
        ));
    }

    for i in 0..count {
        let base = SEED_NAMES[i % SEED_NAMES.len()];
        let name = match i / SEED_NAMES.len() {
            0 => base.to_string(),
            round => format!("{} Mk{}", base, round + 1),
        };
        let quantity = ((i * 37) % 101) as i64;

        store.insert(&name, quantity).await?;
    }

    info!(count, "Seed complete");
    Ok(format!("Seeded {} product(s)", count))
}

#[derive(Debug, Serialize)]
struct StatusReport {
    database: String,
    healthy: bool,
    products: i64,
    migrations_total: usize,
    migrations_applied: usize,
}

/// `status`
pub async fn status(
    store: &CatalogStore,
    database_path: &Path,
    format: OutputFormat,
) -> CliResult<String> {
    let db = store.database();
    let healthy = db.health_check().await;
    let (migrations_total, migrations_applied) = db.migration_status().await?;

    let report = StatusReport {
        database: database_path.display().to_string(),
        healthy,
        products: store.count().await?,
        migrations_total,
        migrations_applied,
    };

    match format {
        OutputFormat::Text => Ok(format!(
            "Database:   {}\nHealthy:    {}\nProducts:   {}\nMigrations: {}/{}",
            report.database,
            if report.healthy { "yes" } else { "no" },
            report.products,
            report.migrations_applied,
            report.migrations_total
        )),
        OutputFormat::Json => to_json(&report),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use stockroom_db::{Database, DbConfig, DbError};

    async fn store() -> CatalogStore {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        CatalogStore::open(db).await.unwrap()
    }

    #[tokio::test]
    async fn test_add_coerces_bad_quantity() {
        let store = store().await;

        let out = add(&store, "Widget", "lots", OutputFormat::Text).await.unwrap();
        assert_eq!(out, "Added #1 Widget (qty 0)");
    }

    #[tokio::test]
    async fn test_add_empty_name_is_validation_error() {
        let store = store().await;

        let err = add(&store, "", "3", OutputFormat::Text).await.unwrap_err();
        assert!(matches!(err, CliError::Db(DbError::Validation(_))));
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn test_find_delete_list_text() {
        let store = store().await;
        add(&store, "Widget", "10", OutputFormat::Text).await.unwrap();
        add(&store, "Gadget", "5", OutputFormat::Text).await.unwrap();

        let found = find(&store, "Widget", OutputFormat::Text).await.unwrap();
        assert!(found.contains("Widget"));
        assert!(!found.contains("Gadget"));

        let removed = delete(&store, " Widget ", OutputFormat::Text).await.unwrap();
        assert_eq!(removed, "Removed 1 product(s) named 'Widget'");

        let listed = list(&store, OutputFormat::Text).await.unwrap();
        assert!(listed.contains("Gadget"));
        assert!(!listed.contains("Widget"));
    }

    #[tokio::test]
    async fn test_json_output() {
        let store = store().await;
        add(&store, "Widget", "10", OutputFormat::Text).await.unwrap();

        let listed = list(&store, OutputFormat::Json).await.unwrap();
        let parsed: Vec<Product> = serde_json::from_str(&listed).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].quantity, 10);

        let removed = delete(&store, "Nothing", OutputFormat::Json).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&removed).unwrap();
        assert_eq!(value["removed"], 0);
    }

    #[tokio::test]
    async fn test_show_missing_product() {
        let store = store().await;
        let err = show(&store, 5, OutputFormat::Text).await.unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[tokio::test]
    async fn test_seed_only_fills_empty_catalog() {
        let store = store().await;

        assert_eq!(seed(&store, 12).await.unwrap(), "Seeded 12 product(s)");
        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 12);
        assert_eq!(all[10].name, "Widget Mk2");

        let again = seed(&store, 12).await.unwrap();
        assert!(again.contains("skipping"));
        assert_eq!(store.count().await.unwrap(), 12);
    }

    #[tokio::test]
    async fn test_status_report() {
        let store = store().await;
        let out = status(&store, Path::new(":memory:"), OutputFormat::Text)
            .await
            .unwrap();

        assert!(out.contains("Healthy:    yes"));
        assert!(out.contains("Products:   0"));
    }
}
