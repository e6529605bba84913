//! # Product Repository
//!
//! SQL for the `products` table. No change notification happens here;
//! that is the catalog store's job.
//!
//! ## Matching Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Name Matching                                        │
//! │                                                                         │
//! │  Rows:  #1 Widget   #2 Gadget   #3 Blue Widget   #4 widget             │
//! │                                                                         │
//! │  find_by_name("Widget")    instr(name, ?) > 0   → [#1, #3]             │
//! │  delete_by_name("Widget")  name = ?             → removes #1 only      │
//! │                                                                         │
//! │  Both are case-sensitive. Results are always ORDER BY id.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `instr` is used instead of `LIKE` so that `%` and `_` in user input are
//! matched literally and case is not folded.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use stockroom_core::{NewProduct, Product};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let widget = repo.insert(&NewProduct::new("Widget", 10)?).await?;
/// let hits = repo.find_by_name("Wid").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product and returns it with its assigned id.
    pub async fn insert(&self, product: &NewProduct) -> DbResult<Product> {
        debug!(name = %product.name, quantity = product.quantity, "Inserting product");

        let result = sqlx::query("INSERT INTO products (name, quantity) VALUES (?1, ?2)")
            .bind(&product.name)
            .bind(product.quantity)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        debug!(id, "Product inserted");

        Ok(Product {
            id,
            name: product.name.clone(),
            quantity: product.quantity,
        })
    }

    /// Deletes every product whose name equals `name` exactly.
    ///
    /// ## Returns
    /// Number of rows removed. Zero is not an error.
    pub async fn delete_by_name(&self, name: &str) -> DbResult<u64> {
        debug!(name = %name, "Deleting products by name");

        let result = sqlx::query("DELETE FROM products WHERE name = ?1")
            .bind(name)
            .execute(&self.pool)
            .await?;

        let removed = result.rows_affected();
        debug!(removed, "Delete complete");
        Ok(removed)
    }

    /// Finds products whose name contains `text`, in ascending id order.
    ///
    /// An empty `text` matches every row.
    pub async fn find_by_name(&self, text: &str) -> DbResult<Vec<Product>> {
        debug!(text = %text, "Searching products");

        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, quantity
            FROM products
            WHERE instr(name, ?1) > 0
            ORDER BY id
            "#,
        )
        .bind(text)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    /// Lists every product in ascending id order.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let products =
            sqlx::query_as::<_, Product>("SELECT id, name, quantity FROM products ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(products)
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product =
            sqlx::query_as::<_, Product>("SELECT id, name, quantity FROM products WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(product)
    }

    /// Counts products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    async fn repo() -> ProductRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().products()
    }

    fn new_product(name: &str, quantity: i64) -> NewProduct {
        NewProduct::new(name, quantity).unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let repo = repo().await;

        let a = repo.insert(&new_product("Widget", 10)).await.unwrap();
        let b = repo.insert(&new_product("Gadget", 5)).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(repo.get_by_id(2).await.unwrap(), Some(b));
        assert_eq!(repo.get_by_id(99).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let repo = repo().await;

        repo.insert(&new_product("Widget", 1)).await.unwrap();
        let last = repo.insert(&new_product("Gadget", 1)).await.unwrap();
        repo.delete_by_name("Gadget").await.unwrap();

        let next = repo.insert(&new_product("Sprocket", 1)).await.unwrap();
        assert!(next.id > last.id);
    }

    #[tokio::test]
    async fn test_delete_by_name_is_exact() {
        let repo = repo().await;

        repo.insert(&new_product("Widget", 1)).await.unwrap();
        repo.insert(&new_product("Blue Widget", 2)).await.unwrap();
        repo.insert(&new_product("Widget", 3)).await.unwrap();
        repo.insert(&new_product("widget", 4)).await.unwrap();

        assert_eq!(repo.delete_by_name("Widget").await.unwrap(), 2);
        assert_eq!(repo.delete_by_name("Widget").await.unwrap(), 0);

        let names: Vec<String> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Blue Widget", "widget"]);
    }

    #[tokio::test]
    async fn test_find_by_name_substring_in_id_order() {
        let repo = repo().await;

        repo.insert(&new_product("Widget", 1)).await.unwrap();
        repo.insert(&new_product("Gadget", 2)).await.unwrap();
        repo.insert(&new_product("Blue Widget", 3)).await.unwrap();

        let ids: Vec<i64> = repo
            .find_by_name("idge")
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);

        assert!(repo.find_by_name("Sprocket").await.unwrap().is_empty());
        assert!(repo.find_by_name("widget").await.unwrap().is_empty());
        assert_eq!(repo.find_by_name("").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_find_by_name_treats_wildcards_literally() {
        let repo = repo().await;

        repo.insert(&new_product("100% Cotton", 1)).await.unwrap();
        repo.insert(&new_product("Cotton", 1)).await.unwrap();

        let hits = repo.find_by_name("%").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "100% Cotton");
        assert!(repo.find_by_name("_").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_schema_rejects_negative_quantity() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let result = sqlx::query("INSERT INTO products (name, quantity) VALUES ('Widget', -1)")
            .execute(db.pool())
            .await;
        assert!(result.is_err());
        assert_eq!(db.products().count().await.unwrap(), 0);
    }
}
