//! # Product Repository
//!
//! Database operations for the menu catalog.
//!
//! Products are managed by the admin back-office and read by the cashier
//! screen. Orders copy the name and price into their lines at checkout, so
//! edits here never rewrite history. Deletion is soft: `is_active = 0`
//! hides a product from the menu while past orders keep referencing it.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use kedai_core::{Category, Product};

use crate::error::{DbError, DbResult};

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct SqliteProductRepository {
    pool: SqlitePool,
}

const PRODUCT_COLUMNS: &str =
    "id, name, description, category, price, image_url, is_active, created_at, updated_at";

impl SqliteProductRepository {
    /// Creates a new repository over the shared pool.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteProductRepository { pool }
    }

    /// Inserts a new product.
    ///
    /// ## Errors
    /// - `DbError::UniqueViolation` - duplicate id
    pub async fn insert(&self, product: &Product) -> DbResult<Product> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, description, category, price,
                image_url, is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.category)
        .bind(product.price)
        .bind(&product.image_url)
        .bind(product.is_active)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(product.clone())
    }

    /// Gets a product by its ID. `Ok(None)` when absent.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists active products sorted by name, the cashier menu view.
    pub async fn list_active(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE is_active = 1 ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Lists active products in one category, sorted by name.
    pub async fn list_by_category(&self, category: Category) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE is_active = 1 AND category = ?1 ORDER BY name"
        ))
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Updates an existing product's editable fields.
    ///
    /// ## Errors
    /// - `DbError::NotFound` - no product with that id
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                description = ?3,
                category = ?4,
                price = ?5,
                image_url = ?6,
                is_active = ?7,
                updated_at = ?8
            WHERE id = ?1
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.category)
        .bind(product.price)
        .bind(&product.image_url)
        .bind(product.is_active)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }

        Ok(())
    }

    /// Soft-deletes a product. Historical order lines keep their snapshots.
    pub async fn soft_delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Soft-deleting product");

        let now = Utc::now();

        let result = sqlx::query("UPDATE products SET is_active = 0, updated_at = ?2 WHERE id = ?1")
            .bind(id)
            .bind(now)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts active products (for diagnostics).
    pub async fn count_active(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE is_active = 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new product ID.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn test_product(name: &str, category: Category, price: i64) -> Product {
        let now = Utc::now();
        Product {
            id: generate_product_id(),
            name: name.to_string(),
            description: None,
            category,
            price,
            image_url: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let product = test_product("Espresso", Category::Coffee, 20_000);
        repo.insert(&product).await.unwrap();

        let stored = repo.get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Espresso");
        assert_eq!(stored.category, Category::Coffee);
        assert_eq!(stored.price, 20_000);
        assert!(stored.is_active);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let found = db.products().get_by_id("nope").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_list_active_sorted_and_filtered() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        repo.insert(&test_product("Latte", Category::Coffee, 28_000))
            .await
            .unwrap();
        repo.insert(&test_product("Croissant", Category::Pastry, 18_000))
            .await
            .unwrap();
        let retired = test_product("Americano", Category::Coffee, 22_000);
        repo.insert(&retired).await.unwrap();
        repo.soft_delete(&retired.id).await.unwrap();

        let active = repo.list_active().await.unwrap();
        let names: Vec<&str> = active.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Croissant", "Latte"]);
    }

    #[tokio::test]
    async fn test_list_by_category() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        repo.insert(&test_product("Latte", Category::Coffee, 28_000))
            .await
            .unwrap();
        repo.insert(&test_product("Croissant", Category::Pastry, 18_000))
            .await
            .unwrap();

        let pastries = repo.list_by_category(Category::Pastry).await.unwrap();
        assert_eq!(pastries.len(), 1);
        assert_eq!(pastries[0].name, "Croissant");
    }

    #[tokio::test]
    async fn test_update_price_leaves_order_lines_alone() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let mut product = test_product("Espresso", Category::Coffee, 20_000);
        repo.insert(&product).await.unwrap();

        product.price = 25_000;
        repo.update(&product).await.unwrap();

        let stored = repo.get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(stored.price, 25_000);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = test_product("Ghost", Category::Snack, 5_000);
        let err = db.products().update(&product).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_count_active() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        repo.insert(&test_product("Latte", Category::Coffee, 28_000))
            .await
            .unwrap();
        assert_eq!(repo.count_active().await.unwrap(), 1);
    }
}
