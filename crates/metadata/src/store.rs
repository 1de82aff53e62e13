//! Metadata store trait and the SQLite implementation.

use crate::error::{MetadataError, MetadataResult};
use crate::repos::{
    CarouselRepo, CategoryRepo, LeadRepo, OrderRepo, ProductRepo, SettingsRepo, VariantRepo,
};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Combined metadata store trait.
#[async_trait]
pub trait MetadataStore:
    ProductRepo
    + VariantRepo
    + CategoryRepo
    + OrderRepo
    + LeadRepo
    + SettingsRepo
    + CarouselRepo
    + Send
    + Sync
{
    /// Run database migrations.
    async fn migrate(&self) -> MetadataResult<()>;

    /// Check database connectivity and health.
    async fn health_check(&self) -> MetadataResult<()>;
}

/// SQLite-based metadata store.
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    /// Create a new SQLite store and run migrations.
    pub async fn new(path: impl AsRef<Path>) -> MetadataResult<Self> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}?mode=rwc", path.display()))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .foreign_keys(true)
            // Prevent transient "database is locked" errors under concurrent access.
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            // SQLite permits limited write concurrency; a single connection avoids
            // persistent "database is locked" failures under axum concurrency.
            .max_connections(1)
            .connect_with(opts)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

#[async_trait]
impl MetadataStore for SqliteStore {
    async fn migrate(&self) -> MetadataResult<()> {
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    async fn health_check(&self) -> MetadataResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Map an insert error to `AlreadyExists` on unique-constraint violations.
pub(crate) fn map_insert_error(e: sqlx::Error, what: &str) -> MetadataError {
    match &e {
        sqlx::Error::Database(db) if db.kind() == sqlx::error::ErrorKind::UniqueViolation => {
            MetadataError::AlreadyExists(what.to_string())
        }
        _ => MetadataError::Database(e),
    }
}

// Implement all the repository traits for SqliteStore
mod sqlite_impl {
    use super::*;
    use crate::models::*;
    use crate::repos::leads::LeadCounts;
    use crate::repos::orders::SalesSummary;
    use crate::repos::products::ProductFilter;
    use time::OffsetDateTime;
    use uuid::Uuid;

    #[async_trait]
    impl ProductRepo for SqliteStore {
        async fn create_product(&self, product: &ProductRow) -> MetadataResult<()> {
            sqlx::query(
                r#"
                INSERT INTO products (
                    product_id, title, title_ar, description, description_ar, sku,
                    category_slug, price, compare_at_price, stock, status,
                    images_json, benefits_json, size_guide, sales_count,
                    created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(product.product_id)
            .bind(&product.title)
            .bind(&product.title_ar)
            .bind(&product.description)
            .bind(&product.description_ar)
            .bind(&product.sku)
            .bind(&product.category_slug)
            .bind(product.price)
            .bind(product.compare_at_price)
            .bind(product.stock)
            .bind(&product.status)
            .bind(&product.images_json)
            .bind(&product.benefits_json)
            .bind(&product.size_guide)
            .bind(product.sales_count)
            .bind(product.created_at)
            .bind(product.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_insert_error(e, &format!("product sku '{}'", product.sku)))?;
            Ok(())
        }

        async fn get_product(&self, product_id: Uuid) -> MetadataResult<Option<ProductRow>> {
            let row =
                sqlx::query_as::<_, ProductRow>("SELECT * FROM products WHERE product_id = ?")
                    .bind(product_id)
                    .fetch_optional(&self.pool)
                    .await?;
            Ok(row)
        }

        async fn get_product_by_sku(&self, sku: &str) -> MetadataResult<Option<ProductRow>> {
            let row = sqlx::query_as::<_, ProductRow>("SELECT * FROM products WHERE sku = ?")
                .bind(sku)
                .fetch_optional(&self.pool)
                .await?;
            Ok(row)
        }

        async fn list_products(&self, filter: &ProductFilter) -> MetadataResult<Vec<ProductRow>> {
            let search = filter.search.as_ref().map(|s| format!("%{s}%"));
            let rows = sqlx::query_as::<_, ProductRow>(
                r#"
                SELECT * FROM products
                WHERE (?1 IS NULL OR status = ?1)
                  AND (?2 IS NULL OR category_slug = ?2)
                  AND (?3 IS NULL OR title LIKE ?3 OR title_ar LIKE ?3 OR sku LIKE ?3)
                ORDER BY created_at DESC, product_id
                LIMIT ?4 OFFSET ?5
                "#,
            )
            .bind(&filter.status)
            .bind(&filter.category_slug)
            .bind(&search)
            .bind(filter.limit())
            .bind(filter.offset())
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn update_product(&self, product: &ProductRow) -> MetadataResult<()> {
            let result = sqlx::query(
                r#"
                UPDATE products SET
                    title = ?, title_ar = ?, description = ?, description_ar = ?,
                    sku = ?, category_slug = ?, price = ?, compare_at_price = ?,
                    stock = ?, status = ?, images_json = ?, benefits_json = ?,
                    size_guide = ?, sales_count = ?, updated_at = ?
                WHERE product_id = ?
                "#,
            )
            .bind(&product.title)
            .bind(&product.title_ar)
            .bind(&product.description)
            .bind(&product.description_ar)
            .bind(&product.sku)
            .bind(&product.category_slug)
            .bind(product.price)
            .bind(product.compare_at_price)
            .bind(product.stock)
            .bind(&product.status)
            .bind(&product.images_json)
            .bind(&product.benefits_json)
            .bind(&product.size_guide)
            .bind(product.sales_count)
            .bind(product.updated_at)
            .bind(product.product_id)
            .execute(&self.pool)
            .await?;

            if result.rows_affected() == 0 {
                return Err(MetadataError::NotFound(format!(
                    "product_id {} not found",
                    product.product_id
                )));
            }
            Ok(())
        }

        async fn delete_product(&self, product_id: Uuid) -> MetadataResult<()> {
            let result = sqlx::query("DELETE FROM products WHERE product_id = ?")
                .bind(product_id)
                .execute(&self.pool)
                .await?;
            if result.rows_affected() == 0 {
                return Err(MetadataError::NotFound(format!(
                    "product_id {product_id} not found"
                )));
            }
            Ok(())
        }

        async fn count_products(&self, status: Option<&str>) -> MetadataResult<u64> {
            let count: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM products WHERE (?1 IS NULL OR status = ?1)",
            )
            .bind(status)
            .fetch_one(&self.pool)
            .await?;
            Ok(count as u64)
        }
    }

    #[async_trait]
    impl VariantRepo for SqliteStore {
        async fn create_variant(&self, variant: &VariantRow) -> MetadataResult<()> {
            sqlx::query(
                r#"
                INSERT INTO product_variants (
                    variant_id, product_id, size, color, name, sku, price, stock,
                    created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(variant.variant_id)
            .bind(variant.product_id)
            .bind(&variant.size)
            .bind(&variant.color)
            .bind(&variant.name)
            .bind(&variant.sku)
            .bind(variant.price)
            .bind(variant.stock)
            .bind(variant.created_at)
            .bind(variant.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                map_insert_error(
                    e,
                    &format!(
                        "variant ({}, {}) for product {}",
                        variant.size.as_deref().unwrap_or("-"),
                        variant.color.as_deref().unwrap_or("-"),
                        variant.product_id
                    ),
                )
            })?;
            Ok(())
        }

        async fn get_variant(&self, variant_id: Uuid) -> MetadataResult<Option<VariantRow>> {
            let row = sqlx::query_as::<_, VariantRow>(
                "SELECT * FROM product_variants WHERE variant_id = ?",
            )
            .bind(variant_id)
            .fetch_optional(&self.pool)
            .await?;
            Ok(row)
        }

        async fn list_variants(&self, product_id: Uuid) -> MetadataResult<Vec<VariantRow>> {
            let rows = sqlx::query_as::<_, VariantRow>(
                "SELECT * FROM product_variants WHERE product_id = ? ORDER BY created_at, variant_id",
            )
            .bind(product_id)
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn update_variant(&self, variant: &VariantRow) -> MetadataResult<()> {
            let result = sqlx::query(
                r#"
                UPDATE product_variants SET
                    size = ?, color = ?, name = ?, sku = ?, price = ?, stock = ?,
                    updated_at = ?
                WHERE variant_id = ?
                "#,
            )
            .bind(&variant.size)
            .bind(&variant.color)
            .bind(&variant.name)
            .bind(&variant.sku)
            .bind(variant.price)
            .bind(variant.stock)
            .bind(variant.updated_at)
            .bind(variant.variant_id)
            .execute(&self.pool)
            .await?;

            if result.rows_affected() == 0 {
                return Err(MetadataError::NotFound(format!(
                    "variant_id {} not found",
                    variant.variant_id
                )));
            }
            Ok(())
        }

        async fn delete_variant(&self, variant_id: Uuid) -> MetadataResult<()> {
            let result = sqlx::query("DELETE FROM product_variants WHERE variant_id = ?")
                .bind(variant_id)
                .execute(&self.pool)
                .await?;
            if result.rows_affected() == 0 {
                return Err(MetadataError::NotFound(format!(
                    "variant_id {variant_id} not found"
                )));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl CategoryRepo for SqliteStore {
        async fn upsert_category(&self, category: &CategoryRow) -> MetadataResult<()> {
            sqlx::query(
                r#"
                INSERT INTO categories (category_id, slug, name, name_ar, position, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(slug) DO UPDATE SET
                    name = excluded.name,
                    name_ar = excluded.name_ar,
                    position = excluded.position,
                    updated_at = excluded.updated_at
                "#,
            )
            .bind(category.category_id)
            .bind(&category.slug)
            .bind(&category.name)
            .bind(&category.name_ar)
            .bind(category.position)
            .bind(category.created_at)
            .bind(category.updated_at)
            .execute(&self.pool)
            .await?;
            Ok(())
        }

        async fn list_categories(&self) -> MetadataResult<Vec<CategoryRow>> {
            let rows = sqlx::query_as::<_, CategoryRow>(
                "SELECT * FROM categories ORDER BY position, slug",
            )
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn get_category_by_slug(&self, slug: &str) -> MetadataResult<Option<CategoryRow>> {
            let row = sqlx::query_as::<_, CategoryRow>("SELECT * FROM categories WHERE slug = ?")
                .bind(slug)
                .fetch_optional(&self.pool)
                .await?;
            Ok(row)
        }

        async fn delete_category(&self, category_id: Uuid) -> MetadataResult<()> {
            let result = sqlx::query("DELETE FROM categories WHERE category_id = ?")
                .bind(category_id)
                .execute(&self.pool)
                .await?;
            if result.rows_affected() == 0 {
                return Err(MetadataError::NotFound(format!(
                    "category_id {category_id} not found"
                )));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl OrderRepo for SqliteStore {
        async fn create_order(
            &self,
            order: &OrderRow,
            items: &[OrderItemRow],
        ) -> MetadataResult<()> {
            let mut tx = self.pool.begin().await?;

            for item in items {
                // Variant stock first when a variant is referenced; the guarded
                // UPDATE keeps the decrement atomic.
                if let Some(variant_id) = item.variant_id {
                    let result = sqlx::query(
                        "UPDATE product_variants SET stock = stock - ?, updated_at = ?
                         WHERE variant_id = ? AND stock >= ?",
                    )
                    .bind(item.quantity)
                    .bind(order.created_at)
                    .bind(variant_id)
                    .bind(item.quantity)
                    .execute(&mut *tx)
                    .await?;

                    if result.rows_affected() == 0 {
                        let available: Option<i64> = sqlx::query_scalar(
                            "SELECT stock FROM product_variants WHERE variant_id = ?",
                        )
                        .bind(variant_id)
                        .fetch_optional(&mut *tx)
                        .await?;
                        return Err(match available {
                            Some(available) => MetadataError::InsufficientStock {
                                item: item.title.clone(),
                                requested: item.quantity,
                                available,
                            },
                            None => MetadataError::NotFound(format!(
                                "variant_id {variant_id} not found"
                            )),
                        });
                    }

                    sqlx::query(
                        "UPDATE products SET sales_count = sales_count + ?, updated_at = ?
                         WHERE product_id = ?",
                    )
                    .bind(item.quantity)
                    .bind(order.created_at)
                    .bind(item.product_id)
                    .execute(&mut *tx)
                    .await?;
                } else {
                    let result = sqlx::query(
                        "UPDATE products SET stock = stock - ?, sales_count = sales_count + ?, updated_at = ?
                         WHERE product_id = ? AND stock >= ?",
                    )
                    .bind(item.quantity)
                    .bind(item.quantity)
                    .bind(order.created_at)
                    .bind(item.product_id)
                    .bind(item.quantity)
                    .execute(&mut *tx)
                    .await?;

                    if result.rows_affected() == 0 {
                        let available: Option<i64> = sqlx::query_scalar(
                            "SELECT stock FROM products WHERE product_id = ?",
                        )
                        .bind(item.product_id)
                        .fetch_optional(&mut *tx)
                        .await?;
                        return Err(match available {
                            Some(available) => MetadataError::InsufficientStock {
                                item: item.title.clone(),
                                requested: item.quantity,
                                available,
                            },
                            None => MetadataError::NotFound(format!(
                                "product_id {} not found",
                                item.product_id
                            )),
                        });
                    }
                }
            }

            sqlx::query(
                r#"
                INSERT INTO orders (
                    order_id, order_number, customer_name, customer_phone, customer_email,
                    governorate, city, address_line, subtotal, shipping_cost, total,
                    status, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(order.order_id)
            .bind(&order.order_number)
            .bind(&order.customer_name)
            .bind(&order.customer_phone)
            .bind(&order.customer_email)
            .bind(&order.governorate)
            .bind(&order.city)
            .bind(&order.address_line)
            .bind(order.subtotal)
            .bind(order.shipping_cost)
            .bind(order.total)
            .bind(&order.status)
            .bind(order.created_at)
            .bind(order.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_insert_error(e, &format!("order number '{}'", order.order_number)))?;

            for item in items {
                sqlx::query(
                    r#"
                    INSERT INTO order_items (
                        order_item_id, order_id, product_id, variant_id, title,
                        unit_price, quantity, line_total
                    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(item.order_item_id)
                .bind(item.order_id)
                .bind(item.product_id)
                .bind(item.variant_id)
                .bind(&item.title)
                .bind(item.unit_price)
                .bind(item.quantity)
                .bind(item.line_total)
                .execute(&mut *tx)
                .await?;
            }

            tx.commit().await?;
            Ok(())
        }

        async fn get_order(&self, order_id: Uuid) -> MetadataResult<Option<OrderRow>> {
            let row = sqlx::query_as::<_, OrderRow>("SELECT * FROM orders WHERE order_id = ?")
                .bind(order_id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(row)
        }

        async fn get_order_by_number(
            &self,
            order_number: &str,
        ) -> MetadataResult<Option<OrderRow>> {
            let row = sqlx::query_as::<_, OrderRow>("SELECT * FROM orders WHERE order_number = ?")
                .bind(order_number)
                .fetch_optional(&self.pool)
                .await?;
            Ok(row)
        }

        async fn list_order_items(&self, order_id: Uuid) -> MetadataResult<Vec<OrderItemRow>> {
            let rows = sqlx::query_as::<_, OrderItemRow>(
                "SELECT * FROM order_items WHERE order_id = ? ORDER BY order_item_id",
            )
            .bind(order_id)
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn list_orders(
            &self,
            status: Option<&str>,
            limit: i64,
            offset: i64,
        ) -> MetadataResult<Vec<OrderRow>> {
            let rows = sqlx::query_as::<_, OrderRow>(
                r#"
                SELECT * FROM orders
                WHERE (?1 IS NULL OR status = ?1)
                ORDER BY created_at DESC, order_id
                LIMIT ?2 OFFSET ?3
                "#,
            )
            .bind(status)
            .bind(limit.clamp(1, 200))
            .bind(offset.max(0))
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn set_order_status(
            &self,
            order_id: Uuid,
            expected: &str,
            new_status: &str,
            restock: bool,
        ) -> MetadataResult<()> {
            let mut tx = self.pool.begin().await?;
            let now = OffsetDateTime::now_utc();

            let result = sqlx::query(
                "UPDATE orders SET status = ?, updated_at = ? WHERE order_id = ? AND status = ?",
            )
            .bind(new_status)
            .bind(now)
            .bind(order_id)
            .bind(expected)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                let actual: Option<String> =
                    sqlx::query_scalar("SELECT status FROM orders WHERE order_id = ?")
                        .bind(order_id)
                        .fetch_optional(&mut *tx)
                        .await?;
                return Err(match actual {
                    Some(actual) => MetadataError::InvalidStatusTransition {
                        from: actual,
                        to: new_status.to_string(),
                    },
                    None => MetadataError::NotFound(format!("order_id {order_id} not found")),
                });
            }

            if restock {
                let items = sqlx::query_as::<_, OrderItemRow>(
                    "SELECT * FROM order_items WHERE order_id = ?",
                )
                .bind(order_id)
                .fetch_all(&mut *tx)
                .await?;

                for item in &items {
                    if let Some(variant_id) = item.variant_id {
                        sqlx::query(
                            "UPDATE product_variants SET stock = stock + ?, updated_at = ?
                             WHERE variant_id = ?",
                        )
                        .bind(item.quantity)
                        .bind(now)
                        .bind(variant_id)
                        .execute(&mut *tx)
                        .await?;
                        sqlx::query(
                            "UPDATE products SET sales_count = sales_count - ?, updated_at = ?
                             WHERE product_id = ?",
                        )
                        .bind(item.quantity)
                        .bind(now)
                        .bind(item.product_id)
                        .execute(&mut *tx)
                        .await?;
                    } else {
                        sqlx::query(
                            "UPDATE products SET stock = stock + ?, sales_count = sales_count - ?, updated_at = ?
                             WHERE product_id = ?",
                        )
                        .bind(item.quantity)
                        .bind(item.quantity)
                        .bind(now)
                        .bind(item.product_id)
                        .execute(&mut *tx)
                        .await?;
                    }
                }
            }

            tx.commit().await?;
            Ok(())
        }

        async fn list_customers(&self) -> MetadataResult<Vec<CustomerSummaryRow>> {
            let rows = sqlx::query_as::<_, CustomerSummaryRow>(
                r#"
                SELECT
                    customer_phone,
                    MAX(customer_name) AS customer_name,
                    COUNT(*) AS orders_count,
                    SUM(total) AS total_spent,
                    MAX(created_at) AS last_order_at
                FROM orders
                WHERE status != 'cancelled'
                GROUP BY customer_phone
                ORDER BY last_order_at DESC
                "#,
            )
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn sales_summary(&self) -> MetadataResult<SalesSummary> {
            let orders_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
                .fetch_one(&self.pool)
                .await?;
            let revenue_total: f64 = sqlx::query_scalar(
                "SELECT COALESCE(SUM(total), 0) FROM orders WHERE status != 'cancelled'",
            )
            .fetch_one(&self.pool)
            .await?;
            let pending_count: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE status = 'pending'")
                    .fetch_one(&self.pool)
                    .await?;
            let delivered_count: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE status = 'delivered'")
                    .fetch_one(&self.pool)
                    .await?;

            Ok(SalesSummary {
                orders_count: orders_count as u64,
                revenue_total,
                pending_count: pending_count as u64,
                delivered_count: delivered_count as u64,
            })
        }
    }

    #[async_trait]
    impl LeadRepo for SqliteStore {
        async fn create_contact_message(
            &self,
            message: &ContactMessageRow,
        ) -> MetadataResult<()> {
            sqlx::query(
                "INSERT INTO contact_messages (message_id, name, email, phone, message, created_at)
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(message.message_id)
            .bind(&message.name)
            .bind(&message.email)
            .bind(&message.phone)
            .bind(&message.message)
            .bind(message.created_at)
            .execute(&self.pool)
            .await?;
            Ok(())
        }

        async fn list_contact_messages(
            &self,
            limit: i64,
            offset: i64,
        ) -> MetadataResult<Vec<ContactMessageRow>> {
            let rows = sqlx::query_as::<_, ContactMessageRow>(
                "SELECT * FROM contact_messages ORDER BY created_at DESC, message_id LIMIT ? OFFSET ?",
            )
            .bind(limit.clamp(1, 200))
            .bind(offset.max(0))
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn delete_contact_message(&self, message_id: Uuid) -> MetadataResult<()> {
            let result = sqlx::query("DELETE FROM contact_messages WHERE message_id = ?")
                .bind(message_id)
                .execute(&self.pool)
                .await?;
            if result.rows_affected() == 0 {
                return Err(MetadataError::NotFound(format!(
                    "message_id {message_id} not found"
                )));
            }
            Ok(())
        }

        async fn create_career_application(
            &self,
            application: &CareerApplicationRow,
        ) -> MetadataResult<()> {
            sqlx::query(
                "INSERT INTO career_applications (application_id, name, email, phone, position, message, created_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(application.application_id)
            .bind(&application.name)
            .bind(&application.email)
            .bind(&application.phone)
            .bind(&application.position)
            .bind(&application.message)
            .bind(application.created_at)
            .execute(&self.pool)
            .await?;
            Ok(())
        }

        async fn list_career_applications(
            &self,
            limit: i64,
            offset: i64,
        ) -> MetadataResult<Vec<CareerApplicationRow>> {
            let rows = sqlx::query_as::<_, CareerApplicationRow>(
                "SELECT * FROM career_applications ORDER BY created_at DESC, application_id LIMIT ? OFFSET ?",
            )
            .bind(limit.clamp(1, 200))
            .bind(offset.max(0))
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn delete_career_application(&self, application_id: Uuid) -> MetadataResult<()> {
            let result = sqlx::query("DELETE FROM career_applications WHERE application_id = ?")
                .bind(application_id)
                .execute(&self.pool)
                .await?;
            if result.rows_affected() == 0 {
                return Err(MetadataError::NotFound(format!(
                    "application_id {application_id} not found"
                )));
            }
            Ok(())
        }

        async fn create_whatsapp_lead(&self, lead: &WhatsappLeadRow) -> MetadataResult<()> {
            // Resubmissions of the same number are ignored, not an error.
            sqlx::query(
                "INSERT INTO whatsapp_leads (lead_id, country_code, phone, created_at)
                 VALUES (?, ?, ?, ?)
                 ON CONFLICT(country_code, phone) DO NOTHING",
            )
            .bind(lead.lead_id)
            .bind(&lead.country_code)
            .bind(&lead.phone)
            .bind(lead.created_at)
            .execute(&self.pool)
            .await?;
            Ok(())
        }

        async fn list_whatsapp_leads(
            &self,
            limit: i64,
            offset: i64,
        ) -> MetadataResult<Vec<WhatsappLeadRow>> {
            let rows = sqlx::query_as::<_, WhatsappLeadRow>(
                "SELECT * FROM whatsapp_leads ORDER BY created_at DESC, lead_id LIMIT ? OFFSET ?",
            )
            .bind(limit.clamp(1, 200))
            .bind(offset.max(0))
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn delete_whatsapp_lead(&self, lead_id: Uuid) -> MetadataResult<()> {
            let result = sqlx::query("DELETE FROM whatsapp_leads WHERE lead_id = ?")
                .bind(lead_id)
                .execute(&self.pool)
                .await?;
            if result.rows_affected() == 0 {
                return Err(MetadataError::NotFound(format!(
                    "lead_id {lead_id} not found"
                )));
            }
            Ok(())
        }

        async fn lead_counts(&self) -> MetadataResult<LeadCounts> {
            let contact_messages: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM contact_messages")
                    .fetch_one(&self.pool)
                    .await?;
            let career_applications: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM career_applications")
                    .fetch_one(&self.pool)
                    .await?;
            let whatsapp_leads: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM whatsapp_leads")
                .fetch_one(&self.pool)
                .await?;

            Ok(LeadCounts {
                contact_messages: contact_messages as u64,
                career_applications: career_applications as u64,
                whatsapp_leads: whatsapp_leads as u64,
            })
        }
    }

    #[async_trait]
    impl SettingsRepo for SqliteStore {
        async fn get_setting(&self, key: &str) -> MetadataResult<Option<String>> {
            let value: Option<String> =
                sqlx::query_scalar("SELECT value FROM admin_settings WHERE key = ?")
                    .bind(key)
                    .fetch_optional(&self.pool)
                    .await?;
            Ok(value)
        }

        async fn all_settings(&self) -> MetadataResult<Vec<SettingRow>> {
            let rows =
                sqlx::query_as::<_, SettingRow>("SELECT * FROM admin_settings ORDER BY key")
                    .fetch_all(&self.pool)
                    .await?;
            Ok(rows)
        }

        async fn set_settings(&self, entries: &[(String, String)]) -> MetadataResult<()> {
            let mut tx = self.pool.begin().await?;
            let now = OffsetDateTime::now_utc();
            for (key, value) in entries {
                sqlx::query(
                    "INSERT INTO admin_settings (key, value, updated_at) VALUES (?, ?, ?)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                )
                .bind(key)
                .bind(value)
                .bind(now)
                .execute(&mut *tx)
                .await?;
            }
            tx.commit().await?;
            Ok(())
        }
    }

    #[async_trait]
    impl CarouselRepo for SqliteStore {
        async fn create_slide(&self, slide: &HeroSlideRow) -> MetadataResult<()> {
            sqlx::query(
                r#"
                INSERT INTO hero_slides (
                    slide_id, title, title_ar, subtitle, image_url, link_url,
                    position, is_active, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(slide.slide_id)
            .bind(&slide.title)
            .bind(&slide.title_ar)
            .bind(&slide.subtitle)
            .bind(&slide.image_url)
            .bind(&slide.link_url)
            .bind(slide.position)
            .bind(slide.is_active)
            .bind(slide.created_at)
            .bind(slide.updated_at)
            .execute(&self.pool)
            .await?;
            Ok(())
        }

        async fn get_slide(&self, slide_id: Uuid) -> MetadataResult<Option<HeroSlideRow>> {
            let row = sqlx::query_as::<_, HeroSlideRow>(
                "SELECT * FROM hero_slides WHERE slide_id = ?",
            )
            .bind(slide_id)
            .fetch_optional(&self.pool)
            .await?;
            Ok(row)
        }

        async fn list_slides(&self, active_only: bool) -> MetadataResult<Vec<HeroSlideRow>> {
            let rows = sqlx::query_as::<_, HeroSlideRow>(
                "SELECT * FROM hero_slides WHERE (?1 = 0 OR is_active = 1) ORDER BY position, slide_id",
            )
            .bind(active_only)
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        }

        async fn update_slide(&self, slide: &HeroSlideRow) -> MetadataResult<()> {
            let result = sqlx::query(
                r#"
                UPDATE hero_slides SET
                    title = ?, title_ar = ?, subtitle = ?, image_url = ?, link_url = ?,
                    position = ?, is_active = ?, updated_at = ?
                WHERE slide_id = ?
                "#,
            )
            .bind(&slide.title)
            .bind(&slide.title_ar)
            .bind(&slide.subtitle)
            .bind(&slide.image_url)
            .bind(&slide.link_url)
            .bind(slide.position)
            .bind(slide.is_active)
            .bind(slide.updated_at)
            .bind(slide.slide_id)
            .execute(&self.pool)
            .await?;

            if result.rows_affected() == 0 {
                return Err(MetadataError::NotFound(format!(
                    "slide_id {} not found",
                    slide.slide_id
                )));
            }
            Ok(())
        }

        async fn delete_slide(&self, slide_id: Uuid) -> MetadataResult<()> {
            let result = sqlx::query("DELETE FROM hero_slides WHERE slide_id = ?")
                .bind(slide_id)
                .execute(&self.pool)
                .await?;
            if result.rows_affected() == 0 {
                return Err(MetadataError::NotFound(format!(
                    "slide_id {slide_id} not found"
                )));
            }
            Ok(())
        }
    }
}

const SCHEMA_SQL: &str = r#"
-- Categories
CREATE TABLE IF NOT EXISTS categories (
    category_id BLOB PRIMARY KEY,
    slug TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    name_ar TEXT NOT NULL,
    position INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Products
CREATE TABLE IF NOT EXISTS products (
    product_id BLOB PRIMARY KEY,
    title TEXT NOT NULL,
    title_ar TEXT NOT NULL,
    description TEXT NOT NULL,
    description_ar TEXT NOT NULL,
    sku TEXT NOT NULL UNIQUE,
    category_slug TEXT NOT NULL,
    price REAL NOT NULL,
    compare_at_price REAL,
    stock INTEGER NOT NULL DEFAULT 0,
    status TEXT NOT NULL DEFAULT 'draft',
    images_json TEXT NOT NULL DEFAULT '[]',
    benefits_json TEXT NOT NULL DEFAULT '[]',
    size_guide TEXT,
    sales_count INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_products_status ON products(status, created_at);
CREATE INDEX IF NOT EXISTS idx_products_category ON products(category_slug);

-- Product variants
CREATE TABLE IF NOT EXISTS product_variants (
    variant_id BLOB PRIMARY KEY,
    product_id BLOB NOT NULL REFERENCES products(product_id) ON DELETE CASCADE,
    size TEXT,
    color TEXT,
    name TEXT NOT NULL,
    sku TEXT NOT NULL,
    price REAL NOT NULL,
    stock INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_variants_product ON product_variants(product_id);
-- (size, color) is unique within a product; NULL axes normalize to ''
CREATE UNIQUE INDEX IF NOT EXISTS idx_variants_pair
    ON product_variants(product_id, COALESCE(size, ''), COALESCE(color, ''));

-- Orders
CREATE TABLE IF NOT EXISTS orders (
    order_id BLOB PRIMARY KEY,
    order_number TEXT NOT NULL UNIQUE,
    customer_name TEXT NOT NULL,
    customer_phone TEXT NOT NULL,
    customer_email TEXT,
    governorate TEXT NOT NULL,
    city TEXT NOT NULL,
    address_line TEXT NOT NULL,
    subtotal REAL NOT NULL,
    shipping_cost REAL NOT NULL,
    total REAL NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_orders_status ON orders(status, created_at);
CREATE INDEX IF NOT EXISTS idx_orders_phone ON orders(customer_phone);

CREATE TABLE IF NOT EXISTS order_items (
    order_item_id BLOB PRIMARY KEY,
    order_id BLOB NOT NULL REFERENCES orders(order_id) ON DELETE CASCADE,
    product_id BLOB NOT NULL,
    variant_id BLOB,
    title TEXT NOT NULL,
    unit_price REAL NOT NULL,
    quantity INTEGER NOT NULL,
    line_total REAL NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_order_items_order ON order_items(order_id);

-- Leads
CREATE TABLE IF NOT EXISTS contact_messages (
    message_id BLOB PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT,
    phone TEXT NOT NULL,
    message TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS career_applications (
    application_id BLOB PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT NOT NULL,
    position TEXT NOT NULL,
    message TEXT,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS whatsapp_leads (
    lead_id BLOB PRIMARY KEY,
    country_code TEXT NOT NULL,
    phone TEXT NOT NULL,
    created_at TEXT NOT NULL,
    UNIQUE(country_code, phone)
);

-- Admin settings
CREATE TABLE IF NOT EXISTS admin_settings (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Hero carousel
CREATE TABLE IF NOT EXISTS hero_slides (
    slide_id BLOB PRIMARY KEY,
    title TEXT NOT NULL,
    title_ar TEXT NOT NULL,
    subtitle TEXT,
    image_url TEXT NOT NULL,
    link_url TEXT,
    position INTEGER NOT NULL DEFAULT 0,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_hero_slides_active ON hero_slides(is_active, position);
"#;
