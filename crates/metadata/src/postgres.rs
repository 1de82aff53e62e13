//! PostgreSQL-based metadata store implementation.

use crate::error::{MetadataError, MetadataResult};
use crate::models::*;
use crate::repos::{
    CarouselRepo, CategoryRepo, LeadRepo, OrderRepo, ProductRepo, SettingsRepo, VariantRepo,
    leads::LeadCounts, orders::SalesSummary, products::ProductFilter,
};
use crate::store::{MetadataStore, map_insert_error};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Pool, Postgres};
use std::str::FromStr;
use time::OffsetDateTime;
use uuid::Uuid;

/// PostgreSQL schema (embedded).
const POSTGRES_SCHEMA: &str = include_str!("postgres_schema.sql");

fn postgres_schema_statements(schema: &str) -> Vec<&str> {
    schema
        .split(';')
        .filter_map(|statement| {
            let trimmed = statement.trim();
            if trimmed.is_empty() {
                return None;
            }
            let has_sql = trimmed.lines().any(|line| {
                let line = line.trim();
                !line.is_empty() && !line.starts_with("--")
            });
            has_sql.then_some(trimmed)
        })
        .collect()
}

/// PostgreSQL-based metadata store.
pub struct PostgresStore {
    pool: Pool<Postgres>,
}

impl PostgresStore {
    /// Create a new PostgreSQL store from a connection URL.
    pub async fn from_url(
        url: &str,
        max_connections: u32,
        statement_timeout_ms: Option<u64>,
    ) -> MetadataResult<Self> {
        let opts = PgConnectOptions::from_str(url)?;
        Self::connect(opts, max_connections, statement_timeout_ms).await
    }

    /// Create a new PostgreSQL store from individual connection parameters.
    ///
    /// Allows credentials to be passed separately, e.g. a password via an
    /// environment variable.
    pub async fn from_params(
        host: &str,
        port: u16,
        username: Option<&str>,
        password: Option<&str>,
        database: &str,
        max_connections: u32,
        statement_timeout_ms: Option<u64>,
    ) -> MetadataResult<Self> {
        let mut opts = PgConnectOptions::new()
            .host(host)
            .port(port)
            .database(database);

        if let Some(user) = username {
            opts = opts.username(user);
        }

        if let Some(pass) = password {
            opts = opts.password(pass);
        }

        // Log connection info without password
        tracing::info!(
            host = host,
            port = port,
            database = database,
            username = username.unwrap_or("<none>"),
            "Connecting to PostgreSQL with individual parameters"
        );

        Self::connect(opts, max_connections, statement_timeout_ms).await
    }

    async fn connect(
        mut opts: PgConnectOptions,
        max_connections: u32,
        statement_timeout_ms: Option<u64>,
    ) -> MetadataResult<Self> {
        // Prevent hung queries from pinning a pool connection forever.
        if let Some(timeout_ms) = statement_timeout_ms {
            opts = opts.options([("statement_timeout", format!("{}ms", timeout_ms))]);
            tracing::info!("PostgreSQL statement_timeout set to {}ms", timeout_ms);
        }

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_with(opts)
            .await?;

        let store = Self { pool };
        store.migrate().await?;

        Ok(store)
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &Pool<Postgres> {
        &self.pool
    }
}

#[async_trait]
impl MetadataStore for PostgresStore {
    async fn migrate(&self) -> MetadataResult<()> {
        for statement in postgres_schema_statements(POSTGRES_SCHEMA) {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    async fn health_check(&self) -> MetadataResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl ProductRepo for PostgresStore {
    async fn create_product(&self, product: &ProductRow) -> MetadataResult<()> {
        sqlx::query(
            r#"
            INSERT INTO products (
                product_id, title, title_ar, description, description_ar, sku,
                category_slug, price, compare_at_price, stock, status,
                images_json, benefits_json, size_guide, sales_count,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
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
        let row = sqlx::query_as::<_, ProductRow>("SELECT * FROM products WHERE product_id = $1")
            .bind(product_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn get_product_by_sku(&self, sku: &str) -> MetadataResult<Option<ProductRow>> {
        let row = sqlx::query_as::<_, ProductRow>("SELECT * FROM products WHERE sku = $1")
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
            WHERE ($1::TEXT IS NULL OR status = $1)
              AND ($2::TEXT IS NULL OR category_slug = $2)
              AND ($3::TEXT IS NULL OR title LIKE $3 OR title_ar LIKE $3 OR sku LIKE $3)
            ORDER BY created_at DESC, product_id
            LIMIT $4 OFFSET $5
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
                title = $1, title_ar = $2, description = $3, description_ar = $4,
                sku = $5, category_slug = $6, price = $7, compare_at_price = $8,
                stock = $9, status = $10, images_json = $11, benefits_json = $12,
                size_guide = $13, sales_count = $14, updated_at = $15
            WHERE product_id = $16
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
        let result = sqlx::query("DELETE FROM products WHERE product_id = $1")
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
            "SELECT COUNT(*) FROM products WHERE ($1::TEXT IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await?;
        Ok(count as u64)
    }
}

#[async_trait]
impl VariantRepo for PostgresStore {
    async fn create_variant(&self, variant: &VariantRow) -> MetadataResult<()> {
        sqlx::query(
            r#"
            INSERT INTO product_variants (
                variant_id, product_id, size, color, name, sku, price, stock,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
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
            "SELECT * FROM product_variants WHERE variant_id = $1",
        )
        .bind(variant_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_variants(&self, product_id: Uuid) -> MetadataResult<Vec<VariantRow>> {
        let rows = sqlx::query_as::<_, VariantRow>(
            "SELECT * FROM product_variants WHERE product_id = $1 ORDER BY created_at, variant_id",
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
                size = $1, color = $2, name = $3, sku = $4, price = $5, stock = $6,
                updated_at = $7
            WHERE variant_id = $8
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
        let result = sqlx::query("DELETE FROM product_variants WHERE variant_id = $1")
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
impl CategoryRepo for PostgresStore {
    async fn upsert_category(&self, category: &CategoryRow) -> MetadataResult<()> {
        sqlx::query(
            r#"
            INSERT INTO categories (category_id, slug, name, name_ar, position, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (slug) DO UPDATE SET
                name = EXCLUDED.name,
                name_ar = EXCLUDED.name_ar,
                position = EXCLUDED.position,
                updated_at = EXCLUDED.updated_at
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
        let rows =
            sqlx::query_as::<_, CategoryRow>("SELECT * FROM categories ORDER BY position, slug")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    async fn get_category_by_slug(&self, slug: &str) -> MetadataResult<Option<CategoryRow>> {
        let row = sqlx::query_as::<_, CategoryRow>("SELECT * FROM categories WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_category(&self, category_id: Uuid) -> MetadataResult<()> {
        let result = sqlx::query("DELETE FROM categories WHERE category_id = $1")
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
impl OrderRepo for PostgresStore {
    async fn create_order(&self, order: &OrderRow, items: &[OrderItemRow]) -> MetadataResult<()> {
        let mut tx = self.pool.begin().await?;

        for item in items {
            if let Some(variant_id) = item.variant_id {
                let result = sqlx::query(
                    "UPDATE product_variants SET stock = stock - $1, updated_at = $2
                     WHERE variant_id = $3 AND stock >= $1",
                )
                .bind(item.quantity)
                .bind(order.created_at)
                .bind(variant_id)
                .execute(&mut *tx)
                .await?;

                if result.rows_affected() == 0 {
                    let available: Option<i64> = sqlx::query_scalar(
                        "SELECT stock FROM product_variants WHERE variant_id = $1",
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
                        None => {
                            MetadataError::NotFound(format!("variant_id {variant_id} not found"))
                        }
                    });
                }

                sqlx::query(
                    "UPDATE products SET sales_count = sales_count + $1, updated_at = $2
                     WHERE product_id = $3",
                )
                .bind(item.quantity)
                .bind(order.created_at)
                .bind(item.product_id)
                .execute(&mut *tx)
                .await?;
            } else {
                let result = sqlx::query(
                    "UPDATE products SET stock = stock - $1, sales_count = sales_count + $1, updated_at = $2
                     WHERE product_id = $3 AND stock >= $1",
                )
                .bind(item.quantity)
                .bind(order.created_at)
                .bind(item.product_id)
                .execute(&mut *tx)
                .await?;

                if result.rows_affected() == 0 {
                    let available: Option<i64> =
                        sqlx::query_scalar("SELECT stock FROM products WHERE product_id = $1")
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
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
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
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
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
        let row = sqlx::query_as::<_, OrderRow>("SELECT * FROM orders WHERE order_id = $1")
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn get_order_by_number(&self, order_number: &str) -> MetadataResult<Option<OrderRow>> {
        let row = sqlx::query_as::<_, OrderRow>("SELECT * FROM orders WHERE order_number = $1")
            .bind(order_number)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_order_items(&self, order_id: Uuid) -> MetadataResult<Vec<OrderItemRow>> {
        let rows = sqlx::query_as::<_, OrderItemRow>(
            "SELECT * FROM order_items WHERE order_id = $1 ORDER BY order_item_id",
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
            WHERE ($1::TEXT IS NULL OR status = $1)
            ORDER BY created_at DESC, order_id
            LIMIT $2 OFFSET $3
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
            "UPDATE orders SET status = $1, updated_at = $2 WHERE order_id = $3 AND status = $4",
        )
        .bind(new_status)
        .bind(now)
        .bind(order_id)
        .bind(expected)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            let actual: Option<String> =
                sqlx::query_scalar("SELECT status FROM orders WHERE order_id = $1")
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
            let items =
                sqlx::query_as::<_, OrderItemRow>("SELECT * FROM order_items WHERE order_id = $1")
                    .bind(order_id)
                    .fetch_all(&mut *tx)
                    .await?;

            for item in &items {
                if let Some(variant_id) = item.variant_id {
                    sqlx::query(
                        "UPDATE product_variants SET stock = stock + $1, updated_at = $2
                         WHERE variant_id = $3",
                    )
                    .bind(item.quantity)
                    .bind(now)
                    .bind(variant_id)
                    .execute(&mut *tx)
                    .await?;
                    sqlx::query(
                        "UPDATE products SET sales_count = sales_count - $1, updated_at = $2
                         WHERE product_id = $3",
                    )
                    .bind(item.quantity)
                    .bind(now)
                    .bind(item.product_id)
                    .execute(&mut *tx)
                    .await?;
                } else {
                    sqlx::query(
                        "UPDATE products SET stock = stock + $1, sales_count = sales_count - $1, updated_at = $2
                         WHERE product_id = $3",
                    )
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
            "SELECT COALESCE(SUM(total), 0)::DOUBLE PRECISION FROM orders WHERE status != 'cancelled'",
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
impl LeadRepo for PostgresStore {
    async fn create_contact_message(&self, message: &ContactMessageRow) -> MetadataResult<()> {
        sqlx::query(
            "INSERT INTO contact_messages (message_id, name, email, phone, message, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)",
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
            "SELECT * FROM contact_messages ORDER BY created_at DESC, message_id LIMIT $1 OFFSET $2",
        )
        .bind(limit.clamp(1, 200))
        .bind(offset.max(0))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn delete_contact_message(&self, message_id: Uuid) -> MetadataResult<()> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE message_id = $1")
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
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
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
            "SELECT * FROM career_applications ORDER BY created_at DESC, application_id LIMIT $1 OFFSET $2",
        )
        .bind(limit.clamp(1, 200))
        .bind(offset.max(0))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn delete_career_application(&self, application_id: Uuid) -> MetadataResult<()> {
        let result = sqlx::query("DELETE FROM career_applications WHERE application_id = $1")
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
        sqlx::query(
            "INSERT INTO whatsapp_leads (lead_id, country_code, phone, created_at)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (country_code, phone) DO NOTHING",
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
            "SELECT * FROM whatsapp_leads ORDER BY created_at DESC, lead_id LIMIT $1 OFFSET $2",
        )
        .bind(limit.clamp(1, 200))
        .bind(offset.max(0))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn delete_whatsapp_lead(&self, lead_id: Uuid) -> MetadataResult<()> {
        let result = sqlx::query("DELETE FROM whatsapp_leads WHERE lead_id = $1")
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
        let contact_messages: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contact_messages")
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
impl SettingsRepo for PostgresStore {
    async fn get_setting(&self, key: &str) -> MetadataResult<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM admin_settings WHERE key = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(value)
    }

    async fn all_settings(&self) -> MetadataResult<Vec<SettingRow>> {
        let rows = sqlx::query_as::<_, SettingRow>("SELECT * FROM admin_settings ORDER BY key")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn set_settings(&self, entries: &[(String, String)]) -> MetadataResult<()> {
        let mut tx = self.pool.begin().await?;
        let now = OffsetDateTime::now_utc();
        for (key, value) in entries {
            sqlx::query(
                "INSERT INTO admin_settings (key, value, updated_at) VALUES ($1, $2, $3)
                 ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = EXCLUDED.updated_at",
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
impl CarouselRepo for PostgresStore {
    async fn create_slide(&self, slide: &HeroSlideRow) -> MetadataResult<()> {
        sqlx::query(
            r#"
            INSERT INTO hero_slides (
                slide_id, title, title_ar, subtitle, image_url, link_url,
                position, is_active, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
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
        let row = sqlx::query_as::<_, HeroSlideRow>("SELECT * FROM hero_slides WHERE slide_id = $1")
            .bind(slide_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_slides(&self, active_only: bool) -> MetadataResult<Vec<HeroSlideRow>> {
        let rows = sqlx::query_as::<_, HeroSlideRow>(
            "SELECT * FROM hero_slides WHERE ($1 = FALSE OR is_active) ORDER BY position, slide_id",
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
                title = $1, title_ar = $2, subtitle = $3, image_url = $4, link_url = $5,
                position = $6, is_active = $7, updated_at = $8
            WHERE slide_id = $9
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
        let result = sqlx::query("DELETE FROM hero_slides WHERE slide_id = $1")
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
