//! Administrative CLI for Atelier.

mod api_client;

use anyhow::Result;
use api_client::{ApiClient, CreateProductRequest, UpsertCategoryRequest};
use clap::{Args, Parser, Subcommand};
use std::collections::BTreeMap;

#[derive(Parser)]
#[command(name = "atelierctl")]
#[command(about = "Administrative CLI for Atelier")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct ApiArgs {
    /// Server API URL
    #[arg(long, env = "ATELIER_SERVER", default_value = "http://127.0.0.1:8080")]
    server: String,

    /// Admin PIN
    #[arg(long, env = "ATELIER_ADMIN_PIN")]
    pin: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Product management commands
    Product {
        #[command(subcommand)]
        command: ProductCommands,
        #[command(flatten)]
        api: ApiArgs,
    },
    /// Order management commands
    Order {
        #[command(subcommand)]
        command: OrderCommands,
        #[command(flatten)]
        api: ApiArgs,
    },
    /// Store settings commands
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
        #[command(flatten)]
        api: ApiArgs,
    },
    /// Rewrite marketing copy for a product field
    Rewrite {
        /// Text to rewrite
        text: String,
        /// Target field (title, description, benefit, ingredients, how_to_use)
        #[arg(long, default_value = "description")]
        field: String,
        #[command(flatten)]
        api: ApiArgs,
    },
    /// Generate an Arabic benefits list from a product description
    Benefits {
        /// Product description to work from
        text: String,
        #[command(flatten)]
        api: ApiArgs,
    },
    /// Seed demo categories and products
    Seed {
        #[command(flatten)]
        api: ApiArgs,
    },
    /// Check server health and version
    Health {
        #[command(flatten)]
        api: ApiArgs,
    },
}

#[derive(Subcommand)]
enum ProductCommands {
    /// List products
    List {
        /// Filter by status (draft, active, archived)
        #[arg(long)]
        status: Option<String>,
    },
    /// Show one product
    Show {
        /// Product id
        product_id: String,
    },
    /// Create a product
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        title_ar: String,
        #[arg(long)]
        sku: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        price: f64,
        #[arg(long, default_value_t = 0)]
        stock: i64,
        #[arg(long, default_value = "draft")]
        status: String,
    },
    /// Delete a product and its variants
    Delete {
        /// Product id
        product_id: String,
    },
    /// Generate draft variants from size and color lists
    GenerateVariants {
        /// Product id
        product_id: String,
        /// Comma-separated sizes
        #[arg(long, value_delimiter = ',')]
        sizes: Vec<String>,
        /// Comma-separated colors
        #[arg(long, value_delimiter = ',')]
        colors: Vec<String>,
    },
}

#[derive(Subcommand)]
enum OrderCommands {
    /// List orders
    List {
        /// Filter by status
        #[arg(long)]
        status: Option<String>,
    },
    /// Move an order to a new status
    SetStatus {
        /// Order id
        order_id: String,
        /// New status (confirmed, shipped, delivered, cancelled)
        status: String,
    },
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Print all store settings
    Get,
    /// Set one setting key
    Set {
        key: String,
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Product { command, api } => handle_product_command(command, &api).await,
        Commands::Order { command, api } => handle_order_command(command, &api).await,
        Commands::Settings { command, api } => handle_settings_command(command, &api).await,
        Commands::Rewrite { text, field, api } => {
            let client = ApiClient::new(&api.server, &api.pin)?;
            let response = client.rewrite(&text, &field).await?;
            println!("{} (source: {})", response.text, response.source);
            Ok(())
        }
        Commands::Benefits { text, api } => {
            let client = ApiClient::new(&api.server, &api.pin)?;
            let response = client.generate_benefits(&text).await?;
            for benefit in &response.benefits {
                println!("- {benefit}");
            }
            println!("(source: {})", response.source);
            Ok(())
        }
        Commands::Seed { api } => handle_seed_command(&api).await,
        Commands::Health { api } => {
            let client = ApiClient::new(&api.server, &api.pin)?;
            let health = client.health().await?;
            println!("Server: {} (version {})", health.status, health.version);
            Ok(())
        }
    }
}

async fn handle_product_command(command: ProductCommands, api: &ApiArgs) -> Result<()> {
    let client = ApiClient::new(&api.server, &api.pin)?;

    match command {
        ProductCommands::List { status } => {
            let products = client.list_products(status.as_deref()).await?;
            if products.is_empty() {
                println!("No products found.");
                return Ok(());
            }
            println!(
                "{:<38} {:<24} {:<14} {:>10} {:>7} {:<10}",
                "ID", "TITLE", "SKU", "PRICE", "STOCK", "STATUS"
            );
            for product in products {
                println!(
                    "{:<38} {:<24} {:<14} {:>10.2} {:>7} {:<10}",
                    product.product_id,
                    truncate(&product.title, 24),
                    product.sku,
                    product.price,
                    product.stock,
                    product.status
                );
            }
            Ok(())
        }
        ProductCommands::Show { product_id } => {
            let product = client.get_product(&product_id).await?;
            println!("ID:          {}", product.product_id);
            println!("Title:       {}", product.title);
            println!("Title (ar):  {}", product.title_ar);
            println!("SKU:         {}", product.sku);
            println!("Category:    {}", product.category_slug);
            println!("Price:       {:.2}", product.price);
            println!("Stock:       {}", product.stock);
            println!("Status:      {}", product.status);
            println!("Sales:       {}", product.sales_count);
            Ok(())
        }
        ProductCommands::Create {
            title,
            title_ar,
            sku,
            category,
            price,
            stock,
            status,
        } => {
            let request = CreateProductRequest {
                title,
                title_ar,
                sku,
                category_slug: category,
                price,
                stock,
                status,
                ..Default::default()
            };
            let product = client.create_product(&request).await?;
            println!("Created product {} ({})", product.product_id, product.sku);
            Ok(())
        }
        ProductCommands::Delete { product_id } => {
            client.delete_product(&product_id).await?;
            println!("Deleted product {product_id}");
            Ok(())
        }
        ProductCommands::GenerateVariants {
            product_id,
            sizes,
            colors,
        } => {
            let result = client.generate_variants(&product_id, &sizes, &colors).await?;
            println!(
                "Created {} variant(s), skipped {} existing combination(s)",
                result.created.len(),
                result.skipped
            );
            Ok(())
        }
    }
}

async fn handle_order_command(command: OrderCommands, api: &ApiArgs) -> Result<()> {
    let client = ApiClient::new(&api.server, &api.pin)?;

    match command {
        OrderCommands::List { status } => {
            let orders = client.list_orders(status.as_deref()).await?;
            if orders.is_empty() {
                println!("No orders found.");
                return Ok(());
            }
            println!(
                "{:<38} {:<12} {:<20} {:>10} {:<10}",
                "ID", "NUMBER", "CUSTOMER", "TOTAL", "STATUS"
            );
            for order in orders {
                println!(
                    "{:<38} {:<12} {:<20} {:>10.2} {:<10}",
                    order.order_id,
                    order.order_number,
                    truncate(&order.customer_name, 20),
                    order.total,
                    order.status
                );
            }
            Ok(())
        }
        OrderCommands::SetStatus { order_id, status } => {
            let order = client.set_order_status(&order_id, &status).await?;
            println!("Order {} is now {}", order.order_number, order.status);
            Ok(())
        }
    }
}

async fn handle_settings_command(command: SettingsCommands, api: &ApiArgs) -> Result<()> {
    let client = ApiClient::new(&api.server, &api.pin)?;

    match command {
        SettingsCommands::Get => {
            let settings = client.get_settings().await?;
            if settings.is_empty() {
                println!("No settings stored.");
                return Ok(());
            }
            for (key, value) in settings {
                println!("{key} = {value}");
            }
            Ok(())
        }
        SettingsCommands::Set { key, value } => {
            let mut entries = BTreeMap::new();
            entries.insert(key.clone(), value);
            client.set_settings(&entries).await?;
            println!("Updated setting '{key}'");
            Ok(())
        }
    }
}

/// Seed a small demo catalog so a fresh install has something to browse.
async fn handle_seed_command(api: &ApiArgs) -> Result<()> {
    let client = ApiClient::new(&api.server, &api.pin)?;

    let categories = [
        ("skincare", "Skincare", "العناية بالبشرة", 1),
        ("haircare", "Haircare", "العناية بالشعر", 2),
        ("bodycare", "Bodycare", "العناية بالجسم", 3),
    ];
    for (slug, name, name_ar, position) in categories {
        client
            .upsert_category(&UpsertCategoryRequest {
                slug: slug.to_string(),
                name: name.to_string(),
                name_ar: name_ar.to_string(),
                position,
            })
            .await?;
        println!("Category '{slug}' ready");
    }

    let products = [
        (
            "Rose Glow Serum",
            "سيروم الورد المضيء",
            "AT-SRM-001",
            "skincare",
            650.0,
            25,
        ),
        (
            "Argan Repair Oil",
            "زيت الأرغان المرمم",
            "AT-OIL-001",
            "haircare",
            480.0,
            40,
        ),
        (
            "Shea Body Butter",
            "زبدة الشيا للجسم",
            "AT-BTR-001",
            "bodycare",
            320.0,
            60,
        ),
    ];
    for (title, title_ar, sku, category, price, stock) in products {
        let request = CreateProductRequest {
            title: title.to_string(),
            title_ar: title_ar.to_string(),
            sku: sku.to_string(),
            category_slug: category.to_string(),
            price,
            stock,
            status: "active".to_string(),
            ..Default::default()
        };
        match client.create_product(&request).await {
            Ok(product) => {
                println!("Created product {} ({})", product.sku, product.product_id);
                let sizes = vec!["50ml".to_string(), "100ml".to_string()];
                let result = client
                    .generate_variants(&product.product_id, &sizes, &[])
                    .await?;
                println!("  {} variant(s) generated", result.created.len());
            }
            Err(e) if e.to_string().contains("409") => {
                println!("Product {sku} already exists, skipping");
            }
            Err(e) => return Err(e),
        }
    }

    println!("Seed complete.");
    Ok(())
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        value.to_string()
    } else {
        let head: String = value.chars().take(max.saturating_sub(1)).collect();
        format!("{head}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
        assert_eq!(truncate("سيروم الورد المضيء", 8), "سيروم ا…");
    }
}
