use anyhow::{Context, Result};
use url::Url;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::collections::BTreeMap;

/// Header carrying the admin PIN.
const ADMIN_PIN_HEADER: &str = "X-Admin-Pin";

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    pin: String,
}

impl ApiClient {
    pub fn new(base_url: &str, pin: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).context("invalid server URL")?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            pin: pin.to_string(),
        })
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).context("failed to build API URL")
    }

    async fn send_json<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> Result<T> {
        let response = req.header(ADMIN_PIN_HEADER, &self.pin).send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            anyhow::bail!("API error ({}): {}", status, body);
        }
        Ok(serde_json::from_str(&body)?)
    }

    async fn send_empty(&self, req: reqwest::RequestBuilder) -> Result<()> {
        let response = req.header(ADMIN_PIN_HEADER, &self.pin).send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            anyhow::bail!("API error ({}): {}", status, body);
        }
        Ok(())
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        let url = self.url("/v1/health")?;
        self.send_json(self.http.get(url)).await
    }

    pub async fn list_products(&self, status: Option<&str>) -> Result<Vec<ProductResponse>> {
        let mut url = self.url("/v1/admin/products")?;
        if let Some(status) = status {
            url.query_pairs_mut().append_pair("status", status);
        }
        let response: ProductListResponse = self.send_json(self.http.get(url)).await?;
        Ok(response.products)
    }

    pub async fn get_product(&self, id: &str) -> Result<ProductResponse> {
        let url = self.url(&format!("/v1/admin/products/{id}"))?;
        self.send_json(self.http.get(url)).await
    }

    pub async fn create_product(&self, req: &CreateProductRequest) -> Result<ProductResponse> {
        let url = self.url("/v1/admin/products")?;
        self.send_json(self.http.post(url).json(req)).await
    }

    pub async fn delete_product(&self, id: &str) -> Result<()> {
        let url = self.url(&format!("/v1/admin/products/{id}"))?;
        self.send_empty(self.http.delete(url)).await
    }

    pub async fn upsert_category(&self, req: &UpsertCategoryRequest) -> Result<()> {
        let url = self.url("/v1/admin/categories")?;
        self.send_empty(self.http.put(url).json(req)).await
    }

    pub async fn generate_variants(
        &self,
        product_id: &str,
        sizes: &[String],
        colors: &[String],
    ) -> Result<GenerateVariantsResponse> {
        let url = self.url(&format!("/v1/admin/products/{product_id}/variants/generate"))?;
        let body = serde_json::json!({ "sizes": sizes, "colors": colors });
        self.send_json(self.http.post(url).json(&body)).await
    }

    pub async fn list_orders(&self, status: Option<&str>) -> Result<Vec<OrderResponse>> {
        let mut url = self.url("/v1/admin/orders")?;
        if let Some(status) = status {
            url.query_pairs_mut().append_pair("status", status);
        }
        let response: OrderListResponse = self.send_json(self.http.get(url)).await?;
        Ok(response.orders)
    }

    pub async fn set_order_status(&self, order_id: &str, status: &str) -> Result<OrderResponse> {
        let url = self.url(&format!("/v1/admin/orders/{order_id}/status"))?;
        let body = serde_json::json!({ "status": status });
        self.send_json(self.http.post(url).json(&body)).await
    }

    pub async fn get_settings(&self) -> Result<BTreeMap<String, String>> {
        let url = self.url("/v1/admin/settings")?;
        let response: SettingsResponse = self.send_json(self.http.get(url)).await?;
        Ok(response.settings)
    }

    pub async fn set_settings(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let url = self.url("/v1/admin/settings")?;
        self.send_empty(self.http.put(url).json(entries)).await
    }

    pub async fn rewrite(&self, text: &str, field: &str) -> Result<RewriteResponse> {
        let url = self.url("/v1/admin/rewrite")?;
        let body = serde_json::json!({ "text": text, "field": field });
        self.send_json(self.http.post(url).json(&body)).await
    }

    pub async fn generate_benefits(&self, text: &str) -> Result<BenefitsResponse> {
        let url = self.url("/v1/admin/generate-benefits")?;
        let body = serde_json::json!({ "text": text });
        self.send_json(self.http.post(url).json(&body)).await
    }
}

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Deserialize)]
pub struct ProductListResponse {
    pub products: Vec<ProductResponse>,
}

#[derive(Debug, Deserialize)]
pub struct ProductResponse {
    pub product_id: String,
    pub title: String,
    pub title_ar: String,
    pub sku: String,
    pub category_slug: String,
    pub price: f64,
    pub stock: i64,
    pub status: String,
    pub sales_count: i64,
}

#[derive(Debug, Default, Serialize)]
pub struct CreateProductRequest {
    pub title: String,
    pub title_ar: String,
    pub description: String,
    pub description_ar: String,
    pub sku: String,
    pub category_slug: String,
    pub price: f64,
    pub stock: i64,
    pub status: String,
    pub images: Vec<String>,
    pub benefits: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct UpsertCategoryRequest {
    pub slug: String,
    pub name: String,
    pub name_ar: String,
    pub position: i64,
}

#[derive(Debug, Deserialize)]
pub struct GenerateVariantsResponse {
    pub created: Vec<serde_json::Value>,
    pub skipped: usize,
}

#[derive(Debug, Deserialize)]
pub struct OrderListResponse {
    pub orders: Vec<OrderResponse>,
}

#[derive(Debug, Deserialize)]
pub struct OrderResponse {
    pub order_id: String,
    pub order_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub total: f64,
    pub status: String,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct SettingsResponse {
    pub settings: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct RewriteResponse {
    pub text: String,
    pub source: String,
}

#[derive(Debug, Deserialize)]
pub struct BenefitsResponse {
    pub benefits: Vec<String>,
    pub source: String,
}
