//! HTTP client.

use reqwest::{Client, RequestBuilder, Response, header::LINK};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::{
    error::ClientError,
    links::PageLinks,
    models::{
        Category, CategoryUpdate, ListCategories, ListProducts, NewCategory, NewProduct,
        PageBody, PaginatedResponse, Product, ProductUpdate,
    },
};

/// Entry point for the Northwind API.
#[derive(Debug, Clone)]
pub struct NorthwindClient {
    http: Client,
    base_url: String,
}

impl NorthwindClient {
    /// Build a client for the server at `base_url`, e.g. `http://localhost:8698`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(Client::new(), base_url)
    }

    /// Build a client over a preconfigured [`reqwest::Client`].
    pub fn with_http_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn products(&self) -> ProductsClient<'_> {
        ProductsClient { client: self }
    }

    pub fn categories(&self) -> CategoriesClient<'_> {
        CategoriesClient { client: self }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        debug!(status = status.as_u16(), url = %response.url(), "northwind response");

        if status.is_success() {
            return Ok(response);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(read_error) => {
                debug!(status = status.as_u16(), "failed to read error body: {read_error}");

                String::new()
            }
        };

        Err(ClientError::from_status(status, body))
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        Ok(self.send(request).await?.json().await?)
    }

    async fn page<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<PaginatedResponse<T>, ClientError> {
        let response = self.send(request).await?;

        let links = response
            .headers()
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .map(PageLinks::parse)
            .unwrap_or_default();

        let body: PageBody<T> = response.json().await?;

        Ok(PaginatedResponse {
            pagination: body.pagination,
            data: body.data,
            links,
        })
    }
}

fn page_query(page_number: Option<i64>, page_size: Option<i64>) -> Vec<(&'static str, i64)> {
    [("pageNumber", page_number), ("pageSize", page_size)]
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect()
}

#[derive(Serialize)]
struct ProductUpdateBody<'a> {
    #[serde(rename = "ProductID")]
    product_id: i32,

    #[serde(flatten)]
    update: &'a ProductUpdate,
}

#[derive(Serialize)]
struct CategoryUpdateBody<'a> {
    #[serde(rename = "CategoryID")]
    category_id: i32,

    #[serde(flatten)]
    update: &'a CategoryUpdate,
}

/// `/api/products`
#[derive(Debug, Clone, Copy)]
pub struct ProductsClient<'a> {
    client: &'a NorthwindClient,
}

impl ProductsClient<'_> {
    /// Fetch one page of products, optionally restricted to a category.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn list(&self, list: ListProducts) -> Result<PaginatedResponse<Product>, ClientError> {
        let mut query = page_query(list.page_number, list.page_size);

        if let Some(category_id) = list.category_id {
            query.push(("categoryId", i64::from(category_id)));
        }

        let request = self
            .client
            .http
            .get(self.client.url("/api/products"))
            .query(&query);

        self.client.page(request).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] for unknown ids.
    pub async fn get(&self, id: i32) -> Result<Product, ClientError> {
        let request = self
            .client
            .http
            .get(self.client.url(&format!("/api/products/{id}")));

        self.client.json(request).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError::BadRequest`] for invalid payloads.
    pub async fn create(&self, product: &NewProduct) -> Result<Product, ClientError> {
        let request = self
            .client
            .http
            .post(self.client.url("/api/products"))
            .json(product);

        self.client.json(request).await
    }

    /// Apply a partial update to product `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Conflict`] if the product changed concurrently.
    pub async fn update(&self, id: i32, update: &ProductUpdate) -> Result<Product, ClientError> {
        let request = self
            .client
            .http
            .put(self.client.url(&format!("/api/products/{id}")))
            .json(&ProductUpdateBody {
                product_id: id,
                update,
            });

        self.client.json(request).await
    }

    /// Delete product `id`, returning the removed record.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] for unknown ids.
    pub async fn delete(&self, id: i32) -> Result<Product, ClientError> {
        let request = self
            .client
            .http
            .delete(self.client.url(&format!("/api/products/{id}")));

        self.client.json(request).await
    }
}

/// `/api/categories`
#[derive(Debug, Clone, Copy)]
pub struct CategoriesClient<'a> {
    client: &'a NorthwindClient,
}

impl CategoriesClient<'_> {
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn list(
        &self,
        list: ListCategories,
    ) -> Result<PaginatedResponse<Category>, ClientError> {
        let request = self
            .client
            .http
            .get(self.client.url("/api/categories"))
            .query(&page_query(list.page_number, list.page_size));

        self.client.page(request).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] for unknown ids.
    pub async fn get(&self, id: i32) -> Result<Category, ClientError> {
        let request = self
            .client
            .http
            .get(self.client.url(&format!("/api/categories/{id}")));

        self.client.json(request).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError::BadRequest`] for invalid payloads.
    pub async fn create(&self, category: &NewCategory) -> Result<Category, ClientError> {
        let request = self
            .client
            .http
            .post(self.client.url("/api/categories"))
            .json(category);

        self.client.json(request).await
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Conflict`] if the category changed concurrently.
    pub async fn update(&self, id: i32, update: &CategoryUpdate) -> Result<Category, ClientError> {
        let request = self
            .client
            .http
            .put(self.client.url(&format!("/api/categories/{id}")))
            .json(&CategoryUpdateBody {
                category_id: id,
                update,
            });

        self.client.json(request).await
    }

    /// Delete category `id`. Fails with [`ClientError::Server`] while products still
    /// reference it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] for unknown ids.
    pub async fn delete(&self, id: i32) -> Result<Category, ClientError> {
        let request = self
            .client
            .http
            .delete(self.client.url(&format!("/api/categories/{id}")));

        self.client.json(request).await
    }
}
