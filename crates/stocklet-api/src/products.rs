// Product endpoints
//
// All mutations go through POST paths (the backend exposes no DELETE
// verb); the caller re-fetches the collection after any of them succeed.

use serde_json::json;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{ProductListResponse, ProductPayload, ProductWrite};

impl ApiClient {
    /// Fetch the full product list, unwrapping the `{products: [...]}`
    /// envelope.
    pub async fn list_products(&self) -> Result<Vec<ProductPayload>, Error> {
        let resp: ProductListResponse = self.get("products/").await?;
        Ok(resp.products)
    }

    /// Create a product via `POST /products/add/`. Returns the created
    /// product, id assigned by the server.
    pub async fn add_product(&self, product: &ProductWrite) -> Result<ProductPayload, Error> {
        self.post("products/add/", product).await
    }

    /// Overwrite a product via `POST /products/edit/{id}/`.
    pub async fn edit_product(
        &self,
        id: i64,
        product: &ProductWrite,
    ) -> Result<ProductPayload, Error> {
        self.post(&format!("products/edit/{id}/"), product).await
    }

    /// Delete a product via `POST /products/delete/{id}/`. The response
    /// carries status only.
    pub async fn delete_product(&self, id: i64) -> Result<(), Error> {
        self.post_unit(&format!("products/delete/{id}/"), &json!({}))
            .await
    }
}
