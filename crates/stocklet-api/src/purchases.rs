// Purchase / order endpoints

use serde_json::json;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{PurchaseCreate, PurchaseListResponse, PurchasePayload};

impl ApiClient {
    /// Fetch all purchases, unwrapping the `{purchases: [...]}` envelope.
    /// The backend restricts this to admin sessions.
    pub async fn list_purchases(&self) -> Result<Vec<PurchasePayload>, Error> {
        let resp: PurchaseListResponse = self.get("purchases/").await?;
        Ok(resp.purchases)
    }

    /// Submit a checkout via `POST /purchases/create/`.
    pub async fn create_purchase(
        &self,
        purchase: &PurchaseCreate,
    ) -> Result<PurchasePayload, Error> {
        self.post("purchases/create/", purchase).await
    }

    /// Set a purchase's status via `PUT /purchases/update-status/{id}/`.
    ///
    /// The status taxonomy is a flat enumeration; the backend accepts any
    /// value-to-value change and this client does not guard transitions.
    pub async fn update_purchase_status(
        &self,
        id: i64,
        status: &str,
    ) -> Result<PurchasePayload, Error> {
        self.put(
            &format!("purchases/update-status/{id}/"),
            &json!({ "status": status }),
        )
        .await
    }
}
