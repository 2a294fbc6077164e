// ── Mutation coordinator ──
//
// Every write follows the same protocol: validate locally, call the
// API, queue a success notification, re-fetch the owning collection.
// The notification reports the committed write, so it is queued before
// the re-fetch and survives a re-fetch failure. The server response
// body of a mutation is returned to the caller for display but never
// merged into the store; the re-fetch is the only store writer.

use tracing::info;

use stocklet_api::types::{ProductWrite, PurchaseCreate};

use crate::error::CoreError;
use crate::inventory::Inventory;
use crate::model::{Product, Purchase, PurchaseStatus};
use crate::store::EntityStore;

/// Checkout draft. Validated against the current product snapshot
/// before anything is sent.
#[derive(Debug, Clone)]
pub struct NewPurchase {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_mobile: String,
    pub customer_address: String,
    pub product_id: i64,
    pub quantity: u32,
    pub notes: Option<String>,
}

// ── Local validation ─────────────────────────────────────────────────

fn validate_product(name: &str, price: f64) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation {
            field: "name",
            reason: "must not be empty".into(),
        });
    }
    if !price.is_finite() || price < 0.0 {
        return Err(CoreError::Validation {
            field: "price",
            reason: "must be a non-negative number".into(),
        });
    }
    Ok(())
}

fn validate_purchase(draft: &NewPurchase, store: &EntityStore) -> Result<(), CoreError> {
    for (field, value) in [
        ("customer_name", &draft.customer_name),
        ("customer_email", &draft.customer_email),
        ("customer_mobile", &draft.customer_mobile),
        ("customer_address", &draft.customer_address),
    ] {
        if value.trim().is_empty() {
            return Err(CoreError::Validation {
                field,
                reason: "must not be empty".into(),
            });
        }
    }

    let Some(product) = store.product_by_id(draft.product_id) else {
        return Err(CoreError::Validation {
            field: "product_id",
            reason: format!("no product with id {}", draft.product_id),
        });
    };
    if draft.quantity == 0 {
        return Err(CoreError::Validation {
            field: "quantity",
            reason: "must be at least 1".into(),
        });
    }
    if draft.quantity > product.quantity {
        return Err(CoreError::Validation {
            field: "quantity",
            reason: format!(
                "only {} of {} in stock",
                product.quantity, product.name
            ),
        });
    }
    Ok(())
}

impl Inventory {
    // ── Product mutations (admin) ────────────────────────────────────

    /// Create a product, then re-fetch the list.
    pub async fn add_product(
        &self,
        name: &str,
        quantity: u32,
        price: f64,
    ) -> Result<Product, CoreError> {
        validate_product(name, price).map_err(|err| self.reject(err))?;

        let write = ProductWrite {
            name: name.trim().to_owned(),
            quantity,
            price,
        };
        let created = self
            .api()
            .add_product(&write)
            .await
            .map_err(|err| self.api_failure(err))?;
        info!(id = created.id, name = %created.name, "product added");

        self.notifier().success("Product added successfully");
        self.refresh_products().await?;
        Ok(created.into())
    }

    /// Overwrite a product, then re-fetch the list.
    pub async fn edit_product(
        &self,
        id: i64,
        name: &str,
        quantity: u32,
        price: f64,
    ) -> Result<Product, CoreError> {
        validate_product(name, price).map_err(|err| self.reject(err))?;

        let write = ProductWrite {
            name: name.trim().to_owned(),
            quantity,
            price,
        };
        let updated = self
            .api()
            .edit_product(id, &write)
            .await
            .map_err(|err| self.api_failure(err))?;
        info!(id, "product updated");

        self.notifier().success("Product updated successfully");
        self.refresh_products().await?;
        Ok(updated.into())
    }

    /// Delete a product, then re-fetch the list. Confirmation is the
    /// caller's responsibility; this method does not ask.
    pub async fn delete_product(&self, id: i64) -> Result<(), CoreError> {
        self.api()
            .delete_product(id)
            .await
            .map_err(|err| self.api_failure(err))?;
        info!(id, "product deleted");

        self.notifier().success("Product deleted successfully");
        self.refresh_products().await?;
        Ok(())
    }

    // ── Purchase mutations ───────────────────────────────────────────

    /// Submit a checkout, then re-fetch products (stock changed) and,
    /// for admin sessions, purchases as well.
    pub async fn create_purchase(&self, draft: NewPurchase) -> Result<Purchase, CoreError> {
        validate_purchase(&draft, self.store()).map_err(|err| self.reject(err))?;

        let body = PurchaseCreate {
            customer_name: draft.customer_name,
            customer_email: draft.customer_email,
            customer_mobile: draft.customer_mobile,
            customer_address: draft.customer_address,
            product_id: draft.product_id,
            quantity: draft.quantity,
            notes: draft.notes,
        };
        let created = self
            .api()
            .create_purchase(&body)
            .await
            .map_err(|err| self.api_failure(err))?;
        info!(id = created.id, product_id = created.product_id, "purchase created");

        self.notifier().success("Purchase completed successfully!");
        self.refresh_products().await?;
        if self.is_admin() {
            self.refresh_purchases().await?;
        }
        Ok(created.into())
    }

    /// Change an order's status, then re-fetch the purchase list. Any
    /// status-to-status change is allowed; the taxonomy is flat.
    pub async fn update_purchase_status(
        &self,
        id: i64,
        status: PurchaseStatus,
    ) -> Result<Purchase, CoreError> {
        let updated = self
            .api()
            .update_purchase_status(id, &status.to_string())
            .await
            .map_err(|err| self.api_failure(err))?;
        info!(id, %status, "purchase status updated");

        self.notifier()
            .success(format!("Order #{id} status updated to {status}"));
        self.refresh_purchases().await?;
        Ok(updated.into())
    }
}
