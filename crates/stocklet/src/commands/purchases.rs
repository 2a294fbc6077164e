//! Purchase command handlers.

use tabled::Tabled;

use stocklet_core::{Inventory, NewPurchase, Purchase};

use crate::cli::{GlobalOpts, PurchaseCreateArgs, PurchasesArgs, PurchasesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ────────────────────────────────────────────────────────

#[derive(Tabled)]
struct PurchaseRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Product")]
    product_id: i64,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&Purchase> for PurchaseRow {
    fn from(p: &Purchase) -> Self {
        Self {
            id: p.id,
            customer: p.customer_name.clone(),
            product_id: p.product_id,
            quantity: p.quantity,
            status: p.status.to_string(),
            total: p
                .total_price
                .map(|t| format!("{t:.2}"))
                .unwrap_or_default(),
            created: p
                .created_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        }
    }
}

fn purchase_detail(p: &Purchase) -> String {
    let total = p
        .total_price
        .map(|t| format!(" for {t:.2}"))
        .unwrap_or_default();
    format!(
        "Order #{}: {} x product #{} ({}){total}",
        p.id, p.quantity, p.product_id, p.status
    )
}

// ── Handler ──────────────────────────────────────────────────────────

pub async fn handle(
    inventory: &Inventory,
    args: PurchasesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    util::require_session(inventory).await?;

    match args.command {
        PurchasesCommand::List => {
            inventory.refresh_purchases().await?;
            let items: Vec<Purchase> = inventory.store().purchases().iter().cloned().collect();
            let out = output::render_list(
                &global.output,
                &items,
                |p| PurchaseRow::from(p),
                |p| p.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PurchasesCommand::Create(create) => checkout(inventory, create, global).await,

        PurchasesCommand::SetStatus { id, status } => {
            let updated = inventory.update_purchase_status(id, status.into()).await?;
            output::print_notifications(inventory.notifier(), &global.color, global.quiet);
            let out = output::render_single(&global.output, &updated, purchase_detail, |p| {
                p.status.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

async fn checkout(
    inventory: &Inventory,
    args: PurchaseCreateArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let created = inventory
        .create_purchase(NewPurchase {
            customer_name: args.name,
            customer_email: args.email,
            customer_mobile: args.mobile,
            customer_address: args.address,
            product_id: args.product,
            quantity: args.quantity,
            notes: args.notes,
        })
        .await?;

    output::print_notifications(inventory.notifier(), &global.color, global.quiet);
    let out = output::render_single(&global.output, &created, purchase_detail, |p| {
        p.id.to_string()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}
