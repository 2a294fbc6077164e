//! Product command handlers.

use tabled::Tabled;

use stocklet_core::{sort_products, Inventory, Product};

use crate::cli::{GlobalOpts, ProductListArgs, ProductsArgs, ProductsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ────────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "In stock")]
    quantity: u32,
    #[tabled(rename = "Price")]
    price: String,
}

impl From<&Product> for ProductRow {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            quantity: p.quantity,
            price: format!("{:.2}", p.price),
        }
    }
}

fn product_detail(p: &Product) -> String {
    format!(
        "#{} {} -- {} in stock at {:.2}",
        p.id, p.name, p.quantity, p.price
    )
}

// ── Handler ──────────────────────────────────────────────────────────

pub async fn handle(
    inventory: &Inventory,
    args: ProductsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    util::require_session(inventory).await?;

    match args.command {
        ProductsCommand::List(list) => {
            inventory.refresh_products().await?;
            let items = apply_list_args(inventory, &list);
            let out = output::render_list(
                &global.output,
                &items,
                |p| ProductRow::from(p),
                |p| p.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProductsCommand::Add {
            name,
            quantity,
            price,
        } => {
            let created = inventory.add_product(&name, quantity, price).await?;
            output::print_notifications(inventory.notifier(), &global.color, global.quiet);
            let out = output::render_single(&global.output, &created, product_detail, |p| {
                p.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProductsCommand::Edit {
            id,
            name,
            quantity,
            price,
        } => {
            let updated = inventory.edit_product(id, &name, quantity, price).await?;
            output::print_notifications(inventory.notifier(), &global.color, global.quiet);
            let out = output::render_single(&global.output, &updated, product_detail, |p| {
                p.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProductsCommand::Delete { id } => {
            if !util::confirm(&format!("Delete product #{id}? This is permanent."), global.yes)? {
                return Ok(());
            }
            inventory.delete_product(id).await?;
            output::print_notifications(inventory.notifier(), &global.color, global.quiet);
            Ok(())
        }
    }
}

/// Apply `--search` and `--sort`/`--order` to the fetched snapshot. Both
/// views live in the store; this only composes them.
fn apply_list_args(inventory: &Inventory, list: &ProductListArgs) -> Vec<Product> {
    let store = inventory.store();
    let mut items = match &list.search {
        Some(query) => store.filtered_by(query),
        None => store.products().iter().cloned().collect(),
    };
    if let Some(field) = list.sort {
        sort_products(&mut items, field.into(), list.order.into());
    }
    items
}
