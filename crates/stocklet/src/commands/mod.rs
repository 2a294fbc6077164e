//! Command dispatch: bridges CLI args -> Inventory calls -> output.

pub mod auth;
pub mod products;
pub mod purchases;
pub mod util;

use stocklet_core::Inventory;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    inventory: &Inventory,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Login(args) => auth::login(inventory, args, global).await,
        Command::Register(args) => auth::register(inventory, args, global).await,
        Command::Logout => auth::logout(inventory, global),
        Command::Whoami => auth::whoami(inventory, global).await,
        Command::Products(args) => products::handle(inventory, args, global).await,
        Command::Purchases(args) => purchases::handle(inventory, args, global).await,
        // Completions are handled before dispatch
        Command::Completions(_) => unreachable!(),
    }
}
