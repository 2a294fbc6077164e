//! Session command handlers: login, register, logout, whoami.

use stocklet_core::Inventory;

use crate::cli::{GlobalOpts, LoginArgs, RegisterArgs};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn login(
    inventory: &Inventory,
    args: LoginArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let username = util::prompt_if_missing(args.username, "Username")?;
    let password = util::prompt_password(args.password)?;

    inventory.login(&username, &password).await?;
    output::print_notifications(inventory.notifier(), &global.color, global.quiet);
    Ok(())
}

pub async fn register(
    inventory: &Inventory,
    args: RegisterArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let username = util::prompt_if_missing(args.username, "Username")?;
    let email = util::prompt_if_missing(args.email, "Email")?;
    let password = util::prompt_password(args.password)?;

    inventory.register(&username, &email, &password).await?;
    output::print_notifications(inventory.notifier(), &global.color, global.quiet);
    Ok(())
}

pub fn logout(inventory: &Inventory, global: &GlobalOpts) -> Result<(), CliError> {
    inventory.logout();
    if !global.quiet {
        eprintln!("Logged out");
    }
    Ok(())
}

pub async fn whoami(inventory: &Inventory, global: &GlobalOpts) -> Result<(), CliError> {
    util::require_session(inventory).await?;
    // require_session only returns Ok with a user in place.
    let user = inventory.current_user().ok_or(CliError::NotLoggedIn)?;

    let out = output::render_single(
        &global.output,
        &user,
        |u| format!("{} ({})", u.username, u.role),
        |u| u.username.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
