//! Shared helpers for command handlers.

use secrecy::SecretString;

use stocklet_core::Inventory;

use crate::error::CliError;

/// Resume the persisted session, failing with a login hint when there
/// is none (or the server rejected the stored token).
pub async fn require_session(inventory: &Inventory) -> Result<(), CliError> {
    if inventory.restore_session().await {
        Ok(())
    } else {
        Err(CliError::NotLoggedIn)
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Use the flag value or prompt for a line of input.
pub fn prompt_if_missing(value: Option<String>, prompt: &str) -> Result<String, CliError> {
    match value {
        Some(v) => Ok(v),
        None => dialoguer::Input::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(|e| CliError::Io(std::io::Error::other(e))),
    }
}

/// Use the flag value or prompt without echo.
pub fn prompt_password(value: Option<String>) -> Result<SecretString, CliError> {
    match value {
        Some(v) => Ok(SecretString::from(v)),
        None => Ok(SecretString::from(rpassword::prompt_password("Password: ")?)),
    }
}
