//! Account command handlers

use anyhow::{bail, Context, Result};

use newshub_core::api::{LoginRequest, SignupRequest};
use newshub_core::{AuthClient, Config};

use super::{open_sessions, StorageContext};
use crate::output::Output;
use crate::prompt;

/// Create an account and keep the returned session
pub async fn signup(config: &Config, name: String, email: String, output: &Output) -> Result<()> {
    let password = prompt::password("Password")?;
    let confirm_password = match prompt::password_from_env() {
        Some(pw) => pw,
        None => prompt::password("Confirm password")?,
    };
    let request = SignupRequest::new(name, email, password, &confirm_password)?;

    let client = AuthClient::from_config(config).context("Failed to create auth client")?;
    let data = client.signup(&request).await.context("Signup failed")?;

    open_sessions(config)
        .save(&data)
        .storage_context("Failed to save session")?;

    output.success(&format!("Account created. Welcome, {}!", data.user.full_name));
    Ok(())
}

/// Log in and keep the session
pub async fn login(config: &Config, email: String, output: &Output) -> Result<()> {
    let password = prompt::password("Password")?;
    let request = LoginRequest::new(email, password);

    let client = AuthClient::from_config(config).context("Failed to create auth client")?;
    let data = client.login(&request).await.context("Login failed")?;

    open_sessions(config)
        .save(&data)
        .storage_context("Failed to save session")?;

    output.success(&format!("Logged in as {}", data.user.email));
    Ok(())
}

/// Forget the stored session
pub fn logout(config: &Config, output: &Output) -> Result<()> {
    let sessions = open_sessions(config);
    if !sessions.is_logged_in() {
        output.message("Not logged in.");
        return Ok(());
    }

    sessions.clear().storage_context("Failed to remove session")?;
    output.success("Logged out");
    Ok(())
}

/// Show the logged-in user
pub fn whoami(config: &Config, output: &Output) -> Result<()> {
    match open_sessions(config).load() {
        Some(data) => {
            output.print_user(&data.user);
            Ok(())
        }
        None => bail!("Not logged in. Run `newshub login --email <email>`."),
    }
}
