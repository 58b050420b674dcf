//! Authentication commands

use crate::api::Connection;
use crate::config::Config;
use anyhow::{Context, Result};

pub async fn login(conn: &Connection, token: Option<String>, oidc: bool) -> Result<()> {
    if oidc {
        let url = conn
            .session
            .login_with_oidc()
            .await
            .context("Failed to start OIDC sign-in")?;
        println!("Open this URL to sign in:\n\n  {}\n", url);
        println!("Then run: ocmdash callback --code <code> --state <state>");
        return Ok(());
    }

    let token = match token {
        Some(token) => token,
        None => anyhow::bail!("Provide --token <TOKEN> or --oidc"),
    };
    conn.session.login(&token).context("Failed to store token")?;
    println!("Logged in with bearer token");
    Ok(())
}

pub async fn callback(conn: &Connection, code: &str, state: &str) -> Result<()> {
    conn.session
        .complete_oidc_login(code, state)
        .await
        .context("Failed to complete OIDC sign-in")?;
    println!("Logged in with OIDC");
    Ok(())
}

pub async fn logout(conn: &Connection) -> Result<()> {
    conn.session.logout().await.context("Failed to log out")?;
    println!("Logged out");
    Ok(())
}

pub fn status(conn: &Connection, config: &Config) {
    println!("API:            {}", config.api_base_url);
    println!("Authentication: {}", conn.session.state().as_str());
    println!(
        "OIDC:           {}",
        if conn.session.oidc_enabled() {
            "enabled"
        } else {
            "disabled"
        }
    );
    if config.dev_mode {
        println!("Mode:           development (stream disabled)");
    }
}
