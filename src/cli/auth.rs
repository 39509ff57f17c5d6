//! Account CLI commands: login, logout, register, whoami

use std::io::{self, BufRead, Write};

use super::CommandContext;
use crate::api::SecretString;
use crate::error::{PfError, PfResult};

/// Prompt on the terminal for a value that may be shown
fn prompt(label: &str) -> PfResult<String> {
    print!("{}: ", label);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Use the given password, or ask for it without echo
fn password_or_prompt(password: Option<String>, label: &str) -> PfResult<SecretString> {
    match password {
        Some(password) => Ok(SecretString::new(password)),
        None => rpassword::prompt_password(format!("{}: ", label))
            .map(SecretString::new)
            .map_err(|e| PfError::Io(format!("Failed to read password: {}", e))),
    }
}

pub fn handle_login(
    ctx: &CommandContext,
    username: Option<String>,
    password: Option<String>,
) -> PfResult<()> {
    let auth = ctx.auth()?;
    let username = match username {
        Some(username) => username,
        None => prompt("Username")?,
    };
    let password = password_or_prompt(password, "Password")?;

    let session = auth.login(&username, &password)?;
    println!("Logged in as {}", session.user.username);
    if !session.user.email.is_empty() {
        println!("  Email: {}", session.user.email);
    }
    Ok(())
}

pub fn handle_logout(ctx: &CommandContext) -> PfResult<()> {
    if ctx.auth()?.logout()? {
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

pub fn handle_register(
    ctx: &CommandContext,
    username: String,
    email: String,
    password: Option<String>,
) -> PfResult<()> {
    let auth = ctx.auth()?;
    let password = match password {
        Some(password) => SecretString::new(password),
        None => {
            let first = password_or_prompt(None, "Password")?;
            let confirm = password_or_prompt(None, "Confirm password")?;
            if first.expose() != confirm.expose() {
                return Err(PfError::Validation("Passwords do not match".into()));
            }
            first
        }
    };

    let session = auth.register(&username, &email, password)?;
    println!("Registered and logged in as {}", session.user.username);
    Ok(())
}

pub fn handle_whoami(ctx: &CommandContext) -> PfResult<()> {
    let user = ctx.auth()?.whoami()?;
    println!("{} ({})", user.username, user.id);
    if !user.email.is_empty() {
        println!("  Email: {}", user.email);
    }
    Ok(())
}
