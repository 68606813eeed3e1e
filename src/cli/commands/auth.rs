use clap::Subcommand;
use serde_json::json;

use crate::auth::{TokenStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use crate::cli::config::Workspace;
use crate::cli::utils::{output_error, output_success, token_preview};
use crate::cli::OutputFormat;
use crate::menu::MenuLoadPhase;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Store tokens obtained from the login flow and load the menu")]
    Token {
        #[arg(help = "Access token")]
        access: String,
        #[arg(long, help = "Refresh token")]
        refresh: Option<String>,
    },

    #[command(about = "Remove stored tokens")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let workspace = Workspace::load()?;

    match cmd {
        AuthCommands::Token { access, refresh } => {
            if access.trim().is_empty() {
                anyhow::bail!("access token must not be empty");
            }
            let session = workspace.session();
            let menu = workspace.menu_context();
            let listener = menu.listen(&workspace.events);

            session.login_with_tokens(&access, refresh.as_deref())?;
            let state = menu.settled().await;
            listener.abort();

            if state.phase == MenuLoadPhase::Failed {
                let message = format!(
                    "Tokens stored, but the menu could not be loaded: {}",
                    state.error.unwrap_or_default()
                );
                return output_error(&output_format, &message, Some("MENU_LOAD_FAILED"));
            }

            let paths = menu.get_allowed_paths();
            output_success(
                &output_format,
                &format!("Tokens stored, menu loaded with {} allowed paths", paths.len()),
                Some(json!({ "allowed_paths": paths })),
            )
        }
        AuthCommands::Logout => {
            workspace.session().logout()?;
            output_success(&output_format, "Logged out", None)
        }
        AuthCommands::Status => {
            let file = workspace.tokens.load()?;
            let access = workspace.tokens.access_token();

            match output_format {
                OutputFormat::Json => {
                    let updated_at = file.tokens.get(ACCESS_TOKEN_KEY).map(|entry| entry.updated_at);
                    output_success(
                        &output_format,
                        if access.is_some() { "Authenticated" } else { "Not authenticated" },
                        Some(json!({
                            "authenticated": access.is_some(),
                            "access_token": access.as_deref().map(token_preview),
                            "has_refresh_token": workspace.tokens.get(REFRESH_TOKEN_KEY).is_some(),
                            "updated_at": updated_at,
                            "store": workspace.tokens.path().display().to_string(),
                        })),
                    )
                }
                OutputFormat::Text => {
                    match access {
                        Some(token) => {
                            println!("Authenticated (token {})", token_preview(&token));
                            if let Some(entry) = file.tokens.get(ACCESS_TOKEN_KEY) {
                                println!("Stored: {}", entry.updated_at.to_rfc3339());
                            }
                        }
                        None => println!("Not authenticated"),
                    }
                    println!("Token store: {}", workspace.tokens.path().display());
                    Ok(())
                }
            }
        }
    }
}
