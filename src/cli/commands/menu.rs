use clap::Subcommand;
use serde_json::json;

use crate::cli::config::Workspace;
use crate::cli::utils::{output_error, output_json};
use crate::cli::OutputFormat;
use crate::guard::{GuardDecision, GuardOptions, RouteGuard};
use crate::menu::{route_permissions, MenuLoadState, MenuNode};

#[derive(Subcommand)]
pub enum MenuCommands {
    #[command(about = "Print the navigation tree for the stored session")]
    Show,

    #[command(about = "List the allowed route paths")]
    Paths,

    #[command(about = "Check whether routes would be rendered or redirected")]
    Check {
        #[arg(required = true, help = "Route paths to check")]
        paths: Vec<String>,
    },
}

pub async fn handle(cmd: MenuCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let workspace = Workspace::load()?;
    let menu = workspace.menu_context();
    menu.bootstrap().await;
    let state = menu.snapshot();

    if let Some(error) = &state.error {
        output_error(
            &output_format,
            &format!("Menu load failed, showing static menu: {}", error),
            Some("MENU_LOAD_FAILED"),
        )?;
    }

    match cmd {
        MenuCommands::Show => match output_format {
            OutputFormat::Json => output_json(&json!({ "menu": state.tree })),
            OutputFormat::Text => {
                print_tree(&state.tree, 0);
                Ok(())
            }
        },
        MenuCommands::Paths => {
            let paths = menu.get_allowed_paths();
            match output_format {
                OutputFormat::Json => output_json(&json!({ "allowed_paths": paths })),
                OutputFormat::Text => {
                    for path in paths {
                        println!("{}", path);
                    }
                    Ok(())
                }
            }
        }
        MenuCommands::Check { paths } => check_paths(&workspace, &state, &paths, &output_format),
    }
}

fn check_paths(
    workspace: &Workspace,
    state: &MenuLoadState,
    paths: &[String],
    output_format: &OutputFormat,
) -> anyhow::Result<()> {
    let auth = workspace.session().snapshot();
    let mut guard = RouteGuard::new(GuardOptions::default());

    let results: Vec<_> = paths
        .iter()
        .map(|path| {
            let decision = guard.check(path, &auth, state);
            let in_menu = route_permissions(path, &state.tree).iter().any(|p| p.current);
            (path, decision, in_menu)
        })
        .collect();

    match output_format {
        OutputFormat::Json => {
            let checks: Vec<_> = results
                .iter()
                .map(|(path, decision, in_menu)| {
                    let (outcome, redirect) = match decision {
                        GuardDecision::Render => ("render", None),
                        GuardDecision::Loading => ("loading", None),
                        GuardDecision::Redirect { to } => ("redirect", Some(to.clone())),
                    };
                    json!({ "path": path, "decision": outcome, "redirect_to": redirect, "menu_entry": in_menu })
                })
                .collect();
            output_json(&json!({ "authenticated": auth.is_authenticated(), "checks": checks }))
        }
        OutputFormat::Text => {
            if !auth.is_authenticated() {
                println!("(not authenticated: every route renders)");
            }
            for (path, decision, _) in &results {
                match decision {
                    GuardDecision::Render => println!("✓ {}", path),
                    GuardDecision::Loading => println!("… {}", path),
                    GuardDecision::Redirect { to } => println!("✗ {} -> {}", path, to),
                }
            }
            Ok(())
        }
    }
}

fn print_tree(nodes: &[MenuNode], depth: usize) {
    for node in nodes {
        let indent = "  ".repeat(depth);
        if node.heading.is_some() {
            println!("{}# {}", indent, node.title);
        } else if node.path.is_empty() {
            println!("{}{}", indent, node.title);
        } else {
            let disabled = if node.disabled { " (disabled)" } else { "" };
            println!("{}{}  {}{}", indent, node.title, node.path, disabled);
        }
        print_tree(&node.children, depth + 1);
    }
}
