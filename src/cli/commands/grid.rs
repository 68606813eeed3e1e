use clap::Subcommand;
use serde_json::json;
use std::sync::Arc;

use crate::api::ApiClient;
use crate::cli::config::Workspace;
use crate::cli::utils::{output_empty_collection, output_error, output_json};
use crate::cli::OutputFormat;
use crate::config::config;
use crate::error::ClientError;
use crate::filter::{ColumnFilterValue, FilterParser, FilterSet, SortConfig};
use crate::grid::{
    Company, DataGrid, Entity, EntityKind, EntityService, FetchOutcome, MenuRecord, PaginatedRequest,
    PaginationState, Role, User,
};

#[derive(Subcommand)]
pub enum GridCommands {
    #[command(about = "Fetch one page of an entity listing")]
    List {
        #[arg(help = "Entity: users, roles, companies or menus")]
        entity: EntityKind,
        #[arg(long, default_value_t = 1, help = "Page number (1-based)")]
        page: u32,
        #[arg(long, help = "Rows per page")]
        page_size: Option<u32>,
        #[arg(long, help = "Sort, e.g. name:desc,email")]
        sort: Option<String>,
        #[arg(long = "filter", help = "Column filter field:operator[:value], repeatable")]
        filters: Vec<String>,
    },

    #[command(about = "Row counts for every entity")]
    Summary,
}

struct ListView {
    pagination: PaginationState,
    sorting: Vec<SortConfig>,
    filters: FilterSet,
}

pub async fn handle(cmd: GridCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let workspace = Workspace::load()?;

    match cmd {
        GridCommands::List {
            entity,
            page,
            page_size,
            sort,
            filters,
        } => {
            let settings = &config().grid;
            let page_size = page_size.unwrap_or(settings.default_page_size);
            if !settings.page_size_options.contains(&page_size) {
                tracing::warn!("Page size {} is not one of {:?}", page_size, settings.page_size_options);
            }

            let filter_set = FilterSet::new();
            for raw in &filters {
                let filter = FilterParser::parse_filter(raw)?;
                filter_set.set(
                    &filter.field,
                    Some(ColumnFilterValue {
                        value: filter.value,
                        operator: filter.operator,
                    }),
                );
            }

            let view = ListView {
                pagination: PaginationState {
                    page_index: page.saturating_sub(1),
                    page_size: page_size.max(1),
                },
                sorting: match sort {
                    Some(sort) => FilterParser::parse_sort(&sort)?,
                    None => Vec::new(),
                },
                filters: filter_set,
            };

            match entity {
                EntityKind::Users => list::<User>(&workspace, view, &output_format).await,
                EntityKind::Roles => list::<Role>(&workspace, view, &output_format).await,
                EntityKind::Companies => list::<Company>(&workspace, view, &output_format).await,
                EntityKind::Menus => list::<MenuRecord>(&workspace, view, &output_format).await,
            }
        }
        GridCommands::Summary => summary(&workspace.client, &output_format).await,
    }
}

async fn list<E: Entity>(workspace: &Workspace, view: ListView, output_format: &OutputFormat) -> anyhow::Result<()> {
    let service = EntityService::<E>::new(workspace.client.clone());
    let grid = DataGrid::new(Arc::new(service), view.filters, &config().grid);
    grid.set_view(view.pagination, view.sorting);

    if let FetchOutcome::Failed(message) = grid.refresh().await {
        return output_error(output_format, &message, None);
    }

    let state = grid.snapshot();
    let collection = E::KIND.collection();
    match output_format {
        OutputFormat::Json => output_json(&json!({
            "entity": collection,
            "page": state.pagination.page_index + 1,
            "page_size": state.pagination.page_size,
            "total": state.total,
            "total_pages": state.total_pages,
            "data": state.rows,
        })),
        OutputFormat::Text => {
            if state.rows.is_empty() {
                return output_empty_collection(output_format, collection, &format!("No {} found", collection));
            }
            for row in &state.rows {
                match row.id() {
                    Some(id) => println!("{:>8}  {}", id, row.label()),
                    None => println!("{:>8}  {}", "-", row.label()),
                }
            }
            println!(
                "Page {} of {} ({} {} total)",
                state.pagination.page_index + 1,
                state.total_pages.max(1),
                state.total,
                collection
            );
            Ok(())
        }
    }
}

async fn count<E: Entity>(client: &ApiClient) -> Result<u64, ClientError> {
    let request = PaginatedRequest::new(PaginationState::new(1), Vec::new(), Vec::new());
    let page = EntityService::<E>::new(client.clone()).paginate(&request).await?;
    Ok(page.total)
}

async fn summary(client: &ApiClient, output_format: &OutputFormat) -> anyhow::Result<()> {
    let (users, roles, companies, menus) = futures::join!(
        count::<User>(client),
        count::<Role>(client),
        count::<Company>(client),
        count::<MenuRecord>(client),
    );
    let counts = [
        (EntityKind::Users, users),
        (EntityKind::Roles, roles),
        (EntityKind::Companies, companies),
        (EntityKind::Menus, menus),
    ];

    match output_format {
        OutputFormat::Json => {
            let entries: Vec<_> = counts
                .iter()
                .map(|(kind, result)| match result {
                    Ok(total) => json!({ "entity": kind, "total": total }),
                    Err(e) => json!({ "entity": kind, "error": e.to_json() }),
                })
                .collect();
            output_json(&json!({ "summary": entries }))
        }
        OutputFormat::Text => {
            for (kind, result) in &counts {
                match result {
                    Ok(total) => println!("{:<10} {}", kind.collection(), total),
                    Err(e) => println!("{:<10} error: {}", kind.collection(), e),
                }
            }
            Ok(())
        }
    }
}
