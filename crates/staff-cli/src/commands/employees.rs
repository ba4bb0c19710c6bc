use anyhow::Context;
use serde::Serialize;
use staff_core::Employee;
use staff_dashboard::{PageState, PaginatedListController};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::EmployeesArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct EmployeePageResponse {
    page: u64,
    total_pages: u64,
    total_items: u64,
    ordering: String,
    search: Option<String>,
    has_next: bool,
    has_previous: bool,
    items: Vec<Employee>,
}

impl From<PageState<Employee>> for EmployeePageResponse {
    fn from(state: PageState<Employee>) -> Self {
        Self {
            page: state.current_page,
            total_pages: state.total_pages,
            total_items: state.total_items,
            ordering: state.ordering(),
            search: Some(state.search_query).filter(|s| !s.trim().is_empty()),
            has_next: state.next_cursor.is_some(),
            has_previous: state.prev_cursor.is_some(),
            items: state.items,
        }
    }
}

pub async fn handle(args: &EmployeesArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.require_session()?;
    let list = PaginatedListController::employees(ctx.client.clone(), &ctx.config.directory);

    let mut fetched = false;
    if let Some(search) = &args.search {
        list.set_search(search);
        list.wait_for_search().await.context("search failed")?;
        fetched = true;
    }
    for field in &args.sort {
        list.set_sort(field)
            .await
            .with_context(|| format!("failed to sort by {field}"))?;
        fetched = true;
    }
    if let Some(page) = args.page {
        list.set_page(page)
            .await
            .with_context(|| format!("failed to load page {page}"))?;
    } else if !fetched {
        list.refetch().await.context("failed to load employees")?;
    }

    output(&EmployeePageResponse::from(list.state()), flags.format)
}
