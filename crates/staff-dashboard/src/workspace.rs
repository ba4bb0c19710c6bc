//! The signed-in employee's workspace: assigned projects and their
//! high-priority tasks.

use serde::Serialize;
use staff_api::{AuthenticatedClient, ClientError};
use staff_config::DashboardConfig;
use staff_core::{EntityId, Page, Project, Task, normalize};

use crate::error::DashboardError;
use crate::fanout;
use crate::warning::{PartialDataWarning, records_or_warn};

#[derive(Debug, Clone, Default, Serialize)]
pub struct EmployeeView {
    pub projects: Vec<Project>,
    /// `high` and `critical` tasks across the listed projects.
    pub high_priority_tasks: Vec<Task>,
    /// No project named the user, so every project is listed.
    pub showing_all_projects: bool,
    pub warnings: Vec<PartialDataWarning>,
}

#[derive(Debug, Clone)]
pub struct EmployeeWorkspace {
    client: AuthenticatedClient,
    max_concurrent_task_fetches: usize,
}

impl EmployeeWorkspace {
    #[must_use]
    pub fn new(client: AuthenticatedClient, config: &DashboardConfig) -> Self {
        Self {
            client,
            max_concurrent_task_fetches: config.max_concurrent_task_fetches,
        }
    }

    /// Load the workspace for the current session's user.
    ///
    /// # Errors
    ///
    /// Any failure of the projects request. Per-project task failures are
    /// returned as warnings instead.
    pub async fn load(&self) -> Result<EmployeeView, DashboardError> {
        let session = self
            .client
            .tokens()
            .get()
            .ok_or(DashboardError::Session(ClientError::Unauthenticated))?;
        let endpoints = self.client.endpoints();

        let body = self.client.get(&endpoints.projects()).await?;
        let projects = normalize::collection(&Page::from_value(body).results, normalize::project);
        let email = session.email();
        let (projects, showing_all_projects) =
            assigned_projects(projects, session.user_id.as_ref(), email.as_deref());

        let requests = projects
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.provisional_id)
            .map(|(slot, p)| (slot, format!("{}?priority=high", endpoints.project_tasks(&p.id))))
            .collect();
        let results = fanout::get_all(
            &self.client,
            requests,
            projects.len(),
            self.max_concurrent_task_fetches,
        )
        .await;

        let mut warnings = Vec::new();
        let mut high_priority_tasks = Vec::new();
        for (project, result) in projects.iter().zip(results) {
            let Some(result) = result else { continue };
            let resource = format!("tasks of project {}", project.id);
            let raw = records_or_warn(&resource, result, &mut warnings);
            high_priority_tasks.extend(
                normalize::collection(&raw, normalize::task)
                    .into_iter()
                    .filter(Task::is_high_priority)
                    .map(|mut task| {
                        task.project_id = Some(project.id.clone());
                        task.project_name = Some(project.name.clone());
                        task
                    }),
            );
        }

        Ok(EmployeeView {
            projects,
            high_priority_tasks,
            showing_all_projects,
            warnings,
        })
    }
}

/// Keep the projects that involve the user as member or manager.
///
/// When none do (or the user cannot be identified) every project is kept and
/// the flag is `true`.
#[must_use]
pub fn assigned_projects(
    projects: Vec<Project>,
    user_id: Option<&EntityId>,
    email: Option<&str>,
) -> (Vec<Project>, bool) {
    let (mine, others): (Vec<_>, Vec<_>) = projects
        .into_iter()
        .partition(|p| p.involves(user_id, email));
    if mine.is_empty() {
        (others, true)
    } else {
        (mine, false)
    }
}
