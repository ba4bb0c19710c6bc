//! Admin dashboard aggregation.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use staff_api::AuthenticatedClient;
use staff_config::DashboardConfig;
use staff_core::{Employee, EntityId, Project, Task, normalize};

use crate::error::DashboardError;
use crate::fanout;
use crate::warning::{PartialDataWarning, records_or_warn};

/// Placeholder for joins that find no match.
pub const NOT_AVAILABLE: &str = "N/A";

/// Project status when the backend sends none.
pub const DEFAULT_PROJECT_STATUS: &str = "Active";

/// The admin dashboard's composite view.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardView {
    /// Employees with their department name joined in.
    pub employees: Vec<Employee>,
    /// Projects with manager name, status, and overdue count derived.
    pub projects: Vec<Project>,
    /// Every overdue task across all projects, tagged with its project.
    pub overdue_tasks: Vec<Task>,
    pub pending_leave_count: usize,
    /// Secondary fetches that failed and were replaced with empty data.
    pub warnings: Vec<PartialDataWarning>,
}

#[derive(Debug, Clone)]
pub struct AggregationEngine {
    client: AuthenticatedClient,
    max_concurrent_task_fetches: usize,
}

impl AggregationEngine {
    #[must_use]
    pub fn new(client: AuthenticatedClient, config: &DashboardConfig) -> Self {
        Self {
            client,
            max_concurrent_task_fetches: config.max_concurrent_task_fetches,
        }
    }

    /// Build the dashboard as of now.
    ///
    /// # Errors
    ///
    /// Only `DashboardError::Session`, when the employees request (the first,
    /// session-establishing fetch) is unauthenticated or the session expired.
    /// Every other failure is downgraded to a [`PartialDataWarning`].
    pub async fn load_dashboard(&self) -> Result<DashboardView, DashboardError> {
        self.load_dashboard_at(Utc::now()).await
    }

    /// Build the dashboard, judging overdue tasks against `now`.
    ///
    /// # Errors
    ///
    /// See [`Self::load_dashboard`].
    pub async fn load_dashboard_at(
        &self,
        now: DateTime<Utc>,
    ) -> Result<DashboardView, DashboardError> {
        let endpoints = self.client.endpoints();
        let employees_url = endpoints.employees();
        let projects_url = endpoints.projects();
        let leaves_url = endpoints.leave_requests();
        let departments_url = endpoints.departments();
        let (employees, projects, leaves, departments) = tokio::join!(
            self.client.get(&employees_url),
            self.client.get(&projects_url),
            self.client.get(&leaves_url),
            self.client.get(&departments_url),
        );

        let employees = match employees {
            Err(e) if e.is_session_error() => {
                tracing::warn!(%e, "dashboard load aborted");
                return Err(DashboardError::Session(e));
            }
            other => other,
        };

        let mut warnings = Vec::new();
        let employees = normalize::collection(
            &records_or_warn("employees", employees, &mut warnings),
            normalize::employee,
        );
        let projects = normalize::collection(
            &records_or_warn("projects", projects, &mut warnings),
            normalize::project,
        );
        let leaves = normalize::collection(
            &records_or_warn("leave requests", leaves, &mut warnings),
            normalize::leave_request,
        );
        let departments = normalize::collection(
            &records_or_warn("departments", departments, &mut warnings),
            normalize::department,
        );

        let department_names: HashMap<EntityId, String> = departments
            .into_iter()
            .filter(|d| !d.provisional_id)
            .map(|d| (d.id, d.name))
            .collect();
        let employee_names: HashMap<EntityId, String> = employees
            .iter()
            .filter(|e| !e.provisional_id)
            .map(|e| (e.id.clone(), e.name.clone()))
            .collect();

        let (projects, overdue_tasks) = self
            .enrich_projects(projects, &employee_names, now, &mut warnings)
            .await;

        let pending_leave_count = leaves.iter().filter(|l| l.is_pending()).count();
        let employees = employees
            .into_iter()
            .map(|e| with_department(e, &department_names))
            .collect();

        tracing::debug!(
            projects = projects.len(),
            overdue = overdue_tasks.len(),
            pending_leave_count,
            warnings = warnings.len(),
            "dashboard assembled"
        );
        Ok(DashboardView {
            employees,
            projects,
            overdue_tasks,
            pending_leave_count,
            warnings,
        })
    }

    /// Fetch every project's tasks and derive manager name, status, and
    /// overdue count. Returns the projects and the overdue tasks of all of them.
    async fn enrich_projects(
        &self,
        projects: Vec<Project>,
        employee_names: &HashMap<EntityId, String>,
        now: DateTime<Utc>,
        warnings: &mut Vec<PartialDataWarning>,
    ) -> (Vec<Project>, Vec<Task>) {
        let endpoints = self.client.endpoints();
        // Provisional ids are row keys, not backend ids; there is nothing to fetch.
        let requests = projects
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.provisional_id)
            .map(|(slot, p)| (slot, endpoints.project_tasks(&p.id)))
            .collect();
        let mut task_results = fanout::get_all(
            &self.client,
            requests,
            projects.len(),
            self.max_concurrent_task_fetches,
        )
        .await;

        let mut overdue_tasks = Vec::new();
        let projects = projects
            .into_iter()
            .zip(task_results.iter_mut())
            .map(|(mut project, result)| {
                let manager_name = project
                    .manager_id
                    .as_ref()
                    .and_then(|id| employee_names.get(id))
                    .cloned()
                    .or_else(|| project.manager_name.take());
                project.manager_name =
                    Some(manager_name.unwrap_or_else(|| NOT_AVAILABLE.to_string()));
                if project.status.is_none() {
                    project.status = Some(DEFAULT_PROJECT_STATUS.to_string());
                }

                let resource = format!("tasks of project {}", project.id);
                let tasks = match result.take() {
                    Some(r) => normalize::collection(
                        &records_or_warn(&resource, r, warnings),
                        normalize::task,
                    ),
                    None => Vec::new(),
                };
                let overdue: Vec<Task> = tasks
                    .into_iter()
                    .filter(|t| t.is_overdue_at(now))
                    .map(|t| tag_with_project(t, &project))
                    .collect();
                project.overdue_count = overdue.len();
                overdue_tasks.extend(overdue);
                project
            })
            .collect();
        (projects, overdue_tasks)
    }
}

fn tag_with_project(mut task: Task, project: &Project) -> Task {
    task.project_id = Some(project.id.clone());
    task.project_name = Some(project.name.clone());
    task
}

fn with_department(mut employee: Employee, departments: &HashMap<EntityId, String>) -> Employee {
    let joined = employee
        .department_id
        .as_ref()
        .and_then(|id| departments.get(id))
        .cloned()
        .or_else(|| employee.department_name.take());
    employee.department_name = Some(joined.unwrap_or_else(|| NOT_AVAILABLE.to_string()));
    employee
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn project(id: i64, name: &str) -> Project {
        normalize::project(&json!({"id": id, "name": name}), 1)
    }

    #[test]
    fn overdue_tasks_carry_their_project() {
        let task = normalize::task(&json!({"id": 3, "name": "Ship", "project": 99}), 1);
        let tagged = tag_with_project(task, &project(7, "Apollo"));
        assert_eq!(tagged.project_id, Some(EntityId::Number(7)));
        assert_eq!(tagged.project_name.as_deref(), Some("Apollo"));
    }

    #[test]
    fn department_join_prefers_lookup_then_payload_then_placeholder() {
        let departments = HashMap::from([(EntityId::Number(2), "Finance".to_string())]);

        let joined = with_department(
            normalize::employee(&json!({"id": 1, "department": 2, "department_name": "Old"}), 1),
            &departments,
        );
        assert_eq!(joined.department_name.as_deref(), Some("Finance"));

        let from_payload = with_department(
            normalize::employee(&json!({"id": 1, "department": {"id": 5, "name": "Legal"}}), 1),
            &departments,
        );
        assert_eq!(from_payload.department_name.as_deref(), Some("Legal"));

        let missing = with_department(normalize::employee(&json!({"id": 1}), 1), &departments);
        assert_eq!(missing.department_name.as_deref(), Some(NOT_AVAILABLE));
    }
}
