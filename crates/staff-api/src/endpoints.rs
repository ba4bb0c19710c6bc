//! Backend endpoint table.

use staff_core::EntityId;

pub const EMPLOYEES: &str = "/employees/employee/";
pub const PROJECTS: &str = "/projects/projects/";
pub const LEAVE_REQUESTS: &str = "/employees/leave/";
pub const DEPARTMENTS: &str = "/admin/department/";
pub const TOKEN_REFRESH: &str = "/token/refresh/";

/// Absolute URLs for every resource, rooted at the configured API base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Absolute URLs (e.g. pagination cursors) pass through verbatim; paths
    /// are joined onto the base.
    #[must_use]
    pub fn resolve(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else if url.starts_with('/') {
            format!("{}{url}", self.base)
        } else {
            format!("{}/{url}", self.base)
        }
    }

    #[must_use]
    pub fn employees(&self) -> String {
        self.resolve(EMPLOYEES)
    }

    #[must_use]
    pub fn projects(&self) -> String {
        self.resolve(PROJECTS)
    }

    #[must_use]
    pub fn project_tasks(&self, project: &EntityId) -> String {
        format!(
            "{}{}/tasks/",
            self.projects(),
            urlencoding::encode(&project.as_path_segment())
        )
    }

    #[must_use]
    pub fn leave_requests(&self) -> String {
        self.resolve(LEAVE_REQUESTS)
    }

    #[must_use]
    pub fn departments(&self) -> String {
        self.resolve(DEPARTMENTS)
    }

    #[must_use]
    pub fn token_refresh(&self) -> String {
        self.resolve(TOKEN_REFRESH)
    }
}
