use clap::{Args, Subcommand};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in, sign up, sign out, or show the current session.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Admin dashboard: employees, projects, overdue tasks, pending leave.
    Dashboard,
    /// Your assigned projects and their high-priority tasks.
    Workspace,
    /// Browse the employee directory.
    Employees(EmployeesArgs),
    /// Leave requests.
    Leave {
        #[command(subcommand)]
        action: LeaveCommands,
    },
}

#[derive(Debug, Subcommand)]
pub enum AuthCommands {
    /// Sign in with email and password.
    Login(AuthLoginArgs),
    /// Create an account.
    Signup(AuthSignupArgs),
    /// Clear the stored session.
    Logout,
    /// Show the stored session.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
}

#[derive(Clone, Debug, Args)]
pub struct AuthSignupArgs {
    #[arg(long)]
    pub full_name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub password: String,
}

#[derive(Clone, Debug, Args)]
pub struct EmployeesArgs {
    /// Free-text search.
    #[arg(long)]
    pub search: Option<String>,
    /// Sort by field; repeat the same field to flip direction.
    #[arg(long)]
    pub sort: Vec<String>,
    /// 1-based page number.
    #[arg(long)]
    pub page: Option<u64>,
}

#[derive(Debug, Subcommand)]
pub enum LeaveCommands {
    /// Submit a leave request.
    Request(LeaveRequestArgs),
}

#[derive(Clone, Debug, Args)]
pub struct LeaveRequestArgs {
    #[arg(long = "type")]
    pub leave_type: String,
    /// Start date (YYYY-MM-DD).
    #[arg(long)]
    pub start: String,
    /// End date (YYYY-MM-DD).
    #[arg(long)]
    pub end: String,
    #[arg(long)]
    pub reason: String,
}
