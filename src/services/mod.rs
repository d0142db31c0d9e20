pub mod auth_service;
pub mod league_service;
pub mod report_service;

pub use auth_service::{AuthError, AuthService};
pub use league_service::{LeagueError, LeagueService};
pub use report_service::{ReportError, ReportService};
