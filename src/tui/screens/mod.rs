//! Screen modules for the dashboard TUI

pub mod dashboard;
pub mod help;
pub mod responses;

pub use dashboard::DashboardScreen;
pub use help::HelpScreen;
pub use responses::ResponsesScreen;
