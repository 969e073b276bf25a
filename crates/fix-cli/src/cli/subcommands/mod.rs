mod dashboard;
mod import;
mod incident;
mod user;

pub use dashboard::DashboardCommands;
pub use import::ImportCommands;
pub use incident::IncidentCommands;
pub use user::UserCommands;
