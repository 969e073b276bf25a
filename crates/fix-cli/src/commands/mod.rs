pub mod dashboard;
pub mod dispatch;
pub mod import;
pub mod incident;
pub mod login;
pub mod shared;
pub mod user;
