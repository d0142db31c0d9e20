pub mod auth;
pub mod common;
pub mod league;
pub mod report;
pub mod user;
