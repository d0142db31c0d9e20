pub mod match_handler;
pub mod team_handler;
