// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

pub mod league_helpers;
pub mod memory_store;
pub mod postgres;
pub mod utils;
