pub mod cli;
pub mod db;
pub mod error;
pub mod ids;
pub mod logging;
pub mod models;
pub mod output;
pub mod search;
pub mod shopping;
