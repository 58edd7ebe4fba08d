pub mod config;
pub mod logging;

pub mod checksum;
pub mod detector;
pub mod fetch;
pub mod notify;
pub mod run;
pub mod state;
