pub mod config;
pub mod logging;

pub mod pool;
pub mod storage;
pub mod tasks;
pub mod url_model;
