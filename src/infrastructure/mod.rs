pub mod app_log;
pub mod config;
pub mod error;
pub mod feed_client;
pub mod feed_mapper;
