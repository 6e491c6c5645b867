pub mod acquire;
pub mod config;
pub mod error;
pub mod form_rankings;
pub mod http_client;
pub mod model;
pub mod snapshot_cache;
pub mod snapshot_fetch;
pub mod snapshot_merge;
pub mod table;
