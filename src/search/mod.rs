pub mod dedup;
pub mod request_log;
