pub mod cors;
pub mod jwt;
pub mod server;
pub mod storage;
