pub mod http;
pub mod storage;
pub mod utils;
