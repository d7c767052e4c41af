pub mod client;

pub use client::ApiClient;
pub use crate::interfaces::middlewares::session::Access;
