pub mod http_repo;
pub mod practica;
pub mod user;
