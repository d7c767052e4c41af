pub mod layouts;
pub mod middlewares;
pub mod repositories;
pub mod routes;
