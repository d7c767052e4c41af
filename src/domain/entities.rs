pub mod carrera;
pub mod practica;
pub mod theme;
pub mod token;
pub mod user;
