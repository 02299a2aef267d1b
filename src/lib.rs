// Biblioteca raíz del crate `eduqro`.
// Reexporta los módulos principales y la función de conveniencia
// `run_server` que levanta la API del catálogo.
pub mod api;
pub mod catalogo;
pub mod config;
pub mod error;
pub mod filtros;
pub mod models;
pub mod ofertas;
pub mod server;

pub use server::run_server;
