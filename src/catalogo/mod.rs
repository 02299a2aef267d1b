pub mod db;
pub mod escritura;
pub mod queries;

pub use db::{ConexionCatalogo, OrigenDb, init_db, verificar_conexion};
