use std::env;

use crate::catalogo::OrigenDb;
use crate::catalogo::db::origen_desde_env;
use crate::error::ErrorCatalogo;

const BIND_POR_DEFECTO: &str = "127.0.0.1:3000";

/// Configuración de arranque, leída una sola vez del entorno (`.env`
/// incluido). Un solo arranque parametrizado en lugar de variantes de
/// despliegue duplicadas.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind: String,
    pub db: OrigenDb,
}

impl Config {
    /// Variables reconocidas: CATALOGO_BIND, CATALOGO_DB_URL,
    /// CATALOGO_DB_PATH.
    pub fn desde_env() -> Result<Self, ErrorCatalogo> {
        let _ = dotenv::dotenv();
        let bind = env::var("CATALOGO_BIND").unwrap_or_else(|_| BIND_POR_DEFECTO.to_string());
        Ok(Config { bind, db: origen_desde_env()? })
    }
}
