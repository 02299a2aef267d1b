use thiserror::Error;

/// Fallos del almacén del catálogo. Ninguno es fatal para el servicio: los
/// handlers degradan a colecciones vacías y reportan el error como dato.
#[derive(Debug, Error)]
pub enum ErrorCatalogo {
    #[error("error de SQLite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("error de Postgres: {0}")]
    Postgres(#[from] postgres::Error),

    #[error("URL de base de datos con esquema no soportado: {0}")]
    EsquemaNoSoportado(String),

    #[error("el origen {0} no soporta lecturas embebidas")]
    LecturaNoSoportada(String),

    #[error("{0}")]
    Otro(String),
}
