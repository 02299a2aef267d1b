use rusqlite::Connection;
use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;

// Cliente Postgres para despliegues hospedados
use postgres::{Client, NoTls};

use crate::error::ErrorCatalogo;

/// Origen del almacén del catálogo, resuelto una sola vez al arrancar y
/// pasado explícitamente a los handlers (nada de estado ambiente).
#[derive(Debug, Clone)]
pub enum OrigenDb {
    Sqlite(PathBuf),
    /// URL completa (postgres://...)
    Postgres(String),
}

/// Conexión abierta al catálogo. Para Postgres guardamos la URL y ejecutamos
/// las operaciones en un hilo dedicado para no anidar runtimes dentro del
/// runtime de Actix.
pub enum ConexionCatalogo {
    Sqlite(Connection),
    PostgresConfig(String),
}

impl fmt::Debug for ConexionCatalogo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConexionCatalogo::Sqlite(_) => write!(f, "ConexionCatalogo::Sqlite(..)"),
            ConexionCatalogo::PostgresConfig(_) => write!(f, "ConexionCatalogo::PostgresConfig(..)"),
        }
    }
}

/// Resuelve el origen del catálogo desde el entorno. Honra CATALOGO_DB_URL
/// (esquemas sqlite://, file://, postgres://) y CATALOGO_DB_PATH; sin
/// variables cae en un archivo local.
pub fn origen_desde_env() -> Result<OrigenDb, ErrorCatalogo> {
    let _ = dotenv::dotenv();
    if let Ok(url) = env::var("CATALOGO_DB_URL") {
        return origen_desde_url(&url);
    }
    if let Ok(p) = env::var("CATALOGO_DB_PATH") {
        return Ok(OrigenDb::Sqlite(PathBuf::from(p)));
    }
    Ok(OrigenDb::Sqlite(PathBuf::from("catalogo/catalogo.db")))
}

pub fn origen_desde_url(url: &str) -> Result<OrigenDb, ErrorCatalogo> {
    if url.starts_with("sqlite://") {
        // soporta sqlite:///ruta/absoluta y sqlite://ruta/relativa
        let sin_esquema = url.trim_start_matches("sqlite://");
        Ok(OrigenDb::Sqlite(PathBuf::from(sin_esquema)))
    } else if url.starts_with("file://") {
        let sin_esquema = url.trim_start_matches("file://");
        Ok(OrigenDb::Sqlite(PathBuf::from(sin_esquema)))
    } else if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        Ok(OrigenDb::Postgres(url.to_string()))
    } else {
        Err(ErrorCatalogo::EsquemaNoSoportado(url.to_string()))
    }
}

/// Abre una conexión al catálogo según el origen configurado.
pub fn abrir_conexion(origen: &OrigenDb) -> Result<ConexionCatalogo, ErrorCatalogo> {
    match origen {
        OrigenDb::Sqlite(ruta) => {
            let conn = Connection::open(ruta)?;
            Ok(ConexionCatalogo::Sqlite(conn))
        }
        OrigenDb::Postgres(url) => Ok(ConexionCatalogo::PostgresConfig(url.clone())),
    }
}

/// Conexión SQLite de vida corta para el camino de lectura embebido. Las
/// consultas del catálogo pasan por aquí; un origen Postgres participa sólo
/// en `init_db` y `verificar_conexion`.
pub fn abrir_sqlite(origen: &OrigenDb) -> Result<Connection, ErrorCatalogo> {
    match origen {
        OrigenDb::Sqlite(ruta) => Ok(Connection::open(ruta)?),
        OrigenDb::Postgres(_) => Err(ErrorCatalogo::LecturaNoSoportada("postgres".to_string())),
    }
}

const DDL_SQLITE: &str = "
    CREATE TABLE IF NOT EXISTS tipos_institucion (
        id_tipo INTEGER PRIMARY KEY AUTOINCREMENT,
        nombre TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS instituciones (
        id_institucion INTEGER PRIMARY KEY AUTOINCREMENT,
        nombre TEXT NOT NULL,
        siglas TEXT,
        id_tipo INTEGER REFERENCES tipos_institucion(id_tipo),
        latitud REAL,
        longitud REAL,
        telefono TEXT,
        sitio_web TEXT,
        correo TEXT,
        descripcion TEXT,
        logo_url TEXT,
        banner_url TEXT,
        color_hex TEXT
    );

    CREATE TABLE IF NOT EXISTS municipios (
        id_municipio INTEGER PRIMARY KEY AUTOINCREMENT,
        nombre TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS escuelas (
        id_escuela INTEGER PRIMARY KEY AUTOINCREMENT,
        id_institucion INTEGER NOT NULL REFERENCES instituciones(id_institucion),
        id_municipio INTEGER REFERENCES municipios(id_municipio),
        nombre TEXT NOT NULL,
        latitud REAL,
        longitud REAL
    );

    CREATE TABLE IF NOT EXISTS campos_formacion (
        id_campo INTEGER PRIMARY KEY AUTOINCREMENT,
        nombre TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS info_carreras (
        id_info INTEGER PRIMARY KEY AUTOINCREMENT,
        titulo_marketing TEXT NOT NULL,
        descripcion_breve TEXT,
        imagen_url TEXT,
        palabra_clave TEXT
    );

    CREATE TABLE IF NOT EXISTS carreras (
        id_carrera INTEGER PRIMARY KEY AUTOINCREMENT,
        nombre TEXT NOT NULL,
        clave TEXT,
        id_campo INTEGER REFERENCES campos_formacion(id_campo),
        id_info INTEGER REFERENCES info_carreras(id_info)
    );

    CREATE TABLE IF NOT EXISTS niveles (
        id_nivel INTEGER PRIMARY KEY AUTOINCREMENT,
        nombre TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS modalidades (
        id_modalidad INTEGER PRIMARY KEY AUTOINCREMENT,
        nombre TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS ofertas (
        id_oferta INTEGER PRIMARY KEY AUTOINCREMENT,
        id_institucion INTEGER NOT NULL REFERENCES instituciones(id_institucion),
        id_escuela INTEGER NOT NULL REFERENCES escuelas(id_escuela),
        id_carrera INTEGER NOT NULL REFERENCES carreras(id_carrera),
        id_nivel INTEGER NOT NULL REFERENCES niveles(id_nivel),
        id_modalidad INTEGER NOT NULL REFERENCES modalidades(id_modalidad),
        duracion TEXT NOT NULL DEFAULT ''
    );

    CREATE TABLE IF NOT EXISTS detalles_ofertas (
        id_detalle INTEGER PRIMARY KEY AUTOINCREMENT,
        id_oferta INTEGER NOT NULL REFERENCES ofertas(id_oferta),
        mapa_curricular_url TEXT,
        perfil_ingreso TEXT,
        perfil_egreso TEXT,
        campo_laboral TEXT,
        habilidades TEXT
    );

    CREATE TABLE IF NOT EXISTS reviews (
        id_review INTEGER PRIMARY KEY AUTOINCREMENT,
        id_institucion INTEGER NOT NULL REFERENCES instituciones(id_institucion),
        nombre_usuario TEXT NOT NULL,
        calificacion INTEGER NOT NULL,
        comentario TEXT,
        fecha TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS convocatorias (
        id_convocatoria INTEGER PRIMARY KEY AUTOINCREMENT,
        id_institucion INTEGER NOT NULL REFERENCES instituciones(id_institucion),
        titulo TEXT NOT NULL,
        contenido TEXT,
        imagen_url TEXT,
        fecha TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS galeria_institucion (
        id_imagen INTEGER PRIMARY KEY AUTOINCREMENT,
        id_institucion INTEGER NOT NULL REFERENCES instituciones(id_institucion),
        imagen_url TEXT NOT NULL,
        descripcion TEXT
    );

    CREATE TABLE IF NOT EXISTS intereses (
        id_interes INTEGER PRIMARY KEY AUTOINCREMENT,
        id_estudiante INTEGER NOT NULL,
        id_institucion INTEGER NOT NULL,
        fecha TEXT NOT NULL
    );
";

const DDL_POSTGRES: &str = "
    CREATE TABLE IF NOT EXISTS tipos_institucion (
        id_tipo BIGSERIAL PRIMARY KEY,
        nombre TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS instituciones (
        id_institucion BIGSERIAL PRIMARY KEY,
        nombre TEXT NOT NULL,
        siglas TEXT,
        id_tipo BIGINT REFERENCES tipos_institucion(id_tipo),
        latitud DOUBLE PRECISION,
        longitud DOUBLE PRECISION,
        telefono TEXT,
        sitio_web TEXT,
        correo TEXT,
        descripcion TEXT,
        logo_url TEXT,
        banner_url TEXT,
        color_hex TEXT
    );

    CREATE TABLE IF NOT EXISTS municipios (
        id_municipio BIGSERIAL PRIMARY KEY,
        nombre TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS escuelas (
        id_escuela BIGSERIAL PRIMARY KEY,
        id_institucion BIGINT NOT NULL REFERENCES instituciones(id_institucion),
        id_municipio BIGINT REFERENCES municipios(id_municipio),
        nombre TEXT NOT NULL,
        latitud DOUBLE PRECISION,
        longitud DOUBLE PRECISION
    );

    CREATE TABLE IF NOT EXISTS campos_formacion (
        id_campo BIGSERIAL PRIMARY KEY,
        nombre TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS info_carreras (
        id_info BIGSERIAL PRIMARY KEY,
        titulo_marketing TEXT NOT NULL,
        descripcion_breve TEXT,
        imagen_url TEXT,
        palabra_clave TEXT
    );

    CREATE TABLE IF NOT EXISTS carreras (
        id_carrera BIGSERIAL PRIMARY KEY,
        nombre TEXT NOT NULL,
        clave TEXT,
        id_campo BIGINT REFERENCES campos_formacion(id_campo),
        id_info BIGINT REFERENCES info_carreras(id_info)
    );

    CREATE TABLE IF NOT EXISTS niveles (
        id_nivel BIGSERIAL PRIMARY KEY,
        nombre TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS modalidades (
        id_modalidad BIGSERIAL PRIMARY KEY,
        nombre TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS ofertas (
        id_oferta BIGSERIAL PRIMARY KEY,
        id_institucion BIGINT NOT NULL REFERENCES instituciones(id_institucion),
        id_escuela BIGINT NOT NULL REFERENCES escuelas(id_escuela),
        id_carrera BIGINT NOT NULL REFERENCES carreras(id_carrera),
        id_nivel BIGINT NOT NULL REFERENCES niveles(id_nivel),
        id_modalidad BIGINT NOT NULL REFERENCES modalidades(id_modalidad),
        duracion TEXT NOT NULL DEFAULT ''
    );

    CREATE TABLE IF NOT EXISTS detalles_ofertas (
        id_detalle BIGSERIAL PRIMARY KEY,
        id_oferta BIGINT NOT NULL REFERENCES ofertas(id_oferta),
        mapa_curricular_url TEXT,
        perfil_ingreso TEXT,
        perfil_egreso TEXT,
        campo_laboral TEXT,
        habilidades TEXT
    );

    CREATE TABLE IF NOT EXISTS reviews (
        id_review BIGSERIAL PRIMARY KEY,
        id_institucion BIGINT NOT NULL REFERENCES instituciones(id_institucion),
        nombre_usuario TEXT NOT NULL,
        calificacion BIGINT NOT NULL,
        comentario TEXT,
        fecha TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS convocatorias (
        id_convocatoria BIGSERIAL PRIMARY KEY,
        id_institucion BIGINT NOT NULL REFERENCES instituciones(id_institucion),
        titulo TEXT NOT NULL,
        contenido TEXT,
        imagen_url TEXT,
        fecha TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS galeria_institucion (
        id_imagen BIGSERIAL PRIMARY KEY,
        id_institucion BIGINT NOT NULL REFERENCES instituciones(id_institucion),
        imagen_url TEXT NOT NULL,
        descripcion TEXT
    );

    CREATE TABLE IF NOT EXISTS intereses (
        id_interes BIGSERIAL PRIMARY KEY,
        id_estudiante BIGINT NOT NULL,
        id_institucion BIGINT NOT NULL,
        fecha TEXT NOT NULL
    );
";

/// Inicializa el esquema del catálogo (directorio + tablas) en el backend
/// que corresponda al origen.
pub fn init_db(origen: &OrigenDb) -> Result<(), ErrorCatalogo> {
    if let OrigenDb::Sqlite(ruta) = origen {
        if let Some(dir) = ruta.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)
                    .map_err(|e| ErrorCatalogo::Otro(format!("no se pudo crear {}: {}", dir.display(), e)))?;
            }
        }
    }

    match abrir_conexion(origen)? {
        ConexionCatalogo::Sqlite(conn) => {
            conn.execute_batch(DDL_SQLITE)?;
            Ok(())
        }
        ConexionCatalogo::PostgresConfig(url) => en_hilo_postgres(url, |cliente| {
            cliente.batch_execute(DDL_POSTGRES)?;
            Ok(())
        }),
    }
}

/// Sonda de salud: comprueba que el almacén responde a una consulta trivial.
pub fn verificar_conexion(origen: &OrigenDb) -> Result<(), ErrorCatalogo> {
    match abrir_conexion(origen)? {
        ConexionCatalogo::Sqlite(conn) => {
            conn.query_row("SELECT 1", [], |_| Ok(()))?;
            Ok(())
        }
        ConexionCatalogo::PostgresConfig(url) => en_hilo_postgres(url, |cliente| {
            cliente.simple_query("SELECT 1")?;
            Ok(())
        }),
    }
}

/// Ejecuta una operación Postgres en un hilo dedicado. El cliente `postgres`
/// es bloqueante y arrancaría su propio runtime si se usara dentro de Actix.
fn en_hilo_postgres<F>(url: String, op: F) -> Result<(), ErrorCatalogo>
where
    F: FnOnce(&mut Client) -> Result<(), ErrorCatalogo> + Send + 'static,
{
    let handle = std::thread::spawn(move || -> Result<(), ErrorCatalogo> {
        let mut cliente = Client::connect(&url, NoTls)?;
        op(&mut cliente)
    });
    match handle.join() {
        Ok(res) => res,
        Err(e) => Err(ErrorCatalogo::Otro(format!("error al unir hilo: {:?}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origen_desde_url_sqlite() {
        match origen_desde_url("sqlite://datos/prueba.db") {
            Ok(OrigenDb::Sqlite(ruta)) => assert_eq!(ruta, PathBuf::from("datos/prueba.db")),
            otro => panic!("se esperaba origen sqlite, se obtuvo {:?}", otro),
        }
    }

    #[test]
    fn origen_desde_url_postgres() {
        match origen_desde_url("postgres://usuario@localhost/catalogo") {
            Ok(OrigenDb::Postgres(url)) => assert!(url.starts_with("postgres://")),
            otro => panic!("se esperaba origen postgres, se obtuvo {:?}", otro),
        }
    }

    #[test]
    fn origen_desde_url_esquema_desconocido() {
        assert!(matches!(
            origen_desde_url("mysql://localhost/catalogo"),
            Err(ErrorCatalogo::EsquemaNoSoportado(_))
        ));
    }
}
