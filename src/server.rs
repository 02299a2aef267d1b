use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use rusqlite::Connection;

use crate::api::handlers as h;
use crate::catalogo::OrigenDb;
use crate::catalogo::db;
use crate::error::ErrorCatalogo;

/// Contexto explícito de la aplicación: se construye una vez en el arranque
/// y viaja a los handlers vía `web::Data`. No hay estado a nivel de módulo.
#[derive(Debug, Clone)]
pub struct EstadoApp {
    pub db: OrigenDb,
}

impl EstadoApp {
    pub fn nuevo(db: OrigenDb) -> Self {
        Self { db }
    }

    /// Conexión de lectura de vida corta para las consultas del catálogo.
    /// Un origen Postgres sólo participa en init/salud; aquí devuelve error
    /// y los handlers degradan a colección vacía.
    pub fn conexion(&self) -> Result<Connection, ErrorCatalogo> {
        db::abrir_sqlite(&self.db)
    }
}

/// Tabla de rutas completa, separada para poder montarla igual en el binario
/// y en las pruebas de integración.
pub fn configurar_rutas(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/ofertas", web::get().to(h::obtener_ofertas_handler))
        .route("/api/ofertas", web::post().to(h::crear_oferta_handler))
        .route("/api/ofertas/filtrar", web::post().to(h::filtrar_ofertas_handler))
        .route("/api/ofertas/vitrina", web::get().to(h::vitrina_handler))
        .route("/api/ofertas/{id}", web::delete().to(h::eliminar_oferta_handler))
        .route("/api/ofertas/{id}/detalles", web::get().to(h::detalles_oferta_handler))
        .route("/api/ofertas/{id}/detalles", web::put().to(h::guardar_detalles_handler))
        .route("/api/instituciones", web::get().to(h::listar_instituciones_handler))
        .route("/api/instituciones/{id}", web::get().to(h::obtener_institucion_handler))
        .route("/api/instituciones/{id}", web::put().to(h::actualizar_institucion_handler))
        .route("/api/escuelas", web::get().to(h::listar_escuelas_handler))
        .route("/api/escuelas", web::post().to(h::crear_escuela_handler))
        .route("/api/escuelas/mapa", web::get().to(h::escuelas_mapa_handler))
        .route("/api/municipios", web::get().to(h::municipios_handler))
        .route("/api/niveles", web::get().to(h::niveles_handler))
        .route("/api/modalidades", web::get().to(h::modalidades_handler))
        .route("/api/campos", web::get().to(h::campos_handler))
        .route("/api/carreras", web::get().to(h::carreras_handler))
        .route("/api/carreras", web::post().to(h::crear_carrera_handler))
        .route("/api/info-carreras", web::get().to(h::info_carreras_handler))
        .route("/api/reviews", web::get().to(h::listar_reviews_handler))
        .route("/api/reviews", web::post().to(h::crear_review_handler))
        .route("/api/convocatorias", web::get().to(h::listar_convocatorias_handler))
        .route("/api/convocatorias", web::post().to(h::crear_convocatoria_handler))
        .route("/api/galeria", web::get().to(h::listar_galeria_handler))
        .route("/api/galeria", web::post().to(h::agregar_imagen_handler))
        .route("/api/galeria/{id}", web::delete().to(h::eliminar_imagen_handler))
        .route("/api/intereses", web::post().to(h::registrar_interes_handler))
        .route("/api/salud", web::get().to(h::salud_handler));
}

/// Ejecuta el servidor HTTP del catálogo.
pub async fn run_server(bind_addr: &str, estado: EstadoApp) -> std::io::Result<()> {
    let datos = web::Data::new(estado);
    HttpServer::new(move || {
        App::new()
            .app_data(datos.clone())
            .wrap(Cors::permissive())
            .configure(configurar_rutas)
    })
    .bind(bind_addr)?
    .run()
    .await
}
