use actix_web::{HttpResponse, Responder, web};
use rusqlite::Connection;
use serde_json::json;
use tracing::warn;

use crate::catalogo::{escritura, queries};
use crate::error::ErrorCatalogo;
use crate::models::NuevaCarrera;
use crate::server::EstadoApp;

// Los catálogos alimentan las opciones de filtro del cliente. Ante un fallo
// del almacén todos degradan a `[]`: un combo vacío es preferible a un 500.

fn responder_catalogo<T, F>(estado: &EstadoApp, etiqueta: &str, consulta: F) -> HttpResponse
where
    T: serde::Serialize,
    F: FnOnce(&Connection) -> Result<Vec<T>, ErrorCatalogo>,
{
    match estado.conexion().and_then(|conn| consulta(&conn)) {
        Ok(lista) => HttpResponse::Ok().json(lista),
        Err(e) => {
            warn!("fallo al leer catálogo {etiqueta}: {e}");
            HttpResponse::Ok().json(json!([]))
        }
    }
}

/// GET /api/municipios
pub async fn municipios_handler(estado: web::Data<EstadoApp>) -> impl Responder {
    responder_catalogo(&estado, "municipios", |c| queries::municipios(c))
}

/// GET /api/niveles
pub async fn niveles_handler(estado: web::Data<EstadoApp>) -> impl Responder {
    responder_catalogo(&estado, "niveles", |c| queries::niveles(c))
}

/// GET /api/modalidades
pub async fn modalidades_handler(estado: web::Data<EstadoApp>) -> impl Responder {
    responder_catalogo(&estado, "modalidades", |c| queries::modalidades(c))
}

/// GET /api/campos
pub async fn campos_handler(estado: web::Data<EstadoApp>) -> impl Responder {
    responder_catalogo(&estado, "campos", |c| queries::campos(c))
}

/// GET /api/carreras
pub async fn carreras_handler(estado: web::Data<EstadoApp>) -> impl Responder {
    responder_catalogo(&estado, "carreras", |c| queries::carreras(c))
}

/// GET /api/info-carreras
pub async fn info_carreras_handler(estado: web::Data<EstadoApp>) -> impl Responder {
    responder_catalogo(&estado, "info_carreras", |c| queries::info_carreras(c))
}

/// POST /api/carreras
pub async fn crear_carrera_handler(
    estado: web::Data<EstadoApp>,
    body: web::Json<NuevaCarrera>,
) -> impl Responder {
    let datos = body.into_inner();
    match estado.conexion().and_then(|conn| escritura::crear_carrera(&conn, &datos)) {
        Ok(id) => HttpResponse::Ok().json(json!({
            "id_carrera": id,
            "nombre": datos.nombre,
            "clave": datos.clave,
            "id_campo": datos.id_campo,
            "id_info": datos.id_info
        })),
        Err(e) => HttpResponse::InternalServerError().json(json!({"error": format!("{e}")})),
    }
}
