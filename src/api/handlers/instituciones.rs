use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use tracing::warn;

use crate::catalogo::{escritura, queries};
use crate::models::ActualizacionInstitucion;
use crate::server::EstadoApp;

/// GET /api/instituciones
/// Degrada a lista vacía si el almacén no responde: la vista pública debe
/// seguir pintándose.
pub async fn listar_instituciones_handler(estado: web::Data<EstadoApp>) -> impl Responder {
    match estado.conexion().and_then(|conn| queries::instituciones(&conn)) {
        Ok(lista) => HttpResponse::Ok().json(lista),
        Err(e) => {
            warn!("fallo al listar instituciones: {e}");
            HttpResponse::Ok().json(json!([]))
        }
    }
}

/// GET /api/instituciones/{id}
pub async fn obtener_institucion_handler(
    estado: web::Data<EstadoApp>,
    path: web::Path<i64>,
) -> impl Responder {
    let id = path.into_inner();
    match estado.conexion().and_then(|conn| queries::institucion_por_id(&conn, id)) {
        Ok(Some(inst)) => HttpResponse::Ok().json(inst),
        Ok(None) => HttpResponse::NotFound().json(json!({"message": "No encontrada"})),
        Err(e) => HttpResponse::InternalServerError().json(json!({"error": format!("{e}")})),
    }
}

/// PUT /api/instituciones/{id}
pub async fn actualizar_institucion_handler(
    estado: web::Data<EstadoApp>,
    path: web::Path<i64>,
    body: web::Json<ActualizacionInstitucion>,
) -> impl Responder {
    let id = path.into_inner();
    let datos = body.into_inner();
    match estado.conexion().and_then(|conn| escritura::actualizar_institucion(&conn, id, &datos)) {
        Ok(Some(inst)) => HttpResponse::Ok().json(inst),
        Ok(None) => HttpResponse::NotFound().json(json!({"message": "No encontrada"})),
        Err(e) => HttpResponse::InternalServerError().json(json!({"error": format!("{e}")})),
    }
}
