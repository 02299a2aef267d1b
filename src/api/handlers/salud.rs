use actix_web::{HttpResponse, Responder, web};
use serde_json::json;

use crate::catalogo::verificar_conexion;
use crate::server::EstadoApp;

/// GET /api/salud
/// Sonda de disponibilidad del almacén; funciona contra cualquiera de los
/// dos backends configurables.
pub async fn salud_handler(estado: web::Data<EstadoApp>) -> impl Responder {
    match verificar_conexion(&estado.db) {
        Ok(()) => HttpResponse::Ok().json(json!({"status": "ok"})),
        Err(e) => HttpResponse::ServiceUnavailable()
            .json(json!({"status": "error", "error": format!("{e}")})),
    }
}
