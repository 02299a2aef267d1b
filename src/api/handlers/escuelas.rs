use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use std::collections::HashMap;
use tracing::warn;

use crate::catalogo::{escritura, queries};
use crate::filtros::mapa::escuelas_georreferenciadas;
use crate::models::NuevaEscuela;
use crate::server::EstadoApp;

fn parametro_institucion(query: &HashMap<String, String>) -> Option<i64> {
    query.get("institucion").and_then(|s| s.trim().parse::<i64>().ok())
}

/// GET /api/escuelas[?institucion=id]
/// Lista completa de campus denormalizados (incluye los sin coordenadas:
/// las vistas de lista no descartan nada).
pub async fn listar_escuelas_handler(
    estado: web::Data<EstadoApp>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let institucion = parametro_institucion(&query);
    match estado.conexion().and_then(|conn| queries::escuelas_mapa(&conn, institucion)) {
        Ok(lista) => HttpResponse::Ok().json(lista),
        Err(e) => {
            warn!("fallo al listar escuelas: {e}");
            HttpResponse::Ok().json(json!([]))
        }
    }
}

/// GET /api/escuelas/mapa[?institucion=id]
/// Sólo los campus con coordenadas válidas, listos para marcadores.
pub async fn escuelas_mapa_handler(
    estado: web::Data<EstadoApp>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let institucion = parametro_institucion(&query);
    match estado.conexion().and_then(|conn| queries::escuelas_mapa(&conn, institucion)) {
        Ok(lista) => HttpResponse::Ok().json(escuelas_georreferenciadas(&lista)),
        Err(e) => {
            warn!("fallo al listar escuelas para mapa: {e}");
            HttpResponse::Ok().json(json!([]))
        }
    }
}

/// POST /api/escuelas
pub async fn crear_escuela_handler(
    estado: web::Data<EstadoApp>,
    body: web::Json<NuevaEscuela>,
) -> impl Responder {
    let datos = body.into_inner();
    match estado.conexion().and_then(|conn| escritura::crear_escuela(&conn, &datos)) {
        Ok(id) => HttpResponse::Ok().json(json!({
            "id_escuela": id,
            "id_institucion": datos.id_institucion,
            "id_municipio": datos.id_municipio,
            "nombre": datos.nombre,
            "latitud": datos.latitud,
            "longitud": datos.longitud
        })),
        Err(e) => HttpResponse::InternalServerError().json(json!({"error": format!("{e}")})),
    }
}
