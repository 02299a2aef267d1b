use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use tracing::warn;

use crate::catalogo::{escritura, queries};
use crate::filtros::vitrina::coincidencias_vitrina;
use crate::filtros::{FiltrosOferta, aplicar_filtros};
use crate::models::{DetallesOfertaEntrada, NuevaOferta};
use crate::ofertas::ofertas_planas;
use crate::server::EstadoApp;

fn parametro_institucion(query: &HashMap<String, String>) -> Option<i64> {
    query.get("institucion").and_then(|s| s.trim().parse::<i64>().ok())
}

/// GET /api/ofertas[?institucion=id]
/// Responde siempre 200 con `{ ofertas, error }`: ante un almacén caído la
/// colección queda vacía y `error` distingue el fallo de un resultado
/// legítimamente vacío.
pub async fn obtener_ofertas_handler(
    estado: web::Data<EstadoApp>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let institucion = parametro_institucion(&query);
    match estado.conexion().and_then(|conn| ofertas_planas(&conn, institucion)) {
        Ok(ofertas) => HttpResponse::Ok().json(json!({"ofertas": ofertas, "error": null})),
        Err(e) => {
            warn!("fallo al agregar ofertas: {e}");
            HttpResponse::Ok().json(json!({"ofertas": [], "error": format!("{e}")}))
        }
    }
}

/// POST /api/ofertas
pub async fn crear_oferta_handler(
    estado: web::Data<EstadoApp>,
    body: web::Json<NuevaOferta>,
) -> impl Responder {
    let datos = body.into_inner();
    match estado.conexion().and_then(|conn| escritura::crear_oferta(&conn, &datos)) {
        Ok(id) => HttpResponse::Ok().json(json!({"message": "Agregada", "id": id})),
        Err(e) => HttpResponse::InternalServerError().json(json!({"error": format!("{e}")})),
    }
}

/// DELETE /api/ofertas/{id}
pub async fn eliminar_oferta_handler(
    estado: web::Data<EstadoApp>,
    path: web::Path<i64>,
) -> impl Responder {
    let id = path.into_inner();
    match estado.conexion().and_then(|conn| escritura::eliminar_oferta(&conn, id)) {
        Ok(0) => HttpResponse::NotFound().json(json!({"message": "No encontrada"})),
        Ok(_) => HttpResponse::Ok().json(json!({"message": "Eliminada"})),
        Err(e) => HttpResponse::InternalServerError().json(json!({"error": format!("{e}")})),
    }
}

/// GET /api/ofertas/{id}/detalles
/// Devuelve `null` cuando la oferta no tiene contenido editorial.
pub async fn detalles_oferta_handler(
    estado: web::Data<EstadoApp>,
    path: web::Path<i64>,
) -> impl Responder {
    let id = path.into_inner();
    match estado.conexion().and_then(|conn| queries::detalles_de_oferta(&conn, id)) {
        Ok(Some(detalles)) => HttpResponse::Ok().json(detalles),
        Ok(None) => HttpResponse::Ok().json(serde_json::Value::Null),
        Err(e) => HttpResponse::InternalServerError().json(json!({"error": format!("{e}")})),
    }
}

/// PUT /api/ofertas/{id}/detalles (upsert)
pub async fn guardar_detalles_handler(
    estado: web::Data<EstadoApp>,
    path: web::Path<i64>,
    body: web::Json<DetallesOfertaEntrada>,
) -> impl Responder {
    let id = path.into_inner();
    let datos = body.into_inner();
    match estado.conexion().and_then(|conn| escritura::guardar_detalles_oferta(&conn, id, &datos)) {
        Ok(true) => HttpResponse::Ok().json(json!({"message": "Actualizado"})),
        Ok(false) => HttpResponse::Ok().json(json!({"message": "Creado"})),
        Err(e) => HttpResponse::InternalServerError().json(json!({"error": format!("{e}")})),
    }
}

#[derive(Debug, Deserialize)]
pub struct FiltrarRequest {
    #[serde(default)]
    pub institucion: Option<i64>,
    #[serde(default)]
    pub filtros: FiltrosOferta,
}

/// POST /api/ofertas/filtrar
/// Agrega la colección completa y aplica el motor de filtrado del lado del
/// servidor. Misma semántica degradada que GET /api/ofertas.
pub async fn filtrar_ofertas_handler(
    estado: web::Data<EstadoApp>,
    body: web::Json<FiltrarRequest>,
) -> impl Responder {
    let peticion = body.into_inner();
    match estado.conexion().and_then(|conn| ofertas_planas(&conn, peticion.institucion)) {
        Ok(ofertas) => {
            let visibles = aplicar_filtros(&ofertas, &peticion.filtros);
            HttpResponse::Ok().json(json!({
                "total": ofertas.len(),
                "visibles": visibles.len(),
                "ofertas": visibles,
                "error": null
            }))
        }
        Err(e) => {
            warn!("fallo al filtrar ofertas: {e}");
            HttpResponse::Ok().json(json!({
                "total": 0,
                "visibles": 0,
                "ofertas": [],
                "error": format!("{e}")
            }))
        }
    }
}

/// GET /api/ofertas/vitrina?clave=palabra
pub async fn vitrina_handler(
    estado: web::Data<EstadoApp>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let clave = match query.get("clave").map(|s| s.trim()).filter(|s| !s.is_empty()) {
        Some(c) => c.to_string(),
        None => {
            return HttpResponse::BadRequest()
                .json(json!({"error": "clave query parameter is required"}));
        }
    };

    match estado.conexion().and_then(|conn| ofertas_planas(&conn, None)) {
        Ok(ofertas) => {
            let seleccion = coincidencias_vitrina(&ofertas, &clave);
            HttpResponse::Ok().json(json!({"clave": clave, "ofertas": seleccion}))
        }
        Err(e) => {
            warn!("fallo al armar vitrina: {e}");
            HttpResponse::Ok().json(json!({"clave": clave, "ofertas": []}))
        }
    }
}
