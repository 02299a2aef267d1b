use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use std::collections::HashMap;
use tracing::warn;

use crate::catalogo::{escritura, queries};
use crate::models::{NuevaConvocatoria, NuevaImagenGaleria, NuevaReview, NuevoInteres};
use crate::server::EstadoApp;

fn parametro_institucion_requerido(query: &HashMap<String, String>) -> Option<i64> {
    query.get("institucion").and_then(|s| s.trim().parse::<i64>().ok())
}

/// GET /api/reviews?institucion=id
pub async fn listar_reviews_handler(
    estado: web::Data<EstadoApp>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let id = match parametro_institucion_requerido(&query) {
        Some(id) => id,
        None => {
            return HttpResponse::BadRequest()
                .json(json!({"error": "institucion query parameter is required"}));
        }
    };
    match estado.conexion().and_then(|conn| queries::reviews_por_institucion(&conn, id)) {
        Ok(lista) => HttpResponse::Ok().json(lista),
        Err(e) => {
            warn!("fallo al listar reviews: {e}");
            HttpResponse::Ok().json(json!([]))
        }
    }
}

/// POST /api/reviews
pub async fn crear_review_handler(
    estado: web::Data<EstadoApp>,
    body: web::Json<NuevaReview>,
) -> impl Responder {
    let datos = body.into_inner();
    if !(1..=5).contains(&datos.calificacion) {
        return HttpResponse::BadRequest()
            .json(json!({"error": "calificacion debe estar entre 1 y 5"}));
    }
    match estado.conexion().and_then(|conn| escritura::crear_review(&conn, &datos)) {
        Ok(review) => HttpResponse::Ok().json(review),
        Err(e) => HttpResponse::InternalServerError().json(json!({"error": format!("{e}")})),
    }
}

/// GET /api/convocatorias?institucion=id
pub async fn listar_convocatorias_handler(
    estado: web::Data<EstadoApp>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let id = match parametro_institucion_requerido(&query) {
        Some(id) => id,
        None => {
            return HttpResponse::BadRequest()
                .json(json!({"error": "institucion query parameter is required"}));
        }
    };
    match estado.conexion().and_then(|conn| queries::convocatorias_por_institucion(&conn, id)) {
        Ok(lista) => HttpResponse::Ok().json(lista),
        Err(e) => {
            warn!("fallo al listar convocatorias: {e}");
            HttpResponse::Ok().json(json!([]))
        }
    }
}

/// POST /api/convocatorias
pub async fn crear_convocatoria_handler(
    estado: web::Data<EstadoApp>,
    body: web::Json<NuevaConvocatoria>,
) -> impl Responder {
    let datos = body.into_inner();
    match estado.conexion().and_then(|conn| escritura::crear_convocatoria(&conn, &datos)) {
        Ok(convocatoria) => HttpResponse::Ok().json(convocatoria),
        Err(e) => HttpResponse::InternalServerError().json(json!({"error": format!("{e}")})),
    }
}

/// GET /api/galeria?institucion=id
pub async fn listar_galeria_handler(
    estado: web::Data<EstadoApp>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let id = match parametro_institucion_requerido(&query) {
        Some(id) => id,
        None => {
            return HttpResponse::BadRequest()
                .json(json!({"error": "institucion query parameter is required"}));
        }
    };
    match estado.conexion().and_then(|conn| queries::galeria_por_institucion(&conn, id)) {
        Ok(lista) => HttpResponse::Ok().json(lista),
        Err(e) => {
            warn!("fallo al listar galería: {e}");
            HttpResponse::Ok().json(json!([]))
        }
    }
}

/// POST /api/galeria
pub async fn agregar_imagen_handler(
    estado: web::Data<EstadoApp>,
    body: web::Json<NuevaImagenGaleria>,
) -> impl Responder {
    let datos = body.into_inner();
    match estado.conexion().and_then(|conn| escritura::agregar_imagen_galeria(&conn, &datos)) {
        Ok(imagen) => HttpResponse::Ok().json(imagen),
        Err(e) => HttpResponse::InternalServerError().json(json!({"error": format!("{e}")})),
    }
}

/// DELETE /api/galeria/{id}
pub async fn eliminar_imagen_handler(
    estado: web::Data<EstadoApp>,
    path: web::Path<i64>,
) -> impl Responder {
    let id = path.into_inner();
    match estado.conexion().and_then(|conn| escritura::eliminar_imagen_galeria(&conn, id)) {
        Ok(0) => HttpResponse::NotFound().json(json!({"message": "No encontrada"})),
        Ok(_) => HttpResponse::Ok().json(json!({"message": "Eliminada"})),
        Err(e) => HttpResponse::InternalServerError().json(json!({"error": format!("{e}")})),
    }
}

/// POST /api/intereses
pub async fn registrar_interes_handler(
    estado: web::Data<EstadoApp>,
    body: web::Json<NuevoInteres>,
) -> impl Responder {
    let datos = body.into_inner();
    match estado
        .conexion()
        .and_then(|conn| escritura::registrar_interes(&conn, datos.id_estudiante, datos.id_institucion))
    {
        Ok(id) => HttpResponse::Ok().json(json!({"message": "Registrado", "id": id})),
        Err(e) => HttpResponse::InternalServerError().json(json!({"error": format!("{e}")})),
    }
}
