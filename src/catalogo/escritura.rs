use chrono::Utc;
use rusqlite::{Connection, params};

use crate::catalogo::queries;
use crate::error::ErrorCatalogo;
use crate::models::{
    ActualizacionInstitucion, Convocatoria, DetallesOfertaEntrada, GaleriaImagen, Institucion,
    NuevaCarrera, NuevaConvocatoria, NuevaEscuela, NuevaImagenGaleria, NuevaOferta, NuevaReview,
    Review,
};

// Escrituras del catálogo: sentencias únicas parametrizadas, sin
// transacciones. El último escritor gana, igual que en el CRUD original.

/// Actualiza el perfil editable de una institución y devuelve la fila
/// resultante (releída, con calificación agregada).
pub fn actualizar_institucion(
    conn: &Connection,
    id: i64,
    datos: &ActualizacionInstitucion,
) -> Result<Option<Institucion>, ErrorCatalogo> {
    conn.execute(
        "UPDATE instituciones
         SET nombre = ?1, descripcion = ?2, telefono = ?3, sitio_web = ?4,
             banner_url = ?5, logo_url = ?6
         WHERE id_institucion = ?7",
        params![
            datos.nombre,
            datos.descripcion,
            datos.telefono,
            datos.sitio_web,
            datos.banner_url,
            datos.logo_url,
            id,
        ],
    )?;
    queries::institucion_por_id(conn, id)
}

pub fn crear_escuela(conn: &Connection, datos: &NuevaEscuela) -> Result<i64, ErrorCatalogo> {
    conn.execute(
        "INSERT INTO escuelas (id_institucion, id_municipio, nombre, latitud, longitud)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            datos.id_institucion,
            datos.id_municipio,
            datos.nombre,
            datos.latitud,
            datos.longitud,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn crear_carrera(conn: &Connection, datos: &NuevaCarrera) -> Result<i64, ErrorCatalogo> {
    conn.execute(
        "INSERT INTO carreras (nombre, clave, id_campo, id_info) VALUES (?1, ?2, ?3, ?4)",
        params![datos.nombre, datos.clave, datos.id_campo, datos.id_info],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn crear_oferta(conn: &Connection, datos: &NuevaOferta) -> Result<i64, ErrorCatalogo> {
    conn.execute(
        "INSERT INTO ofertas (id_institucion, id_escuela, id_carrera, id_nivel, id_modalidad, duracion)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            datos.id_institucion,
            datos.id_escuela,
            datos.id_carrera,
            datos.id_nivel,
            datos.id_modalidad,
            datos.duracion,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Devuelve cuántas filas se eliminaron (0 si la oferta no existía).
pub fn eliminar_oferta(conn: &Connection, id: i64) -> Result<usize, ErrorCatalogo> {
    let filas = conn.execute("DELETE FROM ofertas WHERE id_oferta = ?1", params![id])?;
    Ok(filas)
}

/// Upsert del contenido editorial de una oferta. Devuelve `true` si
/// actualizó una fila existente, `false` si la creó.
pub fn guardar_detalles_oferta(
    conn: &Connection,
    id_oferta: i64,
    datos: &DetallesOfertaEntrada,
) -> Result<bool, ErrorCatalogo> {
    let existe = queries::detalles_de_oferta(conn, id_oferta)?.is_some();
    if existe {
        conn.execute(
            "UPDATE detalles_ofertas
             SET mapa_curricular_url = ?1, perfil_ingreso = ?2, perfil_egreso = ?3,
                 campo_laboral = ?4, habilidades = ?5
             WHERE id_oferta = ?6",
            params![
                datos.mapa_curricular_url,
                datos.perfil_ingreso,
                datos.perfil_egreso,
                datos.campo_laboral,
                datos.habilidades,
                id_oferta,
            ],
        )?;
    } else {
        conn.execute(
            "INSERT INTO detalles_ofertas
                 (id_oferta, mapa_curricular_url, perfil_ingreso, perfil_egreso, campo_laboral, habilidades)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                id_oferta,
                datos.mapa_curricular_url,
                datos.perfil_ingreso,
                datos.perfil_egreso,
                datos.campo_laboral,
                datos.habilidades,
            ],
        )?;
    }
    Ok(existe)
}

pub fn crear_review(conn: &Connection, datos: &NuevaReview) -> Result<Review, ErrorCatalogo> {
    let fecha = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO reviews (id_institucion, nombre_usuario, calificacion, comentario, fecha)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            datos.id_institucion,
            datos.nombre_usuario,
            datos.calificacion,
            datos.comentario,
            fecha,
        ],
    )?;
    Ok(Review {
        id_review: conn.last_insert_rowid(),
        id_institucion: datos.id_institucion,
        nombre_usuario: datos.nombre_usuario.clone(),
        calificacion: datos.calificacion,
        comentario: datos.comentario.clone(),
        fecha,
    })
}

pub fn crear_convocatoria(
    conn: &Connection,
    datos: &NuevaConvocatoria,
) -> Result<Convocatoria, ErrorCatalogo> {
    let fecha = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO convocatorias (id_institucion, titulo, contenido, imagen_url, fecha)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            datos.id_institucion,
            datos.titulo,
            datos.contenido,
            datos.imagen_url,
            fecha,
        ],
    )?;
    Ok(Convocatoria {
        id_convocatoria: conn.last_insert_rowid(),
        id_institucion: datos.id_institucion,
        titulo: datos.titulo.clone(),
        contenido: datos.contenido.clone(),
        imagen_url: datos.imagen_url.clone(),
        fecha,
    })
}

pub fn agregar_imagen_galeria(
    conn: &Connection,
    datos: &NuevaImagenGaleria,
) -> Result<GaleriaImagen, ErrorCatalogo> {
    conn.execute(
        "INSERT INTO galeria_institucion (id_institucion, imagen_url, descripcion)
         VALUES (?1, ?2, ?3)",
        params![datos.id_institucion, datos.imagen_url, datos.descripcion],
    )?;
    Ok(GaleriaImagen {
        id_imagen: conn.last_insert_rowid(),
        id_institucion: datos.id_institucion,
        imagen_url: datos.imagen_url.clone(),
        descripcion: datos.descripcion.clone(),
    })
}

pub fn eliminar_imagen_galeria(conn: &Connection, id: i64) -> Result<usize, ErrorCatalogo> {
    let filas = conn.execute("DELETE FROM galeria_institucion WHERE id_imagen = ?1", params![id])?;
    Ok(filas)
}

/// Registra un "me interesa". Sin restricción de unicidad: el esquema
/// observado permite registros repetidos y aquí no se asume deduplicación.
pub fn registrar_interes(
    conn: &Connection,
    id_estudiante: i64,
    id_institucion: i64,
) -> Result<i64, ErrorCatalogo> {
    let fecha = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO intereses (id_estudiante, id_institucion, fecha) VALUES (?1, ?2, ?3)",
        params![id_estudiante, id_institucion, fecha],
    )?;
    Ok(conn.last_insert_rowid())
}
