use rusqlite::{Connection, Row, params};

use crate::error::ErrorCatalogo;
use crate::models::{
    CampoFormacion, Carrera, Convocatoria, DetalleOferta, EscuelaMapa, GaleriaImagen, InfoCarrera,
    Institucion, Modalidad, Municipio, Nivel, Review,
};

/// Lee una coordenada tolerando basura en la columna: un valor no numérico
/// o no finito se colapsa al estado ausente en vez de propagar NaN.
pub(crate) fn coordenada(fila: &Row<'_>, idx: usize) -> Option<f64> {
    fila.get::<_, f64>(idx).ok().filter(|v| v.is_finite())
}

const SQL_INSTITUCIONES: &str = "
    SELECT i.id_institucion, i.nombre, i.siglas, t.nombre AS tipo,
           i.latitud, i.longitud, i.telefono, i.sitio_web, i.correo,
           i.descripcion, i.logo_url, i.banner_url, i.color_hex,
           COALESCE(AVG(r.calificacion), 0) AS promedio_calificacion,
           COUNT(r.id_review) AS total_reviews
    FROM instituciones i
    LEFT JOIN tipos_institucion t ON i.id_tipo = t.id_tipo
    LEFT JOIN reviews r ON i.id_institucion = r.id_institucion
";

fn institucion_desde_fila(fila: &Row<'_>) -> rusqlite::Result<Institucion> {
    Ok(Institucion {
        id_institucion: fila.get(0)?,
        nombre: fila.get(1)?,
        siglas: fila.get(2)?,
        tipo: fila.get(3)?,
        latitud: coordenada(fila, 4),
        longitud: coordenada(fila, 5),
        telefono: fila.get(6)?,
        sitio_web: fila.get(7)?,
        correo: fila.get(8)?,
        descripcion: fila.get(9)?,
        logo_url: fila.get(10)?,
        banner_url: fila.get(11)?,
        color_hex: fila.get(12)?,
        promedio_calificacion: fila.get(13)?,
        total_reviews: fila.get(14)?,
    })
}

/// Todas las instituciones con su tipo y la calificación agregada de reseñas.
pub fn instituciones(conn: &Connection) -> Result<Vec<Institucion>, ErrorCatalogo> {
    let sql = format!("{SQL_INSTITUCIONES} GROUP BY i.id_institucion ORDER BY i.nombre");
    let mut stmt = conn.prepare(&sql)?;
    let filas = stmt.query_map([], |f| institucion_desde_fila(f))?;
    let mut out = Vec::new();
    for f in filas {
        out.push(f?);
    }
    Ok(out)
}

pub fn institucion_por_id(conn: &Connection, id: i64) -> Result<Option<Institucion>, ErrorCatalogo> {
    let sql = format!("{SQL_INSTITUCIONES} WHERE i.id_institucion = ?1 GROUP BY i.id_institucion");
    let mut stmt = conn.prepare(&sql)?;
    let mut filas = stmt.query(params![id])?;
    match filas.next()? {
        Some(fila) => Ok(Some(institucion_desde_fila(fila)?)),
        None => Ok(None),
    }
}

const SQL_ESCUELAS: &str = "
    SELECT e.id_escuela, e.id_institucion, e.nombre, e.latitud, e.longitud,
           i.nombre AS inst_nombre, i.siglas, i.logo_url, i.color_hex,
           i.banner_url, t.nombre AS tipo,
           COALESCE(AVG(r.calificacion), 0) AS promedio_calificacion,
           mun.nombre AS municipio_nombre
    FROM escuelas e
    JOIN instituciones i ON e.id_institucion = i.id_institucion
    LEFT JOIN tipos_institucion t ON i.id_tipo = t.id_tipo
    LEFT JOIN reviews r ON i.id_institucion = r.id_institucion
    LEFT JOIN municipios mun ON e.id_municipio = mun.id_municipio
";

fn escuela_desde_fila(fila: &Row<'_>) -> rusqlite::Result<EscuelaMapa> {
    Ok(EscuelaMapa {
        id_escuela: fila.get(0)?,
        id_institucion: fila.get(1)?,
        nombre: fila.get(2)?,
        latitud: coordenada(fila, 3),
        longitud: coordenada(fila, 4),
        inst_nombre: fila.get(5)?,
        siglas: fila.get(6)?,
        logo_url: fila.get(7)?,
        color_hex: fila.get(8)?,
        banner_url: fila.get(9)?,
        tipo: fila.get(10)?,
        promedio_calificacion: fila.get(11)?,
        municipio_nombre: fila.get(12)?,
    })
}

/// Campus denormalizados para el mapa y las vistas de lista; opcionalmente
/// acotados a una institución. Las coordenadas inválidas llegan como `None`
/// y la puerta de georreferencia (`filtros::mapa`) decide su destino.
pub fn escuelas_mapa(
    conn: &Connection,
    institucion: Option<i64>,
) -> Result<Vec<EscuelaMapa>, ErrorCatalogo> {
    let mut out = Vec::new();
    match institucion {
        Some(id) => {
            let sql = format!(
                "{SQL_ESCUELAS} WHERE e.id_institucion = ?1 GROUP BY e.id_escuela ORDER BY i.nombre, e.nombre"
            );
            let mut stmt = conn.prepare(&sql)?;
            let filas = stmt.query_map(params![id], |f| escuela_desde_fila(f))?;
            for f in filas {
                out.push(f?);
            }
        }
        None => {
            let sql = format!("{SQL_ESCUELAS} GROUP BY e.id_escuela ORDER BY i.nombre, e.nombre");
            let mut stmt = conn.prepare(&sql)?;
            let filas = stmt.query_map([], |f| escuela_desde_fila(f))?;
            for f in filas {
                out.push(f?);
            }
        }
    }
    Ok(out)
}

// --- Catálogos de opciones de filtro --------------------------------------

pub fn municipios(conn: &Connection) -> Result<Vec<Municipio>, ErrorCatalogo> {
    let mut stmt = conn.prepare("SELECT id_municipio, nombre FROM municipios ORDER BY nombre")?;
    let filas = stmt.query_map([], |f| {
        Ok(Municipio { id_municipio: f.get(0)?, nombre: f.get(1)? })
    })?;
    let mut out = Vec::new();
    for f in filas {
        out.push(f?);
    }
    Ok(out)
}

pub fn niveles(conn: &Connection) -> Result<Vec<Nivel>, ErrorCatalogo> {
    let mut stmt = conn.prepare("SELECT id_nivel, nombre FROM niveles ORDER BY id_nivel")?;
    let filas = stmt.query_map([], |f| Ok(Nivel { id_nivel: f.get(0)?, nombre: f.get(1)? }))?;
    let mut out = Vec::new();
    for f in filas {
        out.push(f?);
    }
    Ok(out)
}

pub fn modalidades(conn: &Connection) -> Result<Vec<Modalidad>, ErrorCatalogo> {
    let mut stmt = conn.prepare("SELECT id_modalidad, nombre FROM modalidades ORDER BY id_modalidad")?;
    let filas = stmt.query_map([], |f| {
        Ok(Modalidad { id_modalidad: f.get(0)?, nombre: f.get(1)? })
    })?;
    let mut out = Vec::new();
    for f in filas {
        out.push(f?);
    }
    Ok(out)
}

pub fn campos(conn: &Connection) -> Result<Vec<CampoFormacion>, ErrorCatalogo> {
    let mut stmt = conn.prepare("SELECT id_campo, nombre FROM campos_formacion ORDER BY id_campo")?;
    let filas = stmt.query_map([], |f| {
        Ok(CampoFormacion { id_campo: f.get(0)?, nombre: f.get(1)? })
    })?;
    let mut out = Vec::new();
    for f in filas {
        out.push(f?);
    }
    Ok(out)
}

pub fn carreras(conn: &Connection) -> Result<Vec<Carrera>, ErrorCatalogo> {
    let mut stmt = conn
        .prepare("SELECT id_carrera, nombre, clave, id_campo, id_info FROM carreras ORDER BY nombre")?;
    let filas = stmt.query_map([], |f| {
        Ok(Carrera {
            id_carrera: f.get(0)?,
            nombre: f.get(1)?,
            clave: f.get(2)?,
            id_campo: f.get(3)?,
            id_info: f.get(4)?,
        })
    })?;
    let mut out = Vec::new();
    for f in filas {
        out.push(f?);
    }
    Ok(out)
}

pub fn info_carreras(conn: &Connection) -> Result<Vec<InfoCarrera>, ErrorCatalogo> {
    let mut stmt = conn.prepare(
        "SELECT id_info, titulo_marketing, descripcion_breve, imagen_url, palabra_clave
         FROM info_carreras ORDER BY id_info",
    )?;
    let filas = stmt.query_map([], |f| {
        Ok(InfoCarrera {
            id_info: f.get(0)?,
            titulo_marketing: f.get(1)?,
            descripcion_breve: f.get(2)?,
            imagen_url: f.get(3)?,
            palabra_clave: f.get(4)?,
        })
    })?;
    let mut out = Vec::new();
    for f in filas {
        out.push(f?);
    }
    Ok(out)
}

// --- Contenido por institución --------------------------------------------

pub fn reviews_por_institucion(
    conn: &Connection,
    id_institucion: i64,
) -> Result<Vec<Review>, ErrorCatalogo> {
    let mut stmt = conn.prepare(
        "SELECT id_review, id_institucion, nombre_usuario, calificacion, comentario, fecha
         FROM reviews WHERE id_institucion = ?1 ORDER BY fecha DESC",
    )?;
    let filas = stmt.query_map(params![id_institucion], |f| {
        Ok(Review {
            id_review: f.get(0)?,
            id_institucion: f.get(1)?,
            nombre_usuario: f.get(2)?,
            calificacion: f.get(3)?,
            comentario: f.get(4)?,
            fecha: f.get(5)?,
        })
    })?;
    let mut out = Vec::new();
    for f in filas {
        out.push(f?);
    }
    Ok(out)
}

pub fn convocatorias_por_institucion(
    conn: &Connection,
    id_institucion: i64,
) -> Result<Vec<Convocatoria>, ErrorCatalogo> {
    let mut stmt = conn.prepare(
        "SELECT id_convocatoria, id_institucion, titulo, contenido, imagen_url, fecha
         FROM convocatorias WHERE id_institucion = ?1 ORDER BY fecha DESC",
    )?;
    let filas = stmt.query_map(params![id_institucion], |f| {
        Ok(Convocatoria {
            id_convocatoria: f.get(0)?,
            id_institucion: f.get(1)?,
            titulo: f.get(2)?,
            contenido: f.get(3)?,
            imagen_url: f.get(4)?,
            fecha: f.get(5)?,
        })
    })?;
    let mut out = Vec::new();
    for f in filas {
        out.push(f?);
    }
    Ok(out)
}

pub fn galeria_por_institucion(
    conn: &Connection,
    id_institucion: i64,
) -> Result<Vec<GaleriaImagen>, ErrorCatalogo> {
    let mut stmt = conn.prepare(
        "SELECT id_imagen, id_institucion, imagen_url, descripcion
         FROM galeria_institucion WHERE id_institucion = ?1 ORDER BY id_imagen DESC",
    )?;
    let filas = stmt.query_map(params![id_institucion], |f| {
        Ok(GaleriaImagen {
            id_imagen: f.get(0)?,
            id_institucion: f.get(1)?,
            imagen_url: f.get(2)?,
            descripcion: f.get(3)?,
        })
    })?;
    let mut out = Vec::new();
    for f in filas {
        out.push(f?);
    }
    Ok(out)
}

pub fn detalles_de_oferta(
    conn: &Connection,
    id_oferta: i64,
) -> Result<Option<DetalleOferta>, ErrorCatalogo> {
    let mut stmt = conn.prepare(
        "SELECT id_detalle, id_oferta, mapa_curricular_url, perfil_ingreso, perfil_egreso,
                campo_laboral, habilidades
         FROM detalles_ofertas WHERE id_oferta = ?1",
    )?;
    let mut filas = stmt.query(params![id_oferta])?;
    match filas.next()? {
        Some(f) => Ok(Some(DetalleOferta {
            id_detalle: f.get(0)?,
            id_oferta: f.get(1)?,
            mapa_curricular_url: f.get(2)?,
            perfil_ingreso: f.get(3)?,
            perfil_egreso: f.get(4)?,
            campo_laboral: f.get(5)?,
            habilidades: f.get(6)?,
        })),
        None => Ok(None),
    }
}
