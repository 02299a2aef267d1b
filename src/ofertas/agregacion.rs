//! Servicio de agregación de ofertas: denormaliza el esquema relacional en
//! un registro plano por oferta, listo para el catálogo y el mapa.
//!
//! Las referencias obligatorias (institución, escuela, municipio, carrera,
//! nivel, modalidad) entran por JOIN interno: una oferta con una referencia
//! colgante simplemente no aparece, nunca sale un registro a medio poblar.
//! El campo de formación es opcional y se preserva como `null`.

use rusqlite::{Connection, Row, params};

use crate::catalogo::queries::coordenada;
use crate::error::ErrorCatalogo;
use crate::models::{
    NombreCatalogo, OfertaPlana, ResumenCampo, ResumenCarrera, ResumenEscuela, ResumenInstitucion,
    ResumenMunicipio,
};

const SQL_OFERTAS: &str = "
    SELECT o.id_oferta,
           i.id_institucion, i.nombre AS inst_nombre, t.nombre AS inst_tipo,
           i.logo_url, i.color_hex, i.siglas,
           e.id_escuela, e.nombre AS escuela_nombre, e.latitud, e.longitud,
           c.nombre AS carrera_nombre, c.clave AS carrera_clave, c.id_info,
           n.nombre AS nivel_nombre, m.nombre AS modalidad_nombre,
           mun.id_municipio, mun.nombre AS municipio_nombre,
           camp.id_campo, camp.nombre AS campo_nombre,
           o.duracion
    FROM ofertas o
    JOIN instituciones i ON o.id_institucion = i.id_institucion
    LEFT JOIN tipos_institucion t ON i.id_tipo = t.id_tipo
    JOIN escuelas e ON o.id_escuela = e.id_escuela
    JOIN municipios mun ON e.id_municipio = mun.id_municipio
    JOIN carreras c ON o.id_carrera = c.id_carrera
    LEFT JOIN campos_formacion camp ON c.id_campo = camp.id_campo
    JOIN niveles n ON o.id_nivel = n.id_nivel
    JOIN modalidades m ON o.id_modalidad = m.id_modalidad
";

// Orden estable para que el catálogo sea determinista entre corridas.
const ORDEN_OFERTAS: &str = " ORDER BY i.nombre, c.nombre, o.id_oferta";

fn oferta_desde_fila(fila: &Row<'_>) -> rusqlite::Result<OfertaPlana> {
    let id_campo: Option<i64> = fila.get(18)?;
    let campo_nombre: Option<String> = fila.get(19)?;
    let campo = match (id_campo, campo_nombre) {
        (Some(id), Some(nombre)) => Some(ResumenCampo { id_campo: id, nombre }),
        _ => None,
    };

    Ok(OfertaPlana {
        id_oferta: fila.get(0)?,
        inst_id: fila.get(1)?,
        institucion: ResumenInstitucion {
            id_institucion: fila.get(1)?,
            nombre: fila.get(2)?,
            tipo: fila.get(3)?,
            logo_url: fila.get(4)?,
            color_hex: fila.get(5)?,
            siglas: fila.get(6)?,
        },
        escuela: ResumenEscuela {
            id_escuela: fila.get(7)?,
            nombre: fila.get(8)?,
            latitud: coordenada(fila, 9),
            longitud: coordenada(fila, 10),
        },
        carrera: ResumenCarrera {
            nombre: fila.get(11)?,
            clave: fila.get(12)?,
            id_info: fila.get(13)?,
        },
        nivel: NombreCatalogo { nombre: fila.get(14)? },
        modalidad: NombreCatalogo { nombre: fila.get(15)? },
        municipio: ResumenMunicipio {
            id_municipio: fila.get(16)?,
            nombre: fila.get(17)?,
        },
        campo,
        duracion: fila.get(20)?,
    })
}

/// Produce la colección completa de ofertas planas, opcionalmente acotada a
/// una institución. Cada oferta resoluble aparece exactamente una vez, en
/// orden (institución, carrera, id).
pub fn ofertas_planas(
    conn: &Connection,
    institucion: Option<i64>,
) -> Result<Vec<OfertaPlana>, ErrorCatalogo> {
    let mut out = Vec::new();
    match institucion {
        Some(id) => {
            let sql = format!("{SQL_OFERTAS} WHERE i.id_institucion = ?1 {ORDEN_OFERTAS}");
            let mut stmt = conn.prepare(&sql)?;
            let filas = stmt.query_map(params![id], |f| oferta_desde_fila(f))?;
            for f in filas {
                out.push(f?);
            }
        }
        None => {
            let sql = format!("{SQL_OFERTAS} {ORDEN_OFERTAS}");
            let mut stmt = conn.prepare(&sql)?;
            let filas = stmt.query_map([], |f| oferta_desde_fila(f))?;
            for f in filas {
                out.push(f?);
            }
        }
    }
    Ok(out)
}
