//! Coincidencias para la vitrina promocional: ofertas cuya carrera contiene
//! la palabra clave de marketing, una por (institución, campus), máximo tres.

use std::collections::HashSet;

use crate::models::OfertaPlana;

use super::normalizar::{contiene_normalizado, normalizar_texto};

pub const MAX_COINCIDENCIAS: usize = 3;

/// Selecciona las ofertas a exhibir para una palabra clave. La coincidencia
/// es contención normalizada sobre el nombre de la carrera; se conserva la
/// primera oferta de cada par (institución, campus). Una palabra clave vacía
/// no exhibe nada.
pub fn coincidencias_vitrina(ofertas: &[OfertaPlana], palabra_clave: &str) -> Vec<OfertaPlana> {
    let clave = normalizar_texto(palabra_clave.trim());
    if clave.is_empty() {
        return Vec::new();
    }

    let mut vistos: HashSet<(i64, i64)> = HashSet::new();
    let mut seleccion = Vec::new();
    for oferta in ofertas {
        if !contiene_normalizado(&oferta.carrera.nombre, &clave) {
            continue;
        }
        if !vistos.insert((oferta.inst_id, oferta.escuela.id_escuela)) {
            continue;
        }
        seleccion.push(oferta.clone());
        if seleccion.len() == MAX_COINCIDENCIAS {
            break;
        }
    }
    seleccion
}
