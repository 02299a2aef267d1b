//! Motor de filtrado del catálogo de ofertas.
//!
//! Función pura de (colección, estado de predicados) -> colección visible.
//! Los predicados se combinan por conjunción lógica; un predicado vacío o
//! sin fijar es trivialmente verdadero y actúa como "sin filtro". Los campos
//! opcionales ausentes nunca abortan la pasada: sólo fallan su propio
//! sub-predicado.

pub mod mapa;
pub mod normalizar;
pub mod vitrina;

use serde::{Deserialize, Serialize};

use crate::models::OfertaPlana;
use normalizar::{contiene_normalizado, normalizar_texto};

/// Ritmo académico derivado de la cadena de duración. No existe como columna;
/// ver `periodo_de_duracion`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Periodo {
    Cuatrimestral,
    Semestral,
}

/// Estado de los predicados activos. Las listas vacías y los `None` no
/// filtran nada.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FiltrosOferta {
    /// Término de búsqueda libre (insensible a mayúsculas y acentos).
    #[serde(default)]
    pub busqueda: String,
    /// Nombres de nivel seleccionados (multiselección).
    #[serde(default)]
    pub niveles: Vec<String>,
    /// Nombres de modalidad seleccionados (multiselección).
    #[serde(default)]
    pub modalidades: Vec<String>,
    /// Periodos derivados seleccionados (multiselección).
    #[serde(default)]
    pub periodos: Vec<Periodo>,
    /// Ids de campo de formación seleccionados (multiselección).
    #[serde(default)]
    pub campos: Vec<i64>,
    /// Municipio seleccionado (selección única).
    #[serde(default)]
    pub municipio: Option<i64>,
    /// Nombre de campus seleccionado (selección única, vista de institución).
    #[serde(default)]
    pub escuela: Option<String>,
}

impl FiltrosOferta {
    /// `true` cuando ningún predicado está activo (modo vitrina en la UI).
    pub fn vacios(&self) -> bool {
        self.busqueda.trim().is_empty()
            && self.niveles.is_empty()
            && self.modalidades.is_empty()
            && self.periodos.is_empty()
            && self.campos.is_empty()
            && self.municipio.is_none()
            && self.escuela.is_none()
    }
}

/// Deriva el periodo de la cadena de duración: si contiene "cuatri"
/// (normalizado) es cuatrimestral, en otro caso semestral. Heurística sobre
/// texto libre; si el periodo se promueve a columna, éste es el único punto
/// a cambiar.
pub fn periodo_de_duracion(duracion: &str) -> Periodo {
    if normalizar_texto(duracion).contains("cuatri") {
        Periodo::Cuatrimestral
    } else {
        Periodo::Semestral
    }
}

/// La búsqueda libre coincide si el término normalizado es subcadena del
/// nombre de carrera, institución, siglas, campus o municipio.
pub fn coincide_busqueda(oferta: &OfertaPlana, termino_normalizado: &str) -> bool {
    if termino_normalizado.is_empty() {
        return true;
    }
    contiene_normalizado(&oferta.carrera.nombre, termino_normalizado)
        || contiene_normalizado(&oferta.institucion.nombre, termino_normalizado)
        || oferta
            .institucion
            .siglas
            .as_deref()
            .is_some_and(|s| contiene_normalizado(s, termino_normalizado))
        || contiene_normalizado(&oferta.escuela.nombre, termino_normalizado)
        || contiene_normalizado(&oferta.municipio.nombre, termino_normalizado)
}

fn coincide(oferta: &OfertaPlana, filtros: &FiltrosOferta, termino_normalizado: &str) -> bool {
    let nivel_ok = filtros.niveles.is_empty() || filtros.niveles.contains(&oferta.nivel.nombre);
    let modalidad_ok =
        filtros.modalidades.is_empty() || filtros.modalidades.contains(&oferta.modalidad.nombre);
    let periodo_ok = filtros.periodos.is_empty()
        || filtros.periodos.contains(&periodo_de_duracion(&oferta.duracion));
    // una oferta sin campo de formación no puede satisfacer un filtro de campo
    let campo_ok = filtros.campos.is_empty()
        || oferta
            .campo
            .as_ref()
            .is_some_and(|c| filtros.campos.contains(&c.id_campo));
    let municipio_ok = match filtros.municipio {
        None => true,
        Some(id) => oferta.municipio.id_municipio == id,
    };
    let escuela_ok = match &filtros.escuela {
        None => true,
        Some(nombre) => oferta.escuela.nombre == *nombre,
    };

    coincide_busqueda(oferta, termino_normalizado)
        && nivel_ok
        && modalidad_ok
        && periodo_ok
        && campo_ok
        && municipio_ok
        && escuela_ok
}

/// Aplica la conjunción de predicados sobre la colección completa. Pura: no
/// muta la entrada ni toca el almacén; conserva el orden de llegada.
pub fn aplicar_filtros(ofertas: &[OfertaPlana], filtros: &FiltrosOferta) -> Vec<OfertaPlana> {
    let termino = normalizar_texto(filtros.busqueda.trim());
    ofertas
        .iter()
        .filter(|o| coincide(o, filtros, &termino))
        .cloned()
        .collect()
}
