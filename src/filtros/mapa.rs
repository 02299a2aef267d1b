//! Puerta de validez de coordenadas para la colocación de marcadores.
//!
//! Un campus sin ubicación real no debe llegar al mapa, pero sí a las vistas
//! de lista; por eso la puerta filtra una copia y nunca muta la colección.

use crate::models::EscuelaMapa;

/// Ambas componentes presentes, finitas y distintas de cero. El par (0, 0)
/// es el centinela de "sin ubicación" en los datos capturados.
pub fn coordenadas_validas(latitud: Option<f64>, longitud: Option<f64>) -> bool {
    match (latitud, longitud) {
        (Some(lat), Some(lon)) => lat.is_finite() && lon.is_finite() && lat != 0.0 && lon != 0.0,
        _ => false,
    }
}

/// Subconjunto de campus que pueden colocarse en el mapa.
pub fn escuelas_georreferenciadas(escuelas: &[EscuelaMapa]) -> Vec<EscuelaMapa> {
    escuelas
        .iter()
        .filter(|e| coordenadas_validas(e.latitud, e.longitud))
        .cloned()
        .collect()
}
