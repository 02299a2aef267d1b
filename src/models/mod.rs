// Estructuras de datos del catálogo

use serde::{Deserialize, Serialize};

/// Institución como la consume el listado público: fila de `instituciones`
/// más el nombre de su tipo y la calificación agregada de reseñas. El
/// promedio nunca se almacena; se calcula al consultar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Institucion {
    pub id_institucion: i64,
    pub nombre: String,
    pub siglas: Option<String>,
    pub tipo: Option<String>,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
    pub telefono: Option<String>,
    pub sitio_web: Option<String>,
    pub correo: Option<String>,
    pub descripcion: Option<String>,
    pub logo_url: Option<String>,
    pub banner_url: Option<String>,
    pub color_hex: Option<String>,
    pub promedio_calificacion: f64,
    pub total_reviews: i64,
}

/// Campus listo para el mapa: fila de `escuelas` denormalizada con la
/// identidad visual de su institución y el nombre del municipio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscuelaMapa {
    pub id_escuela: i64,
    pub id_institucion: i64,
    pub nombre: String,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
    pub inst_nombre: String,
    pub siglas: Option<String>,
    pub logo_url: Option<String>,
    pub color_hex: Option<String>,
    pub banner_url: Option<String>,
    pub tipo: Option<String>,
    pub promedio_calificacion: f64,
    pub municipio_nombre: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Municipio {
    pub id_municipio: i64,
    pub nombre: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nivel {
    pub id_nivel: i64,
    pub nombre: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Modalidad {
    pub id_modalidad: i64,
    pub nombre: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampoFormacion {
    pub id_campo: i64,
    pub nombre: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Carrera {
    pub id_carrera: i64,
    pub nombre: String,
    pub clave: Option<String>,
    pub id_campo: Option<i64>,
    pub id_info: Option<i64>,
}

/// Ficha de marketing de una carrera; alimenta la vitrina promocional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoCarrera {
    pub id_info: i64,
    pub titulo_marketing: String,
    pub descripcion_breve: Option<String>,
    pub imagen_url: Option<String>,
    pub palabra_clave: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id_review: i64,
    pub id_institucion: i64,
    pub nombre_usuario: String,
    pub calificacion: i64,
    pub comentario: Option<String>,
    pub fecha: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Convocatoria {
    pub id_convocatoria: i64,
    pub id_institucion: i64,
    pub titulo: String,
    pub contenido: Option<String>,
    pub imagen_url: Option<String>,
    pub fecha: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaleriaImagen {
    pub id_imagen: i64,
    pub id_institucion: i64,
    pub imagen_url: String,
    pub descripcion: Option<String>,
}

/// Contenido editorial opcional de una oferta (una fila por oferta, upsert).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetalleOferta {
    pub id_detalle: i64,
    pub id_oferta: i64,
    pub mapa_curricular_url: Option<String>,
    pub perfil_ingreso: Option<String>,
    pub perfil_egreso: Option<String>,
    pub campo_laboral: Option<String>,
    pub habilidades: Option<String>,
}

// --- Agregado plano de ofertas -------------------------------------------
//
// `OfertaPlana` es el contrato de `/api/ofertas`: una fila por oferta cuyas
// referencias obligatorias resuelven, con resúmenes anidados de cada entidad.
// Los campos opcionales se serializan como `null`, nunca se omiten.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumenInstitucion {
    pub id_institucion: i64,
    pub nombre: String,
    pub tipo: Option<String>,
    pub logo_url: Option<String>,
    pub color_hex: Option<String>,
    pub siglas: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumenEscuela {
    pub id_escuela: i64,
    pub nombre: String,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumenCarrera {
    pub nombre: String,
    pub clave: Option<String>,
    pub id_info: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumenMunicipio {
    pub id_municipio: i64,
    pub nombre: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumenCampo {
    pub id_campo: i64,
    pub nombre: String,
}

/// Nombre suelto de un catálogo (nivel, modalidad) dentro del agregado.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NombreCatalogo {
    pub nombre: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfertaPlana {
    pub id_oferta: i64,
    pub inst_id: i64,
    pub institucion: ResumenInstitucion,
    pub escuela: ResumenEscuela,
    pub carrera: ResumenCarrera,
    pub nivel: NombreCatalogo,
    pub modalidad: NombreCatalogo,
    pub municipio: ResumenMunicipio,
    pub campo: Option<ResumenCampo>,
    pub duracion: String,
}

// --- Cuerpos de escritura -------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NuevaOferta {
    pub id_institucion: i64,
    pub id_escuela: i64,
    pub id_carrera: i64,
    pub id_nivel: i64,
    pub id_modalidad: i64,
    #[serde(default)]
    pub duracion: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NuevaEscuela {
    pub id_institucion: i64,
    pub id_municipio: Option<i64>,
    pub nombre: String,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NuevaCarrera {
    pub nombre: String,
    pub clave: Option<String>,
    pub id_campo: Option<i64>,
    pub id_info: Option<i64>,
}

/// Campos editables del perfil de una institución. `None` escribe NULL,
/// igual que hacía el panel de administración original.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ActualizacionInstitucion {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub telefono: Option<String>,
    pub sitio_web: Option<String>,
    pub banner_url: Option<String>,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DetallesOfertaEntrada {
    pub mapa_curricular_url: Option<String>,
    pub perfil_ingreso: Option<String>,
    pub perfil_egreso: Option<String>,
    pub campo_laboral: Option<String>,
    pub habilidades: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NuevaReview {
    pub id_institucion: i64,
    pub nombre_usuario: String,
    pub calificacion: i64,
    pub comentario: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NuevaConvocatoria {
    pub id_institucion: i64,
    pub titulo: String,
    pub contenido: Option<String>,
    pub imagen_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NuevaImagenGaleria {
    pub id_institucion: i64,
    pub imagen_url: String,
    pub descripcion: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NuevoInteres {
    pub id_estudiante: i64,
    pub id_institucion: i64,
}
