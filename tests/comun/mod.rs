// Utilidades compartidas por las pruebas de integración: un catálogo SQLite
// temporal sembrado con el estado educativo en miniatura.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use rusqlite::Connection;

use eduqro::catalogo::db::{OrigenDb, abrir_sqlite, init_db};
use eduqro::models::{
    NombreCatalogo, OfertaPlana, ResumenCampo, ResumenCarrera, ResumenEscuela, ResumenInstitucion,
    ResumenMunicipio,
};

static CONTADOR: AtomicUsize = AtomicUsize::new(0);

/// Origen SQLite en un archivo temporal único por prueba.
pub fn origen_temporal(etiqueta: &str) -> OrigenDb {
    let n = CONTADOR.fetch_add(1, Ordering::SeqCst);
    let ruta: PathBuf = std::env::temp_dir()
        .join(format!("eduqro-{}-{}-{}.db", etiqueta, std::process::id(), n));
    let _ = std::fs::remove_file(&ruta);
    OrigenDb::Sqlite(ruta)
}

/// Catálogo temporal con esquema inicializado y datos de ejemplo cargados.
pub fn catalogo_sembrado(etiqueta: &str) -> OrigenDb {
    let origen = origen_temporal(etiqueta);
    init_db(&origen).expect("Debe inicializar el esquema");
    let conn = abrir_sqlite(&origen).expect("Debe abrir el catálogo temporal");
    sembrar(&conn);
    origen
}

/// Dos instituciones, tres campus (uno sin coordenadas), tres carreras (una
/// sin campo de formación) y cuatro ofertas. Es el escenario de referencia
/// de las pruebas de agregación, filtrado y mapa.
pub fn sembrar(conn: &Connection) {
    conn.execute_batch(
        "
        INSERT INTO tipos_institucion (id_tipo, nombre) VALUES
            (1, 'Pública'),
            (2, 'Privada');

        INSERT INTO municipios (id_municipio, nombre) VALUES
            (1, 'Querétaro'),
            (2, 'San Juan del Río');

        INSERT INTO instituciones
            (id_institucion, nombre, siglas, id_tipo, latitud, longitud, color_hex, logo_url)
        VALUES
            (1, 'Universidad Autónoma de Querétaro', 'UAQ', 1, 20.5922, -100.4124, '#003d79', 'https://cdn.example/uaq.png'),
            (2, 'Tecnológico de Monterrey', 'ITESM', 2, 20.6136, -100.4047, '#0a2240', NULL);

        INSERT INTO escuelas (id_escuela, id_institucion, id_municipio, nombre, latitud, longitud) VALUES
            (1, 1, 1, 'Centro Universitario', 20.5888, -100.3899),
            (2, 1, 2, 'Campus San Juan del Río', 0.0, 0.0),
            (3, 2, 1, 'Campus Querétaro', 20.6136, -100.4047);

        INSERT INTO campos_formacion (id_campo, nombre) VALUES
            (1, 'Ingeniería'),
            (2, 'Salud');

        INSERT INTO info_carreras (id_info, titulo_marketing, descripcion_breve, imagen_url, palabra_clave) VALUES
            (1, 'Construye el futuro', 'Software que mueve al estado', NULL, 'Ingeniería');

        INSERT INTO carreras (id_carrera, nombre, clave, id_campo, id_info) VALUES
            (1, 'Ingeniería en Software', 'ISW', 1, 1),
            (2, 'Medicina', 'MED', 2, NULL),
            (3, 'Derecho', 'DER', NULL, NULL);

        INSERT INTO niveles (id_nivel, nombre) VALUES
            (1, 'Licenciatura'),
            (2, 'Posgrado');

        INSERT INTO modalidades (id_modalidad, nombre) VALUES
            (1, 'Escolarizada'),
            (2, 'En Línea');

        INSERT INTO ofertas (id_oferta, id_institucion, id_escuela, id_carrera, id_nivel, id_modalidad, duracion) VALUES
            (1, 1, 1, 1, 1, 1, '9 cuatrimestres'),
            (2, 1, 1, 2, 1, 1, '12 semestres'),
            (3, 2, 3, 3, 1, 2, '8 semestres'),
            (4, 1, 2, 2, 2, 1, '4 cuatrimestres');
        ",
    )
    .expect("Debe sembrar los datos de ejemplo");
}

/// Constructor compacto de ofertas planas para las pruebas puras del motor
/// de filtrado (sin almacén de por medio).
pub struct OfertaPrueba<'a> {
    pub id: i64,
    pub inst_id: i64,
    pub institucion: &'a str,
    pub siglas: Option<&'a str>,
    pub id_escuela: i64,
    pub escuela: &'a str,
    pub carrera: &'a str,
    pub nivel: &'a str,
    pub modalidad: &'a str,
    pub id_municipio: i64,
    pub municipio: &'a str,
    pub campo: Option<(i64, &'a str)>,
    pub duracion: &'a str,
}

pub fn oferta(datos: OfertaPrueba<'_>) -> OfertaPlana {
    OfertaPlana {
        id_oferta: datos.id,
        inst_id: datos.inst_id,
        institucion: ResumenInstitucion {
            id_institucion: datos.inst_id,
            nombre: datos.institucion.to_string(),
            tipo: None,
            logo_url: None,
            color_hex: None,
            siglas: datos.siglas.map(|s| s.to_string()),
        },
        escuela: ResumenEscuela {
            id_escuela: datos.id_escuela,
            nombre: datos.escuela.to_string(),
            latitud: Some(20.59),
            longitud: Some(-100.39),
        },
        carrera: ResumenCarrera {
            nombre: datos.carrera.to_string(),
            clave: None,
            id_info: None,
        },
        nivel: NombreCatalogo { nombre: datos.nivel.to_string() },
        modalidad: NombreCatalogo { nombre: datos.modalidad.to_string() },
        municipio: ResumenMunicipio {
            id_municipio: datos.id_municipio,
            nombre: datos.municipio.to_string(),
        },
        campo: datos.campo.map(|(id, nombre)| ResumenCampo { id_campo: id, nombre: nombre.to_string() }),
        duracion: datos.duracion.to_string(),
    }
}

/// Las tres ofertas del escenario de la especificación original.
pub fn ofertas_de_escenario() -> Vec<OfertaPlana> {
    vec![
        oferta(OfertaPrueba {
            id: 1,
            inst_id: 1,
            institucion: "Universidad Autónoma de Querétaro",
            siglas: Some("UAQ"),
            id_escuela: 1,
            escuela: "Centro Universitario",
            carrera: "Ingeniería en Software",
            nivel: "Licenciatura",
            modalidad: "Escolarizada",
            id_municipio: 1,
            municipio: "Querétaro",
            campo: Some((1, "Ingeniería")),
            duracion: "9 cuatrimestres",
        }),
        oferta(OfertaPrueba {
            id: 2,
            inst_id: 1,
            institucion: "Universidad Autónoma de Querétaro",
            siglas: Some("UAQ"),
            id_escuela: 1,
            escuela: "Centro Universitario",
            carrera: "Medicina",
            nivel: "Licenciatura",
            modalidad: "Escolarizada",
            id_municipio: 1,
            municipio: "Querétaro",
            campo: Some((2, "Salud")),
            duracion: "12 semestres",
        }),
        oferta(OfertaPrueba {
            id: 3,
            inst_id: 2,
            institucion: "Tecnológico de Monterrey",
            siglas: Some("ITESM"),
            id_escuela: 3,
            escuela: "Campus Querétaro",
            carrera: "Derecho",
            nivel: "Licenciatura",
            modalidad: "En Línea",
            id_municipio: 1,
            municipio: "Querétaro",
            campo: None,
            duracion: "8 semestres",
        }),
    ]
}
