mod comun;

use std::collections::HashSet;

use eduqro::filtros::{FiltrosOferta, Periodo, aplicar_filtros};

use comun::{OfertaPrueba, oferta, ofertas_de_escenario};

fn ids(ofertas: &[eduqro::models::OfertaPlana]) -> Vec<i64> {
    ofertas.iter().map(|o| o.id_oferta).collect()
}

#[test]
fn test_escenario_busqueda_sin_acento() {
    let ofertas = ofertas_de_escenario();
    let filtros = FiltrosOferta { busqueda: "ingenieria".to_string(), ..Default::default() };
    // "ingenieria" (sin acento) debe encontrar "Ingeniería en Software"
    assert_eq!(ids(&aplicar_filtros(&ofertas, &filtros)), vec![1]);
}

#[test]
fn test_escenario_nivel_sin_busqueda() {
    let ofertas = ofertas_de_escenario();
    let filtros =
        FiltrosOferta { niveles: vec!["Licenciatura".to_string()], ..Default::default() };
    assert_eq!(ids(&aplicar_filtros(&ofertas, &filtros)), vec![1, 2, 3]);
}

#[test]
fn test_escenario_siglas_de_institucion() {
    let ofertas = ofertas_de_escenario();
    let filtros = FiltrosOferta { busqueda: "itesm".to_string(), ..Default::default() };
    assert_eq!(ids(&aplicar_filtros(&ofertas, &filtros)), vec![3]);

    // también en el otro sentido: mayúsculas contra siglas guardadas
    let filtros = FiltrosOferta { busqueda: "UAQ".to_string(), ..Default::default() };
    assert_eq!(ids(&aplicar_filtros(&ofertas, &filtros)), vec![1, 2]);
}

#[test]
fn test_busqueda_por_municipio_y_acentos() {
    let ofertas = ofertas_de_escenario();
    // "queretaro" debe coincidir con "Querétaro" vía municipio e institución
    let filtros = FiltrosOferta { busqueda: "queretaro".to_string(), ..Default::default() };
    assert_eq!(ids(&aplicar_filtros(&ofertas, &filtros)), vec![1, 2, 3]);
}

#[test]
fn test_identidad_con_predicados_vacios() {
    let ofertas = ofertas_de_escenario();
    let resultado = aplicar_filtros(&ofertas, &FiltrosOferta::default());
    assert_eq!(ids(&resultado), ids(&ofertas));
}

#[test]
fn test_conjuncion_equivale_a_interseccion() {
    let ofertas = ofertas_de_escenario();

    let solo_busqueda = FiltrosOferta { busqueda: "uaq".to_string(), ..Default::default() };
    let solo_modalidad =
        FiltrosOferta { modalidades: vec!["Escolarizada".to_string()], ..Default::default() };
    let combinado = FiltrosOferta {
        busqueda: "uaq".to_string(),
        modalidades: vec!["Escolarizada".to_string()],
        ..Default::default()
    };

    let a: HashSet<i64> = ids(&aplicar_filtros(&ofertas, &solo_busqueda)).into_iter().collect();
    let b: HashSet<i64> = ids(&aplicar_filtros(&ofertas, &solo_modalidad)).into_iter().collect();
    let interseccion: HashSet<i64> = a.intersection(&b).copied().collect();

    let juntos: HashSet<i64> = ids(&aplicar_filtros(&ofertas, &combinado)).into_iter().collect();
    assert_eq!(juntos, interseccion);
}

#[test]
fn test_filtro_por_campo_ignora_ofertas_sin_campo() {
    let ofertas = ofertas_de_escenario();
    let filtros = FiltrosOferta { campos: vec![1], ..Default::default() };
    // Derecho no tiene campo: no satisface el sub-predicado y no truena nada
    assert_eq!(ids(&aplicar_filtros(&ofertas, &filtros)), vec![1]);

    let filtros = FiltrosOferta { campos: vec![1, 2], ..Default::default() };
    assert_eq!(ids(&aplicar_filtros(&ofertas, &filtros)), vec![1, 2]);
}

#[test]
fn test_filtro_por_periodo_derivado() {
    let ofertas = ofertas_de_escenario();
    let filtros =
        FiltrosOferta { periodos: vec![Periodo::Cuatrimestral], ..Default::default() };
    assert_eq!(ids(&aplicar_filtros(&ofertas, &filtros)), vec![1]);

    let filtros = FiltrosOferta { periodos: vec![Periodo::Semestral], ..Default::default() };
    assert_eq!(ids(&aplicar_filtros(&ofertas, &filtros)), vec![2, 3]);
}

#[test]
fn test_filtro_por_municipio_unico() {
    let mut ofertas = ofertas_de_escenario();
    ofertas.push(oferta(OfertaPrueba {
        id: 4,
        inst_id: 1,
        institucion: "Universidad Autónoma de Querétaro",
        siglas: Some("UAQ"),
        id_escuela: 2,
        escuela: "Campus San Juan del Río",
        carrera: "Medicina",
        nivel: "Posgrado",
        modalidad: "Escolarizada",
        id_municipio: 2,
        municipio: "San Juan del Río",
        campo: Some((2, "Salud")),
        duracion: "4 cuatrimestres",
    }));

    let filtros = FiltrosOferta { municipio: Some(2), ..Default::default() };
    assert_eq!(ids(&aplicar_filtros(&ofertas, &filtros)), vec![4]);
}

#[test]
fn test_filtro_por_campus_en_vista_de_institucion() {
    let ofertas = ofertas_de_escenario();
    let filtros = FiltrosOferta {
        escuela: Some("Centro Universitario".to_string()),
        ..Default::default()
    };
    assert_eq!(ids(&aplicar_filtros(&ofertas, &filtros)), vec![1, 2]);
}

#[test]
fn test_pureza_no_muta_la_entrada() {
    let ofertas = ofertas_de_escenario();
    let copia = ids(&ofertas);
    let filtros = FiltrosOferta { busqueda: "derecho".to_string(), ..Default::default() };
    let _ = aplicar_filtros(&ofertas, &filtros);
    let _ = aplicar_filtros(&ofertas, &filtros);
    assert_eq!(ids(&ofertas), copia);
}

#[test]
fn test_termino_sin_coincidencias() {
    let ofertas = ofertas_de_escenario();
    let filtros = FiltrosOferta { busqueda: "gastronomía".to_string(), ..Default::default() };
    assert!(aplicar_filtros(&ofertas, &filtros).is_empty());
}
