mod comun;

use eduqro::catalogo::db::abrir_sqlite;
use eduqro::ofertas::ofertas_planas;
use rusqlite::params;

#[test]
fn test_agregacion_completa_y_unica() {
    let origen = comun::catalogo_sembrado("agregacion-completa");
    let conn = abrir_sqlite(&origen).expect("Debe abrir el catálogo");

    let ofertas = ofertas_planas(&conn, None).expect("Debe agregar las ofertas");
    assert_eq!(ofertas.len(), 4);

    // cada oferta resoluble aparece exactamente una vez
    let mut ids: Vec<i64> = ofertas.iter().map(|o| o.id_oferta).collect();
    ids.sort();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[test]
fn test_orden_estable_institucion_carrera() {
    let origen = comun::catalogo_sembrado("agregacion-orden");
    let conn = abrir_sqlite(&origen).expect("Debe abrir el catálogo");

    let ofertas = ofertas_planas(&conn, None).expect("Debe agregar las ofertas");
    // 'Tecnológico...' < 'Universidad...'; dentro de la UAQ las carreras van
    // alfabéticamente y el empate de 'Medicina' lo decide el id de oferta
    let orden: Vec<i64> = ofertas.iter().map(|o| o.id_oferta).collect();
    assert_eq!(orden, vec![3, 1, 2, 4]);
}

#[test]
fn test_campos_poblados_en_registro_plano() {
    let origen = comun::catalogo_sembrado("agregacion-campos");
    let conn = abrir_sqlite(&origen).expect("Debe abrir el catálogo");

    let ofertas = ofertas_planas(&conn, None).expect("Debe agregar las ofertas");
    let software = ofertas
        .iter()
        .find(|o| o.id_oferta == 1)
        .expect("Debe estar la oferta de software");

    assert_eq!(software.inst_id, 1);
    assert_eq!(software.institucion.nombre, "Universidad Autónoma de Querétaro");
    assert_eq!(software.institucion.siglas.as_deref(), Some("UAQ"));
    assert_eq!(software.institucion.tipo.as_deref(), Some("Pública"));
    assert_eq!(software.escuela.nombre, "Centro Universitario");
    assert_eq!(software.escuela.latitud, Some(20.5888));
    assert_eq!(software.carrera.nombre, "Ingeniería en Software");
    assert_eq!(software.carrera.clave.as_deref(), Some("ISW"));
    assert_eq!(software.carrera.id_info, Some(1));
    assert_eq!(software.nivel.nombre, "Licenciatura");
    assert_eq!(software.modalidad.nombre, "Escolarizada");
    assert_eq!(software.municipio.nombre, "Querétaro");
    assert_eq!(software.duracion, "9 cuatrimestres");

    let campo = software.campo.as_ref().expect("Software debe traer campo");
    assert_eq!(campo.nombre, "Ingeniería");
}

#[test]
fn test_campo_opcional_se_preserva_como_nulo() {
    let origen = comun::catalogo_sembrado("agregacion-campo-nulo");
    let conn = abrir_sqlite(&origen).expect("Debe abrir el catálogo");

    let ofertas = ofertas_planas(&conn, None).expect("Debe agregar las ofertas");
    // Derecho no tiene campo de formación: la oferta aparece igual, con null
    let derecho = ofertas
        .iter()
        .find(|o| o.carrera.nombre == "Derecho")
        .expect("La oferta sin campo debe estar en la colección");
    assert!(derecho.campo.is_none());

    let json = serde_json::to_value(derecho).expect("Debe serializar");
    assert!(json.get("campo").expect("campo debe existir en el JSON").is_null());
}

#[test]
fn test_brecha_referencial_excluye_la_fila() {
    let origen = comun::catalogo_sembrado("agregacion-brecha");
    let conn = abrir_sqlite(&origen).expect("Debe abrir el catálogo");

    // oferta con carrera inexistente: el JOIN interno la deja fuera en vez
    // de producir un registro a medio poblar
    conn.execute(
        "INSERT INTO ofertas (id_oferta, id_institucion, id_escuela, id_carrera, id_nivel, id_modalidad, duracion)
         VALUES (99, 1, 1, 999, 1, 1, '6 semestres')",
        [],
    )
    .expect("Debe insertar la fila huérfana");

    let ofertas = ofertas_planas(&conn, None).expect("Debe agregar las ofertas");
    assert_eq!(ofertas.len(), 4);
    assert!(ofertas.iter().all(|o| o.id_oferta != 99));
}

#[test]
fn test_filtro_de_entrada_por_institucion() {
    let origen = comun::catalogo_sembrado("agregacion-institucion");
    let conn = abrir_sqlite(&origen).expect("Debe abrir el catálogo");

    let del_tec = ofertas_planas(&conn, Some(2)).expect("Debe agregar las ofertas");
    assert_eq!(del_tec.len(), 1);
    assert_eq!(del_tec[0].carrera.nombre, "Derecho");

    let de_nadie = ofertas_planas(&conn, Some(77)).expect("Debe agregar las ofertas");
    assert!(de_nadie.is_empty());
}

#[test]
fn test_coordenada_no_numerica_se_colapsa_a_ausente() {
    let origen = comun::catalogo_sembrado("agregacion-coordenadas");
    let conn = abrir_sqlite(&origen).expect("Debe abrir el catálogo");

    conn.execute(
        "UPDATE escuelas SET latitud = 'no-numerico' WHERE id_escuela = 1",
        params![],
    )
    .expect("Debe poder ensuciar la coordenada");

    let ofertas = ofertas_planas(&conn, None).expect("Debe agregar las ofertas");
    let afectada = ofertas
        .iter()
        .find(|o| o.escuela.id_escuela == 1)
        .expect("La oferta sigue en la colección");
    // nunca NaN: el valor ilegible se vuelve ausente
    assert!(afectada.escuela.latitud.is_none());
    assert_eq!(afectada.escuela.longitud, Some(-100.3899));
}

#[test]
fn test_campus_sin_ubicacion_sigue_en_la_agregacion() {
    let origen = comun::catalogo_sembrado("agregacion-cero");
    let conn = abrir_sqlite(&origen).expect("Debe abrir el catálogo");

    let ofertas = ofertas_planas(&conn, None).expect("Debe agregar las ofertas");
    // la oferta del campus (0, 0) existe en el catálogo; el mapa la
    // descartará, las listas no
    let sin_ubicacion = ofertas
        .iter()
        .find(|o| o.escuela.id_escuela == 2)
        .expect("La oferta del campus sin ubicación debe estar");
    assert_eq!(sin_ubicacion.escuela.latitud, Some(0.0));
    assert_eq!(sin_ubicacion.escuela.longitud, Some(0.0));
}
