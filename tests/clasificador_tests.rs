use ofertashift::oferta::clasificador::{clasificar_fila, ColumnasFila};

fn fila(celdas: &[&str]) -> Vec<String> {
    celdas.iter().map(|c| c.to_string()).collect()
}

#[test]
fn test_diez_celdas_layout_fijo() {
    let r = fila(&[
        "1111", "2222", "TEO", "MAT101", "1", "CÁLCULO I", "30", "JUAN PÉREZ", "LU 08:30 A 10:10", "PRESENCIAL",
    ]);
    let cols = clasificar_fila(&r).expect("fila de 10 celdas siempre se clasifica");
    assert_eq!(
        cols,
        ColumnasFila {
            nrc: "1111".into(),
            nrc_ligados: "2222".into(),
            actividad: "TEO".into(),
            codigo: "MAT101".into(),
            seccion: "1".into(),
            titulo: "CÁLCULO I".into(),
            vacantes: "30".into(),
            profesor: "JUAN PÉREZ".into(),
            horario: "LU 08:30 A 10:10".into(),
            modalidad: "PRESENCIAL".into(),
        }
    );
    // misma fila, mismo resultado
    assert_eq!(clasificar_fila(&r), Some(cols));
}

#[test]
fn test_diez_celdas_sin_validar_contenido() {
    // ni NRC ni código con forma válida: igual se toma el orden canónico
    let r = fila(&["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k"]);
    let cols = clasificar_fila(&r).unwrap();
    assert_eq!(cols.nrc, "a");
    assert_eq!(cols.codigo, "d");
    assert_eq!(cols.modalidad, "j");
}

#[test]
fn test_cinco_o_menos_celdas() {
    for n in 0..=5 {
        let r: Vec<String> = (0..n).map(|i| if i == 1 { "MAT101".to_string() } else { "1234".to_string() }).collect();
        assert_eq!(clasificar_fila(&r), None, "{} celdas", n);
    }
}

#[test]
fn test_fallback_nueve_celdas() {
    let r = fila(&["1234", "5678", "MAT101", "1", "CALCULO", "30", "PROF X", "LU 08:30 A 10:10", "ONLINE"]);
    let cols = clasificar_fila(&r).unwrap();
    assert_eq!(cols.nrc, "1234");
    assert_eq!(cols.nrc_ligados, "5678");
    // la celda 2 se toma como actividad aunque sea el código
    assert_eq!(cols.actividad, "MAT101");
    assert_eq!(cols.codigo, "MAT101");
    assert_eq!(cols.seccion, "1");
    assert_eq!(cols.titulo, "CALCULO");
    assert_eq!(cols.vacantes, "30");
    assert_eq!(cols.profesor, "PROF X");
    assert_eq!(cols.horario, "LU 08:30 A 10:10");
    assert_eq!(cols.modalidad, "ONLINE");
}

#[test]
fn test_fallback_siete_celdas_sin_vacantes_ni_profesor() {
    let r = fila(&["1234", "", "TAL", "cbm1000", "2", "MA 10:20 A 12:00", "PRESENCIAL"]);
    let cols = clasificar_fila(&r).unwrap();
    assert_eq!(cols.codigo, "cbm1000");
    assert_eq!(cols.actividad, "TAL");
    assert_eq!(cols.seccion, "2");
    assert_eq!(cols.titulo, "MA 10:20 A 12:00");
    assert_eq!(cols.vacantes, "");
    assert_eq!(cols.profesor, "");
    assert_eq!(cols.horario, "MA 10:20 A 12:00");
    assert_eq!(cols.modalidad, "PRESENCIAL");
}

#[test]
fn test_fallback_codigo_al_final_de_la_fila() {
    let r = fila(&["1234", "", "TEO", "x", "y", "MAT101"]);
    let cols = clasificar_fila(&r).unwrap();
    assert_eq!(cols.codigo, "MAT101");
    assert_eq!(cols.seccion, "");
    assert_eq!(cols.titulo, "");
    assert_eq!(cols.horario, "y");
    assert_eq!(cols.modalidad, "MAT101");
}

#[test]
fn test_fallback_rechaza_sin_codigo_o_codigo_al_inicio() {
    assert_eq!(clasificar_fila(&fila(&["1234", "", "TEO", "x", "y", "z", "w"])), None);
    assert_eq!(clasificar_fila(&fila(&["MAT101", "1234", "TEO", "x", "y", "z"])), None);
    assert_eq!(clasificar_fila(&fila(&["NRC", "NRC LIGADOS", "TIPO", "CODIGO", "SECCION", "HORARIO"])), None);
}
