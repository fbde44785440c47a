use ofertashift::horario::parsear_sesiones;
use ofertashift::models::{Dia, Sesion};

fn sesion(day: Dia, blocks: &[u8]) -> Sesion {
    Sesion { day, blocks: blocks.to_vec() }
}

#[test]
fn test_jueves_bloque_4() {
    for texto in [
        "JU 14:00 A 15:40",
        "SALA B-201 JU 14:00 A 15:40 PRESENCIAL",
        "  \nJU 14:00 A 15:40\n",
    ] {
        assert_eq!(parsear_sesiones(texto), vec![sesion(Dia::JU, &[4])], "texto: {:?}", texto);
    }
}

#[test]
fn test_mismo_dia_se_une() {
    let sesiones = parsear_sesiones("LU 08:30 A 10:10 LU 10:20 A 12:00");
    assert_eq!(sesiones, vec![sesion(Dia::LU, &[1, 2])]);
}

#[test]
fn test_mayusculas_y_saltos_de_linea() {
    let sesiones = parsear_sesiones("lu\n08:30 a 10:10\nMi 12:10 A 13:50");
    assert_eq!(sesiones, vec![sesion(Dia::LU, &[1]), sesion(Dia::MI, &[3])]);
}

#[test]
fn test_orden_por_dia_y_bloque() {
    let sesiones = parsear_sesiones("VI 15:50 A 17:30 LU 10:20 A 12:00 VI 08:30 A 10:10");
    assert_eq!(sesiones, vec![sesion(Dia::LU, &[2]), sesion(Dia::VI, &[1, 5])]);
}

#[test]
fn test_tramo_sin_bloque_se_descarta() {
    let sesiones = parsear_sesiones("LU 09:00 A 10:00 MA 10:20 A 12:00");
    assert_eq!(sesiones, vec![sesion(Dia::MA, &[2])]);
}

#[test]
fn test_texto_vacio_o_ilegible() {
    assert!(parsear_sesiones("").is_empty());
    assert!(parsear_sesiones("   ").is_empty());
    assert!(parsear_sesiones("Sin horario").is_empty());
    assert!(parsear_sesiones("DO 08:30 A 10:10").is_empty());
}

#[test]
fn test_sabado_y_fin_corrido() {
    let sesiones = parsear_sesiones("SA 08:30 A 10:00");
    assert_eq!(sesiones, vec![sesion(Dia::SA, &[1])]);
}
