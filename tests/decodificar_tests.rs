use std::fs;

use ofertashift::decodificar::{cargar_json, decodificar_bytes, recortar_basura_inicial, Codificacion};
use ofertashift::OfertaError;
use serde_json::Value;

fn utf16(texto: &str, le: bool) -> Vec<u8> {
    let mut bytes = if le { vec![0xFF, 0xFE] } else { vec![0xFE, 0xFF] };
    for u in texto.encode_utf16() {
        bytes.extend_from_slice(&if le { u.to_le_bytes() } else { u.to_be_bytes() });
    }
    bytes
}

#[test]
fn test_bom_utf16_le() {
    let (texto, cod) = decodificar_bytes(&utf16("{\"name\": \"Álgebra\"}", true));
    assert_eq!(cod, Codificacion::Utf16Le);
    assert_eq!(texto, "{\"name\": \"Álgebra\"}");
}

#[test]
fn test_bom_utf16_be() {
    let (texto, cod) = decodificar_bytes(&utf16("{\"a\": 1}", false));
    assert_eq!(cod, Codificacion::Utf16Be);
    assert_eq!(texto, "{\"a\": 1}");
}

#[test]
fn test_bom_utf16_antes_que_utf8() {
    // FF FE seguido de ASCII: igual se decide UTF-16LE
    let (_, cod) = decodificar_bytes(&[0xFF, 0xFE, b'a', b'b']);
    assert_eq!(cod, Codificacion::Utf16Le);
    let (_, cod) = decodificar_bytes(&[0xFE, 0xFF, 0x00, b'a']);
    assert_eq!(cod, Codificacion::Utf16Be);
}

#[test]
fn test_utf8_con_y_sin_bom() {
    let (texto, cod) = decodificar_bytes("\u{FEFF}{\"x\": \"ñ\"}".as_bytes());
    assert_eq!(cod, Codificacion::Utf8ConBom);
    assert_eq!(texto, "{\"x\": \"ñ\"}");

    let (texto, cod) = decodificar_bytes("{\"x\": \"ñ\"}".as_bytes());
    assert_eq!(cod, Codificacion::Utf8);
    assert_eq!(texto, "{\"x\": \"ñ\"}");
}

#[test]
fn test_latin1_como_ultimo_recurso() {
    // "Cálculo" en Latin-1: 0xE1 no es UTF-8 válido por sí solo
    let bytes = [b'C', 0xE1, b'l', b'c', b'u', b'l', b'o'];
    let (texto, cod) = decodificar_bytes(&bytes);
    assert_eq!(cod, Codificacion::Latin1);
    assert_eq!(texto, "Cálculo");
}

#[test]
fn test_recortar_basura_inicial() {
    assert_eq!(recortar_basura_inicial("PS> salida\n{\"a\":1}\n", &['{']), "{\"a\":1}");
    assert_eq!(recortar_basura_inicial("{\"a\":1}", &['{']), "{\"a\":1}");
}

#[test]
fn test_cargar_json_con_basura() {
    let dir = tempfile::tempdir().unwrap();
    let ruta = dir.path().join("dump.json");
    fs::write(&ruta, utf16("Windows PowerShell\r\n{\"courses\": []}\r\n", true)).unwrap();
    let v: Value = cargar_json(&ruta).unwrap();
    assert_eq!(v["courses"], serde_json::json!([]));
}

#[test]
fn test_cargar_json_inexistente() {
    let dir = tempfile::tempdir().unwrap();
    let r: Result<Value, _> = cargar_json(&dir.path().join("nada.json"));
    assert!(matches!(r, Err(OfertaError::EntradaNoExiste(_))));
}
