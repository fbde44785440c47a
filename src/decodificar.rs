//! Decodificación tolerante de documentos JSON exportados por herramientas
//! externas (PowerShell suele dejar UTF-16 con BOM, otras Latin-1).

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{OfertaError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codificacion {
    Utf16Le,
    Utf16Be,
    Utf8ConBom,
    Utf8,
    Latin1,
}

/// Detecta la codificación y devuelve el texto ya decodificado.
///
/// Orden: BOM UTF-16 LE/BE, UTF-8 (con o sin BOM), y por último Latin-1, que
/// nunca falla.
pub fn decodificar_bytes(raw: &[u8]) -> (String, Codificacion) {
    if let Some(resto) = raw.strip_prefix(&[0xFF, 0xFE]) {
        return (decodificar_utf16(resto, u16::from_le_bytes), Codificacion::Utf16Le);
    }
    if let Some(resto) = raw.strip_prefix(&[0xFE, 0xFF]) {
        return (decodificar_utf16(resto, u16::from_be_bytes), Codificacion::Utf16Be);
    }
    if let Some(resto) = raw.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        if let Ok(texto) = std::str::from_utf8(resto) {
            return (texto.to_string(), Codificacion::Utf8ConBom);
        }
    }
    if let Ok(texto) = std::str::from_utf8(raw) {
        return (texto.to_string(), Codificacion::Utf8);
    }
    (raw.iter().map(|&b| char::from(b)).collect(), Codificacion::Latin1)
}

fn decodificar_utf16(bytes: &[u8], unidad: fn([u8; 2]) -> u16) -> String {
    let unidades = bytes.chunks(2).map(|par| match par {
        [a, b] => unidad([*a, *b]),
        // byte suelto al final
        _ => 0xFFFD,
    });
    char::decode_utf16(unidades)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Descarta lo que venga antes del primer carácter de apertura (`{`, `[`, ...).
/// Si no aparece ninguno, devuelve el texto recortado tal cual.
pub fn recortar_basura_inicial<'a>(texto: &'a str, aperturas: &[char]) -> &'a str {
    let texto = texto.trim().trim_start_matches('\u{FEFF}');
    match texto.find(aperturas) {
        Some(pos) => &texto[pos..],
        None => texto,
    }
}

/// Lee un archivo, lo decodifica y deserializa el JSON que empieza en el
/// primer `{`.
pub fn cargar_json<T: DeserializeOwned>(ruta: &Path) -> Result<T> {
    cargar_json_desde(ruta, &['{'])
}

pub(crate) fn cargar_json_desde<T: DeserializeOwned>(ruta: &Path, aperturas: &[char]) -> Result<T> {
    if !ruta.exists() {
        return Err(OfertaError::EntradaNoExiste(ruta.to_path_buf()));
    }
    let raw = fs::read(ruta)?;
    let (texto, codificacion) = decodificar_bytes(&raw);
    tracing::debug!("{} decodificado como {:?}", ruta.display(), codificacion);
    let limpio = recortar_basura_inicial(&texto, aperturas);
    Ok(serde_json::from_str(limpio)?)
}
