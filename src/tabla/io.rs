use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use calamine::Data;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{OfertaError, Result};
use crate::tabla::Pagina;

/// Convierte un `Data` de calamine a String (NRC numéricos sin ".0").
pub fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if (f.floor() - f).abs() < f64::EPSILON {
                format!("{}", *f as i64)
            } else {
                format!("{}", f)
            }
        }
        Data::Int(i) => format!("{}", i),
        Data::Bool(b) => format!("{}", b),
        Data::Empty => String::new(),
        Data::Error(_) => String::new(),
        Data::DateTime(s) => s.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Última columna que admite una hoja xlsx (XFD).
pub const MAX_COLUMNAS: usize = 16_384;

/// Convierte letras de columna (ej: "AB" o "AB12") a índice 1-based (A=1).
/// `None` si no hay letras o la columna pasa de XFD.
pub fn column_letters_to_index(s: &str) -> Option<usize> {
    let mut acc = 0usize;
    for ch in s.chars().take_while(|c| c.is_ascii_alphabetic()) {
        let digito = (ch.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        acc = acc.checked_mul(26)?.checked_add(digito)?;
        if acc > MAX_COLUMNAS {
            return None;
        }
    }
    (acc > 0).then_some(acc)
}

fn error_xml(parte: &str, e: impl std::fmt::Display) -> OfertaError {
    OfertaError::Xml { parte: parte.to_string(), detalle: e.to_string() }
}

fn atributo(e: &BytesStart<'_>, nombre: &[u8], parte: &str) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| error_xml(parte, err))?;
        if attr.key.as_ref() == nombre {
            let valor = attr.unescape_value().map_err(|err| error_xml(parte, err))?;
            return Ok(Some(valor.into_owned()));
        }
    }
    Ok(None)
}

/// Lee `xl/sharedStrings.xml`: cada `<si>` es un string (concatenando sus `<t>`).
pub fn parse_shared_strings(xml: &str) -> Result<Vec<String>> {
    const PARTE: &str = "xl/sharedStrings.xml";
    let mut reader = Reader::from_str(xml);
    let mut strings = Vec::new();
    let mut actual: Option<String> = None;
    let mut en_t = false;

    loop {
        match reader.read_event().map_err(|e| error_xml(PARTE, e))? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"si" => actual = Some(String::new()),
                b"t" => en_t = true,
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"si" => strings.push(String::new()),
            Event::Text(t) if en_t => {
                if let Some(s) = actual.as_mut() {
                    s.push_str(&t.unescape().map_err(|e| error_xml(PARTE, e))?);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => en_t = false,
                b"si" => strings.push(actual.take().unwrap_or_default()),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(strings)
}

/// Lee una hoja (`xl/worksheets/sheetN.xml`) respetando la columna de cada
/// celda según su referencia (`r="C4"`); los huecos quedan como "".
pub fn parse_sheet_xml(xml: &str, shared: &[String], parte: &str) -> Result<Pagina> {
    let mut reader = Reader::from_str(xml);
    let mut filas: Pagina = Vec::new();
    let mut fila: Option<BTreeMap<usize, String>> = None;
    // (columna 1-based, tipo) de la celda abierta
    let mut celda: Option<(usize, Option<String>)> = None;
    let mut valor = String::new();
    let mut en_valor = false;

    loop {
        match reader.read_event().map_err(|e| error_xml(parte, e))? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"row" => fila = Some(BTreeMap::new()),
                b"c" => {
                    let col = match atributo(&e, b"r", parte)? {
                        Some(r) => column_letters_to_index(&r),
                        None => Some(fila.as_ref().and_then(|f| f.keys().last()).map_or(1, |c| c + 1))
                            .filter(|c| *c <= MAX_COLUMNAS),
                    };
                    celda = match col {
                        Some(col) => Some((col, atributo(&e, b"t", parte)?)),
                        None => {
                            tracing::warn!("{}: celda con columna inválida descartada", parte);
                            None
                        }
                    };
                    valor.clear();
                }
                b"v" | b"t" => en_valor = celda.is_some(),
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"row" => filas.push(Vec::new()),
            Event::Text(t) if en_valor => valor.push_str(&t.unescape().map_err(|e| error_xml(parte, e))?),
            Event::End(e) => match e.local_name().as_ref() {
                b"v" | b"t" => en_valor = false,
                b"c" => {
                    if let (Some((col, tipo)), Some(f)) = (celda.take(), fila.as_mut()) {
                        let texto = match tipo.as_deref() {
                            Some("s") => valor
                                .trim()
                                .parse::<usize>()
                                .ok()
                                .and_then(|i| shared.get(i).cloned())
                                .unwrap_or_default(),
                            _ => valor.clone(),
                        };
                        f.insert(col, texto.trim().to_string());
                    }
                }
                b"row" => {
                    if let Some(f) = fila.take() {
                        let ancho = f.keys().last().copied().unwrap_or(0);
                        let mut celdas = vec![String::new(); ancho];
                        for (col, texto) in f {
                            celdas[col - 1] = texto;
                        }
                        filas.push(celdas);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(filas)
}

fn leer_parte<R: Read + std::io::Seek>(archive: &mut zip::ZipArchive<R>, nombre: &str) -> Result<String> {
    let mut contenido = String::new();
    archive.by_name(nombre)?.read_to_string(&mut contenido)?;
    Ok(contenido)
}

fn numero_de_hoja(nombre: &str) -> usize {
    nombre
        .trim_start_matches("xl/worksheets/sheet")
        .trim_end_matches(".xml")
        .parse()
        .unwrap_or(usize::MAX)
}

/// Lee todas las hojas de un `.xlsx` directamente desde el zip, sin calamine.
/// Se usa como alternativa cuando calamine no logra abrir el archivo.
pub fn read_sheets_via_zip<P: AsRef<Path>>(path: P) -> Result<Vec<Pagina>> {
    let mut archive = zip::ZipArchive::new(File::open(path)?)?;

    let shared = if archive.file_names().any(|n| n == "xl/sharedStrings.xml") {
        parse_shared_strings(&leer_parte(&mut archive, "xl/sharedStrings.xml")?)?
    } else {
        Vec::new()
    };

    let mut hojas: Vec<String> = archive
        .file_names()
        .filter(|n| n.starts_with("xl/worksheets/sheet") && n.ends_with(".xml"))
        .map(|n| n.to_string())
        .collect();
    hojas.sort_by_key(|n| numero_de_hoja(n));

    let mut paginas = Vec::with_capacity(hojas.len());
    for hoja in hojas {
        let xml = leer_parte(&mut archive, &hoja)?;
        paginas.push(parse_sheet_xml(&xml, &shared, &hoja)?);
    }
    Ok(paginas)
}
