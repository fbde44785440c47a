//! Fuentes de tablas: cualquier cosa que entregue páginas con filas de celdas.
//!
//! Submódulos:
//! - `io`: conversión de celdas y lectura directa de xlsx vía zip
//! - `libro`: planillas (calamine, con fallback vía zip)
//! - `json`: páginas ya extraídas de un PDF, volcadas a JSON

pub mod io;
pub mod json;
pub mod libro;

use std::path::Path;

use crate::error::{OfertaError, Result};

pub use json::PaginasJson;
pub use libro::LibroCalculo;

/// Filas de celdas de una página (o una hoja).
pub type Pagina = Vec<Vec<String>>;

pub trait FuenteTabla {
    fn paginas(&mut self) -> Result<Vec<Pagina>>;
}

/// Filas ya en memoria.
#[derive(Debug, Clone, Default)]
pub struct TablaEnMemoria(pub Vec<Pagina>);

impl FuenteTabla for TablaEnMemoria {
    fn paginas(&mut self) -> Result<Vec<Pagina>> {
        Ok(self.0.clone())
    }
}

/// Elige la fuente según la extensión del archivo.
pub fn abrir_fuente(ruta: &Path) -> Result<Box<dyn FuenteTabla>> {
    let ext = ruta
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Box::new(LibroCalculo::new(ruta))),
        "json" => Ok(Box::new(PaginasJson::new(ruta))),
        _ => Err(OfertaError::FormatoNoSoportado(ruta.display().to_string())),
    }
}

/// Encabezado repetido en cada página: contiene NRC, CODIGO y HORARIO.
pub fn es_encabezado(fila: &[String]) -> bool {
    let unida = fila.join(" ").to_uppercase();
    unida.contains("NRC")
        && (unida.contains("CODIGO") || unida.contains("CÓDIGO"))
        && unida.contains("HORARIO")
}

/// Recorta cada celda, descarta encabezados y aplana todas las páginas.
pub fn filas_de_paginas(paginas: Vec<Pagina>) -> Vec<Vec<String>> {
    let mut filas = Vec::new();
    for (i, pagina) in paginas.into_iter().enumerate() {
        for fila in pagina {
            if fila.is_empty() {
                continue;
            }
            let limpia: Vec<String> = fila.iter().map(|c| c.trim().to_string()).collect();
            if es_encabezado(&limpia) {
                tracing::trace!("encabezado descartado en página {}", i + 1);
                continue;
            }
            filas.push(limpia);
        }
    }
    filas
}
