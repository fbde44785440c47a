//! Pipeline de la oferta académica:
//! filas crudas -> `clasificador` -> `constructor` (+ sesiones) -> `ligado` ->
//! `normalizador` (snapshot canónico).

pub mod clasificador;
pub mod constructor;
pub mod ligado;
pub mod normalizador;

use crate::config::Configuracion;
use crate::error::Result;
use crate::models::{Oferta, OfertaParseada};
use crate::tabla::{filas_de_paginas, FuenteTabla};

pub use clasificador::{clasificar_fila, ColumnasFila};
pub use constructor::construir_oferta;
pub use ligado::{embeber_secciones_ligadas, extraer_nrcs_ligados, ligar_teoria_con_actividades, IndiceNrc};
pub use normalizador::{normalizar_archivo, normalizar_documento, normalizar_oferta, DocumentoEntrada};

/// Mayúscula al inicio de cada palabra y minúsculas en el resto; una palabra
/// empieza después de cualquier carácter que no sea letra ("MAT101" -> "Mat101").
pub fn capitalizar_titulo(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut previa_letra = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if previa_letra {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previa_letra = true;
        } else {
            out.push(c);
            previa_letra = false;
        }
    }
    out
}

/// Lee todas las páginas de la fuente, descarta encabezados y construye la
/// oferta parseada.
pub fn parsear_fuente(fuente: &mut dyn FuenteTabla, cfg: &Configuracion) -> Result<OfertaParseada> {
    let paginas = fuente.paginas()?;
    tracing::debug!("{} páginas leídas", paginas.len());
    let filas = filas_de_paginas(paginas);
    Ok(construir_oferta(&filas, cfg))
}

/// Atajo filas -> snapshot canónico de `semestre`.
pub fn construir_snapshot(fuente: &mut dyn FuenteTabla, semestre: &str, cfg: &Configuracion) -> Result<Oferta> {
    let parseada = parsear_fuente(fuente, cfg)?;
    Ok(normalizar_oferta(parseada, semestre, cfg))
}
