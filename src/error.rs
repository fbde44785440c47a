//! Errores fatales del pipeline de oferta.
//!
//! Los problemas por fila (fila corta, sin código de curso, horario ilegible,
//! NRC ligado inexistente) no son errores: se descartan en silencio.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, OfertaError>;

#[derive(Error, Debug)]
pub enum OfertaError {
    #[error("el archivo de entrada no existe: {}", .0.display())]
    EntradaNoExiste(PathBuf),

    #[error("error de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON inválido: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no se pudo leer el libro: {0}")]
    Libro(#[from] calamine::Error),

    #[error("no se pudo abrir el xlsx como zip: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML inválido en '{parte}': {detalle}")]
    Xml { parte: String, detalle: String },

    #[error("no se pudo leer ninguna hoja del archivo '{0}'")]
    LibroVacio(String),

    #[error("formato de documento no soportado: '{0}'")]
    FormatoNoSoportado(String),
}
