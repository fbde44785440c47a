// Biblioteca raíz del crate `ofertashift`.
// Convierte la oferta académica UNAB (tablas extraídas del PDF/planilla, o un
// JSON ya parseado) en un snapshot normalizado de cursos y secciones.
pub mod config;
pub mod decodificar;
pub mod error;
pub mod horario;
pub mod models;
pub mod oferta;
pub mod tabla;

pub use config::{init_logging, Configuracion};
pub use error::{OfertaError, Result};
pub use oferta::{construir_snapshot, normalizar_archivo, parsear_fuente};
