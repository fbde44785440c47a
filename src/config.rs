//! Configuración por entorno (`.env` incluido) e inicialización de logs.
//!
//! Variables reconocidas:
//! - `OFERTA_TAGS_TEORIA`: tipos de actividad que cuentan como sección teórica,
//!   separados por coma (por defecto `TEO,TEORIA,TEORÍA,THEORY`).
//! - `OFERTA_DATAFILES_DIR`: directorio donde buscar archivos de entrada con
//!   ruta relativa que no existan tal cual.
//! - `OFERTA_LOG`: filtro de `tracing` (por defecto `info`).

use std::env;
use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

pub const TAGS_TEORIA_POR_DEFECTO: [&str; 4] = ["TEO", "TEORIA", "TEORÍA", "THEORY"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuracion {
    /// Siempre en mayúsculas.
    pub tags_teoria: Vec<String>,
    pub datafiles_dir: Option<PathBuf>,
}

impl Default for Configuracion {
    fn default() -> Self {
        Configuracion {
            tags_teoria: TAGS_TEORIA_POR_DEFECTO.iter().map(|t| t.to_string()).collect(),
            datafiles_dir: None,
        }
    }
}

// load .env si existe
fn load_dotenv() {
    let _ = dotenv::dotenv();
}

impl Configuracion {
    pub fn desde_entorno() -> Self {
        load_dotenv();
        Self::desde_fuente(|k| env::var(k).ok())
    }

    /// Construye la configuración a partir de cualquier fuente clave -> valor.
    pub fn desde_fuente<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Configuracion::default();

        if let Some(raw) = lookup("OFERTA_TAGS_TEORIA") {
            let tags: Vec<String> = raw
                .split(',')
                .map(|t| t.trim().to_uppercase())
                .filter(|t| !t.is_empty())
                .collect();
            if !tags.is_empty() {
                cfg.tags_teoria = tags;
            }
        }

        if let Some(dir) = lookup("OFERTA_DATAFILES_DIR") {
            let dir = dir.trim();
            if !dir.is_empty() {
                cfg.datafiles_dir = Some(PathBuf::from(dir));
            }
        }

        cfg
    }

    pub fn es_teoria(&self, actividad: &str) -> bool {
        let actividad = actividad.trim().to_uppercase();
        self.tags_teoria.iter().any(|t| *t == actividad)
    }

    /// Devuelve la ruta tal cual si existe; si no, intenta bajo `datafiles_dir`.
    pub fn resolver_entrada(&self, ruta: &Path) -> PathBuf {
        if ruta.exists() || ruta.is_absolute() {
            return ruta.to_path_buf();
        }
        if let Some(dir) = &self.datafiles_dir {
            let candidato = dir.join(ruta);
            if candidato.exists() {
                tracing::debug!("entrada resuelta en datafiles: {}", candidato.display());
                return candidato;
            }
        }
        ruta.to_path_buf()
    }
}

/// Inicializa `tracing` hacia stderr. Stdout queda libre para el JSON.
pub fn init_logging() {
    load_dotenv();
    let filtro = EnvFilter::try_from_env("OFERTA_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filtro)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
