use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::decodificar::cargar_json_desde;
use crate::error::Result;
use crate::tabla::{FuenteTabla, Pagina};

/// Páginas ya extraídas de un PDF por una herramienta externa, volcadas a JSON:
/// `{"pages": [[["celda", null, ...], ...], ...]}` o directamente `[[[...]]]`.
#[derive(Debug, Clone)]
pub struct PaginasJson {
    ruta: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentoPaginas {
    Envuelto { pages: Vec<Vec<Vec<Option<String>>>> },
    Directo(Vec<Vec<Vec<Option<String>>>>),
}

impl PaginasJson {
    pub fn new<P: AsRef<Path>>(ruta: P) -> Self {
        PaginasJson { ruta: ruta.as_ref().to_path_buf() }
    }
}

impl FuenteTabla for PaginasJson {
    fn paginas(&mut self) -> Result<Vec<Pagina>> {
        let doc: DocumentoPaginas = cargar_json_desde(&self.ruta, &['{', '['])?;
        let crudas = match doc {
            DocumentoPaginas::Envuelto { pages } => pages,
            DocumentoPaginas::Directo(pages) => pages,
        };
        Ok(crudas
            .into_iter()
            .map(|pagina| {
                pagina
                    .into_iter()
                    .map(|fila| fila.into_iter().map(Option::unwrap_or_default).collect())
                    .collect()
            })
            .collect())
    }
}
