use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Reader};

use crate::error::{OfertaError, Result};
use crate::tabla::io::{cell_to_string, read_sheets_via_zip};
use crate::tabla::{FuenteTabla, Pagina};

/// Planilla de oferta académica (xlsx/xlsm/xls/ods): cada hoja es una página.
#[derive(Debug, Clone)]
pub struct LibroCalculo {
    ruta: PathBuf,
}

impl LibroCalculo {
    pub fn new<P: AsRef<Path>>(ruta: P) -> Self {
        LibroCalculo { ruta: ruta.as_ref().to_path_buf() }
    }

    fn leer_con_calamine(&self) -> Result<Vec<Pagina>> {
        let mut workbook = open_workbook_auto(&self.ruta)?;
        let sheet_names = workbook.sheet_names().to_owned();

        let mut paginas = Vec::with_capacity(sheet_names.len());
        for sheet in sheet_names.iter() {
            let range = workbook.worksheet_range(sheet)?;
            let filas: Pagina = range
                .rows()
                .map(|row| row.iter().map(cell_to_string).collect())
                .collect();
            paginas.push(filas);
        }
        Ok(paginas)
    }

    fn es_xlsx(&self) -> bool {
        self.ruta
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("xlsx") || e.eq_ignore_ascii_case("xlsm"))
    }
}

impl FuenteTabla for LibroCalculo {
    fn paginas(&mut self) -> Result<Vec<Pagina>> {
        if !self.ruta.exists() {
            return Err(OfertaError::EntradaNoExiste(self.ruta.clone()));
        }

        // Intentar primero con calamine
        let error_calamine = match self.leer_con_calamine() {
            Ok(paginas) if paginas.iter().any(|p| !p.is_empty()) => return Ok(paginas),
            Ok(_) => None,
            Err(e) => Some(e),
        };

        if !self.es_xlsx() {
            return Err(error_calamine
                .unwrap_or_else(|| OfertaError::LibroVacio(self.ruta.display().to_string())));
        }

        // Fallback: leer el xlsx vía zip si calamine falló o no devolvió datos
        tracing::warn!(
            "calamine falló o no devolvió datos ({}), intentando leer vía zip '{}'",
            error_calamine.map(|e| e.to_string()).unwrap_or_else(|| "sin filas".to_string()),
            self.ruta.display()
        );
        let paginas = read_sheets_via_zip(&self.ruta)?;
        if paginas.iter().all(|p| p.is_empty()) {
            return Err(OfertaError::LibroVacio(self.ruta.display().to_string()));
        }
        tracing::debug!("leídas {} hojas vía zip", paginas.len());
        Ok(paginas)
    }
}
