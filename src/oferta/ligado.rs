//! Ligado entre secciones teóricas (TEO) y sus talleres/laboratorios.
//!
//! El PDF sólo registra el vínculo en la sección teórica, como texto libre
//! ("NRC LIGADOS"). Aquí se resuelve ese texto contra el índice de NRC del
//! snapshot y se proyecta de dos formas:
//! - `ligar_teoria_con_actividades`: cada sección ligada apunta a su TEO
//!   (`linkedToNrc`).
//! - `embeber_secciones_ligadas`: cada sección con `linkedNrcRaw` recibe copias
//!   de las secciones que menciona (`linkedSections`).
//!
//! Los NRC que no están en el snapshot (otro semestre, datos viejos) se
//! descartan sin aviso.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::Configuracion;
use crate::models::Seccion;

// NRC suele venir con 4-6 dígitos
static NRC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(\d{4,6})\b").expect("regex de NRC válida"));

/// Todos los tokens de 4 a 6 dígitos del campo de NRC ligados, en orden.
pub fn extraer_nrcs_ligados(raw: &str) -> Vec<String> {
    NRC_RE.captures_iter(raw).map(|c| c[1].to_string()).collect()
}

/// Índice NRC -> posición en el slice de secciones.
///
/// Se asume que el NRC es único por snapshot. Si se repite, gana la última
/// sección con ese NRC y la repetición queda contada en `colisiones`.
#[derive(Debug, Default)]
pub struct IndiceNrc {
    por_nrc: HashMap<String, usize>,
    colisiones: usize,
}

impl IndiceNrc {
    pub fn construir(secciones: &[Seccion]) -> Self {
        let mut indice = IndiceNrc::default();
        for (i, s) in secciones.iter().enumerate() {
            if indice.por_nrc.insert(s.nrc.clone(), i).is_some() {
                indice.colisiones += 1;
            }
        }
        if indice.colisiones > 0 {
            tracing::warn!("{} NRC repetidos en el snapshot; se conserva la última sección de cada uno", indice.colisiones);
        }
        indice
    }

    pub fn buscar(&self, nrc: &str) -> Option<usize> {
        self.por_nrc.get(nrc.trim()).copied()
    }

    /// Posiciones de los NRC que existen, en el orden dado.
    pub fn resolver<'a, I>(&self, nrcs: I) -> Vec<usize>
    where
        I: IntoIterator<Item = &'a str>,
    {
        nrcs.into_iter().filter_map(|nrc| self.buscar(nrc)).collect()
    }

    pub fn colisiones(&self) -> usize {
        self.colisiones
    }

    pub fn len(&self) -> usize {
        self.por_nrc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.por_nrc.is_empty()
    }
}

/// Marca `linked_to_nrc` en cada sección mencionada en los `linked_nrcs` de una
/// sección teórica. Si dos TEO reclaman la misma sección, gana la última.
/// Devuelve cuántos vínculos se asignaron.
pub fn ligar_teoria_con_actividades(secciones: &mut [Seccion], cfg: &Configuracion) -> usize {
    let indice = IndiceNrc::construir(secciones);

    let mut vinculos: Vec<(usize, String)> = Vec::new();
    for teo in secciones.iter().filter(|s| cfg.es_teoria(&s.activity_type)) {
        for destino in indice.resolver(teo.linked_nrcs.iter().map(String::as_str)) {
            vinculos.push((destino, teo.nrc.clone()));
        }
    }

    let total = vinculos.len();
    for (destino, nrc_teo) in vinculos {
        secciones[destino].linked_to_nrc = Some(nrc_teo);
    }
    total
}

/// Llena `linked_sections` de todas las secciones a partir de `linked_nrc_raw`
/// separado por comas. Las copias embebidas no llevan su propio
/// `linked_sections`. Devuelve cuántas copias se embebieron.
pub fn embeber_secciones_ligadas(secciones: &mut [Seccion]) -> usize {
    let indice = IndiceNrc::construir(secciones);

    let ligadas: Vec<Vec<Seccion>> = secciones
        .iter()
        .map(|s| {
            indice
                .resolver(s.linked_nrc_raw.split(',').map(str::trim).filter(|t| !t.is_empty()))
                .into_iter()
                .map(|i| copia_plana(&secciones[i]))
                .collect()
        })
        .collect();

    let mut total = 0;
    for (s, copias) in secciones.iter_mut().zip(ligadas) {
        total += copias.len();
        s.linked_sections = Some(copias);
    }
    total
}

fn copia_plana(s: &Seccion) -> Seccion {
    Seccion { linked_sections: None, ..s.clone() }
}
