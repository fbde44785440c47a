use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::Configuracion;
use crate::horario::parsear_sesiones;
use crate::models::{Curso, OfertaParseada, Seccion};
use crate::oferta::capitalizar_titulo;
use crate::oferta::clasificador::{clasificar_fila, ColumnasFila};
use crate::oferta::ligado::{extraer_nrcs_ligados, ligar_teoria_con_actividades};

static ENTERO_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("regex de entero válida"));

/// Primer entero que aparezca en el texto, saturado en `u64::MAX`. Sin dígitos -> `None`.
pub fn primer_entero(s: &str) -> Option<u64> {
    // sólo dígitos: el parse falla únicamente por desborde
    ENTERO_RE.find(s).map(|m| m.as_str().parse().unwrap_or(u64::MAX))
}

/// Vacantes: primer entero del texto ("30 cupos" -> 30), saturado en `u32::MAX`.
pub fn parsear_entero(s: &str) -> Option<u32> {
    primer_entero(s).map(|n| u32::try_from(n).unwrap_or(u32::MAX))
}

/// Arma la sección a partir de las columnas crudas. `None` si falta el NRC o
/// el código de curso.
pub fn seccion_desde_columnas(cols: &ColumnasFila) -> Option<Seccion> {
    let nrc = cols.nrc.trim().to_string();
    let codigo = cols.codigo.trim().to_uppercase();
    if nrc.is_empty() || codigo.is_empty() {
        return None;
    }

    let schedule_raw = cols.horario.trim().to_string();
    let linked_nrc_raw = cols.nrc_ligados.trim().to_string();

    Some(Seccion {
        id: format!("NRC-{}", nrc),
        nrc,
        course_id: codigo,
        section_label: cols.seccion.trim().to_string(),
        activity_type: cols.actividad.trim().to_uppercase(),
        professor: cols.profesor.trim().to_string(),
        modality: cols.modalidad.trim().to_uppercase(),
        vacancies: parsear_entero(&cols.vacantes),
        linked_nrcs: extraer_nrcs_ligados(&linked_nrc_raw),
        linked_nrc_raw,
        meetings: parsear_sesiones(&schedule_raw),
        schedule_raw,
        linked_to_nrc: None,
        linked_sections: None,
        semester: None,
    })
}

/// Construye cursos y secciones a partir de las filas ya sin encabezados, y
/// resuelve el ligado TEO -> taller/laboratorio.
///
/// Los cursos se deduplican por código; el primer título visto se queda.
/// `raw_rows_total` cuenta todas las filas recibidas, `rows_read` sólo las que
/// terminaron en sección.
pub fn construir_oferta(filas: &[Vec<String>], cfg: &Configuracion) -> OfertaParseada {
    let mut cursos: Vec<Curso> = Vec::new();
    let mut idx_cursos: HashMap<String, usize> = HashMap::new();
    let mut secciones: Vec<Seccion> = Vec::new();

    for (i, fila) in filas.iter().enumerate() {
        let Some(cols) = clasificar_fila(fila) else {
            tracing::debug!("fila {} descartada: {} celdas sin columnas reconocibles", i + 1, fila.len());
            continue;
        };
        let Some(seccion) = seccion_desde_columnas(&cols) else {
            tracing::debug!("fila {} descartada: sin NRC o sin código de curso", i + 1);
            continue;
        };

        if !idx_cursos.contains_key(&seccion.course_id) {
            let titulo = cols.titulo.trim();
            let nombre = if titulo.is_empty() { capitalizar_titulo(&seccion.course_id) } else { titulo.to_string() };
            idx_cursos.insert(seccion.course_id.clone(), cursos.len());
            cursos.push(Curso {
                id: seccion.course_id.clone(),
                code: seccion.course_id.clone(),
                name: nombre,
                semester: None,
            });
        }

        if tracing::enabled!(tracing::Level::TRACE) {
            let slots: Vec<String> = seccion.slots().iter().map(|s| s.to_string()).collect();
            tracing::trace!("NRC {} ocupa [{}]", seccion.nrc, slots.join(", "));
        }
        secciones.push(seccion);
    }

    let vinculos = ligar_teoria_con_actividades(&mut secciones, cfg);
    tracing::info!(
        "✅ {} cursos, {} secciones ({} de {} filas), {} vínculos TEO",
        cursos.len(),
        secciones.len(),
        secciones.len(),
        filas.len(),
        vinculos
    );

    OfertaParseada {
        rows_read: secciones.len(),
        raw_rows_total: filas.len(),
        courses: cursos,
        sections: secciones,
    }
}
