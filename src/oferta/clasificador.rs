use std::sync::LazyLock;

use regex::Regex;

/// Columnas típicas del PDF de oferta UNAB:
/// NRC | NRC LIGADOS | TIPO ACTIVIDAD | CODIGO | SECCION | TITULO | VACANTES | PROFESOR | HORARIO | MODALIDAD
///
/// Los valores son el texto crudo de cada celda; se validan en el constructor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnasFila {
    pub nrc: String,
    pub nrc_ligados: String,
    pub actividad: String,
    pub codigo: String,
    pub seccion: String,
    pub titulo: String,
    pub vacantes: String,
    pub profesor: String,
    pub horario: String,
    pub modalidad: String,
}

pub const MIN_CELDAS: usize = 6;
pub const CELDAS_LAYOUT_FIJO: usize = 10;

static CODIGO_CURSO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3,5}\d{3,4}$").expect("regex de código válida"));

/// ¿La celda parece un código de curso ("MAT101", "CBM1000")?
pub fn es_codigo_curso(celda: &str) -> bool {
    CODIGO_CURSO_RE.is_match(&celda.trim().to_uppercase())
}

/// Mapea una fila cruda a sus columnas, o `None` si no parece una fila de
/// sección.
///
/// Con 10 o más celdas se asume el orden canónico sin más validación. Con
/// 6 a 9 celdas (el PDF se "corrió" por celdas fusionadas o vacías) se ubica
/// el código de curso y se deduce el resto por posición: NRC al inicio,
/// horario y modalidad al final, vacantes y profesor desde el final si hay
/// espacio.
pub fn clasificar_fila(fila: &[String]) -> Option<ColumnasFila> {
    if fila.len() < MIN_CELDAS {
        return None;
    }

    if fila.len() >= CELDAS_LAYOUT_FIJO {
        return Some(ColumnasFila {
            nrc: fila[0].clone(),
            nrc_ligados: fila[1].clone(),
            actividad: fila[2].clone(),
            codigo: fila[3].clone(),
            seccion: fila[4].clone(),
            titulo: fila[5].clone(),
            vacantes: fila[6].clone(),
            profesor: fila[7].clone(),
            horario: fila[8].clone(),
            modalidad: fila[9].clone(),
        });
    }

    // el NRC tiene que ir antes del código
    let idx_codigo = fila.iter().position(|c| es_codigo_curso(c))?;
    if idx_codigo < 1 {
        return None;
    }

    let celda = |i: usize| fila.get(i).cloned().unwrap_or_default();
    let n = fila.len();
    let (vacantes, profesor) = if n >= 8 { (celda(n - 4), celda(n - 3)) } else { (String::new(), String::new()) };

    Some(ColumnasFila {
        nrc: celda(0),
        nrc_ligados: celda(1),
        actividad: celda(2),
        codigo: celda(idx_codigo),
        seccion: celda(idx_codigo + 1),
        titulo: celda(idx_codigo + 2),
        vacantes,
        profesor,
        horario: celda(n - 2),
        modalidad: celda(n - 1),
    })
}
