// Estructuras de datos principales de la oferta normalizada.
//
// Los nombres de campo en JSON siguen el formato camelCase que consume el
// frontend (`courseId`, `linkedNrcRaw`, ...).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Día de la semana según los códigos de la oferta UNAB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Dia {
    LU,
    MA,
    MI,
    JU,
    VI,
    SA,
}

impl Dia {
    pub const TODOS: [Dia; 6] = [Dia::LU, Dia::MA, Dia::MI, Dia::JU, Dia::VI, Dia::SA];

    /// Interpreta un código de día sin distinguir mayúsculas ("lu", "Ju", ...).
    pub fn desde_codigo(codigo: &str) -> Option<Dia> {
        let codigo = codigo.trim().to_uppercase();
        Dia::TODOS.into_iter().find(|d| d.codigo() == codigo)
    }

    pub fn codigo(&self) -> &'static str {
        match self {
            Dia::LU => "LU",
            Dia::MA => "MA",
            Dia::MI => "MI",
            Dia::JU => "JU",
            Dia::VI => "VI",
            Dia::SA => "SA",
        }
    }
}

impl fmt::Display for Dia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.codigo())
    }
}

/// Una sesión semanal: un día y los bloques que ocupa (ordenados, sin repetir).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sesion {
    pub day: Dia,
    pub blocks: Vec<u8>,
}

/// Par (día, bloque) ocupado por una sección.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot {
    pub dia: Dia,
    pub bloque: u8,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} · B{}", self.dia, self.bloque)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Curso {
    pub id: String,
    pub code: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
}

/// Una sección (NRC) de la oferta académica.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Seccion {
    pub id: String,
    pub nrc: String,
    pub course_id: String,
    pub section_label: String,
    pub activity_type: String,
    pub professor: String,
    pub modality: String,
    /// `None` cuando la celda de vacantes no trae ningún número.
    pub vacancies: Option<u32>,
    pub linked_nrc_raw: String,
    pub linked_nrcs: Vec<String>,
    pub schedule_raw: String,
    pub meetings: Vec<Sesion>,
    /// NRC de la sección teórica que declara a esta sección como ligada.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_to_nrc: Option<String>,
    /// Copias de las secciones referidas en `linked_nrc_raw` (sin su propio
    /// `linked_sections`, para no anidar).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_sections: Option<Vec<Seccion>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
}

impl Seccion {
    /// Todos los slots (día, bloque) que ocupa la sección.
    pub fn slots(&self) -> Vec<Slot> {
        self.meetings
            .iter()
            .flat_map(|m| m.blocks.iter().map(move |&b| Slot { dia: m.day, bloque: b }))
            .collect()
    }
}

/// Documento intermedio que produce el parser de filas.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfertaParseada {
    pub courses: Vec<Curso>,
    pub sections: Vec<Seccion>,
    pub rows_read: usize,
    pub raw_rows_total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumenSemestre {
    pub course_count: usize,
    pub section_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaOferta {
    pub rows_read: Option<u64>,
    pub raw_rows_total: Option<u64>,
}

/// Snapshot canónico de un semestre.
#[derive(Debug, Clone, Serialize)]
pub struct Oferta {
    pub semesters: BTreeMap<String, ResumenSemestre>,
    pub courses: Vec<Curso>,
    pub sections: Vec<Seccion>,
    pub meta: MetaOferta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dia_desde_codigo() {
        assert_eq!(Dia::desde_codigo(" ju "), Some(Dia::JU));
        assert_eq!(Dia::desde_codigo("DO"), None);
        assert!(Dia::LU < Dia::SA);
    }

    #[test]
    fn test_slots_de_seccion() {
        let s = Seccion {
            id: "NRC-1111".into(),
            nrc: "1111".into(),
            course_id: "MAT101".into(),
            section_label: "1".into(),
            activity_type: "TEO".into(),
            professor: String::new(),
            modality: String::new(),
            vacancies: None,
            linked_nrc_raw: String::new(),
            linked_nrcs: Vec::new(),
            schedule_raw: String::new(),
            meetings: vec![
                Sesion { day: Dia::LU, blocks: vec![1, 2] },
                Sesion { day: Dia::JU, blocks: vec![4] },
            ],
            linked_to_nrc: None,
            linked_sections: None,
            semester: None,
        };
        let slots: Vec<String> = s.slots().iter().map(|x| x.to_string()).collect();
        assert_eq!(slots, vec!["LU · B1", "LU · B2", "JU · B4"]);
    }
}
