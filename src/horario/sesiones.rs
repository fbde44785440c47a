use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::horario::bloques::bloques_para;
use crate::models::{Dia, Sesion};

// Calza "JU 14:00 A 15:40" o "LU\n14:00 A 15:40"
static SLOT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(LU|MA|MI|JU|VI|SA)\b\s*(\d{2}:\d{2})\s*A\s*(\d{2}:\d{2})")
        .expect("regex de horario válida")
});

/// Convierte el texto libre de horario en una sesión por día.
///
/// Los tramos sin bloque reconocible se ignoran. Si un mismo día aparece
/// varias veces, sus bloques se unen. Las sesiones salen en orden LU..SA y los
/// bloques en orden ascendente. Texto vacío o ilegible -> vector vacío.
pub fn parsear_sesiones(horario: &str) -> Vec<Sesion> {
    if horario.trim().is_empty() {
        return Vec::new();
    }

    let mut por_dia: BTreeMap<Dia, BTreeSet<u8>> = BTreeMap::new();
    for cap in SLOT_RE.captures_iter(horario) {
        let Some(dia) = Dia::desde_codigo(&cap[1]) else {
            continue;
        };
        let bloques = bloques_para(&cap[2], &cap[3]);
        if bloques.is_empty() {
            continue;
        }
        por_dia.entry(dia).or_default().extend(bloques);
    }

    por_dia
        .into_iter()
        .map(|(day, blocks)| Sesion { day, blocks: blocks.into_iter().collect() })
        .collect()
}
