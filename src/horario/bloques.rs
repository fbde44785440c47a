use std::collections::BTreeSet;
use std::sync::LazyLock;

use chrono::NaiveTime;

/// Bloque horario institucional (índice 1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bloque {
    pub index: u8,
    pub inicio: NaiveTime,
    pub fin: NaiveTime,
}

// Mapa de bloques UNAB (índice, inicio, fin)
const TABLA_UNAB: [(u8, &str, &str); 7] = [
    (1, "08:30", "10:10"),
    (2, "10:20", "12:00"),
    (3, "12:10", "13:50"),
    (4, "14:00", "15:40"),
    (5, "15:50", "17:30"),
    (6, "17:40", "19:20"),
    (7, "19:30", "21:10"),
];

/// Calendario de bloques UNAB, ordenado por índice.
pub static BLOQUES_UNAB: LazyLock<Vec<Bloque>> = LazyLock::new(|| {
    TABLA_UNAB
        .iter()
        .filter_map(|&(index, inicio, fin)| {
            Some(Bloque { index, inicio: parsear_hora(inicio)?, fin: parsear_hora(fin)? })
        })
        .collect()
});

/// "HH:MM" -> `NaiveTime`. `None` si la hora no es válida.
pub fn parsear_hora(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").ok()
}

/// Bloques del calendario UNAB que corresponden al rango `inicio`-`fin`.
pub fn bloques_para(inicio: &str, fin: &str) -> BTreeSet<u8> {
    bloques_en(&BLOQUES_UNAB, inicio, fin)
}

/// Busca primero coincidencia exacta (inicio y fin). Si no hay, se conforma
/// con los bloques cuyo inicio coincide: el PDF a veces trae el fin corrido.
pub fn bloques_en(calendario: &[Bloque], inicio: &str, fin: &str) -> BTreeSet<u8> {
    let Some(inicio) = parsear_hora(inicio) else {
        return BTreeSet::new();
    };
    let fin = parsear_hora(fin);

    let exactos: BTreeSet<u8> = calendario
        .iter()
        .filter(|b| b.inicio == inicio && Some(b.fin) == fin)
        .map(|b| b.index)
        .collect();
    if !exactos.is_empty() {
        return exactos;
    }

    calendario.iter().filter(|b| b.inicio == inicio).map(|b| b.index).collect()
}
