//! Normalizador de snapshots: toma un documento ya parseado (salida de
//! `parsear-oferta` o un volcado externo equivalente, con tipos sueltos) y lo
//! lleva a la forma canónica de un semestre.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::config::Configuracion;
use crate::decodificar::cargar_json;
use crate::error::{OfertaError, Result};
use crate::models::{Curso, Dia, MetaOferta, Oferta, OfertaParseada, ResumenSemestre, Seccion, Sesion};
use crate::oferta::capitalizar_titulo;
use crate::oferta::constructor::primer_entero;
use crate::oferta::ligado::{embeber_secciones_ligadas, extraer_nrcs_ligados, ligar_teoria_con_actividades};

/// Documento de entrada. Todo es opcional y nada tiene tipo estricto: un
/// campo con forma inesperada toma su valor por defecto al proyectar, sin
/// invalidar el resto del documento.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentoEntrada {
    #[serde(deserialize_with = "lista_tolerante")]
    pub courses: Vec<CursoEntrada>,
    #[serde(deserialize_with = "lista_tolerante")]
    pub sections: Vec<SeccionEntrada>,
    pub rows_read: Value,
    pub raw_rows_total: Value,
    /// `{rowsRead, rawRowsTotal}` cuando los contadores no vienen arriba.
    pub meta: Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CursoEntrada {
    #[serde(deserialize_with = "texto_flexible")]
    pub id: Option<String>,
    #[serde(deserialize_with = "texto_flexible")]
    pub code: Option<String>,
    #[serde(deserialize_with = "texto_flexible")]
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeccionEntrada {
    #[serde(deserialize_with = "texto_flexible")]
    pub id: Option<String>,
    #[serde(deserialize_with = "texto_flexible")]
    pub nrc: Option<String>,
    #[serde(deserialize_with = "texto_flexible")]
    pub course_id: Option<String>,
    #[serde(deserialize_with = "texto_flexible")]
    pub section_label: Option<String>,
    #[serde(deserialize_with = "texto_flexible")]
    pub activity_type: Option<String>,
    #[serde(deserialize_with = "texto_flexible")]
    pub professor: Option<String>,
    #[serde(deserialize_with = "texto_flexible")]
    pub modality: Option<String>,
    pub vacancies: Value,
    pub meetings: Value,
    #[serde(deserialize_with = "texto_flexible")]
    pub schedule_raw: Option<String>,
    #[serde(deserialize_with = "texto_flexible")]
    pub linked_nrc_raw: Option<String>,
    pub linked_nrcs: Value,
}

/// Arreglo de elementos sueltos: lo que no sea arreglo vale `[]` y cada
/// elemento ilegible se descarta con un aviso.
fn lista_tolerante<'de, D, T>(d: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(d)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("elemento ilegible descartado: {}", e);
                None
            }
        })
        .collect())
}

/// Acepta texto, números o booleanos ("nrc": 1234 y "nrc": "1234" valen lo mismo).
fn texto_flexible<'de, D>(d: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(valor_a_texto(&Value::deserialize(d)?))
}

fn valor_a_texto(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        otro => Some(otro.to_string()),
    }
}

/// Entero no negativo desde un número o un texto ("15 cupos"). Negativos
/// quedan en 0 y los que no caben en `u64` se saturan.
fn valor_a_entero(v: &Value) -> Option<u64> {
    match v {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_i64().map(|i| i.max(0) as u64))
            // `as` satura (y NaN -> 0)
            .or_else(|| n.as_f64().map(|f| f as u64)),
        Value::String(s) => primer_entero(s),
        _ => None,
    }
}

fn nrcs_desde_valor(v: &Value, linked_nrc_raw: &str) -> Vec<String> {
    match v {
        Value::Array(lista) => lista.iter().filter_map(valor_a_texto).collect(),
        Value::String(s) => extraer_nrcs_ligados(s),
        Value::Number(n) => extraer_nrcs_ligados(&n.to_string()),
        _ => extraer_nrcs_ligados(linked_nrc_raw),
    }
}

#[derive(Deserialize)]
struct SesionEntrada {
    #[serde(default, deserialize_with = "texto_flexible")]
    day: Option<String>,
    #[serde(default)]
    blocks: Vec<Value>,
}

/// Reconstruye las sesiones; descarta días desconocidos o sin bloques y une
/// las que repiten día.
fn sesiones_desde_valores(valores: &[Value], nrc: &str) -> Vec<Sesion> {
    let mut por_dia: BTreeMap<Dia, BTreeSet<u8>> = BTreeMap::new();
    for v in valores {
        let Ok(entrada) = serde_json::from_value::<SesionEntrada>(v.clone()) else {
            tracing::warn!("NRC {}: sesión ilegible descartada: {}", nrc, v);
            continue;
        };
        let Some(dia) = entrada.day.as_deref().and_then(Dia::desde_codigo) else {
            tracing::warn!("NRC {}: día desconocido {:?}, sesión descartada", nrc, entrada.day);
            continue;
        };
        let bloques: BTreeSet<u8> = entrada
            .blocks
            .iter()
            .filter_map(|b| valor_a_entero(b).and_then(|n| u8::try_from(n).ok()))
            .filter(|&b| b > 0)
            .collect();
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

impl SeccionEntrada {
    pub fn en_seccion(self) -> Seccion {
        let nrc = self.nrc.unwrap_or_default().trim().to_string();
        let linked_nrc_raw = self.linked_nrc_raw.unwrap_or_default();
        let linked_nrcs = nrcs_desde_valor(&self.linked_nrcs, &linked_nrc_raw);
        // sin arreglo de sesiones no se reconstruye nada desde scheduleRaw
        let meetings = match &self.meetings {
            Value::Array(valores) => sesiones_desde_valores(valores, &nrc),
            _ => Vec::new(),
        };

        Seccion {
            id: self.id.unwrap_or_else(|| format!("NRC-{}", nrc)),
            course_id: self.course_id.unwrap_or_default(),
            section_label: self.section_label.unwrap_or_default(),
            activity_type: self.activity_type.unwrap_or_default(),
            professor: self.professor.unwrap_or_default(),
            modality: self.modality.unwrap_or_default(),
            vacancies: valor_a_entero(&self.vacancies).map(|n| u32::try_from(n).unwrap_or(u32::MAX)),
            linked_nrc_raw,
            linked_nrcs,
            schedule_raw: self.schedule_raw.unwrap_or_default(),
            meetings,
            // siempre se recalcula al proyectar
            linked_to_nrc: None,
            linked_sections: None,
            semester: None,
            nrc,
        }
    }
}

impl CursoEntrada {
    pub fn en_curso(self) -> Curso {
        let id = self.id.or_else(|| self.code.clone()).unwrap_or_default();
        let code = self.code.unwrap_or_else(|| id.clone());
        Curso { id, code, name: self.name.unwrap_or_default(), semester: None }
    }
}

/// Proyección canónica común a las dos entradas (documento suelto o salida
/// directa del constructor).
pub fn proyectar(
    cursos: Vec<Curso>,
    mut secciones: Vec<Seccion>,
    meta: MetaOferta,
    semestre: &str,
    cfg: &Configuracion,
) -> Oferta {
    for s in secciones.iter_mut() {
        s.semester = Some(semestre.to_string());
    }
    ligar_teoria_con_actividades(&mut secciones, cfg);
    embeber_secciones_ligadas(&mut secciones);

    let courses: Vec<Curso> = cursos
        .into_iter()
        .map(|c| {
            let name = if c.name.trim().is_empty() { capitalizar_titulo(&c.code) } else { capitalizar_titulo(&c.name) };
            Curso { name, semester: Some(semestre.to_string()), ..c }
        })
        .collect();

    let mut semesters = BTreeMap::new();
    semesters.insert(
        semestre.to_string(),
        ResumenSemestre { course_count: courses.len(), section_count: secciones.len() },
    );

    Oferta { semesters, courses, sections: secciones, meta }
}

pub fn normalizar_documento(doc: DocumentoEntrada, semestre: &str, cfg: &Configuracion) -> Oferta {
    let contador = |arriba: &Value, clave: &str| {
        valor_a_entero(arriba).or_else(|| doc.meta.get(clave).and_then(valor_a_entero))
    };
    let meta = MetaOferta {
        rows_read: contador(&doc.rows_read, "rowsRead"),
        raw_rows_total: contador(&doc.raw_rows_total, "rawRowsTotal"),
    };
    let cursos = doc.courses.into_iter().map(CursoEntrada::en_curso).collect();
    let secciones = doc.sections.into_iter().map(SeccionEntrada::en_seccion).collect();
    proyectar(cursos, secciones, meta, semestre, cfg)
}

/// Lleva directamente la salida del constructor a la forma canónica.
pub fn normalizar_oferta(parseada: OfertaParseada, semestre: &str, cfg: &Configuracion) -> Oferta {
    let meta = MetaOferta {
        rows_read: Some(parseada.rows_read as u64),
        raw_rows_total: Some(parseada.raw_rows_total as u64),
    };
    proyectar(parseada.courses, parseada.sections, meta, semestre, cfg)
}

fn ruta_temporal(salida: &Path) -> PathBuf {
    let mut nombre = salida.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    nombre.push(".tmp");
    salida.with_file_name(nombre)
}

/// Escribe el JSON con indentación de 2 espacios y sin escapar no-ASCII.
/// Se escribe primero a un temporal y luego se renombra: nunca queda un
/// archivo a medias en `salida`.
pub fn escribir_oferta(salida: &Path, oferta: &Oferta) -> Result<()> {
    let json = serde_json::to_string_pretty(oferta)?;
    if let Some(dir) = salida.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let tmp = ruta_temporal(salida);
    fs::write(&tmp, json)?;
    if let Err(e) = fs::rename(&tmp, salida) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

/// Lee `entrada`, normaliza y escribe `salida`. Si algo falla, `salida` no se toca.
pub fn normalizar_archivo(entrada: &Path, salida: &Path, semestre: &str, cfg: &Configuracion) -> Result<Oferta> {
    let entrada = cfg.resolver_entrada(entrada);
    if !entrada.exists() {
        return Err(OfertaError::EntradaNoExiste(entrada));
    }
    let doc: DocumentoEntrada = cargar_json(&entrada)?;
    let oferta = normalizar_documento(doc, semestre, cfg);
    escribir_oferta(salida, &oferta)?;
    tracing::info!(
        "snapshot {} escrito en {}: {} cursos, {} secciones",
        semestre,
        salida.display(),
        oferta.courses.len(),
        oferta.sections.len()
    );
    Ok(oferta)
}
