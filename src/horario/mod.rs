//! Horario institucional: calendario fijo de bloques y parser del texto de
//! horario ("LU 08:30 A 10:10 JU 14:00 A 15:40").

pub mod bloques;
pub mod sesiones;

pub use bloques::{Bloque, BLOQUES_UNAB, bloques_en, bloques_para, parsear_hora};
pub use sesiones::parsear_sesiones;
