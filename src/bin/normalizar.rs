// --- Normalizador de oferta: JSON parseado -> snapshot canónico de un semestre ---

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use ofertashift::{init_logging, normalizar_archivo, Configuracion, OfertaError};

/// Normaliza un JSON de oferta ya parseado y lo escribe con formato canónico.
#[derive(Parser, Debug)]
#[command(name = "normalizar-oferta", version)]
struct Args {
    /// JSON de entrada (UTF-8, UTF-16 con BOM o Latin-1)
    entrada: PathBuf,
    /// Archivo de salida
    salida: PathBuf,
    /// Etiqueta del semestre, ej. "2025-1"
    semestre: String,
}

fn absoluta(p: &Path) -> PathBuf {
    std::path::absolute(p).unwrap_or_else(|_| p.to_path_buf())
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(a) => a,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(1);
        }
    };
    init_logging();
    let cfg = Configuracion::desde_entorno();

    match normalizar_archivo(&args.entrada, &args.salida, &args.semestre, &cfg) {
        Ok(oferta) => {
            println!("OK");
            println!("Entrada: {}", absoluta(&cfg.resolver_entrada(&args.entrada)).display());
            println!("Salida : {}", absoluta(&args.salida).display());
            println!(
                "Cursos: {} | Secciones: {} | Semestre: {}",
                oferta.courses.len(),
                oferta.sections.len(),
                args.semestre
            );
            ExitCode::SUCCESS
        }
        Err(e @ OfertaError::EntradaNoExiste(_)) => {
            eprintln!("ERROR: {}", e);
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("ERROR: {}", e);
            ExitCode::from(3)
        }
    }
}
