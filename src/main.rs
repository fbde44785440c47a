// --- Parser de oferta académica: documento con tablas -> JSON por stdout ---

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use ofertashift::tabla::abrir_fuente;
use ofertashift::{construir_snapshot, init_logging, parsear_fuente, Configuracion};

/// Lee las tablas de la oferta (planilla o páginas JSON) y emite el documento
/// parseado en JSON compacto.
#[derive(Parser, Debug)]
#[command(name = "parsear-oferta", version)]
struct Args {
    /// Documento con las tablas (.xlsx, .xls, .ods o .json con páginas)
    documento: PathBuf,

    /// Emitir directamente el snapshot canónico de este semestre
    #[arg(long)]
    semestre: Option<String>,
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

    let ruta = cfg.resolver_entrada(&args.documento);
    let resultado = abrir_fuente(&ruta).and_then(|mut fuente| match &args.semestre {
        Some(semestre) => Ok(serde_json::to_string(&construir_snapshot(fuente.as_mut(), semestre, &cfg)?)?),
        None => Ok(serde_json::to_string(&parsear_fuente(fuente.as_mut(), &cfg)?)?),
    });

    match resultado {
        Ok(json) => {
            let mut stdout = std::io::stdout().lock();
            if writeln!(stdout, "{}", json).and_then(|_| stdout.flush()).is_err() {
                return ExitCode::from(3);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("ERROR: {}", e);
            ExitCode::from(3)
        }
    }
}
