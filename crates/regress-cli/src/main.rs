//! CLI `climate-regress`.
//!
//! Códigos de salida: 0 ok, 1 diferencias, 2 uso, 3 configuración,
//! 4 omitido (dataset de referencia no disponible), 5 IO / codec.
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use tracing_subscriber::EnvFilter;

use climate_regress::{check_consistency_with_database, require_reference_data, verify_unit, HarnessError, RegressConfig, RunMode,
                      UnitConfig};
use regress_cache::{ReferenceDataset, FAIR_COMMON_CONFIG, FAIR_SLIM_CONFIG, INFILLER_DATABASE};
use regress_core::Tolerance;

const EXIT_MISMATCH: u8 = 1;
const EXIT_CONFIGURATION: u8 = 3;
const EXIT_SKIPPED: u8 = 4;
const EXIT_IO: u8 = 5;

#[derive(Parser)]
#[command(name = "climate-regress")]
#[command(about = "Baseline regression checks for climate assessment workflow output")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compara (o captura) todos los artifacts de una unidad.
    Check {
        /// Identificador de la unidad (escenario de emisiones).
        #[arg(long)]
        id: String,
        #[arg(long)]
        outdir: PathBuf,
        #[arg(long)]
        expected_dir: PathBuf,
        /// Familia de modelo: MAGICC, FAIR o CICERO-SCM.
        #[arg(long)]
        model: String,
        #[arg(long)]
        model_version: String,
        /// Sobrescribe los baselines en lugar de comparar.
        #[arg(long, default_value_t = false)]
        update_expected_files: bool,
        #[arg(long)]
        rtol: Option<f64>,
        #[arg(long)]
        atol: Option<f64>,
        /// Escribe el reporte JSON de la corrida.
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Compara un workbook de salida con el export de la base de datos.
    Consistency {
        #[arg(long)]
        output: PathBuf,
        #[arg(long)]
        expected: PathBuf,
        #[arg(long)]
        rtol: Option<f64>,
        #[arg(long)]
        atol: Option<f64>,
    },
    /// Asegura que un dataset de referencia esté disponible localmente.
    Fetch {
        #[arg(long, value_enum)]
        dataset: DatasetArg,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(long)]
        url: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DatasetArg {
    Infiller,
    FairSlim,
    FairCommon,
}

impl DatasetArg {
    fn dataset(self) -> &'static ReferenceDataset {
        match self {
            DatasetArg::Infiller => &INFILLER_DATABASE,
            DatasetArg::FairSlim => &FAIR_SLIM_CONFIG,
            DatasetArg::FairCommon => &FAIR_COMMON_CONFIG,
        }
    }
}

fn exit_code(err: &HarnessError) -> u8 {
    match err {
        HarnessError::Mismatch { .. } => EXIT_MISMATCH,
        HarnessError::Configuration(_) => EXIT_CONFIGURATION,
        HarnessError::Codec(_) | HarnessError::Io(_) | HarnessError::Report(_) => EXIT_IO,
    }
}

fn tolerance(base: Tolerance, rtol: Option<f64>, atol: Option<f64>) -> Tolerance {
    Tolerance::new(rtol.unwrap_or(base.rtol), atol.unwrap_or(base.atol))
}

fn run_check(unit: UnitConfig, report_path: Option<PathBuf>) -> Result<(), HarnessError> {
    let report = verify_unit(&unit)?;
    if let Some(path) = report_path {
        report.write_json(&path)?;
        info!("report written to {}", path.display());
    }
    let report = report.into_result()?;
    match report.mode {
        RunMode::Compare => println!("{}: {} artifact(s) match the baseline", report.unit_id, report.artifacts.len()),
        RunMode::Capture => println!("{}: {} artifact(s) captured to {}", report.unit_id, report.artifacts.len(), unit.expected_dir.display()),
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), (u8, String)> {
    let config = RegressConfig::from_env();
    let harness_err = |e: HarnessError| (exit_code(&e), e.to_string());

    match cli.command {
        Command::Check { id, outdir, expected_dir, model, model_version, update_expected_files, rtol, atol, report } => {
            let mode = if update_expected_files || config.update_expected { RunMode::Capture } else { RunMode::Compare };
            let unit = UnitConfig::new(id, outdir, expected_dir, model, model_version).with_mode(mode)
                                                                                      .with_tolerance(tolerance(config.tolerance, rtol, atol));
            run_check(unit, report).map_err(harness_err)
        }
        Command::Consistency { output, expected, rtol, atol } => {
            let result = check_consistency_with_database(&output, &expected, tolerance(Tolerance::CONSISTENCY, rtol, atol)).map_err(harness_err)?;
            if result.is_equal() {
                println!("{} is consistent with {}", output.display(), expected.display());
                return Ok(());
            }
            let details: Vec<String> = result.entries().iter().map(ToString::to_string).collect();
            Err((EXIT_MISMATCH,
                 format!("{} difference(s), variables {:?}\n{}", result.entries().len(), result.affected_variables(), details.join("\n"))))
        }
        Command::Fetch { dataset, data_dir, url } => {
            let mut config = config;
            if let Some(dir) = data_dir {
                config.test_data_dir = dir;
            }
            match require_reference_data(&config, dataset.dataset(), url.as_deref()) {
                Ok(path) => {
                    println!("{}", path.display());
                    Ok(())
                }
                Err(skip) => Err((EXIT_SKIPPED, skip.to_string())),
            }
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
                             .with_target(false)
                             .with_writer(std::io::stderr)
                             .init();

    // clap sale con código 2 ante errores de uso
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err((code, message)) => {
            eprintln!("{message}");
            ExitCode::from(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use regress_core::ConfigurationError;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_check_flags() {
        let cli = Cli::try_parse_from(["climate-regress", "check", "--id", "ex1", "--outdir", "out", "--expected-dir", "exp", "--model", "fair",
                                       "--model-version", "1.6.2", "--update-expected-files", "--rtol", "1e-3"]).unwrap();
        let Command::Check { id, update_expected_files, rtol, atol, .. } = cli.command else { panic!("expected check") };
        assert_eq!(id, "ex1");
        assert!(update_expected_files);
        assert_eq!(rtol, Some(1e-3));
        assert_eq!(atol, None);
    }

    #[test]
    fn parses_dataset_names() {
        let cli = Cli::try_parse_from(["climate-regress", "fetch", "--dataset", "fair-slim"]).unwrap();
        let Command::Fetch { dataset, .. } = cli.command else { panic!("expected fetch") };
        assert_eq!(dataset.dataset().file_name, "fair-1.6.2-wg3-params-slim.json");
    }

    #[test]
    fn exit_codes_by_error_kind() {
        assert_eq!(exit_code(&HarnessError::Configuration(ConfigurationError::UnknownModelFamily("x".into()))), EXIT_CONFIGURATION);
        assert_eq!(exit_code(&HarnessError::Io(std::io::Error::other("x"))), EXIT_IO);
        assert_eq!(exit_code(&HarnessError::Mismatch { unit_id: "ex1".into(), mismatches: vec![] }), EXIT_MISMATCH);
    }

    #[test]
    fn flag_tolerance_overrides_base() {
        assert_eq!(tolerance(Tolerance::CONSISTENCY, None, Some(1e-3)), Tolerance::new(1e-5, 1e-3));
    }
}
