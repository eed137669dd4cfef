//! Configuración del harness.
//! Carga `.env` una sola vez y lee las variables `CLIMATE_REGRESS_*`. Los
//! flags de la línea de comandos tienen prioridad sobre estos valores.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use dotenvy::dotenv;
use once_cell::sync::Lazy;
use regress_core::Tolerance;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

pub const TEST_DATA_DIR_VAR: &str = "CLIMATE_REGRESS_TEST_DATA_DIR";
pub const UPDATE_EXPECTED_VAR: &str = "CLIMATE_REGRESS_UPDATE_EXPECTED";
pub const INFILLER_URL_VAR: &str = "CLIMATE_REGRESS_INFILLER_URL";
pub const HTTP_TIMEOUT_VAR: &str = "CLIMATE_REGRESS_HTTP_TIMEOUT_SECS";
pub const RTOL_VAR: &str = "CLIMATE_REGRESS_RTOL";
pub const ATOL_VAR: &str = "CLIMATE_REGRESS_ATOL";

const DEFAULT_TEST_DATA_DIR: &str = "tests/test-data";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone, PartialEq)]
pub struct RegressConfig {
    /// Directorio donde viven (o se descargan) los datasets de referencia.
    pub test_data_dir: PathBuf,
    /// Modo captura por defecto.
    pub update_expected: bool,
    pub infiller_url: Option<String>,
    pub http_timeout: Duration,
    pub tolerance: Tolerance,
}

impl Default for RegressConfig {
    fn default() -> Self {
        Self { test_data_dir: PathBuf::from(DEFAULT_TEST_DATA_DIR),
               update_expected: false,
               infiller_url: None,
               http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
               tolerance: Tolerance::DEFAULT }
    }
}

impl RegressConfig {
    pub fn from_env() -> Self {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construye la configuración a partir de una función de búsqueda
    /// (entorno real o un mapa en tests). Valores no parseables se ignoran.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let tolerance = Tolerance::new(get(RTOL_VAR).and_then(|v| v.parse().ok()).unwrap_or(defaults.tolerance.rtol),
                                       get(ATOL_VAR).and_then(|v| v.parse().ok()).unwrap_or(defaults.tolerance.atol));
        Self { test_data_dir: get(TEST_DATA_DIR_VAR).map(PathBuf::from).unwrap_or(defaults.test_data_dir),
               update_expected: get(UPDATE_EXPECTED_VAR).map(|v| parse_flag(&v)).unwrap_or(false),
               infiller_url: get(INFILLER_URL_VAR),
               http_timeout: get(HTTP_TIMEOUT_VAR).and_then(|v| v.parse().ok()).map(Duration::from_secs).unwrap_or(defaults.http_timeout),
               tolerance }
    }
}

fn parse_flag(v: &str) -> bool {
    matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
