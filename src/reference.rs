//! Acceso a datasets de referencia con la configuración del harness.
use std::path::PathBuf;

use regress_cache::{require_dataset, ContentCache, HttpTransport, ReferenceDataset, SkipUnit, INFILLER_DATABASE};

use crate::config::RegressConfig;

/// URL de descarga: la explícita, y para el infiller la de `RegressConfig`.
pub fn reference_url<'a>(config: &'a RegressConfig, dataset: &ReferenceDataset, explicit: Option<&'a str>) -> Option<&'a str> {
    explicit.or_else(|| if *dataset == INFILLER_DATABASE { config.infiller_url.as_deref() } else { None })
}

/// Devuelve la ruta verificada del dataset (descargándolo si hace falta) o
/// el `SkipUnit` con instrucciones para el operador.
pub fn require_reference_data(config: &RegressConfig, dataset: &ReferenceDataset, url: Option<&str>) -> Result<PathBuf, SkipUnit> {
    let url = reference_url(config, dataset, url);
    let transport = match HttpTransport::new(config.http_timeout) {
        Ok(t) => t,
        Err(e) => return Err(SkipUnit::unavailable(dataset, &config.test_data_dir, format!("download failed: {e}"))),
    };
    require_dataset(dataset, &config.test_data_dir, url, &ContentCache::new(transport))
}

#[cfg(test)]
mod tests {
    use super::*;
    use regress_cache::FAIR_SLIM_CONFIG;

    #[test]
    fn infiller_url_comes_from_config() {
        let config = RegressConfig { infiller_url: Some("https://mirror/infiller.csv".into()), ..Default::default() };
        assert_eq!(reference_url(&config, &INFILLER_DATABASE, None), Some("https://mirror/infiller.csv"));
        assert_eq!(reference_url(&config, &INFILLER_DATABASE, Some("https://cli/x.csv")), Some("https://cli/x.csv"));
        assert_eq!(reference_url(&config, &FAIR_SLIM_CONFIG, None), None);
        assert_eq!(reference_url(&RegressConfig::default(), &INFILLER_DATABASE, None), None);
    }
}
