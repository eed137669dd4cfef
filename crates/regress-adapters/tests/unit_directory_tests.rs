use regress_adapters::{CodecError, UnitDirectory};
use regress_core::capture::sorted_wide;
use regress_core::{ArtifactKind, Comparator, Normalizer};

const HARMONIZED: &str = "\
Model,Scenario,Region,Variable,Unit,2015,2020
IMAGE,SSP2,World,Emissions|CO2,Mt CO2/yr,40000.0,41000
IMAGE,SSP1,World,Emissions|CO2,Mt CO2/yr,39000,
";

#[test]
fn loads_and_normalizes_csv_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let unit = UnitDirectory::new(dir.path(), "ex2");
    std::fs::write(unit.path_for(ArtifactKind::HarmonizedInfilled), HARMONIZED).unwrap();

    let raw = unit.load(ArtifactKind::HarmonizedInfilled).unwrap();
    let table = Normalizer::for_family("MAGICC", "7.5.3").unwrap().normalize(ArtifactKind::HarmonizedInfilled, raw).unwrap();
    let ts = table.as_time_series().unwrap();
    assert_eq!(ts.len(), 3, "empty cell is not a point");
    assert_eq!(ts.series_keys()[0].scenario, "SSP1");
}

#[test]
fn captured_csv_reloads_equal() {
    let out = tempfile::tempdir().unwrap();
    let expected = tempfile::tempdir().unwrap();
    let actual_dir = UnitDirectory::new(out.path(), "ex2");
    let baseline_dir = UnitDirectory::new(expected.path().join("nested"), "ex2");
    std::fs::write(actual_dir.path_for(ArtifactKind::HarmonizedInfilled), HARMONIZED).unwrap();

    let normalizer = Normalizer::for_family("FAIR", "1.6.2").unwrap();
    let actual = normalizer.normalize(ArtifactKind::HarmonizedInfilled, actual_dir.load(ArtifactKind::HarmonizedInfilled).unwrap()).unwrap();
    baseline_dir.write_table(ArtifactKind::HarmonizedInfilled, &sorted_wide(actual.as_time_series().unwrap())).unwrap();

    let back = normalizer.normalize(ArtifactKind::HarmonizedInfilled, baseline_dir.load(ArtifactKind::HarmonizedInfilled).unwrap()).unwrap();
    assert!(Comparator::default().compare(&actual, &back).is_equal());
}

#[test]
fn copy_is_byte_identical() {
    let out = tempfile::tempdir().unwrap();
    let expected = tempfile::tempdir().unwrap();
    let src = UnitDirectory::new(out.path(), "ex3");
    let dst = UnitDirectory::new(expected.path(), "ex3");
    let bytes = b"PK\x03\x04 not really a workbook";
    std::fs::write(src.path_for(ArtifactKind::AllOutput), bytes).unwrap();
    let copied = dst.copy_from(&src, ArtifactKind::AllOutput).unwrap();
    assert_eq!(std::fs::read(copied).unwrap(), bytes);
}

#[test]
fn missing_artifact_is_codec_error() {
    let dir = tempfile::tempdir().unwrap();
    let unit = UnitDirectory::new(dir.path(), "ex4");
    let err = unit.load(ArtifactKind::IamcCsv).unwrap_err();
    assert!(matches!(err, CodecError::Csv { .. }));
    assert!(err.path().ends_with("ex4_IAMC_climateassessment0000.csv"));
}
