use regress_core::capture::{keyed_to_raw, sorted_wide};
use regress_core::constants::PROVENANCE_COLUMNS;
use regress_core::{ArtifactKind, CanonicalTable, Comparator, ConfigurationError, DiffKind, FamilyColumns, ModelFamily, Normalizer, RawArtifact, RawTable,
                   Tolerance, Value};

fn iamc(rows: &[(&str, &str, [f64; 2])]) -> RawTable {
    let mut t = RawTable::new(["Model", "Scenario", "Region", "Variable", "Unit", "2010", "2020"].iter().map(|c| c.to_string()).collect());
    for (scenario, variable, values) in rows {
        t.push_row(vec!["IMAGE".into(),
                        (*scenario).into(),
                        "World".into(),
                        (*variable).into(),
                        "K".into(),
                        Value::Number(values[0]),
                        Value::Number(values[1])]);
    }
    t
}

fn full_meta(version: &str) -> RawTable {
    let cols = FamilyColumns::new(ModelFamily::Magicc, version);
    let mut columns = vec!["model".to_string(), "scenario".to_string()];
    columns.extend(cols.keep_columns().iter().cloned());
    columns.extend(PROVENANCE_COLUMNS.iter().map(|c| c.to_string()));
    let width = columns.len();
    let mut t = RawTable::new(columns);
    let mut row: Vec<Value> = vec!["IMAGE".into(), "SSP2".into()];
    row.extend((2..width).map(|i| Value::Number(i as f64 * 0.1)));
    t.push_row(row);
    t
}

#[test]
fn single_perturbed_point_yields_single_numeric_diff() {
    let normalizer = Normalizer::for_family("MAGICC", "7.5.3").unwrap();
    let tol = Tolerance::DEFAULT;
    let e = 10.0;
    let expected = iamc(&[("SSP2", "Surface Temperature", [e, 1.0]), ("SSP2", "Forcing", [2.0, 3.0])]);
    let actual = iamc(&[("SSP2", "Surface Temperature", [e + tol.atol + tol.rtol * e + 1e-6, 1.0]), ("SSP2", "Forcing", [2.0, 3.0])]);

    let kind = ArtifactKind::IamcCsv;
    let a = normalizer.normalize(kind, RawArtifact::new(actual)).unwrap();
    let x = normalizer.normalize(kind, RawArtifact::new(expected)).unwrap();
    let res = Comparator::new(tol).compare(&a, &x);

    assert_eq!(res.entries().len(), 1, "exactly one point out of tolerance");
    assert_eq!(res.entries()[0].kind, DiffKind::Numeric);
    assert_eq!(res.entries()[0].column, "2010");
    assert_eq!(res.affected_variables(), vec!["Surface Temperature".to_string()]);
}

#[test]
fn perturbation_inside_tolerance_is_equal() {
    let normalizer = Normalizer::for_family("fair", "1.6.2").unwrap();
    let tol = Tolerance::DEFAULT;
    let e = 10.0;
    let expected = iamc(&[("SSP2", "T", [e, e])]);
    let actual = iamc(&[("SSP2", "T", [e + 0.5 * (tol.atol + tol.rtol * e), e])]);
    let a = normalizer.normalize(ArtifactKind::IamcCsv, RawArtifact::new(actual)).unwrap();
    let x = normalizer.normalize(ArtifactKind::IamcCsv, RawArtifact::new(expected)).unwrap();
    assert!(Comparator::new(tol).compare(&a, &x).is_equal());
}

#[test]
fn row_order_does_not_matter() {
    let normalizer = Normalizer::for_family("CICERO-SCM", "").unwrap();
    let one = iamc(&[("a", "T", [1.0, 2.0]), ("b", "T", [3.0, 4.0])]);
    let two = iamc(&[("b", "T", [3.0, 4.0]), ("a", "T", [1.0, 2.0])]);
    let a = normalizer.normalize(ArtifactKind::HarmonizedInfilled, RawArtifact::new(one)).unwrap();
    let x = normalizer.normalize(ArtifactKind::HarmonizedInfilled, RawArtifact::new(two)).unwrap();
    assert_eq!(a, x);
}

#[test]
fn provenance_projection_accepts_exact_schema() {
    let normalizer = Normalizer::for_family("MAGICC", "7.5.3").unwrap();
    let table = normalizer.normalize(ArtifactKind::AllOutputMeta, RawArtifact::new(full_meta("7.5.3"))).unwrap();
    let keyed = table.as_keyed().unwrap();
    assert!(!keyed.columns.iter().any(|c| c == "workflow"));
    assert_eq!(keyed.columns.len(), 47);
}

#[test]
fn missing_provenance_column_is_configuration_error() {
    let normalizer = Normalizer::for_family("MAGICC", "7.5.3").unwrap();
    let mut meta = full_meta("7.5.3");
    let pos = meta.position("harmonization").unwrap();
    meta.columns.remove(pos);
    for row in &mut meta.rows {
        row.remove(pos);
    }
    let err = normalizer.normalize(ArtifactKind::AllOutputMeta, RawArtifact::new(meta)).unwrap_err();
    assert!(matches!(err, ConfigurationError::ProvenanceColumnsMismatch { .. }), "got {err:?}");
}

#[test]
fn missing_keep_column_is_configuration_error() {
    let normalizer = Normalizer::for_family("MAGICC", "7.5.3").unwrap();
    let mut meta = full_meta("7.5.3");
    let pos = meta.position("Exceedance Probability 1.5C (MAGICC7.5.3)").unwrap();
    meta.columns.remove(pos);
    for row in &mut meta.rows {
        row.remove(pos);
    }
    let err = normalizer.normalize(ArtifactKind::AllOutputMeta, RawArtifact::new(meta)).unwrap_err();
    let ConfigurationError::MissingKeepColumns(cols) = err else { panic!("expected missing keep columns, got {err:?}") };
    assert!(cols.contains(&"Exceedance Probability 1.5C (MAGICC7.5.3)".to_string()), "{cols:?}");
}

#[test]
fn version_mismatch_surfaces_as_schema_error() {
    // meta escrita por 7.5.3 leída con la versión 7.5.1
    let normalizer = Normalizer::for_family("MAGICC", "7.5.1").unwrap();
    let err = normalizer.normalize(ArtifactKind::AllOutputMeta, RawArtifact::new(full_meta("7.5.3"))).unwrap_err();
    assert!(matches!(err, ConfigurationError::ProvenanceColumnsMismatch { .. }));
}

#[test]
fn unknown_family_is_rejected_before_any_comparison() {
    assert!(matches!(Normalizer::for_family("hector", "3.0"), Err(ConfigurationError::UnknownModelFamily(_))));
}

#[test]
fn captured_tables_compare_equal_to_their_source() {
    let normalizer = Normalizer::for_family("MAGICC", "7.5.3").unwrap();
    let ts = normalizer.normalize(ArtifactKind::IamcCsv, RawArtifact::new(iamc(&[("b", "T", [1.0, 2.0]), ("a", "T", [3.0, 4.0])]))).unwrap();
    let meta = normalizer.normalize(ArtifactKind::AllOutputMeta, RawArtifact::new(full_meta("7.5.3"))).unwrap();

    let ts_back = normalizer.normalize(ArtifactKind::IamcCsv, RawArtifact::new(sorted_wide(ts.as_time_series().unwrap()))).unwrap();
    // la captura de meta ya está proyectada: se relee como probabilidad (sin proyección)
    let meta_back = CanonicalTable::Keyed(regress_core::normalize::index_by_model_scenario(&keyed_to_raw(meta.as_keyed().unwrap())).unwrap());

    let cmp = Comparator::default();
    assert!(cmp.compare(&ts_back, &ts).is_equal());
    assert!(cmp.compare(&meta_back, &meta).is_equal());
}

#[test]
fn numeric_looking_scenario_names_compare_as_text() {
    let normalizer = Normalizer::for_family("MAGICC", "7.5.3").unwrap();
    let with_scenario = |scenario: &str| {
        let mut t = RawTable::new(["Model", "Scenario", "Region", "Variable", "Unit", "2010"].iter().map(|c| c.to_string()).collect());
        t.push_row(vec!["IMAGE".into(), Value::text_cell(scenario), "World".into(), "T".into(), "K".into(), Value::text_cell("1.0")]);
        normalizer.normalize(ArtifactKind::IamcCsv, RawArtifact::new(t)).unwrap()
    };

    let res = Comparator::default().compare(&with_scenario("1.50"), &with_scenario("1.5"));
    assert!(!res.is_equal());
    assert!(res.entries().iter().all(|d| d.kind == DiffKind::Structural), "{:?}", res.entries());

    let captured = sorted_wide(with_scenario("1.50").as_time_series().unwrap());
    assert_eq!(captured.rows[0][1], Value::from("1.50"));
}
