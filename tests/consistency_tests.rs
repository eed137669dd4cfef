
use climate_regress::check_consistency_with_database;
use regress_core::{DiffKind, Tolerance, Value};
use test_support::{climate_rows, iamc_headers, write_xlsx, Sheet};

fn db_export(rows: Vec<Vec<Value>>) -> Sheet {
    Sheet { name: "data", headers: iamc_headers(), rows }
}

#[test]
fn output_superset_matches_database_export() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("output.xlsx");
    let export = dir.path().join("export.xlsx");

    write_xlsx(&output, &[db_export(climate_rows())]);
    // el export sólo tiene la primera serie
    write_xlsx(&export, &[db_export(climate_rows()[..1].to_vec())]);

    let res = check_consistency_with_database(&output, &export, Tolerance::CONSISTENCY).unwrap();
    assert!(res.is_equal(), "{:?}", res.entries());
}

#[test]
fn secondary_tolerance_is_tighter() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("output.xlsx");
    let export = dir.path().join("export.xlsx");

    let mut rows = climate_rows();
    write_xlsx(&export, &[db_export(rows.clone())]);
    // dentro de 1e-4 pero fuera de 1e-5
    let e = rows[0][5].as_f64().unwrap();
    rows[0][5] = Value::Number(e + 5e-5);
    write_xlsx(&output, &[db_export(rows)]);

    let res = check_consistency_with_database(&output, &export, Tolerance::CONSISTENCY).unwrap();
    assert_eq!(res.entries().len(), 1);
    assert_eq!(res.entries()[0].kind, DiffKind::Numeric);
    assert!(check_consistency_with_database(&output, &export, Tolerance::DEFAULT).unwrap().is_equal());
}

#[test]
fn series_missing_from_output_is_a_diff() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("output.xlsx");
    let export = dir.path().join("export.xlsx");

    write_xlsx(&output, &[db_export(climate_rows()[..2].to_vec())]);
    write_xlsx(&export, &[db_export(climate_rows())]);

    let res = check_consistency_with_database(&output, &export, Tolerance::CONSISTENCY).unwrap();
    assert_eq!(res.affected_variables(), vec!["AR6 climate diagnostics|Effective Radiative Forcing|MAGICCv7.5.3|50.0th Percentile".to_string()]);
}
