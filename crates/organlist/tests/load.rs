//! Integration tests for reading organlist files

use std::fs;
use std::path::PathBuf;

use penvox_organlist::{Error, OrganTable, OrganlistFormat};
use rstest::{fixture, rstest};
use tempfile::TempDir;

const FIXED_WIDTH: &str = "\
ICRP adult male organlist
Organ_ID  Organ                 Material_ID  Density
--------  --------------------  -----------  -------

       0  Air (outside body)              1   0.0012
       1  Adrenal, left                   2   1.0300
       2  Adrenal, right                  2   1.0300
      12  Liver                           6   1.0500
";

const DELIMITED: &str = "\
id,name,mat,rho,note
0,Air,1,0.0012,outside
1,Adrenal left,2,1.03,
12,Liver,6,1.05,
";

#[fixture]
fn scratch() -> TempDir {
    tempfile::tempdir().unwrap()
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn csv_format() -> OrganlistFormat {
    OrganlistFormat::builder()
        .skip_rows(1)
        .headers(["id", "name", "mat", "rho", "note"])
        .columns("id", "mat", "rho")
        .delimiter(',')
        .build()
}

#[rstest]
fn fixed_width_defaults(scratch: TempDir) {
    let path = write(&scratch, "organlist.dat", FIXED_WIDTH);
    let table = OrganTable::load(&path, &OrganlistFormat::default(), 4).unwrap();

    assert_eq!(table.len(), 4);
    assert_eq!(table.resolve(0), Some((1, 0.0012)));
    assert_eq!(table.resolve(2), Some((2, 1.03)));
    assert_eq!(table.resolve(12), Some((6, 1.05)));
    assert_eq!(table.resolve(3), None);
    assert_eq!(table.max_material_id(), Some(6));
}

#[rstest]
fn delimited_with_extra_columns(scratch: TempDir) {
    let path = write(&scratch, "organlist.csv", DELIMITED);
    let table = OrganTable::load(&path, &csv_format(), 3).unwrap();

    let ids = table.organs().iter().map(|o| o.organ_id).collect::<Vec<_>>();
    assert_eq!(ids, vec![0, 1, 12]);
    assert_eq!(table.resolve(1), Some((2, 1.03)));
}

#[rstest]
#[case(3)]
#[case(5)]
fn row_count_mismatch(scratch: TempDir, #[case] expected: usize) {
    let path = write(&scratch, "organlist.dat", FIXED_WIDTH);
    let err = OrganTable::load(&path, &OrganlistFormat::default(), expected).unwrap_err();

    match err {
        Error::RowCountMismatch {
            expected: e,
            found,
            ..
        } => {
            assert_eq!(e, expected);
            assert_eq!(found, 4);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
fn missing_file(scratch: TempDir) {
    let path = scratch.path().join("nope.dat");
    let err = OrganTable::load(&path, &OrganlistFormat::default(), 1).unwrap_err();
    assert!(matches!(err, Error::FileNotFound { path: p } if p == path));
}

#[rstest]
fn duplicate_organ_ids(scratch: TempDir) {
    let content = "id,name,mat,rho,note\n5,a,1,1.0,\n6,b,2,1.0,\n5,c,3,1.0,\n";
    let path = write(&scratch, "dup.csv", content);
    let err = OrganTable::load(&path, &csv_format(), 3).unwrap_err();

    assert!(matches!(
        err,
        Error::DuplicateOrganId {
            organ_id: 5,
            first_line: 2,
            second_line: 4
        }
    ));
}

#[rstest]
#[case("id,name,mat,rho,note\n1,a,x,1.0,\n", "mat")]
#[case("id,name,mat,rho,note\n1,a,2,dense,\n", "rho")]
#[case("id,name,mat,rho,note\n-1,a,2,1.0,\n", "id")]
#[case("id,name,mat,rho,note\n1,a,2,NaN,\n", "not finite")]
fn malformed_rows(scratch: TempDir, #[case] content: &str, #[case] hint: &str) {
    let path = write(&scratch, "bad.csv", content);
    let err = OrganTable::load(&path, &csv_format(), 1).unwrap_err();

    match err {
        Error::ParseError { line, reason, .. } => {
            assert_eq!(line, 2);
            assert!(reason.contains(hint), "{reason}");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
fn wrong_number_of_headers(scratch: TempDir) {
    let path = write(&scratch, "organlist.dat", FIXED_WIDTH);
    let format = OrganlistFormat::builder()
        .headers(["Organ_ID", "Material_ID", "Density"])
        .build();

    let err = OrganTable::load(&path, &format, 4).unwrap_err();
    assert!(matches!(err, Error::ParseError { line: 5, .. }));
}

#[rstest]
fn unknown_key_column(scratch: TempDir) {
    let path = write(&scratch, "organlist.dat", FIXED_WIDTH);
    let format = OrganlistFormat::builder()
        .columns("Organ_ID", "Mat", "Density")
        .build();

    let err = OrganTable::load(&path, &format, 4).unwrap_err();
    assert!(matches!(err, Error::MissingColumn { name, .. } if name == "Mat"));
}

#[rstest]
fn negative_densities_are_reported_not_fixed(scratch: TempDir) {
    let content = "id,name,mat,rho,note\n1,a,1,-1.2,\n2,b,2,0.9,\n";
    let path = write(&scratch, "neg.csv", content);
    let mut table = OrganTable::load(&path, &csv_format(), 2).unwrap();

    assert!(table.has_negative_densities());
    assert_eq!(table.negative_densities().len(), 1);
    assert_eq!(table.resolve(1), Some((1, -1.2)));

    assert_eq!(table.absolutize_densities(), 1);
    assert!(!table.has_negative_densities());
    assert_eq!(table.resolve(1), Some((1, 1.2)));
}

#[rstest]
fn audit_echo_reflects_parsed_rows(scratch: TempDir) {
    let path = write(&scratch, "organlist.dat", FIXED_WIDTH);
    let table = OrganTable::load(&path, &OrganlistFormat::default(), 4).unwrap();

    let echo = scratch.path().join("echo.dat");
    table.write_audit(&echo).unwrap();

    let content = fs::read_to_string(echo).unwrap();
    let rows = content
        .lines()
        .map(|l| l.split_whitespace().collect::<Vec<_>>())
        .collect::<Vec<_>>();

    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0], vec!["0", "1", "0.0012"]);
    assert_eq!(rows[3], vec!["12", "6", "1.05"]);
}

#[rstest]
fn audit_echo_into_missing_directory(scratch: TempDir) {
    let path = write(&scratch, "organlist.dat", FIXED_WIDTH);
    let table = OrganTable::load(&path, &OrganlistFormat::default(), 4).unwrap();

    let echo = scratch.path().join("no_such_dir").join("echo.dat");
    let err = table.write_audit(&echo).unwrap_err();
    assert!(matches!(err, Error::FileWrite { .. }));
    assert!(err.to_string().contains("echo.dat"), "{err}");
}

#[rstest]
fn unreadable_organlist_is_named(scratch: TempDir) {
    // a directory exists but cannot be read as text
    let path = scratch.path().join("organs.d");
    fs::create_dir(&path).unwrap();

    let err = OrganTable::load(&path, &OrganlistFormat::default(), 4).unwrap_err();
    assert!(matches!(err, Error::FileRead { .. }));
    assert!(err.to_string().contains("organs.d"), "{err}");
}
