//! End to end runs of the `penvox` binary

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use rstest::{fixture, rstest};
use tempfile::TempDir;

#[fixture]
fn scratch() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("phantom.dat"), [1, 1, 2, 2, 1, 1, 2, 2]).unwrap();
    fs::write(
        dir.path().join("organs.csv"),
        "id,name,mat,rho\n1,Soft tissue,10,1.5\n2,Bone,20,-2.5\n",
    )
    .unwrap();
    dir
}

fn penvox(dir: &Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_penvox"))
        .current_dir(dir)
        .args([
            "phantom.dat",
            "--dims",
            "2",
            "2",
            "2",
            "--pitch",
            "0.5",
            "0.5",
            "1.0",
            "--materials",
            "20",
            "--organs",
            "2",
            "--organlist",
            "organs.csv",
            "--skip-rows",
            "1",
            "--headers",
            "id,name,mat,rho",
            "--columns",
            "id,mat,rho",
            "--delimiter",
            ",",
            "--no-progress",
        ])
        .args(extra)
        .output()
        .unwrap()
}

fn outputs(dir: &Path) -> Vec<PathBuf> {
    [
        "phantom.vox",
        "ct-den-matXY.dat",
        "ct-den-matXZ.dat",
        "ct-den-matYZ.dat",
        "organlist-echo.dat",
    ]
    .iter()
    .map(|name| dir.join(name))
    .collect()
}

#[rstest]
fn converts_with_absolute_densities(scratch: TempDir) {
    let output = penvox(scratch.path(), &["--absolute-densities", "--verify"]);
    assert!(output.status.success(), "{output:?}");

    for path in outputs(scratch.path()) {
        assert!(path.exists(), "{path:?} missing");
    }

    let vox = fs::read_to_string(scratch.path().join("phantom.vox")).unwrap();
    assert_eq!(vox.lines().count(), 15);
    assert_eq!(vox.lines().nth(9), Some(" 20  2.5000"));
}

#[rstest]
fn negative_density_exits_with_failure(scratch: TempDir) {
    let output = penvox(scratch.path(), &[]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("negative densities"), "{stderr}");

    for path in outputs(scratch.path()) {
        assert!(!path.exists(), "{path:?} should not exist");
    }
}

#[rstest]
fn single_material_is_rejected(scratch: TempDir) {
    let output = penvox(scratch.path(), &["--materials", "1", "--absolute-densities"]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("number of materials"), "{stderr}");
}

#[rstest]
fn json_config_with_flag_override(scratch: TempDir) {
    let json = r#"{
        "phantom": "phantom.dat",
        "dimensions": { "nx": 2, "ny": 2, "nz": 2 },
        "n_materials": 20,
        "n_organs": 2,
        "organlist": "organs.csv",
        "organlist_format": {
            "skip_rows": 1,
            "headers": ["id", "name", "mat", "rho"],
            "organ_column": "id",
            "material_column": "mat",
            "density_column": "rho",
            "layout": { "delimited": "," }
        },
        "vox": "from-config.vox",
        "density_policy": "absolutize"
    }"#;
    fs::write(scratch.path().join("config.json"), json).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_penvox"))
        .current_dir(scratch.path())
        .args(["--config", "config.json", "--vox", "override.vox", "--no-progress"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{output:?}");
    assert!(scratch.path().join("override.vox").exists());
    assert!(!scratch.path().join("from-config.vox").exists());
}

#[rstest]
fn rejected_run_draws_no_progress(scratch: TempDir) {
    let output = Command::new(env!("CARGO_BIN_EXE_penvox"))
        .current_dir(scratch.path())
        .args(["phantom.dat", "--dims", "2", "2", "2", "--materials", "1", "--organs", "2"])
        .args(["--organlist", "organs.csv"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("number of materials"), "{stderr}");
    assert!(!stderr.contains("slices"), "{stderr}");
}
