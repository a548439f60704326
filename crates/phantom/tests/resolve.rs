//! Integration tests for reading and resolving phantoms

use std::fs;
use std::path::PathBuf;

use penvox_organlist::{Organ, OrganTable};
use penvox_phantom::{read_phantom, resolve, Dimensions, Encoding, Error, Pitch};
use rstest::{fixture, rstest};
use tempfile::TempDir;

#[fixture]
fn scratch() -> TempDir {
    tempfile::tempdir().unwrap()
}

#[fixture]
fn table() -> OrganTable {
    OrganTable::from_organs(vec![
        Organ {
            organ_id: 1,
            material_id: 10,
            density: 1.5,
        },
        Organ {
            organ_id: 2,
            material_id: 20,
            density: 2.5,
        },
    ])
    .unwrap()
}

fn write(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn cube() -> Dimensions {
    Dimensions::new(2, 2, 2).unwrap()
}

#[rstest]
#[case(Encoding::Binary, &[1, 1, 2, 2, 1, 1, 2, 2])]
#[case(Encoding::Ascii, b"1 1 2 2\n1 1 2 2\n")]
#[case(Encoding::Ascii, b"1\n1\n2\n2\n1\n1\n2\n2")]
fn two_by_two_by_two(
    scratch: TempDir,
    table: OrganTable,
    #[case] encoding: Encoding,
    #[case] content: &[u8],
) {
    let path = write(&scratch, "phantom.dat", content);
    let organs = read_phantom(&path, encoding, cube().total()).unwrap();
    assert_eq!(organs, vec![1, 1, 2, 2, 1, 1, 2, 2]);

    let grid = resolve(organs, cube(), Pitch::default(), &table).unwrap();
    assert_eq!(grid.len(), 8);
    assert_eq!(grid.materials(), &[10, 10, 20, 20, 10, 10, 20, 20]);
    assert_eq!(grid.densities(), &[1.5, 1.5, 2.5, 2.5, 1.5, 1.5, 2.5, 2.5]);
    assert_eq!(grid.unresolved(), 0);

    let stats = grid.statistics();
    assert_eq!(stats.max_material, 20);
    assert_eq!(stats.max_density, 2.5);
    assert_eq!(stats.max_organ, 2);
}

#[rstest]
fn ascii_token_shortfall(scratch: TempDir) {
    let path = write(&scratch, "phantom.txt", b"1 1 2 2 1 1 2");
    let err = read_phantom(&path, Encoding::Ascii, 8).unwrap_err();

    match err {
        Error::DecodeError(message) => {
            assert!(message.contains("expected 8"), "{message}");
            assert!(message.contains("found 7"), "{message}");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
#[case(5, 8)]
#[case(0, 8)]
fn truncated_binary(scratch: TempDir, #[case] length: usize, #[case] total: usize) {
    let path = write(&scratch, "phantom.dat", &vec![1; length]);
    let err = read_phantom(&path, Encoding::Binary, total).unwrap_err();
    assert!(matches!(
        err,
        Error::TruncatedInput { expected, found } if expected == total && found == length
    ));
}

#[rstest]
fn excess_binary(scratch: TempDir) {
    let path = write(&scratch, "phantom.dat", &[1; 9]);
    let err = read_phantom(&path, Encoding::Binary, 8).unwrap_err();
    assert!(matches!(
        err,
        Error::ExcessInput {
            expected: 8,
            found: 9
        }
    ));
}

#[rstest]
fn missing_phantom(scratch: TempDir) {
    let path = scratch.path().join("absent.dat");
    let err = read_phantom(&path, Encoding::Binary, 8).unwrap_err();
    assert!(matches!(err, Error::FileNotFound { path: p } if p == path));
}

#[rstest]
fn resolution_is_idempotent(table: OrganTable) {
    let dims = Dimensions::new(4, 3, 2).unwrap();
    let organs = (0..24).map(|i| i % 3).collect::<Vec<u32>>();

    let first = resolve(organs.clone(), dims, Pitch::default(), &table).unwrap();
    let second = resolve(organs, dims, Pitch::default(), &table).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.unresolved(), 8);
    assert_eq!(first.missing_organs().len(), 1);
}

#[rstest]
fn arrays_share_indexing(table: OrganTable) {
    let dims = Dimensions::new(3, 2, 2).unwrap();
    let organs = (0..12).map(|i| 1 + (i % 2)).collect::<Vec<u32>>();
    let grid = resolve(organs.clone(), dims, Pitch::default(), &table).unwrap();

    assert_eq!(grid.organs().len(), dims.total());
    assert_eq!(grid.materials().len(), dims.total());
    assert_eq!(grid.densities().len(), dims.total());

    for z in 0..dims.nz {
        for y in 0..dims.ny {
            for x in 0..dims.nx {
                let voxel = grid.voxel_at(x, y, z).unwrap();
                let organ = organs[dims.index(x, y, z)];
                assert_eq!(voxel.organ, organ);
                assert_eq!(voxel.material, organ * 10);
            }
        }
    }
}
