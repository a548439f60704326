//! Write the PENELOPE/penEasy voxel geometry file

// standard library
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

// crate modules
use crate::error::{Error, Result};

// penvox modules
use penvox_format::Thousands;
use penvox_phantom::ResolvedGrid;

// external crates
use log::info;

/// Number of lines before the first voxel
pub const VOX_HEADER_LINES: usize = 7;

/// Write a resolved grid to a penEasy voxel geometry file
///
/// A fixed header followed by one `material density` line per voxel, in
/// linear order (`x` fastest, then `y`, then `z`).
///
/// ```text
/// [SECTION VOXELS HEADER v.2008-04-13]
///   254 127 222
///  0.21370 0.21370 0.80000
///  1
///  2
///  0
/// [END OF VXH SECTION]
///   1  0.0012
///  10  1.0500
/// ```
///
/// The file always has `7 + nx*ny*nz` lines.
///
/// ```rust, no_run
/// # use penvox_organlist::{OrganTable, OrganlistFormat};
/// # use penvox_phantom::{read_phantom, resolve, Dimensions, Encoding, Pitch};
/// # use penvox_penelope::write_vox;
/// let dims = Dimensions::new(254, 127, 222).unwrap();
/// let pitch = Pitch::new(0.2137, 0.2137, 0.8).unwrap();
/// let table = OrganTable::load("AM_organs.dat", &OrganlistFormat::default(), 141).unwrap();
/// let organs = read_phantom("AM.dat", Encoding::Ascii, dims.total()).unwrap();
///
/// let grid = resolve(organs, dims, pitch, &table).unwrap();
/// write_vox("phantom.vox", &grid).unwrap();
/// ```
pub fn write_vox<P: AsRef<Path>>(path: P, grid: &ResolvedGrid) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| Error::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    write_vox_to(&mut writer, grid).map_err(|e| e.writing(path))?;
    writer.flush().map_err(|e| Error::from(e).writing(path))?;

    info!(
        "Voxel geometry written to {path:?} ({} voxels)",
        grid.len().thousands()
    );
    Ok(())
}

/// Write the voxel geometry to anything implementing [Write]
pub fn write_vox_to<W: Write>(writer: &mut W, grid: &ResolvedGrid) -> Result<()> {
    let dims = grid.dimensions();
    let pitch = grid.pitch();

    writeln!(writer, "[SECTION VOXELS HEADER v.2008-04-13]")?;
    writeln!(writer, " {:>4}{:>4}{:>4}", dims.nx, dims.ny, dims.nz)?;
    writeln!(writer, " {:>7.5} {:>7.5} {:>7.5}", pitch.x, pitch.y, pitch.z)?;
    // material column, density column, no blank line between z planes
    writeln!(writer, " 1")?;
    writeln!(writer, " 2")?;
    writeln!(writer, " 0")?;
    writeln!(writer, "[END OF VXH SECTION]")?;

    for (material, density) in grid.materials().iter().zip(grid.densities()) {
        writeln!(writer, "{material:>3} {density:>7.4}")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use penvox_organlist::{Organ, OrganTable};
    use penvox_phantom::{resolve, Dimensions, Pitch};

    #[test]
    fn exact_layout() {
        let table = OrganTable::from_organs(vec![
            Organ {
                organ_id: 1,
                material_id: 10,
                density: 1.5,
            },
            Organ {
                organ_id: 2,
                material_id: 2,
                density: 0.0012,
            },
        ])
        .unwrap();

        let dims = Dimensions::new(3, 1, 1).unwrap();
        let pitch = Pitch::new(0.2137, 0.2137, 0.8).unwrap();
        let grid = resolve(vec![1, 2, 7], dims, pitch, &table).unwrap();

        let mut buffer = Vec::new();
        write_vox_to(&mut buffer, &grid).unwrap();

        let expected = "\
[SECTION VOXELS HEADER v.2008-04-13]
    3   1   1
 0.21370 0.21370 0.80000
 1
 2
 0
[END OF VXH SECTION]
 10  1.5000
  2  0.0012
  0  0.0000
";
        assert_eq!(String::from_utf8(buffer).unwrap(), expected);
    }
}
