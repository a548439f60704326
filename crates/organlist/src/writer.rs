//! Write operations for the organlist audit echo

// standard library
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

// crate modules
use crate::error::{Error, Result};
use crate::table::OrganTable;

// external crates
use log::debug;

/// Write the normalised echo of an [OrganTable] to a text file
///
/// One line per organ in table order, with fixed columns for the organ id,
/// material id and density no matter how the original file was laid out.
///
/// ```text
///        0        1         0.0012
///        1        2           1.03
/// ```
///
/// Densities use the shortest representation that reads back to the same
/// value, so the echo shows exactly what was parsed.
///
/// ```rust, no_run
/// # use penvox_organlist::{write_audit, OrganTable, OrganlistFormat};
/// let table = OrganTable::load("organlist.dat", &OrganlistFormat::default(), 141).unwrap();
/// write_audit(&table, "organlist-echo.dat").unwrap();
/// ```
pub fn write_audit<P: AsRef<Path>>(table: &OrganTable, path: P) -> Result<()> {
    let path = path.as_ref();
    let writing = |source| Error::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(File::create(path).map_err(writing)?);
    match write_audit_to(table, &mut writer) {
        Err(Error::IOError(source)) => return Err(writing(source)),
        other => other?,
    }
    writer.flush().map_err(writing)?;
    debug!("Organlist echo written to {path:?}");
    Ok(())
}

/// Write the audit echo to anything implementing [Write]
pub fn write_audit_to<W: Write>(table: &OrganTable, writer: &mut W) -> Result<()> {
    for organ in table.organs() {
        writeln!(
            writer,
            "{:>8} {:>8} {:>14}",
            organ.organ_id, organ.material_id, organ.density
        )?;
    }
    Ok(())
}
