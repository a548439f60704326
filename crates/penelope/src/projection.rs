//! Write the GNUPLOT slice files used by the penEasy plotting scripts
//!
//! Each file lists every voxel once, but grouped into 2D slices through a
//! different plane. Only the line order differs between the three files,
//! values are always looked up through [Dimensions::index()].

// standard library
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

// crate modules
use crate::config::ProjectionPaths;
use crate::error::{Error, Result};

// penvox modules
use penvox_format::NumFormat;
use penvox_phantom::{Dimensions, ResolvedGrid};

// external crates
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Plane of the 2D slices in a GNUPLOT file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Plane {
    /// Slices of constant z, rows of constant y
    XY,
    /// Slices of constant y, rows of constant x
    XZ,
    /// Slices of constant x, rows of constant z
    YZ,
}

impl Plane {
    /// Every plane, in the order files are listed
    pub const ALL: [Plane; 3] = [Plane::XY, Plane::XZ, Plane::YZ];

    /// Loop axes as (outer, middle, inner), with 0, 1, 2 for x, y, z
    fn loop_axes(&self) -> [usize; 3] {
        match self {
            Plane::XY => [2, 1, 0],
            Plane::XZ => [1, 0, 2],
            Plane::YZ => [0, 2, 1],
        }
    }

    /// Number of outer slices for the given dimensions
    ///
    /// ```rust
    /// # use penvox_penelope::Plane;
    /// # use penvox_phantom::Dimensions;
    /// let dims = Dimensions { nx: 2, ny: 3, nz: 4 };
    /// assert_eq!(Plane::XY.slices(&dims), 4);
    /// assert_eq!(Plane::XZ.slices(&dims), 3);
    /// assert_eq!(Plane::YZ.slices(&dims), 2);
    /// ```
    pub fn slices(&self, dimensions: &Dimensions) -> usize {
        axis_lengths(dimensions)[self.loop_axes()[0]]
    }
}

impl std::fmt::Display for Plane {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Plane::XY => write!(f, "XY"),
            Plane::XZ => write!(f, "XZ"),
            Plane::YZ => write!(f, "YZ"),
        }
    }
}

/// Notified as each slice of a GNUPLOT file is completed
///
/// The three files are written concurrently, so implementations must be
/// [Sync] and should expect calls for different planes to interleave.
pub trait SliceObserver: Sync {
    /// Called after slice `slice` of `total` (1-based) is written for `plane`
    fn slice_written(&self, plane: Plane, slice: usize, total: usize);

    /// Called once a file is complete
    fn plane_finished(&self, _plane: Plane) {}
}

/// Observer that ignores every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl SliceObserver for NoProgress {
    fn slice_written(&self, _plane: Plane, _slice: usize, _total: usize) {}
}

/// Write all three GNUPLOT slice files concurrently
///
/// The grid is only borrowed, each file is an independent read-only
/// traversal.
///
/// ```rust, no_run
/// # use penvox_organlist::{OrganTable, OrganlistFormat};
/// # use penvox_phantom::{read_phantom, resolve, Dimensions, Encoding, Pitch};
/// # use penvox_penelope::{write_projections, NoProgress, ProjectionPaths};
/// let dims = Dimensions::new(254, 127, 222).unwrap();
/// let pitch = Pitch::new(0.2137, 0.2137, 0.8).unwrap();
/// let table = OrganTable::load("AM_organs.dat", &OrganlistFormat::default(), 141).unwrap();
/// let organs = read_phantom("AM.dat", Encoding::Ascii, dims.total()).unwrap();
/// let grid = resolve(organs, dims, pitch, &table).unwrap();
///
/// // ct-den-matXY.dat, ct-den-matXZ.dat, ct-den-matYZ.dat
/// write_projections(&ProjectionPaths::default(), &grid, &NoProgress).unwrap();
/// ```
pub fn write_projections(
    paths: &ProjectionPaths,
    grid: &ResolvedGrid,
    observer: &dyn SliceObserver,
) -> Result<()> {
    let (xy, (xz, yz)) = rayon::join(
        || write_projection(paths.get(Plane::XY), Plane::XY, grid, observer),
        || {
            rayon::join(
                || write_projection(paths.get(Plane::XZ), Plane::XZ, grid, observer),
                || write_projection(paths.get(Plane::YZ), Plane::YZ, grid, observer),
            )
        },
    );

    xy?;
    xz?;
    yz?;
    Ok(())
}

/// Write a single GNUPLOT slice file
pub fn write_projection<P: AsRef<Path>>(
    path: P,
    plane: Plane,
    grid: &ResolvedGrid,
    observer: &dyn SliceObserver,
) -> Result<()> {
    let path = path.as_ref();
    debug!("Writing {plane} slices to {path:?}");

    let file = File::create(path).map_err(|source| Error::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    write_projection_to(&mut writer, plane, grid, observer).map_err(|e| e.writing(path))?;
    writer.flush().map_err(|e| Error::from(e).writing(path))?;

    info!("{plane} slices written to {path:?}");
    Ok(())
}

/// Write a GNUPLOT slice file to anything implementing [Write]
///
/// Every voxel is one line of 1-based indices, density, material and organ.
/// A line holding a single space closes each row, and another closes each
/// slice.
///
/// ```text
///    1   1   1 1.50000e+00   10    1
///    2   1   1 1.50000e+00   10    1
///
///    1   2   1 2.50000e+00   20    2
/// ```
pub fn write_projection_to<W: Write>(
    writer: &mut W,
    plane: Plane,
    grid: &ResolvedGrid,
    observer: &dyn SliceObserver,
) -> Result<()> {
    let dims = grid.dimensions();
    write_header(writer, grid)?;

    let lengths = axis_lengths(dims);
    let [outer, middle, inner] = plane.loop_axes();
    let (organs, materials, densities) = (grid.organs(), grid.materials(), grid.densities());

    let mut xyz = [0_usize; 3];
    for a in 0..lengths[outer] {
        xyz[outer] = a;
        for b in 0..lengths[middle] {
            xyz[middle] = b;
            for c in 0..lengths[inner] {
                xyz[inner] = c;
                let [x, y, z] = xyz;
                let i = dims.index(x, y, z);
                writeln!(
                    writer,
                    " {:>3} {:>3} {:>3} {} {:>4} {:>4}",
                    x + 1,
                    y + 1,
                    z + 1,
                    densities[i].sci(5, 2),
                    materials[i],
                    organs[i]
                )?;
            }
            writeln!(writer, " ")?;
        }
        writeln!(writer, " ")?;
        observer.slice_written(plane, a + 1, lengths[outer]);
    }

    observer.plane_finished(plane);
    Ok(())
}

fn write_header<W: Write>(writer: &mut W, grid: &ResolvedGrid) -> Result<()> {
    let dims = grid.dimensions();
    let [lx, ly, lz] = grid.phantom().extents();
    let zero = 0.0_f64.sci(6, 2);

    writeln!(writer, "#  CT structure (GNUPLOT format).")?;
    writeln!(
        writer,
        "#  CT enclosure limits:  XL = {zero} cm,  XU = {} cm",
        lx.sci(6, 2)
    )?;
    writeln!(
        writer,
        "#                       YL = {zero} cm,  YU = {} cm",
        ly.sci(6, 2)
    )?;
    writeln!(
        writer,
        "#                       ZL = {zero} cm,  ZU = {} cm",
        lz.sci(6, 2)
    )?;
    writeln!(
        writer,
        "#  Numbers of voxels:    NVX = {}, NVY = {}, NVZ = {}",
        dims.nx, dims.ny, dims.nz
    )?;
    writeln!(writer, "#")?;
    writeln!(writer, "#")?;
    writeln!(writer, "#  columns 1 to 3: bin indices IX, IY and IZ")?;
    writeln!(writer, "#  4th column: density (g/cm**3).")?;
    writeln!(writer, "#  5th column: material. 6th column: organ ID")?;
    writeln!(writer, "#  CT structure (GNUPLOT format).")?;
    Ok(())
}

fn axis_lengths(dimensions: &Dimensions) -> [usize; 3] {
    [dimensions.nx, dimensions.ny, dimensions.nz]
}
