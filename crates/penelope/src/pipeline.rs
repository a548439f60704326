//! Full conversion from raw phantom to PENELOPE inputs

// standard library
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

// crate modules
use crate::config::{Config, DensityPolicy};
use crate::error::{Error, Result};
use crate::projection::{write_projections, Plane, SliceObserver};
use crate::vox::write_vox;

// penvox modules
use penvox_format::{f, Thousands};
use penvox_organlist::OrganTable;
use penvox_phantom::{read_phantom, resolve, Phantom, Statistics};

// external crates
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Summary of a completed conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Geometry of the converted phantom
    pub phantom: Phantom,
    /// Maxima over the resolved grid
    pub statistics: Statistics,
    /// Number of voxels whose organ was not in the organlist
    pub unresolved: usize,
    /// Distinct organ tags that were not in the organlist
    pub missing_organs: Vec<u32>,
    /// Number of densities made positive before resolution
    pub absolutized: usize,
    /// Every file written, in the order they were written
    pub written: Vec<PathBuf>,
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = "Report {\n".to_string();
        s += &f!("    voxels: {}\n", self.phantom.number_of_voxels().thousands());
        s += &f!("    max material: {}\n", self.statistics.max_material);
        s += &f!("    max organ: {}\n", self.statistics.max_organ);
        s += &f!("    unresolved voxels: {}\n", self.unresolved.thousands());
        if self.absolutized > 0 {
            s += &f!("    absolutized densities: {}\n", self.absolutized);
        }
        s += "    written:\n";
        for path in &self.written {
            s += &f!("        {}\n", path.display());
        }
        s += "}";

        write!(f, "{}", s)
    }
}

/// Convert a raw phantom into the penEasy geometry and GNUPLOT slice files
///
/// Steps run in this order, and anything that can fail before writing is
/// done before the first output file is created:
///
/// 1. validate the configuration
/// 2. load the organlist and apply the density policy
/// 3. read the phantom and resolve every voxel
/// 4. write the organlist echo, the `.vox` file, then the three slice files
///
/// ```rust, no_run
/// # use penvox_penelope::{convert, Config, NoProgress};
/// let config = Config::from_json_file("AM.json").unwrap();
/// let report = convert(&config, &NoProgress).unwrap();
/// println!("{report}");
/// ```
pub fn convert(config: &Config, observer: &dyn SliceObserver) -> Result<Report> {
    config.validate()?;
    let phantom = Phantom::new(config.dimensions, config.pitch)?;
    info!("Converting phantom {:?}", config.phantom);
    info!("{phantom}");

    let mut table = OrganTable::load(
        &config.organlist,
        &config.organlist_format,
        config.n_organs,
    )?;
    let absolutized = apply_density_policy(&mut table, config.density_policy)?;

    let organs = read_phantom(&config.phantom, config.encoding, phantom.number_of_voxels())?;
    let grid = resolve(organs, phantom.dimensions, phantom.pitch, &table)?;

    let statistics = grid.statistics();
    info!("{statistics}");
    if statistics.max_material > config.n_materials {
        warn!(
            "Material {} is used but only {} materials were declared",
            statistics.max_material, config.n_materials
        );
    }

    table.write_audit(&config.audit)?;
    write_vox(&config.vox, &grid)?;
    write_projections(&config.projections, &grid, observer)?;

    let mut written = vec![config.audit.clone(), config.vox.clone()];
    written.extend(
        Plane::ALL
            .iter()
            .map(|&plane| config.projections.get(plane).to_path_buf()),
    );

    Ok(Report {
        phantom,
        statistics,
        unresolved: grid.unresolved(),
        missing_organs: grid.missing_organs().iter().copied().collect(),
        absolutized,
        written,
    })
}

/// Returns the number of densities changed
fn apply_density_policy(table: &mut OrganTable, policy: DensityPolicy) -> Result<usize> {
    if !table.has_negative_densities() {
        return Ok(0);
    }

    let organs = table
        .negative_densities()
        .iter()
        .map(|o| o.organ_id)
        .collect::<Vec<u32>>();

    match policy {
        DensityPolicy::Abort => Err(Error::NegativeDensity {
            count: organs.len(),
            organs,
        }),
        DensityPolicy::Absolutize => {
            let changed = table.absolutize_densities();
            warn!("Using absolute values for {changed} negative densities {organs:?}");
            Ok(changed)
        }
    }
}

/// Count the lines in a text file
///
/// Handy for checking a `.vox` file has `7 + nx*ny*nz` lines.
///
/// ```rust, no_run
/// # use penvox_penelope::{count_lines, VOX_HEADER_LINES};
/// let lines = count_lines("phantom.vox").unwrap();
/// assert_eq!(lines, VOX_HEADER_LINES + 254 * 127 * 222);
/// ```
pub fn count_lines<P: AsRef<Path>>(path: P) -> Result<usize> {
    let path = path.as_ref();
    let reading = |source| Error::FileRead {
        path: path.to_path_buf(),
        source,
    };
    let reader = BufReader::new(File::open(path).map_err(reading)?);

    let mut count = 0;
    for line in reader.lines() {
        line.map_err(reading)?;
        count += 1;
    }

    debug!("{count} lines in {path:?}");
    Ok(count)
}
