// standard library
use std::collections::HashSet;
use std::path::{Path, PathBuf};

// crate modules
use crate::builder::ConfigBuilder;
use crate::error::{Error, Result};
use crate::projection::Plane;

// penvox modules
use penvox_format::f;
use penvox_organlist::OrganlistFormat;
use penvox_phantom::{Dimensions, Encoding, Pitch};

// external crates
use log::debug;
use serde::{Deserialize, Serialize};

/// What to do with negative densities in the organlist
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DensityPolicy {
    /// Stop before writing anything
    #[default]
    Abort,
    /// Replace every density with its absolute value and carry on
    Absolutize,
}

/// Output paths for the three GNUPLOT slice files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionPaths {
    /// Slices in the XY plane
    pub xy: PathBuf,
    /// Slices in the XZ plane
    pub xz: PathBuf,
    /// Slices in the YZ plane
    pub yz: PathBuf,
}

impl Default for ProjectionPaths {
    fn default() -> Self {
        Self {
            xy: PathBuf::from("ct-den-matXY.dat"),
            xz: PathBuf::from("ct-den-matXZ.dat"),
            yz: PathBuf::from("ct-den-matYZ.dat"),
        }
    }
}

impl ProjectionPaths {
    /// Output path for a given plane
    pub fn get(&self, plane: Plane) -> &Path {
        match plane {
            Plane::XY => &self.xy,
            Plane::XZ => &self.xz,
            Plane::YZ => &self.yz,
        }
    }
}

/// Everything needed to convert a phantom
///
/// Every field has a default, so a JSON configuration only needs to list what
/// differs. Paths are relative to the working directory.
///
/// ```json
/// {
///     "phantom": "AM/AM.dat",
///     "encoding": "ascii",
///     "dimensions": { "nx": 254, "ny": 127, "nz": 222 },
///     "pitch": { "x": 0.2137, "y": 0.2137, "z": 0.8 },
///     "n_materials": 53,
///     "n_organs": 141,
///     "organlist": "AM/AM_organs.dat"
/// }
/// ```
///
/// [validate()](Config::validate) is called by the pipeline before any file
/// is opened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Raw phantom file
    pub phantom: PathBuf,
    /// Encoding of the raw phantom file
    pub encoding: Encoding,
    /// Number of voxels along each axis
    pub dimensions: Dimensions,
    /// Voxel widths (cm)
    pub pitch: Pitch,
    /// Number of materials declared for the simulation
    pub n_materials: u32,
    /// Number of rows expected in the organlist
    pub n_organs: usize,
    /// Organlist file
    pub organlist: PathBuf,
    /// Layout of the organlist file
    pub organlist_format: OrganlistFormat,
    /// Output voxel geometry file
    pub vox: PathBuf,
    /// Output GNUPLOT slice files
    pub projections: ProjectionPaths,
    /// Output organlist echo
    pub audit: PathBuf,
    /// Handling of negative densities
    pub density_policy: DensityPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            phantom: PathBuf::new(),
            encoding: Encoding::default(),
            dimensions: Dimensions::default(),
            pitch: Pitch::default(),
            n_materials: 0,
            n_organs: 0,
            organlist: PathBuf::new(),
            organlist_format: OrganlistFormat::default(),
            vox: PathBuf::from("phantom.vox"),
            projections: ProjectionPaths::default(),
            audit: PathBuf::from("organlist-echo.dat"),
            density_policy: DensityPolicy::default(),
        }
    }
}

impl Config {
    /// Start a [ConfigBuilder] from the defaults
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Read a configuration from a JSON file
    ///
    /// ```rust, no_run
    /// # use penvox_penelope::Config;
    /// let config = Config::from_json_file("phantom.json").unwrap();
    /// ```
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&text).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Configuration read from {path:?}");
        Ok(config)
    }

    /// Check every value that can be checked without touching the filesystem
    ///
    /// ```rust
    /// # use penvox_penelope::{Config, Error};
    /// # use penvox_phantom::Dimensions;
    /// let config = Config::builder()
    ///     .dimensions(Dimensions { nx: 2, ny: 2, nz: 2 })
    ///     .n_organs(2)
    ///     .n_materials(1)
    ///     .build();
    ///
    /// assert!(matches!(config.validate(), Err(Error::InvalidConfiguration(_))));
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.n_materials <= 1 {
            return Err(Error::InvalidConfiguration(f!(
                "number of materials must be greater than 1, found {}",
                self.n_materials
            )));
        }

        if self.n_organs == 0 {
            return Err(Error::InvalidConfiguration(
                "number of organs must be at least 1".to_string(),
            ));
        }

        self.dimensions
            .validate()
            .map_err(|e| Error::InvalidConfiguration(e.to_string()))?;
        self.pitch
            .validate()
            .map_err(|e| Error::InvalidConfiguration(e.to_string()))?;

        self.validate_paths()
    }

    /// Outputs must be distinct and must not overwrite either input
    fn validate_paths(&self) -> Result<()> {
        let inputs = [&self.phantom, &self.organlist];
        let outputs = [
            &self.vox,
            &self.projections.xy,
            &self.projections.xz,
            &self.projections.yz,
            &self.audit,
        ];

        let mut seen = HashSet::new();
        for output in outputs {
            if output.as_os_str().is_empty() {
                return Err(Error::InvalidConfiguration(
                    "output paths must not be empty".to_string(),
                ));
            }
            if !seen.insert(output) {
                return Err(Error::InvalidConfiguration(f!(
                    "output path {output:?} is used more than once"
                )));
            }
            if inputs.contains(&output) {
                return Err(Error::InvalidConfiguration(f!(
                    "output path {output:?} would overwrite an input file"
                )));
            }
        }

        Ok(())
    }
}
