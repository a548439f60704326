//! Command line arguments and how they layer over a configuration

// standard library
use std::path::PathBuf;

// penvox modules
use penvox_format::f;
use penvox_organlist::Layout;
use penvox_penelope::{Config, DensityPolicy, ProjectionPaths};
use penvox_phantom::{Dimensions, Encoding, Pitch};

// external crates
use clap::Parser;

/// Convert voxel phantoms into PENELOPE/penEasy geometry inputs
///
/// Writes the penEasy voxel geometry file, three GNUPLOT slice files for
/// checking the geometry, and a normalised echo of the organlist used.
#[derive(Parser, Debug)]
#[command(name = "penvox", version, about, long_about)]
#[command(arg_required_else_help(true), args_override_self(true))]
pub struct Cli {
    /// Path to the raw phantom file
    pub phantom: Option<PathBuf>,

    /// Encoding of the phantom file [binary, ascii]
    #[arg(short, long, value_name = "ENCODING")]
    pub encoding: Option<Encoding>,

    /// Number of voxels in x, y and z
    #[arg(long, num_args = 3, value_names = ["NX", "NY", "NZ"])]
    pub dims: Option<Vec<usize>>,

    /// Voxel widths in x, y and z (cm)
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"])]
    #[arg(allow_negative_numbers = true)]
    pub pitch: Option<Vec<f64>>,

    /// Number of materials in the simulation
    #[arg(short, long, value_name = "N")]
    pub materials: Option<u32>,

    /// Number of organs in the organlist
    #[arg(short, long, value_name = "N")]
    pub organs: Option<usize>,

    /// Path to the organlist file
    #[arg(long, value_name = "PATH")]
    pub organlist: Option<PathBuf>,

    /// Lines to skip at the top of the organlist
    #[arg(long, value_name = "N")]
    pub skip_rows: Option<usize>,

    /// Names of every organlist column, in order
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub headers: Option<Vec<String>>,

    /// Organ, material and density column names
    #[arg(long, value_name = "ORGAN,MATERIAL,DENSITY", value_delimiter = ',')]
    pub columns: Option<Vec<String>>,

    /// Organlist column delimiter (fixed width if not given)
    #[arg(long, value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Output voxel geometry file
    #[arg(long, value_name = "PATH")]
    pub vox: Option<PathBuf>,

    /// Output GNUPLOT slice files for XY, XZ and YZ
    #[arg(long, value_name = "XY,XZ,YZ", value_delimiter = ',')]
    pub projections: Option<Vec<PathBuf>>,

    /// Output organlist echo
    #[arg(long, value_name = "PATH")]
    pub audit: Option<PathBuf>,

    /// Use absolute values for negative densities instead of stopping
    #[arg(long)]
    pub absolute_densities: bool,

    /// Read options from a JSON file, flags take priority
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Check the line count of the geometry file once written
    #[arg(long)]
    pub verify: bool,

    /// Hide progress bars
    #[arg(long)]
    pub no_progress: bool,

    /// Verbose logging (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output (overrules --verbose)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Apply every flag given on the command line over `config`
    pub fn apply(&self, mut config: Config) -> Result<Config, String> {
        if let Some(path) = &self.phantom {
            config.phantom = path.clone();
        }

        if let Some(encoding) = self.encoding {
            config.encoding = encoding;
        }

        if let Some(dims) = &self.dims {
            let [nx, ny, nz] = triple(dims, "--dims")?;
            config.dimensions = Dimensions { nx, ny, nz };
        }

        if let Some(pitch) = &self.pitch {
            let [x, y, z] = triple(pitch, "--pitch")?;
            config.pitch = Pitch { x, y, z };
        }

        if let Some(n) = self.materials {
            config.n_materials = n;
        }

        if let Some(n) = self.organs {
            config.n_organs = n;
        }

        if let Some(path) = &self.organlist {
            config.organlist = path.clone();
        }

        let format = &mut config.organlist_format;
        if let Some(n) = self.skip_rows {
            format.skip_rows = n;
        }

        if let Some(headers) = &self.headers {
            format.headers = headers.iter().map(|h| h.trim().to_string()).collect();
        }

        if let Some(columns) = &self.columns {
            let [organ, material, density] = triple(columns, "--columns")?;
            format.organ_column = organ.trim().to_string();
            format.material_column = material.trim().to_string();
            format.density_column = density.trim().to_string();
        }

        if let Some(delimiter) = self.delimiter {
            format.layout = Layout::Delimited(delimiter);
        }

        if let Some(path) = &self.vox {
            config.vox = path.clone();
        }

        if let Some(paths) = &self.projections {
            let [xy, xz, yz] = triple(paths, "--projections")?;
            config.projections = ProjectionPaths { xy, xz, yz };
        }

        if let Some(path) = &self.audit {
            config.audit = path.clone();
        }

        if self.absolute_densities {
            config.density_policy = DensityPolicy::Absolutize;
        }

        Ok(config)
    }
}

/// Exactly three values for options like `--dims` or `--columns`
fn triple<T: Clone>(values: &[T], flag: &str) -> Result<[T; 3], String> {
    match values {
        [a, b, c] => Ok([a.clone(), b.clone(), c.clone()]),
        _ => Err(f!(
            "{flag} expects exactly 3 values, found {}",
            values.len()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("penvox").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn full_command_line() {
        let cli = parse(&[
            "AM.dat",
            "--encoding",
            "ascii",
            "--dims",
            "254",
            "127",
            "222",
            "--pitch",
            "0.2137",
            "0.2137",
            "0.8",
            "--materials",
            "53",
            "--organs",
            "141",
            "--organlist",
            "AM_organs.csv",
            "--skip-rows",
            "1",
            "--headers",
            "id,name,mat,rho",
            "--columns",
            "id,mat,rho",
            "--delimiter",
            ",",
            "--absolute-densities",
        ]);

        let config = cli.apply(Config::default()).unwrap();
        assert_eq!(config.phantom, PathBuf::from("AM.dat"));
        assert_eq!(config.encoding, Encoding::Ascii);
        assert_eq!(config.dimensions.total(), 254 * 127 * 222);
        assert_eq!(config.pitch.z, 0.8);
        assert_eq!(config.n_materials, 53);
        assert_eq!(config.n_organs, 141);
        assert_eq!(config.organlist_format.headers, ["id", "name", "mat", "rho"]);
        assert_eq!(config.organlist_format.density_column, "rho");
        assert_eq!(config.organlist_format.layout, Layout::Delimited(','));
        assert_eq!(config.density_policy, DensityPolicy::Absolutize);
        assert_eq!(config.vox, PathBuf::from("phantom.vox"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn flags_override_file_values() {
        let base = Config::builder()
            .phantom("from_file.dat")
            .n_materials(10)
            .vox("file.vox")
            .build();

        let cli = parse(&["override.dat", "--materials", "12"]);
        let config = cli.apply(base).unwrap();

        assert_eq!(config.phantom, PathBuf::from("override.dat"));
        assert_eq!(config.n_materials, 12);
        assert_eq!(config.vox, PathBuf::from("file.vox"));
    }

    #[test]
    fn projections_need_three_paths() {
        let cli = parse(&["AM.dat", "--projections", "a.dat,b.dat"]);
        let err = cli.apply(Config::default()).unwrap_err();
        assert!(err.contains("--projections"));

        let cli = parse(&["AM.dat", "--projections", "a.dat,b.dat,c.dat"]);
        let config = cli.apply(Config::default()).unwrap();
        assert_eq!(config.projections.yz, PathBuf::from("c.dat"));
    }

    #[test]
    fn unknown_encoding() {
        let result = Cli::try_parse_from(["penvox", "AM.dat", "--encoding", "hex"]);
        assert!(result.is_err());
    }
}
