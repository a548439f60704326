//! Read operations for organlist files
//!
//! Files are small (a few hundred rows at most), so the whole file is read
//! into memory, split into string fields according to the [Layout](crate::Layout), and only
//! then are the three key columns parsed.

// standard library
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

// crate modules
use crate::error::{Error, Result};
use crate::format::OrganlistFormat;
use crate::table::Organ;

// penvox modules
use penvox_format::f;

// external crates
use log::{debug, info, trace};

/// Raw fields of a data row, tagged with its 1-based line number
type Record = (usize, Vec<String>);

/// Read every data row of an organlist file into [Organ]s
pub(crate) fn read_rows(path: &Path, format: &OrganlistFormat) -> Result<Vec<(usize, Organ)>> {
    let keys = format.key_positions()?;
    let text = read_text(path)?;

    let records = match format.layout.delimiter_byte()? {
        None => split_fixed_width(path, &text, format)?,
        Some(delimiter) => split_delimited(path, &text, format, delimiter)?,
    };

    let rows = records
        .into_iter()
        .map(|(line, fields)| parse_row(path, line, &fields, format, keys))
        .collect::<Result<Vec<(usize, Organ)>>>()?;

    info!("Read {} organs from {:?}", rows.len(), path);
    Ok(rows)
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        },
    })
}

/// Non-blank lines after the skipped rows
fn data_lines(text: &str, skip: usize) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .skip(skip)
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.trim().is_empty())
}

fn split_fixed_width(path: &Path, text: &str, format: &OrganlistFormat) -> Result<Vec<Record>> {
    let lines = data_lines(text, format.skip_rows)
        .map(|(n, line)| (n, line.chars().collect::<Vec<char>>()))
        .collect::<Vec<(usize, Vec<char>)>>();

    let spans = infer_columns(lines.iter().map(|(_, chars)| chars.as_slice()));
    debug!("Inferred organlist column spans {spans:?}");

    if let Some((first_line, _)) = lines.first() {
        if spans.len() != format.headers.len() {
            return Err(Error::ParseError {
                path: path.to_path_buf(),
                line: *first_line,
                reason: f!(
                    "found {} aligned columns but {} headers were given",
                    spans.len(),
                    format.headers.len()
                ),
            });
        }
    }

    Ok(lines
        .iter()
        .map(|(n, chars)| {
            let fields = spans
                .iter()
                .map(|&(start, end)| {
                    let start = start.min(chars.len());
                    let end = end.min(chars.len());
                    chars[start..end].iter().collect::<String>().trim().to_string()
                })
                .collect();
            (*n, fields)
        })
        .collect())
}

/// Character spans that are non-blank in at least one row
///
/// Returns half-open `(start, end)` ranges in character positions.
fn infer_columns<'a>(rows: impl Iterator<Item = &'a [char]>) -> Vec<(usize, usize)> {
    let mut occupied: Vec<bool> = Vec::new();
    for row in rows {
        if row.len() > occupied.len() {
            occupied.resize(row.len(), false);
        }
        for (i, c) in row.iter().enumerate() {
            if !c.is_whitespace() {
                occupied[i] = true;
            }
        }
    }

    let mut spans = Vec::new();
    let mut start = None;
    for (i, &filled) in occupied.iter().enumerate() {
        match (filled, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                spans.push((s, i));
                start = None;
            }
            _ => (),
        }
    }

    if let Some(s) = start {
        spans.push((s, occupied.len()));
    }

    spans
}

fn split_delimited(
    path: &Path,
    text: &str,
    format: &OrganlistFormat,
    delimiter: u8,
) -> Result<Vec<Record>> {
    // keep one line per source line so record positions map back to the file
    let body = text
        .lines()
        .skip(format.skip_rows)
        .collect::<Vec<&str>>()
        .join("\n");

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.iter().all(str::is_empty) {
            continue;
        }

        let line = format.skip_rows + record.position().map_or(0, |p| p.line() as usize);
        if record.len() != format.headers.len() {
            return Err(Error::ParseError {
                path: path.to_path_buf(),
                line,
                reason: f!(
                    "found {} fields but {} headers were given",
                    record.len(),
                    format.headers.len()
                ),
            });
        }

        records.push((line, record.iter().map(String::from).collect()));
    }

    Ok(records)
}

fn parse_row(
    path: &Path,
    line: usize,
    fields: &[String],
    format: &OrganlistFormat,
    [organ_idx, material_idx, density_idx]: [usize; 3],
) -> Result<(usize, Organ)> {
    let organ = Organ {
        organ_id: parse_field(path, line, &format.organ_column, &fields[organ_idx], "an organ id")?,
        material_id: parse_field(
            path,
            line,
            &format.material_column,
            &fields[material_idx],
            "a material id",
        )?,
        density: parse_field(path, line, &format.density_column, &fields[density_idx], "a density")?,
    };

    if !organ.density.is_finite() {
        return Err(Error::ParseError {
            path: path.to_path_buf(),
            line,
            reason: f!("density \"{}\" is not finite", fields[density_idx]),
        });
    }

    trace!("line {line}: {organ}");
    Ok((line, organ))
}

fn parse_field<T: FromStr>(
    path: &Path,
    line: usize,
    column: &str,
    value: &str,
    expected: &str,
) -> Result<T> {
    value.parse::<T>().map_err(|_| Error::ParseError {
        path: path.to_path_buf(),
        line,
        reason: f!("{column} value \"{value}\" is not {expected}"),
    })
}
