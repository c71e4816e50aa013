//! EGRID grid-file save and load.
//!
//! A saved file carries, in order: FILEHEAD, optional MAPUNITS +
//! MAPAXES, GRIDUNIT, GRIDHEAD, COORD, ZCORN, ACTNUM, ENDGRID, and for
//! a non-empty NNC list NNCHEAD + NNC1 + NNC2. Coordinates are written
//! as REAL (f32) in the grid's unit system; loading converts them back
//! to SI metres before grid construction.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::info;

use crate::grid::{CornerPointGrid, GridKeywords, MapAxes};
use crate::io::eclbin::{read_record, write_record, EclData};
use crate::io::EgridError;
use crate::types::{GridDims, UnitSystem};

/// One non-neighbour connection between two cells, by 0-based global
/// index. Written to the file 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NncPair {
    pub cell1: usize,
    pub cell2: usize,
}

/// Raw content of a grid file, unit-converted to SI, ready to feed the
/// corner-point construction path.
#[derive(Clone, Debug)]
pub struct EgridImport {
    /// Extents from the GRIDHEAD record.
    pub dims: GridDims,
    /// COORD in SI metres.
    pub coord: Vec<f64>,
    /// ZCORN in SI metres.
    pub zcorn: Vec<f64>,
    /// ACTNUM flags, when the file carries the record.
    pub actnum: Option<Vec<i32>>,
    /// Axis-remap metadata, when the file carries MAPAXES.
    pub mapaxes: Option<MapAxes>,
    /// Unit system declared by GRIDUNIT.
    pub units: UnitSystem,
}

/// Write `grid` to `path` in EGRID format.
///
/// # Errors
///
/// Only I/O failures; the grid itself is always writable.
pub fn save(path: &Path, grid: &CornerPointGrid, nnc: &[NncPair]) -> Result<(), EgridError> {
    info!(
        "writing {} grid to {} ({} nnc pairs)",
        grid.dims(),
        path.display(),
        nnc.len()
    );
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);

    let mut filehead = vec![0i32; 100];
    filehead[0] = 3; // version
    filehead[1] = 2007; // release year
    filehead[6] = 1; // corner-point grid type
    write_record(&mut w, "FILEHEAD", &EclData::Inte(filehead))?;

    if let Some(mapaxes) = grid.mapaxes() {
        if let Some(mapunits) = mapaxes.mapunits() {
            write_record(&mut w, "MAPUNITS", &EclData::Char(vec![mapunits.to_string()]))?;
        }
        let values = mapaxes.input().map(|v| v as f32).to_vec();
        write_record(&mut w, "MAPAXES", &EclData::Real(values))?;
    }

    let unit_tag = grid.units().length_tag().to_string();
    write_record(
        &mut w,
        "GRIDUNIT",
        &EclData::Char(vec![unit_tag, String::new()]),
    )?;

    let (nx, ny, nz) = grid.dims().as_tuple();
    let mut gridhead = vec![0i32; 100];
    gridhead[0] = 1; // corner-point
    gridhead[1] = nx as i32;
    gridhead[2] = ny as i32;
    gridhead[3] = nz as i32;
    gridhead[24] = 1; // numres
    write_record(&mut w, "GRIDHEAD", &EclData::Inte(gridhead))?;

    let from_si = |v: &f64| grid.units().from_si(*v) as f32;
    write_record(
        &mut w,
        "COORD",
        &EclData::Real(grid.coord().iter().map(from_si).collect()),
    )?;
    write_record(
        &mut w,
        "ZCORN",
        &EclData::Real(grid.zcorn().iter().map(from_si).collect()),
    )?;
    write_record(&mut w, "ACTNUM", &EclData::Inte(grid.actnum().to_vec()))?;
    write_record(&mut w, "ENDGRID", &EclData::Inte(Vec::new()))?;

    if !nnc.is_empty() {
        let mut nnchead = vec![0i32; 10];
        nnchead[0] = nnc.len() as i32;
        write_record(&mut w, "NNCHEAD", &EclData::Inte(nnchead))?;
        let nnc1: Vec<i32> = nnc.iter().map(|p| p.cell1 as i32 + 1).collect();
        let nnc2: Vec<i32> = nnc.iter().map(|p| p.cell2 as i32 + 1).collect();
        write_record(&mut w, "NNC1", &EclData::Inte(nnc1))?;
        write_record(&mut w, "NNC2", &EclData::Inte(nnc2))?;
    }

    Ok(())
}

/// Read the raw grid content of `path`.
///
/// GRIDHEAD, COORD, ZCORN and GRIDUNIT are mandatory; MAPAXES and
/// ACTNUM are optional. Unknown keywords are skipped.
///
/// # Errors
///
/// [`EgridError::MissingKeyword`] names the file and the absent record;
/// an unrecognized GRIDUNIT tag fails with the wrapped
/// [`UnknownLengthUnit`](crate::GridError::UnknownLengthUnit).
pub fn load(path: &Path) -> Result<EgridImport, EgridError> {
    info!("reading grid from {}", path.display());
    let file = File::open(path)?;
    let mut r = BufReader::new(file);

    let mut dims = None;
    let mut coord: Option<Vec<f64>> = None;
    let mut zcorn: Option<Vec<f64>> = None;
    let mut actnum = None;
    let mut mapaxes_values: Option<[f32; 6]> = None;
    let mut mapunits = None;
    let mut units = None;

    while let Some((keyword, data)) = read_record(&mut r)? {
        match (keyword.as_str(), data) {
            ("GRIDHEAD", EclData::Inte(head)) => {
                if head.len() < 4 || head[1] <= 0 || head[2] <= 0 || head[3] <= 0 {
                    return Err(EgridError::Format(format!(
                        "GRIDHEAD of {} carries no valid dimensions",
                        path.display()
                    )));
                }
                dims = Some(GridDims::new(
                    head[1] as usize,
                    head[2] as usize,
                    head[3] as usize,
                ));
            }
            ("COORD", data) => coord = Some(float_payload(path, "COORD", data)?),
            ("ZCORN", data) => zcorn = Some(float_payload(path, "ZCORN", data)?),
            ("ACTNUM", EclData::Inte(flags)) => actnum = Some(flags),
            // MAPAXES is a REAL record; kept in f32 until the MAPUNITS
            // tag is known.
            ("MAPAXES", EclData::Real(values)) => {
                if values.len() != 6 {
                    return Err(EgridError::Format(format!(
                        "MAPAXES of {} has {} values, expected 6",
                        path.display(),
                        values.len()
                    )));
                }
                mapaxes_values = Some([
                    values[0], values[1], values[2], values[3], values[4], values[5],
                ]);
            }
            ("MAPUNITS", EclData::Char(tags)) => {
                mapunits = tags.into_iter().next();
            }
            ("GRIDUNIT", EclData::Char(tags)) => {
                let tag = tags.first().map(String::as_str).unwrap_or("");
                units = Some(UnitSystem::from_length_tag(tag).map_err(EgridError::Grid)?);
            }
            _ => {}
        }
    }

    let missing = |keyword: &str| EgridError::MissingKeyword {
        path: path.to_path_buf(),
        keyword: keyword.to_string(),
    };
    let dims = dims.ok_or_else(|| missing("GRIDHEAD"))?;
    let mut coord = coord.ok_or_else(|| missing("COORD"))?;
    let mut zcorn = zcorn.ok_or_else(|| missing("ZCORN"))?;
    let units = units.ok_or_else(|| missing("GRIDUNIT"))?;

    units.convert_to_si(&mut coord);
    units.convert_to_si(&mut zcorn);

    let mapaxes = match mapaxes_values {
        Some(values) => Some(MapAxes::from_f32(values, mapunits).map_err(EgridError::Grid)?),
        None => None,
    };

    Ok(EgridImport {
        dims,
        coord,
        zcorn,
        actnum,
        mapaxes,
        units,
    })
}

/// Read `path` and build a grid from it via the corner-point
/// construction path (monotonicity repair and ACTNUM reset included).
pub fn load_grid(path: &Path) -> Result<CornerPointGrid, EgridError> {
    let import = load(path)?;
    let dims = import.dims;
    let units = import.units;
    let keywords = GridKeywords {
        gdfile: Some(import),
        units,
        ..GridKeywords::default()
    };
    Ok(CornerPointGrid::from_keywords(dims, &keywords)?)
}

fn float_payload(path: &Path, keyword: &str, data: EclData) -> Result<Vec<f64>, EgridError> {
    match data {
        EclData::Real(v) => Ok(v.into_iter().map(f64::from).collect()),
        EclData::Doub(v) => Ok(v),
        other => Err(EgridError::Format(format!(
            "{} of {} has type {}, expected REAL or DOUB",
            keyword,
            path.display(),
            String::from_utf8_lossy(other.type_tag()),
        ))),
    }
}
