//! EGRID save/load round-trips through real files.

use std::fs::File;
use std::io::BufReader;

use approx::assert_relative_eq;
use cpgrid::io::eclbin::{read_record, EclData};
use cpgrid::io::{egrid, EgridError};
use cpgrid::{CornerPointGrid, GridDims, GridKeywords, NncPair, UnitSystem};

/// Integer-valued geometry survives the f32 record format exactly.
fn integer_grid() -> CornerPointGrid {
    CornerPointGrid::regular(GridDims::new(4, 3, 2), 8.0, 16.0, 2.0)
}

#[test]
fn roundtrip_preserves_equality() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("case.egrid");
    let mut grid = integer_grid();
    grid.reset_actnum(&{
        let mut flags = vec![1; 24];
        flags[5] = 0;
        flags[17] = 0;
        flags
    })
    .unwrap();

    egrid::save(&path, &grid, &[]).unwrap();
    let loaded = egrid::load_grid(&path).unwrap();

    assert!(grid.equal(&loaded));
    assert_eq!(loaded.num_active(), 22);
    assert_relative_eq!(loaded.cell_volume(0, 0, 0).unwrap(), 256.0, epsilon = 1e-9);
}

#[test]
fn roundtrip_with_mapaxes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mapped.egrid");

    let dims = GridDims::new(2, 2, 1);
    let keywords = GridKeywords {
        dx: Some(vec![8.0; 4]),
        dy: Some(vec![8.0; 4]),
        dz: Some(vec![4.0; 4]),
        tops: Some(vec![64.0; 4]),
        mapaxes: Some([0.0, 100.0, 0.0, 0.0, 100.0, 0.0]),
        mapunits: Some("METRES".to_string()),
        ..GridKeywords::default()
    };
    let grid = CornerPointGrid::from_keywords(dims, &keywords).unwrap();
    egrid::save(&path, &grid, &[]).unwrap();

    let loaded = egrid::load_grid(&path).unwrap();
    assert!(grid.equal(&loaded));
    let mapaxes = loaded.mapaxes().unwrap();
    assert_eq!(mapaxes.input(), [0.0, 100.0, 0.0, 0.0, 100.0, 0.0]);
    assert_eq!(mapaxes.mapunits(), Some("METRES"));
}

#[test]
fn field_units_convert_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("field.egrid");

    let dims = GridDims::new(2, 1, 1);
    let keywords = GridKeywords {
        dx: Some(vec![0.3048 * 100.0; 2]),
        dy: Some(vec![0.3048 * 100.0; 2]),
        dz: Some(vec![0.3048 * 10.0; 2]),
        tops: Some(vec![0.3048 * 5000.0; 2]),
        units: UnitSystem::Field,
        ..GridKeywords::default()
    };
    let grid = CornerPointGrid::from_keywords(dims, &keywords).unwrap();
    egrid::save(&path, &grid, &[]).unwrap();

    // The file carries FEET; loading converts back to SI metres.
    let import = egrid::load(&path).unwrap();
    assert_eq!(import.units, UnitSystem::Field);
    let loaded = egrid::load_grid(&path).unwrap();
    assert_eq!(loaded.units(), UnitSystem::Field);
    assert_relative_eq!(
        loaded.cell_volume(0, 0, 0).unwrap(),
        grid.cell_volume(0, 0, 0).unwrap(),
        epsilon = 1e-3
    );
}

#[test]
fn explicit_actnum_overrides_file_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flags.egrid");

    let dims = GridDims::new(2, 2, 1);
    let mut grid = CornerPointGrid::regular(dims, 10.0, 10.0, 10.0);
    grid.reset_actnum(&[1, 1, 0, 0]).unwrap();
    egrid::save(&path, &grid, &[]).unwrap();

    let import = egrid::load(&path).unwrap();
    assert_eq!(import.actnum.as_deref(), Some(&[1, 1, 0, 0][..]));

    // A conflicting explicit ACTNUM payload wins over the file record.
    let keywords = GridKeywords {
        gdfile: Some(import),
        actnum: Some(vec![0, 1, 1, 1]),
        ..GridKeywords::default()
    };
    let rebuilt = CornerPointGrid::from_keywords(dims, &keywords).unwrap();
    assert_eq!(rebuilt.num_active(), 3);
    assert!(!rebuilt.cell_active(0, 0, 0).unwrap());
    assert!(rebuilt.cell_active(1, 1, 0).unwrap());

    // Without the payload the file record applies.
    let keywords = GridKeywords {
        gdfile: Some(egrid::load(&path).unwrap()),
        ..GridKeywords::default()
    };
    let rebuilt = CornerPointGrid::from_keywords(dims, &keywords).unwrap();
    assert_eq!(rebuilt.num_active(), 2);
    assert!(rebuilt.cell_active(0, 0, 0).unwrap());
}

#[test]
fn record_sequence_and_nnc() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nnc.egrid");
    let grid = integer_grid();
    let nnc = [
        NncPair { cell1: 0, cell2: 13 },
        NncPair { cell1: 4, cell2: 21 },
    ];
    egrid::save(&path, &grid, &nnc).unwrap();

    let mut r = BufReader::new(File::open(&path).unwrap());
    let mut keywords = Vec::new();
    let mut nnc1 = None;
    let mut nnc2 = None;
    let mut nnchead = None;
    while let Some((keyword, data)) = read_record(&mut r).unwrap() {
        match (keyword.as_str(), &data) {
            ("NNC1", EclData::Inte(v)) => nnc1 = Some(v.clone()),
            ("NNC2", EclData::Inte(v)) => nnc2 = Some(v.clone()),
            ("NNCHEAD", EclData::Inte(v)) => nnchead = Some(v.clone()),
            _ => {}
        }
        keywords.push(keyword);
    }

    assert_eq!(
        keywords,
        vec![
            "FILEHEAD", "GRIDUNIT", "GRIDHEAD", "COORD", "ZCORN", "ACTNUM", "ENDGRID",
            "NNCHEAD", "NNC1", "NNC2",
        ]
    );
    assert_eq!(nnchead.unwrap()[0], 2);
    // Connections are written 1-based.
    assert_eq!(nnc1.unwrap(), vec![1, 5]);
    assert_eq!(nnc2.unwrap(), vec![14, 22]);
}

#[test]
fn filehead_and_gridhead_markers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("head.egrid");
    egrid::save(&path, &integer_grid(), &[]).unwrap();

    let mut r = BufReader::new(File::open(&path).unwrap());
    let (keyword, data) = read_record(&mut r).unwrap().unwrap();
    assert_eq!(keyword, "FILEHEAD");
    let EclData::Inte(filehead) = data else {
        panic!("FILEHEAD must be INTE");
    };
    assert_eq!(filehead.len(), 100);
    assert_eq!((filehead[0], filehead[1], filehead[6]), (3, 2007, 1));

    while let Some((keyword, data)) = read_record(&mut r).unwrap() {
        if keyword == "GRIDHEAD" {
            let EclData::Inte(head) = data else {
                panic!("GRIDHEAD must be INTE");
            };
            assert_eq!(head[0], 1);
            assert_eq!(&head[1..4], &[4, 3, 2]);
            assert_eq!(head[24], 1);
            return;
        }
    }
    panic!("no GRIDHEAD record written");
}

#[test]
fn missing_gridunit_is_fatal() {
    use cpgrid::io::eclbin::write_record;
    use std::io::BufWriter;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nounit.egrid");
    {
        let mut w = BufWriter::new(File::create(&path).unwrap());
        let mut head = vec![0i32; 100];
        head[1] = 1;
        head[2] = 1;
        head[3] = 1;
        write_record(&mut w, "GRIDHEAD", &EclData::Inte(head)).unwrap();
        write_record(&mut w, "COORD", &EclData::Real(vec![0.0; 24])).unwrap();
        write_record(&mut w, "ZCORN", &EclData::Real(vec![0.0; 8])).unwrap();
    }

    let err = egrid::load(&path).unwrap_err();
    match err {
        EgridError::MissingKeyword { keyword, .. } => assert_eq!(keyword, "GRIDUNIT"),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn nonexistent_file_is_io_error() {
    let err = egrid::load(std::path::Path::new("/nonexistent/grid.egrid")).unwrap_err();
    assert!(matches!(err, EgridError::Io(_)));
}
