//! Fortran-blocked binary record codec.
//!
//! Grid files are sequences of records. Each record starts with a
//! 16-byte header sub-record (8-byte space-padded keyword, element
//! count, 4-byte type tag) followed by data blocks of at most 1000
//! elements (105 for CHAR). Every sub-record and data block is framed
//! by its byte count as a big-endian i32, the unformatted-Fortran
//! convention.

use std::io::{self, Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::io::EgridError;

/// Maximum elements per numeric data block.
const NUMERIC_BLOCK: usize = 1000;

/// Maximum elements per CHAR data block.
const CHAR_BLOCK: usize = 105;

/// Bytes per CHAR element, space-padded.
const CHAR_WIDTH: usize = 8;

/// Byte length of the header sub-record.
const HEADER_BYTES: i32 = 16;

/// Typed payload of one record.
#[derive(Clone, Debug, PartialEq)]
pub enum EclData {
    /// INTE: 32-bit integers.
    Inte(Vec<i32>),
    /// REAL: 32-bit floats.
    Real(Vec<f32>),
    /// DOUB: 64-bit floats.
    Doub(Vec<f64>),
    /// CHAR: 8-character space-padded strings.
    Char(Vec<String>),
    /// LOGI: 32-bit Fortran logicals.
    Logi(Vec<i32>),
    /// MESS: marker record without data.
    Mess,
}

impl EclData {
    /// The 4-byte type tag written to the record header.
    pub fn type_tag(&self) -> &'static [u8; 4] {
        match self {
            EclData::Inte(_) => b"INTE",
            EclData::Real(_) => b"REAL",
            EclData::Doub(_) => b"DOUB",
            EclData::Char(_) => b"CHAR",
            EclData::Logi(_) => b"LOGI",
            EclData::Mess => b"MESS",
        }
    }

    /// Number of elements in the payload.
    pub fn len(&self) -> usize {
        match self {
            EclData::Inte(v) => v.len(),
            EclData::Real(v) => v.len(),
            EclData::Doub(v) => v.len(),
            EclData::Char(v) => v.len(),
            EclData::Logi(v) => v.len(),
            EclData::Mess => 0,
        }
    }

    /// Whether the payload holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn element_bytes(&self) -> usize {
        match self {
            EclData::Inte(_) | EclData::Real(_) | EclData::Logi(_) => 4,
            EclData::Doub(_) | EclData::Char(_) => 8,
            EclData::Mess => 0,
        }
    }

    fn block_elements(&self) -> usize {
        match self {
            EclData::Char(_) => CHAR_BLOCK,
            _ => NUMERIC_BLOCK,
        }
    }
}

/// Write one keyword record. Keywords longer than 8 bytes are
/// truncated, shorter ones space-padded.
pub fn write_record<W: Write>(w: &mut W, keyword: &str, data: &EclData) -> Result<(), EgridError> {
    let mut name = [b' '; 8];
    for (dst, src) in name.iter_mut().zip(keyword.bytes()) {
        *dst = src;
    }

    w.write_i32::<BigEndian>(HEADER_BYTES)?;
    w.write_all(&name)?;
    w.write_i32::<BigEndian>(data.len() as i32)?;
    w.write_all(data.type_tag())?;
    w.write_i32::<BigEndian>(HEADER_BYTES)?;

    if let EclData::Mess = data {
        return Ok(());
    }

    let block = data.block_elements();
    let elem_bytes = data.element_bytes();
    for start in (0..data.len()).step_by(block.max(1)) {
        let end = (start + block).min(data.len());
        let nbytes = ((end - start) * elem_bytes) as i32;
        w.write_i32::<BigEndian>(nbytes)?;
        match data {
            EclData::Inte(v) | EclData::Logi(v) => {
                for &x in &v[start..end] {
                    w.write_i32::<BigEndian>(x)?;
                }
            }
            EclData::Real(v) => {
                for &x in &v[start..end] {
                    w.write_f32::<BigEndian>(x)?;
                }
            }
            EclData::Doub(v) => {
                for &x in &v[start..end] {
                    w.write_f64::<BigEndian>(x)?;
                }
            }
            EclData::Char(v) => {
                for s in &v[start..end] {
                    let mut cell = [b' '; CHAR_WIDTH];
                    for (dst, src) in cell.iter_mut().zip(s.bytes()) {
                        *dst = src;
                    }
                    w.write_all(&cell)?;
                }
            }
            EclData::Mess => unreachable!("handled above"),
        }
        w.write_i32::<BigEndian>(nbytes)?;
    }

    // An empty record still carries one zero-length data block.
    if data.is_empty() {
        w.write_i32::<BigEndian>(0)?;
        w.write_i32::<BigEndian>(0)?;
    }

    Ok(())
}

/// Read the next keyword record, or `None` at a clean end of file.
///
/// # Errors
///
/// [`EgridError::Format`] for inconsistent frame markers or unknown
/// type tags; [`EgridError::Io`] on truncated input.
pub fn read_record<R: Read>(r: &mut R) -> Result<Option<(String, EclData)>, EgridError> {
    let lead = match r.read_i32::<BigEndian>() {
        Ok(n) => n,
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    if lead != HEADER_BYTES {
        return Err(EgridError::Format(format!(
            "record header marker {} (expected {})",
            lead, HEADER_BYTES
        )));
    }

    let mut name = [0u8; 8];
    r.read_exact(&mut name)?;
    let keyword = String::from_utf8_lossy(&name).trim_end().to_string();

    let count = r.read_i32::<BigEndian>()?;
    if count < 0 {
        return Err(EgridError::Format(format!(
            "negative element count {} for keyword {}",
            count, keyword
        )));
    }
    let count = count as usize;

    let mut tag = [0u8; 4];
    r.read_exact(&mut tag)?;
    let tail = r.read_i32::<BigEndian>()?;
    if tail != HEADER_BYTES {
        return Err(EgridError::Format(format!(
            "record header trailer {} for keyword {}",
            tail, keyword
        )));
    }

    let data = match &tag {
        b"MESS" => EclData::Mess,
        b"INTE" => EclData::Inte(read_blocks(r, count, 4, |r| r.read_i32::<BigEndian>())?),
        b"LOGI" => EclData::Logi(read_blocks(r, count, 4, |r| r.read_i32::<BigEndian>())?),
        b"REAL" => EclData::Real(read_blocks(r, count, 4, |r| r.read_f32::<BigEndian>())?),
        b"DOUB" => EclData::Doub(read_blocks(r, count, 8, |r| r.read_f64::<BigEndian>())?),
        b"CHAR" => EclData::Char(read_blocks(r, count, CHAR_WIDTH, |r| {
            let mut cell = [0u8; CHAR_WIDTH];
            r.read_exact(&mut cell)?;
            Ok(String::from_utf8_lossy(&cell).trim_end().to_string())
        })?),
        other => {
            return Err(EgridError::Format(format!(
                "unknown type tag {:?} for keyword {}",
                String::from_utf8_lossy(other),
                keyword
            )));
        }
    };

    Ok(Some((keyword, data)))
}

fn read_blocks<R, T, F>(
    r: &mut R,
    count: usize,
    elem_bytes: usize,
    mut read_one: F,
) -> Result<Vec<T>, EgridError>
where
    R: Read,
    F: FnMut(&mut R) -> io::Result<T>,
{
    let mut out = Vec::with_capacity(count);
    loop {
        let nbytes = r.read_i32::<BigEndian>()?;
        if nbytes < 0 || nbytes as usize % elem_bytes != 0 {
            return Err(EgridError::Format(format!(
                "data block of {} bytes not a multiple of the {}-byte element size",
                nbytes, elem_bytes
            )));
        }
        let elements = nbytes as usize / elem_bytes;
        if out.len() + elements > count {
            return Err(EgridError::Format(format!(
                "data blocks overrun the declared element count {}",
                count
            )));
        }
        for _ in 0..elements {
            out.push(read_one(r)?);
        }
        let trailer = r.read_i32::<BigEndian>()?;
        if trailer != nbytes {
            return Err(EgridError::Format(format!(
                "data block trailer {} disagrees with leader {}",
                trailer, nbytes
            )));
        }
        if out.len() == count {
            return Ok(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn roundtrip(keyword: &str, data: EclData) -> (String, EclData) {
        let mut buf = Vec::new();
        write_record(&mut buf, keyword, &data).unwrap();
        read_record(&mut Cursor::new(buf)).unwrap().unwrap()
    }

    #[test]
    fn test_inte_roundtrip() {
        let (kw, data) = roundtrip("GRIDHEAD", EclData::Inte(vec![1, 4, 3, 2]));
        assert_eq!(kw, "GRIDHEAD");
        assert_eq!(data, EclData::Inte(vec![1, 4, 3, 2]));
    }

    #[test]
    fn test_real_multi_block() {
        // 2500 elements span three 1000-element blocks.
        let values: Vec<f32> = (0..2500).map(|i| i as f32 * 0.5).collect();
        let (kw, data) = roundtrip("COORD", EclData::Real(values.clone()));
        assert_eq!(kw, "COORD");
        assert_eq!(data, EclData::Real(values));
    }

    #[test]
    fn test_doub_roundtrip() {
        let values = vec![1.25e8, -3.5, 0.0];
        let (_, data) = roundtrip("ZCORN", EclData::Doub(values.clone()));
        assert_eq!(data, EclData::Doub(values));
    }

    #[test]
    fn test_char_padding_and_trim() {
        let (kw, data) = roundtrip(
            "GRIDUNIT",
            EclData::Char(vec!["METRES".to_string(), "".to_string()]),
        );
        assert_eq!(kw, "GRIDUNIT");
        assert_eq!(
            data,
            EclData::Char(vec!["METRES".to_string(), "".to_string()])
        );
    }

    #[test]
    fn test_empty_record() {
        let (kw, data) = roundtrip("ENDGRID", EclData::Inte(Vec::new()));
        assert_eq!(kw, "ENDGRID");
        assert_eq!(data, EclData::Inte(Vec::new()));
    }

    #[test]
    fn test_mess_record() {
        let (_, data) = roundtrip("ARRAYMAX", EclData::Mess);
        assert_eq!(data, EclData::Mess);
    }

    #[test]
    fn test_stream_of_records() {
        let mut buf = Vec::new();
        write_record(&mut buf, "FILEHEAD", &EclData::Inte(vec![3, 2007])).unwrap();
        write_record(&mut buf, "GRIDUNIT", &EclData::Char(vec!["FEET".to_string()])).unwrap();
        let mut cursor = Cursor::new(buf);
        let (kw1, _) = read_record(&mut cursor).unwrap().unwrap();
        let (kw2, _) = read_record(&mut cursor).unwrap().unwrap();
        assert_eq!((kw1.as_str(), kw2.as_str()), ("FILEHEAD", "GRIDUNIT"));
        assert!(read_record(&mut cursor).unwrap().is_none());
    }

    #[test]
    fn test_unknown_type_tag_fatal() {
        let mut buf = Vec::new();
        write_record(&mut buf, "WEIRD", &EclData::Inte(vec![1])).unwrap();
        // Corrupt the type tag bytes in the header sub-record.
        buf[16..20].copy_from_slice(b"XXXX");
        let err = read_record(&mut Cursor::new(buf)).unwrap_err();
        assert!(matches!(err, EgridError::Format(_)));
    }

    #[test]
    fn test_bad_frame_marker_fatal() {
        let mut buf = Vec::new();
        write_record(&mut buf, "COORD", &EclData::Real(vec![1.0])).unwrap();
        buf[0..4].copy_from_slice(&99i32.to_be_bytes());
        let err = read_record(&mut Cursor::new(buf)).unwrap_err();
        assert!(matches!(err, EgridError::Format(_)));
    }

    #[test]
    fn test_truncated_input_is_io_error() {
        let mut buf = Vec::new();
        write_record(&mut buf, "ZCORN", &EclData::Doub(vec![1.0, 2.0])).unwrap();
        buf.truncate(buf.len() - 6);
        let err = read_record(&mut Cursor::new(buf)).unwrap_err();
        assert!(matches!(err, EgridError::Io(_)));
    }
}
