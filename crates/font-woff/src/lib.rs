//! WOFF and WOFF2 container encoding for sfnt font data.
//!
//! Both encoders take a complete TrueType font file and repackage its tables
//! into the corresponding web-font container. The font tables themselves are
//! carried through byte-for-byte: WOFF compresses each table individually
//! with zlib, WOFF2 compresses the whole table stream with brotli and marks
//! `glyf`/`loca` with the null transform so no outline re-encoding happens.
//!
//! # Example
//!
//! ```no_run
//! let ttf_data: Vec<u8> = std::fs::read("font.ttf").unwrap();
//! let woff2 = fasub_font_woff::to_woff2(&ttf_data).unwrap();
//! ```

use std::io::Write;

use anyhow::{Context, Result, bail};
use read_fonts::FontRef;

mod woff2_tags;

use woff2_tags::known_tag_index;

const WOFF_SIGNATURE: u32 = 0x_774F_4646; // 'wOFF'
const WOFF2_SIGNATURE: u32 = 0x_774F_4632; // 'wOF2'

const WOFF_HEADER_LEN: usize = 44;
const WOFF_DIR_ENTRY_LEN: usize = 20;
const WOFF2_HEADER_LEN: usize = 48;
const SFNT_HEADER_LEN: usize = 12;
const SFNT_DIR_ENTRY_LEN: usize = 16;

/// A table slice extracted from the input sfnt file.
struct SfntTable<'a> {
    tag: [u8; 4],
    checksum: u32,
    offset: usize,
    data: &'a [u8],
}

fn round4(len: usize) -> usize {
    (len + 3) & !3
}

fn write_u16(buffer: &mut Vec<u8>, value: u16) {
    buffer.extend_from_slice(&value.to_be_bytes());
}

fn write_u32(buffer: &mut Vec<u8>, value: u32) {
    buffer.extend_from_slice(&value.to_be_bytes());
}

fn write_uint_base128(buffer: &mut Vec<u8>, val: u32) {
    if val >= 1 << 28 {
        buffer.push(0x80 | (val >> 28) as u8);
    }
    if val >= 1 << 21 {
        buffer.push(0x80 | (val >> 21) as u8);
    }
    if val >= 1 << 14 {
        buffer.push(0x80 | (val >> 14) as u8);
    }
    if val >= 1 << 7 {
        buffer.push(0x80 | (val >> 7) as u8);
    }
    buffer.push((val & 127) as u8);
}

/// Parses the sfnt table directory and returns the flavor plus table slices
/// ordered by their physical offset in the file.
fn parse_sfnt(data: &[u8]) -> Result<(u32, Vec<SfntTable<'_>>)> {
    // Validate the font up front so corrupt input fails here rather than in
    // the container math.
    FontRef::new(data).context("failed to parse sfnt font")?;

    if data.len() < SFNT_HEADER_LEN {
        bail!("font data too short for an sfnt header");
    }
    let flavor = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);
    let num_tables = u16::from_be_bytes([data[4], data[5]]) as usize;

    let dir_end = SFNT_HEADER_LEN + num_tables * SFNT_DIR_ENTRY_LEN;
    if data.len() < dir_end {
        bail!("font data too short for its table directory");
    }

    let mut tables = Vec::with_capacity(num_tables);
    for i in 0..num_tables {
        let entry = &data[SFNT_HEADER_LEN + i * SFNT_DIR_ENTRY_LEN..][..SFNT_DIR_ENTRY_LEN];
        let tag = [entry[0], entry[1], entry[2], entry[3]];
        let checksum = u32::from_be_bytes([entry[4], entry[5], entry[6], entry[7]]);
        let offset = u32::from_be_bytes([entry[8], entry[9], entry[10], entry[11]]) as usize;
        let length = u32::from_be_bytes([entry[12], entry[13], entry[14], entry[15]]) as usize;

        let table_data = data
            .get(offset..offset + length)
            .with_context(|| format!("table {} extends past end of file", String::from_utf8_lossy(&tag)))?;
        tables.push(SfntTable { tag, checksum, offset, data: table_data });
    }

    // Table data is emitted in physical order so the WOFF2 stream matches the
    // directory order.
    tables.sort_by_key(|t| t.offset);
    Ok((flavor, tables))
}

/// The reconstructed sfnt size: header, directory, and 4-byte-aligned tables.
fn total_sfnt_size(tables: &[SfntTable<'_>]) -> usize {
    SFNT_HEADER_LEN
        + tables.len() * SFNT_DIR_ENTRY_LEN
        + tables.iter().map(|t| round4(t.data.len())).sum::<usize>()
}

/// Encodes sfnt font data as a WOFF (version 1) file.
///
/// Each table is zlib-compressed independently and stored raw when
/// compression does not shrink it, as the WOFF spec requires.
pub fn to_woff(data: &[u8]) -> Result<Vec<u8>> {
    let (flavor, mut tables) = parse_sfnt(data)?;
    // WOFF directory entries are sorted by tag.
    tables.sort_by_key(|t| t.tag);

    let mut compressed: Vec<Vec<u8>> = Vec::with_capacity(tables.len());
    for table in &tables {
        let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::best());
        encoder
            .write_all(table.data)
            .context("zlib compression failed")?;
        let deflated = encoder.finish().context("zlib compression failed")?;
        if deflated.len() < table.data.len() {
            compressed.push(deflated);
        } else {
            compressed.push(table.data.to_vec());
        }
    }

    let dir_len = tables.len() * WOFF_DIR_ENTRY_LEN;
    let stored_len: usize = compressed.iter().map(|c| round4(c.len())).sum();
    let file_len = WOFF_HEADER_LEN + dir_len + stored_len;

    let mut buffer = Vec::with_capacity(file_len);
    write_u32(&mut buffer, WOFF_SIGNATURE);
    write_u32(&mut buffer, flavor);
    write_u32(&mut buffer, u32::try_from(file_len).context("WOFF file too large")?);
    write_u16(&mut buffer, u16::try_from(tables.len()).context("too many tables")?);
    write_u16(&mut buffer, 0); // reserved
    write_u32(
        &mut buffer,
        u32::try_from(total_sfnt_size(&tables)).context("sfnt size overflow")?,
    );
    write_u16(&mut buffer, 1); // majorVersion
    write_u16(&mut buffer, 0); // minorVersion
    write_u32(&mut buffer, 0); // metaOffset
    write_u32(&mut buffer, 0); // metaLength
    write_u32(&mut buffer, 0); // metaOrigLength
    write_u32(&mut buffer, 0); // privOffset
    write_u32(&mut buffer, 0); // privLength
    debug_assert_eq!(buffer.len(), WOFF_HEADER_LEN);

    let mut data_offset = WOFF_HEADER_LEN + dir_len;
    for (table, stored) in tables.iter().zip(&compressed) {
        buffer.extend_from_slice(&table.tag);
        write_u32(&mut buffer, u32::try_from(data_offset).context("table offset overflow")?);
        write_u32(&mut buffer, stored.len() as u32);
        write_u32(&mut buffer, table.data.len() as u32);
        write_u32(&mut buffer, table.checksum);
        data_offset += round4(stored.len());
    }

    for stored in &compressed {
        buffer.extend_from_slice(stored);
        buffer.resize(round4(buffer.len()), 0);
    }

    debug_assert_eq!(buffer.len(), file_len);
    Ok(buffer)
}

/// Encodes sfnt font data as a WOFF2 file.
///
/// All tables are carried without transformation: `glyf` and `loca` are
/// marked with the null transform (version 3), so decoders reconstruct the
/// original outlines byte-for-byte. The whole table stream is compressed as a
/// single brotli stream.
pub fn to_woff2(data: &[u8]) -> Result<Vec<u8>> {
    const NULL_TRANSFORM: u8 = 0b_1100_0000;
    const ARBITRARY_TAG: u8 = 63;

    let (flavor, mut tables) = parse_sfnt(data)?;

    // WOFF2 requires the loca directory entry to immediately follow glyf,
    // regardless of where the input file placed them. Decoders reject files
    // that violate this, and OpenType's recommended layout puts loca first.
    if let Some(glyf_idx) = tables.iter().position(|t| &t.tag == b"glyf")
        && let Some(loca_idx) = tables.iter().position(|t| &t.tag == b"loca")
        && loca_idx != glyf_idx + 1
    {
        let loca = tables.remove(loca_idx);
        let glyf_idx = if loca_idx < glyf_idx { glyf_idx - 1 } else { glyf_idx };
        tables.insert(glyf_idx + 1, loca);
    }

    let mut stream = Vec::new();
    for table in &tables {
        stream.extend_from_slice(table.data);
    }
    let mut compressed = Vec::new();
    brotli::enc::BrotliCompress(
        &mut stream.as_slice(),
        &mut compressed,
        &brotli::enc::BrotliEncoderParams::default(),
    )
    .context("brotli compression failed")?;

    let mut directory = Vec::new();
    for table in &tables {
        match known_tag_index(table.tag) {
            Some(index) if &table.tag == b"glyf" || &table.tag == b"loca" => {
                directory.push(index | NULL_TRANSFORM);
            }
            Some(index) => directory.push(index),
            None => {
                directory.push(ARBITRARY_TAG);
                directory.extend_from_slice(&table.tag);
            }
        }
        write_uint_base128(&mut directory, table.data.len() as u32);
    }

    let mut file_len = WOFF2_HEADER_LEN + directory.len() + compressed.len();
    file_len = round4(file_len);

    let mut buffer = Vec::with_capacity(file_len);
    write_u32(&mut buffer, WOFF2_SIGNATURE);
    write_u32(&mut buffer, flavor);
    write_u32(&mut buffer, u32::try_from(file_len).context("WOFF2 file too large")?);
    write_u16(&mut buffer, u16::try_from(tables.len()).context("too many tables")?);
    write_u16(&mut buffer, 0); // reserved
    write_u32(
        &mut buffer,
        u32::try_from(total_sfnt_size(&tables)).context("sfnt size overflow")?,
    );
    write_u32(&mut buffer, compressed.len() as u32);
    write_u16(&mut buffer, 1); // majorVersion
    write_u16(&mut buffer, 0); // minorVersion
    write_u32(&mut buffer, 0); // metaOffset
    write_u32(&mut buffer, 0); // metaLength
    write_u32(&mut buffer, 0); // metaOrigLength
    write_u32(&mut buffer, 0); // privOffset
    write_u32(&mut buffer, 0); // privLength
    debug_assert_eq!(buffer.len(), WOFF2_HEADER_LEN);

    buffer.extend_from_slice(&directory);
    buffer.extend_from_slice(&compressed);
    buffer.resize(file_len, 0);
    Ok(buffer)
}
