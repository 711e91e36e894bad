//! Tables carried over from the first font as raw bytes, with a few fields
//! patched to reflect the merged glyph set.

use read_fonts::{FontRef, types::Tag};
use write_fonts::tables::loca::LocaFormat;

use crate::error::{MergeError, Result};

pub(crate) const HEAD: Tag = Tag::new(b"head");
pub(crate) const HHEA: Tag = Tag::new(b"hhea");
pub(crate) const MAXP: Tag = Tag::new(b"maxp");
pub(crate) const POST: Tag = Tag::new(b"post");
pub(crate) const OS2: Tag = Tag::new(b"OS/2");
pub(crate) const NAME: Tag = Tag::new(b"name");

/// Raw bytes of a table, or `MissingTable` if the font does not carry it.
pub(crate) fn raw_table(font: &FontRef, tag: Tag) -> Result<Vec<u8>> {
    font.table_data(tag)
        .map(|data| data.as_bytes().to_vec())
        .ok_or(MergeError::MissingTable(tag))
}

/// The first font's head table with `indexToLocFormat` patched to match the
/// rebuilt loca table. `checksumAdjustment` is zeroed since the merged font
/// is not checksummed.
pub(crate) fn head_bytes(font: &FontRef, loca_format: LocaFormat) -> Result<Vec<u8>> {
    let mut head = raw_table(font, HEAD)?;
    if head.len() < 54 {
        return Err(MergeError::MissingTable(HEAD));
    }
    head[8..12].copy_from_slice(&[0, 0, 0, 0]);
    let loca_format = match loca_format {
        LocaFormat::Short => 0u16,
        LocaFormat::Long => 1u16,
    };
    head[50..52].copy_from_slice(&loca_format.to_be_bytes());
    Ok(head)
}

/// The first font's hhea table with `numberOfHMetrics` patched.
pub(crate) fn hhea_bytes(font: &FontRef, num_h_metrics: u16) -> Result<Vec<u8>> {
    let mut hhea = raw_table(font, HHEA)?;
    if hhea.len() < 36 {
        return Err(MergeError::MissingTable(HHEA));
    }
    hhea[34..36].copy_from_slice(&num_h_metrics.to_be_bytes());
    Ok(hhea)
}

/// The first font's maxp table with `numGlyphs` patched.
///
/// For version 1.0 tables, the per-font maxima fields (maxPoints through
/// maxComponentDepth) are replaced with the fieldwise maximum across all
/// input fonts, so the merged values are safe upper bounds.
pub(crate) fn maxp_bytes(fonts: &[FontRef], num_glyphs: u16) -> Result<Vec<u8>> {
    let first = fonts.first().ok_or(MergeError::NoFonts)?;
    let mut maxp = raw_table(first, MAXP)?;
    if maxp.len() < 6 {
        return Err(MergeError::MissingTable(MAXP));
    }
    maxp[4..6].copy_from_slice(&num_glyphs.to_be_bytes());

    let is_v1 = maxp[0..4] == [0, 1, 0, 0];
    if is_v1 && maxp.len() >= 32 {
        for offset in (6..32).step_by(2) {
            let mut max = 0u16;
            for font in fonts {
                let Some(data) = font.table_data(MAXP) else { continue };
                let bytes = data.as_bytes();
                if bytes.len() >= offset + 2 {
                    let value = u16::from_be_bytes([bytes[offset], bytes[offset + 1]]);
                    max = max.max(value);
                }
            }
            maxp[offset..offset + 2].copy_from_slice(&max.to_be_bytes());
        }
    }

    Ok(maxp)
}

/// A version 3.0 post table based on the first font's header fields.
///
/// Version 3 carries no glyph names, which sidesteps reconciling name tables
/// across the merged fonts.
pub(crate) fn post_v3_bytes(font: &FontRef) -> Result<Vec<u8>> {
    let post = raw_table(font, POST)?;
    if post.len() < 32 {
        return Err(MergeError::MissingTable(POST));
    }
    let mut out = Vec::with_capacity(32);
    out.extend_from_slice(&0x0003_0000u32.to_be_bytes());
    out.extend_from_slice(&post[4..32]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_v3_keeps_header_fields() {
        // post v2.0 header with italicAngle, underline metrics, isFixedPitch
        let mut post = vec![0u8; 40];
        post[0..4].copy_from_slice(&0x0002_0000u32.to_be_bytes());
        post[4] = 0xAB;
        post[31] = 0xCD;

        let data = build_single_table_font(POST, &post);
        let font = FontRef::new(&data).unwrap();

        let out = post_v3_bytes(&font).unwrap();
        assert_eq!(out.len(), 32);
        assert_eq!(&out[0..4], &0x0003_0000u32.to_be_bytes());
        assert_eq!(out[4], 0xAB);
        assert_eq!(out[31], 0xCD);
    }

    #[test]
    fn missing_table_is_reported() {
        let data = build_single_table_font(POST, &[0u8; 32]);
        let font = FontRef::new(&data).unwrap();
        assert!(matches!(raw_table(&font, HEAD), Err(MergeError::MissingTable(t)) if t == HEAD));
    }

    fn build_single_table_font(tag: Tag, table: &[u8]) -> Vec<u8> {
        let mut builder = write_fonts::FontBuilder::new();
        builder.add_raw(tag, table.to_vec());
        builder.build()
    }
}
