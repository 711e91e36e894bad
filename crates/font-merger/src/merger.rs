//! Merge orchestration.

use read_fonts::FontRef;
use write_fonts::FontBuilder;

use crate::{
    error::{MergeError, Result},
    glyph_map::GlyphMap,
    tables::{cmap, glyf, hmtx, passthrough},
};

/// Merges static TrueType fonts into one.
///
/// The first font is the base: its head, hhea, OS/2, name and post header
/// fields carry over, with glyph-count dependent fields patched. glyf, loca,
/// hmtx and cmap are rebuilt from all fonts.
#[derive(Debug, Default)]
pub struct Merger {}

impl Merger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&self, fonts: &[&[u8]]) -> Result<Vec<u8>> {
        if fonts.is_empty() {
            return Err(MergeError::NoFonts);
        }

        let fonts = fonts
            .iter()
            .map(|data| FontRef::new(data))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let glyph_map = GlyphMap::compute(&fonts)?;
        let num_glyphs = glyph_map.num_glyphs();
        log::debug!("merging {} fonts into {} glyphs", fonts.len(), num_glyphs);

        let (glyf, loca, loca_format) = glyf::merge_glyf(&fonts, &glyph_map)?;
        let hmtx = hmtx::merge_hmtx(&fonts, &glyph_map)?;
        let cmap = cmap::merge_cmap(&fonts, &glyph_map)?;

        let first = &fonts[0];
        let mut builder = FontBuilder::new();
        builder.add_table(&glyf)?;
        builder.add_table(&loca)?;
        builder.add_table(&hmtx)?;
        builder.add_table(&cmap)?;
        builder.add_raw(passthrough::HEAD, passthrough::head_bytes(first, loca_format)?);
        // Every merged glyph has a full long metric
        builder.add_raw(passthrough::HHEA, passthrough::hhea_bytes(first, num_glyphs)?);
        builder.add_raw(passthrough::MAXP, passthrough::maxp_bytes(&fonts, num_glyphs)?);
        builder.add_raw(passthrough::POST, passthrough::post_v3_bytes(first)?);

        for tag in [passthrough::OS2, passthrough::NAME] {
            if let Some(data) = first.table_data(tag) {
                builder.add_raw(tag, data.as_bytes().to_vec());
            }
        }

        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use read_fonts::{TableProvider, types::Tag};
    use write_fonts::tables::{
        glyf::{Bbox, GlyfLocaBuilder, Glyph, SimpleGlyph},
        hmtx::{Hmtx, LongMetric},
    };

    use super::*;

    /// A minimal two-glyph font: gid 0 is empty, gid 1 is a square mapped
    /// from `mapped` with the given advance width.
    fn build_test_font(mapped: char, advance: u16) -> Vec<u8> {
        let square = SimpleGlyph {
            bbox: Bbox { x_min: 0, y_min: 0, x_max: 100, y_max: 100 },
            contours: vec![
                vec![
                    read_fonts::tables::glyf::CurvePoint { x: 0, y: 0, on_curve: true },
                    read_fonts::tables::glyf::CurvePoint { x: 100, y: 0, on_curve: true },
                    read_fonts::tables::glyf::CurvePoint { x: 100, y: 100, on_curve: true },
                    read_fonts::tables::glyf::CurvePoint { x: 0, y: 100, on_curve: true },
                ]
                .into(),
            ],
            instructions: vec![],
        };

        let mut glyf_builder = GlyfLocaBuilder::new();
        glyf_builder.add_glyph(&Glyph::Empty).unwrap();
        glyf_builder.add_glyph(&Glyph::Simple(square)).unwrap();
        let (glyf, loca, loca_format) = glyf_builder.build();

        let cmap = write_fonts::tables::cmap::Cmap::from_mappings([(
            mapped,
            font_types::GlyphId::new(1),
        )])
        .unwrap();

        let hmtx = Hmtx {
            h_metrics: vec![
                LongMetric { advance: 0, side_bearing: 0 },
                LongMetric { advance, side_bearing: 0 },
            ],
            left_side_bearings: vec![],
        };

        let mut head = vec![0u8; 54];
        head[0..4].copy_from_slice(&0x0001_0000u32.to_be_bytes());
        head[12..16].copy_from_slice(&0x5F0F_3CF5u32.to_be_bytes());
        head[18..20].copy_from_slice(&1000u16.to_be_bytes());
        let loca_flag: u16 = match loca_format {
            write_fonts::tables::loca::LocaFormat::Short => 0,
            write_fonts::tables::loca::LocaFormat::Long => 1,
        };
        head[50..52].copy_from_slice(&loca_flag.to_be_bytes());

        let mut hhea = vec![0u8; 36];
        hhea[0..4].copy_from_slice(&0x0001_0000u32.to_be_bytes());
        hhea[34..36].copy_from_slice(&2u16.to_be_bytes());

        let mut maxp = vec![0u8; 6];
        maxp[0..4].copy_from_slice(&0x0000_5000u32.to_be_bytes());
        maxp[4..6].copy_from_slice(&2u16.to_be_bytes());

        let mut post = vec![0u8; 32];
        post[0..4].copy_from_slice(&0x0003_0000u32.to_be_bytes());

        let mut builder = FontBuilder::new();
        builder.add_table(&glyf).unwrap();
        builder.add_table(&loca).unwrap();
        builder.add_table(&cmap).unwrap();
        builder.add_table(&hmtx).unwrap();
        builder.add_raw(Tag::new(b"head"), head);
        builder.add_raw(Tag::new(b"hhea"), hhea);
        builder.add_raw(Tag::new(b"maxp"), maxp);
        builder.add_raw(Tag::new(b"post"), post);
        builder.build()
    }

    #[test]
    fn merges_two_fonts() {
        let font_a = build_test_font('A', 500);
        let font_b = build_test_font('B', 700);

        let merged = Merger::new().merge(&[&font_a, &font_b]).unwrap();
        let font = FontRef::new(&merged).unwrap();

        // 2 glyphs from the first font, 1 from the second (notdef collapses)
        assert_eq!(font.maxp().unwrap().num_glyphs(), 3);

        let cmap = font.cmap().unwrap();
        assert_eq!(cmap.map_codepoint('A').map(|g| g.to_u32()), Some(1));
        assert_eq!(cmap.map_codepoint('B').map(|g| g.to_u32()), Some(2));

        let hmtx = font.hmtx().unwrap();
        assert_eq!(hmtx.h_metrics().get(1).unwrap().advance.get(), 500);
        assert_eq!(hmtx.h_metrics().get(2).unwrap().advance.get(), 700);
    }

    #[test]
    fn earliest_font_wins_cmap_conflicts() {
        let font_a = build_test_font('A', 500);
        let font_b = build_test_font('A', 700);

        let merged = Merger::new().merge(&[&font_a, &font_b]).unwrap();
        let font = FontRef::new(&merged).unwrap();

        let cmap = font.cmap().unwrap();
        assert_eq!(cmap.map_codepoint('A').map(|g| g.to_u32()), Some(1));
    }

    #[test]
    fn no_fonts_is_an_error() {
        assert!(matches!(Merger::new().merge(&[]), Err(MergeError::NoFonts)));
    }

    #[test]
    fn post_is_downgraded_to_version_3() {
        let font_a = build_test_font('A', 500);
        let merged = Merger::new().merge(&[&font_a]).unwrap();
        let font = FontRef::new(&merged).unwrap();

        let post = font.table_data(Tag::new(b"post")).unwrap();
        assert_eq!(&post.as_bytes()[0..4], &0x0003_0000u32.to_be_bytes());
    }
}
