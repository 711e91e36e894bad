//! glyf table merging (TrueType outlines)
//!
//! Per-glyph hinting instructions are stripped from all fonts except the
//! first, matching fontTools behavior. Instructions may reference functions
//! in `fpgm` or values in `cvt` that are only copied from the first font.

use std::collections::HashSet;

use read_fonts::{FontRef, TableProvider, tables::glyf::Glyph as ReadGlyph};
use write_fonts::tables::{
    glyf::{
        Anchor, Bbox, Component, ComponentFlags, CompositeGlyph, Contour, Glyf, GlyfLocaBuilder,
        Glyph, SimpleGlyph, Transform,
    },
    loca::{Loca, LocaFormat},
};

use crate::{error::Result, glyph_map::GlyphMap};

/// Merge glyf tables from multiple fonts.
///
/// Returns the glyf table, loca table, and loca format. Component glyph
/// references are remapped into the merged glyph order.
pub(crate) fn merge_glyf(
    fonts: &[FontRef],
    glyph_map: &GlyphMap,
) -> Result<(Glyf, Loca, LocaFormat)> {
    let mut glyphs = Vec::with_capacity(glyph_map.sources().len());

    for &(font_idx, gid) in glyph_map.sources() {
        let font = &fonts[font_idx];
        let glyf = font.glyf()?;
        let loca = font.loca(None)?;

        let glyph = match loca.get_glyf(read_fonts::types::GlyphId::new(gid as u32), &glyf) {
            Ok(Some(g)) => g,
            _ => {
                glyphs.push(Glyph::Empty);
                continue;
            }
        };

        let strip_hinting = font_idx > 0;
        glyphs.push(convert_glyph(&glyph, font_idx, glyph_map, strip_hinting));
    }

    // OTS (used by Firefox) rejects composites referencing empty glyphs
    let empty_gids: HashSet<u16> = glyphs
        .iter()
        .enumerate()
        .filter_map(|(gid, g)| matches!(g, Glyph::Empty).then_some(gid as u16))
        .collect();

    for glyph in glyphs.iter_mut() {
        if let Glyph::Composite(composite) = glyph {
            let references_empty = composite
                .components()
                .iter()
                .any(|comp| empty_gids.contains(&comp.glyph.to_u16()));
            if references_empty {
                *glyph = Glyph::Empty;
            }
        }
    }

    let mut builder = GlyfLocaBuilder::new();
    for glyph in &glyphs {
        // Ignore validation errors for empty/invalid glyphs
        let _ = builder.add_glyph(glyph);
    }

    Ok(builder.build())
}

/// Convert a read-fonts glyph to a write-fonts glyph, remapping component
/// gids and optionally stripping instructions.
fn convert_glyph(
    glyph: &ReadGlyph,
    font_idx: usize,
    glyph_map: &GlyphMap,
    strip_hinting: bool,
) -> Glyph {
    match glyph {
        ReadGlyph::Simple(simple) => {
            let mut contours: Vec<Contour> = Vec::new();

            let end_pts = simple.end_pts_of_contours();
            let mut points_iter = simple.points();
            let mut current_point = 0usize;

            for end_pt in end_pts {
                let end = end_pt.get() as usize;
                let mut contour_points = Vec::new();

                while current_point <= end {
                    if let Some(pt) = points_iter.next() {
                        contour_points.push(read_fonts::tables::glyf::CurvePoint {
                            x: pt.x,
                            y: pt.y,
                            on_curve: pt.on_curve,
                        });
                    }
                    current_point += 1;
                }

                contours.push(contour_points.into());
            }

            let bbox = Bbox {
                x_min: simple.x_min(),
                y_min: simple.y_min(),
                x_max: simple.x_max(),
                y_max: simple.y_max(),
            };

            let instructions = if strip_hinting { vec![] } else { simple.instructions().to_vec() };

            Glyph::Simple(SimpleGlyph { bbox, contours, instructions })
        }
        ReadGlyph::Composite(composite) => {
            let mut components: Vec<Component> = Vec::new();

            for comp in composite.components() {
                let new_gid = glyph_map
                    .mega(font_idx, comp.glyph.to_u32() as u16)
                    .map(|m| m as u16)
                    .unwrap_or(0);

                let anchor = match comp.anchor {
                    read_fonts::tables::glyf::Anchor::Offset { x, y } => Anchor::Offset { x, y },
                    read_fonts::tables::glyf::Anchor::Point { base, component } => {
                        Anchor::Point { base, component }
                    }
                };

                let transform = Transform {
                    xx: comp.transform.xx,
                    yx: comp.transform.yx,
                    xy: comp.transform.xy,
                    yy: comp.transform.yy,
                };

                let flags: ComponentFlags = comp.flags.into();

                components.push(Component {
                    glyph: font_types::GlyphId16::new(new_gid),
                    anchor,
                    transform,
                    flags,
                });
            }

            if components.is_empty() {
                return Glyph::Empty;
            }

            let bbox = Bbox {
                x_min: composite.x_min(),
                y_min: composite.y_min(),
                x_max: composite.x_max(),
                y_max: composite.y_max(),
            };

            let first_component = components.remove(0);
            let mut composite_glyph = CompositeGlyph::new(first_component, bbox);

            for comp in components {
                composite_glyph.add_component(comp, bbox);
            }

            Glyph::Composite(composite_glyph)
        }
    }
}
