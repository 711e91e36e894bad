//! Output stylesheet generation.

use indexmap::IndexMap;

use crate::{
    codepoints::Codepoint,
    config::{CSS_PREAMBLE, FONT_FAMILY},
    subset::FontOutput,
};

/// Generate the stylesheet referencing the produced font files.
///
/// Emits one `@font-face` block with a source per manifest entry (in
/// manifest order), the static preamble, and one `.fa-{name}:before` rule
/// per mapping entry (in mapping order). Codepoint hex is emitted exactly as
/// captured from the release stylesheet.
pub fn generate_css(
    codepoints: &IndexMap<String, Codepoint>,
    outputs: &[FontOutput],
    font_dir_prefix: &str,
) -> String {
    let sources = outputs
        .iter()
        .map(|output| {
            format!(
                "    url('{font_dir_prefix}/{}') format('{}')",
                output.file_name,
                output.flavor.format_tag()
            )
        })
        .collect::<Vec<_>>()
        .join(",\n");

    let font_face =
        format!("@font-face {{\n  font-family: '{FONT_FAMILY}';\n  src:\n{sources};\n}}\n");

    let mut blocks = vec![font_face, CSS_PREAMBLE.to_string()];
    blocks.extend(codepoints.iter().map(|(icon, codepoint)| {
        format!(".fa-{icon}:before {{\n    content: \"\\{}\"; }}\n", codepoint.hex())
    }));

    blocks.join("\n")
}
