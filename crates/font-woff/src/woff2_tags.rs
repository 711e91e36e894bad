//! The WOFF2 known table tags.
//!
//! WOFF2 directory entries encode well-known tags as a 6-bit index instead of
//! four bytes; index 63 means the tag follows explicitly.

/// Known table tags in index order, per the WOFF2 specification.
const KNOWN_TAGS: [&[u8; 4]; 63] = [
    b"cmap", b"head", b"hhea", b"hmtx", b"maxp", b"name", b"OS/2", b"post", b"cvt ", b"fpgm",
    b"glyf", b"loca", b"prep", b"CFF ", b"VORG", b"EBDT", b"EBLC", b"gasp", b"hdmx", b"kern",
    b"LTSH", b"PCLT", b"VDMX", b"vhea", b"vmtx", b"BASE", b"GDEF", b"GPOS", b"GSUB", b"EBSC",
    b"JSTF", b"MATH", b"CBDT", b"CBLC", b"COLR", b"CPAL", b"SVG ", b"sbix", b"acnt", b"avar",
    b"bdat", b"bloc", b"bsln", b"cvar", b"fdsc", b"feat", b"fmtx", b"fvar", b"gvar", b"hsty",
    b"just", b"lcar", b"mort", b"morx", b"opbd", b"prop", b"trak", b"Zapf", b"Silf", b"Glat",
    b"Gloc", b"Feat", b"Sill",
];

/// Returns the known-tag index for `tag`, or `None` for arbitrary tags.
pub(crate) fn known_tag_index(tag: [u8; 4]) -> Option<u8> {
    KNOWN_TAGS.iter().position(|known| **known == tag).map(|i| i as u8)
}
