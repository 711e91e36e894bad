//! Table-specific merge implementations

pub(crate) mod cmap;
pub(crate) mod glyf;
pub(crate) mod hmtx;
pub(crate) mod passthrough;
