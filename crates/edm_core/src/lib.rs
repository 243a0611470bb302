//! Public library API for reading and writing version 8 `.edm` model containers.

/// EDM codec: primitive I/O, record registry, node/material model and file assembly.
pub mod edm;
