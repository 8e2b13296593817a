//! Shape renderers.

pub mod stroke;
