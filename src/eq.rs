//! Parametric equalizer: peaking-EQ coefficient design and the band bank.
//!
//! Only coefficients are computed here. Nothing in the crate filters samples
//! with them; they are kept per band and reported to the console.

mod bands;
mod design;

pub use bands::*;
pub use design::*;
