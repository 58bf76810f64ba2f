//! Playlist sequencing: the ordered track list, the current index and
//! circular next/previous navigation.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
