//! Track records, metadata extraction and expansion of user-supplied paths.

mod extract;
mod model;
mod scan;

pub use extract::{LoftyExtractor, MetadataExtractor};
pub use model::TrackRecord;
pub use scan::expand_paths;

#[cfg(test)]
mod tests;
