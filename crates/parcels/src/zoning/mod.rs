mod classify;
mod systems;


pub use classify::{apply_zoning, classify, ZoningOutcome};
pub use systems::reclassify_changed_parcels;
