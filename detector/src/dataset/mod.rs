pub mod inria;
pub mod manifest;

pub use inria::read_inria_annotations;
pub use manifest::{Dataset, DatasetEntry};
