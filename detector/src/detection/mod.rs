pub mod bounding_box;
pub mod classifier;
pub mod lbp;
pub mod nms;
pub mod params;
pub mod pyramid;
