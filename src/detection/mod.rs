pub mod bundle_reader;
pub mod conflicts;
pub mod disk_image;
pub mod location;
pub mod target;
pub mod version_compare;
