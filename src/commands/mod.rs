pub mod relocate;

pub use relocate::{is_move_in_progress, move_to_applications_folder, Relocator};
