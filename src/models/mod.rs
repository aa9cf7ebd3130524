pub mod app;
pub mod outcome;
pub mod settings;

pub use app::*;
pub use outcome::*;
pub use settings::*;
