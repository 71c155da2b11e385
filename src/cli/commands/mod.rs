//! CLI command implementations

pub mod check;
pub mod config;
pub mod load;
pub mod resources;

pub use check::execute as check;
pub use config::execute as config;
pub use load::execute as load;
pub use resources::execute as resources;
