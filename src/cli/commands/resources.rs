//! Resources command - list bundled dictionaries

use crate::dictionary::BundledResources;
use crate::error::DictResult;

/// Execute the resources command
pub fn execute() -> DictResult<()> {
    for path in BundledResources::paths() {
        println!("{}", path);
    }
    Ok(())
}
