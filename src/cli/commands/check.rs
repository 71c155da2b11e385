//! Check command - test a path against the sandbox

use crate::cli::args::CheckArgs;
use crate::error::DictResult;
use crate::sandbox::Sandbox;

/// Execute the check command
///
/// Prints the canonical path when it is inside an authorized root.
pub fn execute(args: CheckArgs, sandbox: &Sandbox) -> DictResult<()> {
    let canonical = sandbox.ensure_inside_authorized_root(&args.path)?;
    println!("{}", canonical.display());
    Ok(())
}
