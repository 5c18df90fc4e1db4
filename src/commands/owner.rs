//! Owner command implementation

use bundle_locator::error::Result;

use super::helpers;
use crate::cli::{LocateArgs, OwnerArgs};

/// Print the name of the bundle owning a path
pub fn run(locate: &LocateArgs, args: &OwnerArgs) -> Result<()> {
    let index = helpers::locate(locate)?;
    println!("{}", index.bundle_name_by_path(&args.path));
    Ok(())
}
