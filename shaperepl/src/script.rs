use crate::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Extension of script files.
pub const EXTENSION: &str = "shp";

pub fn is_script(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == EXTENSION)
}

/// Open a script for reading line by line.
///
/// Paths without the script extension are refused
/// without accessing the file system.
pub fn open(path: &Path) -> Result<impl BufRead, Error> {
    if !is_script(path) {
        return Err(Error::NotAScript(path.to_path_buf()));
    }
    Ok(BufReader::new(File::open(path)?))
}

#[test]
fn extension() {
    assert!(is_script(Path::new("demos/swap.shp")));
    assert!(is_script(Path::new("swap.shp")));
    assert!(!is_script(Path::new("swap.txt")));
    assert!(!is_script(Path::new("swap")));
    assert!(!is_script(Path::new("shp")));
    assert!(matches!(open(Path::new("missing.txt")), Err(Error::NotAScript(_))));
    assert!(matches!(open(Path::new("missing.shp")), Err(Error::Io(_))));
}
