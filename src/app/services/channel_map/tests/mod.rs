//! Shared test utilities and fixtures for channel map tests

use std::fs;
use std::path::{Path, PathBuf};


/// A few channels spread over two planes, two WIBs and two crates
pub const TEST_TABLE_TEXT: &str = "\
# offlchan crate APAName wib link femb_on_link cebchan plane chan_in_plane femb asic asicchan wibframechan
0 4 APA_P02SU 1 0 0 0 0 0 1 1 0 0
1 4 APA_P02SU 1 0 0 1 0 1 1 1 1 1

800 4 APA_P02SU 3 1 1 64 1 0 6 5 0 192
2560 2 APA_P01SU 1 0 0 0 2 0 1 3 0 40
";

/// Write a channel table file into `dir`
pub fn create_test_table_file(dir: &Path, filename: &str, content: &str) -> std::io::Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Lay out a share directory holding the PD2HD table at its versioned path
pub fn create_test_share_dir(root: &Path) -> std::io::Result<PathBuf> {
    let table_dir = root.join("config").join("pd2hd");
    fs::create_dir_all(&table_dir)?;
    create_test_table_file(&table_dir, "PD2HDChannelMap_v6.txt", TEST_TABLE_TEXT)?;
    Ok(root.to_path_buf())
}
