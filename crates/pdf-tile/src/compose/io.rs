//! File I/O for the caller layer

use crate::types::*;
use std::path::{Path, PathBuf};

/// Read a source PDF into memory
pub async fn load_source(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    Ok(tokio::fs::read(path).await?)
}

/// Write a composed PDF to disk
pub async fn save_output(bytes: &[u8], path: impl AsRef<Path>) -> Result<()> {
    tokio::fs::write(path, bytes).await?;
    Ok(())
}

/// Default output path: `<tiles>-up-<file name>` next to the input
pub fn tiled_output_path(input: &Path, tile_count: usize) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output.pdf".to_string());
    input.with_file_name(format!("{}-up-{}", tile_count, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiled_output_path() {
        assert_eq!(
            tiled_output_path(Path::new("checks/check.pdf"), 8),
            PathBuf::from("checks/8-up-check.pdf")
        );
        assert_eq!(
            tiled_output_path(Path::new("check.pdf"), 4),
            PathBuf::from("4-up-check.pdf")
        );
    }
}
