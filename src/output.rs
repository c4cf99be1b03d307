use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};

// ---------------------------------------------------------------------------
// Output file validation and display
// ---------------------------------------------------------------------------

/// Raster formats the bitmap backend writes and the `image` crate decodes.
const SUPPORTED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Whether the output path carries a supported raster-image extension.
pub fn supported_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .is_some_and(|e| SUPPORTED_EXTENSIONS.contains(&e.as_str()))
}

/// Reload the saved plot and hand it to the platform image viewer.
///
/// The reload proves the written file decodes. The viewer launch is
/// fire-and-forget: a failure (headless machine, no viewer installed) is
/// logged and ignored.
pub fn display_image(path: &Path) -> Result<()> {
    let img = image::open(path).with_context(|| format!("reopening {}", path.display()))?;
    info!(
        "saved {} ({}x{} px)",
        path.display(),
        img.width(),
        img.height()
    );
    if open::that(path).is_err() {
        warn!("no image viewer available for {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raster_extensions_are_supported() {
        assert!(supported_image_extension(Path::new("output.png")));
        assert!(supported_image_extension(Path::new("plot.JPG")));
        assert!(supported_image_extension(Path::new("plot.jpeg")));
        assert!(supported_image_extension(Path::new("plot.bmp")));
    }

    #[test]
    fn other_extensions_are_rejected() {
        assert!(!supported_image_extension(Path::new("output.txt")));
        assert!(!supported_image_extension(Path::new("output.svg")));
        assert!(!supported_image_extension(Path::new("output")));
        assert!(!supported_image_extension(Path::new("png")));
    }
}
