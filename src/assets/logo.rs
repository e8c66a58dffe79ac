use std::path::Path;

use crate::assets::decode::{self, PreparedImage};

/// The shared watermark logo: loaded once, read-only afterwards.
///
/// Renders never wait on the logo. `Pending` and `Failed` both compose to
/// "skip the logo draw", so a missing or broken logo degrades the output
/// instead of failing the session.
#[derive(Clone, Debug, Default)]
pub enum LogoAsset {
    /// Not loaded yet.
    #[default]
    Pending,
    /// Decoded and ready to stamp.
    Ready(PreparedImage),
    /// Load or decode failed; skipped for the rest of the session.
    Failed,
}

impl LogoAsset {
    pub fn pending() -> Self {
        Self::Pending
    }

    /// Decode logo bytes, routing `.svg` through the SVG rasterizer and
    /// everything else through the raster decoder.
    pub fn from_bytes(name: &str, bytes: &[u8]) -> Self {
        let is_svg = Path::new(name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
        let decoded = if is_svg {
            decode::rasterize_svg(bytes)
        } else {
            decode::decode_image(bytes)
        };

        match decoded {
            Ok(img) => Self::Ready(img),
            Err(err) => {
                tracing::warn!(%err, logo = name, "logo decode failed, continuing without a logo");
                Self::Failed
            }
        }
    }

    /// Read and decode the logo file at `path`.
    pub fn load_from_path(path: &Path) -> Self {
        match std::fs::read(path) {
            Ok(bytes) => Self::from_bytes(&path.to_string_lossy(), &bytes),
            Err(err) => {
                tracing::warn!(%err, logo = %path.display(), "logo read failed, continuing without a logo");
                Self::Failed
            }
        }
    }

    /// The decoded logo pixels, when ready.
    pub fn image(&self) -> Option<&PreparedImage> {
        match self {
            Self::Ready(img) => Some(img),
            Self::Pending | Self::Failed => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}
