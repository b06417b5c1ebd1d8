use std::path::Path;

use crate::core::InvoiceError;

/// Decoded logo pixels, ready for embedding as an 8-bit RGB image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logo {
    pub width: u32,
    pub height: u32,
    /// Row-major RGB triples.
    pub rgb: Vec<u8>,
}

impl Logo {
    /// Decode a JPEG or PNG file.
    pub fn load(path: &Path) -> Result<Self, InvoiceError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
            .map_err(|e| InvoiceError::Render(format!("logo {}: {e}", path.display())))
    }

    /// Decode an in-memory JPEG or PNG.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, InvoiceError> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| InvoiceError::Render(format!("cannot decode image: {e}")))?
            .to_rgb8();
        Ok(Self {
            width: image.width(),
            height: image.height(),
            rgb: image.into_raw(),
        })
    }
}

/// Load the logo if one is configured and readable.
///
/// Never fails: an unreadable or undecodable file is logged and skipped so
/// the invoice renders without it.
pub fn load_logo_or_skip(path: Option<&Path>) -> Option<Logo> {
    let path = path?;
    match Logo::load(path) {
        Ok(logo) => {
            tracing::debug!(path = %path.display(), width = logo.width, height = logo.height, "logo loaded");
            Some(logo)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "logo not available, skipping");
            None
        }
    }
}
