use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;

use crate::config::QrConfig;

pub const DATA_URL_PREFIX: &str = "data:image/png;base64,";

#[derive(Debug, thiserror::Error)]
pub enum QrError {
    #[error("unable to encode qr code: {0}")]
    Encode(#[from] qrcode::types::QrError),
    #[error("unable to render qr image: {0}")]
    Render(#[from] image::ImageError),
}

/// Renders check-in payloads as PNG QR codes embedded in data URLs.
#[derive(Debug, Clone, Copy)]
pub struct QrRenderer {
    min_dimension: u32,
}

impl QrRenderer {
    pub fn new(config: QrConfig) -> Self {
        Self {
            min_dimension: config.min_dimension,
        }
    }

    pub fn data_url(&self, payload: &str) -> Result<String, QrError> {
        let code = QrCode::new(payload.as_bytes())?;
        let image = code
            .render::<Luma<u8>>()
            .min_dimensions(self.min_dimension, self.min_dimension)
            .build();

        let mut png = Vec::new();
        DynamicImage::ImageLuma8(image).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

        Ok(format!("{DATA_URL_PREFIX}{}", STANDARD.encode(png)))
    }
}

impl Default for QrRenderer {
    fn default() -> Self {
        Self::new(QrConfig::default())
    }
}
