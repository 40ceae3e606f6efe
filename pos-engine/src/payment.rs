//! UPI payment QR helper
//!
//! Encodes a static `upi://pay` URI into a scannable image. Display
//! convenience only: nothing confirms that a payment actually happened.

use crate::money;
use qrcode::QrCode;
use shared::{AppError, AppResult, ErrorCode};
use std::io::Cursor;

/// Merchant details baked into every payment QR
#[derive(Debug, Clone)]
pub struct UpiDetails {
    /// Virtual payment address (pa)
    pub payee_address: String,
    /// Display name (pn)
    pub payee_name: String,
    /// ISO currency code (cu)
    pub currency: String,
}

impl UpiDetails {
    pub fn new(
        payee_address: impl Into<String>,
        payee_name: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            payee_address: payee_address.into(),
            payee_name: payee_name.into(),
            currency: currency.into(),
        }
    }

    /// Build the payment URI for `amount`:
    /// `upi://pay?pa=…&pn=…&am=…&cu=…`
    pub fn payment_uri(&self, amount: f64) -> String {
        format!(
            "upi://pay?pa={}&pn={}&am={:.2}&cu={}",
            urlencoding::encode(&self.payee_address),
            urlencoding::encode(&self.payee_name),
            money::round2(amount),
            urlencoding::encode(&self.currency),
        )
    }

    /// Render the payment URI as a PNG QR image
    pub fn qr_png(&self, amount: f64) -> AppResult<Vec<u8>> {
        let uri = self.payment_uri(amount);
        let code = QrCode::new(uri.as_bytes()).map_err(|e| {
            AppError::with_message(
                ErrorCode::PaymentEncodingFailed,
                format!("QR encoding failed: {e}"),
            )
        })?;
        let img = code
            .render::<image::Luma<u8>>()
            .min_dimensions(256, 256)
            .build();

        let mut png = Cursor::new(Vec::new());
        image::DynamicImage::ImageLuma8(img)
            .write_to(&mut png, image::ImageFormat::Png)
            .map_err(|e| {
                AppError::with_message(
                    ErrorCode::PaymentEncodingFailed,
                    format!("PNG encoding failed: {e}"),
                )
            })?;
        Ok(png.into_inner())
    }
}
