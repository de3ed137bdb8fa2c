use std::path::Path;

use anyhow::Context;
use image::{ImageBuffer, Luma};
use qrcode::{Color, QrCode};

pub type QrImage = ImageBuffer<Luma<u8>, Vec<u8>>;

/// Renders `data` as a grayscale QR bitmap, `scale` pixels per module.
pub fn render_qr_image(data: &str, scale: u32) -> anyhow::Result<QrImage> {
    let qr = QrCode::new(data.as_bytes()).context("encode qr")?;
    let modules = qr.to_colors();
    let width = qr.width() as u32;

    let mut img = QrImage::from_pixel(width * scale, width * scale, Luma([255u8]));
    for (idx, module) in modules.iter().enumerate() {
        if *module != Color::Dark {
            continue;
        }
        let mx = idx as u32 % width;
        let my = idx as u32 / width;
        for dy in 0..scale {
            for dx in 0..scale {
                img.put_pixel(mx * scale + dx, my * scale + dy, Luma([0u8]));
            }
        }
    }
    Ok(img)
}

pub fn render_qr_png(data: &str, scale: u32, out: &Path) -> anyhow::Result<()> {
    let img = render_qr_image(data, scale)?;
    img.save(out)
        .with_context(|| format!("write qr png {}", out.display()))?;
    Ok(())
}
