use std::path::Path;

use crate::{
    error::{StillreelError, StillreelResult},
    timeline::FrameSize,
};

/// A decoded image fitted into the target frame: tightly packed RGB8,
/// row-major, `data.len() == width * height * 3`.
#[derive(Clone, Debug)]
pub struct NormalizedFrame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Decode `path` and fit it into a `target`-sized frame.
///
/// The source keeps its aspect ratio: it is resized by the uniform scale
/// that fits it entirely inside the target, then pasted centered onto a
/// black canvas. Any alpha channel is dropped (not composited), keeping the
/// underlying color values. Pixels outside the pasted region are exactly
/// (0, 0, 0).
pub fn normalize_image(path: &Path, target: FrameSize) -> StillreelResult<NormalizedFrame> {
    if !path.is_file() {
        return Err(StillreelError::not_found(format!(
            "image file '{}' does not exist",
            path.display()
        )));
    }

    let decoded = image::open(path).map_err(|e| {
        StillreelError::decode(format!("decode image '{}': {e}", path.display()))
    })?;
    let rgb = decoded.to_rgb8();
    let (src_w, src_h) = rgb.dimensions();

    let (fit_w, fit_h) = fit_dimensions(src_w, src_h, target);
    let resized = if (fit_w, fit_h) == (src_w, src_h) {
        rgb
    } else {
        image::imageops::resize(&rgb, fit_w, fit_h, image::imageops::FilterType::Lanczos3)
    };

    let mut canvas = image::RgbImage::new(target.width, target.height);
    let offset_x = i64::from((target.width - fit_w) / 2);
    let offset_y = i64::from((target.height - fit_h) / 2);
    image::imageops::replace(&mut canvas, &resized, offset_x, offset_y);

    Ok(NormalizedFrame {
        width: target.width,
        height: target.height,
        data: canvas.into_raw(),
    })
}

/// Dimensions of `src` scaled by `min(tw/sw, th/sh)` so the whole source
/// fits inside `target` without distortion. Never returns a zero dimension.
pub fn fit_dimensions(src_w: u32, src_h: u32, target: FrameSize) -> (u32, u32) {
    let scale = f64::min(
        f64::from(target.width) / f64::from(src_w),
        f64::from(target.height) / f64::from(src_h),
    );
    let fit_w = (f64::from(src_w) * scale).round() as u32;
    let fit_h = (f64::from(src_h) * scale).round() as u32;
    (fit_w.clamp(1, target.width), fit_h.clamp(1, target.height))
}
