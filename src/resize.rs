//! Aspect-preserving resize onto a transparent canvas of exact size.
//!
//! The source is scaled uniformly until it touches the target box on one
//! axis, then centered. Nothing is cropped or stretched; leftover area stays
//! fully transparent.

use image::{imageops, imageops::FilterType, ImageBuffer, Rgba, Rgba32FImage, RgbaImage};

/// Size of the scaled copy that fits inside `target` while keeping the
/// aspect ratio of `source`.
///
/// The constrained axis is rounded to the nearest pixel (half away from
/// zero). A zero-sized source or target yields `(0, 0)`.
pub fn fit_dimensions(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (source_width, source_height) = source;
    let (target_width, target_height) = target;
    if source_width == 0 || source_height == 0 || target_width == 0 || target_height == 0 {
        return (0, 0);
    }

    let source_ratio = source_width as f64 / source_height as f64;
    let target_ratio = target_width as f64 / target_height as f64;

    if source_ratio > target_ratio {
        // Wider than the box: width is the constraint
        let height = (target_width as f64 / source_ratio).round() as u32;
        (target_width, height.min(target_height))
    } else {
        let width = (target_height as f64 * source_ratio).round() as u32;
        (width.min(target_width), target_height)
    }
}

/// Top-left corner at which a `scaled` copy is centered inside `target`.
pub fn paste_offset(target: (u32, u32), scaled: (u32, u32)) -> (u32, u32) {
    (
        target.0.saturating_sub(scaled.0) / 2,
        target.1.saturating_sub(scaled.1) / 2,
    )
}

/// Resize `source` to fit a `width`×`height` canvas, centered, with
/// transparent padding. The returned image always has exactly the requested
/// dimensions.
pub fn resize_with_padding(source: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let mut canvas = ImageBuffer::from_pixel(width, height, Rgba([0, 0, 0, 0]));

    let scaled_size = fit_dimensions(source.dimensions(), (width, height));
    if scaled_size.0 == 0 || scaled_size.1 == 0 {
        log::warn!(
            "{}x{} source collapses to nothing at {width}x{height}, leaving the canvas empty",
            source.width(),
            source.height()
        );
        return canvas;
    }

    let scaled = resample(source, scaled_size.0, scaled_size.1);
    let (x, y) = paste_offset((width, height), scaled_size);
    log::debug!(
        "{width}x{height}: scaled to {}x{} at offset ({x}, {y})",
        scaled_size.0,
        scaled_size.1
    );

    imageops::replace(&mut canvas, &scaled, x.into(), y.into());
    canvas
}

/// Lanczos3 resample over premultiplied alpha, so transparent pixels carry
/// no color into their opaque neighbours.
fn resample(source: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if source.dimensions() == (width, height) {
        return source.clone();
    }

    let premultiplied: Rgba32FImage =
        ImageBuffer::from_fn(source.width(), source.height(), |x, y| {
            let [r, g, b, a] = source.get_pixel(x, y).0;
            let alpha = a as f32 / 255.0;
            let channel = |c: u8| c as f32 / 255.0 * alpha;
            Rgba([channel(r), channel(g), channel(b), alpha])
        });

    let resized = imageops::resize(&premultiplied, width, height, FilterType::Lanczos3);

    ImageBuffer::from_fn(width, height, |x, y| {
        let [r, g, b, a] = resized.get_pixel(x, y).0;
        let alpha = a.clamp(0.0, 1.0);
        let alpha_byte = (alpha * 255.0).round() as u8;
        if alpha_byte == 0 {
            return Rgba([0, 0, 0, 0]);
        }
        let channel = |c: f32| ((c / alpha).clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba([channel(r), channel(g), channel(b), alpha_byte])
    })
}
