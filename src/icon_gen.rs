use crate::error::{IconError, Result};
use crate::report::{GeneratedFile, Report};
use crate::resize::resize_with_padding;
use image::{
    codecs::{
        ico::{IcoEncoder, IcoFrame},
        png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    },
    io::Reader,
    ColorType, ImageEncoder, ImageResult, RgbaImage,
};
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::Path,
};

/// Where the web app serves its static assets from.
pub const DEFAULT_OUTPUT_DIR: &str = "apps/web/public";

/// A standalone PNG asset with a fixed name and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconTarget {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
}

pub const PNG_TARGETS: [IconTarget; 3] = [
    IconTarget {
        name: "icon-192.png",
        width: 192,
        height: 192,
    },
    IconTarget {
        name: "icon-512.png",
        width: 512,
        height: 512,
    },
    IconTarget {
        name: "apple-touch-icon.png",
        width: 180,
        height: 180,
    },
];

pub const FAVICON_NAME: &str = "favicon.ico";

/// Favicon frame sizes, in container order. The first one is the primary frame.
pub const FAVICON_SIZES: [u32; 3] = [16, 32, 48];

/// Load the source image and normalize it to 8-bit RGBA.
///
/// The format is sniffed from the file contents, so the extension may be
/// missing or wrong. Sources without an alpha channel come out fully opaque.
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    let source = Reader::open(path)
        .and_then(Reader::with_guessed_format)
        .map_err(|e| IconError::decode(path, e))?
        .decode()
        .map_err(|e| IconError::decode(path, e))?;
    log::info!(
        "decoded {} ({}x{}, {:?})",
        path.display(),
        source.width(),
        source.height(),
        source.color()
    );
    Ok(source.to_rgba8())
}

/// Produce the full icon set for `input` inside `out_dir`.
///
/// Progress lines go to stdout when `show_progress` is set. Stops at the
/// first failure; files written before it are left in place.
pub fn generate_icons(input: &Path, out_dir: &Path, show_progress: bool) -> Result<Report> {
    let progress = |line: String| {
        if show_progress {
            println!("{line}");
        }
    };

    progress(format!("Loading {}...", input.display()));
    let source = load_image(input)?;

    create_dir_all(out_dir).map_err(|e| IconError::write(out_dir, e))?;

    let mut report = Report::new(out_dir);

    for target in PNG_TARGETS {
        progress(format!(
            "Generating {} ({}x{})...",
            target.name, target.width, target.height
        ));
        let resized = resize_with_padding(&source, target.width, target.height);
        let path = out_dir.join(target.name);
        write_png(&resized, &path)?;

        report.add_file(GeneratedFile {
            name: target.name.to_string(),
            dimensions: vec![(target.width, target.height)],
            bytes: file_size(&path)?,
        });
    }

    progress(format!("Generating {FAVICON_NAME} (16x16, 32x32, 48x48)..."));
    let path = out_dir.join(FAVICON_NAME);
    write_favicon(&source, &path)?;
    report.add_file(GeneratedFile {
        name: FAVICON_NAME.to_string(),
        dimensions: FAVICON_SIZES.iter().map(|&size| (size, size)).collect(),
        bytes: file_size(&path)?,
    });

    Ok(report)
}

/// Write `image` as a PNG at `path`, compressed as hard as the encoder allows.
pub fn write_png(image: &RgbaImage, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| IconError::write(path, e))?;
    let mut out_file = BufWriter::new(file);
    encode_png(image, &mut out_file).map_err(|e| IconError::write(path, e))?;
    out_file.flush().map_err(|e| IconError::write(path, e))?;
    log::debug!("wrote {}", path.display());
    Ok(())
}

// Encode RGBA data as PNG with compression
fn encode_png<W: Write>(image: &RgbaImage, w: W) -> ImageResult<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgba8)
}

/// Build the multi-resolution favicon container for `source`.
///
/// Each frame is padded-resized independently and stored PNG-compressed.
pub fn encode_favicon(source: &RgbaImage) -> ImageResult<Vec<u8>> {
    let mut buffers = Vec::with_capacity(FAVICON_SIZES.len());
    for size in FAVICON_SIZES {
        let resized = resize_with_padding(source, size, size);
        let mut buf = Vec::new();
        encode_png(&resized, &mut buf)?;
        buffers.push((size, buf));
    }

    let frames = buffers
        .iter()
        .map(|(size, buf)| IcoFrame::with_encoded(buf.as_slice(), *size, *size, ColorType::Rgba8))
        .collect::<ImageResult<Vec<_>>>()?;

    let mut ico = Vec::new();
    IcoEncoder::new(&mut ico).encode_images(&frames)?;
    Ok(ico)
}

pub fn write_favicon(source: &RgbaImage, path: &Path) -> Result<()> {
    let ico = encode_favicon(source).map_err(|e| IconError::write(path, e))?;
    let file = File::create(path).map_err(|e| IconError::write(path, e))?;
    let mut out_file = BufWriter::new(file);
    out_file
        .write_all(&ico)
        .and_then(|()| out_file.flush())
        .map_err(|e| IconError::write(path, e))?;
    log::debug!("wrote {}", path.display());
    Ok(())
}

fn file_size(path: &Path) -> Result<u64> {
    let metadata = std::fs::metadata(path).map_err(|e| IconError::write(path, e))?;
    Ok(metadata.len())
}
