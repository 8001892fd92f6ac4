//! PNG loading into target images and partition rendering

use image::{ImageBuffer, Rgba, RgbaImage};
use std::path::Path;

use crate::analysis::target::TargetImage;
use crate::io::error::{RasterError, Result, WithPath};
use crate::spatial::partition::Partition;

/// Decode an image file into an RGBA target
///
/// Images without an alpha channel are expanded to opaque RGBA.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or decoded
/// - The decoded image has zero area
pub fn load_target<P: AsRef<Path>>(path: P) -> Result<TargetImage> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|e| RasterError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    TargetImage::from_rgba(width, height, rgba.into_raw())
}

/// Paint every block of the partition into an RGBA image
///
/// Canvas row 0 is the bottom, so it lands on the last image row.
pub fn render_partition(partition: &Partition) -> RgbaImage {
    let size = partition.size();
    let mut img = ImageBuffer::new(size.width, size.height);

    for block in partition.blocks() {
        let color = Rgba(block.color.to_rgba8());
        let (low, high) = (block.shape.low(), block.shape.high());
        for y in low.y..high.y {
            let row = size.height as i32 - y - 1;
            for x in low.x..high.x {
                if let Some(pixel) = img.get_pixel_mut_checked(x as u32, row as u32) {
                    *pixel = color;
                }
            }
        }
    }

    img
}

/// Render the partition and save it as PNG
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_partition_png<P: AsRef<Path>>(partition: &Partition, output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).with_path(parent, "create directory")?;
    }

    render_partition(partition)
        .save(output_path)
        .map_err(|e| RasterError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
