//! Top-down PNG preview of a generated layout
//!
//! Floors are drawn side by side, one pixel per cell, separated by a
//! transparent column. A one pixel border marks the perimeter when walls are
//! enabled.

use image::{ImageBuffer, Rgba};
use std::path::Path;

use crate::io::error::{LevelError, Result, invalid_parameter};
use crate::lifecycle::record::Cell;
use crate::spatial::layout::LevelLayout;

/// Color of cells holding an enemy
pub const ENEMY_COLOR: [u8; 4] = [220, 40, 40, 255];
/// Color of the perimeter border
pub const WALL_COLOR: [u8; 4] = [40, 40, 40, 255];
/// Color of obstacle tiles
pub const OBSTACLE_COLOR: [u8; 4] = [110, 90, 70, 255];

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Color for a walkable tile archetype, stepping through a fixed palette
pub fn tile_color(archetype: usize) -> [u8; 4] {
    const PALETTE: [[u8; 4]; 6] = [
        [200, 200, 190, 255],
        [150, 190, 150, 255],
        [150, 170, 210, 255],
        [210, 190, 140, 255],
        [180, 150, 200, 255],
        [140, 200, 200, 255],
    ];
    PALETTE
        .get(archetype % PALETTE.len())
        .copied()
        .unwrap_or([255, 255, 255, 255])
}

/// Render the layout into an image
///
/// `is_obstacle` decides which tile archetypes are drawn in the obstacle color.
pub fn render_layout(
    layout: &LevelLayout,
    walls: bool,
    is_obstacle: impl Fn(usize) -> bool,
) -> ImageBuffer<Rgba<u8>, Vec<u8>> {
    let (floors, x_length, z_length) = layout.dim();
    let border = usize::from(walls);
    let floor_width = x_length + 2 * border;
    let floor_height = z_length + 2 * border;
    let width = (floor_width + 1) * floors.max(1) - 1;

    let mut img = ImageBuffer::from_pixel(width as u32, floor_height as u32, TRANSPARENT);

    for floor in 0..floors {
        let origin = floor * (floor_width + 1);

        if walls {
            for px in 0..floor_width {
                for py in [0, floor_height - 1] {
                    img.put_pixel((origin + px) as u32, py as u32, Rgba(WALL_COLOR));
                }
            }
            for py in 0..floor_height {
                for px in [0, floor_width - 1] {
                    img.put_pixel((origin + px) as u32, py as u32, Rgba(WALL_COLOR));
                }
            }
        }

        for x in 0..x_length {
            for z in 0..z_length {
                let cell = Cell { floor, x, z };
                let color = if layout.has_enemy(cell) {
                    Some(ENEMY_COLOR)
                } else {
                    layout.tile_at(cell).map(|archetype| {
                        if is_obstacle(archetype) {
                            OBSTACLE_COLOR
                        } else {
                            tile_color(archetype)
                        }
                    })
                };

                if let Some(rgba) = color {
                    // Rows run along z with z = 0 at the bottom
                    let py = floor_height - 1 - border - z;
                    img.put_pixel((origin + border + x) as u32, py as u32, Rgba(rgba));
                }
            }
        }
    }

    img
}

/// Export the layout as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - The layout has no floors or no tiles
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_layout_as_png(
    layout: &LevelLayout,
    walls: bool,
    is_obstacle: impl Fn(usize) -> bool,
    output_path: &Path,
) -> Result<()> {
    if layout.tile_count() == 0 {
        return Err(invalid_parameter(
            "layout",
            &"empty",
            &"no tiles have been placed",
        ));
    }

    let img = render_layout(layout, walls, is_obstacle);

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| LevelError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| LevelError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
