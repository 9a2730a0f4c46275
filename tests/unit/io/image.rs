//! Tests for the layout preview renderer

#[cfg(test)]
mod tests {
    use floorgen::algorithm::executor::LevelGenerator;
    use floorgen::io::configuration::{Catalog, LevelConfig};
    use floorgen::io::error::LevelError;
    use floorgen::io::image::{
        ENEMY_COLOR, OBSTACLE_COLOR, WALL_COLOR, export_layout_as_png, render_layout, tile_color,
    };
    use floorgen::io::recording::RecordingFactory;
    use floorgen::lifecycle::Category;
    use floorgen::lifecycle::record::Cell;
    use floorgen::spatial::LevelLayout;
    use image::Rgba;

    fn generated(config: LevelConfig) -> LevelGenerator<RecordingFactory> {
        let generator = LevelGenerator::new(config, RecordingFactory::new());
        let Ok(mut generator) = generator else {
            unreachable!("valid configuration rejected");
        };
        generator.setup_pools();
        assert!(generator.generate().is_ok());
        generator
    }

    fn layout_of(generator: &LevelGenerator<RecordingFactory>) -> LevelLayout {
        LevelLayout::capture(generator.config(), generator.registry())
    }

    // Tests floors are laid out side by side with a gap and a border
    #[test]
    fn test_image_dimensions() {
        let generator = generated(LevelConfig {
            x_length: 4,
            z_length: 3,
            floors: 2,
            tiles: Catalog::uniform(["floor"]),
            ..LevelConfig::default()
        });
        let layout = layout_of(&generator);

        let plain = render_layout(&layout, false, |_| false);
        assert_eq!(plain.dimensions(), (4 * 2 + 1, 3));

        let walled = render_layout(&layout, true, |_| false);
        assert_eq!(walled.dimensions(), (6 * 2 + 1, 5));
        assert_eq!(walled.get_pixel(0, 0), &Rgba(WALL_COLOR));
        assert_eq!(walled.get_pixel(6, 2), &Rgba([0, 0, 0, 0]));
    }

    // Tests cells are colored by tile, obstacle and enemy
    // Verified by drawing rows with z = 0 at the top
    #[test]
    fn test_cell_colors() {
        let generator = generated(LevelConfig {
            x_length: 3,
            z_length: 3,
            tiles: Catalog::uniform(["floor"]),
            enemies: Catalog::uniform(["grunt"]),
            enemy_budget: 20,
            ..LevelConfig::default()
        });
        let layout = layout_of(&generator);

        // Every cell holds an enemy with this budget
        let with_enemies = render_layout(&layout, false, |_| false);
        assert_eq!(with_enemies.get_pixel(0, 2), &Rgba(ENEMY_COLOR));

        let generator = generated(LevelConfig {
            x_length: 3,
            z_length: 3,
            tiles: Catalog::uniform(["floor"]),
            ..LevelConfig::default()
        });
        let layout = layout_of(&generator);
        assert_eq!(layout.tile_at(Cell { floor: 0, x: 0, z: 0 }), Some(0));

        let tiles = render_layout(&layout, false, |_| false);
        assert_eq!(tiles.get_pixel(0, 2), &Rgba(tile_color(0)));
        let obstacles = render_layout(&layout, false, |index| index == 0);
        assert_eq!(obstacles.get_pixel(2, 0), &Rgba(OBSTACLE_COLOR));
    }

    // Tests the palette wraps around
    #[test]
    fn test_palette_wraps() {
        assert_eq!(tile_color(0), tile_color(6));
        assert_ne!(tile_color(0), tile_color(1));
    }

    // Tests exporting writes a PNG and creates missing directories
    #[test]
    fn test_export_writes_png() {
        let dir = tempfile::tempdir();
        let Ok(dir) = dir else {
            unreachable!("no temporary directory");
        };
        let path = dir.path().join("previews").join("level.png");

        let generator = generated(LevelConfig {
            x_length: 5,
            z_length: 5,
            tiles: Catalog::uniform(["floor"]),
            ..LevelConfig::default()
        });
        let layout = layout_of(&generator);

        assert!(export_layout_as_png(&layout, true, |_| false, &path).is_ok());
        let reopened = image::open(&path).map(|img| (img.width(), img.height()));
        assert_eq!(reopened.ok(), Some((7, 7)));
    }

    // Tests an empty layout is refused
    #[test]
    fn test_export_rejects_empty_layout() {
        let mut generator = generated(LevelConfig {
            x_length: 2,
            z_length: 2,
            tiles: Catalog::uniform(["floor"]),
            ..LevelConfig::default()
        });
        assert!(generator.release_tiles().is_ok());
        assert_eq!(generator.registry().count(Category::Tile), 0);

        let layout = layout_of(&generator);
        let dir = std::env::temp_dir().join("floorgen-never-written.png");
        assert!(matches!(
            export_layout_as_png(&layout, false, |_| false, &dir),
            Err(LevelError::InvalidParameter { .. })
        ));
    }
}
