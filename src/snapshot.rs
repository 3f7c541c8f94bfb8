use crate::config::Config;
use crate::error::{Error, Result};
use crate::graphics::Frame;
use crate::state::ViewState;
use crate::viewer::{Surface, Viewer};
use log::info;
use std::path::Path;

/// Writes a frame as an RGBA PNG.
pub fn save_png(frame: Frame<'_>, path: &Path) -> Result<()> {
    let image: image::RgbaImage = image::ImageBuffer::from_raw(
        frame.width as u32,
        frame.height as u32,
        frame.pixels.to_vec(),
    )
    .ok_or(Error::FrameSize {
        width: frame.width,
        height: frame.height,
    })?;
    image.save(path)?;
    Ok(())
}

/// Renders the bag off-screen for `frames` frames and saves the last one.
pub fn render_snapshot(
    config: &Config,
    surface: Surface,
    frames: u32,
    path: &Path,
) -> Result<()> {
    let mut viewer = Viewer::new(
        ViewState::new(config.color, config.auto_rotate),
        config.shadow_map_size,
    );
    viewer.initialize(surface, config.pixel_ratio);
    for _ in 0..frames.max(1) {
        viewer.step();
    }
    if let Some(renderer) = viewer.renderer() {
        let (width, height) = renderer.buffer_size();
        save_png(renderer.frame(), path)?;
        info!("saved {width}x{height} snapshot to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn snapshot_is_a_readable_png() {
        let path = std::env::temp_dir().join(format!("bag3d-snapshot-{}.png", std::process::id()));
        let config = Config {
            color: Color(0xff0000),
            shadow_map_size: 64,
            pixel_ratio: 2.0,
            ..Config::default()
        };
        render_snapshot(&config, Surface::new(40, 30), 3, &path).unwrap();

        let image = image::open(&path).unwrap().to_rgba8();
        assert_eq!(image.dimensions(), (80, 60));
        assert_eq!(image.get_pixel(0, 0).0, [255, 255, 255, 255]);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn mismatched_frame_is_rejected() {
        let pixels = [0u8; 8];
        let frame = Frame {
            width: 4,
            height: 4,
            pixels: &pixels,
        };
        let path = std::env::temp_dir().join("bag3d-never-written.png");
        assert!(matches!(
            save_png(frame, &path),
            Err(Error::FrameSize { width: 4, height: 4 })
        ));
    }
}
