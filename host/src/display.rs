use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use glam::Vec3;
use terrascript_terrain::{ColourSlot, Raster, Rgba, TriangleMesh};

use crate::contract::DisplayControl;
use crate::stats::Stats;

/// Light direction for the diffuse shade, normalised at use.
const LIGHT: Vec3 = Vec3::new(0.4, 0.3, 0.85);

/// Ambient floor, so faces turned away from the light stay visible.
const AMBIENT: f32 = 0.3;

/// A headless display for a terrain mesh.
///
/// Implements the display-control half of the script contract. The signal
/// methods only record that work is pending; [`HeadlessDisplay::service`]
/// then performs the recompute and repaint once the script has returned,
/// which keeps the signal path itself free of failure modes.
pub struct HeadlessDisplay {
    raster: Raster,
    sea_level: f32,
    save_dir: Option<PathBuf>,
    save_interval: usize,
    stats: Arc<Stats>,

    /// Derived per-vertex display colours, rebuilt on recolour.
    display_colours: Vec<Rgba>,

    recolour_pending: bool,
    redraw_pending: bool,
    frames: usize,
}

impl DisplayControl for HeadlessDisplay {
    fn recolour(&mut self) {
        self.recolour_pending = true;
    }

    fn force_redraw(&mut self) {
        self.redraw_pending = true;
    }
}

impl HeadlessDisplay {
    /// Construct a new display, rendering to a square raster of the given
    /// size.
    pub fn new(
        raster_size: usize,
        sea_level: f32,
        save_dir: Option<PathBuf>,
        save_interval: usize,
        stats: Arc<Stats>,
    ) -> Self {
        HeadlessDisplay {
            raster: Raster::new(raster_size, raster_size),
            sea_level,
            save_dir,
            save_interval: save_interval.max(1),
            stats,
            display_colours: Vec::new(),
            recolour_pending: false,
            redraw_pending: false,
            frames: 0,
        }
    }

    /// The number of frames rendered so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Get the raster the display renders into.
    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Perform the work recorded by `recolour` and `force_redraw`.
    ///
    /// Recolouring recomputes the mesh normals and rebuilds the derived
    /// per-vertex display colours. Redrawing repaints the raster and, if a
    /// save directory is configured, writes an interval PNG snapshot.
    pub fn service(&mut self, mesh: &mut TriangleMesh) -> image::ImageResult<()> {
        if self.recolour_pending {
            self.recolour_pending = false;
            mesh.compute_normals();
            self.rebuild_display_colours(mesh);
        }

        if self.redraw_pending {
            self.redraw_pending = false;
            self.render(mesh);
            self.frames += 1;
            self.stats.inc_frames();

            if self.save_dir.is_some() && self.frames % self.save_interval == 0 {
                self.save_snapshot()?;
            }
        }

        Ok(())
    }

    /// Derive the colour each vertex shows, picking the slot by sea level
    /// and applying a diffuse shade.
    fn rebuild_display_colours(&mut self, mesh: &TriangleMesh) {
        let light = LIGHT.normalize();
        let geometry = mesh.geometry();

        self.display_colours = mesh
            .vertices()
            .iter()
            .map(|vertex| {
                let slot = if geometry.height(&vertex.position()) < self.sea_level {
                    ColourSlot::Submerged
                } else {
                    ColourSlot::Surface
                };
                let diffuse = vertex.normal().dot(light).max(0.0);
                vertex
                    .colour(slot)
                    .scaled(AMBIENT + (1.0 - AMBIENT) * diffuse)
            })
            .collect();
    }

    /// Repaint the raster, as a top-down splat of every vertex.
    fn render(&mut self, mesh: &TriangleMesh) {
        self.raster.clear(Rgba::black());

        let (width, height) = self.raster.dimensions();
        if width == 0 || height == 0 || mesh.vertex_count() == 0 {
            return;
        }

        // Fit the mesh's XY bounding box onto the raster
        let mut min = (f32::MAX, f32::MAX);
        let mut max = (f32::MIN, f32::MIN);
        for vertex in mesh.vertices() {
            let position = vertex.position();
            min = (min.0.min(position.x), min.1.min(position.y));
            max = (max.0.max(position.x), max.1.max(position.y));
        }
        let extent = |low: f32, high: f32| if high > low { high - low } else { 1.0 };
        let (extent_x, extent_y) = (extent(min.0, max.0), extent(min.1, max.1));

        for (index, vertex) in mesh.vertices().iter().enumerate() {
            let position = vertex.position();
            let column = ((position.x - min.0) / extent_x * (width - 1) as f32) as usize;
            // Raster rows run top to bottom
            let row = ((position.y - min.1) / extent_y * (height - 1) as f32) as usize;
            let row = height - 1 - row.min(height - 1);

            let colour = self
                .display_colours
                .get(index)
                .copied()
                .unwrap_or_else(|| vertex.colour(ColourSlot::Surface));

            // A clamped coordinate cannot be out of bounds
            let _ = self.raster.set_pixel(column.min(width - 1), row, colour);
        }
    }

    /// Write the current raster as a PNG under the save directory.
    fn save_snapshot(&self) -> image::ImageResult<()> {
        let dir = match &self.save_dir {
            Some(dir) => dir,
            None => return Ok(()),
        };
        fs::create_dir_all(dir)?;

        let mut path = dir.clone();
        path.push(format!("{:05}.png", self.frames));

        let (width, height) = self.raster.dimensions();
        image::save_buffer(
            &path,
            &self.raster.to_rgba_bytes(),
            width as u32,
            height as u32,
            image::ColorType::Rgba8,
        )?;

        log::debug!("saved snapshot {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn redraw_paints_and_counts_frames() {
        let stats = Arc::new(Stats::new());
        let mut mesh = TriangleMesh::flat_grid(4, 4);
        let mut display = HeadlessDisplay::new(32, 0.0, None, 1, stats.clone());

        display.recolour();
        display.force_redraw();
        display.service(&mut mesh).unwrap();

        assert_eq!(display.frames(), 1);
        assert_eq!(stats.frames(), 1);

        // The splat must have painted over the black background
        let bytes = display.raster().to_rgba_bytes();
        assert!(bytes
            .chunks(4)
            .any(|pixel| pixel[0] != 0 || pixel[1] != 0 || pixel[2] != 0));

        // Nothing pending, nothing painted
        display.service(&mut mesh).unwrap();
        assert_eq!(display.frames(), 1);
    }

    #[test]
    fn snapshots_follow_the_save_interval() {
        let dir =
            std::env::temp_dir().join(format!("terrascript-snapshots-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);

        let stats = Arc::new(Stats::new());
        let mut mesh = TriangleMesh::flat_grid(2, 2);
        let mut display = HeadlessDisplay::new(8, 0.0, Some(dir.clone()), 2, stats);

        // Frame 1 falls between intervals and must not be written
        display.force_redraw();
        display.service(&mut mesh).unwrap();
        assert!(!dir.join("00001.png").exists());

        // Frame 2 hits the interval
        display.force_redraw();
        display.service(&mut mesh).unwrap();
        let snapshot = dir.join("00002.png");
        assert!(snapshot.exists());
        assert!(fs::metadata(&snapshot).unwrap().len() > 0);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn sea_level_selects_the_submerged_slot() {
        let stats = Arc::new(Stats::new());
        let mut mesh = TriangleMesh::flat_grid(2, 2);
        for index in 0..4 {
            mesh.set_vertex_colour(index, ColourSlot::Surface, Rgba::from_rgb(0, 0xFF, 0))
                .unwrap();
            mesh.set_vertex_colour(index, ColourSlot::Submerged, Rgba::from_rgb(0, 0, 0xFF))
                .unwrap();
        }
        mesh.set_vertex_height(0, -1.0).unwrap();

        let mut display = HeadlessDisplay::new(8, 0.0, None, 1, stats);
        display.recolour();
        display.service(&mut mesh).unwrap();

        // Vertex 0 sits below sea level, the rest do not
        assert!(display.display_colours[0].blue() > 0);
        assert_eq!(display.display_colours[0].green(), 0);
        assert!(display.display_colours[1].green() > 0);
        assert_eq!(display.display_colours[1].blue(), 0);
    }
}
