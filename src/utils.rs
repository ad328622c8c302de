//! Small shared utilities: image export and stage timing

use std::path::Path;
use std::time::Instant;

use anyhow::Context;

use crate::rasterizer::{Buffer, Rgba};

/// Encode the color buffer to `path`; the format is picked from the file
/// extension by the `image` crate
pub fn save_image(buffer: &Buffer<Rgba>, path: &Path) -> anyhow::Result<()> {
    image::save_buffer(
        path,
        buffer.as_bytes(),
        buffer.width() as u32,
        buffer.height() as u32,
        image::ColorType::Rgba8,
    )
    .with_context(|| format!("saving image to {}", path.display()))
}

/// Logs how long a pipeline stage took when dropped
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    pub fn new(label: &'static str) -> Self {
        Self { label, start: Instant::now() }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        log::info!("{}: {:.2?}", self.label, self.start.elapsed());
    }
}
