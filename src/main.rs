//! Charcoal: offline CPU software renderer
//!
//! Renders a scene to an image file with no GPU involved:
//! - Generic software rasterizer with pluggable shader stages
//! - Z-buffered visibility
//! - Debug overlay marking triangle edges and vertices
//! - RON scene files (or a built-in demo cube)
//! - Optional window preview of the finished frame

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod camera;
mod rasterizer;
mod renderer;
mod settings;
mod utils;
mod window;
mod world;

use clap::Parser;
use settings::Settings;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::parse();
    log::info!(
        "charcoal v{}: {:?} backend, {}x{}",
        VERSION,
        settings.renderer,
        settings.width,
        settings.height
    );

    let mut renderer = renderer::create(settings);
    renderer.init()?;
    renderer.render()?;
    Ok(())
}
