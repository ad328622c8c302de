//! Scene loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable scene files.

use std::fs;
use std::path::Path;

use thiserror::Error;

use super::Model;

/// Error type for scene loading
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("serialize error: {0}")]
    Serialize(#[from] ron::Error),
}

/// Load a scene model from a RON file
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Model, SceneError> {
    let contents = fs::read_to_string(path)?;
    load_scene_from_str(&contents)
}

/// Load a scene model from a RON string (for embedded scenes or testing)
pub fn load_scene_from_str(s: &str) -> Result<Model, SceneError> {
    Ok(ron::from_str(s)?)
}

/// Save a scene model to a RON file
pub fn save_scene<P: AsRef<Path>>(model: &Model, path: P) -> Result<(), SceneError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(model, config)?;
    fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_roundtrip_through_ron() {
        let cube = Model::demo_cube();
        let config = ron::ser::PrettyConfig::new();
        let text = ron::ser::to_string_pretty(&cube, config).unwrap();
        let loaded = load_scene_from_str(&text).unwrap();
        assert_eq!(loaded.name, cube.name);
        assert_eq!(loaded.shapes.len(), cube.shapes.len());
        assert_eq!(loaded.shapes[0].indices, cube.shapes[0].indices);
        assert_eq!(loaded.scale, cube.scale);
    }

    #[test]
    fn test_missing_scene_file_is_io_error() {
        let err = load_scene("definitely/not/here.ron").unwrap_err();
        assert!(matches!(err, SceneError::Io(_)));
    }
}
