//! Result preview window
//!
//! Thin wrapper over macroquad: blits the finished frame as a texture and
//! waits for Escape or the window close button. Rendering itself never
//! depends on this; it only runs when `--preview` is passed.

use macroquad::prelude::*;

/// Open a window showing `pixels` (RGBA bytes, `width` x `height`). Blocks
/// until the user closes it.
pub fn show(title: String, width: usize, height: usize, pixels: Vec<u8>) {
    let conf = Conf {
        window_title: title,
        window_width: width as i32,
        window_height: height as i32,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    };

    macroquad::Window::from_config(conf, async move {
        let texture = Texture2D::from_rgba8(width as u16, height as u16, &pixels);
        texture.set_filter(FilterMode::Nearest);

        loop {
            if is_key_pressed(KeyCode::Escape) {
                break;
            }

            clear_background(BLACK);
            draw_texture_ex(
                &texture,
                0.0,
                0.0,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(Vec2::new(screen_width(), screen_height())),
                    ..Default::default()
                },
            );
            next_frame().await;
        }
    });
}
