mod app;
mod controls;
mod renderer;

use crate::app::App;

use macroquad::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn window_conf() -> Conf {
    Conf {
        window_title: "Liquid Sort".to_owned(),
        window_width: 900,
        window_height: 700,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    info!("starting liquid sort");

    let mut app = App::new();
    loop {
        app.render();
        if is_mouse_button_pressed(MouseButton::Left) {
            let (x, y) = mouse_position();
            app.handle_click(x, y);
        }
        next_frame().await;
    }
}
