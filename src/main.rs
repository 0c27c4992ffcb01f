// src/main.rs
use nannou::prelude::*;
use std::time::Instant;

use marqvis::{config::Config, views::Stage, MarqueeRegistry};

struct Model {
    // Core components:
    stage: Stage,
    registry: MarqueeRegistry,
    instance_ids: Vec<String>,

    // Style
    background: Rgb,

    // Timebase
    epoch: Instant,
    last_update: Instant,
    fps: f32,

    // Interaction state
    all_paused: bool,
    debug_flag: bool,
}

fn main() {
    nannou::app(model).update(update).run();
}

fn model(app: &App) -> Model {
    let config = Config::load().expect("Failed to load config file");

    app.new_window()
        .title("marqvis 0.1.0")
        .size(config.window.width, config.window.height)
        .view(view)
        .key_pressed(key_pressed)
        .resized(resized)
        .focused(focused)
        .unfocused(unfocused)
        .build()
        .unwrap();

    let mut stage = Stage::new(
        config.window.width as f32,
        config.window.height as f32,
    );
    let mut registry = MarqueeRegistry::with_default_cross(config.style.default_item_cross);
    let instance_ids = registry.init_all(&mut stage, &config);
    println!("marqvis: initialized {} instance(s)", instance_ids.len());

    let [r, g, b] = config.style.background;

    Model {
        stage,
        registry,
        instance_ids,
        background: rgb(r, g, b),
        epoch: Instant::now(),
        last_update: Instant::now(),
        fps: 0.0,
        all_paused: false,
        debug_flag: false,
    }
}

fn now_ms(model: &Model) -> f64 {
    model.epoch.elapsed().as_secs_f64() * 1000.0
}

fn key_pressed(app: &App, model: &mut Model, key: Key) {
    let now = now_ms(model);
    match key {
        // Toggle pause/play on every engine instance
        Key::Space => {
            if model.all_paused {
                model.registry.play_all(now);
            } else {
                model.registry.pause_all(now);
            }
            model.all_paused = !model.all_paused;
        }
        // Hard stop (offset reset) / full restart
        Key::S => {
            for id in model.instance_ids.clone() {
                model.registry.stop(&id);
            }
        }
        Key::Return => {
            for id in model.instance_ids.clone() {
                model.registry.start(&id, &model.stage, now);
            }
            model.all_paused = false;
        }
        // Tear down the first instance (late calls stay safe no-ops)
        Key::D => {
            if let Some(id) = model.instance_ids.first().cloned() {
                model.registry.destroy(&id);
                println!("destroyed {}", id);
            }
        }
        Key::P => {
            model.debug_flag = !model.debug_flag;
        }
        Key::Q => {
            app.quit();
        }
        _ => (),
    }
}

fn resized(_app: &App, model: &mut Model, dim: Vec2) {
    model.stage.set_viewport(dim.x, dim.y);
}

fn focused(_app: &App, model: &mut Model) {
    let now = now_ms(model);
    model.stage.focused = true;
    model.registry.set_hidden(false, now);
}

fn unfocused(_app: &App, model: &mut Model) {
    let now = now_ms(model);
    model.stage.focused = false;
    model.registry.set_hidden(true, now);
}

fn update(app: &App, model: &mut Model, _update: Update) {
    let now = Instant::now();
    let duration = now - model.last_update;
    model.last_update = now;
    if model.debug_flag {
        model.fps = 1.0 / duration.as_secs_f32();
    }

    model.stage.pointer = app.mouse.position();

    /******************* Main update for all instances *******************/
    model.registry.update(&model.stage, now_ms(model));
    /*********************************************************************/
}

// Draw the state of Model into the given Frame
fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(model.background);

    model.registry.draw(&draw, now_ms(model));

    if model.debug_flag {
        draw.text(&format!("FPS: {:.1}", model.fps))
            .x_y(model.stage.viewport.right() - 80.0, model.stage.viewport.top() - 20.0)
            .color(RED);
    }

    draw.to_frame(app, &frame).unwrap();
}
