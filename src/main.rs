//! Terminal scene demo (default binary).
//!
//! A walled room with a player block moved by the arrow keys (or WASD), a
//! chomping sprite drifting across the wraparound edges, and a title sprite.
//! Frames are paced by `TUI_SCENE_FPS` (default 20).
//!
//! `--print` skips the interactive screen and prints a fixed number of frames
//! to stdout, each pushed up by a blank-line separator sized to the terminal.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tui_scene::core::{
    AnimatedSprite, Entity, EntityId, MoveOptions, RenderOptions, Scene, SceneConfig, Sprite,
};
use tui_scene::term::{stdout_presenter, FramePacer, TerminalPresenter};
use tui_scene::types::{Colour, Size, Vec2D, DEFAULT_FPS};

const FPS_ENV_VAR: &str = "TUI_SCENE_FPS";
const SCENE_SIZE: Size = Size::new(48, 16);
const WALL_LAYER: i32 = 1;
const PRINT_FRAMES: u32 = 96;

struct Demo {
    scene: Scene,
    player: EntityId,
    chomper: EntityId,
}

fn main() -> Result<()> {
    init_tracing();

    if std::env::args().skip(1).any(|arg| arg == "--print") {
        return run_print(fps_from_env());
    }

    let mut term = TerminalPresenter::new();
    term.enter()?;

    let result = run(&mut term, fps_from_env());

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        error!(error = %err, "demo_failed");
    }
    result
}

fn run(term: &mut TerminalPresenter, fps: u32) -> Result<()> {
    let mut demo = build_demo().context("build demo scene")?;
    let mut pacer = FramePacer::new(fps);
    let started = Instant::now();
    info!(fps, size = %SCENE_SIZE, "demo_started");

    loop {
        let now_ms = started.elapsed().as_millis() as u64;
        if pacer.should_render(now_ms) {
            demo.scene
                .move_entity(demo.chomper, (1, 0), MoveOptions::default())?;
            let stage = demo.scene.render(&RenderOptions {
                is_display: false,
                ..RenderOptions::default()
            })?;
            term.draw(&stage)?;
        }

        let timeout = Duration::from_millis(pacer.wait_ms(started.elapsed().as_millis() as u64));
        if !event::poll(timeout)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
                    || (key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL))
                {
                    return Ok(());
                }
                if let Some(delta) = key_to_delta(key.code) {
                    demo.scene
                        .move_entity(demo.player, delta, MoveOptions::default())?;
                }
            }
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }
}

/// Non-interactive mode: the scene displays itself through a stdout presenter.
fn run_print(fps: u32) -> Result<()> {
    let mut demo = build_demo().context("build demo scene")?;
    demo.scene.use_separator = true;
    demo.scene.set_presenter(Box::new(stdout_presenter()));

    let mut pacer = FramePacer::new(fps);
    let started = Instant::now();
    info!(fps, frames = PRINT_FRAMES, "print_started");

    let mut shown = 0;
    while shown < PRINT_FRAMES {
        let now_ms = started.elapsed().as_millis() as u64;
        if !pacer.should_render(now_ms) {
            thread::sleep(Duration::from_millis(pacer.wait_ms(now_ms)));
            continue;
        }
        demo.scene
            .move_entity(demo.chomper, (1, 0), MoveOptions::default())?;
        demo.scene.render(&RenderOptions::default())?;
        shown += 1;
    }
    Ok(())
}

fn build_demo() -> Result<Demo> {
    let mut scene = Scene::with_config(
        SCENE_SIZE,
        SceneConfig {
            use_separator: false,
            ..SceneConfig::default()
        },
    )?;

    let wall = |pos: (i32, i32), size: Size| {
        Entity::new(pos, size)
            .with_layer(WALL_LAYER)
            .with_colour(Colour::ALT_GREY)
    };
    // Gaps in the walls let the player walk off an edge and wrap around.
    scene.add_to_scene(wall((0, 0), Size::new(20, 1)));
    scene.add_to_scene(wall((28, 0), Size::new(20, 1)));
    scene.add_to_scene(wall((0, 15), Size::new(48, 1)));
    scene.add_to_scene(wall((0, 1), Size::new(1, 6)));
    scene.add_to_scene(wall((47, 1), Size::new(1, 14)));
    scene.add_to_scene(wall((16, 6), Size::new(12, 1)));

    scene.add_to_scene(
        Entity::sprite((18, 3), Sprite::new("¶tui-scene¶").with_transparent(true))
            .with_layer(2)
            .with_colour(Colour::BOLD.and(Colour::CYAN)),
    );

    let player = scene.add_to_scene(
        Entity::new((4, 10), Size::new(2, 1))
            .with_colour(Colour::GREEN)
            .with_collisions(vec![WALL_LAYER]),
    );

    let chomper = scene.add_to_scene(
        Entity::animated((0, 12), AnimatedSprite::new(["C", "c", "C", "<"])?)
            .with_layer(3)
            .with_colour(Colour::YELLOW)
            .with_move_function(|e| {
                e.next_frame();
            }),
    );

    Ok(Demo {
        scene,
        player,
        chomper,
    })
}

fn key_to_delta(code: KeyCode) -> Option<Vec2D> {
    let delta = match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => (-1, 0),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => (1, 0),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => (0, -1),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => (0, 1),
        _ => return None,
    };
    Some(delta.into())
}

fn fps_from_env() -> u32 {
    std::env::var(FPS_ENV_VAR)
        .ok()
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .filter(|fps| *fps > 0)
        .unwrap_or(DEFAULT_FPS)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
