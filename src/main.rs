use kontagion::simulation::events::Key;
use kontagion::simulation::params::GameConfig;
use kontagion::simulation::world::{Scoreboard, TickOutcome, World};
use log::{debug, error, info};
use macroquad::prelude::*;

mod graphics;
mod logging;

/// Simulation ticks per second, independent of the frame rate.
const TICKS_PER_SECOND: f32 = 20.0;

fn load_config() -> GameConfig {
    match std::env::args().nth(1) {
        Some(path) => GameConfig::load_from_file(&path).unwrap_or_else(|err| {
            error!("{path}: {err}; using default config");
            GameConfig::default()
        }),
        None => GameConfig::default(),
    }
}

fn start_level(config: &GameConfig, level: u32, scoreboard: Scoreboard) -> World {
    let mut world = World::with_scoreboard(config.clone(), level, scoreboard);
    world.init_level();
    world
}

fn queue_input(world: &mut World) {
    if is_key_down(KeyCode::Left) {
        world.push_key(Key::Left);
    } else if is_key_down(KeyCode::Right) {
        world.push_key(Key::Right);
    }
}

#[macroquad::main("Kontagion")]
async fn main() {
    logging::init(std::env::var_os("KONTAGION_VERBOSE").is_some());

    let config = load_config();
    let mut level = 1;
    let mut world = start_level(&config, level, Scoreboard::new(&config));
    let mut accumulator = 0.0;
    let mut game_over = false;

    loop {
        clear_background(WHITE);

        if game_over {
            let text = format!("Game over - final score {}", world.scoreboard().score);
            draw_text(&text, 20.0, screen_height() / 2.0, 30.0, DARKGRAY);
            draw_text(
                "Press Enter to play again",
                20.0,
                screen_height() / 2.0 + 36.0,
                24.0,
                GRAY,
            );
            if is_key_pressed(KeyCode::Enter) {
                level = 1;
                world = start_level(&config, level, Scoreboard::new(&config));
                game_over = false;
            }
            next_frame().await;
            continue;
        }

        // shots are edge-triggered, movement is sampled per tick
        if is_key_pressed(KeyCode::Space) {
            world.push_key(Key::Space);
        }
        if is_key_pressed(KeyCode::Enter) {
            world.push_key(Key::Enter);
        }

        accumulator += get_frame_time();
        let step = 1.0 / TICKS_PER_SECOND;
        while accumulator >= step && !game_over {
            accumulator -= step;
            queue_input(&mut world);

            let outcome = world.tick();
            for cue in world.drain_sounds() {
                debug!("sound: {cue:?}");
            }

            match outcome {
                TickOutcome::Continue => {}
                TickOutcome::PlayerDied => {
                    let scoreboard = world.scoreboard();
                    if scoreboard.lives == 0 {
                        info!("game over with score {}", scoreboard.score);
                        game_over = true;
                    } else {
                        world = start_level(&config, level, scoreboard);
                    }
                }
                TickOutcome::LevelFinished => {
                    level += 1;
                    info!("advancing to level {level}");
                    world = start_level(&config, level, world.scoreboard());
                }
            }
        }

        graphics::draw_dish(world.config());
        graphics::draw_entities(&world);
        if let Some(player) = world.player() {
            graphics::draw_player(player, world.config());
        }
        graphics::draw_status(world.status_text());

        next_frame().await;
    }
}
