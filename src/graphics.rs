use kontagion::simulation::bacterium::Strain;
use kontagion::simulation::entity::{Entity, EntityKind};
use kontagion::simulation::goodie::GoodieKind;
use kontagion::simulation::locatable::Locatable;
use kontagion::simulation::params::GameConfig;
use kontagion::simulation::player::Player;
use kontagion::simulation::projectile::ProjectileKind;
use kontagion::simulation::world::World;
use macroquad::prelude::*;
use ndarray::Array1;

/// Height reserved above the dish for the status line.
const STATUS_BAR_HEIGHT: f32 = 28.0;

trait ToScreen {
    type Output;
    fn to_screen(&self, config: &GameConfig) -> Self::Output;
}

fn scale(config: &GameConfig) -> f32 {
    let scale_x = screen_width() / config.view_width;
    let scale_y = (screen_height() - STATUS_BAR_HEIGHT) / config.view_height;
    scale_x.min(scale_y)
}

impl ToScreen for Array1<f32> {
    type Output = Vec2;
    // world y grows upwards, screen y downwards
    fn to_screen(&self, config: &GameConfig) -> Vec2 {
        let s = scale(config);
        vec2(
            self[0] * s,
            STATUS_BAR_HEIGHT + (config.view_height - self[1]) * s,
        )
    }
}

impl ToScreen for f32 {
    type Output = f32;
    fn to_screen(&self, config: &GameConfig) -> f32 {
        self * scale(config)
    }
}

fn entity_color(entity: &Entity) -> Color {
    match &entity.kind {
        EntityKind::DirtPile => Color::from_rgba(120, 85, 50, 255),
        EntityKind::Food => Color::from_rgba(230, 200, 40, 255),
        EntityKind::Pit(_) => Color::from_rgba(30, 30, 30, 255),
        EntityKind::Projectile(p) => match p.kind {
            ProjectileKind::Spray => Color::from_rgba(0, 100, 255, 255),
            ProjectileKind::Flame => Color::from_rgba(255, 120, 0, 255),
        },
        EntityKind::Goodie(g) => match g.kind {
            GoodieKind::Health => Color::from_rgba(0, 200, 80, 255),
            GoodieKind::FlameThrower => Color::from_rgba(255, 60, 0, 255),
            GoodieKind::ExtraLife => Color::from_rgba(200, 0, 200, 255),
            GoodieKind::Fungus => Color::from_rgba(90, 120, 60, 255),
        },
        EntityKind::Bacterium(b) => match b.strain {
            Strain::RegularSalmonella => Color::from_rgba(255, 150, 150, 255),
            Strain::AggressiveSalmonella => Color::from_rgba(220, 20, 60, 255),
            Strain::Ecoli => Color::from_rgba(120, 60, 200, 255),
        },
    }
}

pub fn draw_dish(config: &GameConfig) {
    let (cx, cy) = config.center();
    let center = ndarray::array![cx, cy].to_screen(config);
    draw_circle(
        center.x,
        center.y,
        config.view_radius.to_screen(config),
        Color::from_rgba(235, 240, 235, 255),
    );
    draw_circle_lines(
        center.x,
        center.y,
        config.view_radius.to_screen(config),
        2.0,
        GRAY,
    );
}

pub fn draw_entities(world: &World) {
    let config = world.config();
    let radius = (config.sprite_width / 2.0).to_screen(config);

    // props first, actors on top
    let mut ordered: Vec<&Entity> = world.entities().iter().collect();
    ordered.sort_by_key(|e| std::cmp::Reverse(e.body.depth));

    for entity in ordered {
        let screen_pos = entity.pos().to_screen(config);
        let r = match entity.kind {
            EntityKind::Projectile(_) => radius * 0.5,
            EntityKind::Pit(_) => radius * 1.5,
            _ => radius,
        };
        draw_circle(screen_pos.x, screen_pos.y, r, entity_color(entity));
    }
}

pub fn draw_player(player: &Player, config: &GameConfig) {
    let screen_pos = player.pos().to_screen(config);
    let radius = (config.sprite_width / 2.0).to_screen(config);
    draw_circle(
        screen_pos.x,
        screen_pos.y,
        radius,
        Color::from_rgba(0, 60, 160, 255),
    );

    // facing indicator
    let tip = player.position_ahead(config.sprite_width).to_screen(config);
    draw_line(screen_pos.x, screen_pos.y, tip.x, tip.y, 2.0, BLACK);
}

pub fn draw_status(text: &str) {
    draw_text(text, 8.0, 20.0, 20.0, DARKGRAY);
}
