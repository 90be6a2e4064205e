// Coin bucket demo: F drops a fill coin, G ten at once, S a spill coin,
// R starts over. The physics lives in the library; this binary only draws.
use bevy::prelude::*;

use coinfall::{CoinKind, CoinSim, CoinfallPlugin};

const DEMO_CAPACITY: u32 = 100;
const COIN_RADIUS: f32 = 4.0;

#[derive(Resource, Default)]
struct Targets {
    fill: u32,
    spill: u32,
}

#[derive(Component)]
struct HudText;

fn sim_to_world(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y - 220.0)
}

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(CoinfallPlugin)
        .init_resource::<Targets>()
        .add_systems(Startup, init)
        .add_systems(Update, (controls, draw_scene, update_hud))
        .run();
}

fn init(mut commands: Commands) {
    commands.spawn(Camera2d);
    commands.spawn((
        Text::default(),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        HudText,
    ));
}

fn controls(
    input: Res<ButtonInput<KeyCode>>,
    mut targets: ResMut<Targets>,
    mut sim: ResMut<CoinSim>,
) {
    let mut changed = false;
    if input.just_pressed(KeyCode::KeyF) {
        targets.fill += 1;
        changed = true;
    }
    if input.just_pressed(KeyCode::KeyG) {
        targets.fill += 10;
        changed = true;
    }
    if input.just_pressed(KeyCode::KeyS) {
        targets.spill += 1;
        changed = true;
    }
    if input.just_pressed(KeyCode::KeyR) {
        *targets = Targets::default();
        changed = true;
    }
    if changed {
        sim.set_targets(targets.fill, targets.spill, DEMO_CAPACITY);
        info!("targets set to fill={} spill={}", targets.fill, targets.spill);
    }
}

fn draw_scene(sim: Res<CoinSim>, mut gizmos: Gizmos) {
    let bucket = sim.bucket();
    let wall = Color::srgb(0.6, 0.6, 0.65);
    let bottom = bucket.bottom_half_width();
    let top = bucket.top_half_width();
    let rim = bucket.height();
    gizmos.line_2d(sim_to_world(-bottom, 0.0), sim_to_world(-top, rim), wall);
    gizmos.line_2d(sim_to_world(bottom, 0.0), sim_to_world(top, rim), wall);
    gizmos.line_2d(sim_to_world(-bottom, 0.0), sim_to_world(bottom, 0.0), wall);

    // Pile profile, on the outside scale.
    let pile = Color::srgb(0.35, 0.3, 0.1);
    let heights = bucket.heights();
    for i in 1..heights.len() {
        gizmos.line_2d(
            sim_to_world(bucket.cell_center_x(i - 1), heights[i - 1]),
            sim_to_world(bucket.cell_center_x(i), heights[i]),
            pile,
        );
    }

    let gold = Color::srgb(0.9, 0.75, 0.2);
    let silver = Color::srgb(0.7, 0.7, 0.75);
    for coin in sim.coins() {
        let color = match coin.kind {
            CoinKind::Fill => gold,
            CoinKind::Spill => silver,
        };
        gizmos.circle_2d(
            sim_to_world(coin.position.x, coin.position.y),
            COIN_RADIUS,
            color,
        );
    }
}

// Skipped entirely while the simulation is settled and unchanged.
fn update_hud(sim: Res<CoinSim>, mut query: Query<&mut Text, With<HudText>>) {
    if !sim.is_changed() {
        return;
    }
    for mut text in &mut query {
        text.0 = format!(
            "fill: {}\nspill: {}\ncoins: {}\n{}",
            sim.fill(),
            sim.spill(),
            sim.coin_count(),
            if sim.is_settled() { "settled" } else { "moving" },
        );
    }
}
