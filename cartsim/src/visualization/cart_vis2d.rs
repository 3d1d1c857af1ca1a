use bevy::prelude::*;
use tracing::info;

use crate::simulation::host::FrameRequest;
use crate::simulation::scenario::Scenario;
use crate::simulation::session::{SessionController, StartOutcome, TickResult};

/// Bevy resource: the session plus the frame it asked for, if any
#[derive(Resource)]
struct CartSession {
    controller: SessionController,
    pending: Option<FrameRequest>,
}

#[derive(Component)]
struct Cart;

#[derive(Component)]
struct ForceArrow;

#[derive(Component)]
struct Readout;

const CART_WIDTH: f32 = 80.0;
const CART_HEIGHT: f32 = 40.0;
const FINISH_WIDTH: f32 = 8.0;
const TRACK_Y: f32 = -40.0;

const MASS_STEP: f64 = 0.1;
const MASS_RANGE: (f64, f64) = (0.5, 5.0);
const FORCE_STEP: f64 = 0.1;
const FORCE_RANGE: (f64, f64) = (-1.0, 5.0);

/// Heavier carts are drawn slightly larger
pub fn cart_scale(mass: f64) -> f64 {
    1.0 + (mass - 1.0) * 0.1
}

/// Force arrow length in pixels, never shorter than 6
pub fn force_arrow_width(force: f64) -> f64 {
    (10.0 + force * 30.0).max(6.0)
}

pub fn run_2d(scenario: Scenario) {
    info!("run_2d: starting Bevy viewer, track {} px", scenario.track.pixel_length);

    App::new()
        .insert_resource(CartSession { controller: scenario.into_controller(), pending: None })
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_track_system)
        .add_systems(Update, (controls_system, frame_system, sync_cart_system).chain())
        .run();
}

fn track_left(pixel_length: f32) -> f32 {
    -(pixel_length + CART_WIDTH + FINISH_WIDTH) / 2.0
}

fn setup_track_system(mut commands: Commands, session: Res<CartSession>) {
    commands.spawn(Camera2dBundle::default());

    let px = session.controller.track().pixel_length as f32;
    let left = track_left(px);
    let full = px + CART_WIDTH + FINISH_WIDTH;

    // rail
    commands.spawn(SpriteBundle {
        sprite: Sprite {
            color: Color::srgb(0.35, 0.35, 0.4),
            custom_size: Some(Vec2::new(full, 6.0)),
            ..Default::default()
        },
        transform: Transform::from_xyz(left + full / 2.0, TRACK_Y - CART_HEIGHT / 2.0 - 3.0, 0.0),
        ..Default::default()
    });

    // finish line
    commands.spawn(SpriteBundle {
        sprite: Sprite {
            color: Color::srgb(0.9, 0.3, 0.3),
            custom_size: Some(Vec2::new(FINISH_WIDTH, CART_HEIGHT * 2.0)),
            ..Default::default()
        },
        transform: Transform::from_xyz(left + px + CART_WIDTH + FINISH_WIDTH / 2.0, TRACK_Y, 0.0),
        ..Default::default()
    });

    commands.spawn((
        SpriteBundle {
            sprite: Sprite {
                color: Color::srgb(0.1, 0.74, 0.61),
                custom_size: Some(Vec2::new(CART_WIDTH, CART_HEIGHT)),
                ..Default::default()
            },
            transform: Transform::from_xyz(left + CART_WIDTH / 2.0, TRACK_Y, 1.0),
            ..Default::default()
        },
        Cart,
    ));

    commands.spawn((
        SpriteBundle {
            sprite: Sprite {
                color: Color::srgb(1.0, 0.5, 0.3),
                custom_size: Some(Vec2::new(6.0, 4.0)),
                ..Default::default()
            },
            transform: Transform::from_xyz(left, TRACK_Y, 2.0),
            ..Default::default()
        },
        ForceArrow,
    ));

    commands.spawn((
        Text2dBundle {
            text: Text::from_section(
                "",
                TextStyle { font_size: 22.0, color: Color::WHITE, ..Default::default() },
            ),
            transform: Transform::from_xyz(0.0, 120.0, 1.0),
            ..Default::default()
        },
        Readout,
    ));
}

/// Keyboard stands in for the sliders and buttons
fn controls_system(keys: Res<ButtonInput<KeyCode>>, time: Res<Time>, mut session: ResMut<CartSession>) {
    let CartSession { controller, pending } = &mut *session;
    let cfg = *controller.config();

    // errors are logged by the controller and leave the value unchanged
    if keys.just_pressed(KeyCode::ArrowUp) {
        let _ = controller.set_mass((cfg.mass + MASS_STEP).min(MASS_RANGE.1));
    }
    if keys.just_pressed(KeyCode::ArrowDown) {
        let _ = controller.set_mass((cfg.mass - MASS_STEP).max(MASS_RANGE.0));
    }
    if keys.just_pressed(KeyCode::ArrowRight) {
        let _ = controller.set_force((cfg.force + FORCE_STEP).min(FORCE_RANGE.1));
    }
    if keys.just_pressed(KeyCode::ArrowLeft) {
        let _ = controller.set_force((cfg.force - FORCE_STEP).max(FORCE_RANGE.0));
    }

    if keys.just_pressed(KeyCode::Space) {
        if let StartOutcome::Started(req) = controller.request_start(time.elapsed_seconds_f64() * 1000.0) {
            *pending = Some(req);
        }
    }
    if keys.just_pressed(KeyCode::KeyR) {
        *pending = None;
        controller.request_reset();
    }
    if keys.just_pressed(KeyCode::KeyC) {
        controller.clear_ledger();
    }
    if keys.just_pressed(KeyCode::Backspace) {
        let last = controller.ledger().len();
        if controller.delete_ledger_entry(last).is_ok() {
            info!("\n{}", controller.ledger());
        }
    }
    if keys.just_pressed(KeyCode::KeyG) {
        let last = controller.ledger().len();
        let guess = controller.ledger().get(last).ok().and_then(|r| r.theoretical_acceleration());
        if let Some(guess) = guess {
            if let Ok(verdict) = controller.submit_grade(last, guess) {
                info!(row = last, guess, "{verdict}");
            }
        }
    }
}

/// One frame callback per Bevy frame while a run wants one
fn frame_system(time: Res<Time>, mut session: ResMut<CartSession>) {
    let Some(req) = session.pending.take() else {
        return;
    };
    let now_ms = time.elapsed_seconds_f64() * 1000.0;
    let result = session.controller.tick(req, now_ms);
    match result {
        TickResult::Continue { next, .. } => session.pending = Some(next),
        TickResult::Finished { row, .. } => {
            info!(row, "finish line reached\n{}", session.controller.ledger());
        }
        TickResult::Stale => {}
    }
}

fn sync_cart_system(
    session: Res<CartSession>,
    mut carts: Query<&mut Transform, (With<Cart>, Without<ForceArrow>)>,
    mut arrows: Query<(&mut Sprite, &mut Transform), (With<ForceArrow>, Without<Cart>)>,
    mut readouts: Query<&mut Text, With<Readout>>,
) {
    let controller = &session.controller;
    let cfg = controller.config();
    let snapshot = controller.snapshot();
    let left = track_left(controller.track().pixel_length as f32);
    let cart_x = left + CART_WIDTH / 2.0 + snapshot.visual_position as f32;
    let scale = cart_scale(cfg.mass) as f32;

    for mut transform in &mut carts {
        transform.translation.x = cart_x;
        transform.translation.y = TRACK_Y + (scale - 1.0) * CART_HEIGHT / 2.0;
        transform.scale = Vec3::splat(scale);
    }

    let arrow = force_arrow_width(cfg.force) as f32;
    for (mut sprite, mut transform) in &mut arrows {
        sprite.custom_size = Some(Vec2::new(arrow, 4.0));
        transform.translation.x = cart_x - CART_WIDTH * scale / 2.0 - arrow / 2.0;
    }

    for mut text in &mut readouts {
        text.sections[0].value = format!(
            "{}   {}\nMass: {:.1} kg   Force: {:.1} N   [{}]\nSpace start  R reset  arrows mass/force  C clear  Backspace delete  G grade",
            snapshot.display.time_label(),
            snapshot.display.velocity_label(),
            cfg.mass,
            cfg.force,
            snapshot.state,
        );
    }
}
