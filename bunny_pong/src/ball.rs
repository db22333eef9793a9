//!
//! This module contains code to manage the on-screen ball: a radial-gradient
//! circle with, in the richer visual style, a layered rabbit icon drawn on
//! top of it. The ball's motion is owned entirely by the simulation; this
//! module only mirrors the simulated position each frame.
//!

// -------------------------------------------------------------------------------------------------
// Included Symbols

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::sprite::AlphaMode2d;

use crate::common::*;
use crate::sim::GameState;

// -------------------------------------------------------------------------------------------------
// Constants

// Radial gradient of the ball: white core fading to a pale blue rim
const BALL_CORE_COLOR: Color = Color::WHITE;
const BALL_RIM_COLOR: Color = Color::srgb(0.561, 0.737, 1.0);
const BALL_RIM_SEGMENTS: usize = 32;

// Rabbit palette, matching the original's icon
const RABBIT_FUR: Color = Color::WHITE;
const RABBIT_INNER_EAR: Color = Color::srgb(1.0, 0.839, 0.878);
const RABBIT_EYE: Color = Color::srgb(0.133, 0.133, 0.133);
const RABBIT_NOSE: Color = Color::srgb(1.0, 0.482, 0.612);
const RABBIT_SHADOW: Color = Color::srgba(0.0, 0.0, 0.0, 0.18);

// Tilt of the ears away from vertical, in radians
const EAR_TILT: f32 = 0.18;

// -------------------------------------------------------------------------------------------------
// Public API

///
/// This plugin adds the ball entity and keeps it in sync with the simulated
/// ball position. Depending on the VisualStyle resource (which must exist
/// before Startup), the ball is decorated with rabbit icon child entities.
///
pub struct BallPlugin;

impl Plugin for BallPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_ball)
            .add_systems(Update, sync_ball.in_set(FrameSet::Render));
    }
}

///
/// Identifies the ball entity in the game world. Exposed to allow disjoint
/// queries using With/Without filters.
///
#[derive(Component)]
pub struct Ball;

// -------------------------------------------------------------------------------------------------
// Private Components

// Marker for the decorative rabbit part entities parented to the ball
#[derive(Component)]
struct BallDecor;

// -------------------------------------------------------------------------------------------------
// Private Systems

//
// Adds the ball entity, centered to match the initial simulation state, and
// its decorative children when the rabbit style is enabled. All the rabbit
// parts are plain primitive meshes laid out relative to the ball center, so
// they track the ball for free through the transform hierarchy.
//
fn setup_ball(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    style: Res<VisualStyle>,
) {
    let center = field_to_world(FIELD_WIDTH / 2f32, FIELD_HEIGHT / 2f32);
    let mut ball = commands.spawn((
        Ball,
        Mesh2d(add_ball_mesh(&mut meshes)),
        MeshMaterial2d(materials.add(ColorMaterial::from_color(Color::WHITE))),
        Transform::from_translation(center.extend(Z_GAMEPLAY)),
    ));

    if style.rabbit_ball {
        ball.with_children(|parent| {
            spawn_rabbit_parts(parent, &mut meshes, &mut materials);
        });
    }
}

// Mirrors the simulated ball position onto the ball entity.
fn sync_ball(state: Res<GameState>, ball_tf: Single<&mut Transform, With<Ball>>) {
    let center = field_to_world(
        state.ball_x + BALL_SIZE / 2f32,
        state.ball_y + BALL_SIZE / 2f32,
    );
    let tf = ball_tf.into_inner().into_inner();
    tf.translation.x = center.x;
    tf.translation.y = center.y;
}

// -------------------------------------------------------------------------------------------------
// Private Functions

//
// Generates a triangle-fan circle mesh for the ball with a radial gradient
// carried in vertex colors: a white core vertex surrounded by a pale blue
// rim. Adds it to the provided Assets<Mesh> and returns the handle.
//
fn add_ball_mesh(meshes: &mut Assets<Mesh>) -> Handle<Mesh> {
    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );

    let radius = BALL_SIZE / 2f32;
    let core_rgba = BALL_CORE_COLOR.to_linear().to_f32_array();
    let rim_rgba = BALL_RIM_COLOR.to_linear().to_f32_array();

    let mut vertices: Vec<[f32; 3]> = vec![[0.0, 0.0, 0.0]];
    let mut colors: Vec<[f32; 4]> = vec![core_rgba];
    for segment in 0..BALL_RIM_SEGMENTS {
        let angle = (segment as f32 / BALL_RIM_SEGMENTS as f32) * std::f32::consts::TAU;
        vertices.push([radius * angle.cos(), radius * angle.sin(), 0.0]);
        colors.push(rim_rgba);
    }

    let mut indices: Vec<u16> = Vec::new();
    for segment in 0..BALL_RIM_SEGMENTS as u16 {
        let next = (segment + 1) % BALL_RIM_SEGMENTS as u16;
        indices.extend_from_slice(&[0, 1 + segment, 1 + next]);
    }

    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, vertices);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
    mesh.insert_indices(Indices::U16(indices));
    meshes.add(mesh)
}

//
// Spawns the layered rabbit icon as children of the ball entity. Offsets are
// fractions of the ball size, translated from the original icon's layout
// (which is in y-down coordinates) into y-up world space. Z offsets keep the
// stacking order of the layers stable.
//
fn spawn_rabbit_parts(
    parent: &mut ChildSpawnerCommands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<ColorMaterial>,
) {
    let s = BALL_SIZE;
    let fur = materials.add(ColorMaterial::from_color(RABBIT_FUR));
    let inner_ear = materials.add(ColorMaterial::from_color(RABBIT_INNER_EAR));

    // Soft shadow under the rabbit
    parent.spawn((
        BallDecor,
        Mesh2d(meshes.add(Ellipse::new(0.7 * s, 0.25 * s))),
        MeshMaterial2d(materials.add(ColorMaterial {
            color: RABBIT_SHADOW,
            alpha_mode: AlphaMode2d::Blend,
            ..default()
        })),
        Transform::from_translation(Vec3::new(0.0, -0.7 * s, 0.01)),
    ));

    // Body, then head on top of it
    parent.spawn((
        BallDecor,
        Mesh2d(meshes.add(Ellipse::new(0.6 * s, 0.45 * s))),
        MeshMaterial2d(fur.clone()),
        Transform::from_translation(Vec3::new(0.0, -0.22 * s, 0.02)),
    ));
    parent.spawn((
        BallDecor,
        Mesh2d(meshes.add(Circle::new(0.45 * s))),
        MeshMaterial2d(fur.clone()),
        Transform::from_translation(Vec3::new(0.0, 0.0, 0.03)),
    ));

    // Ears: white outer shapes with pink inner linings, tilted outward
    for dir in [-1f32, 1f32] {
        let rotation = Quat::from_rotation_z(-dir * EAR_TILT);
        parent.spawn((
            BallDecor,
            Mesh2d(meshes.add(Ellipse::new(0.18 * s, 0.48 * s))),
            MeshMaterial2d(fur.clone()),
            Transform {
                translation: Vec3::new(dir * 0.22 * s, 0.9 * s, 0.04),
                rotation,
                ..default()
            },
        ));
        parent.spawn((
            BallDecor,
            Mesh2d(meshes.add(Ellipse::new(0.08 * s, 0.36 * s))),
            MeshMaterial2d(inner_ear.clone()),
            Transform {
                translation: Vec3::new(dir * 0.22 * s, 0.9 * s, 0.05),
                rotation,
                ..default()
            },
        ));
    }

    // Eye and nose
    parent.spawn((
        BallDecor,
        Mesh2d(meshes.add(Circle::new((0.08 * s).max(1.0)))),
        MeshMaterial2d(materials.add(ColorMaterial::from_color(RABBIT_EYE))),
        Transform::from_translation(Vec3::new(0.14 * s, 0.04 * s, 0.06)),
    ));
    parent.spawn((
        BallDecor,
        Mesh2d(meshes.add(Triangle2d::new(
            Vec2::new(0.0, -0.08 * s),
            Vec2::new(0.06 * s, -0.12 * s),
            Vec2::new(-0.06 * s, -0.12 * s),
        ))),
        MeshMaterial2d(materials.add(ColorMaterial::from_color(RABBIT_NOSE))),
        Transform::from_translation(Vec3::new(0.0, 0.0, 0.07)),
    ));
}

// -------------------------------------------------------------------------------------------------
// Unit Tests
