//!
//! The arena module contains code to set up the environment in which the
//! game is played: the camera, the background fill (flat or gradient), the
//! optional vignette frame, and the dashed net down the middle.
//!

// -------------------------------------------------------------------------------------------------
// Included Symbols

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::camera::ScalingMode;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::sprite::AlphaMode2d;

use crate::common::*;

// -------------------------------------------------------------------------------------------------
// Constants

const BACKGROUND_TOP: Color = Color::srgb(0.043, 0.063, 0.125);
const BACKGROUND_BOTTOM: Color = Color::srgb(0.027, 0.063, 0.137);
const NET_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.12);
const VIGNETTE_ALPHA: f32 = 0.35;

// Dash geometry of the center net, in field pixels
const NET_DASH_WIDTH: f32 = 4.0;
const NET_DASH_HEIGHT: f32 = 12.0;
const NET_DASH_SPACING: f32 = 28.0;
const NET_DASH_INSET: f32 = 6.0;

// The vignette fades from transparent at this fraction of the field out to
// full strength at the edges.
const VIGNETTE_INNER_SCALE: f32 = 0.7;

// -------------------------------------------------------------------------------------------------
// Public API

///
/// The ArenaPlugin sets up the playfield environment: a single 2d camera
/// scaled to keep the whole 800x500 field visible, the background fill, and
/// the dashed center net. Which decorations appear is controlled by the
/// VisualStyle resource, which must be present before Startup runs.
///
pub struct ArenaPlugin;

impl Plugin for ArenaPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera.in_set(Systems::CameraSetup))
            .add_systems(Startup, setup_arena.in_set(Systems::ArenaSetup));
    }
}

/// These SystemSets are used to control any system ordering dependencies on this plugin
#[derive(SystemSet, Debug, Clone, Hash, PartialEq, Eq)]
pub enum Systems {
    /// Implements all logic to create the 2d camera entity. Must be in Startup.
    CameraSetup,

    /// Implements all logic to create the background, vignette, and net. Must be in Startup.
    ArenaSetup,
}

// -------------------------------------------------------------------------------------------------
// Private Components

// Marker for the background fill entity
#[derive(Component)]
struct BackgroundFill;

// Marker for the vignette frame entity
#[derive(Component)]
struct VignetteFrame;

// Marker for the dashed center net entity
#[derive(Component)]
struct CenterNet;

// -------------------------------------------------------------------------------------------------
// Private Systems

// Sets up the 2D camera focused on the playfield
fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scaling_mode: ScalingMode::AutoMin {
                min_width: FIELD_WIDTH,
                min_height: FIELD_HEIGHT,
            },
            ..OrthographicProjection::default_2d()
        }),
    ));
}

// Sets up the playfield scenery according to the configured visual style
fn setup_arena(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    style: Res<VisualStyle>,
) {
    // Background fill, either a flat dark blue or a subtle vertical gradient
    let background_mesh = if style.gradient_background {
        add_gradient_quad(
            &mut meshes,
            Vec2::new(FIELD_WIDTH, FIELD_HEIGHT),
            BACKGROUND_TOP,
            BACKGROUND_BOTTOM,
        )
    } else {
        meshes.add(Rectangle::from_size(Vec2::new(FIELD_WIDTH, FIELD_HEIGHT)))
    };
    let background_material = if style.gradient_background {
        // Vertex colors carry the gradient; the material itself stays white
        materials.add(ColorMaterial::from_color(Color::WHITE))
    } else {
        materials.add(ColorMaterial::from_color(BACKGROUND_TOP))
    };
    commands.spawn((
        BackgroundFill,
        Mesh2d(background_mesh),
        MeshMaterial2d(background_material),
        Transform::from_translation(Vec3::new(0f32, 0f32, Z_BACKGROUND)),
    ));

    // Soft vignette frame darkening the field edges
    if style.vignette {
        commands.spawn((
            VignetteFrame,
            Mesh2d(add_vignette_mesh(&mut meshes)),
            MeshMaterial2d(materials.add(ColorMaterial {
                color: Color::WHITE,
                alpha_mode: AlphaMode2d::Blend,
                ..default()
            })),
            Transform::from_translation(Vec3::new(0f32, 0f32, Z_VIGNETTE)),
        ));
    }

    // Dashed net down the middle to separate the two sides
    commands.spawn((
        CenterNet,
        Mesh2d(add_net_mesh(&mut meshes)),
        MeshMaterial2d(materials.add(ColorMaterial {
            color: NET_COLOR,
            alpha_mode: AlphaMode2d::Blend,
            ..default()
        })),
        Transform::from_translation(Vec3::new(0f32, 0f32, Z_BEHIND_GAMEPLAY)),
    ));
}

// -------------------------------------------------------------------------------------------------
// Private Functions

// Appends the 4 corner vertices of an axis-aligned quad to a vertex Vec,
// and the 6 indices forming its 2 triangles to an index Vec.
fn push_quad(
    vertices: &mut Vec<[f32; 3]>,
    indices: &mut Vec<u16>,
    corners: [Vec2; 4],
) {
    let base = vertices.len() as u16;
    for corner in corners {
        vertices.push([corner.x, corner.y, 0.0]);
    }
    indices.extend_from_slice(&[base, base + 1, base + 2]);
    indices.extend_from_slice(&[base, base + 2, base + 3]);
}

//
// Generates a single quad of the given size, centered at the origin, with
// vertex colors running from `top` along the upper edge to `bottom` along the
// lower edge. Adds it to the provided Assets<Mesh> and returns the handle.
// Also used by the paddle module for the paddle gradients.
//
pub(crate) fn add_gradient_quad(
    meshes: &mut Assets<Mesh>,
    size: Vec2,
    top: Color,
    bottom: Color,
) -> Handle<Mesh> {
    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );

    let half = size / 2f32;
    let mut vertices: Vec<[f32; 3]> = Vec::new();
    let mut indices: Vec<u16> = Vec::new();
    push_quad(
        &mut vertices,
        &mut indices,
        [
            Vec2::new(-half.x, half.y),  // Top Left
            Vec2::new(half.x, half.y),   // Top Right
            Vec2::new(half.x, -half.y),  // Bottom Right
            Vec2::new(-half.x, -half.y), // Bottom Left
        ],
    );

    let top_rgba = top.to_linear().to_f32_array();
    let bottom_rgba = bottom.to_linear().to_f32_array();
    let colors = vec![top_rgba, top_rgba, bottom_rgba, bottom_rgba];

    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, vertices);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
    mesh.insert_indices(Indices::U16(indices));
    meshes.add(mesh)
}

//
// Generates a rectangular frame mesh covering the field border: fully
// transparent along an inner rectangle and fading to translucent black at the
// outer field edges. A rectangular-frame approximation of the original's
// radial vignette.
//
fn add_vignette_mesh(meshes: &mut Assets<Mesh>) -> Handle<Mesh> {
    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );

    let outer = Vec2::new(FIELD_WIDTH, FIELD_HEIGHT) / 2f32;
    let inner = outer * VIGNETTE_INNER_SCALE;

    // 4 outer corners then 4 inner corners, both clockwise from top left
    let corners = |half: Vec2| {
        [
            Vec2::new(-half.x, half.y),
            Vec2::new(half.x, half.y),
            Vec2::new(half.x, -half.y),
            Vec2::new(-half.x, -half.y),
        ]
    };
    let mut vertices: Vec<[f32; 3]> = Vec::new();
    let mut colors: Vec<[f32; 4]> = Vec::new();
    for corner in corners(outer) {
        vertices.push([corner.x, corner.y, 0.0]);
        colors.push([0.0, 0.0, 0.0, VIGNETTE_ALPHA]);
    }
    for corner in corners(inner) {
        vertices.push([corner.x, corner.y, 0.0]);
        colors.push([0.0, 0.0, 0.0, 0.0]);
    }

    // One quad per side of the frame, stitching outer edge i -> i+1 to the
    // matching inner edge.
    let mut indices: Vec<u16> = Vec::new();
    for i in 0..4u16 {
        let o0 = i;
        let o1 = (i + 1) % 4;
        let i0 = o0 + 4;
        let i1 = o1 + 4;
        indices.extend_from_slice(&[o0, o1, i1]);
        indices.extend_from_slice(&[o0, i1, i0]);
    }

    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, vertices);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
    mesh.insert_indices(Indices::U16(indices));
    meshes.add(mesh)
}

//
// Generates a mesh for the dashed vertical net down the middle of the field
// and adds it to the provided Assets<Mesh>, returning the handle. Dashes run
// top to bottom on the original's spacing grid.
//
fn add_net_mesh(meshes: &mut Assets<Mesh>) -> Handle<Mesh> {
    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );

    let mut vertices: Vec<[f32; 3]> = Vec::new();
    let mut indices: Vec<u16> = Vec::new();

    let x_mag = NET_DASH_WIDTH / 2f32;
    let mut row = 0f32;
    while row < FIELD_HEIGHT {
        let dash_top = row + NET_DASH_INSET;
        let dash_bottom = (dash_top + NET_DASH_HEIGHT).min(FIELD_HEIGHT);
        if dash_top >= FIELD_HEIGHT {
            break;
        }

        // Field y grows downward, world y grows upward
        let top_y = field_to_world(0f32, dash_top).y;
        let bottom_y = field_to_world(0f32, dash_bottom).y;
        push_quad(
            &mut vertices,
            &mut indices,
            [
                Vec2::new(-x_mag, top_y),
                Vec2::new(x_mag, top_y),
                Vec2::new(x_mag, bottom_y),
                Vec2::new(-x_mag, bottom_y),
            ],
        );

        row += NET_DASH_SPACING;
    }

    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, vertices);
    mesh.insert_indices(Indices::U16(indices));
    meshes.add(mesh)
}

// -------------------------------------------------------------------------------------------------
// Unit Tests

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::query::QuerySingleError::{MultipleEntities, NoEntities};
    use bevy::render::mesh::VertexAttributeValues;
    use bevy_test_helpers::prelude::*;

    #[test]
    fn test_plugin_sys_added_camera() {
        validate_sys_in_plugin(ArenaPlugin, Startup, setup_camera, Some(Systems::CameraSetup));
    }

    #[test]
    fn test_plugin_sys_added_arena() {
        validate_sys_in_plugin(ArenaPlugin, Startup, setup_arena, Some(Systems::ArenaSetup));
    }

    #[test]
    fn test_camera_setup_system() {
        let mut world = World::default();
        let setup_sys = world.register_system(setup_camera);

        // Run the system and validate 1 Camera was created with correct Projection
        world.run_system(setup_sys).unwrap();
        let mut query = world.query_filtered::<&Projection, With<Camera2d>>();
        match query.single(&world) {
            Ok(Projection::Orthographic(proj)) => match proj.scaling_mode {
                ScalingMode::AutoMin {
                    min_width,
                    min_height,
                } => {
                    assert_eq!(
                        min_width, FIELD_WIDTH,
                        "Expected ScalingMode min_width of FIELD_WIDTH, but got {min_width}",
                    );
                    assert_eq!(
                        min_height, FIELD_HEIGHT,
                        "Expected ScalingMode min_height of FIELD_HEIGHT, but got {min_height}",
                    );
                }
                _ => panic!("Expected Scaling Mode AutoMin, got {:?}", proj.scaling_mode),
            },
            Ok(proj) => panic!("Expected Camera with OrthographicProjection, got {proj:?}"),
            Err(NoEntities(_)) => panic!("Expected single Camera, but none found."),
            Err(MultipleEntities(_)) => panic!("Expected single Camera, but found multiple."),
        }
    }

    #[test]
    fn test_arena_setup_rich_style() {
        let mut world = arena_test_world(VisualStyle::default());

        let setup_sys = world.register_system(setup_arena);
        world.run_system(setup_sys).unwrap();

        assert_eq!(
            world.query::<&BackgroundFill>().iter(&world).count(),
            1,
            "Expected exactly one background entity",
        );
        assert_eq!(
            world.query::<&VignetteFrame>().iter(&world).count(),
            1,
            "Expected a vignette entity in the rich style",
        );
        assert_eq!(
            world.query::<&CenterNet>().iter(&world).count(),
            1,
            "Expected exactly one net entity",
        );

        // The rich background carries the gradient in its vertex colors
        let mut query = world.query_filtered::<&Mesh2d, With<BackgroundFill>>();
        let handle = query.single(&world).unwrap();
        let meshes = world.get_resource::<Assets<Mesh>>().unwrap();
        let mesh = meshes.get(handle.id()).expect("Expected background mesh asset");
        assert!(
            mesh.attribute(Mesh::ATTRIBUTE_COLOR).is_some(),
            "Expected gradient background mesh to carry vertex colors",
        );
    }

    #[test]
    fn test_arena_setup_minimal_style() {
        let mut world = arena_test_world(VisualStyle::minimal());

        let setup_sys = world.register_system(setup_arena);
        world.run_system(setup_sys).unwrap();

        assert_eq!(
            world.query::<&BackgroundFill>().iter(&world).count(),
            1,
            "Expected a background entity in the minimal style",
        );
        assert_eq!(
            world.query::<&VignetteFrame>().iter(&world).count(),
            0,
            "Expected no vignette entity in the minimal style",
        );
        assert_eq!(
            world.query::<&CenterNet>().iter(&world).count(),
            1,
            "Expected the net to be drawn in every style",
        );
    }

    #[test]
    fn test_gradient_quad_mesh() {
        let mut meshes = Assets::<Mesh>::default();
        let handle = add_gradient_quad(
            &mut meshes,
            Vec2::new(10f32, 4f32),
            Color::srgb(1.0, 0.0, 0.0),
            Color::srgb(0.0, 0.0, 1.0),
        );
        let mesh = meshes.get(handle.id()).expect("Expected mesh to be added");

        let VertexAttributeValues::Float32x3(verts) = mesh
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .expect("Expected positional vertex data")
        else {
            panic!("Expected positional values in Float32x3 format");
        };
        assert_eq!(verts.len(), 4, "Expected 4 vertices in a quad");
        for vert in verts {
            assert_eq!(vert[0].abs(), 5f32, "Expected quad corner x magnitude 5");
            assert_eq!(vert[1].abs(), 2f32, "Expected quad corner y magnitude 2");
        }

        let VertexAttributeValues::Float32x4(colors) = mesh
            .attribute(Mesh::ATTRIBUTE_COLOR)
            .expect("Expected vertex colors")
        else {
            panic!("Expected color values in Float32x4 format");
        };
        for (vert, color) in verts.iter().zip(colors) {
            if vert[1] > 0f32 {
                assert!(color[0] > 0.9, "Expected top vertices to carry the top color");
            } else {
                assert!(color[2] > 0.9, "Expected bottom vertices to carry the bottom color");
            }
        }
    }

    #[test]
    fn test_vignette_mesh() {
        let mut meshes = Assets::<Mesh>::default();
        let handle = add_vignette_mesh(&mut meshes);
        let mesh = meshes.get(handle.id()).expect("Expected mesh to be added");

        let VertexAttributeValues::Float32x3(verts) = mesh
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .expect("Expected positional vertex data")
        else {
            panic!("Expected positional values in Float32x3 format");
        };
        assert_eq!(verts.len(), 8, "Expected 8 vertices (outer + inner rect)");

        let VertexAttributeValues::Float32x4(colors) = mesh
            .attribute(Mesh::ATTRIBUTE_COLOR)
            .expect("Expected vertex colors")
        else {
            panic!("Expected color values in Float32x4 format");
        };
        for (vert, color) in verts.iter().zip(colors) {
            let on_outer_rect = vert[0].abs() == FIELD_WIDTH / 2f32;
            let expected_alpha = if on_outer_rect { VIGNETTE_ALPHA } else { 0f32 };
            assert_eq!(
                color[3], expected_alpha,
                "Expected alpha {expected_alpha} at vertex {vert:?}",
            );
        }

        let Indices::U16(indices) = mesh.indices().expect("Expected indices in mesh") else {
            panic!("Expected u16 indices for mesh");
        };
        assert_eq!(indices.len(), 24, "Expected 2 triangles per frame side");
    }

    #[test]
    fn test_net_mesh() {
        let mut meshes = Assets::<Mesh>::default();
        let handle = add_net_mesh(&mut meshes);
        let mesh = meshes.get(handle.id()).expect("Expected mesh to be added");

        let VertexAttributeValues::Float32x3(verts) = mesh
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .expect("Expected positional vertex data")
        else {
            panic!("Expected positional values in Float32x3 format");
        };

        // One dash per spacing row: rows at 0, 28, ... below FIELD_HEIGHT
        let expected_dashes = (FIELD_HEIGHT / NET_DASH_SPACING).ceil() as usize;
        assert_eq!(
            verts.len(),
            expected_dashes * 4,
            "Expected 4 vertices for each of {expected_dashes} dashes",
        );

        for vert in verts {
            assert_eq!(
                vert[0].abs(),
                NET_DASH_WIDTH / 2f32,
                "Expected dash vertices on the net's width envelope",
            );
            assert!(
                vert[1].abs() <= FIELD_HEIGHT / 2f32,
                "Expected dash vertices inside the field, got y {}",
                vert[1],
            );
        }

        let Indices::U16(indices) = mesh.indices().expect("Expected indices in mesh") else {
            panic!("Expected u16 indices for mesh");
        };
        assert_eq!(
            indices.len(),
            expected_dashes * 6,
            "Expected 2 triangles per dash",
        );
    }

    // --- Helper Functions ---

    fn arena_test_world(style: VisualStyle) -> World {
        let mut world = World::default();
        world.init_resource::<Assets<Mesh>>();
        world.init_resource::<Assets<ColorMaterial>>();
        world.insert_resource(style);
        world
    }
}
