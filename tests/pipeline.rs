use std::rc::Rc;

use fixraster::camera::FpsCamera;
use fixraster::colors;
use fixraster::math::fixed::{int_to_fixed, Fixed, FIXED_HALF, FIXED_ONE};
use fixraster::prelude::*;
use fixraster::raytrace::{line_of_sight, ray_tri_intersect};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn v(x: i32, y: i32, z: i32) -> Vec3 {
    Vec3::new(int_to_fixed(x), int_to_fixed(y), int_to_fixed(z))
}

/// One triangle in the z = 0 plane, facing a camera on the -Z side when
/// `facing_camera` is set.
fn triangle_model(name: &str, facing_camera: bool, color: u8) -> Model {
    let vertices = if facing_camera { [0, 2, 1] } else { [0, 1, 2] };
    let mesh = MeshData {
        vertices: vec![v(-1, -1, 0), v(1, -1, 0), v(0, 1, 0)],
        normals: vec![Vec3::new(0, 0, -FIXED_ONE)],
        texcoords: vec![Vec2::ZERO],
        faces: vec![Face::new(vertices, 0, [0; 3], 0)],
    };
    let mut model = Model::new(name, mesh);
    model.set_texture(Rc::new(Texture::solid(2, color)));
    model
}

fn textured_cubes(count: usize) -> Vec<Model> {
    let texture = Rc::new(Texture::checkerboard(4, 2, colors::WHITE, colors::BLACK));
    (0..count)
        .map(|i| {
            let mut cube = Model::cube(format!("cube{i}"));
            cube.set_texture(Rc::clone(&texture));
            let mut transform = Transform::new();
            transform.set_position_xyz(int_to_fixed(3 * i as i32 - 6), 0, int_to_fixed(8));
            cube.set_transform(&transform);
            cube
        })
        .collect()
}

fn draw(
    engine: &mut Engine,
    models: &[Model],
    camera: &FpsCamera,
    floor: Option<&Texture>,
) -> (Renderer, FrameStats) {
    let mut renderer = Renderer::default();
    let stats = engine.rasterize(
        &mut renderer.as_framebuffer(),
        models,
        &camera.view_matrix(),
        &Projection::default().matrix(),
        floor,
        colors::SKY,
    );
    (renderer, stats)
}

fn draw_once(models: &[Model], camera: &FpsCamera) -> (Renderer, FrameStats) {
    let mut engine = Engine::new();
    engine.prepare_geometry_storage(models);
    draw(&mut engine, models, camera, None)
}

#[test]
fn geometry_behind_camera_draws_nothing() {
    let models = vec![
        triangle_model("front", true, colors::WHITE),
        triangle_model("back", false, colors::WHITE),
    ];
    let (renderer, stats) = draw_once(&models, &FpsCamera::new(v(0, 0, 5)));
    assert_eq!(renderer.count_pixels_not(colors::SKY), 0);
    assert_eq!(stats.faces_rejected, 2);
    assert_eq!(stats.triangles_drawn, 0);
}

#[test]
fn visible_triangle_draws_pixels() {
    let models = vec![triangle_model("front", true, colors::WHITE)];
    let (renderer, stats) = draw_once(&models, &FpsCamera::new(v(0, 0, -5)));
    assert_eq!(stats.triangles_drawn, 1);
    assert!(renderer.count_pixels_not(colors::SKY) > 100);
}

#[test]
fn swapped_winding_is_culled() {
    let camera = FpsCamera::new(v(0, 0, -5));
    let (front, _) = draw_once(&[triangle_model("front", true, colors::WHITE)], &camera);
    let (back, stats) = draw_once(&[triangle_model("back", false, colors::WHITE)], &camera);

    assert!(front.count_pixels_not(colors::SKY) > 0);
    assert_eq!(back.count_pixels_not(colors::SKY), 0);
    assert_eq!(stats.faces_culled, 1);
}

#[test]
fn draw_order_does_not_depend_on_model_order() {
    let near = triangle_model("near", true, colors::WHITE);
    let mut far = triangle_model("far", true, colors::BLACK);
    far.set_modelview(Mat4::translation(FIXED_HALF, 0, int_to_fixed(2)));

    let camera = FpsCamera::new(v(0, 0, -5));
    let (a, _) = draw_once(&[near, far], &camera);

    let near = triangle_model("near", true, colors::WHITE);
    let mut far = triangle_model("far", true, colors::BLACK);
    far.set_modelview(Mat4::translation(FIXED_HALF, 0, int_to_fixed(2)));
    let (b, _) = draw_once(&[far, near], &camera);

    assert!(a.count_pixels_not(colors::SKY) > 0);
    assert_eq!(a.pixels(), b.pixels());
}

#[test]
fn nearer_face_paints_over_farther_one() {
    let near = triangle_model("near", true, colors::WHITE);
    let mut far = triangle_model("far", true, colors::BLACK);
    far.set_modelview(Mat4::translation(0, 0, int_to_fixed(2)));

    let camera = FpsCamera::new(v(0, 0, -5));
    let (renderer, _) = draw_once(&[near, far], &camera);

    // Both triangles share the view axis; the near one covers the center.
    let center = renderer.pixels()[100 * renderer.width() + 160];
    let white = colors::modulate(colors::WHITE, HemisphereLight::default().shade(Vec3::new(0, 0, -FIXED_ONE)));
    assert_eq!(center, white);
}

#[test]
fn closest_vertex_order_renders_the_same_scene() {
    let near = triangle_model("near", true, colors::WHITE);
    let mut far = triangle_model("far", true, colors::BLACK);
    far.set_modelview(Mat4::translation(FIXED_HALF, 0, int_to_fixed(2)));
    let models = vec![near, far];
    let camera = FpsCamera::new(v(0, 0, -5));

    let (sum, _) = draw_once(&models, &camera);

    let config = RenderConfig {
        depth_order: DepthOrder::ClosestVertex,
        ..RenderConfig::default()
    };
    let mut engine = Engine::with_config(config);
    engine.prepare_geometry_storage(&models);
    let (closest, _) = draw(&mut engine, &models, &camera, None);

    assert_eq!(sum.pixels(), closest.pixels());
}

#[test]
fn storage_follows_growing_and_shrinking_scenes() {
    let camera = FpsCamera::new(v(0, 0, 0));
    let mut engine = Engine::new();

    let mut drawn = Vec::new();
    for count in [2, 1, 5, 3] {
        let models = textured_cubes(count);
        engine.prepare_geometry_storage(&models);
        let (_, stats) = draw(&mut engine, &models, &camera, None);
        assert_eq!(stats.faces_considered, 12 * count);
        drawn.push(stats.triangles_drawn);
    }
    assert_eq!(engine.storage().vertex_capacity(), 5 * 8);
    assert_eq!(engine.storage().face_capacity(), 5 * 12);
    assert!(drawn.iter().all(|&n| n > 0));

    engine.free_geometry_storage();
    assert_eq!(engine.storage().vertex_capacity(), 0);
}

#[test]
fn arena_frame_renders_from_random_viewpoints() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let models = textured_cubes(5);
    let floor = Texture::checkerboard(7, 6, colors::WHITE, colors::BLACK);
    let mut engine = Engine::new();
    engine.prepare_geometry_storage(&models);

    for _ in 0..24 {
        let position = Vec3::new(
            rng.gen_range(-int_to_fixed(40)..int_to_fixed(40)),
            rng.gen_range(int_to_fixed(1)..int_to_fixed(30)),
            rng.gen_range(-int_to_fixed(40)..int_to_fixed(40)),
        );
        let mut camera = FpsCamera::new(position);
        camera.set_yaw(rng.gen_range(0..FIXED_ONE));
        camera.rotate_pitch(rng.gen_range(-FIXED_ONE..FIXED_ONE));

        let (renderer, stats) = draw(&mut engine, &models, &camera, Some(&floor));
        assert_eq!(stats.faces_considered, 60);
        assert_eq!(renderer.pixels().len(), 320 * 200);
    }
}

#[test]
fn png_export_flips_rows() {
    let mut renderer = Renderer::default();
    renderer.clear(colors::BLACK);
    renderer.as_framebuffer().set_pixel(0, 0, colors::WHITE);

    let image = renderer.to_rgb_image();
    assert_eq!(image.get_pixel(0, 199).0, [255, 255, 255]);
    assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0]);
}

// ============ Ray casting ============

#[test]
fn ray_hits_triangle_at_expected_distance() {
    let t = ray_tri_intersect(v(0, 0, -10), v(0, 0, 1), v(-1, -1, 0), v(1, -1, 0), v(0, 1, 0));
    assert_eq!(t, Some(int_to_fixed(10)));
}

#[test]
fn ray_misses_shifted_triangle() {
    let shift = v(100, 0, 0);
    let t = ray_tri_intersect(
        v(0, 0, -10),
        v(0, 0, 1),
        v(-1, -1, 0) + shift,
        v(1, -1, 0) + shift,
        v(0, 1, 0) + shift,
    );
    assert_eq!(t, None);
}

#[test]
fn parallel_ray_never_hits() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    for _ in 0..32 {
        let origin: Vec3 = Vec3::new(
            rng.gen_range(-int_to_fixed(5)..int_to_fixed(5)),
            rng.gen_range(-int_to_fixed(5)..int_to_fixed(5)),
            0,
        );
        let angle: Fixed = rng.gen_range(0..FIXED_ONE);
        let dir = Vec3::new(
            fixraster::math::fixed::icos(angle),
            fixraster::math::fixed::isin(angle),
            0,
        );
        let t = ray_tri_intersect(origin, dir, v(-1, -1, 0), v(1, -1, 0), v(0, 1, 0));
        assert_eq!(t, None);
    }
}

#[test]
fn raytrace_finds_cube_and_respects_ignore() {
    let models = textured_cubes(3);
    // Cube 2 sits at x = 0, z = 8.
    let hit = fixraster::raytrace::raytrace(&models, v(0, 0, 0), v(0, 0, 1), None).unwrap();
    assert_eq!(hit.model, 2);
    assert_eq!(hit.point, v(0, 0, 7));

    assert_eq!(
        fixraster::raytrace::raytrace(&models, v(0, 0, 0), v(0, 0, 1), Some(2)),
        None
    );
    assert!(!line_of_sight(&models, v(0, 0, 0), v(0, 0, 20), None));
    assert!(line_of_sight(&models, v(0, 0, 0), v(0, 0, 20), Some(2)));
}
