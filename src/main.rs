//! Renders a small arena scene to PNG files.
//!
//! Usage: `fixraster [output_dir] [frames]`

use std::path::PathBuf;
use std::rc::Rc;

use fixraster::colors;
use fixraster::math::fixed::{float_to_fixed, int_to_fixed, FIXED_ONE, QUARTER_TURN};
use fixraster::prelude::*;

const DEFAULT_FRAMES: usize = 8;
const HIT_MARKER: u8 = colors::pack_rgb332(255, 0, 0);

fn build_scene(texture: &Rc<Texture>) -> Vec<Model> {
    let placements = [(0, 2, 12), (-10, 4, 20), (14, 3, 8), (4, 6, -16)];
    placements
        .iter()
        .enumerate()
        .map(|(i, &(x, y, z))| {
            let mut cube = Model::cube(format!("crate{i}"));
            cube.set_texture(Rc::clone(texture));
            let mut transform = Transform::new();
            transform
                .set_position_xyz(int_to_fixed(x), int_to_fixed(y), int_to_fixed(z))
                .set_scale_uniform(int_to_fixed(2))
                .rotate_y(FIXED_ONE / 8 * i as i32);
            cube.set_transform(&transform);
            cube
        })
        .collect()
}

fn main() -> Result<(), String> {
    let mut args = std::env::args().skip(1);
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| ".".to_string()));
    let frames = match args.next() {
        Some(n) => n.parse().map_err(|e| format!("bad frame count {n:?}: {e}"))?,
        None => DEFAULT_FRAMES,
    };
    std::fs::create_dir_all(&out_dir).map_err(|e| e.to_string())?;

    let crate_texture = Rc::new(Texture::checkerboard(
        7,
        4,
        colors::pack_rgb332(200, 140, 60),
        colors::pack_rgb332(120, 80, 30),
    ));
    let floor_texture = Texture::checkerboard(
        7,
        6,
        colors::pack_rgb332(90, 90, 90),
        colors::pack_rgb332(60, 60, 60),
    );

    let models = build_scene(&crate_texture);
    let mut engine = Engine::new();
    engine.prepare_geometry_storage(&models);

    let mut renderer = Renderer::default();
    let projection = Projection::for_screen(
        QUARTER_TURN,
        renderer.width(),
        renderer.height(),
        float_to_fixed(0.1),
        int_to_fixed(1024),
    )
    .matrix();
    let mut camera = FpsCamera::new(Vec3::new(0, int_to_fixed(3), 0));

    for frame in 0..frames {
        let view = camera.view_matrix();
        let stats = engine.rasterize(
            &mut renderer.as_framebuffer(),
            &models,
            &view,
            &projection,
            Some(&floor_texture),
            colors::SKY,
        );

        // Mark what the camera is looking at, like a shot impact.
        let hit = engine.raytrace(&models, camera.position(), camera.forward(), None);
        if let Some(hit) = hit {
            let mvp = projection * view;
            if let Some((x, y)) =
                Engine::project_point(&mvp, hit.point, renderer.width(), renderer.height())
            {
                let mut buffer = renderer.as_framebuffer();
                for (dx, dy) in [(0, 0), (1, 0), (-1, 0), (0, 1), (0, -1)] {
                    buffer.set_pixel(x + dx, y + dy, HIT_MARKER);
                }
            }
        }

        let path = out_dir.join(format!("frame_{frame:03}.png"));
        renderer.save_png(&path).map_err(|e| e.to_string())?;
        println!(
            "frame {frame}: {} triangles, {} culled, {} clipped, target {} -> {}",
            stats.triangles_drawn,
            stats.faces_culled,
            stats.faces_clipped,
            hit.map_or("none", |h| models[h.model].name()),
            path.display()
        );

        camera.rotate_yaw(FIXED_ONE / frames.max(1) as i32);
    }

    engine.free_geometry_storage();
    Ok(())
}
