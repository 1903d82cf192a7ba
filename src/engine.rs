//! Core rendering engine.
//!
//! The [`Engine`] is the explicit render context: it owns the geometry
//! scratch storage, the render settings and the rasterizer, and runs the
//! per-frame pipeline:
//!
//! 1. Transform every model vertex to clip space and classify it.
//! 2. Sort all faces back to front.
//! 3. Clear to the sky color and draw the optional floor, ceiling and border.
//! 4. Cull, clip, shade and rasterize each face in sorted order.

use log::trace;

use crate::clipper::{
    classify_floor_vertex, clip_triangle, is_back_facing, is_fully_clipped, signed_area, viewport,
    Clipped, TransformedVertex, VertexClip,
};
use crate::config::{ArenaConfig, RenderConfig};
use crate::math::fixed::{
    fixed_abs, fixed_round_to_int, icos, int_to_fixed, isin, Fixed, FIXED_ONE,
};
use crate::math::mat4::Mat4;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::model::Model;
use crate::raytrace::{self, RayHit};
use crate::render::{FrameBuffer, GeometryStorage, Rasterizer, ScanlineRasterizer, Triangle};
use crate::texture::Texture;

/// Per-frame face counters returned by [`Engine::rasterize`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub faces_considered: usize,
    /// Skipped because their model is not active.
    pub faces_inactive: usize,
    /// Skipped because no texture is bound.
    pub faces_untextured: usize,
    pub faces_culled: usize,
    pub faces_rejected: usize,
    /// Faces that crossed the near plane and were clipped.
    pub faces_clipped: usize,
    pub triangles_drawn: usize,
}

#[derive(Default)]
pub struct Engine {
    storage: GeometryStorage,
    config: RenderConfig,
    rasterizer: ScanlineRasterizer,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut RenderConfig {
        &mut self.config
    }

    pub fn storage(&self) -> &GeometryStorage {
        &self.storage
    }

    // ============ Geometry storage ============

    /// Size the scratch storage for `models`.
    ///
    /// Call whenever the model list or a model's geometry changes, not every
    /// frame. Textures must already be bound.
    pub fn prepare_geometry_storage(&mut self, models: &[Model]) {
        self.storage.prepare(models);
    }

    pub fn free_geometry_storage(&mut self) {
        self.storage.free();
    }

    // ============ Frame ============

    /// Render one frame of `models` into `buffer`.
    ///
    /// `camera` maps world to view space and `projection` view to clip space.
    /// Passing a `floor` texture enables the floor, ceiling and border rings.
    pub fn rasterize(
        &mut self,
        buffer: &mut FrameBuffer,
        models: &[Model],
        camera: &Mat4,
        projection: &Mat4,
        floor: Option<&Texture>,
        sky: u8,
    ) -> FrameStats {
        debug_assert!(
            self.storage.is_prepared_for(models),
            "geometry storage does not match the model list"
        );

        self.transform_vertices(models, camera, projection, buffer.width(), buffer.height());
        self.storage.sort(self.config.depth_order);

        buffer.clear(sky);
        if let Some(floor) = floor {
            self.draw_arena(buffer, camera, projection, floor);
        }

        let stats = self.draw_faces(buffer, models);
        trace!("{stats:?}");
        stats
    }

    fn transform_vertices(
        &mut self,
        models: &[Model],
        camera: &Mat4,
        projection: &Mat4,
        width: usize,
        height: usize,
    ) {
        for (index, model) in models.iter().enumerate() {
            let mvp = *projection * (*camera * *model.modelview());
            let offset = self.storage.vertex_offset(index);
            let end = offset + model.vertices().len();
            let out = &mut self.storage.vertices_mut()[offset..end];
            for (slot, &vertex) in out.iter_mut().zip(model.vertices()) {
                *slot = TransformedVertex::new(mvp * Vec4::from_vec3(vertex, FIXED_ONE), width, height);
            }
        }
    }

    fn draw_faces(&self, buffer: &mut FrameBuffer, models: &[Model]) -> FrameStats {
        let (width, height) = (buffer.width(), buffer.height());
        let faces = self.storage.faces();
        let vertices = self.storage.vertices();
        let mut stats = FrameStats::default();

        for &index in self.storage.order() {
            let face = &faces[index as usize];
            stats.faces_considered += 1;

            let model = &models[face.model_id as usize];
            if !model.is_active() {
                stats.faces_inactive += 1;
                continue;
            }
            let Some(texture) = face.texture.as_deref() else {
                stats.faces_untextured += 1;
                continue;
            };

            let texcoords = model.texcoords();
            let tri: [TransformedVertex; 3] = std::array::from_fn(|k| {
                let uv = texcoords
                    .get(face.texcoords[k] as usize)
                    .copied()
                    .unwrap_or(Vec2::ZERO);
                vertices[face.vertices[k] as usize].with_uv(uv)
            });

            // A near-clipped vertex has no screen position yet, so those faces
            // are culled after clipping instead.
            let states = tri.map(|v| v.state);
            let crosses_near = states.iter().any(|s| s.clip == VertexClip::Near);
            if !crosses_near
                && !is_fully_clipped(&states)
                && signed_area(tri[0].screen, tri[1].screen, tri[2].screen) < 0
            {
                stats.faces_culled += 1;
                continue;
            }

            let clipped = clip_triangle(&tri, width, height);
            if clipped == Clipped::Rejected {
                stats.faces_rejected += 1;
                continue;
            }
            if crosses_near {
                stats.faces_clipped += 1;
            }

            let normal = model
                .normals()
                .get(face.normal as usize)
                .copied()
                .unwrap_or(Vec3::ZERO);
            let shade = self
                .config
                .light
                .shade(model.modelview().transform_direction(normal));

            let mut drawn = 0;
            for screen in clipped.triangles() {
                if crosses_near && is_back_facing(screen) {
                    continue;
                }
                self.rasterizer
                    .fill_triangle(&Triangle::from_vertices(screen, shade), texture, buffer);
                drawn += 1;
            }
            if drawn == 0 {
                stats.faces_culled += 1;
            }
            stats.triangles_drawn += drawn;
        }

        stats
    }

    // ============ Arena ============

    fn draw_arena(&self, buffer: &mut FrameBuffer, camera: &Mat4, projection: &Mat4, floor: &Texture) {
        let arena = &self.config.arena;
        let view_projection = *projection * *camera;
        let harsh_limit = int_to_fixed(arena.harsh_clip_height);

        for height in arena.plane_heights() {
            let eye_offset = (*camera * Vec4::new(0, height, 0, FIXED_ONE)).y;
            let harsh = fixed_abs(eye_offset) > harsh_limit;
            self.draw_plane(buffer, &view_projection, arena, height, harsh, floor);
        }

        if arena.border {
            draw_border(buffer, &view_projection, arena);
        }
    }

    /// Textured grid of cells over a disk, drawn unshaded and unculled.
    fn draw_plane(
        &self,
        buffer: &mut FrameBuffer,
        view_projection: &Mat4,
        arena: &ArenaConfig,
        height: Fixed,
        harsh: bool,
        texture: &Texture,
    ) {
        let (width, screen_height) = (buffer.width(), buffer.height());
        let radius = arena.radius_cells;
        let corner = |x: i32, z: i32, uv: Vec2| {
            let p = *view_projection
                * Vec4::new(
                    int_to_fixed(x * arena.cell_size),
                    height,
                    int_to_fixed(z * arena.cell_size),
                    FIXED_ONE,
                );
            TransformedVertex::with_state(p, classify_floor_vertex(p, harsh), width, screen_height)
                .with_uv(uv)
        };

        for x in -radius..=radius {
            for z in -radius..=radius {
                if x * x + z * z > radius * radius {
                    continue;
                }
                let near = corner(x, z, Vec2::new(0, 0));
                let side = corner(x, z + 1, Vec2::new(FIXED_ONE, 0));
                let front = corner(x + 1, z, Vec2::new(0, FIXED_ONE));
                let far = corner(x + 1, z + 1, Vec2::new(FIXED_ONE, FIXED_ONE));

                for cell in [[near, side, front], [far, side, front]] {
                    for screen in clip_triangle(&cell, width, screen_height).triangles() {
                        self.rasterizer.fill_triangle(
                            &Triangle::from_vertices(screen, FIXED_ONE),
                            texture,
                            buffer,
                        );
                    }
                }
            }
        }
    }

    // ============ Queries ============

    /// Closest model hit along a ray. See [`raytrace::raytrace`].
    pub fn raytrace(
        &self,
        models: &[Model],
        origin: Vec3,
        dir: Vec3,
        ignore: Option<usize>,
    ) -> Option<RayHit> {
        raytrace::raytrace(models, origin, dir, ignore)
    }

    /// Pixel position of a clip-space-transformed point, if it is in front of
    /// the near plane. The pixel may lie off screen.
    pub fn project_point(mvp: &Mat4, point: Vec3, width: usize, height: usize) -> Option<(i32, i32)> {
        let p = mvp.transform_vec4(Vec4::from_vec3(point, FIXED_ONE));
        project_clip(p, width, height)
    }
}

fn project_clip(p: Vec4, width: usize, height: usize) -> Option<(i32, i32)> {
    if p.z <= 0 || p.w == 0 {
        return None;
    }
    Some((
        fixed_round_to_int(viewport(p.x, p.w, width)),
        fixed_round_to_int(viewport(p.y, p.w, height)),
    ))
}

/// Dotted rings around the arena edge, one pixel per dot.
fn draw_border(buffer: &mut FrameBuffer, view_projection: &Mat4, arena: &ArenaConfig) {
    if arena.border_step <= 0 {
        return;
    }
    let (width, height) = (buffer.width(), buffer.height());
    let shift = arena.border_radius_shift;

    for ring in 0..arena.border_rings {
        let y = int_to_fixed(ring * arena.border_ring_spacing);
        let mut angle = 0;
        while angle < FIXED_ONE - arena.border_step / 2 {
            let p = *view_projection * Vec4::new(isin(angle) << shift, y, icos(angle) << shift, FIXED_ONE);
            if let Some((x, y)) = project_clip(p, width, height) {
                buffer.set_pixel(x, y, arena.border_color);
            }
            angle += arena.border_step;
        }
    }
}
