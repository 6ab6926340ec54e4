use cgmath::{vec2, vec3};
use engine::{profile, render_log, RenderSurface, SurfaceMesh};
use serde::{Deserialize, Serialize};

use crate::component::Component;

pub const MIN_RADIUS: f32 = 0.01;
pub const MIN_HEIGHT: f32 = 0.01;
pub const MIN_ARC_DEGREES: f32 = 10.0;
pub const MAX_ARC_DEGREES: f32 = 200.0;
pub const MIN_SEGMENTS_HORIZONTAL: u32 = 3;
pub const MAX_SEGMENTS_HORIZONTAL: u32 = 256;
pub const MIN_SEGMENTS_VERTICAL: u32 = 2;
pub const MAX_SEGMENTS_VERTICAL: u32 = 128;

/// A "windshield" slice of a cylinder around the viewer, centred on +Z.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurvedScreenParams {
    pub radius: f32,
    pub arc_degrees: f32,
    pub height: f32,
    pub segments_horizontal: u32,
    pub segments_vertical: u32,
}

impl Default for CurvedScreenParams {
    fn default() -> Self {
        CurvedScreenParams {
            radius: 3.0,
            arc_degrees: 120.0,
            height: 2.0,
            segments_horizontal: 64,
            segments_vertical: 16,
        }
    }
}

impl CurvedScreenParams {
    pub fn clamped(&self) -> Self {
        CurvedScreenParams {
            radius: self.radius.max(MIN_RADIUS),
            // NaN falls to the minimum arc.
            arc_degrees: self.arc_degrees.max(MIN_ARC_DEGREES).min(MAX_ARC_DEGREES),
            height: self.height.max(MIN_HEIGHT),
            segments_horizontal: self
                .segments_horizontal
                .clamp(MIN_SEGMENTS_HORIZONTAL, MAX_SEGMENTS_HORIZONTAL),
            segments_vertical: self
                .segments_vertical
                .clamp(MIN_SEGMENTS_VERTICAL, MAX_SEGMENTS_VERTICAL),
        }
    }
}

pub fn build_curved_screen(params: &CurvedScreenParams) -> SurfaceMesh {
    let mut mesh = SurfaceMesh::new();
    build_curved_screen_into(params, &mut mesh);
    mesh
}

/// Regenerate `mesh` as an inward-facing partial cylinder.
pub fn build_curved_screen_into(params: &CurvedScreenParams, mesh: &mut SurfaceMesh) {
    let params = params.clamped();
    let columns = params.segments_horizontal;
    let rows = params.segments_vertical;
    let arc = params.arc_degrees.to_radians();

    mesh.clear();
    mesh.reserve(
        ((columns + 1) * (rows + 1)) as usize,
        (columns * rows * 2) as usize,
    );

    for j in 0..=rows {
        let v = j as f32 / rows as f32;
        let y = (v - 0.5) * params.height;

        for i in 0..=columns {
            let u = i as f32 / columns as f32;
            let (sin, cos) = ((u - 0.5) * arc).sin_cos();
            mesh.push_vertex(
                vec3(params.radius * sin, y, params.radius * cos),
                vec3(-sin, 0.0, -cos),
                vec2(u, v),
            );
        }
    }

    // Counter-clockwise as seen from the axis.
    let stride = columns + 1;
    for j in 0..rows {
        for i in 0..columns {
            let a = j * stride + i;
            let b = a + 1;
            let c = a + stride;
            let d = c + 1;
            mesh.push_triangle(a, c, b);
            mesh.push_triangle(b, c, d);
        }
    }
}

pub struct CurvedScreen {
    name: String,
    params: CurvedScreenParams,
    surface: Box<dyn RenderSurface>,
    mesh: SurfaceMesh,
}

impl CurvedScreen {
    pub fn new(params: CurvedScreenParams, surface: Box<dyn RenderSurface>) -> Self {
        CurvedScreen {
            name: "curved_screen".to_string(),
            params,
            surface,
            mesh: SurfaceMesh::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn params(&self) -> &CurvedScreenParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut CurvedScreenParams {
        &mut self.params
    }

    pub fn set_params(&mut self, params: CurvedScreenParams) {
        self.params = params;
        self.rebuild();
    }

    pub fn mesh(&self) -> &SurfaceMesh {
        &self.mesh
    }

    fn rebuild(&mut self) {
        profile!(
            "curved screen rebuild",
            build_curved_screen_into(&self.params, &mut self.mesh)
        );
        self.surface.upload_mesh(&self.mesh);
        render_log!(
            DEBUG,
            vertices = self.mesh.vertex_count(),
            triangles = self.mesh.triangle_count(),
            "rebuilt {}",
            self.name
        );
    }
}

impl Component for CurvedScreen {
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self) {
        self.rebuild();
    }

    fn on_parameters_changed(&mut self) {
        self.rebuild();
    }

    fn shutdown(&mut self) {
        self.mesh = SurfaceMesh::new();
        self.surface.upload_mesh(&self.mesh);
    }
}
