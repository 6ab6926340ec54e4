use std::f32::consts::{FRAC_PI_2, PI, TAU};

use cgmath::{vec2, vec3};
use engine::{profile, render_log, RenderSurface, SurfaceMesh};
use serde::{Deserialize, Serialize};

use crate::component::Component;

pub const MIN_RADIUS: f32 = 0.01;
pub const MIN_LONGITUDE_SEGMENTS: u32 = 3;
pub const MAX_LONGITUDE_SEGMENTS: u32 = 256;
pub const MIN_LATITUDE_SEGMENTS: u32 = 2;
pub const MAX_LATITUDE_SEGMENTS: u32 = 256;
pub const MIN_CAP_SEGMENTS: u32 = 3;
pub const MAX_CAP_SEGMENTS: u32 = 256;

/// Plane the full sphere is cut along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CutMode {
    /// Horizontal cut at y = 0.
    Equator,
    /// Vertical cut at z = 0.
    Meridian,
}

/// Which half of the sphere to keep. Each half implies its [`CutMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HemisphereHalf {
    #[default]
    Upper,
    Lower,
    Front,
    Back,
}

impl HemisphereHalf {
    pub fn cut_mode(self) -> CutMode {
        match self {
            HemisphereHalf::Upper | HemisphereHalf::Lower => CutMode::Equator,
            HemisphereHalf::Front | HemisphereHalf::Back => CutMode::Meridian,
        }
    }

    /// The other half of the same cut.
    pub fn opposite(self) -> Self {
        match self {
            HemisphereHalf::Upper => HemisphereHalf::Lower,
            HemisphereHalf::Lower => HemisphereHalf::Upper,
            HemisphereHalf::Front => HemisphereHalf::Back,
            HemisphereHalf::Back => HemisphereHalf::Front,
        }
    }

    /// Polar angle range, measured down from +Y.
    fn polar_range(self) -> (f32, f32) {
        match self {
            HemisphereHalf::Upper => (0.0, FRAC_PI_2),
            HemisphereHalf::Lower => (FRAC_PI_2, PI),
            HemisphereHalf::Front | HemisphereHalf::Back => (0.0, PI),
        }
    }

    /// Azimuth range, measured from +X towards +Z.
    fn azimuth_range(self) -> (f32, f32) {
        match self {
            HemisphereHalf::Upper | HemisphereHalf::Lower => (0.0, TAU),
            HemisphereHalf::Front => (0.0, PI),
            HemisphereHalf::Back => (PI, TAU),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HemisphereParams {
    pub radius: f32,
    pub longitude_segments: u32,
    pub latitude_segments: u32,
    pub half: HemisphereHalf,
    /// Face the surface towards a viewer standing at the centre.
    pub inward_normals: bool,
    /// Close the rim with a flat disk. Equator halves only.
    pub add_flat_cap: bool,
    pub cap_segments: u32,
}

impl Default for HemisphereParams {
    fn default() -> Self {
        HemisphereParams {
            radius: 5.0,
            longitude_segments: 64,
            latitude_segments: 32,
            half: HemisphereHalf::Upper,
            inward_normals: true,
            add_flat_cap: false,
            cap_segments: 64,
        }
    }
}

impl HemisphereParams {
    /// Copy with every value pulled into its valid range.
    pub fn clamped(&self) -> Self {
        HemisphereParams {
            radius: self.radius.max(MIN_RADIUS),
            longitude_segments: self
                .longitude_segments
                .clamp(MIN_LONGITUDE_SEGMENTS, MAX_LONGITUDE_SEGMENTS),
            latitude_segments: self
                .latitude_segments
                .clamp(MIN_LATITUDE_SEGMENTS, MAX_LATITUDE_SEGMENTS),
            cap_segments: self.cap_segments.clamp(MIN_CAP_SEGMENTS, MAX_CAP_SEGMENTS),
            ..self.clone()
        }
    }
}

pub fn build_hemisphere(params: &HemisphereParams) -> SurfaceMesh {
    let mut mesh = SurfaceMesh::new();
    build_hemisphere_into(params, &mut mesh);
    mesh
}

/// Regenerate `mesh` from scratch, reusing its allocations.
pub fn build_hemisphere_into(params: &HemisphereParams, mesh: &mut SurfaceMesh) {
    let params = params.clamped();
    let lon = params.longitude_segments as usize;
    let lat = params.latitude_segments as usize;
    let cap = if params.add_flat_cap && params.half.cut_mode() == CutMode::Equator {
        params.cap_segments as usize
    } else {
        0
    };

    mesh.clear();
    mesh.reserve((lon + 1) * (lat + 1) + cap + 1, lon * lat * 2 + cap);

    append_patch(&params, mesh);
    if params.add_flat_cap {
        append_flat_cap(&params, mesh);
    }
}

fn append_patch(params: &HemisphereParams, mesh: &mut SurfaceMesh) {
    let lon = params.longitude_segments;
    let lat = params.latitude_segments;
    let (phi_start, phi_end) = params.half.polar_range();
    let (theta_start, theta_end) = params.half.azimuth_range();
    let base = mesh.vertex_count() as u32;

    for j in 0..=lat {
        let v = j as f32 / lat as f32;
        let (sin_phi, cos_phi) = (phi_start + (phi_end - phi_start) * v).sin_cos();

        for i in 0..=lon {
            let u = i as f32 / lon as f32;
            let (sin_theta, cos_theta) = (theta_start + (theta_end - theta_start) * u).sin_cos();

            let direction = vec3(sin_phi * cos_theta, cos_phi, sin_phi * sin_theta);
            let normal = if params.inward_normals {
                -direction
            } else {
                direction
            };
            mesh.push_vertex(direction * params.radius, normal, vec2(u, 1.0 - v));
        }
    }

    let row = lon + 1;
    for j in 0..lat {
        for i in 0..lon {
            let a = base + j * row + i;
            let b = a + 1;
            let c = a + row;
            let d = c + 1;

            if params.inward_normals {
                mesh.push_triangle(a, c, b);
                mesh.push_triangle(b, c, d);
            } else {
                mesh.push_triangle(a, b, c);
                mesh.push_triangle(b, d, c);
            }
        }
    }
}

fn append_flat_cap(params: &HemisphereParams, mesh: &mut SurfaceMesh) {
    if params.half.cut_mode() != CutMode::Equator {
        render_log!(DEBUG, "flat cap skipped for meridian half {:?}", params.half);
        return;
    }

    // Outward domes are closed like a solid: the upper cap faces down and the
    // lower cap faces up. Inward domes flip both.
    let faces_down = (params.half == HemisphereHalf::Upper) != params.inward_normals;
    let normal = if faces_down {
        vec3(0.0, -1.0, 0.0)
    } else {
        vec3(0.0, 1.0, 0.0)
    };

    let segments = params.cap_segments;
    let center = mesh.push_vertex(vec3(0.0, 0.0, 0.0), normal, vec2(0.5, 0.5));
    for k in 0..segments {
        let (sin, cos) = (TAU * k as f32 / segments as f32).sin_cos();
        mesh.push_vertex(
            vec3(params.radius * cos, 0.0, params.radius * sin),
            normal,
            vec2(0.5 + 0.5 * cos, 0.5 + 0.5 * sin),
        );
    }

    for k in 0..segments {
        let current = center + 1 + k;
        let next = center + 1 + (k + 1) % segments;
        if faces_down {
            mesh.push_triangle(center, current, next);
        } else {
            mesh.push_triangle(center, next, current);
        }
    }
}

/// Scene component that keeps a hemisphere mesh on a surface in sync with
/// its parameters.
pub struct HemisphereScreen {
    name: String,
    params: HemisphereParams,
    surface: Box<dyn RenderSurface>,
    mesh: SurfaceMesh,
}

impl HemisphereScreen {
    pub fn new(params: HemisphereParams, surface: Box<dyn RenderSurface>) -> Self {
        HemisphereScreen {
            name: "hemisphere_screen".to_string(),
            params,
            surface,
            mesh: SurfaceMesh::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn params(&self) -> &HemisphereParams {
        &self.params
    }

    /// Edit in place; call [`Component::on_parameters_changed`] afterwards.
    pub fn params_mut(&mut self) -> &mut HemisphereParams {
        &mut self.params
    }

    pub fn set_params(&mut self, params: HemisphereParams) {
        self.params = params;
        self.rebuild();
    }

    pub fn mesh(&self) -> &SurfaceMesh {
        &self.mesh
    }

    fn rebuild(&mut self) {
        profile!(
            "hemisphere rebuild",
            build_hemisphere_into(&self.params, &mut self.mesh)
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

impl Component for HemisphereScreen {
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
