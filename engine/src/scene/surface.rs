use std::cell::{Ref, RefCell};
use std::rc::Rc;

use super::SurfaceMesh;
use crate::texture_format::RawTextureData;

/// Anything that can display a generated mesh with a texture on it.
///
/// Implementations copy what they need out of the borrowed buffers; callers
/// keep ownership and may overwrite them right after the call returns.
pub trait RenderSurface {
    fn upload_mesh(&mut self, mesh: &SurfaceMesh);

    fn set_texture(&mut self, texture: &RawTextureData);
}

#[derive(Debug, Default)]
pub struct SurfaceRecord {
    pub mesh: SurfaceMesh,
    pub texture: Option<RawTextureData>,
    pub mesh_uploads: usize,
    pub texture_uploads: usize,
}

/// Headless surface that keeps the last upload.
///
/// Clones share the same record, so a test or tool can keep one handle while
/// a component owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    record: Rc<RefCell<SurfaceRecord>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self) -> Ref<'_, SurfaceRecord> {
        self.record.borrow()
    }

    pub fn mesh_uploads(&self) -> usize {
        self.record.borrow().mesh_uploads
    }

    pub fn texture_uploads(&self) -> usize {
        self.record.borrow().texture_uploads
    }
}

impl RenderSurface for RecordingSurface {
    fn upload_mesh(&mut self, mesh: &SurfaceMesh) {
        let mut record = self.record.borrow_mut();
        record.mesh.clone_from(mesh);
        record.mesh_uploads += 1;
    }

    fn set_texture(&mut self, texture: &RawTextureData) {
        let mut record = self.record.borrow_mut();
        match record.texture.as_mut() {
            Some(existing) => existing.clone_from(texture),
            None => record.texture = Some(texture.clone()),
        }
        record.texture_uploads += 1;
    }
}
