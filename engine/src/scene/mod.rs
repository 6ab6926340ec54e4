pub mod vertex;
pub use vertex::*;

pub mod surface_mesh;
pub use surface_mesh::{MeshError, SurfaceMesh};

pub mod surface;
pub use surface::{RecordingSurface, RenderSurface};

pub mod obj_export;
pub use obj_export::{save_obj, write_obj};
