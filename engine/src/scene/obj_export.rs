use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::SurfaceMesh;

/// Write `mesh` as Wavefront OBJ with positions, uvs and normals.
pub fn write_obj<W: Write>(mesh: &SurfaceMesh, writer: &mut W) -> io::Result<()> {
    writeln!(
        writer,
        "# {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    )?;

    for p in &mesh.positions {
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for uv in &mesh.uvs {
        writeln!(writer, "vt {} {}", uv.x, uv.y)?;
    }
    for n in &mesh.normals {
        writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
    }

    // OBJ indices are 1-based and we share one index for all three attributes.
    for [a, b, c] in mesh.triangles() {
        let (a, b, c) = (a + 1, b + 1, c + 1);
        writeln!(writer, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
    }

    Ok(())
}

pub fn save_obj(mesh: &SurfaceMesh, path: &Path) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_obj(mesh, &mut writer)?;
    writer.flush()
}
