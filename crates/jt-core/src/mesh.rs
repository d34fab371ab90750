use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Indexed triangle list shared by every instance of one primitive.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl MeshData {
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// Unit UV sphere centred at the origin.
pub fn unit_sphere(segments: u32) -> MeshData {
    let w = segments.max(3);
    let h = segments.max(2);
    let mut mesh = MeshData::default();
    for iy in 0..=h {
        let theta = iy as f32 / h as f32 * PI;
        for ix in 0..=w {
            let phi = ix as f32 / w as f32 * TAU;
            let n = [
                -phi.cos() * theta.sin(),
                theta.cos(),
                phi.sin() * theta.sin(),
            ];
            mesh.vertices.push(Vertex {
                position: n,
                normal: n,
            });
        }
    }
    let row = w + 1;
    for iy in 0..h {
        for ix in 0..w {
            let a = (iy * row + ix) as u16;
            let b = a + row as u16;
            let c = b + 1;
            let d = a + 1;
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != h - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}

/// Capped cylinder of radius 1 and height 1 along +Y, centred at the origin.
pub fn unit_cylinder(segments: u32) -> MeshData {
    let n = segments.max(3);
    let mut mesh = MeshData::default();
    let ring = |i: u32| {
        let a = i as f32 / n as f32 * TAU;
        (a.sin(), a.cos())
    };

    // side: two rings with radial normals
    for y in [0.5_f32, -0.5] {
        for i in 0..=n {
            let (s, c) = ring(i);
            mesh.vertices.push(Vertex {
                position: [s, y, c],
                normal: [s, 0.0, c],
            });
        }
    }
    let row = (n + 1) as u16;
    for i in 0..n as u16 {
        let a = i;
        let b = i + row;
        mesh.indices.extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
    }

    // caps: centre vertex plus a ring with axial normals
    for (y, ny) in [(0.5_f32, 1.0_f32), (-0.5, -1.0)] {
        let centre = mesh.vertices.len() as u16;
        mesh.vertices.push(Vertex {
            position: [0.0, y, 0.0],
            normal: [0.0, ny, 0.0],
        });
        for i in 0..=n {
            let (s, c) = ring(i);
            mesh.vertices.push(Vertex {
                position: [s, y, c],
                normal: [0.0, ny, 0.0],
            });
        }
        for i in 0..n as u16 {
            let a = centre + 1 + i;
            if ny > 0.0 {
                mesh.indices.extend_from_slice(&[centre, a, a + 1]);
            } else {
                mesh.indices.extend_from_slice(&[centre, a + 1, a]);
            }
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_vertices_lie_on_unit_radius() {
        let m = unit_sphere(12);
        for v in &m.vertices {
            let [x, y, z] = v.position;
            assert!(((x * x + y * y + z * z).sqrt() - 1.0).abs() < 1e-5);
        }
        assert_eq!(m.indices.len() % 3, 0);
        assert!(m.indices.iter().all(|&i| (i as usize) < m.vertices.len()));
    }

    #[test]
    fn cylinder_spans_unit_height() {
        let m = unit_cylinder(20);
        let (lo, hi) = m.vertices.iter().fold((f32::MAX, f32::MIN), |(lo, hi), v| {
            (lo.min(v.position[1]), hi.max(v.position[1]))
        });
        assert_eq!((lo, hi), (-0.5, 0.5));
        assert!(m.indices.iter().all(|&i| (i as usize) < m.vertices.len()));
    }
}
