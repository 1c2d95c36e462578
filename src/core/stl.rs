//! Binary STL mesh decoding.
//!
//! Layout: 80-byte header, little-endian `u32` triangle count, then 50 bytes
//! per triangle (normal, three vertices, `u16` attribute).  Normals are
//! repeated per vertex.

use std::path::Path;

use thiserror::Error;

const HEADER_LEN: usize = 80;
const COUNT_LEN: usize = 4;
const TRIANGLE_LEN: usize = 50;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StlError {
    #[error("STL data is {0} bytes, shorter than the 84-byte header")]
    MissingHeader(usize),
    #[error("STL declares {triangles} triangles ({expected} bytes) but has {actual}")]
    Truncated {
        triangles: u32,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl Bounds {
    pub fn size(&self) -> [f32; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    pub fn center(&self) -> [f32; 3] {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
            (self.min[2] + self.max[2]) / 2.0,
        ]
    }
}

fn read_f32(bytes: &[u8], at: usize) -> f32 {
    f32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

fn read_vec3(bytes: &[u8], at: usize) -> [f32; 3] {
    [read_f32(bytes, at), read_f32(bytes, at + 4), read_f32(bytes, at + 8)]
}

pub fn parse_binary(bytes: &[u8]) -> Result<Mesh, StlError> {
    if bytes.len() < HEADER_LEN + COUNT_LEN {
        return Err(StlError::MissingHeader(bytes.len()));
    }
    let count_bytes = &bytes[HEADER_LEN..HEADER_LEN + COUNT_LEN];
    let triangles = u32::from_le_bytes([count_bytes[0], count_bytes[1], count_bytes[2], count_bytes[3]]);
    let expected = HEADER_LEN + COUNT_LEN + triangles as usize * TRIANGLE_LEN;
    if bytes.len() < expected {
        return Err(StlError::Truncated {
            triangles,
            expected,
            actual: bytes.len(),
        });
    }

    let n = triangles as usize * 3;
    let mut mesh = Mesh {
        positions: Vec::with_capacity(n),
        normals: Vec::with_capacity(n),
    };
    let mut offset = HEADER_LEN + COUNT_LEN;
    for _ in 0..triangles {
        let normal = read_vec3(bytes, offset);
        offset += 12;
        for _ in 0..3 {
            mesh.positions.push(read_vec3(bytes, offset));
            mesh.normals.push(normal);
            offset += 12;
        }
        offset += 2; // attribute byte count
    }
    Ok(mesh)
}

/// Load a mesh from disk.  Missing or malformed files yield `None` and a
/// warning; the map simply renders empty.
pub fn load(path: &Path) -> Option<Mesh> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!("STL loading failed: {}: {e}", path.display());
            return None;
        }
    };
    match parse_binary(&bytes) {
        Ok(mesh) => {
            tracing::debug!(vertices = mesh.positions.len(), "loaded STL {}", path.display());
            Some(mesh.centered())
        }
        Err(e) => {
            tracing::warn!("STL parsing error: {}: {e}", path.display());
            None
        }
    }
}

impl Mesh {
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let first = *self.positions.first()?;
        let mut b = Bounds {
            min: first,
            max: first,
        };
        for p in &self.positions[1..] {
            for axis in 0..3 {
                b.min[axis] = b.min[axis].min(p[axis]);
                b.max[axis] = b.max[axis].max(p[axis]);
            }
        }
        Some(b)
    }

    /// Translate so the bounding box is centred on the origin.
    pub fn centered(mut self) -> Self {
        if let Some(b) = self.bounds() {
            let c = b.center();
            for p in &mut self.positions {
                p[0] -= c[0];
                p[1] -= c[1];
                p[2] -= c[2];
            }
        }
        self
    }

    /// Uniform scale that makes the largest extent equal `target`.
    pub fn fit_scale(&self, target: f32) -> f32 {
        let Some(b) = self.bounds() else {
            return 1.0;
        };
        let [x, y, z] = b.size();
        let max_dim = x.max(y).max(z);
        if max_dim > 0.0 {
            target / max_dim
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Binary STL bytes for the given triangles (normal + 3 vertices each).
    fn encode(triangles: &[[[f32; 3]; 4]]) -> Vec<u8> {
        let mut out = vec![0u8; HEADER_LEN];
        out.extend_from_slice(&(triangles.len() as u32).to_le_bytes());
        for tri in triangles {
            for v in tri {
                for c in v {
                    out.extend_from_slice(&c.to_le_bytes());
                }
            }
            out.extend_from_slice(&0u16.to_le_bytes());
        }
        out
    }

    fn unit_triangle() -> [[f32; 3]; 4] {
        [
            [0.0, 0.0, 1.0],
            [0.0, 0.0, 0.0],
            [4.0, 0.0, 0.0],
            [0.0, 2.0, 0.0],
        ]
    }

    #[test]
    fn parses_vertices_and_repeats_normals() {
        let mesh = parse_binary(&encode(&[unit_triangle()])).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.positions[1], [4.0, 0.0, 0.0]);
        assert_eq!(mesh.normals, vec![[0.0, 0.0, 1.0]; 3]);
    }

    #[test]
    fn rejects_short_and_truncated_input() {
        assert_eq!(parse_binary(&[0u8; 10]), Err(StlError::MissingHeader(10)));
        let mut bytes = encode(&[unit_triangle(), unit_triangle()]);
        bytes.truncate(bytes.len() - 1);
        assert!(matches!(
            parse_binary(&bytes),
            Err(StlError::Truncated { triangles: 2, .. })
        ));
    }

    #[test]
    fn centring_and_fit_scale() {
        let mesh = parse_binary(&encode(&[unit_triangle()])).unwrap().centered();
        let b = mesh.bounds().unwrap();
        assert_eq!(b.center(), [0.0, 0.0, 0.0]);
        assert_eq!(mesh.fit_scale(10.0), 2.5);
        assert_eq!(Mesh::default().fit_scale(10.0), 1.0);
    }

    #[test]
    fn missing_file_degrades_to_none() {
        assert!(load(Path::new("/nonexistent/karachi-map.stl")).is_none());
    }
}
