/// Mesh primitives shared by the parser and the renderer
use nalgebra::{Vector3, Vector4};

/// A homogeneous mesh vertex
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Vertex {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self::with_w(x, y, z, 1.0)
    }

    pub fn with_w(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    pub fn to_homogeneous(&self) -> Vector4<f64> {
        Vector4::new(self.x, self.y, self.z, self.w)
    }
}

/// Texture coordinate. Carried through the pipeline, never sampled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Texture {
    pub u: f64,
    pub v: Option<f64>,
    pub w: Option<f64>,
}

/// Vertex normal. Carried through the pipeline, never shaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal {
    pub i: f64,
    pub j: f64,
    pub k: f64,
}

impl Normal {
    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.i, self.j, self.k)
    }
}

/// One corner of a face with its resolved references
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceItem {
    pub vertex: Vertex,
    pub texture: Option<Texture>,
    pub normal: Option<Normal>,
}

impl FaceItem {
    pub fn new(vertex: Vertex) -> Self {
        Self {
            vertex,
            texture: None,
            normal: None,
        }
    }
}

/// A closed polygon. Item order defines winding; the last item connects back
/// to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub items: Vec<FaceItem>,
}

impl Face {
    pub fn new(items: Vec<FaceItem>) -> Self {
        Self { items }
    }

    pub fn from_vertices(vertices: &[Vertex]) -> Self {
        Self::new(vertices.iter().copied().map(FaceItem::new).collect())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adjacent item pairs taken cyclically, one per item
    pub fn edges(&self) -> impl Iterator<Item = (&FaceItem, &FaceItem)> {
        let n = self.items.len();
        (0..n).map(move |i| (&self.items[i], &self.items[(i + 1) % n]))
    }
}

/// A single statement of a mesh file, in file order
#[derive(Debug, Clone, PartialEq)]
pub enum MeshElement {
    Vertex(Vertex),
    Texture(Texture),
    Normal(Normal),
    Face(Face),
}

/// Polygon mesh with its raw element lists
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub textures: Vec<Texture>,
    pub normals: Vec<Normal>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: MeshElement) {
        match element {
            MeshElement::Vertex(v) => self.vertices.push(v),
            MeshElement::Texture(t) => self.textures.push(t),
            MeshElement::Normal(n) => self.normals.push(n),
            MeshElement::Face(f) => self.faces.push(f),
        }
    }

    /// Unit cube spanning `{0,1}³` with six quads wound counter-clockwise
    /// when seen from outside
    pub fn unit_cube() -> Self {
        let corners = [
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(0.0, 0.0, 1.0),
            Vertex::new(0.0, 1.0, 0.0),
            Vertex::new(0.0, 1.0, 1.0),
            Vertex::new(1.0, 0.0, 0.0),
            Vertex::new(1.0, 0.0, 1.0),
            Vertex::new(1.0, 1.0, 0.0),
            Vertex::new(1.0, 1.0, 1.0),
        ];
        let quads: [[usize; 4]; 6] = [
            [0, 4, 5, 1], // bottom (y = 0)
            [2, 3, 7, 6], // top (y = 1)
            [0, 1, 3, 2], // left (x = 0)
            [4, 6, 7, 5], // right (x = 1)
            [0, 2, 6, 4], // back (z = 0)
            [1, 5, 7, 3], // front (z = 1)
        ];

        let mut mesh = Self::new();
        for corner in corners {
            mesh.push(MeshElement::Vertex(corner));
        }
        for quad in quads {
            let vertices: Vec<Vertex> = quad.iter().map(|&i| corners[i]).collect();
            mesh.push(MeshElement::Face(Face::from_vertices(&vertices)));
        }
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_defaults_w() {
        let v = Vertex::new(1.0, 2.0, 3.0);
        assert_eq!(v.w, 1.0);
        assert_eq!(v.to_homogeneous(), Vector4::new(1.0, 2.0, 3.0, 1.0));
    }

    #[test]
    fn test_face_edges_are_cyclic() {
        let face = Face::from_vertices(&[
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(1.0, 0.0, 0.0),
            Vertex::new(1.0, 1.0, 0.0),
        ]);
        let edges: Vec<_> = face.edges().collect();
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[2].0.vertex, Vertex::new(1.0, 1.0, 0.0));
        assert_eq!(edges[2].1.vertex, Vertex::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_unit_cube_outward_winding() {
        let cube = Mesh::unit_cube();
        assert_eq!(cube.vertices.len(), 8);
        assert_eq!(cube.faces.len(), 6);

        let center = Vector3::new(0.5, 0.5, 0.5);
        for face in &cube.faces {
            assert_eq!(face.len(), 4);
            let p: Vec<Vector3<f64>> = face
                .items
                .iter()
                .map(|item| Vector3::new(item.vertex.x, item.vertex.y, item.vertex.z))
                .collect();
            let normal = (p[1] - p[0]).cross(&(p[2] - p[0]));
            assert!(normal.dot(&(p[0] - center)) > 0.0, "face {:?} winds inward", face);
        }
    }
}
