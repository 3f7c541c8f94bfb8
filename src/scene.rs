use crate::color::Color;
use crate::geometry::Geometry;
use crate::math::{add, multiply_matrices, multiply_matrix_vector, rotation_xy, Mat3, Vec3};

/// Phong surface parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    pub shininess: f64,
}

#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: &'static str,
    pub geometry: Geometry,
    pub material: Material,
    pub position: Vec3,
    /// Euler angles (x, y) in radians
    pub rotation: [f64; 2],
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Mesh {
    pub fn new(name: &'static str, geometry: Geometry, material: Material) -> Self {
        Mesh {
            name,
            geometry,
            material,
            position: [0.0; 3],
            rotation: [0.0; 2],
            cast_shadow: false,
            receive_shadow: false,
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn rotated(mut self, x: f64, y: f64) -> Self {
        self.rotation = [x, y];
        self
    }

    pub fn with_shadows(mut self, cast: bool, receive: bool) -> Self {
        self.cast_shadow = cast;
        self.receive_shadow = receive;
        self
    }
}

/// A set of meshes sharing one rotation about the group origin
#[derive(Debug, Clone, Default)]
pub struct Group {
    pub meshes: Vec<Mesh>,
    /// Euler angles (x, y) in radians
    pub rotation: [f64; 2],
}

impl Group {
    pub fn add(&mut self, mesh: Mesh) {
        self.meshes.push(mesh);
    }

    pub fn mesh(&self, name: &str) -> Option<&Mesh> {
        self.meshes.iter().find(|mesh| mesh.name == name)
    }

    /// Iterates every mesh with its full model-to-world rotation and offset.
    pub fn world_transforms(&self) -> impl Iterator<Item = (&Mesh, Mat3, Vec3)> {
        let group = rotation_xy(self.rotation[0], self.rotation[1]);
        self.meshes.iter().map(move |mesh| {
            let local = rotation_xy(mesh.rotation[0], mesh.rotation[1]);
            let rotation = multiply_matrices(&group, &local);
            let offset = multiply_matrix_vector(&group, &mesh.position);
            (mesh, rotation, offset)
        })
    }
}

/// Transforms a model-space point with a rotation and offset
pub fn to_world(rotation: &Mat3, offset: &Vec3, point: &Vec3) -> Vec3 {
    add(&multiply_matrix_vector(rotation, point), offset)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Ambient {
        color: Color,
        intensity: f64,
    },
    Directional {
        color: Color,
        intensity: f64,
        position: Vec3,
        cast_shadow: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

#[derive(Debug, Clone)]
pub struct Scene {
    pub background: Color,
    pub lights: Vec<Light>,
    groups: Vec<(NodeId, Group)>,
    next_id: u64,
}

impl Scene {
    pub fn new(background: Color) -> Self {
        Scene {
            background,
            lights: Vec::new(),
            groups: Vec::new(),
            next_id: 0,
        }
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn add(&mut self, group: Group) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.groups.push((id, group));
        id
    }

    /// Detaches a group; returns it if it was part of the scene.
    pub fn remove(&mut self, id: NodeId) -> Option<Group> {
        let index = self.groups.iter().position(|(node, _)| *node == id)?;
        Some(self.groups.remove(index).1)
    }

    pub fn get(&self, id: NodeId) -> Option<&Group> {
        self.groups
            .iter()
            .find(|(node, _)| *node == id)
            .map(|(_, group)| group)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Group> {
        self.groups
            .iter_mut()
            .find(|(node, _)| *node == id)
            .map(|(_, group)| group)
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter().map(|(_, group)| group)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

/// Perspective camera looking down -Z from `position`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees
    pub fov: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
    pub position: Vec3,
    focal: f64,
}

impl PerspectiveCamera {
    pub fn new(fov: f64, aspect: f64, near: f64, far: f64) -> Self {
        let mut camera = PerspectiveCamera {
            fov,
            aspect,
            near,
            far,
            position: [0.0; 3],
            focal: 1.0,
        };
        camera.update_projection();
        camera
    }

    /// Recomputes cached projection terms after `fov` or `aspect` changed.
    pub fn update_projection(&mut self) {
        self.focal = 1.0 / (self.fov.to_radians() / 2.0).tan();
    }

    /// Projects a world point to normalized device coordinates plus the
    /// view depth. Returns `None` outside the near/far range.
    pub fn project(&self, point: &Vec3) -> Option<([f64; 2], f64)> {
        let depth = self.position[2] - point[2];
        if depth < self.near || depth > self.far {
            return None;
        }
        let x = (point[0] - self.position[0]) * self.focal / (self.aspect * depth);
        let y = (point[1] - self.position[1]) * self.focal / depth;
        Some(([x, y], depth))
    }
}
