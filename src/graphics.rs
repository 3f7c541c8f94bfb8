use crate::color::Color;
use crate::geometry::Triangle;
use crate::math::{
    add, cross, dot, edge_function, interpolate, multiply_matrix_vector, normalize, scale, sub,
    Mat3, Vec3,
};
use crate::scene::{to_world, Light, Material, PerspectiveCamera, Scene};
use crate::vertex::Vertex;

/// Phong specular strength of every material
const SPECULAR: f64 = 0.067;
/// Half-size of the square area covered by the directional shadow map
const SHADOW_EXTENT: f64 = 5.0;
const SHADOW_BIAS: f64 = 0.05;

/// Borrowed view of the last rendered frame, RGBA8 rows top to bottom
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub width: usize,
    pub height: usize,
    pub pixels: &'a [u8],
}

impl Frame<'_> {
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y * self.width + x) * 4;
        Some(Color::rgb8(
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
        ))
    }
}

/// Depth map rendered from a directional light
#[derive(Debug, Clone)]
struct ShadowMap {
    size: usize,
    depths: Vec<f64>,
    right: Vec3,
    up: Vec3,
    forward: Vec3,
}

impl ShadowMap {
    fn new(size: usize) -> Self {
        ShadowMap {
            size,
            depths: vec![f64::INFINITY; size * size],
            right: [1.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            forward: [0.0, 0.0, -1.0],
        }
    }

    fn aim(&mut self, light_position: &Vec3) {
        self.forward = normalize(&scale(light_position, -1.0));
        let world_up = if self.forward[1].abs() > 0.99 {
            [0.0, 0.0, 1.0]
        } else {
            [0.0, 1.0, 0.0]
        };
        self.right = normalize(&cross(&self.forward, &world_up));
        self.up = cross(&self.right, &self.forward);
        self.depths.fill(f64::INFINITY);
    }

    /// Texel coordinates and depth along the light direction
    fn project(&self, point: &Vec3) -> ([f64; 2], f64) {
        let texels = self.size as f64 / (2.0 * SHADOW_EXTENT);
        let u = (dot(point, &self.right) + SHADOW_EXTENT) * texels;
        let v = (SHADOW_EXTENT - dot(point, &self.up)) * texels;
        ([u, v], dot(point, &self.forward))
    }

    fn draw(&mut self, corners: &[Vec3; 3]) {
        let projected = corners.map(|corner| self.project(&corner));
        let screen = projected.map(|(texel, _)| texel);
        let size = self.size;
        let depths = &mut self.depths;
        for_each_covered_pixel(&screen, size, size, |x, y, weights| {
            let depth = projected[0].1 * weights[0]
                + projected[1].1 * weights[1]
                + projected[2].1 * weights[2];
            let offset = y * size + x;
            if depth < depths[offset] {
                depths[offset] = depth;
            }
        });
    }

    fn is_lit(&self, point: &Vec3) -> bool {
        let ([u, v], depth) = self.project(point);
        if u < 0.0 || v < 0.0 {
            return true;
        }
        let (x, y) = (u as usize, v as usize);
        if x >= self.size || y >= self.size {
            return true;
        }
        depth - SHADOW_BIAS <= self.depths[y * self.size + x]
    }
}

/// Software rasterizer with per-pixel Phong lighting
#[derive(Debug, Clone)]
pub struct Renderer {
    width: usize,
    height: usize,
    pixel_ratio: f64,
    buffer_width: usize,
    buffer_height: usize,
    pixel_data: Vec<u8>,
    z_buffer: Vec<f64>,
    pub shadow_map_enabled: bool,
    shadow_map: ShadowMap,
}

impl Renderer {
    pub fn new(shadow_map_size: usize) -> Self {
        Renderer {
            width: 0,
            height: 0,
            pixel_ratio: 1.0,
            buffer_width: 0,
            buffer_height: 0,
            pixel_data: Vec::new(),
            z_buffer: Vec::new(),
            shadow_map_enabled: false,
            shadow_map: ShadowMap::new(shadow_map_size.max(1)),
        }
    }

    /// Sets the output size in surface units; the drawing buffer is this
    /// size times the pixel ratio.
    pub fn set_size(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.allocate();
    }

    pub fn set_pixel_ratio(&mut self, ratio: f64) {
        self.pixel_ratio = if ratio.is_finite() && ratio > 0.0 {
            ratio
        } else {
            1.0
        };
        self.allocate();
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    pub fn buffer_size(&self) -> (usize, usize) {
        (self.buffer_width, self.buffer_height)
    }

    fn allocate(&mut self) {
        self.buffer_width = (self.width as f64 * self.pixel_ratio).round() as usize;
        self.buffer_height = (self.height as f64 * self.pixel_ratio).round() as usize;
        let pixels = self.buffer_width * self.buffer_height;
        self.pixel_data = vec![0u8; pixels * 4];
        self.z_buffer = vec![f64::INFINITY; pixels];
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            width: self.buffer_width,
            height: self.buffer_height,
            pixels: &self.pixel_data,
        }
    }

    /// Draws every group of the scene as seen by the camera.
    pub fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Frame<'_> {
        let (r, g, b) = scene.background.as_rgb8();
        for pixel in self.pixel_data.chunks_exact_mut(4) {
            pixel.copy_from_slice(&[r, g, b, 255]);
        }
        self.z_buffer.fill(f64::INFINITY);

        let shadows = self.prepare_shadows(scene);
        let lighting = Lighting::from_scene(scene, camera.position);

        for group in scene.groups() {
            for (mesh, rotation, offset) in group.world_transforms() {
                let receives = shadows && mesh.receive_shadow;
                for triangle in &mesh.geometry.triangles {
                    let Some(vertices) =
                        self.project_triangle(camera, &rotation, &offset, triangle)
                    else {
                        continue;
                    };
                    self.draw_triangle(&vertices, mesh.material, &lighting, receives);
                }
            }
        }

        self.frame()
    }

    fn prepare_shadows(&mut self, scene: &Scene) -> bool {
        if !self.shadow_map_enabled {
            return false;
        }
        let Some(light_position) = scene.lights.iter().find_map(|light| match light {
            Light::Directional {
                position,
                cast_shadow: true,
                ..
            } => Some(*position),
            _ => None,
        }) else {
            return false;
        };

        self.shadow_map.aim(&light_position);
        for group in scene.groups() {
            for (mesh, rotation, offset) in group.world_transforms() {
                if !mesh.cast_shadow {
                    continue;
                }
                for triangle in &mesh.geometry.triangles {
                    let corners = triangle
                        .positions
                        .map(|corner| to_world(&rotation, &offset, &corner));
                    self.shadow_map.draw(&corners);
                }
            }
        }
        true
    }

    fn project_triangle(
        &self,
        camera: &PerspectiveCamera,
        rotation: &Mat3,
        offset: &Vec3,
        triangle: &Triangle,
    ) -> Option<[Vertex; 3]> {
        let mut vertices = [Vertex {
            position: [0.0; 3],
            screen_position: [0.0; 2],
            depth: 0.0,
            normal: [0.0; 3],
        }; 3];
        for (vertex, (position, normal)) in vertices
            .iter_mut()
            .zip(triangle.positions.iter().zip(&triangle.normals))
        {
            let world = to_world(rotation, offset, position);
            let (ndc, depth) = camera.project(&world)?;
            *vertex = Vertex {
                position: world,
                screen_position: [
                    (ndc[0] + 1.0) / 2.0 * self.buffer_width as f64,
                    (1.0 - ndc[1]) / 2.0 * self.buffer_height as f64,
                ],
                depth,
                normal: multiply_matrix_vector(rotation, normal),
            };
        }
        Some(vertices)
    }

    /// Draws a triangle with per-pixel lighting
    fn draw_triangle(
        &mut self,
        vertices: &[Vertex; 3],
        material: Material,
        lighting: &Lighting,
        receive_shadow: bool,
    ) {
        let [v0, v1, v2] = vertices;
        let screen = [v0.screen_position, v1.screen_position, v2.screen_position];
        let width = self.buffer_width;
        let height = self.buffer_height;
        let z_buffer = &mut self.z_buffer;
        let pixel_data = &mut self.pixel_data;
        let shadow_map = &self.shadow_map;

        for_each_covered_pixel(&screen, width, height, |x, y, weights| {
            let depth = v0.depth * weights[0] + v1.depth * weights[1] + v2.depth * weights[2];

            // Depth test
            let offset = y * width + x;
            if depth >= z_buffer[offset] {
                return;
            }
            z_buffer[offset] = depth;

            let position = interpolate([&v0.position, &v1.position, &v2.position], weights);
            let normal = normalize(&interpolate(
                [&v0.normal, &v1.normal, &v2.normal],
                weights,
            ));
            let lit = !receive_shadow || shadow_map.is_lit(&position);
            let shaded_color = lighting.shade(material, &position, &normal, lit);

            // Set pixel color
            let pixel_offset = offset * 4;
            let (r, g, b) = shaded_color.as_rgb8();
            pixel_data[pixel_offset] = r;
            pixel_data[pixel_offset + 1] = g;
            pixel_data[pixel_offset + 2] = b;
            pixel_data[pixel_offset + 3] = 255;
        });
    }
}

/// Light terms gathered once per frame
struct Lighting {
    ambient: [f64; 3],
    directional: Vec<([f64; 3], Vec3, bool)>,
    eye: Vec3,
}

impl Lighting {
    fn from_scene(scene: &Scene, eye: Vec3) -> Self {
        let mut ambient = [0.0; 3];
        let mut directional = Vec::new();
        for light in &scene.lights {
            match *light {
                Light::Ambient { color, intensity } => {
                    let rgb = color.normalized();
                    for i in 0..3 {
                        ambient[i] += rgb[i] * intensity;
                    }
                }
                Light::Directional {
                    color,
                    intensity,
                    position,
                    cast_shadow,
                } => {
                    let rgb = scale(&color.normalized(), intensity);
                    directional.push((rgb, normalize(&position), cast_shadow));
                }
            }
        }
        Lighting {
            ambient,
            directional,
            eye,
        }
    }

    fn shade(
        &self,
        material: Material,
        position: &Vec3,
        normal: &Vec3,
        lit: bool,
    ) -> Color {
        let view = normalize(&sub(&self.eye, position));
        // Seen from behind: light the side facing the camera
        let normal = if dot(normal, &view) < 0.0 {
            scale(normal, -1.0)
        } else {
            *normal
        };

        let mut light = self.ambient;
        let mut highlight = [0.0; 3];
        for (rgb, direction, casts) in &self.directional {
            if *casts && !lit {
                continue;
            }
            let diffuse = dot(&normal, direction);
            if diffuse <= 0.0 {
                continue;
            }
            let half = normalize(&add(direction, &view));
            let specular = dot(&normal, &half).max(0.0).powf(material.shininess) * SPECULAR;
            for i in 0..3 {
                light[i] += rgb[i] * diffuse;
                highlight[i] += rgb[i] * specular;
            }
        }
        material.color.shade(light, highlight)
    }
}

/// Calls `plot` for every pixel centre inside the triangle with its
/// barycentric weights. Both windings are accepted.
fn for_each_covered_pixel(
    screen: &[[f64; 2]; 3],
    width: usize,
    height: usize,
    mut plot: impl FnMut(usize, usize, [f64; 3]),
) {
    if width == 0 || height == 0 {
        return;
    }
    let [p0, p1, p2] = screen;

    // Precompute area of the triangle
    let area = edge_function(p0, p1, p2);
    if area == 0.0 || !area.is_finite() {
        return;
    }

    // Compute bounding box of the triangle
    let min_x = p0[0].min(p1[0]).min(p2[0]).floor().max(0.0);
    let max_x = p0[0].max(p1[0]).max(p2[0]).ceil().min(width as f64 - 1.0);
    let min_y = p0[1].min(p1[1]).min(p2[1]).floor().max(0.0);
    let max_y = p0[1].max(p1[1]).max(p2[1]).ceil().min(height as f64 - 1.0);
    if min_x > max_x || min_y > max_y {
        return;
    }

    for y in min_y as usize..=max_y as usize {
        for x in min_x as usize..=max_x as usize {
            let p = [x as f64 + 0.5, y as f64 + 0.5];
            let w0 = edge_function(p1, p2, &p) / area;
            let w1 = edge_function(p2, p0, &p) / area;
            let w2 = edge_function(p0, p1, &p) / area;
            if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                plot(x, y, [w0, w1, w2]);
            }
        }
    }
}
