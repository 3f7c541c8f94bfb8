use crate::math::{normalize, Vec3};
use std::f64::consts::TAU;

/// A triangle with per-corner normals, in model space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub positions: [Vec3; 3],
    pub normals: [Vec3; 3],
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    pub triangles: Vec<Triangle>,
}

impl Geometry {
    /// An axis-aligned box centred on the origin.
    pub fn cuboid(width: f64, height: f64, depth: f64) -> Self {
        let (x, y, z) = (width / 2.0, height / 2.0, depth / 2.0);

        // Each face: outward normal and four corners counter-clockwise seen from outside
        let faces: [(Vec3, [Vec3; 4]); 6] = [
            (
                [0.0, 0.0, 1.0],
                [[-x, -y, z], [x, -y, z], [x, y, z], [-x, y, z]],
            ),
            (
                [0.0, 0.0, -1.0],
                [[x, -y, -z], [-x, -y, -z], [-x, y, -z], [x, y, -z]],
            ),
            (
                [1.0, 0.0, 0.0],
                [[x, -y, z], [x, -y, -z], [x, y, -z], [x, y, z]],
            ),
            (
                [-1.0, 0.0, 0.0],
                [[-x, -y, -z], [-x, -y, z], [-x, y, z], [-x, y, -z]],
            ),
            (
                [0.0, 1.0, 0.0],
                [[-x, y, z], [x, y, z], [x, y, -z], [-x, y, -z]],
            ),
            (
                [0.0, -1.0, 0.0],
                [[-x, -y, -z], [x, -y, -z], [x, -y, z], [-x, -y, z]],
            ),
        ];

        let mut triangles = Vec::with_capacity(12);
        for (normal, [a, b, c, d]) in faces {
            triangles.push(Triangle {
                positions: [a, b, c],
                normals: [normal; 3],
            });
            triangles.push(Triangle {
                positions: [a, c, d],
                normals: [normal; 3],
            });
        }
        Geometry { triangles }
    }

    /// A torus (or a section of one, when `arc < 2π`) lying in the XY plane.
    ///
    /// `radial_segments` divide the tube cross-section, `tubular_segments`
    /// divide the sweep along `arc`.
    pub fn torus(
        radius: f64,
        tube: f64,
        radial_segments: usize,
        tubular_segments: usize,
        arc: f64,
    ) -> Self {
        let radial_segments = radial_segments.max(3);
        let tubular_segments = tubular_segments.max(1);

        let mut grid = Vec::with_capacity((radial_segments + 1) * (tubular_segments + 1));
        for j in 0..=radial_segments {
            let v = j as f64 / radial_segments as f64 * TAU;
            for i in 0..=tubular_segments {
                let u = i as f64 / tubular_segments as f64 * arc;
                let ring = radius + tube * v.cos();
                let position = [ring * u.cos(), ring * u.sin(), tube * v.sin()];
                let center = [radius * u.cos(), radius * u.sin(), 0.0];
                let normal = normalize(&[
                    position[0] - center[0],
                    position[1] - center[1],
                    position[2] - center[2],
                ]);
                grid.push((position, normal));
            }
        }

        let stride = tubular_segments + 1;
        let mut triangles = Vec::with_capacity(radial_segments * tubular_segments * 2);
        for j in 1..=radial_segments {
            for i in 1..=tubular_segments {
                let a = grid[stride * j + i - 1];
                let b = grid[stride * (j - 1) + i - 1];
                let c = grid[stride * (j - 1) + i];
                let d = grid[stride * j + i];
                triangles.push(Triangle {
                    positions: [a.0, b.0, d.0],
                    normals: [a.1, b.1, d.1],
                });
                triangles.push(Triangle {
                    positions: [b.0, c.0, d.0],
                    normals: [b.1, c.1, d.1],
                });
            }
        }
        Geometry { triangles }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{calculate_normal, dot};
    use std::f64::consts::PI;

    #[test]
    fn cuboid_has_twelve_outward_triangles() {
        let geometry = Geometry::cuboid(1.5, 1.8, 0.8);
        assert_eq!(geometry.triangles.len(), 12);
        for triangle in &geometry.triangles {
            let [a, b, c] = triangle.positions;
            let winding = calculate_normal(&a, &b, &c);
            assert!(dot(&winding, &triangle.normals[0]) > 0.99);
            for p in triangle.positions {
                assert!((p[0].abs() - 0.75).abs() < 1e-12);
                assert!((p[1].abs() - 0.9).abs() < 1e-12);
                assert!((p[2].abs() - 0.4).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn half_torus_stays_in_upper_half_plane() {
        let geometry = Geometry::torus(0.6, 0.15, 16, 100, PI);
        assert_eq!(geometry.triangles.len(), 16 * 100 * 2);
        for triangle in &geometry.triangles {
            for (p, n) in triangle.positions.iter().zip(triangle.normals) {
                assert!(p[1] >= -1e-9);
                assert!((dot(&n, &n) - 1.0).abs() < 1e-9);
                let ring = (p[0] * p[0] + p[1] * p[1]).sqrt();
                let tube = ((ring - 0.6).powi(2) + p[2] * p[2]).sqrt();
                assert!((tube - 0.15).abs() < 1e-9);
            }
        }
    }
}
