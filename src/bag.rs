use crate::color::Color;
use crate::geometry::Geometry;
use crate::scene::{Group, Material, Mesh};
use std::f64::consts::{FRAC_PI_2, PI};

pub const ZIPPER_COLOR: Color = Color(0xc0c0c0);

/// Builds a fresh bag group painted in `color`.
///
/// The pocket and base trim use darker shades of `color`; the zipper strip
/// keeps a fixed light gray.
pub fn build_bag(color: Color) -> Group {
    let mut bag = Group::default();

    let body = Mesh::new(
        "body",
        Geometry::cuboid(1.5, 1.8, 0.8),
        Material {
            color,
            shininess: 100.0,
        },
    )
    .with_shadows(true, true);
    bag.add(body);

    let handle = Mesh::new(
        "handle",
        Geometry::torus(0.6, 0.15, 16, 100, PI),
        Material {
            color,
            shininess: 100.0,
        },
    )
    .at([0.0, 1.3, 0.0])
    .rotated(FRAC_PI_2, 0.0)
    .with_shadows(true, true);
    bag.add(handle);

    let pocket = Mesh::new(
        "pocket",
        Geometry::cuboid(1.2, 0.6, 0.05),
        Material {
            color: color.adjust(-0.2),
            shininess: 80.0,
        },
    )
    .at([0.0, -0.2, 0.43])
    .with_shadows(true, false);
    bag.add(pocket);

    let base = Mesh::new(
        "base",
        Geometry::cuboid(1.5, 0.1, 0.8),
        Material {
            color: color.adjust(-0.3),
            shininess: 100.0,
        },
    )
    .at([0.0, -0.95, 0.0])
    .with_shadows(true, false);
    bag.add(base);

    let zipper = Mesh::new(
        "zipper",
        Geometry::cuboid(0.05, 0.8, 0.02),
        Material {
            color: ZIPPER_COLOR,
            shininess: 120.0,
        },
    )
    .at([0.0, 0.0, 0.42]);
    bag.add(zipper);

    bag
}
