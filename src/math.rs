pub type Vec3 = [f64; 3];
pub type Mat3 = [[f64; 3]; 3];

/// Edge function used in rasterization
pub fn edge_function(a: &[f64; 2], b: &[f64; 2], c: &[f64; 2]) -> f64 {
    (c[0] - a[0]) * (b[1] - a[1]) - (c[1] - a[1]) * (b[0] - a[0])
}

/// Multiplies a 3x3 matrix by a 3-dimensional vector
pub fn multiply_matrix_vector(matrix: &Mat3, vector: &Vec3) -> Vec3 {
    let mut result = [0.0; 3];
    for i in 0..3 {
        for j in 0..3 {
            result[i] += matrix[i][j] * vector[j];
        }
    }
    result
}

/// Multiplies two 3x3 matrices
pub fn multiply_matrices(a: &Mat3, b: &Mat3) -> Mat3 {
    let mut result = [[0.0; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            for k in 0..3 {
                result[i][j] += a[i][k] * b[k][j];
            }
        }
    }
    result
}

pub fn rotation_x(angle: f64) -> Mat3 {
    let (sin, cos) = angle.sin_cos();
    [[1.0, 0.0, 0.0], [0.0, cos, -sin], [0.0, sin, cos]]
}

pub fn rotation_y(angle: f64) -> Mat3 {
    let (sin, cos) = angle.sin_cos();
    [[cos, 0.0, sin], [0.0, 1.0, 0.0], [-sin, 0.0, cos]]
}

/// Rotation for Euler angles applied in X, Y, Z intrinsic order (`Rx * Ry`,
/// no Z term is ever needed here).
pub fn rotation_xy(x: f64, y: f64) -> Mat3 {
    multiply_matrices(&rotation_x(x), &rotation_y(y))
}

pub fn add(a: &Vec3, b: &Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

pub fn sub(a: &Vec3, b: &Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub fn scale(v: &Vec3, s: f64) -> Vec3 {
    [v[0] * s, v[1] * s, v[2] * s]
}

pub fn dot(a: &Vec3, b: &Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn cross(a: &Vec3, b: &Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Returns the unit vector, or the input unchanged if it has zero length.
pub fn normalize(v: &Vec3) -> Vec3 {
    let length = dot(v, v).sqrt();
    if length == 0.0 {
        *v
    } else {
        scale(v, 1.0 / length)
    }
}

/// Calculates the normal vector of a triangle
pub fn calculate_normal(a: &Vec3, b: &Vec3, c: &Vec3) -> Vec3 {
    normalize(&cross(&sub(b, a), &sub(c, a)))
}

/// Weights three vertex attributes with barycentric coordinates
pub fn interpolate(values: [&Vec3; 3], weights: [f64; 3]) -> Vec3 {
    let mut result = [0.0; 3];
    for (value, weight) in values.iter().zip(weights) {
        for i in 0..3 {
            result[i] += value[i] * weight;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn assert_near(a: Vec3, b: Vec3) {
        for i in 0..3 {
            assert!((a[i] - b[i]).abs() < 1e-9, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn quarter_turn_about_x_maps_y_to_z() {
        let rotated = multiply_matrix_vector(&rotation_x(FRAC_PI_2), &[0.0, 1.0, 0.0]);
        assert_near(rotated, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn quarter_turn_about_y_maps_z_to_x() {
        let rotated = multiply_matrix_vector(&rotation_y(FRAC_PI_2), &[0.0, 0.0, 1.0]);
        assert_near(rotated, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn xy_rotation_applies_y_first() {
        let m = rotation_xy(FRAC_PI_2, FRAC_PI_2);
        // y turn takes +z to +x, x turn leaves +x alone.
        assert_near(multiply_matrix_vector(&m, &[0.0, 0.0, 1.0]), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn triangle_normal_follows_winding() {
        let n = calculate_normal(&[0.0, 0.0, 0.0], &[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]);
        assert_near(n, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn normalize_keeps_zero_vector() {
        assert_eq!(normalize(&[0.0; 3]), [0.0; 3]);
    }
}
