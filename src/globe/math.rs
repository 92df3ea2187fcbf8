use std::ops::Sub;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ORIGIN: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Rotate about the X axis, then the Y axis
    pub fn rotate_xy(self, angle_x: f32, angle_y: f32) -> Self {
        let (sx, cx) = angle_x.sin_cos();
        let (sy, cy) = angle_y.sin_cos();
        let y1 = self.y * cx - self.z * sx;
        let z1 = self.y * sx + self.z * cx;
        Self {
            x: self.x * cy + z1 * sy,
            y: y1,
            z: -self.x * sy + z1 * cy,
        }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Point on a sphere of `radius`, azimuth `angle` in the XZ plane and
/// `polar` measured from +Y.
#[inline]
pub fn spherical(radius: f32, angle: f32, polar: f32) -> Vec3 {
    let (sin_polar, cos_polar) = polar.sin_cos();
    Vec3 {
        x: radius * angle.cos() * sin_polar,
        y: radius * cos_polar,
        z: radius * angle.sin() * sin_polar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn spherical_poles_and_equator() {
        let north = spherical(2.0, 1.3, 0.0);
        assert!((north.y - 2.0).abs() < 1e-6);
        assert!(north.x.abs() < 1e-6 && north.z.abs() < 1e-6);

        let east = spherical(2.0, 0.0, FRAC_PI_2);
        assert!((east.x - 2.0).abs() < 1e-6);
        assert!(east.y.abs() < 1e-6);

        let south = spherical(2.0, 0.0, PI);
        assert!((south.y + 2.0).abs() < 1e-6);
    }

    #[test]
    fn rotation_preserves_length() {
        let v = Vec3::new(1.0, -2.0, 0.5);
        let r = v.rotate_xy(0.7, -1.9);
        assert!((v.length() - r.length()).abs() < 1e-5);
    }

    #[test]
    fn difference_length() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(-1.0, 0.0, 3.0);
        assert!(((a - b).length() - 8.0f32.sqrt()).abs() < 1e-6);
    }
}
