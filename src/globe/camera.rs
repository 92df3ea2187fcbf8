use super::math::Vec3;

const FOV_DEGREES: f32 = 75.0;
const NEAR: f32 = 0.1;
const FAR: f32 = 1000.0;
const DISTANCE: f32 = 5.0;

/// Perspective camera on the +Z axis looking at the origin
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    fov_y: f32,
    aspect: f32,
    near: f32,
    far: f32,
    distance: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        let mut camera = Self {
            fov_y: FOV_DEGREES.to_radians(),
            aspect: 1.0,
            near: NEAR,
            far: FAR,
            distance: DISTANCE,
        };
        camera.set_aspect(aspect);
        camera
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Non-finite or non-positive ratios are ignored
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Project to normalized device coordinates.
    ///
    /// Returns `(x, y, depth)` with x/y in -1..1 for visible points and depth
    /// the distance in front of the camera, or `None` outside the clip range.
    pub fn project(&self, p: Vec3) -> Option<(f32, f32, f32)> {
        let depth = self.distance - p.z;
        if depth < self.near || depth > self.far {
            return None;
        }
        let focal = 1.0 / (self.fov_y / 2.0).tan();
        let x = p.x * focal / (self.aspect * depth);
        let y = p.y * focal / depth;
        Some((x, y, depth))
    }

    /// Projected length of a segment of `size` at `depth`, in NDC height units
    pub fn scale_at(&self, size: f32, depth: f32) -> f32 {
        size / ((self.fov_y / 2.0).tan() * depth)
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }
}
