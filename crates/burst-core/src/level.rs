/// Warp strength of the radial displacement, always within `[0, 1]`.
///
/// `0` is the identity mapping; `1` pulls the image hardest toward the center.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct DistortionLevel(f32);

impl DistortionLevel {
    pub const NONE: DistortionLevel = DistortionLevel(0.0);
    pub const MAX: DistortionLevel = DistortionLevel(1.0);

    /// Ascending levels used for the distortion frames that follow the original.
    pub const SCHEDULE: [DistortionLevel; 8] = [
        DistortionLevel(0.125),
        DistortionLevel(0.250),
        DistortionLevel(0.375),
        DistortionLevel(0.500),
        DistortionLevel(0.625),
        DistortionLevel(0.750),
        DistortionLevel(0.875),
        DistortionLevel(1.000),
    ];

    /// Create a level, clamping into `[0, 1]`. NaN maps to `0`.
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::NONE;
        }
        DistortionLevel(value.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f32 {
        self.0
    }

    /// Whether this level leaves the image untouched.
    pub fn is_identity(self) -> bool {
        self.0 <= 0.0
    }
}

impl From<f32> for DistortionLevel {
    fn from(value: f32) -> Self {
        DistortionLevel::new(value)
    }
}
