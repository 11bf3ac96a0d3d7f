use bevy::prelude::*;

/// Extension trait for `Transform` to provide more concise construction methods
pub trait TransformExt {
    /// Creates a `Transform` from translation, rotation, and scale in one call
    fn from_trs(translation: Vec3, rotation: Quat, scale: Vec3) -> Self;
}

impl TransformExt for Transform {
    fn from_trs(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }
}

/// Extension trait for `usize` to provide safe f32 conversion for scene-scale values
pub trait UsizeExt {
    /// Converts `usize` to `f32` (safe for values < 16 million - body indices, stagger slots)
    fn to_f32(self) -> f32;
}

impl UsizeExt for usize {
    #[inline]
    #[allow(
        clippy::cast_precision_loss,
        reason = "indices stay far below f32 integer precision"
    )]
    fn to_f32(self) -> f32 { self as f32 }
}

/// Extension trait for `Color` used by the UI presentation pass
pub trait ColorExt {
    /// Multiplies the existing alpha by `opacity`, clamped to `0..=1`
    fn faded(self, opacity: f32) -> Self;
}

impl ColorExt for Color {
    fn faded(self, opacity: f32) -> Self {
        let alpha = self.alpha() * opacity.clamp(0.0, 1.0);
        self.with_alpha(alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faded_multiplies_alpha() {
        let color = Color::srgba(1.0, 0.0, 0.4, 0.5).faded(0.5);
        assert!((color.alpha() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn faded_clamps_opacity() {
        let color = Color::WHITE.faded(3.0);
        assert!((color.alpha() - 1.0).abs() < 1e-6);
        let color = Color::WHITE.faded(-1.0);
        assert!(color.alpha().abs() < 1e-6);
    }
}
