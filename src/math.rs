use bevy::math::Vec2;

pub type Real = f32;

pub type Vector = Vec2;

#[inline(always)]
pub fn zero_vector() -> Vector {
    Vec2::ZERO
}

#[inline(always)]
pub fn lerp(t: Real, a: Real, b: Real) -> Real {
    a + (b - a) * t
}
