// Float helpers: inherent `f32` methods with `std`, `libm` otherwise.

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("scroll-recycler-adapter needs either the `std` or the `libm` feature");

#[cfg(feature = "std")]
mod imp {
    pub(crate) fn abs(x: f32) -> f32 {
        x.abs()
    }

    pub(crate) fn sin(x: f32) -> f32 {
        x.sin()
    }

    pub(crate) fn cos(x: f32) -> f32 {
        x.cos()
    }

    pub(crate) fn powf(x: f32, y: f32) -> f32 {
        x.powf(y)
    }

    pub(crate) fn sqrt(x: f32) -> f32 {
        x.sqrt()
    }
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
mod imp {
    pub(crate) fn abs(x: f32) -> f32 {
        libm::fabsf(x)
    }

    pub(crate) fn sin(x: f32) -> f32 {
        libm::sinf(x)
    }

    pub(crate) fn cos(x: f32) -> f32 {
        libm::cosf(x)
    }

    pub(crate) fn powf(x: f32, y: f32) -> f32 {
        libm::powf(x, y)
    }

    pub(crate) fn sqrt(x: f32) -> f32 {
        libm::sqrtf(x)
    }
}

#[cfg(any(feature = "std", feature = "libm"))]
pub(crate) use imp::{abs, cos, powf, sin, sqrt};
