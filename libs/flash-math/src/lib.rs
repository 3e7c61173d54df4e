#![no_std]

pub mod fee_math;
pub mod full_math;
pub mod share_math;

pub use fee_math::*;
pub use full_math::*;
pub use share_math::*;
