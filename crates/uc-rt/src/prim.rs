//! Host representations of the uC primitive types.

pub type UcInt = i32;
pub type UcLong = i64;
pub type UcFloat = f64;
pub type UcBoolean = bool;
