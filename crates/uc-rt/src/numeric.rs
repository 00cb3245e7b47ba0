use crate::prim::{UcFloat, UcInt, UcLong};
use crate::text::UcText;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NumKind {
    Int,
    Long,
    Float,
}

impl NumKind {
    pub const ALL: [NumKind; 3] = [NumKind::Int, NumKind::Long, NumKind::Float];

    pub fn as_str(self) -> &'static str {
        match self {
            NumKind::Int => "int",
            NumKind::Long => "long",
            NumKind::Float => "float",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "int" => Some(NumKind::Int),
            "long" => Some(NumKind::Long),
            "float" => Some(NumKind::Float),
            _ => None,
        }
    }
}

/// Result kind of `lhs + rhs`, indexed `[lhs][rhs]`.
///
/// Follows the host's usual arithmetic conversions: the wider operand wins and any
/// floating operand makes the result floating. The diagonal is the same-kind case.
pub const PROMOTION: [[NumKind; 3]; 3] = [
    //  int             long            float
    [NumKind::Int, NumKind::Long, NumKind::Float], // int
    [NumKind::Long, NumKind::Long, NumKind::Float], // long
    [NumKind::Float, NumKind::Float, NumKind::Float], // float
];

pub const fn promote(lhs: NumKind, rhs: NumKind) -> NumKind {
    PROMOTION[lhs as usize][rhs as usize]
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::UcInt {}
    impl Sealed for super::UcLong {}
    impl Sealed for super::UcFloat {}
}

/// A uC numeric primitive. Sealed: the set of numeric kinds is closed.
pub trait Numeric: sealed::Sealed + Copy + UcText {
    const KIND: NumKind;

    /// Same-kind addition. Integers wrap; floats follow IEEE 754.
    fn add_same(self, rhs: Self) -> Self;
}

impl Numeric for UcInt {
    const KIND: NumKind = NumKind::Int;

    #[inline]
    fn add_same(self, rhs: Self) -> Self {
        self.wrapping_add(rhs)
    }
}

impl Numeric for UcLong {
    const KIND: NumKind = NumKind::Long;

    #[inline]
    fn add_same(self, rhs: Self) -> Self {
        self.wrapping_add(rhs)
    }
}

impl Numeric for UcFloat {
    const KIND: NumKind = NumKind::Float;

    #[inline]
    fn add_same(self, rhs: Self) -> Self {
        self + rhs
    }
}

/// Conversion of a numeric operand into a kind at least as wide as its own.
///
/// Only widening directions have impls, so narrowing cannot be expressed.
pub trait WidenTo<T: Numeric>: Numeric {
    fn widen(self) -> T;
}

macro_rules! widen_impls {
    ($($from:ty => $to:ty;)*) => {$(
        impl WidenTo<$to> for $from {
            #[inline]
            fn widen(self) -> $to {
                self as $to
            }
        }
    )*};
}

widen_impls! {
    UcInt => UcInt;
    UcInt => UcLong;
    UcInt => UcFloat;
    UcLong => UcLong;
    UcLong => UcFloat;
    UcFloat => UcFloat;
}
