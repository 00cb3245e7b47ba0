//! Canonical text rendering of primitives, as used by string `+`.
//!
//! Integers render as plain decimal. Floats render as the shortest string that
//! round-trips, with a trailing `.0` dropped, and `nan` / `inf` / `-inf` for
//! non-finite values. Booleans render as `true` / `false`.

use std::fmt::Write as _;

use crate::prim::{UcBoolean, UcFloat, UcInt, UcLong};

pub trait UcText {
    fn write_text(&self, out: &mut String);

    fn to_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }
}

impl UcText for UcInt {
    fn write_text(&self, out: &mut String) {
        // Writing into a String cannot fail.
        let _ = write!(out, "{self}");
    }
}

impl UcText for UcLong {
    fn write_text(&self, out: &mut String) {
        let _ = write!(out, "{self}");
    }
}

impl UcText for UcFloat {
    fn write_text(&self, out: &mut String) {
        let mut buf = ryu::Buffer::new();
        out.push_str(fmt_float(*self, &mut buf));
    }
}

impl UcText for UcBoolean {
    fn write_text(&self, out: &mut String) {
        out.push_str(if *self { "true" } else { "false" });
    }
}

fn fmt_float(x: UcFloat, buf: &mut ryu::Buffer) -> &str {
    let s: &str = if x.is_nan() {
        "nan"
    } else if x == UcFloat::INFINITY {
        "inf"
    } else if x == UcFloat::NEG_INFINITY {
        "-inf"
    } else {
        buf.format_finite(x)
    };
    s.strip_suffix(".0").unwrap_or(s)
}
