//! Runtime support for generated uC programs.
//!
//! Generated code calls three polymorphic builtins:
//! - [`uc_add`] for source-level `+`
//! - [`uc_length`] (and [`uc_length_place`]) for `.length`
//! - [`uc_id`] for `#ref`
//!
//! Every call is resolved by trait selection on the static operand types. There is no
//! run-time type inspection: an operand combination the uC type checker rejects has no
//! impl here and does not build.

pub mod add;
pub mod array;
pub mod identity;
pub mod length;
pub mod numeric;
pub mod prim;
pub mod record;
pub mod sig;
pub mod string;
pub mod text;

pub use add::{uc_add, UcAdd};
pub use array::UcArray;
pub use identity::{uc_id, HasIdentity};
pub use length::{uc_length, uc_length_place, LengthPlace, UcLength};
pub use numeric::{promote, NumKind, Numeric, PROMOTION};
pub use prim::{UcBoolean, UcFloat, UcInt, UcLong};
pub use record::{HasLengthField, Record, UcRef};
pub use string::UcString;
pub use text::UcText;
