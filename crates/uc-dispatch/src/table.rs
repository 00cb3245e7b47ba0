use serde::Serialize;
use uc_rt::sig::{resolve_add, StaticType};

/// Operand types the `+` table is printed over: every primitive, plus one array and one
/// record type standing in for all reference types.
pub fn operand_universe() -> Vec<StaticType> {
    vec![
        StaticType::INT,
        StaticType::LONG,
        StaticType::FLOAT,
        StaticType::Boolean,
        StaticType::String,
        StaticType::Void,
        StaticType::Null,
        StaticType::array_of(StaticType::INT),
        StaticType::record("rec"),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddTableEntry {
    pub lhs: String,
    pub rhs: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

pub fn add_table(operands: &[StaticType]) -> Vec<AddTableEntry> {
    let mut out = Vec::with_capacity(operands.len() * operands.len());
    for lhs in operands {
        for rhs in operands {
            let res = resolve_add(lhs, rhs);
            out.push(AddTableEntry {
                lhs: lhs.to_string(),
                rhs: rhs.to_string(),
                ok: res.is_ok(),
                result: res.as_ref().ok().map(|t| t.to_string()),
                code: res.as_ref().err().map(|e| e.code.to_string()),
            });
        }
    }
    out
}
