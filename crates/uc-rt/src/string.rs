use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use crate::text::UcText;

/// Immutable uC string. Clones share storage; concatenation always builds a new value.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UcString(Rc<str>);

impl UcString {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `self` followed by `rhs`. An empty operand yields the other one unchanged.
    pub fn concat(self, rhs: &UcString) -> UcString {
        if rhs.is_empty() {
            return self;
        }
        if self.is_empty() {
            return rhs.clone();
        }
        self.with_suffix(rhs.as_str())
    }

    pub(crate) fn with_suffix(&self, suffix: &str) -> UcString {
        let mut out = String::with_capacity(self.len() + suffix.len());
        out.push_str(self);
        out.push_str(suffix);
        UcString::from(out)
    }

    pub(crate) fn with_prefix_text<P: UcText>(&self, prefix: &P) -> UcString {
        let mut out = String::new();
        prefix.write_text(&mut out);
        out.push_str(self);
        UcString::from(out)
    }

    pub(crate) fn with_suffix_text<S: UcText>(&self, suffix: &S) -> UcString {
        let mut out = String::from(self.as_str());
        suffix.write_text(&mut out);
        UcString::from(out)
    }
}

impl Default for UcString {
    fn default() -> Self {
        UcString(Rc::from(""))
    }
}

impl Deref for UcString {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UcString {
    fn from(s: &str) -> Self {
        UcString(Rc::from(s))
    }
}

impl From<String> for UcString {
    fn from(s: String) -> Self {
        UcString(Rc::from(s))
    }
}

impl PartialEq<str> for UcString {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for UcString {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Debug for UcString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for UcString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}
