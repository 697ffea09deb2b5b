use std::fmt;

/// `Float` stores the IEEE-754 bit pattern rather than `f64` directly so the
/// key can derive `Eq`/`Hash`; two floats compare equal as map keys exactly
/// when their bit patterns match, same as `f64::to_bits` equality (NaN bit
/// patterns are therefore keyed by representation, not float equality).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashKey {
    Integer(i64),
    Float(u64),
    Boolean(bool),
    String(String),
}

impl fmt::Display for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashKey::Integer(v) => write!(f, "{}", v),
            HashKey::Float(bits) => write!(f, "{}", f64::from_bits(*bits)),
            HashKey::Boolean(v) => write!(f, "{}", v),
            HashKey::String(v) => write!(f, "\"{}\"", v),
        }
    }
}
