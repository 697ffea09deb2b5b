use std::{collections::HashMap, fmt, sync::Arc};

use crate::runtime::{
    builtin_function::BuiltinFunction, channel::Channel, closure::Closure,
    compiled_function::CompiledFunction, hash_key::HashKey,
};

/// This derive backs Rust-level equality (tests, `assert_eq!` on `Object`)
/// and is structural for every variant, `Array`/`Hash` included. The
/// scripting language's own `==`/`!=` (`VM::execute_comparison`) is
/// stricter: it rejects `Array`/`Hash` operands outright rather than
/// reusing this structural derive, since the language defines equality
/// for arrays/maps as identity and this runtime has no identity to give
/// them (they are plain owned `Vec`/`HashMap`, never aliased). `Channel`'s
/// `PartialEq` below compares by pointer, so it alone carries real
/// identity semantics through to `execute_comparison`.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
    Null,
    Function(Arc<CompiledFunction>),
    Closure(Arc<Closure>),
    Builtin(BuiltinFunction),
    Array(Vec<Object>),
    Hash(HashMap<HashKey, Object>),
    Channel(Arc<Channel>),
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(v) => write!(f, "{}", v),
            Object::Float(v) => write!(f, "{}", v),
            Object::Boolean(v) => write!(f, "{}", v),
            Object::String(v) => write!(f, "\"{}\"", v),
            Object::Null => write!(f, "null"),
            Object::Function(_) => write!(f, "<function>"),
            Object::Closure(_) => write!(f, "<closure>"),
            Object::Builtin(_) => write!(f, "<builtin>"),
            Object::Array(elements) => {
                let items: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", items.join(", "))
            }
            Object::Hash(pairs) => {
                let items: Vec<String> = pairs.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
                write!(f, "{{{}}}", items.join(", "))
            }
            Object::Channel(_) => write!(f, "<channel>"),
        }
    }
}

impl Object {
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "Int",
            Object::Float(_) => "Float",
            Object::Boolean(_) => "Bool",
            Object::String(_) => "String",
            Object::Null => "Null",
            Object::Function(_) => "Function",
            Object::Closure(_) => "Closure",
            Object::Builtin(_) => "Builtin",
            Object::Array(_) => "Array",
            Object::Hash(_) => "Hash",
            Object::Channel(_) => "Channel",
        }
    }

    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Boolean(false) | Object::Null)
    }

    /// Arrays, maps, channels, functions, and closures are not hashable —
    /// they are reference-ish/container types with no meaningful structural
    /// key. Floats hash by bit pattern, matching their `HashKey::Float`
    /// representation.
    pub fn to_hash_key(&self) -> Option<HashKey> {
        match self {
            Object::Integer(v) => Some(HashKey::Integer(*v)),
            Object::Float(v) => Some(HashKey::Float(v.to_bits())),
            Object::Boolean(v) => Some(HashKey::Boolean(*v)),
            Object::String(v) => Some(HashKey::String(v.clone())),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Object::Integer(_) | Object::Float(_))
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Object::Integer(v) => Some(*v as f64),
            Object::Float(v) => Some(*v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_display() {
        assert_eq!(Object::Integer(42).to_string(), "42");
        assert_eq!(Object::Float(1.5).to_string(), "1.5");
        assert_eq!(Object::Boolean(true).to_string(), "true");
        assert_eq!(Object::Null.to_string(), "null");
        assert_eq!(
            Object::Array(vec![Object::Integer(1), Object::Integer(2)]).to_string(),
            "[1, 2]"
        );
    }

    #[test]
    fn test_is_truthy() {
        assert!(Object::Integer(0).is_truthy());
        assert!(Object::Boolean(true).is_truthy());
        assert!(!Object::Boolean(false).is_truthy());
        assert!(!Object::Null.is_truthy());
    }

    #[test]
    fn test_hash_key() {
        assert_eq!(Object::Integer(1).to_hash_key(), Some(HashKey::Integer(1)));
        assert_eq!(
            Object::String("a".to_string()).to_hash_key(),
            Some(HashKey::String("a".to_string()))
        );
        assert_eq!(Object::Array(vec![]).to_hash_key(), None);
        assert_eq!(Object::Float(1.0).to_hash_key(), Some(HashKey::Float(1.0f64.to_bits())));
    }

    #[test]
    fn test_derived_array_and_hash_equality_is_structural() {
        // Rust-level `PartialEq`, as used by `assert_eq!` here and elsewhere
        // in the test suite. The scripting language's own `==` rejects
        // Array/Hash operands instead of going through this; see
        // `vm::tests::test_array_equality_is_a_runtime_error`.
        let a = Object::Array(vec![Object::Integer(1), Object::Integer(2)]);
        let b = Object::Array(vec![Object::Integer(1), Object::Integer(2)]);
        assert_eq!(a, b);

        let mut left = HashMap::new();
        left.insert(HashKey::String("k".to_string()), Object::Integer(1));
        let mut right = HashMap::new();
        right.insert(HashKey::String("k".to_string()), Object::Integer(1));
        assert_eq!(Object::Hash(left), Object::Hash(right));

        assert_ne!(
            Object::Array(vec![Object::Integer(1)]),
            Object::Array(vec![Object::Integer(2)])
        );
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(Object::Integer(3).as_f64(), Some(3.0));
        assert_eq!(Object::Float(2.5).as_f64(), Some(2.5));
        assert_eq!(Object::Null.as_f64(), None);
    }
}
