use crate::error::RuntimeError;
use crate::runtime::{builtin_function::BuiltinFunction, object::Object};

fn check_arity(got: usize, want: usize) -> Result<(), RuntimeError> {
    if got != want {
        return Err(RuntimeError::WrongArity { got, want });
    }
    Ok(())
}

fn builtin_puts(args: Vec<Object>) -> Result<Object, RuntimeError> {
    for arg in &args {
        match arg {
            Object::String(s) => println!("{}", s),
            other => println!("{}", other),
        }
    }
    Ok(Object::Null)
}

fn builtin_println(args: Vec<Object>) -> Result<Object, RuntimeError> {
    builtin_puts(args)
}

fn builtin_len(args: Vec<Object>) -> Result<Object, RuntimeError> {
    check_arity(args.len(), 1)?;
    match &args[0] {
        Object::String(s) => Ok(Object::Integer(s.len() as i64)),
        Object::Array(arr) => Ok(Object::Integer(arr.len() as i64)),
        other => Err(RuntimeError::UnsupportedOperandTypes {
            operator: "len".to_string(),
            left: other.type_name(),
            right: other.type_name(),
        }),
    }
}

fn builtin_first(args: Vec<Object>) -> Result<Object, RuntimeError> {
    check_arity(args.len(), 1)?;
    match &args[0] {
        Object::Array(arr) => Ok(arr.first().cloned().unwrap_or(Object::Null)),
        other => Err(RuntimeError::UnsupportedOperandTypes {
            operator: "first".to_string(),
            left: other.type_name(),
            right: other.type_name(),
        }),
    }
}

fn builtin_last(args: Vec<Object>) -> Result<Object, RuntimeError> {
    check_arity(args.len(), 1)?;
    match &args[0] {
        Object::Array(arr) => Ok(arr.last().cloned().unwrap_or(Object::Null)),
        other => Err(RuntimeError::UnsupportedOperandTypes {
            operator: "last".to_string(),
            left: other.type_name(),
            right: other.type_name(),
        }),
    }
}

fn builtin_rest(args: Vec<Object>) -> Result<Object, RuntimeError> {
    check_arity(args.len(), 1)?;
    match &args[0] {
        Object::Array(arr) => {
            if arr.is_empty() {
                Ok(Object::Null)
            } else {
                Ok(Object::Array(arr[1..].to_vec()))
            }
        }
        other => Err(RuntimeError::UnsupportedOperandTypes {
            operator: "rest".to_string(),
            left: other.type_name(),
            right: other.type_name(),
        }),
    }
}

fn builtin_push(args: Vec<Object>) -> Result<Object, RuntimeError> {
    check_arity(args.len(), 2)?;
    match &args[0] {
        Object::Array(arr) => {
            let mut new_arr = arr.clone();
            new_arr.push(args[1].clone());
            Ok(Object::Array(new_arr))
        }
        other => Err(RuntimeError::UnsupportedOperandTypes {
            operator: "push".to_string(),
            left: other.type_name(),
            right: other.type_name(),
        }),
    }
}

/// All built-in functions in registry order; index matters for `OpGetBuiltin`.
pub static BUILTINS: &[BuiltinFunction] = &[
    BuiltinFunction { name: "puts", func: builtin_puts },
    BuiltinFunction { name: "println", func: builtin_println },
    BuiltinFunction { name: "len", func: builtin_len },
    BuiltinFunction { name: "first", func: builtin_first },
    BuiltinFunction { name: "last", func: builtin_last },
    BuiltinFunction { name: "rest", func: builtin_rest },
    BuiltinFunction { name: "push", func: builtin_push },
];

pub static BUILTIN_NAMES: &[&str] =
    &["puts", "println", "len", "first", "last", "rest", "push"];

pub fn get_builtin(name: &str) -> Option<&'static BuiltinFunction> {
    BUILTINS.iter().find(|b| b.name == name)
}

pub fn get_builtin_by_index(index: usize) -> Option<&'static BuiltinFunction> {
    BUILTINS.get(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_len_string() {
        assert_eq!(builtin_len(vec![Object::String("hello".to_string())]).unwrap(), Object::Integer(5));
    }

    #[test]
    fn test_builtin_len_array() {
        let arr = Object::Array(vec![Object::Integer(1), Object::Integer(2), Object::Integer(3)]);
        assert_eq!(builtin_len(vec![arr]).unwrap(), Object::Integer(3));
    }

    #[test]
    fn test_builtin_len_wrong_arity() {
        assert_eq!(builtin_len(vec![]).unwrap_err(), RuntimeError::WrongArity { got: 0, want: 1 });
    }

    #[test]
    fn test_builtin_first_last_empty_array() {
        let empty = Object::Array(vec![]);
        assert_eq!(builtin_first(vec![empty.clone()]).unwrap(), Object::Null);
        assert_eq!(builtin_last(vec![empty]).unwrap(), Object::Null);
    }

    #[test]
    fn test_builtin_rest() {
        let arr = Object::Array(vec![Object::Integer(1), Object::Integer(2), Object::Integer(3)]);
        assert_eq!(
            builtin_rest(vec![arr]).unwrap(),
            Object::Array(vec![Object::Integer(2), Object::Integer(3)])
        );
    }

    #[test]
    fn test_builtin_push() {
        let arr = Object::Array(vec![Object::Integer(1)]);
        assert_eq!(
            builtin_push(vec![arr, Object::Integer(2)]).unwrap(),
            Object::Array(vec![Object::Integer(1), Object::Integer(2)])
        );
    }

    #[test]
    fn test_get_builtin() {
        assert!(get_builtin("len").is_some());
        assert!(get_builtin("puts").is_some());
        assert!(get_builtin("nonexistent").is_none());
    }

    #[test]
    fn test_builtin_indices_match_names() {
        for (idx, name) in BUILTIN_NAMES.iter().enumerate() {
            assert_eq!(get_builtin_by_index(idx).unwrap().name, *name);
        }
    }
}
