use std::fmt;

use crate::builtin::Builtin;

/// Every way evaluation can fail. These are carried inside
/// [`Object::Error`](crate::object::Object::Error) values and ride the
/// ordinary value channel; `Display` output is the exact message text the
/// language guarantees.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum RuntimeError {
    /// Infix operands of two different kinds (e.g. `5 + true`).
    TypeMismatch {
        operator: String,
        left: &'static str,
        right: &'static str,
    },
    /// Prefix operator applied to an unsupported kind (e.g. `-true`).
    UnknownPrefixOperator {
        operator: String,
        right: &'static str,
    },
    /// Infix operator unsupported for same-kind operands (e.g. `true + false`).
    UnknownInfixOperator {
        operator: String,
        left: &'static str,
        right: &'static str,
    },
    /// Name not bound in any reachable scope and not a builtin.
    IdentifierNotFound(String),
    /// Call syntax applied to a non-callable value.
    NotAFunction(&'static str),
    /// Index syntax applied to a kind that does not support it.
    IndexNotSupported(&'static str),
    /// Call argument count does not match the parameter count.
    WrongArgumentCount { got: usize, want: usize },
    /// Builtin argument of a kind the builtin cannot handle.
    UnsupportedArgument {
        builtin: Builtin,
        got: &'static str,
    },
    /// Builtin that operates on arrays was given something else.
    ArgumentNotArray {
        builtin: Builtin,
        got: &'static str,
    },
    DivisionByZero,
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use RuntimeError::*;

        match self {
            TypeMismatch {
                operator,
                left,
                right,
            } => write!(f, "type mismatch: {} {} {}", left, operator, right),
            UnknownPrefixOperator { operator, right } => {
                write!(f, "unknown operator: {}{}", operator, right)
            }
            UnknownInfixOperator {
                operator,
                left,
                right,
            } => write!(f, "unknown operator: {} {} {}", left, operator, right),
            IdentifierNotFound(name) => write!(f, "identifier not found: {}", name),
            NotAFunction(kind) => write!(f, "not a function: {}", kind),
            IndexNotSupported(kind) => {
                write!(f, "index operator not supported: {}", kind)
            }
            WrongArgumentCount { got, want } => {
                write!(f, "wrong number of arguments. got={}, want={}", got, want)
            }
            UnsupportedArgument { builtin, got } => {
                write!(
                    f,
                    "argument to `{}` not supported, got {}",
                    builtin.name(),
                    got
                )
            }
            ArgumentNotArray { builtin, got } => {
                write!(
                    f,
                    "argument to `{}` must be ARRAY, got {}",
                    builtin.name(),
                    got
                )
            }
            DivisionByZero => write!(f, "division by zero"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::builtin::Builtin;
    use crate::error::RuntimeError;

    #[test]
    fn message_templates() {
        let tests = vec![
            (
                RuntimeError::TypeMismatch {
                    operator: "+".to_string(),
                    left: "INTEGER",
                    right: "BOOLEAN",
                },
                "type mismatch: INTEGER + BOOLEAN",
            ),
            (
                RuntimeError::UnknownPrefixOperator {
                    operator: "-".to_string(),
                    right: "BOOLEAN",
                },
                "unknown operator: -BOOLEAN",
            ),
            (
                RuntimeError::UnknownInfixOperator {
                    operator: "-".to_string(),
                    left: "STRING",
                    right: "STRING",
                },
                "unknown operator: STRING - STRING",
            ),
            (
                RuntimeError::IdentifierNotFound("foobar".to_string()),
                "identifier not found: foobar",
            ),
            (
                RuntimeError::NotAFunction("INTEGER"),
                "not a function: INTEGER",
            ),
            (
                RuntimeError::IndexNotSupported("INTEGER"),
                "index operator not supported: INTEGER",
            ),
            (
                RuntimeError::WrongArgumentCount { got: 2, want: 1 },
                "wrong number of arguments. got=2, want=1",
            ),
            (
                RuntimeError::UnsupportedArgument {
                    builtin: Builtin::Len,
                    got: "INTEGER",
                },
                "argument to `len` not supported, got INTEGER",
            ),
            (
                RuntimeError::ArgumentNotArray {
                    builtin: Builtin::First,
                    got: "INTEGER",
                },
                "argument to `first` must be ARRAY, got INTEGER",
            ),
            (RuntimeError::DivisionByZero, "division by zero"),
        ];

        for (error, expected) in tests {
            assert_eq!(error.to_string(), expected);
        }
    }
}
