use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rill_parser::ast::{BlockStatement, Identifier};

use crate::builtin::Builtin;
use crate::environment::Environment;
use crate::error::RuntimeError;

/// A runtime value. Everything the evaluator produces is one of these,
/// shared behind `Rc` so environments, arrays and closures can alias
/// without copying.
///
/// `ReturnValue` wraps a `return`ed value while it travels up through
/// enclosing blocks; it is never seen by the user. `Error` rides the same
/// channel with the same short-circuit rules.
#[derive(Debug)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    String(String),
    Null,
    Array(Array),
    Function(Function),
    Builtin(Builtin),
    ReturnValue(Rc<Object>),
    Error(RuntimeError),
}

thread_local! {
    static NULL: Rc<Object> = Rc::new(Object::Null);
    static TRUE: Rc<Object> = Rc::new(Object::Boolean(true));
    static FALSE: Rc<Object> = Rc::new(Object::Boolean(false));
}

/// The canonical null. Always the same allocation, so `==` on null reduces
/// to pointer identity.
pub fn null() -> Rc<Object> {
    NULL.with(Rc::clone)
}

/// The canonical true or false. Same-allocation guarantee as [`null`].
pub fn boolean(value: bool) -> Rc<Object> {
    if value {
        TRUE.with(Rc::clone)
    } else {
        FALSE.with(Rc::clone)
    }
}

pub fn error(error: RuntimeError) -> Rc<Object> {
    Rc::new(Object::Error(error))
}

impl Object {
    /// The kind tag used in error messages.
    pub fn kind(&self) -> &'static str {
        use Object::*;

        match self {
            Integer(_) => "INTEGER",
            Boolean(_) => "BOOLEAN",
            String(_) => "STRING",
            Null => "NULL",
            Array(_) => "ARRAY",
            Function(_) => "FUNCTION",
            Builtin(_) => "BUILTIN",
            ReturnValue(_) => "RETURN_VALUE",
            Error(_) => "ERROR",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }
}

impl fmt::Display for Object {
    /// The inspection rendering shown by the REPL and `puts`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Object::*;

        match self {
            Integer(value) => write!(f, "{}", value),
            Boolean(value) => write!(f, "{}", value),
            String(value) => write!(f, "{}", value),
            Null => write!(f, "null"),
            Array(array) => write!(f, "{}", array),
            Function(function) => write!(f, "{}", function),
            Builtin(builtin) => write!(f, "{}", builtin),
            ReturnValue(value) => write!(f, "{}", value),
            Error(error) => write!(f, "ERROR: {}", error),
        }
    }
}

#[derive(Debug)]
pub struct Array {
    pub elements: Vec<Rc<Object>>,
}

impl fmt::Display for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let elements: Vec<String> =
            self.elements.iter().map(|el| el.to_string()).collect();
        write!(f, "[{}]", elements.join(", "))
    }
}

/// A closure: the literal's parameters and body plus the environment that
/// was current when the literal was evaluated. The environment is shared,
/// not copied, which is what makes captured bindings stay live after their
/// defining scope exits.
#[derive(Debug)]
pub struct Function {
    pub parameters: Vec<Identifier>,
    pub body: Rc<BlockStatement>,
    pub env: Rc<RefCell<Environment>>,
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<String> =
            self.parameters.iter().map(|p| p.to_string()).collect();

        write!(f, "fn({}) {}", params.join(", "), self.body)
    }
}
