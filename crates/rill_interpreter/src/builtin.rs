use std::fmt;
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::object::{self, Array, Object};

/// The fixed set of host-implemented functions. Identifier resolution falls
/// back to this registry when no user binding shadows the name, so a
/// `let len = ...` wins over the builtin.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Builtin {
    Len,
    First,
    Last,
    Rest,
    Push,
    Puts,
}

impl Builtin {
    pub fn lookup(name: &str) -> Option<Builtin> {
        match name {
            "len" => Some(Builtin::Len),
            "first" => Some(Builtin::First),
            "last" => Some(Builtin::Last),
            "rest" => Some(Builtin::Rest),
            "push" => Some(Builtin::Push),
            "puts" => Some(Builtin::Puts),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Len => "len",
            Builtin::First => "first",
            Builtin::Last => "last",
            Builtin::Rest => "rest",
            Builtin::Push => "push",
            Builtin::Puts => "puts",
        }
    }

    pub fn apply(&self, args: &[Rc<Object>]) -> Result<Rc<Object>, RuntimeError> {
        match self {
            Builtin::Len => {
                self.expect_arity(args, 1)?;

                match args[0].as_ref() {
                    Object::String(value) => Ok(Rc::new(Object::Integer(value.len() as i64))),
                    Object::Array(array) => {
                        Ok(Rc::new(Object::Integer(array.elements.len() as i64)))
                    }
                    _ => Err(RuntimeError::UnsupportedArgument {
                        builtin: *self,
                        got: args[0].kind(),
                    }),
                }
            }
            Builtin::First => {
                self.expect_arity(args, 1)?;
                let array = self.expect_array(&args[0])?;

                Ok(match array.elements.first() {
                    Some(element) => Rc::clone(element),
                    None => object::null(),
                })
            }
            Builtin::Last => {
                self.expect_arity(args, 1)?;
                let array = self.expect_array(&args[0])?;

                Ok(match array.elements.last() {
                    Some(element) => Rc::clone(element),
                    None => object::null(),
                })
            }
            Builtin::Rest => {
                self.expect_arity(args, 1)?;
                let array = self.expect_array(&args[0])?;

                if array.elements.is_empty() {
                    return Ok(object::null());
                }

                let elements = array.elements[1..].to_vec();
                Ok(Rc::new(Object::Array(Array { elements })))
            }
            Builtin::Push => {
                self.expect_arity(args, 2)?;
                let array = self.expect_array(&args[0])?;

                // The input array is left untouched.
                let mut elements = array.elements.clone();
                elements.push(Rc::clone(&args[1]));
                Ok(Rc::new(Object::Array(Array { elements })))
            }
            Builtin::Puts => {
                for arg in args {
                    println!("{}", arg);
                }
                Ok(object::null())
            }
        }
    }

    fn expect_arity(&self, args: &[Rc<Object>], want: usize) -> Result<(), RuntimeError> {
        if args.len() == want {
            Ok(())
        } else {
            Err(RuntimeError::WrongArgumentCount {
                got: args.len(),
                want,
            })
        }
    }

    fn expect_array<'a>(&self, arg: &'a Rc<Object>) -> Result<&'a Array, RuntimeError> {
        match arg.as_ref() {
            Object::Array(array) => Ok(array),
            _ => Err(RuntimeError::ArgumentNotArray {
                builtin: *self,
                got: arg.kind(),
            }),
        }
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "builtin function {}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use crate::builtin::Builtin;

    #[test]
    fn lookup_by_name() {
        assert_eq!(Builtin::lookup("len"), Some(Builtin::Len));
        assert_eq!(Builtin::lookup("first"), Some(Builtin::First));
        assert_eq!(Builtin::lookup("last"), Some(Builtin::Last));
        assert_eq!(Builtin::lookup("rest"), Some(Builtin::Rest));
        assert_eq!(Builtin::lookup("push"), Some(Builtin::Push));
        assert_eq!(Builtin::lookup("puts"), Some(Builtin::Puts));
        assert_eq!(Builtin::lookup("length"), None);
    }
}
