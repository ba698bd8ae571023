use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::object::Object;

/// Name-to-value bindings with an optional link to the enclosing scope.
///
/// Lookups walk outward until a binding is found; writes always land in the
/// innermost scope (the language has no assignment, so nothing ever mutates
/// an outer binding). Environments are shared via `Rc<RefCell<_>>` because a
/// closure may keep its defining scope alive long after the call that
/// created it has returned.
#[derive(Debug, Default)]
pub struct Environment {
    store: HashMap<String, Rc<Object>>,
    outer: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            store: HashMap::new(),
            outer: None,
        }
    }

    /// Create a new environment enclosed by the given outer environment.
    pub fn new_enclosed(outer: Rc<RefCell<Environment>>) -> Self {
        Environment {
            store: HashMap::new(),
            outer: Some(outer),
        }
    }

    pub fn get(&self, name: &str) -> Option<Rc<Object>> {
        match self.store.get(name) {
            Some(value) => Some(Rc::clone(value)),
            None => match self.outer {
                Some(ref outer) => outer.borrow().get(name),
                None => None,
            },
        }
    }

    pub fn set(&mut self, name: String, value: Rc<Object>) {
        self.store.insert(name, value);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::environment::Environment;
    use crate::object::Object;

    #[test]
    fn get_walks_outer_scopes() {
        let outer = Rc::new(RefCell::new(Environment::new()));
        outer
            .borrow_mut()
            .set("a".to_string(), Rc::new(Object::Integer(1)));

        let inner = Environment::new_enclosed(Rc::clone(&outer));

        match inner.get("a").as_deref() {
            Some(Object::Integer(1)) => {}
            other => panic!("expected Integer(1) but got {:?}", other),
        }
        assert!(inner.get("missing").is_none());
    }

    #[test]
    fn set_is_always_local() {
        let outer = Rc::new(RefCell::new(Environment::new()));
        outer
            .borrow_mut()
            .set("a".to_string(), Rc::new(Object::Integer(1)));

        let mut inner = Environment::new_enclosed(Rc::clone(&outer));
        inner.set("a".to_string(), Rc::new(Object::Integer(2)));

        // The inner binding shadows; the outer one is untouched.
        match inner.get("a").as_deref() {
            Some(Object::Integer(2)) => {}
            other => panic!("expected Integer(2) but got {:?}", other),
        }
        let outer_ref = outer.borrow();
        match outer_ref.get("a").as_deref() {
            Some(Object::Integer(1)) => {}
            other => panic!("expected Integer(1) but got {:?}", other),
        }
    }
}
