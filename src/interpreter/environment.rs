use std::{
    cell::RefCell,
    collections::HashMap,
    fmt,
    rc::Rc,
};

use tracing::debug;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// One frame of the lexical scope chain.
///
/// Each frame keeps mutable and constant bindings apart; a name lives in at
/// most one of the two maps, and once constant it stays constant for the
/// lifetime of the frame. Frames are shared through `Rc` because several
/// children (call frames, closures, `WITH` blocks) may hang off one parent.
///
/// # Example
/// ```
/// use abacus::interpreter::{environment::Environment, value::core::Value};
///
/// let root = Environment::root();
/// root.define("X", Value::Number(1.0)).unwrap();
///
/// let child = Environment::child(&root);
/// child.define("X", Value::Number(2.0)).unwrap();
///
/// assert_eq!(child.get("X").unwrap(), Value::Number(2.0));
/// assert_eq!(root.get("X").unwrap(), Value::Number(1.0));
/// ```
pub struct Environment {
    parent:    Option<Rc<Self>>,
    values:    RefCell<HashMap<String, Value>>,
    constants: RefCell<HashMap<String, Value>>,
}

impl Environment {
    /// Creates a frame with no parent.
    #[must_use]
    pub fn root() -> Rc<Self> {
        Rc::new(Self { parent:    None,
                       values:    RefCell::new(HashMap::new()),
                       constants: RefCell::new(HashMap::new()), })
    }

    /// Creates an empty frame enclosed by `parent`.
    #[must_use]
    pub fn child(parent: &Rc<Self>) -> Rc<Self> {
        Rc::new(Self { parent:    Some(Rc::clone(parent)),
                       values:    RefCell::new(HashMap::new()),
                       constants: RefCell::new(HashMap::new()), })
    }

    /// The enclosing frame, or this frame at the root.
    #[must_use]
    pub fn parent_or_self(self: &Rc<Self>) -> Rc<Self> {
        self.parent.as_ref().map_or_else(|| Rc::clone(self), Rc::clone)
    }

    /// Binds `name` mutably in this frame, replacing a previous mutable
    /// binding of the same name.
    ///
    /// # Errors
    /// `Redefinition` if the name is constant in this frame.
    pub fn define(&self, name: &str, value: Value) -> EvalResult<()> {
        if self.constants.borrow().contains_key(name) {
            return Err(RuntimeError::Redefinition { name:   name.to_string(),
                                                    reason: "name is frozen", });
        }
        self.values.borrow_mut().insert(name.to_string(), value);
        Ok(())
    }

    /// Binds `name` as a constant in this frame.
    ///
    /// # Errors
    /// `Redefinition` if the name is already bound in this frame, mutable or
    /// not.
    pub fn define_constant(&self, name: &str, value: Value) -> EvalResult<()> {
        if self.values.borrow().contains_key(name) || self.constants.borrow().contains_key(name) {
            return Err(RuntimeError::Redefinition { name:   name.to_string(),
                                                    reason: "name is already defined", });
        }
        self.constants.borrow_mut().insert(name.to_string(), value);
        Ok(())
    }

    /// Promotes a mutable binding of this frame to a constant.
    ///
    /// # Errors
    /// `Redefinition` if the name is already constant here or not bound in
    /// this frame at all.
    pub fn freeze(&self, name: &str) -> EvalResult<()> {
        if self.constants.borrow().contains_key(name) {
            return Err(RuntimeError::Redefinition { name:   name.to_string(),
                                                    reason: "name is already frozen", });
        }
        let value = self.values
                        .borrow_mut()
                        .remove(name)
                        .ok_or_else(|| RuntimeError::Redefinition { name:   name.to_string(),
                                                                    reason: "name is not defined in this scope", })?;
        self.constants.borrow_mut().insert(name.to_string(), value);
        debug!(name, "froze binding");
        Ok(())
    }

    /// Looks `name` up, walking outwards to the root.
    ///
    /// # Errors
    /// `UndefinedName` if no frame binds the name.
    pub fn get(&self, name: &str) -> EvalResult<Value> {
        let mut frame = self;
        loop {
            if let Some(value) = frame.values.borrow().get(name) {
                return Ok(value.clone());
            }
            if let Some(value) = frame.constants.borrow().get(name) {
                return Ok(value.clone());
            }
            match frame.parent.as_deref() {
                Some(parent) => frame = parent,
                None => {
                    return Err(RuntimeError::UndefinedName { name: name.to_string() });
                },
            }
        }
    }

    /// Whether any frame in the chain binds `name`.
    #[must_use]
    pub fn is_defined(&self, name: &str) -> bool {
        self.lookup_constness(name).is_some()
    }

    /// Whether the nearest binding of `name` is constant. A mutable shadow
    /// over an outer constant is not constant.
    #[must_use]
    pub fn is_constant(&self, name: &str) -> bool {
        self.lookup_constness(name).unwrap_or(false)
    }

    /// Removes a mutable binding from this frame only and returns its value.
    ///
    /// # Errors
    /// `Redefinition` if the name is constant here, `UndefinedName` if this
    /// frame does not bind it. Outer frames are never touched.
    pub fn delete(&self, name: &str) -> EvalResult<Value> {
        if self.constants.borrow().contains_key(name) {
            return Err(RuntimeError::Redefinition { name:   name.to_string(),
                                                    reason: "name is frozen", });
        }
        self.values
            .borrow_mut()
            .remove(name)
            .ok_or_else(|| RuntimeError::UndefinedName { name: name.to_string() })
    }

    /// `Some(is_constant)` for the nearest frame binding `name`.
    fn lookup_constness(&self, name: &str) -> Option<bool> {
        let mut frame = self;
        loop {
            if frame.values.borrow().contains_key(name) {
                return Some(false);
            }
            if frame.constants.borrow().contains_key(name) {
                return Some(true);
            }
            frame = frame.parent.as_deref()?;
        }
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut values: Vec<_> = self.values.borrow().keys().cloned().collect();
        let mut constants: Vec<_> = self.constants.borrow().keys().cloned().collect();
        values.sort();
        constants.sort();
        f.debug_struct("Environment")
         .field("values", &values)
         .field("constants", &constants)
         .field("has_parent", &self.parent.is_some())
         .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(n: f64) -> Value {
        Value::Number(n)
    }

    #[test]
    fn constants_cannot_be_redefined_in_the_same_frame() {
        let root = Environment::root();
        root.define_constant("PI", number(3.0)).unwrap();

        assert!(matches!(root.define("PI", number(4.0)),
                         Err(RuntimeError::Redefinition { .. })));
        assert!(matches!(root.define_constant("PI", number(4.0)),
                         Err(RuntimeError::Redefinition { .. })));
    }

    #[test]
    fn shadowing_a_constant_is_allowed_in_a_child() {
        let root = Environment::root();
        root.define_constant("PI", number(3.0)).unwrap();
        let child = Environment::child(&root);

        child.define("PI", number(4.0)).unwrap();

        assert!(!child.is_constant("PI"));
        assert!(root.is_constant("PI"));
    }

    #[test]
    fn freeze_promotes_in_place() {
        let root = Environment::root();
        root.define("X", number(1.0)).unwrap();
        root.freeze("X").unwrap();

        assert!(root.is_constant("X"));
        assert_eq!(root.get("X").unwrap(), number(1.0));
        assert!(root.freeze("X").is_err());
        assert!(root.freeze("Y").is_err());
    }

    #[test]
    fn delete_only_touches_the_current_frame() {
        let root = Environment::root();
        root.define("X", number(1.0)).unwrap();
        let child = Environment::child(&root);

        assert!(matches!(child.delete("X"), Err(RuntimeError::UndefinedName { .. })));
        assert_eq!(root.delete("X").unwrap(), number(1.0));
        assert!(!root.is_defined("X"));
    }

    #[test]
    fn parent_or_self_stops_at_the_root() {
        let root = Environment::root();
        let child = Environment::child(&root);

        assert!(Rc::ptr_eq(&child.parent_or_self(), &root));
        assert!(Rc::ptr_eq(&root.parent_or_self(), &root));
    }
}
