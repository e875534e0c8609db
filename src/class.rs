use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{self, Display};
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::function::Function;
use crate::object::Object;
use crate::token::Token;

/// A class: its own methods plus an optional superclass to fall back to.
/// Calling a `Class` value (see `Interpreter::call`) constructs an `Instance`.
#[derive(Debug)]
pub struct Class {
    pub name: String,
    pub superclass: Option<Rc<RefCell<Class>>>,
    pub methods: HashMap<String, Function>,
}

impl Class {
    pub fn new(name: String, superclass: Option<Rc<RefCell<Class>>>, methods: HashMap<String, Function>) -> Self {
        Class { name, superclass, methods }
    }

    pub fn find_method(&self, name: &str) -> Option<Function> {
        if let Some(method) = self.methods.get(name) {
            return Some(method.clone());
        }

        if let Some(superclass) = &self.superclass {
            return superclass.borrow().find_method(name);
        }

        None
    }

    pub fn arity(&self) -> usize {
        self.find_method("init").map(|initializer| initializer.arity()).unwrap_or(0)
    }
}

impl Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<class {}>", self.name)
    }
}

/// An instance of a `Class`: the class it was constructed from plus its own
/// field storage. Field lookup falls back to the class's methods, bound with
/// `this` set to this instance.
#[derive(Debug)]
pub struct Instance {
    pub class: Rc<RefCell<Class>>,
    fields: HashMap<String, Object>,
}

impl Instance {
    pub fn new(class: Rc<RefCell<Class>>) -> Rc<RefCell<Instance>> {
        Rc::new(RefCell::new(Instance { class, fields: HashMap::new() }))
    }

    pub fn get(self_rc: &Rc<RefCell<Instance>>, name: &Token) -> Result<Object, RuntimeError> {
        if let Some(value) = self_rc.borrow().fields.get(&name.lexeme) {
            return Ok(value.clone());
        }

        let method = self_rc.borrow().class.borrow().find_method(&name.lexeme);
        if let Some(method) = method {
            let bound = method.bind(Object::Instance(Rc::clone(self_rc)));
            return Ok(Object::Function(bound));
        }

        Err(RuntimeError { token: name.clone(), message: format!("Undefined property '{}'.", name.lexeme) })
    }

    pub fn set(&mut self, name: &Token, value: Object) {
        self.fields.insert(name.lexeme.clone(), value);
    }
}

impl Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} instance>", self.class.borrow().name)
    }
}
