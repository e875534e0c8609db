use std::fmt::{self, Debug, Display};
use std::rc::Rc;

use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::interpreter::{Interpreter, Unwind};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::FunctionData;
use crate::token::Token;

/// A user-defined function or method: a declaration paired with the
/// environment active where it was defined. Binding `this` onto a method
/// produces a *new* `Function` whose closure extends the original one,
/// never mutating the original (so the unbound method value stays reusable).
#[derive(Debug, Clone)]
pub struct Function {
    pub declaration: Rc<FunctionData>,
    pub closure: Rc<Environment>,
    pub is_initializer: bool,
}

impl Function {
    pub fn new(declaration: Rc<FunctionData>, closure: Rc<Environment>, is_initializer: bool) -> Self {
        Function { declaration, closure, is_initializer }
    }

    /// Returns a new function whose closure extends this one with `this` bound to `instance`.
    pub fn bind(&self, instance: Object) -> Function {
        let environment = Environment::new(Some(Rc::clone(&self.closure)));
        environment.define("this", instance);
        Function::new(Rc::clone(&self.declaration), environment, self.is_initializer)
    }
}

impl Callable for Function {
    fn call<W: std::io::Write>(&self, interpreter: &mut Interpreter<W>, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        let environment = Environment::new(Some(Rc::clone(&self.closure)));

        for (param, argument) in self.declaration.params.iter().zip(arguments.into_iter()) {
            environment.define(&param.lexeme, argument);
        }

        match interpreter.execute_block(&self.declaration.body, environment) {
            Ok(()) => {
                if self.is_initializer {
                    Ok(self.closure.get_at(0, "this"))
                } else {
                    Ok(Object::Literal(Literal::Nil))
                }
            }
            Err(Unwind::Return(value)) => {
                if self.is_initializer {
                    Ok(self.closure.get_at(0, "this"))
                } else {
                    Ok(value)
                }
            }
            Err(Unwind::Error(error)) => Err(error),
        }
    }

    fn arity(&self) -> usize {
        self.declaration.params.len()
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.declaration.name.lexeme)
    }
}

/// A native (host-provided) function: fixed arity, opaque implementation.
#[derive(Clone)]
pub struct NativeFunction {
    pub name: String,
    pub arity: usize,
    pub func: NativeFn,
}

pub type NativeFn = fn(&[Object], &Token) -> Result<Object, RuntimeError>;

impl NativeFunction {
    pub fn call(&self, arguments: &[Object], call_site: &Token) -> Result<Object, RuntimeError> {
        (self.func)(arguments, call_site)
    }
}

impl Display for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn>")
    }
}

impl Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}

fn expect_number(value: &Object, call_site: &Token, what: &str) -> Result<f64, RuntimeError> {
    match value {
        Object::Literal(Literal::Number(n)) => Ok(*n),
        other => Err(RuntimeError {
            token: call_site.clone(),
            message: format!("Expected a number for {what} but got {}.", other.type_str()),
        }),
    }
}

/// Installs the full native-function surface named in the glossary into `env`.
pub fn install_globals(env: &Environment) {
    let natives: &[(&str, usize, NativeFn)] = &[
        ("clock", 0, clock),
        ("getline", 0, getline),
        ("type", 1, type_of),
        ("tostring", 1, to_string_fn),
        ("tonumber", 1, to_number),
        ("exp", 1, exp),
        ("log", 1, log),
        ("rad", 1, rad),
        ("sin", 1, sin),
        ("cos", 1, cos),
        ("tan", 1, tan),
        ("asin", 1, asin),
        ("acos", 1, acos),
        ("atan", 1, atan),
        ("ceil", 1, ceil),
        ("floor", 1, floor),
        ("round", 1, round),
        ("abs", 1, abs),
        ("sign", 1, sign),
    ];

    for (name, arity, func) in natives {
        env.define(name, Object::NativeFunction(NativeFunction { name: name.to_string(), arity: *arity, func: *func }));
    }
}

fn clock(_args: &[Object], _call_site: &Token) -> Result<Object, RuntimeError> {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    Ok(Object::from(now.as_secs_f64()))
}

fn getline(_args: &[Object], call_site: &Token) -> Result<Object, RuntimeError> {
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .map_err(|e| RuntimeError { token: call_site.clone(), message: format!("Failed to read a line: {e}.") })?;
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Object::from(line))
}

fn type_of(args: &[Object], _call_site: &Token) -> Result<Object, RuntimeError> {
    Ok(Object::from(args[0].type_str()))
}

fn to_string_fn(args: &[Object], _call_site: &Token) -> Result<Object, RuntimeError> {
    Ok(Object::from(format!("{}", args[0])))
}

fn to_number(args: &[Object], call_site: &Token) -> Result<Object, RuntimeError> {
    match &args[0] {
        Object::Literal(Literal::Number(n)) => Ok(Object::from(*n)),
        Object::Literal(Literal::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Object::from)
            .map_err(|_| RuntimeError { token: call_site.clone(), message: format!("Cannot convert '{s}' to a number.") }),
        other => Err(RuntimeError {
            token: call_site.clone(),
            message: format!("Cannot convert {} to a number.", other.type_str()),
        }),
    }
}

macro_rules! unary_math {
    ($fn_name:ident, $op:expr) => {
        fn $fn_name(args: &[Object], call_site: &Token) -> Result<Object, RuntimeError> {
            let n = expect_number(&args[0], call_site, stringify!($fn_name))?;
            let op: fn(f64) -> f64 = $op;
            Ok(Object::from(op(n)))
        }
    };
}

unary_math!(exp, f64::exp);
unary_math!(log, f64::ln);
unary_math!(rad, f64::to_radians);
unary_math!(sin, f64::sin);
unary_math!(cos, f64::cos);
unary_math!(tan, f64::tan);
unary_math!(asin, f64::asin);
unary_math!(acos, f64::acos);
unary_math!(atan, f64::atan);
unary_math!(ceil, f64::ceil);
unary_math!(floor, f64::floor);
unary_math!(round, f64::round);
unary_math!(abs, f64::abs);

fn sign(args: &[Object], call_site: &Token) -> Result<Object, RuntimeError> {
    let n = expect_number(&args[0], call_site, "sign")?;
    Ok(Object::from(if n > 0.0 { 1.0 } else if n < 0.0 { -1.0 } else { 0.0 }))
}

impl From<&str> for Object {
    fn from(s: &str) -> Self {
        Object::Literal(Literal::String(s.to_string()))
    }
}
