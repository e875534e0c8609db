use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::class::{Class, Instance};
use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::expr::Expr;
use crate::function::{self, Function};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::Stmt;
use crate::token::{Token, Type};

/// How control leaves a statement sequence before falling off the end:
/// either a `return` carrying its value, or a runtime error propagating up
/// to be reported by the driver. Both variants restore `self.environment`
/// at every block boundary they cross.
pub enum Unwind {
    Return(Object),
    Error(RuntimeError),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Unwind::Error(error)
    }
}

type ExecResult = Result<(), Unwind>;
type EvalResult = Result<Object, RuntimeError>;

/// Walks the resolved AST. Generic over the writer `print` sends to, so
/// tests can capture output instead of going to the real stdout.
pub struct Interpreter<W: std::io::Write> {
    pub globals: Rc<Environment>,
    environment: Rc<Environment>,
    locals: HashMap<u32, usize>,
    stdout: W,
}

impl<W: std::io::Write> Interpreter<W> {
    pub fn new(stdout: W) -> Self {
        let globals = Environment::new(None);
        function::install_globals(&globals);

        Interpreter { environment: Rc::clone(&globals), globals, locals: HashMap::new(), stdout }
    }

    /// Called by the resolver once per locally-bound reference.
    pub fn resolve(&mut self, id: u32, depth: usize) {
        self.locals.insert(id, depth);
    }

    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        for statement in statements {
            if let Err(unwind) = self.execute(statement) {
                return match unwind {
                    Unwind::Return(_) => Ok(()),
                    Unwind::Error(error) => Err(error),
                };
            }
        }
        Ok(())
    }

    fn execute(&mut self, stmt: &Stmt) -> ExecResult {
        match stmt {
            Stmt::Block(block) => {
                let scope = Environment::new(Some(Rc::clone(&self.environment)));
                self.execute_block(&block.statements, scope)
            }
            Stmt::Class(class) => self.execute_class(class),
            Stmt::Expression(expression) => {
                self.evaluate(&expression.expr)?;
                Ok(())
            }
            Stmt::Function(declaration) => {
                let function = Function::new(Rc::clone(declaration), Rc::clone(&self.environment), false);
                self.environment.define(&declaration.name.lexeme, Object::Function(function));
                Ok(())
            }
            Stmt::If(if_stmt) => {
                if self.evaluate(&if_stmt.condition)?.is_truthy() {
                    self.execute(&if_stmt.then_branch)
                } else if let Some(else_branch) = &if_stmt.else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(())
                }
            }
            Stmt::Print(print) => {
                let value = self.evaluate(&print.expr)?;
                writeln!(self.stdout, "{value}").expect("write to the injected writer");
                Ok(())
            }
            Stmt::Return(return_stmt) => {
                let value = match &return_stmt.value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Object::Literal(Literal::Nil),
                };
                Err(Unwind::Return(value))
            }
            Stmt::Var(var) => {
                let value = match &var.initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Object::Literal(Literal::Nil),
                };
                self.environment.define(&var.name.lexeme, value);
                Ok(())
            }
            Stmt::While(while_stmt) => {
                while self.evaluate(&while_stmt.condition)?.is_truthy() {
                    self.execute(&while_stmt.body)?;
                }
                Ok(())
            }
        }
    }

    /// Runs `statements` in `environment`, always restoring the prior
    /// environment afterward — on the happy path and on every unwind path.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: Rc<Environment>) -> ExecResult {
        let previous = std::mem::replace(&mut self.environment, environment);

        let mut result = Ok(());
        for statement in statements {
            if let Err(unwind) = self.execute(statement) {
                result = Err(unwind);
                break;
            }
        }

        self.environment = previous;
        result
    }

    fn execute_class(&mut self, class: &crate::stmt::ClassData) -> ExecResult {
        let superclass = match &class.superclass {
            Some(expr) => {
                let value = self.evaluate(expr)?;
                match value {
                    Object::Class(class) => Some(class),
                    _ => {
                        let token = match expr {
                            Expr::Variable(v) => v.name.clone(),
                            _ => unreachable!("superclass is always parsed as a Variable"),
                        };
                        return Err(Unwind::Error(RuntimeError { token, message: "Superclass must be a class.".to_string() }));
                    }
                }
            }
            None => None,
        };

        self.environment.define(&class.name.lexeme, Object::Literal(Literal::Nil));

        let enclosing = if let Some(superclass) = &superclass {
            let scope = Environment::new(Some(Rc::clone(&self.environment)));
            scope.define("super", Object::Class(Rc::clone(superclass)));
            Some(std::mem::replace(&mut self.environment, scope))
        } else {
            None
        };

        let mut methods = HashMap::new();
        for method in &class.methods {
            let is_initializer = method.name.lexeme == "init";
            let function = Function::new(Rc::clone(method), Rc::clone(&self.environment), is_initializer);
            methods.insert(method.name.lexeme.clone(), function);
        }

        if let Some(enclosing) = enclosing {
            self.environment = enclosing;
        }

        let class_value = Rc::new(RefCell::new(Class::new(class.name.lexeme.clone(), superclass, methods)));
        self.environment.assign(&class.name, Object::Class(class_value)).expect("class name was just defined");

        Ok(())
    }

    fn evaluate(&mut self, expr: &Expr) -> EvalResult {
        match expr {
            Expr::Assign(assign) => {
                let value = self.evaluate(&assign.value)?;
                match self.locals.get(&assign.id) {
                    Some(&depth) => self.environment.assign_at(depth, &assign.name, value.clone()),
                    None => self.globals.assign(&assign.name, value.clone())?,
                }
                Ok(value)
            }
            Expr::Binary(binary) => self.evaluate_binary(binary),
            Expr::Call(call) => self.evaluate_call(call),
            Expr::Get(get) => {
                let object = self.evaluate(&get.object)?;
                match object {
                    Object::Instance(instance) => Instance::get(&instance, &get.name),
                    _ => Err(RuntimeError { token: get.name.clone(), message: "Only instances have properties.".to_string() }),
                }
            }
            Expr::Grouping(grouping) => self.evaluate(&grouping.expr),
            Expr::Literal(literal) => Ok(Object::Literal(literal.clone())),
            Expr::Logical(logical) => {
                let left = self.evaluate(&logical.left)?;

                if logical.operator.kind == Type::Or {
                    if left.is_truthy() {
                        return Ok(left);
                    }
                } else if !left.is_truthy() {
                    return Ok(left);
                }

                self.evaluate(&logical.right)
            }
            Expr::Set(set) => {
                let object = self.evaluate(&set.object)?;
                let Object::Instance(instance) = object else {
                    return Err(RuntimeError { token: set.name.clone(), message: "Only instances have fields.".to_string() });
                };

                let value = self.evaluate(&set.value)?;
                instance.borrow_mut().set(&set.name, value.clone());
                Ok(value)
            }
            Expr::Super(super_expr) => self.evaluate_super(super_expr),
            Expr::This(this) => self.lookup_variable(this.id, &this.keyword),
            Expr::Unary(unary) => self.evaluate_unary(unary),
            Expr::Variable(variable) => self.lookup_variable(variable.id, &variable.name),
        }
    }

    fn lookup_variable(&self, id: u32, name: &Token) -> EvalResult {
        match self.locals.get(&id) {
            Some(&depth) => Ok(self.environment.get_at(depth, &name.lexeme)),
            None => self.globals.get(name),
        }
    }

    fn evaluate_unary(&mut self, unary: &crate::expr::UnaryData) -> EvalResult {
        let right = self.evaluate(&unary.expr)?;

        match unary.operator.kind {
            Type::Minus => Ok(Object::from(-as_number(&right, &unary.operator)?)),
            Type::Bang => Ok(Object::from(!right.is_truthy())),
            _ => unreachable!("unary operator is always ! or -"),
        }
    }

    fn evaluate_binary(&mut self, binary: &crate::expr::BinaryData) -> EvalResult {
        let left = self.evaluate(&binary.left)?;
        let right = self.evaluate(&binary.right)?;
        let operator = &binary.operator;

        match operator.kind {
            Type::Minus => {
                let (l, r) = as_numbers(&left, &right, operator)?;
                Ok(Object::from(l - r))
            }
            Type::Slash => {
                let (l, r) = as_numbers(&left, &right, operator)?;
                Ok(Object::from(l / r))
            }
            Type::Star => {
                let (l, r) = as_numbers(&left, &right, operator)?;
                Ok(Object::from(l * r))
            }
            Type::Percent => {
                let (l, r) = as_numbers(&left, &right, operator)?;
                Ok(Object::from(l % r))
            }
            Type::Caret => {
                let (l, r) = as_numbers(&left, &right, operator)?;
                Ok(Object::from(l.powf(r)))
            }
            Type::Plus => match (&left, &right) {
                (Object::Literal(Literal::Number(l)), Object::Literal(Literal::Number(r))) => Ok(Object::from(l + r)),
                (Object::Literal(Literal::String(l)), Object::Literal(Literal::String(r))) => Ok(Object::from(format!("{l}{r}"))),
                _ => Err(RuntimeError { token: operator.clone(), message: "Operands must be two numbers or two strings.".to_string() }),
            },
            Type::Greater => {
                let (l, r) = as_numbers(&left, &right, operator)?;
                Ok(Object::from(l > r))
            }
            Type::GreaterEqual => {
                let (l, r) = as_numbers(&left, &right, operator)?;
                Ok(Object::from(l >= r))
            }
            Type::Less => {
                let (l, r) = as_numbers(&left, &right, operator)?;
                Ok(Object::from(l < r))
            }
            Type::LessEqual => {
                let (l, r) = as_numbers(&left, &right, operator)?;
                Ok(Object::from(l <= r))
            }
            Type::EqualEqual => Ok(Object::from(left == right)),
            Type::BangEqual => Ok(Object::from(left != right)),
            _ => unreachable!("parser never produces another binary operator"),
        }
    }

    fn evaluate_call(&mut self, call: &crate::expr::CallData) -> EvalResult {
        let callee = self.evaluate(&call.callee)?;

        let mut arguments = Vec::with_capacity(call.arguments.len());
        for argument in &call.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        match callee {
            Object::Function(function) => {
                check_arity(function.arity(), arguments.len(), &call.paren)?;
                function.call(self, arguments)
            }
            Object::NativeFunction(native) => {
                check_arity(native.arity, arguments.len(), &call.paren)?;
                native.call(&arguments, &call.paren)
            }
            Object::Class(class) => {
                check_arity(class.borrow().arity(), arguments.len(), &call.paren)?;
                let instance = Instance::new(Rc::clone(&class));
                if let Some(initializer) = class.borrow().find_method("init") {
                    initializer.bind(Object::Instance(Rc::clone(&instance))).call(self, arguments)?;
                }
                Ok(Object::Instance(instance))
            }
            _ => Err(RuntimeError { token: call.paren.clone(), message: "Can only call functions and classes.".to_string() }),
        }
    }

    fn evaluate_super(&mut self, super_expr: &crate::expr::SuperData) -> EvalResult {
        let depth = *self.locals.get(&super_expr.id).expect("resolver always records super's depth");
        let superclass = self.environment.get_at(depth, "super");
        let Object::Class(superclass) = superclass else { unreachable!("super always resolves to a class") };

        let instance = self.environment.get_at(depth - 1, "this");

        let method = superclass
            .borrow()
            .find_method(&super_expr.method.lexeme)
            .ok_or_else(|| RuntimeError {
                token: super_expr.method.clone(),
                message: format!("Undefined property '{}'.", super_expr.method.lexeme),
            })?;

        Ok(Object::Function(method.bind(instance)))
    }
}

fn as_number(value: &Object, operator: &Token) -> Result<f64, RuntimeError> {
    match value {
        Object::Literal(Literal::Number(n)) => Ok(*n),
        _ => Err(RuntimeError { token: operator.clone(), message: "Operand must be a number.".to_string() }),
    }
}

fn as_numbers(left: &Object, right: &Object, operator: &Token) -> Result<(f64, f64), RuntimeError> {
    match (left, right) {
        (Object::Literal(Literal::Number(l)), Object::Literal(Literal::Number(r))) => Ok((*l, *r)),
        _ => Err(RuntimeError { token: operator.clone(), message: "Operands must be numbers.".to_string() }),
    }
}

fn check_arity(expected: usize, got: usize, paren: &Token) -> Result<(), RuntimeError> {
    if expected != got {
        return Err(RuntimeError { token: paren.clone(), message: format!("Expected {expected} arguments but got {got}.") });
    }
    Ok(())
}
