use std::collections::HashMap;
use std::mem;

use crate::error::ResolveError;
use crate::expr::Expr;
use crate::interpreter::Interpreter;
use crate::stmt::Stmt;
use crate::token::Token;

enum FunctionType {
    None,
    Function,
    Initializer,
    Method,
}

enum ClassType {
    None,
    Class,
    Subclass,
}

/// Static pass over the parsed tree that records, for every variable
/// reference, `this`, `super`, and assignment, how many scopes out its
/// binding lives. Errors are collected rather than thrown so the driver can
/// report every resolution mistake in a source unit at once.
pub struct Resolver<'a, W: std::io::Write> {
    interpreter: &'a mut Interpreter<W>,
    scopes: Vec<HashMap<String, bool>>,
    current_function: FunctionType,
    current_class: ClassType,
    errors: Vec<ResolveError>,
}

impl<'a, W: std::io::Write> Resolver<'a, W> {
    pub fn new(interpreter: &'a mut Interpreter<W>) -> Self {
        Resolver {
            interpreter,
            scopes: Vec::new(),
            current_function: FunctionType::None,
            current_class: ClassType::None,
            errors: Vec::new(),
        }
    }

    pub fn resolve(mut self, statements: &[Stmt]) -> Vec<ResolveError> {
        self.resolve_stmts(statements);
        self.errors
    }

    fn resolve_stmts(&mut self, statements: &[Stmt]) {
        for statement in statements {
            self.resolve_stmt(statement);
        }
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block(block) => {
                self.begin_scope();
                self.resolve_stmts(&block.statements);
                self.end_scope();
            }
            Stmt::Class(class) => self.resolve_class(class),
            Stmt::Expression(expression) => self.resolve_expr(&expression.expr),
            Stmt::Function(function) => {
                self.declare(&function.name);
                self.define(&function.name);
                self.resolve_function(&function.params, &function.body, FunctionType::Function);
            }
            Stmt::If(if_stmt) => {
                self.resolve_expr(&if_stmt.condition);
                self.resolve_stmt(&if_stmt.then_branch);
                if let Some(else_branch) = &if_stmt.else_branch {
                    self.resolve_stmt(else_branch);
                }
            }
            Stmt::Print(print) => self.resolve_expr(&print.expr),
            Stmt::Return(return_stmt) => {
                if let FunctionType::None = self.current_function {
                    self.errors.push(ResolveError {
                        token: return_stmt.keyword.clone(),
                        message: "Can't return from top-level code.".to_string(),
                    });
                }

                if let Some(value) = &return_stmt.value {
                    if let FunctionType::Initializer = self.current_function {
                        self.errors.push(ResolveError {
                            token: return_stmt.keyword.clone(),
                            message: "Can't return a value from an initializer.".to_string(),
                        });
                    } else {
                        self.resolve_expr(value);
                    }
                }
            }
            Stmt::Var(var) => {
                self.declare(&var.name);
                if let Some(initializer) = &var.initializer {
                    self.resolve_expr(initializer);
                }
                self.define(&var.name);
            }
            Stmt::While(while_stmt) => {
                self.resolve_expr(&while_stmt.condition);
                self.resolve_stmt(&while_stmt.body);
            }
        }
    }

    fn resolve_class(&mut self, class: &crate::stmt::ClassData) {
        let enclosing_class = mem::replace(&mut self.current_class, ClassType::Class);

        self.declare(&class.name);
        self.define(&class.name);

        if let Some(superclass) = &class.superclass {
            if let Expr::Variable(variable) = superclass {
                if class.name.lexeme == variable.name.lexeme {
                    self.errors.push(ResolveError {
                        token: variable.name.clone(),
                        message: "A class can't inherit from itself.".to_string(),
                    });
                }
            }

            self.current_class = ClassType::Subclass;
            self.resolve_expr(superclass);

            self.begin_scope();
            self.scopes.last_mut().expect("scope just pushed").insert("super".to_string(), true);
        }

        self.begin_scope();
        self.scopes.last_mut().expect("scope just pushed").insert("this".to_string(), true);

        for method in &class.methods {
            let declaration = if method.name.lexeme == "init" { FunctionType::Initializer } else { FunctionType::Method };
            self.resolve_function(&method.params, &method.body, declaration);
        }

        self.end_scope();

        if class.superclass.is_some() {
            self.end_scope();
        }

        self.current_class = enclosing_class;
    }

    fn resolve_function(&mut self, params: &[Token], body: &[Stmt], kind: FunctionType) {
        let enclosing_function = mem::replace(&mut self.current_function, kind);

        self.begin_scope();
        for param in params {
            self.declare(param);
            self.define(param);
        }
        self.resolve_stmts(body);
        self.end_scope();

        self.current_function = enclosing_function;
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Assign(assign) => {
                self.resolve_expr(&assign.value);
                self.resolve_local(assign.id, &assign.name);
            }
            Expr::Binary(binary) => {
                self.resolve_expr(&binary.left);
                self.resolve_expr(&binary.right);
            }
            Expr::Call(call) => {
                self.resolve_expr(&call.callee);
                for argument in &call.arguments {
                    self.resolve_expr(argument);
                }
            }
            Expr::Get(get) => self.resolve_expr(&get.object),
            Expr::Grouping(grouping) => self.resolve_expr(&grouping.expr),
            Expr::Literal(_) => {}
            Expr::Logical(logical) => {
                self.resolve_expr(&logical.left);
                self.resolve_expr(&logical.right);
            }
            Expr::Set(set) => {
                self.resolve_expr(&set.value);
                self.resolve_expr(&set.object);
            }
            Expr::Super(super_expr) => {
                match self.current_class {
                    ClassType::None => self.errors.push(ResolveError {
                        token: super_expr.keyword.clone(),
                        message: "Can't use 'super' outside of a class.".to_string(),
                    }),
                    ClassType::Class => self.errors.push(ResolveError {
                        token: super_expr.keyword.clone(),
                        message: "Can't use 'super' in a class with no superclass.".to_string(),
                    }),
                    ClassType::Subclass => {}
                }

                self.resolve_local(super_expr.id, &super_expr.keyword);
            }
            Expr::This(this) => {
                if let ClassType::None = self.current_class {
                    self.errors.push(ResolveError {
                        token: this.keyword.clone(),
                        message: "Can't use 'this' outside of a class.".to_string(),
                    });
                }

                self.resolve_local(this.id, &this.keyword);
            }
            Expr::Unary(unary) => self.resolve_expr(&unary.expr),
            Expr::Variable(variable) => {
                if let Some(scope) = self.scopes.last() {
                    if scope.get(&variable.name.lexeme) == Some(&false) {
                        self.errors.push(ResolveError {
                            token: variable.name.clone(),
                            message: "Can't read local variable in its own initializer.".to_string(),
                        });
                    }
                }

                self.resolve_local(variable.id, &variable.name);
            }
        }
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(&mut self, name: &Token) {
        let Some(scope) = self.scopes.last_mut() else { return };

        if scope.contains_key(&name.lexeme) {
            self.errors.push(ResolveError {
                token: name.clone(),
                message: "Already a variable with this name in this scope.".to_string(),
            });
        }
        scope.insert(name.lexeme.clone(), false);
    }

    fn define(&mut self, name: &Token) {
        let Some(scope) = self.scopes.last_mut() else { return };
        scope.insert(name.lexeme.clone(), true);
    }

    fn resolve_local(&mut self, id: u32, name: &Token) {
        for (depth, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&name.lexeme) {
                self.interpreter.resolve(id, depth);
                return;
            }
        }
    }
}
