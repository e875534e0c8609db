use crate::expr::Expr;
use crate::token::Token;

/// A statement node. Dispatch is by direct `match`, mirroring `expr.rs`.
#[derive(Debug, Clone)]
pub enum Stmt {
    Block(BlockData),
    Class(ClassData),
    Expression(ExpressionData),
    Function(std::rc::Rc<FunctionData>),
    If(IfData),
    Print(PrintData),
    Return(ReturnData),
    Var(VarData),
    While(WhileData),
}

#[derive(Debug, Clone)]
pub struct BlockData {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone)]
pub struct ClassData {
    pub name: Token,
    pub superclass: Option<Expr>,
    pub methods: Vec<std::rc::Rc<FunctionData>>,
}

#[derive(Debug, Clone)]
pub struct ExpressionData {
    pub expr: Expr,
}

#[derive(Debug, Clone)]
pub struct FunctionData {
    pub name: Token,
    pub params: Vec<Token>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone)]
pub struct IfData {
    pub condition: Expr,
    pub then_branch: Box<Stmt>,
    pub else_branch: Option<Box<Stmt>>,
}

#[derive(Debug, Clone)]
pub struct PrintData {
    pub expr: Expr,
}

#[derive(Debug, Clone)]
pub struct ReturnData {
    pub keyword: Token,
    pub value: Option<Expr>,
}

#[derive(Debug, Clone)]
pub struct VarData {
    pub name: Token,
    pub initializer: Option<Expr>,
}

#[derive(Debug, Clone)]
pub struct WhileData {
    pub condition: Expr,
    pub body: Box<Stmt>,
}
