use super::token::Builtin;
use super::Column;
use std::rc::Rc;

/// A line typed at the console.
#[derive(Debug, PartialEq)]
pub enum Command {
    Bye,
    Delete(u16),
    Direct(Vec<Statement>),
    Files(Option<Rc<str>>),
    List(ListRange),
    Load(Rc<str>),
    New,
    Program(u16, String),
    Run,
    Save(Rc<str>),
    Stat,
    Trun,
}

/// Inclusive bounds for `LIST`; a missing end is open.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct ListRange {
    pub start: u16,
    pub end: Option<u16>,
}

impl Default for ListRange {
    fn default() -> ListRange {
        ListRange {
            start: 0,
            end: None,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Statement {
    Clear(Column),
    Close(Column, Expression),
    Cls(Column),
    Data(Column, Vec<Expression>),
    Dim(Column, Vec<Variable>),
    Else(Column, Box<Statement>),
    End(Column),
    For(Column, Ident, Expression, Expression, Option<Expression>),
    Getkey(Column, Variable),
    Gosub(Column, Expression),
    Goto(Column, Expression),
    If(Column, Expression, Box<Statement>),
    Input(Column, Option<Rc<str>>, Vec<Variable>),
    InputFile(Column, Expression, Vec<Variable>),
    Let(Column, Variable, Expression),
    Next(Column, Option<Ident>),
    Open(Column, Expression, FileMode, Expression),
    Print(Column, Print),
    PrintFile(Column, Expression, Vec<PrintItem>),
    Read(Column, Vec<Variable>),
    Rem(Column, Rc<str>),
    Restore(Column),
    Return(Column),
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum FileMode {
    Input,
    Output,
}

/// Screen `PRINT`, optionally addressed with `@` or formatted with `USING`.
#[derive(Debug, PartialEq)]
pub struct Print {
    pub at: Option<Expression>,
    pub using: Option<Expression>,
    pub items: Vec<PrintItem>,
}

#[derive(Debug, PartialEq)]
pub enum PrintItem {
    Expression(Expression),
    Semicolon,
    Comma,
}

/// Variable names are lowercase. String variables keep their `$`.
#[derive(Debug, PartialEq, Clone, Eq, Hash, PartialOrd, Ord)]
pub enum Ident {
    Plain(Rc<str>),
    String(Rc<str>),
}

impl Ident {
    pub fn new(name: &str) -> Ident {
        let name = name.to_ascii_lowercase();
        if name.ends_with('$') {
            Ident::String(name.into())
        } else {
            Ident::Plain(name.into())
        }
    }

    pub fn name(&self) -> &Rc<str> {
        match self {
            Ident::Plain(s) | Ident::String(s) => s,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Ident::String(_))
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, PartialEq)]
pub enum Variable {
    Unary(Column, Ident),
    Array(Column, Ident, Vec<Expression>),
}

impl Variable {
    pub fn ident(&self) -> &Ident {
        match self {
            Variable::Unary(_, ident) | Variable::Array(_, ident, _) => ident,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Expression {
    Real(Column, f32),
    Integer(Column, i32),
    String(Column, Rc<str>),
    Variable(Variable),
    Function(Column, Builtin, Vec<Expression>),
    Negation(Column, Box<Expression>),
    Power(Column, Box<Expression>, Box<Expression>),
    Multiply(Column, Box<Expression>, Box<Expression>),
    Divide(Column, Box<Expression>, Box<Expression>),
    Add(Column, Box<Expression>, Box<Expression>),
    Subtract(Column, Box<Expression>, Box<Expression>),
    Equal(Column, Box<Expression>, Box<Expression>),
    NotEqual(Column, Box<Expression>, Box<Expression>),
    Less(Column, Box<Expression>, Box<Expression>),
    LessEqual(Column, Box<Expression>, Box<Expression>),
    Greater(Column, Box<Expression>, Box<Expression>),
    GreaterEqual(Column, Box<Expression>, Box<Expression>),
    Not(Column, Box<Expression>),
    And(Column, Box<Expression>, Box<Expression>),
    Or(Column, Box<Expression>, Box<Expression>),
}
