use std::collections::HashMap;

thread_local!(
    static STRING_TO_TOKEN: HashMap<&'static str, Token> = Word::ALL
        .iter()
        .map(|w| (w.as_str(), Token::Word(w.clone())))
        .chain(Operator::WORDS.iter().map(|o| (o.as_str(), Token::Operator(o.clone()))))
        .chain(Builtin::ALL.iter().map(|b| (b.as_str(), Token::Function(b.clone()))))
        .collect();
);

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Literal(Literal),
    Word(Word),
    Operator(Operator),
    Ident(String),
    Function(Builtin),
    LParen,
    RParen,
    Comma,
    Colon,
    Semicolon,
    Hash,
    At,
    Eol,
}

impl Token {
    /// Keyword, word operator or built-in function for an identifier,
    /// compared without regard to case.
    pub fn from_ident(s: &str) -> Option<Token> {
        let upper = s.to_ascii_uppercase();
        STRING_TO_TOKEN.with(|stt| stt.get(upper.as_str()).cloned())
    }

    pub fn is_eol(&self) -> bool {
        matches!(self, Token::Eol)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Token::*;
        match self {
            Literal(s) => write!(f, "{}", s),
            Word(s) => write!(f, "{}", s),
            Operator(s) => write!(f, "{}", s),
            Ident(s) => write!(f, "{}", s),
            Function(s) => write!(f, "{}", s),
            LParen => write!(f, "("),
            RParen => write!(f, ")"),
            Comma => write!(f, ","),
            Colon => write!(f, ":"),
            Semicolon => write!(f, ";"),
            Hash => write!(f, "#"),
            At => write!(f, "@"),
            Eol => write!(f, "END OF LINE"),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Literal {
    Integer(String),
    Real(String),
    String(String),
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Literal::*;
        match self {
            Integer(s) => write!(f, "{}", s),
            Real(s) => write!(f, "{}", s),
            String(s) => write!(f, "\"{}\"", s),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Word {
    As,
    Bye,
    Clear,
    Close,
    Cls,
    Data,
    Dim,
    Else,
    End,
    Files,
    For,
    Getkey,
    Gosub,
    Goto,
    If,
    Input,
    Let,
    List,
    Load,
    New,
    Next,
    Open,
    Output,
    Print,
    Read,
    Rem,
    Restore,
    Return,
    Run,
    Save,
    Scnclr,
    Stat,
    Step,
    Then,
    To,
    Trun,
    Using,
}

impl Word {
    const ALL: [Word; 37] = [
        Word::As,
        Word::Bye,
        Word::Clear,
        Word::Close,
        Word::Cls,
        Word::Data,
        Word::Dim,
        Word::Else,
        Word::End,
        Word::Files,
        Word::For,
        Word::Getkey,
        Word::Gosub,
        Word::Goto,
        Word::If,
        Word::Input,
        Word::Let,
        Word::List,
        Word::Load,
        Word::New,
        Word::Next,
        Word::Open,
        Word::Output,
        Word::Print,
        Word::Read,
        Word::Rem,
        Word::Restore,
        Word::Return,
        Word::Run,
        Word::Save,
        Word::Scnclr,
        Word::Stat,
        Word::Step,
        Word::Then,
        Word::To,
        Word::Trun,
        Word::Using,
    ];

    pub fn as_str(&self) -> &'static str {
        use Word::*;
        match self {
            As => "AS",
            Bye => "BYE",
            Clear => "CLEAR",
            Close => "CLOSE",
            Cls => "CLS",
            Data => "DATA",
            Dim => "DIM",
            Else => "ELSE",
            End => "END",
            Files => "FILES",
            For => "FOR",
            Getkey => "GETKEY",
            Gosub => "GOSUB",
            Goto => "GOTO",
            If => "IF",
            Input => "INPUT",
            Let => "LET",
            List => "LIST",
            Load => "LOAD",
            New => "NEW",
            Next => "NEXT",
            Open => "OPEN",
            Output => "OUTPUT",
            Print => "PRINT",
            Read => "READ",
            Rem => "REM",
            Restore => "RESTORE",
            Return => "RETURN",
            Run => "RUN",
            Save => "SAVE",
            Scnclr => "SCNCLR",
            Stat => "STAT",
            Step => "STEP",
            Then => "THEN",
            To => "TO",
            Trun => "TRUN",
            Using => "USING",
        }
    }

    /// Words that are only accepted as the first token of a typed line.
    pub fn is_command(&self) -> bool {
        use Word::*;
        matches!(
            self,
            Bye | Files | List | Load | New | Run | Save | Stat | Trun
        )
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Operator {
    Caret,
    Multiply,
    Divide,
    Plus,
    Minus,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Not,
    And,
    Or,
}

impl Operator {
    const WORDS: [Operator; 3] = [Operator::Not, Operator::And, Operator::Or];

    pub fn as_str(&self) -> &'static str {
        use Operator::*;
        match self {
            Caret => "^",
            Multiply => "*",
            Divide => "/",
            Plus => "+",
            Minus => "-",
            Equal => "=",
            NotEqual => "<>",
            Less => "<",
            LessEqual => "<=",
            Greater => ">",
            GreaterEqual => ">=",
            Not => "NOT",
            And => "AND",
            Or => "OR",
        }
    }

    pub fn is_comparison(&self) -> bool {
        use Operator::*;
        matches!(
            self,
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual
        )
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Built-in functions recognized by the lexer.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Builtin {
    Abs,
    Asc,
    Chr,
    Inkey,
    Int,
    Left,
    Len,
    Mid,
    Right,
    Rnd,
    Sqr,
    Str,
    Tab,
    Val,
}

impl Builtin {
    const ALL: [Builtin; 14] = [
        Builtin::Abs,
        Builtin::Asc,
        Builtin::Chr,
        Builtin::Inkey,
        Builtin::Int,
        Builtin::Left,
        Builtin::Len,
        Builtin::Mid,
        Builtin::Right,
        Builtin::Rnd,
        Builtin::Sqr,
        Builtin::Str,
        Builtin::Tab,
        Builtin::Val,
    ];

    pub fn as_str(&self) -> &'static str {
        use Builtin::*;
        match self {
            Abs => "ABS",
            Asc => "ASC",
            Chr => "CHR$",
            Inkey => "INKEY$",
            Int => "INT",
            Left => "LEFT$",
            Len => "LEN",
            Mid => "MID$",
            Right => "RIGHT$",
            Rnd => "RND",
            Sqr => "SQR",
            Str => "STR$",
            Tab => "TAB",
            Val => "VAL",
        }
    }

    pub fn arity(&self) -> std::ops::RangeInclusive<usize> {
        use Builtin::*;
        match self {
            Inkey => 0..=0,
            Left | Right => 2..=2,
            Mid => 2..=3,
            Abs | Asc | Chr | Int | Len | Rnd | Sqr | Str | Tab | Val => 1..=1,
        }
    }
}

impl std::fmt::Display for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
