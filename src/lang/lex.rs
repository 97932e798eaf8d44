use super::token::*;
use super::Column;

fn is_basic_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r' || c == '\x0b' || c == '\x0c'
}

fn is_basic_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_basic_alphabetic(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// ## Single line tokenizer
///
/// Hands out one token at a time with a single token of lookahead.
/// Tokens given back with `push_back` are handed out again, newest first.
/// Once the line is exhausted every call yields `Token::Eol`.

pub struct Lexer<'a> {
    line: &'a str,
    pos: usize,
    col: Column,
    pushed: Vec<(Column, Token)>,
}

trait Tokenizers<'a> {
    fn source(&self) -> &'a str;
    fn pos(&mut self) -> &mut usize;

    fn peek_char(&mut self) -> Option<char> {
        let pos = *self.pos();
        self.source()[pos..].chars().next()
    }

    fn peek_char_at(&mut self, skip: usize) -> Option<char> {
        let pos = *self.pos();
        self.source()[pos..].chars().nth(skip)
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        *self.pos() += ch.len_utf8();
        Some(ch)
    }

    fn number(&mut self) -> Token {
        let mut s = String::new();
        let mut decimal = false;
        while let Some(ch) = self.peek_char() {
            if is_basic_digit(ch) {
                s.push(ch);
            } else if ch == '.' && !decimal {
                decimal = true;
                s.push(ch);
            } else {
                break;
            }
            self.next_char();
        }
        if decimal {
            Token::Literal(Literal::Real(s))
        } else {
            Token::Literal(Literal::Integer(s))
        }
    }

    fn string(&mut self) -> Token {
        let mut s = String::new();
        self.next_char();
        while let Some(ch) = self.next_char() {
            if ch == '"' {
                break;
            }
            if ch == '\n' {
                *self.pos() -= 1;
                break;
            }
            s.push(ch);
        }
        Token::Literal(Literal::String(s))
    }

    fn alphabetic(&mut self) -> Token {
        let mut s = String::new();
        while let Some(ch) = self.peek_char() {
            if is_basic_alphabetic(ch) || is_basic_digit(ch) {
                s.push(ch);
                self.next_char();
                continue;
            }
            if ch == '$' {
                s.push(ch);
                self.next_char();
            }
            break;
        }
        match Token::from_ident(&s) {
            Some(token) => token,
            None => Token::Ident(s),
        }
    }

    fn minutia(&mut self) -> Option<Token> {
        let ch = self.next_char()?;
        let pk = self.peek_char();
        let two = |this: &mut Self, t: Token| {
            this.next_char();
            Some(t)
        };
        match ch {
            '<' if pk == Some('=') => two(self, Token::Operator(Operator::LessEqual)),
            '<' if pk == Some('>') => two(self, Token::Operator(Operator::NotEqual)),
            '>' if pk == Some('=') => two(self, Token::Operator(Operator::GreaterEqual)),
            '>' if pk == Some('<') => two(self, Token::Operator(Operator::NotEqual)),
            '<' => Some(Token::Operator(Operator::Less)),
            '>' => Some(Token::Operator(Operator::Greater)),
            '=' => Some(Token::Operator(Operator::Equal)),
            '+' => Some(Token::Operator(Operator::Plus)),
            '-' => Some(Token::Operator(Operator::Minus)),
            '*' => Some(Token::Operator(Operator::Multiply)),
            '/' => Some(Token::Operator(Operator::Divide)),
            '^' => Some(Token::Operator(Operator::Caret)),
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            ',' => Some(Token::Comma),
            ':' => Some(Token::Colon),
            ';' => Some(Token::Semicolon),
            '#' => Some(Token::Hash),
            '@' => Some(Token::At),
            '?' => Some(Token::Word(Word::Print)),
            '\n' => Some(Token::Eol),
            _ => None,
        }
    }
}

impl<'a> Tokenizers<'a> for Lexer<'a> {
    fn source(&self) -> &'a str {
        self.line
    }
    fn pos(&mut self) -> &mut usize {
        &mut self.pos
    }
}

impl<'a> Lexer<'a> {
    pub fn new(line: &'a str) -> Lexer<'a> {
        Lexer {
            line,
            pos: 0,
            col: 0..0,
            pushed: vec![],
        }
    }

    pub fn line(&self) -> &'a str {
        self.line
    }

    /// Column of the token most recently handed out.
    pub fn column(&self) -> Column {
        self.col.clone()
    }

    pub fn next(&mut self) -> Token {
        if let Some((col, token)) = self.pushed.pop() {
            self.col = col;
            return token;
        }
        let (col, token) = self.next_token();
        self.col = col;
        token
    }

    pub fn peek(&mut self) -> &Token {
        if self.pushed.is_empty() {
            let saved = self.col.clone();
            let token = self.next();
            let col = std::mem::replace(&mut self.col, saved);
            self.pushed.push((col, token));
        }
        match self.pushed.last() {
            Some((_, token)) => token,
            None => &Token::Eol,
        }
    }

    pub fn eol(&mut self) -> bool {
        self.peek().is_eol()
    }

    pub fn push_back(&mut self, token: Token) {
        self.pushed.push((self.col.clone(), token));
    }

    /// Consumes the unread remainder of the line as raw text.
    pub fn rest(&mut self) -> &'a str {
        let start = match self.pushed.first() {
            Some((col, _)) => col.start,
            None => self.pos,
        };
        self.pushed.clear();
        self.pos = self.line.len();
        self.col = start..self.pos;
        let rest = &self.line[start.min(self.line.len())..];
        rest.trim_end_matches(|c| c == '\n' || c == '\r')
    }

    fn next_token(&mut self) -> (Column, Token) {
        loop {
            while let Some(ch) = self.peek_char() {
                if !is_basic_whitespace(ch) {
                    break;
                }
                self.next_char();
            }
            let start = self.pos;
            let pk = match self.peek_char() {
                Some(ch) => ch,
                None => return (start..start, Token::Eol),
            };
            let token = if is_basic_digit(pk) {
                Some(self.number())
            } else if pk == '.' && self.peek_char_at(1).map_or(false, is_basic_digit) {
                Some(self.number())
            } else if is_basic_alphabetic(pk) {
                Some(self.alphabetic())
            } else if pk == '"' {
                Some(self.string())
            } else {
                self.minutia()
            };
            if let Some(token) = token {
                return (start..self.pos, token);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(s: &str) -> Vec<Token> {
        let mut lex = Lexer::new(s);
        let mut v = vec![];
        loop {
            let t = lex.next();
            if t.is_eol() {
                return v;
            }
            v.push(t);
        }
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(
            tokens("1<=2>=3<>4><5"),
            vec![
                Token::Literal(Literal::Integer("1".into())),
                Token::Operator(Operator::LessEqual),
                Token::Literal(Literal::Integer("2".into())),
                Token::Operator(Operator::GreaterEqual),
                Token::Literal(Literal::Integer("3".into())),
                Token::Operator(Operator::NotEqual),
                Token::Literal(Literal::Integer("4".into())),
                Token::Operator(Operator::NotEqual),
                Token::Literal(Literal::Integer("5".into())),
            ]
        );
    }

    #[test]
    fn test_real_promotion() {
        assert_eq!(
            tokens("3.25 .5"),
            vec![
                Token::Literal(Literal::Real("3.25".into())),
                Token::Literal(Literal::Real(".5".into())),
            ]
        );
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(
            tokens("PRINT \"HELLO"),
            vec![
                Token::Word(Word::Print),
                Token::Literal(Literal::String("HELLO".into())),
            ]
        );
    }

    #[test]
    fn test_keywords_keep_ident_case() {
        assert_eq!(
            tokens("for Idx = 1 to 3"),
            vec![
                Token::Word(Word::For),
                Token::Ident("Idx".into()),
                Token::Operator(Operator::Equal),
                Token::Literal(Literal::Integer("1".into())),
                Token::Word(Word::To),
                Token::Literal(Literal::Integer("3".into())),
            ]
        );
    }

    #[test]
    fn test_functions() {
        assert_eq!(
            tokens("chr$(65)+A$"),
            vec![
                Token::Function(Builtin::Chr),
                Token::LParen,
                Token::Literal(Literal::Integer("65".into())),
                Token::RParen,
                Token::Operator(Operator::Plus),
                Token::Ident("A$".into()),
            ]
        );
    }

    #[test]
    fn test_unknown_dropped() {
        assert_eq!(
            tokens("A & B"),
            vec![Token::Ident("A".into()), Token::Ident("B".into())]
        );
    }

    #[test]
    fn test_peek_and_push_back() {
        let mut lex = Lexer::new("A = 1");
        assert_eq!(lex.peek(), &Token::Ident("A".into()));
        let a = lex.next();
        assert_eq!(lex.column(), 0..1);
        assert_eq!(lex.next(), Token::Operator(Operator::Equal));
        lex.push_back(Token::Operator(Operator::Equal));
        assert_eq!(lex.next(), Token::Operator(Operator::Equal));
        assert_eq!(a, Token::Ident("A".into()));
        assert!(!lex.eol());
        assert_eq!(lex.next(), Token::Literal(Literal::Integer("1".into())));
        assert!(lex.eol());
        assert_eq!(lex.next(), Token::Eol);
    }

    #[test]
    fn test_rest() {
        let mut lex = Lexer::new("REM  the rest: of it");
        assert_eq!(lex.next(), Token::Word(Word::Rem));
        assert_eq!(lex.rest(), "  the rest: of it");
        assert!(lex.eol());
    }
}
