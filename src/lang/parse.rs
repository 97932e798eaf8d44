use super::{ast::*, token::*, Column, Error, Lexer, LineNumber, MaxValue};
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Parse one line typed at the console.
///
/// A leading line number makes the rest of the line a program line, which
/// is checked here so that broken lines never reach the listing.
pub fn parse_command(s: &str) -> std::result::Result<Command, Vec<Error>> {
    let mut parse = Parser::new(s);
    match parse.lex.peek().clone() {
        Token::Literal(Literal::Integer(num)) => {
            parse.lex.next();
            let column = parse.lex.column();
            let number = match line_number(&num) {
                Some(n) => n,
                None => {
                    return Err(vec![
                        error!(SyntaxError, ..&column; "LINE NUMBER OUT OF RANGE"),
                    ])
                }
            };
            let body = parse.lex.rest().trim();
            if body.is_empty() {
                return Ok(Command::Delete(number));
            }
            match parse_statements(body) {
                Ok(_) => Ok(Command::Program(number, body.to_string())),
                Err(errors) => Err(errors
                    .into_iter()
                    .map(|e| e.in_line_number(Some(number)))
                    .collect()),
            }
        }
        Token::Word(word) if word.is_command() => {
            parse.lex.next();
            match parse.command(&word) {
                Ok(command) => Ok(command),
                Err(e) => Err(vec![e.in_column(&parse.lex.column())]),
            }
        }
        _ => {
            let statements = parse.statements();
            parse.finish(statements).map(Command::Direct)
        }
    }
}

/// Parse the colon separated statements of one line.
pub fn parse_statements(s: &str) -> std::result::Result<Vec<Statement>, Vec<Error>> {
    let mut parse = Parser::new(s);
    let statements = parse.statements();
    parse.finish(statements)
}

fn line_number(s: &str) -> Option<u16> {
    match s.parse::<u32>() {
        Ok(n) if n <= LineNumber::max_value() as u32 => Some(n as u16),
        _ => None,
    }
}

struct Parser<'a> {
    lex: Lexer<'a>,
    errors: Vec<Error>,
}

impl<'a> Parser<'a> {
    fn new(s: &'a str) -> Parser<'a> {
        Parser {
            lex: Lexer::new(s),
            errors: vec![],
        }
    }

    fn finish<T>(self, result: T) -> std::result::Result<T, Vec<Error>> {
        if self.errors.is_empty() {
            Ok(result)
        } else {
            Err(self.errors)
        }
    }

    fn column(&self) -> Column {
        self.lex.column()
    }

    fn statements(&mut self) -> Vec<Statement> {
        let mut r: Vec<Statement> = vec![];
        loop {
            match self.lex.peek() {
                Token::Eol => return r,
                Token::Colon => {
                    self.lex.next();
                    continue;
                }
                _ => {}
            }
            match self.statement() {
                Ok(s) => {
                    r.push(s);
                    match self.lex.peek() {
                        Token::Eol | Token::Colon | Token::Word(Word::Else) => {}
                        _ => {
                            self.lex.next();
                            let e = error!(SyntaxError, ..&self.column(); "EXPECTED END OF STATEMENT");
                            self.errors.push(e);
                            self.recover();
                        }
                    }
                }
                Err(e) => {
                    let e = e.in_column(&self.column());
                    self.errors.push(e);
                    self.recover();
                }
            }
        }
    }

    /// Skip to the start of the next statement.
    fn recover(&mut self) {
        if self.lex.line().get(self.column()) == Some(":") {
            return;
        }
        loop {
            match self.lex.peek() {
                Token::Eol | Token::Colon => return,
                _ => {
                    self.lex.next();
                }
            }
        }
    }

    fn statement(&mut self) -> Result<Statement> {
        match self.lex.next() {
            Token::Ident(name) => {
                let column = self.column();
                let var = self.variable_named(column.clone(), &name)?;
                self.expect(Token::Operator(Operator::Equal))?;
                Ok(Statement::Let(column, var, self.expression()?))
            }
            Token::Word(word) => Statement::for_word(self, &word),
            _ => Err(error!(SyntaxError; "EXPECTED STATEMENT")),
        }
    }

    fn command(&mut self, word: &Word) -> Result<Command> {
        let command = match word {
            Word::Bye => Command::Bye,
            Word::New => Command::New,
            Word::Run => Command::Run,
            Word::Trun => Command::Trun,
            Word::Stat => Command::Stat,
            Word::Load => Command::Load(self.file_name()?),
            Word::Save => Command::Save(self.file_name()?),
            Word::Files => {
                if self.lex.eol() {
                    Command::Files(None)
                } else {
                    Command::Files(Some(self.file_name()?))
                }
            }
            Word::List => Command::List(self.list_range()?),
            _ => return Err(error!(SyntaxError; "EXPECTED COMMAND")),
        };
        if !self.lex.eol() {
            self.lex.next();
            return Err(error!(SyntaxError; "EXPECTED END OF LINE"));
        }
        Ok(command)
    }

    fn file_name(&mut self) -> Result<Rc<str>> {
        match self.lex.next() {
            Token::Literal(Literal::String(s)) => Ok(s.into()),
            _ => Err(error!(SyntaxError; "EXPECTED FILE NAME")),
        }
    }

    fn list_range(&mut self) -> Result<ListRange> {
        let mut range = ListRange::default();
        if let Token::Literal(Literal::Integer(_)) = self.lex.peek() {
            let start = self.line_number()?;
            range.start = start;
            range.end = Some(start);
        }
        if let Token::Operator(Operator::Minus) = self.lex.peek() {
            self.lex.next();
            range.end = match self.lex.peek() {
                Token::Literal(Literal::Integer(_)) => Some(self.line_number()?),
                _ => None,
            };
        }
        Ok(range)
    }

    fn line_number(&mut self) -> Result<u16> {
        match self.lex.next() {
            Token::Literal(Literal::Integer(s)) => match line_number(&s) {
                Some(n) => Ok(n),
                None => Err(error!(SyntaxError; "LINE NUMBER OUT OF RANGE")),
            },
            _ => Err(error!(SyntaxError; "EXPECTED LINE NUMBER")),
        }
    }

    fn expect(&mut self, token: Token) -> Result<()> {
        let t = self.lex.next();
        if t == token {
            return Ok(());
        }
        Err(error!(SyntaxError; format!("EXPECTED {}", token)))
    }

    fn maybe(&mut self, token: Token) -> bool {
        if *self.lex.peek() == token {
            self.lex.next();
            true
        } else {
            false
        }
    }

    fn variable(&mut self) -> Result<Variable> {
        match self.lex.next() {
            Token::Ident(name) => {
                let column = self.column();
                self.variable_named(column, &name)
            }
            _ => Err(error!(SyntaxError; "EXPECTED VARIABLE")),
        }
    }

    fn variable_named(&mut self, column: Column, name: &str) -> Result<Variable> {
        let ident = Ident::new(name);
        if *self.lex.peek() == Token::LParen {
            let args = self.expression_list()?;
            let column = column.start..self.column().end;
            Ok(Variable::Array(column, ident, args))
        } else {
            Ok(Variable::Unary(column, ident))
        }
    }

    fn variable_list(&mut self) -> Result<Vec<Variable>> {
        let mut v = vec![self.variable()?];
        while self.maybe(Token::Comma) {
            v.push(self.variable()?);
        }
        Ok(v)
    }

    fn expression_list(&mut self) -> Result<Vec<Expression>> {
        self.expect(Token::LParen)?;
        let mut v: Vec<Expression> = vec![];
        if self.maybe(Token::RParen) {
            return Ok(v);
        }
        loop {
            v.push(self.expression()?);
            match self.lex.next() {
                Token::RParen => return Ok(v),
                Token::Comma => continue,
                _ => return Err(error!(SyntaxError; "EXPECTED END OR SEPARATOR")),
            }
        }
    }

    fn print_list(&mut self) -> Result<Vec<PrintItem>> {
        let mut v: Vec<PrintItem> = vec![];
        loop {
            match self.lex.peek() {
                Token::Eol | Token::Colon | Token::Word(Word::Else) => return Ok(v),
                Token::Semicolon => {
                    self.lex.next();
                    v.push(PrintItem::Semicolon);
                }
                Token::Comma => {
                    self.lex.next();
                    v.push(PrintItem::Comma);
                }
                _ => v.push(PrintItem::Expression(self.expression()?)),
            }
        }
    }

    fn expression(&mut self) -> Result<Expression> {
        self.or()
    }

    fn or(&mut self) -> Result<Expression> {
        let mut lhs = self.and()?;
        while *self.lex.peek() == Token::Operator(Operator::Or) {
            self.lex.next();
            let column = self.column();
            let rhs = self.and()?;
            lhs = Expression::Or(column, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn and(&mut self) -> Result<Expression> {
        let mut lhs = self.not()?;
        while *self.lex.peek() == Token::Operator(Operator::And) {
            self.lex.next();
            let column = self.column();
            let rhs = self.not()?;
            lhs = Expression::And(column, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn not(&mut self) -> Result<Expression> {
        if *self.lex.peek() == Token::Operator(Operator::Not) {
            self.lex.next();
            let column = self.column();
            return Ok(Expression::Not(column, Box::new(self.not()?)));
        }
        self.comparison()
    }

    fn comparison(&mut self) -> Result<Expression> {
        let mut lhs = self.additive()?;
        loop {
            let op = match self.lex.peek() {
                Token::Operator(op) if op.is_comparison() => op.clone(),
                _ => return Ok(lhs),
            };
            self.lex.next();
            let column = self.column();
            let rhs = self.additive()?;
            lhs = Expression::for_binary_op(column, &op, lhs, rhs);
        }
    }

    fn additive(&mut self) -> Result<Expression> {
        let mut lhs = self.multiplicative()?;
        loop {
            let op = match self.lex.peek() {
                Token::Operator(op @ Operator::Plus) | Token::Operator(op @ Operator::Minus) => {
                    op.clone()
                }
                _ => return Ok(lhs),
            };
            self.lex.next();
            let column = self.column();
            let rhs = self.multiplicative()?;
            lhs = Expression::for_binary_op(column, &op, lhs, rhs);
        }
    }

    fn multiplicative(&mut self) -> Result<Expression> {
        let mut lhs = self.negation()?;
        loop {
            let op = match self.lex.peek() {
                Token::Operator(op @ Operator::Multiply)
                | Token::Operator(op @ Operator::Divide) => op.clone(),
                _ => return Ok(lhs),
            };
            self.lex.next();
            let column = self.column();
            let rhs = self.negation()?;
            lhs = Expression::for_binary_op(column, &op, lhs, rhs);
        }
    }

    fn negation(&mut self) -> Result<Expression> {
        match self.lex.peek() {
            Token::Operator(Operator::Minus) => {
                self.lex.next();
                let column = self.column();
                Ok(Expression::Negation(column, Box::new(self.negation()?)))
            }
            Token::Operator(Operator::Plus) => {
                self.lex.next();
                self.negation()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Expression> {
        let mut lhs = self.primary()?;
        while *self.lex.peek() == Token::Operator(Operator::Caret) {
            self.lex.next();
            let column = self.column();
            let rhs = if *self.lex.peek() == Token::Operator(Operator::Minus) {
                self.lex.next();
                let column = self.column();
                Expression::Negation(column, Box::new(self.primary()?))
            } else {
                self.primary()?
            };
            lhs = Expression::Power(column, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn primary(&mut self) -> Result<Expression> {
        match self.lex.next() {
            Token::LParen => {
                let expr = self.expression()?;
                self.expect(Token::RParen)?;
                Ok(expr)
            }
            Token::Literal(lit) => Expression::for_literal(self.column(), &lit),
            Token::Ident(name) => {
                let column = self.column();
                Ok(Expression::Variable(self.variable_named(column, &name)?))
            }
            Token::Function(func) => {
                let column = self.column();
                let args = if *self.lex.peek() == Token::LParen {
                    self.expression_list()?
                } else {
                    vec![]
                };
                if !func.arity().contains(&args.len()) {
                    return Err(
                        error!(SyntaxError, ..&column; format!("WRONG NUMBER OF ARGUMENTS TO {}", func)),
                    );
                }
                Ok(Expression::Function(column, func, args))
            }
            _ => Err(error!(SyntaxError; "EXPECTED EXPRESSION")),
        }
    }
}

impl Expression {
    fn for_binary_op(col: Column, op: &Operator, lhs: Expression, rhs: Expression) -> Expression {
        use Operator::*;
        let (lhs, rhs) = (Box::new(lhs), Box::new(rhs));
        match op {
            Caret => Expression::Power(col, lhs, rhs),
            Multiply => Expression::Multiply(col, lhs, rhs),
            Divide => Expression::Divide(col, lhs, rhs),
            Plus => Expression::Add(col, lhs, rhs),
            Minus => Expression::Subtract(col, lhs, rhs),
            Equal => Expression::Equal(col, lhs, rhs),
            NotEqual => Expression::NotEqual(col, lhs, rhs),
            Less => Expression::Less(col, lhs, rhs),
            LessEqual => Expression::LessEqual(col, lhs, rhs),
            Greater => Expression::Greater(col, lhs, rhs),
            GreaterEqual => Expression::GreaterEqual(col, lhs, rhs),
            And => Expression::And(col, lhs, rhs),
            Or => Expression::Or(col, lhs, rhs),
            Not => Expression::Not(col, rhs),
        }
    }

    fn for_literal(col: Column, lit: &Literal) -> Result<Expression> {
        match lit {
            Literal::Integer(s) => match s.parse::<i32>() {
                Ok(n) => Ok(Expression::Integer(col, n)),
                Err(_) => match s.parse::<f32>() {
                    Ok(n) => Ok(Expression::Real(col, n)),
                    Err(_) => Err(error!(SyntaxError, ..&col; "INVALID NUMBER")),
                },
            },
            Literal::Real(s) => match s.parse::<f32>() {
                Ok(n) => Ok(Expression::Real(col, n)),
                Err(_) => Err(error!(SyntaxError, ..&col; "INVALID NUMBER")),
            },
            Literal::String(s) => Ok(Expression::String(col, s.as_str().into())),
        }
    }
}

impl Statement {
    fn for_word(parse: &mut Parser, word: &Word) -> Result<Statement> {
        let column = parse.column();
        use Word::*;
        match word {
            Clear => Ok(Statement::Clear(column)),
            Close => Self::r#close(parse, column),
            Cls | Scnclr => Ok(Statement::Cls(column)),
            Data => Self::r#data(parse, column),
            Dim => Ok(Statement::Dim(column, parse.variable_list()?)),
            Else => Ok(Statement::Else(column, Box::new(Self::r#branch(parse)?))),
            End => Ok(Statement::End(column)),
            For => Self::r#for(parse, column),
            Getkey => Ok(Statement::Getkey(column, parse.variable()?)),
            Gosub => Ok(Statement::Gosub(column, parse.expression()?)),
            Goto => Ok(Statement::Goto(column, parse.expression()?)),
            If => Self::r#if(parse, column),
            Input => Self::r#input(parse, column),
            Let => {
                let var = parse.variable()?;
                parse.expect(Token::Operator(Operator::Equal))?;
                Ok(Statement::Let(column, var, parse.expression()?))
            }
            Next => Self::r#next(parse, column),
            Open => Self::r#open(parse, column),
            Print => Self::r#print(parse, column),
            Read => Ok(Statement::Read(column, parse.variable_list()?)),
            Rem => Ok(Statement::Rem(column, parse.lex.rest().trim_start().into())),
            Restore => Ok(Statement::Restore(column)),
            Return => Ok(Statement::Return(column)),
            Bye | Files | List | Load | New | Run | Save | Stat | Trun => {
                Err(error!(SyntaxError; format!("{} IS A COMMAND", word)))
            }
            As | Output | Step | Then | To | Using => {
                Err(error!(SyntaxError; "EXPECTED STATEMENT"))
            }
        }
    }

    /// The statement after THEN or ELSE. A bare line number means GOTO.
    fn r#branch(parse: &mut Parser) -> Result<Statement> {
        match parse.lex.next() {
            Token::Literal(lit @ Literal::Integer(_)) => {
                let column = parse.column();
                let target = Expression::for_literal(column.clone(), &lit)?;
                Ok(Statement::Goto(column, target))
            }
            token => {
                parse.lex.push_back(token);
                parse.statement()
            }
        }
    }

    fn r#if(parse: &mut Parser, column: Column) -> Result<Statement> {
        let predicate = parse.expression()?;
        let then = match parse.lex.next() {
            Token::Word(Word::Then) => Self::r#branch(parse)?,
            Token::Word(Word::Goto) => {
                let column = parse.column();
                Statement::Goto(column, parse.expression()?)
            }
            _ => return Err(error!(SyntaxError; "EXPECTED THEN")),
        };
        Ok(Statement::If(column, predicate, Box::new(then)))
    }

    fn r#for(parse: &mut Parser, column: Column) -> Result<Statement> {
        let ident = match parse.lex.next() {
            Token::Ident(name) => Ident::new(&name),
            _ => return Err(error!(SyntaxError; "EXPECTED VARIABLE")),
        };
        parse.expect(Token::Operator(Operator::Equal))?;
        let from = parse.expression()?;
        parse.expect(Token::Word(Word::To))?;
        let to = parse.expression()?;
        let step = if parse.maybe(Token::Word(Word::Step)) {
            Some(parse.expression()?)
        } else {
            None
        };
        Ok(Statement::For(column, ident, from, to, step))
    }

    fn r#next(parse: &mut Parser, column: Column) -> Result<Statement> {
        match parse.lex.next() {
            Token::Ident(name) => Ok(Statement::Next(column, Some(Ident::new(&name)))),
            token => {
                parse.lex.push_back(token);
                Ok(Statement::Next(column, None))
            }
        }
    }

    fn r#print(parse: &mut Parser, column: Column) -> Result<Statement> {
        if parse.maybe(Token::Hash) {
            let channel = parse.expression()?;
            parse.expect(Token::Comma)?;
            return Ok(Statement::PrintFile(column, channel, parse.print_list()?));
        }
        let mut print = Print {
            at: None,
            using: None,
            items: vec![],
        };
        if parse.maybe(Token::At) {
            print.at = Some(parse.expression()?);
            parse.expect(Token::Comma)?;
        }
        if parse.maybe(Token::Word(Word::Using)) {
            print.using = Some(parse.expression()?);
            if !parse.maybe(Token::Semicolon) {
                parse.expect(Token::Comma)?;
            }
        }
        print.items = parse.print_list()?;
        Ok(Statement::Print(column, print))
    }

    fn r#input(parse: &mut Parser, column: Column) -> Result<Statement> {
        if parse.maybe(Token::Hash) {
            let channel = parse.expression()?;
            parse.expect(Token::Comma)?;
            return Ok(Statement::InputFile(column, channel, parse.variable_list()?));
        }
        let prompt = match parse.lex.next() {
            Token::Literal(Literal::String(s)) => {
                if !parse.maybe(Token::Semicolon) {
                    parse.expect(Token::Comma)?;
                }
                Some(s.into())
            }
            token => {
                parse.lex.push_back(token);
                None
            }
        };
        Ok(Statement::Input(column, prompt, parse.variable_list()?))
    }

    fn r#open(parse: &mut Parser, column: Column) -> Result<Statement> {
        let file = parse.expression()?;
        parse.expect(Token::Word(Word::For))?;
        let mode = match parse.lex.next() {
            Token::Word(Word::Input) => FileMode::Input,
            Token::Word(Word::Output) => FileMode::Output,
            _ => return Err(error!(SyntaxError; "EXPECTED INPUT OR OUTPUT")),
        };
        parse.expect(Token::Word(Word::As))?;
        parse.maybe(Token::Hash);
        Ok(Statement::Open(column, file, mode, parse.expression()?))
    }

    fn r#close(parse: &mut Parser, column: Column) -> Result<Statement> {
        parse.maybe(Token::Hash);
        Ok(Statement::Close(column, parse.expression()?))
    }

    fn r#data(parse: &mut Parser, column: Column) -> Result<Statement> {
        let mut v: Vec<Expression> = vec![];
        loop {
            let mut negate = false;
            let token = match parse.lex.next() {
                Token::Operator(Operator::Minus) => {
                    negate = true;
                    parse.lex.next()
                }
                Token::Operator(Operator::Plus) => parse.lex.next(),
                t => t,
            };
            let col = parse.column();
            let expr = match token {
                Token::Literal(Literal::String(s)) if !negate => {
                    Expression::String(col, s.as_str().into())
                }
                Token::Literal(lit) => {
                    let expr = Expression::for_literal(col.clone(), &lit)?;
                    if negate {
                        Expression::Negation(col, Box::new(expr))
                    } else {
                        expr
                    }
                }
                Token::Ident(s) if !negate => Expression::String(col, s.as_str().into()),
                Token::Word(w) if !negate => Expression::String(col, w.as_str().into()),
                _ => return Err(error!(SyntaxError; "EXPECTED DATA ITEM")),
            };
            v.push(expr);
            if !parse.maybe(Token::Comma) {
                return Ok(Statement::Data(column, v));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one(s: &str) -> Statement {
        match parse_statements(s) {
            Ok(mut v) => {
                assert_eq!(v.len(), 1);
                v.pop().unwrap()
            }
            Err(e) => panic!("{:?}", e),
        }
    }

    fn var(col: Column, name: &str) -> Expression {
        Expression::Variable(Variable::Unary(col, Ident::new(name)))
    }

    #[test]
    fn test_implied_let() {
        let answer = Statement::Let(
            0..1,
            Variable::Unary(0..1, Ident::Plain("a".into())),
            Expression::Integer(2..4, 12),
        );
        assert_eq!(parse_one("A=12"), answer);
        let answer = Statement::Let(
            0..3,
            Variable::Unary(4..6, Ident::String("b$".into())),
            Expression::String(9..15, "food".into()),
        );
        assert_eq!(parse_one("let b$ = \"food\""), answer);
    }

    #[test]
    fn test_precedence() {
        let answer = Statement::Let(
            0..1,
            Variable::Unary(0..1, Ident::new("a")),
            Expression::Add(
                3..4,
                Box::new(Expression::Integer(2..3, 1)),
                Box::new(Expression::Multiply(
                    5..6,
                    Box::new(Expression::Integer(4..5, 2)),
                    Box::new(Expression::Integer(6..7, 3)),
                )),
            ),
        );
        assert_eq!(parse_one("a=1+2*3"), answer);
        let answer = Statement::Let(
            0..1,
            Variable::Unary(0..1, Ident::new("a")),
            Expression::Negation(
                2..3,
                Box::new(Expression::Power(
                    4..5,
                    Box::new(Expression::Integer(3..4, 2)),
                    Box::new(Expression::Integer(5..6, 2)),
                )),
            ),
        );
        assert_eq!(parse_one("a=-2^2"), answer);
    }

    #[test]
    fn test_logic_below_comparison() {
        let answer = Statement::Let(
            0..1,
            Variable::Unary(0..1, Ident::new("a")),
            Expression::Or(
                8..10,
                Box::new(Expression::Less(
                    4..5,
                    Box::new(var(2..3, "b")),
                    Box::new(Expression::Integer(6..7, 1)),
                )),
                Box::new(Expression::Not(
                    11..14,
                    Box::new(var(15..16, "c")),
                )),
            ),
        );
        assert_eq!(parse_one("a=b < 1 or not c"), answer);
    }

    #[test]
    fn test_chain_and_else() {
        let v = parse_statements("if 0 then print \"one\" else print \"two\":end").unwrap();
        assert_eq!(v.len(), 3);
        assert!(matches!(v[0], Statement::If(..)));
        assert!(matches!(v[1], Statement::Else(..)));
        assert!(matches!(v[2], Statement::End(..)));
        match &v[0] {
            Statement::If(_, _, then) => assert!(matches!(**then, Statement::Print(..))),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_then_line_number() {
        match parse_one("IF A THEN 100") {
            Statement::If(_, _, then) => {
                assert_eq!(*then, Statement::Goto(10..13, Expression::Integer(10..13, 100)))
            }
            s => panic!("{:?}", s),
        }
    }

    #[test]
    fn test_print_items() {
        let answer = Statement::Print(
            0..1,
            Print {
                at: None,
                using: None,
                items: vec![
                    PrintItem::Expression(Expression::Integer(2..3, 1)),
                    PrintItem::Comma,
                    PrintItem::Expression(Expression::Integer(4..5, 2)),
                    PrintItem::Semicolon,
                ],
            },
        );
        assert_eq!(parse_one("? 1,2;"), answer);
        match parse_one("PRINT USING \"$###.##\"; 12.5") {
            Statement::Print(_, print) => {
                assert!(print.using.is_some());
                assert_eq!(print.items.len(), 1);
            }
            s => panic!("{:?}", s),
        }
        assert!(matches!(
            parse_one("print #1, a$"),
            Statement::PrintFile(..)
        ));
    }

    #[test]
    fn test_rem_takes_rest() {
        assert_eq!(
            parse_statements("REM hello: world").unwrap(),
            vec![Statement::Rem(0..3, "hello: world".into())]
        );
    }

    #[test]
    fn test_data_items() {
        match parse_one("DATA 1, -2.5, \"x\", bare") {
            Statement::Data(_, v) => {
                assert_eq!(v.len(), 4);
                assert!(matches!(v[1], Expression::Negation(..)));
                assert_eq!(v[3], Expression::String(19..23, "bare".into()));
            }
            s => panic!("{:?}", s),
        }
    }

    #[test]
    fn test_open_for_next() {
        assert!(matches!(
            parse_one("OPEN \"out.txt\" FOR OUTPUT AS #1"),
            Statement::Open(_, _, FileMode::Output, Expression::Integer(_, 1))
        ));
        assert!(matches!(
            parse_one("FOR I = 10 TO 1 STEP -1"),
            Statement::For(_, _, _, _, Some(_))
        ));
        assert_eq!(parse_one("next"), Statement::Next(0..4, None));
    }

    #[test]
    fn test_optional_parts() {
        let v = parse_statements("next:print").unwrap();
        assert_eq!(v[0], Statement::Next(0..4, None));
        assert!(matches!(&v[1], Statement::Print(col, _) if *col == (5..10)));
        assert_eq!(
            parse_one("NEXT I"),
            Statement::Next(0..4, Some(Ident::new("I")))
        );
        match parse_one("INPUT A, B$") {
            Statement::Input(_, prompt, vars) => {
                assert_eq!(prompt, None);
                assert_eq!(vars.len(), 2);
            }
            s => panic!("{:?}", s),
        }
        match parse_one("INPUT \"AGE\"; A") {
            Statement::Input(_, prompt, vars) => {
                assert_eq!(prompt.as_deref(), Some("AGE"));
                assert_eq!(vars.len(), 1);
            }
            s => panic!("{:?}", s),
        }
    }

    #[test]
    fn test_errors_accumulate() {
        let errors = parse_statements("print (1:let = 2:print 3").unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].code(), 2);
    }

    #[test]
    fn test_commands() {
        assert_eq!(parse_command("10").unwrap(), Command::Delete(10));
        assert_eq!(
            parse_command("20   print \"hi\"").unwrap(),
            Command::Program(20, "print \"hi\"".into())
        );
        assert_eq!(
            parse_command("list 10-").unwrap(),
            Command::List(ListRange {
                start: 10,
                end: None
            })
        );
        assert_eq!(
            parse_command("LIST -30").unwrap(),
            Command::List(ListRange {
                start: 0,
                end: Some(30)
            })
        );
        assert_eq!(
            parse_command("load \"prog.bas\"").unwrap(),
            Command::Load("prog.bas".into())
        );
        assert!(matches!(parse_command("a=1"), Ok(Command::Direct(_))));
    }

    #[test]
    fn test_program_line_errors_carry_number() {
        let errors = parse_command("30 print (").unwrap_err();
        assert_eq!(errors[0].line_number(), Some(30));
        assert!(parse_command("70000 end").is_err());
    }
}
