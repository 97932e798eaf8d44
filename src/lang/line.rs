use super::{ast::Statement, parse_statements, Error};
use std::rc::Rc;

/// One stored program line. The statements are parsed on first use and
/// kept until the line is replaced.
#[derive(Debug, Clone)]
pub struct Line {
    number: u16,
    source: Rc<str>,
    ast: Option<Rc<Vec<Statement>>>,
}

impl Line {
    pub fn new(number: u16, source: &str) -> Line {
        Line {
            number,
            source: source.trim().into(),
            ast: None,
        }
    }

    pub fn number(&self) -> u16 {
        self.number
    }

    #[cfg(test)]
    pub fn is_parsed(&self) -> bool {
        self.ast.is_some()
    }

    pub fn ast(&mut self) -> Result<Rc<Vec<Statement>>, Vec<Error>> {
        if let Some(ast) = &self.ast {
            return Ok(Rc::clone(ast));
        }
        match parse_statements(&self.source) {
            Ok(statements) => {
                let ast = Rc::new(statements);
                self.ast = Some(Rc::clone(&ast));
                Ok(ast)
            }
            Err(errors) => Err(errors
                .into_iter()
                .map(|e| e.in_line_number(Some(self.number)))
                .collect()),
        }
    }
}

impl PartialEq for Line {
    fn eq(&self, other: &Line) -> bool {
        self.number == other.number && self.source == other.source
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.number, self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let line = Line::new(100, "  print \"hi\"  ");
        assert_eq!(line.to_string(), "100 print \"hi\"");
    }

    #[test]
    fn test_ast_memoized() {
        let mut line = Line::new(10, "a=1:b=2");
        assert!(!line.is_parsed());
        let first = line.ast().unwrap();
        assert_eq!(first.len(), 2);
        assert!(line.is_parsed());
        assert!(Rc::ptr_eq(&first, &line.ast().unwrap()));
    }

    #[test]
    fn test_ast_errors_carry_line() {
        let mut line = Line::new(40, "print (");
        let errors = line.ast().unwrap_err();
        assert_eq!(errors[0].line_number(), Some(40));
        assert!(!line.is_parsed());
    }
}
