use crate::error;
use crate::lang::ast::ListRange;
use crate::lang::token::{Literal, Token};
use crate::lang::{Error, Lexer, Line, LineNumber, MaxValue};
use std::collections::{btree_map::Values, BTreeMap};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use tracing::debug;

type Result<T> = std::result::Result<T, Error>;

/// ## Resident program
///
/// Lines in ascending order of line number, which is also execution order.

#[derive(Debug, Default)]
pub struct Listing {
    source: BTreeMap<u16, Line>,
}

impl Listing {
    pub fn clear(&mut self) {
        self.source.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn insert(&mut self, line: Line) -> Option<Line> {
        self.source.insert(line.number(), line)
    }

    pub fn remove(&mut self, number: u16) -> Option<Line> {
        self.source.remove(&number)
    }

    pub fn get_mut(&mut self, number: u16) -> Option<&mut Line> {
        self.source.get_mut(&number)
    }

    pub fn first(&self) -> Option<u16> {
        self.source.keys().next().copied()
    }

    pub fn next_after(&self, number: u16) -> Option<u16> {
        use std::ops::Bound::{Excluded, Unbounded};
        self.source
            .range((Excluded(number), Unbounded))
            .next()
            .map(|(n, _)| *n)
    }

    pub fn lines(&self) -> Values<'_, u16, Line> {
        self.source.values()
    }

    pub fn numbers(&self) -> Vec<u16> {
        self.source.keys().copied().collect()
    }

    pub fn list(&self, range: ListRange) -> Vec<String> {
        let end = range.end.unwrap_or(u16::max_value());
        if range.start > end {
            return vec![];
        }
        self.source
            .range(range.start..=end)
            .map(|(_, line)| line.to_string())
            .collect()
    }

    /// Used for loading a new Listing from a file. Lines are kept as text
    /// and parsed when first run.
    pub fn load_str(&mut self, line: &str) -> Result<()> {
        let mut lex = Lexer::new(line);
        let number = match lex.next() {
            Token::Eol => return Ok(()),
            Token::Literal(Literal::Integer(s)) => match s.parse::<u16>() {
                Ok(n) if n <= LineNumber::max_value() => n,
                _ => return Err(error!(SyntaxError)),
            },
            _ => return Err(error!(DirectStatementInFile)),
        };
        let body = lex.rest().trim();
        if body.is_empty() {
            self.remove(number);
        } else {
            self.insert(Line::new(number, body));
        }
        Ok(())
    }

    pub fn load(filename: &str) -> Result<Listing> {
        let mut listing = Listing::default();
        let reader = BufReader::new(File::open(filename).map_err(io_error)?);
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(io_error)?;
            if let Err(error) = listing.load_str(&line) {
                return Err(error.message(format!("LINE {} OF FILE", index + 1)));
            }
        }
        debug!(filename, lines = listing.len(), "loaded program");
        Ok(listing)
    }

    pub fn save(&self, filename: &str) -> Result<()> {
        let mut file = BufWriter::new(File::create(filename).map_err(io_error)?);
        for line in self.lines() {
            writeln!(file, "{}", line).map_err(io_error)?;
        }
        file.flush().map_err(io_error)?;
        debug!(filename, lines = self.len(), "saved program");
        Ok(())
    }
}

pub fn io_error(error: std::io::Error) -> Error {
    let msg = error.to_string().to_ascii_uppercase();
    match error.kind() {
        ErrorKind::NotFound => error!(FileNotFound; msg),
        _ => error!(DiskIoError; msg),
    }
}
