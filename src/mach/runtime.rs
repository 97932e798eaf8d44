use super::console::{Append, Console, Status};
use super::{Files, Function, Listing, Operation, Picture, Stack, Val, Var};
use crate::error;
use crate::lang::ast::*;
use crate::lang::token::Builtin;
use crate::lang::{parse_command, Error, Line, LineNumber, MaxValue};
use chrono::{DateTime, Local};
use rand::{rngs::StdRng, SeedableRng};
use std::collections::{HashMap, VecDeque};
use std::convert::TryFrom;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, trace};

type Result<T> = std::result::Result<T, Error>;

const GETKEY_POLLS: usize = 300;
const GETKEY_DELAY: Duration = Duration::from_millis(10);

/// Returned by [`Runtime::execute`] to tell the host what to do next.
#[derive(Debug, PartialEq)]
pub enum Event {
    /// Nothing to run. Read a command and `enter` it.
    Stopped,
    /// The cycle budget ran out. Call `execute` again.
    Running,
    /// Show the prompt, read a line and `enter` it.
    Input(String),
    Errors(Vec<Error>),
}

/// A statement location. Direct mode code has no line number.
#[derive(Debug, Clone, PartialEq)]
struct Position {
    line: LineNumber,
    index: usize,
}

/// Where RETURN or NEXT picks up again, with the IF state of the
/// chain that was left.
#[derive(Debug, Clone)]
struct Resume {
    pos: Position,
    if_state: IfState,
    trigger_else: bool,
}

#[derive(Debug, Clone)]
struct ForLocation {
    resume: Resume,
    end: Val,
    step: Val,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum IfState {
    Unset,
    Yes,
    No,
}

enum Flow {
    Next,
    Skip,
    Jump(Position),
    Resume(Resume),
    Input(String),
    End,
}

/// ## BASIC interpreter
///
/// Owns the program, variables, loop and subroutine stacks, the DATA queue
/// and the open files. The host drives it one slice at a time with
/// `execute`, feeding typed lines in with `enter`.

pub struct Runtime {
    listing: Listing,
    vars: Var,
    files: Files,
    gosubs: Stack<Resume>,
    fors: HashMap<Ident, ForLocation>,
    for_stack: Stack<Ident>,
    data: VecDeque<Val>,
    direct: Rc<Vec<Statement>>,
    code: Rc<Vec<Statement>>,
    pos: Position,
    if_state: IfState,
    trigger_else: bool,
    running: bool,
    line_entered: bool,
    command: Option<Command>,
    entry_errors: Vec<Error>,
    input: Option<String>,
    answer: Option<String>,
    interrupted: bool,
    trun: Option<DateTime<Local>>,
    rng: StdRng,
}

impl Default for Runtime {
    fn default() -> Runtime {
        Runtime {
            listing: Listing::default(),
            vars: Var::new(),
            files: Files::default(),
            gosubs: Stack::new("TOO MANY GOSUBS"),
            fors: HashMap::new(),
            for_stack: Stack::new("TOO MANY FOR LOOPS"),
            data: VecDeque::new(),
            direct: Rc::default(),
            code: Rc::default(),
            pos: Position {
                line: None,
                index: 0,
            },
            if_state: IfState::Unset,
            trigger_else: false,
            running: false,
            line_entered: false,
            command: None,
            entry_errors: vec![],
            input: None,
            answer: None,
            interrupted: false,
            trun: None,
            rng: StdRng::from_entropy(),
        }
    }
}

impl Runtime {
    /// Accept one typed line. Returns false when the line was rejected,
    /// in which case the errors come out of the next `execute`.
    pub fn enter(&mut self, s: &str) -> bool {
        if self.input.is_some() {
            self.answer = Some(s.to_string());
            return true;
        }
        match parse_command(s) {
            Ok(Command::Program(number, source)) => {
                debug!(line = number, "store");
                self.listing.insert(Line::new(number, &source));
                true
            }
            Ok(Command::Delete(number)) => {
                debug!(line = number, "delete");
                self.listing.remove(number);
                true
            }
            Ok(command) => {
                self.command = Some(command);
                true
            }
            Err(errors) => {
                self.entry_errors = errors;
                false
            }
        }
    }

    /// Stop whatever is running or waiting for input at the next check.
    pub fn interrupt(&mut self) {
        self.interrupted = true;
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    pub fn execute(&mut self, console: &mut dyn Console, cycles: usize) -> Event {
        if !self.entry_errors.is_empty() {
            return Event::Errors(std::mem::take(&mut self.entry_errors));
        }
        if self.interrupted {
            self.interrupted = false;
            if self.running || self.input.is_some() {
                let line = self.pos.line;
                return self.fail(console, vec![error!(Break, line)]);
            }
        }
        if let Some(command) = self.command.take() {
            if let Err(errors) = self.command(console, command) {
                return Event::Errors(errors);
            }
        }
        if let Some(prompt) = self.input.take() {
            let answer = match self.answer.take() {
                Some(answer) => answer,
                None => {
                    self.input = Some(prompt.clone());
                    return Event::Input(prompt);
                }
            };
            match self.accept_input(console, &answer) {
                Ok(true) => self.pos.index += 1,
                Ok(false) => {
                    console.add_text("?REDO FROM START", Append::None);
                    self.input = Some(prompt.clone());
                    return Event::Input(prompt);
                }
                Err(e) => {
                    let e = e.in_line_number(self.pos.line);
                    return self.fail(console, vec![e]);
                }
            }
        }
        if !self.running {
            return Event::Stopped;
        }
        match self.run_slice(console, cycles) {
            Ok(event) => event,
            Err(errors) => self.fail(console, errors),
        }
    }

    fn fail(&mut self, console: &mut dyn Console, errors: Vec<Error>) -> Event {
        self.stop(console);
        Event::Errors(errors)
    }

    fn stop(&mut self, console: &mut dyn Console) {
        if self.running {
            debug!(line = ?self.pos.line, "stop");
        }
        self.running = false;
        self.input = None;
        self.answer = None;
        if let Some(start) = self.trun.take() {
            let elapsed = Local::now().signed_duration_since(start);
            let seconds = elapsed.num_milliseconds() as f64 / 1000.0;
            console.add_text(&format!("RUN TIME: {:.3} SECONDS", seconds), Append::None);
        }
    }

    fn reset_stacks(&mut self) {
        self.gosubs.clear();
        self.fors.clear();
        self.for_stack.clear();
        self.if_state = IfState::Unset;
        self.trigger_else = false;
    }

    fn command(
        &mut self,
        console: &mut dyn Console,
        command: Command,
    ) -> std::result::Result<(), Vec<Error>> {
        match command {
            Command::Direct(statements) => {
                self.reset_stacks();
                self.direct = Rc::new(statements);
                self.code = Rc::clone(&self.direct);
                self.pos = Position {
                    line: None,
                    index: 0,
                };
                self.running = true;
            }
            Command::Run => {
                self.trun = None;
                self.run()?;
            }
            Command::Trun => {
                self.trun = Some(Local::now());
                if let Err(errors) = self.run() {
                    self.trun = None;
                    return Err(errors);
                }
                if !self.running {
                    self.stop(console);
                }
            }
            Command::List(range) => {
                for line in self.listing.list(range) {
                    console.add_text(&line, Append::None);
                }
            }
            Command::Stat => {
                console.add_text(
                    &format!("PROGRAM LINES: {}", self.listing.len()),
                    Append::None,
                );
                for (ident, val) in self.vars.sorted() {
                    let s = format!("{} = {} ({})", ident, val, val.type_name());
                    console.add_text(&s, Append::None);
                }
            }
            Command::New => {
                debug!("new");
                self.listing.clear();
                self.vars.clear();
                self.data.clear();
                self.reset_stacks();
            }
            Command::Load(filename) => {
                let listing = Listing::load(&filename).map_err(|e| vec![e])?;
                self.listing = listing;
                self.reset_stacks();
            }
            Command::Save(filename) => self.listing.save(&filename).map_err(|e| vec![e])?,
            Command::Files(dir) => {
                let dir = dir.as_deref().unwrap_or(".");
                for name in list_dir(dir).map_err(|e| vec![e])? {
                    console.add_text(&name, Append::None);
                }
            }
            Command::Bye => {
                self.files.close_all();
                console.terminate();
            }
            Command::Program(..) | Command::Delete(_) => {}
        }
        Ok(())
    }

    fn run(&mut self) -> std::result::Result<(), Vec<Error>> {
        self.preprocess();
        self.reset_stacks();
        match self.listing.first() {
            Some(number) => {
                debug!(lines = self.listing.len(), "run");
                self.pos.line = None;
                self.branch(Position {
                    line: Some(number),
                    index: 0,
                })?;
                self.running = true;
            }
            None => self.running = false,
        }
        Ok(())
    }

    /// Parse every line that will parse and rebuild the DATA queue.
    fn preprocess(&mut self) {
        self.data.clear();
        for number in self.listing.numbers() {
            let ast = match self.listing.get_mut(number).map(|line| line.ast()) {
                Some(Ok(ast)) => ast,
                _ => continue,
            };
            for statement in ast.iter() {
                if let Statement::Data(_, items) = statement {
                    self.data.extend(items.iter().filter_map(data_value));
                }
            }
        }
    }

    fn branch(&mut self, pos: Position) -> std::result::Result<(), Vec<Error>> {
        let code = match pos.line {
            None => Rc::clone(&self.direct),
            Some(number) => match self.listing.get_mut(number) {
                Some(line) => line.ast()?,
                None => {
                    return Err(vec![
                        error!(UndefinedLine, self.pos.line; format!("BRANCH TO {}", number)),
                    ])
                }
            },
        };
        trace!(line = ?pos.line, index = pos.index, "branch");
        self.code = code;
        self.pos = pos;
        self.if_state = IfState::Unset;
        self.trigger_else = false;
        self.line_entered = true;
        Ok(())
    }

    fn resume_here(&self) -> Resume {
        Resume {
            pos: Position {
                line: self.pos.line,
                index: self.pos.index + 1,
            },
            if_state: self.if_state,
            trigger_else: self.trigger_else,
        }
    }

    fn run_slice(
        &mut self,
        console: &mut dyn Console,
        cycles: usize,
    ) -> std::result::Result<Event, Vec<Error>> {
        let mut budget = cycles;
        loop {
            if self.line_entered {
                self.line_entered = false;
                if self.pos.line.is_some() {
                    match console.tick() {
                        Status::Running => {}
                        Status::Escape => return Err(vec![error!(Break, self.pos.line)]),
                        Status::Quitting => {
                            self.stop(console);
                            return Ok(Event::Stopped);
                        }
                    }
                }
            }
            if self.pos.index >= self.code.len() {
                let next = match self.pos.line {
                    Some(number) => self.listing.next_after(number),
                    None => None,
                };
                match next {
                    Some(number) => self.branch(Position {
                        line: Some(number),
                        index: 0,
                    })?,
                    None => {
                        self.stop(console);
                        return Ok(Event::Stopped);
                    }
                }
                continue;
            }
            if budget == 0 {
                return Ok(Event::Running);
            }
            budget -= 1;
            let code = Rc::clone(&self.code);
            let flow = match self.statement(console, &code[self.pos.index]) {
                Ok(flow) => flow,
                Err(e) => return Err(vec![e.in_line_number(self.pos.line)]),
            };
            match flow {
                Flow::Next => self.pos.index += 1,
                Flow::Skip => self.pos.index = code.len(),
                Flow::Jump(pos) => self.branch(pos)?,
                Flow::Resume(resume) => {
                    self.branch(resume.pos)?;
                    self.if_state = resume.if_state;
                    self.trigger_else = resume.trigger_else;
                }
                Flow::Input(prompt) => {
                    self.input = Some(prompt.clone());
                    return Ok(Event::Input(prompt));
                }
                Flow::End => {
                    self.stop(console);
                    return Ok(Event::Stopped);
                }
            }
        }
    }

    fn statement(&mut self, console: &mut dyn Console, statement: &Statement) -> Result<Flow> {
        if let Statement::Else(_, branch) = statement {
            return match self.if_state {
                IfState::Yes => Ok(Flow::Skip),
                IfState::No if self.trigger_else => {
                    self.trigger_else = false;
                    self.if_state = IfState::Unset;
                    self.statement(console, branch)
                }
                _ => Ok(Flow::Next),
            };
        }
        if self.if_state == IfState::No {
            return Ok(Flow::Next);
        }
        match statement {
            Statement::Clear(_) => {
                self.vars.clear();
                Ok(Flow::Next)
            }
            Statement::Close(_, channel) => {
                let channel = self.channel(console, channel)?;
                self.files.close(channel)?;
                Ok(Flow::Next)
            }
            Statement::Cls(_) => {
                console.clear_text();
                Ok(Flow::Next)
            }
            Statement::Data(..) | Statement::Dim(..) | Statement::Rem(..) => Ok(Flow::Next),
            Statement::Else(..) => Ok(Flow::Next),
            Statement::End(_) => Ok(Flow::End),
            Statement::For(_, ident, from, to, step) => self.r#for(console, ident, from, to, step),
            Statement::Getkey(_, var) => self.r#getkey(console, var),
            Statement::Gosub(_, target) => {
                let line = self.line_target(console, target)?;
                let resume = self.resume_here();
                self.gosubs.push(resume)?;
                Ok(Flow::Jump(Position {
                    line: Some(line),
                    index: 0,
                }))
            }
            Statement::Goto(_, target) => {
                let line = self.line_target(console, target)?;
                Ok(Flow::Jump(Position {
                    line: Some(line),
                    index: 0,
                }))
            }
            Statement::If(_, predicate, then) => {
                if self.expression(console, predicate)?.boolean() {
                    self.if_state = IfState::Yes;
                    self.trigger_else = false;
                    self.statement(console, then)
                } else {
                    self.if_state = IfState::No;
                    self.trigger_else = true;
                    Ok(Flow::Next)
                }
            }
            Statement::Input(_, prompt, _) => Ok(Flow::Input(format!(
                "{}? ",
                prompt.as_deref().unwrap_or("")
            ))),
            Statement::InputFile(_, channel, vars) => {
                let channel = self.channel(console, channel)?;
                for var in vars {
                    let field = self.files.read_field(channel)?;
                    let val = if var.ident().is_string() {
                        Val::from(field)
                    } else {
                        match field.trim().parse::<i32>() {
                            Ok(n) => Val::Integer(n),
                            Err(_) => return Err(error!(TypeMismatch)),
                        }
                    };
                    self.assign(console, var, val)?;
                }
                Ok(Flow::Next)
            }
            Statement::Let(_, var, expr) => {
                let val = self.expression(console, expr)?;
                self.assign(console, var, val)?;
                Ok(Flow::Next)
            }
            Statement::Next(_, ident) => self.r#next(ident),
            Statement::Open(_, file, mode, channel) => {
                let filename = match self.expression(console, file)? {
                    Val::String(s) => s,
                    _ => return Err(error!(TypeMismatch)),
                };
                let channel = self.channel(console, channel)?;
                self.files.open(channel, &filename, *mode)?;
                Ok(Flow::Next)
            }
            Statement::Print(_, print) => {
                self.r#print(console, print)?;
                Ok(Flow::Next)
            }
            Statement::PrintFile(_, channel, items) => {
                let channel = self.channel(console, channel)?;
                let mut s = String::new();
                for item in items {
                    match item {
                        PrintItem::Expression(expr) => {
                            s.push_str(&self.expression(console, expr)?.to_string())
                        }
                        PrintItem::Comma => s.push(','),
                        PrintItem::Semicolon => {}
                    }
                }
                if items.last() != Some(&PrintItem::Semicolon) {
                    s.push('\n');
                }
                self.files.write(channel, &s)?;
                Ok(Flow::Next)
            }
            Statement::Read(_, vars) => {
                for var in vars {
                    let val = match self.data.pop_front() {
                        Some(val) => val,
                        None => return Err(error!(OutOfData)),
                    };
                    self.assign(console, var, val)?;
                }
                Ok(Flow::Next)
            }
            Statement::Restore(_) => {
                self.preprocess();
                Ok(Flow::Next)
            }
            Statement::Return(_) => match self.gosubs.pop() {
                Some(resume) => Ok(Flow::Resume(resume)),
                None => Err(error!(ReturnWithoutGosub)),
            },
        }
    }

    fn r#for(
        &mut self,
        console: &mut dyn Console,
        ident: &Ident,
        from: &Expression,
        to: &Expression,
        step: &Option<Expression>,
    ) -> Result<Flow> {
        let from = numeric(self.expression(console, from)?)?;
        let end = numeric(self.expression(console, to)?)?;
        let step = match step {
            Some(step) => numeric(self.expression(console, step)?)?,
            None => Val::Integer(1),
        };
        self.vars.store(ident, from)?;
        let location = ForLocation {
            resume: self.resume_here(),
            end,
            step,
        };
        self.fors.insert(ident.clone(), location);
        self.for_stack.retain(|i| i != ident);
        self.for_stack.push(ident.clone())?;
        Ok(Flow::Next)
    }

    fn r#next(&mut self, ident: &Option<Ident>) -> Result<Flow> {
        let ident = match ident {
            Some(ident) => ident.clone(),
            None => match self.for_stack.last() {
                Some(ident) => ident.clone(),
                None => return Err(error!(NextWithoutFor)),
            },
        };
        let location = match self.fors.get(&ident) {
            Some(location) => location.clone(),
            None => return Err(error!(NextWithoutFor; ident.to_string().to_ascii_uppercase())),
        };
        let value = Operation::sum(self.vars.fetch(&ident), location.step.clone())?;
        self.vars.store(&ident, value.clone())?;
        let done = if location.step.is_less_than(&Val::Integer(0)) {
            value.is_less_than(&location.end)
        } else {
            value.is_greater_than(&location.end)
        };
        if done {
            self.fors.remove(&ident);
            self.for_stack.retain(|i| *i != ident);
            Ok(Flow::Next)
        } else {
            Ok(Flow::Resume(location.resume))
        }
    }

    fn r#getkey(&mut self, console: &mut dyn Console, var: &Variable) -> Result<Flow> {
        let mut key = String::new();
        for _ in 0..GETKEY_POLLS {
            key = console.get_key();
            if !key.is_empty() {
                break;
            }
            match console.tick() {
                Status::Running => std::thread::sleep(GETKEY_DELAY),
                Status::Escape => return Err(error!(Break)),
                Status::Quitting => return Ok(Flow::End),
            }
        }
        self.assign(console, var, Val::from(key))?;
        Ok(Flow::Next)
    }

    fn r#print(&mut self, console: &mut dyn Console, print: &Print) -> Result<()> {
        let picture = match &print.using {
            Some(expr) => match self.expression(console, expr)? {
                Val::String(s) => Some(Picture::new(&s)),
                _ => return Err(error!(TypeMismatch)),
            },
            None => None,
        };
        let mut at = match &print.at {
            Some(expr) => {
                let offset = i32::try_from(self.expression(console, expr)?)?;
                match usize::try_from(offset) {
                    Ok(offset) => Some(offset),
                    Err(_) => return Err(error!(IllegalFunctionCall)),
                }
            }
            None => None,
        };
        let mut out = |console: &mut dyn Console, s: &str, mode: Append| match at.take() {
            Some(offset) => console.put_text_at(offset, s, mode),
            None => console.add_text(s, mode),
        };
        let mut pending: Option<String> = None;
        for item in &print.items {
            match item {
                PrintItem::Expression(expr) => {
                    if let Some(s) = pending.take() {
                        out(console, &s, Append::Append);
                    }
                    let val = self.expression(console, expr)?;
                    pending = Some(match &picture {
                        Some(picture) => picture.format(&val),
                        None => val.to_string(),
                    });
                }
                PrintItem::Semicolon => {
                    out(console, &pending.take().unwrap_or_default(), Append::Append)
                }
                PrintItem::Comma => out(console, &pending.take().unwrap_or_default(), Append::Tab),
            }
        }
        match pending {
            Some(s) => out(console, &s, Append::None),
            None if print.items.is_empty() => out(console, "", Append::None),
            None => {}
        }
        Ok(())
    }

    fn accept_input(&mut self, console: &mut dyn Console, answer: &str) -> Result<bool> {
        let code = Rc::clone(&self.code);
        let vars = match code.get(self.pos.index).and_then(input_variables) {
            Some(vars) => vars,
            None => return Err(error!(InternalError; "NOT WAITING FOR INPUT")),
        };
        let fields: Vec<&str> = if vars.len() == 1 {
            vec![answer]
        } else {
            answer.split(',').collect()
        };
        if fields.len() < vars.len() {
            return Ok(false);
        }
        let mut values: Vec<Val> = vec![];
        for (var, field) in vars.iter().zip(fields) {
            let field = field.trim();
            if var.ident().is_string() {
                values.push(Val::from(field));
            } else if field.is_empty() {
                values.push(Val::Integer(0));
            } else {
                match Val::from_number_str(field) {
                    Some(val) => values.push(val),
                    None => return Ok(false),
                }
            }
        }
        for (var, val) in vars.iter().zip(values) {
            self.assign(console, var, val)?;
        }
        Ok(true)
    }

    fn assign(&mut self, console: &mut dyn Console, var: &Variable, val: Val) -> Result<()> {
        let ident = self.resolve(console, var)?;
        self.vars.store(&ident, val)
    }

    fn resolve(&mut self, console: &mut dyn Console, var: &Variable) -> Result<Ident> {
        match var {
            Variable::Unary(_, ident) => Ok(ident.clone()),
            Variable::Array(_, ident, subscripts) => {
                let mut indices: Vec<i32> = vec![];
                for expr in subscripts {
                    indices.push(i32::try_from(self.expression(console, expr)?)?);
                }
                Ok(Var::array_key(ident, &indices))
            }
        }
    }

    fn channel(&mut self, console: &mut dyn Console, expr: &Expression) -> Result<i32> {
        match self.expression(console, expr)? {
            val @ Val::Integer(_) | val @ Val::Real(_) => i32::try_from(val),
            _ => Err(error!(TypeMismatch)),
        }
    }

    fn line_target(&mut self, console: &mut dyn Console, expr: &Expression) -> Result<u16> {
        match self.expression(console, expr)? {
            Val::Integer(n) => match u16::try_from(n) {
                Ok(number) if number <= LineNumber::max_value() => Ok(number),
                _ => Err(error!(UndefinedLine; format!("BRANCH TO {}", n))),
            },
            _ => Err(error!(TypeMismatch)),
        }
    }

    fn expression(&mut self, console: &mut dyn Console, expr: &Expression) -> Result<Val> {
        use Expression::*;
        match expr {
            Real(_, n) => Ok(Val::from(*n)),
            Integer(_, n) => Ok(Val::Integer(*n)),
            String(_, s) => Ok(Val::String(Rc::clone(s))),
            Variable(var) => {
                let ident = self.resolve(console, var)?;
                Ok(self.vars.fetch(&ident))
            }
            Function(_, func, args) => self.function(console, *func, args),
            Negation(_, expr) => Operation::negate(self.expression(console, expr)?),
            Not(_, expr) => Operation::not(self.expression(console, expr)?),
            Power(_, l, r) => self.binary(console, l, r, Operation::power),
            Multiply(_, l, r) => self.binary(console, l, r, Operation::multiply),
            Divide(_, l, r) => self.binary(console, l, r, Operation::divide),
            Add(_, l, r) => self.binary(console, l, r, Operation::sum),
            Subtract(_, l, r) => self.binary(console, l, r, Operation::subtract),
            Equal(_, l, r) => self.binary(console, l, r, Operation::equal),
            NotEqual(_, l, r) => self.binary(console, l, r, Operation::not_equal),
            Less(_, l, r) => self.binary(console, l, r, Operation::less),
            LessEqual(_, l, r) => self.binary(console, l, r, Operation::less_equal),
            Greater(_, l, r) => self.binary(console, l, r, Operation::greater),
            GreaterEqual(_, l, r) => self.binary(console, l, r, Operation::greater_equal),
            And(_, l, r) => self.binary(console, l, r, Operation::and),
            Or(_, l, r) => self.binary(console, l, r, Operation::or),
        }
    }

    fn binary(
        &mut self,
        console: &mut dyn Console,
        lhs: &Expression,
        rhs: &Expression,
        op: fn(Val, Val) -> Result<Val>,
    ) -> Result<Val> {
        let lhs = self.expression(console, lhs)?;
        let rhs = self.expression(console, rhs)?;
        op(lhs, rhs)
    }

    fn function(
        &mut self,
        console: &mut dyn Console,
        func: Builtin,
        args: &[Expression],
    ) -> Result<Val> {
        let mut vals: VecDeque<Val> = VecDeque::new();
        for arg in args {
            vals.push_back(self.expression(console, arg)?);
        }
        let mut arg = || match vals.pop_front() {
            Some(val) => Ok(val),
            None => Err(error!(IllegalFunctionCall)),
        };
        match func {
            Builtin::Abs => Function::abs(arg()?),
            Builtin::Asc => Function::asc(arg()?),
            Builtin::Chr => Function::chr(arg()?),
            Builtin::Inkey => Ok(Val::from(console.get_key())),
            Builtin::Int => Function::int(arg()?),
            Builtin::Left => Function::left(arg()?, arg()?),
            Builtin::Len => Function::len(arg()?),
            Builtin::Mid => {
                let (s, start) = (arg()?, arg()?);
                Function::mid(s, start, arg().ok())
            }
            Builtin::Right => Function::right(arg()?, arg()?),
            Builtin::Rnd => Function::rnd(&mut self.rng, arg()?),
            Builtin::Sqr => Function::sqr(arg()?),
            Builtin::Str => Function::str(arg()?),
            Builtin::Tab => {
                let col = match arg()? {
                    val @ Val::Integer(_) | val @ Val::Real(_) => i32::try_from(val)?,
                    _ => return Err(error!(TypeMismatch)),
                };
                let col = usize::try_from(col).map_err(|_| error!(IllegalFunctionCall))?;
                let (_, row) = console.cursor_pos();
                console.set_cursor_pos(col, row);
                Ok(Val::from(""))
            }
            Builtin::Val => Function::val(arg()?),
        }
    }
}

fn numeric(val: Val) -> Result<Val> {
    match val {
        Val::Integer(_) | Val::Real(_) => Ok(val),
        _ => Err(error!(TypeMismatch)),
    }
}

fn data_value(expr: &Expression) -> Option<Val> {
    match expr {
        Expression::Integer(_, n) => Some(Val::Integer(*n)),
        Expression::Real(_, n) => Some(Val::from(*n)),
        Expression::String(_, s) => Some(Val::String(Rc::clone(s))),
        Expression::Negation(_, expr) => data_value(expr).and_then(|v| Operation::negate(v).ok()),
        _ => None,
    }
}

fn input_variables(statement: &Statement) -> Option<&Vec<Variable>> {
    match statement {
        Statement::Input(_, _, vars) => Some(vars),
        Statement::If(_, _, then) => input_variables(then),
        Statement::Else(_, branch) => input_variables(branch),
        _ => None,
    }
}

fn list_dir(dir: &str) -> Result<Vec<String>> {
    let mut names: Vec<String> = vec![];
    for entry in std::fs::read_dir(dir).map_err(super::listing::io_error)? {
        let entry = entry.map_err(super::listing::io_error)?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}
