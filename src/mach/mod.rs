/*!
## Rust Machine Module

This Rust module executes BASIC programs by walking the parsed statements.

*/

mod console;
mod file;
mod format;
mod function;
mod listing;
mod operation;
mod runtime;
mod screen;
mod stack;
mod val;
mod var;

pub use console::{Append, Console, Cursor, Status, TAB_WIDTH};
pub use file::Files;
pub use format::Picture;
pub use function::Function;
pub use listing::Listing;
pub use operation::Operation;
pub use runtime::Event;
pub use runtime::Runtime;
pub use screen::Screen;
pub use stack::Stack;
pub use val::Val;
pub use var::Var;
