//! # KBASIC
//!
//! A line-numbered BASIC interpreter in the style of the 8-bit home
//! computers. Programs are typed or loaded line by line, stored by line
//! number, and run one slice at a time so the host stays responsive.
//!
//! ```
//! use kbasic::mach::{Event, Runtime, Screen};
//!
//! let mut runtime = Runtime::default();
//! let mut screen = Screen::default();
//! runtime.enter("10 FOR I = 1 TO 3: PRINT I: NEXT");
//! runtime.enter("RUN");
//! while let Event::Running = runtime.execute(&mut screen, 5000) {}
//! assert_eq!(screen.text(), "1\n2\n3\n");
//! ```

pub mod lang;
pub mod mach;
pub mod term;
