#![allow(dead_code)]
use kbasic::mach::{Append, Console, Event, Runtime, Screen};

pub fn screen() -> Screen {
    Screen::new(64, 200)
}

pub fn exec(runtime: &mut Runtime) -> String {
    exec_with(runtime, &[])
}

/// Run to completion, answering each INPUT from `answers` in order.
pub fn exec_with(runtime: &mut Runtime, answers: &[&str]) -> String {
    let mut screen = screen();
    exec_screen(runtime, &mut screen, answers);
    screen.text()
}

pub fn exec_screen(runtime: &mut Runtime, screen: &mut Screen, answers: &[&str]) {
    let mut answers = answers.iter();
    let mut slices = 0;
    loop {
        match runtime.execute(screen, 5000) {
            Event::Stopped => break,
            Event::Errors(errors) => {
                for error in errors.iter() {
                    screen.add_text(&format!("?{}", error), Append::None);
                }
            }
            Event::Running => {
                slices += 1;
                if slices > 100 {
                    screen.add_text("?EXECUTION CYCLES EXCEEDED", Append::None);
                    break;
                }
            }
            Event::Input(prompt) => {
                screen.add_text(&prompt, Append::Append);
                match answers.next() {
                    Some(answer) => {
                        screen.add_text(answer, Append::None);
                        runtime.enter(answer);
                    }
                    None => break,
                }
            }
        }
    }
}

pub fn program(lines: &[&str]) -> Runtime {
    let mut runtime = Runtime::default();
    for line in lines {
        assert!(runtime.enter(line), "rejected {}", line);
    }
    runtime
}

/// A scratch path unique to this test process.
pub fn temp_path(name: &str) -> String {
    let mut path = std::env::temp_dir();
    path.push(format!("kbasic-{}-{}", std::process::id(), name));
    path.to_string_lossy().into_owned()
}
