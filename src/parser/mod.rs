// src/parser/mod.rs
pub mod ast;

use std::ffi::OsString;
use std::iter::Peekable;
use std::os::unix::ffi::OsStringExt;

use ast::Command;

use crate::error::ShellError;
use crate::readline::{Line, Symbol};

/// Split a line into arguments. Spaces separate arguments unless they sit
/// between double quotes; the quotes themselves are dropped. A final
/// argument of exactly `&` marks the command as background and is removed,
/// so `"&"` counts as well once its quotes are gone.
pub fn parse(line: &Line) -> Result<Command, ShellError> {
    let mut args: Vec<OsString> = Vec::new();
    let mut symbols = line.symbols().peekable();

    loop {
        skip_spaces(&mut symbols);
        if matches!(symbols.peek(), Some(Symbol::End) | None) {
            break;
        }

        let arg = read_arg(&mut symbols)?;
        args.try_reserve(1)
            .map_err(|_| ShellError::OutOfMemory("parsing arguments"))?;
        args.push(arg);
    }

    let background = args.last().is_some_and(|a| a == "&");
    if background {
        args.pop();
    }

    log::debug!("parsed {} argument(s), background={}", args.len(), background);
    Ok(Command { args, background })
}

fn skip_spaces<I: Iterator<Item = Symbol>>(symbols: &mut Peekable<I>) {
    while symbols.peek() == Some(&Symbol::Byte(b' ')) {
        symbols.next();
    }
}

fn read_arg<I: Iterator<Item = Symbol>>(symbols: &mut Peekable<I>) -> Result<OsString, ShellError> {
    let mut arg: Vec<u8> = Vec::new();
    let mut in_quotes = false;

    while let Some(&symbol) = symbols.peek() {
        match symbol {
            Symbol::End => break,
            Symbol::Byte(b' ') if !in_quotes => break,
            Symbol::Byte(b'"') => in_quotes = !in_quotes,
            Symbol::Byte(b) => {
                arg.try_reserve(1)
                    .map_err(|_| ShellError::OutOfMemory("parsing arguments"))?;
                arg.push(b);
            }
        }
        symbols.next();
    }

    Ok(OsString::from_vec(arg))
}
