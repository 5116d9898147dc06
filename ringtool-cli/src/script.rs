//! Line-oriented operation scripts.
//!
//! One operation per line; `#` starts a comment. Bytes are decimal or
//! `0x`-prefixed hex, modes are names (`idle`, `run`, `diag`) or raw numbers
//! so that invalid encodings can be exercised.
//!
//! ```text
//! init
//! mode run
//! push 1 2 0x03
//! process 2
//! pop
//! status
//! ```

use ringtool_types::Mode;
use std::str::SplitWhitespace;

/// A single operation to drive against the tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// `init`
    Init,
    /// `deinit`
    DeInit,
    /// `mode <name|number>`
    SetMode(u32),
    /// `push <byte>...` (one op per byte)
    Push(u8),
    /// `pop`
    Pop,
    /// `pop-null`: pop without an output target.
    PopNull,
    /// `clear`
    Clear,
    /// `process [ticks]`; `None` defers to the configured tick count.
    Process(Option<u32>),
    /// `selftest`
    SelfTest,
    /// `status`
    Status,
    /// `crc <text>`: CRC of the rest of the line.
    Crc(String),
}

/// An operation together with the script line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// 1-based line number.
    pub line: usize,
    /// The operation.
    pub op: Op,
}

/// Script parse errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    /// Unknown operation keyword.
    #[error("line {line}: unknown operation '{op}'")]
    UnknownOp {
        /// Line number.
        line: usize,
        /// The keyword found.
        op: String,
    },
    /// Operation is missing a required argument.
    #[error("line {line}: '{op}' requires an argument")]
    MissingArgument {
        /// Line number.
        line: usize,
        /// The operation keyword.
        op: &'static str,
    },
    /// Argument could not be parsed.
    #[error("line {line}: invalid argument '{arg}'")]
    InvalidArgument {
        /// Line number.
        line: usize,
        /// The offending argument.
        arg: String,
    },
    /// Operation takes no arguments but some were given.
    #[error("line {line}: unexpected argument '{arg}'")]
    UnexpectedArgument {
        /// Line number.
        line: usize,
        /// The first extra argument.
        arg: String,
    },
}

/// Parse a whole script.
pub fn parse(source: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        let text = match raw.split_once('#') {
            Some((code, _)) => code,
            None => raw,
        }
        .trim();
        if text.is_empty() {
            continue;
        }
        for op in parse_line(line, text)? {
            steps.push(Step { line, op });
        }
    }
    Ok(steps)
}

fn parse_line(line: usize, text: &str) -> Result<Vec<Op>, ScriptError> {
    let (keyword, rest) = match text.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (text, ""),
    };
    let mut args = rest.split_whitespace();

    match keyword.to_ascii_lowercase().as_str() {
        "init" => only(line, Op::Init, args),
        "deinit" => only(line, Op::DeInit, args),
        "pop" => only(line, Op::Pop, args),
        "pop-null" => only(line, Op::PopNull, args),
        "clear" => only(line, Op::Clear, args),
        "selftest" => only(line, Op::SelfTest, args),
        "status" => only(line, Op::Status, args),
        "mode" => {
            let arg = args.next().ok_or(ScriptError::MissingArgument { line, op: "mode" })?;
            let raw = parse_mode(arg).ok_or_else(|| invalid(line, arg))?;
            only(line, Op::SetMode(raw), args)
        }
        "push" => {
            let bytes = args
                .map(|arg| parse_byte(arg).ok_or_else(|| invalid(line, arg)))
                .collect::<Result<Vec<_>, _>>()?;
            if bytes.is_empty() {
                return Err(ScriptError::MissingArgument { line, op: "push" });
            }
            Ok(bytes.into_iter().map(Op::Push).collect())
        }
        "process" => match args.next() {
            Some(arg) => {
                let ticks = arg.parse::<u32>().map_err(|_| invalid(line, arg))?;
                only(line, Op::Process(Some(ticks)), args)
            }
            None => Ok(vec![Op::Process(None)]),
        },
        "crc" => {
            if rest.is_empty() {
                return Err(ScriptError::MissingArgument { line, op: "crc" });
            }
            Ok(vec![Op::Crc(rest.to_string())])
        }
        _ => Err(ScriptError::UnknownOp {
            line,
            op: keyword.to_string(),
        }),
    }
}

/// Accept `op` only if no arguments remain.
fn only(line: usize, op: Op, mut args: SplitWhitespace<'_>) -> Result<Vec<Op>, ScriptError> {
    match args.next() {
        Some(arg) => Err(ScriptError::UnexpectedArgument {
            line,
            arg: arg.to_string(),
        }),
        None => Ok(vec![op]),
    }
}

fn invalid(line: usize, arg: &str) -> ScriptError {
    ScriptError::InvalidArgument {
        line,
        arg: arg.to_string(),
    }
}

/// Parse a byte literal: decimal or `0x` hex.
pub fn parse_byte(arg: &str) -> Option<u8> {
    match arg.strip_prefix("0x").or_else(|| arg.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16).ok(),
        None => arg.parse().ok(),
    }
}

/// Parse a mode name or raw number. Raw numbers are not range-checked.
pub fn parse_mode(arg: &str) -> Option<u32> {
    arg.parse::<Mode>()
        .map(u32::from)
        .ok()
        .or_else(|| arg.parse::<u32>().ok())
}
