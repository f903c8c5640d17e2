//! Process file parsing.
//!
//! One process per line: `pid arrival burst priority`, whitespace separated. Blank lines and
//! lines starting with `#` are skipped. Uniqueness of pids and positive bursts are checked by the
//! scheduler core, not here.

use crate::scheduler::{Process, Tick};
use std::{error::Error, fmt, fs, io, path::Path};

#[derive(Debug)]
pub enum InputError {
    Io(io::Error),
    FieldCount { line: usize, text: String },
    InvalidNumber { line: usize, field: &'static str, value: String },
    NegativeArrival { line: usize, value: String },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Io(err) => write!(f, "failed to read process file: {err}"),
            InputError::FieldCount { line, text } => write!(
                f,
                "line {line}: expected `pid arrival burst priority`, got `{text}`"
            ),
            InputError::InvalidNumber { line, field, value } => {
                write!(f, "line {line}: {field} `{value}` is not an integer")
            }
            InputError::NegativeArrival { line, value } => {
                write!(f, "line {line}: arrival `{value}` is negative")
            }
        }
    }
}

impl Error for InputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            InputError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for InputError {
    fn from(err: io::Error) -> Self {
        InputError::Io(err)
    }
}

pub fn parse_processes(path: impl AsRef<Path>) -> Result<Vec<Process>, InputError> {
    parse_str(&fs::read_to_string(path)?)
}

pub fn parse_str(text: &str) -> Result<Vec<Process>, InputError> {
    let mut processes = Vec::new();

    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let number = number + 1;

        let fields: Vec<&str> = line.split_whitespace().collect();
        let &[pid, arrival, burst, priority] = fields.as_slice() else {
            return Err(InputError::FieldCount {
                line: number,
                text: line.to_owned(),
            });
        };

        let arrival_value: i64 = parse_field(number, "arrival", arrival)?;
        let arrival = Tick::try_from(arrival_value).map_err(|_| InputError::NegativeArrival {
            line: number,
            value: arrival.to_owned(),
        })?;
        // A negative burst is reported by the core as an invalid burst
        let burst = parse_field::<i64>(number, "burst", burst)?.max(0) as Tick;
        let priority = parse_field(number, "priority", priority)?;

        processes.push(Process::with_priority(
            processes.len(),
            pid,
            arrival,
            burst,
            priority,
        ));
    }

    Ok(processes)
}

fn parse_field<T: std::str::FromStr>(
    line: usize,
    field: &'static str,
    value: &str,
) -> Result<T, InputError> {
    value.parse().map_err(|_| InputError::InvalidNumber {
        line,
        field,
        value: value.to_owned(),
    })
}
