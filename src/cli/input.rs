//! User input utilities for interactive CLI prompts
//!
//! Asks for whatever the command line and config file left out: the number
//! of stations, their names, and the target year. Each prompt repeats until
//! it gets a valid answer. Prompts are generic over the reader and writer so
//! they can be driven from tests.

use crate::constants::{MAX_TARGET_YEAR, MIN_TARGET_YEAR};
use crate::error::{ClimateError, Result};
use std::io::{BufRead, Write};

/// Print `prompt` and read one trimmed line; closed input is an error
fn read_answer<R: BufRead, W: Write>(reader: &mut R, writer: &mut W, prompt: &str) -> Result<String> {
    write!(writer, "{}", prompt)?;
    writer.flush()?;

    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        return Err(ClimateError::configuration(format!(
            "Input closed while waiting for: {}",
            prompt.trim()
        )));
    }

    Ok(input.trim().to_string())
}

/// Ask how many stations to process; accepts positive integers only
pub fn prompt_station_count<R: BufRead, W: Write>(reader: &mut R, writer: &mut W) -> Result<usize> {
    loop {
        let answer = read_answer(reader, writer, "How many stations? ")?;
        match answer.parse::<usize>() {
            Ok(0) => writeln!(writer, "Please enter a positive number of stations.")?,
            Ok(count) => return Ok(count),
            Err(_) => writeln!(
                writer,
                "Invalid input! Please enter a valid integer for the number of stations."
            )?,
        }
    }
}

/// Ask for `count` non-empty station names
pub fn prompt_station_names<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    count: usize,
) -> Result<Vec<String>> {
    writeln!(writer, "\n--- Please name your stations ---")?;

    let mut names = Vec::with_capacity(count);
    for i in 0..count {
        loop {
            let name = read_answer(reader, writer, &format!("Enter name for Station {}: ", i + 1))?;
            if name.is_empty() {
                writeln!(writer, "Station name cannot be empty. Please enter a valid name.")?;
                continue;
            }
            names.push(name);
            break;
        }
    }

    Ok(names)
}

/// Ask for the target year within the accepted range
pub fn prompt_target_year<R: BufRead, W: Write>(reader: &mut R, writer: &mut W) -> Result<i32> {
    loop {
        let answer = read_answer(reader, writer, "Which year data? ")?;
        match answer.parse::<i32>() {
            Ok(year) if (MIN_TARGET_YEAR..=MAX_TARGET_YEAR).contains(&year) => return Ok(year),
            Ok(_) => writeln!(
                writer,
                "Please enter a realistic year (between {} and {}).",
                MIN_TARGET_YEAR, MAX_TARGET_YEAR
            )?,
            Err(_) => writeln!(writer, "Invalid input! Please enter a valid integer for the year.")?,
        }
    }
}
