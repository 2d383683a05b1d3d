use regex::Regex;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use super::board::BOARD_SIZE;

pub const INVALID_INPUT_MESSAGE: &str = "Invalid input, please try again.";

/// Failure of the input/output stream itself. Invalid player input is never
/// an error; the ask helpers consume it, print the invalid-input message,
/// and re-prompt.
#[derive(Debug, Error)]
pub enum InteractionError {
    #[error("input stream closed before the game ended")]
    InputClosed,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Prints `prompt` and reads lines until one is exactly "y" or "n".
pub fn ask_yes_no<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> Result<bool, InteractionError> {
    loop {
        write!(out, "{}", prompt)?;
        out.flush()?;
        match read_answer(input)?.as_str() {
            "y" => return Ok(true),
            "n" => return Ok(false),
            _ => writeln!(out, "{}", INVALID_INPUT_MESSAGE)?,
        }
    }
}

/// Prints `prompt` and reads lines until one parses as a board coordinate.
/// The returned value is still 1-based, the way the player typed it.
pub fn ask_coordinate<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> Result<usize, InteractionError> {
    loop {
        write!(out, "{}", prompt)?;
        out.flush()?;
        let answer = read_answer(input)?;
        match parse_coordinate(&answer) {
            Some(coordinate) => return Ok(coordinate),
            None => writeln!(out, "{}", INVALID_INPUT_MESSAGE)?,
        }
    }
}

/// One line of input with the line terminator removed. An exhausted stream
/// reports `InputClosed` instead of handing back "" forever.
fn read_answer<R: BufRead>(input: &mut R) -> Result<String, InteractionError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(InteractionError::InputClosed);
    }
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(line)
}

/// Accepts a base-10 integer (optional sign, nothing else on the line) in
/// [1, BOARD_SIZE]. Unparseable and out-of-range answers are both rejected.
fn parse_coordinate(answer: &str) -> Option<usize> {
    let re = Regex::new(r"^[+-]?\d+$").unwrap();
    if !re.is_match(answer) {
        return None;
    }
    answer
        .parse::<i64>()
        .ok()
        .filter(|&n| n >= 1 && n <= BOARD_SIZE as i64)
        .map(|n| n as usize)
}

#[cfg(test)]
mod interaction_tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn accepts_coordinates_in_range() {
        assert_eq!(parse_coordinate("1"), Some(1));
        assert_eq!(parse_coordinate("8"), Some(8));
        assert_eq!(parse_coordinate("007"), Some(7));
        assert_eq!(parse_coordinate("+5"), Some(5));
    }

    #[test]
    fn rejects_out_of_range_and_junk() {
        for junk in &["0", "9", "-3", "abc", "", " 5", "5 ", "4.5", "1 2", "y"] {
            assert_eq!(parse_coordinate(junk), None, "accepted {:?}", junk);
        }
    }

    #[test]
    fn yes_no_reprompts_until_valid() {
        let mut input = Cursor::new(b"maybe\ny\n".to_vec());
        let mut out = Vec::new();
        let answer = ask_yes_no(&mut input, &mut out, "Continue? (y/n): ").unwrap();
        assert!(answer);
        let transcript = String::from_utf8(out).unwrap();
        assert_eq!(
            transcript,
            "Continue? (y/n): Invalid input, please try again.\nContinue? (y/n): "
        );
    }

    #[test]
    fn coordinate_prompt_rejects_nine_then_junk() {
        let mut input = Cursor::new(b"9\nabc\n3\n".to_vec());
        let mut out = Vec::new();
        let answer = ask_coordinate(&mut input, &mut out, "Please enter a row number: ").unwrap();
        assert_eq!(answer, 3);
        let transcript = String::from_utf8(out).unwrap();
        assert_eq!(
            transcript,
            "Please enter a row number: Invalid input, please try again.\n\
             Please enter a row number: Invalid input, please try again.\n\
             Please enter a row number: "
        );
    }

    #[test]
    fn closed_input_is_an_error() {
        let mut input = Cursor::new(Vec::new());
        let mut out = Vec::new();
        let result = ask_yes_no(&mut input, &mut out, "? ");
        assert!(matches!(result, Err(InteractionError::InputClosed)));
    }

    #[test]
    fn windows_line_endings_are_accepted() {
        let mut input = Cursor::new(b"y\r\n".to_vec());
        let mut out = Vec::new();
        assert!(ask_yes_no(&mut input, &mut out, "? ").unwrap());
    }
}
