//! Validated-choice prompts
//!
//! The retry loop is an explicit state machine (prompting, validating,
//! accepted) so the cycle is visible in the control flow rather than buried
//! in ad-hoc `continue`s. There is no retry limit; end of input ends the
//! session instead of spinning.

use std::io::{self, BufRead, Write};

use crate::error::AppError;

enum PromptState<T> {
    Prompting,
    Validating(String),
    Accepted(T),
}

/// Ask `question` until `parse` accepts an answer. Returns `None` on end of
/// input; invalid answers print the validation error and re-prompt.
pub(crate) fn prompt_choice<R, W, T>(
    input: &mut R,
    output: &mut W,
    question: &str,
    parse: impl Fn(&str) -> Result<T, AppError>,
) -> io::Result<Option<T>>
where
    R: BufRead,
    W: Write,
{
    let mut state = PromptState::Prompting;
    loop {
        state = match state {
            PromptState::Prompting => {
                writeln!(output, "\n{question}")?;
                output.flush()?;
                let mut line = String::new();
                if input.read_line(&mut line)? == 0 {
                    return Ok(None);
                }
                PromptState::Validating(line.trim().to_string())
            }
            PromptState::Validating(line) => match parse(&line) {
                Ok(value) => PromptState::Accepted(value),
                Err(e) => {
                    writeln!(output, "{e}")?;
                    PromptState::Prompting
                }
            },
            PromptState::Accepted(value) => return Ok(Some(value)),
        };
    }
}

/// y/n confirmation; `y`/`yes` is yes, anything else (including end of
/// input) is no.
pub(crate) fn confirm<R, W>(input: &mut R, output: &mut W, question: &str) -> io::Result<bool>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "\n{question}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(false);
    }
    let answer = line.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::MonthFilter;
    use std::io::Cursor;

    fn ask_month(script: &str) -> (io::Result<Option<MonthFilter>>, String) {
        let mut input = Cursor::new(script.to_string());
        let mut output = Vec::new();
        let result = prompt_choice(&mut input, &mut output, "Which month?", MonthFilter::parse);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn accepts_first_valid_answer() {
        let (result, transcript) = ask_month("march\n");
        assert_eq!(result.unwrap(), Some(MonthFilter::In(3)));
        assert!(transcript.contains("Which month?"));
    }

    #[test]
    fn reprompts_until_valid() {
        let (result, transcript) = ask_month("july\nwhenever\nall\n");
        assert_eq!(result.unwrap(), Some(MonthFilter::All));
        assert_eq!(transcript.matches("Which month?").count(), 3);
        assert!(transcript.contains("\"july\" is not one of"));
    }

    #[test]
    fn end_of_input_ends_the_prompt() {
        let (result, _) = ask_month("nonsense\n");
        assert_eq!(result.unwrap(), None);
        let (result, _) = ask_month("");
        assert_eq!(result.unwrap(), None);
    }

    #[test]
    fn confirm_accepts_y_and_yes() {
        for (script, expected) in [
            ("y\n", true),
            ("Y\n", true),
            ("yes\n", true),
            ("n\n", false),
            ("anything\n", false),
            ("", false),
        ] {
            let mut input = Cursor::new(script.to_string());
            let mut output = Vec::new();
            let got = confirm(&mut input, &mut output, "Continue? (y/n):").unwrap();
            assert_eq!(got, expected, "script {script:?}");
        }
    }
}
