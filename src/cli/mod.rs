mod args;
mod prompt;

pub(crate) use args::Cli;
pub(crate) use prompt::{confirm, prompt_choice};
