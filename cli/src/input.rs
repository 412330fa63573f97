use anyhow::{Context, bail};
use minefield_core::{Command, Coord};

pub(crate) const HELP: &str = "commands: r ROW COL (reveal), f ROW COL (flag), n (new game), q (quit)";

#[derive(Debug, PartialEq)]
pub(crate) enum Input {
    Command(Command),
    Help,
    Quit,
    Empty,
}

pub(crate) fn parse(line: &str) -> anyhow::Result<Input> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(Input::Empty);
    };

    let input = match verb {
        "r" | "reveal" => Input::Command(Command::Reveal(coords(&mut words)?)),
        "f" | "flag" => Input::Command(Command::ToggleFlag(coords(&mut words)?)),
        "n" | "new" => Input::Command(Command::NewGame),
        "q" | "quit" => Input::Quit,
        "h" | "help" | "?" => Input::Help,
        other => bail!("Unknown command {other:?}, try h"),
    };

    if let Some(extra) = words.next() {
        bail!("Unexpected argument {extra:?}");
    }
    Ok(input)
}

fn coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> anyhow::Result<(Coord, Coord)> {
    let row = number(words.next(), "row")?;
    let col = number(words.next(), "column")?;
    Ok((row, col))
}

fn number(word: Option<&str>, what: &str) -> anyhow::Result<Coord> {
    let word = word.with_context(|| format!("Missing {what}"))?;
    word.parse()
        .with_context(|| format!("Invalid {what} {word:?}"))
}
