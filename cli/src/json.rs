use std::io::{BufRead, Write};

use anyhow::Context;
use minefield_core::{MinePlacer, Session};
use minefield_protocol::{ServerMessage, decode_line, encode_line, handle};

/// Serves one session over JSON lines until stdin closes.
///
/// Time only advances on `tick` messages; the client owns the one-second cadence.
pub(crate) fn run<P: MinePlacer>(
    mut session: Session<P>,
    input: impl BufRead,
    mut output: impl Write,
) -> anyhow::Result<()> {
    send(&mut output, &ServerMessage::from_snapshot(&session.snapshot()))?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }

        match decode_line(&line) {
            Ok(message) => {
                log::debug!("received {:?}", message);
                for reply in handle(&mut session, message) {
                    send(&mut output, &reply)?;
                }
            }
            Err(err) => {
                log::warn!("Rejected input line: {}", err);
                send(&mut output, &ServerMessage::error(err.to_string()))?;
            }
        }
    }

    Ok(())
}

fn send(output: &mut impl Write, message: &ServerMessage) -> anyhow::Result<()> {
    let line = encode_line(message).context("Failed to encode message")?;
    writeln!(output, "{line}")?;
    output.flush()?;
    Ok(())
}
