//! Interactive chat over stdin, one turn per line.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::commands::render::render_turn;
use crate::services::chat::{ChatSession, TurnOutcome};
use crate::utils::error::AppResult;

/// Typed on its own line to end the conversation
pub const QUIT_COMMAND: &str = "/quit";

/// Run the chat loop until `/quit` or end of input.
pub async fn chat_loop<R, W>(session: &ChatSession, input: R, out: &mut W) -> AppResult<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    for turn in session.transcript() {
        writeln!(out, "{}", render_turn(&turn))?;
    }

    let mut lines = input.lines();
    loop {
        write!(out, "you> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };
        if line.trim() == QUIT_COMMAND {
            break;
        }

        match session.submit_turn(&line).await {
            TurnOutcome::Ignored => {}
            TurnOutcome::Busy => {
                writeln!(out, "(the assistant is still replying, please wait)")?;
            }
            TurnOutcome::Replied | TurnOutcome::Degraded => {
                if let Some(turn) = session.last_turn() {
                    writeln!(out, "{}", render_turn(&turn))?;
                }
            }
        }
    }

    tracing::debug!(turns = session.turn_count(), "chat session ended");
    Ok(())
}
