//! Built-in command dispatch.
//!
//! A fixed table from protocol command to reaction. Each arm is
//! independent: adding a reaction for a new command means adding an
//! arm, nothing else. Unknown commands are ignored.

use tracing::{debug, trace};

use crate::conn::Context;
use crate::error::Result;
use crate::event::Event;
use crate::hooks::HookRegistry;
use crate::message::Line;
use crate::source::Source;

/// What dispatch decided about the connection's fate.
pub(crate) enum Outcome {
    /// Line handled; keep the connection running.
    Continue,
    /// The server issued `ERROR`; the link is done.
    ServerClosed(String),
}

pub(crate) fn dispatch(
    line: &Line<'_>,
    hooks: &mut HookRegistry,
    ctx: &mut Context<'_>,
) -> Result<Outcome> {
    match line.command {
        "PING" => {
            let query = line.params.first().copied().unwrap_or("");
            ctx.send(&format!("PONG :{query}"))?;
        }
        "001" => hooks.invoke(ctx, &Event::Connect),
        "PRIVMSG" => {
            if let Some((from, target, text)) = actor_target_text(line) {
                hooks.invoke(ctx, &Event::Chat { from, target, text });
            }
        }
        "NOTICE" => {
            if let Some((from, target, text)) = actor_target_text(line) {
                hooks.invoke(ctx, &Event::Notice { from, target, text });
            }
        }
        "JOIN" => {
            if let Some((from, channel)) = actor_channel(line) {
                hooks.invoke(ctx, &Event::Join { from, channel });
            }
        }
        "PART" => {
            if let Some((from, channel)) = actor_channel(line) {
                let reason = line.params.get(1).map(|r| r.to_string());
                hooks.invoke(
                    ctx,
                    &Event::Part {
                        from,
                        channel,
                        reason,
                    },
                );
            }
        }
        "ERROR" => {
            let message = line.params.first().copied().unwrap_or("").to_string();
            hooks.invoke(
                ctx,
                &Event::Disconnect {
                    message: message.clone(),
                    forced: true,
                },
            );
            return Ok(Outcome::ServerClosed(message));
        }
        other => trace!(command = other, "ignoring unhandled command"),
    }
    Ok(Outcome::Continue)
}

/// Actor plus (target, text) for PRIVMSG/NOTICE. Lines missing the
/// prefix or parameters are dropped with a log line.
fn actor_target_text(line: &Line<'_>) -> Option<(Source, String, String)> {
    let (Some(prefix), Some(target), Some(text)) =
        (line.source, line.params.first(), line.params.get(1))
    else {
        debug!(command = line.command, "dropping malformed line");
        return None;
    };
    Some((Source::parse(prefix), target.to_string(), text.to_string()))
}

/// Actor plus channel for JOIN/PART.
fn actor_channel(line: &Line<'_>) -> Option<(Source, String)> {
    let (Some(prefix), Some(channel)) = (line.source, line.params.first()) else {
        debug!(command = line.command, "dropping malformed line");
        return None;
    };
    Some((Source::parse(prefix), channel.to_string()))
}
