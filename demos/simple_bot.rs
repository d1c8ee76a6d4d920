//! Minimal echo bot.
//!
//! Connects to Libera, joins a channel once registered, and echoes
//! anything said with `!echo`. Run with:
//!
//! ```text
//! cargo run --example simple_bot
//! ```

use std::time::Duration;

use coirc::{Config, Connection, Event, EventKind, Scheduler, TextFormatExt, DEFAULT_PORT};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coirc=debug".into()),
        )
        .init();

    let mut conn = Connection::new(Config::new("coirc-demo").realname("coirc demo bot"))?;

    conn.hook(EventKind::Connect, "autojoin", |ctx, _| {
        let _ = ctx.join("#coirc-demo");
    })?;

    conn.hook(EventKind::Chat, "echo", |ctx, ev| {
        if let Event::Chat { from, target, text } = ev {
            if let Some(rest) = text.strip_prefix("!echo ") {
                println!("{from} asked for an echo in {target}");
                let _ = ctx.send_chat(target, &rest.bold());
            }
        }
    })?;

    conn.hook(EventKind::Disconnect, "bye", |_ctx, ev| {
        if let Event::Disconnect { message, forced } = ev {
            println!("disconnected ({}): {message}", if *forced { "forced" } else { "voluntary" });
        }
    })?;

    let mut sched = Scheduler::new();
    sched
        .connect(conn, "irc.libera.chat", DEFAULT_PORT)
        .map_err(|failed| failed.error)?;

    while sched.tick().keep_going() {
        std::thread::sleep(Duration::from_millis(50));
    }

    Ok(())
}
