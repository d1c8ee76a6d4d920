//! # coirc
//!
//! A cooperative, single-threaded IRC client library: one or more
//! connections are advanced by an explicit scheduler that the host
//! program drives, with non-blocking reads and an extensible hook
//! registry for reacting to protocol events.
//!
//! ## Features
//!
//! - IRC line parsing into prefix, command, and ordered parameters
//! - A capability-gated connection state machine (restricted → full → inert)
//! - A round-robin scheduler that resumes every connection once per tick
//! - Built-in reactions for `PING`, `001`, `PRIVMSG`, `NOTICE`, `JOIN`,
//!   `PART`, and `ERROR`
//! - User hooks keyed by event and caller-supplied id
//! - mIRC-style text decoration helpers
//!
//! ## Quick Start
//!
//! ### Parsing protocol lines
//!
//! ```rust
//! use coirc::Line;
//!
//! let line = Line::parse(":nick!user@host PRIVMSG #chan :hello world").unwrap();
//! assert_eq!(line.command, "PRIVMSG");
//! assert_eq!(line.params, vec!["#chan", "hello world"]);
//! ```
//!
//! ### Running a client
//!
//! ```rust,no_run
//! use coirc::{Config, Connection, Event, EventKind, Scheduler, DEFAULT_PORT};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut conn = Connection::new(Config::new("mybot"))?;
//! conn.hook(EventKind::Connect, "autojoin", |ctx, _| {
//!     let _ = ctx.join("#rust");
//! })?;
//! conn.hook(EventKind::Chat, "log", |_ctx, ev| {
//!     if let Event::Chat { from, target, text } = ev {
//!         println!("{from} -> {target}: {text}");
//!     }
//! })?;
//!
//! let mut sched = Scheduler::new();
//! sched.connect(conn, "irc.libera.chat", DEFAULT_PORT).map_err(|f| f.error)?;
//! while sched.tick().keep_going() {
//!     std::thread::sleep(std::time::Duration::from_millis(50));
//! }
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod conn;
mod dispatch;
pub mod error;
pub mod event;
pub mod hooks;
pub mod message;
pub mod sched;
pub mod source;
pub mod text;
mod transport;

pub use self::conn::{Config, Connection, Context, Status, DEFAULT_PORT};
pub use self::error::{ClientError, ParseError, Result};
pub use self::event::{Event, EventKind};
pub use self::message::Line;
pub use self::sched::{ConnId, ConnectFailed, Scheduler, TickReport};
pub use self::source::Source;
pub use self::text::TextFormatExt;
pub use self::transport::MAX_LINE_LEN;
