//! The per-connection state machine.
//!
//! A connection moves `Restricted` → `Full` → `Inert` and never back.
//! Every privileged operation starts with an explicit status guard; the
//! guard, not method visibility, is what enforces capability gating.

use std::fmt;

use tracing::{debug, trace};

use crate::dispatch::{self, Outcome};
use crate::error::{ClientError, Result};
use crate::event::{Event, EventKind};
use crate::hooks::HookRegistry;
use crate::message::Line;
use crate::transport::Transport;

/// Default IRC port.
pub const DEFAULT_PORT: u16 = 6667;

const DEFAULT_USERNAME: &str = "coirc";
const DEFAULT_REALNAME: &str = "coirc user";
const DEFAULT_QUIT: &str = "Bye!";

/// Identity configuration for one connection, fixed at creation.
#[derive(Debug, Clone)]
pub struct Config {
    nick: String,
    username: String,
    realname: String,
}

impl Config {
    /// A config with the given nick and placeholder username/realname.
    pub fn new(nick: impl Into<String>) -> Self {
        Self {
            nick: nick.into(),
            username: DEFAULT_USERNAME.to_string(),
            realname: DEFAULT_REALNAME.to_string(),
        }
    }

    /// Override the username (ident).
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Override the realname (GECOS).
    pub fn realname(mut self, realname: impl Into<String>) -> Self {
        self.realname = realname.into();
        self
    }
}

/// Capability mode of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Constructed but not network-attached. Only `hook`, `unhook`,
    /// and `connect` are callable.
    Restricted,
    /// Connected and registered; the full operation set is callable.
    Full,
    /// Shut down. Terminal; every operation fails.
    Inert,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Restricted => "restricted",
            Status::Full => "full",
            Status::Inert => "inert",
        })
    }
}

/// Outcome of one cooperative step, reported to the scheduler.
pub(crate) enum Step {
    /// No complete line available; wait for the next tick.
    Idle,
    /// One line was read and dispatched.
    Processed,
    /// The connection died this step. It has already shut down.
    Fault(ClientError),
}

/// One logical IRC session: an exclusively owned socket, a hook
/// registry, and a capability mode.
pub struct Connection {
    config: Config,
    status: Status,
    transport: Option<Transport>,
    hooks: HookRegistry,
}

impl Connection {
    /// Create a connection in `Restricted` mode.
    ///
    /// Fails with [`ClientError::MissingNick`] when the nick is empty.
    pub fn new(config: Config) -> Result<Self> {
        if config.nick.trim().is_empty() {
            return Err(ClientError::MissingNick);
        }
        Ok(Self {
            config,
            status: Status::Restricted,
            transport: None,
            hooks: HookRegistry::new(),
        })
    }

    /// The configured nick.
    pub fn nick(&self) -> &str {
        &self.config.nick
    }

    /// Current capability mode.
    pub fn status(&self) -> Status {
        self.status
    }

    pub(crate) fn is_full(&self) -> bool {
        self.status == Status::Full
    }

    /// Register `callback` under `id` for `kind`, silently overwriting
    /// any callback already at that (event, id) pair.
    ///
    /// Callable while `Restricted` or `Full`.
    pub fn hook<F>(&mut self, kind: EventKind, id: impl Into<String>, callback: F) -> Result<()>
    where
        F: FnMut(&mut Context<'_>, &Event) + 'static,
    {
        self.require_live("hook")?;
        self.hooks.insert(kind, id, Box::new(callback));
        Ok(())
    }

    /// Remove the callback at (kind, id). Fails with
    /// [`ClientError::HookNotFound`] if absent.
    pub fn unhook(&mut self, kind: EventKind, id: &str) -> Result<()> {
        self.require_live("unhook")?;
        self.hooks.remove(kind, id)
    }

    /// Open the transport and perform registration.
    ///
    /// On failure the error is recoverable: the connection stays
    /// `Restricted` and the caller may retry. On success the
    /// registration sequence (`USER`, then `NICK`) has been sent, the
    /// socket is non-blocking, and the connection is `Full`.
    pub fn connect(&mut self, host: &str, port: u16) -> Result<()> {
        if self.status != Status::Restricted {
            return Err(self.denied("connect"));
        }

        let mut transport = Transport::connect(host, port).map_err(ClientError::Connect)?;
        transport
            .send_line(&format!(
                "USER {} 0 * :{}",
                self.config.username, self.config.realname
            ))
            .map_err(ClientError::Connect)?;
        transport
            .send_line(&format!("NICK {}", self.config.nick))
            .map_err(ClientError::Connect)?;
        transport.set_nonblocking().map_err(ClientError::Connect)?;

        debug!(host, port, nick = %self.config.nick, "connected");
        self.transport = Some(transport);
        self.status = Status::Full;
        Ok(())
    }

    /// Send one raw line. The caller supplies the full command text;
    /// the `\r\n` framing is appended here.
    pub fn send(&mut self, line: &str) -> Result<()> {
        self.transport_mut("send")?
            .send_line(line)
            .map_err(ClientError::Transport)
    }

    /// Send a `PRIVMSG` to a channel or nick.
    pub fn send_chat(&mut self, target: &str, text: &str) -> Result<()> {
        self.transport_mut("send_chat")?
            .send_line(&format!("PRIVMSG {target} :{text}"))
            .map_err(ClientError::Transport)
    }

    /// Join a channel.
    pub fn join(&mut self, channel: &str) -> Result<()> {
        self.transport_mut("join")?
            .send_line(&format!("JOIN {channel}"))
            .map_err(ClientError::Transport)
    }

    /// Leave a channel.
    pub fn part(&mut self, channel: &str) -> Result<()> {
        self.transport_mut("part")?
            .send_line(&format!("PART {channel}"))
            .map_err(ClientError::Transport)
    }

    /// Voluntarily close the connection: invoke `OnDisconnect` with
    /// `forced = false`, send `QUIT`, then shut down.
    pub fn disconnect(&mut self, message: Option<&str>) -> Result<()> {
        self.require(Status::Full, "disconnect")?;
        let message = message.unwrap_or(DEFAULT_QUIT);

        self.raise(&Event::Disconnect {
            message: message.to_string(),
            forced: false,
        });

        // Best effort: the peer may already be gone.
        if let Err(err) = self.send(&format!("QUIT :{message}")) {
            debug!(%err, "QUIT not delivered");
        }
        self.close();
        Ok(())
    }

    /// Release the transport and go `Inert`. Terminal.
    pub fn shutdown(&mut self) -> Result<()> {
        self.require(Status::Full, "shutdown")?;
        self.close();
        Ok(())
    }

    /// One resume of the cooperative unit: at most one read attempt,
    /// at most one line parsed and dispatched.
    pub(crate) fn step(&mut self) -> Step {
        let Some(transport) = self.transport.as_mut() else {
            return Step::Idle;
        };

        match transport.poll_line() {
            Ok(None) => Step::Idle,
            Ok(Some(raw)) => {
                trace!(line = %raw, "received");
                let line = match Line::parse(&raw) {
                    Ok(line) => line,
                    Err(err) => {
                        debug!(%err, line = %raw, "skipping malformed line");
                        return Step::Processed;
                    }
                };
                let mut ctx = Context {
                    transport,
                    nick: &self.config.nick,
                };
                match dispatch::dispatch(&line, &mut self.hooks, &mut ctx) {
                    Ok(Outcome::Continue) => Step::Processed,
                    Ok(Outcome::ServerClosed(message)) => {
                        self.close();
                        Step::Fault(ClientError::ServerClosed(message))
                    }
                    Err(err) => {
                        self.close();
                        Step::Fault(err)
                    }
                }
            }
            Err(err) => {
                self.close();
                Step::Fault(ClientError::Transport(err))
            }
        }
    }

    /// Invoke hooks for `event` on this connection's own registry,
    /// with a context bound to this connection.
    pub(crate) fn raise(&mut self, event: &Event) {
        if let Some(transport) = self.transport.as_mut() {
            let mut ctx = Context {
                transport,
                nick: &self.config.nick,
            };
            self.hooks.invoke(&mut ctx, event);
        }
    }

    fn close(&mut self) {
        self.transport = None;
        self.status = Status::Inert;
    }

    fn denied(&self, op: &'static str) -> ClientError {
        ClientError::AccessDenied {
            op,
            status: self.status,
        }
    }

    fn require(&self, wanted: Status, op: &'static str) -> Result<()> {
        if self.status == wanted {
            Ok(())
        } else {
            Err(self.denied(op))
        }
    }

    /// Anything but `Inert`.
    fn require_live(&self, op: &'static str) -> Result<()> {
        if self.status == Status::Inert {
            Err(self.denied(op))
        } else {
            Ok(())
        }
    }

    fn transport_mut(&mut self, op: &'static str) -> Result<&mut Transport> {
        match (self.status, self.transport.as_mut()) {
            (Status::Full, Some(transport)) => Ok(transport),
            (status, _) => Err(ClientError::AccessDenied { op, status }),
        }
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("nick", &self.config.nick)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Handle given to hook callbacks, bound to the dispatching
/// connection. Lets a hook reply without owning the connection.
pub struct Context<'a> {
    transport: &'a mut Transport,
    nick: &'a str,
}

impl Context<'_> {
    /// The connection's nick.
    pub fn nick(&self) -> &str {
        self.nick
    }

    /// Send one raw line.
    pub fn send(&mut self, line: &str) -> Result<()> {
        self.transport.send_line(line).map_err(ClientError::Transport)
    }

    /// Send a `PRIVMSG` to a channel or nick.
    pub fn send_chat(&mut self, target: &str, text: &str) -> Result<()> {
        self.send(&format!("PRIVMSG {target} :{text}"))
    }

    /// Join a channel.
    pub fn join(&mut self, channel: &str) -> Result<()> {
        self.send(&format!("JOIN {channel}"))
    }

    /// Leave a channel.
    pub fn part(&mut self, channel: &str) -> Result<()> {
        self.send(&format!("PART {channel}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_nick_rejected() {
        assert!(matches!(
            Connection::new(Config::new("")),
            Err(ClientError::MissingNick)
        ));
        assert!(matches!(
            Connection::new(Config::new("  ")),
            Err(ClientError::MissingNick)
        ));
    }

    #[test]
    fn test_fresh_connection_is_restricted() {
        let conn = Connection::new(Config::new("tester")).unwrap();
        assert_eq!(conn.status(), Status::Restricted);
        assert_eq!(conn.nick(), "tester");
    }

    #[test]
    fn test_restricted_denies_privileged_ops() {
        let mut conn = Connection::new(Config::new("tester")).unwrap();
        for result in [
            conn.send("WHOIS tester"),
            conn.send_chat("#chan", "hi"),
            conn.join("#chan"),
            conn.part("#chan"),
            conn.disconnect(None),
            conn.shutdown(),
        ] {
            assert!(matches!(
                result,
                Err(ClientError::AccessDenied {
                    status: Status::Restricted,
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_restricted_allows_hooks() {
        let mut conn = Connection::new(Config::new("tester")).unwrap();
        conn.hook(EventKind::Chat, "a", |_, _| {}).unwrap();
        conn.unhook(EventKind::Chat, "a").unwrap();
        assert!(matches!(
            conn.unhook(EventKind::Chat, "a"),
            Err(ClientError::HookNotFound { .. })
        ));
    }

    #[test]
    fn test_config_builder_defaults() {
        let config = Config::new("n");
        assert_eq!(config.username, DEFAULT_USERNAME);
        assert_eq!(config.realname, DEFAULT_REALNAME);

        let config = Config::new("n").username("ident").realname("Real Name");
        assert_eq!(config.username, "ident");
        assert_eq!(config.realname, "Real Name");
    }
}
