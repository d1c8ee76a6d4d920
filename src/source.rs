//! Actor prefix (message source) decomposition.

use std::fmt;

/// The decoded actor of a protocol line.
///
/// A prefix of the shape `nick!user@host` names a user; anything else
/// names a server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A server name, kept verbatim.
    Server(String),
    /// A user identity.
    User {
        /// Nickname.
        nick: String,
        /// Username (ident).
        user: String,
        /// Hostname.
        host: String,
    },
}

impl Source {
    /// Decompose a raw prefix string.
    pub fn parse(raw: &str) -> Self {
        if let Some((nick, rest)) = raw.split_once('!') {
            if let Some((user, host)) = rest.split_once('@') {
                if !nick.is_empty() && !user.is_empty() && !host.is_empty() {
                    return Source::User {
                        nick: nick.to_string(),
                        user: user.to_string(),
                        host: host.to_string(),
                    };
                }
            }
        }
        Source::Server(raw.to_string())
    }

    /// The nickname, when the source is a user.
    pub fn nick(&self) -> Option<&str> {
        match self {
            Source::User { nick, .. } => Some(nick),
            Source::Server(_) => None,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Server(name) => f.write_str(name),
            Source::User { nick, user, host } => write!(f, "{nick}!{user}@{host}"),
        }
    }
}
