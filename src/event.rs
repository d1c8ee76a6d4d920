//! Protocol events delivered to user hooks.

use std::fmt;

use crate::source::Source;

/// The set of events a hook can be registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Registration completed (server sent `001`).
    Connect,
    /// `PRIVMSG` received.
    Chat,
    /// `NOTICE` received.
    Notice,
    /// `JOIN` received.
    Join,
    /// `PART` received.
    Part,
    /// The connection is closing, voluntarily or not.
    Disconnect,
}

impl EventKind {
    /// The conventional event name.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Connect => "OnConnect",
            EventKind::Chat => "OnChat",
            EventKind::Notice => "OnNotice",
            EventKind::Join => "OnJoin",
            EventKind::Part => "OnPart",
            EventKind::Disconnect => "OnDisconnect",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One protocol event, carrying its decoded arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Registration completed.
    Connect,
    /// A chat message.
    Chat {
        /// The decoded actor.
        from: Source,
        /// Channel or nick the message was addressed to.
        target: String,
        /// Message body.
        text: String,
    },
    /// A notice.
    Notice {
        /// The decoded actor.
        from: Source,
        /// Channel or nick the notice was addressed to.
        target: String,
        /// Notice body.
        text: String,
    },
    /// Someone joined a channel.
    Join {
        /// The decoded actor.
        from: Source,
        /// The channel joined.
        channel: String,
    },
    /// Someone left a channel.
    Part {
        /// The decoded actor.
        from: Source,
        /// The channel left.
        channel: String,
        /// Part reason, if given.
        reason: Option<String>,
    },
    /// The connection is closing. `forced` is true when the server
    /// terminated the link (`ERROR`), false on a voluntary `disconnect`.
    Disconnect {
        /// Quit message or server error text.
        message: String,
        /// Whether the close was server-initiated.
        forced: bool,
    },
}

impl Event {
    /// The kind this event is dispatched under.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Connect => EventKind::Connect,
            Event::Chat { .. } => EventKind::Chat,
            Event::Notice { .. } => EventKind::Notice,
            Event::Join { .. } => EventKind::Join,
            Event::Part { .. } => EventKind::Part,
            Event::Disconnect { .. } => EventKind::Disconnect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(Event::Connect.kind(), EventKind::Connect);
        let ev = Event::Disconnect {
            message: "Bye!".to_string(),
            forced: false,
        };
        assert_eq!(ev.kind(), EventKind::Disconnect);
        assert_eq!(ev.kind().to_string(), "OnDisconnect");
    }
}
