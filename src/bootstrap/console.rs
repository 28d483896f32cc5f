use qlstatus::{BroadcastSink, Caller, Invocation, Outbound, Relay, ServersCommand, Sink};
use colored::Colorize;
use std::sync::Arc;
use std::io::BufRead;
use tokio::sync::mpsc;

/// Channel reported for IRC input read from the console
pub const IRC_CHANNEL: &str = "#qlstatus";

const SERVERS_COMMAND: &str = "!servers";

/// One line of console input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub caller: Caller,
    pub text: String,
}

/// Parses `<player>: <text>` or `irc <nick>: <text>`
pub fn parse_line(line: &str, irc_channel: &str) -> Option<Message> {
    let line = line.trim();

    if let Some(rest) = line.strip_prefix("irc ") {
        let (nick, text) = rest.split_once(':')?;
        let nick = nick.trim();
        if nick.is_empty() {
            return None;
        }
        return Some(Message {
            caller: Caller::Irc {
                nick: nick.to_string(),
                channel: irc_channel.to_string(),
            },
            text: text.trim().to_string(),
        });
    }

    let (player, text) = line.split_once(':')?;
    let player = player.trim();
    if player.is_empty() {
        return None;
    }

    Some(Message {
        caller: Caller::Player {
            name: player.to_string(),
        },
        text: text.trim().to_string(),
    })
}

pub fn is_servers_command(text: &str) -> bool {
    text.split_whitespace()
        .next()
        .is_some_and(|word| word.eq_ignore_ascii_case(SERVERS_COMMAND))
}

/// Reads stdin on its own thread. The channel closes at EOF.
///
/// A blocking read cannot be cancelled, so it stays off the runtime's
/// blocking pool; the thread is simply abandoned when the process exits.
pub fn spawn_stdin_reader(capacity: usize) -> std::io::Result<mpsc::Receiver<String>> {
    let (tx, rx) = mpsc::channel(capacity);

    std::thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::error!("Failed to read console input: {}", e);
                        break;
                    }
                }
            }
        })?;

    Ok(rx)
}

/// Handles input lines until the channel closes, dispatching `!servers`
/// without waiting for the reports
pub async fn run(command: &ServersCommand, relay: Relay, mut input: mpsc::Receiver<String>) {
    while let Some(line) = input.recv().await {
        let Some(message) = parse_line(&line, IRC_CHANNEL) else {
            if !line.trim().is_empty() {
                tracing::warn!("Ignoring input, expected `<player>: <text>` or `irc <nick>: <text>`");
            }
            continue;
        };

        if !is_servers_command(&message.text) {
            tracing::debug!("{}: {}", message.caller, message.text);
            continue;
        }

        let origin: Arc<dyn Sink> = match &message.caller {
            Caller::Player { .. } => Arc::new(BroadcastSink::chat(relay.clone())),
            Caller::Irc { channel, .. } => Arc::new(BroadcastSink::irc(relay.clone(), channel.clone())),
        };

        if let Invocation::Rejected(e) = command.invoke(&message.caller, origin).await {
            tracing::debug!("!servers from {} rejected: {}", message.caller, e);
        }
    }
}

/// Prints relayed lines until every sender is gone
pub async fn print_outbound(mut outbound: mpsc::Receiver<Outbound>) {
    while let Some(Outbound { destination, line }) = outbound.recv().await {
        let prefix = format!("[{}]", destination);
        println!("{} {}", prefix.dimmed(), render_colours(line.text()));
    }
}

/// Turns `^N` colour codes into terminal colours
pub fn render_colours(text: &str) -> String {
    let mut rendered = String::with_capacity(text.len());
    let mut segment = String::new();
    let mut code: Option<char> = None;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '^' {
            if let Some(&next) = chars.peek() {
                if next.is_ascii_digit() {
                    rendered.push_str(&paint(&segment, code));
                    segment.clear();
                    code = Some(next);
                    chars.next();
                    continue;
                }
            }
        }
        segment.push(c);
    }

    rendered.push_str(&paint(&segment, code));
    rendered
}

fn paint(segment: &str, code: Option<char>) -> String {
    if segment.is_empty() {
        return String::new();
    }

    match code {
        Some('0') => segment.black().to_string(),
        Some('1') => segment.red().to_string(),
        Some('2') => segment.green().to_string(),
        Some('3') => segment.yellow().to_string(),
        Some('4') => segment.blue().to_string(),
        Some('5') => segment.cyan().to_string(),
        Some('6') => segment.magenta().to_string(),
        _ => segment.to_string(),
    }
}
