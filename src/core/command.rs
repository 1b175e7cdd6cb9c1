// src/core/command.rs — Chat command parsing
//
// Turns `/work "Site redesign" 250` style input into a typed Command.

use crate::core::billing::BillingKind;
use crate::infra::errors::EngineError;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Start {
        name: String,
        amount: f64,
        kind: BillingKind,
    },
    Pause,
    Resume,
    Status,
    End,
    Help,
}

impl Command {
    /// Parse a command name and its whitespace-split arguments.
    ///
    /// `default_kind` is the billing model used by the plain `work` command.
    pub fn parse(
        command: &str,
        args: &[&str],
        default_kind: BillingKind,
    ) -> Result<Self, EngineError> {
        let name = normalize_name(command);
        match name.as_str() {
            "work" => parse_start(args, default_kind),
            "project" => parse_start(args, BillingKind::Fixed),
            "workpause" | "pause" => Ok(Self::Pause),
            "workresume" | "resume" => Ok(Self::Resume),
            "workend" | "end" => Ok(Self::End),
            "status" | "checkstatus" | "checktime" => Ok(Self::Status),
            "start" | "help" => Ok(Self::Help),
            _ => Err(EngineError::UnknownCommand(name)),
        }
    }

    /// Parse a full chat message. Returns `None` for text that is not a
    /// slash command.
    pub fn parse_message(
        text: &str,
        default_kind: BillingKind,
    ) -> Option<Result<Self, EngineError>> {
        let mut tokens = text.split_whitespace();
        let head = tokens.next()?.strip_prefix('/')?;
        let args: Vec<&str> = tokens.collect();
        Some(Self::parse(head, &args, default_kind))
    }
}

/// Lowercase and drop a `@BotName` suffix.
fn normalize_name(command: &str) -> String {
    let command = command.trim_start_matches('/');
    let base = command.split('@').next().unwrap_or(command);
    base.to_lowercase()
}

/// The last argument is the amount; everything before it is the name.
fn parse_start(args: &[&str], kind: BillingKind) -> Result<Command, EngineError> {
    let what = match kind {
        BillingKind::Hourly => "hourly rate",
        BillingKind::Fixed => "project price",
    };

    let Some((amount_str, name_parts)) = args.split_last() else {
        return Err(EngineError::InvalidArgument(format!(
            "a session name and {what} are required"
        )));
    };

    let amount: f64 = amount_str.parse().map_err(|_| {
        EngineError::InvalidArgument(format!("'{amount_str}' is not a valid {what}"))
    })?;

    let joined = name_parts.join(" ");
    let name = strip_quotes(joined.trim()).trim().to_string();

    Ok(Command::Start { name, amount, kind })
}

fn strip_quotes(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(s)
}
