use portal_core::Msg;

/// What a line typed at the prompt asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleAction {
    Dispatch(Vec<Msg>),
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_line(line: &str) -> ConsoleAction {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ConsoleAction::Dispatch(Vec::new());
    }
    let Some(command) = trimmed.strip_prefix('/') else {
        // Typing into the box and pressing submit.
        return ConsoleAction::Dispatch(vec![
            Msg::DraftChanged(line.to_string()),
            Msg::SubmitClicked,
        ]);
    };

    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim_start()),
        None => (command, ""),
    };
    match name {
        "connect" => ConsoleAction::Dispatch(vec![Msg::ConnectClicked]),
        "init" => ConsoleAction::Dispatch(vec![Msg::InitializeClicked]),
        "refresh" => ConsoleAction::Dispatch(vec![Msg::RefreshClicked]),
        "draft" => ConsoleAction::Dispatch(vec![Msg::DraftChanged(rest.to_string())]),
        "submit" => ConsoleAction::Dispatch(vec![Msg::SubmitClicked]),
        "dismiss" => ConsoleAction::Dispatch(vec![Msg::AlertDismissed]),
        "help" | "?" => ConsoleAction::Help,
        "quit" | "exit" => ConsoleAction::Quit,
        _ => ConsoleAction::Unknown(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_line_types_and_submits() {
        assert_eq!(
            parse_line("http://x/y.gif\n"),
            ConsoleAction::Dispatch(vec![
                Msg::DraftChanged("http://x/y.gif".to_string()),
                Msg::SubmitClicked,
            ])
        );
    }

    #[test]
    fn blank_line_dispatches_nothing() {
        assert_eq!(parse_line("   \n"), ConsoleAction::Dispatch(Vec::new()));
    }

    #[test]
    fn slash_commands_map_to_clicks() {
        assert_eq!(
            parse_line("/connect"),
            ConsoleAction::Dispatch(vec![Msg::ConnectClicked])
        );
        assert_eq!(
            parse_line("/init"),
            ConsoleAction::Dispatch(vec![Msg::InitializeClicked])
        );
        assert_eq!(
            parse_line("/refresh"),
            ConsoleAction::Dispatch(vec![Msg::RefreshClicked])
        );
        assert_eq!(
            parse_line("/dismiss"),
            ConsoleAction::Dispatch(vec![Msg::AlertDismissed])
        );
        assert_eq!(parse_line("/quit"), ConsoleAction::Quit);
        assert_eq!(parse_line("/help"), ConsoleAction::Help);
    }

    #[test]
    fn draft_command_sets_the_box_without_submitting() {
        assert_eq!(
            parse_line("/draft  https://a.example/b.gif "),
            ConsoleAction::Dispatch(vec![Msg::DraftChanged(
                "https://a.example/b.gif".to_string()
            )])
        );
        assert_eq!(
            parse_line("/draft"),
            ConsoleAction::Dispatch(vec![Msg::DraftChanged(String::new())])
        );
    }

    #[test]
    fn unknown_command_is_reported() {
        assert_eq!(
            parse_line("/launch"),
            ConsoleAction::Unknown("/launch".to_string())
        );
    }
}
