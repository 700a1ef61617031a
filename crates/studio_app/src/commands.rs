//! Line commands typed at the prompt.

use chrono::{DateTime, Local};
use studio_core::{Credentials, Msg};

pub const HELP: &str = "\
Commands:
  /video <prompt>                 generate a video for <prompt>
  /suggest <n>                    use suggestion number <n> as the prompt
  /cancel                         abandon the running generation
  /resume                         start a blocked playback manually
  /history                        list recent chat prompts
  /signup <name> <email> <pass>   create an account
  /login <email> <pass>           sign in
  /logout                         sign out
  /help                           show this help
  /quit                           exit
Anything else is sent to the assistant.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Vec<Msg>),
    ShowHistory,
    Help,
    Quit,
    Invalid(String),
}

/// Turns one input line into messages for the reducer.
pub fn parse_line(line: &str, now: DateTime<Local>) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Dispatch(Vec::new());
    }
    let Some(rest) = line.strip_prefix('/') else {
        return chat(line, now);
    };

    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    };
    let words: Vec<&str> = args.split_whitespace().collect();

    match name {
        "video" | "v" => Command::Dispatch(vec![
            Msg::PromptChanged(args.to_string()),
            Msg::GenerateClicked,
        ]),
        "suggest" => match args.parse::<usize>() {
            Ok(n) if n >= 1 => Command::Dispatch(vec![Msg::SuggestionPicked(n - 1)]),
            _ => Command::Invalid("usage: /suggest <n>".into()),
        },
        "cancel" => Command::Dispatch(vec![Msg::CancelGenerationClicked]),
        "resume" | "play" => Command::Dispatch(vec![Msg::ResumePlaybackClicked]),
        "history" => Command::ShowHistory,
        "signup" => match words.as_slice() {
            [name, email, password] => {
                Command::Dispatch(vec![Msg::AuthSubmitted(Credentials::Signup {
                    name: name.to_string(),
                    email: email.to_string(),
                    password: password.to_string(),
                })])
            }
            _ => Command::Invalid("usage: /signup <name> <email> <password>".into()),
        },
        "login" => match words.as_slice() {
            [email, password] => Command::Dispatch(vec![Msg::AuthSubmitted(Credentials::Login {
                email: email.to_string(),
                password: password.to_string(),
            })]),
            _ => Command::Invalid("usage: /login <email> <password>".into()),
        },
        "logout" => Command::Dispatch(vec![Msg::LogoutClicked]),
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => Command::Invalid(format!("unknown command /{other}; try /help")),
    }
}

fn chat(text: &str, now: DateTime<Local>) -> Command {
    Command::Dispatch(vec![
        Msg::ChatInputChanged(text.to_string()),
        Msg::ChatSubmitted {
            entry_id: u64::try_from(now.timestamp_millis()).unwrap_or_default(),
            time_label: now.format("%H:%M").to_string(),
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at_1405() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 30).unwrap()
    }

    #[test]
    fn plain_text_becomes_chat_with_clock() {
        let now = at_1405();
        let Command::Dispatch(msgs) = parse_line("  show me a skeleton ", now) else {
            panic!("expected dispatch");
        };
        assert_eq!(
            msgs,
            vec![
                Msg::ChatInputChanged("show me a skeleton".into()),
                Msg::ChatSubmitted {
                    entry_id: now.timestamp_millis() as u64,
                    time_label: "14:05".into(),
                },
            ]
        );
    }

    #[test]
    fn video_sets_prompt_then_generates() {
        assert_eq!(
            parse_line("/video human digestive system", at_1405()),
            Command::Dispatch(vec![
                Msg::PromptChanged("human digestive system".into()),
                Msg::GenerateClicked,
            ])
        );
    }

    #[test]
    fn suggestions_are_one_based() {
        assert_eq!(
            parse_line("/suggest 3", at_1405()),
            Command::Dispatch(vec![Msg::SuggestionPicked(2)])
        );
        assert!(matches!(parse_line("/suggest 0", at_1405()), Command::Invalid(_)));
        assert!(matches!(parse_line("/suggest x", at_1405()), Command::Invalid(_)));
    }

    #[test]
    fn auth_commands_need_every_field() {
        assert_eq!(
            parse_line("/login ada@example.com secret", at_1405()),
            Command::Dispatch(vec![Msg::AuthSubmitted(Credentials::Login {
                email: "ada@example.com".into(),
                password: "secret".into(),
            })])
        );
        assert!(matches!(
            parse_line("/signup Ada ada@example.com", at_1405()),
            Command::Invalid(_)
        ));
    }

    #[test]
    fn control_commands() {
        let now = at_1405();
        assert_eq!(parse_line("/quit", now), Command::Quit);
        assert_eq!(parse_line("/history", now), Command::ShowHistory);
        assert_eq!(parse_line("/help", now), Command::Help);
        assert_eq!(
            parse_line("/cancel", now),
            Command::Dispatch(vec![Msg::CancelGenerationClicked])
        );
        assert_eq!(parse_line("   ", now), Command::Dispatch(Vec::new()));
        assert!(matches!(parse_line("/dance", now), Command::Invalid(_)));
    }
}
