// Console rendering of events.
// One block of labelled lines per event, followed by a separator.

use std::io::{self, Write};

use crate::github::GithubEvent;

const SEPARATOR: &str = "----------------------";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format one event as its block of lines, separator included.
pub fn format_event(event: &GithubEvent) -> String {
    format!(
        "Type: {}\nActor Login: {}\nRepo Name: {}\nRepo URL: {}\nCreated At: {}\n{}\n",
        event.event_type,
        event.actor.login,
        event.repo.name,
        event.repo.url,
        event.created_at.format(TIMESTAMP_FORMAT),
        SEPARATOR,
    )
}

/// Write every event to `out` in order.
pub fn write_events<W: Write>(out: &mut W, events: &[GithubEvent]) -> io::Result<()> {
    for event in events {
        out.write_all(format_event(event).as_bytes())?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{Actor, EventRepo};
    use chrono::{TimeZone, Utc};

    fn event() -> GithubEvent {
        GithubEvent {
            event_type: "PushEvent".to_string(),
            actor: Actor {
                login: "octocat".to_string(),
            },
            repo: EventRepo {
                name: "octocat/Hello-World".to_string(),
                url: "https://api.github.com/repos/octocat/Hello-World".to_string(),
            },
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 8, 7).unwrap(),
        }
    }

    #[test]
    fn test_format_event() {
        let expected = "Type: PushEvent\n\
                        Actor Login: octocat\n\
                        Repo Name: octocat/Hello-World\n\
                        Repo URL: https://api.github.com/repos/octocat/Hello-World\n\
                        Created At: 2024-05-01 09:08:07\n\
                        ----------------------\n";
        assert_eq!(format_event(&event()), expected);
    }

    #[test]
    fn test_write_events_in_order() {
        let mut second = event();
        second.event_type = "WatchEvent".to_string();

        let mut out = Vec::new();
        write_events(&mut out, &[event(), second]).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(SEPARATOR).count(), 2);
        let push = text.find("Type: PushEvent").unwrap();
        let watch = text.find("Type: WatchEvent").unwrap();
        assert!(push < watch);
    }

    #[test]
    fn test_write_no_events() {
        let mut out = Vec::new();
        write_events(&mut out, &[]).unwrap();
        assert!(out.is_empty());
    }
}
