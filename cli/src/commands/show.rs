use crate::App;
use crate::error::CliError;
use crate::output::{self, Table, mark};
use color_eyre::eyre::Result;
use vimgolf_api::{ChallengePage, ProviderError};
use vimgolf_core::{Attempt, AttemptSummary, Challenge, ChallengeStore};

/// Leaders shown before the list is cut short.
const LEADER_LIMIT: usize = 3;
const USERNAME_WIDTH: usize = 15;

pub async fn show_command(app: &App, arg: &str, tracked: bool) -> Result<()> {
    let id = app.resolve_remote_id(arg)?;
    let client = app.client();
    let (remote, page) = tokio::join!(client.fetch_challenge(&id), client.fetch_challenge_page(&id));

    let remote = match remote {
        Ok(remote) => remote,
        Err(ProviderError::NotFound(_)) => return Err(CliError::ChallengeNotFound(id).into()),
        Err(err) => {
            output::error("The challenge retrieval has failed");
            return Err(err.into());
        }
    };
    let page = match page {
        Ok(page) => Some(page),
        Err(err) => {
            tracing::warn!(challenge = %id, "challenge page unavailable: {}", err);
            None
        }
    };

    let mut challenge = remote.into_challenge(id.clone());
    match &page {
        Some(page) => {
            challenge.title = page.name.clone();
            challenge.description = page.description.clone();
        }
        None => {
            if let Some(cached) = app.cached(&id)? {
                challenge.title = cached.title;
                challenge.description = cached.description;
            }
        }
    }
    app.store().put(&challenge)?;

    print_challenge(&challenge, page.as_ref(), &client.challenge_url(&id));

    if tracked {
        let attempts = app.store().list_attempts(&id)?;
        print_tracked(&attempts);
    }
    Ok(())
}

fn print_challenge(challenge: &Challenge, page: Option<&ChallengePage>, url: &str) {
    output::separator();
    if page.is_none() {
        output::error("Some information could not be retrieved.");
        output::separator();
    }

    let id = challenge.id.as_str();
    match &challenge.title {
        Some(title) => output::plain(output::title_with_id(title, id)),
        None => output::plain(id),
    }
    output::plain(url);

    if let Some(page) = page {
        output::separator();
        output::success("Leaderboard");
        for line in leaderboard_lines(page) {
            output::plain(line);
        }
    }

    if let Some(description) = &challenge.description {
        output::separator();
        output::plain(description);
    }

    output::separator();
    output::success("Start File");
    print!("{}", challenge.input.text);
    output::separator();
    output::success("End File");
    print!("{}", challenge.output.text);
    output::separator();
}

pub fn leaderboard_lines(page: &ChallengePage) -> Vec<String> {
    if page.leaders.is_empty() {
        return vec!["no entries yet".to_string()];
    }
    let mut lines: Vec<String> = page
        .leaders
        .iter()
        .take(LEADER_LIMIT)
        .map(|leader| {
            format!(
                "{:<width$} {}",
                leader.username,
                leader.score,
                width = USERNAME_WIDTH
            )
        })
        .collect();
    if page.leaders.len() > LEADER_LIMIT {
        lines.push("...".to_string());
    }
    lines
}

fn print_tracked(attempts: &[Attempt]) {
    output::separator();
    output::success("Stats");
    for line in stats_lines(&AttemptSummary::from_attempts(attempts)) {
        output::plain(line);
    }

    let table = attempts_table(attempts);
    if !table.is_empty() {
        output::separator();
        output::plain(table.render());
    }
    output::separator();
}

pub fn stats_lines(summary: &AttemptSummary) -> Vec<String> {
    vec![
        format!("Submitted: {}", mark(summary.submitted > 0)),
        format!("Correct Solutions: {}", summary.correct),
        format!(
            "Self Best Score: {}",
            summary
                .best_score
                .map_or_else(|| "-".to_string(), |score| score.to_string())
        ),
    ]
}

/// Attempts in recording order. Sessions quit with `ZQ` are left out.
pub fn attempts_table(attempts: &[Attempt]) -> Table {
    let mut table = Table::new(["Keys", "Correct", "Submitted", "Score", "Timestamp"]);
    for attempt in attempts.iter().filter(|attempt| !attempt.is_abandoned()) {
        table.row([
            attempt.keys.clone(),
            mark(attempt.correct).to_string(),
            mark(attempt.submitted).to_string(),
            attempt.score.to_string(),
            attempt.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use vimgolf_api::Leader;
    use vimgolf_core::Keys;

    fn page(leaders: &[(&str, u32)]) -> ChallengePage {
        ChallengePage {
            name: Some("Reverse".to_string()),
            description: None,
            leaders: leaders
                .iter()
                .map(|(username, score)| Leader {
                    username: username.to_string(),
                    score: *score,
                })
                .collect(),
        }
    }

    #[test]
    fn test_leaderboard_lines() {
        assert_eq!(leaderboard_lines(&page(&[])), ["no entries yet"]);
        assert_eq!(
            leaderboard_lines(&page(&[("alice", 4), ("bob", 7)])),
            ["alice           4", "bob             7"]
        );
        let lines = leaderboard_lines(&page(&[("a", 1), ("b", 2), ("c", 3), ("d", 4)]));
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[3], "...");
    }

    #[test]
    fn test_tracked_output() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let attempts = vec![
            Attempt::new(&Keys::from_notation("ddZZ").unwrap(), true, true, at),
            Attempt::new(&Keys::from_notation("xZQ").unwrap(), false, false, at),
            Attempt::new(&Keys::from_notation("xxZZ").unwrap(), false, false, at),
        ];
        let summary = AttemptSummary::from_attempts(&attempts);
        assert_eq!(
            stats_lines(&summary),
            ["Submitted: ✓", "Correct Solutions: 1", "Self Best Score: 4"]
        );

        let rendered = attempts_table(&attempts).render();
        assert!(rendered.contains("| ddZZ "));
        assert!(rendered.contains("2024-05-01 12:00:00"));
        assert!(!rendered.contains("xZQ"));
        assert_eq!(rendered.lines().count(), 6);
    }

    #[test]
    fn test_empty_history() {
        let summary = AttemptSummary::from_attempts(&[]);
        assert_eq!(stats_lines(&summary)[2], "Self Best Score: -");
        assert!(attempts_table(&[]).is_empty());
    }
}
