//! Scraping the listing and challenge pages of vimgolf.com.

use crate::ProviderError;
use crate::html::{Html, NodeRef};
use crate::util::join_lines;
use vimgolf_core::{ChallengeId, ListingEntry};

/// Rows `list` shows when no limit is given.
pub const DEFAULT_LISTING_LIMIT: usize = 10;

/// A row of a challenge's leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leader {
    pub username: String,
    pub score: u32,
}

/// What the challenge page adds to the JSON form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChallengePage {
    pub name: Option<String>,
    pub description: Option<String>,
    pub leaders: Vec<Leader>,
}

/// Parse a listing page, keeping at most `limit` challenges.
pub fn parse_listing(html: &str, limit: usize) -> Vec<ListingEntry> {
    let html = Html::parse(html);
    html.elements_by_class("challenge")
        .filter_map(parse_listing_entry)
        .take(limit)
        .collect()
}

fn parse_listing_entry(element: NodeRef<'_>) -> Option<ListingEntry> {
    let anchor = element.find(|node| node.is("a") && node.attr("href").is_some())?;
    let href = anchor.attr("href")?;
    let last_segment = href.trim_end_matches('/').rsplit('/').next()?;
    let id = match ChallengeId::new(last_segment) {
        Ok(id) => id,
        Err(err) => {
            tracing::debug!(href, "skipping listing row: {}", err);
            return None;
        }
    };

    // the count is loose text of the row, never inside the description
    let entries = element
        .children()
        .filter_map(|child| child.own_text())
        .find_map(entries_count);

    Some(ListingEntry {
        id,
        name: join_lines(anchor.text().trim()),
        entries,
    })
}

/// The number in front of the word `entries`, as in `- 1023 entries`.
fn entries_count(text: &str) -> Option<u32> {
    let words: Vec<&str> = text.split_whitespace().collect();
    words
        .windows(2)
        .find(|pair| pair[1].starts_with("entries"))
        .and_then(|pair| pair[0].parse().ok())
}

/// Parse a challenge page: name, description and leaderboard.
pub fn parse_challenge_page(html: &str) -> Result<ChallengePage, ProviderError> {
    let html = Html::parse(html);
    let content = html
        .element_by_id("content")
        .ok_or_else(|| ProviderError::InvalidPage("no #content element".to_string()))?;

    let mut page = ChallengePage::default();

    if let Some(main) = content.find(|node| node.has_class("grid_7")) {
        page.name = main
            .find(|node| node.is("h3"))
            .map(|h3| join_lines(h3.text().trim()));
        page.description = main
            .find(|node| node.is("p"))
            .map(|p| join_lines(p.text().trim()));
    }

    if let Some(board) = content.find(|node| node.has_class("grid_5")) {
        page.leaders = board.child_elements("div").filter_map(parse_leader).collect();
    }

    if page.name.is_none() && page.leaders.is_empty() {
        return Err(ProviderError::InvalidPage(
            "no challenge name or leaderboard".to_string(),
        ));
    }
    Ok(page)
}

fn parse_leader(row: NodeRef<'_>) -> Option<Leader> {
    let h6 = row.child_elements("h6").next()?;
    // the first link wraps the avatar
    let user = h6.child_elements("a").nth(1)?;
    let username = user.text();
    let username = username.trim();
    let username = username.strip_prefix('@').unwrap_or(username);

    let score = row.child_elements("div").next()?.text().trim().parse().ok()?;

    Some(Leader {
        username: username.to_string(),
        score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
<html><body>
<div id="content">
  <div class="grid_7">
    <div class="challenge">
      <h5><a href="/challenges/9v00686695ea000000000723">Reverse the
          lines</a></h5>
      <p>Reverse every line &amp; keep the rest.</p>
      - 1023 entries
    </div>
    <div class="challenge">
      <h5><a href="/challenges/9v0063a7bc7e3a6c0000e96b">Swap &lt;tags&gt;</a></h5>
      <span>no entries yet</span>
    </div>
    <div class="challenge">
      <h5><a href="/challenges/5ca2bc786b547e000c77fd52">Third</a></h5>
      - 7 entries
    </div>
    <div class="challenge">
      <h5><a href="/challenges/5ca2bc786b547e000c77fd53">Sort</a></h5>
      <p>Sort the entries by date.</p>
      - 1023 entries
    </div>
  </div>
</div>
</body></html>
"#;

    const DETAIL: &str = r#"
<div id="content">
  <div class="grid_7">
    <h3><b>Reverse the lines</b></h3>
    <p>Reverse the order
       of the lines.</p>
    <p>Second paragraph</p>
  </div>
  <div class="grid_5">
    <div>
      <h6><a href="/@alice"><img src="a.png"></a> <a href="/@alice">@alice</a></h6>
      <div>12</div>
    </div>
    <div>
      <h6><a href="/@bob"><img src="b.png"></a> <a href="/@bob">bob</a></h6>
      <div> 14 </div>
    </div>
    <div class="ad">sponsored</div>
  </div>
</div>
"#;

    #[test]
    fn test_parse_listing() {
        let rows = parse_listing(LISTING, DEFAULT_LISTING_LIMIT);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].id.as_str(), "9v00686695ea000000000723");
        assert_eq!(rows[0].name, "Reverse the lines");
        assert_eq!(rows[0].entries, Some(1023));
        assert_eq!(rows[1].name, "Swap <tags>");
        assert_eq!(rows[1].entries, None);
        assert_eq!(rows[2].entries, Some(7));
        // a description mentioning entries is not the count
        assert_eq!(rows[3].name, "Sort");
        assert_eq!(rows[3].entries, Some(1023));
    }

    #[test]
    fn test_entries_count() {
        assert_eq!(entries_count("- 1023 entries"), Some(1023));
        assert_eq!(entries_count("1 entries"), Some(1));
        assert_eq!(entries_count("no entries yet"), None);
        assert_eq!(entries_count("Sort the entries by date."), None);
    }

    #[test]
    fn test_parse_listing_respects_limit() {
        let rows = parse_listing(LISTING, 2);
        assert_eq!(rows.len(), 2);
        assert!(parse_listing("<html></html>", 10).is_empty());
    }

    #[test]
    fn test_parse_challenge_page() {
        let page = parse_challenge_page(DETAIL).unwrap();
        assert_eq!(page.name.as_deref(), Some("Reverse the lines"));
        assert_eq!(
            page.description.as_deref(),
            Some("Reverse the order of the lines.")
        );
        assert_eq!(
            page.leaders,
            vec![
                Leader {
                    username: "alice".to_string(),
                    score: 12
                },
                Leader {
                    username: "bob".to_string(),
                    score: 14
                },
            ]
        );
    }

    #[test]
    fn test_parse_challenge_page_without_content() {
        assert!(matches!(
            parse_challenge_page("<html><body>maintenance</body></html>"),
            Err(ProviderError::InvalidPage(_))
        ));
    }
}
