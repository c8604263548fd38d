// Ranking-table and news-page extraction.
//
// Network and parse failures never reach the caller: every path degrades to
// an empty result, which the orchestrator reports as "try again later".
// `scraper::Html` is not `Send`, so all parsing happens in synchronous
// helpers after the response body has been read.

use scraper::{Html, Selector};

use super::PlayerRecord;

/// Fetch the ranking page and parse it into ordered player records.
/// Any failure yields an empty list.
pub async fn fetch_rankings(http: &reqwest::Client, url: &str) -> Vec<PlayerRecord> {
    let body = match fetch_page(http, url).await {
        Some(body) => body,
        None => return Vec::new(),
    };
    let records = parse_ranking_table(&body);
    if records.is_empty() {
        log::warn!("No player rows found in ranking page at {}", url);
    }
    records
}

/// Fetch a news page and pull out headline snippets mentioning the player.
/// Any failure yields an empty list.
pub async fn fetch_news_snippets(
    http: &reqwest::Client,
    url: &str,
    player_name: &str,
) -> Vec<String> {
    let body = match fetch_page(http, url).await {
        Some(body) => body,
        None => return Vec::new(),
    };
    extract_news_snippets(&body, player_name)
}

async fn fetch_page(http: &reqwest::Client, url: &str) -> Option<String> {
    let response = match http.get(url).send().await.and_then(|r| r.error_for_status()) {
        Ok(response) => response,
        Err(err) => {
            log::warn!("Failed to fetch {}: {}", url, err);
            return None;
        }
    };
    match response.text().await {
        Ok(body) => Some(body),
        Err(err) => {
            log::warn!("Failed to read body of {}: {}", url, err);
            None
        }
    }
}

/// Parse the first plausible ranking table out of an HTML document.
///
/// The header row names the stat columns; the player-name column is the one
/// headed "Player"/"Name" (second column when no header matches). Rows with
/// missing cells keep whatever columns they do have. Source order is
/// preserved; a missing or unparsable rank column falls back to row order.
pub fn parse_ranking_table(html: &str) -> Vec<PlayerRecord> {
    let document = Html::parse_document(html);

    let (Ok(table_sel), Ok(row_sel), Ok(th_sel), Ok(td_sel)) = (
        Selector::parse("table"),
        Selector::parse("tr"),
        Selector::parse("th"),
        Selector::parse("td"),
    ) else {
        return Vec::new();
    };

    for table in document.select(&table_sel) {
        let mut rows = table.select(&row_sel).peekable();

        // Header row: prefer <th> cells, fall back to the first row's <td>s.
        let headers: Vec<String> = match rows.peek() {
            Some(first) => {
                let ths: Vec<String> = first.select(&th_sel).map(|c| cell_text(c)).collect();
                if ths.is_empty() {
                    first.select(&td_sel).map(|c| cell_text(c)).collect()
                } else {
                    ths
                }
            }
            None => continue,
        };
        if headers.len() < 2 {
            continue;
        }
        rows.next(); // consume the header row

        let name_idx = headers
            .iter()
            .position(|h| {
                let h = h.to_lowercase();
                h.contains("player") || h == "name"
            })
            .unwrap_or(1);
        let rank_idx = headers.iter().position(|h| {
            let h = h.to_lowercase();
            h == "rank" || h == "rk" || h == "#"
        });

        let mut records = Vec::new();
        for row in rows {
            let cells: Vec<String> = row.select(&td_sel).map(|c| cell_text(c)).collect();
            let name = match cells.get(name_idx) {
                Some(name) if !name.is_empty() => name.clone(),
                _ => continue,
            };

            let rank = rank_idx
                .and_then(|idx| cells.get(idx))
                .and_then(|cell| cell.trim_start_matches('#').parse::<u32>().ok())
                .unwrap_or(records.len() as u32 + 1);

            let stats: Vec<(String, String)> = headers
                .iter()
                .zip(cells.iter())
                .enumerate()
                .filter(|(idx, _)| *idx != name_idx)
                .map(|(_, (header, cell))| (header.clone(), cell.clone()))
                .collect();

            records.push(PlayerRecord { name, rank, stats });
        }

        if !records.is_empty() {
            return records;
        }
    }

    Vec::new()
}

/// Pull short text snippets mentioning the player out of a news page.
pub fn extract_news_snippets(html: &str, player_name: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("h1, h2, h3, a, p, li") else {
        return Vec::new();
    };

    let needles: Vec<String> = player_name
        .split_whitespace()
        .map(|t| t.to_lowercase())
        .filter(|t| t.len() >= 3)
        .collect();
    if needles.is_empty() {
        return Vec::new();
    }

    let mut snippets: Vec<String> = Vec::new();
    for element in document.select(&selector) {
        let text = cell_text(element);
        if text.len() < 20 || text.len() > 300 {
            continue;
        }
        let lower = text.to_lowercase();
        if !needles.iter().any(|n| lower.contains(n.as_str())) {
            continue;
        }
        if snippets.contains(&text) {
            continue;
        }
        snippets.push(text);
        if snippets.len() >= 5 {
            break;
        }
    }
    snippets
}

fn cell_text(element: scraper::ElementRef<'_>) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const RANKING_PAGE: &str = r#"
        <html><body>
        <table>
          <tr><th>RK</th><th>Player</th><th>PTS</th><th>REB</th><th>AST</th></tr>
          <tr><td>1</td><td>Nikola Jokic</td><td>26.4</td><td>12.4</td><td>9.0</td></tr>
          <tr><td>2</td><td>Luka Doncic</td><td>33.9</td><td>9.2</td><td>9.8</td></tr>
          <tr><td>3</td><td>Giannis Antetokounmpo</td><td>30.4</td><td>11.5</td></tr>
        </table>
        </body></html>
    "#;

    #[test]
    fn parses_rows_in_source_order() {
        let records = parse_ranking_table(RANKING_PAGE);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].name, "Nikola Jokic");
        assert_eq!(records[1].name, "Luka Doncic");
        assert_eq!(records[2].name, "Giannis Antetokounmpo");
    }

    #[test]
    fn reads_rank_and_stat_columns() {
        let records = parse_ranking_table(RANKING_PAGE);
        assert_eq!(records[1].rank, 2);
        assert_eq!(records[1].stat("PTS"), Some("33.9"));
        assert_eq!(records[1].stat("AST"), Some("9.8"));
        assert_eq!(records[1].stat("Player"), None, "name is not a stat column");
    }

    #[test]
    fn tolerates_missing_cells() {
        let records = parse_ranking_table(RANKING_PAGE);
        assert_eq!(records[2].stat("REB"), Some("11.5"));
        assert_eq!(records[2].stat("AST"), None);
    }

    #[test]
    fn missing_rank_column_falls_back_to_row_order() {
        let page = r#"
            <table>
              <tr><th>Team</th><th>Name</th></tr>
              <tr><td>DEN</td><td>Nikola Jokic</td></tr>
              <tr><td>DAL</td><td>Luka Doncic</td></tr>
            </table>
        "#;
        let records = parse_ranking_table(page);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].rank, 1);
        assert_eq!(records[1].rank, 2);
    }

    #[test]
    fn garbage_input_yields_empty() {
        assert!(parse_ranking_table("").is_empty());
        assert!(parse_ranking_table("<p>no tables here</p>").is_empty());
        assert!(parse_ranking_table("<table><tr><th>One</th></tr></table>").is_empty());
        assert!(parse_ranking_table("%%% not html at all >>>").is_empty());
    }

    #[test]
    fn news_snippets_filter_by_player() {
        let page = r#"
            <html><body>
              <h2>Jokic posts triple-double in Denver win over the Lakers</h2>
              <p>Unrelated story about something else entirely going on.</p>
              <a>Nikola Jokic questionable for Friday with wrist soreness</a>
            </body></html>
        "#;
        let snippets = extract_news_snippets(page, "Nikola Jokic");
        assert_eq!(snippets.len(), 2);
        assert!(snippets[0].contains("triple-double"));
        assert!(snippets[1].contains("questionable"));
    }

    #[test]
    fn news_snippets_empty_for_unmentioned_player() {
        let page = "<p>A long paragraph about the weather and nothing else.</p>";
        assert!(extract_news_snippets(page, "Nikola Jokic").is_empty());
    }
}
