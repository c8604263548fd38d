// Fuzzy resolution of user-typed player names against the directory.
//
// Matching runs through four tiers in strict precedence order so the same
// query against the same directory always lands on the same entry:
//   1. exact match on normalized names
//   2. first-token-prefix AND last-token-prefix (multi-token queries)
//   3. space-insensitive substring containment
//   4. per-token scoring (+3 exact token, +1 substring token, accept >= 2)

/// Name particles that start a surname without marking a word boundary when
/// a run-together query is split on internal capitalization ("LeBron",
/// "DeRozan", "McCollum").
const NAME_PARTICLES: &[&str] = &[
    "mc", "mac", "de", "del", "della", "di", "la", "le", "van", "von", "o",
];

/// Lowercase a name and strip punctuation, keeping word boundaries.
pub fn normalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            for low in ch.to_lowercase() {
                out.push(low);
            }
        } else if ch.is_whitespace() && !out.ends_with(' ') && !out.is_empty() {
            out.push(' ');
        }
        // Punctuation ("'", ".", "-") drops out entirely.
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Split a run-together token on internal capitalization, leaving name
/// particles attached: "LeBronJames" -> ["LeBron", "James"], while
/// "McCollum" and "DeRozan" stay whole.
pub fn split_on_capitals(token: &str) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    let mut current = String::new();

    for ch in token.chars() {
        let boundary = ch.is_uppercase()
            && current
                .chars()
                .last()
                .map(|prev| prev.is_lowercase())
                .unwrap_or(false)
            && !NAME_PARTICLES.contains(&current.to_lowercase().as_str());
        if boundary {
            parts.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

/// Normalized, lowercased query tokens. Single-word queries are first split
/// heuristically on internal capitalization.
pub fn query_tokens(query: &str) -> Vec<String> {
    let trimmed = query.trim();
    let words: Vec<&str> = trimmed.split_whitespace().collect();

    let raw: Vec<String> = if words.len() == 1 {
        split_on_capitals(words[0])
    } else {
        words.into_iter().map(|w| w.to_string()).collect()
    };

    raw.iter()
        .map(|w| normalize(w))
        .filter(|w| !w.is_empty())
        .collect()
}

/// Resolve `query` against candidate names in directory order.
///
/// Returns the matched candidate, or `None` when no tier produces a match.
/// Deterministic: earlier candidates win ties within a tier.
pub fn resolve<'a, I>(query: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let tokens = query_tokens(query);
    if tokens.is_empty() {
        return None;
    }
    let query_norm = tokens.join(" ");
    let query_joined = tokens.concat();

    let names: Vec<(&'a str, String)> = candidates
        .into_iter()
        .map(|name| (name, normalize(name)))
        .collect();

    // Tier 1: exact normalized match.
    for (name, norm) in &names {
        if *norm == query_norm {
            return Some(name);
        }
    }

    // Tier 2: first/last token prefixes for multi-token queries.
    if tokens.len() >= 2 {
        let first = &tokens[0];
        let last = &tokens[tokens.len() - 1];
        for (name, norm) in &names {
            let cand: Vec<&str> = norm.split(' ').collect();
            if cand.len() >= 2
                && cand[0].starts_with(first.as_str())
                && cand[cand.len() - 1].starts_with(last.as_str())
            {
                return Some(name);
            }
        }
    }

    // Tier 3: space-insensitive substring containment.
    for (name, norm) in &names {
        if norm.replace(' ', "").contains(&query_joined) {
            return Some(name);
        }
    }

    // Tier 4: token scoring.
    let mut best: Option<(&'a str, u32)> = None;
    for (name, norm) in &names {
        let cand: Vec<&str> = norm.split(' ').collect();
        let mut score = 0u32;
        for token in &tokens {
            if cand.iter().any(|c| *c == token.as_str()) {
                score += 3;
            } else if cand.iter().any(|c| c.contains(token.as_str())) {
                score += 1;
            }
        }
        if score >= 2 && best.map_or(true, |(_, b)| score > b) {
            best = Some((name, score));
        }
    }
    best.map(|(name, _)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIRECTORY: &[&str] = &[
        "Nikola Jokic",
        "LeBron James",
        "Stephen Curry",
        "Shai Gilgeous-Alexander",
        "Jaylen Brown",
        "Jalen Brunson",
        "De'Aaron Fox",
        "CJ McCollum",
    ];

    fn resolve_in_dir(query: &str) -> Option<&'static str> {
        resolve(query, DIRECTORY.iter().copied())
    }

    #[test]
    fn normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("De'Aaron Fox"), "deaaron fox");
        assert_eq!(normalize("Shai Gilgeous-Alexander"), "shai gilgeousalexander");
        assert_eq!(normalize("  LeBron   James  "), "lebron james");
    }

    #[test]
    fn exact_match_wins() {
        assert_eq!(resolve_in_dir("lebron james"), Some("LeBron James"));
        assert_eq!(resolve_in_dir("DE'AARON FOX"), Some("De'Aaron Fox"));
    }

    #[test]
    fn prefix_match_on_both_name_ends() {
        assert_eq!(resolve_in_dir("steph cur"), Some("Stephen Curry"));
        assert_eq!(resolve_in_dir("nik jok"), Some("Nikola Jokic"));
    }

    #[test]
    fn prefix_match_disambiguates_similar_names() {
        assert_eq!(resolve_in_dir("jay brown"), Some("Jaylen Brown"));
        assert_eq!(resolve_in_dir("jal brun"), Some("Jalen Brunson"));
    }

    #[test]
    fn substring_match_single_token() {
        assert_eq!(resolve_in_dir("lebron"), Some("LeBron James"));
        assert_eq!(resolve_in_dir("jokic"), Some("Nikola Jokic"));
        assert_eq!(resolve_in_dir("gilgeous"), Some("Shai Gilgeous-Alexander"));
    }

    #[test]
    fn camel_case_query_splits_into_tokens() {
        assert_eq!(query_tokens("LebronJames"), ["lebron", "james"]);
        assert_eq!(resolve_in_dir("StephenCurry"), Some("Stephen Curry"));
    }

    #[test]
    fn particles_do_not_split() {
        assert_eq!(query_tokens("McCollum"), ["mccollum"]);
        assert_eq!(query_tokens("DeRozan"), ["derozan"]);
        assert_eq!(query_tokens("LeBron"), ["lebron"]);
        assert_eq!(resolve_in_dir("McCollum"), Some("CJ McCollum"));
    }

    #[test]
    fn score_match_accepts_reordered_tokens() {
        // Neither prefix nor substring; "james lebron" scores 6 on LeBron James.
        assert_eq!(resolve_in_dir("james lebron"), Some("LeBron James"));
    }

    #[test]
    fn score_below_threshold_is_rejected() {
        // One weak substring hit scores 1 (< 2): no match.
        assert_eq!(resolve_in_dir("jo totallywrong"), None);
    }

    #[test]
    fn unknown_name_returns_none() {
        assert_eq!(resolve_in_dir("Victor Wembanyama"), None);
        assert_eq!(resolve_in_dir(""), None);
        assert_eq!(resolve_in_dir("   "), None);
    }

    #[test]
    fn resolution_is_deterministic() {
        for _ in 0..5 {
            assert_eq!(resolve_in_dir("bro"), resolve_in_dir("bro"));
        }
    }

    #[test]
    fn earlier_directory_entry_wins_ties() {
        let names = ["Aaron Gordon", "Aaron Nesmith"];
        // Tier 3 substring hits both; the first listed wins.
        assert_eq!(resolve("aaron", names.iter().copied()), Some("Aaron Gordon"));
    }
}
