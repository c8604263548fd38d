// Shared reply helpers.

/// Per-message character budget: a safety margin below Discord's 2000 cap.
pub const MESSAGE_CHUNK_LIMIT: usize = 1900;

/// Split a reply into chunks no longer than `limit` characters, preferring
/// line boundaries. A single line longer than the limit is hard-split at a
/// character boundary. No content is dropped.
pub fn chunk_message(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for line in text.split('\n') {
        for piece in split_long_line(line, limit) {
            // +1 for the joining newline.
            if !current.is_empty() && current.chars().count() + 1 + piece.chars().count() > limit {
                chunks.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(&piece);
        }
    }
    if !current.trim().is_empty() {
        chunks.push(current);
    }
    chunks.retain(|c| !c.trim().is_empty());
    chunks
}

/// Truncate a reply to `limit` characters, marking the cut with an ellipsis.
pub fn truncate_message(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut out: String = text.chars().take(limit.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn split_long_line(line: &str, limit: usize) -> Vec<String> {
    if line.chars().count() <= limit {
        return vec![line.to_string()];
    }
    let chars: Vec<char> = line.chars().collect();
    chars
        .chunks(limit)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_chunk() {
        let chunks = chunk_message("hello\nworld", 100);
        assert_eq!(chunks, vec!["hello\nworld"]);
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(chunk_message("", 100).is_empty());
        assert!(chunk_message("\n\n", 100).is_empty());
    }

    #[test]
    fn splits_at_line_boundaries() {
        let text = "aaaa\nbbbb\ncccc";
        let chunks = chunk_message(text, 9);
        assert_eq!(chunks, vec!["aaaa\nbbbb", "cccc"]);
    }

    #[test]
    fn no_chunk_exceeds_limit() {
        let text = "line one is fairly long\n".repeat(300);
        let chunks = chunk_message(&text, MESSAGE_CHUNK_LIMIT);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= MESSAGE_CHUNK_LIMIT);
        }
    }

    #[test]
    fn no_content_lost() {
        let text = "alpha\nbeta\ngamma\ndelta";
        let chunks = chunk_message(text, 11);
        assert_eq!(chunks.join("\n"), text);
    }

    #[test]
    fn oversized_line_is_hard_split() {
        let text = "x".repeat(25);
        let chunks = chunk_message(&text, 10);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 10);
        assert_eq!(chunks[2].len(), 5);
    }

    #[test]
    fn hard_split_respects_char_boundaries() {
        let text = "é".repeat(15);
        let chunks = chunk_message(&text, 10);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 10);
    }

    #[test]
    fn truncate_leaves_short_text_alone() {
        assert_eq!(truncate_message("short", 100), "short");
    }

    #[test]
    fn truncate_marks_the_cut() {
        let out = truncate_message(&"a".repeat(50), 10);
        assert_eq!(out.chars().count(), 10);
        assert!(out.ends_with('…'));
    }
}
