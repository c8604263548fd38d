// Prompt templates for chat, comparisons, draft recommendations, and news.
//
// Prompts carry pre-computed context (ranks, roster needs, injury flags) so
// the model reasons about trade-offs instead of doing arithmetic.

use crate::draft::state::DraftState;

/// Static system prompt shared by every completion call.
pub fn system_prompt() -> &'static str {
    "You are a fantasy basketball expert assistant. You have deep knowledge of NBA \
     players, their statistics, fantasy basketball strategy, and current NBA trends. \
     You provide analytical and data-driven advice while considering factors like \
     player performance, injuries, team dynamics, and schedule."
}

// ---------------------------------------------------------------------------
// Player comparison
// ---------------------------------------------------------------------------

/// Injury outlook extracted from an enrichment reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjuryStatus {
    Healthy,
    DayToDay,
    LongTerm,
    SeasonEnding,
}

/// Extra ranking distance applied to long-term injuries.
const LONG_TERM_RANK_PENALTY: u64 = 50;

impl InjuryStatus {
    /// Classify a free-text injury report. Worst matching tier wins.
    pub fn from_report(text: &str) -> Self {
        let lower = text.to_lowercase();
        if lower.contains("season-ending")
            || lower.contains("season ending")
            || lower.contains("out for the season")
        {
            InjuryStatus::SeasonEnding
        } else if lower.contains("long-term")
            || lower.contains("long term")
            || lower.contains("multiple weeks")
            || lower.contains("several weeks")
        {
            InjuryStatus::LongTerm
        } else if lower.contains("day-to-day")
            || lower.contains("day to day")
            || lower.contains("questionable")
            || lower.contains("game-time decision")
        {
            InjuryStatus::DayToDay
        } else {
            InjuryStatus::Healthy
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InjuryStatus::Healthy => "Healthy",
            InjuryStatus::DayToDay => "Day-To-Day",
            InjuryStatus::LongTerm => "Long-Term",
            InjuryStatus::SeasonEnding => "Season-Ending",
        }
    }
}

/// Per-player context assembled before the final comparison call.
#[derive(Debug, Clone)]
pub struct ComparisonEntry {
    /// Canonical name when the directory resolved it, else the query as typed.
    pub name: String,
    /// Directory rank; `None` for players missing from the rankings.
    pub rank: Option<u32>,
    pub status: InjuryStatus,
    /// Enrichment text the oracle produced for this player.
    pub report: String,
}

impl ComparisonEntry {
    /// Availability-adjusted rank used for ordering. Season-ending injuries
    /// sort after everything else; unranked players take the worst directory
    /// rank plus one.
    pub fn adjusted_rank(&self, worst_rank: u32) -> u64 {
        let base = u64::from(self.rank.unwrap_or(worst_rank + 1));
        match self.status {
            InjuryStatus::SeasonEnding => u64::MAX,
            InjuryStatus::LongTerm => base + LONG_TERM_RANK_PENALTY,
            InjuryStatus::DayToDay | InjuryStatus::Healthy => base,
        }
    }
}

/// Sort comparison entries best-first by adjusted rank. Stable, so equal
/// adjustments keep their input order.
pub fn order_comparison(entries: &mut [ComparisonEntry], worst_rank: u32) {
    entries.sort_by_key(|entry| entry.adjusted_rank(worst_rank));
}

/// Prompt asking for injury/performance context on one player.
pub fn enrichment_prompt(name: &str) -> String {
    format!(
        "In two sentences, summarize {name}'s current situation for fantasy \
         basketball: injury status (use one of: Healthy, Day-To-Day, Long-Term, \
         Season-Ending), recent performance, and role on the team."
    )
}

/// Final comparison prompt seeded with the structured per-player context.
pub fn comparison_prompt(entries: &[ComparisonEntry]) -> String {
    let mut prompt = String::with_capacity(1024);

    prompt.push_str("Compare these NBA players for fantasy basketball purposes.\n\n");
    prompt.push_str("## PLAYERS (ordered by availability-adjusted rank)\n");
    for (idx, entry) in entries.iter().enumerate() {
        let rank = match entry.rank {
            Some(rank) => format!("#{rank}"),
            None => "unranked".to_string(),
        };
        prompt.push_str(&format!(
            "{}. {} ({}, {})\n   Context: {}\n",
            idx + 1,
            entry.name,
            rank,
            entry.status.label(),
            entry.report,
        ));
    }
    prompt.push_str(
        "\n## TASK\n\
         1. Flag any name that looks invalid or inactive.\n\
         2. Rank the players for rest-of-season value with short explanations, \
         weighing current injuries and availability heavily.\n\
         3. If a player is injured, say so first in their analysis.",
    );

    prompt
}

// ---------------------------------------------------------------------------
// Draft recommendation
// ---------------------------------------------------------------------------

/// Prompt asking what to draft next, built from the channel's draft state.
pub fn recommendation_prompt(state: &DraftState, available_preview: &[String]) -> String {
    let mut prompt = String::with_capacity(1024);

    prompt.push_str(&format!(
        "## DRAFT SITUATION\n\
         Round {} of {} | next pick is slot {} of {} | my slot: {}\n\n",
        state.current_round(),
        state.total_rounds,
        state.next_slot(),
        state.total_players,
        state.pick_position,
    ));

    prompt.push_str("## MY TEAM SO FAR\n");
    if state.my_team.is_empty() {
        prompt.push_str("  (no picks yet)\n");
    } else {
        for player in &state.my_team {
            prompt.push_str(&format!("  {} ({})\n", player.name, player.position));
        }
    }

    prompt.push_str("\n## ROSTER NEEDS\n");
    for (slot, need) in state.roster_needs() {
        prompt.push_str(&format!("  {}: {}\n", slot, need));
    }

    prompt.push_str("\n## TOP AVAILABLE PLAYERS\n");
    for (idx, name) in available_preview.iter().enumerate() {
        prompt.push_str(&format!("  {}. {}\n", idx + 1, name));
    }

    prompt.push_str(
        "\n## WHAT SHOULD I DRAFT NEXT?\n\
         Recommend the best pick for my slot and roster needs, plus one backup \
         option, with brief reasoning.",
    );

    prompt
}

// ---------------------------------------------------------------------------
// Player news
// ---------------------------------------------------------------------------

/// Prompt digesting scraped headlines about a player. With no headlines the
/// model is asked to answer from general knowledge and say so.
pub fn news_prompt(name: &str, snippets: &[String]) -> String {
    let mut prompt = String::with_capacity(512);

    if snippets.is_empty() {
        prompt.push_str(&format!(
            "Give a short update on NBA player {name} for fantasy basketball: \
             recent form, injury status, and anything affecting their value. \
             Note that no live headlines were available, so this is from \
             general knowledge."
        ));
    } else {
        prompt.push_str(&format!("Recent headlines about {name}:\n"));
        for snippet in snippets {
            prompt.push_str(&format!("- {snippet}\n"));
        }
        prompt.push_str(
            "\nSummarize what these mean for their fantasy basketball value \
             in a few sentences.",
        );
    }

    prompt
}
