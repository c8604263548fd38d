// Orchestrator for everything behind the chat commands: per-channel drafts,
// the player-directory cache, free-form chat history, and completion calls.
//
// All shared state lives on this one struct behind tokio mutexes; locks
// guard the pure mutation and are never held across a completion call.

use std::collections::HashMap;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::Mutex;

use crate::directory::{matching, scrape, DirectoryCache, PlayerRecord};
use crate::draft::{DraftState, DraftedPlayer, Position};
use crate::llm::prompt::{self, ComparisonEntry, InjuryStatus};
use crate::llm::{ChatMessage, Oracle};
use crate::settings::Settings;
use crate::utils::{chunk_message, truncate_message, MESSAGE_CHUNK_LIMIT};

/// Exchanges kept per channel for free-form chat context.
const MAX_HISTORY: usize = 10;
/// How many available players a recommendation prompt lists.
const POOL_PREVIEW: usize = 10;
/// Stat columns shown in player tables before they get too wide for chat.
const MAX_STAT_COLUMNS: usize = 4;

/// Everything that can go wrong handling a command. Each variant renders as
/// the reply sent back to the channel.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("No active draft in this channel! Start one with the `draft` command.")]
    NoActiveDraft,
    #[error("A draft is already running in this channel. Finish it before starting a new one.")]
    AlreadyActive,
    #[error("Player rankings are unavailable right now. Try again in a bit.")]
    DirectoryUnavailable,
    #[error("It's your pick! Add a position after the player name: PG, SG, SF, PF, C or UTIL.")]
    PositionRequired,
    #[error("'{0}' is not a position. Use PG, SG, SF, PF, C or UTIL.")]
    InvalidPosition(String),
    #[error("Give me at least 2 players to compare.")]
    InsufficientPlayers,
    #[error("Couldn't find '{0}' among the available players.")]
    PlayerNotFound(String),
    #[error("The assistant couldn't answer: {0}")]
    Oracle(String),
}

fn oracle_err(err: anyhow::Error) -> AgentError {
    AgentError::Oracle(format!("{err:#}"))
}

/// The bot's brain: owns all mutable state and the collaborator clients.
pub struct Agent {
    oracle: Oracle,
    http: reqwest::Client,
    news_url: String,
    strict_picks: bool,
    directory: Mutex<DirectoryCache>,
    drafts: Mutex<HashMap<u64, DraftState>>,
    history: Mutex<HashMap<u64, Vec<ChatMessage>>>,
}

impl Agent {
    pub fn new(settings: &Settings) -> Self {
        let http = reqwest::Client::new();
        Agent {
            oracle: Oracle::new(
                http.clone(),
                settings.oracle_url.clone(),
                settings.oracle_api_key.clone(),
                settings.oracle_model.clone(),
            ),
            directory: Mutex::new(DirectoryCache::new(
                http.clone(),
                settings.rankings_url.clone(),
                Duration::from_secs(settings.directory_ttl_secs),
            )),
            http,
            news_url: settings.news_url.clone(),
            strict_picks: settings.strict_picks,
            drafts: Mutex::new(HashMap::new()),
            history: Mutex::new(HashMap::new()),
        }
    }

    // -----------------------------------------------------------------
    // Free-form chat
    // -----------------------------------------------------------------

    /// Relay a non-command message to the model with this channel's recent
    /// history, and remember both sides of the exchange.
    pub async fn chat(&self, channel: u64, content: &str) -> Result<String, AgentError> {
        let snapshot = {
            let history = self.history.lock().await;
            history.get(&channel).cloned().unwrap_or_default()
        };

        let reply = self
            .oracle
            .complete(prompt::system_prompt(), content, &snapshot)
            .await
            .map_err(oracle_err)?;

        let mut history = self.history.lock().await;
        let entries = history.entry(channel).or_default();
        entries.push(ChatMessage::user(content));
        entries.push(ChatMessage::assistant(reply.clone()));
        cap_history(entries);

        Ok(reply)
    }

    // -----------------------------------------------------------------
    // Draft lifecycle
    // -----------------------------------------------------------------

    /// Start a draft in this channel, seeding the pool from the rankings.
    pub async fn start_draft(
        &self,
        channel: u64,
        rounds: u32,
        pick_position: u32,
        total_players: u32,
    ) -> Result<String, AgentError> {
        {
            let drafts = self.drafts.lock().await;
            if drafts.get(&channel).map_or(false, |d| d.active) {
                return Err(AgentError::AlreadyActive);
            }
        }

        let pool: Vec<String> = {
            let mut directory = self.directory.lock().await;
            directory.current().await.names().map(String::from).collect()
        };
        if pool.is_empty() {
            return Err(AgentError::DirectoryUnavailable);
        }

        let state = DraftState::new(rounds, pick_position, total_players, pool);
        let summary = format!(
            "Draft started! {} rounds, {} teams, you pick from slot {}.\n\
             {} players loaded into the pool.\n\
             Record every pick with `pick <pick_number> <player> [position]` — \
             a position is required on your own picks.",
            rounds,
            total_players,
            pick_position,
            state.available.len(),
        );

        log::info!(
            "Draft started in channel {channel}: {rounds} rounds, {total_players} teams, slot {pick_position}"
        );
        self.drafts.lock().await.insert(channel, state);
        Ok(summary)
    }

    /// Record one pick. `entry` is everything after the pick number: the
    /// player name, optionally followed by a position token. The supplied
    /// `pick_number` is echoed back but the engine's own counter stays
    /// authoritative.
    pub async fn record_pick(
        &self,
        channel: u64,
        pick_number: u32,
        entry: &str,
    ) -> Result<String, AgentError> {
        let mut drafts = self.drafts.lock().await;
        let state = drafts
            .get_mut(&channel)
            .filter(|d| d.active)
            .ok_or(AgentError::NoActiveDraft)?;

        let tokens: Vec<&str> = entry.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(AgentError::PlayerNotFound(entry.trim().to_string()));
        }

        let user_turn = state.is_user_turn();

        // On the user's turn the final token must name a lineup slot. On
        // other turns a trailing position token is optional.
        let (name_tokens, position) = if user_turn {
            if tokens.len() < 2 {
                return Err(AgentError::PositionRequired);
            }
            let last = tokens[tokens.len() - 1];
            let position = Position::parse(last)
                .ok_or_else(|| AgentError::InvalidPosition(last.to_string()))?;
            (&tokens[..tokens.len() - 1], position)
        } else {
            match tokens.last().and_then(|t| Position::parse(t)) {
                Some(position) if tokens.len() >= 2 => (&tokens[..tokens.len() - 1], position),
                _ => (&tokens[..], Position::Unassigned),
            }
        };
        let typed_name = name_tokens.join(" ");

        let name = match matching::resolve(&typed_name, state.available.iter().map(|s| s.as_str()))
        {
            Some(hit) => hit.to_string(),
            None if self.strict_picks => {
                return Err(AgentError::PlayerNotFound(typed_name));
            }
            None => typed_name.clone(),
        };

        state.record_pick(&name, position);
        log::info!("Channel {channel} pick {pick_number}: {name} ({position})");

        let mut reply = if position == Position::Unassigned {
            format!("Pick {pick_number} recorded: **{name}**")
        } else {
            format!("Pick {pick_number} recorded: **{name}** ({position})")
        };
        if user_turn {
            reply.push_str(" — added to your team!");
        }
        reply.push_str(&format!(
            "\nRound {} of {} | {} of {} picks made.",
            state.current_round(),
            state.total_rounds,
            state.picks_made,
            state.total_picks(),
        ));

        if !state.active {
            reply.push_str("\n\nThat's a wrap — the draft is complete! Your final team:\n");
            reply.push_str(&render_team(&state.my_team));
        } else if state.is_user_turn() {
            reply.push_str("\nYou're on the clock!");
        }

        Ok(reply)
    }

    /// Ask the model what to draft next. Works off-turn too, as a lookahead.
    pub async fn recommendation(&self, channel: u64) -> Result<Vec<String>, AgentError> {
        let (prompt_text, user_turn, next_slot, pick_position) = {
            let drafts = self.drafts.lock().await;
            let state = drafts
                .get(&channel)
                .filter(|d| d.active)
                .ok_or(AgentError::NoActiveDraft)?;
            let preview: Vec<String> = state.available.iter().take(POOL_PREVIEW).cloned().collect();
            (
                prompt::recommendation_prompt(state, &preview),
                state.is_user_turn(),
                state.next_slot(),
                state.pick_position,
            )
        };

        let reply = self
            .oracle
            .complete(prompt::system_prompt(), &prompt_text, &[])
            .await
            .map_err(oracle_err)?;

        let text = if user_turn {
            reply
        } else {
            format!(
                "(Lookahead: the next pick is slot {next_slot}, yours is slot {pick_position}.)\n\n{reply}"
            )
        };
        Ok(chunk_message(&text, MESSAGE_CHUNK_LIMIT))
    }

    /// Show the remaining pool during a draft, or the full rankings outside
    /// one, as a fixed-width table.
    pub async fn show_players(&self, channel: u64) -> Result<Vec<String>, AgentError> {
        let pool: Option<Vec<String>> = {
            let drafts = self.drafts.lock().await;
            drafts
                .get(&channel)
                .filter(|d| d.active)
                .map(|d| d.available.iter().cloned().collect())
        };

        let mut directory = self.directory.lock().await;
        let snapshot = directory.current().await;

        let (header, rows): (String, Vec<&PlayerRecord>) = match &pool {
            Some(names) => {
                if names.is_empty() {
                    return Ok(vec![
                        "The pool is empty — every ranked player is drafted.".to_string(),
                    ]);
                }
                let rows = snapshot
                    .records()
                    .iter()
                    .filter(|r| names.contains(&r.name))
                    .collect();
                (format!("Available players ({} left):", names.len()), rows)
            }
            None => {
                if snapshot.is_empty() {
                    return Err(AgentError::DirectoryUnavailable);
                }
                (
                    format!("All ranked players ({}):", snapshot.len()),
                    snapshot.records().iter().collect(),
                )
            }
        };

        let table = render_table(&rows);
        let mut chunks: Vec<String> = chunk_message(&table, MESSAGE_CHUNK_LIMIT - 20)
            .into_iter()
            .map(|chunk| format!("```\n{chunk}\n```"))
            .collect();
        chunks.insert(0, header);
        Ok(chunks)
    }

    /// Show the user's team grouped by position, with live stats where the
    /// directory recognizes the name.
    pub async fn show_my_team(&self, channel: u64) -> Result<Vec<String>, AgentError> {
        let (team, round, total_rounds, picks_made, total_picks) = {
            let drafts = self.drafts.lock().await;
            let state = drafts.get(&channel).ok_or(AgentError::NoActiveDraft)?;
            (
                state.my_team.clone(),
                state.current_round(),
                state.total_rounds,
                state.picks_made,
                state.total_picks(),
            )
        };

        if team.is_empty() {
            return Ok(vec![
                "You haven't drafted anyone yet. Your picks will show up here.".to_string(),
            ]);
        }

        let mut directory = self.directory.lock().await;
        let snapshot = directory.current().await;

        let mut text = format!(
            "Your team — round {round} of {total_rounds}, {picks_made}/{total_picks} picks:\n"
        );
        for (slot, members) in group_by_position(&team) {
            text.push_str(&format!("\n**{slot}**\n"));
            for player in members {
                match snapshot.resolve(&player.name) {
                    Some(record) => {
                        text.push_str(&format!(
                            "  {} — {}\n",
                            record.name,
                            render_stat_line(record)
                        ));
                    }
                    None => text.push_str(&format!("  {}\n", player.name)),
                }
            }
        }

        Ok(chunk_message(&text, MESSAGE_CHUNK_LIMIT))
    }

    // -----------------------------------------------------------------
    // Comparisons and news
    // -----------------------------------------------------------------

    /// Compare players: resolve each against the rankings, gather injury
    /// context per player, order by availability-adjusted rank, then ask for
    /// a final narrative.
    pub async fn compare_players(&self, names: &[String]) -> Result<String, AgentError> {
        if names.len() < 2 {
            return Err(AgentError::InsufficientPlayers);
        }

        let (resolved, worst_rank) = {
            let mut directory = self.directory.lock().await;
            let snapshot = directory.current().await;
            let resolved: Vec<(String, Option<u32>)> = names
                .iter()
                .map(|name| match snapshot.resolve(name) {
                    Some(record) => (record.name.clone(), Some(record.rank)),
                    None => (name.trim().to_string(), None),
                })
                .collect();
            (resolved, snapshot.len() as u32)
        };

        // One enrichment call per player, sequentially; a failed lookup
        // degrades to "no information" rather than sinking the comparison.
        let mut entries = Vec::with_capacity(resolved.len());
        for (name, rank) in resolved {
            let report = match self
                .oracle
                .complete(prompt::system_prompt(), &prompt::enrichment_prompt(&name), &[])
                .await
            {
                Ok(report) => report,
                Err(err) => {
                    log::warn!("Enrichment for '{name}' failed: {err:#}");
                    "No current information available.".to_string()
                }
            };
            let status = InjuryStatus::from_report(&report);
            entries.push(ComparisonEntry {
                name,
                rank,
                status,
                report: truncate_message(&report, 300),
            });
        }

        prompt::order_comparison(&mut entries, worst_rank);

        let narrative = self
            .oracle
            .complete(prompt::system_prompt(), &prompt::comparison_prompt(&entries), &[])
            .await
            .map_err(oracle_err)?;

        Ok(truncate_message(&narrative, MESSAGE_CHUNK_LIMIT))
    }

    /// Latest news digest for one player: scraped headlines, then a short
    /// summary from the model.
    pub async fn player_news(&self, name: &str) -> Result<Vec<String>, AgentError> {
        let canonical = {
            let mut directory = self.directory.lock().await;
            directory
                .current()
                .await
                .resolve(name)
                .map(|record| record.name.clone())
        }
        .unwrap_or_else(|| name.trim().to_string());

        let snippets = scrape::fetch_news_snippets(&self.http, &self.news_url, &canonical).await;
        if snippets.is_empty() {
            log::info!("No headlines found for '{canonical}', answering from model knowledge");
        }

        let reply = self
            .oracle
            .complete(
                prompt::system_prompt(),
                &prompt::news_prompt(&canonical, &snippets),
                &[],
            )
            .await
            .map_err(oracle_err)?;

        Ok(chunk_message(&reply, MESSAGE_CHUNK_LIMIT))
    }

    /// Test hook: replace the directory snapshot without hitting the network.
    #[cfg(test)]
    async fn prime_directory(&self, records: Vec<PlayerRecord>) {
        self.directory.lock().await.store(records);
    }
}

/// Keep only the newest `MAX_HISTORY` entries.
fn cap_history(entries: &mut Vec<ChatMessage>) {
    if entries.len() > MAX_HISTORY {
        entries.drain(..entries.len() - MAX_HISTORY);
    }
}

/// Group a team by position in display order, keeping pick order inside
/// each group.
fn group_by_position(team: &[DraftedPlayer]) -> Vec<(Position, Vec<&DraftedPlayer>)> {
    let mut groups: Vec<(Position, Vec<&DraftedPlayer>)> = Vec::new();
    for player in team {
        match groups.iter_mut().find(|(pos, _)| *pos == player.position) {
            Some((_, members)) => members.push(player),
            None => groups.push((player.position, vec![player])),
        }
    }
    groups.sort_by_key(|(pos, _)| pos.sort_order());
    groups
}

/// Compact position-grouped rendering used for the completion summary.
fn render_team(team: &[DraftedPlayer]) -> String {
    let mut out = String::new();
    for (slot, members) in group_by_position(team) {
        let names: Vec<&str> = members.iter().map(|p| p.name.as_str()).collect();
        out.push_str(&format!("{}: {}\n", slot, names.join(", ")));
    }
    out
}

fn is_rank_header(header: &str) -> bool {
    matches!(header.to_lowercase().as_str(), "rank" | "rk" | "#")
}

/// First few stats of a record as a one-line summary.
fn render_stat_line(record: &PlayerRecord) -> String {
    let parts: Vec<String> = record
        .stats
        .iter()
        .filter(|(header, _)| !is_rank_header(header))
        .take(3)
        .map(|(header, value)| format!("{header} {value}"))
        .collect();
    if parts.is_empty() {
        format!("rank #{}", record.rank)
    } else {
        parts.join(" | ")
    }
}

/// Fixed-width table over the given records. Column widths are recomputed
/// from the data on every call.
fn render_table(records: &[&PlayerRecord]) -> String {
    let stat_columns: Vec<String> = records
        .first()
        .map(|record| {
            record
                .stats
                .iter()
                .map(|(header, _)| header.clone())
                .filter(|header| !is_rank_header(header))
                .take(MAX_STAT_COLUMNS)
                .collect()
        })
        .unwrap_or_default();

    let mut header_row: Vec<String> = vec!["RANK".to_string(), "PLAYER".to_string()];
    header_row.extend(stat_columns.iter().cloned());

    let mut table: Vec<Vec<String>> = vec![header_row];
    for record in records {
        let mut row = vec![record.rank.to_string(), record.name.clone()];
        for column in &stat_columns {
            row.push(record.stat(column).unwrap_or("-").to_string());
        }
        table.push(row);
    }

    let columns = table[0].len();
    let widths: Vec<usize> = (0..columns)
        .map(|idx| {
            table
                .iter()
                .map(|row| row.get(idx).map_or(0, |cell| cell.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for row in &table {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}
