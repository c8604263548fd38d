// Draft state: pick counter, turn order, roster, available pool.

use linked_hash_set::LinkedHashSet;

use super::roster::{roster_needs, Position};

/// A single recorded selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftedPlayer {
    pub name: String,
    pub position: Position,
}

/// The full state of one channel's draft.
///
/// Pure bookkeeping: no I/O, no clock. The pick counter is the single source
/// of truth for turn order and round arithmetic; pick numbers supplied by
/// users are display labels and never enter the math.
#[derive(Debug, Clone)]
pub struct DraftState {
    /// Number of rounds to draft.
    pub total_rounds: u32,
    /// The user's slot in the draft order, 1-based.
    pub pick_position: u32,
    /// Number of drafting teams.
    pub total_players: u32,
    /// Picks recorded so far across the whole draft.
    pub picks_made: u32,
    /// Full draft history, insertion order = pick order.
    pub drafted: Vec<DraftedPlayer>,
    /// Subsequence of `drafted` recorded on the user's turn.
    pub my_team: Vec<DraftedPlayer>,
    /// Undrafted pool, iteration order = ranking order at draft start.
    pub available: LinkedHashSet<String>,
    /// False before the first start and after the final pick.
    pub active: bool,
}

impl DraftState {
    /// Create an active draft seeded with the given player pool in ranking
    /// order. Duplicate pool names collapse to their first occurrence.
    pub fn new(
        total_rounds: u32,
        pick_position: u32,
        total_players: u32,
        pool: impl IntoIterator<Item = String>,
    ) -> Self {
        let mut available = LinkedHashSet::new();
        for name in pool {
            // Guarded so a duplicate never refreshes its ranking slot.
            if !available.contains(&name) {
                available.insert(name);
            }
        }

        DraftState {
            total_rounds,
            pick_position,
            total_players,
            picks_made: 0,
            drafted: Vec::new(),
            my_team: Vec::new(),
            available,
            active: true,
        }
    }

    /// Total picks in the whole draft.
    pub fn total_picks(&self) -> u32 {
        self.total_rounds * self.total_players
    }

    /// Round of the upcoming pick, 1-based: flips as soon as a round's
    /// picks are all in, and stays clamped to the final round once the
    /// draft is over.
    pub fn current_round(&self) -> u32 {
        let round = self.picks_made / self.total_players + 1;
        round.min(self.total_rounds.max(1))
    }

    /// Slot on the clock for the *next* pick, 1-based.
    pub fn next_slot(&self) -> u32 {
        self.picks_made % self.total_players + 1
    }

    /// Whether the next pick belongs to the user.
    pub fn is_user_turn(&self) -> bool {
        self.next_slot() == self.pick_position
    }

    /// Record one pick.
    ///
    /// Removes the name from the pool if present (off-list names are
    /// tolerated and leave the pool untouched), attributes the pick to the
    /// user's team when recorded on the user's turn, and deactivates the
    /// draft once the pick threshold is reached.
    pub fn record_pick(&mut self, name: &str, position: Position) {
        let pick = DraftedPlayer {
            name: name.to_string(),
            position,
        };

        // Turn test must run against the pre-increment counter.
        if self.is_user_turn() {
            self.my_team.push(pick.clone());
        }

        self.available.remove(name);
        self.drafted.push(pick);
        self.picks_made += 1;

        if self.picks_made >= self.total_picks() {
            self.active = false;
        }
    }

    /// Remaining demand per required slot for the user's team.
    pub fn roster_needs(&self) -> Vec<(Position, u32)> {
        let held: Vec<Position> = self.my_team.iter().map(|p| p.position).collect();
        roster_needs(&held)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn new_draft_is_active_and_empty() {
        let state = DraftState::new(2, 3, 4, pool(&["A", "B", "C"]));
        assert!(state.active);
        assert_eq!(state.picks_made, 0);
        assert_eq!(state.current_round(), 1);
        assert_eq!(state.available.len(), 3);
        assert!(state.drafted.is_empty());
        assert!(state.my_team.is_empty());
    }

    #[test]
    fn pool_preserves_ranking_order() {
        let state = DraftState::new(1, 1, 2, pool(&["First", "Second", "Third"]));
        let order: Vec<&String> = state.available.iter().collect();
        assert_eq!(order, ["First", "Second", "Third"]);
    }

    #[test]
    fn duplicate_pool_names_keep_first_slot() {
        let state = DraftState::new(1, 1, 2, pool(&["A", "B", "A"]));
        assert_eq!(state.available.len(), 2);
        let order: Vec<&String> = state.available.iter().collect();
        assert_eq!(order, ["A", "B"]);
    }

    #[test]
    fn picks_made_tracks_record_calls() {
        let mut state = DraftState::new(3, 1, 4, pool(&[]));
        for i in 0..5 {
            assert_eq!(state.picks_made, i);
            state.record_pick(&format!("Player {i}"), Position::Unassigned);
        }
        assert_eq!(state.picks_made, 5);
        assert_eq!(state.drafted.len(), 5);
    }

    #[test]
    fn round_advances_every_total_players_picks() {
        let mut state = DraftState::new(3, 1, 4, pool(&[]));
        assert_eq!(state.current_round(), 1);
        for i in 0..3 {
            state.record_pick(&format!("R1P{i}"), Position::Unassigned);
        }
        assert_eq!(state.current_round(), 1);
        // The fourth pick closes round 1; the counter now points at round 2.
        state.record_pick("R1P3", Position::Unassigned);
        assert_eq!(state.current_round(), 2);
    }

    #[test]
    fn round_caps_at_the_final_round() {
        let mut state = DraftState::new(1, 1, 2, pool(&[]));
        state.record_pick("a", Position::Center);
        state.record_pick("b", Position::Unassigned);
        assert!(!state.active);
        assert_eq!(state.current_round(), 1);
    }

    #[test]
    fn user_turn_cycles_with_pick_position() {
        let state = DraftState::new(2, 3, 4, pool(&[]));
        // Next pick is slot 1, the user sits at slot 3.
        assert_eq!(state.next_slot(), 1);
        assert!(!state.is_user_turn());

        let mut state = state;
        state.record_pick("one", Position::Unassigned);
        state.record_pick("two", Position::Unassigned);
        assert_eq!(state.next_slot(), 3);
        assert!(state.is_user_turn());
    }

    #[test]
    fn my_team_gets_exactly_the_users_picks() {
        // Worked example: 2 rounds, user at slot 3 of 4.
        let mut state = DraftState::new(2, 3, 4, pool(&["W", "X", "Y", "Z"]));

        state.record_pick("W", Position::Unassigned);
        state.record_pick("Y", Position::Unassigned);
        state.record_pick("X", Position::PointGuard); // pick 3: the user's
        state.record_pick("Z", Position::Unassigned);

        assert_eq!(state.my_team.len(), 1);
        assert_eq!(state.my_team[0].name, "X");
        assert_eq!(state.my_team[0].position, Position::PointGuard);
        assert_eq!(state.current_round(), 2);

        for i in 0..3 {
            state.record_pick(&format!("r2-{i}"), Position::Unassigned);
        }
        // Pick 7 was slot 3 again.
        assert_eq!(state.my_team.len(), 2);
        assert_eq!(state.my_team[1].name, "r2-0");
    }

    #[test]
    fn draft_deactivates_at_pick_threshold() {
        let mut state = DraftState::new(2, 3, 4, pool(&[]));
        for i in 0..7 {
            state.record_pick(&format!("p{i}"), Position::Unassigned);
            assert!(state.active, "still active after pick {}", i + 1);
        }
        state.record_pick("p7", Position::Unassigned);
        assert!(!state.active);
        assert_eq!(state.picks_made, 8);
    }

    #[test]
    fn pool_name_removed_exactly_once() {
        let mut state = DraftState::new(2, 1, 2, pool(&["A", "B"]));
        state.record_pick("A", Position::Unassigned);
        assert_eq!(state.available.len(), 1);
        // Recording the same name again must not disturb the pool further.
        state.record_pick("A", Position::Unassigned);
        assert_eq!(state.available.len(), 1);
        assert!(state.available.contains("B"));
    }

    #[test]
    fn off_list_pick_leaves_pool_unchanged() {
        let mut state = DraftState::new(1, 1, 2, pool(&["A", "B"]));
        state.record_pick("Keeper Guy", Position::Center);
        assert_eq!(state.available.len(), 2);
        assert_eq!(state.drafted[0].name, "Keeper Guy");
        // Slot 1 is the user's, so the off-list pick still joins the team.
        assert_eq!(state.my_team[0].name, "Keeper Guy");
    }

    #[test]
    fn roster_needs_reflect_my_team_only() {
        let mut state = DraftState::new(3, 1, 2, pool(&[]));
        state.record_pick("mine", Position::PointGuard); // slot 1: user
        state.record_pick("theirs", Position::PointGuard); // slot 2
        let needs = state.roster_needs();
        let pg = needs
            .iter()
            .find(|(s, _)| *s == Position::PointGuard)
            .unwrap()
            .1;
        assert_eq!(pg, 1, "only the user's PG counts against the need");
    }

    #[test]
    fn finished_draft_stays_inactive() {
        let mut state = DraftState::new(1, 1, 2, pool(&[]));
        state.record_pick("a", Position::Center);
        state.record_pick("b", Position::Unassigned);
        assert!(!state.active);
        state.record_pick("c", Position::Unassigned);
        assert!(!state.active);
    }
}
