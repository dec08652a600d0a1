use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::chat::ChatLog;
use super::location::Location;
use super::player::{Player, PlayerView, SelfView};
use super::role::{Role, Team};
use super::vote::VoteLedger;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Lobby,
    Night,
    Discussion,
    Vote,
    GameOver,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub max_players: usize,
    pub min_players: usize,
    pub impostor_count: usize,
    pub night_secs: u64,
    pub discussion_secs: u64,
    pub vote_secs: u64,
}

impl Default for GameSettings {
    fn default() -> Self {
        GameSettings {
            max_players: 10,
            min_players: 4,
            impostor_count: 2,
            night_secs: 45,
            discussion_secs: 60,
            vote_secs: 30,
        }
    }
}

impl GameSettings {
    /// Cap on any single phase duration; deadlines are i64 second arithmetic.
    pub const MAX_PHASE_SECS: u64 = 86_400;

    pub fn phase_secs(&self, phase: GamePhase) -> u64 {
        match phase {
            GamePhase::Night => self.night_secs,
            GamePhase::Discussion => self.discussion_secs,
            GamePhase::Vote => self.vote_secs,
            GamePhase::Lobby | GamePhase::GameOver => 0,
        }
    }

    pub fn durations_in_range(&self) -> bool {
        [self.night_secs, self.discussion_secs, self.vote_secs]
            .into_iter()
            .all(|secs| (1..=Self::MAX_PHASE_SECS).contains(&secs))
    }
}

/// A kill stays private until someone reports the body.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KillRecord {
    pub killer_id: String,
    pub victim_id: String,
    pub location: Location,
    pub round: u32,
    pub reported: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub join_code: String,
    pub phase: GamePhase,
    pub players: Vec<Player>,
    pub round: u32,
    pub host_id: String,
    pub settings: GameSettings,
    pub chat: ChatLog,
    pub votes: VoteLedger,
    pub kills: Vec<KillRecord>,
    pub tasks_done: HashMap<String, HashSet<String>>,
    pub winner: Option<Team>,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub phase_deadline: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(id: String, join_code: String, settings: GameSettings, mut host: Player) -> Self {
        host.is_host = true;
        let host_id = host.id.clone();
        let now = Utc::now();
        Session {
            id,
            join_code,
            phase: GamePhase::Lobby,
            players: vec![host],
            round: 0,
            host_id,
            settings,
            chat: ChatLog::default(),
            votes: VoteLedger::default(),
            kills: Vec::new(),
            tasks_done: HashMap::new(),
            winner: None,
            created_at: now,
            last_activity: now,
            phase_deadline: None,
        }
    }

    /// Marks player-driven activity; timer-driven mutations skip this so
    /// abandoned sessions still reach the idle sweeper.
    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn living(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_alive())
    }

    pub fn living_impostors(&self) -> usize {
        self.living().filter(|p| p.is_impostor()).count()
    }

    pub fn living_crew(&self) -> usize {
        self.living().filter(|p| !p.is_impostor()).count()
    }

    pub fn all_votes_cast(&self) -> bool {
        self.living().all(|p| self.votes.has_ballot(&p.id))
    }

    pub fn co_located(&self, a: &str, b: &str) -> bool {
        match (self.player(a), self.player(b)) {
            (Some(a), Some(b)) => a.location == b.location,
            _ => false,
        }
    }

    pub fn impostor_ids(&self) -> Vec<String> {
        self.players
            .iter()
            .filter(|p| p.is_impostor())
            .map(|p| p.id.clone())
            .collect()
    }

    /// Deals roles with a uniform random permutation: the first
    /// `impostor_count` positions of the shuffled order become impostors.
    /// Player list order itself is left untouched.
    pub fn assign_roles<R: Rng>(&mut self, rng: &mut R) {
        let mut order: Vec<usize> = (0..self.players.len()).collect();
        order.shuffle(rng);
        for (pos, idx) in order.into_iter().enumerate() {
            self.players[idx].role = Some(if pos < self.settings.impostor_count {
                Role::Impostor
            } else {
                Role::Crew
            });
        }
    }

    /// Win conditions, checked after every kill, elimination, and mid-game
    /// departure: crew wins when no impostor lives, impostors win at parity.
    pub fn check_win(&self) -> Option<Team> {
        let impostors = self.living_impostors();
        let crew = self.living_crew();
        if impostors == 0 {
            Some(Team::Crew)
        } else if impostors >= crew {
            Some(Team::Impostors)
        } else {
            None
        }
    }

    fn set_deadline(&mut self, phase: GamePhase) {
        let secs = self.settings.phase_secs(phase);
        self.phase_deadline = if secs > 0 {
            Some(Utc::now() + Duration::seconds(secs as i64))
        } else {
            None
        };
    }

    /// Each night starts with the living regrouped at spawn; bodies stay
    /// where they fell.
    pub fn enter_night(&mut self) {
        self.phase = GamePhase::Night;
        self.round += 1;
        for p in &mut self.players {
            if p.is_alive() {
                p.location = Location::SPAWN;
                p.in_vent = false;
            }
        }
        self.set_deadline(GamePhase::Night);
    }

    pub fn enter_discussion(&mut self) {
        self.phase = GamePhase::Discussion;
        self.set_deadline(GamePhase::Discussion);
    }

    /// Seeds an empty ballot ledger for the current round.
    pub fn enter_vote(&mut self) {
        self.phase = GamePhase::Vote;
        self.votes = VoteLedger::open(self.round);
        self.set_deadline(GamePhase::Vote);
    }

    pub fn enter_game_over(&mut self, winner: Team) {
        self.phase = GamePhase::GameOver;
        self.winner = Some(winner);
        self.phase_deadline = None;
        for p in &mut self.players {
            p.revealed = true;
        }
    }

    pub fn unreported_kill(&self, victim_id: &str) -> Option<&KillRecord> {
        self.kills
            .iter()
            .find(|k| k.victim_id == victim_id && !k.reported)
    }

    /// Redacted snapshot for one viewer (None = public/spectator view).
    /// Own role is visible, fellow impostors see each other, everything
    /// else stays hidden until the game reveals it.
    pub fn view_for(&self, viewer: Option<&str>) -> SessionView {
        let viewer_player = viewer.and_then(|id| self.player(id));
        let viewer_is_impostor = viewer_player.map(|p| p.is_impostor()).unwrap_or(false);

        let players = self
            .players
            .iter()
            .map(|p| {
                let own = viewer == Some(p.id.as_str());
                let ally = viewer_is_impostor && p.is_impostor();
                let role = if p.revealed || own || ally { p.role } else { None };
                p.view_with_role(role)
            })
            .collect();

        let you = viewer_player.map(|p| SelfView {
            id: p.id.clone(),
            role: p.role,
            location: p.location,
            in_vent: p.in_vent,
            tasks_done: {
                let mut done: Vec<String> = self
                    .tasks_done
                    .get(&p.id)
                    .map(|s| s.iter().cloned().collect())
                    .unwrap_or_default();
                done.sort();
                done
            },
            visible_players: self
                .players
                .iter()
                .filter(|o| {
                    o.id != p.id && o.is_alive() && !o.in_vent && o.location == p.location
                })
                .map(|o| o.id.clone())
                .collect(),
            visible_bodies: self
                .kills
                .iter()
                .filter(|k| !k.reported && k.location == p.location)
                .map(|k| k.victim_id.clone())
                .collect(),
        });

        SessionView {
            id: self.id.clone(),
            join_code: self.join_code.clone(),
            phase: self.phase,
            round: self.round,
            players,
            phase_deadline: self.phase_deadline,
            winner: self.winner,
            you,
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id.clone(),
            join_code: self.join_code.clone(),
            phase: self.phase,
            round: self.round,
            player_count: self.players.len(),
            max_players: self.settings.max_players,
            created_at: self.created_at,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionView {
    pub id: String,
    pub join_code: String,
    pub phase: GamePhase,
    pub round: u32,
    pub players: Vec<PlayerView>,
    pub phase_deadline: Option<DateTime<Utc>>,
    pub winner: Option<Team>,
    /// Present only on per-viewer requests.
    pub you: Option<SelfView>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    pub join_code: String,
    pub phase: GamePhase,
    pub round: u32,
    pub player_count: usize,
    pub max_players: usize,
    pub created_at: DateTime<Utc>,
}
