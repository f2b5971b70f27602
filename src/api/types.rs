//! Upstream data types
//!
//! These mirror the JSON documents returned by the Leetify and VacList APIs.
//! Fields that upstream sometimes omits or sends as `null` fall back to defaults
//! so a sparse profile still deserializes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Opaque player key (a Steam64 id); equality is exact string equality
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for Identity {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A player profile as returned by `GET /v3/profile`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "steam64_id")]
    pub steam_id: Identity,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(rename = "winrate", default, deserialize_with = "null_as_default")]
    pub win_rate: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub total_matches: u32,

    #[serde(default, deserialize_with = "null_as_default")]
    pub bans: Vec<BanEntry>,

    #[serde(default)]
    pub ranks: Option<Ranks>,

    #[serde(default)]
    pub rating: Option<Rating>,

    #[serde(default)]
    pub stats: Option<PlayerStats>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub recent_teammates: Vec<Teammate>,
}

impl Profile {
    /// Creates a bare profile with no stats, bans or teammates
    pub fn new(steam_id: impl Into<Identity>, name: impl Into<String>) -> Self {
        Self {
            steam_id: steam_id.into(),
            name: name.into(),
            win_rate: 0.0,
            total_matches: 0,
            bans: Vec::new(),
            ranks: None,
            rating: None,
            stats: None,
            recent_teammates: Vec::new(),
        }
    }

    /// Builder-style helper that replaces the teammate list
    pub fn with_teammates<I, S>(mut self, teammates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Identity>,
    {
        self.recent_teammates = teammates
            .into_iter()
            .map(|id| Teammate {
                steam_id: id.into(),
                recent_matches_count: None,
            })
            .collect();
        self
    }

    /// Identities of recently-played-with teammates, in upstream order
    pub fn teammate_ids(&self) -> impl Iterator<Item = &Identity> {
        self.recent_teammates.iter().map(|t| &t.steam_id)
    }

    pub fn has_ban(&self) -> bool {
        !self.bans.is_empty()
    }
}

/// One entry of a player's ban history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BanEntry {
    #[serde(default)]
    pub platform: Option<String>,

    #[serde(default)]
    pub banned_since: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranks {
    #[serde(default)]
    pub premier: Option<i32>,

    #[serde(default)]
    pub faceit_elo: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rating {
    pub aim: f64,
    pub positioning: f64,
    pub utility: f64,
    pub clutch: f64,
    pub opening: f64,
    pub ct_leetify: f64,
    pub t_leetify: f64,
}

/// Aggregate per-player statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    pub accuracy_enemy_spotted: f64,
    pub accuracy_head: f64,
    pub counter_strafing_good_shots_ratio: f64,
    pub ct_opening_aggression_success_rate: f64,
    pub ct_opening_duel_success_percentage: f64,
    pub flashbang_hit_foe_avg_duration: f64,
    pub flashbang_hit_foe_per_flashbang: f64,
    pub flashbang_hit_friend_per_flashbang: f64,
    pub flashbang_leading_to_kill: f64,
    pub flashbang_thrown: f64,
    pub he_foes_damage_avg: f64,
    pub he_friends_damage_avg: f64,
    pub preaim: f64,
    pub reaction_time_ms: f64,
    pub spray_accuracy: f64,
    pub t_opening_aggression_success_rate: f64,
    pub t_opening_duel_success_percentage: f64,
    pub traded_deaths_success_percentage: f64,
    pub trade_kill_opportunities_per_round: f64,
    pub trade_kills_success_percentage: f64,
    pub utility_on_death_avg: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teammate {
    #[serde(rename = "steam64_id")]
    pub steam_id: Identity,

    #[serde(default)]
    pub recent_matches_count: Option<u32>,
}

/// Handle to one completed match from a player's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    #[serde(rename = "id")]
    pub match_id: String,

    #[serde(default)]
    pub finished_at: Option<String>,
}

impl MatchSummary {
    pub fn new(match_id: impl Into<String>) -> Self {
        Self {
            match_id: match_id.into(),
            finished_at: None,
        }
    }

    /// Parsed finish time; unparseable or missing timestamps yield `None`
    pub fn finished_at_utc(&self) -> Option<DateTime<Utc>> {
        self.finished_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Full match document with one stats row per participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDetail {
    #[serde(rename = "id")]
    pub match_id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub stats: Vec<MatchPlayerStats>,
}

impl MatchDetail {
    pub fn new<I, S>(match_id: impl Into<String>, participants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Identity>,
    {
        Self {
            match_id: match_id.into(),
            stats: participants
                .into_iter()
                .map(|id| MatchPlayerStats {
                    steam_id: Some(id.into()),
                    name: None,
                })
                .collect(),
        }
    }

    /// Distinct participant identities in roster order
    pub fn participants(&self) -> Vec<Identity> {
        let mut seen = HashSet::new();
        self.stats
            .iter()
            .filter_map(|row| row.steam_id.clone())
            .filter(|id| seen.insert(id.clone()))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPlayerStats {
    #[serde(rename = "steam64_id", default)]
    pub steam_id: Option<Identity>,

    #[serde(default)]
    pub name: Option<String>,
}

/// One row of the banned-player directory; only the Steam id is used
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BannedListing {
    #[serde(default)]
    pub steam_id: Option<Identity>,

    #[serde(default)]
    pub personaname: Option<String>,

    #[serde(default)]
    pub vac_bans: Option<u32>,

    #[serde(default)]
    pub game_bans: Option<u32>,
}
