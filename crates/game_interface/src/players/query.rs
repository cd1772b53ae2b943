use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::players::criteria::{PlayerOrder, PlayerPage, PlayerSearchCriteria, SortDirection};
use crate::players::model::{Player, Profession, Race};

/// One condition on one player field. A search is the conjunction of its filters.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerFilter {
    NameContains(String),
    TitleContains(String),
    Race(Race),
    Profession(Profession),
    BirthdayBetween {
        after: DateTime<Utc>,
        before: DateTime<Utc>,
    },
    Banned(bool),
    ExperienceBetween { min: i32, max: i32 },
    LevelBetween { min: i32, max: i32 },
}

impl PlayerFilter {
    pub fn matches(&self, player: &Player) -> bool {
        match self {
            PlayerFilter::NameContains(name) => player.name.contains(name.as_str()),
            PlayerFilter::TitleContains(title) => player.title.contains(title.as_str()),
            PlayerFilter::Race(race) => player.race == *race,
            PlayerFilter::Profession(profession) => player.profession == *profession,
            PlayerFilter::BirthdayBetween { after, before } => {
                *after <= player.birthday && player.birthday <= *before
            }
            // A player without a ban flag matches neither true nor false.
            PlayerFilter::Banned(banned) => player.banned == Some(*banned),
            PlayerFilter::ExperienceBetween { min, max } => {
                *min <= player.experience && player.experience <= *max
            }
            PlayerFilter::LevelBetween { min, max } => *min <= player.level && player.level <= *max,
        }
    }
}

impl PlayerSearchCriteria {
    /// Optional filters are only added when present, the ranges always are.
    pub fn filters(&self) -> Vec<PlayerFilter> {
        let mut filters = Vec::new();

        if let Some(name) = &self.name {
            filters.push(PlayerFilter::NameContains(name.clone()));
        }
        if let Some(title) = &self.title {
            filters.push(PlayerFilter::TitleContains(title.clone()));
        }
        if let Some(race) = self.race {
            filters.push(PlayerFilter::Race(race));
        }
        if let Some(profession) = self.profession {
            filters.push(PlayerFilter::Profession(profession));
        }

        filters.push(PlayerFilter::BirthdayBetween {
            after: self.after,
            before: self.before,
        });

        if let Some(banned) = self.banned {
            filters.push(PlayerFilter::Banned(banned));
        }

        filters.push(PlayerFilter::ExperienceBetween {
            min: self.min_experience,
            max: self.max_experience,
        });
        filters.push(PlayerFilter::LevelBetween {
            min: self.min_level,
            max: self.max_level,
        });

        filters
    }
}

pub fn matches_all(filters: &[PlayerFilter], player: &Player) -> bool {
    filters.iter().all(|filter| filter.matches(player))
}

impl PlayerOrder {
    /// Compare two players on this column. Equal values fall back to the id, ascending,
    /// whatever the direction is.
    pub fn compare(&self, direction: SortDirection, a: &Player, b: &Player) -> Ordering {
        let ordering = match self {
            PlayerOrder::Id => a.id.cmp(&b.id),
            PlayerOrder::Name => a.name.cmp(&b.name),
            PlayerOrder::Experience => a.experience.cmp(&b.experience),
            PlayerOrder::Birthday => a.birthday.cmp(&b.birthday),
            PlayerOrder::Level => a.level.cmp(&b.level),
        };
        let ordering = match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };

        ordering.then_with(|| a.id.cmp(&b.id))
    }
}

/// A filtered, sorted page fetch ready to be executed by a record store.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerQuery {
    pub filters: Vec<PlayerFilter>,
    pub order: PlayerOrder,
    pub direction: SortDirection,
    pub offset: u64,
    pub limit: u64,
}

impl PlayerQuery {
    pub fn new(criteria: &PlayerSearchCriteria, page: &PlayerPage) -> Self {
        Self {
            filters: criteria.filters(),
            order: page.order,
            direction: page.direction,
            offset: page.offset(),
            limit: u64::from(page.page_size),
        }
    }
}
