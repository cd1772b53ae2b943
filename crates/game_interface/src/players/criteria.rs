use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::players::model::{Profession, Race};
use crate::players::validation::{ValidationError, ValidationResult};

pub const DEFAULT_PAGE_NUMBER: u32 = 0;
pub const DEFAULT_PAGE_SIZE: u32 = 3;

/// Columns a player list can be sorted by.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerOrder {
    #[default]
    Id,
    Name,
    Experience,
    Birthday,
    Level,
}

impl PlayerOrder {
    pub fn field_name(&self) -> &'static str {
        match self {
            PlayerOrder::Id => "id",
            PlayerOrder::Name => "name",
            PlayerOrder::Experience => "experience",
            PlayerOrder::Birthday => "birthday",
            PlayerOrder::Level => "level",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Normalized filters of one search. The ranges are always set,
/// absent bounds are widened to the full range of their type.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSearchCriteria {
    pub name: Option<String>,
    pub title: Option<String>,
    pub race: Option<Race>,
    pub profession: Option<Profession>,
    pub after: DateTime<Utc>,
    pub before: DateTime<Utc>,
    pub banned: Option<bool>,
    pub min_experience: i32,
    pub max_experience: i32,
    pub min_level: i32,
    pub max_level: i32,
}

impl Default for PlayerSearchCriteria {
    fn default() -> Self {
        Self {
            name: None,
            title: None,
            race: None,
            profession: None,
            after: DateTime::<Utc>::MIN_UTC,
            before: DateTime::<Utc>::MAX_UTC,
            banned: None,
            min_experience: 0,
            max_experience: i32::MAX,
            min_level: 0,
            max_level: i32::MAX,
        }
    }
}

/// Pagination and sorting of one list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerPage {
    pub page_number: u32,
    pub page_size: u32,
    pub order: PlayerOrder,
    pub direction: SortDirection,
}

impl Default for PlayerPage {
    fn default() -> Self {
        Self {
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
            order: PlayerOrder::Id,
            direction: SortDirection::Asc,
        }
    }
}

// Stores take a signed 64 bits skip.
const MAX_OFFSET: u64 = i64::MAX as u64;

impl PlayerPage {
    /// A negative page number or a page size lower than 1 is rejected, as is a page
    /// starting past the largest offset a store can skip to.
    pub fn new(
        page_number: i64,
        page_size: i64,
        order: PlayerOrder,
        direction: SortDirection,
    ) -> ValidationResult<Self> {
        let page_number =
            u32::try_from(page_number).map_err(|_| ValidationError::InvalidPageNumber)?;
        let page_size = u32::try_from(page_size).map_err(|_| ValidationError::InvalidPageSize)?;
        if page_size == 0 {
            return Err(ValidationError::InvalidPageSize);
        }
        if u64::from(page_number) * u64::from(page_size) > MAX_OFFSET {
            return Err(ValidationError::InvalidPageNumber);
        }

        Ok(Self {
            page_number,
            page_size,
            order,
            direction,
        })
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page_number) * u64::from(self.page_size)
    }
}

/// Query string of the list and count calls. The count call ignores the paging members.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetPlayersQuery {
    pub name: Option<String>,
    pub title: Option<String>,
    pub race: Option<Race>,
    pub profession: Option<Profession>,
    pub after: Option<i64>, // epoch milliseconds
    pub before: Option<i64>,
    pub banned: Option<bool>,
    pub min_experience: Option<i32>,
    pub max_experience: Option<i32>,
    pub min_level: Option<i32>,
    pub max_level: Option<i32>,
    pub order: Option<PlayerOrder>,
    pub direction: Option<SortDirection>,
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
}

fn timestamp(millis: Option<i64>, field: &'static str) -> ValidationResult<Option<DateTime<Utc>>> {
    millis
        .map(|millis| {
            DateTime::<Utc>::from_timestamp_millis(millis)
                .ok_or(ValidationError::InvalidTimestamp(field))
        })
        .transpose()
}

impl GetPlayersQuery {
    /// Fill the absent bounds with their defaults. The bounds are not checked against each other.
    pub fn criteria(&self) -> ValidationResult<PlayerSearchCriteria> {
        let defaults = PlayerSearchCriteria::default();

        Ok(PlayerSearchCriteria {
            name: self.name.clone(),
            title: self.title.clone(),
            race: self.race,
            profession: self.profession,
            after: timestamp(self.after, "after")?.unwrap_or(defaults.after),
            before: timestamp(self.before, "before")?.unwrap_or(defaults.before),
            banned: self.banned,
            min_experience: self.min_experience.unwrap_or(defaults.min_experience),
            max_experience: self.max_experience.unwrap_or(defaults.max_experience),
            min_level: self.min_level.unwrap_or(defaults.min_level),
            max_level: self.max_level.unwrap_or(defaults.max_level),
        })
    }

    pub fn page(&self) -> ValidationResult<PlayerPage> {
        PlayerPage::new(
            self.page_number.unwrap_or(i64::from(DEFAULT_PAGE_NUMBER)),
            self.page_size.unwrap_or(i64::from(DEFAULT_PAGE_SIZE)),
            self.order.unwrap_or_default(),
            self.direction.unwrap_or_default(),
        )
    }
}
