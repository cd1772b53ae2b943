use std::fmt;

use chrono::{DateTime, Datelike, Utc};

use crate::players::model::{NewPlayer, PlayerRequest};

pub const MAX_NAME_LENGTH: usize = 12;
pub const MAX_TITLE_LENGTH: usize = 30;
pub const MAX_EXPERIENCE: i32 = 10_000_000;

/// First and last calendar day (UTC) accepted as a birthday.
pub const MIN_BIRTHDAY: (i32, u32, u32) = (2000, 1, 1);
pub const MAX_BIRTHDAY: (i32, u32, u32) = (3000, 12, 31);

/// The rule a rejected input violated. Every variant is reported as a bad request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    InvalidId,
    Missing(&'static str),
    NameLength,
    TitleLength,
    BirthdayOutOfRange,
    ExperienceOutOfRange,
    InvalidPageNumber,
    InvalidPageSize,
    InvalidTimestamp(&'static str),
    MalformedBody,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ValidationError::InvalidId => write!(f, "the id must be a positive number"),
            ValidationError::Missing(field) => write!(f, "missing mandatory field: {}", field),
            ValidationError::NameLength => write!(
                f,
                "the name must contain between 1 and {} characters",
                MAX_NAME_LENGTH
            ),
            ValidationError::TitleLength => write!(
                f,
                "the title must contain at most {} characters",
                MAX_TITLE_LENGTH
            ),
            ValidationError::BirthdayOutOfRange => write!(
                f,
                "the birthday must be between the years {} and {}",
                MIN_BIRTHDAY.0, MAX_BIRTHDAY.0
            ),
            ValidationError::ExperienceOutOfRange => write!(
                f,
                "the experience must be between 0 and {}",
                MAX_EXPERIENCE
            ),
            ValidationError::InvalidPageNumber => write!(f, "the page number cannot be negative"),
            ValidationError::InvalidPageSize => write!(f, "the page size must be positive"),
            ValidationError::InvalidTimestamp(field) => {
                write!(f, "'{}' is not a representable timestamp", field)
            }
            ValidationError::MalformedBody => {
                write!(f, "the body is not a valid player with members of the expected types")
            }
        }
    }
}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

pub fn validate_id(id: i64) -> ValidationResult<i64> {
    if id <= 0 {
        return Err(ValidationError::InvalidId);
    }
    Ok(id)
}

// Name and title lengths are counted in UTF-16 code units.
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let length = name.encode_utf16().count();
    if length == 0 || length > MAX_NAME_LENGTH {
        return Err(ValidationError::NameLength);
    }
    Ok(())
}

pub fn validate_title(title: &str) -> ValidationResult<()> {
    if title.encode_utf16().count() > MAX_TITLE_LENGTH {
        return Err(ValidationError::TitleLength);
    }
    Ok(())
}

pub fn validate_birthday(birthday: &DateTime<Utc>) -> ValidationResult<()> {
    let date = birthday.date_naive();
    let day = (date.year(), date.month(), date.day());

    if day < MIN_BIRTHDAY || day > MAX_BIRTHDAY {
        return Err(ValidationError::BirthdayOutOfRange);
    }
    Ok(())
}

pub fn validate_experience(experience: i32) -> ValidationResult<()> {
    if !(0..=MAX_EXPERIENCE).contains(&experience) {
        return Err(ValidationError::ExperienceOutOfRange);
    }
    Ok(())
}

impl PlayerRequest {
    /// Every member except `banned` is mandatory when creating a player.
    /// Missing members are reported before out of range ones.
    pub fn validate_for_create(self) -> ValidationResult<NewPlayer> {
        let name = self.name.ok_or(ValidationError::Missing("name"))?;
        let title = self.title.ok_or(ValidationError::Missing("title"))?;
        let race = self.race.ok_or(ValidationError::Missing("race"))?;
        let profession = self.profession.ok_or(ValidationError::Missing("profession"))?;
        let birthday = self.birthday.ok_or(ValidationError::Missing("birthday"))?;
        let experience = self.experience.ok_or(ValidationError::Missing("experience"))?;

        validate_experience(experience)?;
        validate_title(&title)?;
        validate_name(&name)?;
        validate_birthday(&birthday)?;

        Ok(NewPlayer {
            name,
            title,
            race,
            profession,
            birthday,
            banned: self.banned.unwrap_or(false),
            experience,
        })
    }

    /// Only the members that are present get checked.
    pub fn validate_for_update(&self) -> ValidationResult<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(birthday) = &self.birthday {
            validate_birthday(birthday)?;
        }
        if let Some(experience) = self.experience {
            validate_experience(experience)?;
        }
        Ok(())
    }
}
