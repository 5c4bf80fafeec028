//! Catalog item model: descriptive metadata per media kind composed with
//! one shared lending state.
//!
//! Books, DVDs and magazines only differ in the fields they describe. The
//! lending rules (availability, due date, overdue check and the loan duration
//! table) live in [`LendingState`] and [`lending_period_for`] and apply to
//! every kind alike.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

use super::user::UserCategory;

/// Loan duration for public users (10 days)
pub const PUBLIC_USER_LOAN_SECS: i64 = 864_000;
/// Loan duration for lecturers (15 days)
pub const LECTURER_LOAN_SECS: i64 = 1_296_000;
/// Loan duration for students (30 days)
pub const STUDENT_LOAN_SECS: i64 = 2_592_000;

/// Loan duration granted to a user category
pub fn lending_period_for(category: UserCategory) -> Duration {
    match category {
        UserCategory::PublicUser => Duration::seconds(PUBLIC_USER_LOAN_SECS),
        UserCategory::Lecturer => Duration::seconds(LECTURER_LOAN_SECS),
        UserCategory::Student => Duration::seconds(STUDENT_LOAN_SECS),
    }
}

// ---------------------------------------------------------------------------
// ItemKind
// ---------------------------------------------------------------------------

/// Media kind codes (numeric codes are part of the add-item contract)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum ItemKind {
    Book = 0,
    Dvd = 1,
    Magazine = 2,
}

impl ItemKind {
    /// All kinds, in display order
    pub const ALL: [ItemKind; 3] = [ItemKind::Book, ItemKind::Dvd, ItemKind::Magazine];
}

impl TryFrom<i64> for ItemKind {
    type Error = AppError;

    fn try_from(v: i64) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(ItemKind::Book),
            1 => Ok(ItemKind::Dvd),
            2 => Ok(ItemKind::Magazine),
            other => Err(AppError::InvalidVariant(other)),
        }
    }
}

// ---------------------------------------------------------------------------
// ItemDetails
// ---------------------------------------------------------------------------

/// Descriptive metadata, tagged by media kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ItemDetails {
    Book {
        author: String,
        isbn: String,
        page_count: i32,
    },
    Dvd {
        director: String,
        format: String,
        duration_minutes: i32,
        genre: String,
    },
    Magazine {
        publisher: String,
        issue_number: i32,
        issue: i32,
    },
}

/// A positional add-item field: a number or text. Any other JSON value is
/// kept as `Other` and refused when the item is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Text(String),
    Other(serde_json::Value),
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Integer(v)
    }
}

impl ItemDetails {
    pub fn kind(&self) -> ItemKind {
        match self {
            ItemDetails::Book { .. } => ItemKind::Book,
            ItemDetails::Dvd { .. } => ItemKind::Dvd,
            ItemDetails::Magazine { .. } => ItemKind::Magazine,
        }
    }

    /// Build the metadata of `kind` from positional fields.
    ///
    /// Book: author, isbn, page count.
    /// DVD: director, format, duration in minutes, genre.
    /// Magazine: publisher, issue number, issue.
    pub fn from_fields(kind: ItemKind, fields: &[FieldValue]) -> AppResult<Self> {
        let details = match kind {
            ItemKind::Book => ItemDetails::Book {
                author: text_field(fields, 0, "author")?,
                isbn: text_field(fields, 1, "isbn")?,
                page_count: integer_field(fields, 2, "page_count")?,
            },
            ItemKind::Dvd => ItemDetails::Dvd {
                director: text_field(fields, 0, "director")?,
                format: text_field(fields, 1, "format")?,
                duration_minutes: integer_field(fields, 2, "duration_minutes")?,
                genre: text_field(fields, 3, "genre")?,
            },
            ItemKind::Magazine => ItemDetails::Magazine {
                publisher: text_field(fields, 0, "publisher")?,
                issue_number: integer_field(fields, 1, "issue_number")?,
                issue: integer_field(fields, 2, "issue")?,
            },
        };
        Ok(details)
    }
}

fn text_field(fields: &[FieldValue], index: usize, name: &str) -> AppResult<String> {
    match fields.get(index) {
        Some(FieldValue::Text(s)) => Ok(s.clone()),
        Some(FieldValue::Integer(v)) => Ok(v.to_string()),
        Some(FieldValue::Other(v)) => Err(AppError::Validation(format!(
            "Field '{}' must be text, got {}",
            name, v
        ))),
        None => Err(AppError::Validation(format!("Missing field '{}' at position {}", name, index))),
    }
}

fn integer_field(fields: &[FieldValue], index: usize, name: &str) -> AppResult<i32> {
    let value = match fields.get(index) {
        Some(FieldValue::Integer(v)) => *v,
        Some(FieldValue::Text(s)) => s.trim().parse::<i64>().map_err(|_| {
            AppError::Validation(format!("Field '{}' must be an integer, got '{}'", name, s))
        })?,
        Some(FieldValue::Other(v)) => {
            return Err(AppError::Validation(format!(
                "Field '{}' must be an integer, got {}",
                name, v
            )))
        }
        None => {
            return Err(AppError::Validation(format!(
                "Missing field '{}' at position {}",
                name, index
            )))
        }
    };

    i32::try_from(value)
        .map_err(|_| AppError::Validation(format!("Field '{}' is out of range: {}", name, value)))
}

// ---------------------------------------------------------------------------
// LendingState
// ---------------------------------------------------------------------------

/// Loan state shared by every item kind. The due date only exists while on loan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LendingState {
    #[default]
    Available,
    OnLoan { due_date: DateTime<Utc> },
}

impl LendingState {
    pub fn is_available(&self) -> bool {
        matches!(self, LendingState::Available)
    }

    pub fn due_date(&self) -> Option<DateTime<Utc>> {
        match self {
            LendingState::Available => None,
            LendingState::OnLoan { due_date } => Some(*due_date),
        }
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_date().map(|due| due < now).unwrap_or(false)
    }

    /// Put the item on loan; `None` if it is already out
    fn lend(&mut self, category: UserCategory, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if !self.is_available() {
            return None;
        }
        let due_date = now + lending_period_for(category);
        *self = LendingState::OnLoan { due_date };
        Some(due_date)
    }

    /// Bring the item back; `false` if it was not on loan
    fn release(&mut self) -> bool {
        if self.is_available() {
            return false;
        }
        *self = LendingState::Available;
        true
    }
}

// ---------------------------------------------------------------------------
// CatalogItem
// ---------------------------------------------------------------------------

/// A lendable catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    title: String,
    details: ItemDetails,
    state: LendingState,
}

impl CatalogItem {
    pub fn new(title: impl Into<String>, details: ItemDetails) -> Self {
        Self {
            title: title.into(),
            details,
            state: LendingState::Available,
        }
    }

    pub fn book(title: &str, author: &str, isbn: &str, page_count: i32) -> Self {
        Self::new(
            title,
            ItemDetails::Book {
                author: author.to_string(),
                isbn: isbn.to_string(),
                page_count,
            },
        )
    }

    pub fn dvd(title: &str, director: &str, format: &str, duration_minutes: i32, genre: &str) -> Self {
        Self::new(
            title,
            ItemDetails::Dvd {
                director: director.to_string(),
                format: format.to_string(),
                duration_minutes,
                genre: genre.to_string(),
            },
        )
    }

    pub fn magazine(title: &str, publisher: &str, issue_number: i32, issue: i32) -> Self {
        Self::new(
            title,
            ItemDetails::Magazine {
                publisher: publisher.to_string(),
                issue_number,
                issue,
            },
        )
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> ItemKind {
        self.details.kind()
    }

    pub fn details(&self) -> &ItemDetails {
        &self.details
    }

    pub fn is_available(&self) -> bool {
        self.state.is_available()
    }

    pub fn due_date(&self) -> Option<DateTime<Utc>> {
        self.state.due_date()
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.state.is_overdue(now)
    }

    /// Lend this item for the loan duration of `category`, returning the due date
    pub fn lend(&mut self, category: UserCategory, now: DateTime<Utc>) -> AppResult<DateTime<Utc>> {
        self.state
            .lend(category, now)
            .ok_or_else(|| AppError::Unavailable(self.title.clone()))
    }

    /// Mark this item as returned
    pub fn return_item(&mut self) -> AppResult<()> {
        if self.state.release() {
            Ok(())
        } else {
            Err(AppError::AlreadyAvailable(self.title.clone()))
        }
    }

    pub fn view(&self, now: DateTime<Utc>) -> ItemView {
        ItemView {
            title: self.title.clone(),
            details: self.details.clone(),
            available: self.is_available(),
            due_date: self.due_date(),
            overdue: self.is_overdue(now),
        }
    }
}

/// Catalog item as rendered to API clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ItemView {
    pub title: String,
    pub details: ItemDetails,
    pub available: bool,
    pub due_date: Option<DateTime<Utc>>,
    pub overdue: bool,
}
