//! Review data model, rating rules and rating aggregation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ids::{CourseId, ReviewId, UserId};
use super::user::UserSummary;
use super::validation::{FieldError, ValidationErrors, present};

/// Field error messages for `rating`.
pub const RATING_REQUIRED: &str = "A rating is required.";
pub const RATING_NOT_A_NUMBER: &str = "Rating must be a number.";
pub const RATING_TOO_LOW: &str = "A minimum rating of \"1\" is required.";
pub const RATING_TOO_HIGH: &str = "\"5\" is the maximum rating.";

/// Integer rating between 1 and 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

/// Error returned by [`Rating::from_input`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RatingError {
    #[error("Rating must be a number.")]
    NotANumber,
    #[error("A minimum rating of \"1\" is required.")]
    TooLow,
    #[error("\"5\" is the maximum rating.")]
    TooHigh,
}

impl Rating {
    /// Lowest accepted rating.
    pub const MIN: u8 = 1;
    /// Highest accepted rating.
    pub const MAX: u8 = 5;

    /// Round `raw` half-up, then check the range.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Rating;
    ///
    /// assert_eq!(Rating::from_input(3.5).unwrap().get(), 4);
    /// assert!(Rating::from_input(0.4).is_err());
    /// assert!(Rating::from_input(5.5).is_err());
    /// ```
    pub fn from_input(raw: f64) -> Result<Self, RatingError> {
        if !raw.is_finite() {
            return Err(RatingError::NotANumber);
        }
        let rounded = (raw + 0.5).floor();
        if rounded < f64::from(Self::MIN) {
            Err(RatingError::TooLow)
        } else if rounded > f64::from(Self::MAX) {
            Err(RatingError::TooHigh)
        } else {
            // Range checked above, so the cast is exact.
            Ok(Self(rounded as u8))
        }
    }

    /// Rebuild a rating loaded from storage.
    pub fn try_from_stored(value: i16) -> Result<Self, RatingError> {
        if value < i16::from(Self::MIN) {
            return Err(RatingError::TooLow);
        }
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= Self::MAX)
            .map(Self)
            .ok_or(RatingError::TooHigh)
    }

    /// Rating as an integer in `1..=5`.
    pub fn get(self) -> u8 {
        self.0
    }
}

/// Stored review record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: ReviewId,
    pub course: CourseId,
    pub author: UserId,
    pub posted_on: DateTime<Utc>,
    pub rating: Rating,
    pub review: Option<String>,
}

/// Review with its author resolved for output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDetail {
    pub id: ReviewId,
    /// Author summary; `None` when the author record no longer exists.
    pub user: Option<UserSummary>,
    pub posted_on: DateTime<Utc>,
    pub rating: Rating,
    pub review: Option<String>,
}

impl ReviewDetail {
    /// Pair a review with its resolved author.
    pub fn new(review: Review, author: Option<UserSummary>) -> Self {
        Self {
            id: review.id,
            user: author,
            posted_on: review.posted_on,
            rating: review.rating,
            review: review.review,
        }
    }
}

/// Raw review input.
///
/// `rating` is kept as loose JSON so numeric strings are accepted and other
/// shapes report a field error instead of a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReviewDraft {
    pub rating: Option<Value>,
    pub review: Option<String>,
}

/// Validated review fields supplied by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewContent {
    pub rating: Rating,
    pub review: Option<String>,
}

impl ReviewDraft {
    /// Check the rating and normalise the free text.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::ReviewDraft;
    /// use serde_json::json;
    ///
    /// let draft = ReviewDraft { rating: Some(json!("4")), review: None };
    /// assert_eq!(draft.validate().unwrap().rating.get(), 4);
    /// ```
    pub fn validate(self) -> Result<ReviewContent, Vec<FieldError>> {
        let mut errors = ValidationErrors::default();
        let rating = match parse_rating(self.rating.as_ref()) {
            Ok(rating) => Some(rating),
            Err(message) => {
                errors.push("rating", message);
                None
            }
        };
        match rating {
            Some(rating) => errors.into_result(ReviewContent {
                rating,
                review: present(self.review.as_deref()).map(str::to_owned),
            }),
            None => Err(errors.into_vec()),
        }
    }
}

fn parse_rating(raw: Option<&Value>) -> Result<Rating, &'static str> {
    let number = match raw {
        None | Some(Value::Null) => return Err(RATING_REQUIRED),
        Some(Value::Number(n)) => n.as_f64().ok_or(RATING_NOT_A_NUMBER)?,
        Some(Value::String(s)) => match present(Some(s)) {
            None => return Err(RATING_REQUIRED),
            Some(text) => text.parse::<f64>().map_err(|_| RATING_NOT_A_NUMBER)?,
        },
        Some(_) => return Err(RATING_NOT_A_NUMBER),
    };
    Rating::from_input(number).map_err(|err| match err {
        RatingError::NotANumber => RATING_NOT_A_NUMBER,
        RatingError::TooLow => RATING_TOO_LOW,
        RatingError::TooHigh => RATING_TOO_HIGH,
    })
}

/// Mean of `ratings` rounded half-up, or `0` when there are none.
///
/// # Examples
/// ```
/// use backend::domain::{Rating, overall_rating};
///
/// let ratings = [4.0, 5.0].map(|r| Rating::from_input(r).unwrap());
/// assert_eq!(overall_rating(ratings), 5);
/// assert_eq!(overall_rating([]), 0);
/// ```
pub fn overall_rating(ratings: impl IntoIterator<Item = Rating>) -> u8 {
    let (sum, count) = ratings
        .into_iter()
        .fold((0_u64, 0_u64), |(sum, count), r| (sum + u64::from(r.get()), count + 1));
    if count == 0 {
        return 0;
    }
    let rounded = (2 * sum + count) / (2 * count);
    u8::try_from(rounded).unwrap_or(Rating::MAX)
}
