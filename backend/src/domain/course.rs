//! Course data model and content rules.
//!
//! A course owns an ordered list of steps and an ordered set of review
//! references. Only the editable content ([`CourseContent`]) changes after
//! creation; the owner and the review set are managed separately.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ids::{CourseId, ReviewId, UserId};
use super::review::ReviewDetail;
use super::user::UserSummary;
use super::validation::{FieldError, ValidationErrors, present};

/// Field error messages reported by [`CourseDraft::validate`].
pub const TITLE_REQUIRED: &str = "A title is required.";
pub const DESCRIPTION_REQUIRED: &str = "A description is required.";
pub const STEPS_REQUIRED: &str = "At least one step is required.";
pub const STEP_TITLE_REQUIRED: &str = "Step must have a title.";
pub const STEP_DESCRIPTION_REQUIRED: &str = "Step must have a description.";
pub const STEP_NUMBER_INVALID: &str = "Step number must be a whole number.";

/// One instruction in a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub step_number: u32,
    pub title: String,
    pub description: String,
}

/// Validated, editable course fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseContent {
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub steps: Vec<Step>,
}

/// Stored course record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: CourseId,
    pub owner: UserId,
    pub content: CourseContent,
    pub reviews: Vec<ReviewId>,
}

impl Course {
    /// List projection of this course.
    pub fn summary(&self) -> CourseSummary {
        CourseSummary {
            id: self.id,
            title: self.content.title.clone(),
        }
    }
}

/// List projection of a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseSummary {
    pub id: CourseId,
    pub title: String,
}

/// Course with owner and reviews resolved for output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetail {
    pub id: CourseId,
    /// Owner summary; `None` when the owner record no longer exists.
    pub user: Option<UserSummary>,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub steps: Vec<Step>,
    pub reviews: Vec<ReviewDetail>,
    pub overall_rating: u8,
}

/// Raw step input.
///
/// `step_number` is loose JSON; whole numbers and numeric strings are
/// accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDraft {
    pub step_number: Option<Value>,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Raw create or update input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub steps: Option<Vec<StepDraft>>,
}

impl CourseDraft {
    /// Check every field, collecting all failures.
    ///
    /// Blank strings count as missing. A step without a number takes its
    /// 1-based position.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{CourseDraft, StepDraft};
    ///
    /// let draft = CourseDraft {
    ///     title: Some("Bread".into()),
    ///     description: Some("Bake a loaf".into()),
    ///     steps: Some(vec![StepDraft {
    ///         step_number: None,
    ///         title: Some("Knead".into()),
    ///         description: Some("Ten minutes".into()),
    ///     }]),
    ///     ..CourseDraft::default()
    /// };
    /// let content = draft.validate().unwrap();
    /// assert_eq!(content.steps[0].step_number, 1);
    /// ```
    pub fn validate(self) -> Result<CourseContent, Vec<FieldError>> {
        let mut errors = ValidationErrors::default();

        let title = present(self.title.as_deref()).map(str::to_owned);
        if title.is_none() {
            errors.push("title", TITLE_REQUIRED);
        }
        let description = present(self.description.as_deref()).map(str::to_owned);
        if description.is_none() {
            errors.push("description", DESCRIPTION_REQUIRED);
        }

        let drafts = self.steps.unwrap_or_default();
        if drafts.is_empty() {
            errors.push("steps", STEPS_REQUIRED);
        }
        let mut steps = Vec::with_capacity(drafts.len());
        for (index, step) in drafts.into_iter().enumerate() {
            let step_title = present(step.title.as_deref()).map(str::to_owned);
            if step_title.is_none() {
                errors.push(format!("steps[{index}].title"), STEP_TITLE_REQUIRED);
            }
            let step_description = present(step.description.as_deref()).map(str::to_owned);
            if step_description.is_none() {
                errors.push(
                    format!("steps[{index}].description"),
                    STEP_DESCRIPTION_REQUIRED,
                );
            }
            let position = u32::try_from(index + 1).unwrap_or(u32::MAX);
            let step_number = match parse_step_number(step.step_number.as_ref()) {
                Ok(number) => Some(number.unwrap_or(position)),
                Err(message) => {
                    errors.push(format!("steps[{index}].stepNumber"), message);
                    None
                }
            };
            if let (Some(step_number), Some(title), Some(description)) =
                (step_number, step_title, step_description)
            {
                steps.push(Step {
                    step_number,
                    title,
                    description,
                });
            }
        }

        match (title, description) {
            (Some(title), Some(description)) if errors.is_empty() => Ok(CourseContent {
                title,
                description,
                estimated_time: present(self.estimated_time.as_deref()).map(str::to_owned),
                materials_needed: present(self.materials_needed.as_deref()).map(str::to_owned),
                steps,
            }),
            _ => Err(errors.into_vec()),
        }
    }
}

/// `Ok(None)` means the number was left out.
fn parse_step_number(raw: Option<&Value>) -> Result<Option<u32>, &'static str> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or(STEP_NUMBER_INVALID),
        Some(Value::String(s)) => match present(Some(s)) {
            None => Ok(None),
            Some(text) => text.parse::<u32>().map(Some).map_err(|_| STEP_NUMBER_INVALID),
        },
        Some(_) => Err(STEP_NUMBER_INVALID),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    fn step(title: Option<&str>, description: Option<&str>) -> StepDraft {
        StepDraft {
            step_number: None,
            title: title.map(Into::into),
            description: description.map(Into::into),
        }
    }

    #[fixture]
    fn draft() -> CourseDraft {
        CourseDraft {
            title: Some("Build a Basic Bookcase".into()),
            description: Some("High-end furniture projects are great to dream about.".into()),
            estimated_time: Some("12 hours".into()),
            materials_needed: Some("* 1x2 common pine".into()),
            steps: Some(vec![
                step(Some("Measure"), Some("Measure twice.")),
                step(Some("Cut"), Some("Cut once.")),
            ]),
        }
    }

    fn fields(errors: &[FieldError]) -> Vec<(&str, &str)> {
        errors
            .iter()
            .map(|e| (e.field.as_str(), e.message.as_str()))
            .collect()
    }

    #[rstest]
    fn valid_draft_numbers_steps_by_position(draft: CourseDraft) {
        let content = draft.validate().expect("valid draft");
        let numbers: Vec<_> = content.steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, [1, 2]);
        assert_eq!(content.estimated_time.as_deref(), Some("12 hours"));
    }

    #[rstest]
    fn explicit_step_numbers_are_kept(mut draft: CourseDraft) {
        if let Some(steps) = draft.steps.as_mut() {
            steps[0].step_number = Some(json!(7));
        }
        let content = draft.validate().expect("valid draft");
        assert_eq!(content.steps[0].step_number, 7);
        assert_eq!(content.steps[1].step_number, 2);
    }

    #[rstest]
    fn empty_draft_reports_required_fields() {
        let errors = CourseDraft::default().validate().expect_err("empty draft");
        assert_eq!(
            fields(&errors),
            [
                ("title", TITLE_REQUIRED),
                ("description", DESCRIPTION_REQUIRED),
                ("steps", STEPS_REQUIRED),
            ]
        );
    }

    #[rstest]
    fn blank_strings_count_as_missing(mut draft: CourseDraft) {
        draft.title = Some("   ".into());
        draft.steps = Some(vec![step(Some(" "), None)]);
        let errors = draft.validate().expect_err("blank fields");
        assert_eq!(
            fields(&errors),
            [
                ("title", TITLE_REQUIRED),
                ("steps[0].title", STEP_TITLE_REQUIRED),
                ("steps[0].description", STEP_DESCRIPTION_REQUIRED),
            ]
        );
    }

    #[rstest]
    fn blank_optional_fields_are_dropped(mut draft: CourseDraft) {
        draft.estimated_time = Some("  ".into());
        let content = draft.validate().expect("valid draft");
        assert_eq!(content.estimated_time, None);
    }

    #[rstest]
    #[case(json!("3"), 3)]
    #[case(json!(" 4 "), 4)]
    #[case(json!(""), 1)]
    #[case(Value::Null, 1)]
    fn numeric_strings_and_blanks_are_accepted(
        mut draft: CourseDraft,
        #[case] raw: Value,
        #[case] expected: u32,
    ) {
        if let Some(steps) = draft.steps.as_mut() {
            steps[0].step_number = Some(raw);
        }
        let content = draft.validate().expect("valid draft");
        assert_eq!(content.steps[0].step_number, expected);
    }

    #[rstest]
    #[case(json!(-1))]
    #[case(json!(1.5))]
    #[case(json!("first"))]
    #[case(json!([1]))]
    fn unusable_step_numbers_are_field_errors(mut draft: CourseDraft, #[case] raw: Value) {
        if let Some(steps) = draft.steps.as_mut() {
            steps[1].step_number = Some(raw);
        }
        let errors = draft.validate().expect_err("bad step number");
        assert_eq!(fields(&errors), [("steps[1].stepNumber", STEP_NUMBER_INVALID)]);
    }
}
