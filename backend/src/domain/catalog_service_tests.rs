//! Tests for the course catalog service.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    CourseRepositoryError, MockCourseRepository, MockReviewRepository, MockUserRepository,
};
use crate::domain::{
    CourseContent, EmailAddress, ErrorCode, Rating, Review, ReviewId, Step, StepDraft, User,
};

type Service = CatalogService<MockCourseRepository, MockReviewRepository, MockUserRepository>;

fn make_service(
    courses: MockCourseRepository,
    reviews: MockReviewRepository,
    users: MockUserRepository,
) -> Service {
    CatalogService::new(Arc::new(courses), Arc::new(reviews), Arc::new(users))
}

fn user(name: &str) -> User {
    User {
        id: UserId::random(),
        full_name: name.into(),
        email_address: EmailAddress::new(format!("{}@example.com", name.to_lowercase()))
            .expect("valid email"),
        password_hash: "fixture$password".into(),
    }
}

fn course(owner: UserId, reviews: Vec<ReviewId>) -> Course {
    Course {
        id: CourseId::random(),
        owner,
        content: CourseContent {
            title: "Build a Basic Bookcase".into(),
            description: "A simple bookcase.".into(),
            estimated_time: Some("12 hours".into()),
            materials_needed: None,
            steps: vec![Step {
                step_number: 1,
                title: "Measure".into(),
                description: "Measure twice.".into(),
            }],
        },
        reviews,
    }
}

fn review(course: CourseId, author: UserId, rating: f64) -> Review {
    Review {
        id: ReviewId::random(),
        course,
        author,
        posted_on: Utc
            .with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
            .single()
            .expect("valid date"),
        rating: Rating::from_input(rating).expect("valid rating"),
        review: Some("Nice".into()),
    }
}

#[fixture]
fn draft() -> CourseDraft {
    CourseDraft {
        title: Some("Learn to Knit".into()),
        description: Some("Scarves for beginners.".into()),
        estimated_time: None,
        materials_needed: Some("Yarn".into()),
        steps: Some(vec![StepDraft {
            step_number: None,
            title: Some("Cast on".into()),
            description: Some("Make a slip knot.".into()),
        }]),
    }
}

#[rstest]
#[tokio::test]
async fn fetch_course_populates_owner_reviews_and_rating() {
    let owner = user("Joe");
    let sam = user("Sam");
    let missing_author = UserId::random();
    let mut stored = course(owner.id, Vec::new());
    let first = review(stored.id, sam.id, 4.0);
    let second = review(stored.id, missing_author, 5.0);
    stored.reviews = vec![first.id, second.id, ReviewId::random()];

    let mut courses = MockCourseRepository::new();
    let returned = stored.clone();
    courses
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(returned)));
    let mut reviews = MockReviewRepository::new();
    let found = vec![first.clone(), second.clone()];
    reviews
        .expect_find_many()
        .withf(|ids| ids.len() == 3)
        .return_once(move |_| Ok(found));
    let mut users = MockUserRepository::new();
    let people = vec![owner.clone(), sam.clone()];
    users.expect_find_many().return_once(move |_| Ok(people));

    let detail = make_service(courses, reviews, users)
        .fetch_course(&stored.id)
        .await
        .expect("course found");

    assert_eq!(detail.user, Some(owner.summary()));
    assert_eq!(detail.overall_rating, 5);
    let authors: Vec<_> = detail.reviews.iter().map(|r| r.user.clone()).collect();
    assert_eq!(authors, vec![Some(sam.summary()), None]);
}

#[rstest]
#[tokio::test]
async fn fetch_course_without_reviews_rates_zero() {
    let owner = user("Joe");
    let stored = course(owner.id, Vec::new());
    let mut courses = MockCourseRepository::new();
    let returned = stored.clone();
    courses
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(returned)));
    let mut reviews = MockReviewRepository::new();
    reviews.expect_find_many().return_once(|_| Ok(Vec::new()));
    let mut users = MockUserRepository::new();
    users
        .expect_find_many()
        .return_once(move |_| Ok(vec![owner]));

    let detail = make_service(courses, reviews, users)
        .fetch_course(&stored.id)
        .await
        .expect("course found");
    assert_eq!(detail.overall_rating, 0);
    assert!(detail.reviews.is_empty());
}

#[rstest]
#[tokio::test]
async fn fetch_unknown_course_is_not_found() {
    let mut courses = MockCourseRepository::new();
    courses.expect_find_by_id().return_once(|_| Ok(None));

    let error = make_service(
        courses,
        MockReviewRepository::new(),
        MockUserRepository::new(),
    )
    .fetch_course(&CourseId::random())
    .await
    .expect_err("missing course");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), COURSE_NOT_FOUND);
}

#[rstest]
#[tokio::test]
async fn create_course_assigns_owner(draft: CourseDraft) {
    let owner = UserId::random();
    let mut courses = MockCourseRepository::new();
    courses
        .expect_insert()
        .withf(move |c| c.owner == owner && c.reviews.is_empty() && c.content.steps.len() == 1)
        .times(1)
        .return_once(|_| Ok(()));

    make_service(
        courses,
        MockReviewRepository::new(),
        MockUserRepository::new(),
    )
    .create_course(&owner, draft)
    .await
    .expect("course created");
}

#[rstest]
#[tokio::test]
async fn create_course_rejects_invalid_drafts() {
    let mut courses = MockCourseRepository::new();
    courses.expect_insert().never();

    let error = make_service(
        courses,
        MockReviewRepository::new(),
        MockUserRepository::new(),
    )
    .create_course(&UserId::random(), CourseDraft::default())
    .await
    .expect_err("invalid draft");
    assert_eq!(error.code(), ErrorCode::ValidationFailed);
}

#[rstest]
#[tokio::test]
async fn update_course_requires_owner(draft: CourseDraft) {
    let stored = course(UserId::random(), Vec::new());
    let mut courses = MockCourseRepository::new();
    let returned = stored.clone();
    courses
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(returned)));
    courses.expect_update_content().never();

    let error = make_service(
        courses,
        MockReviewRepository::new(),
        MockUserRepository::new(),
    )
    .update_course(&UserId::random(), &stored.id, draft)
    .await
    .expect_err("not the owner");
    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(error.message(), "You can only edit a course for yourself.");
}

#[rstest]
#[tokio::test]
async fn update_course_checks_ownership_before_validation() {
    let stored = course(UserId::random(), Vec::new());
    let mut courses = MockCourseRepository::new();
    let returned = stored.clone();
    courses
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(returned)));

    let error = make_service(
        courses,
        MockReviewRepository::new(),
        MockUserRepository::new(),
    )
    .update_course(&UserId::random(), &stored.id, CourseDraft::default())
    .await
    .expect_err("not the owner");
    assert_eq!(error.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[tokio::test]
async fn owner_updates_content(draft: CourseDraft) {
    let stored = course(UserId::random(), Vec::new());
    let owner = stored.owner;
    let mut courses = MockCourseRepository::new();
    let returned = stored.clone();
    courses
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(returned)));
    courses
        .expect_update_content()
        .withf(|_, content| content.title == "Learn to Knit")
        .times(1)
        .return_once(|_, _| Ok(true));

    make_service(
        courses,
        MockReviewRepository::new(),
        MockUserRepository::new(),
    )
    .update_course(&owner, &stored.id, draft)
    .await
    .expect("owner may update");
}

#[rstest]
#[tokio::test]
async fn list_courses_surfaces_outages() {
    let mut courses = MockCourseRepository::new();
    courses
        .expect_list_summaries()
        .return_once(|| Err(CourseRepositoryError::connection("refused")));

    let error = make_service(
        courses,
        MockReviewRepository::new(),
        MockUserRepository::new(),
    )
    .list_courses()
    .await
    .expect_err("outage");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
