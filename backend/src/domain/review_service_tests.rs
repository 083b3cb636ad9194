//! Tests for the review lifecycle service.

use std::sync::Arc;

use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::domain::ports::{
    CourseRepositoryError, MockCourseRepository, MockReviewRepository, ReviewRepositoryError,
};
use crate::domain::{CourseContent, ErrorCode, Rating, Step};
use crate::test_support::{MutableClock, fixture_timestamp};

type Service = ReviewService<MockCourseRepository, MockReviewRepository>;

fn make_service(courses: MockCourseRepository, reviews: MockReviewRepository) -> Service {
    ReviewService::new(
        Arc::new(courses),
        Arc::new(reviews),
        Arc::new(MutableClock::new(fixture_timestamp())),
    )
}

fn course(owner: UserId) -> Course {
    Course {
        id: CourseId::random(),
        owner,
        content: CourseContent {
            title: "Build a Basic Bookcase".into(),
            description: "A simple bookcase.".into(),
            estimated_time: None,
            materials_needed: None,
            steps: vec![Step {
                step_number: 1,
                title: "Measure".into(),
                description: "Measure twice.".into(),
            }],
        },
        reviews: Vec::new(),
    }
}

fn review(course: CourseId, author: UserId) -> Review {
    Review {
        id: ReviewId::random(),
        course,
        author,
        posted_on: fixture_timestamp(),
        rating: Rating::from_input(3.0).expect("valid rating"),
        review: None,
    }
}

fn courses_returning(stored: &Course) -> MockCourseRepository {
    let mut courses = MockCourseRepository::new();
    let returned = stored.clone();
    courses
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(returned)));
    courses
}

#[fixture]
fn draft() -> ReviewDraft {
    ReviewDraft {
        rating: Some(json!(4.6)),
        review: Some("Clear instructions.".into()),
    }
}

#[rstest]
#[tokio::test]
async fn create_review_stamps_author_and_clock(draft: ReviewDraft) {
    let stored = course(UserId::random());
    let author = UserId::random();
    let mut courses = courses_returning(&stored);
    courses
        .expect_attach_review()
        .times(1)
        .return_once(|_, _| Ok(true));
    let mut reviews = MockReviewRepository::new();
    reviews.expect_find_many().return_once(|_| Ok(Vec::new()));
    let course_id = stored.id;
    reviews
        .expect_insert()
        .withf(move |r| {
            r.author == author
                && r.course == course_id
                && r.posted_on == fixture_timestamp()
                && r.rating.get() == 5
        })
        .times(1)
        .return_once(|_| Ok(()));

    make_service(courses, reviews)
        .create_review(&author, &stored.id, draft)
        .await
        .expect("review created");
}

#[rstest]
#[tokio::test]
async fn create_review_on_unknown_course_is_not_found(draft: ReviewDraft) {
    let mut courses = MockCourseRepository::new();
    courses.expect_find_by_id().return_once(|_| Ok(None));

    let error = make_service(courses, MockReviewRepository::new())
        .create_review(&UserId::random(), &CourseId::random(), draft)
        .await
        .expect_err("missing course");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn owner_cannot_review_own_course(draft: ReviewDraft) {
    let owner = UserId::random();
    let stored = course(owner);
    let mut reviews = MockReviewRepository::new();
    reviews.expect_find_many().return_once(|_| Ok(Vec::new()));
    reviews.expect_insert().never();

    let error = make_service(courses_returning(&stored), reviews)
        .create_review(&owner, &stored.id, draft)
        .await
        .expect_err("self review");
    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(error.message(), "Sorry, you can't review your own courses.");
}

#[rstest]
#[tokio::test]
async fn duplicate_review_is_refused_before_validation() {
    let stored = course(UserId::random());
    let author = UserId::random();
    let existing = vec![review(stored.id, author)];
    let mut reviews = MockReviewRepository::new();
    reviews.expect_find_many().return_once(move |_| Ok(existing));
    reviews.expect_insert().never();

    let error = make_service(courses_returning(&stored), reviews)
        .create_review(&author, &stored.id, ReviewDraft::default())
        .await
        .expect_err("duplicate");
    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(
        error.message(),
        "Sorry, you can only add one review per course."
    );
}

#[rstest]
#[tokio::test]
async fn concurrent_duplicate_insert_is_unauthorized(draft: ReviewDraft) {
    let stored = course(UserId::random());
    let mut reviews = MockReviewRepository::new();
    reviews.expect_find_many().return_once(|_| Ok(Vec::new()));
    reviews
        .expect_insert()
        .return_once(|_| Err(ReviewRepositoryError::duplicate_review("c", "a")));

    let error = make_service(courses_returning(&stored), reviews)
        .create_review(&UserId::random(), &stored.id, draft)
        .await
        .expect_err("duplicate");
    assert_eq!(error.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[tokio::test]
async fn failed_attach_deletes_inserted_review(draft: ReviewDraft) {
    let stored = course(UserId::random());
    let mut courses = courses_returning(&stored);
    courses
        .expect_attach_review()
        .return_once(|_, _| Err(CourseRepositoryError::query("write conflict")));
    let mut reviews = MockReviewRepository::new();
    reviews.expect_find_many().return_once(|_| Ok(Vec::new()));
    reviews.expect_insert().times(1).return_once(|_| Ok(()));
    reviews.expect_delete().times(1).return_once(|_| Ok(true));

    let error = make_service(courses, reviews)
        .create_review(&UserId::random(), &stored.id, draft)
        .await
        .expect_err("attach failure");
    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn invalid_rating_is_reported_after_policy() {
    let stored = course(UserId::random());
    let mut reviews = MockReviewRepository::new();
    reviews.expect_find_many().return_once(|_| Ok(Vec::new()));
    reviews.expect_insert().never();

    let error = make_service(courses_returning(&stored), reviews)
        .create_review(
            &UserId::random(),
            &stored.id,
            ReviewDraft {
                rating: Some(json!(9)),
                review: None,
            },
        )
        .await
        .expect_err("invalid rating");
    assert_eq!(error.code(), ErrorCode::ValidationFailed);
    assert_eq!(error.field_errors()[0].message, "\"5\" is the maximum rating.");
}

#[rstest]
#[case::author(true)]
#[case::course_owner(false)]
#[tokio::test]
async fn author_or_owner_deletes_review(#[case] as_author: bool) {
    let stored = course(UserId::random());
    let existing = review(stored.id, UserId::random());
    let actor = if as_author { existing.author } else { stored.owner };
    let mut courses = courses_returning(&stored);
    courses
        .expect_detach_review()
        .times(1)
        .return_once(|_, _| Ok(true));
    let mut reviews = MockReviewRepository::new();
    let found = existing.clone();
    reviews
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(found)));
    reviews.expect_delete().times(1).return_once(|_| Ok(true));

    make_service(courses, reviews)
        .delete_review(&actor, &stored.id, &existing.id)
        .await
        .expect("deleted");
}

#[rstest]
#[tokio::test]
async fn stranger_cannot_delete_review() {
    let stored = course(UserId::random());
    let existing = review(stored.id, UserId::random());
    let mut courses = courses_returning(&stored);
    courses.expect_detach_review().never();
    let mut reviews = MockReviewRepository::new();
    let found = existing.clone();
    reviews
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(found)));
    reviews.expect_delete().never();

    let error = make_service(courses, reviews)
        .delete_review(&UserId::random(), &stored.id, &existing.id)
        .await
        .expect_err("stranger");
    assert_eq!(error.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[tokio::test]
async fn unknown_review_is_not_found() {
    let mut reviews = MockReviewRepository::new();
    reviews.expect_find_by_id().return_once(|_| Ok(None));

    let error = make_service(MockCourseRepository::new(), reviews)
        .delete_review(&UserId::random(), &CourseId::random(), &ReviewId::random())
        .await
        .expect_err("missing review");
    assert_eq!(error.message(), REVIEW_NOT_FOUND);
}

#[rstest]
#[tokio::test]
async fn review_of_another_course_is_not_found() {
    let stored = course(UserId::random());
    let elsewhere = review(CourseId::random(), stored.owner);
    let mut reviews = MockReviewRepository::new();
    let found = elsewhere.clone();
    reviews
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(found)));
    reviews.expect_delete().never();

    let error = make_service(courses_returning(&stored), reviews)
        .delete_review(&stored.owner, &stored.id, &elsewhere.id)
        .await
        .expect_err("wrong course");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), REVIEW_NOT_FOUND);
}

#[rstest]
#[tokio::test]
async fn missing_course_on_delete_is_not_found() {
    let existing = review(CourseId::random(), UserId::random());
    let mut reviews = MockReviewRepository::new();
    let found = existing.clone();
    reviews
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(found)));
    let mut courses = MockCourseRepository::new();
    courses.expect_find_by_id().return_once(|_| Ok(None));

    let error = make_service(courses, reviews)
        .delete_review(&existing.author, &existing.course, &existing.id)
        .await
        .expect_err("missing course");
    assert_eq!(error.message(), "Course not found!");
}
