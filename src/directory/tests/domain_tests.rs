//! Tests for directory record validation.

use crate::directory::domain::{
    DirectoryDomainError, FeatureRequest, FeatureRequestStatus, Project, User, UserId, UserRole,
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

#[rstest]
fn email_is_normalised(clock: DefaultClock) {
    let user = User::new("  Ada ", " Ada@Example.COM ", UserRole::Member, &clock)
        .expect("valid user");

    assert_eq!(user.name(), "Ada");
    assert_eq!(user.email(), "ada@example.com");
    assert!(user.is_active());
}

#[rstest]
#[case("no-at-sign")]
#[case("@example.com")]
#[case("ada@")]
#[case("ada@exa@mple.com")]
#[case("ada lovelace@example.com")]
fn malformed_email_is_rejected(clock: DefaultClock, #[case] email: &str) {
    let result = User::new("Ada", email, UserRole::Member, &clock);

    assert_eq!(
        result,
        Err(DirectoryDomainError::InvalidEmail(email.to_owned()))
    );
}

#[rstest]
fn blank_user_name_is_rejected(clock: DefaultClock) {
    assert_eq!(
        User::new("   ", "ada@example.com", UserRole::Admin, &clock),
        Err(DirectoryDomainError::EmptyName)
    );
}

#[rstest]
fn archived_project_refuses_changes(clock: DefaultClock) {
    let mut project = Project::new("Website", None, UserId::new(), &clock).expect("project");
    project.archive(&clock);

    assert_eq!(
        project.ensure_open(),
        Err(DirectoryDomainError::ProjectArchived(project.id()))
    );
    assert_eq!(
        project.rename("Website v2", &clock),
        Err(DirectoryDomainError::ProjectArchived(project.id()))
    );
    assert_eq!(project.name(), "Website");
}

#[rstest]
fn blank_description_is_dropped(clock: DefaultClock) {
    let project = Project::new("Website", Some("  ".to_owned()), UserId::new(), &clock)
        .expect("project");

    assert!(project.description().is_none());
}

#[rstest]
fn each_user_votes_once(clock: DefaultClock) {
    let voter = UserId::new();
    let mut request =
        FeatureRequest::new("Dark mode", "Please", UserId::new(), &clock).expect("request");

    request.vote(voter, &clock).expect("first vote");
    let repeat = request.vote(voter, &clock);

    assert_eq!(
        repeat,
        Err(DirectoryDomainError::AlreadyVoted {
            request_id: request.id(),
            user_id: voter,
        })
    );
    assert_eq!(request.votes(), 1);
    assert_eq!(request.status(), FeatureRequestStatus::Open);
}
