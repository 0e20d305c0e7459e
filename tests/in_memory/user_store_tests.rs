//! User registry integration tests.

use super::helpers::{Services, services};
use chrono::TimeDelta;
use rstest::rstest;
use timetrack::user::{
    domain::{Page, UserFilter, UserId},
    ports::{ProfileLookupError, UserRepositoryError},
    services::{RegisterUserRequest, UpdateUserRequest, UserRegistryError},
};

async fn register_all(services: &Services) -> Result<(), eyre::Report> {
    for raw in ["1234 567890", "4321 098765", "5555 111111"] {
        services.users.register(RegisterUserRequest::new(raw)).await?;
    }
    Ok(())
}

#[rstest]
#[tokio::test]
async fn registered_users_are_listed_with_resolved_profiles(
    services: Services,
) -> Result<(), eyre::Report> {
    register_all(&services).await?;

    let users = services
        .users
        .list(&UserFilter::default(), Page::default())
        .await?;

    let surnames: Vec<&str> = users.iter().map(|user| user.profile().surname()).collect();
    eyre::ensure!(
        surnames == ["Ivanov", "Petrova", "Sidorov"],
        "unexpected listing {surnames:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test]
async fn unknown_passport_is_not_registered(services: Services) -> Result<(), eyre::Report> {
    let result = services
        .users
        .register(RegisterUserRequest::new("9999 999999"))
        .await;

    eyre::ensure!(
        matches!(
            result,
            Err(UserRegistryError::ProfileLookup(
                ProfileLookupError::UnexpectedStatus(404)
            ))
        ),
        "expected 404 lookup failure, got {result:?}"
    );
    let users = services
        .users
        .list(&UserFilter::default(), Page::default())
        .await?;
    eyre::ensure!(users.is_empty(), "nothing should be stored");
    Ok(())
}

#[rstest]
#[tokio::test]
async fn filters_combine_and_paginate(services: Services) -> Result<(), eyre::Report> {
    register_all(&services).await?;

    let with_patronymic = services
        .users
        .list(
            &UserFilter {
                patronymic: Some("vich".to_owned()),
                ..UserFilter::default()
            },
            Page::new(2, 1)?,
        )
        .await?;
    let by_id = services
        .users
        .list(
            &UserFilter {
                id: Some(UserId::new(2)?),
                address: Some("Kazan".to_owned()),
                ..UserFilter::default()
            },
            Page::default(),
        )
        .await?;

    let second: Vec<&str> = with_patronymic
        .iter()
        .map(|user| user.profile().name())
        .collect();
    eyre::ensure!(second == ["Oleg"], "unexpected second page {second:?}");
    eyre::ensure!(by_id.len() == 1, "expected one user, got {}", by_id.len());
    Ok(())
}

#[rstest]
#[tokio::test]
async fn passport_change_frees_the_old_passport(services: Services) -> Result<(), eyre::Report> {
    let first = services
        .users
        .register(RegisterUserRequest::new("1234 567890"))
        .await?;
    services.clock.advance(TimeDelta::hours(1));

    let moved = services
        .users
        .update(
            first.id().value(),
            UpdateUserRequest::new().with_passport("7777 000000"),
        )
        .await?;
    eyre::ensure!(
        moved.passport().to_string() == "7777 000000",
        "passport not updated"
    );
    eyre::ensure!(moved.updated_at() > moved.created_at(), "updated_at not stamped");

    services
        .users
        .register(RegisterUserRequest::new("1234 567890"))
        .await?;
    Ok(())
}

#[rstest]
#[tokio::test]
async fn passport_change_onto_taken_passport_conflicts(
    services: Services,
) -> Result<(), eyre::Report> {
    register_all(&services).await?;

    let result = services
        .users
        .update(1, UpdateUserRequest::new().with_passport("4321 098765"))
        .await;

    eyre::ensure!(
        matches!(
            result,
            Err(UserRegistryError::Repository(
                UserRepositoryError::DuplicatePassport(_)
            ))
        ),
        "expected duplicate passport, got {result:?}"
    );
    Ok(())
}
