//! Then steps for time tracking BDD scenarios.

use super::world::{TrackingWorld, run_async};
use eyre::{WrapErr, eyre};
use rstest_bdd_macros::then;
use timetrack::{
    task::{
        domain::{TaskDomainError, TaskSummary},
        ports::TaskRepositoryError,
        services::{PeriodQuery, TaskLifecycleError},
    },
    user::services::UserRegistryError,
};

fn report(world: &TrackingWorld) -> Result<Vec<TaskSummary>, eyre::Report> {
    let user_id = world.user()?.id().value();
    run_async(world.tasks.report_period(PeriodQuery::new(user_id))).wrap_err("build task report")
}

#[then(r#"the report lists "{name}" with {minutes:i64} minutes {status}"#)]
fn report_lists(
    world: &TrackingWorld,
    name: String,
    minutes: i64,
    status: String,
) -> Result<(), eyre::Report> {
    let rows = report(world)?;
    let row = rows
        .iter()
        .find(|row| row.description.as_str() == name)
        .ok_or_else(|| eyre!("task {name} missing from report"))?;

    let completed = status == "completed";
    eyre::ensure!(
        row.elapsed_minutes() == minutes,
        "expected {minutes} minutes for {name}, found {}",
        row.elapsed_minutes()
    );
    eyre::ensure!(
        row.completed == completed,
        "expected {name} to be {status}"
    );
    Ok(())
}

#[then(r#"the report order is "{order}""#)]
fn report_order(world: &TrackingWorld, order: String) -> Result<(), eyre::Report> {
    let rows = report(world)?;
    let actual: Vec<&str> = rows.iter().map(|row| row.description.as_str()).collect();
    let expected: Vec<&str> = order.split(", ").collect();
    eyre::ensure!(actual == expected, "expected order {expected:?}, found {actual:?}");
    Ok(())
}

#[then("the last start is rejected as a duplicate open task")]
fn start_rejected_as_duplicate(world: &TrackingWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_start
        .as_ref()
        .ok_or_else(|| eyre!("missing start result"))?;
    if !matches!(
        result,
        Err(TaskLifecycleError::Repository(
            TaskRepositoryError::DuplicateOpenTask { .. }
        ))
    ) {
        return Err(eyre!("expected DuplicateOpenTask error, got {result:?}"));
    }
    Ok(())
}

#[then("the last end is rejected because the task already ended")]
fn end_rejected_as_already_ended(world: &TrackingWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_end
        .as_ref()
        .ok_or_else(|| eyre!("missing end result"))?;
    if !matches!(
        result,
        Err(TaskLifecycleError::Domain(TaskDomainError::AlreadyEnded(_)))
    ) {
        return Err(eyre!("expected AlreadyEnded error, got {result:?}"));
    }
    Ok(())
}

#[then(r#"task "{name}" no longer exists"#)]
fn task_is_gone(world: &TrackingWorld, name: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&name)?;
    let found = run_async(world.tasks.find_by_id(task_id.value())).wrap_err("look up task")?;
    eyre::ensure!(found.is_none(), "task {name} still exists");
    Ok(())
}

#[then("the registration fails with a profile lookup error")]
fn registration_failed(world: &TrackingWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_registration
        .as_ref()
        .ok_or_else(|| eyre!("missing registration result"))?;
    if !matches!(result, Err(UserRegistryError::ProfileLookup(_))) {
        return Err(eyre!("expected profile lookup error, got {result:?}"));
    }
    Ok(())
}
