//! Task repository tests against `PostgreSQL`.

use crate::postgres::helpers::{FixedClock, base_time, database, new_user};
use chrono::TimeDelta;
use rstest::rstest;
use timetrack::{
    task::{
        domain::{DescriptionUniqueness, NewTask, ReportPeriod, TaskDescription},
        ports::{TaskRepository, TaskRepositoryError},
    },
    user::{domain::UserId, ports::UserRepository},
};

fn new_task(user_id: UserId, description: &str, minutes_after_base: i64) -> NewTask {
    NewTask::start(
        user_id,
        TaskDescription::new(description).expect("valid description"),
        &FixedClock(base_time() + TimeDelta::minutes(minutes_after_base)),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn start_enforces_owner_and_open_uniqueness() -> Result<(), eyre::Report> {
    let Some(db) = database().await? else {
        return Ok(());
    };
    let user = db.users.create(&new_user("1234 567890", "Ivanov", None)).await?;
    let policy = DescriptionUniqueness::WhileOpen;

    let first = db.tasks.start(&new_task(user.id(), "Standup", 0), policy).await?;
    let duplicate = db.tasks.start(&new_task(user.id(), "Standup", 1), policy).await;
    let orphan = db
        .tasks
        .start(&new_task(UserId::from_persisted(999), "Ghost", 0), policy)
        .await;
    db.tasks
        .start(&new_task(user.id(), "Standup", 2), DescriptionUniqueness::Disabled)
        .await?;

    eyre::ensure!(first.end_time().is_none(), "new task must be open");
    eyre::ensure!(
        matches!(duplicate, Err(TaskRepositoryError::DuplicateOpenTask { .. })),
        "expected duplicate open task, got {duplicate:?}"
    );
    eyre::ensure!(
        matches!(orphan, Err(TaskRepositoryError::UnknownUser(_))),
        "expected unknown user, got {orphan:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn close_is_conditional_and_clamped() -> Result<(), eyre::Report> {
    let Some(db) = database().await? else {
        return Ok(());
    };
    let user = db.users.create(&new_user("1234 567890", "Ivanov", None)).await?;
    let task = db
        .tasks
        .start(&new_task(user.id(), "Review", 10), DescriptionUniqueness::WhileOpen)
        .await?;

    let closed = db.tasks.close(task.id(), base_time()).await?;
    let again = db
        .tasks
        .close(task.id(), base_time() + TimeDelta::hours(1))
        .await;

    eyre::ensure!(
        closed.end_time() == Some(task.start_time()),
        "end before start must clamp to start"
    );
    eyre::ensure!(
        matches!(again, Err(TaskRepositoryError::AlreadyEnded(_))),
        "expected already ended, got {again:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn period_query_keeps_open_tasks_and_bounds_closed_ones() -> Result<(), eyre::Report> {
    let Some(db) = database().await? else {
        return Ok(());
    };
    let user = db.users.create(&new_user("1234 567890", "Ivanov", None)).await?;
    let policy = DescriptionUniqueness::WhileOpen;
    let inside = db.tasks.start(&new_task(user.id(), "Inside", 0), policy).await?;
    db.tasks
        .close(inside.id(), base_time() + TimeDelta::minutes(30))
        .await?;
    let spilling = db.tasks.start(&new_task(user.id(), "Spilling", 40), policy).await?;
    db.tasks
        .close(spilling.id(), base_time() + TimeDelta::hours(3))
        .await?;
    db.tasks.start(&new_task(user.id(), "Open", 50), policy).await?;

    let bounded = ReportPeriod::resolve(
        Some(base_time()),
        Some(base_time() + TimeDelta::hours(1)),
        base_time() + TimeDelta::hours(4),
    )?;
    let unbounded = ReportPeriod::resolve(None, None, base_time() + TimeDelta::hours(4))?;

    let found = db.tasks.find_in_period(user.id(), &bounded).await?;
    let everything = db.tasks.find_in_period(user.id(), &unbounded).await?;

    let mut names: Vec<&str> = found.iter().map(|task| task.description().as_str()).collect();
    names.sort_unstable();
    eyre::ensure!(names == ["Inside", "Open"], "unexpected tasks {names:?}");
    eyre::ensure!(everything.len() == 3, "unbounded query must see all tasks");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removing_user_cascades_to_tasks() -> Result<(), eyre::Report> {
    let Some(db) = database().await? else {
        return Ok(());
    };
    let user = db.users.create(&new_user("1234 567890", "Ivanov", None)).await?;
    let task = db
        .tasks
        .start(&new_task(user.id(), "Doomed", 0), DescriptionUniqueness::WhileOpen)
        .await?;

    db.users.remove(user.id()).await?;

    eyre::ensure!(
        db.tasks.find_by_id(task.id()).await?.is_none(),
        "task must be removed with its user"
    );
    Ok(())
}
