//! Task lifecycle integration tests.

use super::helpers::{Services, services};
use chrono::TimeDelta;
use mockable::Clock;
use rstest::rstest;
use timetrack::{
    task::{
        ports::{TaskRepository, TaskRepositoryError},
        services::{PeriodQuery, StartTaskRequest, TaskLifecycleError},
    },
    user::services::RegisterUserRequest,
};

async fn register(services: &Services, raw: &str) -> Result<i64, eyre::Report> {
    let user = services.users.register(RegisterUserRequest::new(raw)).await?;
    Ok(user.id().value())
}

#[rstest]
#[tokio::test]
async fn reports_are_scoped_to_the_user(services: Services) -> Result<(), eyre::Report> {
    let ivan = register(&services, "1234 567890").await?;
    let anna = register(&services, "4321 098765").await?;
    services
        .tasks
        .start(StartTaskRequest::new(ivan, "Ivan's task"))
        .await?;
    services
        .tasks
        .start(StartTaskRequest::new(anna, "Anna's task"))
        .await?;
    services.clock.advance(TimeDelta::minutes(15));

    let report = services.tasks.report_period(PeriodQuery::new(anna)).await?;

    let names: Vec<&str> = report.iter().map(|row| row.description.as_str()).collect();
    eyre::ensure!(names == ["Anna's task"], "unexpected rows {names:?}");
    Ok(())
}

#[rstest]
#[tokio::test]
async fn period_bounds_select_tasks(services: Services) -> Result<(), eyre::Report> {
    let user = register(&services, "1234 567890").await?;
    let morning_start = services.clock.utc();
    let morning = services
        .tasks
        .start(StartTaskRequest::new(user, "Morning"))
        .await?;
    services.clock.advance(TimeDelta::hours(2));
    services.tasks.end(morning.id().value()).await?;
    services.clock.advance(TimeDelta::hours(3));
    let afternoon_start = services.clock.utc();
    let afternoon = services
        .tasks
        .start(StartTaskRequest::new(user, "Afternoon"))
        .await?;
    services.clock.advance(TimeDelta::hours(1));
    services.tasks.end(afternoon.id().value()).await?;

    let morning_only = services
        .tasks
        .report_period(
            PeriodQuery::new(user)
                .with_start(morning_start)
                .with_end(morning_start + TimeDelta::hours(4)),
        )
        .await?;
    let afternoon_only = services
        .tasks
        .report_period(PeriodQuery::new(user).with_start(afternoon_start))
        .await?;

    let first: Vec<(&str, i64)> = morning_only
        .iter()
        .map(|row| (row.description.as_str(), row.elapsed_minutes()))
        .collect();
    let second: Vec<(&str, i64)> = afternoon_only
        .iter()
        .map(|row| (row.description.as_str(), row.elapsed_minutes()))
        .collect();
    eyre::ensure!(first == [("Morning", 120)], "unexpected morning {first:?}");
    eyre::ensure!(second == [("Afternoon", 60)], "unexpected afternoon {second:?}");
    Ok(())
}

#[rstest]
#[tokio::test]
async fn window_before_any_task_reports_none(services: Services) -> Result<(), eyre::Report> {
    let user = register(&services, "1234 567890").await?;
    let later = services
        .tasks
        .start(StartTaskRequest::new(user, "Later"))
        .await?;
    services.clock.advance(TimeDelta::minutes(30));
    services.tasks.end(later.id().value()).await?;
    let early = services.clock.utc() - TimeDelta::days(2);

    let result = services
        .tasks
        .report_period(
            PeriodQuery::new(user)
                .with_start(early)
                .with_end(early + TimeDelta::hours(1)),
        )
        .await;

    eyre::ensure!(
        matches!(result, Err(TaskLifecycleError::NoTasks(_))),
        "expected no tasks, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test]
async fn removing_a_user_removes_their_tasks(services: Services) -> Result<(), eyre::Report> {
    let ivan = register(&services, "1234 567890").await?;
    let anna = register(&services, "4321 098765").await?;
    services
        .tasks
        .start(StartTaskRequest::new(ivan, "Ivan's"))
        .await?;
    services
        .tasks
        .start(StartTaskRequest::new(anna, "Anna's"))
        .await?;

    services.users.remove(ivan).await?;

    eyre::ensure!(
        services.store.task_count()? == 1,
        "only Anna's task should remain"
    );
    Ok(())
}

#[rstest]
#[tokio::test]
async fn second_close_loses_and_keeps_first_end(services: Services) -> Result<(), eyre::Report> {
    let user = register(&services, "1234 567890").await?;
    let task = services
        .tasks
        .start(StartTaskRequest::new(user, "Contested"))
        .await?;
    let first_end = services.clock.utc() + TimeDelta::minutes(10);
    let second_end = first_end + TimeDelta::minutes(5);

    let closed = services.store.close(task.id(), first_end).await?;
    let again = services.store.close(task.id(), second_end).await;
    let stored = services.store.find_by_id(task.id()).await?;

    eyre::ensure!(closed.end_time() == Some(first_end), "first close must win");
    eyre::ensure!(
        matches!(again, Err(TaskRepositoryError::AlreadyEnded(id)) if id == task.id()),
        "expected AlreadyEnded, got {again:?}"
    );
    eyre::ensure!(
        stored.and_then(|found| found.end_time()) == Some(first_end),
        "end time must not change"
    );
    Ok(())
}
