//! When steps for time tracking BDD scenarios.

use super::world::{TrackingWorld, run_async};
use chrono::TimeDelta;
use eyre::WrapErr;
use rstest_bdd_macros::when;
use timetrack::{
    task::services::StartTaskRequest,
    user::services::RegisterUserRequest,
};

#[when(r#"the user starts task "{name}""#)]
fn start_task(world: &mut TrackingWorld, name: String) -> Result<(), eyre::Report> {
    let user_id = world.user()?.id().value();
    let result = run_async(
        world
            .tasks
            .start(StartTaskRequest::new(user_id, name.as_str())),
    );
    if let Ok(ref task) = result {
        world.task_ids.insert(name, task.id());
    }
    world.last_start = Some(result);
    Ok(())
}

#[when("{minutes:i64} minutes pass")]
fn minutes_pass(world: &mut TrackingWorld, minutes: i64) {
    world.clock.advance(TimeDelta::minutes(minutes));
}

#[when(r#"the user ends task "{name}""#)]
fn end_task(world: &mut TrackingWorld, name: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&name)?;
    world.last_end = Some(run_async(world.tasks.end(task_id.value())));
    Ok(())
}

#[when("the user is deleted")]
fn delete_user(world: &mut TrackingWorld) -> Result<(), eyre::Report> {
    let user_id = world.user()?.id().value();
    run_async(world.users.remove(user_id)).wrap_err("delete scenario user")?;
    Ok(())
}

#[when(r#"a user registers with passport "{passport}""#)]
fn register_user(world: &mut TrackingWorld, passport: String) {
    world.last_registration = Some(run_async(
        world.users.register(RegisterUserRequest::new(passport)),
    ));
}
