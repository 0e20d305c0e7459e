//! Given steps for time tracking BDD scenarios.

use super::world::{TrackingWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use timetrack::user::services::RegisterUserRequest;

#[given(r#"a registered user with passport "{passport}""#)]
fn registered_user(world: &mut TrackingWorld, passport: String) -> Result<(), eyre::Report> {
    let user = run_async(world.users.register(RegisterUserRequest::new(passport)))
        .wrap_err("register user for scenario setup")?;
    world.current_user = Some(user);
    Ok(())
}
