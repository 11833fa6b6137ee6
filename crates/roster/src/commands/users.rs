//! User command handlers.
//!
//! Every handler except `list` runs the screen lifecycle: mount the
//! controller, wait for the initial list, apply at most one edit, render,
//! unmount.

use roster_core::{Address, CoreError, ScreenState, User, UserListController};
use tracing::debug;

use crate::cli::{AddArgs, UsersArgs, UsersCommand};
use crate::config::OutputOpts;
use crate::error::CliError;
use crate::output;

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &UserListController,
    args: UsersArgs,
    opts: &OutputOpts,
) -> Result<(), CliError> {
    if matches!(args.command, UsersCommand::List) {
        return list(controller, opts).await;
    }

    let state = mount(controller).await;
    let result = match state {
        Ok(state) => edit(controller, &state, args.command).await,
        Err(e) => Err(e),
    };
    controller.unmount().await;

    output::print_screen(&controller.state(), opts);
    result
}

/// One-off fetch through the cancellable request handle.
async fn list(controller: &UserListController, opts: &OutputOpts) -> Result<(), CliError> {
    let (pending, cancel) = controller.client().get_all_users();

    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("interrupt received, canceling request");
            cancel.cancel();
        }
    });
    let result = pending.await;
    watcher.abort();

    let users = result.map_err(CoreError::from)?;
    output::print_output(&output::render_users(opts.format, &users), opts.quiet);
    Ok(())
}

/// Mount and wait for the initial list. Ctrl-C unmounts, which cancels it.
async fn mount(controller: &UserListController) -> Result<ScreenState, CliError> {
    controller.mount().await;

    tokio::select! {
        res = controller.loaded() => res?,
        _ = tokio::signal::ctrl_c() => {
            controller.unmount().await;
            return Err(CliError::Interrupted);
        }
    }

    let state = controller.state();
    if state.has_error() {
        return Err(CliError::LoadFailed {
            message: state.error,
        });
    }
    Ok(state)
}

async fn edit(
    controller: &UserListController,
    state: &ScreenState,
    command: UsersCommand,
) -> Result<(), CliError> {
    match command {
        UsersCommand::List | UsersCommand::Screen => Ok(()),

        UsersCommand::Add(AddArgs {
            name,
            email,
            street,
            city,
        }) => {
            let draft = User::new(
                User::UNASSIGNED_ID,
                name,
                email,
                Address::new(street, city),
            );
            let created = controller.add_user(draft).await?;
            debug!(id = created.id, "created");
            Ok(())
        }

        UsersCommand::Update { id, city } => {
            let target = find(state, id)?;
            controller.update_city(&target, &city).await?;
            Ok(())
        }

        UsersCommand::Delete { id } => {
            let target = find(state, id)?;
            controller.delete(&target).await?;
            Ok(())
        }
    }
}

fn find(state: &ScreenState, id: i64) -> Result<User, CliError> {
    state.user(id).cloned().ok_or_else(|| CliError::NotFound {
        resource_type: "user".into(),
        identifier: id.to_string(),
        list_command: "users list".into(),
    })
}
