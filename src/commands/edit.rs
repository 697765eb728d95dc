//! Rename, move, delete and create, each driven through the browser's
//! dialogs exactly as a user would: request, open on the next frame, confirm.

use anyhow::{anyhow, bail, Result};
use arbor::application::DialogOutcome;
use arbor::domain::value_objects::resource_path;

use super::{emit_complete, GlobalOptions, Session};
use crate::cli::ProjectArgs;

/// Turn a dialog outcome into a command result
fn committed(outcome: DialogOutcome, operation: &str, path: &str) -> Result<()> {
    match outcome {
        DialogOutcome::Committed => Ok(()),
        DialogOutcome::Rejected(reason) => Err(anyhow!("{} of '{}' failed: {}", operation, path, reason)),
        DialogOutcome::Dismissed => bail!("'{}' disappeared before the {} ran", path, operation),
    }
}

fn report(session: &Session, options: &GlobalOptions, command: &str, from: &str, to: &str) -> Result<()> {
    session.save_settings();
    if options.json {
        emit_complete(
            command,
            serde_json::json!({
                "root": session.root_name(),
                "from": from,
                "to": to,
            }),
        )
    } else {
        println!("{} {} -> {}", command, from, to);
        Ok(())
    }
}

pub fn cmd_rename(project: &ProjectArgs, path: &str, name: &str, options: &GlobalOptions) -> Result<()> {
    let mut session = Session::open(project, options)?;
    let target = session.entry(path)?;
    if !session.browser.begin_rename(&target) {
        bail!("'{}' cannot be renamed", path);
    }
    session.frame();
    session.browser.set_dialog_input(name);
    let outcome = session.with_ops(|browser, ops| browser.confirm_rename(ops));
    committed(outcome, "rename", path)?;
    session.frame();

    let renamed = resource_path::join(&resource_path::parent_of(&target.path), name);
    report(&session, options, "renamed", &target.path, &renamed)
}

pub fn cmd_move(project: &ProjectArgs, path: &str, folder: &str, options: &GlobalOptions) -> Result<()> {
    let mut session = Session::open(project, options)?;
    let target = session.entry(path)?;
    let destination = session.entry(folder)?;
    let result = session.with_ops(|browser, ops| browser.move_to_folder(ops, &target, &destination))?;
    session.frame();

    let moved = result
        .remap(&target.path)
        .unwrap_or_else(|| resource_path::join(&destination.path, resource_path::file_name(&target.path)));
    report(&session, options, "moved", &target.path, &moved)
}

pub fn cmd_delete(project: &ProjectArgs, path: &str, options: &GlobalOptions) -> Result<()> {
    let mut session = Session::open(project, options)?;
    let target = session.entry(path)?;
    if !session.browser.begin_delete(&target) {
        bail!("'{}' cannot be deleted", path);
    }
    session.frame();
    let outcome = session.with_ops(|browser, ops| browser.confirm_delete(ops));
    committed(outcome, "delete", path)?;
    session.frame();
    session.save_settings();

    if options.json {
        emit_complete(
            "delete",
            serde_json::json!({ "root": session.root_name(), "path": target.path }),
        )
    } else {
        println!("deleted {}", target.path);
        Ok(())
    }
}

pub fn cmd_create(
    project: &ProjectArgs,
    parent: &str,
    factory: &str,
    name: Option<&str>,
    options: &GlobalOptions,
) -> Result<()> {
    let mut session = Session::open(project, options)?;
    let parent_ref = session.entry(parent)?;
    let Some(factory_id) = session.browser.factories().find_by_title(factory) else {
        let titles: Vec<_> = session
            .browser
            .factories()
            .ordered()
            .into_iter()
            .filter_map(|id| session.browser.factories().get(id).map(|f| f.title().to_string()))
            .collect();
        bail!("unknown factory '{}' (available: {})", factory, titles.join(", "));
    };
    if !session.browser.begin_create(&parent_ref, factory_id) {
        bail!("'{}' cannot create entries in '{}'", factory, parent);
    }
    session.frame();
    if let Some(name) = name {
        session.browser.set_dialog_input(name);
    }
    let name = session.browser.create_dialog().input().to_string();
    let outcome = session.with_ops(|browser, ops| browser.confirm_create(ops));
    committed(outcome, "create", &name)?;
    session.frame();

    let created = session
        .browser
        .right()
        .map(|r| r.path.clone())
        .unwrap_or_else(|| resource_path::join(&parent_ref.path, &name));
    report(&session, options, "created", &parent_ref.path, &created)
}
