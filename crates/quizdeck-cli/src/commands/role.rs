//! The `quizdeck role` command.

use std::path::PathBuf;

use anyhow::Result;

use quizdeck_core::model::{User, UserRole};
use quizdeck_core::traits::Catalog;

use super::open_store;

const INSTRUCTOR_NAME: &str = "Dr. Smith";
const LEARNER_NAME: &str = "Alex Student";

pub fn execute(
    switch: bool,
    data_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (_config, mut store) = open_store(config_path.as_deref(), data_dir)?;

    let user = store.current_user()?;
    if !switch {
        println!("{} ({})", user.name, user.role);
        return Ok(());
    }

    // One fixed identity per role; the id stays stable across switches.
    let switched = match user.role {
        UserRole::Instructor => User {
            id: user.id,
            name: LEARNER_NAME.into(),
            role: UserRole::Learner,
        },
        UserRole::Learner => User {
            id: user.id,
            name: INSTRUCTOR_NAME.into(),
            role: UserRole::Instructor,
        },
    };
    store.set_current_user(switched.clone())?;
    println!("Switched to {}: {}", switched.role, switched.name);
    Ok(())
}
