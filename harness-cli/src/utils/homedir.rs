use std::fs;
use std::path::Path;

use homedir::my_home;
use rst_common::with_logging::log::debug;

use crate::types::CliError;

pub fn setup_homedir(dir: &str) -> Result<String, CliError> {
    let current_homedir = my_home().map_err(|err| CliError::HomeDirError(err.to_string()))?;

    match current_homedir {
        Some(current_dir) => {
            let harness_dir = format!("{}/{}", current_dir.display(), dir);
            let harness_path = Path::new(harness_dir.as_str()).to_owned();

            if !harness_path.exists() {
                debug!("harness directory still not exists");
                fs::create_dir_all(harness_path.clone())
                    .map_err(|err| CliError::HomeDirError(err.to_string()))?;
            }

            debug!("harness home directory: {}", harness_path.display());
            Ok(harness_path.display().to_string())
        }
        None => Err(CliError::HomeDirError(
            "unknown home directory path".to_string(),
        )),
    }
}
