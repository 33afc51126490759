//! Package and executable lookup
//!
//! Default argument values in the launch description come from package
//! share directories. These lookups touch global process state (env vars,
//! installed prefixes), so they live here and are called once from the CLI
//! boundary; the library itself only sees resolved paths.

use crate::error::{LaunchError, Result};
use std::path::{Path, PathBuf};

/// Find a ROS 2 package share directory
pub fn find_package_share(package: &str) -> Result<PathBuf> {
    if let Ok(distro) = std::env::var("ROS_DISTRO") {
        let share_path = PathBuf::from(format!("/opt/ros/{}/share/{}", distro, package));
        if share_path.exists() {
            return Ok(share_path);
        }
    }

    for distro in &["jazzy", "iron", "humble", "galactic", "foxy"] {
        let share_path = PathBuf::from(format!("/opt/ros/{}/share/{}", distro, package));
        if share_path.exists() {
            return Ok(share_path);
        }
    }

    if let Ok(prefix_path) = std::env::var("AMENT_PREFIX_PATH") {
        for prefix in prefix_path.split(':') {
            let share_path = Path::new(prefix).join("share").join(package);
            if share_path.exists() {
                return Ok(share_path);
            }
        }
    }

    Err(LaunchError::PackageNotFound(package.to_string()))
}

/// Find an executable on PATH
pub fn find_executable(name: &str) -> Result<PathBuf> {
    if let Some(path) = std::env::var_os("PATH") {
        for dir in std::env::split_paths(&path) {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
    }

    Err(LaunchError::ExecutableNotFound(name.to_string()))
}
