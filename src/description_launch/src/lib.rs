//! description_launch library
//!
//! Generates a finalized robot-description document for one robot and
//! prepares the `robot_state_publisher` process that consumes it. The
//! pipeline is sequential: rewrite the controller YAML under the robot id,
//! expand the xacro template, strip XML comments from the result, and
//! build the publisher command with the cleaned document as a parameter.

pub mod ament;
pub mod arguments;
pub mod cleanup;
pub mod error;
pub mod node;
pub mod rewrite;
pub mod xacro;

use error::{LaunchError, Result};
use node::StatePublisherCommand;
use std::{collections::HashMap, path::PathBuf};
use xacro::XacroCommand;

/// Resolved launch configuration, immutable once constructed.
///
/// All paths are plain: package-share and PATH lookups happen at the CLI
/// boundary before this struct is built.
#[derive(Debug, Clone)]
pub struct DescriptionConfig {
    pub use_sim_time: bool,
    pub controllers_file: PathBuf,
    pub robot_id: String,
    pub robot_xacro: PathBuf,
    pub xacro_program: PathBuf,
}

impl DescriptionConfig {
    /// Build from resolved launch argument values
    pub fn from_arguments(values: &HashMap<String, String>, xacro_program: PathBuf) -> Result<Self> {
        let get = |name: &str| -> Result<&String> {
            values
                .get(name)
                .ok_or_else(|| LaunchError::MissingArgument(name.to_string()))
        };

        Ok(Self {
            // choices {true,false} are validated during argument resolution
            use_sim_time: get(arguments::USE_SIM_TIME)? == "true",
            controllers_file: PathBuf::from(get(arguments::CONTROLLERS_FILE)?),
            robot_id: get(arguments::ROBOT_ID)?.clone(),
            robot_xacro: PathBuf::from(get(arguments::ROBOT_XACRO)?),
            xacro_program,
        })
    }
}

/// The pipeline output: the cleaned description and the publisher command
#[derive(Debug)]
pub struct GeneratedDescription {
    pub robot_description: String,
    pub state_publisher: StatePublisherCommand,
}

/// Run the description pipeline for one robot.
///
/// Blocks until the templating tool completes. Every failure propagates;
/// there is no retry or recovery.
pub fn generate_description(config: &DescriptionConfig) -> Result<GeneratedDescription> {
    let controllers = rewrite::rewrite_controllers(&config.controllers_file, &config.robot_id)?;

    let raw = XacroCommand::new(&config.xacro_program, &config.robot_xacro)
        .mapping("robot_id", &config.robot_id)
        .mapping("robot_ns", &config.robot_id)
        .mapping(
            "config_controllers",
            &controllers.path().display().to_string(),
        )
        .run()?;

    // Diagnostic shows what xacro actually produced, before the comment
    // workaround is applied
    log::debug!("robot description from xacro ({} bytes):\n{}", raw.len(), raw);

    let robot_description = cleanup::strip_xml_comments(&raw);
    let state_publisher = StatePublisherCommand::new(config.use_sim_time, &robot_description)?;

    Ok(GeneratedDescription {
        robot_description,
        state_publisher,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved_values() -> HashMap<String, String> {
        let mut values = HashMap::new();
        values.insert(arguments::USE_SIM_TIME.to_string(), "false".to_string());
        values.insert(
            arguments::CONTROLLERS_FILE.to_string(),
            "/cfg/controller.yml".to_string(),
        );
        values.insert(arguments::ROBOT_ID.to_string(), "alpha".to_string());
        values.insert(
            arguments::ROBOT_XACRO.to_string(),
            "/share/robot.urdf.xacro".to_string(),
        );
        values
    }

    #[test]
    fn test_config_from_arguments() {
        let config =
            DescriptionConfig::from_arguments(&resolved_values(), PathBuf::from("xacro")).unwrap();

        assert!(!config.use_sim_time);
        assert_eq!(config.robot_id, "alpha");
        assert_eq!(config.controllers_file, PathBuf::from("/cfg/controller.yml"));
        assert_eq!(config.robot_xacro, PathBuf::from("/share/robot.urdf.xacro"));
    }

    #[test]
    fn test_config_missing_argument() {
        let mut values = resolved_values();
        values.remove(arguments::ROBOT_ID);

        let result = DescriptionConfig::from_arguments(&values, PathBuf::from("xacro"));
        assert!(matches!(result, Err(LaunchError::MissingArgument(name)) if name == "robot_id"));
    }
}
