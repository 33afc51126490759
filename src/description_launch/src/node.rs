//! robot_state_publisher startup command
//!
//! Builds the command line for the state publisher and writes its
//! parameters to a generated params file. The robot description is a large
//! XML blob, so passing it through a params file keeps the command line
//! well-formed.

use crate::error::Result;
use serde_yaml::{Mapping, Value};
use std::{
    io::Write,
    path::Path,
    process::{Child, Command},
};
use tempfile::NamedTempFile;

const NODE_NAME: &str = "robot_state_publisher";
const PUBLISH_FREQUENCY: f64 = 100.0;
const FRAME_PREFIX: &str = "";

/// A ready-to-spawn robot_state_publisher process.
///
/// Holds the generated params file; dropping this drops the file, so keep
/// it alive while the child process is starting up.
#[derive(Debug)]
pub struct StatePublisherCommand {
    remappings: Vec<(String, String)>,
    params_file: NamedTempFile,
}

impl StatePublisherCommand {
    pub fn new(use_sim_time: bool, robot_description: &str) -> Result<Self> {
        let params_file = write_params_file(use_sim_time, robot_description)?;
        Ok(Self {
            remappings: vec![
                ("/tf".to_string(), "tf".to_string()),
                ("/tf_static".to_string(), "tf_static".to_string()),
            ],
            params_file,
        })
    }

    pub fn params_path(&self) -> &Path {
        self.params_file.path()
    }

    /// The full command line, executable first
    pub fn command_line(&self) -> Vec<String> {
        let mut cmd = vec![
            "ros2".to_string(),
            "run".to_string(),
            NODE_NAME.to_string(),
            NODE_NAME.to_string(),
            "--ros-args".to_string(),
        ];

        cmd.push("-r".to_string());
        cmd.push(format!("__node:={}", NODE_NAME));

        for (from, to) in &self.remappings {
            cmd.push("-r".to_string());
            cmd.push(format!("{}:={}", from, to));
        }

        cmd.push("--params-file".to_string());
        cmd.push(self.params_file.path().display().to_string());

        cmd
    }

    /// Start the long-lived publisher process.
    ///
    /// The child is not supervised beyond startup; the caller decides
    /// whether to wait on it.
    pub fn spawn(&self) -> std::io::Result<Child> {
        let cmd = self.command_line();
        log::info!("Starting {}", cmd.join(" "));
        Command::new(&cmd[0]).args(&cmd[1..]).spawn()
    }
}

fn write_params_file(use_sim_time: bool, robot_description: &str) -> Result<NamedTempFile> {
    let mut params = Mapping::new();
    params.insert(
        Value::String("use_sim_time".to_string()),
        Value::Bool(use_sim_time),
    );
    params.insert(
        Value::String("robot_description".to_string()),
        Value::String(robot_description.to_string()),
    );
    params.insert(
        Value::String("publish_frequency".to_string()),
        Value::Number(serde_yaml::Number::from(PUBLISH_FREQUENCY)),
    );
    params.insert(
        Value::String("frame_prefix".to_string()),
        Value::String(FRAME_PREFIX.to_string()),
    );

    let mut ros_parameters = Mapping::new();
    ros_parameters.insert(
        Value::String("ros__parameters".to_string()),
        Value::Mapping(params),
    );

    let mut root = Mapping::new();
    root.insert(
        Value::String(NODE_NAME.to_string()),
        Value::Mapping(ros_parameters),
    );

    let yaml = serde_yaml::to_string(&Value::Mapping(root)).map_err(|e| {
        crate::error::LaunchError::Yaml {
            file: "<generated params file>".to_string(),
            message: e.to_string(),
        }
    })?;

    let mut file = NamedTempFile::new()?;
    file.write_all(yaml.as_bytes())?;
    file.flush()?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_command_line_shape() {
        let node = StatePublisherCommand::new(true, "<robot/>").unwrap();
        let cmd = node.command_line();

        assert_eq!(cmd[0], "ros2");
        assert_eq!(&cmd[1..4], ["run", "robot_state_publisher", "robot_state_publisher"]);
        assert!(cmd.contains(&"--ros-args".to_string()));
        assert!(cmd.contains(&"__node:=robot_state_publisher".to_string()));
    }

    #[test]
    fn test_tf_remappings_present() {
        let node = StatePublisherCommand::new(true, "<robot/>").unwrap();
        let cmd = node.command_line();

        assert!(cmd.contains(&"/tf:=tf".to_string()));
        assert!(cmd.contains(&"/tf_static:=tf_static".to_string()));
    }

    #[test]
    fn test_params_file_contents() {
        let description = "<robot name=\"summit\">\n<link name=\"base\"/>\n</robot>";
        let node = StatePublisherCommand::new(false, description).unwrap();

        let content = fs::read_to_string(node.params_path()).unwrap();
        let yaml: Value = serde_yaml::from_str(&content).unwrap();
        let params = &yaml["robot_state_publisher"]["ros__parameters"];

        assert_eq!(params["use_sim_time"].as_bool(), Some(false));
        assert_eq!(params["robot_description"].as_str(), Some(description));
        assert_eq!(params["publish_frequency"].as_f64(), Some(100.0));
        assert_eq!(params["frame_prefix"].as_str(), Some(""));
    }

    #[test]
    fn test_params_file_referenced_in_command() {
        let node = StatePublisherCommand::new(true, "<robot/>").unwrap();
        let cmd = node.command_line();

        let idx = cmd.iter().position(|a| a == "--params-file").unwrap();
        assert_eq!(cmd[idx + 1], node.params_path().display().to_string());
    }
}
