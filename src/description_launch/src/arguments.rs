//! Launch argument declaration and resolution

use crate::error::{LaunchError, Result};
use std::collections::HashMap;

/// A declared launch argument with metadata
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchArgument {
    pub name: String,
    pub default: Option<String>,
    pub description: Option<String>,
    pub choices: Option<Vec<String>>,
}

impl LaunchArgument {
    pub fn new(name: &str, default: Option<&str>, description: &str) -> Self {
        Self {
            name: name.to_string(),
            default: default.map(|s| s.to_string()),
            description: Some(description.to_string()),
            choices: None,
        }
    }

    pub fn with_choices(mut self, choices: &[&str]) -> Self {
        self.choices = Some(choices.iter().map(|s| s.to_string()).collect());
        self
    }
}

pub const USE_SIM_TIME: &str = "use_sim_time";
pub const CONTROLLERS_FILE: &str = "controllers_file";
pub const ROBOT_ID: &str = "robot_id";
pub const ROBOT_XACRO: &str = "robot_xacro";

/// The four arguments this tool declares.
///
/// Path defaults are `None` here: they are resolved at the boundary from
/// package share directories before resolution (see `main.rs`).
pub fn declarations() -> Vec<LaunchArgument> {
    vec![
        LaunchArgument::new(
            USE_SIM_TIME,
            Some("true"),
            "Use simulation (Gazebo) clock if true",
        )
        .with_choices(&["true", "false"]),
        LaunchArgument::new(CONTROLLERS_FILE, None, "ROS 2 controller file."),
        LaunchArgument::new(
            ROBOT_ID,
            Some("robot"),
            "Robot ID used to create the robot namespace",
        ),
        LaunchArgument::new(ROBOT_XACRO, None, "Robot xacro file path for the robot model"),
    ]
}

/// Parse a `key:=value` override from the command line
pub fn parse_override(s: &str) -> std::result::Result<(String, String), String> {
    let parts: Vec<&str> = s.split(":=").collect();
    if parts.len() != 2 {
        return Err(format!("Invalid launch argument format: {}", s));
    }
    Ok((parts[0].to_string(), parts[1].to_string()))
}

/// Resolve declared arguments against CLI overrides.
///
/// Overrides win over defaults. Overriding an undeclared name, leaving an
/// argument without a default unset, or violating a choices constraint is
/// an error. The returned map is the final, immutable configuration.
pub fn resolve(
    declarations: &[LaunchArgument],
    overrides: &[(String, String)],
) -> Result<HashMap<String, String>> {
    for (name, _) in overrides {
        if !declarations.iter().any(|d| &d.name == name) {
            return Err(LaunchError::UnknownArgument(name.clone()));
        }
    }

    let mut resolved = HashMap::new();
    for decl in declarations {
        let value = overrides
            .iter()
            .rev()
            .find(|(name, _)| name == &decl.name)
            .map(|(_, value)| value.clone())
            .or_else(|| decl.default.clone())
            .ok_or_else(|| LaunchError::MissingArgument(decl.name.clone()))?;

        if let Some(choices) = &decl.choices {
            if !choices.contains(&value) {
                return Err(LaunchError::InvalidChoice {
                    name: decl.name.clone(),
                    value,
                    choices: choices.join(", "),
                });
            }
        }

        resolved.insert(decl.name.clone(), value);
    }

    Ok(resolved)
}
