//! XML comment stripping
//!
//! Workaround for gazebo_ros2_control choking on comments in the robot
//! description (https://github.com/ros-controls/gazebo_ros2_control/issues/295).
//! Purely textual: no XML parsing, so a comment-lookalike inside a quoted
//! attribute value is removed too.

use regex::Regex;
use std::sync::OnceLock;

static XML_COMMENT: OnceLock<Regex> = OnceLock::new();

fn comment_pattern() -> &'static Regex {
    // (?s) makes '.' match newlines; '.*?' keeps each match shortest
    XML_COMMENT.get_or_init(|| Regex::new(r"(?s)<!--.*?-->").expect("valid regex"))
}

/// Remove every `<!-- ... -->` span from the input, including multi-line ones.
pub fn strip_xml_comments(input: &str) -> String {
    comment_pattern().replace_all(input, "").into_owned()
}
