//! description_launch CLI

use clap::{Parser, Subcommand};
use description_launch::{
    ament, arguments,
    arguments::parse_override,
    error::{LaunchError, Result},
    generate_description, DescriptionConfig,
};
use std::{path::PathBuf, process};

const CONTROLLERS_PACKAGE: &str = "summit_xl_gazebo";
const DESCRIPTION_PACKAGE: &str = "summit_xl_description";

#[derive(Parser)]
#[command(name = "description_launch")]
#[command(about = "Generates a robot description and starts robot_state_publisher", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    verbose: bool,

    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the description and start the state publisher
    Run {
        /// Launch arguments (key:=value)
        #[arg(value_parser = parse_override)]
        args: Vec<(String, String)>,
    },

    /// Generate the description and print it without starting anything
    Render {
        /// Launch arguments (key:=value)
        #[arg(value_parser = parse_override)]
        args: Vec<(String, String)>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Run { args } => run(&args),
        Commands::Render { args, output } => render(&args, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Resolve the launch arguments into a config.
///
/// Share-directory defaults are only looked up when the corresponding
/// argument was not overridden, so explicit paths work without a sourced
/// ROS installation.
fn resolve_config(overrides: &[(String, String)]) -> Result<DescriptionConfig> {
    let mut declarations = arguments::declarations();

    for decl in &mut declarations {
        if decl.default.is_some() || overrides.iter().any(|(name, _)| name == &decl.name) {
            continue;
        }
        let default = match decl.name.as_str() {
            arguments::CONTROLLERS_FILE => ament::find_package_share(CONTROLLERS_PACKAGE)?
                .join("config")
                .join("controller.yml"),
            arguments::ROBOT_XACRO => ament::find_package_share(DESCRIPTION_PACKAGE)?
                .join("robots")
                .join("summit_xls_icclab.urdf.xacro"),
            _ => continue,
        };
        decl.default = Some(default.display().to_string());
    }

    let values = arguments::resolve(&declarations, overrides)?;
    let xacro_program = ament::find_executable("xacro")?;
    DescriptionConfig::from_arguments(&values, xacro_program)
}

fn run(overrides: &[(String, String)]) -> Result<()> {
    let config = resolve_config(overrides)?;
    let generated = generate_description(&config)?;

    log::info!(
        "Generated robot description for '{}' ({} bytes)",
        config.robot_id,
        generated.robot_description.len()
    );

    let mut child = generated.state_publisher.spawn()?;
    let status = child.wait()?;
    if !status.success() {
        return Err(LaunchError::IoError(std::io::Error::other(format!(
            "robot_state_publisher exited with {}",
            status
        ))));
    }
    Ok(())
}

fn render(overrides: &[(String, String)], output: Option<&std::path::Path>) -> Result<()> {
    let config = resolve_config(overrides)?;
    let generated = generate_description(&config)?;

    match output {
        Some(path) => {
            std::fs::write(path, &generated.robot_description)?;
            log::info!("Wrote robot description: {}", path.display());
        }
        None => {
            println!("{}", generated.robot_description);
        }
    }
    Ok(())
}
