//! Command-line arguments

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "solarsim", version, about = "Animated solar system", long_about = None)]
pub struct Args {
    /// Preset name (`simulator`, `classic`) or path to a JSON scene.
    /// Defaults to `scene.json` in the config directory, then the simulator preset.
    #[arg(value_name = "SCENE")]
    pub scene: Option<String>,

    /// Write the resolved scene as JSON to this path and exit.
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_scene() {
        let args = Args::try_parse_from(["solarsim", "classic"]).unwrap();
        assert_eq!(args.scene.as_deref(), Some("classic"));
        assert!(args.export.is_none());
    }

    #[test]
    fn test_no_arguments() {
        let args = Args::try_parse_from(["solarsim"]).unwrap();
        assert!(args.scene.is_none());
        assert!(args.export.is_none());
    }

    #[test]
    fn test_export_flag() {
        let args =
            Args::try_parse_from(["solarsim", "--export", "out/scene.json", "classic"]).unwrap();
        assert_eq!(args.scene.as_deref(), Some("classic"));
        assert_eq!(args.export, Some(PathBuf::from("out/scene.json")));
    }

    #[test]
    fn test_help_and_version_are_not_scenes() {
        let err = Args::try_parse_from(["solarsim", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        let err = Args::try_parse_from(["solarsim", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
        let err = Args::try_parse_from(["solarsim", "--bogus"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }
}
