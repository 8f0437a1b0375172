use clap::{App, ArgMatches};
use log::warn;

pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 480;
pub const DEFAULT_TITLE: &str = "Trying OpenGL";

/// What the window should look like when it opens.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

pub fn parse_args() -> WindowConfig {
    let yaml = load_yaml!("cli.yaml");
    let matches = App::from_yaml(yaml).get_matches();

    config_from_matches(&matches)
}

fn config_from_matches(matches: &ArgMatches) -> WindowConfig {
    let width = matches
        .value_of("width")
        .map_or(DEFAULT_WIDTH, |raw| parse_dimension("width", raw, DEFAULT_WIDTH));

    let height = matches
        .value_of("height")
        .map_or(DEFAULT_HEIGHT, |raw| parse_dimension("height", raw, DEFAULT_HEIGHT));

    let title = matches.value_of("title").unwrap_or(DEFAULT_TITLE).to_string();

    WindowConfig {
        width,
        height,
        title,
    }
}

/// A window dimension has to be a positive integer; anything else keeps
/// the default so a typo doesn't stop the program from opening at all.
fn parse_dimension(name: &str, raw: &str, default: u32) -> u32 {
    match raw.parse::<u32>() {
        Ok(pixels) if pixels > 0 => pixels,
        _ => {
            warn!("invalid --{} value {:?}, using {}", name, raw, default);
            default
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::App;

    fn config_for(args: &[&str]) -> WindowConfig {
        let yaml = load_yaml!("cli.yaml");
        let matches = App::from_yaml(yaml).get_matches_from(args);
        config_from_matches(&matches)
    }

    #[test]
    fn no_args_opens_the_original_window() {
        let config = config_for(&["trygl"]);

        assert_eq!(config, WindowConfig::default());
        assert_eq!(config.width, 640);
        assert_eq!(config.height, 480);
        assert_eq!(config.title, "Trying OpenGL");
    }

    #[test]
    fn explicit_dimensions_override_the_defaults() {
        let config = config_for(&["trygl", "--width", "800", "--height", "600"]);

        assert_eq!(config.width, 800);
        assert_eq!(config.height, 600);
    }

    #[test]
    fn garbage_dimensions_fall_back_to_the_defaults() {
        let config = config_for(&["trygl", "--width", "potato", "--height", "12.5"]);

        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.height, DEFAULT_HEIGHT);
    }

    #[test]
    fn a_zero_sized_window_is_rejected() {
        let config = config_for(&["trygl", "--width", "0"]);

        assert_eq!(config.width, DEFAULT_WIDTH);
    }

    #[test]
    fn the_title_is_passed_through_verbatim() {
        let config = config_for(&["trygl", "--title", "quad party"]);

        assert_eq!(config.title, "quad party");
    }
}
