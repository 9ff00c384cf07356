//! Path handling for the Zellij sandbox.

use std::path::PathBuf;

const HOST_ROOT: &str = "/host";

/// Directory the plugin writes its trace file to.
///
/// `/host` is where Zellij mounts the directory the session was started
/// from, usually the user's home, so this is normally
/// `~/.local/share/zellij/marquee`.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT).join(".local/share/zellij/marquee")
}

/// Maps a `~`-prefixed path onto the sandbox's `/host` mount.
///
/// ```
/// use marquee::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dusk.toml"), "/host/themes/dusk.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/dusk.toml"), "/etc/dusk.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => HOST_ROOT.to_string(),
        Some(rest) if rest.starts_with('/') => format!("{HOST_ROOT}{rest}"),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_users_home_is_left_alone() {
        assert_eq!(expand_tilde("~alice/theme.toml"), "~alice/theme.toml");
    }

    #[test]
    fn data_dir_lives_under_host() {
        assert!(get_data_dir().starts_with("/host"));
        assert!(get_data_dir().ends_with("marquee"));
    }
}
