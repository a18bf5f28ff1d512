use clap::Parser;
use std::path::PathBuf;

/// sith-remote - terminal remote control for a sith music server 🎵
#[derive(Parser, Debug)]
#[command(name = "sith-remote", version, about)]
pub struct Args {
    /// Server base url (overrides `server_url` in config.toml)
    #[arg(long, short = 's')]
    pub server: Option<String>,

    /// OAuth token sent with search and player commands
    #[arg(long, short = 't')]
    pub token: Option<String>,

    /// Start on this route, e.g. `/playlists` or `/user/bob/playlist/42`
    #[arg(long, short = 'r', default_value = "/")]
    pub route: String,

    /// Directory for log files
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Generate default config.toml to stdout
    #[arg(long)]
    pub generate_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["sith-remote"]);
        assert_eq!(args.route, "/");
        assert!(args.server.is_none());
        assert!(!args.generate_config);
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "sith-remote",
            "--server",
            "http://pi:8107",
            "-t",
            "abc",
            "--route",
            "/log",
        ]);
        assert_eq!(args.server.as_deref(), Some("http://pi:8107"));
        assert_eq!(args.token.as_deref(), Some("abc"));
        assert_eq!(args.route, "/log");
    }
}
