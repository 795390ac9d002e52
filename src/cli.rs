use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "mobsast",
    version,
    about = "Uploads a mobile app binary to a MobSF-compatible server, triggers a static scan, and downloads the PDF and JSON reports",
    long_about = "mobsast drives a MobSF-compatible SAST server through one full run: \
upload the app binary, trigger a scan, fetch the most recent scan hash, and \
download the PDF and JSON reports. All connection settings come from \
environment variables (MOBSF_API_KEY, MOBSF_SERVER, APP_PATH, REPORT_PATH, \
and the ENDPOINT_* paths)."
)]
pub struct Cli {
    /// Delete the scan record with the given hash instead of running a scan
    #[arg(long, value_name = "HASH")]
    pub delete: Option<String>,

    /// Verbose diagnostic logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_invocation() {
        let cli = Cli::try_parse_from(["mobsast"]).unwrap();
        assert!(cli.delete.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_delete() {
        let cli = Cli::try_parse_from(["mobsast", "--delete", "abc123"]).unwrap();
        assert_eq!(cli.delete.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_parse_verbose() {
        let cli = Cli::try_parse_from(["mobsast", "-v"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_delete_requires_hash() {
        assert!(Cli::try_parse_from(["mobsast", "--delete"]).is_err());
    }
}
