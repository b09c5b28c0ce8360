use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "thumbnailer")]
#[command(
    version,
    about = "Generate square article thumbnails for a journal and upload them",
    long_about = None
)]
pub struct CliArgs {
    /// Journal short name as it appears in listing URLs (e.g. nature, ncomms)
    pub journal_shortname: String,

    /// Thumbnail mode: pad (letterbox on a fill color) or crop (center crop)
    pub mode: String,

    /// Load settings from a JSON config file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Scratch directory for downloads and thumbnails [default: ~/Desktop/THUMBNAIL_OUT]
    #[arg(long, value_name = "DIR")]
    pub workspace: Option<PathBuf>,

    /// Write thumbnails into DIR/<bucket>/ instead of the object store
    #[arg(long, value_name = "DIR")]
    pub local_store: Option<PathBuf>,

    /// Thumbnail edge length in pixels [default: 200]
    #[arg(long, value_name = "PIXELS")]
    pub size: Option<u32>,

    /// JPEG quality 0-100 [default: 70]
    #[arg(short, long)]
    pub quality: Option<u32>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_positionals() {
        let args = CliArgs::try_parse_from(["thumbnailer", "nature", "crop"]).unwrap();

        assert_eq!(args.journal_shortname, "nature");
        assert_eq!(args.mode, "crop");
        assert!(args.config.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn test_missing_argument_is_rejected() {
        assert!(CliArgs::try_parse_from(["thumbnailer", "nature"]).is_err());
        assert!(CliArgs::try_parse_from(["thumbnailer"]).is_err());
    }

    #[test]
    fn test_excess_argument_is_rejected() {
        assert!(CliArgs::try_parse_from(["thumbnailer", "nature", "pad", "extra"]).is_err());
    }

    #[test]
    fn test_options() {
        let args = CliArgs::try_parse_from([
            "thumbnailer",
            "ncomms",
            "pad",
            "-c",
            "conf.json",
            "--size",
            "120",
            "-q",
            "90",
            "--local-store",
            "/tmp/store",
            "-v",
        ])
        .unwrap();

        assert_eq!(args.config, Some(PathBuf::from("conf.json")));
        assert_eq!(args.size, Some(120));
        assert_eq!(args.quality, Some(90));
        assert_eq!(args.local_store, Some(PathBuf::from("/tmp/store")));
        assert!(args.verbose);
    }
}
