use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "mkvstrip")]
#[command(author, version, about = "Strips unnecessary tracks from MKV files.")]
pub struct Cli {
    /// Where your MKV files are stored. Can be directories or files.
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Identify files and print the plan, but never remux.
    #[arg(short = 't', long)]
    pub dry_run: bool,

    /// The path to the mkvmerge executable [default: mkvmerge, looked up on PATH].
    #[arg(short = 'b', long, value_name = "path")]
    pub mkvmerge_bin: Option<PathBuf>,

    /// Comma-separated list of subtitle and audio languages to retain, e.g. eng,fre.
    ///
    /// Language codes are ISO-639-2 bibliographic codes ("fre" for French),
    /// optionally followed by a dash and a country code ("fre-ca"). Tracks
    /// with an undetermined language ("und") are always retained.
    #[arg(
        short = 'l',
        long,
        value_name = "lang",
        value_delimiter = ',',
        required = true
    )]
    pub language: Vec<String>,

    /// If specified, defines subtitle languages to retain. Same syntax as --language.
    #[arg(short = 's', long, value_name = "subs-lang", value_delimiter = ',')]
    pub subs_language: Option<Vec<String>>,

    /// If no subtitles match the languages to retain, strip all subtitles.
    #[arg(short = 'n', long)]
    pub no_subtitles: bool,

    /// Also remove audio and subtitle tracks whose name mentions commentary.
    #[arg(short = 'c', long)]
    pub remove_commentary: bool,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Recurse through all paths on the command line.
    #[arg(short, long)]
    pub recurse: bool,

    /// Path to config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
