use clap::Parser;
use std::{path::PathBuf, time::Duration};

#[derive(Debug, Parser)]
#[command(author, version, about = "Uploads an image to a scanfeed server")]
pub struct Arguments {
    /// Upload endpoint
    #[arg(short, long, default_value = "http://127.0.0.1:5000/post")]
    pub url: String,

    /// Image file to send
    #[arg(short, long)]
    pub image: PathBuf,

    /// Recognized text; leave empty to send a preview frame
    #[arg(short, long, default_value = "")]
    pub text: String,

    /// Symbology of the recognized text
    #[arg(short, long, default_value = "")]
    pub format: String,

    /// Numeric trailer appended after the format value
    #[arg(long)]
    pub trailer: Option<u64>,

    /// How many times to send the frame
    #[arg(short, long, default_value_t = 1)]
    pub repeat: u32,

    /// Pause between repeated uploads
    #[arg(long, default_value_t = Duration::from_secs(1).into())]
    pub interval: humantime::Duration,

    /// Give up on a single upload after this long
    #[arg(long, default_value_t = Duration::from_secs(1).into())]
    pub timeout: humantime::Duration,
}
