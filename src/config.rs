use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::board::DEFAULT_FLASH;

#[derive(Parser, Debug)]
#[command(version, about = "A keyboard and mouse drum pad board for the terminal.")]
pub struct Cli {
    /// Where to write logs. The terminal belongs to the board, so logs never go to stdout.
    #[arg(long, env = "PADBOARD_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// How long a pad stays lit after it fires, in milliseconds.
    #[arg(long, env = "PADBOARD_FLASH_MS", default_value_t = DEFAULT_FLASH.as_millis() as u64)]
    pub flash_ms: u64,

    /// UI frame and input poll period, in milliseconds.
    #[arg(long, env = "PADBOARD_TICK_MS", default_value_t = 16, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Give up on a clip download after this many seconds.
    #[arg(long, env = "PADBOARD_FETCH_TIMEOUT", default_value_t = 10)]
    pub fetch_timeout_secs: u64,

    /// Don't open an audio device; pads still light up and update the display.
    #[arg(long, env = "PADBOARD_MUTE")]
    pub mute: bool,
}

impl Cli {
    pub fn flash(&self) -> Duration {
        Duration::from_millis(self.flash_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("padboard.log"))
    }
}
