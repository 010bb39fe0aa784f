use log::LevelFilter;

use crate::{
    config::Config,
    runtime::{InfixStyle, Overflow},
};

#[derive(clap::Parser, Debug)]
#[clap(about, long_about = None)]
pub(crate) struct Cli {
    /// Read statements from a file instead of standard input
    pub file: Option<std::path::PathBuf>,

    /// How results that still contain variables are printed
    #[arg(long, value_enum, default_value_t = InfixStyle::Height)]
    pub infix: InfixStyle,

    /// What happens when integer arithmetic overflows
    #[arg(long, value_enum, default_value_t = Overflow::Fail)]
    pub overflow: Overflow,

    /// Log more detail to stderr (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn config(&self) -> Config {
        Config {
            infix: self.infix,
            overflow: self.overflow,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
