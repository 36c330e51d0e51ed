use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "omw-tui")]
#[command(about = "Terminal command line for omw time tracking")]
pub struct Cli {
    /// Override the omw server URL from the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Open the interactive command line (default)
    Run,
    /// Interpret a single command line, e.g. `omw-tui exec "a wrote docs"`
    Exec {
        /// The command line, as it would be typed into the prompt
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        line: Vec<String>,
    },
    /// Print config path and create default file if missing
    ConfigPath,
}

impl Cli {
    pub fn command_or_default(self) -> (Option<String>, Commands) {
        (self.api_url, self.command.unwrap_or(Commands::Run))
    }
}
