use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "formdash")]
#[command(about = "Terminal dashboard for a form-builder service: browse your forms, inspect responses, create forms from templates")]
#[command(version)]
pub struct Cli {
    /// Launches the interactive dashboard when no command is given
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List your forms and exit
    List,

    /// Create a form from a template and print its editor link
    Create {
        /// Template name (e.g. "Custom", "Product Feedback Form")
        #[arg(short, long, default_value = "Custom")]
        template: String,
    },
}
