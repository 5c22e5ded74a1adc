use clap::Parser;
use miette::Result;
use modfix::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) so piping the
    // report into `head` does not panic on a broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    modfix::cli::init_tracing(&global);

    match cli.command {
        Commands::Run(args) => modfix::cli::commands::run::run(args, &global),
        Commands::Map(args) => modfix::cli::commands::map::run(args, &global),
        Commands::Completions(args) => modfix::cli::commands::completions::run(args),
    }
}
