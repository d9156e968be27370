use clap::{
    builder::{styling::AnsiColor, Styles},
    ArgAction, Parser, Subcommand,
};
use vaultsig::{
    cmd::{
        address::AddressCommand, canonicalize::CanonicalizeCommand, recover_id::RecoverIdCommand,
        sign::SignCommand,
    },
    logging,
};

/// The verbosity level.
pub type Verbosity = u8;

#[derive(Debug, Parser)]
#[command(
    name = "vaultsig",
    about = "Turn key vault secp256k1 signatures into Ethereum (r, s, v) signatures.",
    author = "Hyve <support@thehyve.xyz>",
    version,
    term_width = 80,
    styles = get_color_style()
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable debug logging")]
    pub debug: bool,

    /// Verbosity level of the log messages.
    ///
    /// Pass multiple times to increase the verbosity (e.g. -v, -vv, -vvv).
    ///
    /// - 1 (-v): info
    /// - 2 (-vv): debug
    /// - 3 (-vvv): trace, including every recovery candidate
    #[arg(help_heading = "Display options", global = true, short, long, verbatim_doc_comment, action = ArgAction::Count)]
    verbosity: Verbosity,
}

impl Cli {
    pub fn run(self) -> eyre::Result<()> {
        logging::init(self.debug, self.verbosity);

        match self.command {
            Commands::Address(address) => address.execute(),
            Commands::Canonicalize(canonicalize) => canonicalize.execute(),
            Commands::RecoverId(recover_id) => recover_id.execute(),
            Commands::Sign(sign) => {
                let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
                runtime.block_on(sign.execute())
            }
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(name = "address")]
    Address(AddressCommand),

    #[command(name = "canonicalize")]
    Canonicalize(CanonicalizeCommand),

    #[command(name = "recover-id")]
    RecoverId(RecoverIdCommand),

    #[command(name = "sign")]
    Sign(SignCommand),
}

fn get_color_style() -> Styles {
    Styles::styled()
        .usage(AnsiColor::Green.on_default().bold().underline())
        .header(AnsiColor::Yellow.on_default().bold().underline())
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}
