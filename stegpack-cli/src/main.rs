use anyhow::Result;
use clap::{Parser, Subcommand};
use stegpack_cli::{commands, Context, FormatArg};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "stegpack")]
#[command(about = "Stegpack - Hide files inside PNG and BMP images", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hide a file in an ancillary chunk of an existing PNG
    Embed {
        /// Cover PNG image
        #[arg(short, long)]
        cover: String,

        /// File to hide
        #[arg(short, long)]
        input: String,

        /// Output PNG
        #[arg(short, long)]
        output: String,

        /// Payload chunk type (4 letters, lowercase first)
        #[arg(long)]
        chunk_type: Option<String>,

        /// Name to store instead of the input's file name
        #[arg(long)]
        name: Option<String>,

        /// Encrypt the file with this password
        #[arg(long)]
        password: Option<String>,
    },

    /// Recover a file hidden with `embed`
    Extract {
        /// PNG carrying a payload chunk
        #[arg(short, long)]
        input: String,

        /// Output file (defaults to the stored name)
        #[arg(short, long)]
        output: Option<String>,

        /// Directory for the stored name
        #[arg(long, conflicts_with = "output")]
        output_dir: Option<String>,

        /// Payload chunk type to look for
        #[arg(long)]
        chunk_type: Option<String>,

        /// Decrypt with this password
        #[arg(long)]
        password: Option<String>,
    },

    /// Store a file as the pixels of a new image
    Pack {
        /// File to store
        #[arg(short, long)]
        input: String,

        /// Output image
        #[arg(short, long)]
        output: String,

        /// Image format (defaults to the output extension, else png)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Name to store instead of the input's file name
        #[arg(long)]
        name: Option<String>,

        /// Encrypt the file with this password
        #[arg(long)]
        password: Option<String>,
    },

    /// Recover a file stored with `pack`
    Unpack {
        /// Image produced by `pack`
        #[arg(short, long)]
        input: String,

        /// Output file (defaults to the stored name)
        #[arg(short, long)]
        output: Option<String>,

        /// Directory for the stored name
        #[arg(long, conflicts_with = "output")]
        output_dir: Option<String>,

        /// Only try the stored pixel order (no reversal fallback)
        #[arg(long)]
        direct: bool,

        /// Decrypt with this password
        #[arg(long)]
        password: Option<String>,
    },

    /// List the chunks of a PNG
    Inspect {
        /// PNG file to inspect
        #[arg(short, long)]
        input: String,

        /// Payload chunk type to look for
        #[arg(long)]
        chunk_type: Option<String>,

        /// Print a JSON report
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let ctx = Context::from_env();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Embed {
            cover,
            input,
            output,
            chunk_type,
            name,
            password,
        } => commands::embed::execute(
            &ctx,
            &cover,
            &input,
            &output,
            chunk_type.as_deref(),
            name.as_deref(),
            password.as_deref(),
        ),

        Commands::Extract {
            input,
            output,
            output_dir,
            chunk_type,
            password,
        } => commands::extract::execute(
            &ctx,
            &input,
            output.as_deref(),
            output_dir.as_deref(),
            chunk_type.as_deref(),
            password.as_deref(),
        )
        .map(|_| ()),

        Commands::Pack {
            input,
            output,
            format,
            name,
            password,
        } => commands::pack::execute(
            &ctx,
            &input,
            &output,
            format.map(Into::into),
            name.as_deref(),
            password.as_deref(),
        ),

        Commands::Unpack {
            input,
            output,
            output_dir,
            direct,
            password,
        } => commands::unpack::execute(
            &ctx,
            &input,
            output.as_deref(),
            output_dir.as_deref(),
            direct,
            password.as_deref(),
        )
        .map(|_| ()),

        Commands::Inspect {
            input,
            chunk_type,
            json,
        } => commands::inspect::execute(&ctx, &input, chunk_type.as_deref(), json).map(|_| ()),
    }
}
