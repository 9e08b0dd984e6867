use clap::{Args, Parser, Subcommand};

use mdecode::{DecodeConfig, DEFAULT_MAX_ROUNDS};

#[derive(Parser)]
#[command(name = "mdecode")]
#[command(about = "Detect and strip layered hex, base64 and protobuf encodings")]
#[command(version)]
pub struct Cli {
    #[arg(long, short = 'v', global = true, help = "Print every applied layer")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(about = "Decode layer after layer until nothing matches")]
    Peel {
        #[command(flatten)]
        encodings: EncodingArgs,

        #[arg(long, short = 'i', default_value = "-")]
        r#in: String,

        #[arg(long, short = 'o', default_value = "-")]
        out: String,

        #[arg(long, default_value_t = DEFAULT_MAX_ROUNDS, help = "Give up after this many layers")]
        max_rounds: usize,

        #[arg(long, help = "Write binary output to a terminal")]
        force: bool,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "Show which decoders accept the input")]
    Detect {
        #[command(flatten)]
        encodings: EncodingArgs,

        #[arg(long, short = 'i', default_value = "-")]
        r#in: String,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
}

#[derive(Args, Clone, Copy)]
pub struct EncodingArgs {
    #[arg(long, help = "Use hex decoding")]
    pub hex: bool,

    #[arg(long, help = "Use base64 decoding")]
    pub base64: bool,

    #[arg(long, help = "Use proto decoding")]
    pub proto: bool,

    #[arg(long, conflicts_with_all = ["hex", "base64", "proto"], help = "Disable all decodings")]
    pub none: bool,
}

impl EncodingArgs {
    /// Naming any encoding restricts decoding to the named ones; naming
    /// none keeps the all-enabled default.
    pub fn config(&self) -> DecodeConfig {
        if self.none {
            return DecodeConfig::none();
        }
        if !(self.hex || self.base64 || self.proto) {
            return DecodeConfig::default();
        }

        let mut config = DecodeConfig::none();
        if self.hex {
            config = config.with_hex();
        }
        if self.base64 {
            config = config.with_base64();
        }
        if self.proto {
            config = config.with_proto();
        }
        config
    }
}
