use anyhow::Result;
use clap::Parser;
use funnel_icons::icon_gen;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "funnel-icons",
    about = "Generate the placeholder funnel icons (16, 32, 48 and 64 px)"
)]
struct Args {
    /// Output directory.
    #[clap(short, long, value_name = "DIR", default_value = ".")]
    output: PathBuf,

    /// Also write icons.json, the `icons` map for an extension manifest
    #[clap(long)]
    manifest: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    icon_gen::generate_icons(icon_gen::Args {
        output: args.output,
        manifest: args.manifest,
    })
}
