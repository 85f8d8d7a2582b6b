use anyhow::bail;
use tracing_subscriber::EnvFilter;
use typed_argparser::{Argument, Command, Parser, ParserConfig, ValueKind};

fn build_parser() -> anyhow::Result<Parser> {
    let mut parser = Parser::with_config(ParserConfig::default().print_usage(true));

    parser.add_argument(
        Argument::new(ValueKind::Bool, "--verbose")
            .short("-v")
            .description("Print what is going on"),
    )?;
    parser.add_argument(
        Argument::new(ValueKind::Bool, "--help")
            .short("-h")
            .description("Print this help"),
    )?;

    parser.add_command(
        Command::new("build", "Builds a target")
            .with_argument(Argument::new(ValueKind::String, "target").description("What to build"))?
            .with_argument(
                Argument::new(ValueKind::ULong, "--jobs")
                    .short("-j")
                    .description("Parallel jobs")
                    .default_value(1u64),
            )?
            .with_argument(Argument::new(ValueKind::Bool, "--release").description("Optimize"))?,
    );

    parser.add_command(
        Command::new("clean", "Removes build outputs")
            .with_argument(Argument::new(ValueKind::Bool, "--all").description("Remove caches too"))?,
    );

    Ok(parser)
}

pub fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut parser = build_parser()?;
    parser.parse_or_exit(std::env::args())?;

    if parser.get::<bool>("help").unwrap_or(false) {
        print!("{}", parser.usage());
        return Ok(());
    }

    let verbose = parser.get::<bool>("verbose").unwrap_or(false);

    match parser.active_command_name() {
        "build" => {
            let Some(target) = parser.get_from::<String>("build", "target") else {
                bail!("missing required argument 'target'");
            };
            let jobs = parser.get_from::<u64>("build", "jobs").unwrap_or(1);
            let release = parser.get_from::<bool>("build", "release").unwrap_or(false);
            if verbose {
                println!("building with {jobs} job(s)");
            }
            println!("build {target} (release: {release})");
        }
        "clean" => {
            let all = parser.get_from::<bool>("clean", "all").unwrap_or(false);
            println!("clean (all: {all})");
        }
        _ => print!("{}", parser.usage()),
    }

    Ok(())
}
