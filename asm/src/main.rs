use color_print::cprintln;

use dasm16::emit;
use dasm16::error::Error;
use dasm16::parser::Parser;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file
    input: String,

    /// Output file
    #[clap(short, long, default_value = "out.bin")]
    output: String,

    /// Dump the generated instructions and words
    #[clap(short, long)]
    dump: bool,
}

fn main() {
    let args = {
        use clap::Parser;
        Args::parse()
    };
    if let Err(err) = run(&args) {
        cprintln!("<red,bold>error</>: {}", err);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let mut parser = Parser::from_path(&args.input)?;
    parser.parse()?;
    let words = parser.generated_code()?;

    if args.dump {
        for inst in parser.instructions() {
            println!("  {}", inst.cformat());
        }
        println!("{}", parser.dump()?);
    }

    if let Err(err) = emit::to_file(&args.output, &words) {
        cprintln!("<red,bold>error</>: {} ({})", args.output, err);
        std::process::exit(1);
    }
    Ok(())
}
