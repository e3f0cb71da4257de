use strandmap::geom::bounding_box;
use strandmap::{Customization, DegenerateAxis, Layout, LayoutOptions};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Layout(strandmap::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Layout(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<strandmap::Error> for CliError {
    fn from(value: strandmap::Error) -> Self {
        Self::Layout(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Json,
    Summary,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    config: Option<String>,
    width: Option<u16>,
    height: Option<u16>,
    customization: Option<Customization>,
    strict: bool,
}

struct StrandSummary {
    id: u8,
    led_count: usize,
    x: Option<(i32, i32)>,
    y: Option<(i32, i32)>,
}

fn usage() -> &'static str {
    "strandmap-cli\n\
\n\
USAGE:\n\
  strandmap-cli [json] [--pretty] [--config <options.json>] [--width <w>] [--height <h>] [--customization plain|flippers-and-tails|dorsal-fin] [--strict] <layout.dxf>\n\
  strandmap-cli summary [--config <options.json>] [--width <w>] [--height <h>] [--customization ...] [--strict] <layout.dxf>\n\
\n\
NOTES:\n\
  - json prints every strand with its device coordinates.\n\
  - summary prints one line per strand: led count and covered x/y range.\n\
  - --width/--height give the raster size; coordinates span [0, size - 1].\n\
  - Without --customization the patch is picked from the file name (layout1, layout3).\n\
  - --strict refuses drawings whose lights all share one X or one Y.\n\
"
}

fn parse_size(value: Option<&String>) -> Result<u16, CliError> {
    value
        .and_then(|v| v.parse::<u16>().ok())
        .filter(|v| *v > 0)
        .ok_or(CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "json" => args.command = Command::Json,
            "summary" => args.command = Command::Summary,
            "--pretty" => args.pretty = true,
            "--strict" => args.strict = true,
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--width" => args.width = Some(parse_size(it.next())?),
            "--height" => args.height = Some(parse_size(it.next())?),
            "--customization" => {
                let Some(kind) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.customization = Some(match kind.as_str() {
                    "plain" => Customization::Plain,
                    "flippers-and-tails" => Customization::FlippersAndTails,
                    "dorsal-fin" => Customization::DorsalFin,
                    _ => return Err(CliError::Usage(usage())),
                });
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            other => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(other.to_string());
            }
        }
    }

    Ok(args)
}

fn layout_options(args: &Args) -> Result<LayoutOptions, CliError> {
    let mut options = match &args.config {
        Some(path) => LayoutOptions::from_json(&std::fs::read_to_string(path)?)?,
        None => LayoutOptions::for_resolution(512, 64),
    };
    if let Some(w) = args.width {
        options.max_x = w - 1;
    }
    if let Some(h) = args.height {
        options.max_y = h - 1;
    }
    if let Some(c) = args.customization {
        options.customization = Some(c);
    }
    if args.strict {
        options.degenerate_axis = DegenerateAxis::Fail;
    }
    Ok(options)
}

fn summarize(layout: &Layout) -> Vec<StrandSummary> {
    layout
        .strands()
        .map(|s| {
            let b = bounding_box(s.coords().iter().copied());
            StrandSummary {
                id: s.id().0,
                led_count: s.len(),
                x: b.map(|b| (b.min.x, b.max.x)),
                y: b.map(|b| (b.min.y, b.max.y)),
            }
        })
        .collect()
}

fn run(argv: &[String]) -> Result<(), CliError> {
    let args = parse_args(argv)?;
    let Some(input) = args.input.as_deref() else {
        return Err(CliError::Usage(usage()));
    };
    let layout = Layout::open(input, layout_options(&args)?)?;

    match args.command {
        Command::Json => {
            let out = if args.pretty {
                serde_json::to_string_pretty(&layout)?
            } else {
                serde_json::to_string(&layout)?
            };
            println!("{out}");
        }
        Command::Summary => {
            println!(
                "Layout \"{}\", dst_width={}, dst_height={}",
                layout.source(),
                layout.dst_width(),
                layout.dst_height()
            );
            for s in summarize(&layout) {
                match (s.x, s.y) {
                    (Some((x0, x1)), Some((y0, y1))) => println!(
                        "  Strand P{}, led_count={}, x=({x0}-{x1}), y=({y0}-{y1})",
                        u16::from(s.id) + 1,
                        s.led_count
                    ),
                    _ => println!("  Strand P{}, led_count=0", u16::from(s.id) + 1),
                }
            }
        }
    }
    Ok(())
}

fn main() {
    let argv: Vec<String> = std::env::args().collect();
    if let Err(err) = run(&argv) {
        match err {
            CliError::Usage(msg) => {
                eprintln!("{msg}");
                std::process::exit(2);
            }
            other => {
                eprintln!("{other}");
                std::process::exit(1);
            }
        }
    }
}
