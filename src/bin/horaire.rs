use anyhow::{Context, Result};
use horaire::cli::{self, Command, ConvertArgs, ReferenceDate, Verbosity};
use horaire::context::{AppContext, StandardContext};
use horaire::export::{export_schedules, render_calendars};
use horaire::message::reference_date_from_header;
use horaire::storage::CalendarStore;
use horaire::{CalendarSerializer, Config, ScheduleDocument, extract_schedules};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::fs;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    let args = match cli::parse_args(args)? {
        Command::Help => {
            cli::print_help("horaire");
            return Ok(());
        }
        Command::Convert(args) => args,
    };

    init_logging(args.verbosity);
    run(args)
}

fn init_logging(verbosity: Verbosity) {
    let level = match verbosity {
        Verbosity::Quiet => LevelFilter::Error,
        Verbosity::Normal => LevelFilter::Info,
        Verbosity::Verbose => LevelFilter::Debug,
    };
    let _ = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

fn run(args: ConvertArgs) -> Result<()> {
    let ctx = StandardContext::new(args.root.clone());
    let mut config = Config::load_or_default(&ctx)?;
    if !args.employees.is_empty() {
        config.employee_filter = args.employees.clone();
    }

    let reference = match &args.reference {
        ReferenceDate::Date(date) => *date,
        ReferenceDate::Header(value) => reference_date_from_header(value)?,
    };

    let html = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let mut doc = ScheduleDocument::parse(&html)?;
    doc.sanitize();
    let blocks = extract_schedules(&doc, reference, &config.scan_options())?;
    log::info!("Found {} schedule block(s)", blocks.len());

    if args.stdout {
        let serializer = CalendarSerializer::new(&config);
        for cal in render_calendars(&blocks, &serializer, &config) {
            print!("{}", String::from_utf8_lossy(&cal.ics));
        }
        return Ok(());
    }

    let out = match args.out {
        Some(dir) => dir,
        None => ctx.get_calendars_dir()?,
    };
    let written = export_schedules(&blocks, &config, &CalendarStore::new(out))?;
    log::info!("Exported {} calendar(s)", written.len());
    Ok(())
}
