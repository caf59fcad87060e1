// File: ./src/cli.rs
//! Command-line parsing and help text for the `horaire` binary.
use anyhow::{Result, anyhow, bail};
use chrono::NaiveDate;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceDate {
    Date(NaiveDate),
    /// Raw `Date:` header of the schedule email.
    Header(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Convert(ConvertArgs),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertArgs {
    pub input: PathBuf,
    pub reference: ReferenceDate,
    pub out: Option<PathBuf>,
    pub employees: Vec<String>,
    pub root: Option<PathBuf>,
    pub stdout: bool,
    pub verbosity: Verbosity,
}

pub fn parse_args<I, S>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args = args.into_iter().map(Into::<String>::into);

    let mut input = None;
    let mut reference = None;
    let mut out = None;
    let mut employees = Vec::new();
    let mut root = None;
    let mut stdout = false;
    let mut verbosity = Verbosity::Normal;

    while let Some(arg) = args.next() {
        let mut value = |flag: &str| args.next().ok_or_else(|| anyhow!("{} expects a value", flag));
        match arg.as_str() {
            "-h" | "--help" | "help" => return Ok(Command::Help),
            "--date" => {
                let raw = value("--date")?;
                let date = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .map_err(|e| anyhow!("Invalid --date '{}': {}", raw, e))?;
                reference = Some(ReferenceDate::Date(date));
            }
            "--date-header" => reference = Some(ReferenceDate::Header(value("--date-header")?)),
            "-o" | "--out" => out = Some(PathBuf::from(value("--out")?)),
            "-e" | "--employee" => employees.push(value("--employee")?),
            "-r" | "--root" => root = Some(PathBuf::from(value("--root")?)),
            "--stdout" => stdout = true,
            "-v" | "--verbose" => verbosity = Verbosity::Verbose,
            "-q" | "--quiet" => verbosity = Verbosity::Quiet,
            flag if flag.starts_with('-') => bail!("Unknown option '{}'", flag),
            _ if input.is_none() => input = Some(PathBuf::from(&arg)),
            _ => bail!("Unexpected argument '{}'", arg),
        }
    }

    let input = input.ok_or_else(|| anyhow!("Missing schedule file (see --help)"))?;
    let reference =
        reference.ok_or_else(|| anyhow!("One of --date or --date-header is required"))?;

    Ok(Command::Convert(ConvertArgs {
        input,
        reference,
        out,
        employees,
        root,
        stdout,
        verbosity,
    }))
}

pub fn print_help(binary_name: &str) {
    println!(
        "Horaire v{} - Turns emailed work schedules into calendar files",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!(
        "    {} <schedule.html> (--date YYYY-MM-DD | --date-header <value>) [OPTIONS]",
        binary_name
    );
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    --date <YYYY-MM-DD>       Date the schedule was sent.");
    println!("    --date-header <value>     The email's Date: header, e.g.");
    println!("                              \"Thu, 28 Dec 2023 09:15:00 -0800\".");
    println!("    -o, --out <dir>           Output directory (default: <data dir>/calendars).");
    println!("    -e, --employee <prefix>   Only export names starting with prefix (repeatable).");
    println!("    -r, --root <path>         Use a different directory for config and data.");
    println!("    --stdout                  Print the calendars instead of writing files.");
    println!("    -v, --verbose             Debug logging.");
    println!("    -q, --quiet               Errors only.");
    println!("    -h, --help                Show this help message.");
    println!();
    println!("OUTPUT:");
    println!("    <out>/<employee-slug>/Schedule <first date> to <last date>.ics");
    println!();
    println!("CONFIG:");
    println!("    <config dir>/config.toml  timezone, uid_namespace, work_summary, lunch_summary,");
    println!("                              lunch_minutes, work_reminders_mins, employee_filter, ...");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_convert() {
        let cmd = parse_args([
            "schedule.html",
            "--date",
            "2023-12-28",
            "-e",
            "Ste-Marie",
            "--stdout",
            "-v",
        ])
        .unwrap();
        assert_eq!(
            cmd,
            Command::Convert(ConvertArgs {
                input: PathBuf::from("schedule.html"),
                reference: ReferenceDate::Date(NaiveDate::from_ymd_opt(2023, 12, 28).unwrap()),
                out: None,
                employees: vec!["Ste-Marie".to_string()],
                root: None,
                stdout: true,
                verbosity: Verbosity::Verbose,
            })
        );
    }

    #[test]
    fn test_parse_header_reference() {
        let cmd = parse_args(["s.html", "--date-header", "Thu, 28 Dec 2023 09:15:00 -0800"]).unwrap();
        match cmd {
            Command::Convert(args) => assert_eq!(
                args.reference,
                ReferenceDate::Header("Thu, 28 Dec 2023 09:15:00 -0800".to_string())
            ),
            _ => panic!("Expected convert"),
        }
    }

    #[test]
    fn test_help() {
        assert_eq!(parse_args(["--help"]).unwrap(), Command::Help);
    }

    #[test]
    fn test_errors() {
        assert!(parse_args(["s.html"]).is_err());
        assert!(parse_args(["--date", "2023-12-28"]).is_err());
        assert!(parse_args(["s.html", "--date"]).is_err());
        assert!(parse_args(["s.html", "--date", "28/12/2023"]).is_err());
        assert!(parse_args(["s.html", "--bogus"]).is_err());
    }
}
