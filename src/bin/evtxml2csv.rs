use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use indoc::indoc;
use log::LevelFilter;

use evtxml::{CsvOutput, process_file};

use std::fs::{self, File};
use std::path::{MAIN_SEPARATOR, Path, PathBuf};
use std::process::exit;

struct XmlToCsv {
    input: PathBuf,
    output: PathBuf,
    verbosity_level: Option<LevelFilter>,
}

impl XmlToCsv {
    pub fn from_cli_matches(matches: &ArgMatches) -> Self {
        let input = PathBuf::from(
            matches
                .get_one::<String>("input")
                .expect("This is a required argument"),
        );
        let output = PathBuf::from(
            matches
                .get_one::<String>("output")
                .expect("This is a required argument"),
        );

        let verbosity_level = match matches.get_count("verbose") {
            0 => None,
            1 => Some(LevelFilter::Info),
            2 => Some(LevelFilter::Debug),
            3 => Some(LevelFilter::Trace),
            _ => {
                eprintln!("using more than -vvv does not affect verbosity level");
                Some(LevelFilter::Trace)
            }
        };

        XmlToCsv {
            input,
            output,
            verbosity_level,
        }
    }

    /// Main entry point for `XmlToCsv`.
    pub fn run(&self) -> Result<()> {
        self.try_to_initialize_logging();

        let inputs = self.resolve_inputs()?;

        if self.output_names_a_directory() {
            self.convert_to_directory(&inputs)
        } else {
            self.convert_to_single_file(&inputs)
        }
    }

    /// A directory input expands to every `.xml` entry (case-insensitive),
    /// in listing order; a file input is the sole entry. Anything else is
    /// fatal with a distinct exit code, before any output is touched.
    fn resolve_inputs(&self) -> Result<Vec<PathBuf>> {
        if self.input.is_dir() {
            let entries = fs::read_dir(&self.input).with_context(|| {
                format!("Failed to list input directory {}", self.input.display())
            })?;

            let mut inputs = Vec::new();
            for entry in entries {
                let path = entry?.path();
                if path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
                {
                    inputs.push(path);
                }
            }
            Ok(inputs)
        } else if self.input.is_file() {
            Ok(vec![self.input.clone()])
        } else {
            eprintln!("Input not found: {}", self.input.display());
            exit(2)
        }
    }

    fn output_names_a_directory(&self) -> bool {
        if self.output.is_dir() {
            return true;
        }
        let raw = self.output.as_os_str().to_string_lossy();
        raw.ends_with(MAIN_SEPARATOR) || raw.ends_with('/')
    }

    /// One independent CSV (header + rows) per input file.
    fn convert_to_directory(&self, inputs: &[PathBuf]) -> Result<()> {
        fs::create_dir_all(&self.output).with_context(|| {
            format!("Failed to create output directory {}", self.output.display())
        })?;

        for input in inputs {
            let stem = match input.file_stem() {
                Some(stem) => stem,
                None => continue,
            };
            let mut file_name = stem.to_os_string();
            file_name.push(".csv");
            let output_path = self.output.join(file_name);

            let file = File::create(&output_path).with_context(|| {
                format!("Failed to create output file {}", output_path.display())
            })?;
            let mut sink = CsvOutput::with_writer(file);
            sink.write_header()?;

            let report = process_file(input, &mut sink)?;
            sink.flush()?;

            if let Some(error) = report.error {
                eprintln!("Error parsing {}: {error}", input.display());
            }
            println!(
                "Processed {} -> {} ({} events)",
                input.display(),
                output_path.display(),
                report.records
            );
        }

        Ok(())
    }

    /// A single CSV with one header; every input's rows are appended in order.
    fn convert_to_single_file(&self, inputs: &[PathBuf]) -> Result<()> {
        let file = Self::create_output_file(&self.output)?;
        let mut sink = CsvOutput::with_writer(file);
        sink.write_header()?;

        let mut total = 0;
        for input in inputs {
            let report = process_file(input, &mut sink)?;
            if let Some(error) = report.error {
                eprintln!("Error parsing {}: {error}", input.display());
            }
            total += report.records;
        }
        sink.flush()?;

        println!(
            "Processed {} files -> {} ({total} events)",
            inputs.len(),
            self.output.display()
        );
        Ok(())
    }

    /// Will create parent directories if needed.
    fn create_output_file(path: &Path) -> Result<File> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {}", parent.display()))?;
            }
        }

        File::create(path).with_context(|| format!("Failed to create output file {}", path.display()))
    }

    fn try_to_initialize_logging(&self) {
        if let Some(level) = self.verbosity_level {
            match simplelog::TermLogger::init(
                level,
                simplelog::Config::default(),
                simplelog::TerminalMode::Stderr,
                simplelog::ColorChoice::Auto,
            ) {
                Ok(_) => {}
                Err(e) => eprintln!("Failed to initialize logging: {e}"),
            };
        }
    }
}

fn command() -> Command {
    Command::new("evtxml2csv")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert exported Event Viewer XML logs to CSV")
        .long_about(indoc!(
            r#"
            Convert exported Event Viewer XML logs to CSV.

            The input is a single exported XML file, or a directory whose .xml files
            are all converted. When the output names a directory (an existing one, or
            a path written with a trailing separator), each input becomes its own CSV
            next to the others; when it names a file, all inputs are merged into one
            CSV with a single header row.

            Files that fail to parse are reported on stderr and skipped; the rest of
            the batch still converts.
        "#
        ))
        .arg(
            Arg::new("input")
                .long("input")
                .short('i')
                .required(true)
                .value_name("PATH")
                .help("Input XML file, or a directory containing .xml files."),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .required(true)
                .value_name("PATH")
                .help(
                    "Output CSV file, or an output directory receiving one CSV per input. \
                     Missing directories are created.",
                ),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .action(ArgAction::Count)
                .help("-v - info, -vv - debug, -vvv - trace."),
        )
}

fn main() {
    let matches = command().get_matches();

    let app = XmlToCsv::from_cli_matches(&matches);
    if let Err(e) = app.run() {
        eprintln!("{e:#}");
        exit(1);
    }
}
