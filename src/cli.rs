//! CLI interface for the meeting scheduler.
//!
//! Each subcommand is non-interactive: arguments in, output out. Tables go to
//! stdout; notices and warnings go to stderr.
//!
//! - `vmc roster|template` manage the stored roster and agenda template.
//! - `vmc weeks` and `vmc plan new` lay out a run of four or five meetings.
//! - `vmc resolve <plan>` turns a plan into assignment records.
//! - `vmc export <plan>` writes timestamped CSV/PDF/XLSX files and logs them.
//! - `vmc roster export` writes the roster the same way.
//! - `vmc history` lists past exports.

mod format;
mod history;
mod plan;
mod roster;
mod template;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use jiff::civil::Date;
use jiff::{Timestamp, Zoned};
use uuid::Uuid;

use crate::config::Config;
use crate::model::{AssignmentRecord, ExportEntry, ExportKind, Plan, Resolution, Section};
use crate::render::{self, DocumentStyle, RecordFilter, RenderOptions};
use crate::resolve;
use crate::storage::Storage;
use crate::week::{self, Week, WeekCount};

use format::{format_records, format_warnings, format_weeks};
use history::HistoryCommand;
use plan::PlanCommand;
use roster::RosterCommand;
use template::TemplateCommand;

/// vmc: weekly meeting assignments from a roster and an agenda template.
#[derive(Debug, Parser)]
#[command(name = "vmc", version, after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r#"Workflow: a month of assignments
  1. vmc roster add "Ana"          (repeat per participant)
  2. vmc template init
  3. vmc plan new --month 2025-09 --out september.toml
  4. edit september.toml: names, ministry and living-as parts
  5. vmc resolve september.toml    (check the table and warnings)
  6. vmc export september.toml --format all

Files live under ~/.vmc/ (override with VMC_HOME)."#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage the roster of assignable participants.
    Roster {
        #[command(subcommand)]
        command: RosterCommand,
    },

    /// Manage the agenda template.
    Template {
        #[command(subcommand)]
        command: TemplateCommand,
    },

    /// Print the meeting weeks for a start date or month.
    Weeks {
        #[command(flatten)]
        span: WeekSpan,
    },

    /// Create plan files.
    Plan {
        #[command(subcommand)]
        command: PlanCommand,
    },

    /// Resolve a plan and print the assignment table.
    ///
    /// Warnings for skipped or adjusted slots are printed to stderr.
    Resolve {
        /// Plan file (TOML).
        plan: PathBuf,

        /// Also write the table as CSV to this file.
        #[arg(long)]
        out: Option<PathBuf>,

        /// Print records as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Resolve a plan and write timestamped export files.
    ///
    /// Files land in the exports directory; each one is recorded in the
    /// export history with its SHA-256 digest.
    Export {
        /// Plan file (TOML).
        plan: PathBuf,

        #[arg(long, value_enum, default_value = "all")]
        format: FormatArg,

        /// Document title (defaults to the plan's, then the configured title).
        #[arg(long)]
        title: Option<String>,

        /// Only this week (label, e.g. "08 Sep").
        #[arg(long)]
        week: Option<String>,

        /// Only this section.
        #[arg(long, value_enum)]
        section: Option<SectionArg>,

        /// Only slots assigned to this participant.
        #[arg(long)]
        assignee: Option<String>,
    },

    /// List and inspect past exports.
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },
}

/// A run of meeting weeks: either `--start` and `--count`, or `--month`.
#[derive(Debug, Clone, Args)]
pub struct WeekSpan {
    /// First meeting date (YYYY-MM-DD).
    #[arg(long, requires = "count", conflicts_with = "month")]
    start: Option<String>,

    /// Number of weeks: 4 or 5.
    #[arg(long, requires = "start")]
    count: Option<u8>,

    /// Every meeting day of this month (YYYY-MM).
    #[arg(long)]
    month: Option<String>,
}

impl WeekSpan {
    fn weeks(&self, config: &Config) -> Result<Vec<Week>, String> {
        match (&self.start, self.count, &self.month) {
            (Some(start), Some(count), None) => {
                let start: Date = start
                    .parse()
                    .map_err(|e| format!("invalid --start '{start}': {e}"))?;
                let count = WeekCount::try_from(count).map_err(|e| e.to_string())?;
                week::sequence(start, count).map_err(|e| e.to_string())
            }
            (None, None, Some(month)) => {
                let (year, month) = parse_month(month)?;
                week::month(year, month, config.meeting_day.to_weekday())
                    .map_err(|e| e.to_string())
            }
            _ => Err("specify either --start and --count, or --month".to_string()),
        }
    }
}

/// Parse `YYYY-MM`.
fn parse_month(raw: &str) -> Result<(i16, i8), String> {
    let invalid = || format!("invalid --month '{raw}': expected YYYY-MM");
    let (year, month) = raw.trim().split_once('-').ok_or_else(invalid)?;
    let year = year.parse().map_err(|_| invalid())?;
    let month = month.parse().map_err(|_| invalid())?;
    Ok((year, month))
}

/// CLI-facing export format.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    /// Flat CSV table.
    Csv,
    /// PDF in the configured document style.
    Pdf,
    /// PDF as one flat grid.
    Grid,
    /// Spreadsheet workbook.
    Xlsx,
    /// CSV, both PDF layouts and the workbook.
    All,
}

impl FormatArg {
    fn to_kinds(self, style: DocumentStyle) -> Vec<ExportKind> {
        match self {
            Self::Csv => vec![ExportKind::Csv],
            Self::Pdf => vec![match style {
                DocumentStyle::Banded => ExportKind::Pdf,
                DocumentStyle::Grid => ExportKind::GridPdf,
            }],
            Self::Grid => vec![ExportKind::GridPdf],
            Self::Xlsx => vec![ExportKind::Xlsx],
            Self::All => vec![
                ExportKind::Csv,
                ExportKind::Pdf,
                ExportKind::GridPdf,
                ExportKind::Xlsx,
            ],
        }
    }
}

/// CLI-facing section, mapped to the domain `Section`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SectionArg {
    Opening,
    Treasures,
    Ministry,
    LivingAs,
    Closing,
}

impl SectionArg {
    fn to_domain(self) -> Section {
        match self {
            Self::Opening => Section::Opening,
            Self::Treasures => Section::Treasures,
            Self::Ministry => Section::Ministry,
            Self::LivingAs => Section::LivingAs,
            Self::Closing => Section::Closing,
        }
    }
}

/// Run the CLI, returning an error message on failure.
pub fn run(config: &Config, storage: &Storage) -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Command::Roster { command } => roster::run(storage, command),
        Command::Template { command } => template::run(storage, command),
        Command::Weeks { span } => {
            let weeks = span.weeks(config)?;
            println!("{}", format_weeks(&weeks));
            Ok(())
        }
        Command::Plan { command } => plan::run(config, storage, command),
        Command::Resolve { plan, out, json } => {
            cmd_resolve(config, storage, &plan, out.as_deref(), json)
        }
        Command::Export {
            plan,
            format,
            title,
            week,
            section,
            assignee,
        } => {
            let filter = RecordFilter {
                week,
                section: section.map(SectionArg::to_domain),
                assignee,
            };
            cmd_export(config, storage, &plan, format, title, &filter)
        }
        Command::History { command } => history::run(storage, command),
    }
}

fn cmd_resolve(
    config: &Config,
    storage: &Storage,
    plan_path: &Path,
    out: Option<&Path>,
    json: bool,
) -> Result<(), String> {
    let plan = load_plan(plan_path)?;
    let resolution = resolve_plan(config, storage, &plan)?;

    if json {
        let json = serde_json::to_string_pretty(&resolution.records)
            .map_err(|e| format!("failed to serialize records: {e}"))?;
        println!("{json}");
    } else if resolution.records.is_empty() {
        println!("No assignments");
    } else {
        println!("{}", format_records(&resolution.records));
    }
    report_warnings(&resolution);

    if let Some(path) = out {
        let bytes = render::serialize(&resolution.records)
            .map_err(|e| format!("failed to serialize records: {e}"))?;
        fs::write(path, bytes).map_err(|e| format!("failed to write {}: {e}", path.display()))?;
        eprintln!("Wrote {}", path.display());
    }
    Ok(())
}

fn cmd_export(
    config: &Config,
    storage: &Storage,
    plan_path: &Path,
    format: FormatArg,
    title: Option<String>,
    filter: &RecordFilter,
) -> Result<(), String> {
    let plan = load_plan(plan_path)?;
    let resolution = resolve_plan(config, storage, &plan)?;
    report_warnings(&resolution);

    let records = render::filter(&resolution.records, filter, &config.pair_separator);
    if !filter.is_empty() {
        eprintln!(
            "Filter kept {} of {} records",
            records.len(),
            resolution.records.len()
        );
    }

    let title = title
        .or(plan.title)
        .unwrap_or_else(|| config.title.clone());
    let stamp = export_stamp();

    for kind in format.to_kinds(config.document.style) {
        let bytes = export_bytes(kind, &records, &title)?;
        let path = record_export(storage, kind, &stamp, &bytes, records.len())?;
        println!("{}", path.display());
    }
    Ok(())
}

/// Minute-resolution stamp for export file names.
fn export_stamp() -> String {
    Zoned::now().strftime("%Y-%m-%d_%H-%M").to_string()
}

/// Write an export file and append its history entry.
fn record_export(
    storage: &Storage,
    kind: ExportKind,
    stamp: &str,
    bytes: &[u8],
    rows: usize,
) -> Result<PathBuf, String> {
    let path = storage
        .write_export(kind, stamp, bytes)
        .map_err(|e| format!("failed to write {kind} export: {e}"))?;

    let entry = ExportEntry {
        id: Uuid::new_v4(),
        kind,
        file: path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default(),
        sha256: history::digest(bytes),
        records: rows,
        exported_at: Timestamp::now(),
    };
    storage
        .append_history(&entry)
        .map_err(|e| format!("failed to record export: {e}"))?;

    tracing::info!(kind = %kind, path = %path.display(), rows, "exported");
    Ok(path)
}

fn export_bytes(
    kind: ExportKind,
    records: &[AssignmentRecord],
    title: &str,
) -> Result<Vec<u8>, String> {
    match kind {
        ExportKind::Csv => {
            render::serialize(records).map_err(|e| format!("failed to serialize records: {e}"))
        }
        ExportKind::Pdf => Ok(render::render(
            records,
            title,
            RenderOptions {
                style: DocumentStyle::Banded,
            },
        )),
        ExportKind::GridPdf => Ok(render::render(
            records,
            title,
            RenderOptions {
                style: DocumentStyle::Grid,
            },
        )),
        ExportKind::Xlsx => {
            render::workbook(records).map_err(|e| format!("failed to build workbook: {e}"))
        }
        ExportKind::RosterCsv | ExportKind::RosterPdf => {
            Err(format!("{kind} is not an assignment export"))
        }
    }
}

fn load_plan(path: &Path) -> Result<Plan, String> {
    let contents =
        fs::read_to_string(path).map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    toml::from_str(&contents).map_err(|e| format!("invalid plan at {}: {e}", path.display()))
}

/// Resolve `plan` against the stored roster and template.
///
/// A missing roster or template is not an error: a notice explains how to
/// create it and the resolution is empty.
fn resolve_plan(config: &Config, storage: &Storage, plan: &Plan) -> Result<Resolution, String> {
    let count = WeekCount::try_from(plan.weeks).map_err(|e| format!("invalid plan: {e}"))?;
    let weeks = week::sequence(plan.start, count).map_err(|e| format!("invalid plan: {e}"))?;

    let roster = storage
        .load_roster()
        .map_err(|e| format!("failed to load roster: {e}"))?;
    let template = storage
        .load_template()
        .map_err(|e| format!("failed to load template: {e}"))?;

    let (Some(roster), Some(template)) = (roster, template) else {
        if !storage.roster_path().exists() {
            eprintln!("{}", missing_roster_notice(storage));
        }
        if !storage.template_path().exists() {
            eprintln!("{}", missing_template_notice(storage));
        }
        return Ok(Resolution::default());
    };

    resolve::resolve(&weeks, &roster, &template, plan, &config.policy())
        .map_err(|e| format!("cannot resolve plan: {e}"))
}

fn report_warnings(resolution: &Resolution) {
    if !resolution.warnings.is_empty() {
        eprintln!("{}", format_warnings(&resolution.warnings));
    }
}

fn missing_roster_notice(storage: &Storage) -> String {
    format!(
        "No roster at {}\n\
         Add participants with: vmc roster add <name>",
        storage.roster_path().display()
    )
}

fn missing_template_notice(storage: &Storage) -> String {
    format!(
        "No agenda template at {}\n\
         Create a starter template with: vmc template init",
        storage.template_path().display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;
    use tempfile::TempDir;

    use crate::model::{Participant, Roster, Template};

    const PLAN: &str = r#"
start = "2025-09-01"
weeks = 4

[[week]]
presiding = "Ana"
[[week.ministry]]
slot = "Talk"
assignees = ["Ana"]

[[week]]
[[week.ministry]]
slot = "Talk"

[[week]]
[[week.ministry]]
slot = "Talk"

[[week]]
[[week.ministry]]
slot = "Talk"
"#;

    fn setup() -> (TempDir, Storage, PathBuf) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("vmc")).unwrap();
        let plan = dir.path().join("plan.toml");
        fs::write(&plan, PLAN).unwrap();
        (dir, storage, plan)
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn month_argument_parses() {
        assert_eq!(parse_month("2025-09").unwrap(), (2025, 9));
        assert!(parse_month("2025").is_err());
        assert!(parse_month("sept-2025").is_err());
    }

    #[test]
    fn week_span_requires_one_form() {
        let config = Config::default();
        let span = WeekSpan {
            start: None,
            count: None,
            month: None,
        };
        assert!(span.weeks(&config).is_err());

        let span = WeekSpan {
            start: Some("2025-09-04".into()),
            count: Some(4),
            month: None,
        };
        assert_eq!(span.weeks(&config).unwrap()[3].label, "25 Sep");

        let span = WeekSpan {
            start: None,
            count: None,
            month: Some("2025-09".into()),
        };
        assert_eq!(span.weeks(&config).unwrap()[0].label, "04 Sep");
    }

    #[test]
    fn missing_inputs_resolve_to_nothing() {
        let (_dir, storage, plan) = setup();
        let plan = load_plan(&plan).unwrap();
        let resolution = resolve_plan(&Config::default(), &storage, &plan).unwrap();
        assert!(resolution.records.is_empty());
    }

    #[test]
    fn stored_inputs_resolve_the_plan() {
        let (_dir, storage, plan) = setup();
        storage
            .save_roster(&Roster::new(vec![Participant::new("Ana")]))
            .unwrap();
        storage.save_template(&Template::starter()).unwrap();

        let plan = load_plan(&plan).unwrap();
        let resolution = resolve_plan(&Config::default(), &storage, &plan).unwrap();
        let first = &resolution.records[0];
        assert_eq!(
            (first.week.as_str(), first.slot_label.as_str(), first.assignee.as_str()),
            ("01 Sep", "Presiding", "Ana")
        );
        assert!(resolution.records.iter().any(|r| r.week == "22 Sep"));
    }

    #[test]
    fn export_writes_files_and_history() {
        let (_dir, storage, plan) = setup();
        storage
            .save_roster(&Roster::new(vec![Participant::new("Ana")]))
            .unwrap();
        storage.save_template(&Template::starter()).unwrap();

        cmd_export(
            &Config::default(),
            &storage,
            &plan,
            FormatArg::All,
            None,
            &RecordFilter::default(),
        )
        .unwrap();

        let history = storage.load_history().unwrap();
        let kinds: Vec<ExportKind> = history.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            [
                ExportKind::Csv,
                ExportKind::Pdf,
                ExportKind::GridPdf,
                ExportKind::Xlsx
            ]
        );
        for entry in &history {
            let bytes = fs::read(storage.export_path(&entry.file)).unwrap();
            assert_eq!(history::digest(&bytes), entry.sha256);
        }
        let csv = fs::read(storage.export_path(&history[0].file)).unwrap();
        assert_eq!(render::parse(&csv).unwrap().len(), history[0].records);
    }

    #[test]
    fn xlsx_export_is_written_beside_the_others() {
        let (_dir, storage, plan) = setup();
        storage
            .save_roster(&Roster::new(vec![Participant::new("Ana")]))
            .unwrap();
        storage.save_template(&Template::starter()).unwrap();

        cmd_export(
            &Config::default(),
            &storage,
            &plan,
            FormatArg::Xlsx,
            None,
            &RecordFilter::default(),
        )
        .unwrap();

        let history = storage.load_history().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].kind, ExportKind::Xlsx);
        assert!(history[0].file.starts_with("assignments_"));
        assert!(history[0].file.ends_with(".xlsx"));
        assert!(history[0].records > 0);

        let bytes = fs::read(storage.export_path(&history[0].file)).unwrap();
        assert!(bytes.starts_with(b"PK\x03\x04"));
        assert_eq!(history::digest(&bytes), history[0].sha256);
    }

    #[test]
    fn configured_grid_style_changes_pdf_kind() {
        assert!(matches!(
            FormatArg::Pdf.to_kinds(DocumentStyle::Grid)[..],
            [ExportKind::GridPdf]
        ));
        assert!(matches!(
            FormatArg::Pdf.to_kinds(DocumentStyle::Banded)[..],
            [ExportKind::Pdf]
        ));
    }

    #[test]
    fn all_writes_both_layouts_and_the_workbook() {
        for style in [DocumentStyle::Banded, DocumentStyle::Grid] {
            assert!(matches!(
                FormatArg::All.to_kinds(style)[..],
                [
                    ExportKind::Csv,
                    ExportKind::Pdf,
                    ExportKind::GridPdf,
                    ExportKind::Xlsx
                ]
            ));
        }
    }
}
