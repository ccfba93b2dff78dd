//! `sanggah` CLI entry-point.
//!
//! Available sub-commands:
//! - `employees` — list, add, edit or remove employees.
//! - `approvers` — list employees allowed to decide disputes.
//! - `submit`    — file a new attendance dispute.
//! - `refine`    — reword a reason without submitting it.
//! - `disputes`  — show the approval table.
//! - `approve` / `reject` — decide a pending dispute.
//! - `stats`     — dashboard counters.
//! - `print`     — write the approval letter for an approved dispute.
//! - `backup` / `restore` — whole-store JSON snapshot.

mod config;
mod signature;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use db::{DisputeStatus, FileStorage, Verdict};
use engine::{approval_rows, DisputeDesk, DisputeDraft, EmployeeForm};
use rewriter::GeminiRewriter;

use config::Config;

#[derive(Parser)]
#[command(
    name = "sanggah",
    about = "Attendance dispute submission and approval",
    version
)]
struct Cli {
    /// Data directory holding the collections.
    #[arg(long, global = true, env = "SANGGAH_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage employee master data.
    Employees {
        #[command(subcommand)]
        action: EmployeeAction,
    },
    /// List employees allowed to approve or reject disputes.
    Approvers,
    /// Submit a new dispute.
    Submit {
        #[arg(long)]
        employee: String,
        /// Contested attendance date (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        reason: String,
        /// Reword the reason into formal language before submitting.
        #[arg(long)]
        refine: bool,
    },
    /// Reword a reason into formal language and print it.
    Refine {
        #[arg(long)]
        employee: String,
        #[arg(long)]
        reason: String,
    },
    /// Show disputes, newest date first.
    Disputes {
        /// Only show disputes in this status (pending, approved, rejected).
        #[arg(long)]
        status: Option<DisputeStatus>,
    },
    /// Approve a pending dispute.
    Approve(Decision),
    /// Reject a pending dispute.
    Reject(Decision),
    /// Show dashboard counters.
    Stats,
    /// Write the approval letter (HTML) for an approved dispute.
    Print {
        id: String,
        /// Output file; defaults to stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Export both collections to a JSON snapshot.
    Backup {
        /// Defaults to `sanggah_pintar_backup_<date>.json`.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Replace stored data from a JSON snapshot.
    Restore { path: PathBuf },
}

#[derive(Subcommand)]
enum EmployeeAction {
    /// List all employees.
    List,
    /// Register a new employee.
    Add {
        #[command(flatten)]
        fields: EmployeeFields,
        /// Explicit id; a UUID is generated when omitted.
        #[arg(long)]
        id: Option<String>,
    },
    /// Change an existing employee.  Omitted fields keep their value.
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        nip: Option<String>,
        #[arg(long)]
        position: Option<String>,
        #[arg(long)]
        approver: Option<bool>,
        #[arg(long, conflicts_with = "clear_signature")]
        signature: Option<PathBuf>,
        #[arg(long)]
        clear_signature: bool,
    },
    /// Delete an employee.  Their disputes are kept.
    Remove { id: String },
}

#[derive(Args)]
struct EmployeeFields {
    #[arg(long)]
    name: String,
    #[arg(long)]
    nip: String,
    #[arg(long)]
    position: String,
    /// May approve or reject disputes.
    #[arg(long)]
    approver: bool,
    /// Signature image file.
    #[arg(long)]
    signature: Option<PathBuf>,
}

#[derive(Args)]
struct Decision {
    /// Dispute id.
    id: String,
    /// Acting approver; defaults to the first registered approver.
    #[arg(long)]
    approver: Option<String>,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    init_logging(&config.log_level);
    for warning in &config.warnings {
        warn!("{warning}");
    }

    let storage = FileStorage::open(&config.data_dir)
        .with_context(|| format!("cannot open data directory {}", config.data_dir.display()))?;
    let rewriter = GeminiRewriter::new(config.gemini.clone()).context("cannot build HTTP client")?;
    let desk = DisputeDesk::new(Arc::new(storage), Arc::new(rewriter));

    if config.seed && desk.seed_defaults()? {
        info!("seeded demo employees into {}", config.data_dir.display());
    }

    match cli.command {
        Command::Employees { action } => employees(&desk, action)?,
        Command::Approvers => {
            for e in desk.approvers()? {
                println!("{:<38} {:<28} {}", e.id, e.name, e.position);
            }
        }
        Command::Submit { employee, date, reason, refine } => {
            if desk.employee(&employee)?.is_none() {
                bail!("unknown employee '{employee}'");
            }
            let reason = if refine {
                desk.refine_reason(&employee, &reason).await?
            } else {
                reason
            };
            let dispute = desk.submit(DisputeDraft { employee_id: employee, date, reason })?;
            println!("Submitted dispute {} (waiting for approval)", dispute.id);
        }
        Command::Refine { employee, reason } => {
            println!("{}", desk.refine_reason(&employee, &reason).await?);
        }
        Command::Disputes { status } => {
            let employees = desk.employees()?;
            let disputes = match status {
                Some(status) => desk.disputes_with_status(status)?,
                None => desk.disputes()?,
            };
            let rows = approval_rows(&employees, &disputes);
            if rows.is_empty() {
                println!("No disputes yet.");
            }
            for row in rows {
                println!(
                    "{:<38} {} {:<10} {:<24} {:<20} {}",
                    row.dispute.id,
                    row.dispute.date,
                    row.dispute.status.label(),
                    row.employee_name,
                    row.approver_name.unwrap_or("-"),
                    row.dispute.reason,
                );
            }
        }
        Command::Approve(decision) => decide(&desk, decision, Verdict::Approved)?,
        Command::Reject(decision) => decide(&desk, decision, Verdict::Rejected)?,
        Command::Stats => {
            let stats = desk.stats()?;
            println!("Total employees:   {}", stats.total_employees);
            println!("Pending approval:  {}", stats.pending);
            println!("Approved:          {}", stats.approved);
            println!("Rejected:          {}", stats.rejected);
        }
        Command::Print { id, out } => {
            let html = desk.print_letter(&id)?;
            match out {
                Some(path) => {
                    std::fs::write(&path, html)
                        .with_context(|| format!("cannot write {}", path.display()))?;
                    println!("Letter written to {}", path.display());
                }
                None => print!("{html}"),
            }
        }
        Command::Backup { out } => {
            let path = out.unwrap_or_else(|| {
                PathBuf::from(format!(
                    "sanggah_pintar_backup_{}.json",
                    Utc::now().format("%Y-%m-%d")
                ))
            });
            std::fs::write(&path, desk.backup()?)
                .with_context(|| format!("cannot write {}", path.display()))?;
            println!("Backup written to {}", path.display());
        }
        Command::Restore { path } => restore(&desk, &path)?,
    }

    Ok(())
}

fn restore(desk: &DisputeDesk, path: &Path) -> anyhow::Result<()> {
    let document = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    match desk.restore(&document) {
        Ok(summary) => {
            let disputes = summary
                .disputes
                .map_or_else(|| "kept".to_string(), |n| n.to_string());
            println!(
                "Data restored: {} employees, disputes {}",
                summary.employees, disputes
            );
            Ok(())
        }
        Err(e) if e.is_invalid_snapshot() => {
            bail!("restore failed, make sure the file is a valid backup: {e}")
        }
        Err(e) => Err(e.into()),
    }
}

fn employees(desk: &DisputeDesk, action: EmployeeAction) -> anyhow::Result<()> {
    match action {
        EmployeeAction::List => {
            for e in desk.employees()? {
                println!(
                    "{:<38} {:<28} {:<20} {:<28} {}{}",
                    e.id,
                    e.name,
                    e.nip,
                    e.position,
                    if e.is_approver { "approver" } else { "staff" },
                    if e.signature_base64.is_some() { " (signature)" } else { "" },
                );
            }
        }
        EmployeeAction::Add { fields, id } => {
            let signature_base64 = fields
                .signature
                .as_deref()
                .map(signature::load_signature)
                .transpose()?;
            let saved = desk.save_employee(EmployeeForm {
                id,
                name: fields.name,
                nip: fields.nip,
                position: fields.position,
                is_approver: fields.approver,
                signature_base64,
            })?;
            println!("Saved employee {}", saved.id);
        }
        EmployeeAction::Edit { id, name, nip, position, approver, signature, clear_signature } => {
            let Some(existing) = desk.employee(&id)? else {
                bail!("unknown employee '{id}'");
            };
            let mut form = EmployeeForm::from(existing);
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(nip) = nip {
                form.nip = nip;
            }
            if let Some(position) = position {
                form.position = position;
            }
            if let Some(approver) = approver {
                form.is_approver = approver;
            }
            if let Some(path) = signature {
                form.signature_base64 = Some(signature::load_signature(&path)?);
            } else if clear_signature {
                form.signature_base64 = None;
            }
            let saved = desk.save_employee(form)?;
            println!("Updated employee {}", saved.id);
        }
        EmployeeAction::Remove { id } => {
            desk.remove_employee(&id)?;
            println!("Removed employee {id}");
        }
    }
    Ok(())
}

fn decide(desk: &DisputeDesk, decision: Decision, verdict: Verdict) -> anyhow::Result<()> {
    let approver_id = match decision.approver {
        Some(id) => id,
        None => desk
            .approvers()?
            .into_iter()
            .next()
            .map(|e| e.id)
            .unwrap_or_default(),
    };

    match desk.decide(&decision.id, verdict, &approver_id)? {
        Some(dispute) => println!("Dispute {} is now {}", dispute.id, dispute.status.label()),
        None => println!("No dispute with id {}", decision.id),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use db::MemoryStorage;
    use rewriter::mock::MockRewriter;

    fn desk() -> DisputeDesk {
        DisputeDesk::new(
            Arc::new(MemoryStorage::new()),
            Arc::new(MockRewriter::returning("unused")),
        )
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn data_dir_flag_is_global() {
        let cli = Cli::try_parse_from(["sanggah", "stats", "--data-dir", "/tmp/sanggah"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/sanggah")));
    }

    #[test]
    fn data_dir_reads_environment() {
        let arg = Cli::command()
            .get_arguments()
            .find(|a| a.get_id() == "data_dir")
            .cloned()
            .unwrap();
        assert_eq!(arg.get_env(), Some(std::ffi::OsStr::new("SANGGAH_DATA_DIR")));
    }

    #[test]
    fn rejected_restore_is_an_error_and_changes_nothing() {
        let desk = desk();
        desk.seed_defaults().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup.json");
        std::fs::write(&path, r#"{"disputes": []}"#).unwrap();

        let err = restore(&desk, &path).unwrap_err();

        assert!(err.to_string().contains("valid backup"));
        assert_eq!(desk.employees().unwrap().len(), 2);
    }

    #[test]
    fn accepted_restore_returns_ok() {
        let desk = desk();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup.json");
        std::fs::write(&path, r#"{"employees": []}"#).unwrap();

        restore(&desk, &path).unwrap();
        assert!(desk.employees().unwrap().is_empty());
    }
}
