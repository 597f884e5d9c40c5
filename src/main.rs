// EduFinance - School fee bookkeeping
// Entry point and command dispatch

use chrono::Datelike;
use clap::{Parser, Subcommand};
use edufinance::app::App;
use edufinance::currency::format_rupiah;
use edufinance::finance::{self, PaymentState};
use edufinance::services::HistoryFilter;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// School fee bookkeeping CLI.
#[derive(Parser, Debug)]
#[command(name = "edufinance", about = "School fee bookkeeping")]
struct Cli {
    /// Output format: table or json.
    #[arg(long = "output", short = 'o', global = true, default_value = "table")]
    output: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show dashboard totals (default)
    Summary,

    /// Show the monthly income/expense report for one year
    Report {
        /// Calendar year (default: current year)
        year: Option<i32>,
    },

    /// Show the twelve-month SPP status for one student
    Status {
        /// Student NIS
        nis: String,
    },

    /// Show one student's payment history, most recent first
    History {
        /// Student NIS
        nis: String,
    },

    /// Export the transaction history to a CSV file
    ExportTransactions {
        /// Output file
        path: PathBuf,
        /// Filter by transaction type: in or out
        #[arg(long = "type")]
        kind: Option<String>,
        /// Case-insensitive search over student name, category and id
        #[arg(long)]
        search: Option<String>,
    },

    /// Export the monthly report to a CSV file
    ExportReport {
        /// Output file
        path: PathBuf,
        /// Calendar year (default: current year)
        year: Option<i32>,
    },

    /// Import roster rows from a CSV file
    ImportStudents {
        /// Input file
        path: PathBuf,
    },

    /// Export the roster to a CSV file
    ExportStudents {
        /// Output file
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "edufinance=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let json_output = cli.output == "json";

    let app = App::init().await?;

    match cli.command.unwrap_or(Commands::Summary) {
        Commands::Summary => print_summary(&app, json_output).await?,
        Commands::Report { year } => {
            print_report(&app, year.unwrap_or_else(current_year), json_output).await?;
        }
        Commands::Status { nis } => print_status(&app, &nis, json_output).await?,
        Commands::History { nis } => print_history(&app, &nis, json_output).await?,
        Commands::ExportTransactions { path, kind, search } => {
            let filter = parse_history_filter(kind.as_deref())?;
            let text = app
                .reports
                .export_history(filter, search.as_deref().unwrap_or(""))
                .await?;
            std::fs::write(&path, &text)?;
            println!("Exported transactions to {}", path.display());
        }
        Commands::ExportReport { path, year } => {
            let text = app
                .reports
                .export_monthly(year.unwrap_or_else(current_year))
                .await?;
            std::fs::write(&path, &text)?;
            println!("Exported report to {}", path.display());
        }
        Commands::ImportStudents { path } => {
            let text = std::fs::read_to_string(&path)?;
            let summary = app.students.import_roster(&text).await?;
            println!(
                "Imported {} rows ({} skipped)",
                summary.imported, summary.skipped
            );
        }
        Commands::ExportStudents { path } => {
            let text = app.students.export_roster().await?;
            std::fs::write(&path, &text)?;
            println!("Exported roster to {}", path.display());
        }
    }

    Ok(())
}

fn current_year() -> i32 {
    chrono::Utc::now().year()
}

fn parse_history_filter(kind: Option<&str>) -> anyhow::Result<HistoryFilter> {
    match kind {
        None => Ok(HistoryFilter::All),
        Some(k) => match k.to_lowercase().as_str() {
            "in" => Ok(HistoryFilter::In),
            "out" => Ok(HistoryFilter::Out),
            other => anyhow::bail!("Unknown transaction type: {} (expected in or out)", other),
        },
    }
}

async fn print_summary(app: &App, json: bool) -> anyhow::Result<()> {
    let profile = app.school.profile().await?;
    let stats = app.reports.dashboard().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", profile.name);
    println!("{}", profile.address);
    println!();
    println!("Total Pemasukan   : {}", format_rupiah(stats.total_income));
    println!("Total Pengeluaran : {}", format_rupiah(stats.total_expense));
    println!("Saldo             : {}", format_rupiah(stats.balance));
    println!("Target SPP Tahunan: {}", format_rupiah(stats.target));
    println!("Total Tunggakan   : {}", format_rupiah(stats.total_arrears));

    Ok(())
}

async fn print_report(app: &App, year: i32, json: bool) -> anyhow::Result<()> {
    let rows = app.reports.monthly(year).await?;
    let totals = finance::report_totals(&rows);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("Laporan Keuangan {}", year);
    println!(
        "{:<10} {:>15} {:>15} {:>15}",
        "Bulan", "Pemasukan", "Pengeluaran", "Saldo"
    );
    for row in &rows {
        println!(
            "{:<10} {:>15} {:>15} {:>15}",
            row.month,
            format_rupiah(row.income),
            format_rupiah(row.expense),
            format_rupiah(row.balance)
        );
    }
    println!(
        "{:<10} {:>15} {:>15} {:>15}",
        "Total",
        format_rupiah(totals.income),
        format_rupiah(totals.expense),
        format_rupiah(totals.balance)
    );

    Ok(())
}

async fn print_status(app: &App, nis: &str, json: bool) -> anyhow::Result<()> {
    let student = app.students.get(nis).await?;
    let status = app.reports.spp_status(nis).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!(
        "{} ({}) - Kelas {}",
        student.name, student.id, student.class_name
    );
    println!("SPP per bulan: {}", format_rupiah(student.spp_amount));
    println!();
    for entry in &status {
        let label = match entry.status {
            PaymentState::Paid => "Lunas",
            PaymentState::Unpaid => "Belum Lunas",
        };
        println!("{:<10} {}", entry.month, label);
    }

    Ok(())
}

async fn print_history(app: &App, nis: &str, json: bool) -> anyhow::Result<()> {
    let student = app.students.get(nis).await?;
    let history = app.reports.student_history(nis).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&history)?);
        return Ok(());
    }

    println!("Riwayat pembayaran {} ({})", student.name, student.id);
    if history.is_empty() {
        println!("Belum ada transaksi");
        return Ok(());
    }
    for t in &history {
        println!(
            "{}  {}  {}  {}  {}",
            t.date,
            t.id,
            t.category,
            format_rupiah(t.amount),
            t.pic
        );
    }

    Ok(())
}
