//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::svg_chart::render_equity_chart;
use crate::domain::backtest::{run_backtest, BacktestConfig, BacktestResult};
use crate::domain::config_validation::{
    read_backtest_config, validate_backtest_config, DEFAULT_PERIOD,
};
use crate::domain::error::MacrossError;
use crate::domain::indicator::IndicatorType;
use crate::domain::metrics::MetricsReport;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "macross", about = "Moving-average crossover backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: Option<String>,
        #[arg(long)]
        period: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the date range of the input price file
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: Option<String>,
        #[arg(long)]
        period: Option<String>,
    },
}

/// Where the price series comes from; `ticker` and `period` are passed
/// through to the data adapter and never interpreted by the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSettings {
    pub ticker: String,
    pub period: String,
    pub data_dir: PathBuf,
}

pub fn run(cli: Cli) -> ExitCode {
    let outcome = match cli.command {
        Command::Backtest {
            config,
            ticker,
            period,
            output,
            dry_run,
        } => {
            if dry_run {
                run_dry_run(&config, ticker.as_deref(), period.as_deref())
            } else {
                run_backtest_command(&config, ticker.as_deref(), period.as_deref(), output)
            }
        }
        Command::Validate { config } => run_validate(&config),
        Command::Info {
            config,
            ticker,
            period,
        } => run_info(&config, ticker.as_deref(), period.as_deref()),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, MacrossError> {
    info!("loading config from {}", path.display());
    FileConfigAdapter::from_file(path)
}

/// Typed pipeline configuration, validated.
pub fn build_backtest_config(adapter: &dyn ConfigPort) -> Result<BacktestConfig, MacrossError> {
    let config = read_backtest_config(adapter)?;
    config.validate()?;
    Ok(config)
}

pub fn resolve_data_settings(
    ticker_override: Option<&str>,
    period_override: Option<&str>,
    config: &dyn ConfigPort,
) -> Result<DataSettings, MacrossError> {
    let ticker = ticker_override
        .map(str::to_string)
        .or_else(|| config.get_string("data", "ticker"))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| MacrossError::ConfigMissing {
            section: "data".into(),
            key: "ticker".into(),
        })?;

    let period = period_override
        .map(str::to_string)
        .or_else(|| config.get_string("data", "period"))
        .map(|p| p.trim().to_string())
        .unwrap_or_else(|| DEFAULT_PERIOD.to_string());
    if period.is_empty() {
        return Err(MacrossError::ConfigInvalid {
            section: "data".into(),
            key: "period".into(),
            reason: "period must not be blank".into(),
        });
    }

    let data_dir = config
        .get_string("data", "data_dir")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(DataSettings {
        ticker,
        period,
        data_dir,
    })
}

pub fn resolve_output_dir(output_override: Option<PathBuf>, config: &dyn ConfigPort) -> PathBuf {
    output_override
        .or_else(|| config.get_string("output", "dir").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("outputs"))
}

fn run_backtest_command(
    config_path: &Path,
    ticker: Option<&str>,
    period: Option<&str>,
    output: Option<PathBuf>,
) -> Result<(), MacrossError> {
    // Stage 1: load and validate config before touching data
    let adapter = load_config(config_path)?;
    let bt_config = build_backtest_config(&adapter)?;
    let settings = resolve_data_settings(ticker, period, &adapter)?;
    let output_dir = resolve_output_dir(output, &adapter);

    // Stages 2-5: fetch, run, report
    let data_port = CsvAdapter::new(settings.data_dir.clone());
    let report_port = CsvReportAdapter::new();
    let result = run_backtest_pipeline(
        &data_port,
        &report_port,
        &settings,
        &bt_config,
        &output_dir,
    )?;

    println!("{}", format_summary(&settings.ticker, &result));
    Ok(())
}

/// Fetches the series, runs the pipeline and writes the CSV/JSON report and
/// the equity chart into `output_dir`.
pub fn run_backtest_pipeline(
    data_port: &dyn DataPort,
    report_port: &dyn ReportPort,
    settings: &DataSettings,
    bt_config: &BacktestConfig,
    output_dir: &Path,
) -> Result<BacktestResult, MacrossError> {
    // Stage 2: fetch price series
    let series = data_port.fetch_series(&settings.ticker, &settings.period)?;

    // Stage 3: run pipeline
    let result = run_backtest(&series, bt_config)?;

    // Stage 4: persist result
    report_port.write(&result, &settings.ticker, output_dir)?;

    // Stage 5: equity chart
    fs::create_dir_all(output_dir)?;
    let chart_path = output_dir.join(format!("{}_equity.svg", settings.ticker.to_uppercase()));
    let title = format!(
        "{} SMA({})/SMA({}) equity",
        settings.ticker, bt_config.short_window, bt_config.long_window
    );
    fs::write(&chart_path, render_equity_chart(&result.equity, &title))?;
    info!("wrote {}", chart_path.display());

    Ok(result)
}

fn fmt_pct(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}%", v * 100.0))
        .unwrap_or_else(|| "n/a".to_string())
}

fn fmt_ratio(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "n/a".to_string())
}

pub fn format_summary(ticker: &str, result: &BacktestResult) -> String {
    let mut out = format!(
        "=== {} SMA({})/SMA({}) ===\n{} to {} ({} bars), {} trades, {:.1}% exposure\n\n",
        ticker,
        result.config.short_window,
        result.config.long_window,
        result.start_date,
        result.end_date,
        result.bar_count(),
        result.trade_count,
        result.exposure * 100.0,
    );
    out.push_str(&format!(
        "{:<16}{:>12}{:>12}{:>12}{:>12}{:>12}\n",
        "", "Total", "Annualized", "Volatility", "Sharpe", "Max DD"
    ));

    let rows: [(&str, &MetricsReport); 3] = [
        ("Buy & Hold", &result.metrics.buy_hold),
        ("Strategy gross", &result.metrics.gross),
        ("Strategy net", &result.metrics.net),
    ];
    for (label, m) in rows {
        out.push_str(&format!(
            "{:<16}{:>12}{:>12}{:>12}{:>12}{:>12}\n",
            label,
            fmt_pct(Some(m.total_return)),
            fmt_pct(m.annualized_return),
            fmt_pct(m.annualized_volatility),
            fmt_ratio(m.sharpe_ratio),
            fmt_pct(Some(m.max_drawdown)),
        ));
    }
    out
}

pub fn run_dry_run(
    config_path: &Path,
    ticker: Option<&str>,
    period: Option<&str>,
) -> Result<(), MacrossError> {
    let adapter = load_config(config_path)?;
    let bt_config = build_backtest_config(&adapter)?;
    let settings = resolve_data_settings(ticker, period, &adapter)?;

    eprintln!("Config validated successfully");
    eprintln!("\nData:");
    eprintln!("  ticker:   {}", settings.ticker);
    eprintln!("  period:   {}", settings.period);
    eprintln!("  data_dir: {}", settings.data_dir.display());

    eprintln!("\nIndicators to compute:");
    for ind in [
        IndicatorType::DailyReturn,
        IndicatorType::Sma(bt_config.short_window),
        IndicatorType::Sma(bt_config.long_window),
        IndicatorType::Volatility(bt_config.volatility_window),
    ] {
        eprintln!("  {}", ind);
    }

    eprintln!("\nBacktest:");
    eprintln!("  transaction_cost:     {}", bt_config.transaction_cost);
    eprintln!("  annualization_factor: {}", bt_config.annualization_factor);

    eprintln!("\nDry run complete: configuration is valid");
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), MacrossError> {
    let adapter = load_config(config_path)?;
    validate_backtest_config(&adapter)?;
    eprintln!("Configuration is valid.");
    Ok(())
}

fn run_info(
    config_path: &Path,
    ticker: Option<&str>,
    period: Option<&str>,
) -> Result<(), MacrossError> {
    let adapter = load_config(config_path)?;
    let settings = resolve_data_settings(ticker, period, &adapter)?;
    let data_port = CsvAdapter::new(settings.data_dir.clone());

    match data_port.data_range(&settings.ticker, &settings.period)? {
        Some((first, last, count)) => {
            println!(
                "{} ({}): {} bars, {} to {}",
                settings.ticker, settings.period, count, first, last
            );
        }
        None => {
            eprintln!("{} ({}): no data found", settings.ticker, settings.period);
        }
    }
    Ok(())
}
