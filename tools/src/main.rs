//! kpi-runner: headless KPI report runner for BizMetrics360.
//!
//! Usage:
//!   kpi-runner --data-dir ./data
//!   kpi-runner --sample --seed 42 --period quarterly --json
//!   kpi-runner --data-dir ./data --from 2023-06-01 --to 2023-12-31 --region North
//!   kpi-runner --write-sample ./data --seed 42
//!   kpi-runner --sample --ipc-mode

mod display;
mod filter;
mod loader;

use anyhow::Result;
use bizmetrics_core::{
    cache::{CacheKey, TableCache},
    config::DataFiles,
    sample_data::{self, SampleParams},
    thresholds::{self, ThresholdCheck},
    ChannelJoin, KpiConfig, KpiEngine, KpiReport, KpiTables, PeriodGranularity, TableKind,
};
use chrono::NaiveDate;
use filter::TableFilter;
use std::env;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use std::sync::Arc;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetReport,
    SetFilter {
        from:   Option<NaiveDate>,
        to:     Option<NaiveDate>,
        region: Option<String>,
    },
    SetPeriod {
        period: PeriodGranularity,
    },
    Refresh,
    Quit,
}

#[derive(serde::Serialize)]
struct ReportView {
    period:       PeriodGranularity,
    channel_join: ChannelJoin,
    filter:       TableFilter,
    tables:       Vec<TableKind>,
    report:       KpiReport,
    checks:       Vec<ThresholdCheck>,
    alerts:       Vec<ThresholdCheck>,
}

// ── Data source ──────────────────────────────────────────────────────────────

enum DataSource {
    Csv { dir: String },
    Sample(SampleParams),
}

impl DataSource {
    fn cache_key(&self) -> CacheKey {
        match self {
            DataSource::Csv { dir }      => CacheKey::of(&("csv", dir)),
            DataSource::Sample(params)   => CacheKey::of(params),
        }
    }

    fn load(&self, cache: &mut TableCache, files: &DataFiles) -> Result<Arc<KpiTables>> {
        match self {
            DataSource::Csv { dir } => {
                cache.get_or_try_insert_with(self.cache_key(), || loader::load_tables(dir, files))
            }
            DataSource::Sample(params) => Ok(cache.get_or_generate(params)),
        }
    }

    fn describe(&self) -> String {
        match self {
            DataSource::Csv { dir }    => format!("csv:{dir}"),
            DataSource::Sample(params) => format!("sample (seed {})", params.seed),
        }
    }
}

// ── Session ──────────────────────────────────────────────────────────────────

/// One dashboard session: config, engine, cached tables and the active filter.
struct Session {
    config: KpiConfig,
    engine: KpiEngine,
    source: DataSource,
    cache:  TableCache,
    filter: TableFilter,
}

impl Session {
    fn new(config: KpiConfig, source: DataSource, filter: TableFilter) -> Self {
        Self {
            engine: KpiEngine::build(&config),
            config,
            source,
            cache: TableCache::new(),
            filter,
        }
    }

    fn report(&mut self) -> Result<ReportView> {
        let tables = self.source.load(&mut self.cache, &self.config.data_files)?;
        let filtered = self.filter.apply(&tables);
        let report = self.engine.generate_report(&filtered);
        let checks = thresholds::evaluate(&report, &self.config.thresholds);
        let alerts = thresholds::failing(&checks);

        Ok(ReportView {
            period:       self.config.period,
            channel_join: self.config.channel_join,
            filter:       self.filter.clone(),
            tables:       filtered.present(),
            report,
            checks,
            alerts,
        })
    }

    fn set_period(&mut self, period: PeriodGranularity) {
        self.config.period = period;
        self.engine = KpiEngine::build(&self.config);
    }

    /// Forget the cached tables so the next report reloads them.
    fn refresh(&mut self) {
        if self.cache.invalidate(self.source.cache_key()) {
            log::info!("cache invalidated for {}", self.source.describe());
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = has_flag(&args, "--ipc-mode");
    let json_mode = has_flag(&args, "--json");
    let data_dir = flag_value(&args, "--data-dir").unwrap_or("./data");
    let seed = parse_arg(&args, "--seed", 42u64);

    let mut config = KpiConfig::load(data_dir)?;
    if let Some(period) = parse_opt(&args, "--period") {
        config.period = period;
    }
    if let Some(join) = parse_opt::<ChannelJoin>(&args, "--join") {
        config.channel_join = join;
    }

    let params = SampleParams::with_seed(seed);

    if let Some(out_dir) = flag_value(&args, "--write-sample") {
        let tables = sample_data::generate(&params);
        let written = loader::write_tables(out_dir, &config.data_files, &tables)?;
        println!("Sample data (seed {seed}) written:");
        for path in written {
            println!("  {}", path.display());
        }
        return Ok(());
    }

    let source = if has_flag(&args, "--sample") {
        DataSource::Sample(params)
    } else {
        DataSource::Csv { dir: data_dir.to_string() }
    };
    let filter = TableFilter {
        from:   parse_opt(&args, "--from"),
        to:     parse_opt(&args, "--to"),
        region: flag_value(&args, "--region").map(str::to_string),
    };

    if !ipc_mode && !json_mode {
        println!("BizMetrics360 - kpi-runner");
        println!("  source:    {}", source.describe());
        println!("  period:    {}", config.period.name());
        println!("  join:      {:?}", config.channel_join);
        println!();
    }

    let mut session = Session::new(config, source, filter);

    if ipc_mode {
        let stdin = io::stdin();
        run_ipc_loop(&mut session, stdin.lock(), io::stdout())?;
    } else if json_mode {
        let view = session.report()?;
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        let view = session.report()?;
        print_summary(&view, &session.config);
    }

    Ok(())
}

/// Answer one JSON line per command until `quit` or end of input.
fn run_ipc_loop(session: &mut Session, mut input: impl BufRead, mut out: impl Write) -> Result<()> {
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = input.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                write_error(&mut out, &e.to_string())?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetReport => {}
            IpcCommand::SetFilter { from, to, region } => {
                session.filter = TableFilter { from, to, region };
            }
            IpcCommand::SetPeriod { period } => session.set_period(period),
            IpcCommand::Refresh => session.refresh(),
        }

        match session.report() {
            Ok(view) => writeln!(out, "{}", serde_json::to_string(&view)?)?,
            Err(e) => write_error(&mut out, &format!("{e:#}"))?,
        }
        out.flush()?;
    }
    Ok(())
}

fn write_error(out: &mut impl Write, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(out, "{err_json}")?;
    out.flush()?;
    Ok(())
}

fn print_summary(view: &ReportView, config: &KpiConfig) {
    let cfg = &config.display;
    let report = &view.report;

    println!("=== KPI SUMMARY ===");
    if let Some(g) = report.revenue_growth() {
        println!("  revenue growth:   {}", display::optional_percent(g.growth_rate, cfg));
        println!("  avg growth:       {}", display::percent(g.avg_growth_rate, cfg));
        println!("  YoY growth:       {}", display::optional_percent(g.yoy_growth, cfg));
        println!("  current revenue:  {}", display::currency(g.current_revenue, cfg));
        println!("  previous revenue: {}", display::currency(g.previous_revenue, cfg));
    }
    if let Some(m) = report.cac_clv() {
        println!("  CAC:              {}", display::currency(m.cac, cfg));
        println!("  CLV:              {}", display::currency(m.clv, cfg));
        println!("  CLV:CAC:          {}", display::ratio(m.clv_cac_ratio, cfg));
        println!("  new customers:    {}", display::count(m.new_customers));
    }
    if let Some(r) = report.retention_churn() {
        println!("  retention rate:   {}", display::percent(r.retention_rate, cfg));
        println!("  churn rate:       {}", display::percent(r.churn_rate, cfg));
        println!("  active customers: {}", display::count(r.active_customers));
    }
    if let Some(p) = report.profitability() {
        println!("  gross margin:     {}", display::percent(p.gross_margin, cfg));
        println!("  net margin:       {}", display::percent(p.net_margin, cfg));
        println!("  total revenue:    {}", display::currency(p.total_revenue, cfg));
        println!("  total costs:      {}", display::currency(p.total_costs, cfg));
    }
    if let Some(f) = report.marketing_funnel() {
        println!("  conversion rate:  {}", display::percent(f.conversion_rate, cfg));
        println!("  cost per click:   {}", display::currency_cents(f.cpc, cfg));
        println!("  clicks:           {}", display::count(f.clicks as usize));
    }
    for key in report.degraded() {
        println!("  {key}: unavailable (see log)");
    }

    if let Some(roi) = report.roi_channels() {
        println!();
        println!("=== MARKETING ROI BY CHANNEL ===");
        for (channel, c) in &roi.channels {
            println!(
                "  {:<12} | Spend: {} | Revenue: {} | ROI: {} | ROAS: {}",
                channel,
                display::currency(c.spend, cfg),
                display::currency(c.revenue, cfg),
                display::percent(c.roi, cfg),
                display::ratio(c.roas, cfg),
            );
        }
        println!(
            "  overall ROI: {} | avg ROI: {}",
            display::percent(roi.overall.overall_roi, cfg),
            display::percent(roi.overall.avg_roi, cfg)
        );
    }

    println!();
    println!("=== ALERTS ===");
    if view.alerts.is_empty() {
        println!("  (all KPIs on target)");
    }
    for check in &view.alerts {
        println!(
            "  {}: {:.2} vs target {:.2} ({:+.2})",
            check.metric.label(),
            check.value,
            check.target,
            check.delta
        );
    }
}

// ── Argument helpers ─────────────────────────────────────────────────────────

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    parse_opt(args, flag).unwrap_or(default)
}

fn parse_opt<T: FromStr>(args: &[String], flag: &str) -> Option<T> {
    let raw = flag_value(args, flag)?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("ignoring invalid {flag} value '{raw}'");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn sample_session() -> Session {
        let params = SampleParams {
            revenue_rows: 120,
            customer_rows: 60,
            marketing_rows: 40,
            cost_rows: 60,
            ..SampleParams::with_seed(3)
        };
        Session::new(KpiConfig::default(), DataSource::Sample(params), TableFilter::default())
    }

    /// Feed `commands` through the loop and return each answered line as JSON.
    fn drive(session: &mut Session, commands: &[&str]) -> Vec<Value> {
        let input = commands.join("\n");
        let mut out = Vec::new();
        run_ipc_loop(session, input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn get_report_answers_with_full_view() {
        let mut session = sample_session();

        let lines = drive(&mut session, &[r#"{"type":"get_report"}"#]);

        assert_eq!(lines.len(), 1);
        let view = &lines[0];
        assert_eq!(view["period"], "monthly");
        assert!(view["report"]["revenue_growth"]["growth_rate"].is_number());
        assert!(view["report"]["marketing_funnel"]["clicks"].is_u64());
        assert!(view["checks"].is_array());
        assert!(view["alerts"].is_array());
    }

    #[test]
    fn set_period_rebuilds_engine() {
        let mut session = sample_session();

        let lines = drive(&mut session, &[r#"{"type":"set_period","period":"quarterly"}"#]);

        assert_eq!(lines[0]["period"], "quarterly");
        let label = lines[0]["report"]["revenue_growth"]["current_period"].as_str().unwrap();
        assert!(label.contains('Q'), "expected a quarter label, got {label}");
        assert_eq!(session.config.period, PeriodGranularity::Quarterly);
    }

    #[test]
    fn refresh_reloads_tables() {
        let mut session = sample_session();

        drive(&mut session, &[r#"{"type":"get_report"}"#, r#"{"type":"get_report"}"#]);
        assert_eq!(session.cache.misses(), 1);
        assert_eq!(session.cache.hits(), 1);

        drive(&mut session, &[r#"{"type":"refresh"}"#]);
        assert_eq!(session.cache.misses(), 2);
    }

    #[test]
    fn bad_command_reports_error_and_loop_continues() {
        let mut session = sample_session();

        let lines = drive(
            &mut session,
            &[
                r#"{"type":"launch_rockets"}"#,
                "not json",
                "",
                r#"{"type":"set_filter","region":"North"}"#,
            ],
        );

        assert_eq!(lines.len(), 3);
        assert!(lines[0]["error"].as_str().unwrap().contains("unknown variant"));
        assert!(lines[1]["error"].is_string());
        assert_eq!(lines[2]["filter"]["region"], "North");
        assert_eq!(session.filter.region.as_deref(), Some("North"));
    }

    #[test]
    fn quit_stops_reading() {
        let mut session = sample_session();

        let lines = drive(
            &mut session,
            &[r#"{"type":"quit"}"#, r#"{"type":"get_report"}"#],
        );

        assert!(lines.is_empty());
        assert_eq!(session.cache.misses(), 0);
    }

    #[test]
    fn alerts_are_the_failing_checks() {
        let mut session = sample_session();

        let view = session.report().unwrap();

        assert_eq!(view.alerts, thresholds::failing(&view.checks));
        assert!(view.alerts.iter().all(|c| !c.is_healthy()));
    }
}
