//! plan-runner: headless schedule generation.
//!
//! Usage:
//!   plan-runner --demo --seed 42 --start 2026-03-02 --end 2026-03-08
//!   plan-runner --db roster.db --start 2026-03-02 --end 2026-03-08 --json

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use shiftplan_core::{
    config::{PlanningPolicy, SchedulingConstraints},
    demo::DemoRoster,
    engine::ScheduleEngine,
    model::SchedulingSolution,
    store::PlanStore,
};
use std::env;

#[derive(serde::Serialize)]
struct RunReport<'a> {
    run_id:   &'a str,
    start:    NaiveDate,
    end:      NaiveDate,
    solution: &'a SchedulingSolution,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let headcount = parse_arg(&args, "--employees", 12usize);
    let budget = parse_arg(&args, "--budget", SchedulingConstraints::default().max_weekly_labor_budget);
    let demo = has_flag(&args, "--demo");
    let json = has_flag(&args, "--json");
    let minimize_cost = has_flag(&args, "--minimize-cost");
    let db = string_arg(&args, "--db").unwrap_or(":memory:");
    let data_dir = string_arg(&args, "--data-dir").unwrap_or("./data");

    let start = match string_arg(&args, "--start") {
        Some(s) => s.parse::<NaiveDate>().with_context(|| format!("--start '{s}'"))?,
        None => NaiveDate::from_ymd_opt(2026, 3, 2).context("default start date")?,
    };
    let end = match string_arg(&args, "--end") {
        Some(s) => s.parse::<NaiveDate>().with_context(|| format!("--end '{s}'"))?,
        None => start + Duration::days(6),
    };

    if !json {
        println!("shiftplan plan-runner");
        println!("  range:     {start} .. {end}");
        println!("  db:        {db}");
        println!("  data_dir:  {data_dir}");
        if demo {
            println!("  demo:      seed {seed}, {headcount} employees");
        }
        println!();
    }

    // For :memory: use SQLite shared-memory URI so the engine's source
    // connection and the sink connection see the same database.
    let db_effective: String = if db == ":memory:" {
        format!("file:planrun_{}?mode=memory&cache=shared", chrono_tick())
    } else {
        db.to_string()
    };
    let mut store = PlanStore::open(&db_effective)?;
    store.migrate()?;

    if demo {
        let roster = DemoRoster::generate(seed, start, end, headcount);
        for employee in &roster.employees {
            store.insert_employee(employee)?;
        }
        for requirement in &roster.requirements {
            store.insert_requirement(requirement)?;
        }
        log::info!(
            "seeded {} employees and {} requirements",
            roster.employees.len(),
            roster.requirements.len()
        );
    }

    let policy = match PlanningPolicy::load(data_dir) {
        Ok(p) => p,
        Err(e) => {
            log::warn!("using default planning policy: {e}");
            PlanningPolicy::default()
        }
    };
    let constraints = SchedulingConstraints {
        max_weekly_labor_budget: budget,
        minimize_labor_cost: minimize_cost,
        ..SchedulingConstraints::default()
    };

    let engine = ScheduleEngine::new(store.reopen()?, policy);
    let run_id = format!("run-{seed}-{}", chrono_tick());
    let solution = engine.generate_for_run(&run_id, start, end, &constraints, &mut store)?;
    store.save_solution(&run_id, start, end, &solution)?;

    if json {
        let report = RunReport { run_id: &run_id, start, end, solution: &solution };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&run_id, &solution);
    }

    Ok(())
}

fn print_summary(run_id: &str, solution: &SchedulingSolution) {
    let m = &solution.metrics;
    println!("=== RUN SUMMARY ===");
    println!("  run_id:        {run_id}");
    println!("  success:       {}", solution.success);
    println!("  shifts:        {} / {} required", m.shift_count, m.total_required_staff);
    println!("  employees:     {}", m.employees_scheduled);
    println!("  coverage:      {:.1}%", m.coverage_rate);
    println!("  hours:         {:.1} ({:.1} overtime)", m.total_hours, m.overtime_hours);
    println!("  labor cost:    ${:.2}", m.total_cost);
    println!("  satisfaction:  {:.1}", m.employee_satisfaction_score);
    println!("  efficiency:    {:.1}", m.cost_efficiency_score);
    println!("  optimization:  {:.1}", m.optimization_score);

    println!();
    println!("=== POSITION COVERAGE ===");
    for (position, pct) in &m.position_coverage {
        println!("  {position:<12} {pct:.1}%");
    }

    if !solution.conflicts.is_empty() {
        println!();
        println!("=== CONFLICTS ({}) ===", solution.conflicts.len());
        for c in &solution.conflicts {
            println!(
                "  [{}/{}] {}",
                c.severity.as_str(),
                c.conflict_type.as_str(),
                c.message
            );
        }
    }

    if !solution.recommendations.is_empty() {
        println!();
        println!("=== RECOMMENDATIONS ===");
        for r in &solution.recommendations {
            println!("  - {r}");
        }
    }
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn chrono_tick() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
