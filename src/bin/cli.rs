use capacity_planner::{
    Clock, Locale, ServiceConfig, Snapshot, SystemClock, UtilizationSummary, current_year_week,
    load_allocations_from_csv, load_snapshot_from_json, logging, report, save_allocations_to_csv,
    save_forecast_to_csv, save_snapshot_to_json,
};
use polars::prelude::{AnyValue, DataFrame, PolarsResult};
use std::io::{self, Write};

fn render_df_as_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let mut cells: Vec<Vec<String>> = Vec::with_capacity(df.height());
    for row_idx in 0..df.height() {
        let row = columns
            .iter()
            .map(|col| match col.get(row_idx) {
                Ok(AnyValue::Null) | Err(_) => String::new(),
                Ok(AnyValue::Int32(v)) => v.to_string(),
                Ok(AnyValue::Int64(v)) => v.to_string(),
                Ok(AnyValue::Float64(v)) => format!("{v:.2}"),
                Ok(AnyValue::String(s)) => s.to_string(),
                Ok(av) => av.to_string(),
            })
            .collect();
        cells.push(row);
    }

    let mut widths: Vec<usize> = col_names.iter().map(|n| n.len()).collect();
    for row in &cells {
        for (ci, cell) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(cell.len());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let render_row = |values: &[String]| {
        let mut line = String::from("|");
        for (ci, value) in values.iter().enumerate() {
            line.push(' ');
            line.push_str(value);
            line.push_str(&" ".repeat(widths[ci].saturating_sub(value.len())));
            line.push_str(" |");
        }
        line
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_row(&col_names));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in &cells {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn print_frame(frame: PolarsResult<DataFrame>) {
    match frame {
        Ok(df) => println!("{}", render_df_as_text_table(&df)),
        Err(e) => println!("Error building table: {}", e),
    }
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               Show snapshot record counts\n  load json <path>                   Load a snapshot from JSON\n  save json <path>                   Save the snapshot to JSON\n  import csv <path>                  Append allocations from CSV\n  export csv <path>                  Write allocations to CSV\n  week                               Show the current ISO week\n  capacity <year> <week>             Capacity per consultant for one week\n  util <yf> <wf> <yt> <wt> [team]    Utilization over a week range\n  kpis [<year> <week>]               Dashboard figures (default: current week)\n  forecast <yf> <mf> <yt> <mt> [csv] Monthly revenue forecast, optionally exported\n  locale <en|sv>                     Language for month labels\n  quit|exit                          Exit"
    );
}

fn print_counts(snapshot: &Snapshot) {
    println!("Calendars   : {}", snapshot.calendars.len());
    println!("Consultants : {}", snapshot.consultants.len());
    println!("Projects    : {}", snapshot.projects.len());
    println!("Customers   : {}", snapshot.customers.len());
    println!("Allocations : {}", snapshot.allocations.len());
}

/// `<year> <week>`, each parsed at its own width so out-of-range input is
/// rejected instead of wrapped.
fn parse_year_period(args: &[&str]) -> Option<(i32, u32)> {
    match args {
        [year, period] => Some((year.parse().ok()?, period.parse().ok()?)),
        _ => None,
    }
}

/// `<year_from> <from> <year_to> <to>` for week or month spans.
fn parse_span(args: &[&str]) -> Option<(i32, u32, i32, u32)> {
    match args {
        [yf, pf, yt, pt] => {
            let (year_from, from) = parse_year_period(&[*yf, *pf])?;
            let (year_to, to) = parse_year_period(&[*yt, *pt])?;
            Some((year_from, from, year_to, to))
        }
        _ => None,
    }
}

fn main() {
    let config = match ServiceConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            ServiceConfig::default()
        }
    };
    logging::init_logger(&config.log_filter);

    let clock = SystemClock;
    let mut locale: Locale = config.locale;
    let mut snapshot = match &config.snapshot_path {
        Some(path) => match load_snapshot_from_json(path) {
            Ok(loaded) => loaded,
            Err(e) => {
                println!("Error loading {}: {}", path.display(), e);
                Snapshot::new()
            }
        },
        None => Snapshot::new(),
    };

    println!("Capacity Planner (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        let cmd = parts[0];
        let args = &parts[1..];

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => print_counts(&snapshot),
            "load" => match args {
                ["json", path] => match load_snapshot_from_json(path) {
                    Ok(loaded) => {
                        snapshot = loaded;
                        println!("Snapshot loaded from {}.", path);
                        print_counts(&snapshot);
                    }
                    Err(e) => println!("Error loading snapshot: {}", e),
                },
                _ => println!("Usage: load json <path>"),
            },
            "save" => match args {
                ["json", path] => match save_snapshot_to_json(&snapshot, path) {
                    Ok(_) => println!("Snapshot saved to {}.", path),
                    Err(e) => println!("Error saving snapshot: {}", e),
                },
                _ => println!("Usage: save json <path>"),
            },
            "import" => match args {
                ["csv", path] => match load_allocations_from_csv(path) {
                    Ok(rows) => {
                        println!("Imported {} allocations from {}.", rows.len(), path);
                        snapshot.allocations.extend(rows);
                    }
                    Err(e) => println!("Error importing allocations: {}", e),
                },
                _ => println!("Usage: import csv <path>"),
            },
            "export" => match args {
                ["csv", path] => match save_allocations_to_csv(&snapshot.allocations, path) {
                    Ok(_) => println!("Allocations exported to {}.", path),
                    Err(e) => println!("Error exporting allocations: {}", e),
                },
                _ => println!("Usage: export csv <path>"),
            },
            "week" => {
                let week = current_year_week(&clock);
                let (monday, sunday) = week.date_range();
                println!("Current week: {} ({} - {})", week, monday, sunday);
                println!("Today       : {}", clock.today());
            }
            "capacity" => match parse_year_period(args) {
                Some((year, week)) => match snapshot.capacity(year, week) {
                    Ok(table) => {
                        print_frame(report::capacity_frame(&snapshot.consultants, &table))
                    }
                    Err(e) => println!("Error: {}", e),
                },
                _ => println!("Usage: capacity <year> <week>"),
            },
            "util" => {
                let parsed = match args {
                    [span @ .., team] if args.len() == 5 => parse_span(span)
                        .zip(team.parse::<i64>().ok())
                        .map(|(span, team)| (span, Some(team))),
                    _ => parse_span(args).map(|span| (span, None)),
                };
                match parsed {
                    Some(((yf, wf, yt, wt), team)) => {
                        let source = match team {
                            Some(team_id) => snapshot.filter_team(team_id),
                            None => snapshot.clone(),
                        };
                        match source.aggregate(yf, wf, yt, wt) {
                            Ok(result) => {
                                println!(
                                    "Utilization ({})",
                                    UtilizationSummary::from_report(&result).to_cli_summary()
                                );
                                print_frame(report::utilization_frame(&result));
                                for warning in &result.warnings {
                                    println!("Warning: {}", warning.message());
                                }
                            }
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    None => {
                        println!("Usage: util <year_from> <week_from> <year_to> <week_to> [team]")
                    }
                }
            }
            "kpis" => {
                let week = match (args.is_empty(), parse_year_period(args)) {
                    (true, _) => Ok(current_year_week(&clock)),
                    (false, Some((year, week))) => capacity_planner::WeekKey::new(year, week),
                    (false, None) => {
                        println!("Usage: kpis [<year> <week>]");
                        continue;
                    }
                };
                match week {
                    Ok(week) => {
                        let kpis = snapshot.compute_kpis(week);
                        print_frame(report::kpi_frame(&kpis));
                        for warning in &kpis.warnings {
                            println!("Warning: {}", warning.message());
                        }
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            "forecast" => {
                let (range, export) = match args.len() {
                    4 => (parse_span(args), None),
                    5 => (parse_span(&args[..4]), Some(args[4])),
                    _ => (None, None),
                };
                match range {
                    Some((yf, mf, yt, mt)) => {
                        match snapshot.forecast(yf, mf, yt, mt) {
                            Ok(result) => {
                                print_frame(report::forecast_frame(&result, locale));
                                if let Some(path) = export {
                                    match save_forecast_to_csv(&result, path) {
                                        Ok(_) => println!("Forecast exported to {}.", path),
                                        Err(e) => println!("Error exporting forecast: {}", e),
                                    }
                                }
                            }
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    _ => println!(
                        "Usage: forecast <year_from> <month_from> <year_to> <month_to> [csv_path]"
                    ),
                }
            }
            "locale" => match args.first().and_then(|code| Locale::from_code(code)) {
                Some(selected) => {
                    locale = selected;
                    println!("Locale set to {:?}.", locale);
                }
                None => println!("Usage: locale <en|sv>"),
            },
            _ => {
                println!("Unknown command. Type 'help'.");
            }
        }
    }
}
