use chrono::{NaiveDate, Weekday};
use hr_portal::{
    AppraisalPlan, Category, PortalConfig, TimelineSnapshot, WorkCalendar, WorkCalendarConfig,
    WorkItem, build_attribution_with_calendar, classify_status, fiscal_year_window,
    load_items_from_csv, load_snapshot_from_json, logging, save_items_to_csv,
    save_snapshot_to_json, validate_items,
};
use std::fs;
use std::io::{self, Write};

struct Session {
    items: Vec<WorkItem>,
    today: NaiveDate,
    join_date: Option<NaiveDate>,
    calendar: WorkCalendar,
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn render_text_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (ci, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            if len > widths[ci] {
                widths[ci] = len;
            }
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_row(&widths, headers.iter().copied()));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in rows {
        out.push_str(&render_row(&widths, row.iter().map(String::as_str)));
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn render_row<'a>(widths: &[usize], cells: impl Iterator<Item = &'a str>) -> String {
    let mut line = String::from("|");
    for (ci, cell) in cells.enumerate() {
        let pad = widths[ci].saturating_sub(cell.chars().count());
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(pad));
        line.push_str(" |");
    }
    line
}

fn render_items(session: &Session) -> String {
    let rows: Vec<Vec<String>> = session
        .items
        .iter()
        .map(|item| {
            vec![
                item.id.clone(),
                item.label.clone(),
                item.start_date.to_string(),
                item.end_date.to_string(),
                classify_status(item.start_date, item.end_date, session.today).to_string(),
                session
                    .calendar
                    .count_available_days(item.start_date, item.end_date)
                    .to_string(),
            ]
        })
        .collect();
    render_text_table(
        &["id", "label", "start_date", "end_date", "status", "working_days"],
        &rows,
    )
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               Show current work items\n  today [YYYY-MM-DD]                 Show or pin the reference date\n  add <id> <start> <end> <label...>  Upsert a work item (dates YYYY-MM-DD)\n  delete <id>                        Delete a work item\n  status <start> <end>               Classify a range against today\n  bdays <start> <end>                Count working days in a range\n  timeline                           Attribute working days of all items\n  fy                                 Show the fiscal year window\n  join <YYYY-MM-DD>                  Set the employee join date\n  appraisal                          Show appraisal years for the join date\n  calendar show                      Display calendar configuration\n  calendar default                   Reset to the Mon-Fri calendar\n  calendar holiday <YYYY-MM-DD>      Add a holiday\n  calendar recurring <MM-DD> <y1> <y2> Add a yearly holiday for y1..=y2\n  calendar workdays <Mon,Tue,...>    Replace the working week\n  calendar set <json_path>           Load calendar config from JSON file\n  calendar save <json_path>          Save calendar config to JSON file\n  save <json|csv> <path>             Persist items to disk\n  load <json|csv> <path>             Load items from disk\n  quit|exit                          Exit"
    );
}

fn print_calendar_info(calendar: &WorkCalendar) {
    let config = calendar.to_config();
    let working_days = config
        .working_days()
        .iter()
        .map(|wd| wd.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let holidays = config
        .holidays()
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    println!("Working days       : {}", working_days);
    println!("Holidays           : {}", holidays);
}

fn print_timeline(session: &Session) {
    let attribution = build_attribution_with_calendar(&session.items, session.today, &session.calendar);
    println!("Timeline ({})", attribution.to_cli_summary());
    for category in Category::ORDERED {
        let breakdown = attribution.category(category);
        if breakdown.entries.is_empty() {
            continue;
        }
        println!("{}:", category.chart_name());
        for entry in &breakdown.entries {
            println!("  {} ({})", entry.label, entry.range_description());
        }
    }
}

fn print_appraisal(session: &Session) {
    let plan = AppraisalPlan::new(session.join_date, session.today);
    let join_years = |years: &[hr_portal::FiscalYear]| {
        years
            .iter()
            .map(|fy| fy.label())
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!("Current FY         : {}", plan.current);
    println!("Project End Appraisal: {}", join_years(&plan.buckets.project_end));
    println!("Year End Appraisal   : {}", join_years(&plan.buckets.year_end));
    let selection = plan.default_selection();
    match selection.year {
        Some(year) => println!(
            "Selected           : {} {} (add tasks: {})",
            selection.kind.code(),
            year,
            plan.can_add_tasks(year)
        ),
        None => println!("Selected           : none (no join date)"),
    }
}

fn upsert_item(session: &mut Session, item: WorkItem) {
    match session.items.iter_mut().find(|existing| existing.id == item.id) {
        Some(existing) => *existing = item,
        None => session.items.push(item),
    }
}

fn parse_weekdays(list: &str) -> Option<Vec<Weekday>> {
    list.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| part.trim().parse::<Weekday>().ok())
        .collect()
}

fn parse_month_day(s: &str) -> Option<(u32, u32)> {
    let (month, day) = s.split_once('-')?;
    Some((month.parse().ok()?, day.parse().ok()?))
}

fn handle_calendar(session: &mut Session, args: &[&str]) {
    match args {
        ["show", ..] => print_calendar_info(&session.calendar),
        ["default", ..] => {
            session.calendar = WorkCalendar::default();
            println!("Calendar reset to Mon-Fri.");
        }
        ["workdays", list, ..] => match parse_weekdays(list) {
            Some(days) => match session.calendar.set_working_days(&days) {
                Ok(()) => println!("Working days set to {list}."),
                Err(e) => println!("Error: {e}"),
            },
            None => println!("Invalid weekday list (e.g. Mon,Tue,Wed,Thu,Fri,Sat)"),
        },
        ["recurring", month_day, from, to, ..] => {
            let years = from.parse::<i32>().ok().zip(to.parse::<i32>().ok());
            match (parse_month_day(month_day), years) {
                (Some((month, day)), Some((from, to))) if from <= to => {
                    session.calendar.add_recurring_holiday(month, day, from, to);
                    println!("Holiday {month_day} added for {from}-{to}.");
                }
                _ => println!("Usage: calendar recurring <MM-DD> <from_year> <to_year>"),
            }
        }
        ["holiday", date_s, ..] => match parse_date(date_s) {
            Some(date) => {
                session.calendar.add_holiday(date);
                println!("Holiday {date} added.");
            }
            None => println!("Invalid date (YYYY-MM-DD)"),
        },
        ["set", path, ..] => {
            let loaded = fs::read_to_string(path)
                .map_err(|e| e.to_string())
                .and_then(|raw| {
                    serde_json::from_str::<WorkCalendarConfig>(&raw).map_err(|e| e.to_string())
                })
                .and_then(|config| WorkCalendar::from_config(&config).map_err(|e| e.to_string()));
            match loaded {
                Ok(calendar) => {
                    session.calendar = calendar;
                    println!("Calendar loaded from {path}.");
                }
                Err(e) => println!("Error loading calendar: {e}"),
            }
        }
        ["save", path, ..] => {
            let written = serde_json::to_string_pretty(&session.calendar.to_config())
                .map_err(|e| e.to_string())
                .and_then(|raw| fs::write(path, raw).map_err(|e| e.to_string()));
            match written {
                Ok(()) => println!("Calendar saved to {path}."),
                Err(e) => println!("Error saving calendar: {e}"),
            }
        }
        _ => println!(
            "Usage: calendar <show|default|holiday <date>|recurring <MM-DD> <from> <to>|workdays <days>|set <path>|save <path>>"
        ),
    }
}

fn handle_save(session: &Session, format: Option<&str>, path: Option<&str>) {
    let (Some(format), Some(path)) = (format, path) else {
        println!("Usage: save <json|csv> <path>");
        return;
    };
    let result = match format {
        "json" => {
            let snapshot = TimelineSnapshot {
                today: Some(session.today),
                join_date: session.join_date,
                calendar: Some(session.calendar.to_config()),
                items: session.items.clone(),
            };
            save_snapshot_to_json(&snapshot, path)
        }
        "csv" => save_items_to_csv(&session.items, path),
        _ => {
            println!("Unknown format '{format}' (expected json or csv)");
            return;
        }
    };
    match result {
        Ok(()) => println!("Items saved to {path}."),
        Err(e) => println!("Error saving items: {e}"),
    }
}

fn handle_load(session: &mut Session, format: Option<&str>, path: Option<&str>) {
    let (Some(format), Some(path)) = (format, path) else {
        println!("Usage: load <json|csv> <path>");
        return;
    };
    match format {
        "json" => match load_snapshot_from_json(path).and_then(|snapshot| {
            let calendar = snapshot.work_calendar()?;
            Ok((snapshot, calendar))
        }) {
            Ok((snapshot, calendar)) => {
                session.items = snapshot.items;
                session.calendar = calendar;
                if let Some(today) = snapshot.today {
                    session.today = today;
                }
                if snapshot.join_date.is_some() {
                    session.join_date = snapshot.join_date;
                }
                println!("Items loaded from {path}.");
            }
            Err(e) => println!("Error loading items: {e}"),
        },
        "csv" => match load_items_from_csv(path) {
            Ok(items) => {
                session.items = items;
                println!("Items loaded from {path}.");
            }
            Err(e) => println!("Error loading items: {e}"),
        },
        _ => println!("Unknown format '{format}' (expected json or csv)"),
    }
}

fn main() {
    logging::init_tracing();

    let calendar = match PortalConfig::from_env().and_then(|config| Ok(config.work_calendar()?)) {
        Ok(calendar) => calendar,
        Err(e) => {
            eprintln!("Config error ({e}); using the default calendar.");
            WorkCalendar::default()
        }
    };
    let mut session = Session {
        items: Vec::new(),
        today: chrono::Local::now().date_naive(),
        join_date: None,
        calendar,
    };

    println!("HR Portal (CLI) - type 'help' for commands\n");

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

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => println!("{}", render_items(&session)),
            "today" => match parts.next() {
                None => println!("Today: {}", session.today),
                Some(date_s) => match parse_date(date_s) {
                    Some(date) => {
                        session.today = date;
                        println!("Today set to {date}.");
                    }
                    None => println!("Invalid date (YYYY-MM-DD)"),
                },
            },
            "add" => {
                let id = parts.next();
                let start = parts.next().and_then(parse_date);
                let end = parts.next().and_then(parse_date);
                let label = parts.collect::<Vec<_>>().join(" ");
                match (id, start, end) {
                    (Some(id), Some(start), Some(end)) => {
                        match WorkItem::try_new(id, label, start, end) {
                            Ok(item) => {
                                upsert_item(&mut session, item);
                                println!("Item {id} upserted.");
                                println!("{}", render_items(&session));
                            }
                            Err(e) => println!("Error: {e}"),
                        }
                    }
                    _ => println!("Usage: add <id> <YYYY-MM-DD> <YYYY-MM-DD> <label...>"),
                }
            }
            "delete" => match parts.next() {
                Some(id) => {
                    let before = session.items.len();
                    session.items.retain(|item| item.id != id);
                    if session.items.len() < before {
                        println!("Deleted item {id}.");
                    } else {
                        println!("Item {id} not found.");
                    }
                }
                None => println!("Usage: delete <id>"),
            },
            "status" | "bdays" => {
                let start = parts.next().and_then(parse_date);
                let end = parts.next().and_then(parse_date);
                match (start, end) {
                    (Some(start), Some(end)) if cmd == "status" => {
                        println!("Status: {}", classify_status(start, end, session.today));
                    }
                    (Some(start), Some(end)) => {
                        println!(
                            "Working days: {}",
                            session.calendar.count_available_days(start, end)
                        );
                    }
                    _ => println!("Usage: {cmd} <YYYY-MM-DD> <YYYY-MM-DD>"),
                }
            }
            "timeline" => {
                if let Err(e) = validate_items(&session.items) {
                    println!("Error: {e}");
                    continue;
                }
                print_timeline(&session);
            }
            "fy" => {
                let window = fiscal_year_window(session.today)
                    .iter()
                    .map(|fy| fy.label())
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("Fiscal years: {window}");
            }
            "join" => match parts.next().and_then(parse_date) {
                Some(date) => {
                    session.join_date = Some(date);
                    println!("Join date set to {date}.");
                }
                None => println!("Usage: join <YYYY-MM-DD>"),
            },
            "appraisal" => print_appraisal(&session),
            "calendar" => {
                let args: Vec<&str> = parts.collect();
                handle_calendar(&mut session, &args);
            }
            "save" => {
                let format = parts.next();
                let path = parts.next();
                handle_save(&session, format, path);
            }
            "load" => {
                let format = parts.next();
                let path = parts.next();
                handle_load(&mut session, format, path);
            }
            other => println!("Unknown command '{other}'. Type 'help' for commands."),
        }
    }
}
