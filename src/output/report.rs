//! Terminal rendering of the five report sections, the raw-data pages, and
//! the descriptive-statistics dump.

use std::time::{Duration, Instant};

use comfy_table::Cell;

use crate::core::stats::{self, UserStats};
use crate::core::types::{RecordCollection, SchemaCaps, TripRecord};
use crate::output::format::{
    create_styled_table, format_count, format_float, format_seconds, header_cell, month_name,
    right_cell, weekday_name,
};

#[derive(Debug, Clone, Copy)]
pub(crate) struct ReportOptions {
    pub(crate) use_color: bool,
}

fn print_title(title: &str) {
    println!("\n  {title}\n");
}

fn print_latency(elapsed: Duration, use_color: bool) {
    let ms = elapsed.as_secs_f64() * 1000.0;
    if use_color {
        println!("\n  computed in \x1b[36m{ms:.1}ms\x1b[0m");
    } else {
        println!("\n  computed in {ms:.1}ms");
    }
}

fn print_no_data() {
    println!("  No data for this selection.");
}

fn statistic_table(opts: ReportOptions, rows: Vec<(&str, String)>) {
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Statistic", opts.use_color),
        header_cell("Value", opts.use_color),
    ]);
    for (name, value) in rows {
        table.add_row(vec![Cell::new(name), Cell::new(value)]);
    }
    println!("{table}");
}

/// Report 1: most frequent times of travel.
pub(crate) fn print_time_stats(collection: &RecordCollection, opts: ReportOptions) {
    let started = Instant::now();
    let report = stats::time_stats(collection);
    let elapsed = started.elapsed();

    print_title("Most Frequent Times of Travel");
    match report {
        Some(t) => statistic_table(
            opts,
            vec![
                ("Most common month", month_name(t.month).to_string()),
                ("Most common day of month", t.day_of_month.to_string()),
                ("Most common start hour", format!("{:02}:00", t.hour)),
            ],
        ),
        None => print_no_data(),
    }
    print_latency(elapsed, opts.use_color);
}

/// Report 2: most popular stations.
pub(crate) fn print_station_stats(collection: &RecordCollection, opts: ReportOptions) {
    let started = Instant::now();
    let report = stats::station_stats(collection);
    let elapsed = started.elapsed();

    print_title("Most Popular Stations");
    match report {
        Some(s) => statistic_table(
            opts,
            vec![
                ("Most common start station", s.start),
                ("Most common end station", s.end),
                ("Most used station overall", s.combined),
            ],
        ),
        None => print_no_data(),
    }
    print_latency(elapsed, opts.use_color);
}

/// Report 3: trip duration aggregates. An empty scope is reported as "no
/// matching trips", never as a zero.
pub(crate) fn print_duration_stats(collection: &RecordCollection, opts: ReportOptions) {
    let started = Instant::now();
    let report = stats::duration_stats(collection);
    let elapsed = started.elapsed();

    print_title("Trip Duration");
    match report {
        Ok(d) => statistic_table(
            opts,
            vec![
                ("Total travel time", format_seconds(d.total)),
                ("Average travel time", format_seconds(d.mean)),
                ("Trips", format_count(d.count)),
            ],
        ),
        Err(_) => println!("  No matching trips for this selection."),
    }
    print_latency(elapsed, opts.use_color);
}

fn print_count_table(opts: ReportOptions, label: &str, counts: &[(String, usize)], missing: Option<usize>) {
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell(label, opts.use_color),
        header_cell("Trips", opts.use_color),
    ]);
    for (name, count) in counts {
        table.add_row(vec![Cell::new(name), right_cell(&format_count(*count))]);
    }
    if let Some(missing) = missing {
        table.add_row(vec![
            Cell::new("(not specified)"),
            right_cell(&format_count(missing)),
        ]);
    }
    println!("{table}");
}

fn print_birth_year_table(opts: ReportOptions, user: &UserStats) {
    let Some(b) = &user.birth_years else { return };
    statistic_table(
        opts,
        vec![
            ("Earliest birth year", b.earliest.to_string()),
            ("Most recent birth year", b.most_recent.to_string()),
            ("Most common birth year", b.most_common.to_string()),
            ("Trips without birth year", format_count(b.missing)),
        ],
    );
}

/// Report 4: user types, plus gender and birth-year breakdowns when the
/// source schema carries them.
pub(crate) fn print_user_stats(collection: &RecordCollection, opts: ReportOptions) {
    let started = Instant::now();
    let report = stats::user_stats(collection);
    let elapsed = started.elapsed();

    print_title("User Profile");
    match report {
        Some(u) => {
            print_count_table(opts, "User Type", &u.user_types, None);
            if let Some(g) = &u.genders {
                print_count_table(opts, "Gender", &g.counts, Some(g.missing));
            }
            print_birth_year_table(opts, &u);
        }
        None => print_no_data(),
    }
    print_latency(elapsed, opts.use_color);
}

/// One page of raw rows, with the optional columns only when the schema has
/// them.
pub(crate) fn print_raw_page(page: &[TripRecord], caps: SchemaCaps, opts: ReportOptions) {
    let mut table = create_styled_table();
    let c = opts.use_color;
    let mut header = vec![
        header_cell("Start Time", c),
        header_cell("End Time", c),
        header_cell("Duration", c),
        header_cell("Start Station", c),
        header_cell("End Station", c),
        header_cell("Day", c),
        header_cell("User Type", c),
    ];
    if caps.has_gender {
        header.push(header_cell("Gender", c));
    }
    if caps.has_birth_year {
        header.push(header_cell("Birth Year", c));
    }
    table.set_header(header);

    for record in page {
        let mut row = vec![
            Cell::new(record.start_time.format("%Y-%m-%d %H:%M:%S").to_string()),
            Cell::new(record.end_time.format("%Y-%m-%d %H:%M:%S").to_string()),
            right_cell(&format_seconds(record.trip_duration)),
            Cell::new(&record.start_station),
            Cell::new(&record.end_station),
            Cell::new(weekday_name(record.day_of_week)),
            Cell::new(&record.user_type),
        ];
        if caps.has_gender {
            row.push(Cell::new(record.gender.as_deref().unwrap_or("")));
        }
        if caps.has_birth_year {
            row.push(right_cell(
                &record
                    .birth_year
                    .map(|y| y.to_string())
                    .unwrap_or_default(),
            ));
        }
        table.add_row(row);
    }
    println!("{table}");
}

/// Report 5: descriptive statistics over every numeric field.
pub(crate) fn print_describe(collection: &RecordCollection, opts: ReportOptions) {
    let started = Instant::now();
    let report = stats::describe(collection);
    let elapsed = started.elapsed();

    print_title("Descriptive Statistics");
    match report {
        Some(fields) => {
            let c = opts.use_color;
            let mut table = create_styled_table();
            table.set_header(vec![
                header_cell("Field", c),
                header_cell("Count", c),
                header_cell("Mean", c),
                header_cell("Std", c),
                header_cell("Min", c),
                header_cell("25%", c),
                header_cell("50%", c),
                header_cell("75%", c),
                header_cell("Max", c),
            ]);
            for f in fields {
                table.add_row(vec![
                    Cell::new(f.field),
                    right_cell(&format_count(f.count)),
                    right_cell(&format_float(f.mean)),
                    right_cell(&format_float(f.std)),
                    right_cell(&format_float(f.min)),
                    right_cell(&format_float(f.q1)),
                    right_cell(&format_float(f.median)),
                    right_cell(&format_float(f.q3)),
                    right_cell(&format_float(f.max)),
                ]);
            }
            println!("{table}");
        }
        None => print_no_data(),
    }
    print_latency(elapsed, opts.use_color);
}
