//! Top-level interactive session
//!
//! One analysis run: prompt for city/month/day, load and filter, print the
//! report sections, page through raw rows on demand, then offer a restart.
//! Data errors abort the current run and fall through to the restart prompt;
//! they never kill the process mid-session.

use std::io::{self, BufRead, Write};

use crate::cli::{Cli, confirm, prompt_choice};
use crate::config::Config;
use crate::core::paginate::RawDataPager;
use crate::core::types::{DayFilter, MonthFilter};
use crate::data::{CityMap, loader};
use crate::error::AppError;
use crate::output::{
    ReportOptions, print_describe, print_duration_stats, print_raw_page, print_station_stats,
    print_time_stats, print_user_stats,
};

struct Selection {
    city: String,
    month: MonthFilter,
    day: DayFilter,
}

fn select_filters<R, W>(
    input: &mut R,
    output: &mut W,
    cities: &CityMap,
) -> io::Result<Option<Selection>>
where
    R: BufRead,
    W: Write,
{
    let city_list = cities.cities().collect::<Vec<_>>().join(", ");
    let city_question = format!("Which city would you like to explore? ({city_list})");
    let Some(city) = prompt_choice(input, output, &city_question, |raw| {
        let lower = raw.to_ascii_lowercase();
        if cities.contains(&lower) {
            Ok(lower)
        } else {
            Err(AppError::InvalidSelection {
                input: raw.to_string(),
                expected: city_list.clone(),
            })
        }
    })?
    else {
        return Ok(None);
    };

    let Some(month) = prompt_choice(
        input,
        output,
        "Which month, january through june, or all?",
        MonthFilter::parse,
    )?
    else {
        return Ok(None);
    };

    let Some(day) = prompt_choice(
        input,
        output,
        "Which day of the week, or all?",
        DayFilter::parse,
    )?
    else {
        return Ok(None);
    };

    Ok(Some(Selection { city, month, day }))
}

fn analyze<R, W>(
    input: &mut R,
    output: &mut W,
    cities: &CityMap,
    selection: &Selection,
    opts: ReportOptions,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    let collection =
        match loader::load_filtered(&selection.city, cities, selection.month, selection.day) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Could not load data: {e}");
                return Ok(());
            }
        };

    print_time_stats(&collection, opts);
    print_station_stats(&collection, opts);
    print_duration_stats(&collection, opts);
    print_user_stats(&collection, opts);

    let mut pager = RawDataPager::new(&collection);
    let mut question = "Would you like to see five rows of raw data? (y/n):";
    while !pager.is_exhausted() && confirm(input, output, question)? {
        print_raw_page(pager.next_page(), collection.caps, opts);
        question = "Would you like to see more data? (y/n):";
    }

    if confirm(
        input,
        output,
        "Would you like to see descriptive statistics? (y/n):",
    )? {
        print_describe(&collection, opts);
    }

    Ok(())
}

pub(crate) fn run(cli: &Cli, config: &Config) -> io::Result<()> {
    let cities = config.city_map(cli.data_dir.as_deref());
    let opts = ReportOptions {
        use_color: cli.use_color(),
    };
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    println!("Hi there! Interested in bikeshare data? Let's get started!");
    loop {
        let Some(selection) = select_filters(&mut input, &mut output, &cities)? else {
            break;
        };
        analyze(&mut input, &mut output, &cities, &selection, opts)?;
        if !confirm(&mut input, &mut output, "Would you like to restart? (y/n):")? {
            break;
        }
    }
    Ok(())
}
