mod format;
mod report;

pub(crate) use report::{
    ReportOptions, print_describe, print_duration_stats, print_raw_page, print_station_stats,
    print_time_stats, print_user_stats,
};
