//! Daylight report for one day at one location.
//!
//! Usage: cargo run --bin daylight_report -- [OPTIONS]
//!
//! Options:
//!   --lat <DEG>        Latitude (default: 50.06)
//!   --lon <DEG>        Longitude (default: 19.94)
//!   --tz <ZONE>        IANA zone of the location (default: Europe/Warsaw)
//!   --day <N>          Day of year 1-365 (default: today)
//!   --weather <W>      Sunny, Cloudy or Rainy (default: Sunny)
//!   --year <YEAR>      Calendar year (default: current)
//!   --host-tz <ZONE>   Zone standing in for the host clock (default: system local)

use sunlight_sim::core::Location;
use sunlight_sim::solar::{daily_illuminance, sun_path_segments, sun_times, Weather};
use sunlight_sim::time::{
    clamp_day_of_year, current_year, format_date, format_time, today_day_of_year,
    validate_time_zone, HostClock, SimulatedInstantBuilder,
};

const BAR_WIDTH: f64 = 40.0;

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"),
    )
    .init();

    let args: Vec<String> = std::env::args().collect();
    let lat = parse_f64_arg(&args, "--lat").unwrap_or(50.06);
    let lon = parse_f64_arg(&args, "--lon").unwrap_or(19.94);
    let tz = parse_str_arg(&args, "--tz").unwrap_or_else(|| "Europe/Warsaw".to_string());
    let day = parse_i64_arg(&args, "--day")
        .map(clamp_day_of_year)
        .unwrap_or_else(today_day_of_year);
    let year = parse_i64_arg(&args, "--year").map(|y| y as i32).unwrap_or_else(current_year);
    let weather = match parse_str_arg(&args, "--weather").map(|w| w.parse::<Weather>()) {
        Some(Ok(w)) => w,
        Some(Err(e)) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
        None => Weather::Sunny,
    };
    let host = match HostClock::from_name(parse_str_arg(&args, "--host-tz").as_deref()) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    if validate_time_zone(&tz).is_err() {
        eprintln!("warning: unknown time zone '{}', times shown in UTC", tz);
    }

    let location = Location::new(lat, lon, tz);
    let builder = SimulatedInstantBuilder::new(year, host);

    println!(
        "{} {} at {:.2}, {:.2} ({}), {}",
        format_date(day),
        year,
        location.latitude,
        location.longitude,
        location.time_zone,
        weather.name()
    );

    let times = sun_times(&builder, day, &location);
    let fmt = |m: Option<u16>| m.map(format_time).unwrap_or_else(|| "--:--".to_string());
    println!(
        "sunrise {}  solar noon {}  sunset {}",
        fmt(times.sunrise),
        format_time(times.solar_noon),
        fmt(times.sunset)
    );
    match times.day_length() {
        Some(len) => println!("day length {}h {:02}m", len / 60, len % 60),
        None => println!("no sunrise or sunset (polar day or night)"),
    }

    let curve = daily_illuminance(&builder, day, &location).with_weather(weather);
    let (_, peak) = curve.peak();
    println!();
    for (hour, lux) in curve.hourly.iter().enumerate() {
        let bar = if peak > 0.0 { (lux / peak * BAR_WIDTH).round() as usize } else { 0 };
        println!("{:02}:00 {:>8.0} lx {}", hour, lux, "#".repeat(bar));
    }

    let path = sun_path_segments(&builder, day, &location);
    println!();
    println!(
        "sun path: {} day segment(s), {} night segment(s), {} samples",
        path.day_segments().count(),
        path.night_segments().count(),
        path.sample_count()
    );
}

fn parse_f64_arg(args: &[String], flag: &str) -> Option<f64> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_i64_arg(args: &[String], flag: &str) -> Option<i64> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
