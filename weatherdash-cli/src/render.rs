use chrono::{DateTime, Local};
use weatherdash_core::{
    CurrentWeather, ForecastDay, SavedLocation, Units,
    advice::{clothing_suggestions, fahrenheit_to_celsius, mph_to_mps, weather_alerts},
};

pub fn current_weather(weather: &CurrentWeather, units: Units) {
    let t = units.temperature_suffix();

    println!("{}, {}", weather.name, weather.country);
    println!("  {} ({})", weather.description, weather.condition);
    println!("  Temperature: {:.1}{t} (feels like {:.1}{t})", weather.temperature, weather.feels_like);
    println!("  Humidity:    {}%", weather.humidity_pct);
    println!("  Wind:        {:.1} {}", weather.wind_speed, units.speed_suffix());
    println!(
        "  Sunrise {}  Sunset {}",
        local_time(weather.sunrise),
        local_time(weather.sunset)
    );
    println!("  Observed at {}", weather.observed_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"));

    let (temp_c, wind_mps) = match units {
        Units::Metric => (weather.temperature, weather.wind_speed),
        Units::Imperial => (fahrenheit_to_celsius(weather.temperature), mph_to_mps(weather.wind_speed)),
    };

    println!();
    println!("What to wear:");
    for s in clothing_suggestions(temp_c, &weather.condition, wind_mps) {
        println!("  - {}: {}", s.item, s.reason);
    }

    println!();
    let alerts =
        weather_alerts(&weather.name, temp_c, weather.humidity_pct, &weather.condition, wind_mps);
    if alerts.is_empty() {
        println!("No current weather alerts for {}.", weather.name);
    }
    for alert in alerts {
        println!("! {}: {}", alert.title, alert.description);
        for tip in alert.tips {
            println!("    - {tip}");
        }
    }
}

pub fn forecast(query: &str, days: &[ForecastDay], units: Units) {
    let t = units.temperature_suffix();

    println!("Forecast for {query}:");
    for day in days {
        println!(
            "  {}  {:>4.0}{t} / {:>4.0}{t}  {:<12}  humidity {:>3}%  wind {:.1} {}",
            day.date.with_timezone(&Local).format("%a %b %e"),
            day.temp_min,
            day.temp_max,
            day.condition,
            day.humidity_pct,
            day.wind_speed,
            units.speed_suffix(),
        );
    }
}

pub fn saved_locations(locations: &[SavedLocation]) {
    if locations.is_empty() {
        println!("No saved locations yet.");
        return;
    }

    println!("Saved locations:");
    for loc in locations {
        println!(
            "  {}, {}  (lat {:.2}, lon {:.2})  sunrise {}  sunset {}",
            loc.name,
            loc.country,
            loc.lat,
            loc.lon,
            local_time(loc.sunrise),
            local_time(loc.sunset),
        );
    }
}

fn local_time(ts: i64) -> String {
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.with_timezone(&Local).format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}
