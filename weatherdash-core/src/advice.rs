//! Clothing suggestions and alerts derived from current conditions.

/// Wind speed (m/s) above which a scarf is suggested.
const WINDY_MPS: f64 = 20.0;

const EXTREME_HEAT_C: f64 = 35.0;
const HIGH_TEMP_C: f64 = 30.0;
const STRONG_WIND_MPS: f64 = 15.0;
const HUMID_PCT: u8 = 80;
const HUMID_HEAT_C: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    pub item: &'static str,
    pub reason: &'static str,
}

const fn s(item: &'static str, reason: &'static str) -> Suggestion {
    Suggestion { item, reason }
}

/// What to wear for a temperature (°C), a condition group such as `Rain`,
/// and a wind speed (m/s).
pub fn clothing_suggestions(temp_c: f64, condition: &str, wind_mps: f64) -> Vec<Suggestion> {
    let mut out = if temp_c < 0.0 {
        vec![
            s("Heavy winter coat", "Protects against extreme cold"),
            s("Thermal underwear", "Provides base layer insulation"),
            s("Warm hat and gloves", "Prevents heat loss from head and hands"),
        ]
    } else if temp_c < 10.0 {
        vec![
            s("Winter coat", "Suitable for cold temperatures"),
            s("Sweater", "Adds an extra layer of warmth"),
            s("Warm socks", "Keeps feet cozy in cold weather"),
        ]
    } else if temp_c < 20.0 {
        vec![
            s("Light jacket or sweater", "Perfect for mild temperatures"),
            s("Long-sleeved shirt", "Provides moderate coverage"),
        ]
    } else if temp_c < 30.0 {
        vec![
            s("T-shirt", "Comfortable in warm weather"),
            s("Light pants or shorts", "Allows for air circulation"),
        ]
    } else {
        vec![
            s("Light, breathable clothing", "Helps stay cool in hot weather"),
            s("Shorts", "Ideal for high temperatures"),
            s("Sunhat", "Protects from strong sun"),
        ]
    };

    if condition.eq_ignore_ascii_case("rain") {
        out.push(s("Raincoat or umbrella", "Keeps you dry in wet conditions"));
        out.push(s("Waterproof shoes", "Prevents wet feet in rainy weather"));
    }

    if condition.eq_ignore_ascii_case("snow") {
        out.push(s("Snow boots", "Provides traction and warmth in snowy conditions"));
        out.push(s("Waterproof gloves", "Keeps hands dry and warm in snow"));
    }

    if wind_mps > WINDY_MPS {
        out.push(s("Scarf or neck gaiter", "Protects against strong winds"));
    }

    out
}

/// Actionable alert raised from current conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherAlert {
    pub title: &'static str,
    pub description: String,
    pub tips: &'static [&'static str],
}

fn alert(title: &'static str, description: String, tips: &'static [&'static str]) -> WeatherAlert {
    WeatherAlert { title, description, tips }
}

/// Alerts for a place given temperature (°C), humidity (%), a condition
/// group such as `Thunderstorm`, and wind speed (m/s).
///
/// At most one temperature alert and one condition alert are raised.
pub fn weather_alerts(
    place: &str,
    temp_c: f64,
    humidity_pct: u8,
    condition: &str,
    wind_mps: f64,
) -> Vec<WeatherAlert> {
    let mut out = Vec::new();

    if temp_c > EXTREME_HEAT_C {
        out.push(alert(
            "Extreme Heat",
            format!("Dangerous heat conditions in {place}."),
            &[
                "Stay indoors in air-conditioned areas",
                "Drink plenty of water, even if not thirsty",
                "Wear lightweight, light-colored clothing",
                "Avoid strenuous activities during peak hours",
            ],
        ));
    } else if temp_c > HIGH_TEMP_C {
        out.push(alert(
            "High Temperature",
            format!("Very warm conditions in {place}."),
            &[
                "Stay hydrated with cool drinks",
                "Seek shade when outdoors",
                "Use sunscreen and wear a hat",
                "Check on elderly neighbors and those with health conditions",
            ],
        ));
    } else if temp_c < 0.0 {
        out.push(alert(
            "Freezing Temperatures",
            format!("Very cold conditions in {place}."),
            &[
                "Dress in warm layers",
                "Protect exposed skin when outside",
                "Keep your home heated",
                "Check on vulnerable neighbors",
            ],
        ));
    }

    match condition.to_ascii_lowercase().as_str() {
        "thunderstorm" => out.push(alert(
            "Thunderstorm Warning",
            format!("Thunderstorms expected in {place}."),
            &[
                "Stay indoors and away from windows",
                "Unplug electronic devices",
                "Avoid using landline phones",
                "If outside, seek shelter immediately",
            ],
        )),
        "rain" => out.push(alert(
            "Rain Alert",
            format!("Rainy conditions in {place}."),
            &[
                "Carry an umbrella or raincoat",
                "Drive carefully on wet roads",
                "Check for any flood warnings in your area",
                "Ensure proper drainage around your home",
            ],
        )),
        "snow" => out.push(alert(
            "Snowfall Alert",
            format!("Snowy conditions in {place}."),
            &[
                "Drive slowly and maintain a safe distance",
                "Clear snow from walkways and driveways",
                "Dress warmly and in layers",
                "Be cautious of ice under the snow",
            ],
        )),
        _ => {}
    }

    if wind_mps > STRONG_WIND_MPS {
        out.push(alert(
            "Strong Winds",
            format!("High winds expected in {place}."),
            &[
                "Secure outdoor furniture and decorations",
                "Close and lock all windows and doors",
                "Park vehicles away from trees if possible",
                "Be cautious of falling branches or debris when outside",
            ],
        ));
    }

    if humidity_pct > HUMID_PCT && temp_c > HUMID_HEAT_C {
        out.push(alert(
            "High Humidity",
            format!("Very humid conditions in {place}."),
            &[
                "Stay in air-conditioned areas when possible",
                "Drink plenty of water to stay hydrated",
                "Wear light, breathable clothing",
                "Limit strenuous outdoor activities",
            ],
        ));
    }

    out
}

pub fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

pub fn mph_to_mps(mph: f64) -> f64 {
    mph * 0.44704
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(v: &[Suggestion]) -> Vec<&'static str> {
        v.iter().map(|s| s.item).collect()
    }

    #[test]
    fn temperature_bands_pick_base_outfit() {
        assert_eq!(items(&clothing_suggestions(-5.0, "Clear", 0.0))[0], "Heavy winter coat");
        assert_eq!(items(&clothing_suggestions(0.0, "Clear", 0.0))[0], "Winter coat");
        assert_eq!(items(&clothing_suggestions(15.0, "Clear", 0.0))[0], "Light jacket or sweater");
        assert_eq!(items(&clothing_suggestions(20.0, "Clear", 0.0))[0], "T-shirt");
        assert_eq!(items(&clothing_suggestions(30.0, "Clear", 0.0))[0], "Light, breathable clothing");
    }

    #[test]
    fn rain_snow_and_wind_add_items() {
        let rainy = items(&clothing_suggestions(15.0, "rain", 0.0));
        assert!(rainy.contains(&"Raincoat or umbrella"));
        assert!(rainy.contains(&"Waterproof shoes"));

        let snowy = items(&clothing_suggestions(-2.0, "Snow", 0.0));
        assert!(snowy.contains(&"Snow boots"));

        let calm = items(&clothing_suggestions(15.0, "Clear", 20.0));
        assert!(!calm.contains(&"Scarf or neck gaiter"));
        let windy = items(&clothing_suggestions(15.0, "Clear", 20.5));
        assert!(windy.contains(&"Scarf or neck gaiter"));
    }

    fn titles(v: &[WeatherAlert]) -> Vec<&'static str> {
        v.iter().map(|a| a.title).collect()
    }

    #[test]
    fn mild_calm_weather_raises_nothing() {
        assert!(weather_alerts("Paris", 18.0, 50, "Clear", 3.0).is_empty());
    }

    #[test]
    fn temperature_alerts_are_exclusive() {
        assert_eq!(titles(&weather_alerts("Cairo", 36.0, 10, "Clear", 0.0)), ["Extreme Heat"]);
        assert_eq!(titles(&weather_alerts("Cairo", 35.0, 10, "Clear", 0.0)), ["High Temperature"]);
        assert!(weather_alerts("Cairo", 30.0, 10, "Clear", 0.0).is_empty());
        assert_eq!(titles(&weather_alerts("Oslo", -0.5, 10, "Clear", 0.0)), ["Freezing Temperatures"]);
        assert!(weather_alerts("Oslo", 0.0, 10, "Clear", 0.0).is_empty());
    }

    #[test]
    fn condition_wind_and_humidity_alerts_stack() {
        let alerts = weather_alerts("Miami", 31.0, 85, "thunderstorm", 16.0);

        assert_eq!(
            titles(&alerts),
            ["High Temperature", "Thunderstorm Warning", "Strong Winds", "High Humidity"]
        );
        assert_eq!(alerts[1].description, "Thunderstorms expected in Miami.");
        assert_eq!(alerts[1].tips.len(), 4);
    }

    #[test]
    fn humidity_alert_needs_heat_too() {
        assert!(weather_alerts("London", 20.0, 95, "Clouds", 0.0).is_empty());
        assert_eq!(titles(&weather_alerts("Lagos", 26.0, 81, "Clouds", 0.0)), ["High Humidity"]);
        assert!(weather_alerts("Lagos", 26.0, 80, "Clouds", 0.0).is_empty());
    }

    #[test]
    fn rain_and_snow_alerts() {
        assert_eq!(titles(&weather_alerts("Bergen", 8.0, 70, "Rain", 0.0)), ["Rain Alert"]);
        assert_eq!(
            titles(&weather_alerts("Sapporo", -3.0, 70, "Snow", 15.0)),
            ["Freezing Temperatures", "Snowfall Alert"]
        );
    }

    #[test]
    fn unit_conversions() {
        assert!((fahrenheit_to_celsius(212.0) - 100.0).abs() < 1e-9);
        assert!((mph_to_mps(10.0) - 4.4704).abs() < 1e-9);
    }
}
