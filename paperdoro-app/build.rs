//! Build script for paperdoro-app
//!
//! Validates appliance.toml before it is embedded, so a bad value is a
//! compile error instead of a silent fallback to defaults on the device.

use std::fs;
use std::path::Path;

const CONFIG_FILE: &str = "appliance.toml";

fn main() {
    println!("cargo:rerun-if-changed={}", CONFIG_FILE);
    println!("cargo:rerun-if-changed=build.rs");

    let config = load();

    let mut errors = Vec::new();
    validate_version(&config, &mut errors);
    validate_timer(&config, &mut errors);
    validate_power(&config, &mut errors);
    validate_layout(&config, &mut errors);
    validate_input(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid appliance.toml", &errors);
    }
}

fn load() -> toml::Value {
    let path = Path::new(CONFIG_FILE);
    if !path.exists() {
        fail(
            "appliance.toml not found",
            &[String::from("The firmware embeds appliance.toml from the crate root.")],
        );
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read appliance.toml", &[e.to_string()]),
    };

    match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            let lines: Vec<String> = e.to_string().lines().map(String::from).collect();
            fail("Invalid TOML syntax in appliance.toml", &lines)
        }
    }
}

/// Abort the build with a boxed error listing
fn fail(title: &str, lines: &[String]) -> ! {
    let body = lines
        .iter()
        .map(|line| {
            let truncated = if line.chars().count() > 62 {
                format!("{}...", line.chars().take(59).collect::<String>())
            } else {
                line.clone()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}

fn section<'a>(
    config: &'a toml::Value,
    name: &str,
    errors: &mut Vec<String>,
) -> Option<&'a toml::value::Table> {
    match config.get(name) {
        Some(toml::Value::Table(t)) => Some(t),
        Some(_) => {
            errors.push(format!("[{}] must be a table", name));
            None
        }
        None => {
            errors.push(format!("Missing [{}] section", name));
            None
        }
    }
}

/// Check an optional integer key against an inclusive range
fn check_range(
    table: &toml::value::Table,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    match table.get(key) {
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => {}
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max))
        }
        Some(_) => errors.push(format!("[{}] {} must be an integer", section, key)),
        None => {}
    }
}

fn check_label(table: &toml::value::Table, section: &str, key: &str, max_len: usize, errors: &mut Vec<String>) {
    match table.get(key) {
        Some(toml::Value::String(s)) if s.len() <= max_len => {}
        Some(toml::Value::String(_)) => {
            errors.push(format!("[{}] {} longer than {} bytes", section, key, max_len))
        }
        Some(_) => errors.push(format!("[{}] {} must be a string", section, key)),
        None => {}
    }
}

fn validate_version(config: &toml::Value, errors: &mut Vec<String>) {
    match config.get("version") {
        Some(toml::Value::Integer(1)) => {}
        Some(_) => errors.push(String::from("version must be 1")),
        None => errors.push(String::from("Missing 'version'")),
    }
}

fn validate_timer(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(timer) = section(config, "timer", errors) else {
        return;
    };

    check_range(timer, "timer", "default_minutes", 1, 60, errors);

    match timer.get("presets") {
        Some(toml::Value::Array(presets)) => {
            if presets.len() != 3 {
                errors.push(format!("[timer] presets needs exactly 3 entries, found {}", presets.len()));
            }
            for (i, preset) in presets.iter().enumerate() {
                match preset {
                    toml::Value::Integer(m) if (1..=60).contains(m) => {}
                    _ => errors.push(format!("[timer] preset {} must be 1-60", i)),
                }
            }
        }
        Some(_) => errors.push(String::from("[timer] presets must be an array")),
        None => {}
    }

    if let Some(policy) = timer.get("preset_policy") {
        match policy.as_str() {
            Some("force_apply") | Some("reject_while_active") => {}
            _ => errors.push(String::from(
                "[timer] preset_policy must be 'force_apply' or 'reject_while_active'",
            )),
        }
    }
}

fn validate_power(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(power) = section(config, "power", errors) else {
        return;
    };

    check_range(power, "power", "idle_timeout_s", 1, u32::MAX as i64, errors);
    check_range(power, "power", "battery_interval_s", 1, u32::MAX as i64, errors);
    check_range(power, "power", "lock_settle_ms", 0, u32::MAX as i64, errors);
    check_label(power, "power", "lock_image", 48, errors);

    if let Some(toml::Value::String(path)) = power.get("lock_image") {
        if !path.starts_with('/') {
            errors.push(String::from("[power] lock_image must be an absolute path"));
        }
    }
}

fn validate_layout(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(layout) = section(config, "layout", errors) else {
        return;
    };

    for key in ["outer_radius", "inner_radius", "outer_dot_radius", "inner_dot_radius"] {
        check_range(layout, "layout", key, 1, 1000, errors);
    }
    check_label(layout, "layout", "title", 16, errors);
    check_label(layout, "layout", "subtitle", 16, errors);

    let radius = |key: &str| layout.get(key).and_then(|v| v.as_integer());
    if let (Some(outer), Some(inner), Some(outer_dot), Some(inner_dot)) = (
        radius("outer_radius"),
        radius("inner_radius"),
        radius("outer_dot_radius"),
        radius("inner_dot_radius"),
    ) {
        if inner + inner_dot >= outer - outer_dot {
            errors.push(String::from("[layout] minutes ring overlaps the seconds ring"));
        }
    }
}

fn validate_input(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(input) = section(config, "input", errors) else {
        return;
    };
    check_range(input, "input", "debounce_ms", 0, 10_000, errors);
}
