use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;

use serde_json::Value;
use tracing::{debug, info};

use schedule_cell::{SlotPlanner, WeekScheduleInput, WeekScheduleValidator};
use shared_config::AppConfig;
use shared_models::AppError;

pub const USAGE: &str = "usage: schedule-check [--slots] [SCHEDULE.json]";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Read from this file instead of stdin.
    pub path: Option<PathBuf>,
    /// Append weekly slot capacity to a valid result.
    pub show_slots: bool,
}

impl Options {
    pub fn parse<I>(args: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut options = Options::default();

        for arg in args {
            match arg.as_str() {
                "--slots" => options.show_slots = true,
                flag if flag.starts_with("--") => {
                    return Err(AppError::BadRequest(format!("unknown flag {}; {}", flag, USAGE)));
                }
                path if options.path.is_none() => options.path = Some(PathBuf::from(path)),
                extra => {
                    return Err(AppError::BadRequest(format!("unexpected argument {}; {}", extra, USAGE)));
                }
            }
        }

        Ok(options)
    }
}

/// Loads the week document from the configured file, or `stdin` otherwise.
pub fn read_document<R: Read>(options: &Options, mut stdin: R) -> Result<WeekScheduleInput, AppError> {
    let raw = match &options.path {
        Some(path) => {
            debug!("Reading schedule from {}", path.display());
            fs::read_to_string(path)?
        }
        None => {
            let mut buf = String::new();
            stdin.read_to_string(&mut buf)?;
            buf
        }
    };

    if raw.trim().is_empty() {
        return Err(AppError::BadRequest("no schedule document supplied".to_string()));
    }

    Ok(serde_json::from_str(&raw)?)
}

/// Validates one document and writes the result JSON to `out`. An invalid
/// schedule is still written out in full before returning `ValidationError`.
pub fn run<R: Read, W: Write>(
    options: &Options,
    config: &AppConfig,
    stdin: R,
    mut out: W,
) -> Result<(), AppError> {
    let input = read_document(options, stdin)?;
    let validation = WeekScheduleValidator::new().validate(&input);

    let mut report = serde_json::to_value(&validation)?;

    if options.show_slots {
        if let (Some(week), Value::Object(fields)) = (&validation.data, &mut report) {
            if config.has_slot_buffer() {
                debug!("Planning slots with a {} minute buffer", config.slot_buffer_minutes);
            }
            let capacity = SlotPlanner::new(config).weekly_capacity(week);
            info!("Week offers {} consultation slots", capacity.total_slots);
            fields.insert("capacity".to_string(), serde_json::to_value(&capacity)?);
        }
    }

    serde_json::to_writer_pretty(&mut out, &report)?;
    writeln!(out)?;

    if validation.valid {
        Ok(())
    } else {
        Err(AppError::ValidationError(format!(
            "{} issue(s) found in schedule",
            validation.errors.len()
        )))
    }
}
