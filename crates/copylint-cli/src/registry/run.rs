use std::fs::{OpenOptions, create_dir_all};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use copylint_validate::ExportedReport;

use super::{RegistryError, RegistryResult};

/// Metadata captured at run start.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub run_dir: PathBuf,
    pub strict: bool,
    pub de_path: PathBuf,
    pub en_path: PathBuf,
    pub config_path: PathBuf,
}

/// JSON manifest written to each run directory.
#[derive(Debug, Serialize)]
pub struct RunManifest {
    pub run_id: String,
    pub started_at: String,
    pub tool_version: String,
    pub strict: bool,
    pub inputs: RunInputs,
}

#[derive(Debug, Serialize)]
pub struct RunInputs {
    pub de: String,
    pub en: String,
    pub config: String,
}

/// Paths for run artifacts.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub root: PathBuf,
    pub logs_path: PathBuf,
    pub export_path: PathBuf,
    pub report_path: PathBuf,
}

pub fn start_run(ctx: &RunContext) -> RegistryResult<RunPaths> {
    let timestamp = ctx.started_at.format("%Y-%m-%dT%H-%M-%SZ").to_string();
    let root = ctx.run_dir.join(format!("{timestamp}__run_{}", ctx.run_id));

    create_dir_all(&root)?;

    let manifest = RunManifest {
        run_id: ctx.run_id.clone(),
        started_at: ctx.started_at.to_rfc3339(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        strict: ctx.strict,
        inputs: RunInputs {
            de: ctx.de_path.display().to_string(),
            en: ctx.en_path.display().to_string(),
            config: ctx.config_path.display().to_string(),
        },
    };
    write_json(&root.join("run.json"), &manifest)?;

    let logs_path = root.join("logs.ndjson");
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&logs_path)?;

    Ok(RunPaths {
        export_path: root.join("report.json"),
        report_path: root.join("report.md"),
        logs_path,
        root,
    })
}

/// Write the export record, creating parent directories as needed.
pub fn write_export(path: &Path, export: &ExportedReport) -> RegistryResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent)?;
    }
    write_json(path, export)
}

pub fn write_report(path: &Path, markdown: &str) -> RegistryResult<()> {
    std::fs::write(path, markdown).map_err(RegistryError::from)
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> RegistryResult<()> {
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    serde_json::to_writer_pretty(file, value).map_err(RegistryError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn run_directory_is_named_by_time_and_id() {
        let base = std::env::temp_dir().join(format!("copylint-run-{}", uuid::Uuid::new_v4()));
        let ctx = RunContext {
            run_id: "abc".to_string(),
            started_at: Utc
                .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
                .single()
                .expect("valid time"),
            run_dir: base.clone(),
            strict: true,
            de_path: PathBuf::from("content/de.json"),
            en_path: PathBuf::from("content/en.json"),
            config_path: PathBuf::from("content/config.json"),
        };

        let paths = start_run(&ctx).expect("start run");
        assert!(paths.root.ends_with("2024-01-02T03-04-05Z__run_abc"));
        assert!(paths.logs_path.exists());

        let manifest: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(paths.root.join("run.json")).expect("read manifest"),
        )
        .expect("parse manifest");
        assert_eq!(manifest["inputs"]["de"], "content/de.json");
        assert_eq!(manifest["strict"], true);

        std::fs::remove_dir_all(&base).expect("cleanup");
    }
}
