//! 日志初始化
//!
//! TUI 占用整个终端，日志写到 `<config dir>/domain-tracker-tui/tui.log`。
//! 级别由 `RUST_LOG` 控制，默认 info。core 库的 `log` 记录经 tracing-log 桥接到同一文件。

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 日志文件名
const LOG_FILE: &str = "tui.log";

/// 初始化文件日志，返回日志文件路径
pub fn init_logging(dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .try_init()
        .context("installing log subscriber")?;

    Ok(path)
}
